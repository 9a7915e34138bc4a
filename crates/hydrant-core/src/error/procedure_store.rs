use super::Error;

/// Error reading or writing a generated procedure artifact.
///
/// This is a configuration-level failure (bad directory, permissions, corrupt
/// artifact). It is never the result of the raw data being hydrated.
#[derive(Debug)]
pub(super) struct ProcedureStoreError {
    path: Box<str>,
    inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for ProcedureStoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for ProcedureStoreError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "procedure store `{}`: ", self.path)?;
        core::fmt::Display::fmt(&self.inner, f)?;
        let mut source = self.inner.source();
        while let Some(err) = source {
            write!(f, ": {}", err)?;
            source = err.source();
        }
        Ok(())
    }
}

impl Error {
    /// Creates a procedure store error for the artifact at `path`.
    pub fn procedure_store(
        path: impl Into<String>,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Error {
        Error::from(super::ErrorKind::ProcedureStore(ProcedureStoreError {
            path: path.into().into(),
            inner: Box::new(err),
        }))
    }

    /// Returns `true` if this error (or any error it wraps) is a procedure store error.
    pub fn is_procedure_store(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::ProcedureStore(_)))
    }
}
