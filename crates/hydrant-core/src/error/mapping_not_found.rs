use super::Error;

/// Error when no class mapping (or no loadable procedure) exists for a class.
///
/// This occurs when:
/// - A class is requested that was never registered with the schema
/// - Auto-generation is disabled and the persisted procedure is missing,
///   unreadable or stale
#[derive(Debug)]
pub(super) struct MappingNotFoundError {
    class: Box<str>,
}

impl std::error::Error for MappingNotFoundError {}

impl core::fmt::Display for MappingNotFoundError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "no class mapping found for `{}`", self.class)
    }
}

impl Error {
    /// Creates a mapping not found error for the given class.
    pub fn mapping_not_found(class: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MappingNotFound(MappingNotFoundError {
            class: class.into().into(),
        }))
    }

    /// Returns `true` if this error (or any error it wraps) is a mapping not found error.
    pub fn is_mapping_not_found(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::MappingNotFound(_)))
    }
}
