use super::Error;

/// Error when a field's concrete class cannot be determined.
///
/// This occurs when:
/// - A discriminator value in the raw data is not listed in the discriminator map
/// - A discriminator value names a class that is not registered
/// - No discriminator value is present and the field has no target class hint
#[derive(Debug)]
pub(super) struct DiscriminatorResolutionError {
    field: Box<str>,
    value: Option<Box<str>>,
}

impl std::error::Error for DiscriminatorResolutionError {}

impl core::fmt::Display for DiscriminatorResolutionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match &self.value {
            Some(value) => write!(
                f,
                "discriminator value `{}` for field `{}` does not map to a known class",
                value, self.field
            ),
            None => write!(
                f,
                "field `{}` has neither a discriminator value nor a target class",
                self.field
            ),
        }
    }
}

impl Error {
    /// Creates a discriminator resolution error for an unmapped discriminator value.
    pub fn discriminator_resolution(field: impl Into<String>, value: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::DiscriminatorResolution(
            DiscriminatorResolutionError {
                field: field.into().into(),
                value: Some(value.into().into()),
            },
        ))
    }

    /// Creates a discriminator resolution error for a field with no way to
    /// pick a class.
    pub fn unresolved_target(field: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::DiscriminatorResolution(
            DiscriminatorResolutionError {
                field: field.into().into(),
                value: None,
            },
        ))
    }

    /// Returns `true` if this error (or any error it wraps) is a discriminator
    /// resolution error.
    pub fn is_discriminator_resolution(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::DiscriminatorResolution(_)))
    }
}
