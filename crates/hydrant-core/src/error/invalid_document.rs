use super::Error;

/// Error when raw document data does not have the shape its mapping expects.
///
/// This occurs when:
/// - A reference descriptor is not a document or is missing `$id`
/// - An embedded value is not a document
/// - A collection value is not a list
#[derive(Debug)]
pub(super) struct InvalidDocumentError {
    message: Box<str>,
}

impl std::error::Error for InvalidDocumentError {}

impl core::fmt::Display for InvalidDocumentError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid document: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid document error.
    pub fn invalid_document(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidDocument(InvalidDocumentError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error (or any error it wraps) is an invalid document error.
    pub fn is_invalid_document(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidDocument(_)))
    }
}
