use super::Error;

/// Error when there is not enough data to fit a model.
#[derive(Debug)]
pub(super) struct InsufficientDataError {
    reason: Box<str>,
}

impl std::error::Error for InsufficientDataError {}

impl core::fmt::Display for InsufficientDataError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "insufficient data: {}", self.reason)
    }
}

impl Error {
    /// Creates an insufficient data error.
    ///
    /// Raised when the claim history cannot support fitting a classifier, for example
    /// when every claim carries the same label.
    pub fn insufficient_data(reason: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InsufficientData(InsufficientDataError {
            reason: reason.into().into_boxed_str(),
        }))
    }

    /// Returns `true` if this error is an insufficient data error.
    pub fn is_insufficient_data(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InsufficientData(_)))
    }
}
