use super::Error;

/// Error when a record lookup by key returns no results.
#[derive(Debug)]
pub(super) struct RecordNotFoundError {
    table: &'static str,
    key: i64,
}

impl std::error::Error for RecordNotFoundError {}

impl core::fmt::Display for RecordNotFoundError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "record not found: {} #{}", self.table, self.key)
    }
}

impl Error {
    /// Creates a record not found error for the given table and primary key.
    pub fn record_not_found(table: &'static str, key: i64) -> Error {
        Error::from(super::ErrorKind::RecordNotFound(RecordNotFoundError {
            table,
            key,
        }))
    }

    /// Returns `true` if this error is a record not found error.
    pub fn is_record_not_found(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::RecordNotFound(_)))
    }
}
