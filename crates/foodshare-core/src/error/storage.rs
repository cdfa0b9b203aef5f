use super::Error;

/// Error when the storage engine rejects an operation.
///
/// This wraps errors from the underlying database library:
/// - Connection errors (opening the database file)
/// - Malformed SQL
/// - Constraint violations reported by the engine
/// - Transaction statement failures (BEGIN, COMMIT, ROLLBACK)
#[derive(Debug)]
pub(super) struct StorageError {
    pub(super) inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("storage error: ")?;
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
    /// Creates an error from a storage engine failure.
    ///
    /// This is the preferred way to convert driver-specific errors (rusqlite, I/O) into
    /// foodshare errors.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(super::ErrorKind::Storage(StorageError {
            inner: Box::new(err),
        }))
    }

    /// Returns `true` if this error is a storage engine failure.
    pub fn is_storage(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::Storage(_)))
    }
}
