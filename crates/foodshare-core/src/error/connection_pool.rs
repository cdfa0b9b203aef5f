use super::Error;

/// Error when no pooled connection can be handed out.
#[derive(Debug)]
pub(super) struct ConnectionPoolError {
    pub(super) inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for ConnectionPoolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for ConnectionPoolError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("connection pool error: ")?;
        core::fmt::Display::fmt(&self.inner, f)
    }
}

impl Error {
    /// Creates an error from a connection pool failure.
    pub fn connection_pool(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(super::ErrorKind::ConnectionPool(ConnectionPoolError {
            inner: Box::new(err),
        }))
    }

    /// Returns `true` if this error came from the connection pool.
    pub fn is_connection_pool(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::ConnectionPool(_)))
    }
}
