//! Connection pooling for database connections.

use std::{
    fmt,
    ops::{Deref, DerefMut},
};

use deadpool::unmanaged;
use foodshare_core::{driver::Driver, Connection, Error, Result};

/// Configuration for connection pool behavior.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Connections kept open for reuse. Drivers that cap their connection
    /// count (in-memory SQLite) override this.
    pub max_idle: usize,
}

impl PoolConfig {
    pub fn new() -> Self {
        Self { max_idle: 4 }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A pool of database connections.
///
/// Connections are opened on demand. Up to `max_idle` of them are handed to
/// the pool to be reused; any others are closed when released. A driver with
/// a connection cap has all of its connections opened up front and never
/// opens more.
pub struct Pool {
    driver: Box<dyn Driver>,
    inner: unmanaged::Pool<Box<dyn Connection>>,
    capped: bool,
}

impl Pool {
    /// Creates a new connection pool from the given driver.
    pub fn new(driver: impl Driver, config: PoolConfig) -> Result<Self> {
        let max_connections = driver.max_connections();

        let pool = Self {
            driver: Box::new(driver),
            inner: unmanaged::Pool::new(max_connections.unwrap_or(config.max_idle)),
            capped: max_connections.is_some(),
        };

        // Closing and reopening would lose an in-memory database
        for _ in 0..max_connections.unwrap_or(0) {
            let connection = pool.driver.connect()?;
            pool.inner
                .try_add(connection)
                .map_err(|(_, err)| Error::connection_pool(err))?;
        }

        Ok(pool)
    }

    pub fn driver(&self) -> &dyn Driver {
        &*self.driver
    }

    /// Retrieves a connection from the pool, opening one if none is idle.
    pub fn get(&self) -> Result<PoolConnection> {
        loop {
            match self.inner.try_get() {
                Ok(object) => return Ok(PoolConnection::Pooled(object)),
                Err(err) if self.capped => return Err(Error::connection_pool(err)),
                Err(_) => {}
            }

            let connection = self.driver.connect()?;
            if let Err((connection, _)) = self.inner.try_add(connection) {
                // Pool is full; this one closes on release
                return Ok(PoolConnection::Unpooled(connection));
            }
        }
    }
}

impl fmt::Debug for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("driver", &self.driver)
            .field("status", &self.inner.status())
            .field("capped", &self.capped)
            .finish()
    }
}

/// A connection retrieved from a pool.
///
/// When dropped, a pooled connection is returned to the pool for reuse and
/// an unpooled one is closed.
pub enum PoolConnection {
    Pooled(unmanaged::Object<Box<dyn Connection>>),
    Unpooled(Box<dyn Connection>),
}

impl Deref for PoolConnection {
    type Target = dyn Connection;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Pooled(object) => &***object,
            Self::Unpooled(connection) => &**connection,
        }
    }
}

impl DerefMut for PoolConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match self {
            Self::Pooled(object) => &mut ***object,
            Self::Unpooled(connection) => &mut **connection,
        }
    }
}

impl fmt::Debug for PoolConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let connection: &dyn Connection = &**self;
        match self {
            Self::Pooled(_) => f.debug_tuple("Pooled").field(&connection).finish(),
            Self::Unpooled(_) => f.debug_tuple("Unpooled").field(&connection).finish(),
        }
    }
}
