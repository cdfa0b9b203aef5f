use super::{Db, Pool, PoolConfig, QueryCache, Shared};
use foodshare_core::{driver::Driver, Result};

use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Builder {
    pool: PoolConfig,
    query_cache: bool,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            pool: PoolConfig::default(),
            query_cache: true,
        }
    }
}

impl Builder {
    /// Maximum number of idle connections kept for reuse. Zero opens a fresh
    /// connection for every call.
    pub fn max_idle_connections(&mut self, max_idle: usize) -> &mut Self {
        self.pool.max_idle = max_idle;
        self
    }

    /// Enables or disables the read-query result cache.
    pub fn query_cache(&mut self, enabled: bool) -> &mut Self {
        self.query_cache = enabled;
        self
    }

    #[cfg(feature = "sqlite")]
    pub fn connect(&self, url: &str) -> Result<Db> {
        self.build(foodshare_driver_sqlite::Sqlite::new(url)?)
    }

    pub fn build(&self, driver: impl Driver) -> Result<Db> {
        let pool = Pool::new(driver, self.pool.clone())?;
        log::debug!("opened database; url={}", pool.driver().url());

        Ok(Db {
            shared: Arc::new(Shared {
                pool,
                cache: QueryCache::new(self.query_cache),
            }),
        })
    }
}
