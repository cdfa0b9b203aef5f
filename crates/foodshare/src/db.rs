mod builder;
pub use builder::Builder;

mod cache;
use cache::QueryCache;

mod pool;
pub use pool::{Pool, PoolConfig, PoolConnection};

mod transaction;
pub use transaction::Transaction;

use crate::repo::{Claims, Listings, Providers, Receivers};

use foodshare_core::{driver::Driver, schema::Schema, Error, Result, ResultTable, Value};

use std::sync::Arc;

/// Shared state between all `Db` clones.
#[derive(Debug)]
struct Shared {
    pool: Pool,
    cache: QueryCache,
}

/// A handle to the food-sharing database.
///
/// Reads go through a result cache keyed by `(sql, params)`; any write made
/// through this handle (or a clone of it) clears the cache. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct Db {
    shared: Arc<Shared>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Connects with default settings to a `sqlite:` URL.
    #[cfg(feature = "sqlite")]
    pub fn connect(url: &str) -> Result<Db> {
        Builder::default().connect(url)
    }

    /// Opens a fresh in-memory database with the schema already created.
    #[cfg(feature = "sqlite")]
    pub fn in_memory() -> Result<Db> {
        let db = Builder::default().build(foodshare_driver_sqlite::Sqlite::in_memory())?;
        db.push_schema()?;
        Ok(db)
    }

    pub fn driver(&self) -> &dyn Driver {
        self.shared.pool.driver()
    }

    /// Runs a read-only statement and returns its rows.
    ///
    /// Statements that could modify the database are rejected with a
    /// validation error.
    pub fn query(&self, sql: &str, params: &[Value]) -> Result<Arc<ResultTable>> {
        if let Some(hit) = self.shared.cache.get(sql, params) {
            log::debug!("query cache hit; sql={sql}");
            return Ok(hit);
        }

        let mut conn = self.shared.pool.get()?;

        if !conn.is_read_only(sql)? {
            return Err(Error::not_read_only(sql));
        }

        let table = Arc::new(conn.query(sql, params)?);
        self.shared.cache.insert(sql, params, table.clone());
        Ok(table)
    }

    /// Runs a write statement in its own transaction and commits it.
    pub fn execute(&self, sql: &str, params: &[Value]) -> Result<()> {
        self.transaction(|tx| tx.execute(sql, params).map(|_| ()))
    }

    /// Runs `f` on a single connection inside `BEGIN` / `COMMIT`.
    ///
    /// If `f` returns an error the transaction is rolled back and the error is
    /// returned unchanged.
    pub fn transaction<T>(&self, f: impl FnOnce(&mut Transaction) -> Result<T>) -> Result<T> {
        let conn = self.shared.pool.get()?;
        let mut tx = Transaction::begin(conn)?;

        match f(&mut tx) {
            Ok(value) => {
                let wrote = tx.commit()?;
                if wrote {
                    self.shared.cache.clear();
                }
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback() {
                    log::warn!("rollback failed; err={rollback_err}");
                }
                Err(err)
            }
        }
    }

    /// Returns `true` if a table called `name` exists.
    pub fn table_exists(&self, name: &str) -> Result<bool> {
        self.shared.pool.get()?.table_exists(name)
    }

    /// Creates any missing tables and indexes.
    pub fn push_schema(&self) -> Result<()> {
        self.transaction(|tx| {
            for table in Schema::FOOD.tables {
                tx.execute(&table.create_table_sql(), &[])?;
                for sql in table.create_indices_sql() {
                    tx.execute(&sql, &[])?;
                }
            }
            Ok(())
        })
    }

    pub fn providers(&self) -> Providers<'_> {
        Providers::new(self)
    }

    pub fn receivers(&self) -> Receivers<'_> {
        Receivers::new(self)
    }

    pub fn listings(&self) -> Listings<'_> {
        Listings::new(self)
    }

    pub fn claims(&self) -> Claims<'_> {
        Claims::new(self)
    }
}
