mod transaction_manager;
use transaction_manager::TransactionManager;

mod value;
use value::Value;

use foodshare_core::{
    driver::{Driver, Transaction},
    Connection as _, Error, Result, ResultTable, Value as CoreValue,
};
use rusqlite::Connection as RusqliteConnection;
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};
use url::Url;

#[derive(Debug)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite driver from a `sqlite:` connection URL
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str)
            .map_err(|err| Error::invalid_connection_url(format!("{err}; url={url_str}")))?;

        if url.scheme() != "sqlite" {
            return Err(Error::invalid_connection_url(format!(
                "connection URL does not have a `sqlite` scheme; url={}",
                url_str
            )));
        }

        if url.path() == ":memory:" {
            Ok(Self::InMemory)
        } else {
            Ok(Self::File(PathBuf::from(url.path())))
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }
}

impl Driver for Sqlite {
    fn url(&self) -> Cow<'_, str> {
        match self {
            Sqlite::InMemory => Cow::Borrowed("sqlite::memory:"),
            Sqlite::File(path) => Cow::Owned(format!("sqlite:{}", path.display())),
        }
    }

    fn connect(&self) -> Result<Box<dyn foodshare_core::Connection>> {
        let connection = match self {
            Sqlite::File(path) => Connection::open(path)?,
            Sqlite::InMemory => Connection::in_memory()?,
        };
        Ok(Box::new(connection))
    }

    fn max_connections(&self) -> Option<usize> {
        // Each in-memory connection is its own database
        matches!(self, Self::InMemory).then_some(1)
    }
}

#[derive(Debug)]
pub struct Connection {
    connection: RusqliteConnection,
    transaction_manager: TransactionManager,
}

impl Connection {
    pub fn in_memory() -> Result<Self> {
        let connection = RusqliteConnection::open_in_memory().map_err(Error::storage)?;
        Self::new(connection)
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = RusqliteConnection::open(path).map_err(Error::storage)?;
        Self::new(connection)
    }

    fn new(connection: RusqliteConnection) -> Result<Self> {
        // The bundled library enforces declared foreign keys by default. The
        // loader replaces parent tables while child rows still point at them,
        // so references are checked by the repositories instead.
        connection
            .pragma_update(None, "foreign_keys", false)
            .map_err(Error::storage)?;

        Ok(Self {
            connection,
            transaction_manager: TransactionManager::new(),
        })
    }
}

impl foodshare_core::Connection for Connection {
    fn query(&mut self, sql: &str, params: &[CoreValue]) -> Result<ResultTable> {
        log::debug!("query; sql={sql}; params={params:?}");

        let mut stmt = self.connection.prepare_cached(sql).map_err(Error::storage)?;

        let columns = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();
        let width = columns.len();
        let mut ret = ResultTable::new(columns);

        let mut rows = stmt
            .query(rusqlite::params_from_iter(params.iter().map(Value::from)))
            .map_err(Error::storage)?;

        loop {
            match rows.next() {
                Ok(Some(row)) => {
                    let mut items = Vec::with_capacity(width);

                    for index in 0..width {
                        let value = row.get_ref(index).map_err(Error::storage)?;
                        items.push(Value::from_sql(value));
                    }

                    ret.push(items);
                }
                Ok(None) => break,
                Err(err) => return Err(Error::storage(err)),
            }
        }

        Ok(ret)
    }

    fn execute(&mut self, sql: &str, params: &[CoreValue]) -> Result<u64> {
        log::debug!("execute; sql={sql}; params={params:?}");

        let mut stmt = self.connection.prepare_cached(sql).map_err(Error::storage)?;
        let count = stmt
            .execute(rusqlite::params_from_iter(params.iter().map(Value::from)))
            .map_err(Error::storage)?;

        Ok(count as u64)
    }

    fn is_read_only(&mut self, sql: &str) -> Result<bool> {
        let stmt = self.connection.prepare_cached(sql).map_err(Error::storage)?;
        Ok(stmt.readonly())
    }

    fn last_insert_id(&self) -> i64 {
        self.connection.last_insert_rowid()
    }

    fn transaction(&mut self, op: Transaction) -> Result<()> {
        let sql = self.transaction_manager.statement(op)?;
        log::debug!("transaction; sql={sql}");

        match self.connection.execute_batch(sql) {
            Ok(()) => {
                self.transaction_manager.complete(op);
                Ok(())
            }
            Err(err) => {
                // A failed COMMIT (busy database, deferred constraint) leaves
                // the transaction open
                if op == Transaction::Commit && !self.connection.is_autocommit() {
                    match self.connection.execute_batch("ROLLBACK") {
                        Ok(()) => self.transaction_manager.complete(Transaction::Rollback),
                        Err(rollback) => {
                            log::warn!("rollback after failed commit failed; err={rollback}")
                        }
                    }
                } else if self.connection.is_autocommit() {
                    self.transaction_manager.complete(Transaction::Rollback);
                }
                Err(Error::storage(err))
            }
        }
    }

    fn table_exists(&mut self, name: &str) -> Result<bool> {
        let table = self.query(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
            &[name.into()],
        )?;
        Ok(!table.is_empty())
    }
}
