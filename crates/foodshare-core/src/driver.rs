use crate::{ResultTable, Value};

use std::{borrow::Cow, fmt::Debug};

/// A database backend that can open connections.
pub trait Driver: Debug + Send + Sync + 'static {
    /// Connection URL this driver was created from.
    fn url(&self) -> Cow<'_, str>;

    /// Opens a new connection.
    fn connect(&self) -> crate::Result<Box<dyn Connection>>;

    /// Upper bound on live connections, if the backend imposes one.
    fn max_connections(&self) -> Option<usize> {
        None
    }
}

/// A single open connection.
///
/// Every method runs exactly one statement; grouping statements atomically is
/// done with [`Connection::transaction`].
pub trait Connection: Debug + Send {
    /// Runs a statement and collects every row it produces.
    fn query(&mut self, sql: &str, params: &[Value]) -> crate::Result<ResultTable>;

    /// Runs a statement that produces no rows, returning the number of rows changed.
    fn execute(&mut self, sql: &str, params: &[Value]) -> crate::Result<u64>;

    /// Returns `true` if the statement cannot modify the database.
    fn is_read_only(&mut self, sql: &str) -> crate::Result<bool>;

    /// Rowid of the most recent successful insert on this connection.
    fn last_insert_id(&self) -> i64;

    /// Starts, commits or rolls back a transaction.
    fn transaction(&mut self, op: Transaction) -> crate::Result<()>;

    /// Returns `true` if a table called `name` exists.
    fn table_exists(&mut self, name: &str) -> crate::Result<bool>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transaction {
    Start,
    Commit,
    Rollback,
}
