use super::PoolConnection;

use foodshare_core::{driver, Result, ResultTable, Value};

/// A scoped transaction on one pooled connection.
///
/// Created by [`Db::transaction`](super::Db::transaction). Reads made here
/// see the transaction's own uncommitted writes and bypass the query cache.
#[derive(Debug)]
pub struct Transaction {
    conn: PoolConnection,
    wrote: bool,
}

impl Transaction {
    pub(super) fn begin(mut conn: PoolConnection) -> Result<Self> {
        conn.transaction(driver::Transaction::Start)?;
        Ok(Self { conn, wrote: false })
    }

    pub fn query(&mut self, sql: &str, params: &[Value]) -> Result<ResultTable> {
        self.conn.query(sql, params)
    }

    /// Runs a write statement, returning the number of rows changed.
    pub fn execute(&mut self, sql: &str, params: &[Value]) -> Result<u64> {
        let count = self.conn.execute(sql, params)?;
        self.wrote = true;
        Ok(count)
    }

    /// Rowid assigned by the most recent insert in this transaction.
    pub fn last_insert_id(&self) -> i64 {
        self.conn.last_insert_id()
    }

    /// Commits, returning whether any write statement ran. A commit that
    /// fails is rolled back by the driver.
    pub(super) fn commit(mut self) -> Result<bool> {
        self.conn.transaction(driver::Transaction::Commit)?;
        Ok(self.wrote)
    }

    pub(super) fn rollback(mut self) -> Result<()> {
        self.conn.transaction(driver::Transaction::Rollback)
    }
}
