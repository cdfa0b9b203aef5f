use foodshare_core::{driver::Transaction, err, Result};

/// Tracks whether a connection is inside `BEGIN` and picks the statement for
/// each transaction operation.
///
/// State only changes once the statement has run; see [`complete`].
///
/// [`complete`]: TransactionManager::complete
#[derive(Debug, Default)]
pub(crate) struct TransactionManager {
    open: bool,
}

impl TransactionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// The statement that performs `op`.
    pub fn statement(&self, op: Transaction) -> Result<&'static str> {
        match (op, self.open) {
            (Transaction::Start, false) => Ok("BEGIN"),
            (Transaction::Commit, true) => Ok("COMMIT"),
            (Transaction::Rollback, true) => Ok("ROLLBACK"),
            (Transaction::Start, true) => Err(err!("a transaction is already in progress")),
            (_, false) => Err(err!("no transaction in progress")),
        }
    }

    /// Records that `op` ran.
    pub fn complete(&mut self, op: Transaction) {
        self.open = op == Transaction::Start;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}
