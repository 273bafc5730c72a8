//! Transaction ID type definition and the sequence that assigns new IDs.

use crate::transaction::Transaction;

/// Alias for the integer type used for transaction IDs.
pub type TransactionId = i64;

/// Hands out IDs for new transactions.
///
/// The sequence continues after the largest ID already in the collection, so
/// it must be seeded from a freshly loaded collection and discarded once the
/// batch of additions it was created for has been persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSequence {
    current: TransactionId,
}

impl IdSequence {
    /// Create a sequence that continues after the largest ID in
    /// `transactions`.
    ///
    /// The first value handed out is 1 when `transactions` is empty.
    pub fn after(transactions: &[Transaction]) -> Self {
        Self {
            current: transactions
                .iter()
                .map(|transaction| transaction.id)
                .max()
                .unwrap_or(0),
        }
    }

    /// The next unused ID.
    ///
    /// Within one sequence, successive calls never repeat a value and
    /// increase by exactly 1.
    pub fn next(&mut self) -> TransactionId {
        self.current += 1;
        self.current
    }
}
