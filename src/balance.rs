//! Balance aggregation over the transaction collection.

use crate::transaction::{Transaction, TransactionKind};

/// The signed sum over `transactions`: income counts positive, expenses
/// negative.
pub fn balance(transactions: &[Transaction]) -> f64 {
    transactions.iter().map(Transaction::signed_amount).sum()
}

/// The totals shown in the UI's metric row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BalanceSummary {
    /// Total income.
    pub income: f64,
    /// Total expenses, as a positive magnitude.
    pub expenses: f64,
    /// `income - expenses`, equal to [balance] over the same collection.
    pub net: f64,
}

/// Compute the income, expense and net totals for `transactions`.
pub fn summarize(transactions: &[Transaction]) -> BalanceSummary {
    let income = transactions
        .iter()
        .filter(|transaction| transaction.kind == TransactionKind::Income)
        .map(|transaction| transaction.amount)
        .sum::<f64>();

    let expenses = transactions
        .iter()
        .filter(|transaction| transaction.kind == TransactionKind::Expense)
        .map(|transaction| transaction.amount)
        .sum::<f64>();

    BalanceSummary {
        income,
        expenses,
        net: income - expenses,
    }
}
