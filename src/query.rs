//! Pure functions for selecting, ordering and looking up transactions.
//!
//! Everything here operates on an in-memory collection and never touches the
//! ledger file. The UI loads the collection once per render and feeds it
//! through these functions to produce the displayed view.

use std::{cmp::Ordering, str::FromStr};

use crate::{
    Error,
    transaction::{Transaction, TransactionKind},
    transaction_id::TransactionId,
};

/// Keep the transactions matching `predicate`, preserving their relative
/// order.
pub fn select<P>(transactions: &[Transaction], predicate: P) -> Vec<Transaction>
where
    P: Fn(&Transaction) -> bool,
{
    transactions
        .iter()
        .filter(|transaction| predicate(transaction))
        .cloned()
        .collect()
}

/// Find the transaction with `id`.
///
/// # Errors
/// This function will return an [Error::NotFound] if no transaction has the
/// given ID.
pub fn find_by_id(
    transactions: &[Transaction],
    id: TransactionId,
) -> Result<&Transaction, Error> {
    transactions
        .iter()
        .find(|transaction| transaction.id == id)
        .ok_or(Error::NotFound)
}

/// The filter built from the UI's sidebar: which kinds to keep and an
/// optional category search text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    /// Keep only transactions of these kinds. An empty list keeps every kind.
    pub kinds: Vec<TransactionKind>,
    /// Keep only transactions whose category contains this text, compared
    /// case-insensitively. Blank text keeps every category.
    pub category_contains: Option<String>,
}

impl TransactionFilter {
    /// Whether `transaction` passes the filter.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        let kind_matches = self.kinds.is_empty() || self.kinds.contains(&transaction.kind);

        let category_matches = match &self.category_contains {
            Some(text) => {
                let needle = text.trim().to_lowercase();
                needle.is_empty() || transaction.category.to_lowercase().contains(&needle)
            }
            None => true,
        };

        kind_matches && category_matches
    }
}

/// The fields transactions can be ordered by.
///
/// This is a closed set: [SortField::from_str] rejects any other name with an
/// [Error::UnknownSortField] instead of silently returning an unsorted view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    /// The transaction ID, compared numerically.
    Id,
    /// The transaction kind, compared on its wire name
    /// ("despesa" before "receita").
    Kind,
    /// The amount, compared numerically.
    Amount,
    /// The description text.
    Description,
    /// The category text.
    Category,
    /// The creation timestamp, compared on its text form.
    CreatedAt,
}

impl FromStr for SortField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortField::Id),
            "tipo" => Ok(SortField::Kind),
            "valor" => Ok(SortField::Amount),
            "descricao" => Ok(SortField::Description),
            "categoria" => Ok(SortField::Category),
            "created_at" => Ok(SortField::CreatedAt),
            _ => Err(Error::UnknownSortField(s.to_owned())),
        }
    }
}

/// The order to sort transactions in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Sort in order of increasing value.
    Ascending,
    /// Sort in order of decreasing value.
    Descending,
}

/// Return a copy of `transactions` ordered by `field`.
///
/// The sort is stable: transactions with equal keys keep their input order,
/// in both sort orders. [SortField::Amount] and [SortField::Id] compare
/// numerically; every other field compares on its raw string value.
pub fn sort_transactions(
    transactions: &[Transaction],
    field: SortField,
    order: SortOrder,
) -> Vec<Transaction> {
    let mut sorted = transactions.to_vec();

    sorted.sort_by(|a, b| {
        let ordering = compare_by_field(a, b, field);

        match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });

    sorted
}

fn compare_by_field(a: &Transaction, b: &Transaction, field: SortField) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Kind => a.kind.as_str().cmp(b.kind.as_str()),
        SortField::Amount => a.amount.total_cmp(&b.amount),
        SortField::Description => a.description.cmp(&b.description),
        SortField::Category => a.category.cmp(&b.category),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}
