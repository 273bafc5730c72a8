//! Transaction management for the ledger.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating
//!   transactions
//! - The operations for recording, updating and deleting transactions
//!
//! Every operation is a single-shot cycle: it reloads the ledger file,
//! applies its change in memory, and writes the whole collection back. There
//! is no shared mutable state between calls.

use serde::{Deserialize, Serialize};
use time::UtcOffset;

use crate::{
    Error,
    query::{SortField, SortOrder, TransactionFilter, find_by_id, select, sort_transactions},
    store::JsonStore,
    timezone::now_string,
    transaction_id::{IdSequence, TransactionId},
};

// ============================================================================
// MODELS
// ============================================================================

/// Whether a transaction brings money in or takes money out.
///
/// Serialized with the Portuguese wire names the ledger file uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Money coming in, e.g. wages.
    #[serde(rename = "receita")]
    Income,
    /// Money going out, e.g. groceries.
    #[serde(rename = "despesa")]
    Expense,
}

impl TransactionKind {
    /// The wire name of this kind, as stored in the ledger file.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "receita",
            TransactionKind::Expense => "despesa",
        }
    }

    /// The label the UI shows for this kind.
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Receita",
            TransactionKind::Expense => "Despesa",
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or
/// earned.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// Whether the transaction is income or an expense.
    #[serde(rename = "tipo")]
    pub kind: TransactionKind,
    /// The amount of money spent or earned in this transaction.
    #[serde(rename = "valor")]
    pub amount: f64,
    /// A text description of what the transaction was for.
    #[serde(rename = "descricao")]
    pub description: String,
    /// A user-defined category that groups transactions, e.g. 'Mercado'.
    #[serde(rename = "categoria")]
    pub category: String,
    /// When the transaction was recorded, as `HH:MM:SS DD/MM/YYYY`.
    pub created_at: String,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        kind: TransactionKind,
        amount: f64,
        description: &str,
        category: &str,
    ) -> TransactionBuilder {
        TransactionBuilder {
            kind,
            amount,
            description: description.to_owned(),
            category: category.to_owned(),
            timezone: UtcOffset::UTC,
        }
    }

    /// The amount with income counted positive and expenses negative.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// The ID and creation timestamp are not chosen by the caller: the ID comes
/// from the collection the transaction is added to and the timestamp is
/// stamped when the builder is finalized.
///
/// # Examples
///
/// ```rust
/// use caderneta::{Transaction, TransactionKind};
///
/// let builder = Transaction::build(
///     TransactionKind::Expense,
///     37.9,
///     "Padaria",
///     "Alimentação",
/// );
/// let transaction = builder.finalize(1);
///
/// assert_eq!(transaction.amount, 37.9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionBuilder {
    /// Whether the new transaction is income or an expense.
    pub kind: TransactionKind,
    /// The monetary amount. The calling UI is responsible for rejecting
    /// non-positive values before submitting.
    pub amount: f64,
    /// What the transaction was for. Stored trimmed.
    pub description: String,
    /// The category that groups the transaction. Stored trimmed.
    pub category: String,
    /// The UTC offset used to stamp the creation time. Defaults to UTC.
    pub timezone: UtcOffset,
}

impl TransactionBuilder {
    /// Set the UTC offset used to stamp the creation time.
    pub fn timezone(mut self, timezone: UtcOffset) -> Self {
        self.timezone = timezone;
        self
    }

    /// Build the final [Transaction], stamping `created_at` with the current
    /// time in the builder's timezone.
    pub fn finalize(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            kind: self.kind,
            amount: self.amount,
            description: self.description.trim().to_owned(),
            category: self.category.trim().to_owned(),
            created_at: now_string(self.timezone),
        }
    }
}

/// The replacement values for [update_transaction].
///
/// `None` fields are left untouched. A provided field is applied only if it
/// passes its check: trimmed non-empty text for the description and category,
/// a strictly positive value for the amount. A failing field is skipped
/// silently rather than failing the update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionUpdate {
    /// The replacement description.
    pub description: Option<String>,
    /// The replacement category.
    pub category: Option<String>,
    /// The replacement amount.
    pub amount: Option<f64>,
}

impl TransactionUpdate {
    fn apply(&self, transaction: &mut Transaction) {
        if let Some(description) = &self.description {
            let description = description.trim();

            if !description.is_empty() {
                transaction.description = description.to_owned();
            }
        }

        if let Some(category) = &self.category {
            let category = category.trim();

            if !category.is_empty() {
                transaction.category = category.to_owned();
            }
        }

        if let Some(amount) = self.amount
            && amount > 0.0
        {
            transaction.amount = amount;
        }
    }
}

// ============================================================================
// OPERATIONS
// ============================================================================

/// Record a new transaction in the ledger.
///
/// Reads the current collection, assigns the next ID, stamps the creation
/// time, appends the transaction, and writes the whole collection back.
/// Returns the recorded transaction.
///
/// No business validation happens at this layer: the calling UI is expected
/// to reject non-positive amounts and blank text before submitting.
///
/// # Errors
/// This function will return an [Error::Io] or [Error::Serialization] if the
/// ledger file could not be written.
pub fn create_transaction(
    builder: TransactionBuilder,
    store: &JsonStore,
) -> Result<Transaction, Error> {
    let mut transactions = store.load();
    let mut ids = IdSequence::after(&transactions);

    let transaction = builder.finalize(ids.next());
    transactions.push(transaction.clone());
    store.save(&transactions)?;

    tracing::debug!(id = transaction.id, "recorded transaction");

    Ok(transaction)
}

/// Retrieve a transaction from the ledger by its `id`.
///
/// # Errors
/// This function will return an [Error::NotFound] if `id` does not refer to a
/// recorded transaction.
pub fn get_transaction(id: TransactionId, store: &JsonStore) -> Result<Transaction, Error> {
    let transactions = store.load();

    find_by_id(&transactions, id).cloned()
}

/// Apply the provided replacement fields to the transaction with `id`.
///
/// Returns `Ok(false)` without touching the ledger file when no transaction
/// has the given ID. Fields failing their check are skipped, so a found
/// transaction reports `Ok(true)` even when nothing actually changed.
///
/// # Errors
/// This function will return an [Error::Io] or [Error::Serialization] if the
/// ledger file could not be written.
pub fn update_transaction(
    id: TransactionId,
    update: &TransactionUpdate,
    store: &JsonStore,
) -> Result<bool, Error> {
    let mut transactions = store.load();

    let Some(transaction) = transactions
        .iter_mut()
        .find(|transaction| transaction.id == id)
    else {
        return Ok(false);
    };

    update.apply(transaction);
    store.save(&transactions)?;

    tracing::debug!(id, "updated transaction");

    Ok(true)
}

/// Remove the transaction with `id` from the ledger.
///
/// The collection is rewritten only if a transaction was actually removed.
/// Returns whether a removal occurred.
///
/// # Errors
/// This function will return an [Error::Io] or [Error::Serialization] if the
/// ledger file could not be written.
pub fn delete_transaction(id: TransactionId, store: &JsonStore) -> Result<bool, Error> {
    let mut transactions = store.load();
    let count_before = transactions.len();

    transactions.retain(|transaction| transaction.id != id);

    if transactions.len() == count_before {
        return Ok(false);
    }

    store.save(&transactions)?;

    tracing::debug!(id, "deleted transaction");

    Ok(true)
}

/// Defines which transactions [query_transactions] returns and in what order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionQuery {
    /// Keep only the transactions matching this filter.
    pub filter: TransactionFilter,
    /// Orders transactions by the given field. `None` returns transactions
    /// in the order they are stored.
    pub sort: Option<(SortField, SortOrder)>,
}

/// Query the ledger for the transactions the UI displays.
///
/// Loads the collection, keeps the transactions matching the query's filter,
/// and orders them by the query's sort field, if any.
pub fn query_transactions(query: &TransactionQuery, store: &JsonStore) -> Vec<Transaction> {
    let transactions = store.load();
    let selected = select(&transactions, |transaction| {
        query.filter.matches(transaction)
    });

    match query.sort {
        Some((field, order)) => sort_transactions(&selected, field, order),
        None => selected,
    }
}

// ============================================================================
// TESTS
// ============================================================================


#[cfg(test)]
mod operation_tests {
    use std::fs;

    use tempfile::tempdir;

    use crate::{
        Error,
        balance::balance,
        query::{SortField, SortOrder, TransactionFilter},
        store::JsonStore,
    };

    use super::{
        Transaction, TransactionKind, TransactionQuery, TransactionUpdate, create_transaction,
        delete_transaction, get_transaction, query_transactions, update_transaction,
    };

    fn temporary_store(directory: &tempfile::TempDir) -> JsonStore {
        JsonStore::new(directory.path().join("controle.json"))
    }

    fn record(
        kind: TransactionKind,
        amount: f64,
        description: &str,
        category: &str,
        store: &JsonStore,
    ) -> Transaction {
        create_transaction(Transaction::build(kind, amount, description, category), store)
            .expect("could not record transaction")
    }

    #[test]
    fn create_assigns_sequential_ids_across_reloads() {
        let directory = tempdir().unwrap();
        let store = temporary_store(&directory);

        let first = record(TransactionKind::Income, 100.0, "Salário", "Trabalho", &store);
        let second = record(TransactionKind::Expense, 40.0, "Almoço", "Alimentação", &store);
        let third = record(TransactionKind::Expense, 9.9, "Café", "Alimentação", &store);

        assert_eq!(vec![1, 2, 3], vec![first.id, second.id, third.id]);

        let ids = store.load().iter().map(|t| t.id).collect::<Vec<_>>();
        assert_eq!(vec![1, 2, 3], ids);
    }

    #[test]
    fn create_does_not_reuse_deleted_ids() {
        let directory = tempdir().unwrap();
        let store = temporary_store(&directory);

        record(TransactionKind::Income, 10.0, "A", "Geral", &store);
        let second = record(TransactionKind::Income, 20.0, "B", "Geral", &store);
        delete_transaction(second.id, &store).unwrap();

        let third = record(TransactionKind::Income, 30.0, "C", "Geral", &store);

        // The largest remaining ID is 1, so the next one is 2: IDs stay
        // unique within the collection even though 2 was used before.
        assert_eq!(2, third.id);
    }

    #[test]
    fn get_returns_the_recorded_transaction() {
        let directory = tempdir().unwrap();
        let store = temporary_store(&directory);

        let recorded = record(TransactionKind::Expense, 55.0, "Luz", "Contas", &store);

        assert_eq!(Ok(recorded), get_transaction(1, &store));
    }

    #[test]
    fn get_fails_on_unknown_id() {
        let directory = tempdir().unwrap();
        let store = temporary_store(&directory);

        assert_eq!(Err(Error::NotFound), get_transaction(1, &store));
    }

    #[test]
    fn update_missing_id_returns_false_and_leaves_the_file_unchanged() {
        let directory = tempdir().unwrap();
        let store = temporary_store(&directory);
        record(TransactionKind::Income, 100.0, "Salário", "Trabalho", &store);
        let bytes_before = fs::read(store.path()).unwrap();

        let update = TransactionUpdate {
            description: Some("Bônus".to_owned()),
            ..Default::default()
        };

        assert_eq!(Ok(false), update_transaction(99, &update, &store));
        assert_eq!(bytes_before, fs::read(store.path()).unwrap());
    }

    #[test]
    fn update_applies_only_fields_that_pass_validation() {
        let directory = tempdir().unwrap();
        let store = temporary_store(&directory);
        record(TransactionKind::Expense, 40.0, "Almoço", "Alimentação", &store);

        let update = TransactionUpdate {
            description: Some("Almoço no centro".to_owned()),
            category: Some("   ".to_owned()),
            amount: Some(-5.0),
        };

        assert_eq!(Ok(true), update_transaction(1, &update, &store));

        let updated = get_transaction(1, &store).unwrap();
        assert_eq!("Almoço no centro", updated.description);
        assert_eq!("Alimentação", updated.category);
        assert_eq!(40.0, updated.amount);
    }

    #[test]
    fn update_with_no_valid_fields_still_reports_success() {
        let directory = tempdir().unwrap();
        let store = temporary_store(&directory);
        record(TransactionKind::Income, 100.0, "Salário", "Trabalho", &store);

        let update = TransactionUpdate {
            amount: Some(-5.0),
            ..Default::default()
        };

        // The transaction was found, so the edit reports success even though
        // the invalid amount was ignored.
        assert_eq!(Ok(true), update_transaction(1, &update, &store));
        assert_eq!(100.0, get_transaction(1, &store).unwrap().amount);
    }

    #[test]
    fn update_trims_replacement_text() {
        let directory = tempdir().unwrap();
        let store = temporary_store(&directory);
        record(TransactionKind::Expense, 30.0, "Ônibus", "Transporte", &store);

        let update = TransactionUpdate {
            category: Some("  Mobilidade  ".to_owned()),
            ..Default::default()
        };

        update_transaction(1, &update, &store).unwrap();

        assert_eq!("Mobilidade", get_transaction(1, &store).unwrap().category);
    }

    #[test]
    fn delete_missing_id_returns_false() {
        let directory = tempdir().unwrap();
        let store = temporary_store(&directory);
        record(TransactionKind::Income, 100.0, "Salário", "Trabalho", &store);

        assert_eq!(Ok(false), delete_transaction(99, &store));
        assert_eq!(1, store.load().len());
    }

    #[test]
    fn delete_existing_id_shrinks_the_collection_by_one() {
        let directory = tempdir().unwrap();
        let store = temporary_store(&directory);
        record(TransactionKind::Income, 100.0, "Salário", "Trabalho", &store);
        record(TransactionKind::Expense, 40.0, "Almoço", "Alimentação", &store);

        assert_eq!(Ok(true), delete_transaction(1, &store));

        let remaining = store.load();
        assert_eq!(1, remaining.len());
        assert_eq!(2, remaining[0].id);
    }

    #[test]
    fn query_filters_and_sorts_the_collection() {
        let directory = tempdir().unwrap();
        let store = temporary_store(&directory);
        record(TransactionKind::Income, 2500.0, "Salário", "Trabalho", &store);
        record(TransactionKind::Expense, 40.0, "Almoço", "Alimentação", &store);
        record(TransactionKind::Expense, 320.0, "Mercado", "Alimentação", &store);
        record(TransactionKind::Expense, 60.0, "Ônibus", "Transporte", &store);

        let query = TransactionQuery {
            filter: TransactionFilter {
                kinds: vec![TransactionKind::Expense],
                category_contains: Some("alimentação".to_owned()),
            },
            sort: Some((SortField::Amount, SortOrder::Descending)),
        };

        let view = query_transactions(&query, &store);

        assert_eq!(
            vec![320.0, 40.0],
            view.iter().map(|t| t.amount).collect::<Vec<_>>()
        );
    }

    #[test]
    fn empty_query_returns_the_collection_in_stored_order() {
        let directory = tempdir().unwrap();
        let store = temporary_store(&directory);
        record(TransactionKind::Income, 1.0, "A", "Geral", &store);
        record(TransactionKind::Expense, 2.0, "B", "Geral", &store);

        let view = query_transactions(&TransactionQuery::default(), &store);

        assert_eq!(
            vec![1, 2],
            view.iter().map(|t| t.id).collect::<Vec<_>>()
        );
    }

    #[test]
    fn ledger_scenario_from_empty_store() {
        let directory = tempdir().unwrap();
        let store = temporary_store(&directory);

        let salary = record(TransactionKind::Income, 100.0, "Salary", "Work", &store);
        assert_eq!(1, salary.id);
        assert_eq!(TransactionKind::Income, salary.kind);
        assert_eq!(100.0, salary.amount);
        assert_eq!(1, store.load().len());

        record(TransactionKind::Expense, 40.0, "Lunch", "Food", &store);
        assert_eq!(60.0, balance(&store.load()));

        let invalid_amount = TransactionUpdate {
            amount: Some(-5.0),
            ..Default::default()
        };
        assert_eq!(Ok(true), update_transaction(1, &invalid_amount, &store));
        assert_eq!(100.0, get_transaction(1, &store).unwrap().amount);

        assert_eq!(Ok(true), delete_transaction(2, &store));

        let remaining = store.load();
        assert_eq!(1, remaining.len());
        assert_eq!(1, remaining[0].id);
    }
}
