//! Caderneta keeps a personal ledger of income and expense transactions in a
//! single JSON file.
//!
//! This library is the core behind a reactive form UI: the UI calls
//! [create_transaction], [update_transaction] and [delete_transaction] to
//! mutate the ledger, [query_transactions] to fetch the filtered and sorted
//! view it displays, and the functions in [balance], [table] and [export] to
//! render totals, table rows and downloads. Every operation reloads the
//! ledger file before acting, so each call observes the latest persisted
//! state.

#![warn(missing_docs)]

pub mod balance;
pub mod export;
pub mod query;
pub mod store;
pub mod table;
pub mod timezone;
pub mod transaction;
pub mod transaction_id;

pub use store::JsonStore;
pub use transaction::{
    Transaction, TransactionBuilder, TransactionKind, TransactionQuery, TransactionUpdate,
    create_transaction, delete_transaction, get_transaction, query_transactions,
    update_transaction,
};
pub use transaction_id::{IdSequence, TransactionId};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested transaction could not be found.
    ///
    /// Callers should check that the ID is correct and that the transaction
    /// has not already been deleted.
    #[error("the requested transaction could not be found")]
    NotFound,

    /// An unrecognized field name was used to sort transactions.
    ///
    /// Sorting is restricted to the closed set of fields in
    /// [query::SortField]; unknown names are rejected rather than silently
    /// falling back to an unsorted view.
    #[error("cannot sort transactions by unrecognized field \"{0}\"")]
    UnknownSortField(String),

    /// An error occurred while reading or writing the ledger file.
    ///
    /// The error string should be logged for debugging; a missing or
    /// unparseable ledger file is not reported this way, it is treated as an
    /// empty collection by [JsonStore::load].
    #[error("could not access the ledger file: {0}")]
    Io(String),

    /// An error occurred while serializing the collection as JSON.
    #[error("could not serialize as JSON: {0}")]
    Serialization(String),

    /// An error occurred while writing CSV rows.
    #[error("could not write CSV: {0}")]
    Csv(String),
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        tracing::error!("an unexpected I/O error occurred: {}", value);
        Error::Io(value.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::Serialization(value.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Error::Csv(value.to_string())
    }
}
