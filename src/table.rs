//! Shapes transactions into the display rows of the UI's table.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};
use serde::Serialize;

use crate::{transaction::Transaction, transaction_id::TransactionId};

/// One display row of the transactions table.
///
/// A row is a plain, display-ready projection of a transaction: the kind is
/// replaced by its label and the creation timestamp is kept as text. No
/// filtering or aggregation happens here; rows map one-to-one onto the
/// transactions they were built from.
///
/// The serialized field names are the column headers of the exported table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRow {
    /// The transaction ID.
    #[serde(rename = "ID")]
    pub id: TransactionId,
    /// The kind label shown to the user, "Receita" or "Despesa".
    #[serde(rename = "Tipo")]
    pub kind: String,
    /// The transaction amount.
    #[serde(rename = "Valor")]
    pub amount: f64,
    /// The transaction description.
    #[serde(rename = "Descrição")]
    pub description: String,
    /// The transaction category.
    #[serde(rename = "Categoria")]
    pub category: String,
    /// The creation timestamp text.
    #[serde(rename = "Data")]
    pub date: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(transaction: &Transaction) -> Self {
        Self {
            id: transaction.id,
            kind: transaction.kind.label().to_owned(),
            amount: transaction.amount,
            description: transaction.description.clone(),
            category: transaction.category.clone(),
            date: transaction.created_at.clone(),
        }
    }
}

/// Map `transactions` one-to-one into display rows, preserving their order.
pub fn build_table(transactions: &[Transaction]) -> Vec<TransactionRow> {
    transactions.iter().map(TransactionRow::from).collect()
}

/// Format `number` as Brazilian real currency, e.g. `R$1.234,56`.
pub fn format_currency(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("R$")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency("-R$")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    let mut formatted_string = if number < 0.0 {
        negative_fmt.fmt_string(number.abs())
    } else if number > 0.0 {
        positive_fmt.fmt_string(number)
    } else {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        "R$0.00".to_owned()
    };

    // numfmt omits the last trailing zero, so we must add it ourselves
    // For example, "12.30" is rendered as "12.3" so we append "0".
    if formatted_string.as_bytes()[formatted_string.len() - 3] != b'.' {
        formatted_string = format!("{formatted_string}0");
    }

    // numfmt groups digits the en-US way; swap the separators for pt-BR.
    formatted_string
        .chars()
        .map(|character| match character {
            ',' => '.',
            '.' => ',',
            other => other,
        })
        .collect()
}
