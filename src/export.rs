//! Read-only exports of the displayed table.
//!
//! Both formats are derived from whatever filtered and sorted slice the
//! caller passes in, not from the full ledger, so a download reflects exactly
//! what the table shows.

use std::io::Write;

use crate::{Error, table::build_table, transaction::Transaction};

/// Write `transactions` as CSV with the same columns as the displayed table.
///
/// The first row is the header `ID,Tipo,Valor,Descrição,Categoria,Data`,
/// followed by one row per transaction in the given order.
///
/// # Errors
/// This function will return an [Error::Csv] if a row could not be written,
/// or an [Error::Io] if the underlying writer fails.
pub fn write_csv<W: Write>(transactions: &[Transaction], writer: W) -> Result<(), Error> {
    let mut writer = csv::Writer::from_writer(writer);

    for row in build_table(transactions) {
        writer.serialize(row)?;
    }

    writer.flush()?;

    Ok(())
}

/// Render `transactions` as a CSV string.
///
/// # Errors
/// This function will return an [Error::Csv] if a row could not be written.
pub fn to_csv_string(transactions: &[Transaction]) -> Result<String, Error> {
    let mut buffer = Vec::new();
    write_csv(transactions, &mut buffer)?;

    String::from_utf8(buffer).map_err(|error| Error::Csv(error.to_string()))
}

/// Render `transactions` as the same pretty-printed JSON the ledger file
/// uses.
///
/// # Errors
/// This function will return an [Error::Serialization] if the collection
/// could not be serialized.
pub fn to_json(transactions: &[Transaction]) -> Result<String, Error> {
    serde_json::to_string_pretty(transactions).map_err(Error::from)
}

#[cfg(test)]
mod export_tests {
    use crate::transaction::{Transaction, TransactionKind};

    use super::{to_csv_string, to_json};

    fn sample_transactions() -> Vec<Transaction> {
        vec![
            Transaction {
                id: 1,
                kind: TransactionKind::Income,
                amount: 2500.0,
                description: "Salário".to_owned(),
                category: "Trabalho".to_owned(),
                created_at: "09:00:00 01/02/2026".to_owned(),
            },
            Transaction {
                id: 2,
                kind: TransactionKind::Expense,
                amount: 37.9,
                description: "Padaria".to_owned(),
                category: "Alimentação".to_owned(),
                created_at: "12:30:15 01/02/2026".to_owned(),
            },
        ]
    }

    #[test]
    fn csv_starts_with_the_table_header() {
        let csv = to_csv_string(&sample_transactions()).unwrap();

        assert_eq!(
            Some("ID,Tipo,Valor,Descrição,Categoria,Data"),
            csv.lines().next()
        );
    }

    #[test]
    fn csv_has_one_row_per_transaction_in_order() {
        let csv = to_csv_string(&sample_transactions()).unwrap();
        let lines = csv.lines().collect::<Vec<_>>();

        assert_eq!(3, lines.len());
        assert_eq!("1,Receita,2500.0,Salário,Trabalho,09:00:00 01/02/2026", lines[1]);
        assert_eq!(
            "2,Despesa,37.9,Padaria,Alimentação,12:30:15 01/02/2026",
            lines[2]
        );
    }

    #[test]
    fn csv_of_empty_view_is_empty() {
        // With no rows serialized, the csv crate never writes a header.
        assert_eq!("", to_csv_string(&[]).unwrap());
    }

    #[test]
    fn json_matches_the_persisted_format() {
        let json = to_json(&sample_transactions()).unwrap();

        let reparsed: Vec<Transaction> = serde_json::from_str(&json).unwrap();
        assert_eq!(sample_transactions(), reparsed);
        assert!(json.contains("\"tipo\": \"despesa\""));
    }
}
