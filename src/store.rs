//! JSON file storage for the transaction collection.
//!
//! The whole collection is stored as one pretty-printed JSON array. There is
//! no partial update: every save rewrites the file and every load reads it in
//! full, so each operation observes the latest persisted state. Concurrent
//! writers are not protected against; the last save wins.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{Error, transaction::Transaction};

/// Stores the transaction collection in a single JSON file.
///
/// The file does not have to exist yet; it is created by the first save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Create a store backed by the file at `path`.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// The path of the ledger file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted collection.
    ///
    /// A missing file and a file whose content cannot be parsed as a
    /// transaction list both produce an empty collection. Malformed content
    /// is reported in the log and then treated as "no data"; the next save
    /// overwrites it.
    pub fn load(&self) -> Vec<Transaction> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(error) => {
                if error.kind() != ErrorKind::NotFound {
                    tracing::warn!(
                        path = %self.path.display(),
                        "could not read the ledger file, treating it as empty: {error}"
                    );
                }

                return Vec::new();
            }
        };

        match serde_json::from_str(&text) {
            Ok(transactions) => transactions,
            Err(error) => {
                tracing::warn!(
                    path = %self.path.display(),
                    "the ledger file is not a valid transaction list, treating it as empty: {error}"
                );

                Vec::new()
            }
        }
    }

    /// Overwrite the persisted collection with `transactions`.
    ///
    /// The collection is serialized as pretty-printed UTF-8 JSON, written to
    /// a temporary sibling file and renamed over the target, so readers never
    /// observe a partially written file.
    ///
    /// # Errors
    /// This function will return an:
    /// - [Error::Serialization] if the collection could not be serialized,
    /// - or an [Error::Io] if the file could not be written.
    pub fn save(&self, transactions: &[Transaction]) -> Result<(), Error> {
        let json = serde_json::to_string_pretty(transactions)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let temporary = self.path.with_extension("tmp");
        fs::write(&temporary, json)?;
        fs::rename(&temporary, &self.path)?;

        tracing::debug!(
            path = %self.path.display(),
            count = transactions.len(),
            "saved the ledger"
        );

        Ok(())
    }
}
