//! Persistence contract between the ledger and a host key-value store.

pub mod file_store;
pub mod memory;

use serde::{Deserialize, Serialize};

use crate::{config::Theme, domain::Transaction, errors::StorageError};

pub use file_store::FileStore;
pub use memory::MemoryStore;

pub type Result<T> = std::result::Result<T, StorageError>;

pub const DEFAULT_TRANSACTIONS_KEY: &str = "transactions";
pub const DEFAULT_THEME_KEY: &str = "theme";

/// Synchronous get/set string store supplied by the host.
pub trait KeyValueStore {
    /// Returns `None` when nothing has been stored under `key`.
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Store keys the adapter reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub transactions_key: String,
    pub theme_key: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            transactions_key: DEFAULT_TRANSACTIONS_KEY.into(),
            theme_key: DEFAULT_THEME_KEY.into(),
        }
    }
}

/// Serializes the ledger to and from its single store entry.
pub struct PersistenceAdapter {
    store: Box<dyn KeyValueStore>,
    keys: StorageKeys,
}

impl PersistenceAdapter {
    pub fn new(store: Box<dyn KeyValueStore>, keys: StorageKeys) -> Self {
        Self { store, keys }
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// Reads the stored transaction list. `Ok(None)` means nothing was saved yet.
    pub fn read_transactions(&self) -> Result<Option<Vec<Transaction>>> {
        match self.store.read(&self.keys.transactions_key)? {
            Some(raw) => Ok(Some(decode_transactions(&raw)?)),
            None => Ok(None),
        }
    }

    /// Replaces the stored transaction list with `transactions`.
    pub fn write_transactions(&mut self, transactions: &[Transaction]) -> Result<()> {
        let encoded = encode_transactions(transactions)?;
        self.store.write(&self.keys.transactions_key, &encoded)
    }

    /// Stored theme preference; absent, unreadable or unknown values mean light.
    pub fn read_theme(&self) -> Theme {
        match self.store.read(&self.keys.theme_key) {
            Ok(Some(raw)) => raw.parse().unwrap_or_default(),
            Ok(None) => Theme::default(),
            Err(err) => {
                tracing::warn!(error = %err, "could not read theme preference");
                Theme::default()
            }
        }
    }

    pub fn write_theme(&mut self, theme: Theme) -> Result<()> {
        self.store.write(&self.keys.theme_key, theme.as_str())
    }
}

pub fn encode_transactions(transactions: &[Transaction]) -> Result<String> {
    Ok(serde_json::to_string(transactions)?)
}

pub fn decode_transactions(raw: &str) -> Result<Vec<Transaction>> {
    Ok(serde_json::from_str(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, NewTransaction, TransactionKind};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn adapter() -> (PersistenceAdapter, MemoryStore) {
        let store = MemoryStore::new();
        let adapter = PersistenceAdapter::new(Box::new(store.clone()), StorageKeys::default());
        (adapter, store)
    }

    fn sample() -> Transaction {
        Transaction::new(NewTransaction::new(
            "Lunch",
            Decimal::new(1250, 2),
            TransactionKind::Expense,
            Category::Food,
            NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
        ))
    }

    #[test]
    fn missing_key_reads_as_none() {
        let (adapter, _store) = adapter();
        assert!(adapter.read_transactions().unwrap().is_none());
    }

    #[test]
    fn write_then_read_roundtrip() {
        let (mut adapter, store) = adapter();
        let txn = sample();
        adapter.write_transactions(std::slice::from_ref(&txn)).unwrap();
        assert!(store.get(DEFAULT_TRANSACTIONS_KEY).is_some());
        let loaded = adapter.read_transactions().unwrap().unwrap();
        assert_eq!(loaded, vec![txn]);
    }

    #[test]
    fn malformed_payload_is_a_serde_error() {
        let (adapter, store) = adapter();
        store.insert(DEFAULT_TRANSACTIONS_KEY, "{not json");
        assert!(matches!(
            adapter.read_transactions(),
            Err(StorageError::Serde(_))
        ));
    }

    #[test]
    fn theme_defaults_to_light_and_persists_as_bare_string() {
        let (mut adapter, store) = adapter();
        assert_eq!(adapter.read_theme(), Theme::Light);
        adapter.write_theme(Theme::Dark).unwrap();
        assert_eq!(store.get(DEFAULT_THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(adapter.read_theme(), Theme::Dark);

        store.insert(DEFAULT_THEME_KEY, "sepia");
        assert_eq!(adapter.read_theme(), Theme::Light);
    }
}
