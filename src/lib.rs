#![doc(test(attr(deny(warnings))))]

//! Pocket Ledger is the core of a personal finance tracker: an ordered
//! transaction ledger persisted through a host key-value store, with derived
//! totals, monthly statistics, view filters and display formatting.
//!
//! ```
//! use pocket_ledger::{Config, MemoryStore, Tracker};
//!
//! let mut tracker = Tracker::open(Box::new(MemoryStore::new()), Config::default());
//! assert!(tracker.transactions().is_empty());
//! let _ = tracker.clear_all();
//! ```

pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

pub use crate::config::{Config, ConfigManager, Theme};
pub use crate::core::{FilterPatch, FilterState, Selector, Tracker};
pub use crate::domain::{
    Category, MonthKey, NewTransaction, Transaction, TransactionForm, TransactionId,
    TransactionKind,
};
pub use crate::errors::{LedgerError, StorageError, ValidationError};
pub use crate::ledger::{Ledger, LedgerEvent};
pub use crate::storage::{FileStore, KeyValueStore, MemoryStore, PersistenceAdapter};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Pocket Ledger tracing initialized.");
    });
}
