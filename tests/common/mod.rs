#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use pocket_ledger::{
    config::ConfigManager, Category, Config, FileStore, MemoryStore, NewTransaction, Tracker,
    TransactionKind,
};
use rust_decimal::Decimal;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Fresh directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Tracker over an in-memory store, plus a handle sharing that store.
pub fn memory_tracker() -> (Tracker, MemoryStore) {
    let store = MemoryStore::new();
    let tracker = Tracker::open(Box::new(store.clone()), Config::default());
    (tracker, store)
}

/// File-backed tracker and config manager in a unique directory per test.
pub fn setup_file_env() -> (Tracker, ConfigManager, PathBuf) {
    let base = temp_base();
    let config_manager =
        ConfigManager::with_base_dir(base.clone()).expect("create config manager for temp dir");
    let config = config_manager.load().expect("load default config");
    let store_dir = base.join("store");
    let store = FileStore::new(store_dir.clone()).expect("create file store");
    (Tracker::open(Box::new(store), config), config_manager, store_dir)
}

pub fn reopen_file_tracker(store_dir: &Path) -> Tracker {
    let store = FileStore::new(store_dir.to_path_buf()).expect("reopen file store");
    Tracker::open(Box::new(store), Config::default())
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn expense(title: &str, cents: i64, category: Category, on: NaiveDate) -> NewTransaction {
    NewTransaction::new(
        title,
        Decimal::new(cents, 2),
        TransactionKind::Expense,
        category,
        on,
    )
}

pub fn income(title: &str, cents: i64, category: Category, on: NaiveDate) -> NewTransaction {
    NewTransaction::new(
        title,
        Decimal::new(cents, 2),
        TransactionKind::Income,
        category,
        on,
    )
}
