use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::errors::StorageError;

use super::{KeyValueStore, Result};

#[derive(Debug, Default)]
struct Entries {
    values: HashMap<String, String>,
    quota: Option<usize>,
}

impl Entries {
    fn size_with(&self, key: &str, value: &str) -> usize {
        self.values
            .iter()
            .filter(|(existing, _)| existing.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum::<usize>()
            + key.len()
            + value.len()
    }
}

/// In-process store, the stand-in for a browser-style local storage area.
///
/// Clones share the same entries, so a caller can keep a handle for inspection
/// after handing another to the tracker. An optional byte quota makes writes
/// fail the way an exhausted host store does.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<Entries>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(limit: usize) -> Self {
        let store = Self::new();
        store.set_quota(Some(limit));
        store
    }

    pub fn set_quota(&self, limit: Option<usize>) {
        self.inner.borrow_mut().quota = limit;
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.borrow().values.get(key).cloned()
    }

    /// Seeds a value directly, bypassing the quota.
    pub fn insert(&self, key: &str, value: &str) {
        self.inner
            .borrow_mut()
            .values
            .insert(key.to_string(), value.to_string());
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.inner.borrow_mut().values.remove(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get(key))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.inner.borrow_mut();
        if let Some(limit) = entries.quota {
            let needed = entries.size_with(key, value);
            if needed > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    limit,
                });
            }
        }
        entries.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
