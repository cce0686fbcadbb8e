//! In-process store backend for tests and ephemeral embedding.

use std::cell::RefCell;
use std::collections::HashMap;

use super::{PersistentStore, StoreResult};

/// Map-backed store with no durability. Interior mutability keeps the
/// trait's `&self` contract; the core assumes a single logical owner, so
/// no locking is involved.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RefCell<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held. Test convenience.
    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

impl PersistentStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.records.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        self.records.borrow_mut().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.records.borrow_mut().remove(key);
        Ok(())
    }
}
