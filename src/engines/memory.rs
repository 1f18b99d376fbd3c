use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::KvsEngine;

/// An in-memory key-value store.
///
/// The map sits behind a single `RwLock`: readers share the lock,
/// a writer holds it exclusively while mutating. Clones share the
/// same map, so handing one to each worker is cheap.
#[derive(Clone, Default)]
pub struct KvStore {
    map: Arc<RwLock<HashMap<String, String>>>,
}

impl KvStore {
    /// Creates an empty `KvStore`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns true if no key has been set.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // A panic while holding the lock cannot leave a half-written
    // entry behind, so a poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, String>> {
        self.map.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, String>> {
        self.map.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KvsEngine for KvStore {
    fn set(&self, key: String, value: String) {
        self.write().insert(key, value);
    }

    fn get(&self, key: &str) -> Option<String> {
        self.read().get(key).cloned()
    }

    fn all(&self) -> BTreeMap<String, String> {
        self.read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}
