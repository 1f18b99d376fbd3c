use std::collections::BTreeMap;

/// Trait for a key-value storage engine.
///
/// Implementors provide set, get, and snapshot operations over
/// string keys and values. None of them can fail: an absent key
/// is reported as `None`, not as an error.
///
/// Engines must be cloneable (cheaply, via `Arc`) and safe to
/// share across threads, since every HTTP worker holds a handle.
pub trait KvsEngine: Clone + Send + Sync + 'static {
    /// Sets the value of a string key to a string.
    ///
    /// If the key already exists, the previous value will be overwritten.
    fn set(&self, key: String, value: String);

    /// Gets the string value of a given string key.
    ///
    /// Returns `None` if the key does not exist.
    fn get(&self, key: &str) -> Option<String>;

    /// Returns a point-in-time copy of every key-value pair, ordered by key.
    fn all(&self) -> BTreeMap<String, String>;
}

mod memory;

pub use self::memory::KvStore;
