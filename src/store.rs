//! Persistence port: a text key-value store.
//!
//! The ledger only needs `get` and `set`. Any backend that can hold a few
//! kilobytes of text under a fixed key will do; [`MemoryStore`] is the
//! in-process implementation used by tests and short-lived sessions, and
//! [`crate::file_store::FileStore`] keeps snapshots on disk.
//!
//! ```
//! use nanofolio::store::{KeyValueStore, MemoryStore};
//!
//! let mut store = MemoryStore::new();
//! store.set("assetData", "[]").unwrap();
//! assert_eq!(store.get("assetData").unwrap().as_deref(), Some("[]"));
//! ```

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};

/// A key-value store holding text values.
///
/// Calls are synchronous: they complete or fail immediately, with no retry.
pub trait KeyValueStore {
    /// Read the value under `key`, `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// In-memory store with switchable write failures.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, String>,
    fail_writes: bool,
    write_limit: Option<usize>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an entry (builder style).
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    /// Make every subsequent `set` fail (builder style).
    pub fn fail_writes(mut self, fail: bool) -> Self {
        self.fail_writes = fail;
        self
    }

    /// Accept `limit` successful writes, then fail every `set` after that
    /// (builder style).
    pub fn fail_after(mut self, limit: usize) -> Self {
        self.write_limit = Some(limit);
        self
    }

    /// Toggle write failures on an existing store.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes || self.write_limit.is_some_and(|limit| self.writes >= limit) {
            return Err(Error::Store(format!("write to '{key}' rejected")));
        }
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}
