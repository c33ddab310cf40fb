//! Ordered `key=value` configuration store.
//!
//! # Responsibilities
//! - Parse a flat `key=value` text config into an order-preserving store
//! - Merge a desired configuration into an existing one under
//!   retention/immutability rules
//! - Re-serialize deterministically, byte-stable across runs
//!
//! # Design Decisions
//! - Explicit (entry list, key index) pair; iteration order is a contract,
//!   never an artifact of the backing map
//! - Lines split on the first `=` only; the value keeps any further `=`
//! - Lines without `=` or with an empty key are skipped at parse
//! - `serialize` emits no trailing newline; the file writer adds one

use std::collections::HashMap;

/// A single `key=value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
}

/// Insertion-ordered `key=value` store with O(1) lookup by key.
///
/// Order reflects the current state only: initial parse order for entries
/// read from text, with merged-in entries appended at the end (see [`apply`]).
///
/// [`apply`]: ConfigStore::apply
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigStore {
    entries: Vec<ConfigEntry>,
    index: HashMap<String, usize>,
}

impl ConfigStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a flat `key=value` text config, one entry per line.
    ///
    /// Blank lines, lines without `=` and lines with an empty key are
    /// skipped. A value may itself contain `=`: only the first `=` delimits.
    /// A duplicate key overwrites the earlier value in place; the position of
    /// the first occurrence is retained.
    pub fn from_text(content: &str) -> Self {
        let mut store = Self::new();
        for line in content.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            if key.is_empty() {
                continue;
            }
            store.insert(key, value);
        }
        store
    }

    /// Build a store whose order equals the iteration order of `input`.
    ///
    /// This is a fresh construction representing desired state; no merge
    /// rules apply here.
    pub fn from_map<K, V, I>(input: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut store = Self::new();
        for (key, value) in input {
            store.insert(key, value);
        }
        store
    }

    /// Set `key` to `value`: overwrite in place if the key exists, append
    /// at the end otherwise.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&i) => self.entries[i].value = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push(ConfigEntry { key, value });
            }
        }
    }

    /// Value for `key`, or `None` when the key is absent.
    ///
    /// `None` is distinct from `Some("")`: a key parsed from a `key=` line
    /// is present with an empty value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index.get(key).map(|&i| self.entries[i].value.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in store order.
    pub fn iter(&self) -> std::slice::Iter<'_, ConfigEntry> {
        self.entries.iter()
    }

    /// Merge `desired` into this store, in place.
    ///
    /// 1. Entries whose key is absent from `desired` and not in
    ///    `immutable_keys` are removed.
    /// 2. Every non-immutable key of `desired` is written: in place when the
    ///    key survived pruning, appended at the end otherwise, in `desired`
    ///    order.
    /// 3. Keys in `immutable_keys` keep their pre-merge value; `desired`'s
    ///    value for them is ignored, and they are never created here.
    ///
    /// Retained entries keep their original relative order. The operation is
    /// idempotent and leaves `desired` untouched.
    pub fn apply(&mut self, desired: &ConfigStore, immutable_keys: &[String]) {
        let immutable = |key: &str| immutable_keys.iter().any(|k| k == key);

        self.entries
            .retain(|e| desired.contains_key(&e.key) || immutable(&e.key));
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.key.clone(), i))
            .collect();

        for entry in desired.iter() {
            if immutable(&entry.key) {
                continue;
            }
            self.insert(entry.key.as_str(), entry.value.as_str());
        }
    }

    /// Render `key=value` lines joined by `\n`, in store order, with no
    /// trailing newline.
    pub fn serialize(&self) -> String {
        let lines: Vec<String> = self
            .entries
            .iter()
            .map(|e| format!("{}={}", e.key, e.value))
            .collect();
        lines.join("\n")
    }
}
