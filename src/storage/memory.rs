// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory key-value store.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::error::StorageError;

use super::KeyValueStore;

/// Key-value store backed by a process-local map.
///
/// Values live as long as the store. Uses `parking_lot::RwLock` so it can be
/// shared between the store and test code without async locking.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given entries.
    #[must_use]
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Returns the number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_store_is_empty() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get("missing"), None);
    }

    #[test]
    fn set_then_get() {
        let store = MemoryStore::new();
        store.set("hostOverride", "10.0.0.5").unwrap();
        assert_eq!(store.get("hostOverride").as_deref(), Some("10.0.0.5"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn set_overwrites() {
        let store = MemoryStore::with_entries([("connectionType", "0")]);
        store.set("connectionType", "1").unwrap();
        assert_eq!(store.get("connectionType").as_deref(), Some("1"));
        assert_eq!(store.len(), 1);
    }
}
