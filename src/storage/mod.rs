// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Durable key-value storage for connection preferences.
//!
//! The store persists three connection settings as plain strings and reads
//! them back once at startup. Any backend implementing [`KeyValueStore`] can
//! be plugged in; two are provided:
//!
//! - [`MemoryStore`] - process-local map, useful for tests and headless runs
//! - [`JsonFileStore`] - a JSON object on disk, rewritten on every write
//!
//! # Examples
//!
//! ```
//! use meshmirror_lib::storage::{ConnectionSettings, KeyValueStore, MemoryStore};
//! use meshmirror_lib::types::ConnectionType;
//!
//! let storage = MemoryStore::new();
//! storage.set("connectionType", "2").unwrap();
//!
//! let settings = ConnectionSettings::load(&storage);
//! assert_eq!(settings.connection_type, ConnectionType::Serial);
//! ```

mod file;
mod memory;
mod settings;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use settings::{ConnectionSetting, ConnectionSettings};
pub(crate) use settings::encode_bool;

use crate::error::StorageError;

/// A string-to-string store that survives process restarts.
///
/// Implementations must be safe to share between threads. Writes are
/// synchronous; the store neither retries nor rolls back on failure.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot record the value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
