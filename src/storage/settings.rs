// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Persisted connection settings.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::ConnectionType;

use super::KeyValueStore;

/// One of the three persisted connection settings.
///
/// Together they identify the transport session: changing any of them may
/// invalidate the session currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionSetting {
    /// Whether the host override is in effect.
    HostOverrideEnabled,
    /// The overriding host address.
    HostOverrideAddress,
    /// The transport kind.
    ConnectionType,
}

impl ConnectionSetting {
    /// Returns the storage key.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::HostOverrideEnabled => "hostOverrideEnabled",
            Self::HostOverrideAddress => "hostOverride",
            Self::ConnectionType => "connectionType",
        }
    }
}

impl fmt::Display for ConnectionSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Encodes a boolean the way it is persisted.
pub(crate) fn encode_bool(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Decodes a persisted boolean; anything but `"true"` is `false`.
pub(crate) fn decode_bool(value: Option<&str>) -> bool {
    value == Some("true")
}

/// Connection configuration hydrated from durable storage.
///
/// # Examples
///
/// ```
/// use meshmirror_lib::storage::{ConnectionSettings, MemoryStore};
/// use meshmirror_lib::types::ConnectionType;
///
/// let settings = ConnectionSettings::load(&MemoryStore::new());
/// assert!(!settings.host_override_enabled);
/// assert_eq!(settings.host_override_address, "");
/// assert_eq!(settings.connection_type, ConnectionType::Http);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionSettings {
    /// Whether the host override is in effect.
    pub host_override_enabled: bool,
    /// The overriding host address; empty when never set.
    pub host_override_address: String,
    /// The transport kind.
    pub connection_type: ConnectionType,
}

impl ConnectionSettings {
    /// Reads the settings from `storage`.
    ///
    /// Missing keys fall back to defaults without logging, as on a first run.
    /// A connection type that is not a known ordinal is logged at `warn` and
    /// replaced by [`ConnectionType::Http`].
    #[must_use]
    pub fn load(storage: &dyn KeyValueStore) -> Self {
        let host_override_enabled =
            decode_bool(storage.get(ConnectionSetting::HostOverrideEnabled.key()).as_deref());

        let host_override_address = storage
            .get(ConnectionSetting::HostOverrideAddress.key())
            .unwrap_or_default();

        let connection_type = match storage.get(ConnectionSetting::ConnectionType.key()) {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!(value = %raw, error = %e, "Ignoring stored connection type");
                ConnectionType::default()
            }),
            None => ConnectionType::default(),
        };

        let settings = Self {
            host_override_enabled,
            host_override_address,
            connection_type,
        };
        tracing::info!(
            host_override_enabled = settings.host_override_enabled,
            host_override_address = %settings.host_override_address,
            connection_type = %settings.connection_type,
            "Hydrated connection settings"
        );
        settings
    }
}
