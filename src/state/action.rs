// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Actions applied to the mesh state.
//!
//! Actions are the only way the mirrored state changes. Transport handlers
//! emit them as device packets arrive; UI code emits them when the user edits
//! the connection settings.
//!
//! # Action Kinds
//!
//! - Scalar setters: [`Action::SetDeviceStatus`], [`Action::SetLastInteraction`],
//!   [`Action::SetReady`], [`Action::SetSelfNodeInfo`], [`Action::SetPreferences`]
//! - Identity routing: [`Action::SetUser`]
//! - Collection updates: [`Action::AddPositionReport`], [`Action::AddOrUpdateNode`],
//!   [`Action::AddOrUpdateChannel`], [`Action::AddMessage`]
//! - Correlation: [`Action::AckMessage`]
//! - Connection settings: [`Action::SetHostOverrideEnabled`],
//!   [`Action::SetHostOverrideAddress`], [`Action::SetConnectionType`]
//!
//! # Examples
//!
//! ```
//! use meshmirror_lib::state::{Action, MeshState};
//! use meshmirror_lib::types::{NodeInfo, NodeNum};
//!
//! let mut state = MeshState::new();
//!
//! // Apply returns true if the state actually changed
//! let node = NodeInfo::new(NodeNum::new(7));
//! assert!(state.apply(&Action::AddOrUpdateNode(node.clone())));
//!
//! // Re-applying the same record is a no-op
//! assert!(!state.apply(&Action::AddOrUpdateNode(node)));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::{ConnectionSetting, encode_bool};
use crate::types::{
    Channel, ConnectionType, DeviceStatus, MessageWithAck, MyNodeInfo, NodeInfo, NodeNum,
    PacketId, PositionPacket, User, UserPreferences,
};

/// A single event applied to [`MeshState`](super::MeshState).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Replace the device status.
    SetDeviceStatus(DeviceStatus),

    /// Replace the last mesh interaction time, in milliseconds since the
    /// Unix epoch. The caller supplies the clock reading.
    SetLastInteraction(i64),

    /// Mark whether the initial configuration exchange has completed.
    SetReady(bool),

    /// Replace the local device's identity record.
    SetSelfNodeInfo(MyNodeInfo),

    /// Replace a user profile.
    ///
    /// Routed to the local user when `node_num` is the local node number,
    /// otherwise to the roster entry with that number.
    SetUser {
        /// Node the profile belongs to.
        node_num: NodeNum,
        /// The new profile.
        user: User,
    },

    /// Append a position report.
    AddPositionReport(PositionPacket),

    /// Insert or replace a roster entry, keyed by `num`.
    AddOrUpdateNode(NodeInfo),

    /// Insert or replace a channel slot, keyed by `index`.
    AddOrUpdateChannel(Channel),

    /// Replace the preference record.
    SetPreferences(UserPreferences),

    /// Append to the message log.
    AddMessage(MessageWithAck),

    /// Mark the first logged message with this packet id as acknowledged.
    AckMessage(PacketId),

    /// Enable or disable the host override.
    SetHostOverrideEnabled(bool),

    /// Set the overriding host address.
    SetHostOverrideAddress(String),

    /// Set the transport kind.
    SetConnectionType(ConnectionType),
}

impl Action {
    /// Creates a last-interaction update from a clock reading.
    #[must_use]
    pub fn touch(now: DateTime<Utc>) -> Self {
        Self::SetLastInteraction(now.timestamp_millis())
    }

    /// Creates a user profile update.
    #[must_use]
    pub fn set_user(node_num: NodeNum, user: User) -> Self {
        Self::SetUser { node_num, user }
    }

    /// Creates a host override address update.
    #[must_use]
    pub fn set_host_override_address(address: impl Into<String>) -> Self {
        Self::SetHostOverrideAddress(address.into())
    }

    /// Returns the connection setting this action writes and the string it
    /// is persisted as, if any.
    ///
    /// Booleans persist as `"true"`/`"false"` and the connection type as its
    /// decimal ordinal.
    #[must_use]
    pub fn persisted_setting(&self) -> Option<(ConnectionSetting, String)> {
        match self {
            Self::SetHostOverrideEnabled(enabled) => Some((
                ConnectionSetting::HostOverrideEnabled,
                encode_bool(*enabled).to_string(),
            )),
            Self::SetHostOverrideAddress(address) => {
                Some((ConnectionSetting::HostOverrideAddress, address.clone()))
            }
            Self::SetConnectionType(connection_type) => Some((
                ConnectionSetting::ConnectionType,
                connection_type.to_ordinal_string(),
            )),
            _ => None,
        }
    }

    /// Returns the connection setting this action writes, if any.
    #[must_use]
    pub fn connection_setting(&self) -> Option<ConnectionSetting> {
        self.persisted_setting().map(|(setting, _)| setting)
    }

    /// Returns `true` if this action writes a persisted connection setting.
    #[must_use]
    pub fn is_connection_setting(&self) -> bool {
        self.connection_setting().is_some()
    }

    /// Returns a stable name for logs and events.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SetDeviceStatus(_) => "set_device_status",
            Self::SetLastInteraction(_) => "set_last_interaction",
            Self::SetReady(_) => "set_ready",
            Self::SetSelfNodeInfo(_) => "set_self_node_info",
            Self::SetUser { .. } => "set_user",
            Self::AddPositionReport(_) => "add_position_report",
            Self::AddOrUpdateNode(_) => "add_or_update_node",
            Self::AddOrUpdateChannel(_) => "add_or_update_channel",
            Self::SetPreferences(_) => "set_preferences",
            Self::AddMessage(_) => "add_message",
            Self::AckMessage(_) => "ack_message",
            Self::SetHostOverrideEnabled(_) => "set_host_override_enabled",
            Self::SetHostOverrideAddress(_) => "set_host_override_address",
            Self::SetConnectionType(_) => "set_connection_type",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touch_uses_milliseconds() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        assert_eq!(
            Action::touch(now),
            Action::SetLastInteraction(1_700_000_000_000)
        );
    }

    #[test]
    fn connection_settings_are_classified() {
        assert_eq!(
            Action::SetHostOverrideEnabled(true).connection_setting(),
            Some(ConnectionSetting::HostOverrideEnabled)
        );
        assert_eq!(
            Action::set_host_override_address("10.0.0.5").connection_setting(),
            Some(ConnectionSetting::HostOverrideAddress)
        );
        assert!(Action::SetConnectionType(ConnectionType::Serial).is_connection_setting());
        assert!(!Action::SetReady(true).is_connection_setting());
    }

    #[test]
    fn persisted_setting_uses_stored_encodings() {
        assert_eq!(
            Action::SetHostOverrideEnabled(false).persisted_setting(),
            Some((ConnectionSetting::HostOverrideEnabled, "false".to_string()))
        );
        assert_eq!(
            Action::set_host_override_address("10.0.0.5").persisted_setting(),
            Some((ConnectionSetting::HostOverrideAddress, "10.0.0.5".to_string()))
        );
        assert_eq!(
            Action::SetConnectionType(ConnectionType::Bluetooth).persisted_setting(),
            Some((ConnectionSetting::ConnectionType, "1".to_string()))
        );
        assert_eq!(Action::SetReady(true).persisted_setting(), None);
    }

    #[test]
    fn names_are_snake_case() {
        assert_eq!(
            Action::set_user(NodeNum::new(1), User::default()).name(),
            "set_user"
        );
        assert_eq!(
            Action::SetDeviceStatus(DeviceStatus::Connected).name(),
            "set_device_status"
        );
    }
}
