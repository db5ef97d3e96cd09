// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mirrored device state.

use serde::{Deserialize, Serialize};

use crate::storage::ConnectionSettings;
use crate::types::{
    Channel, ConnectionType, DeviceStatus, MessageWithAck, MyNodeInfo, NodeInfo, NodeNum,
    PacketId, PositionPacket, User, UserPreferences,
};

use super::Action;

/// Snapshot of everything the device has reported.
///
/// The roster and channel list are unique by key and keep their insertion
/// order; an update to an existing key replaces that entry where it stands.
/// Position reports and messages are append-only logs in arrival order.
///
/// # Examples
///
/// ```
/// use meshmirror_lib::state::{Action, MeshState};
/// use meshmirror_lib::types::{DeviceStatus, MyNodeInfo, NodeNum, User};
///
/// let mut state = MeshState::new();
/// state.apply(&Action::SetDeviceStatus(DeviceStatus::Connected));
/// state.apply(&Action::SetSelfNodeInfo(MyNodeInfo::new(NodeNum::new(42))));
/// state.apply(&Action::set_user(NodeNum::new(42), User::new("!0000002a", "Base", "B")));
///
/// assert_eq!(state.self_user().short_name, "B");
/// assert!(state.nodes().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshState {
    device_status: DeviceStatus,
    last_interaction: i64,
    ready: bool,
    self_node_info: MyNodeInfo,
    self_user: User,
    position_reports: Vec<PositionPacket>,
    nodes: Vec<NodeInfo>,
    channels: Vec<Channel>,
    preferences: UserPreferences,
    messages: Vec<MessageWithAck>,
    host_override_enabled: bool,
    host_override_address: String,
    connection_type: ConnectionType,
}

impl MeshState {
    /// Creates an empty state with default connection settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty state carrying the given connection settings.
    #[must_use]
    pub fn with_settings(settings: ConnectionSettings) -> Self {
        Self {
            host_override_enabled: settings.host_override_enabled,
            host_override_address: settings.host_override_address,
            connection_type: settings.connection_type,
            ..Self::default()
        }
    }

    // ========== Accessors ==========

    /// Current device status.
    #[must_use]
    pub fn device_status(&self) -> DeviceStatus {
        self.device_status
    }

    /// Time of the last observed mesh event, in milliseconds since the Unix epoch.
    #[must_use]
    pub fn last_interaction(&self) -> i64 {
        self.last_interaction
    }

    /// Whether the initial configuration exchange has completed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// The local device's identity.
    #[must_use]
    pub fn self_node_info(&self) -> &MyNodeInfo {
        &self.self_node_info
    }

    /// The local device's node number.
    #[must_use]
    pub fn self_node_num(&self) -> NodeNum {
        self.self_node_info.my_node_num
    }

    /// The local user profile.
    #[must_use]
    pub fn self_user(&self) -> &User {
        &self.self_user
    }

    /// Position reports in arrival order.
    #[must_use]
    pub fn position_reports(&self) -> &[PositionPacket] {
        &self.position_reports
    }

    /// The node roster.
    #[must_use]
    pub fn nodes(&self) -> &[NodeInfo] {
        &self.nodes
    }

    /// Looks up a roster entry by node number.
    #[must_use]
    pub fn node(&self, num: NodeNum) -> Option<&NodeInfo> {
        self.nodes.iter().find(|node| node.num == num)
    }

    /// Configured channel slots.
    #[must_use]
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Looks up a channel slot by index.
    #[must_use]
    pub fn channel(&self, index: u32) -> Option<&Channel> {
        self.channels.iter().find(|channel| channel.index == index)
    }

    /// Radio and user preferences.
    #[must_use]
    pub fn preferences(&self) -> &UserPreferences {
        &self.preferences
    }

    /// The message log in arrival order.
    #[must_use]
    pub fn messages(&self) -> &[MessageWithAck] {
        &self.messages
    }

    /// Looks up the first logged message with the given packet id.
    #[must_use]
    pub fn message(&self, id: PacketId) -> Option<&MessageWithAck> {
        self.messages.iter().find(|m| m.packet_id() == id)
    }

    /// Whether the host override is in effect.
    #[must_use]
    pub fn host_override_enabled(&self) -> bool {
        self.host_override_enabled
    }

    /// The overriding host address.
    #[must_use]
    pub fn host_override_address(&self) -> &str {
        &self.host_override_address
    }

    /// The transport kind.
    #[must_use]
    pub fn connection_type(&self) -> ConnectionType {
        self.connection_type
    }

    /// Returns the connection settings as one value.
    #[must_use]
    pub fn connection_settings(&self) -> ConnectionSettings {
        ConnectionSettings {
            host_override_enabled: self.host_override_enabled,
            host_override_address: self.host_override_address.clone(),
            connection_type: self.connection_type,
        }
    }

    // ========== Actions ==========

    /// Applies an action and returns whether the state actually changed.
    ///
    /// This is the pure part of the store: it performs no I/O and never
    /// fails. Lookups that match nothing (a profile for an unknown node, an
    /// acknowledgment for an unknown packet) leave the state untouched.
    pub fn apply(&mut self, action: &Action) -> bool {
        match action {
            Action::SetDeviceStatus(status) => replace(&mut self.device_status, *status),
            Action::SetLastInteraction(timestamp) => {
                replace(&mut self.last_interaction, *timestamp)
            }
            Action::SetReady(ready) => replace(&mut self.ready, *ready),
            Action::SetSelfNodeInfo(info) => replace(&mut self.self_node_info, info.clone()),
            Action::SetUser { node_num, user } => self.set_user(*node_num, user),
            Action::AddPositionReport(report) => {
                self.position_reports.push(*report);
                true
            }
            Action::AddOrUpdateNode(node) => upsert(&mut self.nodes, node, |n| n.num),
            Action::AddOrUpdateChannel(channel) => {
                upsert(&mut self.channels, channel, |c| c.index)
            }
            Action::SetPreferences(preferences) => {
                replace(&mut self.preferences, preferences.clone())
            }
            Action::AddMessage(message) => {
                self.messages.push(message.clone());
                true
            }
            Action::AckMessage(id) => self.ack_message(*id),
            Action::SetHostOverrideEnabled(enabled) => {
                replace(&mut self.host_override_enabled, *enabled)
            }
            Action::SetHostOverrideAddress(address) => {
                replace(&mut self.host_override_address, address.clone())
            }
            Action::SetConnectionType(connection_type) => {
                replace(&mut self.connection_type, *connection_type)
            }
        }
    }

    fn set_user(&mut self, node_num: NodeNum, user: &User) -> bool {
        if node_num == self.self_node_num() {
            return replace(&mut self.self_user, user.clone());
        }

        match self.nodes.iter_mut().find(|node| node.num == node_num) {
            Some(node) => replace(&mut node.user, Some(user.clone())),
            None => {
                tracing::debug!(node = %node_num, "Ignoring user update for unknown node");
                false
            }
        }
    }

    fn ack_message(&mut self, id: PacketId) -> bool {
        let Some(index) = self.messages.iter().position(|m| m.packet_id() == id) else {
            tracing::debug!(packet_id = %id, "Ignoring ack for unknown message");
            return false;
        };

        if self.messages[index].acknowledged {
            return false;
        }
        self.messages[index] = self.messages[index].acknowledge();
        true
    }
}

/// Replaces `slot` with `value`, returning whether it differed.
fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

/// Inserts `record` or replaces the entry with the same key in place.
///
/// Returns `false` when an identical entry is already present.
fn upsert<T, K, F>(items: &mut Vec<T>, record: &T, key: F) -> bool
where
    T: Clone + PartialEq,
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let wanted = key(record);
    match items.iter().position(|item| key(item) == wanted) {
        Some(index) => replace(&mut items[index], record.clone()),
        None => {
            items.push(record.clone());
            true
        }
    }
}
