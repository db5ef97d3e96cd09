// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The device state store.

use std::fmt;
use std::sync::Arc;

use tokio::sync::{broadcast, watch};

use crate::event::{EventBus, StoreEvent};
use crate::state::{Action, MeshState};
use crate::storage::{ConnectionSetting, ConnectionSettings, KeyValueStore};
use crate::transport::Transport;
use crate::types::{
    Channel, ConnectionType, DeviceStatus, MessageWithAck, MyNodeInfo, NodeInfo, NodeNum,
    PacketId, PositionPacket, User, UserPreferences,
};

/// Store that owns the current [`MeshState`] snapshot.
///
/// Every action produces the next snapshot; the previous one is never
/// mutated, so readers holding an `Arc<MeshState>` keep a consistent view.
/// Watchers are notified only when the content changes.
///
/// Connection setting actions also write through to durable storage. After
/// the write, the store reads the value back. If storage reports something
/// other than what was written, the transport is told to disconnect so the
/// next session starts from the new configuration.
///
/// The store is synchronous and expects one action at a time. Use
/// [`into_queue`](Self::into_queue) to feed it from several async sources.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use meshmirror_lib::storage::{KeyValueStore, MemoryStore};
/// use meshmirror_lib::store::DeviceStore;
/// use meshmirror_lib::types::{NodeInfo, NodeNum};
///
/// let storage = Arc::new(MemoryStore::new());
/// let mut store = DeviceStore::new(storage.clone(), Arc::new(|| {}));
///
/// store.add_or_update_node(NodeInfo::new(NodeNum::new(7)));
/// store.set_host_override_address("10.0.0.5");
///
/// assert_eq!(store.snapshot().nodes().len(), 1);
/// assert_eq!(storage.get("hostOverride").as_deref(), Some("10.0.0.5"));
/// ```
pub struct DeviceStore {
    /// Current snapshot.
    state: Arc<MeshState>,
    /// Watch channel sender for snapshot replacements.
    snapshot_tx: watch::Sender<Arc<MeshState>>,
    /// Durable storage for connection settings.
    storage: Arc<dyn KeyValueStore>,
    /// Session to tear down when a setting write diverges.
    transport: Arc<dyn Transport>,
    /// Event bus for discrete notifications.
    event_bus: EventBus,
}

impl DeviceStore {
    /// Creates a store with connection settings hydrated from `storage`.
    ///
    /// All other fields start empty.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>, transport: Arc<dyn Transport>) -> Self {
        let settings = ConnectionSettings::load(storage.as_ref());
        let state = Arc::new(MeshState::with_settings(settings));
        let (snapshot_tx, _) = watch::channel(Arc::clone(&state));

        Self {
            state,
            snapshot_tx,
            storage,
            transport,
            event_bus: EventBus::new(),
        }
    }

    /// Replaces the event bus, e.g. to change its capacity.
    #[must_use]
    pub fn with_event_bus(mut self, event_bus: EventBus) -> Self {
        self.event_bus = event_bus;
        self
    }

    // =========================================================================
    // Reading
    // =========================================================================

    /// Returns the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<MeshState> {
        Arc::clone(&self.state)
    }

    /// Returns a receiver that observes every snapshot replacement.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<Arc<MeshState>> {
        self.snapshot_tx.subscribe()
    }

    /// Subscribes to store events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.event_bus.subscribe()
    }

    pub(crate) fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Applies an action and returns whether the snapshot content changed.
    ///
    /// Never fails. Persistence errors for connection settings are logged
    /// and do not roll back the in-memory value; if storage still reports a
    /// different value afterwards, the transport is disconnected.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let mut next = MeshState::clone(&self.state);
        let changed = next.apply(&action);

        if changed {
            self.state = Arc::new(next);
            self.snapshot_tx.send_replace(Arc::clone(&self.state));
        }

        if let Some((setting, intended)) = action.persisted_setting() {
            self.persist_setting(setting, &intended);
        }

        tracing::debug!(action = action.name(), changed, "Applied action");
        self.event_bus
            .publish(StoreEvent::action_applied(action.name(), changed));

        changed
    }

    /// Writes a connection setting and disconnects if storage does not
    /// confirm the intended value.
    ///
    /// The read-back runs whether or not `set` reported an error: a rejected
    /// write leaves the previous value in storage and invalidates the session
    /// the same way a coerced one does.
    fn persist_setting(&self, setting: ConnectionSetting, intended: &str) {
        let key = setting.key();

        if let Err(e) = self.storage.set(key, intended) {
            tracing::warn!(key, error = %e, "Failed to persist connection setting");
        }

        let confirmed = self.storage.get(key);
        if confirmed.as_deref() == Some(intended) {
            return;
        }

        tracing::info!(
            key,
            intended,
            confirmed = confirmed.as_deref().unwrap_or("<absent>"),
            "Connection setting not confirmed, disconnecting transport"
        );
        self.transport.disconnect();
        self.event_bus
            .publish(StoreEvent::session_invalidated(setting));
    }

    // =========================================================================
    // One method per action
    // =========================================================================

    /// Replaces the device status.
    pub fn set_device_status(&mut self, status: DeviceStatus) -> bool {
        self.dispatch(Action::SetDeviceStatus(status))
    }

    /// Replaces the last interaction time, in milliseconds since the Unix epoch.
    pub fn set_last_interaction(&mut self, timestamp: i64) -> bool {
        self.dispatch(Action::SetLastInteraction(timestamp))
    }

    /// Marks whether the configuration exchange has completed.
    pub fn set_ready(&mut self, ready: bool) -> bool {
        self.dispatch(Action::SetReady(ready))
    }

    /// Replaces the local device's identity.
    pub fn set_self_node_info(&mut self, info: MyNodeInfo) -> bool {
        self.dispatch(Action::SetSelfNodeInfo(info))
    }

    /// Replaces the user profile of the local device or a roster entry.
    pub fn set_user(&mut self, node_num: NodeNum, user: User) -> bool {
        self.dispatch(Action::set_user(node_num, user))
    }

    /// Appends a position report.
    pub fn add_position_report(&mut self, report: PositionPacket) -> bool {
        self.dispatch(Action::AddPositionReport(report))
    }

    /// Inserts or replaces a roster entry.
    pub fn add_or_update_node(&mut self, node: NodeInfo) -> bool {
        self.dispatch(Action::AddOrUpdateNode(node))
    }

    /// Inserts or replaces a channel slot.
    pub fn add_or_update_channel(&mut self, channel: Channel) -> bool {
        self.dispatch(Action::AddOrUpdateChannel(channel))
    }

    /// Replaces the preference record.
    pub fn set_preferences(&mut self, preferences: UserPreferences) -> bool {
        self.dispatch(Action::SetPreferences(preferences))
    }

    /// Appends to the message log.
    pub fn add_message(&mut self, message: MessageWithAck) -> bool {
        self.dispatch(Action::AddMessage(message))
    }

    /// Marks the first message with `id` as acknowledged.
    pub fn ack_message(&mut self, id: PacketId) -> bool {
        self.dispatch(Action::AckMessage(id))
    }

    /// Enables or disables the host override and persists the choice.
    pub fn set_host_override_enabled(&mut self, enabled: bool) -> bool {
        self.dispatch(Action::SetHostOverrideEnabled(enabled))
    }

    /// Sets the overriding host address and persists it.
    pub fn set_host_override_address(&mut self, address: impl Into<String>) -> bool {
        self.dispatch(Action::set_host_override_address(address))
    }

    /// Sets the transport kind and persists it.
    pub fn set_connection_type(&mut self, connection_type: ConnectionType) -> bool {
        self.dispatch(Action::SetConnectionType(connection_type))
    }
}

impl fmt::Debug for DeviceStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceStore")
            .field("state", &self.state)
            .field("event_bus", &self.event_bus)
            .finish_non_exhaustive()
    }
}
