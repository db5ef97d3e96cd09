// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the device state store.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;
use meshmirror_lib::event::StoreEvent;
use meshmirror_lib::state::Action;
use meshmirror_lib::storage::{ConnectionSetting, JsonFileStore, KeyValueStore, MemoryStore};
use meshmirror_lib::store::DeviceStore;
use meshmirror_lib::transport::Transport;
use meshmirror_lib::types::{
    Channel, ConnectionType, DeviceStatus, MessageWithAck, MyNodeInfo, NodeInfo, NodeNum,
    PacketId, PacketMeta, TextPacket, User,
};
use meshmirror_lib::StorageError;

/// Transport that counts disconnect calls.
#[derive(Default)]
struct CountingTransport {
    disconnects: AtomicUsize,
}

impl CountingTransport {
    fn count(&self) -> usize {
        self.disconnects.load(Ordering::SeqCst)
    }
}

impl Transport for CountingTransport {
    fn disconnect(&self) {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
    }
}

/// Storage that records writes but reports a fixed value for one key,
/// like a managed-preferences layer overriding the user's choice.
struct CoercingStore {
    inner: MemoryStore,
    key: &'static str,
    forced: &'static str,
}

impl KeyValueStore for CoercingStore {
    fn get(&self, key: &str) -> Option<String> {
        if key == self.key {
            return Some(self.forced.to_string());
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.set(key, value)
    }
}

/// Storage whose writes always fail.
struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Rejected {
            key: key.to_string(),
            reason: "read-only medium".to_string(),
        })
    }
}

/// Storage that serves its initial entries and rejects every write.
struct PinnedStore {
    inner: MemoryStore,
}

impl KeyValueStore for PinnedStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Rejected {
            key: key.to_string(),
            reason: "managed by policy".to_string(),
        })
    }
}

fn node(num: u32, name: &str) -> NodeInfo {
    NodeInfo::new(NodeNum::new(num)).with_user(User::new(format!("!{num:08x}"), name, name))
}

fn message(id: u32) -> MessageWithAck {
    let packet = PacketMeta::new(PacketId::new(id), NodeNum::new(42), NodeNum::BROADCAST);
    MessageWithAck::outgoing(TextPacket::new(packet, format!("msg {id}")), Utc::now())
}

fn new_store() -> (DeviceStore, Arc<MemoryStore>, Arc<CountingTransport>) {
    let storage = Arc::new(MemoryStore::new());
    let transport = Arc::new(CountingTransport::default());
    let store = DeviceStore::new(storage.clone(), transport.clone());
    (store, storage, transport)
}

// ============================================================================
// Collections
// ============================================================================

mod collections {
    use super::*;

    #[test]
    fn node_upsert_is_idempotent() {
        let (mut once, _, _) = new_store();
        once.add_or_update_node(node(1, "A"));

        let (mut twice, _, _) = new_store();
        twice.add_or_update_node(node(1, "A"));
        assert!(!twice.add_or_update_node(node(1, "A")));

        assert_eq!(once.snapshot().nodes(), twice.snapshot().nodes());
    }

    #[test]
    fn node_upsert_replaces_in_place() {
        let (mut store, _, _) = new_store();
        store.add_or_update_node(node(1, "A"));
        store.add_or_update_node(node(2, "B"));
        store.add_or_update_node(node(3, "C"));

        store.add_or_update_node(node(2, "B-prime"));

        let snapshot = store.snapshot();
        assert_eq!(
            snapshot.nodes(),
            &[node(1, "A"), node(2, "B-prime"), node(3, "C")]
        );
    }

    #[test]
    fn channel_upsert_appends() {
        let (mut store, _, _) = new_store();
        store.add_or_update_channel(Channel::primary(0, "LongFast"));
        store.add_or_update_channel(Channel::secondary(1, "admin"));

        let indexes: Vec<u32> = store.snapshot().channels().iter().map(|c| c.index).collect();
        assert_eq!(indexes, vec![0, 1]);
    }

    #[test]
    fn previous_snapshot_is_not_mutated() {
        let (mut store, _, _) = new_store();
        store.add_or_update_node(node(1, "A"));
        let before = store.snapshot();

        store.add_or_update_node(node(1, "A2"));

        assert_eq!(before.nodes(), &[node(1, "A")]);
        assert_eq!(store.snapshot().nodes(), &[node(1, "A2")]);
    }
}

// ============================================================================
// Acknowledgments
// ============================================================================

mod acknowledgments {
    use super::*;

    #[test]
    fn ack_marks_matching_message_only() {
        let (mut store, _, _) = new_store();
        store.add_message(message(5));
        store.add_message(message(6));

        assert!(store.ack_message(PacketId::new(5)));

        let snapshot = store.snapshot();
        assert!(snapshot.messages()[0].acknowledged);
        assert!(!snapshot.messages()[1].acknowledged);
    }

    #[test]
    fn ack_for_unknown_id_changes_nothing() {
        let (mut store, _, _) = new_store();
        store.add_message(message(5));
        store.add_message(message(6));
        let before = store.snapshot();

        assert!(!store.ack_message(PacketId::new(99)));

        assert!(Arc::ptr_eq(&before, &store.snapshot()));
        assert!(store.snapshot().messages().iter().all(|m| !m.acknowledged));
    }
}

// ============================================================================
// User routing
// ============================================================================

mod user_routing {
    use super::*;

    #[test]
    fn self_user_update_leaves_roster_alone() {
        let (mut store, _, _) = new_store();
        store.set_self_node_info(MyNodeInfo::new(NodeNum::new(42)));
        store.add_or_update_node(node(7, "Peer"));

        let me = User::new("!0000002a", "Me", "ME");
        store.set_user(NodeNum::new(42), me.clone());

        let snapshot = store.snapshot();
        assert_eq!(snapshot.self_user(), &me);
        assert_eq!(snapshot.nodes(), &[node(7, "Peer")]);
    }

    #[test]
    fn roster_user_update_leaves_self_alone() {
        let (mut store, _, _) = new_store();
        store.set_self_node_info(MyNodeInfo::new(NodeNum::new(42)));
        store.add_or_update_node(node(7, "Peer"));

        let renamed = User::new("!00000007", "Renamed", "RN");
        store.set_user(NodeNum::new(7), renamed.clone());

        let snapshot = store.snapshot();
        assert_eq!(snapshot.node(NodeNum::new(7)).unwrap().user, Some(renamed));
        assert_eq!(snapshot.self_user(), &User::default());
    }

    #[test]
    fn unknown_node_is_ignored() {
        let (mut store, _, _) = new_store();
        store.set_self_node_info(MyNodeInfo::new(NodeNum::new(42)));

        assert!(!store.set_user(NodeNum::new(8), User::default()));
        assert!(store.snapshot().nodes().is_empty());
    }
}

// ============================================================================
// Connection settings
// ============================================================================

mod connection_settings {
    use super::*;

    #[test]
    fn address_is_persisted_verbatim() {
        let (mut store, storage, transport) = new_store();

        store.set_host_override_address("10.0.0.5");

        assert_eq!(storage.get("hostOverride").as_deref(), Some("10.0.0.5"));
        assert_eq!(store.snapshot().host_override_address(), "10.0.0.5");
        assert_eq!(transport.count(), 0);
    }

    #[test]
    fn confirmed_writes_never_disconnect() {
        let (mut store, _, transport) = new_store();

        store.set_host_override_enabled(true);
        store.set_host_override_enabled(false);
        store.set_connection_type(ConnectionType::Serial);
        store.set_host_override_address("meshtastic.local");

        assert_eq!(transport.count(), 0);
    }

    #[test]
    fn coerced_write_disconnects_transport() {
        let storage = Arc::new(CoercingStore {
            inner: MemoryStore::new(),
            key: "connectionType",
            forced: "0",
        });
        let transport = Arc::new(CountingTransport::default());
        let mut store = DeviceStore::new(storage.clone(), transport.clone());
        let mut events = store.subscribe();

        store.set_connection_type(ConnectionType::Bluetooth);

        assert_eq!(transport.count(), 1);
        assert_eq!(storage.inner.get("connectionType").as_deref(), Some("1"));
        assert_eq!(store.snapshot().connection_type(), ConnectionType::Bluetooth);

        assert_eq!(
            events.try_recv().unwrap(),
            StoreEvent::session_invalidated(ConnectionSetting::ConnectionType)
        );
        assert_eq!(
            events.try_recv().unwrap(),
            StoreEvent::action_applied("set_connection_type", true)
        );
    }

    #[test]
    fn coercion_of_other_keys_is_ignored() {
        let storage = Arc::new(CoercingStore {
            inner: MemoryStore::new(),
            key: "hostOverride",
            forced: "192.168.1.1",
        });
        let transport = Arc::new(CountingTransport::default());
        let mut store = DeviceStore::new(storage, transport.clone());

        store.set_host_override_enabled(true);
        assert_eq!(transport.count(), 0);

        store.set_host_override_address("10.0.0.5");
        assert_eq!(transport.count(), 1);
    }

    #[test]
    fn failed_write_keeps_in_memory_value_and_disconnects() {
        let transport = Arc::new(CountingTransport::default());
        let mut store = DeviceStore::new(Arc::new(FailingStore), transport.clone());
        let mut events = store.subscribe();

        assert!(store.set_host_override_enabled(true));

        assert!(store.snapshot().host_override_enabled());
        assert_eq!(transport.count(), 1);
        assert_eq!(
            events.try_recv().unwrap(),
            StoreEvent::session_invalidated(ConnectionSetting::HostOverrideEnabled)
        );
    }

    #[test]
    fn rejecting_backend_keeps_previous_value() {
        let storage = Arc::new(PinnedStore {
            inner: MemoryStore::with_entries([("connectionType", "0")]),
        });
        let transport = Arc::new(CountingTransport::default());
        let mut store = DeviceStore::new(storage.clone(), transport.clone());

        store.set_connection_type(ConnectionType::Serial);

        assert_eq!(store.snapshot().connection_type(), ConnectionType::Serial);
        assert_eq!(storage.get("connectionType").as_deref(), Some("0"));
        assert_eq!(transport.count(), 1);

        // Writing back the pinned value confirms and keeps the session
        store.set_connection_type(ConnectionType::Http);
        assert_eq!(transport.count(), 1);
    }

    #[test]
    fn settings_survive_restart_through_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        {
            let storage = Arc::new(JsonFileStore::open(&path).unwrap());
            let mut store = DeviceStore::new(storage, Arc::new(|| {}));
            store.set_host_override_enabled(true);
            store.set_host_override_address("10.0.0.5");
            store.set_connection_type(ConnectionType::Serial);
            store.add_or_update_node(node(1, "A"));
        }

        let storage = Arc::new(JsonFileStore::open(&path).unwrap());
        let store = DeviceStore::new(storage, Arc::new(|| {}));
        let snapshot = store.snapshot();

        assert!(snapshot.host_override_enabled());
        assert_eq!(snapshot.host_override_address(), "10.0.0.5");
        assert_eq!(snapshot.connection_type(), ConnectionType::Serial);
        assert!(snapshot.nodes().is_empty());
    }
}

// ============================================================================
// Queued delivery
// ============================================================================

mod queued {
    use super::*;

    #[tokio::test]
    async fn actions_from_many_tasks_are_all_applied() {
        let (store, _, _) = new_store();
        let (dispatcher, worker) = store.into_queue();
        let worker = tokio::spawn(worker.run());

        let mut producers = Vec::new();
        for task in 0..4u32 {
            let handle = dispatcher.clone();
            producers.push(tokio::spawn(async move {
                for i in 0..25u32 {
                    let num = task * 100 + i;
                    handle
                        .dispatch(Action::AddOrUpdateNode(NodeInfo::new(NodeNum::new(num))))
                        .unwrap();
                }
            }));
        }
        for producer in producers {
            producer.await.unwrap();
        }
        drop(dispatcher);

        let store = worker.await.unwrap();
        assert_eq!(store.snapshot().nodes().len(), 100);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn file_backed_settings_through_queue() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let storage = Arc::new(JsonFileStore::open(&path).unwrap());
        let transport = Arc::new(CountingTransport::default());

        let store = DeviceStore::new(storage.clone(), transport.clone());
        let (dispatcher, worker) = store.into_queue();
        let worker = tokio::spawn(worker.run());

        dispatcher
            .send(Action::SetConnectionType(ConnectionType::Bluetooth))
            .await
            .unwrap();
        dispatcher
            .send(Action::set_host_override_address("10.0.0.5"))
            .await
            .unwrap();
        drop(dispatcher);
        worker.await.unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get("connectionType").as_deref(), Some("1"));
        assert_eq!(reopened.get("hostOverride").as_deref(), Some("10.0.0.5"));
        assert_eq!(transport.count(), 0);
    }

    #[tokio::test]
    async fn watchers_see_device_lifecycle() {
        let (store, _, _) = new_store();
        let (dispatcher, worker) = store.into_queue();
        let mut snapshots = dispatcher.watch();
        let worker = tokio::spawn(worker.run());

        dispatcher
            .dispatch(Action::SetDeviceStatus(DeviceStatus::Configured))
            .unwrap();
        dispatcher.dispatch(Action::SetReady(true)).unwrap();
        dispatcher.dispatch(Action::touch(Utc::now())).unwrap();
        drop(dispatcher);
        worker.await.unwrap();

        assert!(snapshots.has_changed().unwrap_or(true));
        let latest = snapshots.borrow_and_update().clone();
        assert_eq!(latest.device_status(), DeviceStatus::Configured);
        assert!(latest.is_ready());
        assert!(latest.last_interaction() > 0);
    }
}
