// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `MeshMirror` Lib - client-side state mirror for mesh-networking devices.
//!
//! A companion application talks to a mesh radio over some transport. The
//! transport's decoders turn device packets into typed records; this library
//! folds those records into one consistent snapshot a user interface can
//! render.
//!
//! # What Is Mirrored
//!
//! - **Device lifecycle**: status, readiness, last interaction time
//! - **Identity**: the local node's identity and user profile
//! - **Roster and channels**: de-duplicated by key, order-stable on update
//! - **Logs**: position reports and the message log with delivery acks
//! - **Connection settings**: host override and transport kind, persisted
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use chrono::Utc;
//! use meshmirror_lib::storage::MemoryStore;
//! use meshmirror_lib::store::DeviceStore;
//! use meshmirror_lib::types::{
//!     MessageWithAck, NodeInfo, NodeNum, PacketId, PacketMeta, TextPacket,
//! };
//!
//! let mut store = DeviceStore::new(Arc::new(MemoryStore::new()), Arc::new(|| {}));
//!
//! store.add_or_update_node(NodeInfo::new(NodeNum::new(7)));
//!
//! let packet = PacketMeta::new(PacketId::new(5), NodeNum::new(42), NodeNum::new(7));
//! store.add_message(MessageWithAck::outgoing(TextPacket::new(packet, "hello"), Utc::now()));
//! store.ack_message(PacketId::new(5));
//!
//! let snapshot = store.snapshot();
//! assert!(snapshot.messages()[0].acknowledged);
//! ```
//!
//! ## Feeding the Store From Several Tasks
//!
//! ```
//! use std::sync::Arc;
//! use meshmirror_lib::state::Action;
//! use meshmirror_lib::storage::MemoryStore;
//! use meshmirror_lib::store::DeviceStore;
//! use meshmirror_lib::types::DeviceStatus;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> meshmirror_lib::Result<()> {
//! let store = DeviceStore::new(Arc::new(MemoryStore::new()), Arc::new(|| {}));
//! let (dispatcher, worker) = store.into_queue();
//! let worker = tokio::spawn(worker.run());
//!
//! dispatcher.dispatch(Action::SetDeviceStatus(DeviceStatus::Configured))?;
//! dispatcher.dispatch(Action::SetReady(true))?;
//! drop(dispatcher);
//!
//! let store = worker.await.unwrap();
//! assert!(store.snapshot().is_ready());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod event;
pub mod state;
pub mod storage;
pub mod store;
pub mod transport;
pub mod types;

pub use error::{Error, Result, StorageError, ValueError};
pub use event::{EventBus, StoreEvent};
pub use state::{Action, MeshState};
pub use storage::{ConnectionSetting, ConnectionSettings, JsonFileStore, KeyValueStore, MemoryStore};
pub use store::{DeviceStore, Dispatcher, QueueWorker};
pub use transport::Transport;
pub use types::{
    Channel, ConnectionType, DeviceStatus, MessageWithAck, MyNodeInfo, NodeInfo, NodeNum,
    PacketId, PositionPacket, TextPacket, User, UserPreferences,
};
