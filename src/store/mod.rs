// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The device state store.
//!
//! [`DeviceStore`] owns the current [`MeshState`](crate::state::MeshState)
//! snapshot and applies actions to it one at a time. On top of the pure
//! reducer it carries two side effects: connection settings are written to
//! durable storage, and the transport is disconnected when storage does not
//! confirm a setting write.
//!
//! # Overview
//!
//! - **Synchronous use**: call [`DeviceStore::dispatch`] (or one of the
//!   per-action methods) from a single thread
//! - **Queued use**: [`DeviceStore::into_queue`] returns a cloneable
//!   [`Dispatcher`] and a [`QueueWorker`] that serializes actions from any
//!   number of async sources
//! - **Observing**: snapshots are published through a `tokio::sync::watch`
//!   channel; discrete [`StoreEvent`](crate::event::StoreEvent)s through a
//!   broadcast channel
//!
//! # Examples
//!
//! ## Wiring a transport handler
//!
//! ```no_run
//! use std::sync::Arc;
//! use meshmirror_lib::state::Action;
//! use meshmirror_lib::storage::JsonFileStore;
//! use meshmirror_lib::store::DeviceStore;
//! use meshmirror_lib::types::DeviceStatus;
//!
//! # async fn example() -> meshmirror_lib::Result<()> {
//! let storage = Arc::new(JsonFileStore::open("prefs.json")?);
//! let store = DeviceStore::new(storage, Arc::new(|| { /* close the socket */ }));
//! let (dispatcher, worker) = store.into_queue();
//! tokio::spawn(worker.run());
//!
//! // The transport layer receives a dispatcher instead of a global store
//! let handler = dispatcher.clone();
//! tokio::spawn(async move {
//!     let _ = handler.dispatch(Action::SetDeviceStatus(DeviceStatus::Connected));
//! });
//!
//! // The UI re-renders on every snapshot replacement
//! let mut snapshots = dispatcher.watch();
//! while snapshots.changed().await.is_ok() {
//!     let state = snapshots.borrow_and_update().clone();
//!     println!("{} nodes, status {}", state.nodes().len(), state.device_status());
//! }
//! # Ok(())
//! # }
//! ```

mod device_store;
mod queue;

pub use device_store::DeviceStore;
pub use queue::{DEFAULT_QUEUE_CAPACITY, Dispatcher, QueueWorker};
