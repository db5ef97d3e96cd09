// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serialized action delivery.

use std::sync::Arc;

use tokio::runtime::{Handle, RuntimeFlavor};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{broadcast, mpsc, watch};

use crate::error::{Error, Result};
use crate::event::{EventBus, StoreEvent};
use crate::state::{Action, MeshState};

use super::DeviceStore;

/// Default number of actions a store queue holds.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// Cloneable handle for feeding actions to a store running in a
/// [`QueueWorker`].
///
/// Hand one to each transport handler and UI component instead of sharing
/// the store itself. Actions from every handle land in one bounded queue and
/// are applied in arrival order.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    tx: mpsc::Sender<Action>,
    snapshot_rx: watch::Receiver<Arc<MeshState>>,
    event_bus: EventBus,
}

impl Dispatcher {
    /// Queues an action for the store without waiting.
    ///
    /// Suitable for synchronous callers such as decoder callbacks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::QueueFull`] if the queue is at capacity, or
    /// [`Error::ChannelClosed`] if the worker has stopped. The action is
    /// dropped in both cases.
    pub fn dispatch(&self, action: Action) -> Result<()> {
        self.tx.try_send(action).map_err(|e| match e {
            TrySendError::Full(action) => {
                tracing::warn!(action = action.name(), "Store queue full, dropping action");
                Error::QueueFull(format!("dropped {}", action.name()))
            }
            TrySendError::Closed(action) => {
                Error::ChannelClosed(format!("store queue stopped, dropped {}", action.name()))
            }
        })
    }

    /// Queues an action, waiting for room if the queue is full.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelClosed`] if the worker has stopped.
    pub async fn send(&self, action: Action) -> Result<()> {
        self.tx
            .send(action)
            .await
            .map_err(|e| Error::ChannelClosed(format!("store queue stopped, dropped {}", e.0.name())))
    }

    /// Returns the most recently published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<MeshState> {
        self.snapshot_rx.borrow().clone()
    }

    /// Returns a receiver that observes every snapshot replacement.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<Arc<MeshState>> {
        self.snapshot_rx.clone()
    }

    /// Subscribes to store events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.event_bus.subscribe()
    }

    /// Returns `true` if the worker has stopped.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Drives a [`DeviceStore`] from its action queue.
#[derive(Debug)]
pub struct QueueWorker {
    store: DeviceStore,
    rx: mpsc::Receiver<Action>,
}

impl QueueWorker {
    /// Applies queued actions one at a time until every [`Dispatcher`] is
    /// dropped, then returns the store.
    ///
    /// Connection setting actions write to storage synchronously. On a
    /// multi-threaded runtime they run under
    /// [`block_in_place`](tokio::task::block_in_place) so the write does not
    /// stall other tasks on this worker thread.
    pub async fn run(mut self) -> DeviceStore {
        tracing::debug!("Store queue worker started");

        let offload = can_block_in_place();
        while let Some(action) = self.rx.recv().await {
            if offload && action.is_connection_setting() {
                tokio::task::block_in_place(|| self.store.dispatch(action));
            } else {
                self.store.dispatch(action);
            }
        }

        tracing::debug!("All dispatchers dropped, store queue worker stopping");
        self.store
    }

    /// Returns the store being driven.
    #[must_use]
    pub fn store(&self) -> &DeviceStore {
        &self.store
    }
}

/// `block_in_place` panics on a current-thread runtime.
fn can_block_in_place() -> bool {
    Handle::try_current().is_ok_and(|handle| handle.runtime_flavor() == RuntimeFlavor::MultiThread)
}

impl DeviceStore {
    /// Moves the store behind an action queue of [`DEFAULT_QUEUE_CAPACITY`].
    ///
    /// Spawn [`QueueWorker::run`] on the runtime and clone the
    /// [`Dispatcher`] into every event source.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use meshmirror_lib::state::Action;
    /// use meshmirror_lib::storage::MemoryStore;
    /// use meshmirror_lib::store::DeviceStore;
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() -> meshmirror_lib::Result<()> {
    /// let store = DeviceStore::new(Arc::new(MemoryStore::new()), Arc::new(|| {}));
    /// let (dispatcher, worker) = store.into_queue();
    /// let worker = tokio::spawn(worker.run());
    ///
    /// dispatcher.dispatch(Action::SetReady(true))?;
    /// let mut snapshots = dispatcher.watch();
    /// drop(dispatcher);
    ///
    /// let store = worker.await.unwrap();
    /// assert!(store.snapshot().is_ready());
    /// assert!(snapshots.borrow_and_update().is_ready());
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn into_queue(self) -> (Dispatcher, QueueWorker) {
        self.into_queue_with_capacity(DEFAULT_QUEUE_CAPACITY)
    }

    /// Moves the store behind an action queue holding up to `capacity`
    /// actions. A capacity of zero is raised to one.
    #[must_use]
    pub fn into_queue_with_capacity(self, capacity: usize) -> (Dispatcher, QueueWorker) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let dispatcher = Dispatcher {
            tx,
            snapshot_rx: self.watch(),
            event_bus: self.event_bus().clone(),
        };
        (dispatcher, QueueWorker { store: self, rx })
    }
}
