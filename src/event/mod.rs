// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Notifications emitted by the state store.
//!
//! Snapshot consumers normally watch the store's snapshot channel. The
//! [`EventBus`] complements it with discrete notifications: which action was
//! applied, and when a transport session was invalidated.
//!
//! # Examples
//!
//! ```
//! use meshmirror_lib::event::{EventBus, StoreEvent};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(StoreEvent::action_applied("set_ready", true));
//! assert!(rx.try_recv().unwrap().is_action_applied());
//! ```

mod event_bus;
mod store_event;

pub use event_bus::EventBus;
pub use store_event::StoreEvent;
