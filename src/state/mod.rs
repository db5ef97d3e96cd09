// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mirrored device state and the actions that change it.
//!
//! [`MeshState`] holds everything the device has reported; [`Action`]
//! represents one event to apply to it. Applying is pure: side effects such
//! as persistence and disconnecting live in [`crate::store`].
//!
//! # Examples
//!
//! ```
//! use meshmirror_lib::state::{Action, MeshState};
//! use meshmirror_lib::types::{Channel, DeviceStatus};
//!
//! let mut state = MeshState::new();
//!
//! state.apply(&Action::SetDeviceStatus(DeviceStatus::Configuring));
//! state.apply(&Action::AddOrUpdateChannel(Channel::primary(0, "LongFast")));
//!
//! assert_eq!(state.device_status(), DeviceStatus::Configuring);
//! assert_eq!(state.channels().len(), 1);
//! ```

mod action;
mod mesh_state;

pub use action::Action;
pub use mesh_state::MeshState;
