// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed records mirrored from the device.
//!
//! The protocol layer decodes device packets into these types before they
//! reach the store. The store trusts their shape: a [`NodeInfo`] always
//! carries its `num`, a [`Channel`] always carries its `index`.
//!
//! # Types
//!
//! - [`NodeNum`], [`PacketId`] - Mesh identifiers
//! - [`DeviceStatus`] - Device lifecycle status
//! - [`ConnectionType`] - Transport kind (persisted as an ordinal)
//! - [`MyNodeInfo`], [`User`], [`NodeInfo`], [`Position`] - Identity and roster
//! - [`Channel`], [`ChannelSettings`], [`ChannelRole`] - Channel slots
//! - [`UserPreferences`] - Radio and user preferences
//! - [`PacketMeta`], [`TextPacket`], [`PositionPacket`], [`MessageWithAck`] - Packets and the message log

mod channel;
mod connection_type;
mod device_status;
mod ids;
mod message;
mod node;
mod preferences;

pub use channel::{Channel, ChannelRole, ChannelSettings};
pub use connection_type::ConnectionType;
pub use device_status::DeviceStatus;
pub use ids::{NodeNum, PacketId};
pub use message::{MessageWithAck, PacketMeta, PositionPacket, TextPacket};
pub use node::{MyNodeInfo, NodeInfo, Position, User};
pub use preferences::UserPreferences;
