// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decoded mesh packets and the message log entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{NodeNum, PacketId, Position};

/// Envelope fields shared by every decoded mesh packet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacketMeta {
    /// Packet identifier, referenced by acknowledgments.
    pub id: PacketId,
    /// Sending node.
    pub from: NodeNum,
    /// Destination node, or [`NodeNum::BROADCAST`].
    pub to: NodeNum,
    /// Channel index the packet travelled on.
    pub channel: u32,
    /// Receive time, seconds since the Unix epoch.
    pub rx_time: u32,
}

impl PacketMeta {
    /// Creates an envelope with the given id and endpoints.
    #[must_use]
    pub fn new(id: PacketId, from: NodeNum, to: NodeNum) -> Self {
        Self {
            id,
            from,
            to,
            ..Self::default()
        }
    }
}

/// A text message packet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPacket {
    /// Packet envelope.
    pub packet: PacketMeta,
    /// Message body.
    pub text: String,
}

impl TextPacket {
    /// Creates a text packet.
    #[must_use]
    pub fn new(packet: PacketMeta, text: impl Into<String>) -> Self {
        Self {
            packet,
            text: text.into(),
        }
    }

    /// Returns the packet identifier.
    #[must_use]
    pub fn id(&self) -> PacketId {
        self.packet.id
    }
}

/// A position report packet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionPacket {
    /// Packet envelope.
    pub packet: PacketMeta,
    /// Reported position.
    pub position: Position,
}

/// Entry of the message log.
///
/// `acknowledged` starts out `false` and flips to `true` once when the mesh
/// confirms delivery of the packet with the same id.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use meshmirror_lib::types::{MessageWithAck, NodeNum, PacketId, PacketMeta, TextPacket};
///
/// let packet = PacketMeta::new(PacketId::new(5), NodeNum::new(42), NodeNum::BROADCAST);
/// let entry = MessageWithAck::outgoing(TextPacket::new(packet, "hello"), Utc::now());
/// assert!(entry.is_sender);
/// assert!(!entry.acknowledged);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageWithAck {
    /// The text packet.
    pub message: TextPacket,
    /// Delivery confirmed by the mesh.
    pub acknowledged: bool,
    /// Sent by the local device.
    pub is_sender: bool,
    /// When the entry was recorded locally.
    pub received_at: DateTime<Utc>,
}

impl MessageWithAck {
    /// Creates an entry for a message sent from this device.
    #[must_use]
    pub fn outgoing(message: TextPacket, received_at: DateTime<Utc>) -> Self {
        Self {
            message,
            acknowledged: false,
            is_sender: true,
            received_at,
        }
    }

    /// Creates an entry for a message received from the mesh.
    #[must_use]
    pub fn incoming(message: TextPacket, received_at: DateTime<Utc>) -> Self {
        Self {
            message,
            acknowledged: false,
            is_sender: false,
            received_at,
        }
    }

    /// Returns the identifier of the underlying packet.
    #[must_use]
    pub fn packet_id(&self) -> PacketId {
        self.message.id()
    }

    /// Returns a copy marked as acknowledged.
    #[must_use]
    pub fn acknowledge(&self) -> Self {
        Self {
            acknowledged: true,
            ..self.clone()
        }
    }
}
