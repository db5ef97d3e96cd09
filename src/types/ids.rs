// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Numeric identifiers used by the mesh protocol.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number identifying a node on the mesh.
///
/// Node numbers are unique within a mesh and are the key of the node roster.
/// They display in the conventional `!xxxxxxxx` hexadecimal form.
///
/// # Examples
///
/// ```
/// use meshmirror_lib::types::NodeNum;
///
/// let num = NodeNum::new(0xdead_beef);
/// assert_eq!(num.to_string(), "!deadbeef");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeNum(u32);

impl NodeNum {
    /// The broadcast address.
    pub const BROADCAST: Self = Self(u32::MAX);

    /// Creates a node number from its raw value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Returns `true` if this is the broadcast address.
    #[must_use]
    pub const fn is_broadcast(&self) -> bool {
        self.0 == u32::MAX
    }
}

impl fmt::Display for NodeNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "!{:08x}", self.0)
    }
}

impl From<u32> for NodeNum {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<NodeNum> for u32 {
    fn from(num: NodeNum) -> Self {
        num.0
    }
}

/// Identifier of a mesh packet.
///
/// Acknowledgments reference the packet id of the message they confirm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PacketId(u32);

impl PacketId {
    /// Creates a packet id from its raw value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for PacketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PacketId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}
