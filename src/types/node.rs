// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Node identity and position records.

use serde::{Deserialize, Serialize};

use super::NodeNum;

/// Scale between integer coordinates and degrees.
const COORDINATE_SCALE: f64 = 1e-7;

/// Identity of the locally connected device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MyNodeInfo {
    /// The device's own node number.
    pub my_node_num: NodeNum,
    /// Whether the device has a GPS receiver.
    pub has_gps: bool,
    /// Number of channel slots the firmware supports.
    pub max_channels: u32,
    /// Firmware version string.
    pub firmware_version: String,
    /// Number of reboots since the last factory reset.
    pub reboot_count: u32,
}

impl MyNodeInfo {
    /// Creates an identity record for the given node number.
    #[must_use]
    pub fn new(my_node_num: NodeNum) -> Self {
        Self {
            my_node_num,
            ..Self::default()
        }
    }
}

/// User profile attached to a node.
///
/// # Examples
///
/// ```
/// use meshmirror_lib::types::User;
///
/// let user = User::new("!0000002a", "Base Camp", "BC");
/// assert_eq!(user.short_name, "BC");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Globally unique user id, usually the node number in `!xxxxxxxx` form.
    pub id: String,
    /// Full display name.
    pub long_name: String,
    /// Abbreviated name shown on small screens.
    pub short_name: String,
    /// Hardware model code reported by the firmware.
    pub hw_model: u32,
    /// Whether the operator is a licensed radio amateur.
    pub is_licensed: bool,
}

impl User {
    /// Creates a user profile with the given names.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        long_name: impl Into<String>,
        short_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            long_name: long_name.into(),
            short_name: short_name.into(),
            ..Self::default()
        }
    }
}

/// A reported geographic position.
///
/// Coordinates are stored as integers in units of 1e-7 degrees, the form in
/// which the device reports them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Latitude in 1e-7 degrees.
    pub latitude_i: i32,
    /// Longitude in 1e-7 degrees.
    pub longitude_i: i32,
    /// Altitude in metres above sea level.
    pub altitude: i32,
    /// Fix time as seconds since the Unix epoch.
    pub time: u32,
}

impl Position {
    /// Creates a position from coordinates in degrees.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_degrees(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude_i: (latitude / COORDINATE_SCALE).round() as i32,
            longitude_i: (longitude / COORDINATE_SCALE).round() as i32,
            ..Self::default()
        }
    }

    /// Latitude in degrees.
    #[must_use]
    pub fn latitude(&self) -> f64 {
        f64::from(self.latitude_i) * COORDINATE_SCALE
    }

    /// Longitude in degrees.
    #[must_use]
    pub fn longitude(&self) -> f64 {
        f64::from(self.longitude_i) * COORDINATE_SCALE
    }
}

/// A peer in the node roster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeInfo {
    /// Node number; unique within the roster.
    pub num: NodeNum,
    /// The node's user profile, if it has announced one.
    pub user: Option<User>,
    /// Last known position.
    pub position: Option<Position>,
    /// Signal-to-noise ratio of the last received packet.
    pub snr: f32,
    /// Time the node was last heard, seconds since the Unix epoch.
    pub last_heard: u32,
}

impl NodeInfo {
    /// Creates a roster entry with no profile or position.
    #[must_use]
    pub fn new(num: NodeNum) -> Self {
        Self {
            num,
            ..Self::default()
        }
    }

    /// Sets the user profile.
    #[must_use]
    pub fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    /// Sets the last known position.
    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_degrees() {
        let position = Position::from_degrees(47.376_886, 8.541_694);
        assert_eq!(position.latitude_i, 473_768_860);
        assert_eq!(position.longitude_i, 85_416_940);
        assert!((position.latitude() - 47.376_886).abs() < 1e-6);
        assert!((position.longitude() - 8.541_694).abs() < 1e-6);
    }

    #[test]
    fn node_builder() {
        let node = NodeInfo::new(NodeNum::new(7)).with_user(User::new("!00000007", "Relay", "RL"));
        assert_eq!(node.num, NodeNum::new(7));
        assert_eq!(node.user.unwrap().long_name, "Relay");
        assert!(node.position.is_none());
    }

    #[test]
    fn my_node_info_new() {
        let info = MyNodeInfo::new(NodeNum::new(42));
        assert_eq!(info.my_node_num.value(), 42);
        assert!(info.firmware_version.is_empty());
    }
}
