// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Radio and user preferences.

use serde::{Deserialize, Serialize};

/// Preference record reported by the device.
///
/// Always replaced wholesale; the store never merges individual fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Interval between position broadcasts, in seconds.
    pub position_broadcast_secs: u32,
    /// Interval between owner announcements, in seconds.
    pub send_owner_interval: u32,
    /// How long Bluetooth stays on without a client, in seconds.
    pub wait_bluetooth_secs: u32,
    /// Screen timeout, in seconds.
    pub screen_on_secs: u32,
    /// How long the device waits for the phone before sleeping, in seconds.
    pub phone_timeout_secs: u32,
    /// Light-sleep duration, in seconds.
    pub ls_secs: u32,
    /// Run as a dedicated router node.
    pub is_router: bool,
    /// Report a fixed position instead of GPS fixes.
    pub fixed_position: bool,
    /// Regulatory region code, e.g. `"EU868"`.
    pub region: String,
}
