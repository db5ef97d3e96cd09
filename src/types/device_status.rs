// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device connection status as reported by the protocol layer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Lifecycle status of the connected device.
///
/// The store treats this value opaquely: it is replaced wholesale whenever
/// the protocol layer reports a transition.
///
/// # Examples
///
/// ```
/// use meshmirror_lib::types::DeviceStatus;
///
/// assert_eq!(DeviceStatus::default(), DeviceStatus::Disconnected);
/// assert!(DeviceStatus::Configured.is_connected());
/// assert_eq!(DeviceStatus::try_from(5), Ok(DeviceStatus::Connected));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceStatus {
    /// The device is rebooting.
    Restarting,
    /// No transport session is open.
    #[default]
    Disconnected,
    /// A transport session is being opened.
    Connecting,
    /// The transport is re-establishing a lost session.
    Reconnecting,
    /// The transport session is open.
    Connected,
    /// The initial configuration exchange is in progress.
    Configuring,
    /// The initial configuration exchange has completed.
    Configured,
}

impl DeviceStatus {
    /// Returns the numeric code used by the protocol layer.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::Restarting => 1,
            Self::Disconnected => 2,
            Self::Connecting => 3,
            Self::Reconnecting => 4,
            Self::Connected => 5,
            Self::Configuring => 6,
            Self::Configured => 7,
        }
    }

    /// Returns `true` while a transport session is open.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        matches!(self, Self::Connected | Self::Configuring | Self::Configured)
    }

    /// Returns the display name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Restarting => "restarting",
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Reconnecting => "reconnecting",
            Self::Connected => "connected",
            Self::Configuring => "configuring",
            Self::Configured => "configured",
        }
    }
}

impl TryFrom<u8> for DeviceStatus {
    type Error = ValueError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Restarting),
            2 => Ok(Self::Disconnected),
            3 => Ok(Self::Connecting),
            4 => Ok(Self::Reconnecting),
            5 => Ok(Self::Connected),
            6 => Ok(Self::Configuring),
            7 => Ok(Self::Configured),
            other => Err(ValueError::InvalidDeviceStatus(other)),
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for code in 1..=7 {
            let status = DeviceStatus::try_from(code).unwrap();
            assert_eq!(status.code(), code);
        }
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert_eq!(
            DeviceStatus::try_from(0),
            Err(ValueError::InvalidDeviceStatus(0))
        );
        assert_eq!(
            DeviceStatus::try_from(8),
            Err(ValueError::InvalidDeviceStatus(8))
        );
    }

    #[test]
    fn connected_states() {
        assert!(!DeviceStatus::Disconnected.is_connected());
        assert!(!DeviceStatus::Reconnecting.is_connected());
        assert!(DeviceStatus::Connected.is_connected());
        assert!(DeviceStatus::Configuring.is_connected());
    }
}
