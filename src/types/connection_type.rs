// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport kind used to reach the device.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// How the companion application reaches the device.
///
/// Persisted as its decimal ordinal (`"0"`, `"1"`, `"2"`) for compatibility
/// with existing stored preferences. The ordinal form is only produced and
/// parsed at the storage boundary.
///
/// # Examples
///
/// ```
/// use meshmirror_lib::types::ConnectionType;
///
/// assert_eq!(ConnectionType::Serial.to_ordinal_string(), "2");
/// assert_eq!("1".parse::<ConnectionType>(), Ok(ConnectionType::Bluetooth));
/// assert!("9".parse::<ConnectionType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionType {
    /// HTTP to the device's web API.
    #[default]
    Http,
    /// Bluetooth Low Energy.
    Bluetooth,
    /// Serial over USB.
    Serial,
}

impl ConnectionType {
    /// Returns the persisted ordinal.
    #[must_use]
    pub const fn ordinal(&self) -> u8 {
        match self {
            Self::Http => 0,
            Self::Bluetooth => 1,
            Self::Serial => 2,
        }
    }

    /// Returns the ordinal as the string written to storage.
    #[must_use]
    pub fn to_ordinal_string(&self) -> String {
        self.ordinal().to_string()
    }

    /// Returns the display name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Bluetooth => "bluetooth",
            Self::Serial => "serial",
        }
    }
}

impl TryFrom<u8> for ConnectionType {
    type Error = ValueError;

    fn try_from(ordinal: u8) -> Result<Self, Self::Error> {
        match ordinal {
            0 => Ok(Self::Http),
            1 => Ok(Self::Bluetooth),
            2 => Ok(Self::Serial),
            other => Err(ValueError::InvalidConnectionType(other.to_string())),
        }
    }
}

impl FromStr for ConnectionType {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ordinal: u8 = s
            .trim()
            .parse()
            .map_err(|_| ValueError::InvalidConnectionType(s.to_string()))?;
        Self::try_from(ordinal)
    }
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
