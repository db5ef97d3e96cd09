// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Channel configuration records.

use serde::{Deserialize, Serialize};

/// Role of a channel slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelRole {
    /// The slot is unused.
    #[default]
    Disabled,
    /// The primary channel; exactly one per device.
    Primary,
    /// An additional channel.
    Secondary,
}

/// Radio settings of a channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSettings {
    /// Channel name.
    pub name: String,
    /// Pre-shared key.
    pub psk: Vec<u8>,
    /// Forward mesh traffic on this channel to an uplink.
    pub uplink_enabled: bool,
    /// Accept traffic for this channel from an uplink.
    pub downlink_enabled: bool,
}

/// A configured channel slot, keyed by its index.
///
/// # Examples
///
/// ```
/// use meshmirror_lib::types::{Channel, ChannelRole};
///
/// let primary = Channel::primary(0, "LongFast");
/// assert_eq!(primary.role, ChannelRole::Primary);
/// assert_eq!(primary.name(), Some("LongFast"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Slot index; unique per device.
    pub index: u32,
    /// Slot role.
    pub role: ChannelRole,
    /// Radio settings, if configured.
    pub settings: Option<ChannelSettings>,
}

impl Channel {
    /// Creates a channel slot with the given index and role and no settings.
    #[must_use]
    pub fn new(index: u32, role: ChannelRole) -> Self {
        Self {
            index,
            role,
            settings: None,
        }
    }

    /// Creates a named primary channel.
    #[must_use]
    pub fn primary(index: u32, name: impl Into<String>) -> Self {
        Self::new(index, ChannelRole::Primary).with_settings(ChannelSettings {
            name: name.into(),
            ..ChannelSettings::default()
        })
    }

    /// Creates a named secondary channel.
    #[must_use]
    pub fn secondary(index: u32, name: impl Into<String>) -> Self {
        Self::new(index, ChannelRole::Secondary).with_settings(ChannelSettings {
            name: name.into(),
            ..ChannelSettings::default()
        })
    }

    /// Sets the radio settings.
    #[must_use]
    pub fn with_settings(mut self, settings: ChannelSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Returns the channel name, if settings are present.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.settings.as_ref().map(|s| s.name.as_str())
    }

    /// Returns `true` unless the slot is disabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.role != ChannelRole::Disabled
    }
}
