// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Store event types.

use serde::Serialize;

use crate::storage::ConnectionSetting;

/// Events emitted by the [`DeviceStore`](crate::store::DeviceStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum StoreEvent {
    /// An action was applied to the snapshot.
    ActionApplied {
        /// The action name, see [`Action::name`](crate::state::Action::name).
        action: &'static str,
        /// Whether the snapshot content changed.
        changed: bool,
    },

    /// The transport was told to disconnect because a connection setting
    /// write was not confirmed as intended.
    SessionInvalidated {
        /// The setting whose write diverged.
        setting: ConnectionSetting,
    },
}

impl StoreEvent {
    /// Creates an action applied event.
    #[must_use]
    pub fn action_applied(action: &'static str, changed: bool) -> Self {
        Self::ActionApplied { action, changed }
    }

    /// Creates a session invalidated event.
    #[must_use]
    pub fn session_invalidated(setting: ConnectionSetting) -> Self {
        Self::SessionInvalidated { setting }
    }

    /// Returns `true` if this is an action applied event.
    #[must_use]
    pub fn is_action_applied(&self) -> bool {
        matches!(self, Self::ActionApplied { .. })
    }

    /// Returns `true` if this is a session invalidated event.
    #[must_use]
    pub fn is_session_invalidated(&self) -> bool {
        matches!(self, Self::SessionInvalidated { .. })
    }
}
