// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The transport collaborator.
//!
//! The store never opens connections. Its only call into the transport is
//! [`Transport::disconnect`], issued when a connection setting write is not
//! confirmed as intended. Reconnecting is left to the transport layer.

/// A live connection to the device that the store can tear down.
///
/// Any `Fn()` closure is a transport, which lets callers bind an existing
/// connection object without a wrapper type:
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use meshmirror_lib::transport::Transport;
///
/// let dropped = Arc::new(AtomicBool::new(false));
/// let flag = Arc::clone(&dropped);
/// let transport = move || flag.store(true, Ordering::SeqCst);
///
/// transport.disconnect();
/// assert!(dropped.load(Ordering::SeqCst));
/// ```
pub trait Transport: Send + Sync {
    /// Tears down the current session.
    ///
    /// Fire-and-forget: the store neither awaits nor retries this call.
    fn disconnect(&self);
}

impl<F> Transport for F
where
    F: Fn() + Send + Sync,
{
    fn disconnect(&self) {
        self();
    }
}
