// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `MeshMirror` library.
//!
//! Applying an action to the state store never fails. Errors only surface at
//! the edges: decoding persisted values, talking to durable storage, and
//! handing actions to a store queue whose worker has gone away.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A value could not be decoded into its typed form.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Durable key-value storage failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The store queue worker is no longer receiving actions.
    #[error("channel closed: {0}")]
    ChannelClosed(String),

    /// The store queue is at capacity; the action was not queued.
    #[error("queue full: {0}")]
    QueueFull(String),
}

/// Errors related to decoding typed values from their raw representation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A persisted connection type is not a known ordinal.
    #[error("invalid connection type: {0}")]
    InvalidConnectionType(String),

    /// A device status code is outside the known range.
    #[error("invalid device status code: {0}")]
    InvalidDeviceStatus(u8),
}

/// Errors raised by durable key-value storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file does not contain a JSON object of strings.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backend refused the write.
    #[error("write rejected for key {key}: {reason}")]
    Rejected {
        /// The key that could not be written.
        key: String,
        /// Backend-supplied reason.
        reason: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
