// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `ensy_lib` library.
//!
//! Failures fall into three families: rejected input (bad unit identifier or
//! a command value outside its domain), protocol failures (MQTT transport
//! errors and malformed inbound topics), and use of a client after
//! [`end()`](crate::UnitClient::end).

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// The unit identifier is not 12 lowercase hexadecimal characters.
    #[error("invalid unit id \"{0}\"")]
    InvalidIdentifier(String),

    /// A command argument is outside its allowed domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(ValueError),

    /// Error occurred during protocol communication.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The client has been ended and can no longer be used.
    #[error("client has been ended")]
    Ended,
}

impl From<ValueError> for Error {
    fn from(err: ValueError) -> Self {
        match err {
            ValueError::InvalidUnitId(id) => Self::InvalidIdentifier(id),
            other => Self::InvalidArgument(other),
        }
    }
}

/// Errors related to value validation and constraints.
///
/// These errors occur when attempting to create constrained types
/// with invalid values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: i64,
        /// Maximum allowed value.
        max: i64,
        /// The actual value that was provided.
        actual: i64,
    },

    /// A unit identifier failed the 12 lowercase hex digit check.
    #[error("invalid unit id \"{0}\"")]
    InvalidUnitId(String),

    /// A mode string could not be interpreted.
    #[error("invalid {kind} value: {value}")]
    InvalidMode {
        /// Which mode was being parsed (e.g. `party`).
        kind: &'static str,
        /// The rejected input.
        value: String,
    },

    /// The name is not one of the known unit events.
    #[error("unknown event name: {0}")]
    UnknownEventName(String),

    /// The name is not one of the known command actions.
    #[error("unknown action name: {0}")]
    UnknownActionName(String),
}

/// Errors related to MQTT communication.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// MQTT client request failed.
    #[error("MQTT error: {0}")]
    Mqtt(#[from] rumqttc::ClientError),

    /// An inbound topic did not have the `units/<id>/<direction>/<name>` shape.
    #[error("unsupported topic \"{topic}\": expected 4 segments, got {segments}")]
    MalformedTopic {
        /// The offending topic.
        topic: String,
        /// Number of `/`-separated segments found.
        segments: usize,
    },

    /// Connection to the broker failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Operation timed out.
    #[error("timed out after {0} ms")]
    Timeout(u64),

    /// Invalid endpoint URL.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Internal channel was closed.
    #[error("channel closed: {0}")]
    ChannelClosed(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
