// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A single message received from the unit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::EventName;

/// An event received on `units/<id>/unit/<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitEvent {
    /// Which event this is.
    pub name: EventName,
    /// The payload, exactly as received.
    pub payload: String,
    /// When the client received the message.
    pub received_at: DateTime<Utc>,
}

impl UnitEvent {
    /// Creates an event stamped with the current time.
    #[must_use]
    pub fn new(name: EventName, payload: impl Into<String>) -> Self {
        Self {
            name,
            payload: payload.into(),
            received_at: Utc::now(),
        }
    }

    /// Parses the payload into a typed value.
    ///
    /// # Errors
    ///
    /// Returns the parse error of `T` if the payload does not parse.
    pub fn parse<T: std::str::FromStr>(&self) -> Result<T, T::Err> {
        self.payload.trim().parse()
    }
}
