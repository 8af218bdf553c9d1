// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Operating mode types: absent mode and party mode.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Absent mode: reduced operation while occupants are away.
///
/// # Examples
///
/// ```
/// use ensy_lib::types::AbsentMode;
///
/// assert_eq!(AbsentMode::Absent.as_str(), "1");
/// assert_eq!(AbsentMode::Present.as_str(), "0");
/// assert_eq!(AbsentMode::from(true), AbsentMode::Absent);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbsentMode {
    /// Normal operation.
    #[default]
    Present,
    /// Occupants are away.
    Absent,
}

impl AbsentMode {
    /// Returns the wire payload.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "0",
            Self::Absent => "1",
        }
    }

    /// Returns `true` for [`AbsentMode::Absent`].
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl fmt::Display for AbsentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AbsentMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(Self::Present),
            "1" => Ok(Self::Absent),
            _ => Err(ValueError::InvalidMode {
                kind: "absent",
                value: s.to_string(),
            }),
        }
    }
}

impl From<bool> for AbsentMode {
    fn from(absent: bool) -> Self {
        if absent { Self::Absent } else { Self::Present }
    }
}

/// Party mode: a temporary boost with a countdown timer.
///
/// Commands only ever carry [`Start`](PartyMode::Start) or
/// [`Stop`](PartyMode::Stop); the unit reports [`Idle`](PartyMode::Idle)
/// when no party has run since power-up.
///
/// # Examples
///
/// ```
/// use ensy_lib::types::PartyMode;
///
/// assert_eq!(PartyMode::Start.as_str(), "1");
/// assert_eq!(PartyMode::Stop.as_str(), "2");
/// assert_eq!("0".parse::<PartyMode>().unwrap(), PartyMode::Idle);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyMode {
    /// No party mode since power-up (reported by the unit only).
    Idle,
    /// Party mode running.
    Start,
    /// Party mode stopped.
    Stop,
}

impl PartyMode {
    /// Returns the wire payload.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "0",
            Self::Start => "1",
            Self::Stop => "2",
        }
    }

    /// Returns `true` if this mode may be sent as a command.
    #[must_use]
    pub const fn is_command(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

impl fmt::Display for PartyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartyMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(Self::Idle),
            "1" => Ok(Self::Start),
            "2" => Ok(Self::Stop),
            _ => Err(ValueError::InvalidMode {
                kind: "party",
                value: s.to_string(),
            }),
        }
    }
}
