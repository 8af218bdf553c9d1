// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Names of the actions a unit accepts.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// An action accepted on `units/<id>/app/<action>`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ActionName {
    /// Absent mode on/off.
    Absent,
    /// Countdown in minutes.
    Countdown,
    /// Fan speed level.
    Fan,
    /// Party mode start/stop.
    Party,
    /// Target temperature.
    Temperature,
}

impl ActionName {
    /// All actions.
    pub const ALL: [Self; 5] = [
        Self::Absent,
        Self::Countdown,
        Self::Fan,
        Self::Party,
        Self::Temperature,
    ];

    /// Returns the topic segment for this action.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Countdown => "countdown",
            Self::Fan => "fan",
            Self::Party => "party",
            Self::Temperature => "temperature",
        }
    }
}

impl fmt::Display for ActionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionName {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| ValueError::UnknownActionName(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_action() {
        for action in ActionName::ALL {
            assert_eq!(action.as_str().parse::<ActionName>().unwrap(), action);
        }
    }

    #[test]
    fn misspelled_temperature_is_rejected() {
        assert_eq!(
            "temerature".parse::<ActionName>(),
            Err(ValueError::UnknownActionName("temerature".to_string()))
        );
    }

    #[test]
    fn event_only_names_are_not_actions() {
        assert!("status".parse::<ActionName>().is_err());
        assert!("tout".parse::<ActionName>().is_err());
    }
}
