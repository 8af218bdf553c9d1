// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Party mode countdown duration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ValueError;

/// Countdown length in minutes (0-1440).
///
/// # Examples
///
/// ```
/// use ensy_lib::types::Countdown;
/// use std::time::Duration;
///
/// let cd = Countdown::new(240).unwrap();
/// assert_eq!(cd.minutes(), 240);
/// assert_eq!(cd.as_duration(), Duration::from_secs(240 * 60));
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(try_from = "i64", into = "u16")]
pub struct Countdown(u16);

impl Countdown {
    /// Longest countdown, one day.
    pub const MAX_MINUTES: u16 = 1440;

    /// Creates a countdown of `minutes`.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if `minutes` is outside [0, 1440].
    pub fn new(minutes: i64) -> Result<Self, ValueError> {
        if !(0..=i64::from(Self::MAX_MINUTES)).contains(&minutes) {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: i64::from(Self::MAX_MINUTES),
                actual: minutes,
            });
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(Self(minutes as u16))
    }

    /// Returns the countdown in minutes.
    #[must_use]
    pub const fn minutes(&self) -> u16 {
        self.0
    }

    /// Returns the countdown as a [`Duration`].
    #[must_use]
    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.0) * 60)
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Countdown {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().parse::<i64>().map_err(|_| ValueError::InvalidMode {
            kind: "countdown",
            value: s.to_string(),
        })?;
        Self::new(value)
    }
}

impl TryFrom<i64> for Countdown {
    type Error = ValueError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Countdown> for u16 {
    fn from(c: Countdown) -> Self {
        c.0
    }
}
