// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fan speed type for the ventilation fan.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Fan speed level (1-3).
///
/// - 1 = Low
/// - 2 = Normal
/// - 3 = High
///
/// # Examples
///
/// ```
/// use ensy_lib::types::FanSpeed;
///
/// let speed = FanSpeed::new(2).unwrap();
/// assert_eq!(speed.value(), 2);
/// assert_eq!(speed.to_string(), "2");
///
/// assert!(FanSpeed::new(0).is_err());
/// assert!(FanSpeed::new(4).is_err());
/// assert!(FanSpeed::new(-1).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "i64", into = "u8")]
pub struct FanSpeed(u8);

impl FanSpeed {
    /// Minimum speed level.
    pub const MIN: u8 = 1;

    /// Maximum speed level.
    pub const MAX: u8 = 3;

    /// Lowest fan speed.
    pub const LOW: Self = Self(1);

    /// Normal fan speed.
    pub const NORMAL: Self = Self(2);

    /// Highest fan speed.
    pub const HIGH: Self = Self(3);

    /// Creates a new fan speed.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value is outside [1, 3].
    pub fn new(value: i64) -> Result<Self, ValueError> {
        if !(i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            return Err(ValueError::OutOfRange {
                min: i64::from(Self::MIN),
                max: i64::from(Self::MAX),
                actual: value,
            });
        }
        // Range checked above.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(Self(value as u8))
    }

    /// Returns the speed level.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl Default for FanSpeed {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl fmt::Display for FanSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FanSpeed {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().parse::<i64>().map_err(|_| ValueError::InvalidMode {
            kind: "fan speed",
            value: s.to_string(),
        })?;
        Self::new(value)
    }
}

impl TryFrom<i64> for FanSpeed {
    type Error = ValueError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FanSpeed> for u8 {
    fn from(speed: FanSpeed) -> Self {
        speed.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fan_speed_valid() {
        for v in 1..=3 {
            let speed = FanSpeed::new(v).unwrap();
            assert_eq!(i64::from(speed.value()), v);
        }
    }

    #[test]
    fn fan_speed_invalid() {
        for v in [0, 4, -1, 255, i64::MIN] {
            assert_eq!(
                FanSpeed::new(v),
                Err(ValueError::OutOfRange {
                    min: 1,
                    max: 3,
                    actual: v
                })
            );
        }
    }

    #[test]
    fn fan_speed_presets() {
        assert_eq!(FanSpeed::LOW.value(), 1);
        assert_eq!(FanSpeed::NORMAL.value(), 2);
        assert_eq!(FanSpeed::HIGH.value(), 3);
        assert_eq!(FanSpeed::default(), FanSpeed::NORMAL);
    }

    #[test]
    fn fan_speed_parses_payload() {
        assert_eq!("3".parse::<FanSpeed>().unwrap(), FanSpeed::HIGH);
        assert!("".parse::<FanSpeed>().is_err());
        assert!("fast".parse::<FanSpeed>().is_err());
        assert!("7".parse::<FanSpeed>().is_err());
    }

    #[test]
    fn fan_speed_ordering() {
        assert!(FanSpeed::LOW < FanSpeed::HIGH);
    }
}
