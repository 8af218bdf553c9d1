// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Target supply-air temperature.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Target temperature in whole degrees Celsius (10-30).
///
/// # Examples
///
/// ```
/// use ensy_lib::types::TargetTemperature;
///
/// let target = TargetTemperature::new(21).unwrap();
/// assert_eq!(target.celsius(), 21);
/// assert_eq!(target.to_string(), "21");
///
/// assert!(TargetTemperature::new(45).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "i64", into = "i8")]
pub struct TargetTemperature(i8);

impl TargetTemperature {
    /// Lowest accepted setpoint.
    pub const MIN: i8 = 10;

    /// Highest accepted setpoint.
    pub const MAX: i8 = 30;

    /// Creates a new target temperature.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if `celsius` is outside [10, 30].
    pub fn new(celsius: i64) -> Result<Self, ValueError> {
        if !(i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&celsius) {
            return Err(ValueError::OutOfRange {
                min: i64::from(Self::MIN),
                max: i64::from(Self::MAX),
                actual: celsius,
            });
        }
        #[allow(clippy::cast_possible_truncation)]
        Ok(Self(celsius as i8))
    }

    /// Returns the temperature in degrees Celsius.
    #[must_use]
    pub const fn celsius(&self) -> i8 {
        self.0
    }
}

impl fmt::Display for TargetTemperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TargetTemperature {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().parse::<i64>().map_err(|_| ValueError::InvalidMode {
            kind: "temperature",
            value: s.to_string(),
        })?;
        Self::new(value)
    }
}

impl TryFrom<i64> for TargetTemperature {
    type Error = ValueError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TargetTemperature> for i8 {
    fn from(t: TargetTemperature) -> Self {
        t.0
    }
}
