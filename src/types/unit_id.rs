// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Unit identifier type.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Hardware address of a ventilation unit.
///
/// Exactly 12 lowercase hexadecimal characters, e.g. `aabbccddeeff`.
/// The identifier is the second segment of every topic the unit uses.
///
/// # Examples
///
/// ```
/// use ensy_lib::types::UnitId;
///
/// let id: UnitId = "aabbccddeeff".parse().unwrap();
/// assert_eq!(id.as_str(), "aabbccddeeff");
///
/// assert!("AABBCCDDEEFF".parse::<UnitId>().is_err());
/// assert!("aabbccddeef".parse::<UnitId>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UnitId(String);

impl UnitId {
    /// Number of characters in a unit identifier.
    pub const LEN: usize = 12;

    /// Validates and wraps a unit identifier.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidUnitId` unless `id` is 12 characters
    /// from `[0-9a-f]`.
    pub fn new(id: impl Into<String>) -> Result<Self, ValueError> {
        let id = id.into();
        if Self::is_valid(&id) {
            Ok(Self(id))
        } else {
            Err(ValueError::InvalidUnitId(id))
        }
    }

    /// Returns `true` if `id` is a well-formed unit identifier.
    #[must_use]
    pub fn is_valid(id: &str) -> bool {
        id.len() == Self::LEN
            && id
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for UnitId {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for UnitId {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UnitId> for String {
    fn from(id: UnitId) -> Self {
        id.0
    }
}

impl AsRef<str> for UnitId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
