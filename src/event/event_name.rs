// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Names of the events a unit publishes.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// An event published by the unit on `units/<id>/unit/<name>`.
///
/// Payloads are always strings. The first nine carry documented
/// semantics; the rest are diagnostic and alarm fields reported as opaque
/// numeric strings.
///
/// # Examples
///
/// ```
/// use ensy_lib::event::EventName;
///
/// let name: EventName = "tsupl".parse().unwrap();
/// assert_eq!(name, EventName::SupplyTemperature);
/// assert_eq!(name.as_str(), "tsupl");
/// assert!("boost".parse::<EventName>().is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "&'static str")]
pub enum EventName {
    /// Connection status, e.g. `online`.
    Status,
    /// Target temperature in °C.
    Temperature,
    /// Fan speed level (1-3).
    Fan,
    /// Remaining countdown in minutes.
    Countdown,
    /// Raw humidity reading.
    Humidity,
    /// Party mode (0 idle, 1 running, 2 stopped).
    Party,
    /// Heat exchanger (rotor) state.
    HeatExchanger,
    /// Heating element state.
    HeatingElement,
    /// Absent mode (0/1).
    Absent,
    /// Diagnostic field `kv`.
    Kv,
    /// Alarm: supply fan (`asf`).
    SupplyFanAlarm,
    /// Alarm: extract fan (`aef`).
    ExtractFanAlarm,
    /// Alarm field `ao`.
    Ao,
    /// Alarm: supply air temperature (`altsa`).
    SupplyTemperatureAlarm,
    /// Alarm: rotor (`rm`).
    RotorAlarm,
    /// Alarm: filter (`fa`).
    FilterAlarm,
    /// Supply air temperature.
    SupplyTemperature,
    /// Extract air temperature.
    ExtractTemperature,
    /// Outdoor air temperature.
    OutdoorTemperature,
    /// Overheating threshold/state.
    Overheating,
    /// Exhaust air temperature (`texauh`).
    ExhaustTemperature,
}

impl EventName {
    /// All known events, in wire documentation order.
    pub const ALL: [Self; 21] = [
        Self::Status,
        Self::Temperature,
        Self::Fan,
        Self::Countdown,
        Self::Humidity,
        Self::Party,
        Self::HeatExchanger,
        Self::HeatingElement,
        Self::Absent,
        Self::Kv,
        Self::SupplyFanAlarm,
        Self::ExtractFanAlarm,
        Self::Ao,
        Self::SupplyTemperatureAlarm,
        Self::RotorAlarm,
        Self::FilterAlarm,
        Self::SupplyTemperature,
        Self::ExtractTemperature,
        Self::OutdoorTemperature,
        Self::Overheating,
        Self::ExhaustTemperature,
    ];

    /// Returns the topic segment for this event.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Temperature => "temperature",
            Self::Fan => "fan",
            Self::Countdown => "countdown",
            Self::Humidity => "d2",
            Self::Party => "party",
            Self::HeatExchanger => "ro",
            Self::HeatingElement => "he",
            Self::Absent => "absent",
            Self::Kv => "kv",
            Self::SupplyFanAlarm => "asf",
            Self::ExtractFanAlarm => "aef",
            Self::Ao => "ao",
            Self::SupplyTemperatureAlarm => "altsa",
            Self::RotorAlarm => "rm",
            Self::FilterAlarm => "fa",
            Self::SupplyTemperature => "tsupl",
            Self::ExtractTemperature => "textr",
            Self::OutdoorTemperature => "tout",
            Self::Overheating => "overheating",
            Self::ExhaustTemperature => "texauh",
        }
    }

    /// Returns `true` for the alarm flags.
    #[must_use]
    pub const fn is_alarm(&self) -> bool {
        matches!(
            self,
            Self::SupplyFanAlarm
                | Self::ExtractFanAlarm
                | Self::SupplyTemperatureAlarm
                | Self::RotorAlarm
                | Self::FilterAlarm
        )
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventName {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| ValueError::UnknownEventName(s.to_string()))
    }
}

impl TryFrom<String> for EventName {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EventName> for &'static str {
    fn from(name: EventName) -> Self {
        name.as_str()
    }
}
