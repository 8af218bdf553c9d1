// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Last known values reported by a unit.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::event::{EventName, UnitEvent};
use crate::types::{AbsentMode, FanSpeed, PartyMode};

/// The latest payload received for one event name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    /// Raw payload.
    pub value: String,
    /// When it was received.
    pub received_at: DateTime<Utc>,
}

/// Cache of the most recent [`Reading`] per [`EventName`].
///
/// Filled by the client as messages arrive. Nothing is known until the unit
/// has published at least once after the subscription became active.
///
/// Typed accessors return `None` both when nothing has been received and
/// when the payload does not parse.
#[derive(Debug, Default)]
pub struct UnitState {
    readings: RwLock<BTreeMap<EventName, Reading>>,
}

impl UnitState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an event, replacing the previous reading for its name.
    pub fn record(&self, event: &UnitEvent) {
        self.readings.write().insert(
            event.name,
            Reading {
                value: event.payload.clone(),
                received_at: event.received_at,
            },
        );
    }

    /// Returns the latest reading for `name`.
    #[must_use]
    pub fn get(&self, name: EventName) -> Option<Reading> {
        self.readings.read().get(&name).cloned()
    }

    /// Returns the latest raw payload for `name`.
    #[must_use]
    pub fn value(&self, name: EventName) -> Option<String> {
        self.readings.read().get(&name).map(|r| r.value.clone())
    }

    /// Returns a copy of all readings, ordered by event name.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<EventName, Reading> {
        self.readings.read().clone()
    }

    /// Returns the number of event names with a reading.
    #[must_use]
    pub fn len(&self) -> usize {
        self.readings.read().len()
    }

    /// Returns `true` if nothing has been received yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.readings.read().is_empty()
    }

    /// Forgets all readings.
    pub fn clear(&self) {
        self.readings.write().clear();
    }

    fn parsed<T: std::str::FromStr>(&self, name: EventName) -> Option<T> {
        self.readings
            .read()
            .get(&name)
            .and_then(|r| r.value.trim().parse().ok())
    }

    /// Returns `true` if the unit last reported `status` as `online`.
    #[must_use]
    pub fn is_online(&self) -> bool {
        self.readings
            .read()
            .get(&EventName::Status)
            .is_some_and(|r| r.value == "online")
    }

    /// Target temperature in °C.
    #[must_use]
    pub fn temperature(&self) -> Option<i32> {
        self.parsed(EventName::Temperature)
    }

    /// Current fan speed.
    #[must_use]
    pub fn fan_speed(&self) -> Option<FanSpeed> {
        self.parsed(EventName::Fan)
    }

    /// Remaining countdown in minutes.
    #[must_use]
    pub fn countdown(&self) -> Option<u32> {
        self.parsed(EventName::Countdown)
    }

    /// Current party mode.
    #[must_use]
    pub fn party_mode(&self) -> Option<PartyMode> {
        self.parsed(EventName::Party)
    }

    /// Current absent mode.
    #[must_use]
    pub fn absent_mode(&self) -> Option<AbsentMode> {
        self.parsed(EventName::Absent)
    }

    /// Supply, extract and outdoor air temperatures, in that order.
    #[must_use]
    pub fn air_temperatures(&self) -> (Option<i32>, Option<i32>, Option<i32>) {
        (
            self.parsed(EventName::SupplyTemperature),
            self.parsed(EventName::ExtractTemperature),
            self.parsed(EventName::OutdoorTemperature),
        )
    }

    /// Alarm flags currently reported as non-zero.
    #[must_use]
    pub fn active_alarms(&self) -> Vec<EventName> {
        self.readings
            .read()
            .iter()
            .filter(|(name, r)| name.is_alarm() && r.value.trim() != "0")
            .map(|(name, _)| *name)
            .collect()
    }
}
