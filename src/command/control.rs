// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed control commands, one per action.

use crate::command::{ActionName, Command};
use crate::error::ValueError;
use crate::types::{AbsentMode, Countdown, FanSpeed, PartyMode, TargetTemperature};

/// Sets the fan speed.
///
/// # Examples
///
/// ```
/// use ensy_lib::command::{ActionName, Command, FanCommand};
/// use ensy_lib::types::FanSpeed;
///
/// let cmd = FanCommand(FanSpeed::HIGH);
/// assert_eq!(cmd.action(), ActionName::Fan);
/// assert_eq!(cmd.payload(), "3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanCommand(pub FanSpeed);

impl Command for FanCommand {
    fn action(&self) -> ActionName {
        ActionName::Fan
    }

    fn payload(&self) -> String {
        self.0.to_string()
    }
}

/// Switches absent mode on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbsentCommand(pub AbsentMode);

impl Command for AbsentCommand {
    fn action(&self) -> ActionName {
        ActionName::Absent
    }

    fn payload(&self) -> String {
        self.0.as_str().to_string()
    }
}

/// Sets the target temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemperatureCommand(pub TargetTemperature);

impl Command for TemperatureCommand {
    fn action(&self) -> ActionName {
        ActionName::Temperature
    }

    fn payload(&self) -> String {
        self.0.to_string()
    }
}

/// Sets the countdown in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownCommand(pub Countdown);

impl Command for CountdownCommand {
    fn action(&self) -> ActionName {
        ActionName::Countdown
    }

    fn payload(&self) -> String {
        self.0.to_string()
    }
}

/// Starts or stops party mode.
///
/// Only [`PartyMode::Start`] and [`PartyMode::Stop`] can be sent; `Idle` is a
/// state the unit reports, not a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartyCommand(PartyMode);

impl PartyCommand {
    /// Creates a party command.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidMode` for [`PartyMode::Idle`].
    pub fn new(mode: PartyMode) -> Result<Self, ValueError> {
        if mode.is_command() {
            Ok(Self(mode))
        } else {
            Err(ValueError::InvalidMode {
                kind: "party",
                value: mode.as_str().to_string(),
            })
        }
    }

    /// Command that starts party mode.
    #[must_use]
    pub const fn start() -> Self {
        Self(PartyMode::Start)
    }

    /// Command that stops party mode.
    #[must_use]
    pub const fn stop() -> Self {
        Self(PartyMode::Stop)
    }

    /// Returns the mode carried by this command.
    #[must_use]
    pub const fn mode(&self) -> PartyMode {
        self.0
    }
}

impl Command for PartyCommand {
    fn action(&self) -> ActionName {
        ActionName::Party
    }

    fn payload(&self) -> String {
        self.0.as_str().to_string()
    }
}
