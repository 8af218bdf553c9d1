// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Control commands for the ventilation unit.
//!
//! Every command is published as a plain string payload on
//! `units/<id>/app/<action>`.
//!
//! | Command | Action | Payload |
//! |---------|--------|---------|
//! | [`FanCommand`] | `fan` | `1`-`3` |
//! | [`AbsentCommand`] | `absent` | `0` / `1` |
//! | [`TemperatureCommand`] | `temperature` | °C, `10`-`30` |
//! | [`CountdownCommand`] | `countdown` | minutes, `0`-`1440` |
//! | [`PartyCommand`] | `party` | `1` start / `2` stop |
//! | [`RawCommand`] | any | unvalidated |
//!
//! # Examples
//!
//! ```
//! use ensy_lib::command::{Command, PartyCommand};
//!
//! let cmd = PartyCommand::start();
//! assert_eq!(cmd.topic_suffix(), "party");
//! assert_eq!(cmd.payload(), "1");
//! ```

mod action;
mod control;
mod raw;

pub use action::ActionName;
pub use control::{AbsentCommand, CountdownCommand, FanCommand, PartyCommand, TemperatureCommand};
pub use raw::RawCommand;

/// A command that can be sent to a unit.
pub trait Command {
    /// Returns the action this command targets.
    fn action(&self) -> ActionName;

    /// Returns the payload to publish.
    fn payload(&self) -> String;

    /// Returns the last topic segment, the part after `units/<id>/app/`.
    fn topic_suffix(&self) -> &'static str {
        self.action().as_str()
    }
}
