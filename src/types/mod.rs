// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for ventilation unit control.
//!
//! Each type ensures values are within their valid ranges at construction
//! time, so a command that reaches the broker always carries a value the
//! unit accepts.
//!
//! # Types
//!
//! - [`UnitId`] - Hardware address of the unit (12 lowercase hex digits)
//! - [`FanSpeed`] - Fan level (1-3)
//! - [`AbsentMode`] - Present/Absent
//! - [`PartyMode`] - Start/Stop (and Idle as reported by the unit)
//! - [`TargetTemperature`] - Setpoint in °C (10-30)
//! - [`Countdown`] - Party countdown in minutes (0-1440)

mod countdown;
mod fan_speed;
mod mode;
mod temperature;
mod unit_id;

pub use countdown::Countdown;
pub use fan_speed::FanSpeed;
pub use mode::{AbsentMode, PartyMode};
pub use temperature::TargetTemperature;
pub use unit_id::UnitId;
