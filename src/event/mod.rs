// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Events published by the ventilation unit.
//!
//! - [`EventName`] - closed set of event names found in `unit` topics
//! - [`UnitEvent`] - one received message with its timestamp
//! - [`EventBus`] - broadcast channel carrying every recognized event

mod event_bus;
mod event_name;
mod unit_event;

pub use event_bus::{DEFAULT_CHANNEL_CAPACITY, EventBus};
pub use event_name::EventName;
pub use unit_event::UnitEvent;
