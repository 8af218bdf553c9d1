// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Unit state tracking.
//!
//! [`UnitState`] keeps the latest [`Reading`] for every event the unit has
//! published, so callers can query values without registering listeners.

mod unit_state;

pub use unit_state::{Reading, UnitState};
