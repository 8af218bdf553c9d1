// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback subscriptions for unit events.
//!
//! - [`SubscriptionId`] - returned by every registration, used to remove one listener
//! - [`ListenerRegistry`] - per-event listener lists, dispatched in registration order
//!
//! # Usage
//!
//! ```no_run
//! use ensy_lib::UnitClient;
//! use ensy_lib::event::EventName;
//!
//! # async fn example() -> ensy_lib::Result<()> {
//! let client = UnitClient::connect("aabbccddeeff").await?;
//!
//! let id = client.add_listener(EventName::Temperature, |celsius| {
//!     println!("target temperature is now {celsius}");
//! });
//!
//! // Later, remove just this listener
//! client.remove_listener(id);
//! # Ok(())
//! # }
//! ```

mod callback;

pub use callback::{ListenerRegistry, SubscriptionId};
