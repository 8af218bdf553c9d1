// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `Ensy` Lib - A Rust library to monitor and control Ensy ventilation units.
//!
//! Ensy units report their state to a cloud MQTT broker and accept
//! commands on it. This library connects to that broker, subscribes to one
//! unit's events and publishes validated commands.
//!
//! # Topics
//!
//! | Direction     | Topic                          | Example payload |
//! |---------------|--------------------------------|-----------------|
//! | unit → client | `units/<unit-id>/unit/<event>` | `"21"`          |
//! | client → unit | `units/<unit-id>/app/<action>` | `"2"`           |
//!
//! # Supported Features
//!
//! - **Events**: 21 named events (temperatures, fan, filter, alarms, ...)
//!   delivered to per-event listeners, a catch-all listener and a
//!   broadcast channel
//! - **Commands**: fan speed, absent mode, target temperature, countdown
//!   and party mode, validated before anything is published
//! - **State cache**: the latest payload of every event, with typed
//!   accessors
//!
//! # Quick Start
//!
//! ```no_run
//! use ensy_lib::{EventName, UnitClient};
//!
//! #[tokio::main]
//! async fn main() -> ensy_lib::Result<()> {
//!     let client = UnitClient::connect("aabbccddeeff").await?;
//!
//!     client.add_listener(EventName::Fan, |speed| {
//!         println!("fan speed is now {speed}");
//!     });
//!
//!     client.set_fan_speed(3).await?;
//!     client.set_temperature(21).await?;
//!
//!     client.end().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Testing without a broker
//!
//! ```
//! use ensy_lib::{EventName, UnitClient};
//! use ensy_lib::protocol::{MemoryTransport, TransportEvent};
//!
//! # async fn example() -> ensy_lib::Result<()> {
//! let transport = MemoryTransport::new();
//! let client = UnitClient::with_transport("aabbccddeeff", transport.clone())?;
//!
//! client.handle_event(TransportEvent::Message {
//!     topic: "units/aabbccddeeff/unit/temperature".to_string(),
//!     payload: "21".to_string(),
//! }).await?;
//!
//! assert_eq!(client.state().value(EventName::Temperature).as_deref(), Some("21"));
//! # Ok(())
//! # }
//! ```

mod client;
pub mod command;
pub mod error;
pub mod event;
pub mod protocol;
pub mod state;
pub mod subscription;
pub mod types;

pub use client::{ClientConfig, UnitClient, UnitClientBuilder};
pub use command::{
    AbsentCommand, ActionName, Command, CountdownCommand, FanCommand, PartyCommand, RawCommand,
    TemperatureCommand,
};
pub use error::{Error, ProtocolError, Result, ValueError};
pub use event::{EventName, UnitEvent};
pub use protocol::{MqttTransport, Transport};
pub use state::UnitState;
pub use subscription::SubscriptionId;
pub use types::{AbsentMode, Countdown, FanSpeed, PartyMode, TargetTemperature, UnitId};
