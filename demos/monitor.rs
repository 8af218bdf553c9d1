// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Live monitor for one Ensy unit.
//!
//! Prints every event the unit reports and optionally sets the fan speed.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example monitor -- <unit_id> [fan_speed]
//! ```
//!
//! # Examples
//!
//! ```bash
//! # Watch events for five minutes
//! cargo run --example monitor -- aabbccddeeff
//!
//! # Set fan speed to 3 and watch
//! cargo run --example monitor -- aabbccddeeff 3
//! ```

use std::env;
use std::time::Duration;

use ensy_lib::UnitClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <unit_id> [fan_speed]", args[0]);
        std::process::exit(1);
    }

    let client = UnitClient::connect(&args[1]).await?;
    println!("Connecting as {}...", client.client_id());

    client.on_any_event(|name, payload| {
        println!("{name:>12} = {payload}");
    });
    client.on_protocol_error(|err| eprintln!("protocol error: {err}"));

    client.wait_connected(Duration::from_secs(10)).await?;
    println!("Connected, listening on {}", client.event_filter());

    if let Some(speed) = args.get(2) {
        client.set_fan_speed(speed.parse()?).await?;
        println!("Fan speed set to {speed}");
    }

    tokio::time::sleep(Duration::from_secs(300)).await;

    let state = client.state();
    println!("\nLast known state:");
    println!("  temperature: {:?}", state.temperature());
    println!("  fan speed:   {:?}", state.fan_speed());
    println!("  air (supply, extract, outdoor): {:?}", state.air_temperatures());
    println!("  active alarms: {:?}", state.active_alarms());

    client.end().await?;
    Ok(())
}
