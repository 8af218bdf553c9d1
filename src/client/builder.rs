// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Builder for MQTT-backed unit clients.

use std::time::Duration;

use crate::client::UnitClient;
use crate::error::Result;
use crate::event::DEFAULT_CHANNEL_CAPACITY;
use crate::protocol::{DEFAULT_ENDPOINT, MqttTransport, generate_client_id};
use crate::types::UnitId;

/// Connection settings for a [`UnitClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    endpoint: String,
    client_id: Option<String>,
    keep_alive: Duration,
    channel_capacity: usize,
    event_capacity: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            client_id: None,
            keep_alive: Duration::from_secs(30),
            channel_capacity: 10,
            event_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl ClientConfig {
    /// Broker endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fixed client identifier, if one was set.
    #[must_use]
    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    /// MQTT keep-alive interval.
    #[must_use]
    pub fn keep_alive(&self) -> Duration {
        self.keep_alive
    }

    /// Request channel capacity between client and event loop.
    #[must_use]
    pub fn channel_capacity(&self) -> usize {
        self.channel_capacity
    }

    /// Capacity of the event broadcast channel.
    #[must_use]
    pub fn event_capacity(&self) -> usize {
        self.event_capacity
    }
}

/// Builder for a [`UnitClient`] connected over MQTT.
///
/// # Examples
///
/// ```no_run
/// use ensy_lib::UnitClient;
/// use std::time::Duration;
///
/// # async fn example() -> ensy_lib::Result<()> {
/// let client = UnitClient::builder("aabbccddeeff")
///     .endpoint("ws://app.ensy.no:9001/mqtt")
///     .keep_alive(Duration::from_secs(60))
///     .build()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct UnitClientBuilder {
    unit_id: String,
    config: ClientConfig,
}

impl UnitClientBuilder {
    /// Creates a builder for the given unit.
    #[must_use]
    pub fn new(unit_id: impl Into<String>) -> Self {
        Self {
            unit_id: unit_id.into(),
            config: ClientConfig::default(),
        }
    }

    /// Sets the broker endpoint (default: `ws://app.ensy.no:9001/mqtt`).
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = endpoint.into();
        self
    }

    /// Sets a fixed client identifier instead of a random one.
    #[must_use]
    pub fn client_id(mut self, id: impl Into<String>) -> Self {
        self.config.client_id = Some(id.into());
        self
    }

    /// Sets the keep-alive interval (default: 30 seconds).
    #[must_use]
    pub fn keep_alive(mut self, duration: Duration) -> Self {
        self.config.keep_alive = duration;
        self
    }

    /// Sets the request channel capacity (default: 10, minimum 1).
    #[must_use]
    pub fn channel_capacity(mut self, capacity: usize) -> Self {
        self.config.channel_capacity = capacity.max(1);
        self
    }

    /// Sets the event broadcast capacity (default: 256, minimum 1).
    #[must_use]
    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.config.event_capacity = capacity.max(1);
        self
    }

    /// Returns the configuration collected so far.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Validates the unit id, creates the transport and starts the
    /// background event loop.
    ///
    /// Returns without waiting for the broker; use
    /// [`UnitClient::wait_connected`] for that.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidIdentifier` for a malformed unit id and
    /// `ProtocolError::InvalidAddress` for an unusable endpoint.
    pub async fn build(self) -> Result<UnitClient<MqttTransport>> {
        let unit_id = UnitId::new(self.unit_id)?;
        let config = self.config;

        let client_id = config.client_id.unwrap_or_else(generate_client_id);
        let (transport, event_loop) = MqttTransport::new(
            &config.endpoint,
            client_id,
            config.keep_alive,
            config.channel_capacity,
        )?;

        tracing::info!(
            unit = %unit_id,
            endpoint = %config.endpoint,
            client_id = %transport.client_id(),
            "Connecting to Ensy broker"
        );

        let client = UnitClient::from_parts(unit_id, transport, config.event_capacity);
        client.spawn_event_loop(event_loop);
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ProtocolError};

    #[test]
    fn builder_default_values() {
        let builder = UnitClientBuilder::new("aabbccddeeff");
        let config = builder.config();
        assert_eq!(config.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(config.client_id(), None);
        assert_eq!(config.keep_alive(), Duration::from_secs(30));
        assert_eq!(config.channel_capacity(), 10);
        assert_eq!(config.event_capacity(), 256);
    }

    #[test]
    fn builder_chain() {
        let builder = UnitClientBuilder::new("aabbccddeeff")
            .endpoint("mqtt://127.0.0.1:1883")
            .client_id("js-ensy-client_fixed")
            .keep_alive(Duration::from_secs(60))
            .channel_capacity(0)
            .event_capacity(32);

        let config = builder.config();
        assert_eq!(config.endpoint(), "mqtt://127.0.0.1:1883");
        assert_eq!(config.client_id(), Some("js-ensy-client_fixed"));
        assert_eq!(config.keep_alive(), Duration::from_secs(60));
        assert_eq!(config.channel_capacity(), 1);
        assert_eq!(config.event_capacity(), 32);
    }

    #[tokio::test]
    async fn build_rejects_invalid_unit_id() {
        let result = UnitClientBuilder::new("AABBCCDDEEFF").build().await;
        assert!(matches!(result, Err(Error::InvalidIdentifier(ref id)) if id == "AABBCCDDEEFF"));
    }

    #[tokio::test]
    async fn build_rejects_invalid_endpoint() {
        let result = UnitClientBuilder::new("aabbccddeeff")
            .endpoint("wss://app.ensy.no:9001/mqtt")
            .build()
            .await;
        assert!(matches!(
            result,
            Err(Error::Protocol(ProtocolError::InvalidAddress(_)))
        ));
    }

    #[tokio::test]
    async fn build_uses_fixed_client_id() {
        // Nothing listens on port 9; the client is created regardless.
        let client = UnitClientBuilder::new("aabbccddeeff")
            .endpoint("mqtt://127.0.0.1:9")
            .client_id("js-ensy-client_0badc0de")
            .build()
            .await
            .unwrap();
        assert_eq!(client.client_id(), "js-ensy-client_0badc0de");
        assert!(!client.is_connected());
        client.end().await.unwrap();
    }
}
