// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! MQTT transport built on `rumqttc`.

use std::time::Duration;

use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Outgoing, Packet, QoS};
use uuid::Uuid;

use crate::error::ProtocolError;
use crate::protocol::{Transport, TransportEvent};

/// Broker endpoint used by Ensy units.
pub const DEFAULT_ENDPOINT: &str = "ws://app.ensy.no:9001/mqtt";

/// Prefix of generated client identifiers.
pub const CLIENT_ID_PREFIX: &str = "js-ensy-client_";

/// Default MQTT port for `mqtt://` endpoints.
const DEFAULT_MQTT_PORT: u16 = 1883;

/// Default port for `ws://` endpoints.
const DEFAULT_WS_PORT: u16 = 80;

/// Generates a client identifier: the prefix plus 8 random hex digits.
///
/// There is no uniqueness guarantee; two clients drawing the same suffix
/// against one broker will kick each other off.
#[must_use]
pub fn generate_client_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{CLIENT_ID_PREFIX}{}", &suffix[..8])
}

/// A parsed broker endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Endpoint {
    /// `ws://host[:port][/path]`, kept as the full URL for `rumqttc`.
    WebSocket { url: String, port: u16 },
    /// `mqtt://host[:port]`, `tcp://host[:port]` or bare `host[:port]`.
    Tcp { host: String, port: u16 },
}

/// Parses an endpoint URL.
fn parse_endpoint(url: &str) -> Result<Endpoint, ProtocolError> {
    if url.starts_with("wss://") {
        return Err(ProtocolError::InvalidAddress(format!(
            "secure WebSocket endpoints are not supported: {url}"
        )));
    }

    if let Some(rest) = url.strip_prefix("ws://") {
        let authority = rest.split('/').next().unwrap_or_default();
        let (host, port) = split_host_port(authority, DEFAULT_WS_PORT)?;
        if host.is_empty() {
            return Err(ProtocolError::InvalidAddress(format!("missing host: {url}")));
        }
        return Ok(Endpoint::WebSocket {
            url: url.to_string(),
            port,
        });
    }

    let rest = url
        .strip_prefix("mqtt://")
        .or_else(|| url.strip_prefix("tcp://"))
        .unwrap_or(url);
    let (host, port) = split_host_port(rest, DEFAULT_MQTT_PORT)?;
    if host.is_empty() {
        return Err(ProtocolError::InvalidAddress(format!("missing host: {url}")));
    }
    Ok(Endpoint::Tcp {
        host: host.to_string(),
        port,
    })
}

fn split_host_port(authority: &str, default_port: u16) -> Result<(&str, u16), ProtocolError> {
    match authority.rsplit_once(':') {
        Some((host, port)) => {
            let port = port
                .parse()
                .map_err(|_| ProtocolError::InvalidAddress(format!("Invalid port: {port}")))?;
            Ok((host, port))
        }
        None => Ok((authority, default_port)),
    }
}

/// Translates a `rumqttc` event into what the client cares about.
///
/// Non-UTF-8 payloads are dropped.
pub(crate) fn transport_event(event: &Event) -> Option<TransportEvent> {
    match event {
        Event::Incoming(Packet::ConnAck(connack)) => {
            tracing::debug!(?connack, "MQTT connected");
            Some(TransportEvent::Connected)
        }
        Event::Incoming(Packet::SubAck(suback)) => {
            tracing::debug!(?suback, "MQTT subscription acknowledged");
            None
        }
        Event::Incoming(Packet::Publish(publish)) => {
            match String::from_utf8(publish.payload.to_vec()) {
                Ok(payload) => Some(TransportEvent::Message {
                    topic: publish.topic.clone(),
                    payload,
                }),
                Err(_) => {
                    tracing::debug!(topic = %publish.topic, "Dropping non-UTF-8 payload");
                    None
                }
            }
        }
        Event::Incoming(Packet::Disconnect) | Event::Outgoing(Outgoing::Disconnect) => {
            Some(TransportEvent::Disconnected)
        }
        _ => None,
    }
}

/// MQTT connection to the Ensy broker.
///
/// Creating the transport does not connect; the connection is made when the
/// returned [`EventLoop`] is first polled, and re-made on later polls after
/// a failure.
#[derive(Debug, Clone)]
pub struct MqttTransport {
    client: AsyncClient,
    client_id: String,
    endpoint: String,
}

impl MqttTransport {
    /// Creates the client half and its event loop.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - `ws://`, `mqtt://`, `tcp://` or bare `host:port`
    /// * `client_id` - MQTT client identifier
    /// * `keep_alive` - MQTT keep-alive interval
    /// * `capacity` - request channel capacity between client and event loop
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::InvalidAddress` if the endpoint cannot be parsed.
    pub fn new(
        endpoint: &str,
        client_id: impl Into<String>,
        keep_alive: Duration,
        capacity: usize,
    ) -> Result<(Self, EventLoop), ProtocolError> {
        let client_id = client_id.into();

        let mut mqtt_options = match parse_endpoint(endpoint)? {
            Endpoint::WebSocket { url, port } => {
                let mut options = MqttOptions::new(&client_id, url, port);
                options.set_transport(rumqttc::Transport::Ws);
                options
            }
            Endpoint::Tcp { host, port } => MqttOptions::new(&client_id, host, port),
        };
        mqtt_options.set_keep_alive(keep_alive);
        mqtt_options.set_clean_session(true);

        let (client, event_loop) = AsyncClient::new(mqtt_options, capacity);

        tracing::debug!(endpoint = %endpoint, client_id = %client_id, "Created MQTT transport");

        Ok((
            Self {
                client,
                client_id,
                endpoint: endpoint.to_string(),
            },
            event_loop,
        ))
    }

    /// Returns the MQTT client identifier.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Transport for MqttTransport {
    async fn subscribe(&self, filter: &str) -> Result<(), ProtocolError> {
        tracing::debug!(filter = %filter, "Subscribing to MQTT topic");
        self.client
            .subscribe(filter, QoS::AtMostOnce)
            .await
            .map_err(ProtocolError::Mqtt)
    }

    async fn publish(&self, topic: &str, payload: &str) -> Result<(), ProtocolError> {
        tracing::debug!(topic = %topic, payload = %payload, "Publishing MQTT message");
        self.client
            .publish(topic, QoS::AtMostOnce, false, payload)
            .await
            .map_err(ProtocolError::Mqtt)
    }

    async fn disconnect(&self) -> Result<(), ProtocolError> {
        self.client.disconnect().await.map_err(ProtocolError::Mqtt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_id_format() {
        let id = generate_client_id();
        assert!(id.starts_with("js-ensy-client_"));
        let suffix = id.strip_prefix(CLIENT_ID_PREFIX).unwrap();
        assert_eq!(suffix.len(), 8);
        assert!(suffix.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase()));
    }

    #[test]
    fn client_ids_differ() {
        assert_ne!(generate_client_id(), generate_client_id());
    }

    #[test]
    fn parse_default_endpoint() {
        assert_eq!(
            parse_endpoint(DEFAULT_ENDPOINT).unwrap(),
            Endpoint::WebSocket {
                url: DEFAULT_ENDPOINT.to_string(),
                port: 9001
            }
        );
    }

    #[test]
    fn parse_ws_without_port() {
        assert_eq!(
            parse_endpoint("ws://broker.local/mqtt").unwrap(),
            Endpoint::WebSocket {
                url: "ws://broker.local/mqtt".to_string(),
                port: 80
            }
        );
    }

    #[test]
    fn parse_tcp_forms() {
        for url in ["mqtt://127.0.0.1:1884", "tcp://127.0.0.1:1884", "127.0.0.1:1884"] {
            assert_eq!(
                parse_endpoint(url).unwrap(),
                Endpoint::Tcp {
                    host: "127.0.0.1".to_string(),
                    port: 1884
                }
            );
        }
        assert_eq!(
            parse_endpoint("broker.local").unwrap(),
            Endpoint::Tcp {
                host: "broker.local".to_string(),
                port: 1883
            }
        );
    }

    #[test]
    fn parse_rejects_bad_endpoints() {
        assert!(matches!(
            parse_endpoint("wss://app.ensy.no:9001/mqtt"),
            Err(ProtocolError::InvalidAddress(_))
        ));
        assert!(parse_endpoint("ws://app.ensy.no:port/mqtt").is_err());
        assert!(parse_endpoint("mqtt://:1883").is_err());
        assert!(parse_endpoint("ws:///mqtt").is_err());
    }

    #[test]
    fn publish_maps_to_message() {
        let publish = rumqttc::Publish::new(
            "units/aabbccddeeff/unit/fan",
            QoS::AtMostOnce,
            "2".as_bytes().to_vec(),
        );
        assert_eq!(
            transport_event(&Event::Incoming(Packet::Publish(publish))),
            Some(TransportEvent::Message {
                topic: "units/aabbccddeeff/unit/fan".to_string(),
                payload: "2".to_string()
            })
        );
    }

    #[test]
    fn non_utf8_payload_is_dropped() {
        let publish = rumqttc::Publish::new("units/aabbccddeeff/unit/fan", QoS::AtMostOnce, vec![0xff, 0xfe]);
        assert_eq!(transport_event(&Event::Incoming(Packet::Publish(publish))), None);
    }

    #[test]
    fn disconnect_either_way() {
        assert_eq!(
            transport_event(&Event::Incoming(Packet::Disconnect)),
            Some(TransportEvent::Disconnected)
        );
        assert_eq!(
            transport_event(&Event::Outgoing(Outgoing::Disconnect)),
            Some(TransportEvent::Disconnected)
        );
    }

    #[test]
    fn ping_is_not_interesting() {
        assert_eq!(transport_event(&Event::Incoming(Packet::PingResp)), None);
    }

    #[tokio::test]
    async fn new_accepts_default_endpoint() {
        let (transport, _event_loop) = MqttTransport::new(
            DEFAULT_ENDPOINT,
            "js-ensy-client_test0001",
            Duration::from_secs(30),
            10,
        )
        .unwrap();
        assert_eq!(transport.client_id(), "js-ensy-client_test0001");
        assert_eq!(transport.endpoint(), DEFAULT_ENDPOINT);
    }
}
