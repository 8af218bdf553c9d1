// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Messaging layer between the client and the broker.
//!
//! # Components
//!
//! - [`Transport`]: the publish/subscribe primitive the client needs
//! - [`MqttTransport`]: MQTT over WebSocket (or TCP) via `rumqttc`
//! - [`MemoryTransport`]: records calls in memory, for tests and dry runs
//! - [`TopicRouter`]: turns inbound messages into dispatched events
//! - [`topic`]: topic construction and parsing
//!
//! Connection handling, reconnection and QoS belong to the transport; the
//! client only reacts to [`TransportEvent`]s and issues subscribe/publish
//! calls.

mod memory;
mod mqtt;
pub mod topic;
mod topic_router;

pub use memory::{MemoryTransport, PublishedMessage};
pub use mqtt::{CLIENT_ID_PREFIX, DEFAULT_ENDPOINT, MqttTransport, generate_client_id};
pub use topic_router::{RouteOutcome, TopicRouter};

pub(crate) use mqtt::transport_event;

use crate::error::ProtocolError;

/// Something that happened on the connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// The broker accepted the connection (fires again after a reconnect).
    Connected,
    /// A message arrived.
    Message {
        /// Full topic.
        topic: String,
        /// Payload decoded as UTF-8.
        payload: String,
    },
    /// The connection was closed.
    Disconnected,
}

/// Publish/subscribe primitive used by [`UnitClient`](crate::UnitClient).
///
/// Every method reports transport failures to the caller; none of them
/// retry.
#[allow(async_fn_in_trait)]
pub trait Transport: Send + Sync + 'static {
    /// Subscribes to a topic filter (`+` and `#` wildcards allowed).
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request cannot be issued.
    async fn subscribe(&self, filter: &str) -> Result<(), ProtocolError>;

    /// Publishes `payload` on `topic`.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request cannot be issued.
    async fn publish(&self, topic: &str, payload: &str) -> Result<(), ProtocolError>;

    /// Closes the connection.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request cannot be issued.
    async fn disconnect(&self) -> Result<(), ProtocolError>;
}
