// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! MQTT topic routing to event listeners.
//!
//! The [`TopicRouter`] turns an inbound message into a [`UnitEvent`] and
//! hands it to the state cache, the event bus and the listener registry.
//!
//! # Architecture
//!
//! ```text
//! MQTT Message: units/aabbccddeeff/unit/temperature → 22
//!                     ↓
//!             TopicRouter.route()
//!                     ↓
//!        split on '/', require 4 segments
//!                     ↓
//!      "temperature" → EventName::Temperature
//!                     ↓
//!   UnitState.record → EventBus.publish → ListenerRegistry.dispatch
//!                     ↓
//!      Listeners invoked in registration order
//! ```

use crate::error::ProtocolError;
use crate::event::{EventBus, EventName, UnitEvent};
use crate::protocol::topic::ParsedTopic;
use crate::state::UnitState;
use crate::subscription::ListenerRegistry;
use crate::types::UnitId;

/// What happened to a routed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// A recognized event; `listeners` name-specific listeners were invoked.
    Delivered {
        /// The event name.
        event: EventName,
        /// Number of listeners registered for that name that ran.
        listeners: usize,
    },
    /// Four segments, but addressed to another unit or direction, or the
    /// name is not a known event.
    Ignored,
}

/// Routes messages of one unit to its listeners.
#[derive(Debug)]
pub struct TopicRouter {
    unit_id: UnitId,
    listeners: ListenerRegistry,
    state: UnitState,
    bus: EventBus,
}

impl TopicRouter {
    /// Creates a router for `unit_id` with an event bus of `capacity`.
    #[must_use]
    pub fn new(unit_id: UnitId, capacity: usize) -> Self {
        Self {
            unit_id,
            listeners: ListenerRegistry::new(),
            state: UnitState::new(),
            bus: EventBus::with_capacity(capacity),
        }
    }

    /// Returns the unit this router serves.
    #[must_use]
    pub fn unit_id(&self) -> &UnitId {
        &self.unit_id
    }

    /// Returns the listener registry.
    #[must_use]
    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    /// Returns the state cache.
    #[must_use]
    pub fn state(&self) -> &UnitState {
        &self.state
    }

    /// Returns the event bus.
    #[must_use]
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Routes an inbound message.
    ///
    /// Malformed topics are reported to the protocol-error listeners before
    /// the error is returned; no event listener runs for them.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::MalformedTopic` if the topic does not have
    /// exactly 4 segments.
    pub fn route(&self, topic: &str, payload: &str) -> Result<RouteOutcome, ProtocolError> {
        let parsed = match ParsedTopic::parse(topic) {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::warn!(topic = %topic, error = %err, "Dropping message on malformed topic");
                self.listeners.dispatch_protocol_error(&err);
                return Err(err);
            }
        };

        if !parsed.is_event_of(&self.unit_id) {
            tracing::trace!(topic = %topic, "Ignoring topic of another unit or direction");
            return Ok(RouteOutcome::Ignored);
        }

        let Ok(event) = parsed.name.parse::<EventName>() else {
            tracing::trace!(topic = %topic, name = %parsed.name, "Ignoring unknown event");
            return Ok(RouteOutcome::Ignored);
        };

        let unit_event = UnitEvent::new(event, payload);
        self.state.record(&unit_event);
        self.bus.publish(unit_event);

        let listeners = self.listeners.dispatch(event, payload);
        tracing::debug!(
            unit = %self.unit_id,
            event = %event,
            payload = %payload,
            listeners,
            "Dispatched unit event"
        );

        Ok(RouteOutcome::Delivered { event, listeners })
    }
}
