// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Broadcast channel of unit events.

use tokio::sync::broadcast;

use super::UnitEvent;

/// Default channel capacity for the event bus.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Broadcasts every recognized [`UnitEvent`] to any number of receivers.
///
/// This is the stream-shaped counterpart to the callback listeners: each
/// receiver gets its own copy of every event published after it subscribed.
/// Events published while nobody is subscribed are discarded; the
/// [`UnitState`](crate::state::UnitState) cache keeps the latest value of
/// each event regardless.
///
/// # Capacity
///
/// The bus buffers a fixed number of events (default 256, configurable
/// through [`UnitClientBuilder::event_capacity`](crate::UnitClientBuilder::event_capacity)).
/// A receiver that falls further behind than that loses the oldest events:
/// its next `recv` returns `RecvError::Lagged(n)` with the number skipped,
/// then resumes with the oldest event still buffered. A unit reports a
/// handful of values every few seconds, so lag only happens when a receiver
/// stops being polled.
///
/// # Examples
///
/// ```
/// use ensy_lib::event::{EventBus, EventName, UnitEvent};
///
/// let bus = EventBus::new();
/// let mut rx = bus.subscribe();
///
/// bus.publish(UnitEvent::new(EventName::Fan, "2"));
/// assert_eq!(rx.try_recv().unwrap().payload, "2");
/// ```
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<UnitEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates a new event bus buffering up to `capacity` events.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Events kept for the slowest receiver before it lags
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribes to unit events.
    ///
    /// The receiver sees every event published after this call; earlier
    /// events are only available through the state cache.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<UnitEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of active receivers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Publishes an event and returns how many receivers got it.
    ///
    /// Without receivers the event is discarded and 0 is returned.
    pub fn publish(&self, event: UnitEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
