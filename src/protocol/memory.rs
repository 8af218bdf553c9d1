// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory transport.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::error::ProtocolError;
use crate::protocol::Transport;

/// A message handed to [`MemoryTransport::publish`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedMessage {
    /// Topic it was published on.
    pub topic: String,
    /// Payload.
    pub payload: String,
}

/// Transport that records every call instead of talking to a broker.
///
/// Clones share the same record, so a test can keep one handle while the
/// client owns another. Inbound traffic is simulated by passing
/// [`TransportEvent`](crate::protocol::TransportEvent)s to
/// [`UnitClient::handle_event`](crate::UnitClient::handle_event).
///
/// # Examples
///
/// ```
/// use ensy_lib::UnitClient;
/// use ensy_lib::protocol::{MemoryTransport, TransportEvent};
///
/// # async fn example() -> ensy_lib::Result<()> {
/// let transport = MemoryTransport::new();
/// let client = UnitClient::with_transport("aabbccddeeff", transport.clone())?;
///
/// client.handle_event(TransportEvent::Connected).await?;
/// assert_eq!(transport.subscriptions(), ["units/aabbccddeeff/unit/+"]);
///
/// client.set_fan_speed(3).await?;
/// let sent = transport.last_published().unwrap();
/// assert_eq!(sent.topic, "units/aabbccddeeff/app/fan");
/// assert_eq!(sent.payload, "3");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    inner: Arc<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    subscriptions: Mutex<Vec<String>>,
    published: Mutex<Vec<PublishedMessage>>,
    disconnects: AtomicUsize,
    failure: Mutex<Option<String>>,
}

impl MemoryTransport {
    /// Creates an empty transport.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following call fail with `ConnectionFailed(reason)`.
    pub fn fail_with(&self, reason: impl Into<String>) {
        *self.inner.failure.lock() = Some(reason.into());
    }

    /// Lets calls succeed again.
    pub fn clear_failure(&self) {
        *self.inner.failure.lock() = None;
    }

    /// Topic filters subscribed so far, in call order.
    #[must_use]
    pub fn subscriptions(&self) -> Vec<String> {
        self.inner.subscriptions.lock().clone()
    }

    /// Messages published so far, in call order.
    #[must_use]
    pub fn published(&self) -> Vec<PublishedMessage> {
        self.inner.published.lock().clone()
    }

    /// The most recently published message.
    #[must_use]
    pub fn last_published(&self) -> Option<PublishedMessage> {
        self.inner.published.lock().last().cloned()
    }

    /// Number of `disconnect` calls.
    #[must_use]
    pub fn disconnect_count(&self) -> usize {
        self.inner.disconnects.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), ProtocolError> {
        match self.inner.failure.lock().as_ref() {
            Some(reason) => Err(ProtocolError::ConnectionFailed(reason.clone())),
            None => Ok(()),
        }
    }
}

impl Transport for MemoryTransport {
    async fn subscribe(&self, filter: &str) -> Result<(), ProtocolError> {
        self.check()?;
        self.inner.subscriptions.lock().push(filter.to_string());
        Ok(())
    }

    async fn publish(&self, topic: &str, payload: &str) -> Result<(), ProtocolError> {
        self.check()?;
        self.inner.published.lock().push(PublishedMessage {
            topic: topic.to_string(),
            payload: payload.to_string(),
        });
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), ProtocolError> {
        self.check()?;
        self.inner.disconnects.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
