// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The unit client.
//!
//! [`UnitClient`] owns one broker connection for one ventilation unit. It
//! subscribes to `units/<id>/unit/+` every time the connection comes up,
//! dispatches inbound events to listeners and publishes commands on
//! `units/<id>/app/<action>`.
//!
//! # Lifecycle
//!
//! ```text
//!   connect()/build() ──► connecting ──ConnAck──► connected (subscribed)
//!                             ▲                        │
//!                             └──── connection lost ───┘
//!   end() ──► ended (every further command fails with Error::Ended)
//! ```

mod builder;

pub use builder::{ClientConfig, UnitClientBuilder};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use rumqttc::EventLoop;
use tokio::sync::{broadcast, watch};

use crate::command::{
    AbsentCommand, ActionName, Command, CountdownCommand, FanCommand, PartyCommand,
    TemperatureCommand,
};
use crate::error::{Error, ProtocolError, Result};
use crate::event::{EventName, UnitEvent};
use crate::protocol::topic::{action_topic, event_filter};
use crate::protocol::{MqttTransport, TopicRouter, Transport, TransportEvent, transport_event};
use crate::state::UnitState;
use crate::subscription::SubscriptionId;
use crate::types::{AbsentMode, Countdown, FanSpeed, PartyMode, TargetTemperature, UnitId};

/// Pause before polling the event loop again after a connection error.
const RECONNECT_PAUSE: Duration = Duration::from_secs(1);

/// Client for a single ventilation unit.
///
/// Cheap to clone; clones share the connection, the listeners and the
/// state cache.
///
/// # Examples
///
/// ```no_run
/// use ensy_lib::UnitClient;
/// use ensy_lib::event::EventName;
///
/// # async fn example() -> ensy_lib::Result<()> {
/// let client = UnitClient::connect("aabbccddeeff").await?;
///
/// client.add_listener(EventName::Temperature, |celsius| {
///     println!("target temperature: {celsius} °C");
/// });
///
/// client.set_fan_speed(2).await?;
/// client.end().await?;
/// # Ok(())
/// # }
/// ```
pub struct UnitClient<T: Transport = MqttTransport> {
    inner: Arc<ClientInner<T>>,
}

struct ClientInner<T> {
    transport: T,
    router: TopicRouter,
    event_filter: String,
    connected: watch::Sender<bool>,
    ended: AtomicBool,
}

impl UnitClient<MqttTransport> {
    /// Connects to the default Ensy broker for `unit_id`.
    ///
    /// The broker connection and subscription happen in the background;
    /// this returns as soon as the unit id is validated and the event loop
    /// is running.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidIdentifier` unless `unit_id` is 12 lowercase
    /// hexadecimal characters.
    pub async fn connect(unit_id: &str) -> Result<Self> {
        Self::builder(unit_id).build().await
    }

    /// Creates a builder for custom connection settings.
    #[must_use]
    pub fn builder(unit_id: impl Into<String>) -> UnitClientBuilder {
        UnitClientBuilder::new(unit_id)
    }

    /// Returns the MQTT client identifier.
    #[must_use]
    pub fn client_id(&self) -> &str {
        self.inner.transport.client_id()
    }

    /// Drives the `rumqttc` event loop on a background task.
    ///
    /// The task only holds a weak reference, so it stops once every client
    /// handle has been dropped or the client has ended.
    pub(crate) fn spawn_event_loop(&self, event_loop: EventLoop) {
        let weak = Arc::downgrade(&self.inner);
        tokio::spawn(handle_unit_events(event_loop, weak));
    }
}

impl<T: Transport> UnitClient<T> {
    /// Creates a client over a custom transport.
    ///
    /// Nothing is subscribed until the transport reports
    /// [`TransportEvent::Connected`] through [`handle_event`](Self::handle_event).
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidIdentifier` unless `unit_id` is 12 lowercase
    /// hexadecimal characters.
    pub fn with_transport(unit_id: &str, transport: T) -> Result<Self> {
        let unit_id = UnitId::new(unit_id)?;
        Ok(Self::from_parts(
            unit_id,
            transport,
            crate::event::DEFAULT_CHANNEL_CAPACITY,
        ))
    }

    pub(crate) fn from_parts(unit_id: UnitId, transport: T, event_capacity: usize) -> Self {
        let (connected, _) = watch::channel(false);
        Self {
            inner: Arc::new(ClientInner {
                transport,
                event_filter: event_filter(&unit_id),
                router: TopicRouter::new(unit_id, event_capacity),
                connected,
                ended: AtomicBool::new(false),
            }),
        }
    }

    /// Returns the unit identifier.
    #[must_use]
    pub fn unit_id(&self) -> &UnitId {
        self.inner.router.unit_id()
    }

    /// Returns the subscription filter, `units/<id>/unit/+`.
    #[must_use]
    pub fn event_filter(&self) -> &str {
        &self.inner.event_filter
    }

    /// Returns the underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.inner.transport
    }

    /// Returns `true` while the transport reports an open connection.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        *self.inner.connected.borrow()
    }

    /// Returns `true` once [`end`](Self::end) has been called.
    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.inner.ended.load(Ordering::Acquire)
    }

    /// Waits until the transport reports a connection.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::Timeout` if no connection is reported within
    /// `timeout`, or `Error::Ended` if the client has ended.
    pub async fn wait_connected(&self, timeout: Duration) -> Result<()> {
        if self.is_ended() {
            return Err(Error::Ended);
        }
        let mut rx = self.inner.connected.subscribe();

        #[allow(clippy::cast_possible_truncation)]
        let timeout_ms = timeout.as_millis() as u64;

        tokio::time::timeout(timeout, rx.wait_for(|connected| *connected))
            .await
            .map_err(|_| ProtocolError::Timeout(timeout_ms))?
            .map_err(|_| ProtocolError::ChannelClosed("connection status".to_string()))?;
        Ok(())
    }

    // =========================================================================
    // Transport events
    // =========================================================================

    /// Reacts to a transport event.
    ///
    /// - `Connected`: subscribes to the unit's event topics.
    /// - `Message`: routes the message to listeners.
    /// - `Disconnected`: marks the client as not connected.
    ///
    /// The MQTT event loop calls this for every event; custom transports
    /// call it themselves.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::MalformedTopic` for a message whose topic is
    /// not 4 segments long (no listener runs), or the transport's error if
    /// the subscription cannot be issued.
    pub async fn handle_event(&self, event: TransportEvent) -> Result<()> {
        match event {
            TransportEvent::Connected => {
                if self.mark_connected() {
                    self.resubscribe().await?;
                }
                Ok(())
            }
            TransportEvent::Message { topic, payload } => {
                self.inner.router.route(&topic, &payload)?;
                Ok(())
            }
            TransportEvent::Disconnected => {
                self.inner.connected.send_replace(false);
                tracing::info!(unit = %self.unit_id(), "Disconnected from broker");
                Ok(())
            }
        }
    }

    /// Records an open connection; returns `false` once ended.
    fn mark_connected(&self) -> bool {
        if self.is_ended() {
            return false;
        }
        self.inner.connected.send_replace(true);
        tracing::info!(unit = %self.unit_id(), "Connected to broker");
        true
    }

    async fn resubscribe(&self) -> Result<()> {
        self.inner
            .transport
            .subscribe(&self.inner.event_filter)
            .await?;
        tracing::debug!(filter = %self.inner.event_filter, "Subscribed to unit events");
        Ok(())
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    /// Adds a listener for `name`; existing listeners stay registered.
    ///
    /// The listener receives the payload text exactly as published.
    pub fn add_listener<F>(&self, name: EventName, listener: F) -> SubscriptionId
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.inner.router.listeners().add_listener(name, listener)
    }

    /// Makes `handler` the only listener for `name`.
    pub fn set_handler<F>(&self, name: EventName, handler: F) -> SubscriptionId
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.inner.router.listeners().set_handler(name, handler)
    }

    /// Removes every listener for `name`, returning how many were removed.
    pub fn remove_handler(&self, name: EventName) -> usize {
        self.inner.router.listeners().remove_handler(name)
    }

    /// Removes one listener by ID.
    pub fn remove_listener(&self, id: SubscriptionId) -> bool {
        self.inner.router.listeners().unsubscribe(id)
    }

    /// Adds a listener that receives every recognized event.
    pub fn on_any_event<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(EventName, &str) + Send + Sync + 'static,
    {
        self.inner.router.listeners().on_any_event(listener)
    }

    /// Adds a listener for recoverable protocol errors (malformed topics).
    pub fn on_protocol_error<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&ProtocolError) + Send + Sync + 'static,
    {
        self.inner.router.listeners().on_protocol_error(listener)
    }

    /// Returns the number of listeners registered for `name`.
    #[must_use]
    pub fn listener_count(&self, name: EventName) -> usize {
        self.inner.router.listeners().listener_count(name)
    }

    /// Returns a receiver of every recognized event from now on.
    #[must_use]
    pub fn subscribe_events(&self) -> broadcast::Receiver<UnitEvent> {
        self.inner.router.bus().subscribe()
    }

    /// Returns the latest values reported by the unit.
    #[must_use]
    pub fn state(&self) -> &UnitState {
        self.inner.router.state()
    }

    // =========================================================================
    // Commands
    // =========================================================================

    fn ensure_active(&self) -> Result<()> {
        if self.is_ended() {
            Err(Error::Ended)
        } else {
            Ok(())
        }
    }

    /// Publishes `value` to the `action` topic without validation.
    ///
    /// # Errors
    ///
    /// Returns `Error::Ended` after [`end`](Self::end), or the transport's
    /// error if the publish fails.
    pub async fn set_raw(&self, action: ActionName, value: &str) -> Result<()> {
        self.ensure_active()?;
        let topic = action_topic(self.unit_id(), action);
        tracing::debug!(unit = %self.unit_id(), action = %action, value = %value, "Sending command");
        self.inner.transport.publish(&topic, value).await?;
        Ok(())
    }

    /// Sends a typed command.
    ///
    /// # Errors
    ///
    /// Same as [`set_raw`](Self::set_raw).
    pub async fn send_command<C: Command + Sync>(&self, command: &C) -> Result<()> {
        let payload = command.payload();
        self.set_raw(command.action(), &payload).await
    }

    /// Sets the fan speed (1-3).
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if `speed` is not 1, 2 or 3, plus the
    /// errors of [`set_raw`](Self::set_raw).
    pub async fn set_fan_speed(&self, speed: i64) -> Result<()> {
        let speed = FanSpeed::new(speed)?;
        self.send_command(&FanCommand(speed)).await
    }

    /// Switches absent mode on (`true`) or off (`false`).
    ///
    /// # Errors
    ///
    /// Same as [`set_raw`](Self::set_raw).
    pub async fn set_absent(&self, absent: bool) -> Result<()> {
        self.send_command(&AbsentCommand(AbsentMode::from(absent)))
            .await
    }

    /// Sets the target temperature in °C (10-30).
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if `celsius` is out of range, plus
    /// the errors of [`set_raw`](Self::set_raw).
    #[doc(alias = "set_target_temperature")]
    pub async fn set_temperature(&self, celsius: i64) -> Result<()> {
        let target = TargetTemperature::new(celsius)?;
        self.send_command(&TemperatureCommand(target)).await
    }

    /// Sets the countdown in minutes (0-1440).
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if `minutes` is out of range, plus
    /// the errors of [`set_raw`](Self::set_raw).
    pub async fn set_countdown(&self, minutes: i64) -> Result<()> {
        let countdown = Countdown::new(minutes)?;
        self.send_command(&CountdownCommand(countdown)).await
    }

    /// Starts or stops party mode.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` for [`PartyMode::Idle`], plus the
    /// errors of [`set_raw`](Self::set_raw).
    pub async fn set_party_mode(&self, mode: PartyMode) -> Result<()> {
        let command = PartyCommand::new(mode)?;
        self.send_command(&command).await
    }

    /// Starts party mode.
    ///
    /// # Errors
    ///
    /// Same as [`set_raw`](Self::set_raw).
    pub async fn start_party(&self) -> Result<()> {
        self.send_command(&PartyCommand::start()).await
    }

    /// Stops party mode.
    ///
    /// # Errors
    ///
    /// Same as [`set_raw`](Self::set_raw).
    pub async fn stop_party(&self) -> Result<()> {
        self.send_command(&PartyCommand::stop()).await
    }

    // =========================================================================
    // Teardown
    // =========================================================================

    /// Closes the connection.
    ///
    /// Calling it again is a no-op. Listeners stay registered but receive
    /// nothing further.
    ///
    /// # Errors
    ///
    /// Returns the transport's error if the disconnect request fails; the
    /// client is considered ended either way.
    pub async fn end(&self) -> Result<()> {
        if self.inner.ended.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        tracing::info!(unit = %self.unit_id(), "Ending unit client");
        self.inner.connected.send_replace(false);
        self.inner.transport.disconnect().await?;
        Ok(())
    }
}

impl<T: Transport> Clone for UnitClient<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Transport> std::fmt::Debug for UnitClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnitClient")
            .field("unit_id", self.unit_id())
            .field("connected", &self.is_connected())
            .field("ended", &self.is_ended())
            .finish_non_exhaustive()
    }
}

/// Polls the MQTT event loop and feeds the client.
async fn handle_unit_events(mut event_loop: EventLoop, weak: Weak<ClientInner<MqttTransport>>) {
    loop {
        let polled = event_loop.poll().await;

        let Some(inner) = weak.upgrade() else {
            tracing::debug!("Unit client dropped, stopping event loop");
            break;
        };
        let client = UnitClient { inner };

        match polled {
            Ok(event) => {
                let Some(event) = transport_event(&event) else {
                    continue;
                };
                if event == TransportEvent::Connected {
                    // The subscribe request queues behind pending commands in
                    // the channel this loop drains, so it must not block it.
                    if client.mark_connected() {
                        tokio::spawn(async move {
                            if let Err(e) = client.resubscribe().await {
                                tracing::warn!(error = %e, "Failed to subscribe to unit events");
                            }
                        });
                    }
                    continue;
                }
                let closing = event == TransportEvent::Disconnected;
                match client.handle_event(event).await {
                    // Already logged and reported by the router.
                    Ok(()) | Err(Error::Protocol(ProtocolError::MalformedTopic { .. })) => {}
                    Err(e) => tracing::warn!(error = %e, "Failed to handle MQTT event"),
                }
                if closing && client.is_ended() {
                    break;
                }
            }
            Err(e) => {
                client.inner.connected.send_replace(false);
                if client.is_ended() {
                    tracing::debug!("Unit client ended, stopping event loop");
                    break;
                }
                tracing::error!(error = %e, "MQTT event loop error");
                drop(client);
                tokio::time::sleep(RECONNECT_PAUSE).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{MemoryTransport, PublishedMessage};

    fn client() -> (UnitClient<MemoryTransport>, MemoryTransport) {
        let transport = MemoryTransport::new();
        let client = UnitClient::with_transport("aabbccddeeff", transport.clone()).unwrap();
        (client, transport)
    }

    #[test]
    fn with_transport_rejects_bad_id() {
        let result = UnitClient::with_transport("aabbccddeef", MemoryTransport::new());
        assert!(matches!(result, Err(Error::InvalidIdentifier(_))));
    }

    #[test]
    fn event_filter_uses_single_level_wildcard() {
        let (client, _) = client();
        assert_eq!(client.event_filter(), "units/aabbccddeeff/unit/+");
        assert_eq!(client.unit_id().as_str(), "aabbccddeeff");
    }

    #[tokio::test]
    async fn connected_subscribes_each_time() {
        let (client, transport) = client();
        assert!(transport.subscriptions().is_empty());

        client.handle_event(TransportEvent::Connected).await.unwrap();
        assert!(client.is_connected());

        client.handle_event(TransportEvent::Disconnected).await.unwrap();
        assert!(!client.is_connected());

        client.handle_event(TransportEvent::Connected).await.unwrap();
        assert_eq!(
            transport.subscriptions(),
            ["units/aabbccddeeff/unit/+", "units/aabbccddeeff/unit/+"]
        );
    }

    #[tokio::test]
    async fn subscribe_failure_is_returned() {
        let (client, transport) = client();
        transport.fail_with("no route");
        let result = client.handle_event(TransportEvent::Connected).await;
        assert!(matches!(
            result,
            Err(Error::Protocol(ProtocolError::ConnectionFailed(_)))
        ));
    }

    #[tokio::test]
    async fn fan_speed_publishes_validated_value() {
        let (client, transport) = client();
        client.set_fan_speed(1).await.unwrap();

        for bad in [0, 4, -1] {
            let err = client.set_fan_speed(bad).await.unwrap_err();
            assert!(matches!(err, Error::InvalidArgument(_)));
        }

        assert_eq!(
            transport.published(),
            [PublishedMessage {
                topic: "units/aabbccddeeff/app/fan".to_string(),
                payload: "1".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn party_idle_is_rejected() {
        let (client, transport) = client();
        let err = client.set_party_mode(PartyMode::Idle).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(transport.published().is_empty());

        client.set_party_mode(PartyMode::Start).await.unwrap();
        assert_eq!(transport.last_published().unwrap().payload, "1");
    }

    #[tokio::test]
    async fn end_is_idempotent_and_blocks_commands() {
        let (client, transport) = client();
        client.end().await.unwrap();
        client.end().await.unwrap();
        assert_eq!(transport.disconnect_count(), 1);
        assert!(client.is_ended());

        assert!(matches!(client.set_fan_speed(2).await, Err(Error::Ended)));
        assert!(matches!(
            client.wait_connected(Duration::from_millis(10)).await,
            Err(Error::Ended)
        ));

        // A late reconnect does not resubscribe.
        client.handle_event(TransportEvent::Connected).await.unwrap();
        assert!(transport.subscriptions().is_empty());
    }

    #[tokio::test]
    async fn wait_connected_resolves_on_connect() {
        let (client, _) = client();
        let waiter = client.clone();
        let handle =
            tokio::spawn(async move { waiter.wait_connected(Duration::from_secs(5)).await });

        client.handle_event(TransportEvent::Connected).await.unwrap();
        handle.await.unwrap().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn wait_connected_times_out() {
        let (client, _) = client();
        let result = client.wait_connected(Duration::from_millis(200)).await;
        assert!(matches!(
            result,
            Err(Error::Protocol(ProtocolError::Timeout(200)))
        ));
    }

    #[test]
    fn clones_share_listeners() {
        let (client, _) = client();
        let clone = client.clone();
        clone.add_listener(EventName::Fan, |_| {});
        assert_eq!(client.listener_count(EventName::Fan), 1);
    }

    #[test]
    fn debug_output() {
        let (client, _) = client();
        let debug = format!("{client:?}");
        assert!(debug.contains("UnitClient"));
        assert!(debug.contains("aabbccddeeff"));
    }
}
