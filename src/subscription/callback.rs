// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Listener management for unit events.
//!
//! - [`SubscriptionId`] - Unique identifier for removing a single listener
//! - [`ListenerRegistry`] - Stores listeners per event name and dispatches payloads

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::error::ProtocolError;
use crate::event::EventName;

/// Unique identifier for a registered listener.
///
/// IDs grow monotonically within a registry, so ordering by ID is
/// registration order.
///
/// # Examples
///
/// ```ignore
/// let id = client.add_listener(EventName::Fan, |speed| println!("fan {speed}"));
///
/// // Later, remove just this listener
/// client.remove_listener(id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Creates a new subscription ID with the given value.
    #[must_use]
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

/// Listener for a single event name; receives the raw payload.
type Listener = Arc<dyn Fn(&str) + Send + Sync>;

/// Listener for every event.
type AnyListener = Arc<dyn Fn(EventName, &str) + Send + Sync>;

/// Listener for recoverable protocol errors such as malformed topics.
type ErrorListener = Arc<dyn Fn(&ProtocolError) + Send + Sync>;

/// Registry of listeners keyed by [`EventName`].
///
/// Any number of listeners may be registered per name; they are invoked in
/// registration order. [`set_handler`](Self::set_handler) gives the
/// single-handler behavior where the last registration wins.
///
/// Listeners are copied out of the lock before being called, so a listener
/// may register or remove listeners (including itself) while running.
pub struct ListenerRegistry {
    next_id: AtomicU64,
    listeners: RwLock<HashMap<EventName, BTreeMap<SubscriptionId, Listener>>>,
    any_listeners: RwLock<BTreeMap<SubscriptionId, AnyListener>>,
    error_listeners: RwLock<BTreeMap<SubscriptionId, ErrorListener>>,
}

impl ListenerRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            listeners: RwLock::new(HashMap::new()),
            any_listeners: RwLock::new(BTreeMap::new()),
            error_listeners: RwLock::new(BTreeMap::new()),
        }
    }

    fn next_id(&self) -> SubscriptionId {
        SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Adds a listener for `name` alongside any existing ones.
    pub fn add_listener<F>(&self, name: EventName, listener: F) -> SubscriptionId
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.listeners
            .write()
            .entry(name)
            .or_default()
            .insert(id, Arc::new(listener));
        id
    }

    /// Makes `handler` the only listener for `name`, replacing previous ones.
    pub fn set_handler<F>(&self, name: EventName, handler: F) -> SubscriptionId
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        let id = self.next_id();
        let mut map = BTreeMap::new();
        map.insert(id, Arc::new(handler) as Listener);
        self.listeners.write().insert(name, map);
        id
    }

    /// Adds a listener that receives every recognized event.
    pub fn on_any_event<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(EventName, &str) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.any_listeners.write().insert(id, Arc::new(listener));
        id
    }

    /// Adds a listener for recoverable protocol errors.
    pub fn on_protocol_error<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&ProtocolError) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.error_listeners.write().insert(id, Arc::new(listener));
        id
    }

    // =========================================================================
    // Removal
    // =========================================================================

    /// Removes every listener registered for `name`.
    ///
    /// Returns the number of listeners removed.
    pub fn remove_handler(&self, name: EventName) -> usize {
        self.listeners
            .write()
            .remove(&name)
            .map_or(0, |removed| removed.len())
    }

    /// Removes a single listener of any kind.
    ///
    /// Returns `true` if a listener was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        {
            let mut listeners = self.listeners.write();
            let found = listeners
                .iter_mut()
                .find_map(|(name, map)| map.remove(&id).map(|_| (*name, map.is_empty())));
            if let Some((name, emptied)) = found {
                if emptied {
                    listeners.remove(&name);
                }
                return true;
            }
        }
        if self.any_listeners.write().remove(&id).is_some() {
            return true;
        }
        self.error_listeners.write().remove(&id).is_some()
    }

    /// Clears all listeners.
    pub fn clear(&self) {
        self.listeners.write().clear();
        self.any_listeners.write().clear();
        self.error_listeners.write().clear();
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Delivers `payload` to every listener for `name`, then to the
    /// any-event listeners.
    ///
    /// Returns the number of name-specific listeners invoked.
    pub fn dispatch(&self, name: EventName, payload: &str) -> usize {
        let listeners: Vec<Listener> = self
            .listeners
            .read()
            .get(&name)
            .map(|map| map.values().cloned().collect())
            .unwrap_or_default();
        for listener in &listeners {
            listener(payload);
        }

        let any: Vec<AnyListener> = self.any_listeners.read().values().cloned().collect();
        for listener in &any {
            listener(name, payload);
        }

        listeners.len()
    }

    /// Reports a protocol error to the error listeners.
    pub fn dispatch_protocol_error(&self, error: &ProtocolError) {
        let listeners: Vec<ErrorListener> =
            self.error_listeners.read().values().cloned().collect();
        for listener in &listeners {
            listener(error);
        }
    }

    // =========================================================================
    // Statistics
    // =========================================================================

    /// Returns the number of listeners registered for `name`.
    #[must_use]
    pub fn listener_count(&self, name: EventName) -> usize {
        self.listeners.read().get(&name).map_or(0, BTreeMap::len)
    }

    /// Returns the total number of registered listeners of all kinds.
    #[must_use]
    pub fn callback_count(&self) -> usize {
        self.listeners.read().values().map(BTreeMap::len).sum::<usize>()
            + self.any_listeners.read().len()
            + self.error_listeners.read().len()
    }

    /// Returns `true` if there are no registered listeners.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callback_count() == 0
    }
}

impl Default for ListenerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("callback_count", &self.callback_count())
            .finish()
    }
}
