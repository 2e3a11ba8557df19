//! Ordered, name-keyed listener storage.
//!
//! One registry backs each hub instance and one backs the global side of a
//! [`Globals`](crate::Globals) handle. Listeners for a name keep their
//! registration order, and a listener identity appears at most once per
//! name.
//!
//! # Sticky names
//!
//! Event names are sticky: removing the last listener for a name, or
//! clearing the name, keeps the name registered with an empty sequence.
//! Dispatch keys its logging hook on name presence, so a host that once
//! registered under `"scene.changed"` keeps that name in the logged set
//! even after all its listeners are gone. Only
//! [`clear`](ListenerRegistry::clear) forgets names.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::listener::{self, Listener};

/// Mapping from event name to its ordered, duplicate-free listeners.
#[derive(Debug, Default, Clone)]
pub struct ListenerRegistry {
    events: HashMap<String, Vec<Listener>>,
}

impl ListenerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            events: HashMap::new(),
        }
    }

    /// Register a listener under an event name, preserving arrival order.
    ///
    /// Fails with [`Error::DuplicateListener`] when the listener identity
    /// is already present for that name. The same listener may be
    /// registered under any number of different names.
    pub fn add(&mut self, event: &str, listener: Listener) -> Result<()> {
        let listeners = self.events.entry(event.to_string()).or_default();
        if listeners.iter().any(|known| known.id() == listener.id()) {
            return Err(Error::DuplicateListener {
                event: event.to_string(),
                listener: listener.describe(),
            });
        }
        listeners.push(listener);
        Ok(())
    }

    /// Remove the listener with the given identity from an event name.
    ///
    /// Returns the removed listener, so callers can re-register or inspect
    /// it. Fails with [`Error::NotRegistered`] when the name was never
    /// registered, or no listener under it matches. The name itself stays
    /// registered even when its sequence empties.
    pub fn remove(&mut self, event: &str, id: listener::Id) -> Result<Listener> {
        let listeners = self.events.get_mut(event).ok_or_else(|| Error::NotRegistered {
            event: event.to_string(),
        })?;
        let position = listeners
            .iter()
            .position(|known| known.id() == id)
            .ok_or_else(|| Error::NotRegistered {
                event: event.to_string(),
            })?;
        Ok(listeners.remove(position))
    }

    /// Whether the given listener identity is registered for an event name.
    ///
    /// Unknown names answer `false`; they are not an error here.
    pub fn contains(&self, event: &str, id: listener::Id) -> bool {
        self.events
            .get(event)
            .is_some_and(|listeners| listeners.iter().any(|known| known.id() == id))
    }

    /// Whether at least one listener is registered for an event name.
    pub fn has_any(&self, event: &str) -> bool {
        self.events
            .get(event)
            .is_some_and(|listeners| !listeners.is_empty())
    }

    /// Empty one event's listener sequence, keeping the name registered.
    ///
    /// Fails with [`Error::NotRegistered`] when the name was never
    /// registered.
    pub fn clear_event(&mut self, event: &str) -> Result<()> {
        match self.events.get_mut(event) {
            Some(listeners) => {
                listeners.clear();
                Ok(())
            }
            None => Err(Error::NotRegistered {
                event: event.to_string(),
            }),
        }
    }

    /// Drop every registration, names included.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Snapshot the listeners for an event name.
    ///
    /// Returns `None` for names never registered, `Some` (possibly empty)
    /// for registered names. The clone decouples dispatch from the live
    /// sequence: mutating the registry mid-iteration affects the next
    /// snapshot, never one already taken.
    pub fn snapshot(&self, event: &str) -> Option<Vec<Listener>> {
        self.events.get(event).cloned()
    }

    /// Number of registered event names, empty sequences included.
    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no event name is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
