//! The event hub: per-instance registration plus shared dispatch.
//!
//! A hub is the embeddable half of a subject object: hosts hold one inside
//! each node that fires events, register [`Listener`]s against it, and call
//! [`fire`](EventHub::fire). Firing merges two sides, the hub's own
//! listeners and the global listeners shared by every hub on the same
//! [`Globals`] handle, invoking both with the same enriched payload,
//! instance side first.
//!
//! # Dispatch contract
//!
//! - Suppression wins: while the kill-switch on the hub's handle is set,
//!   `fire` returns without touching the payload, the listeners, or the
//!   logger hook.
//! - The payload is enriched in place: the firing hub's id lands under
//!   [`EVENT_SUBJECT_KEY`](crate::data::EVENT_SUBJECT_KEY) before any
//!   listener runs, and is still there after `fire` returns.
//! - Each branch snapshots its listener sequence before invoking anything:
//!   a listener removing itself (or a neighbor) changes the next fire,
//!   never the one in flight.
//! - No registry lock is held while callbacks run, so listeners may
//!   register, remove, and fire re-entrantly without deadlocking.
//! - Listener panics are not caught: an unwinding listener aborts the rest
//!   of the dispatch and surfaces to the caller of `fire`.
//!
//! # Example
//!
//! ```
//! use eventhub::{EventData, EventHub, Listener};
//!
//! let hub = EventHub::new();
//! hub.add_listener("scene.changed", Listener::new(|data| {
//!     data.insert("handled", true);
//! }))?;
//!
//! let mut data = EventData::new().with("dirty", true);
//! hub.fire("scene.changed", &mut data);
//!
//! assert_eq!(data.get("handled"), Some(&true.into()));
//! assert_eq!(data.subject(), Some(hub.id()));
//! # Ok::<(), eventhub::Error>(())
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use log::trace;

use crate::data::EventData;
use crate::error::Result;
use crate::global::{self, Globals};
use crate::listener::{self, Listener};
use crate::registry::ListenerRegistry;

/// Prefix on the logged name when the global branch of a dispatch logs.
const GLOBAL_LOG_PREFIX: &str = "GLOBAL - ";

/// Next hub identity; ids are unique across the process.
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// A hub identifier: the stable identity `fire` injects as the event
/// subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(u64);

impl Id {
    /// Construct an id from its raw value.
    #[inline]
    pub const fn new(id: u64) -> Self {
        Id(id)
    }

    /// Get the raw identifier value.
    #[inline]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl From<u64> for Id {
    #[inline]
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

/// An event subject: a named-event listener registry with synchronous
/// dispatch.
///
/// Hubs built with [`new`](EventHub::new) share the process-wide [`Globals`]
/// handle; hubs built with [`with_globals`](EventHub::with_globals) share
/// whatever handle they were given. The `EventHub` associated functions
/// (`add_global_listener` and friends) always act on the process-wide
/// handle; drive an injected handle through its own [`Globals`] methods.
pub struct EventHub {
    /// The hub's stable identity, injected into fired payloads.
    id: Id,

    /// Listeners registered against this hub alone.
    listeners: RwLock<ListenerRegistry>,

    /// The shared state this hub consults while firing.
    globals: Arc<Globals>,
}

impl EventHub {
    /// Create a hub bound to the process-wide shared state.
    pub fn new() -> Self {
        Self::with_globals(Arc::clone(global::globals()))
    }

    /// Create a hub bound to an injected shared-state handle.
    pub fn with_globals(globals: Arc<Globals>) -> Self {
        Self {
            id: Id(NEXT_ID.fetch_add(1, Ordering::Relaxed)),
            listeners: RwLock::new(ListenerRegistry::new()),
            globals,
        }
    }

    /// The hub's stable identity.
    #[inline]
    pub fn id(&self) -> Id {
        self.id
    }

    /// The shared state this hub consults while firing.
    #[inline]
    pub fn globals(&self) -> &Arc<Globals> {
        &self.globals
    }

    // ==================== Instance listeners ====================

    /// Register a listener for an event name on this hub.
    ///
    /// Listeners fire in registration order. Fails with
    /// [`Error::DuplicateListener`](crate::Error::DuplicateListener) when
    /// the listener identity is already registered for that name on this
    /// hub.
    pub fn add_listener(&self, event: &str, listener: Listener) -> Result<()> {
        self.listeners.write().unwrap().add(event, listener)
    }

    /// Whether the identity is registered for the name on this hub.
    ///
    /// Unknown names answer `false`; they are not an error.
    pub fn has_listener(&self, event: &str, id: listener::Id) -> bool {
        self.listeners.read().unwrap().contains(event, id)
    }

    /// Whether this hub has at least one listener for the name.
    pub fn has_listeners(&self, event: &str) -> bool {
        self.listeners.read().unwrap().has_any(event)
    }

    /// Remove one listener by identity, returning it.
    ///
    /// Fails with [`Error::NotRegistered`](crate::Error::NotRegistered)
    /// when the name was never registered on this hub, or no listener under
    /// it matches.
    pub fn remove_listener(&self, event: &str, id: listener::Id) -> Result<Listener> {
        self.listeners.write().unwrap().remove(event, id)
    }

    /// Empty one event's listeners on this hub, keeping the name
    /// registered.
    pub fn clear_listeners(&self, event: &str) -> Result<()> {
        self.listeners.write().unwrap().clear_event(event)
    }

    /// Drop every registration on this hub, names included.
    pub fn clear_all_listeners(&self) {
        self.listeners.write().unwrap().clear();
    }

    // ==================== Dispatch ====================

    /// Fire an event: synchronously invoke this hub's listeners for the
    /// name, then the global listeners for it.
    ///
    /// Returns once every matching listener has returned. A payload with no
    /// caller data is just `&mut EventData::new()`.
    ///
    /// The logger hook runs once per branch whose registry knows the name
    /// (even a name whose listeners were all removed), before that branch's
    /// listeners, and only for names opted in via
    /// [`log_events_for`](EventHub::log_events_for). The global branch logs
    /// under `"GLOBAL - <name>"`; filter membership is always checked
    /// against the bare name.
    pub fn fire(&self, event: &str, data: &mut EventData) {
        if !self.globals.events_enabled() {
            return;
        }

        data.set_subject(self.id);

        // Instance branch. Snapshot under the read lock, invoke with it
        // released.
        let instance = self.listeners.read().unwrap().snapshot(event);
        if let Some(listeners) = instance {
            if self.globals.should_log(event) {
                self.globals.emit_log(event, data);
            }
            trace!("hub {} fires '{event}' to {} listener(s)", self.id.get(), listeners.len());
            for listener in &listeners {
                listener.invoke(data);
            }
        }

        // Global branch, independently.
        let global = self.globals.snapshot(event);
        if let Some(listeners) = global {
            if self.globals.should_log(event) {
                self.globals.emit_log(&format!("{GLOBAL_LOG_PREFIX}{event}"), data);
            }
            trace!(
                "hub {} fires '{event}' to {} global listener(s)",
                self.id.get(),
                listeners.len()
            );
            for listener in &listeners {
                listener.invoke(data);
            }
        }
    }

    // ==================== Process-wide operations ====================
    //
    // Associated functions acting on the handle behind
    // [`globals()`](crate::globals), the one every `EventHub::new` hub
    // consults.

    /// Register a listener fired by every hub on the process handle.
    pub fn add_global_listener(event: &str, listener: Listener) -> Result<()> {
        global::globals().add_listener(event, listener)
    }

    /// Whether the identity is registered globally for the name.
    pub fn has_global_listener(event: &str, id: listener::Id) -> bool {
        global::globals().has_listener(event, id)
    }

    /// Whether any global listener is registered for the name.
    pub fn has_global_listeners(event: &str) -> bool {
        global::globals().has_listeners(event)
    }

    /// Remove one global listener by identity, returning it.
    pub fn remove_global_listener(event: &str, id: listener::Id) -> Result<Listener> {
        global::globals().remove_listener(event, id)
    }

    /// Empty one event's global listeners, keeping the name registered.
    pub fn clear_global_listeners(event: &str) -> Result<()> {
        global::globals().clear_listeners(event)
    }

    /// Drop every global registration, names included.
    pub fn clear_all_global_listeners() {
        global::globals().clear_all_listeners();
    }

    /// Re-enable dispatch for every hub on the process handle.
    pub fn enable_all_events() {
        global::globals().enable_all_events();
    }

    /// Suppress dispatch for every hub on the process handle.
    pub fn disable_all_events() {
        global::globals().disable_all_events();
    }

    /// Whether dispatch is enabled on the process handle.
    pub fn events_enabled() -> bool {
        global::globals().events_enabled()
    }

    /// Install the process-wide logger hook, replacing any previous one.
    pub fn set_event_logger(logger: impl Fn(&str, &EventData) + Send + Sync + 'static) {
        global::globals().set_event_logger(logger);
    }

    /// Uninstall the process-wide logger hook.
    pub fn clear_event_logger() {
        global::globals().clear_event_logger();
    }

    /// Opt event names into logging on the process handle.
    pub fn log_events_for<I, S>(events: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        global::globals().log_events_for(events);
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHub")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}
