//! Process-wide shared dispatch state.
//!
//! Four pieces of state are shared by every hub rather than owned by one:
//! the global listener registry, the dispatch kill-switch, the logger hook,
//! and the set of event names opted into logging. They live together in
//! [`Globals`], behind explicit locks, reachable through [`globals()`].
//!
//! Hosts that need isolated universes (tests, multi-tenant embeddings)
//! construct their own `Globals` and hand it to
//! [`EventHub::with_globals`](crate::EventHub::with_globals). Hubs sharing a
//! handle see each other's global listeners, suppression, and logging; hubs
//! on different handles do not interact at all.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock, RwLock};

use dashmap::DashSet;
use log::debug;

use crate::data::EventData;
use crate::error::Result;
use crate::listener::{self, Listener};
use crate::registry::ListenerRegistry;

/// Logger hook signature: `(logged name, payload)`.
///
/// The logged name is the fired event name, prefixed with `"GLOBAL - "`
/// when the invocation came from the global branch of a dispatch.
pub type EventLogger = Arc<dyn Fn(&str, &EventData) + Send + Sync>;

/// The process-wide handle, initialized on first use.
static PROCESS: OnceLock<Arc<Globals>> = OnceLock::new();

/// Shared state every hub on a handle consults while firing.
pub struct Globals {
    /// Listeners fired by every hub on this handle.
    listeners: RwLock<ListenerRegistry>,

    /// When set, `fire` is a no-op for every hub on this handle.
    suppress_all: AtomicBool,

    /// The installed logger hook, if any.
    logger: RwLock<Option<EventLogger>>,

    /// Event names opted into logging.
    log_filter: DashSet<String>,
}

impl Globals {
    /// Create an isolated shared-state handle.
    ///
    /// Dispatch starts enabled, with no global listeners, no logger hook,
    /// and an empty log filter.
    pub fn new() -> Self {
        Self {
            listeners: RwLock::new(ListenerRegistry::new()),
            suppress_all: AtomicBool::new(false),
            logger: RwLock::new(None),
            log_filter: DashSet::new(),
        }
    }

    // ==================== Global listeners ====================

    /// Register a listener fired by every hub on this handle.
    pub fn add_listener(&self, event: &str, listener: Listener) -> Result<()> {
        self.listeners.write().unwrap().add(event, listener)
    }

    /// Remove one global listener by identity, returning it.
    pub fn remove_listener(&self, event: &str, id: listener::Id) -> Result<Listener> {
        self.listeners.write().unwrap().remove(event, id)
    }

    /// Whether the identity is registered globally for the event name.
    pub fn has_listener(&self, event: &str, id: listener::Id) -> bool {
        self.listeners.read().unwrap().contains(event, id)
    }

    /// Whether any global listener is registered for the event name.
    pub fn has_listeners(&self, event: &str) -> bool {
        self.listeners.read().unwrap().has_any(event)
    }

    /// Empty one event's global listeners, keeping the name registered.
    pub fn clear_listeners(&self, event: &str) -> Result<()> {
        self.listeners.write().unwrap().clear_event(event)
    }

    /// Drop every global registration, names included.
    pub fn clear_all_listeners(&self) {
        self.listeners.write().unwrap().clear();
    }

    /// Snapshot the global listeners for a name; `None` when unknown.
    ///
    /// The lock is released before this returns, so dispatch never holds it
    /// while callbacks run.
    pub(crate) fn snapshot(&self, event: &str) -> Option<Vec<Listener>> {
        self.listeners.read().unwrap().snapshot(event)
    }

    // ==================== Suppression ====================

    /// Let `fire` dispatch again after [`disable_all_events`](Self::disable_all_events).
    pub fn enable_all_events(&self) {
        self.suppress_all.store(false, Ordering::Relaxed);
        debug!("event dispatch enabled");
    }

    /// Make every `fire` on this handle a no-op until re-enabled.
    ///
    /// Hosts bracket bulk mutations with this to mute the event storm.
    pub fn disable_all_events(&self) {
        self.suppress_all.store(true, Ordering::Relaxed);
        debug!("event dispatch disabled");
    }

    /// Whether dispatch is currently enabled on this handle.
    pub fn events_enabled(&self) -> bool {
        !self.suppress_all.load(Ordering::Relaxed)
    }

    // ==================== Logging hook ====================

    /// Install the logger hook, replacing any previous one.
    ///
    /// The hook runs inside `fire`, before the listeners of a dispatch
    /// branch, for event names opted in via
    /// [`log_events_for`](Self::log_events_for).
    pub fn set_event_logger(&self, logger: impl Fn(&str, &EventData) + Send + Sync + 'static) {
        *self.logger.write().unwrap() = Some(Arc::new(logger));
    }

    /// Uninstall the logger hook. The log filter is left as it was.
    pub fn clear_event_logger(&self) {
        *self.logger.write().unwrap() = None;
    }

    /// Opt event names into logging. A single name is a batch of one.
    ///
    /// Names accumulate; there is no way to opt a name back out.
    pub fn log_events_for<I, S>(&self, events: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for event in events {
            self.log_filter.insert(event.into());
        }
    }

    /// Whether a fired name should reach the logger hook.
    pub(crate) fn should_log(&self, event: &str) -> bool {
        self.log_filter.contains(event) && self.logger.read().unwrap().is_some()
    }

    /// Hand one `(logged name, payload)` pair to the logger hook, if any.
    ///
    /// The hook is invoked with no lock held; a logger may itself adjust
    /// registrations or the filter.
    pub(crate) fn emit_log(&self, name: &str, data: &EventData) {
        let logger = self.logger.read().unwrap().clone();
        if let Some(logger) = logger {
            logger(name, data);
        }
    }
}

impl Default for Globals {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide shared state.
///
/// Every hub built with [`EventHub::new`](crate::EventHub::new), and every
/// `EventHub` associated function, acts on this handle.
pub fn globals() -> &'static Arc<Globals> {
    PROCESS.get_or_init(|| Arc::new(Globals::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::thread;

    // ==================== Global Listeners ====================

    #[test]
    fn add_and_query_global_listener() {
        // Given
        let globals = Globals::new();
        let listener = Listener::new(|_| {});
        let id = listener.id();

        // When
        globals.add_listener("node.dirty", listener).unwrap();

        // Then
        assert!(globals.has_listener("node.dirty", id));
        assert!(globals.has_listeners("node.dirty"));
        assert!(!globals.has_listeners("node.removed"));
    }

    #[test]
    fn remove_global_listener() {
        // Given
        let globals = Globals::new();
        let listener = Listener::new(|_| {});
        let id = listener.id();
        globals.add_listener("node.dirty", listener).unwrap();

        // When
        let removed = globals.remove_listener("node.dirty", id).unwrap();

        // Then
        assert_eq!(removed.id(), id);
        assert!(!globals.has_listener("node.dirty", id));
    }

    #[test]
    fn duplicate_global_listener_fails() {
        let globals = Globals::new();
        let listener = Listener::new(|_| {});
        globals.add_listener("node.dirty", listener.clone()).unwrap();

        assert!(globals.add_listener("node.dirty", listener).is_err());
    }

    #[test]
    fn clear_listeners_keeps_the_name() {
        // Given
        let globals = Globals::new();
        globals.add_listener("node.dirty", Listener::new(|_| {})).unwrap();

        // When
        globals.clear_listeners("node.dirty").unwrap();

        // Then: known name, empty sequence.
        assert!(!globals.has_listeners("node.dirty"));
        assert_eq!(globals.snapshot("node.dirty"), Some(Vec::new()));
    }

    #[test]
    fn clear_all_listeners_forgets_names() {
        // Given
        let globals = Globals::new();
        globals.add_listener("node.dirty", Listener::new(|_| {})).unwrap();
        globals.add_listener("node.removed", Listener::new(|_| {})).unwrap();

        // When
        globals.clear_all_listeners();

        // Then
        assert_eq!(globals.snapshot("node.dirty"), None);
        assert_eq!(globals.snapshot("node.removed"), None);
    }

    // ==================== Suppression ====================

    #[test]
    fn dispatch_starts_enabled() {
        let globals = Globals::new();

        assert!(globals.events_enabled());
    }

    #[test]
    fn disable_and_enable_toggle_dispatch() {
        let globals = Globals::new();

        globals.disable_all_events();
        assert!(!globals.events_enabled());

        globals.enable_all_events();
        assert!(globals.events_enabled());
    }

    // ==================== Logging Hook ====================

    #[test]
    fn should_log_requires_filter_and_hook() {
        // Given
        let globals = Globals::new();

        // Neither filter nor hook.
        assert!(!globals.should_log("node.dirty"));

        // Filter only.
        globals.log_events_for(["node.dirty"]);
        assert!(!globals.should_log("node.dirty"));

        // Filter and hook.
        globals.set_event_logger(|_, _| {});
        assert!(globals.should_log("node.dirty"));

        // Hook without filter membership.
        assert!(!globals.should_log("node.removed"));
    }

    #[test]
    fn clear_event_logger_stops_logging() {
        // Given
        let globals = Globals::new();
        globals.log_events_for(["node.dirty"]);
        globals.set_event_logger(|_, _| {});
        assert!(globals.should_log("node.dirty"));

        // When
        globals.clear_event_logger();

        // Then: the filter stays, the hook is gone.
        assert!(!globals.should_log("node.dirty"));
    }

    #[test]
    fn set_event_logger_replaces_the_hook() {
        // Given
        let globals = Globals::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let first = seen.clone();
        globals.set_event_logger(move |name, _| first.lock().unwrap().push(format!("a:{name}")));
        let second = seen.clone();
        globals.set_event_logger(move |name, _| second.lock().unwrap().push(format!("b:{name}")));

        // When
        globals.emit_log("node.dirty", &EventData::new());

        // Then: only the replacement ran.
        assert_eq!(*seen.lock().unwrap(), vec!["b:node.dirty".to_string()]);
    }

    #[test]
    fn log_events_for_accepts_batches() {
        let globals = Globals::new();
        globals.set_event_logger(|_, _| {});

        globals.log_events_for(["node.dirty", "node.removed"]);
        globals.log_events_for(["scene.loaded"]);

        assert!(globals.should_log("node.dirty"));
        assert!(globals.should_log("node.removed"));
        assert!(globals.should_log("scene.loaded"));
    }

    #[test]
    fn emit_log_without_a_hook_is_a_noop() {
        let globals = Globals::new();

        // Nothing to assert beyond "does not panic".
        globals.emit_log("node.dirty", &EventData::new());
    }

    // ==================== Process Handle ====================

    #[test]
    fn process_handle_is_shared() {
        let first = globals();
        let second = globals();

        assert!(Arc::ptr_eq(first, second));
    }

    // ==================== Concurrent Access ====================

    #[test]
    fn concurrent_registration_lands_every_listener() {
        // Given
        let globals = Arc::new(Globals::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let globals = Arc::clone(&globals);
                thread::spawn(move || {
                    let listener = Listener::new(|_| {});
                    let id = listener.id();
                    globals.add_listener("node.dirty", listener).unwrap();
                    id
                })
            })
            .collect();

        // When
        let ids: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        // Then
        for id in ids {
            assert!(globals.has_listener("node.dirty", id));
        }
        assert_eq!(globals.snapshot("node.dirty").unwrap().len(), 8);
    }
}
