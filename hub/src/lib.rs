//! Named-event publish/subscribe dispatch for embedding hosts.
//!
//! [`EventHub`] is the subject half of an observer pattern: host objects own
//! a hub, callers register [`Listener`]s against event names (on the hub or
//! process-wide), and [`EventHub::fire`] synchronously invokes every match,
//! instance listeners first, then global listeners, handing each the same
//! [`EventData`] payload enriched in place with the firing hub's identity.
//!
//! Dispatch can be muted process-wide while a host runs bulk mutations
//! ([`EventHub::disable_all_events`]), and an optional logger hook
//! ([`EventHub::set_event_logger`]) observes fired names opted in through
//! [`EventHub::log_events_for`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! use eventhub::{EventData, EventHub, Listener};
//!
//! let hub = EventHub::new();
//! let seen = Arc::new(AtomicUsize::new(0));
//!
//! let probe = seen.clone();
//! hub.add_listener(
//!     "scene.changed",
//!     Listener::new(move |data| {
//!         assert!(data.subject().is_some());
//!         probe.fetch_add(1, Ordering::Relaxed);
//!     }),
//! )?;
//!
//! let mut data = EventData::new().with("dirty", true);
//! hub.fire("scene.changed", &mut data);
//!
//! assert_eq!(seen.load(Ordering::Relaxed), 1);
//! assert_eq!(data.subject(), Some(hub.id()));
//! # Ok::<(), eventhub::Error>(())
//! ```

pub mod data;
pub mod error;
pub mod global;
pub mod hub;
pub mod listener;
pub mod logging;
pub mod registry;

pub use data::{EVENT_SUBJECT_KEY, EventData};
pub use error::{Error, Result};
pub use global::{EventLogger, Globals, globals};
pub use hub::{EventHub, Id as HubId};
pub use listener::{Id as ListenerId, Listener};
pub use logging::{ChannelEventLogger, LoggedEvent};
pub use registry::ListenerRegistry;
