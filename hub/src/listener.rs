//! Listener handles with stable identity.
//!
//! Closures have no usable equality, so "is this callback already
//! registered" and "remove this callback" need something to compare. A
//! [`Listener`] pairs its callback with a process-unique [`Id`] allocated at
//! construction. Clones share the id: registering a clone of an
//! already-registered listener is a duplicate, and any clone can be handed
//! to a removal call.
//!
//! Listeners may carry an optional label. Labels have no effect on identity
//! or dispatch; they only make `Debug` output and error messages readable.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::data::EventData;

/// Next listener identity; ids are unique across the process.
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// A unique identifier for a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(u64);

impl Id {
    /// Get the raw identifier value.
    #[inline]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Allocate the next process-unique id.
    fn next() -> Self {
        Id(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Callback signature invoked with the fired payload.
///
/// Listeners get mutable access: changes they make are seen by the listeners
/// after them in the same dispatch, and by the caller once
/// [`fire`](crate::EventHub::fire) returns.
pub type Callback = dyn Fn(&mut EventData) + Send + Sync;

/// A callback with stable identity, registerable against event names.
///
/// `Listener` is a value: cloning it is cheap (the callback is shared
/// behind an [`Arc`]) and the clone compares equal to the original. Keep a
/// clone around to remove the registration later, or to register the same
/// callback under other event names.
#[derive(Clone)]
pub struct Listener {
    /// Identity shared by every clone of this listener.
    id: Id,

    /// Optional diagnostic label for `Debug` output and error messages.
    label: Option<Arc<str>>,

    /// The shared callback.
    callback: Arc<Callback>,
}

impl Listener {
    /// Wrap a callback in a fresh listener identity.
    pub fn new(callback: impl Fn(&mut EventData) + Send + Sync + 'static) -> Self {
        Self {
            id: Id::next(),
            label: None,
            callback: Arc::new(callback),
        }
    }

    /// Wrap a callback in a fresh identity, with a diagnostic label.
    pub fn named(
        label: impl Into<Arc<str>>,
        callback: impl Fn(&mut EventData) + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: Id::next(),
            label: Some(label.into()),
            callback: Arc::new(callback),
        }
    }

    /// The listener's identity.
    #[inline]
    pub fn id(&self) -> Id {
        self.id
    }

    /// The diagnostic label, if one was given.
    #[inline]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Display form used in error messages: the label, or `listener#<id>`.
    pub(crate) fn describe(&self) -> String {
        match &self.label {
            Some(label) => format!("'{label}'"),
            None => format!("listener#{}", self.id.get()),
        }
    }

    /// Invoke the callback with the given payload.
    #[inline]
    pub(crate) fn invoke(&self, data: &mut EventData) {
        (self.callback)(data)
    }
}

/// Equality is identity: two listeners are equal iff they share an id.
impl PartialEq for Listener {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Listener {}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("id", &self.id)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}
