//! Error types for listener registration and removal.
//!
//! Registry operations fail in exactly two ways: adding a listener that is
//! already there, and removing (or clearing) something that is not. Both are
//! caller errors, reported synchronously. Nothing in this crate logs and
//! swallows a failure.

use thiserror::Error;

/// Convenience alias for results carrying a hub [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by listener registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The listener is already registered for this event name.
    ///
    /// A listener may be registered under any number of *different* names,
    /// but only once per name. Clones of a listener share its identity, so
    /// registering a clone trips this too.
    #[error("listener {listener} is already registered for event '{event}'")]
    DuplicateListener {
        /// The event name the registration targeted.
        event: String,
        /// Display form of the offending listener.
        listener: String,
    },

    /// The event name, or the listener under it, has no registration.
    #[error("event '{event}' has no matching listener registration")]
    NotRegistered {
        /// The event name the operation targeted.
        event: String,
    },
}
