//! Event payloads.
//!
//! A payload is a string-keyed mapping of loose JSON values, built by the
//! caller of [`fire`](crate::EventHub::fire). The hub enriches it in place
//! before dispatch: the firing hub's identity lands under
//! [`EVENT_SUBJECT_KEY`]. In place means exactly that: the key is still
//! there when `fire` returns, every listener sees the mutations of the
//! listeners before it, and a payload reused across fires carries whatever
//! the previous dispatch left in it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::hub;

/// Payload key under which `fire` records the firing hub.
pub const EVENT_SUBJECT_KEY: &str = "eventSubject";

/// String-keyed event payload handed to listeners.
///
/// Serializes transparently as the underlying JSON object, so payloads can
/// cross process boundaries or land in log sinks unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventData {
    values: Map<String, Value>,
}

impl EventData {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self { values: Map::new() }
    }

    /// Insert a value, returning the previous value for the key if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(key.into(), value.into())
    }

    /// Chainable insert, for building payloads inline.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a value by key.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Remove a value by key, returning it if present.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    /// Whether the payload carries the given key.
    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of entries, the injected subject included once present.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the payload has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over the payload's entries.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    /// Borrow the underlying JSON object.
    #[inline]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    /// The hub that last fired this payload, if it was fired at all.
    ///
    /// Decodes the value recorded under [`EVENT_SUBJECT_KEY`]. Returns
    /// `None` when the key is absent or was overwritten with something that
    /// is not a hub id.
    pub fn subject(&self) -> Option<hub::Id> {
        self.values
            .get(EVENT_SUBJECT_KEY)
            .and_then(Value::as_u64)
            .map(hub::Id::new)
    }

    /// Record the firing hub, overwriting any previous subject.
    pub(crate) fn set_subject(&mut self, subject: hub::Id) {
        self.values
            .insert(EVENT_SUBJECT_KEY.to_string(), Value::from(subject.get()));
    }
}

impl From<Map<String, Value>> for EventData {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

impl FromIterator<(String, Value)> for EventData {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
