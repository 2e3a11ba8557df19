//! Draining the logger hook over a channel.
//!
//! The logger hook runs inside `fire`, on whichever thread fired. A host
//! that wants to render or persist the stream somewhere else (a debug
//! console, a file writer) installs a [`ChannelEventLogger`] and drains
//! the paired receiver at its own pace.

use crossbeam::channel::{Receiver, Sender, unbounded};
use serde::{Deserialize, Serialize};

use crate::data::EventData;
use crate::global::{self, Globals};

/// One logger-hook invocation, as seen by the draining side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedEvent {
    /// The logged name; global-branch entries carry the `"GLOBAL - "`
    /// prefix.
    pub name: String,
    /// The payload at the moment of logging.
    pub data: EventData,
}

/// Logger-hook adapter that forwards `(name, payload)` pairs into a
/// channel.
pub struct ChannelEventLogger {
    sender: Sender<LoggedEvent>,
}

impl ChannelEventLogger {
    pub fn new(sender: Sender<LoggedEvent>) -> Self {
        Self { sender }
    }

    pub fn with_receiver() -> (Self, Receiver<LoggedEvent>) {
        let (sender, receiver) = unbounded();
        (Self::new(sender), receiver)
    }

    /// Forward one logger-hook invocation. Records sent after the receiver
    /// disconnected are dropped.
    pub fn log(&self, name: &str, data: &EventData) {
        let _ = self.sender.try_send(LoggedEvent {
            name: name.to_string(),
            data: data.clone(),
        });
    }

    /// Install this adapter as the logger hook of the given handle.
    pub fn install_on(self, globals: &Globals) {
        globals.set_event_logger(move |name, data| self.log(name, data));
    }

    /// Install this adapter as the process-wide logger hook.
    pub fn install(self) {
        self.install_on(global::globals());
    }
}
