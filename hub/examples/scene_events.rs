//! A miniature scene-graph host wired to the event hub.
//!
//! This example shows:
//! - Host objects embedding an `EventHub` and firing named events
//! - Instance listeners vs. a global listener
//! - The logging hook drained through a `ChannelEventLogger`
//! - Muting dispatch around a bulk mutation
//!
//! Run with `RUST_LOG=debug cargo run -p eventhub --example scene_events`.

use eventhub::{ChannelEventLogger, EventData, EventHub, Listener};

// ============================================================================
// Host objects
// ============================================================================

/// A node in the host's scene graph, firing events as it changes.
struct SceneNode {
    name: &'static str,
    events: EventHub,
}

impl SceneNode {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            events: EventHub::new(),
        }
    }

    fn set_dirty(&self) {
        let mut data = EventData::new().with("node", self.name);
        self.events.fire("node.dirty", &mut data);
    }
}

fn main() -> Result<(), eventhub::Error> {
    env_logger::init();

    // Stream the logging hook into a channel the host drains at the end.
    let (logger, log_rx) = ChannelEventLogger::with_receiver();
    logger.install();
    EventHub::log_events_for(["node.dirty"]);

    let camera = SceneNode::new("camera");
    let mesh = SceneNode::new("mesh");

    // Instance listener: only the camera's own events.
    camera.events.add_listener(
        "node.dirty",
        Listener::named("camera-invalidate", |data| {
            println!("camera invalidated: {:?}", data.get("node"));
        }),
    )?;

    // Global listener: every node's events, whichever hub fired.
    EventHub::add_global_listener(
        "node.dirty",
        Listener::named("schedule-redraw", |data| {
            println!(
                "redraw scheduled by hub {:?} for {:?}",
                data.subject(),
                data.get("node")
            );
        }),
    )?;

    println!("=== Individual changes ===");
    camera.set_dirty();
    mesh.set_dirty();

    // Bulk mutation: mute the storm, then fire one explicit change.
    println!("=== Bulk mutation (muted) ===");
    EventHub::disable_all_events();
    for _ in 0..1_000 {
        mesh.set_dirty();
    }
    EventHub::enable_all_events();
    mesh.set_dirty();

    println!("=== Logged stream ===");
    for logged in log_rx.try_iter() {
        println!("log> {} {:?}", logged.name, logged.data.get("node"));
    }

    Ok(())
}
