//! Events: data model and bounded queue.
//!
//! ## Contents
//! - [`EventType`], [`Event`] event label and the emitted value
//! - [`Arg`], [`Args`] loosely typed positional payload
//! - [`Queue`] bounded mpsc between writer tasks and the dispatcher
//!
//! See `core/mod.rs` for the system-level wiring diagram.

mod args;
mod event;
mod queue;

pub use args::{Arg, Args};
pub use event::{Event, EventType};
pub use queue::{Queue, QueueSender};
