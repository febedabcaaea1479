//! Runtime core: registry, dispatch loop and lifecycle.
//!
//! The public API from this module is [`Emitter`] (with its builder and
//! [`Config`]); the rest is internal wiring.
//!
//! Internal modules:
//! - [`registry`]: lock-guarded `event type → handler id → handler` map;
//! - [`dispatcher`]: single loop draining the queue and fanning out;
//! - [`runner`]: one panic-isolated handler invocation;
//! - [`emitter`]: subscribe/emit/stop surface and the process-wide instance;
//! - [`builder`]: wires the pieces together and starts the dispatcher.
//!
//! ## Wiring
//! ```text
//!   Emitter::emit ──► writer task ──► Queue (mpsc, bounded) ──► Dispatcher
//!                                                                  │
//!                         Registry::snapshot(type) ◄───────────────┤
//!                                                                  ▼
//!                                        runner::spawn_isolated × N handlers
//! ```

mod builder;
mod config;
mod dispatcher;
mod emitter;
mod registry;
mod runner;

pub use builder::EmitterBuilder;
pub use config::{Config, DEFAULT_MAX_PENDING_WRITERS, DEFAULT_QUEUE_CAPACITY};
pub use dispatcher::DispatcherState;
pub use emitter::Emitter;
