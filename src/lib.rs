//! # evbus
//!
//! **evbus** is an in-process publish/subscribe event bus for tokio applications.
//!
//! Producers announce named events with positional arguments; consumers
//! register handlers against event names and are invoked asynchronously when a
//! matching event is dispatched. There is no wire protocol, persistence or
//! cross-process delivery.
//!
//! ## Architecture
//! ```text
//!   producer A        producer B        producer C
//!       │ emit()          │ emit()          │ emit()
//!       ▼                 ▼                 ▼
//!   writer task       writer task       writer task     (≤ max_pending_writers)
//!       └─────────────────┼─────────────────┘
//!                         ▼
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                 Queue (bounded mpsc, capacity 300)               │
//! └────────────────────────────────┬─────────────────────────────────┘
//!                                  ▼
//!                       ┌────────────────────┐       ┌──────────────┐
//!                       │     Dispatcher     │──────►│   Registry   │
//!                       │   (single loop)    │ snap  │ type→id→fn   │
//!                       └───┬────────┬───────┘       │   (RwLock)   │
//!                           ▼        ▼       ▼       └──────────────┘
//!                        spawn    spawn    spawn          ▲
//!                      handler1 handler2  handlerN        │ subscribe*/unsubscribe*
//!                    (catch_unwind per invocation)        │
//!                                                    consumers
//! ```
//!
//! ### Lifecycle
//! ```text
//! EmitterBuilder::build() ──► Dispatcher: Idle ──► Running
//! Emitter::stop()         ──► cancel token ──► loop exits ──► Stopped (terminal)
//! ```
//!
//! ## Features
//! | Area              | Description                            | Key types / traits           |
//! |-------------------|----------------------------------------|------------------------------|
//! | **Bus**           | Subscribe, emit, stop; global instance | [`Emitter`]                  |
//! | **Handlers**      | Sync/async closures, custom types      | [`Handler`], [`HandlerFn`]   |
//! | **Payloads**      | Loosely typed positional arguments     | [`Arg`], [`Args`], [`args!`] |
//! | **Identifiers**   | Pluggable handler id generation        | [`HandlerId`], [`IdSource`]  |
//! | **Errors**        | Typed errors for fallible calls        | [`BusError`]                 |
//! | **Configuration** | Queue capacity and writer limit        | [`Config`]                   |
//!
//! ## Diagnostics
//! The crate logs through [`tracing`]; install any subscriber to see them.
//! Dropped events, unknown unsubscribes and recovered handler panics are
//! reported there instead of as errors.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use evbus::{args, Arg, Args, Emitter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), evbus::BusError> {
//!     let bus = Emitter::builder().build()?;
//!     let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
//!
//!     bus.subscribe("test", move |args: Args| {
//!         let pair: Vec<String> =
//!             args.iter().filter_map(Arg::as_str).map(str::to_owned).collect();
//!         let _ = tx.send(pair);
//!     });
//!
//!     bus.emit("test", args!["x", "y"]);
//!
//!     let got = tokio::time::timeout(Duration::from_secs(1), rx.recv()).await.unwrap();
//!     assert_eq!(got, Some(vec!["x".to_string(), "y".to_string()]));
//!
//!     bus.stop().await;
//!     Ok(())
//! }
//! ```
mod core;
mod error;
mod events;
mod handlers;

// ---- Public re-exports ----

pub use crate::core::{
    Config, DEFAULT_MAX_PENDING_WRITERS, DEFAULT_QUEUE_CAPACITY, DispatcherState, Emitter,
    EmitterBuilder,
};
pub use error::BusError;
pub use events::{Arg, Args, Event, EventType};
pub use handlers::{
    AsyncHandlerFn, Handler, HandlerFn, HandlerId, HandlerRef, IdSource, UuidSource,
};
