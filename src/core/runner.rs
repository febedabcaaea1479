//! # Run a single handler invocation in isolation.
//!
//! Every handler of every dispatched event runs in its own spawned task. The
//! handler future is polled under `catch_unwind`, so a panic is caught at the
//! invocation boundary instead of reaching the dispatcher or sibling handlers.
//!
//! ## Flow
//! ```text
//! spawn_isolated(id, handler, args)
//!   └─► tokio::spawn(run_isolated)
//!         ├─ handler.handle(args) completes ─► Outcome::Completed
//!         └─ handler panics ─► catch_unwind ─► error! { handler_id, panic } ─► Outcome::Panicked
//! ```
//!
//! ## Rules
//! - The spawned task is **not** awaited by the dispatcher (fire-and-forget).
//! - Nothing cancels an invocation once spawned, not even `stop()`.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tokio::task::JoinHandle;
use tracing::error;

use crate::events::{Args, EventType};
use crate::handlers::{HandlerId, HandlerRef};

/// Result of one isolated invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// The handler panicked; carries the panic message.
    Panicked(String),
}

/// Spawns one isolated invocation and returns its handle.
///
/// The caller may drop the handle; the invocation keeps running.
pub fn spawn_isolated(
    event_type: EventType,
    seq: u64,
    id: HandlerId,
    handler: HandlerRef,
    args: Args,
) -> JoinHandle<Outcome> {
    tokio::spawn(run_isolated(event_type, seq, id, handler, args))
}

/// Runs `handler` with `args`, catching and logging any panic.
pub async fn run_isolated(
    event_type: EventType,
    seq: u64,
    id: HandlerId,
    handler: HandlerRef,
    args: Args,
) -> Outcome {
    let fut = handler.handle(args);
    match AssertUnwindSafe(fut).catch_unwind().await {
        Ok(()) => Outcome::Completed,
        Err(panic_err) => {
            let info = panic_message(&*panic_err);
            error!(
                %event_type,
                seq,
                handler_id = %id,
                handler = handler.name(),
                panic = %info,
                "handler panicked; recovered"
            );
            Outcome::Panicked(info)
        }
    }
}

/// Extracts a readable message from a panic payload.
fn panic_message(any: &(dyn Any + Send)) -> String {
    if let Some(msg) = any.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = any.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
