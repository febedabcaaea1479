//! # Core handler trait
//!
//! `Handler` is the extension point for reacting to emitted events. Every
//! matching event spawns one independent invocation of [`Handler::handle`],
//! isolated from the dispatcher and from sibling handlers.
//!
//! ## Contract
//! - Implementations may be slow (I/O, retries); they do **not** block the
//!   dispatcher nor other handlers.
//! - A panic inside `handle` is caught at the invocation boundary and logged
//!   with the handler id; it never reaches the dispatcher.
//! - Invocations of the same handler may overlap when events arrive faster
//!   than it completes. Shared state belongs behind `Arc<...>`.
//!
//! ## Example
//! ```rust
//! use evbus::{Arg, Args, Handler};
//! use async_trait::async_trait;
//!
//! struct Audit;
//!
//! #[async_trait]
//! impl Handler for Audit {
//!     async fn handle(&self, args: Args) {
//!         let _who = args.first().and_then(Arg::as_str);
//!         // write audit record...
//!     }
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::events::Args;

/// Contract for event handlers.
///
/// Called from a freshly spawned task per event. Implementations should avoid
/// blocking the async runtime (prefer async I/O and cooperative waits).
#[async_trait]
pub trait Handler: Send + Sync + 'static {
    /// Handle one event's arguments.
    async fn handle(&self, args: Args);

    /// Human-readable name (for logs).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Shared handle to a handler, as stored in the registry.
pub type HandlerRef = Arc<dyn Handler>;
