//! # Function-backed handlers
//!
//! [`HandlerFn`] wraps a synchronous closure `F: Fn(Args)`, [`AsyncHandlerFn`]
//! wraps `F: Fn(Args) -> Fut` and produces a fresh future per invocation.
//! Neither keeps hidden mutable state between invocations; if a closure needs
//! shared state it captures an `Arc<...>` explicitly.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use evbus::{Args, HandlerFn, HandlerRef};
//!
//! let hits = Arc::new(AtomicUsize::new(0));
//! let seen = Arc::clone(&hits);
//! let h: HandlerRef = HandlerFn::arc(move |_args: Args| {
//!     seen.fetch_add(1, Ordering::Relaxed);
//! });
//! let _ = h;
//! ```

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::events::Args;
use crate::handlers::handler::Handler;

/// Handler backed by a synchronous closure.
///
/// The closure runs inside the invocation task, so it should be short or
/// offload blocking work itself.
pub struct HandlerFn<F> {
    f: F,
}

impl<F> fmt::Debug for HandlerFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerFn").finish_non_exhaustive()
    }
}

impl<F> HandlerFn<F>
where
    F: Fn(Args) + Send + Sync + 'static,
{
    /// Creates a new closure-backed handler.
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the handler and returns it as a shared `Arc`.
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

#[async_trait]
impl<F> Handler for HandlerFn<F>
where
    F: Fn(Args) + Send + Sync + 'static,
{
    async fn handle(&self, args: Args) {
        (self.f)(args)
    }

    fn name(&self) -> &str {
        "HandlerFn"
    }
}

/// Handler backed by a closure that returns a future.
pub struct AsyncHandlerFn<F> {
    f: F,
}

impl<F> fmt::Debug for AsyncHandlerFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncHandlerFn").finish_non_exhaustive()
    }
}

impl<F, Fut> AsyncHandlerFn<F>
where
    F: Fn(Args) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    /// Creates a new async closure-backed handler.
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the handler and returns it as a shared `Arc`.
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

#[async_trait]
impl<F, Fut> Handler for AsyncHandlerFn<F>
where
    F: Fn(Args) -> Fut + Send + Sync + 'static, // Fn, not FnMut
    Fut: Future<Output = ()> + Send + 'static,
{
    async fn handle(&self, args: Args) {
        (self.f)(args).await
    }

    fn name(&self) -> &str {
        "AsyncHandlerFn"
    }
}
