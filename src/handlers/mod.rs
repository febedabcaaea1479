//! # Event handlers and their identifiers.
//!
//! This module provides the [`Handler`] trait, closure adapters and the
//! identifier source used by the registry.
//!
//! ## Handler types
//! - [`HandlerFn`] synchronous closure `Fn(Args)`
//! - [`AsyncHandlerFn`] closure returning a future `Fn(Args) -> Fut`
//! - any type implementing [`Handler`] directly
//!
//! ## Identifiers
//! - [`HandlerId`] opaque id returned by `subscribe*`
//! - [`IdSource`] pluggable id generator, [`UuidSource`] the default

mod handler;
mod handler_fn;
mod id;

pub use handler::{Handler, HandlerRef};
pub use handler_fn::{AsyncHandlerFn, HandlerFn};
pub use id::{HandlerId, IdSource, UuidSource};
