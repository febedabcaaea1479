//! # Events flowing through the bus.
//!
//! An [`Event`] pairs an [`EventType`] label with its [`Args`]. It is created by
//! [`Emitter::emit`](crate::Emitter::emit), consumed exactly once by the
//! dispatcher and then dropped.
//!
//! ## Ordering
//! Each event carries a process-wide sequence number (`seq`) assigned at
//! construction. It is a diagnostic aid only: concurrent emits may reach the
//! queue in a different order than their `seq` suggests.
//!
//! ## Example
//! ```rust
//! use evbus::{args, Event, EventType};
//!
//! let ev = Event::new("orders.created", args!["A-17", 3]);
//! assert_eq!(ev.event_type, EventType::from("orders.created"));
//! assert_eq!(ev.args.len(), 2);
//! ```

use std::borrow::{Borrow, Cow};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use super::args::Args;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Opaque label identifying a category of event.
///
/// Used only as a map key; no internal structure is assumed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventType(Cow<'static, str>);

impl EventType {
    /// Creates an event type from any string-like value.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Returns the label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for EventType {
    fn from(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }
}

impl From<String> for EventType {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl From<&EventType> for EventType {
    fn from(ty: &EventType) -> Self {
        ty.clone()
    }
}

impl AsRef<str> for EventType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for EventType {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A single emitted event.
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Category label used to look up handlers.
    pub event_type: EventType,
    /// Positional payload shared by every handler invocation.
    pub args: Args,
}

impl Event {
    /// Creates a new event and assigns it the next sequence number.
    pub fn new(event_type: impl Into<EventType>, args: impl Into<Args>) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            event_type: event_type.into(),
            args: args.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Arg;

    #[test]
    fn seq_is_monotonic() {
        let a = Event::new("a", Args::empty());
        let b = Event::new("a", Args::empty());
        assert!(b.seq > a.seq);
    }

    #[test]
    fn event_type_borrowed_and_owned_compare_equal() {
        let borrowed = EventType::from("test");
        let owned = EventType::from(String::from("test"));
        assert_eq!(borrowed, owned);
        assert_eq!(owned.as_str(), "test");
        assert_eq!(borrowed.to_string(), "test");
    }

    #[test]
    fn args_are_kept_in_order() {
        let ev = Event::new("test", vec![Arg::from("x"), Arg::from("y")]);
        assert_eq!(ev.args.get(0).and_then(Arg::as_str), Some("x"));
        assert_eq!(ev.args.get(1).and_then(Arg::as_str), Some("y"));
    }
}
