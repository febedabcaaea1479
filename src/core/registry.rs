//! # Handler registry.
//!
//! Two-level map `event type → (handler id → handler)`, shared by the public
//! API (writers) and the dispatcher (reader).
//!
//! ## Architecture
//! ```text
//! Emitter::subscribe*()   ──► write lock ──┐
//! Emitter::unsubscribe*() ──► write lock ──┤
//!                                          ▼
//!                      RwLock<HashMap<EventType, HashMap<HandlerId, HandlerRef>>>
//!                                          ▲
//! Dispatcher::dispatch()  ──► read lock ───┘ (snapshot, then unlock)
//! ```
//!
//! ## Rules
//! - Every read and write goes through the lock; it is never held across `.await`
//!   nor while a handler runs (the dispatcher works on a snapshot).
//! - A handler id is unique within one event type; `subscribe_multiple` reuses
//!   one id across all of its types.
//! - Inner maps that become empty are pruned.
//! - Unsubscribing an unknown (type, id) pair is a silent no-op.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::events::EventType;
use crate::handlers::{HandlerId, HandlerRef, IdSource};

type HandlerMap = HashMap<HandlerId, HandlerRef>;

/// Lock-guarded registry of handlers keyed by event type.
pub struct Registry {
    handlers: RwLock<HashMap<EventType, HandlerMap>>,
    ids: Arc<dyn IdSource>,
}

impl Registry {
    /// Creates an empty registry drawing ids from `ids`.
    pub fn new(ids: Arc<dyn IdSource>) -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            ids,
        }
    }

    /// Registers `handler` under `event_type` with a fresh id.
    pub fn subscribe(&self, event_type: EventType, handler: HandlerRef) -> HandlerId {
        let id = self.ids.next_id();
        debug!(%event_type, handler_id = %id, "handler subscribed");
        self.handlers
            .write()
            .entry(event_type)
            .or_default()
            .insert(id.clone(), handler);
        id
    }

    /// Registers the same `handler` under every type in `event_types`, sharing one id.
    ///
    /// The id is generated once per call, so a single
    /// [`unsubscribe_multiple`](Self::unsubscribe_multiple) with it removes the
    /// handler everywhere.
    pub fn subscribe_multiple<I>(&self, event_types: I, handler: HandlerRef) -> HandlerId
    where
        I: IntoIterator<Item = EventType>,
    {
        let id = self.ids.next_id();
        let mut map = self.handlers.write();
        for event_type in event_types {
            debug!(%event_type, handler_id = %id, "handler subscribed");
            map.entry(event_type)
                .or_default()
                .insert(id.clone(), Arc::clone(&handler));
        }
        id
    }

    /// Removes the handler `id` from `event_type`.
    ///
    /// Returns `true` if an entry was removed.
    pub fn unsubscribe(&self, event_type: &str, id: &str) -> bool {
        let mut map = self.handlers.write();
        Self::remove_locked(&mut map, event_type, id)
    }

    /// Removes the handler `id` from every type in `event_types`.
    ///
    /// Returns the number of entries removed.
    pub fn unsubscribe_multiple<I, T>(&self, event_types: I, id: &str) -> usize
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut map = self.handlers.write();
        event_types
            .into_iter()
            .filter(|ty| Self::remove_locked(&mut map, ty.as_ref(), id))
            .count()
    }

    /// Copies the handlers registered for `event_type`.
    ///
    /// Returns `None` when the type has no handlers.
    pub fn snapshot(&self, event_type: &str) -> Option<Vec<(HandlerId, HandlerRef)>> {
        let map = self.handlers.read();
        map.get(event_type).map(|inner| {
            inner
                .iter()
                .map(|(id, h)| (id.clone(), Arc::clone(h)))
                .collect()
        })
    }

    /// Number of handlers registered for `event_type`.
    pub fn handler_count(&self, event_type: &str) -> usize {
        self.handlers
            .read()
            .get(event_type)
            .map_or(0, HashMap::len)
    }

    /// Returns sorted list of event types with at least one handler.
    pub fn event_types(&self) -> Vec<EventType> {
        let mut types: Vec<EventType> = self.handlers.read().keys().cloned().collect();
        types.sort_unstable();
        types
    }

    fn remove_locked(
        map: &mut HashMap<EventType, HandlerMap>,
        event_type: &str,
        id: &str,
    ) -> bool {
        let Some(inner) = map.get_mut(event_type) else {
            debug!(%event_type, handler_id = %id, "unsubscribe: no handlers for event type");
            return false;
        };
        let removed = inner.remove(id).is_some();
        if inner.is_empty() {
            map.remove(event_type);
        }
        if removed {
            debug!(%event_type, handler_id = %id, "handler unsubscribed");
        }
        removed
    }
}
