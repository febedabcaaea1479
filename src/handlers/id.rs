//! # Handler identifiers
//!
//! A [`HandlerId`] is the opaque string returned by `subscribe*` and later
//! passed to `unsubscribe*`. Ids come from an [`IdSource`]; the default
//! [`UuidSource`] hands out random v4 UUIDs in their 32-char simple form.
//!
//! An id is unique within one event type's handler map. The same id appears
//! under several types when one `subscribe_multiple` call registers a handler
//! for all of them.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

/// Opaque identifier of a registered handler.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(Arc<str>);

impl HandlerId {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HandlerId {
    fn from(id: &str) -> Self {
        Self(Arc::from(id))
    }
}

impl From<String> for HandlerId {
    fn from(id: String) -> Self {
        Self(Arc::from(id))
    }
}

impl Borrow<str> for HandlerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Source of fresh, globally unique handler identifiers.
pub trait IdSource: Send + Sync + 'static {
    /// Produces a new identifier. Must never repeat within the process.
    fn next_id(&self) -> HandlerId;
}

/// Random v4 UUID identifiers.
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidSource;

impl IdSource for UuidSource {
    fn next_id(&self) -> HandlerId {
        HandlerId::from(Uuid::new_v4().simple().to_string())
    }
}
