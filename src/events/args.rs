//! # Positional event payloads.
//!
//! Events carry a variable number of loosely typed arguments. [`Arg`] is the
//! tagged value type for one argument and [`Args`] the ordered, immutable
//! sequence handed to every handler of an event.
//!
//! Emitter and handler agree out-of-band on the shape and count of the
//! arguments. Accessors return `None` on a shape mismatch instead of panicking,
//! so a handler decides for itself how strict it wants to be.
//!
//! ```rust
//! use evbus::{args, Arg};
//!
//! let a = args!["x", 42, true];
//! assert_eq!(a.get(0).and_then(Arg::as_str), Some("x"));
//! assert_eq!(a.get(1).and_then(Arg::as_int), Some(42));
//! assert_eq!(a.get(2).and_then(Arg::as_bool), Some(true));
//! assert!(a.get(3).is_none());
//! ```

use std::any::Any;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// One loosely typed event argument.
#[derive(Clone)]
pub enum Arg {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    List(Vec<Arg>),
    /// Arbitrary shared value; recover it with [`Arg::downcast_ref`].
    Opaque(Arc<dyn Any + Send + Sync>),
}

impl Arg {
    /// Wraps an arbitrary value as [`Arg::Opaque`].
    pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
        Arg::Opaque(Arc::new(value))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Arg::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Arg::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Arg::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as `f64`; integers are widened.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Arg::Float(v) => Some(*v),
            Arg::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Arg::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Arg::Bytes(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Arg]> {
        match self {
            Arg::List(v) => Some(v),
            _ => None,
        }
    }

    /// Borrows the inner value of an [`Arg::Opaque`] if it has type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Arg::Opaque(v) => v.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Short name of the variant (for logs).
    pub fn kind(&self) -> &'static str {
        match self {
            Arg::Null => "null",
            Arg::Bool(_) => "bool",
            Arg::Int(_) => "int",
            Arg::Float(_) => "float",
            Arg::Str(_) => "str",
            Arg::Bytes(_) => "bytes",
            Arg::List(_) => "list",
            Arg::Opaque(_) => "opaque",
        }
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Null => f.write_str("Null"),
            Arg::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Arg::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Arg::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Arg::Str(v) => f.debug_tuple("Str").field(v).finish(),
            Arg::Bytes(v) => f.debug_tuple("Bytes").field(&v.len()).finish(),
            Arg::List(v) => f.debug_tuple("List").field(v).finish(),
            Arg::Opaque(_) => f.write_str("Opaque(..)"),
        }
    }
}

impl PartialEq for Arg {
    /// Structural equality; opaque values compare by pointer identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Arg::Null, Arg::Null) => true,
            (Arg::Bool(a), Arg::Bool(b)) => a == b,
            (Arg::Int(a), Arg::Int(b)) => a == b,
            (Arg::Float(a), Arg::Float(b)) => a == b,
            (Arg::Str(a), Arg::Str(b)) => a == b,
            (Arg::Bytes(a), Arg::Bytes(b)) => a == b,
            (Arg::List(a), Arg::List(b)) => a == b,
            (Arg::Opaque(a), Arg::Opaque(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<()> for Arg {
    fn from(_: ()) -> Self {
        Arg::Null
    }
}

impl From<bool> for Arg {
    fn from(v: bool) -> Self {
        Arg::Bool(v)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Arg {
            fn from(v: $t) -> Self {
                Arg::Int(i64::from(v))
            }
        })*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Arg {
    fn from(v: f32) -> Self {
        Arg::Float(f64::from(v))
    }
}

impl From<f64> for Arg {
    fn from(v: f64) -> Self {
        Arg::Float(v)
    }
}

impl From<&str> for Arg {
    fn from(v: &str) -> Self {
        Arg::Str(v.to_owned())
    }
}

impl From<String> for Arg {
    fn from(v: String) -> Self {
        Arg::Str(v)
    }
}

impl From<Vec<u8>> for Arg {
    fn from(v: Vec<u8>) -> Self {
        Arg::Bytes(v)
    }
}

impl From<Vec<Arg>> for Arg {
    fn from(v: Vec<Arg>) -> Self {
        Arg::List(v)
    }
}

impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(v: Option<T>) -> Self {
        v.map_or(Arg::Null, Into::into)
    }
}

/// Ordered, immutable argument list of one event.
///
/// Cloning is cheap (`Arc`), so every handler of an event sees the same
/// allocation.
#[derive(Clone, Debug, PartialEq)]
pub struct Args(Arc<[Arg]>);

impl Args {
    /// An empty argument list.
    pub fn empty() -> Self {
        Self(Arc::from(Vec::new()))
    }

    pub fn as_slice(&self) -> &[Arg] {
        &self.0
    }
}

impl Default for Args {
    fn default() -> Self {
        Self::empty()
    }
}

impl Deref for Args {
    type Target = [Arg];

    fn deref(&self) -> &[Arg] {
        &self.0
    }
}

impl From<Vec<Arg>> for Args {
    fn from(v: Vec<Arg>) -> Self {
        Self(Arc::from(v))
    }
}

impl<const N: usize> From<[Arg; N]> for Args {
    fn from(v: [Arg; N]) -> Self {
        Self(Arc::from(Vec::from(v)))
    }
}

impl From<()> for Args {
    fn from(_: ()) -> Self {
        Self::empty()
    }
}

impl FromIterator<Arg> for Args {
    fn from_iter<I: IntoIterator<Item = Arg>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Args {
    type Item = &'a Arg;
    type IntoIter = std::slice::Iter<'a, Arg>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Builds an [`Args`] from heterogeneous values convertible into [`Arg`].
///
/// ```rust
/// use evbus::args;
///
/// let a = args!["first", 2, 3.5, None::<i32>];
/// assert_eq!(a.len(), 4);
/// assert!(a[3].is_null());
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::Args::empty()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Args::from(vec![$($crate::Arg::from($value)),+])
    };
}
