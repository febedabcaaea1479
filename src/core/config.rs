//! # Runtime configuration.
//!
//! Provides [`Config`], the settings consumed by
//! [`EmitterBuilder`](crate::EmitterBuilder) when it allocates the queue and the
//! writer limit.
//!
//! ## Sentinel values
//! - `max_pending_writers = 0` → unlimited (no writer semaphore created)
//! - `queue_capacity = 0` → clamped to 1

/// Default capacity of the event queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 300;

/// Default cap on writer tasks waiting for queue space (`0` = unlimited).
pub const DEFAULT_MAX_PENDING_WRITERS: usize = 0;

/// Configuration for an [`Emitter`](crate::Emitter).
///
/// ## Field semantics
/// - `queue_capacity`: bounded FIFO size between producers and the dispatcher (min 1)
/// - `max_pending_writers`: writer tasks allowed in flight at once (`0` = unlimited)
///
/// ## Notes
/// All fields are public for flexibility. Prefer the helper accessors to avoid
/// sprinkling sentinel checks (`0`) across the codebase.
#[derive(Clone, Debug)]
pub struct Config {
    /// Capacity of the bounded event queue.
    ///
    /// Writers suspend while the queue is full. This is the only back-pressure
    /// mechanism between `emit` and the dispatcher.
    pub queue_capacity: usize,

    /// Maximum number of spawned writer tasks that may wait for queue space.
    ///
    /// `emit` never blocks its caller; it hands the event to a writer task.
    /// With a limit set, events emitted while this many writers are already
    /// pending are dropped with a warning instead of piling up more tasks.
    ///
    /// - `0` = unlimited, every emitted event is eventually queued (default)
    /// - `n > 0` = at most `n` pending writers
    pub max_pending_writers: usize,
}

impl Config {
    /// Returns the queue capacity clamped to a minimum of 1.
    #[inline]
    pub fn queue_capacity_clamped(&self) -> usize {
        self.queue_capacity.max(1)
    }

    /// Returns the writer limit as an `Option`.
    ///
    /// - `None` → unlimited (no semaphore)
    /// - `Some(n)` → at most `n` pending writers
    #[inline]
    pub fn writer_limit(&self) -> Option<usize> {
        if self.max_pending_writers == 0 {
            None
        } else {
            Some(self.max_pending_writers)
        }
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `queue_capacity = 300`
    /// - `max_pending_writers = 0` (unlimited)
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            max_pending_writers: DEFAULT_MAX_PENDING_WRITERS,
        }
    }
}
