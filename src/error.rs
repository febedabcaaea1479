//! Error types used by the evbus runtime.
//!
//! The dispatch engine itself has no fatal error class: unknown event types,
//! unknown handler ids and panicking handlers are logged and absorbed. The
//! variants here cover the few places where a caller has to be told something
//! went wrong:
//!
//! - [`BusError::NoRuntime`] building an emitter outside a tokio runtime;
//! - [`BusError::Stopped`] enqueuing after the dispatcher has been stopped.
//!
//! [`BusError::as_label`] gives a stable snake_case label for logs/metrics.

use thiserror::Error;

use crate::events::EventType;

/// # Errors produced by the evbus runtime.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum BusError {
    /// No tokio runtime is available to host the dispatcher task.
    #[error("no tokio runtime available to spawn the dispatcher")]
    NoRuntime,

    /// The dispatcher has stopped; the event was not queued.
    #[error("event bus stopped; event {event_type} not queued")]
    Stopped {
        /// Type of the event that was rejected.
        event_type: EventType,
    },
}

impl BusError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use evbus::BusError;
    ///
    /// let err = BusError::Stopped { event_type: "orders".into() };
    /// assert_eq!(err.as_label(), "bus_stopped");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            BusError::NoRuntime => "bus_no_runtime",
            BusError::Stopped { .. } => "bus_stopped",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            BusError::NoRuntime => "no tokio runtime".to_string(),
            BusError::Stopped { event_type } => format!("stopped: event_type={event_type}"),
        }
    }
}
