//! # Bounded event queue between producers and the dispatcher.
//!
//! [`Queue`] is a thin wrapper around [`tokio::sync::mpsc`] that decouples
//! `emit` callers from the single dispatcher loop.
//!
//! ## Architecture
//! ```text
//! Producers (many):                    Consumer (one):
//!   writer task 1 ──┐
//!   writer task 2 ──┼──────► Queue ───────► Dispatcher loop
//!   writer task N ──┘   (bounded mpsc)
//! ```
//!
//! ## Rules
//! - **Bounded capacity**: `send()` suspends while the queue is full (back-pressure).
//! - **Single reader**: the receiver is taken exactly once by the dispatcher.
//! - **Fail fast after stop**: once the receiver is dropped, `send()` returns the event back.

use tokio::sync::mpsc;

use super::event::Event;

/// Writer side of the event queue.
///
/// Cheap to clone; every writer task holds its own clone.
#[derive(Clone, Debug)]
pub struct QueueSender {
    tx: mpsc::Sender<Event>,
}

impl QueueSender {
    /// Enqueues an event, suspending while the queue is full.
    ///
    /// Returns the event back if the dispatcher is gone.
    pub async fn send(&self, ev: Event) -> Result<(), Event> {
        self.tx.send(ev).await.map_err(|e| e.0)
    }

    /// Number of free slots right now.
    pub fn free_slots(&self) -> usize {
        self.tx.capacity()
    }

    /// True once the dispatcher has dropped its receiver.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Bounded FIFO of pending events.
#[derive(Debug)]
pub struct Queue {
    tx: QueueSender,
    rx: mpsc::Receiver<Event>,
}

impl Queue {
    /// Creates a new queue with the given capacity.
    ///
    /// The minimum capacity is 1 (clamped).
    pub fn new(capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel::<Event>(capacity.max(1));
        Self {
            tx: QueueSender { tx },
            rx,
        }
    }

    /// Splits the queue into its writer handle and the single reader.
    pub fn split(self) -> (QueueSender, mpsc::Receiver<Event>) {
        (self.tx, self.rx)
    }
}
