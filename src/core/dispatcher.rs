//! # Dispatcher: the single loop draining the event queue.
//!
//! ## Architecture
//! ```text
//! loop {
//!   select! (biased) {
//!     stop token cancelled ─► break
//!     rx.recv() ─► None (all writers gone) ─► break
//!              └─► Some(event)
//!                    ├─ registry.snapshot(type) == None ─► debug!, drop event
//!                    └─ for (id, handler) in snapshot:
//!                          runner::spawn_isolated(..)     (not awaited)
//! }
//! rx closed + dropped ─► pending and future writes fail fast
//! ```
//!
//! ## Rules
//! - Events are handled in dequeue order; fan-out does not wait for handlers.
//! - The stop signal wins over a ready event (biased select).
//! - On exit the queue is **not** drained and running handlers are left alone.
//! - `Idle → Running → Stopped`; `Stopped` is terminal.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::core::{registry::Registry, runner};
use crate::events::Event;

/// Lifecycle state of the dispatcher loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatcherState {
    /// Constructed, loop not yet polled.
    Idle,
    /// Loop is draining the queue.
    Running,
    /// Loop has exited; terminal.
    Stopped,
}

impl DispatcherState {
    fn from_u8(v: u8) -> Self {
        match v {
            0 => DispatcherState::Idle,
            1 => DispatcherState::Running,
            _ => DispatcherState::Stopped,
        }
    }
}

/// Shared, lock-free view of the dispatcher state.
#[derive(Debug)]
pub struct StateCell(AtomicU8);

impl StateCell {
    pub fn new() -> Self {
        Self(AtomicU8::new(DispatcherState::Idle as u8))
    }

    pub fn get(&self) -> DispatcherState {
        DispatcherState::from_u8(self.0.load(Ordering::Acquire))
    }

    fn set(&self, state: DispatcherState) {
        self.0.store(state as u8, Ordering::Release);
    }
}

/// Single consumer of the event queue.
pub struct Dispatcher {
    registry: Arc<Registry>,
    rx: mpsc::Receiver<Event>,
    stop: CancellationToken,
    state: Arc<StateCell>,
}

impl Dispatcher {
    pub fn new(
        registry: Arc<Registry>,
        rx: mpsc::Receiver<Event>,
        stop: CancellationToken,
        state: Arc<StateCell>,
    ) -> Self {
        Self {
            registry,
            rx,
            stop,
            state,
        }
    }

    /// Spawns the loop on `rt`.
    ///
    /// Call once per emitter.
    pub fn spawn(self, rt: &tokio::runtime::Handle) -> JoinHandle<()> {
        rt.spawn(self.run())
    }

    async fn run(mut self) {
        // A stop that lands before the first poll still wins.
        if !self.stop.is_cancelled() {
            self.state.set(DispatcherState::Running);
            debug!("dispatcher running");
        }

        loop {
            tokio::select! {
                biased;
                _ = self.stop.cancelled() => break,
                msg = self.rx.recv() => match msg {
                    Some(ev) => {
                        self.dispatch(ev);
                    }
                    None => {
                        debug!("event queue closed; all writers gone");
                        break;
                    }
                }
            }
        }

        self.rx.close();
        self.state.set(DispatcherState::Stopped);
        info!("dispatcher stopped");
    }

    /// Fans one event out to every handler registered for its type.
    ///
    /// Returns the number of invocations spawned.
    fn dispatch(&self, ev: Event) -> usize {
        let Some(handlers) = self.registry.snapshot(ev.event_type.as_str()) else {
            debug!(
                event_type = %ev.event_type,
                seq = ev.seq,
                "no handler registered for event type; dropped"
            );
            return 0;
        };

        let n = handlers.len();
        for (id, handler) in handlers {
            let _ = runner::spawn_isolated(
                ev.event_type.clone(),
                ev.seq,
                id,
                handler,
                ev.args.clone(),
            );
        }
        n
    }
}
