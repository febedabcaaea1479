//! # Emitter: the public face of the event bus.
//!
//! The [`Emitter`] owns the handler [`Registry`], the writer side of the event
//! queue and the dispatcher task. It is an explicitly constructed object;
//! share it as `Arc<Emitter>` with the parts of the process that need it, or
//! use the process-wide instance from [`Emitter::init_global`].
//!
//! ## High-level architecture
//! ```text
//! subscribe*/unsubscribe* ──► Registry (RwLock)
//!                                 ▲
//! emit(type, args)                │ snapshot
//!   ├─ stopped? ─► debug!, drop   │
//!   ├─ writer limit set and no permit? ─► warn!, drop
//!   └─ spawn writer ──► Queue (bounded, 300) ──► Dispatcher ──► spawn_isolated × N
//!
//! stop()
//!   └─► cancel token ─► await dispatcher exit ─► Stopped (terminal)
//! ```
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use evbus::{args, Arg, Args, Emitter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), evbus::BusError> {
//!     let bus = Emitter::builder().build()?;
//!     let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
//!
//!     let id = bus.subscribe("greet", move |args: Args| {
//!         let name = args.first().and_then(Arg::as_str).unwrap_or("stranger");
//!         let _ = tx.send(format!("hello, {name}"));
//!     });
//!
//!     bus.emit("greet", args!["ferris"]);
//!     let got = tokio::time::timeout(Duration::from_secs(1), rx.recv()).await.unwrap();
//!     assert_eq!(got.as_deref(), Some("hello, ferris"));
//!
//!     bus.unsubscribe("greet", &id);
//!     bus.stop().await;
//!     Ok(())
//! }
//! ```

use std::future::Future;
use std::sync::{Arc, OnceLock};

use tokio::sync::{Mutex, Semaphore};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::{
    Config, EmitterBuilder,
    dispatcher::{DispatcherState, StateCell},
    registry::Registry,
};
use crate::error::BusError;
use crate::events::{Args, Event, EventType, QueueSender};
use crate::handlers::{AsyncHandlerFn, HandlerFn, HandlerId, HandlerRef};

/// Process-wide instance, see [`Emitter::init_global`].
static GLOBAL: OnceLock<Arc<Emitter>> = OnceLock::new();

/// In-process publish/subscribe event bus.
pub struct Emitter {
    cfg: Config,
    registry: Arc<Registry>,
    queue: QueueSender,
    writers: Option<Arc<Semaphore>>,
    stop_token: CancellationToken,
    state: Arc<StateCell>,
    dispatcher: Mutex<Option<JoinHandle<()>>>,
    rt: tokio::runtime::Handle,
}

impl Emitter {
    /// Returns a builder with the default [`Config`].
    ///
    /// This is the only way to construct an emitter.
    pub fn builder() -> EmitterBuilder {
        EmitterBuilder::new()
    }

    pub(super) fn new_internal(
        cfg: Config,
        registry: Arc<Registry>,
        queue: QueueSender,
        stop_token: CancellationToken,
        state: Arc<StateCell>,
        dispatcher: JoinHandle<()>,
        rt: tokio::runtime::Handle,
    ) -> Self {
        let writers = cfg.writer_limit().map(Semaphore::new).map(Arc::new);
        Self {
            cfg,
            registry,
            queue,
            writers,
            stop_token,
            state,
            dispatcher: Mutex::new(Some(dispatcher)),
            rt,
        }
    }

    /// Initializes the process-wide emitter exactly once.
    ///
    /// Later calls are no-ops that return the existing instance and ignore `cfg`.
    pub fn init_global(cfg: Config) -> Result<&'static Arc<Emitter>, BusError> {
        if let Some(existing) = GLOBAL.get() {
            debug!("global emitter already initialized");
            return Ok(existing);
        }
        let fresh = Self::builder().with_config(cfg).build()?;
        // A concurrent initializer may win; the loser is dropped and stops its dispatcher.
        Ok(GLOBAL.get_or_init(|| fresh))
    }

    /// Returns the process-wide emitter if [`init_global`](Self::init_global) ran.
    pub fn global() -> Option<&'static Arc<Emitter>> {
        GLOBAL.get()
    }

    // ---------------------------
    // Subscriptions
    // ---------------------------

    /// Registers a synchronous closure for `event_type`.
    ///
    /// Returns the id to pass to [`unsubscribe`](Self::unsubscribe).
    pub fn subscribe<F>(&self, event_type: impl Into<EventType>, f: F) -> HandlerId
    where
        F: Fn(Args) + Send + Sync + 'static,
    {
        self.subscribe_handler(event_type, HandlerFn::arc(f))
    }

    /// Registers a closure returning a future for `event_type`.
    pub fn subscribe_async<F, Fut>(&self, event_type: impl Into<EventType>, f: F) -> HandlerId
    where
        F: Fn(Args) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.subscribe_handler(event_type, AsyncHandlerFn::arc(f))
    }

    /// Registers a [`Handler`](crate::Handler) trait object for `event_type`.
    pub fn subscribe_handler(
        &self,
        event_type: impl Into<EventType>,
        handler: HandlerRef,
    ) -> HandlerId {
        self.registry.subscribe(event_type.into(), handler)
    }

    /// Registers one synchronous closure under several event types with a single id.
    pub fn subscribe_multiple<I, F>(&self, event_types: I, f: F) -> HandlerId
    where
        I: IntoIterator,
        I::Item: Into<EventType>,
        F: Fn(Args) + Send + Sync + 'static,
    {
        self.subscribe_multiple_handler(event_types, HandlerFn::arc(f))
    }

    /// Registers one handler under several event types with a single id.
    pub fn subscribe_multiple_handler<I>(&self, event_types: I, handler: HandlerRef) -> HandlerId
    where
        I: IntoIterator,
        I::Item: Into<EventType>,
    {
        self.registry
            .subscribe_multiple(event_types.into_iter().map(Into::into), handler)
    }

    /// Removes handler `id` from `event_type`.
    ///
    /// Unknown types or ids are a no-op. Returns `true` if a handler was removed.
    pub fn unsubscribe(&self, event_type: impl AsRef<str>, id: &HandlerId) -> bool {
        self.registry.unsubscribe(event_type.as_ref(), id.as_str())
    }

    /// Removes handler `id` from every listed event type.
    ///
    /// Returns the number of registrations removed.
    pub fn unsubscribe_multiple<I>(&self, event_types: I, id: &HandlerId) -> usize
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.registry.unsubscribe_multiple(event_types, id.as_str())
    }

    // ---------------------------
    // Publishing
    // ---------------------------

    /// Emits an event without blocking the caller.
    ///
    /// The write into the bounded queue is delegated to a spawned writer task,
    /// so this returns before the event is queued. The event is dropped (and
    /// logged) when the bus is stopped, or when a writer limit is configured
    /// and that many writers are already waiting for queue space.
    pub fn emit(&self, event_type: impl Into<EventType>, args: impl Into<Args>) {
        let ev = Event::new(event_type, args);

        if self.stop_token.is_cancelled() || self.queue.is_closed() {
            debug!(event_type = %ev.event_type, seq = ev.seq, "emit after stop; dropped");
            return;
        }

        let permit = match &self.writers {
            Some(sem) => match Arc::clone(sem).try_acquire_owned() {
                Ok(p) => Some(p),
                Err(_) => {
                    warn!(
                        event_type = %ev.event_type,
                        seq = ev.seq,
                        limit = self.cfg.max_pending_writers,
                        queue_free = self.queue.free_slots(),
                        "too many pending writers; event dropped"
                    );
                    return;
                }
            },
            None => None,
        };

        debug!(event_type = %ev.event_type, seq = ev.seq, "emitting event");
        let tx = self.queue.clone();
        self.rt.spawn(async move {
            let _permit = permit;
            if let Err(ev) = tx.send(ev).await {
                debug!(event_type = %ev.event_type, seq = ev.seq, "dispatcher gone; event dropped");
            }
        });
    }

    /// Enqueues an event inline, suspending while the queue is full.
    ///
    /// Unlike [`emit`](Self::emit), the event is in the queue when this returns `Ok`.
    pub async fn emit_wait(
        &self,
        event_type: impl Into<EventType>,
        args: impl Into<Args>,
    ) -> Result<(), BusError> {
        let ev = Event::new(event_type, args);
        if self.stop_token.is_cancelled() {
            return Err(BusError::Stopped {
                event_type: ev.event_type,
            });
        }
        self.queue.send(ev).await.map_err(|ev| BusError::Stopped {
            event_type: ev.event_type,
        })
    }

    // ---------------------------
    // Lifecycle
    // ---------------------------

    /// Stops the dispatcher and waits until its loop has exited.
    ///
    /// Queued events are discarded; handler invocations already spawned keep
    /// running. Calling `stop` again is a no-op.
    pub async fn stop(&self) {
        self.stop_token.cancel();

        let mut slot = self.dispatcher.lock().await;
        if let Some(handle) = slot.take() {
            if let Err(e) = handle.await {
                error!(error = %e, "dispatcher task failed");
            }
            info!("event bus stopped");
        }
    }

    /// Signals the dispatcher to stop without waiting.
    ///
    /// Usable from synchronous code; pair with [`stop`](Self::stop) to wait.
    pub fn cancel(&self) {
        self.stop_token.cancel();
    }

    /// Current dispatcher state.
    pub fn state(&self) -> DispatcherState {
        self.state.get()
    }

    /// True until `stop` or `cancel` is called.
    pub fn is_running(&self) -> bool {
        !self.stop_token.is_cancelled() && self.state.get() != DispatcherState::Stopped
    }

    // ---------------------------
    // Introspection
    // ---------------------------

    /// Number of handlers registered for `event_type`.
    pub fn handler_count(&self, event_type: impl AsRef<str>) -> usize {
        self.registry.handler_count(event_type.as_ref())
    }

    /// Sorted list of event types that have at least one handler.
    pub fn event_types(&self) -> Vec<EventType> {
        self.registry.event_types()
    }

    /// Configuration this emitter was built with.
    pub fn config(&self) -> &Config {
        &self.cfg
    }
}

impl Drop for Emitter {
    fn drop(&mut self) {
        self.stop_token.cancel();
    }
}
