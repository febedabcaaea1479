use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::{
    Config,
    dispatcher::{Dispatcher, StateCell},
    emitter::Emitter,
    registry::Registry,
};
use crate::{
    error::BusError,
    events::Queue,
    handlers::{IdSource, UuidSource},
};

/// Builder for constructing an [`Emitter`], obtained from [`Emitter::builder`].
pub struct EmitterBuilder {
    cfg: Config,
    ids: Arc<dyn IdSource>,
    rt: Option<tokio::runtime::Handle>,
}

impl EmitterBuilder {
    pub(super) fn new() -> Self {
        Self {
            cfg: Config::default(),
            ids: Arc::new(UuidSource),
            rt: None,
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: Config) -> Self {
        self.cfg = cfg;
        self
    }

    /// Sets the identifier source used for handler ids (default: [`UuidSource`]).
    pub fn with_id_source(mut self, ids: Arc<dyn IdSource>) -> Self {
        self.ids = ids;
        self
    }

    /// Runs the dispatcher and writer tasks on `rt` instead of the current runtime.
    ///
    /// Lets an emitter be built from a thread that is not inside a runtime.
    pub fn with_runtime(mut self, rt: tokio::runtime::Handle) -> Self {
        self.rt = Some(rt);
        self
    }

    /// Builds the emitter and starts its dispatcher.
    ///
    /// Initializes, in order:
    /// - the registry
    /// - the bounded queue (`Config::queue_capacity`, min 1)
    /// - the dispatcher task
    /// - the writer limit (`Config::max_pending_writers`)
    ///
    /// Fails with [`BusError::NoRuntime`] when no runtime was given and the
    /// caller is not inside one.
    pub fn build(self) -> Result<Arc<Emitter>, BusError> {
        let rt = match self.rt {
            Some(rt) => rt,
            None => tokio::runtime::Handle::try_current().map_err(|_| BusError::NoRuntime)?,
        };

        let registry = Arc::new(Registry::new(self.ids));
        let (tx, rx) = Queue::new(self.cfg.queue_capacity_clamped()).split();
        let stop_token = CancellationToken::new();
        let state = Arc::new(StateCell::new());

        let dispatcher = Dispatcher::new(
            Arc::clone(&registry),
            rx,
            stop_token.clone(),
            Arc::clone(&state),
        )
        .spawn(&rt);

        Ok(Arc::new(Emitter::new_internal(
            self.cfg, registry, tx, stop_token, state, dispatcher, rt,
        )))
    }
}
