//! Session Service - the DSL lifecycle per mode.
//!
//! A session keeps two independent lifecycles, one per [`Mode`]. Each holds
//! the latest generation and the DSL currently on display:
//!
//! ```text
//!             generate              shrink
//!   (none) ───────────► Pristine ───────────► Modified
//!                          ▲                     │
//!                          └───── restore ───────┘
//! ```
//!
//! `expand` replaces the expanded view and leaves the DSL state alone.
//!
//! ## Concurrency
//!
//! State sits behind a `std::sync::Mutex` per mode. The lock is taken to
//! read or write state and is always released before awaiting the model.
//! Every call captures a [`Ticket`] carrying the mode's epoch; `generate`
//! and `restore` bump the epoch, so a response that arrives after either is
//! discarded instead of applied. While a generation is in flight, shrink
//! and expand are refused with `MutationInFlight`.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        services::generation_service::{GenerationResult, GenerationService, OutputSlots},
    },
    domain::{CanonicalSchema, ExportTool, Mode, TokenStats},
    error::SmplResult,
};

/// Whether the displayed DSL is the one generation produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DslState {
    Pristine,
    Modified,
}

/// Which rewrite is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mutation {
    Shrink,
    Expand,
}

/// Proof of which epoch a call started in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub mode: Mode,
    pub epoch: u64,
}

/// How an asynchronous lifecycle call ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Settled {
    /// The result was applied; this is the state afterwards.
    Applied(ModeSnapshot),
    /// A later generate or restore superseded the call.
    Discarded,
}

impl Settled {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Read-only view of one mode's lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeSnapshot {
    pub mode: Mode,
    pub epoch: u64,
    pub state: DslState,
    /// Set when a shrink or expand is in flight.
    pub pending: Option<Mutation>,
    /// A generation for this mode has not settled yet.
    pub generating: bool,
    pub slots: OutputSlots,
    /// The DSL generation produced; unchanged by shrink.
    pub original: String,
    /// `None` after a failed generation.
    pub stats: Option<TokenStats>,
    /// Failure message of the last generation, if it failed.
    pub failure: Option<String>,
}

impl ModeSnapshot {
    pub fn dsl(&self) -> &str {
        &self.slots.dsl
    }
}

/// A generation as held by the session.
#[derive(Debug, Clone)]
struct Current {
    input: String,
    tool: ExportTool,
    schema: Arc<CanonicalSchema>,
    original: String,
    slots: OutputSlots,
    state: DslState,
    stats: TokenStats,
}

impl From<GenerationResult> for Current {
    fn from(result: GenerationResult) -> Self {
        Self {
            original: result.slots.dsl.clone(),
            input: result.input,
            tool: result.tool,
            schema: result.schema,
            slots: result.slots,
            state: DslState::Pristine,
            stats: result.token_stats,
        }
    }
}

#[derive(Debug, Clone)]
enum Outcome {
    Ready(Current),
    Failed(String),
}

#[derive(Debug, Default)]
struct ModeState {
    epoch: u64,
    pending: Option<Mutation>,
    generating: bool,
    outcome: Option<Outcome>,
}

impl ModeState {
    fn ticket(&self, mode: Mode) -> Ticket {
        Ticket {
            mode,
            epoch: self.epoch,
        }
    }

    fn bump(&mut self, mode: Mode) -> Ticket {
        self.epoch += 1;
        self.pending = None;
        self.generating = false;
        self.ticket(mode)
    }

    fn current_mut(&mut self, mode: Mode) -> SmplResult<&mut Current> {
        match &mut self.outcome {
            Some(Outcome::Ready(current)) => Ok(current),
            _ => Err(ApplicationError::NotGenerated { mode }.into()),
        }
    }

    fn snapshot(&self, mode: Mode) -> SmplResult<ModeSnapshot> {
        match &self.outcome {
            Some(Outcome::Ready(current)) => Ok(ModeSnapshot {
                mode,
                epoch: self.epoch,
                state: current.state,
                pending: self.pending,
                generating: self.generating,
                slots: current.slots.clone(),
                original: current.original.clone(),
                stats: Some(current.stats),
                failure: None,
            }),
            Some(Outcome::Failed(message)) => Ok(ModeSnapshot {
                mode,
                epoch: self.epoch,
                state: DslState::Pristine,
                pending: self.pending,
                generating: self.generating,
                slots: OutputSlots::failed(message),
                original: String::new(),
                stats: None,
                failure: Some(message.clone()),
            }),
            None => Err(ApplicationError::NotGenerated { mode }.into()),
        }
    }
}

/// Interactive session over the generation pipeline.
pub struct SessionService {
    generator: Arc<GenerationService>,
    app: Mutex<ModeState>,
    prompt: Mutex<ModeState>,
}

impl SessionService {
    pub fn new(generator: Arc<GenerationService>) -> Self {
        Self {
            generator,
            app: Mutex::new(ModeState::default()),
            prompt: Mutex::new(ModeState::default()),
        }
    }

    /// Generate from freeform text. Replaces this mode's lifecycle.
    ///
    /// On failure every output slot carries the error placeholder and the
    /// error is returned.
    #[instrument(skip_all, fields(mode = %mode, tool = %tool))]
    pub async fn generate(&self, text: &str, mode: Mode, tool: ExportTool) -> SmplResult<Settled> {
        let ticket = {
            let mut state = self.lock(mode)?;
            let ticket = state.bump(mode);
            state.generating = true;
            ticket
        };

        let result = self.generator.generate(text, mode, tool).await;

        let mut state = self.lock(mode)?;
        if state.epoch != ticket.epoch {
            debug!(epoch = ticket.epoch, current = state.epoch, "Discarding superseded generation");
            return Ok(Settled::Discarded);
        }
        state.generating = false;
        match result {
            Ok(result) => {
                state.outcome = Some(Outcome::Ready(result.into()));
                Ok(Settled::Applied(state.snapshot(mode)?))
            }
            Err(e) => {
                state.outcome = Some(Outcome::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    /// Load an already-canonical schema as this mode's generation.
    pub fn load(&self, text: &str, schema: CanonicalSchema, tool: ExportTool) -> SmplResult<ModeSnapshot> {
        let mode = schema.mode();
        let kind = crate::domain::InputKind::detect(text);
        let result = self.generator.assemble(text, kind, schema, tool);

        let mut state = self.lock(mode)?;
        state.bump(mode);
        state.outcome = Some(Outcome::Ready(result.into()));
        state.snapshot(mode)
    }

    /// Ask the model to compress the displayed DSL for `tool`.
    #[instrument(skip_all, fields(mode = %mode, tool = %tool))]
    pub async fn shrink(&self, mode: Mode, tool: ExportTool) -> SmplResult<Settled> {
        let (ticket, dsl) = self.begin(mode, Mutation::Shrink)?;

        let result = self.generator.model().shrink(&dsl, tool).await;

        self.settle(ticket, result, |current, shrunk, generator| {
            current.stats = generator.restat(&current.input, &current.slots.json, &shrunk, current.tool);
            current.slots.dsl = shrunk;
            current.state = DslState::Modified;
            info!(
                tokens = current.stats.dsl.count,
                savings = current.stats.savings.percent,
                "DSL shrunk"
            );
        })
    }

    /// Ask the model to expand the displayed DSL into a long-form prompt.
    #[instrument(skip_all, fields(mode = %mode, tool = %tool))]
    pub async fn expand(&self, mode: Mode, tool: ExportTool) -> SmplResult<Settled> {
        let (ticket, dsl) = self.begin(mode, Mutation::Expand)?;

        let result = self.generator.model().expand(&dsl, tool).await;

        self.settle(ticket, result, |current, expanded, _| {
            current.slots.expanded = expanded;
            info!("Expanded view replaced");
        })
    }

    /// Put the generated DSL back on display.
    #[instrument(skip_all, fields(mode = %mode))]
    pub fn restore(&self, mode: Mode) -> SmplResult<ModeSnapshot> {
        let mut state = self.lock(mode)?;
        let current = state.current_mut(mode)?;
        if current.state != DslState::Modified {
            return Err(ApplicationError::NothingToRestore { mode }.into());
        }

        current.slots.dsl = current.original.clone();
        current.state = DslState::Pristine;
        current.stats = self.generator.restat(
            &current.input,
            &current.slots.json,
            &current.original,
            current.tool,
        );
        state.bump(mode);
        info!("DSL restored");
        state.snapshot(mode)
    }

    pub fn snapshot(&self, mode: Mode) -> SmplResult<ModeSnapshot> {
        self.lock(mode)?.snapshot(mode)
    }

    /// The schema behind the current generation.
    pub fn schema(&self, mode: Mode) -> SmplResult<Arc<CanonicalSchema>> {
        let mut state = self.lock(mode)?;
        Ok(Arc::clone(&state.current_mut(mode)?.schema))
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn lock(&self, mode: Mode) -> SmplResult<MutexGuard<'_, ModeState>> {
        let cell = match mode {
            Mode::App => &self.app,
            Mode::Prompt => &self.prompt,
        };
        cell.lock()
            .map_err(|_| ApplicationError::StateLockError.into())
    }

    /// Mark a mutation in flight and hand back the DSL it works on.
    fn begin(&self, mode: Mode, mutation: Mutation) -> SmplResult<(Ticket, String)> {
        let mut state = self.lock(mode)?;
        if state.generating || state.pending.is_some() {
            return Err(ApplicationError::MutationInFlight { mode }.into());
        }
        let dsl = state.current_mut(mode)?.slots.dsl.clone();
        state.pending = Some(mutation);
        Ok((state.ticket(mode), dsl))
    }

    fn settle<F>(&self, ticket: Ticket, result: SmplResult<String>, apply: F) -> SmplResult<Settled>
    where
        F: FnOnce(&mut Current, String, &GenerationService),
    {
        let mode = ticket.mode;
        let mut state = self.lock(mode)?;
        if state.epoch != ticket.epoch {
            debug!(epoch = ticket.epoch, current = state.epoch, "Discarding stale rewrite");
            return Ok(Settled::Discarded);
        }
        state.pending = None;

        let text = result?;
        apply(state.current_mut(mode)?, text, self.generator.as_ref());
        Ok(Settled::Applied(state.snapshot(mode)?))
    }
}
