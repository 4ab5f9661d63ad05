//! SMPL Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for SMPL, which
//! turns freeform descriptions into a canonical schema, a compact DSL and
//! tool-specific export prompts, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             smpl-cli (CLI)              │
//! │       (Implements Driving Ports)        │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │          Application Services           │
//! │  (GenerationService, SessionService)    │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │ (LanguageModel, ExactTokenizer, History)│
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     smpl-adapters (Infrastructure)      │
//! │ (OpenAiClient, TiktokenCounter, Jsonl)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (CanonicalSchema, DSL, Exports, Tokens)│
//! │         No External Dependencies        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use smpl_core::prelude::*;
//!
//! # async fn run(model: Arc<dyn LanguageModel>) -> SmplResult<()> {
//! let service = GenerationService::new(model, TokenAccountant::approximate_only());
//! let result = service
//!     .generate("a todo app with due dates", Mode::App, ExportTool::Cursor)
//!     .await?;
//!
//! println!("{}", result.slots.dsl);
//! println!("{}", result.token_stats.report());
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        DslState, Enhanced, GenerationResult, GenerationService, ModeSnapshot, OutputSlots,
        SessionService, Settled, TokenAccountant,
        ports::{ExactTokenizer, GenerationRecord, HistoryStore, LanguageModel, TokenizerError},
    };
    pub use crate::domain::{
        AppSchema, CanonicalSchema, Enhancement, ExportTool, InputKind, Mode, Platform,
        PromptSchema, TokenCount, TokenStats, TokenizerFamily,
    };
    pub use crate::error::{SmplError, SmplResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
