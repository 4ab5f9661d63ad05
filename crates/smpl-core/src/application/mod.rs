//! Application layer for SMPL.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GenerationService, SessionService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    DslState, Enhanced, GenerationResult, GenerationService, ModeSnapshot, OutputSlots,
    SessionService, Settled, TokenAccountant,
};

// Re-export port traits (for adapter implementation)
pub use ports::{
    EnhanceRequest, ExactTokenizer, GenerationRecord, HistoryStore, LanguageModel,
    NormalizeRequest, TokenizerError,
};

pub use error::ApplicationError;
