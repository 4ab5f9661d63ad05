//! Infrastructure adapters for SMPL.
//!
//! This crate implements the ports defined in `smpl-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod history;
pub mod llm;
pub mod tokenizer;

// Re-export commonly used adapters
pub use history::{InMemoryHistory, JsonlHistory};
pub use llm::{OpenAiClient, OpenAiConfig, RateLimiter, ScriptedModel};
pub use tokenizer::TiktokenCounter;
