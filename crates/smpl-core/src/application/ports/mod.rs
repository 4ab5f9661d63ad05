//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `smpl-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `LanguageModel`: normalization, DSL rewriting and enhancement
//!   - `ExactTokenizer`: BPE token counting
//!   - `HistoryStore`: generation history
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    EnhanceRequest, ExactTokenizer, GenerationRecord, HistoryStore, LanguageModel,
    NormalizeRequest, TokenizerError,
};

#[cfg(test)]
pub use output::{MockExactTokenizer, MockHistoryStore, MockLanguageModel};
