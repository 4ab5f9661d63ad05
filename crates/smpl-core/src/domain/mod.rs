//! Core domain layer for SMPL.
//!
//! This module contains the canonical schemas and every deterministic
//! transformation applied to them. All I/O (the language model, the exact
//! tokenizer, history storage) is reached through ports defined in the
//! application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Pure converters**: Same schema in, byte-identical text out
//! - **Immutable entities**: All domain objects are Clone + PartialEq

pub mod enhancement;
pub mod entities;
pub mod error;
pub mod export;
pub mod input;
pub mod registry;
pub mod render;
pub mod tokens;
pub mod value_objects;

mod validation;

pub use entities::{
    Action, AppSchema, CanonicalSchema, DataModel, Entity, Field, IMPLICIT_FIELD_TYPE, Page,
    PromptSchema, Trigger,
};
pub use enhancement::Enhancement;
pub use error::{DomainError, ErrorCategory};
pub use export::{
    ExportPrompts, synthesize, synthesize_all, synthesize_all_prompt, synthesize_prompt,
};
pub use input::InputKind;
pub use registry::{TOOL_REGISTRY, ToolDef};
pub use tokens::{TokenCount, TokenSavings, TokenStats};
pub use validation::SchemaValidator;
pub use value_objects::{
    CompressionStrategy, ExportStyle, ExportTool, Mode, Platform, TokenizerFamily,
};
