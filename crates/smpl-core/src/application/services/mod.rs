//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "generate from freeform input" or
//! "shrink the displayed DSL" or "enhance a description".

pub mod generation_service;
pub mod session;
pub mod token_accountant;

pub use generation_service::{Enhanced, GenerationResult, GenerationService, OutputSlots};
pub use session::{DslState, ModeSnapshot, Mutation, SessionService, Settled, Ticket};
pub use token_accountant::TokenAccountant;
