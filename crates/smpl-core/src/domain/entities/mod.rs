pub mod app_schema;
pub mod canonical;
pub mod lenient;
pub mod prompt_schema;

pub use app_schema::{Action, AppSchema, DataModel, Field, IMPLICIT_FIELD_TYPE, Page, Trigger};
pub use canonical::CanonicalSchema;
pub use prompt_schema::{Entity, PromptSchema};
