//! Format converters.
//!
//! Every function here is pure and total: same schema in, byte-identical text
//! out. No converter reorders, deduplicates or drops elements.

mod dsl;
mod json;
mod markdown;

pub use dsl::{to_dsl, to_prompt_dsl};
pub use json::{to_canonical_json, to_prompt_json};
pub use markdown::{to_expanded_markdown, to_prompt_markdown};
