use serde::Serialize;
use tracing::error;

use crate::domain::entities::{AppSchema, PromptSchema};

/// Pretty-printed canonical JSON (two-space indent, declaration key order).
pub fn to_canonical_json(schema: &AppSchema) -> String {
    pretty(schema)
}

pub fn to_prompt_json(schema: &PromptSchema) -> String {
    pretty(schema)
}

fn pretty<T: Serialize>(value: &T) -> String {
    // Schemas contain only strings, bools, sequences and opaque JSON values,
    // none of which can fail to serialize.
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        error!(error = %e, "Canonical JSON serialization failed");
        "{}".to_string()
    })
}
