//! History store implementations.

mod jsonl;
mod memory;

pub use jsonl::JsonlHistory;
pub use memory::InMemoryHistory;

use chrono::{SecondsFormat, Utc};
use smpl_core::application::ports::GenerationRecord;

/// Stamp a record with the current time, as every store does on save.
fn stamp(mut record: GenerationRecord) -> GenerationRecord {
    record.saved_at = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
    record
}
