//! In-memory history, for tests and for runs with history disabled on disk.

use std::sync::{Arc, RwLock};

use smpl_core::{
    application::{
        ApplicationError,
        ports::{GenerationRecord, HistoryStore},
    },
    error::SmplResult,
};

/// Thread-safe in-memory history.
#[derive(Clone, Default)]
pub struct InMemoryHistory {
    inner: Arc<RwLock<Vec<GenerationRecord>>>,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.inner.read().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every record.
    pub fn clear(&self) -> SmplResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error())?;
        inner.clear();
        Ok(())
    }
}

impl HistoryStore for InMemoryHistory {
    fn save(&self, record: GenerationRecord) -> SmplResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error())?;
        inner.push(super::stamp(record));
        Ok(())
    }

    fn list(&self, limit: usize) -> SmplResult<Vec<GenerationRecord>> {
        let inner = self.inner.read().map_err(|_| lock_error())?;
        Ok(inner.iter().rev().take(limit).cloned().collect())
    }
}

fn lock_error() -> ApplicationError {
    ApplicationError::history("history lock poisoned")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use smpl_core::domain::{InputKind, Mode};
    use uuid::Uuid;

    fn record(input: &str) -> GenerationRecord {
        GenerationRecord {
            id: Uuid::new_v4(),
            input_text: input.to_string(),
            input_type: InputKind::Text,
            mode: Mode::App,
            json: json!({"app_name": input}),
            dsl: format!("APP({input}){{\n  platform: web\n}}"),
            expanded: format!("# {input}"),
            export_prompts: Default::default(),
            token_count: 8,
            quality_score: 42.5,
            saved: false,
            saved_at: None,
        }
    }

    #[test]
    fn list_is_newest_first_and_limited() {
        let history = InMemoryHistory::new();
        for name in ["a", "b", "c"] {
            history.save(record(name)).unwrap();
        }

        let listed = history.list(2).unwrap();
        let inputs: Vec<_> = listed.iter().map(|r| r.input_text.as_str()).collect();
        assert_eq!(inputs, vec!["c", "b"]);
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn save_stamps_time() {
        let history = InMemoryHistory::new();
        history.save(record("a")).unwrap();
        let saved = &history.list(1).unwrap()[0];
        assert!(saved.saved_at.as_deref().is_some_and(|t| t.ends_with('Z')));
    }

    #[test]
    fn clones_share_records() {
        let history = InMemoryHistory::new();
        let other = history.clone();
        history.save(record("a")).unwrap();
        assert_eq!(other.len(), 1);
        other.clear().unwrap();
        assert!(history.is_empty());
    }
}
