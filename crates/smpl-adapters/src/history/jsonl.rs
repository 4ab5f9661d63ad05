//! Append-only JSON Lines history file.

use std::{
    fs::{self, OpenOptions},
    io::{BufRead, BufReader, Write},
    path::{Path, PathBuf},
    sync::Mutex,
};

use smpl_core::{
    application::{
        ApplicationError,
        ports::{GenerationRecord, HistoryStore},
    },
    error::SmplResult,
};
use tracing::{debug, warn};

/// One record per line. Unreadable lines are skipped on read.
#[derive(Debug)]
pub struct JsonlHistory {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for JsonlHistory {
    fn save(&self, record: GenerationRecord) -> SmplResult<()> {
        let record = super::stamp(record);
        let mut line = serde_json::to_string(&record)
            .map_err(|e| io_error(&self.path, "encode record", e))?;
        line.push('\n');

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| ApplicationError::history("history lock poisoned"))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| io_error(parent, "create directory", e))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| io_error(&self.path, "open", e))?;
        file.write_all(line.as_bytes())
            .map_err(|e| io_error(&self.path, "append to", e))?;

        debug!(path = %self.path.display(), id = %record.id, "History record appended");
        Ok(())
    }

    fn list(&self, limit: usize) -> SmplResult<Vec<GenerationRecord>> {
        let file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error(&self.path, "open", e).into()),
        };

        let mut records = Vec::new();
        for (number, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| io_error(&self.path, "read", e))?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<GenerationRecord>(&line) {
                Ok(record) => records.push(record),
                Err(e) => warn!(line = number + 1, error = %e, "Skipping unreadable history line"),
            }
        }

        records.reverse();
        records.truncate(limit);
        Ok(records)
    }
}

fn io_error(path: &Path, operation: &str, e: impl std::fmt::Display) -> ApplicationError {
    ApplicationError::history(format!("Failed to {operation} {}: {e}", path.display()))
}
