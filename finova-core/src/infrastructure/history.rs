// finova-core/src/infrastructure/history.rs

use crate::error::FinovaError;
use crate::infrastructure::fs::{read_json, write_json};
use crate::ports::history::{AnalysisRecord, HistoryStore};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const HISTORY_FILE: &str = "history.json";

/// Past analyses in one JSON array, newest first.
pub struct JsonHistoryStore {
    path: PathBuf,
    max_entries: usize,
}

impl JsonHistoryStore {
    pub fn new(path: impl Into<PathBuf>, max_entries: usize) -> Self {
        Self {
            path: path.into(),
            max_entries: max_entries.max(1),
        }
    }

    /// `<target_dir>/history.json`
    pub fn in_target(target_dir: &Path, max_entries: usize) -> Self {
        Self::new(target_dir.join(HISTORY_FILE), max_entries)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_records(&self) -> Vec<AnalysisRecord> {
        if !self.path.exists() {
            return Vec::new();
        }
        match read_json(&self.path) {
            Ok(records) => records,
            Err(e) => {
                warn!(path = ?self.path, error = %e, "Unreadable history, starting afresh");
                Vec::new()
            }
        }
    }
}

impl HistoryStore for JsonHistoryStore {
    fn append(&self, record: AnalysisRecord) -> Result<(), FinovaError> {
        let mut records = self.read_records();
        records.insert(0, record);
        records.truncate(self.max_entries);

        write_json(&self.path, &records)?;
        debug!(path = ?self.path, entries = records.len(), "History updated");
        Ok(())
    }

    fn list(&self) -> Result<Vec<AnalysisRecord>, FinovaError> {
        Ok(self.read_records())
    }
}
