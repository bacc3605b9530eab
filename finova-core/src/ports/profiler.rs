// finova-core/src/ports/profiler.rs

// What the analysis needs from a profiler, without knowing how it's done
// (DuckDB today, anything that can count nulls tomorrow).

use crate::domain::profile::DatasetProfile;
use crate::error::FinovaError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DatasetMetadata {
    pub rows: u64,
    pub columns: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfiledDataset {
    pub metadata: DatasetMetadata,
    pub profile: DatasetProfile,
}

#[async_trait]
pub trait Profiler: Send + Sync {
    /// Per-column statistics of a CSV file.
    async fn profile(&self, path: &Path) -> Result<ProfiledDataset, FinovaError>;

    fn engine_name(&self) -> &str;
}
