// finova-core/src/ports/history.rs

use crate::domain::knowledge::explain::Recommendation;
use crate::domain::knowledge::{ChatContext, DimensionScores, Violation};
use crate::error::FinovaError;
use crate::ports::profiler::DatasetMetadata;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One past analysis, as kept by the history store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub dataset_name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<DatasetMetadata>,
    pub overall_dqs: f64,
    pub dimension_scores: DimensionScores,
    #[serde(default)]
    pub violations: Vec<Violation>,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<Recommendation>,
}

impl AnalysisRecord {
    pub fn chat_context(&self) -> ChatContext<'_> {
        ChatContext {
            overall_dqs: self.overall_dqs,
            rows: self.dataset.map(|d| d.rows),
            columns: self.dataset.map(|d| d.columns),
            violations: &self.violations,
            profile: None,
        }
    }
}

pub trait HistoryStore: Send + Sync {
    /// Stores a record; the newest record comes first in `list`.
    fn append(&self, record: AnalysisRecord) -> Result<(), FinovaError>;

    fn list(&self) -> Result<Vec<AnalysisRecord>, FinovaError>;
}
