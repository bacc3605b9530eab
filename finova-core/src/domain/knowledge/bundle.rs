// finova-core/src/domain/knowledge/bundle.rs

use crate::domain::knowledge::reasoner::Violation;
use crate::domain::knowledge::scoring::DimensionScores;
use serde::{Deserialize, Serialize};

pub const SUMMARY_CLEAN: &str = "No violations detected; dataset passes current knowledge-layer rules.";
pub const SUMMARY_VIOLATIONS: &str = "Violations detected; inspect violations for details.";

/// Output of one knowledge-layer run. Owned by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultBundle {
    #[serde(alias = "reasoned_stats")]
    pub violations: Vec<Violation>,
    pub summary: String,
    pub overall_dqs: f64,
    pub dimension_scores: DimensionScores,
    /// Profile attributes that resolved to an ontology entity, critical or not.
    /// Zero means the dataset is unrelated to the ontology's domain.
    #[serde(default)]
    pub matched_attributes: usize,
}

impl ResultBundle {
    pub fn summary_for(violations: &[Violation]) -> &'static str {
        if violations.is_empty() {
            SUMMARY_CLEAN
        } else {
            SUMMARY_VIOLATIONS
        }
    }

    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }
}

impl Default for ResultBundle {
    fn default() -> Self {
        Self {
            violations: Vec::new(),
            summary: SUMMARY_CLEAN.to_string(),
            overall_dqs: 1.0,
            dimension_scores: DimensionScores::default(),
            matched_attributes: 0,
        }
    }
}
