// finova-core/src/domain/knowledge/mod.rs

// The reasoning core, leaf-first:
// resolver -> mapper -> reasoner -> scoring, bundled by application::engine.

pub mod bundle;
pub mod chat;
pub mod explain;
pub mod mapper;
pub mod reasoner;
pub mod resolver;
pub mod scoring;
pub mod vocabulary;

#[cfg(test)]
pub(crate) mod testing;

pub use bundle::ResultBundle;
pub use chat::ChatContext;
pub use explain::{Explanation, Recommendation, explain};
pub use mapper::{MappedAttribute, map_dimensions_and_impacts};
pub use reasoner::{Violation, reason_violations};
pub use resolver::{CriticalAttribute, identify_critical_attributes};
pub use scoring::{DIMENSION_WEIGHTS, DimensionScores, compute_dimension_scores, compute_overall_dqs};
pub use vocabulary::{Dimension, Impact, Issue, Role, Severity};
