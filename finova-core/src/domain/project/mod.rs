// finova-core/src/domain/project/mod.rs

pub mod configuration;
pub use configuration::{AnalysisConfig, HistoryConfig, ProjectConfig};
