// finova-core/src/ports/mod.rs

pub mod history;
pub mod profiler;

pub use history::{AnalysisRecord, HistoryStore};
pub use profiler::{DatasetMetadata, ProfiledDataset, Profiler};
