// finova-core/src/application/mod.rs

pub mod analysis;
pub mod chat;
pub mod clean;
pub mod engine;
pub mod health;

// --- RE-EXPORTS (FACADE PATTERN) ---
// The CLI does `use finova_core::application::{analyze_dataset, check_health};`
// without knowing the file layout.

pub use analysis::{AnalysisReport, AnalysisRequest, DatasetSource, analyze_dataset};
pub use chat::{ChatSubject, ask_about_analysis};
pub use clean::clean_project;
pub use engine::{KnowledgeEngine, run_knowledge_layer};
pub use health::{HealthStatus, check_health};
