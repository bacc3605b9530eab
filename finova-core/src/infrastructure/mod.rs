// finova-core/src/infrastructure/mod.rs

pub mod adapters;
pub mod config;
pub mod error;
pub mod fs;
pub mod history;
pub mod ontology;

pub use adapters::duckdb::DuckDBProfiler;
pub use history::JsonHistoryStore;
pub use ontology::{InMemoryOntology, YamlOntologyLoader};
