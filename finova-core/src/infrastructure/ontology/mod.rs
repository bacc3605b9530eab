// finova-core/src/infrastructure/ontology/mod.rs

pub mod yaml;

pub use yaml::{InMemoryOntology, YamlOntologyLoader};
