// src/domain/ports/mod.rs

pub mod events;
pub mod ontology;

pub use events::{EventSink, PipelineEvent, RecordingSink, TracingSink};
pub use ontology::{EntityRef, OntologyError, OntologyLoader, OntologyQuery, OntologyStore};
