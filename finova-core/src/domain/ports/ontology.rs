// finova-core/src/domain/ports/ontology.rs

// Read-only view over the knowledge model. The reasoning stages only ever
// see this trait: entity lookup, then role -> dimension -> impact edges.

use crate::domain::knowledge::vocabulary::{Dimension, Impact, Role};
use miette::Diagnostic;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// One lookup against the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OntologyQuery {
    /// Glob over entity IRIs (`*` matches any run of characters).
    Iri(String),
    /// Exact label match.
    Label(String),
}

impl fmt::Display for OntologyQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OntologyQuery::Iri(pattern) => write!(f, "iri={}", pattern),
            OntologyQuery::Label(label) => write!(f, "label={}", label),
        }
    }
}

/// Transient handle on an entity of the store. Only valid for the run that
/// obtained it; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityRef {
    iri: String,
}

impl EntityRef {
    pub fn new(iri: impl Into<String>) -> Self {
        Self { iri: iri.into() }
    }

    pub fn iri(&self) -> &str {
        &self.iri
    }
}

#[derive(Error, Debug, Diagnostic)]
pub enum OntologyError {
    #[error("Ontology not found at '{0}'")]
    #[diagnostic(
        code(finova::ontology::missing),
        help("Set 'ontology-path' in finova.yaml or pass --ontology.")
    )]
    NotFound(PathBuf),

    #[error("Failed to read ontology at '{path}': {source}")]
    #[diagnostic(code(finova::ontology::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse ontology at '{path}': {reason}")]
    #[diagnostic(
        code(finova::ontology::parse),
        help("Check the YAML layout: base_iri, entities, roles, dimensions.")
    )]
    Parse { path: PathBuf, reason: String },

    #[error("Invalid ontology: {0}")]
    #[diagnostic(code(finova::ontology::invalid))]
    Invalid(String),

    #[error("Invalid search pattern '{pattern}': {reason}")]
    #[diagnostic(code(finova::ontology::pattern))]
    InvalidPattern { pattern: String, reason: String },
}

pub trait OntologyStore: Send + Sync {
    /// First entity matching the query, if any.
    fn search_one(&self, query: &OntologyQuery) -> Result<Option<EntityRef>, OntologyError>;

    fn roles_of(&self, entity: &EntityRef) -> Vec<Role>;

    fn dimensions_of(&self, role: &Role) -> Vec<Dimension>;

    fn impacts_of(&self, dimension: &Dimension) -> Vec<Impact>;
}

/// Acquires a store. Failure here is fatal for the whole run.
pub trait OntologyLoader: Send + Sync {
    type Store: OntologyStore;

    fn load(&self) -> Result<Self::Store, OntologyError>;
}
