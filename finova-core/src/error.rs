// finova-core/src/error.rs

use crate::domain::error::DomainError;
use crate::domain::ports::ontology::OntologyError;
use crate::infrastructure::error::InfrastructureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinovaError {
    // --- FATAL: the knowledge model could not be acquired ---
    #[error("Ontology unavailable: {0}")]
    OntologyUnavailable(#[source] OntologyError),

    // --- ERREURS DU DOMAINE ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- ERREURS D'INFRASTRUCTURE (IO, Parsing, DuckDB) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- ERREURS APPLICATIVES ---
    #[error("Unsafe path traversal detected: {0}")]
    UnsafePath(String),

    #[error("No analysis recorded yet; run 'finova analyze' first or pass a report")]
    NoAnalysisRecorded,
}

impl FinovaError {
    /// True when the run was refused because the ontology could not be loaded.
    /// Health checks key off this.
    pub fn is_ontology_unavailable(&self) -> bool {
        matches!(self, FinovaError::OntologyUnavailable(_))
    }
}

impl From<OntologyError> for FinovaError {
    fn from(err: OntologyError) -> Self {
        FinovaError::OntologyUnavailable(err)
    }
}

// Manual implementation to avoid duplicate enum variant but keep ergonomics
impl From<std::io::Error> for FinovaError {
    fn from(err: std::io::Error) -> Self {
        FinovaError::Infrastructure(InfrastructureError::Io(err))
    }
}
