// finova-core/src/application/health.rs

use crate::domain::ports::ontology::OntologyLoader;
use serde::Serialize;
use tracing::error;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub ontology_loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Always answers; an ontology that cannot be loaded is reported, not raised.
pub fn check_health<L: OntologyLoader>(loader: &L) -> HealthStatus {
    let (ontology_loaded, detail) = match loader.load() {
        Ok(_) => (true, None),
        Err(e) => {
            error!(error = %e, "Ontology health check failed");
            (false, Some(e.to_string()))
        }
    };

    HealthStatus {
        status: "ok".to_string(),
        ontology_loaded,
        detail,
    }
}
