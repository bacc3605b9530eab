// finova-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("No attribute of dataset '{dataset}' matched the ontology")]
    #[diagnostic(
        code(finova::domain::no_ontology_match),
        help("The dataset does not look like it belongs to the ontology's domain. Check the column names or use --allow-unmatched.")
    )]
    NoOntologyMatch { dataset: String },
}
