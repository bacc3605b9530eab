pub mod error;
pub mod knowledge;
pub mod ports;
pub mod profile;
pub mod project;

// Re-exports pratiques pour simplifier les imports ailleurs
pub use error::DomainError;
pub use profile::{AttributeProfile, DatasetProfile};
