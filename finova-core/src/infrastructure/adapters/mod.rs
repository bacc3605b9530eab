// finova-core/src/infrastructure/adapters/mod.rs

pub mod document;
pub mod duckdb;

pub use document::load_profile_document;
