// finova-core/src/lib.rs

// 1. Documentation
#![allow(missing_docs)] // On autorise le manque de doc pour le moment

// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- MODULES HEXAGONAUX ---

// 1. Ports (Interfaces / Traits)
// Contracts towards the outside world (Profiler, History)
pub mod ports;

// 2. Domain (Cœur du métier)
// Vocabulary, reasoning stages (resolver, mapper, reasoner, scoring, explain, chat)
// and the ontology port. Depends on nothing but itself.
pub mod domain;

// 3. Infrastructure (Adapters)
// YAML ontology store, DuckDB profiler, config files, history file.
pub mod infrastructure;

// 4. Application (Use Cases)
// Knowledge engine, dataset analysis, chat, health, clean.
pub mod application;

// --- GESTION DES ERREURS GLOBALE ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
// use finova_core::FinovaError;
pub use error::FinovaError;
