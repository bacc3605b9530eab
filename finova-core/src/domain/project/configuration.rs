// src/domain/project/configuration.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct ProjectConfig {
    #[validate(length(min = 1, message = "Project name cannot be empty"))]
    pub name: String,

    #[serde(default = "default_version")]
    pub version: String,

    #[serde(rename = "ontology-path", default = "default_ontology_path")]
    #[validate(length(min = 1, message = "Ontology path cannot be empty"))]
    pub ontology_path: String,

    #[serde(rename = "target-path", default = "default_target_path")]
    pub target_path: String,

    #[serde(rename = "clean-targets", default = "default_clean_targets")]
    pub clean_targets: Vec<String>,

    #[validate(nested)]
    #[serde(default)]
    pub history: HistoryConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct HistoryConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(rename = "max-entries", default = "default_max_entries")]
    #[validate(range(min = 1, max = 10000))]
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: default_max_entries(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AnalysisConfig {
    /// Refuse datasets where no column matches the ontology.
    #[serde(rename = "require-match", default = "default_true")]
    pub require_match: bool,

    /// Attach the deterministic explanation to every report.
    #[serde(default)]
    pub explain: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            require_match: true,
            explain: false,
        }
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "finova".to_string(),
            version: default_version(),
            ontology_path: default_ontology_path(),
            target_path: default_target_path(),
            clean_targets: default_clean_targets(),
            history: HistoryConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_version() -> String {
    "0.1.0".to_string()
}
fn default_ontology_path() -> String {
    "ontology/finova.yaml".to_string()
}
fn default_target_path() -> String {
    "target".to_string()
}
fn default_clean_targets() -> Vec<String> {
    vec!["target".to_string()]
}
fn default_max_entries() -> usize {
    50
}
