// finova/src/commands/mod.rs

pub mod analyze;
pub mod ask;
pub mod clean;
pub mod health;
pub mod history;
pub mod profile;

use std::path::{Path, PathBuf};

use anyhow::Context;
use finova_core::domain::project::ProjectConfig;
use finova_core::infrastructure::config::load_or_default;
use finova_core::infrastructure::ontology::YamlOntologyLoader;

/// Project config plus the ontology loader it points at. `--ontology` wins
/// over the config file.
pub(crate) fn project_context(
    project_dir: &Path,
    ontology: Option<PathBuf>,
) -> anyhow::Result<(ProjectConfig, YamlOntologyLoader)> {
    let config = load_or_default(project_dir).with_context(|| {
        format!(
            "Failed to load project configuration from {:?}",
            project_dir
        )
    })?;
    let ontology_path = ontology.unwrap_or_else(|| project_dir.join(&config.ontology_path));
    Ok((config, YamlOntologyLoader::new(ontology_path)))
}

/// Inputs are taken as given, falling back to the project directory.
pub(crate) fn resolve_input(project_dir: &Path, input: &Path) -> PathBuf {
    if input.is_relative() && !input.exists() {
        let candidate = project_dir.join(input);
        if candidate.exists() {
            return candidate;
        }
    }
    input.to_path_buf()
}

pub(crate) fn fmt_rate(rate: Option<f64>) -> String {
    rate.map(|r| format!("{:.2}%", r * 100.0))
        .unwrap_or_else(|| "-".to_string())
}
