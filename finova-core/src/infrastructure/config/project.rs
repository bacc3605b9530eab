// finova-core/src/infrastructure/config/project.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use validator::Validate;

use crate::domain::project::configuration::ProjectConfig;
use crate::infrastructure::error::InfrastructureError;

pub const CONFIG_CANDIDATES: [&str; 2] = ["finova.yaml", "finova_project.yaml"];

pub const ENV_ONTOLOGY_PATH: &str = "FINOVA_ONTOLOGY_PATH";
pub const ENV_TARGET_PATH: &str = "FINOVA_TARGET_PATH";

#[instrument(skip(project_dir))]
pub fn load_project_config(project_dir: &Path) -> Result<ProjectConfig, InfrastructureError> {
    // 1. Discovery
    let config_path = find_main_config(project_dir)?;
    info!(path = ?config_path, "Loading project config");

    // 2. YAML
    let content = fs::read_to_string(&config_path)?;
    let mut config: ProjectConfig = serde_yaml::from_str(&content)?;

    // 3. Env layering: FINOVA_TARGET_PATH=/tmp/out finova analyze ...
    apply_env_overrides(&mut config);

    // 4. Validation, after overrides so they cannot sneak in bad values
    config
        .validate()
        .map_err(|e| InfrastructureError::ConfigError(e.to_string()))?;

    Ok(config)
}

/// Same as `load_project_config`, but a project without config file runs on
/// defaults (still subject to env overrides).
pub fn load_or_default(project_dir: &Path) -> Result<ProjectConfig, InfrastructureError> {
    match load_project_config(project_dir) {
        Err(InfrastructureError::ConfigNotFound(_)) => {
            info!(dir = ?project_dir, "No project config found, using defaults");
            let mut config = ProjectConfig::default();
            apply_env_overrides(&mut config);
            Ok(config)
        }
        other => other,
    }
}

fn find_main_config(root: &Path) -> Result<PathBuf, InfrastructureError> {
    for filename in CONFIG_CANDIDATES {
        let p = root.join(filename);
        if p.exists() {
            return Ok(p);
        }
    }
    Err(InfrastructureError::ConfigNotFound(format!(
        "No configuration file found in {:?}. Checked: {:?}",
        root, CONFIG_CANDIDATES
    )))
}

fn apply_env_overrides(config: &mut ProjectConfig) {
    apply_overrides(
        config,
        std::env::var(ENV_ONTOLOGY_PATH).ok(),
        std::env::var(ENV_TARGET_PATH).ok(),
    );
}

fn apply_overrides(config: &mut ProjectConfig, ontology: Option<String>, target: Option<String>) {
    if let Some(val) = ontology.filter(|v| !v.is_empty()) {
        info!(old = ?config.ontology_path, new = ?val, "Overriding ontology path via ENV");
        config.ontology_path = val;
    }
    if let Some(val) = target.filter(|v| !v.is_empty()) {
        info!(old = ?config.target_path, new = ?val, "Overriding target path via ENV");
        config.target_path = val;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn test_missing_config_is_reported() -> Result<()> {
        let dir = tempdir()?;
        let result = find_main_config(dir.path());
        assert!(matches!(result, Err(InfrastructureError::ConfigNotFound(_))));
        Ok(())
    }

    #[test]
    fn test_first_candidate_wins() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("finova_project.yaml"), "name: second")?;
        fs::write(dir.path().join("finova.yaml"), "name: first")?;

        assert_eq!(find_main_config(dir.path())?, dir.path().join("finova.yaml"));
        Ok(())
    }

    #[test]
    fn test_invalid_config_is_rejected() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("finova.yaml"), "name: ''")?;
        let result = load_project_config(dir.path());
        assert!(matches!(result, Err(InfrastructureError::ConfigError(_))));

        fs::write(dir.path().join("finova.yaml"), "name: [")?;
        let result = load_project_config(dir.path());
        assert!(matches!(result, Err(InfrastructureError::YamlError(_))));
        Ok(())
    }

    #[test]
    fn test_overrides_replace_paths() {
        let mut config = ProjectConfig::default();
        apply_overrides(&mut config, Some("other.yaml".into()), Some(String::new()));
        assert_eq!(config.ontology_path, "other.yaml");
        assert_eq!(config.target_path, "target");
    }

    #[test]
    fn test_load_or_default_without_file() -> Result<()> {
        let dir = tempdir()?;
        let config = load_or_default(dir.path())?;
        assert_eq!(config.name, "finova");
        Ok(())
    }
}
