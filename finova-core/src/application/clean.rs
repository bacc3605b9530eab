// finova-core/src/application/clean.rs

use crate::error::FinovaError;
use crate::infrastructure::config::project::load_or_default;
use std::fs;
use std::path::{Component, Path};
use tracing::info;

/// Relative, and never climbing out of the project.
fn is_contained(target: &str) -> bool {
    let path = Path::new(target);
    !target.is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Removes the configured clean targets. Returns the ones that existed.
pub fn clean_project(project_dir: &Path) -> Result<Vec<String>, FinovaError> {
    info!("🧹 Initializing Finova cleanup sequence...");

    let config = load_or_default(project_dir)?;

    let targets = if config.clean_targets.is_empty() {
        vec![config.target_path.clone()]
    } else {
        config.clean_targets
    };

    // Zero-Trust Path Traversal Guard, before touching anything
    if let Some(unsafe_target) = targets.iter().find(|t| !is_contained(t)) {
        return Err(FinovaError::UnsafePath(unsafe_target.clone()));
    }

    let mut removed = Vec::new();
    for target_rel_path in targets {
        let full_path = project_dir.join(&target_rel_path);

        if full_path.exists() {
            if full_path.is_dir() {
                fs::remove_dir_all(&full_path)?;
            } else {
                fs::remove_file(&full_path)?;
            }
            info!(target = %target_rel_path, "Artifact removed");
            removed.push(target_rel_path);
        }
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn test_removes_configured_targets() -> Result<()> {
        let dir = tempdir()?;
        fs::write(
            dir.path().join("finova.yaml"),
            "name: kyc\nclean-targets: [target, report.json, missing]\n",
        )?;
        fs::create_dir_all(dir.path().join("target/nested"))?;
        fs::write(dir.path().join("report.json"), "{}")?;

        let removed = clean_project(dir.path())?;

        assert_eq!(removed, vec!["target".to_string(), "report.json".to_string()]);
        assert!(!dir.path().join("target").exists());
        assert!(!dir.path().join("report.json").exists());
        Ok(())
    }

    #[test]
    fn test_traversal_is_refused() -> Result<()> {
        let dir = tempdir()?;
        let project = dir.path().join("project");
        fs::create_dir_all(project.join("target"))?;
        fs::write(
            project.join("finova.yaml"),
            "name: kyc\nclean-targets: [target, ../outside]\n",
        )?;

        let result = clean_project(&project);

        assert!(matches!(result, Err(FinovaError::UnsafePath(t)) if t == "../outside"));
        // Nothing was removed.
        assert!(project.join("target").exists());
        Ok(())
    }

    #[test]
    fn test_containment() {
        assert!(is_contained("target"));
        assert!(is_contained("./out/reports"));
        assert!(!is_contained("/etc"));
        assert!(!is_contained("a/../../b"));
        assert!(!is_contained(""));
    }
}
