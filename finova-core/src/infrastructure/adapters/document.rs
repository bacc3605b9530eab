// finova-core/src/infrastructure/adapters/document.rs

// Precomputed profiles, for datasets profiled elsewhere.

use crate::domain::profile::DatasetProfile;
use crate::error::FinovaError;
use crate::infrastructure::fs::read_json;
use std::path::Path;
use tracing::{instrument, warn};

/// Reads `{"attributes": {"<column>": {null_rate, duplicate_rate, data_type}}}`.
/// An empty document is a valid, empty profile.
#[instrument]
pub fn load_profile_document(path: &Path) -> Result<DatasetProfile, FinovaError> {
    let profile: DatasetProfile = read_json(path)?;
    if profile.is_empty() {
        warn!(path = %path.display(), "Profile document has no attributes");
    }
    Ok(profile)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_reads_profile_in_document_order() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("profile.json");
        fs::write(
            &path,
            r#"{"attributes": {
                "zeta": {"null_rate": 0.1, "data_type": "object"},
                "alpha": {"duplicate_rate": 0.2}
            }}"#,
        )?;

        let profile = load_profile_document(&path)?;
        let names: Vec<&str> = profile.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
        assert_eq!(profile.get("alpha").unwrap().null_rate, None);
        Ok(())
    }

    #[test]
    fn test_empty_document_is_empty_profile() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("profile.json");
        fs::write(&path, r#"{"attributes": {}}"#)?;

        assert!(load_profile_document(&path)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_malformed_document_is_an_error() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("profile.json");
        fs::write(&path, r#"{"attributes": {"a": {"null_rate": "high"}}}"#)?;

        assert!(matches!(
            load_profile_document(&path),
            Err(FinovaError::Infrastructure(_))
        ));
        Ok(())
    }
}
