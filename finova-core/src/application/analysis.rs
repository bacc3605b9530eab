// finova-core/src/application/analysis.rs

use std::path::PathBuf;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::application::engine::run_knowledge_layer;
use crate::domain::error::DomainError;
use crate::domain::knowledge::{ChatContext, Explanation, ResultBundle, explain};
use crate::domain::ports::events::EventSink;
use crate::domain::ports::ontology::OntologyLoader;
use crate::domain::profile::DatasetProfile;
use crate::error::FinovaError;
use crate::ports::history::{AnalysisRecord, HistoryStore};
use crate::ports::profiler::{DatasetMetadata, Profiler};

/// Where the statistics come from.
#[derive(Debug, Clone)]
pub enum DatasetSource {
    /// Profiled on the fly.
    Csv(PathBuf),
    /// Already profiled elsewhere.
    Profile(DatasetProfile),
}

#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub dataset_name: String,
    pub source: DatasetSource,
    pub explain: bool,
    /// Refuse the dataset when no column matches the ontology.
    pub require_match: bool,
}

/// Also the JSON printed by `analyze --format json`, read back by `ask --report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub dataset_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<DatasetMetadata>,
    #[serde(flatten)]
    pub result: ResultBundle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<Explanation>,
    #[serde(default)]
    pub profile: DatasetProfile,
}

impl AnalysisReport {
    pub fn chat_context(&self) -> ChatContext<'_> {
        ChatContext {
            overall_dqs: self.result.overall_dqs,
            rows: self.dataset.map(|d| d.rows),
            columns: self.dataset.map(|d| d.columns),
            violations: &self.result.violations,
            profile: Some(&self.profile),
        }
    }

    fn to_record(&self) -> AnalysisRecord {
        AnalysisRecord {
            dataset_name: self.dataset_name.clone(),
            created_at: Utc::now(),
            dataset: self.dataset,
            overall_dqs: self.result.overall_dqs,
            dimension_scores: self.result.dimension_scores,
            violations: self.result.violations.clone(),
            summary: self.result.summary.clone(),
            explanation: self.explanation.as_ref().map(|e| e.summary.clone()),
            recommendations: self
                .explanation
                .as_ref()
                .map(|e| e.recommendations.clone())
                .unwrap_or_default(),
        }
    }
}

/// Profile -> knowledge layer -> optional explanation -> optional history record.
#[instrument(skip_all, fields(dataset = %request.dataset_name))]
pub async fn analyze_dataset<L: OntologyLoader>(
    profiler: &dyn Profiler,
    loader: &L,
    history: Option<&dyn HistoryStore>,
    request: AnalysisRequest,
    sink: &dyn EventSink,
) -> Result<AnalysisReport, FinovaError> {
    let (dataset, profile) = match request.source {
        DatasetSource::Csv(path) => {
            info!(engine = profiler.engine_name(), path = ?path, "Profiling started");
            let profiled = profiler.profile(&path).await?;
            info!(
                rows = profiled.metadata.rows,
                columns = profiled.metadata.columns,
                "Profiling completed"
            );
            (Some(profiled.metadata), profiled.profile)
        }
        DatasetSource::Profile(profile) => (None, profile),
    };

    let result = run_knowledge_layer(loader, &profile, sink)?;
    info!(violations = result.violations.len(), "Violations detected");

    if request.require_match && result.matched_attributes == 0 {
        return Err(DomainError::NoOntologyMatch {
            dataset: request.dataset_name,
        }
        .into());
    }

    let explanation = request.explain.then(|| explain(&result));

    let report = AnalysisReport {
        dataset_name: request.dataset_name,
        dataset,
        result,
        explanation,
        profile,
    };

    if let Some(store) = history {
        // Best effort.
        if let Err(e) = store.append(report.to_record()) {
            warn!(error = %e, "Failed to record analysis history");
        }
    }

    Ok(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::ports::events::RecordingSink;
    use crate::domain::profile::AttributeProfile;
    use crate::infrastructure::adapters::duckdb::DuckDBProfiler;
    use crate::infrastructure::history::JsonHistoryStore;
    use crate::infrastructure::ontology::YamlOntologyLoader;
    use anyhow::Result;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    const ONTOLOGY: &str = r#"
base_iri: "http://www.finova.ai/ontology#"
entities:
  - name: client_id
    roles: [Identifier, Mandatory]
  - name: country
    roles: [Mandatory, Reference]
roles:
  Identifier: { triggers: [Uniqueness, Integrity] }
  Mandatory: { triggers: [Completeness] }
  Reference: { triggers: [Integrity, Validity] }
dimensions:
  Completeness: { affects: [OperationalRisk] }
"#;

    fn loader(dir: &Path) -> Result<YamlOntologyLoader> {
        let path = dir.join("ontology.yaml");
        fs::write(&path, ONTOLOGY)?;
        Ok(YamlOntologyLoader::new(path))
    }

    fn request(source: DatasetSource) -> AnalysisRequest {
        AnalysisRequest {
            dataset_name: "clients.csv".to_string(),
            source,
            explain: true,
            require_match: true,
        }
    }

    #[tokio::test]
    async fn test_csv_analysis_with_history() -> Result<()> {
        let dir = tempdir()?;
        let csv = dir.path().join("clients.csv");
        fs::write(&csv, "client_id,country\n1,US\n2,\n2,FR\n4,DE\n")?;

        let profiler = DuckDBProfiler::new()?;
        let history = JsonHistoryStore::in_target(&dir.path().join("target"), 10);
        let report = analyze_dataset(
            &profiler,
            &loader(dir.path())?,
            Some(&history),
            request(DatasetSource::Csv(csv)),
            &RecordingSink::new(),
        )
        .await?;

        assert_eq!(report.dataset.map(|d| d.rows), Some(4));
        assert_eq!(report.result.violations.len(), 3);
        assert_eq!(report.result.matched_attributes, 2);
        let explanation = report.explanation.as_ref().unwrap();
        assert!(!explanation.recommendations.is_empty());

        let records = history.list()?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].overall_dqs, report.result.overall_dqs);
        assert_eq!(records[0].explanation.as_deref(), Some(explanation.summary.as_str()));
        assert_eq!(records[0].dataset.map(|d| d.columns), Some(2));
        Ok(())
    }

    #[tokio::test]
    async fn test_unmatched_dataset_is_refused() -> Result<()> {
        let dir = tempdir()?;
        let profile = DatasetProfile::new().with(AttributeProfile::new("sku").with_null_rate(0.4));

        let result = analyze_dataset(
            &DuckDBProfiler::new()?,
            &loader(dir.path())?,
            None,
            request(DatasetSource::Profile(profile.clone())),
            &RecordingSink::new(),
        )
        .await;
        assert!(matches!(
            result,
            Err(FinovaError::Domain(DomainError::NoOntologyMatch { .. }))
        ));

        let mut lenient = request(DatasetSource::Profile(profile));
        lenient.require_match = false;
        lenient.explain = false;
        let report = analyze_dataset(
            &DuckDBProfiler::new()?,
            &loader(dir.path())?,
            None,
            lenient,
            &RecordingSink::new(),
        )
        .await?;
        assert_eq!(report.result, ResultBundle::default());
        assert!(report.explanation.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_report_json_shape() -> Result<()> {
        let dir = tempdir()?;
        let profile = DatasetProfile::new().with(
            AttributeProfile::new("client_id")
                .with_null_rate(0.0)
                .with_duplicate_rate(0.1),
        );
        let report = analyze_dataset(
            &DuckDBProfiler::new()?,
            &loader(dir.path())?,
            None,
            request(DatasetSource::Profile(profile)),
            &RecordingSink::new(),
        )
        .await?;

        let json = serde_json::to_value(&report)?;
        assert_eq!(json["summary"], "Violations detected; inspect violations for details.");
        assert_eq!(json["violations"][0]["issue"], "identifier_not_unique");
        assert_eq!(json["dimension_scores"]["Uniqueness"], 0.9);
        assert!(json.get("dataset").is_none());
        assert!(json["profile"]["attributes"]["client_id"].is_object());

        let reread: AnalysisReport = serde_json::from_value(json)?;
        assert_eq!(reread.result, report.result);
        assert_eq!(reread.profile.get("client_id").unwrap().duplicate_rate, Some(0.1));
        Ok(())
    }
}
