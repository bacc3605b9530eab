// finova-core/src/application/engine.rs

use crate::domain::knowledge::{
    ResultBundle, compute_overall_dqs, identify_critical_attributes, map_dimensions_and_impacts,
    reason_violations,
};
use crate::domain::ports::events::{EventSink, TracingSink};
use crate::domain::ports::ontology::{OntologyLoader, OntologyStore};
use crate::domain::profile::DatasetProfile;
use crate::error::FinovaError;
use tracing::{debug, info, instrument};

/// Resolver -> mapper -> reasoner -> calculator over one loaded ontology.
/// Holds no state between runs; one engine can serve any number of profiles.
pub struct KnowledgeEngine<'a> {
    ontology: &'a dyn OntologyStore,
    sink: &'a dyn EventSink,
}

impl<'a> KnowledgeEngine<'a> {
    pub fn new(ontology: &'a dyn OntologyStore) -> Self {
        Self {
            ontology,
            sink: &TracingSink,
        }
    }

    pub fn with_sink(mut self, sink: &'a dyn EventSink) -> Self {
        self.sink = sink;
        self
    }

    #[instrument(name = "knowledge_layer", skip_all, fields(attributes = profile.len()))]
    pub fn run(&self, profile: &DatasetProfile) -> ResultBundle {
        for attr in profile.iter() {
            debug!(
                attribute = %attr.name,
                null_rate = ?attr.null_rate,
                duplicate_rate = ?attr.duplicate_rate,
                data_type = %attr.declared_type,
                "profile received"
            );
        }

        let (critical, matched_attributes) =
            identify_critical_attributes(self.ontology, profile, self.sink);
        debug!(matched = matched_attributes, critical = critical.len(), "attributes resolved");

        let mapped = map_dimensions_and_impacts(self.ontology, critical, self.sink);
        let violations = reason_violations(&mapped, self.sink);
        let (overall_dqs, dimension_scores) = compute_overall_dqs(&violations);
        let summary = ResultBundle::summary_for(&violations).to_string();

        info!(
            overall_dqs,
            violations = violations.len(),
            matched = matched_attributes,
            "knowledge layer completed"
        );

        ResultBundle {
            violations,
            summary,
            overall_dqs,
            dimension_scores,
            matched_attributes,
        }
    }
}

/// Loads the ontology, then runs the engine once. A load failure is fatal:
/// the caller must refuse the whole analysis.
pub fn run_knowledge_layer<L: OntologyLoader>(
    loader: &L,
    profile: &DatasetProfile,
    sink: &dyn EventSink,
) -> Result<ResultBundle, FinovaError> {
    let ontology = loader.load().map_err(FinovaError::OntologyUnavailable)?;
    Ok(KnowledgeEngine::new(&ontology).with_sink(sink).run(profile))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::knowledge::testing::StubOntology;
    use crate::domain::knowledge::{Dimension, Issue, Severity};
    use crate::domain::knowledge::bundle::{SUMMARY_CLEAN, SUMMARY_VIOLATIONS};
    use crate::domain::ports::events::{PipelineEvent, RecordingSink};
    use crate::domain::ports::ontology::OntologyError;
    use crate::domain::profile::AttributeProfile;
    use crate::infrastructure::ontology::YamlOntologyLoader;
    use anyhow::Result;
    use std::path::PathBuf;

    fn kyc_store() -> StubOntology {
        StubOntology::new()
            .entity("http://www.finova.ai/ontology#client_id", &[], &["Identifier"])
            .entity("http://www.finova.ai/ontology#country", &["Country"], &["Mandatory"])
            .role("Identifier", &["Uniqueness"])
            .role("Mandatory", &["Completeness"])
    }

    #[test]
    fn test_identifier_with_duplicates() {
        let profile = DatasetProfile::new().with(
            AttributeProfile::new("client_id")
                .with_null_rate(0.0)
                .with_duplicate_rate(0.1)
                .with_type("int"),
        );
        let store = kyc_store();
        let bundle = KnowledgeEngine::new(&store).with_sink(&RecordingSink::new()).run(&profile);

        assert_eq!(bundle.violations.len(), 1);
        assert_eq!(bundle.violations[0].issue, Issue::IdentifierNotUnique);
        assert_eq!(bundle.violations[0].severity, Severity::Medium);
        assert_eq!(bundle.dimension_scores.get(&Dimension::Uniqueness), Some(0.9));
        assert_eq!(bundle.dimension_scores.get(&Dimension::Completeness), Some(1.0));
        // 0.975 after weighting
        assert_eq!(bundle.overall_dqs, 0.97);
        assert_eq!(bundle.summary, SUMMARY_VIOLATIONS);
        assert_eq!(bundle.matched_attributes, 1);
    }

    #[test]
    fn test_mandatory_with_nulls() {
        let profile = DatasetProfile::new().with(
            AttributeProfile::new("country")
                .with_null_rate(0.25)
                .with_duplicate_rate(0.0),
        );
        let store = kyc_store();
        let bundle = KnowledgeEngine::new(&store).with_sink(&RecordingSink::new()).run(&profile);

        let issues: Vec<(Issue, Severity, f64)> = bundle
            .violations
            .iter()
            .map(|v| (v.issue, v.severity, v.violation_rate))
            .collect();
        assert_eq!(
            issues,
            vec![
                (Issue::MandatoryMissingValues, Severity::High, 0.25),
                (Issue::MissingValues, Severity::High, 0.25),
            ]
        );
        assert_eq!(bundle.dimension_scores.get(&Dimension::Completeness), Some(0.75));
        assert_eq!(bundle.overall_dqs, 0.91);
    }

    #[test]
    fn test_unknown_attribute_is_excluded_with_warning() {
        let profile = DatasetProfile::new()
            .with(AttributeProfile::new("favourite colour").with_null_rate(0.9))
            .with(
                AttributeProfile::new("client_id")
                    .with_null_rate(0.0)
                    .with_duplicate_rate(0.1),
            );
        let store = kyc_store();
        let sink = RecordingSink::new();
        let bundle = KnowledgeEngine::new(&store).with_sink(&sink).run(&profile);

        assert_eq!(bundle.violations.len(), 1);
        assert_eq!(bundle.violations[0].attribute, "client_id");
        assert!(sink.warnings().iter().any(|e| matches!(
            e,
            PipelineEvent::AttributeUnmatched { attribute, .. } if attribute == "favourite colour"
        )));
    }

    #[test]
    fn test_empty_profile_is_clean() {
        let store = kyc_store();
        let bundle = KnowledgeEngine::new(&store)
            .with_sink(&RecordingSink::new())
            .run(&DatasetProfile::new());

        assert!(bundle.violations.is_empty());
        assert_eq!(bundle.overall_dqs, 1.0);
        assert!(bundle.dimension_scores.iter().all(|(_, s)| s == 1.0));
        assert_eq!(bundle.summary, SUMMARY_CLEAN);
        assert_eq!(bundle, ResultBundle::default());
    }

    #[test]
    fn test_unrelated_dataset_yields_defaults_not_error() {
        let profile = DatasetProfile::new()
            .with(AttributeProfile::new("sku").with_null_rate(0.5))
            .with(AttributeProfile::new("price").with_null_rate(0.5));
        let store = kyc_store();
        let bundle = KnowledgeEngine::new(&store).with_sink(&RecordingSink::new()).run(&profile);

        assert_eq!(bundle, ResultBundle::default());
        assert_eq!(bundle.matched_attributes, 0);
    }

    #[test]
    fn test_runs_are_idempotent() {
        let profile = DatasetProfile::new()
            .with(AttributeProfile::new("country").with_null_rate(0.1))
            .with(AttributeProfile::new("client_id").with_duplicate_rate(0.3));
        let store = kyc_store();
        let sink = RecordingSink::new();
        let engine = KnowledgeEngine::new(&store).with_sink(&sink);

        assert_eq!(engine.run(&profile), engine.run(&profile));
    }

    #[test]
    fn test_missing_ontology_is_fatal() -> Result<()> {
        let loader = YamlOntologyLoader::new(PathBuf::from("/no/such/ontology.yaml"));
        let result = run_knowledge_layer(&loader, &DatasetProfile::new(), &RecordingSink::new());

        let err = result.err().ok_or_else(|| anyhow::anyhow!("expected an error"))?;
        assert!(err.is_ontology_unavailable());
        assert!(matches!(
            err,
            FinovaError::OntologyUnavailable(OntologyError::NotFound(_))
        ));
        Ok(())
    }
}
