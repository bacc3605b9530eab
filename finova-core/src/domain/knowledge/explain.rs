// finova-core/src/domain/knowledge/explain.rs

// Plain-language report built from a ResultBundle with fixed templates.
// No text generation service involved.

use crate::domain::knowledge::bundle::ResultBundle;
use crate::domain::knowledge::reasoner::Violation;
use crate::domain::knowledge::vocabulary::Dimension;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const SAFETY_NOTE: &str = "Validate these automated insights with the responsible data owners before changing production pipelines.";

const MAX_RECOMMENDATIONS: usize = 3;
const FALLBACK_DIMENSION: &str = "Data Quality";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: String,
    pub dimension: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub summary: String,
    pub recommendations: Vec<Recommendation>,
    pub safety_note: String,
}

fn dimension_action(dimension: &str) -> &'static str {
    match Dimension::parse(dimension) {
        Dimension::Completeness => {
            "Tighten upstream intake validations and require key fields before loading records."
        }
        Dimension::Uniqueness => {
            "Introduce duplicate checks or merge logic during client onboarding and integrations."
        }
        Dimension::Integrity => {
            "Review cross-system mappings and fix reference data inconsistencies."
        }
        Dimension::Timeliness => {
            "Accelerate refresh jobs or automate ingestion so data arrives on schedule."
        }
        Dimension::Validity => {
            "Align format rules between source systems and apply automated validation."
        }
        Dimension::Unrecognized(_) => {
            "Review upstream processes and coordinate remediation with the data owners."
        }
    }
}

/// High before Medium before Low, then the larger rate first.
/// Stable, so equal findings keep their reasoning order.
pub fn rank_findings(violations: &[Violation]) -> Vec<&Violation> {
    let mut ordered: Vec<&Violation> = violations.iter().collect();
    ordered.sort_by(|a, b| {
        a.severity
            .rank()
            .cmp(&b.severity.rank())
            .then(b.violation_rate.total_cmp(&a.violation_rate))
    });
    ordered
}

fn primary_dimension(violation: &Violation) -> &str {
    violation
        .dimensions
        .first()
        .map(Dimension::as_str)
        .unwrap_or(FALLBACK_DIMENSION)
}

fn summary_text(ordered: &[&Violation], bundle: &ResultBundle) -> String {
    let Some(top) = ordered.first() else {
        let details: Vec<String> = bundle
            .dimension_scores
            .iter()
            .map(|(dim, score)| format!("{}={:.2}", dim, score))
            .collect();
        return format!(
            "Overall data quality score is {:.2}. No automated rules fired; each dimension remains strong ({}).",
            bundle.overall_dqs,
            details.join(", ")
        );
    };

    let primary = primary_dimension(top);
    let rate = if top.violation_rate != 0.0 {
        format!("{:.1}%", top.violation_rate * 100.0)
    } else {
        "observed".to_string()
    };

    let others: Vec<String> = bundle
        .dimension_scores
        .iter()
        .filter(|(dim, _)| dim.as_str() != primary)
        .map(|(dim, score)| format!("{}={:.2}", dim, score))
        .collect();
    let trailing = if others.is_empty() {
        String::new()
    } else {
        format!(" Other dimension scores: {}.", others.join(", "))
    };

    format!(
        "Overall data quality score is {:.2}. {} faces the highest risk because {} shows {} at approximately {} ({} severity).{}",
        bundle.overall_dqs,
        primary,
        top.attribute,
        top.issue.describe(),
        rate,
        top.severity.as_str().to_lowercase(),
        trailing
    )
}

/// At most one recommendation per (attribute, primary dimension), best first.
fn recommendations(ordered: &[&Violation]) -> Vec<Recommendation> {
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut out = Vec::new();

    for violation in ordered {
        let dimension = primary_dimension(violation);
        if !seen.insert((violation.attribute.as_str(), dimension)) {
            continue;
        }

        out.push(Recommendation {
            priority: format!("{} priority", violation.severity),
            dimension: dimension.to_string(),
            action: format!(
                "{}: {} Typical drivers include delayed onboarding steps or manual corrections; confirm with source system owners before remediating.",
                violation.attribute,
                dimension_action(dimension)
            ),
        });

        if out.len() == MAX_RECOMMENDATIONS {
            break;
        }
    }

    out
}

pub fn explain(bundle: &ResultBundle) -> Explanation {
    let ordered = rank_findings(&bundle.violations);
    Explanation {
        summary: summary_text(&ordered, bundle),
        recommendations: recommendations(&ordered),
        safety_note: SAFETY_NOTE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::knowledge::scoring::compute_overall_dqs;
    use crate::domain::knowledge::vocabulary::{Issue, Severity};

    fn violation(attr: &str, issue: Issue, severity: Severity, rate: f64, dims: &[Dimension]) -> Violation {
        Violation {
            attribute: attr.into(),
            issue,
            violation_rate: rate,
            dimensions: dims.to_vec(),
            impacts: vec![],
            severity,
            roles: vec![],
        }
    }

    fn bundle(violations: Vec<Violation>) -> ResultBundle {
        let (overall_dqs, dimension_scores) = compute_overall_dqs(&violations);
        ResultBundle {
            summary: ResultBundle::summary_for(&violations).to_string(),
            violations,
            overall_dqs,
            dimension_scores,
            matched_attributes: 1,
        }
    }

    #[test]
    fn test_ranking_prefers_severity_then_rate() {
        let violations = vec![
            violation("a", Issue::MissingValues, Severity::Low, 0.9, &[]),
            violation("b", Issue::IdentifierNotUnique, Severity::Medium, 0.1, &[]),
            violation("c", Issue::MissingValues, Severity::High, 0.3, &[]),
            violation("d", Issue::MissingValues, Severity::High, 0.5, &[]),
        ];
        let ranked: Vec<&str> = rank_findings(&violations)
            .iter()
            .map(|v| v.attribute.as_str())
            .collect();
        assert_eq!(ranked, vec!["d", "c", "b", "a"]);
    }

    #[test]
    fn test_clean_bundle_summary() {
        let explanation = explain(&bundle(vec![]));
        assert!(explanation.summary.starts_with("Overall data quality score is 1.00. No automated rules fired"));
        assert!(explanation.summary.contains("Validity=1.00"));
        assert!(explanation.recommendations.is_empty());
        assert_eq!(explanation.safety_note, SAFETY_NOTE);
    }

    #[test]
    fn test_summary_names_the_top_finding() {
        let explanation = explain(&bundle(vec![
            violation("client_id", Issue::IdentifierNotUnique, Severity::Medium, 0.1, &[Dimension::Uniqueness]),
            violation("country", Issue::MandatoryMissingValues, Severity::High, 0.25, &[Dimension::Completeness]),
        ]));

        assert!(explanation.summary.contains(
            "Completeness faces the highest risk because country shows missing required values at approximately 25.0% (high severity)."
        ));
        assert!(explanation.summary.contains("Uniqueness=0.90"));
        assert!(!explanation.summary.contains("Completeness=0.75"));
    }

    #[test]
    fn test_recommendations_are_deduplicated_and_capped() {
        let explanation = explain(&bundle(vec![
            violation("country", Issue::MandatoryMissingValues, Severity::High, 0.25, &[Dimension::Completeness]),
            violation("country", Issue::MissingValues, Severity::High, 0.25, &[Dimension::Completeness]),
            violation("a", Issue::MissingValues, Severity::Low, 0.01, &[Dimension::Validity]),
            violation("b", Issue::MissingValues, Severity::Low, 0.02, &[]),
            violation("c", Issue::MissingValues, Severity::Low, 0.03, &[Dimension::Timeliness]),
        ]));

        let recs: Vec<(&str, &str)> = explanation
            .recommendations
            .iter()
            .map(|r| (r.priority.as_str(), r.dimension.as_str()))
            .collect();
        assert_eq!(
            recs,
            vec![
                ("High priority", "Completeness"),
                ("Low priority", "Timeliness"),
                ("Low priority", "Data Quality"),
            ]
        );
        assert!(explanation.recommendations[0].action.starts_with("country: Tighten upstream intake"));
    }
}
