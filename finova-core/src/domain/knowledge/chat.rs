// finova-core/src/domain/knowledge/chat.rs

// Questions about one finished analysis. Off-topic questions are refused;
// answers are fixed templates over the findings.

use crate::domain::knowledge::explain::rank_findings;
use crate::domain::knowledge::reasoner::Violation;
use crate::domain::profile::DatasetProfile;
use std::fmt::Display;

pub const EMPTY_QUESTION: &str = "Please provide a question for the assistant.";
pub const OUT_OF_SCOPE: &str = "I can only discuss Finova's data-quality findings. Please ask about the dataset issues, scores, or remediation options.";

const SCOPE_KEYWORDS: [&str; 21] = [
    "data",
    "quality",
    "score",
    "violation",
    "dimension",
    "impact",
    "dqs",
    "missing",
    "null",
    "duplicate",
    "attribute",
    "record",
    "dataset",
    "issue",
    "remediate",
    "recommendation",
    "completeness",
    "uniqueness",
    "integrity",
    "timeliness",
    "validity",
];

const SNAPSHOT_METRICS: usize = 6;

/// What the assistant knows about the analysis being discussed.
#[derive(Debug, Clone, Copy)]
pub struct ChatContext<'a> {
    pub overall_dqs: f64,
    pub rows: Option<u64>,
    pub columns: Option<usize>,
    pub violations: &'a [Violation],
    /// History records do not keep the profile.
    pub profile: Option<&'a DatasetProfile>,
}

/// A question is in scope when it uses a data-quality keyword or names
/// a flagged attribute or one of its dimensions. Case-insensitive.
pub fn is_in_scope(question: &str, violations: &[Violation]) -> bool {
    let lowered = question.to_lowercase();
    if SCOPE_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        return true;
    }

    violations.iter().any(|v| {
        let attribute = v.attribute.to_lowercase();
        (!attribute.is_empty() && lowered.contains(&attribute))
            || v.dimensions
                .iter()
                .any(|d| lowered.contains(&d.as_str().to_lowercase()))
    })
}

fn or_unknown<T: Display>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// First metrics of the profile, in column order: null rate then duplicate rate.
fn metrics_snapshot(profile: &DatasetProfile) -> Option<String> {
    let monitored: Vec<String> = profile
        .iter()
        .flat_map(|attr| {
            let nulls = attr
                .null_rate
                .map(|r| format!("{} null_rate={:.3}", attr.name, r));
            let duplicates = attr
                .duplicate_rate
                .map(|r| format!("{} duplicate_rate={:.3}", attr.name, r));
            nulls.into_iter().chain(duplicates)
        })
        .collect();

    if monitored.is_empty() {
        return None;
    }

    let mut text = monitored
        .iter()
        .take(SNAPSHOT_METRICS)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    if monitored.len() > SNAPSHOT_METRICS {
        text.push_str("...");
    }
    Some(text)
}

pub fn answer(question: &str, context: &ChatContext<'_>) -> String {
    let question = question.trim();
    if question.is_empty() {
        return EMPTY_QUESTION.to_string();
    }
    if !is_in_scope(question, context.violations) {
        return OUT_OF_SCOPE.to_string();
    }

    let overview = format!(
        "Overall DQS is {:.2}. The dataset has {} rows and {} columns",
        context.overall_dqs,
        or_unknown(context.rows),
        or_unknown(context.columns)
    );

    if !context.violations.is_empty() {
        let findings: Vec<String> = rank_findings(context.violations)
            .iter()
            .map(|v| {
                format!(
                    "- {}: {} (severity {}, rate {:.2})",
                    v.attribute,
                    v.issue.as_str().replace('_', " "),
                    v.severity,
                    v.violation_rate
                )
            })
            .collect();
        return format!(
            "{}. Key data quality findings were:\n{}",
            overview,
            findings.join("\n")
        );
    }

    let mut text = format!(
        "{} and no rules were triggered. The knowledge layer checks mandatory attributes for missing values and identifier fields for duplicates. All monitored metrics met their thresholds, so no violations were produced.",
        overview
    );
    if let Some(snapshot) = context.profile.and_then(metrics_snapshot) {
        text.push_str(&format!(" Recent metrics snapshot: {}.", snapshot));
    }
    text
}
