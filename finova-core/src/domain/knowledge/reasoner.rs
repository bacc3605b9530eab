// finova-core/src/domain/knowledge/reasoner.rs

use crate::domain::knowledge::mapper::MappedAttribute;
use crate::domain::knowledge::vocabulary::{Dimension, Impact, Issue, Role, Severity};
use crate::domain::ports::events::{EventSink, PipelineEvent};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

pub const MANDATORY_NULL_THRESHOLD: f64 = 0.0;
pub const NULL_RATE_THRESHOLD: f64 = 0.0;
pub const IDENTIFIER_DUPLICATE_THRESHOLD: f64 = 0.0;
pub const HIGH_SEVERITY_THRESHOLD: f64 = 0.2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub attribute: String,
    pub issue: Issue,
    pub violation_rate: f64,
    pub dimensions: Vec<Dimension>,
    pub impacts: Vec<Impact>,
    pub severity: Severity,
    pub roles: Vec<Role>,
}

/// Threshold rules, evaluated independently and in this order for every
/// attribute. Rules 1 and 3 both fire on a Mandatory column with nulls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    MandatoryCompleteness,
    IdentifierUniqueness,
    GeneralCompleteness,
}

impl Rule {
    pub const ALL: [Rule; 3] = [
        Rule::MandatoryCompleteness,
        Rule::IdentifierUniqueness,
        Rule::GeneralCompleteness,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Rule::MandatoryCompleteness => "mandatory",
            Rule::IdentifierUniqueness => "identifier",
            Rule::GeneralCompleteness => "general completeness",
        }
    }

    fn required_role(self) -> Option<Role> {
        match self {
            Rule::MandatoryCompleteness => Some(Role::Mandatory),
            Rule::IdentifierUniqueness => Some(Role::Identifier),
            Rule::GeneralCompleteness => None,
        }
    }

    fn statistic(self) -> &'static str {
        match self {
            Rule::IdentifierUniqueness => "duplicate_rate",
            Rule::MandatoryCompleteness | Rule::GeneralCompleteness => "null_rate",
        }
    }

    fn issue(self) -> Issue {
        match self {
            Rule::MandatoryCompleteness => Issue::MandatoryMissingValues,
            Rule::IdentifierUniqueness => Issue::IdentifierNotUnique,
            Rule::GeneralCompleteness => Issue::MissingValues,
        }
    }

    fn threshold(self) -> f64 {
        match self {
            Rule::MandatoryCompleteness => MANDATORY_NULL_THRESHOLD,
            Rule::IdentifierUniqueness => IDENTIFIER_DUPLICATE_THRESHOLD,
            Rule::GeneralCompleteness => NULL_RATE_THRESHOLD,
        }
    }

    fn severity(self, rate: f64) -> Severity {
        if rate > HIGH_SEVERITY_THRESHOLD {
            Severity::High
        } else if self == Rule::GeneralCompleteness {
            Severity::Low
        } else {
            Severity::Medium
        }
    }

    /// `None` when the rule does not apply, lacks its statistic, or passes.
    pub fn evaluate(self, attr: &MappedAttribute, sink: &dyn EventSink) -> Option<Violation> {
        if let Some(role) = self.required_role()
            && !attr.roles.contains(&role)
        {
            return None;
        }

        let rate = match self {
            Rule::IdentifierUniqueness => attr.stats.duplicate_rate,
            Rule::MandatoryCompleteness | Rule::GeneralCompleteness => attr.stats.null_rate,
        };

        let Some(rate) = rate else {
            sink.emit(PipelineEvent::MissingStatistic {
                attribute: attr.name.clone(),
                statistic: self.statistic(),
                rule: self.name(),
            });
            return None;
        };

        if rate <= self.threshold() {
            debug!(
                attribute = %attr.name,
                rule = self.name(),
                rate,
                "rule not triggered"
            );
            return None;
        }

        Some(Violation {
            attribute: attr.name.clone(),
            issue: self.issue(),
            violation_rate: rate,
            dimensions: attr.dimensions.clone(),
            impacts: attr.impacts.clone(),
            severity: self.severity(rate),
            roles: attr.roles.clone(),
        })
    }
}

/// Violations in attribute order, then rule order. Not sorted by severity.
#[instrument(skip_all, fields(attributes = mapped.len()))]
pub fn reason_violations(mapped: &[MappedAttribute], sink: &dyn EventSink) -> Vec<Violation> {
    let mut results = Vec::new();

    for attr in mapped {
        let before = results.len();
        results.extend(Rule::ALL.iter().filter_map(|rule| rule.evaluate(attr, sink)));

        if results.len() == before {
            sink.emit(PipelineEvent::NoRulesFired {
                attribute: attr.name.clone(),
            });
        }
    }

    if results.is_empty() {
        sink.emit(PipelineEvent::NoViolations);
    } else {
        debug!(count = results.len(), "violation records generated");
    }

    results
}
