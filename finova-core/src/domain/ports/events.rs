// finova-core/src/domain/ports/events.rs

// Diagnostics of one pipeline run. Each run gets its own sink, so two
// concurrent analyses never share logger state.

use crate::domain::knowledge::vocabulary::Role;
use crate::domain::ports::ontology::OntologyQuery;
use std::fmt;
use std::sync::Mutex;
use tracing::Level;

#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    // --- Resolver ---
    QueryFailed {
        attribute: String,
        query: OntologyQuery,
        reason: String,
    },
    AttributeMatched {
        attribute: String,
        entity: String,
        via: OntologyQuery,
    },
    AttributeUnmatched {
        attribute: String,
        attempts: Vec<OntologyQuery>,
    },
    NoRoles {
        attribute: String,
    },
    NotCritical {
        attribute: String,
        roles: Vec<Role>,
    },
    NoCriticalAttributes,

    // --- Mapper ---
    NoDimensions {
        attribute: String,
    },

    // --- Reasoner ---
    MissingStatistic {
        attribute: String,
        statistic: &'static str,
        rule: &'static str,
    },
    NoRulesFired {
        attribute: String,
    },
    NoViolations,
}

impl PipelineEvent {
    pub fn level(&self) -> Level {
        match self {
            PipelineEvent::QueryFailed { .. } => Level::ERROR,
            PipelineEvent::AttributeUnmatched { .. }
            | PipelineEvent::NoCriticalAttributes
            | PipelineEvent::MissingStatistic { .. }
            | PipelineEvent::NoViolations => Level::WARN,
            PipelineEvent::NoRoles { .. }
            | PipelineEvent::NotCritical { .. }
            | PipelineEvent::NoDimensions { .. }
            | PipelineEvent::NoRulesFired { .. } => Level::INFO,
            PipelineEvent::AttributeMatched { .. } => Level::DEBUG,
        }
    }

    /// Attribute the event is about, if any.
    pub fn attribute(&self) -> Option<&str> {
        match self {
            PipelineEvent::QueryFailed { attribute, .. }
            | PipelineEvent::AttributeMatched { attribute, .. }
            | PipelineEvent::AttributeUnmatched { attribute, .. }
            | PipelineEvent::NoRoles { attribute }
            | PipelineEvent::NotCritical { attribute, .. }
            | PipelineEvent::NoDimensions { attribute }
            | PipelineEvent::MissingStatistic { attribute, .. }
            | PipelineEvent::NoRulesFired { attribute } => Some(attribute),
            PipelineEvent::NoCriticalAttributes | PipelineEvent::NoViolations => None,
        }
    }
}

impl fmt::Display for PipelineEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineEvent::QueryFailed {
                attribute,
                query,
                reason,
            } => write!(
                f,
                "[CRITICAL] search failed for attribute '{}' using {}: {}",
                attribute, query, reason
            ),
            PipelineEvent::AttributeMatched {
                attribute,
                entity,
                via,
            } => write!(
                f,
                "[CRITICAL] matched attribute '{}' to ontology entity '{}' via {}",
                attribute, entity, via
            ),
            PipelineEvent::AttributeUnmatched {
                attribute,
                attempts,
            } => {
                let tried = if attempts.is_empty() {
                    "<none>".to_string()
                } else {
                    attempts
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", ")
                };
                write!(
                    f,
                    "[CRITICAL] attribute '{}' not found in ontology; tried: {}",
                    attribute, tried
                )
            }
            PipelineEvent::NoRoles { attribute } => write!(
                f,
                "[CRITICAL] attribute '{}' has no roles and will be skipped",
                attribute
            ),
            PipelineEvent::NotCritical { attribute, roles } => {
                let roles: Vec<&str> = roles.iter().map(Role::as_str).collect();
                write!(
                    f,
                    "[CRITICAL] attribute '{}' roles {:?} do not meet critical criteria",
                    attribute, roles
                )
            }
            PipelineEvent::NoCriticalAttributes => {
                f.write_str("[CRITICAL] no critical attributes detected in profile")
            }
            PipelineEvent::NoDimensions { attribute } => write!(
                f,
                "[MAPPING] attribute '{}' produced no dimensions",
                attribute
            ),
            PipelineEvent::MissingStatistic {
                attribute,
                statistic,
                rule,
            } => write!(
                f,
                "[VIOLATION] missing {} for attribute '{}'; cannot evaluate {} rule",
                statistic, attribute, rule
            ),
            PipelineEvent::NoRulesFired { attribute } => {
                write!(f, "[VIOLATION] no rules fired for attribute '{}'", attribute)
            }
            PipelineEvent::NoViolations => f.write_str(
                "[VIOLATION] no violations produced; check ontology mappings and thresholds",
            ),
        }
    }
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: PipelineEvent);
}

/// Default sink: forwards every event to `tracing` at the event's level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: PipelineEvent) {
        let attribute = event.attribute().unwrap_or("-");
        match event.level() {
            Level::ERROR => tracing::error!(attribute, "{}", event),
            Level::WARN => tracing::warn!(attribute, "{}", event),
            Level::INFO => tracing::info!(attribute, "{}", event),
            Level::DEBUG => tracing::debug!(attribute, "{}", event),
            _ => tracing::trace!(attribute, "{}", event),
        }
    }
}

/// Keeps every event in memory, e.g. to attach the diagnostics of a run
/// to its report.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<PipelineEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn warnings(&self) -> Vec<PipelineEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.level() <= Level::WARN)
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: PipelineEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}
