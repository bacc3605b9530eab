// finova-core/src/domain/knowledge/resolver.rs

use crate::domain::knowledge::vocabulary::Role;
use crate::domain::ports::events::{EventSink, PipelineEvent};
use crate::domain::ports::ontology::{EntityRef, OntologyQuery, OntologyStore};
use crate::domain::profile::{AttributeProfile, DatasetProfile};
use tracing::instrument;

/// Profiled attribute that matched the ontology and holds at least one
/// critical role. Carries the entity handle to the mapper, no further.
#[derive(Debug, Clone, PartialEq)]
pub struct CriticalAttribute {
    pub name: String,
    /// Every role of the entity (deduplicated, ontology order), not only the critical ones.
    pub roles: Vec<Role>,
    pub stats: AttributeProfile,
    pub entity: EntityRef,
}

/// Name variants tried against the ontology, in canonical order:
/// raw, trimmed, spaces to underscores, lower-cased, lower-cased with underscores.
/// Empty and repeated variants are skipped.
pub fn name_variants(attribute: &str) -> Vec<String> {
    let lowered = attribute.to_lowercase();
    let candidates = [
        attribute.to_string(),
        attribute.trim().to_string(),
        attribute.replace(' ', "_"),
        lowered.clone(),
        lowered.replace(' ', "_"),
    ];

    let mut variants: Vec<String> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !candidate.is_empty() && !variants.contains(&candidate) {
            variants.push(candidate);
        }
    }
    variants
}

/// Ordered lookups for one attribute. Per variant: `*#variant`, `*variant`, label.
pub fn search_attempts(attribute: &str) -> Vec<OntologyQuery> {
    let mut attempts: Vec<OntologyQuery> = Vec::new();
    for variant in name_variants(attribute) {
        let shapes = [
            OntologyQuery::Iri(format!("*#{}", variant)),
            OntologyQuery::Iri(format!("*{}", variant)),
            OntologyQuery::Label(variant),
        ];
        for attempt in shapes {
            if !attempts.contains(&attempt) {
                attempts.push(attempt);
            }
        }
    }
    attempts
}

/// First entity matching any attempt. A failing query counts as "no match".
/// Returns the attempts alongside so callers can report what was tried.
pub fn resolve_entity(
    store: &dyn OntologyStore,
    attribute: &str,
    sink: &dyn EventSink,
) -> (Option<(EntityRef, OntologyQuery)>, Vec<OntologyQuery>) {
    let attempts = search_attempts(attribute);

    for attempt in &attempts {
        match store.search_one(attempt) {
            Ok(Some(entity)) => return (Some((entity, attempt.clone())), attempts),
            Ok(None) => continue,
            Err(e) => sink.emit(PipelineEvent::QueryFailed {
                attribute: attribute.to_string(),
                query: attempt.clone(),
                reason: e.to_string(),
            }),
        }
    }

    (None, attempts)
}

fn dedup_roles(roles: Vec<Role>) -> Vec<Role> {
    let mut unique: Vec<Role> = Vec::with_capacity(roles.len());
    for role in roles {
        if !unique.contains(&role) {
            unique.push(role);
        }
    }
    unique
}

/// Keeps the profiled attributes that resolve to an ontology entity carrying
/// at least one critical role. Everything else is dropped with an event.
///
/// Returns the critical attributes (profile order) and the number of
/// attributes that matched an entity at all.
#[instrument(skip_all, fields(attributes = profile.len()))]
pub fn identify_critical_attributes(
    store: &dyn OntologyStore,
    profile: &DatasetProfile,
    sink: &dyn EventSink,
) -> (Vec<CriticalAttribute>, usize) {
    let mut critical = Vec::new();
    let mut matched = 0;

    for stats in profile.iter() {
        let attr_name = stats.name.as_str();

        let (entity, via) = match resolve_entity(store, attr_name, sink) {
            (Some(found), _) => found,
            (None, attempts) => {
                sink.emit(PipelineEvent::AttributeUnmatched {
                    attribute: attr_name.to_string(),
                    attempts,
                });
                continue;
            }
        };
        matched += 1;

        sink.emit(PipelineEvent::AttributeMatched {
            attribute: attr_name.to_string(),
            entity: entity.iri().to_string(),
            via,
        });

        let roles = dedup_roles(store.roles_of(&entity));
        if roles.is_empty() {
            sink.emit(PipelineEvent::NoRoles {
                attribute: attr_name.to_string(),
            });
            continue;
        }

        if !roles.iter().any(Role::is_critical) {
            sink.emit(PipelineEvent::NotCritical {
                attribute: attr_name.to_string(),
                roles,
            });
            continue;
        }

        critical.push(CriticalAttribute {
            name: attr_name.to_string(),
            roles,
            stats: stats.clone(),
            entity,
        });
    }

    if critical.is_empty() {
        sink.emit(PipelineEvent::NoCriticalAttributes);
    }

    (critical, matched)
}
