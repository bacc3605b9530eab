// finova-core/src/domain/knowledge/mapper.rs

use crate::domain::knowledge::resolver::CriticalAttribute;
use crate::domain::knowledge::vocabulary::{Dimension, Impact, Role};
use crate::domain::ports::events::{EventSink, PipelineEvent};
use crate::domain::ports::ontology::OntologyStore;
use crate::domain::profile::AttributeProfile;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, instrument};

/// Critical attribute with its dimensions and impacts resolved. The entity
/// handle is gone at this point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappedAttribute {
    pub name: String,
    pub roles: Vec<Role>,
    #[serde(skip)]
    pub stats: AttributeProfile,
    /// Sorted by name, no duplicates.
    pub dimensions: Vec<Dimension>,
    /// Sorted by name, no duplicates.
    pub impacts: Vec<Impact>,
}

/// Expands roles into the dimensions they trigger and the impacts those
/// dimensions affect. Attributes without any dimension are kept.
#[instrument(skip_all, fields(attributes = critical.len()))]
pub fn map_dimensions_and_impacts(
    store: &dyn OntologyStore,
    critical: Vec<CriticalAttribute>,
    sink: &dyn EventSink,
) -> Vec<MappedAttribute> {
    let mut mapped = Vec::with_capacity(critical.len());

    for attr in critical {
        let mut dimensions: BTreeSet<Dimension> = BTreeSet::new();
        let mut impacts: BTreeSet<Impact> = BTreeSet::new();

        for role in &attr.roles {
            let triggered = store.dimensions_of(role);
            if triggered.is_empty() {
                debug!(attribute = %attr.name, role = %role, "role triggers no dimensions");
            }

            for dim in triggered {
                // A dimension reached through two roles is expanded once.
                if dimensions.contains(&dim) {
                    continue;
                }
                impacts.extend(store.impacts_of(&dim));
                dimensions.insert(dim);
            }
        }

        if dimensions.is_empty() {
            sink.emit(PipelineEvent::NoDimensions {
                attribute: attr.name.clone(),
            });
        }

        let CriticalAttribute {
            name, roles, stats, ..
        } = attr;

        mapped.push(MappedAttribute {
            name,
            roles,
            stats,
            dimensions: dimensions.into_iter().collect(),
            impacts: impacts.into_iter().collect(),
        });
    }

    mapped
}
