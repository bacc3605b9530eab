// finova-core/src/domain/knowledge/testing.rs

// Hand-built store for the reasoning-stage unit tests. IRI patterns only
// support the leading `*` shapes the resolver produces.

use crate::domain::knowledge::vocabulary::{Dimension, Impact, Role};
use crate::domain::ports::ontology::{EntityRef, OntologyError, OntologyQuery, OntologyStore};
use std::collections::HashMap;

#[derive(Default)]
pub(crate) struct StubOntology {
    entities: Vec<(String, Vec<String>, Vec<Role>)>,
    triggers: HashMap<Role, Vec<Dimension>>,
    affects: HashMap<Dimension, Vec<Impact>>,
    failing: Vec<OntologyQuery>,
}

impl StubOntology {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn entity(mut self, iri: &str, labels: &[&str], roles: &[&str]) -> Self {
        self.entities.push((
            iri.to_string(),
            labels.iter().map(|l| l.to_string()).collect(),
            roles.iter().map(|r| Role::parse(r)).collect(),
        ));
        self
    }

    pub(crate) fn role(mut self, role: &str, dimensions: &[&str]) -> Self {
        self.triggers.insert(
            Role::parse(role),
            dimensions.iter().map(|d| Dimension::parse(d)).collect(),
        );
        self
    }

    pub(crate) fn dimension(mut self, dimension: &str, impacts: &[&str]) -> Self {
        self.affects.insert(
            Dimension::parse(dimension),
            impacts.iter().filter_map(|i| Impact::new(i)).collect(),
        );
        self
    }

    pub(crate) fn failing_on(mut self, query: OntologyQuery) -> Self {
        self.failing.push(query);
        self
    }
}

impl OntologyStore for StubOntology {
    fn search_one(&self, query: &OntologyQuery) -> Result<Option<EntityRef>, OntologyError> {
        if self.failing.contains(query) {
            return Err(OntologyError::Invalid(format!("stub failure on {}", query)));
        }
        let found = self.entities.iter().find(|(iri, labels, _)| match query {
            OntologyQuery::Iri(pattern) => match pattern.strip_prefix('*') {
                Some(suffix) => iri.ends_with(suffix),
                None => iri == pattern,
            },
            OntologyQuery::Label(label) => labels.contains(label),
        });
        Ok(found.map(|(iri, _, _)| EntityRef::new(iri.clone())))
    }

    fn roles_of(&self, entity: &EntityRef) -> Vec<Role> {
        self.entities
            .iter()
            .find(|(iri, _, _)| iri == entity.iri())
            .map(|(_, _, roles)| roles.clone())
            .unwrap_or_default()
    }

    fn dimensions_of(&self, role: &Role) -> Vec<Dimension> {
        self.triggers.get(role).cloned().unwrap_or_default()
    }

    fn impacts_of(&self, dimension: &Dimension) -> Vec<Impact> {
        self.affects.get(dimension).cloned().unwrap_or_default()
    }
}
