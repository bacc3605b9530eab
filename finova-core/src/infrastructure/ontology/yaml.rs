// finova-core/src/infrastructure/ontology/yaml.rs

// Ontology document on disk: entities with roles, role -> dimension
// triggers, dimension -> impact edges. Loaded once per run, then read-only.

use crate::domain::knowledge::vocabulary::{Dimension, Impact, Role};
use crate::domain::ports::ontology::{
    EntityRef, OntologyError, OntologyLoader, OntologyQuery, OntologyStore,
};
use regex::Regex;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

// --- DOCUMENT (wire shape) ---

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct OntologyDocument {
    #[serde(default)]
    base_iri: String,
    #[serde(default)]
    entities: Vec<EntityDecl>,
    #[serde(default)]
    roles: BTreeMap<String, RoleDecl>,
    #[serde(default)]
    dimensions: BTreeMap<String, DimensionDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EntityDecl {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    iri: Option<String>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    labels: Vec<String>,
    #[serde(default)]
    roles: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RoleDecl {
    #[serde(default)]
    triggers: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct DimensionDecl {
    #[serde(default)]
    affects: Vec<String>,
}

// --- STORE ---

#[derive(Debug, Clone)]
struct Entity {
    iri: String,
    labels: Vec<String>,
    roles: Vec<Role>,
}

/// Ontology held in memory. Entities keep document order; the first match wins.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOntology {
    base_iri: String,
    entities: Vec<Entity>,
    triggers: HashMap<Role, Vec<Dimension>>,
    affects: HashMap<Dimension, Vec<Impact>>,
}

fn push_unique<T: PartialEq>(items: &mut Vec<T>, item: T) {
    if !items.contains(&item) {
        items.push(item);
    }
}

fn non_blank(name: &str) -> Option<&str> {
    let name = name.trim();
    (!name.is_empty()).then_some(name)
}

/// Anchored glob: `*` matches any run of characters, everything else is literal.
fn glob_to_regex(pattern: &str) -> Result<Regex, OntologyError> {
    let body: Vec<String> = pattern.split('*').map(regex::escape).collect();
    Regex::new(&format!("^{}$", body.join(".*"))).map_err(|e| OntologyError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

impl InMemoryOntology {
    /// Parses an ontology document. `origin` only feeds error messages.
    pub fn parse(content: &str, origin: &Path) -> Result<Self, OntologyError> {
        let doc: OntologyDocument =
            serde_yaml::from_str(content).map_err(|e| OntologyError::Parse {
                path: origin.to_path_buf(),
                reason: e.to_string(),
            })?;
        Self::from_document(doc)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, OntologyError> {
        Self::parse(content, Path::new("<inline>"))
    }

    fn from_document(doc: OntologyDocument) -> Result<Self, OntologyError> {
        let mut entities = Vec::with_capacity(doc.entities.len());

        for (position, decl) in doc.entities.into_iter().enumerate() {
            let name = decl.name.as_deref().and_then(non_blank);
            let iri = match (decl.iri.as_deref().and_then(non_blank), name) {
                (Some(iri), _) => iri.to_string(),
                (None, Some(name)) => format!("{}{}", doc.base_iri, name),
                (None, None) => {
                    return Err(OntologyError::Invalid(format!(
                        "entity #{} has neither 'name' nor 'iri'",
                        position + 1
                    )));
                }
            };

            let mut labels: Vec<String> = Vec::new();
            for label in decl.label.iter().chain(decl.labels.iter()) {
                if let Some(label) = non_blank(label) {
                    push_unique(&mut labels, label.to_string());
                }
            }
            if labels.is_empty()
                && let Some(name) = name
            {
                labels.push(name.to_string());
            }

            let mut roles: Vec<Role> = Vec::new();
            for role in decl.roles.iter().filter_map(|r| non_blank(r)) {
                push_unique(&mut roles, Role::parse(role));
            }

            entities.push(Entity { iri, labels, roles });
        }

        let mut triggers: HashMap<Role, Vec<Dimension>> = HashMap::new();
        for (role, decl) in doc.roles {
            let Some(role) = non_blank(&role) else {
                continue;
            };
            let dims = triggers.entry(Role::parse(role)).or_default();
            for dim in decl.triggers.iter().filter_map(|d| non_blank(d)) {
                push_unique(dims, Dimension::parse(dim));
            }
        }

        let mut affects: HashMap<Dimension, Vec<Impact>> = HashMap::new();
        for (dimension, decl) in doc.dimensions {
            let Some(dimension) = non_blank(&dimension) else {
                continue;
            };
            let impacts = affects.entry(Dimension::parse(dimension)).or_default();
            for impact in decl.affects.iter().filter_map(|i| Impact::new(i)) {
                push_unique(impacts, impact);
            }
        }

        Ok(Self {
            base_iri: doc.base_iri,
            entities,
            triggers,
            affects,
        })
    }

    pub fn base_iri(&self) -> &str {
        &self.base_iri
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn role_count(&self) -> usize {
        self.triggers.len()
    }

    pub fn dimension_count(&self) -> usize {
        self.affects.len()
    }
}

impl OntologyStore for InMemoryOntology {
    fn search_one(&self, query: &OntologyQuery) -> Result<Option<EntityRef>, OntologyError> {
        let found = match query {
            OntologyQuery::Iri(pattern) => {
                let re = glob_to_regex(pattern)?;
                self.entities.iter().find(|e| re.is_match(&e.iri))
            }
            OntologyQuery::Label(label) => self
                .entities
                .iter()
                .find(|e| e.labels.iter().any(|l| l == label)),
        };
        Ok(found.map(|e| EntityRef::new(e.iri.clone())))
    }

    fn roles_of(&self, entity: &EntityRef) -> Vec<Role> {
        self.entities
            .iter()
            .find(|e| e.iri == entity.iri())
            .map(|e| e.roles.clone())
            .unwrap_or_default()
    }

    fn dimensions_of(&self, role: &Role) -> Vec<Dimension> {
        self.triggers.get(role).cloned().unwrap_or_default()
    }

    fn impacts_of(&self, dimension: &Dimension) -> Vec<Impact> {
        self.affects.get(dimension).cloned().unwrap_or_default()
    }
}

// --- LOADER ---

#[derive(Debug, Clone)]
pub struct YamlOntologyLoader {
    path: PathBuf,
}

impl YamlOntologyLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OntologyLoader for YamlOntologyLoader {
    type Store = InMemoryOntology;

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<InMemoryOntology, OntologyError> {
        if !self.path.exists() {
            return Err(OntologyError::NotFound(self.path.clone()));
        }

        let content = fs::read_to_string(&self.path).map_err(|source| OntologyError::Io {
            path: self.path.clone(),
            source,
        })?;
        let ontology = InMemoryOntology::parse(&content, &self.path)?;

        info!(
            base_iri = %ontology.base_iri(),
            entities = ontology.entity_count(),
            roles = ontology.role_count(),
            dimensions = ontology.dimension_count(),
            "Ontology loaded"
        );
        if ontology.entity_count() == 0 {
            warn!("No entities discovered in ontology");
        }
        if ontology.role_count() == 0 {
            warn!("No role triggers discovered in ontology");
        }

        Ok(ontology)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    const KYC: &str = r#"
base_iri: "http://www.finova.ai/ontology#"
entities:
  - name: client_id
    label: Client Identifier
    roles: [Identifier, Mandatory, Identifier]
  - name: country
    roles: [Mandatory, Reference]
  - iri: "http://other.org/vocab#other_client_id"
    labels: [Legacy Client]
    roles: [Reference]
roles:
  Identifier: { triggers: [Uniqueness, Integrity] }
  Mandatory: { triggers: [Completeness] }
dimensions:
  Uniqueness: { affects: [RegulatoryRisk, DuplicateOnboarding] }
  Completeness: { affects: ["  ", OperationalRisk] }
"#;

    fn store() -> Result<InMemoryOntology> {
        Ok(InMemoryOntology::from_yaml_str(KYC)?)
    }

    fn iri(query: OntologyQuery, store: &InMemoryOntology) -> Result<Option<String>> {
        Ok(store.search_one(&query)?.map(|e| e.iri().to_string()))
    }

    #[test]
    fn test_iri_glob_is_anchored_and_case_sensitive() -> Result<()> {
        let store = store()?;
        assert_eq!(
            iri(OntologyQuery::Iri("*#client_id".into()), &store)?.as_deref(),
            Some("http://www.finova.ai/ontology#client_id")
        );
        // Both entities end with "client_id"; document order decides.
        assert_eq!(
            iri(OntologyQuery::Iri("*client_id".into()), &store)?.as_deref(),
            Some("http://www.finova.ai/ontology#client_id")
        );
        assert_eq!(iri(OntologyQuery::Iri("*#Client_ID".into()), &store)?, None);
        assert_eq!(iri(OntologyQuery::Iri("*#client".into()), &store)?, None);
        Ok(())
    }

    #[test]
    fn test_regex_characters_are_literal() -> Result<()> {
        let store = store()?;
        assert_eq!(iri(OntologyQuery::Iri("*#client.id".into()), &store)?, None);
        assert_eq!(iri(OntologyQuery::Iri("*(x)[".into()), &store)?, None);
        Ok(())
    }

    #[test]
    fn test_label_search() -> Result<()> {
        let store = store()?;
        assert_eq!(
            iri(OntologyQuery::Label("Client Identifier".into()), &store)?.as_deref(),
            Some("http://www.finova.ai/ontology#client_id")
        );
        // Name stands in for a missing label.
        assert_eq!(
            iri(OntologyQuery::Label("country".into()), &store)?.as_deref(),
            Some("http://www.finova.ai/ontology#country")
        );
        // ... but not when a label is declared.
        assert_eq!(iri(OntologyQuery::Label("client_id".into()), &store)?, None);
        Ok(())
    }

    #[test]
    fn test_edges() -> Result<()> {
        let store = store()?;
        let entity = EntityRef::new("http://www.finova.ai/ontology#client_id");
        assert_eq!(store.roles_of(&entity), vec![Role::Identifier, Role::Mandatory]);
        assert_eq!(
            store.dimensions_of(&Role::Identifier),
            vec![Dimension::Uniqueness, Dimension::Integrity]
        );
        assert!(store.dimensions_of(&Role::Reference).is_empty());

        let impacts: Vec<String> = store
            .impacts_of(&Dimension::Completeness)
            .iter()
            .map(|i| i.to_string())
            .collect();
        assert_eq!(impacts, vec!["OperationalRisk"]);
        assert!(store.roles_of(&EntityRef::new("http://nowhere#x")).is_empty());
        Ok(())
    }

    #[test]
    fn test_entity_without_name_or_iri_is_invalid() {
        let result = InMemoryOntology::from_yaml_str("entities:\n  - roles: [Mandatory]");
        assert!(matches!(result, Err(OntologyError::Invalid(_))));
    }

    #[test]
    fn test_loader_errors() -> Result<()> {
        let dir = tempdir()?;

        let missing = YamlOntologyLoader::new(dir.path().join("absent.yaml"));
        assert!(matches!(missing.load(), Err(OntologyError::NotFound(_))));

        let broken_path = dir.path().join("broken.yaml");
        fs::write(&broken_path, "entities: [unterminated")?;
        let broken = YamlOntologyLoader::new(&broken_path);
        assert!(matches!(broken.load(), Err(OntologyError::Parse { .. })));
        Ok(())
    }

    #[test]
    fn test_loader_reads_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("finova.yaml");
        fs::write(&path, KYC)?;

        let store = YamlOntologyLoader::new(&path).load()?;
        assert_eq!(store.entity_count(), 3);
        assert_eq!(store.role_count(), 2);
        assert_eq!(store.dimension_count(), 2);
        Ok(())
    }
}
