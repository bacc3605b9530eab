// finova-core/src/domain/profile.rs

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Statistics of one dataset column, as produced by the profiler.
/// On the wire the name is the map key, not a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeProfile {
    #[serde(skip)]
    pub name: String,
    #[serde(default)]
    pub null_rate: Option<f64>,
    #[serde(default)]
    pub duplicate_rate: Option<f64>,
    #[serde(default, rename = "data_type", alias = "declared_type")]
    pub declared_type: String,
}

impl AttributeProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            null_rate: None,
            duplicate_rate: None,
            declared_type: String::new(),
        }
    }

    pub fn with_null_rate(mut self, rate: f64) -> Self {
        self.null_rate = Some(rate);
        self
    }

    pub fn with_duplicate_rate(mut self, rate: f64) -> Self {
        self.duplicate_rate = Some(rate);
        self
    }

    pub fn with_type(mut self, declared_type: impl Into<String>) -> Self {
        self.declared_type = declared_type.into();
        self
    }
}

/// Raw document; names are copied from the keys into each entry.
#[derive(Debug, Deserialize)]
struct ProfileDocument {
    #[serde(default)]
    attributes: IndexMap<String, AttributeProfile>,
}

impl From<ProfileDocument> for DatasetProfile {
    fn from(document: ProfileDocument) -> Self {
        document
            .attributes
            .into_iter()
            .map(|(name, stats)| AttributeProfile { name, ..stats })
            .collect()
    }
}

/// Per-column statistics of a dataset. Column order is significant: every
/// reasoning stage walks attributes in this order.
///
/// Serialized as `{"attributes": {"<name>": {null_rate, duplicate_rate, data_type}}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "ProfileDocument")]
pub struct DatasetProfile {
    attributes: IndexMap<String, AttributeProfile>,
}

impl DatasetProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an attribute; a name already present keeps its position.
    pub fn insert(&mut self, attribute: AttributeProfile) {
        self.attributes.insert(attribute.name.clone(), attribute);
    }

    pub fn with(mut self, attribute: AttributeProfile) -> Self {
        self.insert(attribute);
        self
    }

    pub fn get(&self, name: &str) -> Option<&AttributeProfile> {
        self.attributes.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttributeProfile> {
        self.attributes.values()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl FromIterator<AttributeProfile> for DatasetProfile {
    fn from_iter<I: IntoIterator<Item = AttributeProfile>>(iter: I) -> Self {
        let mut profile = DatasetProfile::new();
        for attribute in iter {
            profile.insert(attribute);
        }
        profile
    }
}
