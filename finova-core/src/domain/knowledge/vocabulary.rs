// finova-core/src/domain/knowledge/vocabulary.rs

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

// --- ROLES (open vocabulary) ---

/// Role attached to an ontology entity. Only the first three are critical;
/// anything else the ontology declares is carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Mandatory,
    Identifier,
    Reference,
    Other(String),
}

impl Role {
    pub const CRITICAL: [Role; 3] = [Role::Mandatory, Role::Identifier, Role::Reference];

    /// Case-sensitive: ontology role names are identifiers, not free text.
    pub fn parse(name: &str) -> Self {
        match name.trim() {
            "Mandatory" => Role::Mandatory,
            "Identifier" => Role::Identifier,
            "Reference" => Role::Reference,
            other => Role::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Mandatory => "Mandatory",
            Role::Identifier => "Identifier",
            Role::Reference => "Reference",
            Role::Other(name) => name,
        }
    }

    pub fn is_critical(&self) -> bool {
        Role::CRITICAL.contains(self)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Role::parse(&s))
    }
}

// --- DIMENSIONS (closed vocabulary + explicit escape hatch) ---

/// Quality dimension. The five named variants are the scored ones; a
/// dimension the ontology declares outside that set is kept as
/// `Unrecognized` so it still shows up on violations, but it never scores.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Dimension {
    Completeness,
    Uniqueness,
    Integrity,
    Timeliness,
    Validity,
    Unrecognized(String),
}

impl Dimension {
    /// Scored dimensions, in weight-table order.
    pub const SCORED: [Dimension; 5] = [
        Dimension::Completeness,
        Dimension::Uniqueness,
        Dimension::Integrity,
        Dimension::Timeliness,
        Dimension::Validity,
    ];

    pub fn parse(name: &str) -> Self {
        match name.trim() {
            "Completeness" => Dimension::Completeness,
            "Uniqueness" => Dimension::Uniqueness,
            "Integrity" => Dimension::Integrity,
            "Timeliness" => Dimension::Timeliness,
            "Validity" => Dimension::Validity,
            other => Dimension::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Dimension::Completeness => "Completeness",
            Dimension::Uniqueness => "Uniqueness",
            Dimension::Integrity => "Integrity",
            Dimension::Timeliness => "Timeliness",
            Dimension::Validity => "Validity",
            Dimension::Unrecognized(name) => name,
        }
    }

    /// Position in [`Dimension::SCORED`], if scored.
    pub(crate) fn scored_index(&self) -> Option<usize> {
        match self {
            Dimension::Completeness => Some(0),
            Dimension::Uniqueness => Some(1),
            Dimension::Integrity => Some(2),
            Dimension::Timeliness => Some(3),
            Dimension::Validity => Some(4),
            Dimension::Unrecognized(_) => None,
        }
    }
}

// Sets of dimensions are sorted by name, not by declaration order.
impl Ord for Dimension {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for Dimension {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Dimension {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Dimension {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Dimension::parse(&s))
    }
}

// --- IMPACTS (open vocabulary, validated) ---

/// Business impact affected by a dimension. Any non-blank name is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Impact(String);

impl Impact {
    pub fn new(name: &str) -> Option<Self> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Impact {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Impact::new(&s).ok_or_else(|| serde::de::Error::custom("impact name cannot be blank"))
    }
}

// --- RULE OUTCOMES (closed) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    /// Ranking key: High first.
    pub fn rank(self) -> u8 {
        match self {
            Severity::High => 0,
            Severity::Medium => 1,
            Severity::Low => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Issue {
    MandatoryMissingValues,
    IdentifierNotUnique,
    MissingValues,
}

impl Issue {
    pub fn as_str(self) -> &'static str {
        match self {
            Issue::MandatoryMissingValues => "mandatory_missing_values",
            Issue::IdentifierNotUnique => "identifier_not_unique",
            Issue::MissingValues => "missing_values",
        }
    }

    /// Plain wording used in explanations.
    pub fn describe(self) -> &'static str {
        match self {
            Issue::MandatoryMissingValues => "missing required values",
            Issue::IdentifierNotUnique => "duplicate identifiers",
            Issue::MissingValues => "missing values",
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
