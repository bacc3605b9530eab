// finova-core/src/domain/knowledge/scoring.rs

use crate::domain::knowledge::reasoner::Violation;
use crate::domain::knowledge::vocabulary::Dimension;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Weight of each scored dimension in the overall DQS. Sums to 1.0.
pub const DIMENSION_WEIGHTS: [(Dimension, f64); 5] = [
    (Dimension::Completeness, 0.35),
    (Dimension::Uniqueness, 0.25),
    (Dimension::Integrity, 0.15),
    (Dimension::Timeliness, 0.15),
    (Dimension::Validity, 0.10),
];

/// Rounds to 2 decimals, half-to-even on the exact binary value
/// (0.975 is stored as 0.97499.. and gives 0.97).
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Score per scored dimension. Always holds all five, in weight-table order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionScores([f64; 5]);

impl Default for DimensionScores {
    fn default() -> Self {
        Self([1.0; 5])
    }
}

impl DimensionScores {
    pub fn get(&self, dimension: &Dimension) -> Option<f64> {
        dimension.scored_index().map(|i| self.0[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, f64)> + '_ {
        Dimension::SCORED.into_iter().zip(self.0.iter().copied())
    }

    /// Weighted sum, rounded after weighting.
    pub fn overall(&self) -> f64 {
        let overall: f64 = DIMENSION_WEIGHTS
            .iter()
            .zip(self.0.iter())
            .map(|((_, weight), score)| score * weight)
            .sum();
        round2(overall)
    }
}

impl Serialize for DimensionScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(5))?;
        for (dimension, score) in self.iter() {
            map.serialize_entry(dimension.as_str(), &score)?;
        }
        map.end()
    }
}

struct ScoresVisitor;

impl<'de> Visitor<'de> for ScoresVisitor {
    type Value = DimensionScores;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of dimension name to score")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut scores = DimensionScores::default();
        while let Some((name, score)) = access.next_entry::<String, f64>()? {
            // Unknown keys are tolerated; absent ones keep the perfect default.
            if let Some(i) = Dimension::parse(&name).scored_index() {
                scores.0[i] = score;
            }
        }
        Ok(scores)
    }
}

impl<'de> Deserialize<'de> for DimensionScores {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ScoresVisitor)
    }
}

/// Worst violation rate seen per scored dimension (0.0 when untouched).
fn max_rate_by_dimension(violations: &[Violation]) -> [f64; 5] {
    let mut max_rates = [0.0_f64; 5];
    for violation in violations {
        for dimension in &violation.dimensions {
            if let Some(i) = dimension.scored_index() {
                max_rates[i] = max_rates[i].max(violation.violation_rate);
            }
        }
    }
    max_rates
}

/// `1 - worst rate`, clamped to [0, 1]. Violations in the same dimension
/// do not compound.
pub fn compute_dimension_scores(violations: &[Violation]) -> DimensionScores {
    let max_rates = max_rate_by_dimension(violations);
    DimensionScores(max_rates.map(|rate| round2((1.0 - rate).clamp(0.0, 1.0))))
}

pub fn compute_overall_dqs(violations: &[Violation]) -> (f64, DimensionScores) {
    let scores = compute_dimension_scores(violations);
    (scores.overall(), scores)
}
