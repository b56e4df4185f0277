//! Risk module - debt-fund risk categories and their allocation

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Risk category used for debt-fund risk profiling
///
/// The set is closed: statements only ever report these six buckets,
/// ordered from least to most risky.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RiskCategory {
    /// "Low"
    Low,

    /// "Low to Moderate"
    LowToModerate,

    /// "Moderate"
    Moderate,

    /// "Moderately High"
    ModeratelyHigh,

    /// "High"
    High,

    /// "Very High"
    VeryHigh,
}

impl RiskCategory {
    /// All categories, least risky first
    pub const ALL: [RiskCategory; 6] = [
        RiskCategory::Low,
        RiskCategory::LowToModerate,
        RiskCategory::Moderate,
        RiskCategory::ModeratelyHigh,
        RiskCategory::High,
        RiskCategory::VeryHigh,
    ];

    /// The label as printed on the statement and used as the JSON key
    pub fn label(&self) -> &'static str {
        match self {
            RiskCategory::Low => "Low",
            RiskCategory::LowToModerate => "Low to Moderate",
            RiskCategory::Moderate => "Moderate",
            RiskCategory::ModeratelyHigh => "Moderately High",
            RiskCategory::High => "High",
            RiskCategory::VeryHigh => "Very High",
        }
    }

    /// Look up a category by its exact label
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.label() == label)
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for RiskCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| format!("Invalid risk category: {}", s))
    }
}

/// Allocation percentage per risk category
///
/// Always holds all six categories; anything not reported is 0. On the wire
/// it is a plain `map<string, number>` keyed by [`RiskCategory::label`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct RiskAllocation {
    values: BTreeMap<RiskCategory, f64>,
}

impl RiskAllocation {
    /// Allocation with every category at 0
    pub fn new() -> Self {
        Self {
            values: RiskCategory::ALL.into_iter().map(|c| (c, 0.0)).collect(),
        }
    }

    /// Percentage for a category
    pub fn get(&self, category: RiskCategory) -> f64 {
        self.values.get(&category).copied().unwrap_or(0.0)
    }

    /// Overwrite the percentage for a category
    pub fn set(&mut self, category: RiskCategory, value: f64) {
        self.values.insert(category, value);
    }

    /// Iterate categories least risky first
    pub fn iter(&self) -> impl Iterator<Item = (RiskCategory, f64)> + '_ {
        self.values.iter().map(|(category, value)| (*category, *value))
    }

    /// Sum of all allocations
    pub fn total(&self) -> f64 {
        self.values.values().sum()
    }
}

impl Default for RiskAllocation {
    fn default() -> Self {
        Self::new()
    }
}

impl From<BTreeMap<String, f64>> for RiskAllocation {
    /// Unknown labels are dropped; missing ones stay at 0
    fn from(map: BTreeMap<String, f64>) -> Self {
        let mut allocation = Self::new();
        for (label, value) in map {
            if let Some(category) = RiskCategory::from_label(&label) {
                allocation.set(category, value);
            }
        }
        allocation
    }
}

impl From<RiskAllocation> for BTreeMap<String, f64> {
    fn from(allocation: RiskAllocation) -> Self {
        allocation
            .values
            .into_iter()
            .map(|(category, value)| (category.label().to_string(), value))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip() {
        for category in RiskCategory::ALL {
            assert_eq!(RiskCategory::from_label(category.label()), Some(category));
        }
        assert_eq!(RiskCategory::from_label("low"), None);
        assert!("Extreme".parse::<RiskCategory>().is_err());
    }

    #[test]
    fn test_new_allocation_is_complete() {
        let allocation = RiskAllocation::new();
        assert_eq!(allocation.iter().count(), 6);
        assert_eq!(allocation.total(), 0.0);
    }

    #[test]
    fn test_serializes_all_six_labels() {
        let mut allocation = RiskAllocation::new();
        allocation.set(RiskCategory::ModeratelyHigh, 42.5);

        let json = serde_json::to_value(&allocation).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 6);
        assert_eq!(obj["Moderately High"], 42.5);
        assert_eq!(obj["Very High"], 0.0);
    }

    #[test]
    fn test_deserialize_fills_missing_and_drops_unknown() {
        let allocation: RiskAllocation =
            serde_json::from_str(r#"{"Low": 10.0, "Extreme": 99.0}"#).unwrap();
        assert_eq!(allocation.get(RiskCategory::Low), 10.0);
        assert_eq!(allocation.get(RiskCategory::High), 0.0);
        assert_eq!(allocation.iter().count(), 6);
    }
}
