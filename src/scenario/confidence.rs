//! Confidence levels
//!
//! A coarse label for how much of a scenario is covered by well-modelled
//! intervention kinds.

use serde::{Deserialize, Serialize};

use super::intervention::Intervention;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    /// Numeric weight used when averaging across scenarios
    pub fn score(self) -> u8 {
        match self {
            ConfidenceLevel::High => 3,
            ConfidenceLevel::Medium => 2,
            ConfidenceLevel::Low => 1,
        }
    }

    /// Bucket an averaged score back into a level
    pub fn from_average(avg: f64) -> Self {
        if avg >= 2.5 {
            ConfidenceLevel::High
        } else if avg >= 1.5 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }

    /// Average a set of levels; an empty set is `Low`
    pub fn average<I>(levels: I) -> Self
    where
        I: IntoIterator<Item = ConfidenceLevel>,
    {
        let (sum, count) = levels
            .into_iter()
            .fold((0u32, 0u32), |(sum, count), level| (sum + u32::from(level.score()), count + 1));

        if count == 0 {
            return ConfidenceLevel::Low;
        }
        Self::from_average(f64::from(sum) / f64::from(count))
    }
}

/// Share of known intervention kinds, bucketed: `>= 0.8` high, `>= 0.5` medium
pub fn classify_confidence(interventions: &[Intervention]) -> ConfidenceLevel {
    if interventions.is_empty() {
        return ConfidenceLevel::Low;
    }

    let known = interventions.iter().filter(|i| i.is_known()).count();
    let ratio = known as f64 / interventions.len() as f64;

    if ratio >= 0.8 {
        ConfidenceLevel::High
    } else if ratio >= 0.5 {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    }
}
