//! Scenario comparison
//!
//! Ranks simulated scenarios by return on investment, equity and speed.
//! Ties always resolve to the scenario that appears first.

use serde::Serialize;

use super::confidence::ConfidenceLevel;
use super::engine::{serialize_unbounded, ScenarioResult};

const NO_SCENARIOS: &str = "No scenarios provided";

/// Outcome of comparing a list of scenarios
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ComparisonResult {
    /// The caller supplied an empty list
    NoScenarios { error: String },
    Compared(ScenarioComparison),
}

impl ComparisonResult {
    pub(crate) fn no_scenarios() -> Self {
        ComparisonResult::NoScenarios {
            error: NO_SCENARIOS.to_string(),
        }
    }

    pub fn comparison(&self) -> Option<&ScenarioComparison> {
        match self {
            ComparisonResult::Compared(comparison) => Some(comparison),
            ComparisonResult::NoScenarios { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ComparisonResult::NoScenarios { error } => Some(error),
            ComparisonResult::Compared(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioComparison {
    pub scenarios: Vec<ScenarioResult>,
    pub comparison: ComparisonHighlights,
    pub summary: ComparisonSummary,
}

/// Best scenario per criterion
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonHighlights {
    pub best_roi: BestRoi,
    pub best_equity: BestEquity,
    pub fastest: Fastest,
}

/// Lowest cost per beneficiary
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BestRoi {
    pub scenario_name: String,
    pub scenario_index: usize,
    #[serde(serialize_with = "serialize_unbounded")]
    pub cost_per_beneficiary: f64,
}

/// Highest cumulative equity score
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BestEquity {
    pub scenario_name: String,
    pub scenario_index: usize,
    pub equity_score: f64,
}

/// Shortest implementation timeline
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fastest {
    pub scenario_name: String,
    pub scenario_index: usize,
    pub months: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSummary {
    pub total_scenarios: usize,
    /// Summed across scenarios; overlapping interventions are counted once per scenario
    pub total_beneficiaries: u64,
    pub total_cost_usd: f64,
    pub avg_confidence: ConfidenceLevel,
}

impl ScenarioComparison {
    /// Build the comparison; `None` for an empty list
    pub fn from_results(scenarios: Vec<ScenarioResult>) -> Option<Self> {
        let roi_idx = first_extreme(&scenarios, |s| s.metrics.cost_per_beneficiary, |a, b| a < b)?;
        let equity_idx = first_extreme(&scenarios, |s| s.metrics.equity_impact_score, |a, b| a > b)?;
        let fastest_idx = first_extreme(&scenarios, |s| s.metrics.implementation_time_months, |a, b| a < b)?;

        let roi = &scenarios[roi_idx];
        let equity = &scenarios[equity_idx];
        let fastest = &scenarios[fastest_idx];

        let comparison = ComparisonHighlights {
            best_roi: BestRoi {
                scenario_name: roi.name.clone(),
                scenario_index: roi_idx,
                cost_per_beneficiary: roi.metrics.cost_per_beneficiary,
            },
            best_equity: BestEquity {
                scenario_name: equity.name.clone(),
                scenario_index: equity_idx,
                equity_score: equity.metrics.equity_impact_score,
            },
            fastest: Fastest {
                scenario_name: fastest.name.clone(),
                scenario_index: fastest_idx,
                months: fastest.metrics.implementation_time_months,
            },
        };

        let summary = ComparisonSummary {
            total_scenarios: scenarios.len(),
            total_beneficiaries: scenarios
                .iter()
                .fold(0u64, |acc, s| acc.saturating_add(s.metrics.people_benefited)),
            total_cost_usd: scenarios.iter().map(|s| s.metrics.total_cost_usd).sum(),
            avg_confidence: ConfidenceLevel::average(
                scenarios.iter().map(|s| s.metrics.confidence_level),
            ),
        };

        Some(Self {
            scenarios,
            comparison,
            summary,
        })
    }
}

/// Index of the first element whose key beats every earlier one under `better`
fn first_extreme<T, K, F, B>(items: &[T], key: F, better: B) -> Option<usize>
where
    K: Copy,
    F: Fn(&T) -> K,
    B: Fn(K, K) -> bool,
{
    let mut iter = items.iter().enumerate();
    let (mut best_idx, first) = iter.next()?;
    let mut best_key = key(first);

    for (idx, item) in iter {
        let candidate = key(item);
        if better(candidate, best_key) {
            best_idx = idx;
            best_key = candidate;
        }
    }

    Some(best_idx)
}
