//! Scenario engine
//!
//! Layers a set of interventions onto a baseline indicator snapshot and reduces
//! their impacts into scenario-level metrics. Interventions are assumed to run in
//! parallel: timelines take the maximum, everything else accumulates.

use serde::{Deserialize, Serialize, Serializer};
use tracing::{debug, info, warn};

use super::comparison::{ComparisonResult, ScenarioComparison};
use super::confidence::{classify_confidence, ConfidenceLevel};
use super::impact::InterventionImpact;
use super::intervention::Intervention;
use crate::models::IndicatorSnapshot;

/// Input for a single simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub interventions: Vec<Intervention>,
}

impl ScenarioConfig {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            interventions: Vec::new(),
        }
    }

    pub fn with_intervention(mut self, intervention: Intervention) -> Self {
        self.interventions.push(intervention);
        self
    }
}

/// Aggregate metrics of a simulated scenario
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioMetrics {
    pub total_cost_usd: f64,
    pub people_benefited: u64,
    pub accessibility_gain: f64,
    /// `+inf` when nobody benefits
    #[serde(serialize_with = "serialize_unbounded")]
    pub cost_per_beneficiary: f64,
    pub equity_impact_score: f64,
    pub implementation_time_months: u32,
    pub confidence_level: ConfidenceLevel,
}

/// Outcome of a single simulation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResult {
    pub name: String,
    pub description: String,
    pub interventions: Vec<Intervention>,
    pub metrics: ScenarioMetrics,
    pub projected_indicators: IndicatorSnapshot,
}

#[derive(Debug, Default)]
struct ImpactTotals {
    cost: f64,
    beneficiaries: u64,
    accessibility_gain: f64,
    implementation_months: u32,
    equity: f64,
}

impl ImpactTotals {
    /// Reduce in canonical order so any permutation of the input sums bit-identically
    fn reduce(mut impacts: Vec<InterventionImpact>) -> Self {
        impacts.sort_by(InterventionImpact::canonical_cmp);

        impacts.iter().fold(Self::default(), |mut totals, impact| {
            totals.cost += impact.cost;
            totals.beneficiaries = totals.beneficiaries.saturating_add(impact.beneficiaries);
            totals.accessibility_gain += impact.accessibility_gain;
            totals.implementation_months = totals.implementation_months.max(impact.implementation_months);
            totals.equity += impact.equity_score;
            totals
        })
    }

    fn cost_per_beneficiary(&self) -> f64 {
        if self.beneficiaries == 0 {
            f64::INFINITY
        } else {
            self.cost / self.beneficiaries as f64
        }
    }
}

/// Simulates and compares scenarios against one immutable baseline
#[derive(Debug, Clone)]
pub struct ScenarioEngine {
    baseline: IndicatorSnapshot,
    /// Score hospitals are measured against; 0 when the baseline has no accessibility group
    baseline_accessibility: f64,
}

impl ScenarioEngine {
    pub fn new(baseline: IndicatorSnapshot) -> Self {
        let baseline_accessibility = baseline.accessibility_score().unwrap_or(0.0);
        Self {
            baseline,
            baseline_accessibility,
        }
    }

    pub fn baseline(&self) -> &IndicatorSnapshot {
        &self.baseline
    }

    /// Impact of one intervention against this engine's baseline
    pub fn impact_of(&self, intervention: &Intervention) -> InterventionImpact {
        InterventionImpact::estimate(intervention, self.baseline_accessibility)
    }

    /// Simulate a scenario into projected indicators and aggregate metrics
    pub fn simulate(&self, config: &ScenarioConfig) -> ScenarioResult {
        let mut projected = self.baseline.clone();

        let impacts = config
            .interventions
            .iter()
            .map(|intervention| self.impact_of(intervention))
            .collect();
        let totals = ImpactTotals::reduce(impacts);

        if let Some(access) = projected.service_accessibility.as_mut() {
            access.accessibility_score =
                (access.accessibility_score + totals.accessibility_gain).clamp(0.0, 100.0);
        }

        let metrics = ScenarioMetrics {
            total_cost_usd: totals.cost,
            people_benefited: totals.beneficiaries,
            accessibility_gain: totals.accessibility_gain,
            cost_per_beneficiary: totals.cost_per_beneficiary(),
            equity_impact_score: totals.equity,
            implementation_time_months: totals.implementation_months,
            confidence_level: classify_confidence(&config.interventions),
        };

        debug!(
            "📐 Simulated scenario '{}': interventions={}, cost={:.0}, benefited={}, months={}, equity={:.1}",
            config.name,
            config.interventions.len(),
            metrics.total_cost_usd,
            metrics.people_benefited,
            metrics.implementation_time_months,
            metrics.equity_impact_score
        );

        ScenarioResult {
            name: config.name.clone(),
            description: config.description.clone(),
            interventions: config.interventions.clone(),
            metrics,
            projected_indicators: projected,
        }
    }

    /// Simulate every scenario independently and pick the best by each criterion
    pub fn compare(&self, scenarios: &[ScenarioConfig]) -> ComparisonResult {
        if scenarios.is_empty() {
            warn!("⚠️  Scenario comparison requested with no scenarios");
            return ComparisonResult::no_scenarios();
        }

        info!("⚖️  Comparing {} scenarios", scenarios.len());

        let results = scenarios.iter().map(|s| self.simulate(s)).collect();
        match ScenarioComparison::from_results(results) {
            Some(comparison) => {
                info!(
                    "⚖️  Comparison complete: best ROI='{}', best equity='{}', fastest='{}'",
                    comparison.comparison.best_roi.scenario_name,
                    comparison.comparison.best_equity.scenario_name,
                    comparison.comparison.fastest.scenario_name
                );
                ComparisonResult::Compared(comparison)
            }
            None => ComparisonResult::no_scenarios(),
        }
    }
}

/// Non-finite values (the zero-beneficiary sentinel) serialize as `null`
pub(crate) fn serialize_unbounded<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        serializer.serialize_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PopulationDensity, ServiceAccessibility, ZoneDensity};
    use pretty_assertions::assert_eq;

    fn baseline(score: f64) -> IndicatorSnapshot {
        IndicatorSnapshot {
            population_density: Some(PopulationDensity {
                total_population: 112_500,
                avg_density: 45_000.0,
                total_area_km2: 2.5,
                zones: vec![ZoneDensity {
                    name: "Kibera".to_string(),
                    density: 45_000.0,
                    population: 112_500,
                    area_km2: 2.5,
                }],
            }),
            service_accessibility: Some(ServiceAccessibility {
                accessibility_score: score,
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn unknown(kind: &str) -> Intervention {
        Intervention::Unknown {
            kind: kind.to_string(),
            cost: 1_000_000.0,
        }
    }

    fn mixed_config() -> ScenarioConfig {
        ScenarioConfig::new("Mixed", "every kind at once")
            .with_intervention(Intervention::hospital("Kibera"))
            .with_intervention(Intervention::transit_corridor("CBD-Eastleigh"))
            .with_intervention(Intervention::park("Embakasi"))
            .with_intervention(Intervention::school(1200))
            .with_intervention(Intervention::road(7.5))
            .with_intervention(unknown("ferry"))
            .with_intervention(Intervention::Hospital {
                capacity: 80,
                location: None,
                cost: 1_234_567.891,
            })
    }

    #[test]
    fn test_single_hospital_in_underserved_city() {
        let engine = ScenarioEngine::new(baseline(3.0));
        let config = ScenarioConfig::new("Health", "").with_intervention(Intervention::hospital("Kibera"));

        let result = engine.simulate(&config);

        assert_eq!(result.metrics.accessibility_gain, 15.0);
        assert_eq!(result.metrics.equity_impact_score, 8.0);
        assert_eq!(result.metrics.implementation_time_months, 24);
        assert_eq!(result.metrics.people_benefited, 785_398);
        assert_eq!(result.metrics.confidence_level, ConfidenceLevel::High);
        assert_eq!(result.projected_indicators.accessibility_score(), Some(18.0));
    }

    #[test]
    fn test_timeline_is_max_and_equity_is_sum() {
        let engine = ScenarioEngine::new(baseline(3.0));
        let config = ScenarioConfig::new("Transit + Park", "")
            .with_intervention(Intervention::transit_corridor("CBD-Eastleigh"))
            .with_intervention(Intervention::park("Kibera"));

        let metrics = engine.simulate(&config).metrics;

        assert_eq!(metrics.implementation_time_months, 36);
        assert_eq!(metrics.equity_impact_score, 13.0);
    }

    #[test]
    fn test_timeline_matches_max_of_individual_impacts() {
        let engine = ScenarioEngine::new(baseline(20.0));
        let config = mixed_config();

        let expected_months = config
            .interventions
            .iter()
            .map(|i| engine.impact_of(i).implementation_months)
            .max()
            .unwrap();
        let summed_months: u32 = config
            .interventions
            .iter()
            .map(|i| engine.impact_of(i).implementation_months)
            .sum();

        let metrics = engine.simulate(&config).metrics;
        assert_eq!(metrics.implementation_time_months, expected_months);
        assert_ne!(metrics.implementation_time_months, summed_months);
    }

    #[test]
    fn test_equity_is_sum_of_individual_impacts() {
        let engine = ScenarioEngine::new(baseline(20.0));
        let config = mixed_config();

        let expected: f64 = config
            .interventions
            .iter()
            .map(|i| engine.impact_of(i).equity_score)
            .sum();

        assert_eq!(engine.simulate(&config).metrics.equity_impact_score, expected);
    }

    #[test]
    fn test_metrics_are_order_independent() {
        let engine = ScenarioEngine::new(baseline(37.3));
        let config = mixed_config();
        let reference = engine.simulate(&config).metrics;

        let mut reversed = config.clone();
        reversed.interventions.reverse();
        let mut rotated = config.clone();
        rotated.interventions.rotate_left(3);
        let mut interleaved = config.clone();
        interleaved.interventions.swap(0, 5);
        interleaved.interventions.swap(2, 6);

        for shuffled in [reversed, rotated, interleaved] {
            let metrics = engine.simulate(&shuffled).metrics;
            assert_eq!(metrics.total_cost_usd.to_bits(), reference.total_cost_usd.to_bits());
            assert_eq!(metrics.accessibility_gain.to_bits(), reference.accessibility_gain.to_bits());
            assert_eq!(metrics.equity_impact_score.to_bits(), reference.equity_impact_score.to_bits());
            assert_eq!(metrics.cost_per_beneficiary.to_bits(), reference.cost_per_beneficiary.to_bits());
            assert_eq!(metrics, reference);
        }
    }

    #[test]
    fn test_accessibility_score_is_clamped() {
        let engine = ScenarioEngine::new(baseline(95.0));
        let config = ScenarioConfig::new("Many schools", "")
            .with_intervention(Intervention::school(100))
            .with_intervention(Intervention::school(100))
            .with_intervention(Intervention::road(1.0));

        let result = engine.simulate(&config);

        assert_eq!(result.metrics.accessibility_gain, 25.0);
        assert_eq!(result.projected_indicators.accessibility_score(), Some(100.0));
    }

    #[test]
    fn test_accessibility_score_floor_for_out_of_range_baseline() {
        let engine = ScenarioEngine::new(baseline(-12.0));
        let result = engine.simulate(&ScenarioConfig::new("Nothing", ""));
        assert_eq!(result.projected_indicators.accessibility_score(), Some(0.0));
    }

    #[test]
    fn test_no_accessibility_group_stays_unset() {
        let engine = ScenarioEngine::new(IndicatorSnapshot::default());
        let config = ScenarioConfig::new("Health", "").with_intervention(Intervention::hospital("Kibera"));

        let result = engine.simulate(&config);

        assert!(result.projected_indicators.service_accessibility.is_none());
        // Missing baseline score counts as 0: maximum deficit, underserved
        assert_eq!(result.metrics.accessibility_gain, 15.0);
        assert_eq!(result.metrics.equity_impact_score, 8.0);
    }

    #[test]
    fn test_zero_beneficiaries_is_infinite_cost_per_beneficiary() {
        let engine = ScenarioEngine::new(baseline(10.0));
        let empty = engine.simulate(&ScenarioConfig::new("Empty", ""));
        assert!(empty.metrics.cost_per_beneficiary.is_infinite());
        assert_eq!(empty.metrics.people_benefited, 0);
        assert_eq!(empty.metrics.confidence_level, ConfidenceLevel::Low);

        let zero_capacity = engine.simulate(&ScenarioConfig::new("Ghost school", "").with_intervention(Intervention::school(0)));
        assert!(zero_capacity.metrics.cost_per_beneficiary.is_infinite());

        let funded = engine.simulate(&ScenarioConfig::new("Road", "").with_intervention(Intervention::road(2.0)));
        assert_eq!(funded.metrics.cost_per_beneficiary, 125.0);
    }

    #[test]
    fn test_infinite_cost_per_beneficiary_serializes_as_null() {
        let engine = ScenarioEngine::new(baseline(10.0));
        let json = serde_json::to_value(engine.simulate(&ScenarioConfig::new("Empty", ""))).unwrap();
        assert!(json["metrics"]["costPerBeneficiary"].is_null());
        assert_eq!(json["metrics"]["confidenceLevel"], "LOW");
    }

    #[test]
    fn test_baseline_is_never_mutated() {
        let engine = ScenarioEngine::new(baseline(3.0));
        let before = engine.baseline().clone();

        engine.simulate(&mixed_config());
        engine.simulate(&mixed_config());

        assert_eq!(engine.baseline(), &before);
    }

    #[test]
    fn test_repeated_simulation_is_deterministic() {
        let engine = ScenarioEngine::new(baseline(3.0));
        let config = mixed_config();

        let first = engine.simulate(&config);
        let second = engine.simulate(&config);

        assert_eq!(first, second);
        // Hospitals are always measured against the unmodified baseline
        assert_eq!(first.metrics.equity_impact_score, second.metrics.equity_impact_score);
    }

    #[test]
    fn test_concurrent_simulations_share_one_engine() {
        let engine = ScenarioEngine::new(baseline(3.0));
        let config = mixed_config();
        let expected = engine.simulate(&config);

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| engine.simulate(&config)))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }
}
