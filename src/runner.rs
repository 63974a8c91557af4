//! Batch runner
//!
//! Drives one planning run end to end: features → indicators → recommendations
//! → scenario comparison → report. The comparison is CPU-bound and runs on the
//! blocking pool under a time budget.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};
use validator::Validate;

use crate::city::{CityCatalog, CityProfile};
use crate::config::SimulationConfig;
use crate::error::{AppError, AppResult};
use crate::indicators::IndicatorCalculator;
use crate::models::CityFeatures;
use crate::planner::Planner;
use crate::report::PlanningReport;
use crate::scenario::{ComparisonResult, ScenarioConfig, ScenarioEngine};

// =============================================================================
// INPUT LOADING
// =============================================================================

/// Feature layers from `path`, or the city's bundled sample when no path is set
pub async fn load_features(path: Option<&Path>, city: &CityProfile) -> AppResult<CityFeatures> {
    let features = match path {
        Some(path) => {
            info!("📂 Loading city features from {}", path.display());
            let raw = tokio::fs::read_to_string(path).await?;
            serde_json::from_str::<CityFeatures>(&raw)?
        }
        None => {
            info!("📂 Using bundled sample features for {}", city.name);
            CityCatalog::sample_features(&city.id)?
        }
    };

    features.validate()?;
    debug!(
        "📂 Features: {} residential, {} commercial, {} facilities, {} roads, {} green spaces",
        features.residential.len(),
        features.commercial.len(),
        features.facilities.len(),
        features.roads.len(),
        features.green_spaces.len()
    );
    Ok(features)
}

/// Scenario list from a JSON array file
pub async fn load_scenarios(path: &Path) -> AppResult<Vec<ScenarioConfig>> {
    info!("📂 Loading scenarios from {}", path.display());
    let raw = tokio::fs::read_to_string(path).await?;
    let scenarios: Vec<ScenarioConfig> = serde_json::from_str(&raw)?;

    for scenario in &scenarios {
        let budget: f64 = scenario.interventions.iter().map(|i| i.cost()).sum();
        debug!(
            "📂 Scenario '{}': {} interventions, budget ${:.0}",
            scenario.name,
            scenario.interventions.len(),
            budget
        );

        let unknown: Vec<&str> = scenario
            .interventions
            .iter()
            .filter(|i| !i.is_known())
            .map(|i| i.kind())
            .collect();
        if !unknown.is_empty() {
            warn!(
                "⚠️  Scenario '{}' has unrecognised interventions: {:?}",
                scenario.name, unknown
            );
        }
    }

    Ok(scenarios)
}

// =============================================================================
// EXECUTION
// =============================================================================

/// Compare scenarios on the blocking pool, failing with `Timeout` past `budget`
pub async fn run_comparison(
    engine: Arc<ScenarioEngine>,
    scenarios: Vec<ScenarioConfig>,
    budget: Duration,
) -> AppResult<ComparisonResult> {
    let count = scenarios.len();
    let task = tokio::task::spawn_blocking(move || engine.compare(&scenarios));

    match tokio::time::timeout(budget, task).await {
        Ok(Ok(result)) => Ok(result),
        Ok(Err(join_err)) => Err(AppError::Internal(format!(
            "Scenario comparison task failed: {}",
            join_err
        ))),
        Err(_) => {
            warn!("⏱️  Comparison of {} scenarios exceeded {:?}", count, budget);
            Err(AppError::Timeout(format!(
                "comparison of {} scenarios exceeded {:?}",
                count, budget
            )))
        }
    }
}

/// Full planning run for the configured city
pub async fn run(config: &SimulationConfig) -> AppResult<PlanningReport> {
    let city = CityCatalog::profile(&config.city)?;
    info!("🏙️  Planning run for {}", city.name);

    let features = load_features(config.features_path.as_deref(), &city).await?;
    let indicators = IndicatorCalculator::calculate_all(&city, &features);
    let recommendations = Planner::recommend(&indicators);

    let scenarios = match config.scenarios_path.as_deref() {
        Some(path) => load_scenarios(path).await?,
        None => Planner::scenarios_from(&recommendations),
    };

    let engine = Arc::new(ScenarioEngine::new(indicators.clone()));
    let comparison = run_comparison(engine, scenarios, Duration::from_secs(config.timeout_secs)).await?;

    let report = PlanningReport::new(city, indicators, recommendations, comparison)?;
    info!("✅ Report {} ready (baseline {})", report.id, report.baseline_checksum);
    Ok(report)
}
