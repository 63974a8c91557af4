//! UrbanPulse - Urban Planning Intelligence
//!
//! Computes baseline urban indicators for a city and runs what-if scenarios
//! against them:
//! - Indicators: population density, land use, roads, service access, green space
//! - Planner: rule-based recommendations derived from indicator deficits
//! - Scenarios: per-intervention impact estimates aggregated into comparable metrics
//! - Runner: batch pipeline producing a [`report::PlanningReport`]

pub mod city;
pub mod config;
pub mod error;
pub mod indicators;
pub mod models;
pub mod planner;
pub mod report;
pub mod runner;
pub mod scenario;

pub use error::{AppError, AppResult};
pub use scenario::{ComparisonResult, Intervention, ScenarioConfig, ScenarioEngine, ScenarioResult};
