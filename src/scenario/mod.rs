//! Scenario simulation
//!
//! What-if analysis on top of a baseline indicator snapshot:
//!
//! 1. **Intervention**: a hypothetical investment parsed from scenario input
//! 2. **Impact**: the fixed per-kind estimate of what it buys
//! 3. **Engine**: layers impacts onto the baseline and aggregates metrics
//! 4. **Comparison**: ranks scenarios by ROI, equity and speed

pub mod comparison;
pub mod confidence;
pub mod engine;
pub mod impact;
pub mod intervention;

// Re-export main types for convenient access
pub use comparison::{ComparisonResult, ScenarioComparison};
pub use confidence::{classify_confidence, ConfidenceLevel};
pub use engine::{ScenarioConfig, ScenarioEngine, ScenarioMetrics, ScenarioResult};
pub use impact::InterventionImpact;
pub use intervention::Intervention;
