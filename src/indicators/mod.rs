//! Indicator stage
//!
//! Turns a city's feature layers into the baseline [`IndicatorSnapshot`](crate::models::IndicatorSnapshot)
//! the planner and the scenario engine work from.

mod calculator;
pub mod geo;

pub use calculator::IndicatorCalculator;
