//! Rule-based planning recommendations
//!
//! Reads a baseline snapshot, flags deficits and proposes interventions that
//! can be fed straight into the scenario engine.

mod recommendations;

pub use recommendations::{Planner, Priority, Recommendation};
