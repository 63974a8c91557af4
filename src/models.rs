//! Data models
//!
//! Input feature layers and the indicator snapshots derived from them.

pub mod features;
pub mod indicators;

// Re-export commonly used types
pub use features::*;
pub use indicators::*;
