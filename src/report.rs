//! Planning report
//!
//! The envelope the runner writes out: baseline indicators, recommendations and
//! the scenario comparison, stamped with an id, a timestamp and a checksum of
//! the baseline they were computed against.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::city::CityProfile;
use crate::error::AppResult;
use crate::models::IndicatorSnapshot;
use crate::planner::Recommendation;
use crate::scenario::ComparisonResult;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanningReport {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub city: CityProfile,
    /// SHA-256 of the serialized baseline indicators
    pub baseline_checksum: String,
    pub indicators: IndicatorSnapshot,
    pub recommendations: Vec<Recommendation>,
    pub comparison: ComparisonResult,
}

impl PlanningReport {
    pub fn new(
        city: CityProfile,
        indicators: IndicatorSnapshot,
        recommendations: Vec<Recommendation>,
        comparison: ComparisonResult,
    ) -> AppResult<Self> {
        let baseline_checksum = Self::compute_checksum(&indicators)?;

        Ok(Self {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            city,
            baseline_checksum,
            indicators,
            recommendations,
            comparison,
        })
    }

    /// Compute checksum from the baseline content
    pub fn compute_checksum(indicators: &IndicatorSnapshot) -> AppResult<String> {
        let mut hasher = Sha256::new();
        hasher.update(serde_json::to_vec(indicators)?);
        Ok(format!("{:x}", hasher.finalize()))
    }

    pub fn to_json_pretty(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
