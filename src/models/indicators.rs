//! Indicator snapshot models
//!
//! A snapshot is the structured set of urban metrics for one city at one point
//! in time. Every group is optional so partial snapshots stay representable.

use serde::{Deserialize, Serialize};

/// Structured urban indicators for a city
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population_density: Option<PopulationDensity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub land_use: Option<LandUse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub road_network: Option<RoadNetwork>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_accessibility: Option<ServiceAccessibility>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub green_space: Option<GreenSpaceCoverage>,
}

impl IndicatorSnapshot {
    /// Accessibility score, if the snapshot carries a service-accessibility group
    pub fn accessibility_score(&self) -> Option<f64> {
        self.service_accessibility
            .as_ref()
            .map(|s| s.accessibility_score)
    }
}

/// Population totals and per-zone densities
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulationDensity {
    pub total_population: u64,
    pub avg_density: f64,
    #[serde(default)]
    pub total_area_km2: f64,
    /// Ordered by density, densest first
    #[serde(default)]
    pub zones: Vec<ZoneDensity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneDensity {
    pub name: String,
    pub density: f64,
    pub population: u64,
    pub area_km2: f64,
}

/// Built-up vs open land
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandUse {
    pub residential_area_km2: f64,
    pub commercial_area_km2: f64,
    pub built_up_area_km2: f64,
    pub open_land_km2: f64,
    pub built_up_percentage: f64,
    pub total_metro_area_km2: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadNetwork {
    pub total_length_km: f64,
    pub road_density_km_per_km2: f64,
    pub major_roads_count: usize,
    #[serde(default)]
    pub roads: Vec<RoadSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Proximity of healthcare and education to residential population
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAccessibility {
    /// 0-100 composite score
    pub accessibility_score: f64,
    #[serde(default)]
    pub total_hospitals: usize,
    #[serde(default)]
    pub total_schools: usize,
    #[serde(default)]
    pub hospital_capacity: u64,
    #[serde(default)]
    pub school_capacity: u64,
    #[serde(default)]
    pub coverage: ServiceCoverage,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCoverage {
    pub hospitals_per_100k: f64,
    pub schools_per_100k: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GreenSpaceCoverage {
    pub total_green_space_km2: f64,
    pub green_space_percentage: f64,
    #[serde(default)]
    pub spaces: Vec<GreenSpaceSummary>,
    pub per_capita_m2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GreenSpaceSummary {
    pub name: String,
    pub area_km2: f64,
}
