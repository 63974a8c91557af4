//! City feature models
//!
//! The simple geospatial layers indicators are computed from. Inputs coming from
//! files are validated before they reach the indicator stage.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A WGS84 point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct GeoPoint {
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be within [-90, 90]"))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be within [-180, 180]"))]
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Residential zone with its resident population
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResidentialZone {
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[validate(nested)]
    pub center: GeoPoint,
    /// People per km²
    #[validate(range(min = 0.0, message = "Density cannot be negative"))]
    pub density: f64,
    #[validate(range(min = 0.0, message = "Area cannot be negative"))]
    pub area_km2: f64,
    pub population: u64,
}

impl ResidentialZone {
    /// Build a zone whose population is derived from density and area
    pub fn new(name: impl Into<String>, center: GeoPoint, density: f64, area_km2: f64) -> Self {
        Self {
            name: name.into(),
            center,
            density,
            area_km2,
            population: (density * area_km2) as u64,
        }
    }
}

/// Commercial zone
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CommercialZone {
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[validate(nested)]
    pub center: GeoPoint,
    #[validate(range(min = 0.0, message = "Area cannot be negative"))]
    pub area_km2: f64,
    #[serde(default)]
    pub businesses: u32,
}

/// Kind of public facility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacilityKind {
    Hospital,
    School,
    #[serde(other)]
    Other,
}

/// Public facility (hospital, school, ...)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FacilityKind,
    #[validate(nested)]
    pub location: GeoPoint,
    #[serde(default)]
    pub capacity: u32,
}

/// Road polyline
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RoadSegment {
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[serde(rename = "type", default = "default_road_kind")]
    pub kind: String,
    #[validate(length(min = 2, message = "A road needs at least two points"), nested)]
    pub path: Vec<GeoPoint>,
}

fn default_road_kind() -> String {
    "major_road".to_string()
}

/// Park, forest or other public green space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GreenSpace {
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[validate(range(min = 0.0, message = "Area cannot be negative"))]
    pub area_km2: f64,
}

/// All feature layers of one city
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CityFeatures {
    #[serde(default)]
    #[validate(nested)]
    pub residential: Vec<ResidentialZone>,
    #[serde(default)]
    #[validate(nested)]
    pub commercial: Vec<CommercialZone>,
    #[serde(default)]
    #[validate(nested)]
    pub facilities: Vec<Facility>,
    #[serde(default)]
    #[validate(nested)]
    pub roads: Vec<RoadSegment>,
    #[serde(default)]
    #[validate(nested)]
    pub green_spaces: Vec<GreenSpace>,
}

/// Feature names must contain something other than whitespace
fn validate_name(name: &str) -> Result<(), validator::ValidationError> {
    if name.trim().is_empty() {
        let mut err = validator::ValidationError::new("blank_name");
        err.message = Some("Feature name is required".into());
        return Err(err);
    }
    Ok(())
}
