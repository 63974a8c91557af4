//! Built-in city catalog
//!
//! Cities the tool ships sample feature layers for. Only Nairobi is bundled.

mod nairobi;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{not_found_error, AppResult};
use crate::models::CityFeatures;

/// City-wide constants the indicator stage needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityProfile {
    pub id: String,
    pub name: String,
    pub population: u64,
    /// Metropolitan area used as the denominator for land, road and green ratios
    pub area_km2: f64,
    pub available: bool,
}

struct CatalogEntry {
    profile: CityProfile,
    features: CityFeatures,
}

static CATALOG: Lazy<HashMap<&'static str, CatalogEntry>> = Lazy::new(|| {
    let mut catalog = HashMap::new();
    catalog.insert(
        nairobi::ID,
        CatalogEntry {
            profile: nairobi::profile(),
            features: nairobi::features(),
        },
    );
    catalog
});

/// Lookup over the bundled cities
pub struct CityCatalog;

impl CityCatalog {
    /// Profiles of every bundled city, sorted by id
    pub fn list() -> Vec<CityProfile> {
        let mut profiles: Vec<CityProfile> = CATALOG.values().map(|e| e.profile.clone()).collect();
        profiles.sort_by(|a, b| a.id.cmp(&b.id));
        profiles
    }

    pub fn profile(id: &str) -> AppResult<CityProfile> {
        Self::entry(id).map(|e| e.profile.clone())
    }

    /// Sample feature layers bundled for `id`
    pub fn sample_features(id: &str) -> AppResult<CityFeatures> {
        Self::entry(id).map(|e| e.features.clone())
    }

    fn entry(id: &str) -> AppResult<&'static CatalogEntry> {
        let key = id.trim().to_lowercase();
        CATALOG.get(key.as_str()).ok_or_else(|| {
            let available: Vec<String> = Self::list().into_iter().map(|p| p.id).collect();
            not_found_error(format!(
                "City '{}' (available: {})",
                id,
                available.join(", ")
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use validator::Validate;

    #[test]
    fn test_nairobi_profile() {
        let profile = CityCatalog::profile("nairobi").unwrap();

        assert_eq!(profile.name, "Nairobi, Kenya");
        assert_eq!(profile.population, 4_500_000);
        assert_eq!(profile.area_km2, 696.0);
        assert!(profile.available);
    }

    #[test]
    fn test_lookup_ignores_case() {
        assert!(CityCatalog::profile(" Nairobi ").is_ok());
    }

    #[test]
    fn test_unknown_city_is_not_found() {
        let err = CityCatalog::sample_features("mombasa").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(
            err.to_string(),
            "Not found: City 'mombasa' (available: nairobi)"
        );
    }

    #[test]
    fn test_sample_layers_are_complete_and_valid() {
        let features = CityCatalog::sample_features("nairobi").unwrap();

        assert_eq!(features.residential.len(), 8);
        assert_eq!(features.commercial.len(), 4);
        assert_eq!(features.facilities.len(), 7);
        assert_eq!(features.roads.len(), 5);
        assert_eq!(features.green_spaces.len(), 5);
        assert!(features.validate().is_ok());
    }

    #[test]
    fn test_list_contains_nairobi() {
        let ids: Vec<String> = CityCatalog::list().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["nairobi".to_string()]);
    }
}
