//! Indicator calculator
//!
//! Computes each indicator group from the feature layers. Every group degrades to
//! zeros on empty input rather than failing.

use tracing::{debug, info};

use super::geo::{polyline_length_km, round_to};
use crate::city::CityProfile;
use crate::models::{
    CityFeatures, CommercialZone, Facility, FacilityKind, GreenSpace, GreenSpaceCoverage,
    GreenSpaceSummary, IndicatorSnapshot, LandUse, PopulationDensity, ResidentialZone,
    RoadNetwork, RoadSegment, RoadSummary, ServiceAccessibility, ServiceCoverage, ZoneDensity,
};

/// Facilities within this distance of a zone centre count as reachable
pub const SERVICE_RADIUS_KM: f64 = 5.0;
const HOSPITAL_WEIGHT: f64 = 0.6;
const SCHOOL_WEIGHT: f64 = 0.4;

/// Stateless indicator computations
pub struct IndicatorCalculator;

impl IndicatorCalculator {
    /// Compute every indicator group for a city
    pub fn calculate_all(city: &CityProfile, features: &CityFeatures) -> IndicatorSnapshot {
        let snapshot = IndicatorSnapshot {
            population_density: Some(Self::population_density(&features.residential)),
            land_use: Some(Self::land_use(&features.residential, &features.commercial, city.area_km2)),
            road_network: Some(Self::road_network(&features.roads, city.area_km2)),
            service_accessibility: Some(Self::service_accessibility(
                &features.facilities,
                &features.residential,
            )),
            green_space: Some(Self::green_space(&features.green_spaces, city)),
        };

        info!(
            "📊 Indicators for {}: population={}, accessibility={:.2}",
            city.name,
            snapshot
                .population_density
                .as_ref()
                .map(|p| p.total_population)
                .unwrap_or_default(),
            snapshot.accessibility_score().unwrap_or_default()
        );

        snapshot
    }

    /// Totals, average density and zones ordered densest first
    pub fn population_density(zones: &[ResidentialZone]) -> PopulationDensity {
        if zones.is_empty() {
            return PopulationDensity::default();
        }

        let total_population: u64 = zones.iter().map(|z| z.population).sum();
        let total_area: f64 = zones.iter().map(|z| z.area_km2).sum();
        let avg_density = if total_area > 0.0 {
            total_population as f64 / total_area
        } else {
            0.0
        };

        let mut densities: Vec<ZoneDensity> = zones
            .iter()
            .map(|z| ZoneDensity {
                name: z.name.clone(),
                density: z.density,
                population: z.population,
                area_km2: z.area_km2,
            })
            .collect();
        densities.sort_by(|a, b| b.density.total_cmp(&a.density));

        PopulationDensity {
            total_population,
            avg_density: round_to(avg_density, 2),
            total_area_km2: round_to(total_area, 2),
            zones: densities,
        }
    }

    /// Built-up (residential + commercial) vs open land of the metro area
    pub fn land_use(
        residential: &[ResidentialZone],
        commercial: &[CommercialZone],
        metro_area_km2: f64,
    ) -> LandUse {
        let residential_area: f64 = residential.iter().map(|z| z.area_km2).sum();
        let commercial_area: f64 = commercial.iter().map(|z| z.area_km2).sum();
        let built_up = residential_area + commercial_area;
        let built_up_pct = if metro_area_km2 > 0.0 {
            built_up / metro_area_km2 * 100.0
        } else {
            0.0
        };

        LandUse {
            residential_area_km2: round_to(residential_area, 2),
            commercial_area_km2: round_to(commercial_area, 2),
            built_up_area_km2: round_to(built_up, 2),
            open_land_km2: round_to(metro_area_km2 - built_up, 2),
            built_up_percentage: round_to(built_up_pct, 2),
            total_metro_area_km2: metro_area_km2,
        }
    }

    /// Total road length and density per km² of metro area
    pub fn road_network(roads: &[RoadSegment], metro_area_km2: f64) -> RoadNetwork {
        if roads.is_empty() {
            return RoadNetwork::default();
        }

        let total_length: f64 = roads.iter().map(|r| polyline_length_km(&r.path)).sum();
        let density = if metro_area_km2 > 0.0 {
            total_length / metro_area_km2
        } else {
            0.0
        };

        debug!("🛣️  {} roads, {:.2} km total", roads.len(), total_length);

        RoadNetwork {
            total_length_km: round_to(total_length, 2),
            road_density_km_per_km2: round_to(density, 3),
            major_roads_count: roads.len(),
            roads: roads
                .iter()
                .map(|r| RoadSummary {
                    name: r.name.clone(),
                    kind: r.kind.clone(),
                })
                .collect(),
        }
    }

    /// Facilities within reach of each residential zone, normalised by population
    pub fn service_accessibility(
        facilities: &[Facility],
        zones: &[ResidentialZone],
    ) -> ServiceAccessibility {
        if facilities.is_empty() || zones.is_empty() {
            return ServiceAccessibility::default();
        }

        let hospitals: Vec<&Facility> = facilities
            .iter()
            .filter(|f| f.kind == FacilityKind::Hospital)
            .collect();
        let schools: Vec<&Facility> = facilities
            .iter()
            .filter(|f| f.kind == FacilityKind::School)
            .collect();

        let zone_scores: Vec<f64> = zones
            .iter()
            .map(|zone| {
                let nearby = |set: &[&Facility]| {
                    set.iter()
                        .filter(|f| zone.center.distance_km(&f.location) <= SERVICE_RADIUS_KM)
                        .count()
                };
                let hospital_ratio = per_thousand(nearby(&hospitals), zone.population);
                let school_ratio = per_thousand(nearby(&schools), zone.population);
                (hospital_ratio * HOSPITAL_WEIGHT + school_ratio * SCHOOL_WEIGHT) * 100.0
            })
            .collect();

        let mean = zone_scores.iter().sum::<f64>() / zone_scores.len() as f64;
        let population: u64 = zones.iter().map(|z| z.population).sum();

        ServiceAccessibility {
            accessibility_score: round_to(mean.min(100.0), 2),
            total_hospitals: hospitals.len(),
            total_schools: schools.len(),
            hospital_capacity: hospitals.iter().map(|f| u64::from(f.capacity)).sum(),
            school_capacity: schools.iter().map(|f| u64::from(f.capacity)).sum(),
            coverage: ServiceCoverage {
                hospitals_per_100k: round_to(per_hundred_thousand(hospitals.len(), population), 2),
                schools_per_100k: round_to(per_hundred_thousand(schools.len(), population), 2),
            },
        }
    }

    /// Green area relative to the metro area and to the city population
    pub fn green_space(spaces: &[GreenSpace], city: &CityProfile) -> GreenSpaceCoverage {
        let total: f64 = spaces.iter().map(|s| s.area_km2).sum();
        let percentage = if city.area_km2 > 0.0 {
            total / city.area_km2 * 100.0
        } else {
            0.0
        };
        let per_capita = if city.population > 0 {
            total * 1_000_000.0 / city.population as f64
        } else {
            0.0
        };

        GreenSpaceCoverage {
            total_green_space_km2: round_to(total, 2),
            green_space_percentage: round_to(percentage, 2),
            spaces: spaces
                .iter()
                .map(|s| GreenSpaceSummary {
                    name: s.name.clone(),
                    area_km2: s.area_km2,
                })
                .collect(),
            per_capita_m2: round_to(per_capita, 2),
        }
    }
}

fn per_thousand(count: usize, population: u64) -> f64 {
    if population == 0 {
        0.0
    } else {
        count as f64 * 1_000.0 / population as f64
    }
}

fn per_hundred_thousand(count: usize, population: u64) -> f64 {
    if population == 0 {
        0.0
    } else {
        count as f64 * 100_000.0 / population as f64
    }
}
