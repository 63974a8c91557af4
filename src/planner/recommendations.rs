//! Recommendation rules

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::IndicatorSnapshot;
use crate::scenario::{ConfidenceLevel, Intervention, ScenarioConfig};

/// Accessibility below this signals a healthcare deficit
const ACCESSIBILITY_DEFICIT: f64 = 5.0;
/// Zones denser than this (people/km²) are healthcare candidates
const HIGH_DENSITY: f64 = 20_000.0;
const MAX_HEALTH_SITES: usize = 2;
/// km of road per km² of metro area
const LOW_ROAD_DENSITY: f64 = 0.1;
/// m² of green space per resident
const GREEN_SPACE_MINIMUM_M2: f64 = 9.0;
const MIXED_USE_POPULATION: u64 = 500_000;

const PARK_NETWORK_HECTARES: f64 = 25.0;
const PARK_NETWORK_COST: f64 = 10_000_000.0;
const BRT_ROUTE: &str = "CBD to Eastleigh via Uhuru Highway";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// A planning recommendation, optionally backed by a simulatable intervention
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: String,
    pub category: String,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    /// Policy-only recommendations carry no intervention
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intervention: Option<Intervention>,
    pub confidence: ConfidenceLevel,
    pub assumptions: Vec<String>,
}

/// Stateless rule set
pub struct Planner;

impl Planner {
    /// Apply every rule in order; the infrastructure audit is always last
    pub fn recommend(snapshot: &IndicatorSnapshot) -> Vec<Recommendation> {
        let mut recommendations = Vec::new();

        Self::healthcare(snapshot, &mut recommendations);
        Self::transport(snapshot, &mut recommendations);
        Self::green_space(snapshot, &mut recommendations);
        Self::mixed_use(snapshot, &mut recommendations);
        recommendations.push(Self::infrastructure_audit());

        info!("🧭 Generated {} recommendations", recommendations.len());
        recommendations
    }

    /// One scenario per actionable recommendation, then all of them combined
    pub fn scenarios_from(recommendations: &[Recommendation]) -> Vec<ScenarioConfig> {
        let actionable: Vec<(&Recommendation, &Intervention)> = recommendations
            .iter()
            .filter_map(|r| r.intervention.as_ref().map(|i| (r, i)))
            .collect();

        let mut scenarios: Vec<ScenarioConfig> = actionable
            .iter()
            .map(|(rec, intervention)| {
                ScenarioConfig::new(rec.title.clone(), rec.description.clone())
                    .with_intervention((*intervention).clone())
            })
            .collect();

        if actionable.len() > 1 {
            let combined = actionable.iter().fold(
                ScenarioConfig::new(
                    "Combined Plan",
                    format!("All {} recommended interventions together", actionable.len()),
                ),
                |config, (_, intervention)| config.with_intervention((*intervention).clone()),
            );
            scenarios.push(combined);
        }

        debug!("🧭 Derived {} default scenarios", scenarios.len());
        scenarios
    }

    fn healthcare(snapshot: &IndicatorSnapshot, out: &mut Vec<Recommendation>) {
        let score = snapshot.accessibility_score().unwrap_or_default();
        if score >= ACCESSIBILITY_DEFICIT {
            return;
        }

        let zones = snapshot
            .population_density
            .as_ref()
            .map(|p| p.zones.as_slice())
            .unwrap_or_default();

        for zone in zones
            .iter()
            .filter(|z| z.density > HIGH_DENSITY)
            .take(MAX_HEALTH_SITES)
        {
            out.push(Recommendation {
                id: format!("health_{}", zone.name.to_lowercase().replace(' ', "_")),
                category: "Healthcare Infrastructure".to_string(),
                priority: Priority::High,
                title: format!("Establish Level 4 Health Facility in {}", zone.name),
                description: format!(
                    "Current accessibility score of {:.2}/100 indicates severe healthcare deficit in high-density zones.",
                    score
                ),
                intervention: Some(Intervention::hospital(zone.name.clone())),
                confidence: ConfidenceLevel::High,
                assumptions: vec![
                    "1.5km service radius for Level 4 facility".to_string(),
                    format!("Current density: {:.0} people/km²", zone.density),
                    format!("{} residents in the zone", zone.population),
                ],
            });
        }
    }

    fn transport(snapshot: &IndicatorSnapshot, out: &mut Vec<Recommendation>) {
        let density = snapshot
            .road_network
            .as_ref()
            .map(|r| r.road_density_km_per_km2)
            .unwrap_or_default();
        if density >= LOW_ROAD_DENSITY {
            return;
        }

        out.push(Recommendation {
            id: "transport_brt_corridor".to_string(),
            category: "Transportation".to_string(),
            priority: Priority::High,
            title: "Develop BRT Corridor Along Major Routes".to_string(),
            description: format!(
                "Current road density of {:.3} km/km² indicates limited connectivity. BRT system would improve mobility.",
                density
            ),
            intervention: Some(Intervention::transit_corridor(BRT_ROUTE)),
            confidence: ConfidenceLevel::High,
            assumptions: vec![
                "Existing road infrastructure can accommodate BRT".to_string(),
                "Average 1.5km station spacing".to_string(),
                "Right-of-way available".to_string(),
            ],
        });
    }

    fn green_space(snapshot: &IndicatorSnapshot, out: &mut Vec<Recommendation>) {
        let per_capita = snapshot
            .green_space
            .as_ref()
            .map(|g| g.per_capita_m2)
            .unwrap_or_default();
        if per_capita >= GREEN_SPACE_MINIMUM_M2 {
            return;
        }

        out.push(Recommendation {
            id: "green_space_urban_parks".to_string(),
            category: "Environmental Sustainability".to_string(),
            priority: Priority::Medium,
            title: "Develop Neighborhood Parks Network".to_string(),
            description: format!(
                "Current {:.2}m²/person falls below the minimum of {:.0}m²/person.",
                per_capita, GREEN_SPACE_MINIMUM_M2
            ),
            intervention: Some(Intervention::Park {
                area_hectares: PARK_NETWORK_HECTARES,
                location: None,
                cost: PARK_NETWORK_COST,
            }),
            confidence: ConfidenceLevel::Medium,
            assumptions: vec![
                "Land acquisition feasible".to_string(),
                "Community support for park development".to_string(),
                "Maintenance budget allocated".to_string(),
            ],
        });
    }

    fn mixed_use(snapshot: &IndicatorSnapshot, out: &mut Vec<Recommendation>) {
        let population = snapshot
            .population_density
            .as_ref()
            .map(|p| p.total_population)
            .unwrap_or_default();
        if population <= MIXED_USE_POPULATION {
            return;
        }

        out.push(Recommendation {
            id: "mixed_use_development".to_string(),
            category: "Urban Planning".to_string(),
            priority: Priority::Medium,
            title: "Promote Mixed-Use Development Zones".to_string(),
            description: "Reduce commute times and improve livability through integrated residential-commercial zones."
                .to_string(),
            intervention: None,
            confidence: ConfidenceLevel::Medium,
            assumptions: vec![
                "Developer interest in mixed-use".to_string(),
                "Infrastructure can support increased density".to_string(),
            ],
        });
    }

    fn infrastructure_audit() -> Recommendation {
        Recommendation {
            id: "infrastructure_audit".to_string(),
            category: "Infrastructure Maintenance".to_string(),
            priority: Priority::Low,
            title: "Conduct Comprehensive Infrastructure Audit".to_string(),
            description: "Establish baseline for all urban infrastructure to enable data-driven planning."
                .to_string(),
            intervention: None,
            confidence: ConfidenceLevel::High,
            assumptions: vec![
                "Access to all infrastructure locations".to_string(),
                "Cooperation from utility providers".to_string(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::CityCatalog;
    use crate::indicators::IndicatorCalculator;
    use crate::models::{GreenSpaceCoverage, PopulationDensity, RoadNetwork, ServiceAccessibility};
    use pretty_assertions::assert_eq;

    fn nairobi_snapshot() -> IndicatorSnapshot {
        let city = CityCatalog::profile("nairobi").unwrap();
        let features = CityCatalog::sample_features("nairobi").unwrap();
        IndicatorCalculator::calculate_all(&city, &features)
    }

    fn healthy_snapshot() -> IndicatorSnapshot {
        IndicatorSnapshot {
            population_density: Some(PopulationDensity {
                total_population: 100_000,
                ..Default::default()
            }),
            road_network: Some(RoadNetwork {
                road_density_km_per_km2: 2.0,
                ..Default::default()
            }),
            service_accessibility: Some(ServiceAccessibility {
                accessibility_score: 60.0,
                ..Default::default()
            }),
            green_space: Some(GreenSpaceCoverage {
                per_capita_m2: 20.0,
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_nairobi_recommendations() {
        let recommendations = Planner::recommend(&nairobi_snapshot());
        let ids: Vec<&str> = recommendations.iter().map(|r| r.id.as_str()).collect();

        assert_eq!(
            ids,
            vec![
                "health_kibera",
                "health_eastleigh",
                "transport_brt_corridor",
                "green_space_urban_parks",
                "mixed_use_development",
                "infrastructure_audit",
            ]
        );
        assert_eq!(
            recommendations[0].intervention,
            Some(Intervention::hospital("Kibera"))
        );
        assert_eq!(recommendations[5].priority, Priority::Low);
    }

    #[test]
    fn test_healthy_city_only_gets_audit() {
        let recommendations = Planner::recommend(&healthy_snapshot());

        assert_eq!(recommendations.len(), 1);
        assert_eq!(recommendations[0].id, "infrastructure_audit");
        assert!(Planner::scenarios_from(&recommendations).is_empty());
    }

    #[test]
    fn test_healthcare_needs_dense_zones() {
        let mut snapshot = healthy_snapshot();
        snapshot.service_accessibility = Some(ServiceAccessibility::default());

        let recommendations = Planner::recommend(&snapshot);
        assert!(recommendations.iter().all(|r| !r.id.starts_with("health_")));
    }

    #[test]
    fn test_scenarios_from_nairobi() {
        let recommendations = Planner::recommend(&nairobi_snapshot());
        let scenarios = Planner::scenarios_from(&recommendations);

        assert_eq!(scenarios.len(), 5);
        assert!(scenarios[..4].iter().all(|s| s.interventions.len() == 1));

        let combined = &scenarios[4];
        assert_eq!(combined.name, "Combined Plan");
        assert_eq!(combined.interventions.len(), 4);
        assert_eq!(combined.interventions[2].kind(), "brt");
        assert_eq!(combined.interventions[3].cost(), 10_000_000.0);
    }

    #[test]
    fn test_single_actionable_has_no_combined_scenario() {
        let mut snapshot = healthy_snapshot();
        snapshot.green_space = Some(GreenSpaceCoverage::default());

        let scenarios = Planner::scenarios_from(&Planner::recommend(&snapshot));
        assert_eq!(scenarios.len(), 1);
        assert_eq!(scenarios[0].interventions[0].kind(), "park");
    }

    #[test]
    fn test_policy_recommendation_omits_intervention() {
        let json = serde_json::to_value(Planner::infrastructure_audit()).unwrap();
        assert!(json.get("intervention").is_none());
        assert_eq!(json["priority"], "LOW");
    }
}
