//! Intervention model
//!
//! A hypothetical infrastructure investment. The wire form is a flat JSON object
//! tagged by `type`; parsing is lenient so that missing or malformed fields fall
//! back to per-kind defaults and unrecognised kinds become [`Intervention::Unknown`].
//! Capacities are whole places: fractional values are truncated and negative
//! values fall back to the default, both with a warning.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

pub const DEFAULT_HOSPITAL_COST: f64 = 3_000_000.0;
pub const DEFAULT_HOSPITAL_CAPACITY: u32 = 150;
pub const DEFAULT_BRT_COST: f64 = 50_000_000.0;
pub const DEFAULT_BRT_LENGTH_KM: f64 = 15.0;
pub const DEFAULT_PARK_COST: f64 = 3_000_000.0;
pub const DEFAULT_PARK_AREA_HECTARES: f64 = 8.0;
pub const DEFAULT_SCHOOL_COST: f64 = 5_000_000.0;
pub const DEFAULT_SCHOOL_CAPACITY: u32 = 1000;
pub const DEFAULT_ROAD_COST: f64 = 10_000_000.0;
pub const DEFAULT_ROAD_LENGTH_KM: f64 = 5.0;
pub const DEFAULT_UNKNOWN_COST: f64 = 1_000_000.0;

/// A single hypothetical infrastructure investment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "InterventionSpec")]
pub enum Intervention {
    Hospital {
        capacity: u32,
        location: Option<String>,
        cost: f64,
    },
    /// Bus rapid transit corridor
    TransitCorridor {
        route: Option<String>,
        length_km: f64,
        cost: f64,
    },
    Park {
        area_hectares: f64,
        location: Option<String>,
        cost: f64,
    },
    School {
        capacity: u32,
        location: Option<String>,
        cost: f64,
    },
    Road {
        length_km: f64,
        cost: f64,
    },
    /// Anything the impact model has no formula for
    Unknown {
        kind: String,
        cost: f64,
    },
}

impl Intervention {
    /// Wire tag of this intervention
    pub fn kind(&self) -> &str {
        match self {
            Intervention::Hospital { .. } => "hospital",
            Intervention::TransitCorridor { .. } => "brt",
            Intervention::Park { .. } => "park",
            Intervention::School { .. } => "school",
            Intervention::Road { .. } => "road",
            Intervention::Unknown { kind, .. } => kind,
        }
    }

    /// Whether the impact model has a dedicated formula for this kind
    pub fn is_known(&self) -> bool {
        !matches!(self, Intervention::Unknown { .. })
    }

    pub fn cost(&self) -> f64 {
        match self {
            Intervention::Hospital { cost, .. }
            | Intervention::TransitCorridor { cost, .. }
            | Intervention::Park { cost, .. }
            | Intervention::School { cost, .. }
            | Intervention::Road { cost, .. }
            | Intervention::Unknown { cost, .. } => *cost,
        }
    }

    /// Hospital with default capacity and cost
    pub fn hospital(location: impl Into<String>) -> Self {
        Intervention::Hospital {
            capacity: DEFAULT_HOSPITAL_CAPACITY,
            location: Some(location.into()),
            cost: DEFAULT_HOSPITAL_COST,
        }
    }

    /// BRT corridor with default length and cost
    pub fn transit_corridor(route: impl Into<String>) -> Self {
        Intervention::TransitCorridor {
            route: Some(route.into()),
            length_km: DEFAULT_BRT_LENGTH_KM,
            cost: DEFAULT_BRT_COST,
        }
    }

    pub fn park(location: impl Into<String>) -> Self {
        Intervention::Park {
            area_hectares: DEFAULT_PARK_AREA_HECTARES,
            location: Some(location.into()),
            cost: DEFAULT_PARK_COST,
        }
    }

    pub fn school(capacity: u32) -> Self {
        Intervention::School {
            capacity,
            location: None,
            cost: DEFAULT_SCHOOL_COST,
        }
    }

    pub fn road(length_km: f64) -> Self {
        Intervention::Road {
            length_km,
            cost: DEFAULT_ROAD_COST,
        }
    }
}

impl From<Value> for Intervention {
    fn from(value: Value) -> Self {
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim()
            .to_string();

        let number = |keys: &[&str]| keys.iter().find_map(|k| value.get(*k).and_then(Value::as_f64));
        let capacity = |default: u32| match number(&["capacity"]) {
            None => default,
            Some(n) if n < 0.0 => {
                warn!("Negative capacity {} for '{}', using default {}", n, kind, default);
                default
            }
            Some(n) => {
                if n.fract() != 0.0 {
                    warn!("Fractional capacity {} for '{}', truncating to {}", n, kind, n as u32);
                }
                n as u32
            }
        };
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
        let cost = |default: f64| number(&["cost"]).unwrap_or(default);

        match kind.to_lowercase().as_str() {
            "hospital" => Intervention::Hospital {
                capacity: capacity(DEFAULT_HOSPITAL_CAPACITY),
                location: text("location"),
                cost: cost(DEFAULT_HOSPITAL_COST),
            },
            "brt" => Intervention::TransitCorridor {
                route: text("route"),
                length_km: number(&["lengthKm", "length_km"]).unwrap_or(DEFAULT_BRT_LENGTH_KM),
                cost: cost(DEFAULT_BRT_COST),
            },
            "park" => Intervention::Park {
                area_hectares: number(&["areaHectares", "area_hectares"])
                    .unwrap_or(DEFAULT_PARK_AREA_HECTARES),
                location: text("location"),
                cost: cost(DEFAULT_PARK_COST),
            },
            "school" => Intervention::School {
                capacity: capacity(DEFAULT_SCHOOL_CAPACITY),
                location: text("location"),
                cost: cost(DEFAULT_SCHOOL_COST),
            },
            "road" => Intervention::Road {
                length_km: number(&["lengthKm", "length_km"]).unwrap_or(DEFAULT_ROAD_LENGTH_KM),
                cost: cost(DEFAULT_ROAD_COST),
            },
            _ => Intervention::Unknown {
                kind,
                cost: cost(DEFAULT_UNKNOWN_COST),
            },
        }
    }
}

/// Flat wire form written back out in scenario results
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct InterventionSpec {
    #[serde(rename = "type")]
    kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    capacity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    route: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    length_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    area_hectares: Option<f64>,
    cost: f64,
}

impl From<Intervention> for InterventionSpec {
    fn from(intervention: Intervention) -> Self {
        let kind = intervention.kind().to_string();
        match intervention {
            Intervention::Hospital { capacity, location, cost }
            | Intervention::School { capacity, location, cost } => InterventionSpec {
                kind,
                capacity: Some(capacity),
                location,
                cost,
                ..Default::default()
            },
            Intervention::TransitCorridor { route, length_km, cost } => InterventionSpec {
                kind,
                route,
                length_km: Some(length_km),
                cost,
                ..Default::default()
            },
            Intervention::Park { area_hectares, location, cost } => InterventionSpec {
                kind,
                area_hectares: Some(area_hectares),
                location,
                cost,
                ..Default::default()
            },
            Intervention::Road { length_km, cost } => InterventionSpec {
                kind,
                length_km: Some(length_km),
                cost,
                ..Default::default()
            },
            Intervention::Unknown { cost, .. } => InterventionSpec {
                kind,
                cost,
                ..Default::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{classify_confidence, ConfidenceLevel, InterventionImpact};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn parse(value: Value) -> Intervention {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_hospital_defaults() {
        assert_eq!(
            parse(json!({"type": "hospital"})),
            Intervention::Hospital {
                capacity: 150,
                location: None,
                cost: 3_000_000.0,
            }
        );
    }

    #[test]
    fn test_kind_is_case_insensitive() {
        let parsed = parse(json!({"type": "  BRT ", "route": "CBD-Eastleigh", "length_km": 12}));
        assert_eq!(
            parsed,
            Intervention::TransitCorridor {
                route: Some("CBD-Eastleigh".to_string()),
                length_km: 12.0,
                cost: 50_000_000.0,
            }
        );
    }

    #[test]
    fn test_transit_corridor_tag_is_not_brt() {
        let parsed = parse(json!({"type": "transit_corridor", "cost": 2_000_000}));
        assert_eq!(
            parsed,
            Intervention::Unknown {
                kind: "transit_corridor".to_string(),
                cost: 2_000_000.0,
            }
        );
        assert!(!parsed.is_known());

        assert_eq!(
            InterventionImpact::estimate(&parsed, 3.0),
            InterventionImpact {
                cost: 2_000_000.0,
                beneficiaries: 10_000,
                accessibility_gain: 2.0,
                implementation_months: 12,
                equity_score: 3.0,
            }
        );
        assert_eq!(classify_confidence(&[parsed]), ConfidenceLevel::Low);
    }

    #[test]
    fn test_fractional_capacity_is_truncated() {
        let parsed = parse(json!({"type": "school", "capacity": 2.5}));
        assert_eq!(
            parsed,
            Intervention::School {
                capacity: 2,
                location: None,
                cost: 5_000_000.0,
            }
        );
        assert_eq!(InterventionImpact::estimate(&parsed, 0.0).beneficiaries, 8);
    }

    #[test]
    fn test_negative_capacity_uses_default() {
        let parsed = parse(json!({"type": "hospital", "capacity": -5}));
        assert_eq!(
            parsed,
            Intervention::Hospital {
                capacity: DEFAULT_HOSPITAL_CAPACITY,
                location: None,
                cost: DEFAULT_HOSPITAL_COST,
            }
        );
    }

    #[test]
    fn test_school_capacity_and_cost_supplied() {
        let parsed = parse(json!({"type": "school", "capacity": 600, "cost": 4_000_000}));
        assert_eq!(
            parsed,
            Intervention::School {
                capacity: 600,
                location: None,
                cost: 4_000_000.0,
            }
        );
    }

    #[test]
    fn test_unknown_kind_keeps_supplied_cost() {
        let parsed = parse(json!({"type": "desalination_plant", "cost": 7_500_000}));
        assert_eq!(
            parsed,
            Intervention::Unknown {
                kind: "desalination_plant".to_string(),
                cost: 7_500_000.0,
            }
        );
        assert!(!parsed.is_known());
    }

    #[test]
    fn test_missing_type_degrades_to_unknown() {
        let parsed = parse(json!({"cost": "not a number"}));
        assert_eq!(
            parsed,
            Intervention::Unknown {
                kind: String::new(),
                cost: 1_000_000.0,
            }
        );
    }

    #[test]
    fn test_malformed_field_falls_back_to_default() {
        let parsed = parse(json!({"type": "park", "areaHectares": "large"}));
        assert_eq!(
            parsed,
            Intervention::Park {
                area_hectares: 8.0,
                location: None,
                cost: 3_000_000.0,
            }
        );
    }

    #[test]
    fn test_non_object_entry_is_unknown() {
        assert!(!parse(json!(42)).is_known());
    }

    #[test]
    fn test_serialized_form_is_flat() {
        let json = serde_json::to_value(Intervention::hospital("Kibera")).unwrap();
        assert_eq!(
            json,
            json!({"type": "hospital", "capacity": 150, "location": "Kibera", "cost": 3_000_000.0})
        );
    }
}
