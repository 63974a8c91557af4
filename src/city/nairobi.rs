//! Nairobi sample layers

use crate::models::{
    CityFeatures, CommercialZone, Facility, FacilityKind, GeoPoint, GreenSpace, ResidentialZone,
    RoadSegment,
};

use super::CityProfile;

pub(super) const ID: &str = "nairobi";

const CBD: GeoPoint = GeoPoint::new(-1.2864, 36.8172);

pub(super) fn profile() -> CityProfile {
    CityProfile {
        id: ID.to_string(),
        name: "Nairobi, Kenya".to_string(),
        population: 4_500_000,
        area_km2: 696.0,
        available: true,
    }
}

pub(super) fn features() -> CityFeatures {
    CityFeatures {
        residential: residential(),
        commercial: commercial(),
        facilities: facilities(),
        roads: roads(),
        green_spaces: green_spaces(),
    }
}

fn residential() -> Vec<ResidentialZone> {
    [
        ("Westlands", -1.2675, 36.8078, 8_500.0, 12.5),
        ("Kibera", -1.3133, 36.7894, 45_000.0, 2.5),
        ("Eastleigh", -1.2752, 36.8421, 35_000.0, 3.2),
        ("Karen", -1.3167, 36.7014, 2_500.0, 15.8),
        ("Parklands", -1.2583, 36.8264, 12_000.0, 8.3),
        ("Embakasi", -1.3197, 36.8933, 28_000.0, 5.7),
        ("Lavington", -1.2808, 36.7686, 5_500.0, 6.2),
        ("Kasarani", -1.2231, 36.8989, 15_000.0, 9.1),
    ]
    .into_iter()
    .map(|(name, lat, lon, density, area)| {
        ResidentialZone::new(name, GeoPoint::new(lat, lon), density, area)
    })
    .collect()
}

fn commercial() -> Vec<CommercialZone> {
    [
        ("CBD", -1.2864, 36.8172, 4.2, 8_500),
        ("Westlands Business District", -1.2650, 36.8050, 3.5, 4_200),
        ("Industrial Area", -1.3197, 36.8347, 6.8, 1_200),
        ("Kilimani", -1.2892, 36.7850, 2.8, 3_100),
    ]
    .into_iter()
    .map(|(name, lat, lon, area_km2, businesses)| CommercialZone {
        name: name.to_string(),
        center: GeoPoint::new(lat, lon),
        area_km2,
        businesses,
    })
    .collect()
}

fn facilities() -> Vec<Facility> {
    use FacilityKind::{Hospital, School};

    [
        ("Kenyatta National Hospital", Hospital, -1.3008, 36.8072, 2_000),
        ("Nairobi Hospital", Hospital, -1.2889, 36.8086, 500),
        ("Aga Khan University Hospital", Hospital, -1.2536, 36.8114, 350),
        ("University of Nairobi", School, -1.2794, 36.8158, 35_000),
        ("Strathmore University", School, -1.3100, 36.8117, 5_000),
        ("Alliance High School", School, -1.2456, 36.8989, 1_200),
        ("Karura Forest Health Center", Hospital, -1.2436, 36.8372, 150),
    ]
    .into_iter()
    .map(|(name, kind, lat, lon, capacity)| Facility {
        name: name.to_string(),
        kind,
        location: GeoPoint::new(lat, lon),
        capacity,
    })
    .collect()
}

/// Major roads, each radiating out of the CBD
fn roads() -> Vec<RoadSegment> {
    [
        ("Uhuru Highway", -1.3200, 36.8400),
        ("Mombasa Road", -1.3400, 36.8800),
        ("Thika Road", -1.2200, 36.9000),
        ("Waiyaki Way", -1.2600, 36.7400),
        ("Ngong Road", -1.3200, 36.7600),
    ]
    .into_iter()
    .map(|(name, lat, lon)| RoadSegment {
        name: name.to_string(),
        kind: "major_road".to_string(),
        path: vec![CBD, GeoPoint::new(lat, lon)],
    })
    .collect()
}

fn green_spaces() -> Vec<GreenSpace> {
    [
        ("Karura Forest", 10.2),
        ("Nairobi Arboretum", 0.3),
        ("Uhuru Park", 0.13),
        ("Central Park", 0.04),
        ("City Park", 0.6),
    ]
    .into_iter()
    .map(|(name, area_km2)| GreenSpace {
        name: name.to_string(),
        area_km2,
    })
    .collect()
}
