// src/io/dataset.rs

use crate::error::{NetworkError, Result};
use crate::model::network::{City, Facility, Position, Scenario};
use crate::simulation::config::ScenarioSpec;

pub const FACILITY_SAO_PAULO: &str = "CD São Paulo";
pub const FACILITY_BRASILIA: &str = "CD Brasília";

/// Share of the population that turns into demand.
pub const DEMAND_PER_CAPITA: f64 = 0.01;

/// (name, latitude, longitude, population)
const CAPITALS: [(&str, f64, f64, f64); 8] = [
    ("São Paulo", -23.5337, -46.6253, 11_904_961.0),
    ("Rio de Janeiro", -22.9083, -43.1964, 6_730_729.0),
    ("Belo Horizonte", -19.9167, -43.9345, 2_415_872.0),
    ("Vitória", -20.3155, -40.3128, 343_000.0),
    ("Brasília", -15.7939, -47.8828, 2_996_899.0),
    ("Goiânia", -16.6869, -49.2648, 1_503_256.0),
    ("Cuiabá", -15.5989, -56.0949, 691_875.0),
    ("Campo Grande", -20.4428, -54.6464, 962_883.0),
];

/// The eight state capitals served by the network.
///
/// Mean demand is 1% of the population; the standard deviation is
/// `variability` times the mean.
pub fn brazilian_capitals(variability: f64) -> Vec<City> {
    CAPITALS
        .iter()
        .map(|(name, lat, lon, population)| {
            City::new(
                name,
                Position::new(*lat, *lon),
                population * DEMAND_PER_CAPITA,
                variability,
            )
        })
        .collect()
}

/// Candidate distribution centers.
pub fn candidate_facilities() -> Vec<Facility> {
    vec![
        Facility::new(FACILITY_SAO_PAULO, Position::new(-23.5337, -46.6252)),
        Facility::new(FACILITY_BRASILIA, Position::new(-15.7938, -47.8827)),
    ]
}

/// Picks the served set out of `cities`, in the order given by `names`.
pub fn select_cities(cities: &[City], names: &[String]) -> Result<Vec<City>> {
    if names.is_empty() {
        return Err(NetworkError::InvalidConfiguration(
            "select at least one city to serve".to_string(),
        ));
    }
    names
        .iter()
        .map(|name| {
            cities
                .iter()
                .find(|c| &c.name == name)
                .cloned()
                .ok_or_else(|| NetworkError::UnknownCity(name.clone()))
        })
        .collect()
}

/// Picks the active facilities out of `facilities`, in the order given by `names`.
pub fn select_facilities(facilities: &[Facility], names: &[String]) -> Result<Vec<Facility>> {
    if names.is_empty() {
        return Err(NetworkError::InvalidConfiguration(
            "select at least one distribution center".to_string(),
        ));
    }
    names
        .iter()
        .map(|name| {
            facilities
                .iter()
                .find(|f| &f.name == name)
                .cloned()
                .ok_or_else(|| NetworkError::UnknownFacility(name.clone()))
        })
        .collect()
}

/// Resolves configured scenario specs against the candidate facilities.
pub fn resolve_scenarios(facilities: &[Facility], specs: &[ScenarioSpec]) -> Result<Vec<Scenario>> {
    specs
        .iter()
        .map(|spec| {
            let active = select_facilities(facilities, &spec.facilities)?;
            Ok(Scenario::new(&spec.name, active))
        })
        .collect()
}

/// Names of every bundled city, in reference order.
pub fn city_names(cities: &[City]) -> Vec<String> {
    cities.iter().map(|c| c.name.clone()).collect()
}
