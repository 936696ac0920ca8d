// src/model/network.rs

use crate::error::{NetworkError, Result};
use serde::Serialize;

/// A point on the map, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
}

impl Position {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A demand point served by the network.
///
/// Cities are reference data: they are built once and only selected or
/// deselected by the caller to form the served set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct City {
    // Identity
    pub name: String,
    pub position: Position,

    // Demand characteristics
    pub mean_demand: f64,
    pub std_dev_demand: f64,
}

impl City {
    /// Builds a city whose demand standard deviation is a fixed fraction of its mean.
    pub fn new(name: &str, position: Position, mean_demand: f64, variability: f64) -> Self {
        Self {
            name: name.to_string(),
            position,
            mean_demand,
            std_dev_demand: mean_demand * variability,
        }
    }

    /// Builds a city with an explicit demand standard deviation.
    pub fn with_std_dev(name: &str, position: Position, mean_demand: f64, std_dev: f64) -> Self {
        Self {
            name: name.to_string(),
            position,
            mean_demand,
            std_dev_demand: std_dev,
        }
    }

    /// Rejects a non-finite mean, or a std that is negative or non-finite.
    pub fn check_demand(&self) -> Result<()> {
        if !self.mean_demand.is_finite()
            || !self.std_dev_demand.is_finite()
            || self.std_dev_demand < 0.0
        {
            return Err(NetworkError::Distribution(format!(
                "{}: mean {} / std {}",
                self.name, self.mean_demand, self.std_dev_demand
            )));
        }
        Ok(())
    }

    /// Demand variance (std²), the quantity pooled per facility.
    pub fn variance(&self) -> f64 {
        self.std_dev_demand * self.std_dev_demand
    }
}

/// A candidate distribution center.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Facility {
    pub name: String,
    pub position: Position,
}

impl Facility {
    pub fn new(name: &str, position: Position) -> Self {
        Self {
            name: name.to_string(),
            position,
        }
    }
}

/// One network design: a named, non-empty set of active facilities.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub name: String,
    pub facilities: Vec<Facility>,
}

impl Scenario {
    pub fn new(name: &str, facilities: Vec<Facility>) -> Self {
        Self {
            name: name.to_string(),
            facilities,
        }
    }

    pub fn facility_count(&self) -> usize {
        self.facilities.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_std_dev_is_fraction_of_mean() {
        let city = City::new("São Paulo", Position::new(-23.5337, -46.6253), 119_049.61, 0.2);
        assert!((city.std_dev_demand - 23_809.922).abs() < 1e-6);
        assert!((city.variance() - 23_809.922_f64.powi(2)).abs() < 1e-3);
    }

    #[test]
    fn test_check_demand() {
        let p = Position::new(0.0, 0.0);
        assert!(City::with_std_dev("ok", p, 100.0, 0.0).check_demand().is_ok());
        assert!(City::with_std_dev("neg", p, 100.0, -5.0).check_demand().is_err());
        assert!(City::with_std_dev("nan", p, f64::NAN, 1.0).check_demand().is_err());
        assert!(City::with_std_dev("inf", p, 100.0, f64::INFINITY).check_demand().is_err());
    }

    #[test]
    fn test_scenario_facility_count() {
        let scenario = Scenario::new(
            "Both",
            vec![
                Facility::new("A", Position::new(0.0, 0.0)),
                Facility::new("B", Position::new(1.0, 1.0)),
            ],
        );
        assert_eq!(scenario.facility_count(), 2);
    }
}
