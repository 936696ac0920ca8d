// src/simulation/evaluator.rs

use crate::cost::inventory::{eoq_cost, safety_stock_cost};
use crate::demand::implementations::MeanDemand;
use crate::demand::traits::DemandModel;
use crate::error::{NetworkError, Result};
use crate::model::geo::nearest_facility;
use crate::model::network::{City, Facility, Position};
use crate::simulation::config::CostParameters;
use serde::Serialize;

/// Cost of one network for one demand realization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub transport: f64,
    pub inventory: f64,
    pub fixed: f64,
}

impl CostBreakdown {
    pub fn total(&self) -> f64 {
        self.transport + self.inventory + self.fixed
    }
}

/// Which facility serves each city for one demand draw, and what each
/// facility ends up carrying.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Facility index per served city, in city order.
    pub facility_of_city: Vec<usize>,
    /// Aggregated demand per facility, in facility order.
    pub facility_demand: Vec<f64>,
    /// Sum of the assigned cities' demand variances per facility.
    pub facility_variance: Vec<f64>,
    /// Demand * distance * C_t summed over cities.
    pub transport_cost: f64,
}

/// Rejects a network that cannot be evaluated: no served city, no active
/// facility, or a city whose demand parameters are not a distribution.
pub fn check_network(cities: &[City], facilities: &[Facility]) -> Result<()> {
    if cities.is_empty() {
        return Err(NetworkError::InvalidConfiguration(
            "no served city selected".to_string(),
        ));
    }
    if facilities.is_empty() {
        return Err(NetworkError::InvalidConfiguration(
            "no active facility selected".to_string(),
        ));
    }
    cities.iter().try_for_each(City::check_demand)
}

/// Assigns every served city to its nearest facility and aggregates the
/// demand drawn from `demand`.
pub fn assign(
    cities: &[City],
    facilities: &[Facility],
    demand: &mut dyn DemandModel,
    transport_rate: f64,
) -> Result<Assignment> {
    check_network(cities, facilities)?;

    let positions: Vec<Position> = facilities.iter().map(|f| f.position).collect();
    let mut assignment = Assignment {
        facility_of_city: Vec::with_capacity(cities.len()),
        facility_demand: vec![0.0; facilities.len()],
        facility_variance: vec![0.0; facilities.len()],
        transport_cost: 0.0,
    };

    for city in cities {
        let (idx, dist) = nearest_facility(&city.position, &positions).ok_or_else(|| {
            NetworkError::InvalidConfiguration("no active facility selected".to_string())
        })?;
        let d = demand.demand_for(city)?;

        assignment.transport_cost += d * dist * transport_rate;
        assignment.facility_demand[idx] += d;
        assignment.facility_variance[idx] += city.variance();
        assignment.facility_of_city.push(idx);
    }

    Ok(assignment)
}

/// Prices an assignment.
///
/// `z_score` of `None` drops the safety-stock term (deterministic mode).
pub fn price_assignment(
    assignment: &Assignment,
    costs: &CostParameters,
    z_score: Option<f64>,
    lead_time: f64,
) -> CostBreakdown {
    let inventory: f64 = assignment
        .facility_demand
        .iter()
        .zip(&assignment.facility_variance)
        .filter(|(d, _)| **d > 0.0)
        .map(|(d, var)| {
            let cycle = eoq_cost(*d, costs.order_cost, costs.holding_rate);
            let safety = z_score
                .map(|z| safety_stock_cost(z, *var, lead_time, costs.holding_rate))
                .unwrap_or(0.0);
            cycle + safety
        })
        .sum();

    CostBreakdown {
        transport: assignment.transport_cost,
        inventory,
        fixed: assignment.facility_demand.len() as f64 * costs.fixed_cost,
    }
}

/// Deterministic mode: every city presents its average demand.
pub fn evaluate_deterministic(
    cities: &[City],
    facilities: &[Facility],
    costs: &CostParameters,
) -> Result<CostBreakdown> {
    costs.validate()?;
    let mut demand = MeanDemand::new();
    let assignment = assign(cities, facilities, &mut demand, costs.transport_rate)?;
    Ok(price_assignment(&assignment, costs, None, 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::dataset::{brazilian_capitals, candidate_facilities};

    fn city_at(lat: f64, lon: f64, demand: f64) -> City {
        City::new("C", Position::new(lat, lon), demand, 0.2)
    }

    fn facility_at(name: &str, lat: f64, lon: f64) -> Facility {
        Facility::new(name, Position::new(lat, lon))
    }

    #[test]
    fn test_single_city_on_top_of_facility() {
        let cities = vec![city_at(-23.53, -46.62, 119_049.0)];
        let facilities = vec![facility_at("A", -23.53, -46.62)];
        let costs = CostParameters::default();

        let b = evaluate_deterministic(&cities, &facilities, &costs).unwrap();
        assert_eq!(b.transport, 0.0);
        let eoq = (2.0 * 500.0 * 119_049.0_f64 / 2.0).sqrt();
        assert!((b.inventory - eoq).abs() < 1e-9);
        assert_eq!(b.fixed, 500_000.0);
        assert!((b.total() - (eoq + 500_000.0)).abs() < 1e-9);
    }

    #[test]
    fn test_fixed_cost_is_facility_count_times_rate() {
        let cities = brazilian_capitals(0.2);
        let costs = CostParameters::default();
        for n in 1..=2 {
            let facilities: Vec<Facility> = candidate_facilities().into_iter().take(n).collect();
            let b = evaluate_deterministic(&cities, &facilities, &costs).unwrap();
            assert_eq!(b.fixed, n as f64 * costs.fixed_cost);
        }
    }

    #[test]
    fn test_idle_facility_adds_no_inventory_cost() {
        let cities = vec![city_at(0.0, 0.0, 1000.0)];
        let near = vec![facility_at("A", 0.0, 1.0)];
        let with_far = vec![facility_at("A", 0.0, 1.0), facility_at("B", 50.0, 50.0)];
        let costs = CostParameters::default();

        let one = evaluate_deterministic(&cities, &near, &costs).unwrap();
        let two = evaluate_deterministic(&cities, &with_far, &costs).unwrap();
        assert_eq!(one.inventory, two.inventory);
        assert!(!two.inventory.is_nan());
        assert_eq!(two.fixed - one.fixed, costs.fixed_cost);
    }

    #[test]
    fn test_transport_monotone_in_distance_and_demand() {
        let facilities = vec![facility_at("A", 0.0, 0.0)];
        let costs = CostParameters::default();
        let cost = |lat: f64, demand: f64| {
            evaluate_deterministic(&[city_at(lat, 0.0, demand)], &facilities, &costs)
                .unwrap()
                .transport
        };

        let mut last = 0.0;
        for lat in [0.0, 0.5, 1.0, 2.0, 5.0] {
            let t = cost(lat, 100.0);
            assert!(t >= last);
            last = t;
        }
        let mut last = 0.0;
        for demand in [0.0, 1.0, 10.0, 1000.0] {
            let t = cost(1.0, demand);
            assert!(t >= last);
            last = t;
        }
        assert!((cost(1.0, 100.0) - 100.0 * 111.0 * 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_assignment_pools_demand_and_variance() {
        let cities = vec![
            City::with_std_dev("N", Position::new(1.0, 0.0), 100.0, 10.0),
            City::with_std_dev("S", Position::new(-1.0, 0.0), 300.0, 20.0),
            City::with_std_dev("N2", Position::new(2.0, 0.0), 50.0, 5.0),
        ];
        let facilities = vec![facility_at("North", 3.0, 0.0), facility_at("South", -3.0, 0.0)];
        let a = assign(&cities, &facilities, &mut MeanDemand::new(), 0.05).unwrap();

        assert_eq!(a.facility_of_city, vec![0, 1, 0]);
        assert_eq!(a.facility_demand, vec![150.0, 300.0]);
        assert_eq!(a.facility_variance, vec![125.0, 400.0]);
    }

    #[test]
    fn test_empty_inputs_are_invalid_configuration() {
        let costs = CostParameters::default();
        let cities = brazilian_capitals(0.2);
        let facilities = candidate_facilities();
        assert!(matches!(
            evaluate_deterministic(&[], &facilities, &costs),
            Err(NetworkError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            evaluate_deterministic(&cities, &[], &costs),
            Err(NetworkError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_negative_std_dev_is_distribution_error() {
        let cities = vec![City::with_std_dev("X", Position::new(0.0, 0.0), 100.0, -5.0)];
        let facilities = vec![facility_at("A", 0.0, 0.0)];
        assert!(matches!(
            assign(&cities, &facilities, &mut MeanDemand::new(), 0.05),
            Err(NetworkError::Distribution(_))
        ));
        assert!(matches!(
            evaluate_deterministic(&cities, &facilities, &CostParameters::default()),
            Err(NetworkError::Distribution(_))
        ));
    }

    #[test]
    fn test_price_with_safety_stock() {
        let a = Assignment {
            facility_of_city: vec![0],
            facility_demand: vec![1000.0, 0.0],
            facility_variance: vec![400.0, 0.0],
            transport_cost: 10.0,
        };
        let costs = CostParameters::default();
        let b = price_assignment(&a, &costs, Some(2.0), 4.0);
        let expected = eoq_cost(1000.0, 500.0, 2.0) + 2.0 * 20.0 * 2.0 * 2.0;
        assert!((b.inventory - expected).abs() < 1e-9);
        assert_eq!(b.fixed, 1_000_000.0);
        assert_eq!(b.transport, 10.0);
    }
}
