// src/demand/implementations.rs

use crate::demand::traits::DemandModel;
use crate::error::{NetworkError, Result};
use crate::model::network::City;
use rand::Rng;
use rand_distr::{Distribution, Normal};

// =========================================================================
// 1. Mean Demand
// =========================================================================

/// Every city presents exactly its average demand.
#[derive(Debug, Clone, Default)]
pub struct MeanDemand;

impl MeanDemand {
    pub fn new() -> Self {
        Self
    }
}

impl DemandModel for MeanDemand {
    fn demand_for(&mut self, city: &City) -> Result<f64> {
        city.check_demand()?;
        Ok(clip_demand(city.mean_demand))
    }
}

// =========================================================================
// 2. Normal Demand
// =========================================================================

/// Draws each city's demand from Normal(mean, std), clipped at zero.
///
/// The random source is injected so that seeded runs are reproducible.
#[derive(Debug)]
pub struct NormalDemand<'a, R: Rng> {
    rng: &'a mut R,
}

impl<'a, R: Rng> NormalDemand<'a, R> {
    pub fn new(rng: &'a mut R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + std::fmt::Debug> DemandModel for NormalDemand<'_, R> {
    fn demand_for(&mut self, city: &City) -> Result<f64> {
        // Normal::new mirrors a negative std instead of rejecting it.
        city.check_demand()?;
        let normal = Normal::new(city.mean_demand, city.std_dev_demand)
            .map_err(|e| NetworkError::Distribution(format!("{}: {e}", city.name)))?;
        Ok(clip_demand(normal.sample(&mut *self.rng)))
    }
}

/// Demand cannot be negative.
pub fn clip_demand(value: f64) -> f64 {
    if value < 0.0 {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::network::Position;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn city(mean: f64, std_dev: f64) -> City {
        City::with_std_dev("X", Position::new(0.0, 0.0), mean, std_dev)
    }

    #[test]
    fn test_mean_demand_returns_mean() {
        let mut model = MeanDemand::new();
        assert_eq!(model.demand_for(&city(119_049.61, 0.0)).unwrap(), 119_049.61);
    }

    #[test]
    fn test_normal_demand_is_clipped_when_draws_go_negative() {
        // Mean at zero: about half the raw draws are negative.
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut model = NormalDemand::new(&mut rng);
        let c = city(0.0, 100.0);
        let draws: Vec<f64> = (0..500).map(|_| model.demand_for(&c).unwrap()).collect();
        assert!(draws.iter().all(|d| *d >= 0.0));
        assert!(draws.iter().any(|d| *d == 0.0));
    }

    #[test]
    fn test_normal_demand_zero_std_is_mean() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut model = NormalDemand::new(&mut rng);
        assert_eq!(model.demand_for(&city(42.0, 0.0)).unwrap(), 42.0);
    }

    #[test]
    fn test_normal_demand_same_seed_same_draws() {
        let c = city(1000.0, 200.0);
        let mut a = ChaCha8Rng::seed_from_u64(11);
        let mut b = ChaCha8Rng::seed_from_u64(11);
        let mut ma = NormalDemand::new(&mut a);
        let mut mb = NormalDemand::new(&mut b);
        for _ in 0..20 {
            assert_eq!(ma.demand_for(&c).unwrap(), mb.demand_for(&c).unwrap());
        }
    }

    #[test]
    fn test_invalid_std_dev_is_distribution_error() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut model = NormalDemand::new(&mut rng);
        for std_dev in [-5.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                model.demand_for(&city(100.0, std_dev)),
                Err(NetworkError::Distribution(_))
            ));
        }
        assert!(matches!(
            MeanDemand::new().demand_for(&city(f64::NAN, 1.0)),
            Err(NetworkError::Distribution(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_clip_demand_non_negative(v in -1e9..1e9f64) {
            let clipped = clip_demand(v);
            prop_assert!(clipped >= 0.0);
            if v >= 0.0 {
                prop_assert_eq!(clipped, v);
            }
        }
    }
}
