// src/demand/traits.rs

use crate::error::Result;
use crate::model::network::City;
use std::fmt::Debug;

/// Decides which demand a city presents for one evaluation.
///
/// The deterministic evaluator uses the city's mean; the Monte Carlo engine
/// draws a fresh value for every trial.
pub trait DemandModel: Debug {
    /// Demand realized by `city` for this evaluation. Never negative.
    ///
    /// Fails with `NetworkError::Distribution` when the city's demand
    /// parameters cannot describe a distribution.
    fn demand_for(&mut self, city: &City) -> Result<f64>;
}
