// src/cost/inventory.rs

/// Inventory cost formulas.
///
/// This module holds the closed-form pieces of the network cost: the
/// square-root (Wilson / EOQ) cycle-stock cost, the safety-stock cost for
/// a pooled demand variance, and the service level to z-score conversion.
use crate::error::{NetworkError, Result};

/// Lowest accepted service level, in percent.
pub const MIN_SERVICE_LEVEL: f64 = 80.0;
/// Highest accepted service level, in percent.
pub const MAX_SERVICE_LEVEL: f64 = 99.9;

/// Service levels used for the cost vs. service level sweep.
pub const CANONICAL_SERVICE_LEVELS: [f64; 3] = [90.0, 95.0, 99.0];

/// Cycle-stock cost of a facility serving aggregated demand `demand`.
///
/// # Formula
/// Cost = (sqrt(2 * K * d / h) / 2) * h
///
/// The order quantity is the Wilson lot size; on average half of it sits
/// in stock and is charged the holding rate.
///
/// Returns exactly 0 for a facility with no positive demand.
pub fn eoq_cost(demand: f64, order_cost: f64, holding_rate: f64) -> f64 {
    if demand <= 0.0 {
        return 0.0;
    }
    let lot_size = ((2.0 * order_cost * demand) / holding_rate).sqrt();
    (lot_size / 2.0) * holding_rate
}

/// Safety-stock holding cost for a facility.
///
/// # Formula
/// Cost = z * sqrt(pooled_variance) * sqrt(LT) * h
///
/// `pooled_variance` is the sum of the demand variances of every city
/// assigned to the facility. Summing variances treats the cities' demands
/// as independent of one another; correlated demand would need covariance
/// terms and would shrink the risk-pooling benefit.
pub fn safety_stock_cost(z_score: f64, pooled_variance: f64, lead_time: f64, holding_rate: f64) -> f64 {
    if pooled_variance <= 0.0 {
        return 0.0;
    }
    z_score * pooled_variance.sqrt() * lead_time.sqrt() * holding_rate
}

/// Converts a service level percentage (80.0 - 99.9) into a z-score.
pub fn z_score_for_service_level(service_level: f64) -> Result<f64> {
    if !(MIN_SERVICE_LEVEL..=MAX_SERVICE_LEVEL).contains(&service_level) {
        return Err(NetworkError::InvalidServiceLevel(service_level));
    }
    Ok(inverse_normal_cdf(service_level / 100.0))
}

/// Approximate Inverse Cumulative Distribution Function (Quantile function) for Standard Normal Distribution.
///
/// Based on Abramowitz and Stegun formula 26.2.23.
/// The absolute error is less than 4.5e-4.
pub fn inverse_normal_cdf(p: f64) -> f64 {
    // Handle edge cases
    if p >= 1.0 {
        return 5.0;
    } // Cap at reasonable sigma
    if p <= 0.0 {
        return -5.0;
    }
    if p == 0.5 {
        return 0.0;
    }

    // Formula is valid for 0 < p <= 0.5
    let q = if p < 0.5 { p } else { 1.0 - p };

    let t = (-2.0 * q.ln()).sqrt();

    let c0 = 2.515517;
    let c1 = 0.802853;
    let c2 = 0.010328;

    let d1 = 1.432788;
    let d2 = 0.189269;
    let d3 = 0.001308;

    let numerator = c0 + c1 * t + c2 * t * t;
    let denominator = 1.0 + d1 * t + d2 * t * t + d3 * t * t * t;

    let x = t - (numerator / denominator);

    if p < 0.5 {
        -x
    } else {
        x
    }
}
