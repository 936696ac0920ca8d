// src/simulation/config.rs

use crate::cost::inventory::{MAX_SERVICE_LEVEL, MIN_SERVICE_LEVEL};
use crate::error::{NetworkError, Result};
use crate::io::dataset::{FACILITY_BRASILIA, FACILITY_SAO_PAULO};

/// Cost rates applied by both evaluation modes.
#[derive(Debug, Clone, PartialEq)]
pub struct CostParameters {
    /// Fixed cost per active facility (`C_f`).
    pub fixed_cost: f64,
    /// Transport cost per unit of demand per kilometer (`C_t`).
    pub transport_rate: f64,
    /// Holding cost per unit (`h`).
    pub holding_rate: f64,
    /// Fixed cost per replenishment order (`K`).
    pub order_cost: f64,
}

impl Default for CostParameters {
    fn default() -> Self {
        Self {
            fixed_cost: 500_000.0,
            transport_rate: 0.05,
            holding_rate: 2.0,
            order_cost: 500.0,
        }
    }
}

impl CostParameters {
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("fixed_cost", self.fixed_cost),
            ("transport_rate", self.transport_rate),
            ("order_cost", self.order_cost),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(NetworkError::InvalidConfiguration(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        // Divides the EOQ lot size.
        if !self.holding_rate.is_finite() || self.holding_rate <= 0.0 {
            return Err(NetworkError::InvalidConfiguration(format!(
                "holding_rate must be positive, got {}",
                self.holding_rate
            )));
        }
        Ok(())
    }
}

/// A named network design, listed by facility name.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioSpec {
    pub name: String,
    pub facilities: Vec<String>,
}

impl ScenarioSpec {
    pub fn new(name: &str, facilities: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            facilities: facilities.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// The three designs compared by default: each DC alone, then both.
pub fn default_scenarios() -> Vec<ScenarioSpec> {
    vec![
        ScenarioSpec::new("Centralized (São Paulo)", &[FACILITY_SAO_PAULO]),
        ScenarioSpec::new("Centralized (Brasília)", &[FACILITY_BRASILIA]),
        ScenarioSpec::new(
            "Decentralized (São Paulo + Brasília)",
            &[FACILITY_SAO_PAULO, FACILITY_BRASILIA],
        ),
    ]
}

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub costs: CostParameters,
    /// Replenishment lead time (`LT`), in periods.
    pub lead_time: f64,
    /// Monte Carlo trials per scenario.
    pub trials: usize,
    /// Demand standard deviation as a fraction of the mean.
    pub demand_variability: f64,
    /// Target service level, in percent.
    pub service_level: f64,
    /// Seed for the random source; `None` draws a fresh one per run.
    pub seed: Option<u64>,
    pub scenarios: Vec<ScenarioSpec>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            costs: CostParameters::default(),
            lead_time: 2.0,
            trials: 200,
            demand_variability: 0.20,
            service_level: 95.0,
            seed: None,
            scenarios: default_scenarios(),
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        self.costs.validate()?;
        if !self.lead_time.is_finite() || self.lead_time < 0.0 {
            return Err(NetworkError::InvalidConfiguration(format!(
                "lead_time must be non-negative, got {}",
                self.lead_time
            )));
        }
        if self.trials == 0 {
            return Err(NetworkError::InvalidConfiguration(
                "trials must be at least 1".to_string(),
            ));
        }
        if !self.demand_variability.is_finite() || self.demand_variability < 0.0 {
            return Err(NetworkError::InvalidConfiguration(format!(
                "demand_variability must be non-negative, got {}",
                self.demand_variability
            )));
        }
        if !(MIN_SERVICE_LEVEL..=MAX_SERVICE_LEVEL).contains(&self.service_level) {
            return Err(NetworkError::InvalidServiceLevel(self.service_level));
        }
        if self.scenarios.is_empty() {
            return Err(NetworkError::InvalidConfiguration(
                "at least one scenario is required".to_string(),
            ));
        }
        for scenario in &self.scenarios {
            if scenario.facilities.is_empty() {
                return Err(NetworkError::InvalidConfiguration(format!(
                    "scenario '{}' has no active facility",
                    scenario.name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_constants() {
        let config = SimulationConfig::default();
        assert_eq!(config.costs.fixed_cost, 500_000.0);
        assert_eq!(config.costs.transport_rate, 0.05);
        assert_eq!(config.costs.holding_rate, 2.0);
        assert_eq!(config.costs.order_cost, 500.0);
        assert_eq!(config.lead_time, 2.0);
        assert_eq!(config.trials, 200);
        assert_eq!(config.demand_variability, 0.20);
        assert_eq!(config.scenarios.len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_trials_rejected() {
        let config = SimulationConfig {
            trials: 0,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(NetworkError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_empty_scenario_rejected() {
        let config = SimulationConfig {
            scenarios: vec![ScenarioSpec::new("Empty", &[])],
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_holding_rate_rejected() {
        let costs = CostParameters {
            holding_rate: 0.0,
            ..CostParameters::default()
        };
        assert!(costs.validate().is_err());
    }

    #[test]
    fn test_service_level_out_of_range_rejected() {
        let config = SimulationConfig {
            service_level: 99.95,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(NetworkError::InvalidServiceLevel(_))
        ));
    }
}
