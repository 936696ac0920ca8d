// src/simulation/engine.rs

use crate::cost::inventory::{z_score_for_service_level, CANONICAL_SERVICE_LEVELS};
use crate::demand::implementations::NormalDemand;
use crate::demand::traits::DemandModel;
use crate::error::{NetworkError, Result};
use crate::io::dataset::resolve_scenarios;
use crate::model::network::{City, Facility, Scenario};
use crate::simulation::config::{CostParameters, SimulationConfig};
use crate::simulation::evaluator::{assign, check_network, price_assignment, Assignment, CostBreakdown};
use crate::simulation::stats::CostSummary;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info, warn};

/// Cost distribution of one scenario at one service level.
#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub scenario: String,
    pub service_level: f64,
    pub z_score: f64,
    /// One total cost per trial, in trial order.
    pub samples: Vec<f64>,
    pub summary: CostSummary,
    /// Component-wise average over all trials.
    pub mean_breakdown: CostBreakdown,
}

/// Results for every scenario, in configured order, plus the recommendation.
#[derive(Debug, Clone)]
pub struct ScenarioComparison {
    results: Vec<SimulationResult>,
    /// Index into `results` of the lowest mean total cost.
    best: usize,
}

impl ScenarioComparison {
    /// Recommends the cheapest result on average. `None` if `results` is empty.
    pub fn new(results: Vec<SimulationResult>) -> Option<Self> {
        let best = recommend(&results)?;
        Some(Self { results, best })
    }

    pub fn results(&self) -> &[SimulationResult] {
        &self.results
    }

    /// Position of the recommended result, which is also its scenario's
    /// position in the compared list.
    pub fn best_index(&self) -> usize {
        self.best
    }

    pub fn best(&self) -> &SimulationResult {
        &self.results[self.best]
    }
}

/// Mean cost of a scenario at one service level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensitivityPoint {
    pub service_level: f64,
    pub z_score: f64,
    pub mean_cost: f64,
}

/// Index of the result with the lowest mean total cost.
///
/// Ties keep the first result seen. Returns `None` for an empty slice.
pub fn recommend(results: &[SimulationResult]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (idx, result) in results.iter().enumerate() {
        match best {
            Some(b) if result.summary.mean >= results[b].summary.mean => {}
            _ => best = Some(idx),
        }
    }
    best
}

/// One Monte Carlo trial: draw demand, assign, price with safety stock.
pub fn simulate_trial(
    cities: &[City],
    scenario: &Scenario,
    costs: &CostParameters,
    z_score: f64,
    lead_time: f64,
    demand: &mut dyn DemandModel,
) -> Result<(Assignment, CostBreakdown)> {
    let assignment = assign(cities, &scenario.facilities, demand, costs.transport_rate)?;
    let breakdown = price_assignment(&assignment, costs, Some(z_score), lead_time);
    Ok((assignment, breakdown))
}

/// Stochastic network cost evaluator.
///
/// Owns the served cities, the run configuration and the random source.
/// Every run consumes draws from the same source, so a seeded engine
/// reproduces the same sequence of results.
pub struct MonteCarloEngine<R: Rng> {
    config: SimulationConfig,
    cities: Vec<City>,
    rng: R,
}

impl MonteCarloEngine<ChaCha8Rng> {
    /// Engine driven by `ChaCha8Rng`, seeded from `config.seed` or, when
    /// absent, from a freshly drawn seed that is logged for replay.
    pub fn seeded(config: SimulationConfig, cities: Vec<City>) -> Result<Self> {
        let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
        info!(seed, "Seeding Monte Carlo engine");
        Self::new(config, cities, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng + Debug> MonteCarloEngine<R> {
    pub fn new(config: SimulationConfig, cities: Vec<City>, rng: R) -> Result<Self> {
        config.validate()?;
        if cities.is_empty() {
            return Err(NetworkError::InvalidConfiguration(
                "no served city selected".to_string(),
            ));
        }
        cities.iter().try_for_each(City::check_demand)?;
        Ok(Self { config, cities, rng })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Runs `trials` draws for `scenario` at the configured service level.
    pub fn run_scenario(&mut self, scenario: &Scenario) -> Result<SimulationResult> {
        self.run_scenario_at(scenario, self.config.service_level)
    }

    /// Runs `trials` draws for `scenario` at `service_level` percent.
    pub fn run_scenario_at(&mut self, scenario: &Scenario, service_level: f64) -> Result<SimulationResult> {
        check_network(&self.cities, &scenario.facilities)?;
        let z_score = z_score_for_service_level(service_level)?;
        let trials = self.config.trials;

        debug!(
            scenario = %scenario.name,
            facilities = scenario.facility_count(),
            service_level,
            z_score,
            trials,
            "Running scenario"
        );

        let mut samples = Vec::with_capacity(trials);
        let mut sum = CostBreakdown { transport: 0.0, inventory: 0.0, fixed: 0.0 };
        let mut served_any = vec![false; scenario.facility_count()];

        let mut demand = NormalDemand::new(&mut self.rng);
        for _ in 0..trials {
            let (assignment, breakdown) = simulate_trial(
                &self.cities,
                scenario,
                &self.config.costs,
                z_score,
                self.config.lead_time,
                &mut demand,
            )?;
            for &idx in &assignment.facility_of_city {
                served_any[idx] = true;
            }
            sum.transport += breakdown.transport;
            sum.inventory += breakdown.inventory;
            sum.fixed += breakdown.fixed;
            samples.push(breakdown.total());
        }

        for (facility, served) in scenario.facilities.iter().zip(&served_any) {
            if !served {
                warn!(
                    scenario = %scenario.name,
                    facility = %facility.name,
                    "Facility is nearest to no served city; it only adds fixed cost"
                );
            }
        }

        let n = trials as f64;
        let summary = CostSummary::from_samples(&samples);
        debug!(scenario = %scenario.name, mean = summary.mean, std_dev = summary.std_dev, "Scenario done");

        Ok(SimulationResult {
            scenario: scenario.name.clone(),
            service_level,
            z_score,
            samples,
            summary,
            mean_breakdown: CostBreakdown {
                transport: sum.transport / n,
                inventory: sum.inventory / n,
                fixed: sum.fixed / n,
            },
        })
    }

    /// Runs every scenario in order and recommends the cheapest on average.
    pub fn compare_scenarios(&mut self, scenarios: &[Scenario]) -> Result<ScenarioComparison> {
        if scenarios.is_empty() {
            return Err(NetworkError::InvalidConfiguration(
                "at least one scenario is required".to_string(),
            ));
        }
        info!(
            scenarios = scenarios.len(),
            cities = self.cities.len(),
            trials = self.config.trials,
            "Comparing network scenarios"
        );

        let results = scenarios
            .iter()
            .map(|s| self.run_scenario(s))
            .collect::<Result<Vec<_>>>()?;
        let comparison = ScenarioComparison::new(results).ok_or_else(|| {
            NetworkError::InvalidConfiguration("at least one scenario is required".to_string())
        })?;

        info!(
            scenario = %comparison.best().scenario,
            mean_cost = comparison.best().summary.mean,
            "Recommended scenario"
        );
        Ok(comparison)
    }

    /// The configured scenarios, resolved against the candidate facilities.
    pub fn configured_scenarios(&self, candidates: &[Facility]) -> Result<Vec<Scenario>> {
        resolve_scenarios(candidates, &self.config.scenarios)
    }

    /// Runs the configured scenarios, in configured order.
    pub fn compare_configured(&mut self, candidates: &[Facility]) -> Result<ScenarioComparison> {
        let scenarios = self.configured_scenarios(candidates)?;
        self.compare_scenarios(&scenarios)
    }

    /// Mean cost of `scenario` at the 90%, 95% and 99% service levels.
    pub fn sensitivity_sweep(&mut self, scenario: &Scenario) -> Result<Vec<SensitivityPoint>> {
        CANONICAL_SERVICE_LEVELS
            .iter()
            .map(|&level| {
                let result = self.run_scenario_at(scenario, level)?;
                Ok(SensitivityPoint {
                    service_level: level,
                    z_score: result.z_score,
                    mean_cost: result.summary.mean,
                })
            })
            .collect()
    }
}
