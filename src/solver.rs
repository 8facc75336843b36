//! Route optimization entry point.
//!
//! Builds the identity baseline, runs the selected strategy, scores both
//! with the route evaluator and derives improvement metrics.

use std::time::Instant;

use chrono::{Local, NaiveTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::anneal::{AnnealingSchedule, qubo_simulated_annealing};
use crate::construct::nearest_neighbor_tour;
use crate::error::{MIN_COORDINATES, PlannerError};
use crate::evaluate::{Evaluation, TimeWindow, evaluate};
use crate::haversine::Point;
use crate::local_search::{DEFAULT_MAX_PASSES, two_opt_improve};
use crate::metrics::Improvement;
use crate::multistart::{DEFAULT_RESTARTS, quantum_inspired_tour};
use crate::polyline::Polyline;
use crate::scenario::Scenario;
use crate::tour::Tour;
use crate::traffic::TimeOfDayTable;
use crate::traits::TrafficPredictor;
use crate::travel::{TimeMatrix, TravelModel};

/// Reported on-time rate. Lateness is folded into total minutes rather
/// than tracked as a rate, so this is constant.
const ON_TIME_PERCENT: f64 = 100.0;

/// Tour-producing strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    #[default]
    NearestNeighbor,
    /// Nearest-neighbor seed refined by 2-opt.
    TwoOptRefined,
    QuboAnnealing,
    /// Multi-start 2-opt from random shuffles. Classical only.
    QuantumInspiredSearch,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::NearestNeighbor,
        Strategy::TwoOptRefined,
        Strategy::QuboAnnealing,
        Strategy::QuantumInspiredSearch,
    ];

    /// Resolves an untrusted tag. Unknown or empty tags become `NearestNeighbor`.
    pub fn from_tag(tag: &str) -> Self {
        let normalized = tag.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "nearest_neighbor" | "nn" | "greedy" => Strategy::NearestNeighbor,
            "two_opt_refined" | "two_opt" | "2opt" | "2_opt" => Strategy::TwoOptRefined,
            "qubo_annealing" | "qubo_sa" | "annealing" | "sa" => Strategy::QuboAnnealing,
            "quantum_inspired_search" | "quantum_inspired" | "qi" => Strategy::QuantumInspiredSearch,
            other => {
                debug!(tag = other, "unrecognized strategy, using nearest_neighbor");
                Strategy::NearestNeighbor
            }
        }
    }

    /// Canonical tag, accepted by [`Strategy::from_tag`].
    pub fn name(self) -> &'static str {
        match self {
            Strategy::NearestNeighbor => "nearest_neighbor",
            Strategy::TwoOptRefined => "two_opt_refined",
            Strategy::QuboAnnealing => "qubo_annealing",
            Strategy::QuantumInspiredSearch => "quantum_inspired_search",
        }
    }
}

/// Solver tuning. Every field has a default, so partial configs work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolveOptions {
    /// Flip attempts per annealing restart.
    pub annealing_sweeps: usize,
    pub annealing_restarts: usize,
    /// Random starts for the quantum-inspired strategy.
    pub multistart_restarts: usize,
    /// Cap on full 2-opt passes.
    pub two_opt_max_passes: usize,
    /// Fixed RNG seed; `None` seeds each call from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SolveOptions {
    fn default() -> Self {
        let schedule = AnnealingSchedule::default();
        Self {
            annealing_sweeps: schedule.sweeps,
            annealing_restarts: schedule.restarts,
            multistart_restarts: DEFAULT_RESTARTS,
            two_opt_max_passes: DEFAULT_MAX_PASSES,
            seed: None,
        }
    }
}

impl SolveOptions {
    fn annealing_schedule(&self) -> AnnealingSchedule {
        AnnealingSchedule {
            sweeps: self.annealing_sweeps,
            restarts: self.annealing_restarts,
        }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// One optimize call as received from a caller.
///
/// Scenario and strategy stay raw strings here; they are resolved, with
/// fallbacks, when the request is optimized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptimizeRequest {
    pub coordinates: Vec<Point>,
    #[serde(default)]
    pub scenario: Option<String>,
    #[serde(default)]
    pub time_windows: Option<Vec<Option<TimeWindow>>>,
    #[serde(default)]
    pub strategy: Option<String>,
    /// Wall-clock time used for the time-of-day factor; defaults to now.
    #[serde(default)]
    pub clock_time: Option<NaiveTime>,
}

impl OptimizeRequest {
    /// Request with defaults for everything but the coordinates.
    pub fn new(coordinates: Vec<Point>) -> Self {
        Self {
            coordinates,
            ..Self::default()
        }
    }

    /// Sets the scenario by its tag.
    pub fn scenario(mut self, scenario: Scenario) -> Self {
        self.scenario = Some(scenario.name().to_string());
        self
    }

    /// Sets the strategy by its tag.
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy.name().to_string());
        self
    }

    /// Sets per-node windows, aligned with the coordinates.
    pub fn time_windows(mut self, windows: Vec<Option<TimeWindow>>) -> Self {
        self.time_windows = Some(windows);
        self
    }

    /// Pins the departure clock instead of reading the wall clock.
    pub fn clock_time(mut self, clock: NaiveTime) -> Self {
        self.clock_time = Some(clock);
        self
    }
}

/// The identity-order route the optimizer is compared against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaselineRoute {
    pub tour: Tour,
    pub total_minutes: f64,
    pub total_km: f64,
    pub lateness_minutes: f64,
    pub on_time_percent: f64,
    pub geometry: Polyline,
}

/// The route produced by the selected strategy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizedRoute {
    pub tour: Tour,
    pub total_minutes: f64,
    pub total_km: f64,
    pub lateness_minutes: f64,
    pub on_time_percent: f64,
    pub strategy: Strategy,
    /// Wall-clock time spent inside the strategy, in seconds.
    pub solve_seconds: f64,
    /// QUBO energy when the annealer decoded a feasible tour.
    pub energy: Option<f64>,
    pub geometry: Polyline,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationResult {
    pub scenario: Scenario,
    pub clock_time: NaiveTime,
    pub baseline: BaselineRoute,
    pub optimized: OptimizedRoute,
    pub improvement: Improvement,
    pub time_matrix: TimeMatrix,
}

/// Tour from one strategy run.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyOutcome {
    pub tour: Tour,
    pub energy: Option<f64>,
}

/// Runs one strategy. Every strategy shares this contract.
pub fn solve_tour<R: Rng>(
    strategy: Strategy,
    points: &[Point],
    model: &TravelModel,
    windows: Option<&[Option<TimeWindow>]>,
    options: &SolveOptions,
    rng: &mut R,
) -> StrategyOutcome {
    match strategy {
        Strategy::NearestNeighbor => StrategyOutcome {
            tour: nearest_neighbor_tour(points),
            energy: None,
        },
        Strategy::TwoOptRefined => StrategyOutcome {
            tour: two_opt_improve(
                points,
                nearest_neighbor_tour(points),
                model.scenario(),
                options.two_opt_max_passes,
            ),
            energy: None,
        },
        Strategy::QuboAnnealing => {
            let outcome = qubo_simulated_annealing(points, model, options.annealing_schedule(), rng);
            StrategyOutcome {
                tour: outcome.tour,
                energy: outcome.energy,
            }
        }
        Strategy::QuantumInspiredSearch => StrategyOutcome {
            tour: quantum_inspired_tour(
                points,
                model,
                windows,
                options.multistart_restarts,
                options.two_opt_max_passes,
                rng,
            ),
            energy: None,
        },
    }
}

/// Optimizes a request with the built-in time-of-day table.
pub fn optimize(request: &OptimizeRequest, options: &SolveOptions) -> Result<OptimizationResult, PlannerError> {
    optimize_with(request, options, TimeOfDayTable, &mut options.rng())
}

/// Optimizes a request with a caller-supplied traffic predictor and RNG.
pub fn optimize_with<P, R>(
    request: &OptimizeRequest,
    options: &SolveOptions,
    predictor: P,
    rng: &mut R,
) -> Result<OptimizationResult, PlannerError>
where
    P: TrafficPredictor,
    R: Rng,
{
    let points = &request.coordinates;
    validate(points)?;

    let scenario = request
        .scenario
        .as_deref()
        .map(Scenario::from_tag)
        .unwrap_or_default();
    let strategy = request
        .strategy
        .as_deref()
        .map(Strategy::from_tag)
        .unwrap_or_default();
    let clock_time = request.clock_time.unwrap_or_else(|| Local::now().time());
    let windows = request.time_windows.as_deref();

    let model = TravelModel::new(scenario, predictor, clock_time);

    let baseline_tour = Tour::identity(points.len());
    let baseline_eval = evaluate(baseline_tour.nodes(), points, &model, windows);

    let started = Instant::now();
    let outcome = solve_tour(strategy, points, &model, windows, options, rng);
    let solve_seconds = started.elapsed().as_secs_f64();

    let optimized_eval = evaluate(outcome.tour.nodes(), points, &model, windows);
    let improvement = Improvement::between(&baseline_eval, &optimized_eval);

    info!(
        nodes = points.len(),
        scenario = scenario.name(),
        strategy = strategy.name(),
        baseline_minutes = baseline_eval.total_minutes,
        optimized_minutes = optimized_eval.total_minutes,
        solve_seconds,
        "route optimized"
    );

    Ok(OptimizationResult {
        scenario,
        clock_time,
        baseline: baseline_route(baseline_tour, &baseline_eval, points),
        optimized: optimized_route(outcome, &optimized_eval, strategy, solve_seconds, points),
        improvement,
        time_matrix: model.time_matrix(points),
    })
}

/// Optimizes independent requests on the rayon pool.
///
/// Each request is still solved on a single thread; results keep request
/// order.
pub fn optimize_batch(
    requests: &[OptimizeRequest],
    options: &SolveOptions,
) -> Vec<Result<OptimizationResult, PlannerError>> {
    requests
        .par_iter()
        .map(|request| optimize(request, options))
        .collect()
}

/// Optimizes the same request under every scenario, in `Scenario::ALL` order.
pub fn compare_scenarios(
    request: &OptimizeRequest,
    options: &SolveOptions,
) -> Vec<Result<OptimizationResult, PlannerError>> {
    // Pin the clock so all scenarios see the same time-of-day factor.
    let clock_time = request.clock_time.unwrap_or_else(|| Local::now().time());
    let requests: Vec<OptimizeRequest> = Scenario::ALL
        .iter()
        .map(|&scenario| request.clone().scenario(scenario).clock_time(clock_time))
        .collect();
    optimize_batch(&requests, options)
}

fn validate(points: &[Point]) -> Result<(), PlannerError> {
    if points.len() < MIN_COORDINATES {
        return Err(PlannerError::InvalidInput { count: points.len() });
    }
    if let Some(index) = points.iter().position(|point| !point.is_finite()) {
        return Err(PlannerError::InvalidCoordinate { index });
    }
    Ok(())
}

fn baseline_route(tour: Tour, evaluation: &Evaluation, points: &[Point]) -> BaselineRoute {
    BaselineRoute {
        geometry: Polyline::for_tour(tour.nodes(), points),
        tour,
        total_minutes: evaluation.total_minutes,
        total_km: evaluation.total_km,
        lateness_minutes: evaluation.lateness_minutes,
        on_time_percent: ON_TIME_PERCENT,
    }
}

fn optimized_route(
    outcome: StrategyOutcome,
    evaluation: &Evaluation,
    strategy: Strategy,
    solve_seconds: f64,
    points: &[Point],
) -> OptimizedRoute {
    OptimizedRoute {
        geometry: Polyline::for_tour(outcome.tour.nodes(), points),
        tour: outcome.tour,
        total_minutes: evaluation.total_minutes,
        total_km: evaluation.total_km,
        lateness_minutes: evaluation.lateness_minutes,
        on_time_percent: ON_TIME_PERCENT,
        strategy,
        solve_seconds,
        energy: outcome.energy,
    }
}
