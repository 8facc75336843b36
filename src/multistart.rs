//! Quantum-inspired strategy: classical multi-start 2-opt.
//!
//! Despite the name this runs entirely on the CPU with ordinary random
//! numbers. Each restart shuffles the stops, pins the depot first, runs
//! 2-opt to convergence and scores the result with the full route
//! evaluator, time windows included.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::evaluate::{TimeWindow, evaluate};
use crate::haversine::Point;
use crate::local_search::two_opt_with_matrix;
use crate::tour::{DEPOT, Tour};
use crate::travel::TravelModel;

/// Default number of random starts.
pub const DEFAULT_RESTARTS: usize = 8;

/// Best of `restarts` shuffled-and-refined tours.
///
/// With zero restarts the identity order is returned.
pub fn quantum_inspired_tour<R: Rng>(
    points: &[Point],
    model: &TravelModel,
    windows: Option<&[Option<TimeWindow>]>,
    restarts: usize,
    max_passes: usize,
    rng: &mut R,
) -> Tour {
    let n = points.len();
    let matrix = TravelModel::scenario_only(model.scenario()).time_matrix(points);
    let mut best: Option<(Tour, f64)> = None;

    for _ in 0..restarts {
        let mut stops: Vec<usize> = (0..n).filter(|&node| node != DEPOT).collect();
        stops.shuffle(rng);

        let mut nodes = Vec::with_capacity(n);
        if n > 0 {
            nodes.push(DEPOT);
        }
        nodes.extend(stops);

        let tour = two_opt_with_matrix(&matrix, Tour::new(nodes), max_passes);
        let minutes = evaluate(tour.nodes(), points, model, windows).total_minutes;
        if best.as_ref().is_none_or(|(_, best_minutes)| minutes < *best_minutes) {
            best = Some((tour, minutes));
        }
    }

    best.map_or_else(|| Tour::identity(n), |(tour, _)| tour)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::local_search::DEFAULT_MAX_PASSES;
    use crate::scenario::Scenario;

    fn ring() -> Vec<Point> {
        (0..8_i32)
            .map(|i| {
                let angle = f64::from(i) * std::f64::consts::TAU / 8.0;
                Point::new(0.05 * angle.sin(), 0.05 * angle.cos())
            })
            .collect()
    }

    #[test]
    fn test_returns_valid_tour() {
        let points = ring();
        let model = TravelModel::scenario_only(Scenario::Peak);
        let mut rng = StdRng::seed_from_u64(3);
        let tour = quantum_inspired_tour(&points, &model, None, DEFAULT_RESTARTS, DEFAULT_MAX_PASSES, &mut rng);
        assert!(tour.is_valid_for(points.len()));
    }

    #[test]
    fn test_no_worse_than_any_single_restart() {
        let points = ring();
        let model = TravelModel::scenario_only(Scenario::Normal);
        let many = quantum_inspired_tour(&points, &model, None, 8, DEFAULT_MAX_PASSES, &mut StdRng::seed_from_u64(11));
        let one = quantum_inspired_tour(&points, &model, None, 1, DEFAULT_MAX_PASSES, &mut StdRng::seed_from_u64(11));
        let score = |tour: &Tour| evaluate(tour.nodes(), &points, &model, None).total_minutes;
        // The first restart of both runs draws the same shuffle.
        assert!(score(&many) <= score(&one) + 1e-9);
    }

    #[test]
    fn test_zero_restarts_is_identity() {
        let points = ring();
        let model = TravelModel::scenario_only(Scenario::Normal);
        let tour = quantum_inspired_tour(&points, &model, None, 0, 10, &mut StdRng::seed_from_u64(0));
        assert_eq!(tour, Tour::identity(points.len()));
    }

    #[test]
    fn test_two_points() {
        let points = vec![Point::new(0.0, 0.0), Point::new(0.0, 0.1)];
        let model = TravelModel::scenario_only(Scenario::Normal);
        let tour = quantum_inspired_tour(&points, &model, None, 4, 10, &mut StdRng::seed_from_u64(0));
        assert_eq!(tour.nodes(), &[0, 1]);
    }
}
