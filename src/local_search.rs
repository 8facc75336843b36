//! Intra-tour 2-opt improvement.
//!
//! # Algorithm
//!
//! For positions `1 <= i < k <= n-2` (the depot at position 0 stays put),
//! with `a = tour[i-1]`, `b = tour[i]`, `c = tour[k]`, `d = tour[k+1]`:
//!
//! ```text
//! delta = t(a, c) + t(b, d) - t(a, b) - t(c, d)
//! ```
//!
//! If `delta < -1e-9` the segment `[i..=k]` is reversed immediately
//! (first improvement) and the scan continues. Passes repeat until one
//! makes no move or the pass cap is reached.
//!
//! Times come from the scenario-only model: the time-of-day factor is left
//! out of the delta check. The factor is one scalar per solve, so this
//! never changes which moves improve; it only keeps the loop cheap.
//!
//! Because `k <= n-2`, the last stop of the tour is never part of a
//! reversal and the implicit return edge never changes.

use tracing::debug;

use crate::haversine::Point;
use crate::scenario::Scenario;
use crate::tour::Tour;
use crate::travel::{TimeMatrix, TravelModel};

/// Pass cap used when the caller does not configure one.
pub const DEFAULT_MAX_PASSES: usize = 1000;

/// Smallest delta treated as an improvement.
const IMPROVEMENT_EPSILON: f64 = 1e-9;

/// Refines a tour with 2-opt until a local optimum or `max_passes`.
///
/// Hitting the cap is treated as convergence: the best tour so far is
/// returned.
pub fn two_opt_improve(points: &[Point], tour: Tour, scenario: Scenario, max_passes: usize) -> Tour {
    let matrix = TravelModel::scenario_only(scenario).time_matrix(points);
    two_opt_with_matrix(&matrix, tour, max_passes)
}

/// 2-opt against a precomputed matrix.
pub fn two_opt_with_matrix(matrix: &TimeMatrix, tour: Tour, max_passes: usize) -> Tour {
    let mut nodes = tour.into_nodes();
    let n = nodes.len();
    if n < 4 {
        return Tour::new(nodes);
    }

    for pass in 0..max_passes {
        let mut improved = false;

        for i in 1..n - 2 {
            for k in i + 1..n - 1 {
                let (a, b) = (nodes[i - 1], nodes[i]);
                let (c, d) = (nodes[k], nodes[k + 1]);
                let delta = matrix.get(a, c) + matrix.get(b, d) - matrix.get(a, b) - matrix.get(c, d);
                if delta < -IMPROVEMENT_EPSILON {
                    nodes[i..=k].reverse();
                    improved = true;
                }
            }
        }

        if !improved {
            return Tour::new(nodes);
        }
        if pass + 1 == max_passes {
            debug!(max_passes, "2-opt pass cap reached before local optimum");
        }
    }

    Tour::new(nodes)
}
