//! Core seams of the planner.
//!
//! Kept minimal so a real traffic model can replace the built-in table
//! without touching the evaluator or the solvers.

use chrono::NaiveTime;

/// Predicts a congestion multiplier for a wall-clock time.
///
/// The returned factor scales every travel time in a solve; 1.0 means
/// free-flowing traffic.
pub trait TrafficPredictor {
    fn factor_at(&self, clock: NaiveTime) -> f64;
}

impl<T> TrafficPredictor for &T
where
    T: TrafficPredictor + ?Sized,
{
    fn factor_at(&self, clock: NaiveTime) -> f64 {
        (**self).factor_at(clock)
    }
}
