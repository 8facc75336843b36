//! Scenario-adjusted travel time model.
//!
//! Estimates minutes from great-circle distance at a fixed average speed,
//! scaled by the scenario's travel factor and a time-of-day factor that is
//! sampled once per solve.

use chrono::NaiveTime;
use serde::Serialize;

use crate::haversine::{Point, distance_km};
use crate::scenario::Scenario;
use crate::traffic::TimeOfDayTable;
use crate::traits::TrafficPredictor;

/// Average driving speed assumption for time estimation.
pub const AVERAGE_SPEED_KMH: f64 = 35.0;

/// Unscaled dwell time at each non-depot stop, in minutes.
pub const SERVICE_MINUTES: f64 = 2.0;

/// Travel time model for one solve.
///
/// The time-of-day factor is captured at construction so every leg of the
/// call sees the same congestion level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelModel {
    scenario: Scenario,
    time_factor: f64,
}

impl TravelModel {
    /// Samples `predictor` once at `clock`.
    pub fn new<P: TrafficPredictor>(scenario: Scenario, predictor: P, clock: NaiveTime) -> Self {
        Self {
            scenario,
            time_factor: predictor.factor_at(clock),
        }
    }

    /// Model using the built-in time-of-day table.
    pub fn at_clock(scenario: Scenario, clock: NaiveTime) -> Self {
        Self::new(scenario, TimeOfDayTable, clock)
    }

    /// Scenario-only model with the time-of-day factor fixed at 1.0.
    ///
    /// 2-opt compares edge deltas with this model. Because the factor is a
    /// single scalar per call, an improving move here is also improving
    /// under the full model.
    pub fn scenario_only(scenario: Scenario) -> Self {
        Self {
            scenario,
            time_factor: 1.0,
        }
    }

    /// Scenario this model was built for.
    pub fn scenario(&self) -> Scenario {
        self.scenario
    }

    /// Time-of-day multiplier captured at construction.
    pub fn time_factor(&self) -> f64 {
        self.time_factor
    }

    /// Directed travel time in minutes.
    pub fn travel_minutes(&self, from: Point, to: Point) -> f64 {
        distance_km(from, to) / AVERAGE_SPEED_KMH
            * 60.0
            * self.scenario.factors().travel
            * self.time_factor
    }

    /// Service time charged at each visited non-depot stop.
    pub fn service_minutes(&self) -> f64 {
        SERVICE_MINUTES * self.scenario.factors().service
    }

    /// Travel minutes between every ordered pair of `points`.
    pub fn time_matrix(&self, points: &[Point]) -> TimeMatrix {
        let size = points.len();
        let mut minutes = Vec::with_capacity(size * size);
        for from in points {
            for to in points {
                minutes.push(self.travel_minutes(*from, *to));
            }
        }
        TimeMatrix { size, minutes }
    }
}

/// Travel time between two points using the built-in time-of-day table.
pub fn travel_time(from: Point, to: Point, scenario: Scenario, clock: NaiveTime) -> f64 {
    TravelModel::at_clock(scenario, clock).travel_minutes(from, to)
}

/// Builds the per-call time matrix with the built-in time-of-day table.
pub fn build_time_matrix(points: &[Point], scenario: Scenario, clock: NaiveTime) -> TimeMatrix {
    TravelModel::at_clock(scenario, clock).time_matrix(points)
}

/// Dense n x n table of directed travel minutes, row-major.
///
/// Serializes as nested rows, `[[0.0, 3.2], [3.2, 0.0]]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "Vec<Vec<f64>>")]
pub struct TimeMatrix {
    size: usize,
    minutes: Vec<f64>,
}

impl TimeMatrix {
    /// Builds a matrix from explicit rows. Returns `None` if not square.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return None;
        }
        Some(Self {
            size,
            minutes: rows.into_iter().flatten().collect(),
        })
    }

    /// Number of nodes on each side.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Minutes from `from` to `to`. Panics on an out-of-range index.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.minutes[from * self.size + to]
    }

    /// Copies the table out as one `Vec` per origin node.
    pub fn rows(&self) -> Vec<Vec<f64>> {
        if self.size == 0 {
            return Vec::new();
        }
        self.minutes.chunks(self.size).map(<[f64]>::to_vec).collect()
    }

    /// Edge sum of a closed tour, including the return to the first node.
    pub fn tour_minutes(&self, tour: &[usize]) -> f64 {
        let (Some(&first), Some(&last)) = (tour.first(), tour.last()) else {
            return 0.0;
        };
        let legs: f64 = tour.windows(2).map(|leg| self.get(leg[0], leg[1])).sum();
        legs + self.get(last, first)
    }

    /// Sum of the two largest entries.
    pub fn largest_pair_sum(&self) -> f64 {
        let mut top = [0.0_f64; 2];
        for &value in &self.minutes {
            if value > top[0] {
                top[1] = top[0];
                top[0] = value;
            } else if value > top[1] {
                top[1] = value;
            }
        }
        top[0] + top[1]
    }
}

impl From<TimeMatrix> for Vec<Vec<f64>> {
    fn from(matrix: TimeMatrix) -> Self {
        matrix.rows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 0, 0).unwrap()
    }

    fn night() -> NaiveTime {
        NaiveTime::from_hms_opt(3, 0, 0).unwrap()
    }

    #[test]
    fn test_travel_time_formula() {
        let a = Point::new(28.6139, 77.2090);
        let b = Point::new(28.6239, 77.2190);
        let expected = distance_km(a, b) / 35.0 * 60.0 * 1.33 * 1.10;
        let actual = travel_time(a, b, Scenario::Peak, noon());
        assert!((actual - expected).abs() < 1e-12);
    }

    #[test]
    fn test_reasonable_travel_time() {
        // 35 km at 35 km/h is an hour; pick points ~35 km apart on a meridian
        let a = Point::new(0.0, 0.0);
        let b = Point::new(35.0 / 111.195, 0.0);
        let minutes = travel_time(a, b, Scenario::Normal, night());
        assert!((minutes - 60.0).abs() < 0.1, "got {}", minutes);
    }

    #[test]
    fn test_service_minutes_scale_with_scenario() {
        assert_eq!(TravelModel::scenario_only(Scenario::Normal).service_minutes(), 2.0);
        let storm = TravelModel::scenario_only(Scenario::Storm).service_minutes();
        assert!((storm - 2.4).abs() < 1e-12);
    }

    #[test]
    fn test_matrix_diagonal_is_zero() {
        let points = vec![
            Point::new(36.1, -115.1),
            Point::new(36.2, -115.2),
            Point::new(36.3, -115.3),
        ];
        let matrix = build_time_matrix(&points, Scenario::Storm, noon());
        assert_eq!(matrix.size(), 3);
        for i in 0..points.len() {
            assert_eq!(matrix.get(i, i), 0.0, "Diagonal should be zero");
        }
        assert_eq!(matrix.get(0, 1), matrix.get(1, 0));
    }

    #[test]
    fn test_tour_minutes_closes_loop() {
        let matrix =
            TimeMatrix::from_rows(vec![vec![0.0, 1.0, 4.0], vec![1.0, 0.0, 2.0], vec![4.0, 2.0, 0.0]])
                .unwrap();
        assert_eq!(matrix.tour_minutes(&[0, 1, 2]), 7.0);
        assert_eq!(matrix.tour_minutes(&[]), 0.0);
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        assert!(TimeMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0]]).is_none());
    }

    #[test]
    fn test_matrix_serializes_as_rows() {
        let rows = vec![vec![0.0, 1.5, 4.0], vec![1.5, 0.0, 2.0], vec![4.0, 2.0, 0.0]];
        let matrix = TimeMatrix::from_rows(rows.clone()).unwrap();
        assert_eq!(matrix.rows(), rows);
        assert_eq!(
            serde_json::to_value(&matrix).unwrap(),
            serde_json::json!([[0.0, 1.5, 4.0], [1.5, 0.0, 2.0], [4.0, 2.0, 0.0]])
        );
    }

    #[test]
    fn test_empty_matrix_has_no_rows() {
        let matrix = TimeMatrix::from_rows(Vec::new()).unwrap();
        assert_eq!(matrix.size(), 0);
        assert!(matrix.rows().is_empty());
    }

    #[test]
    fn test_largest_pair_sum() {
        let matrix =
            TimeMatrix::from_rows(vec![vec![0.0, 5.0, 4.0], vec![9.0, 0.0, 2.0], vec![4.0, 7.0, 0.0]])
                .unwrap();
        assert_eq!(matrix.largest_pair_sum(), 16.0);
    }
}
