//! Route evaluation: total minutes, kilometers and lateness for a tour.

use serde::{Deserialize, Serialize};

use crate::haversine::{Point, distance_km};
use crate::tour::DEPOT;
use crate::travel::TravelModel;

/// Minutes of penalty per minute of late arrival.
const LATENESS_WEIGHT: f64 = 1.0;

/// Delivery window in minutes from the start of the route.
///
/// Serialized as `[earliest, latest]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct TimeWindow {
    pub earliest: f64,
    pub latest: f64,
}

impl TimeWindow {
    /// Window in minutes from route start.
    pub const fn new(earliest: f64, latest: f64) -> Self {
        Self { earliest, latest }
    }

    /// Minutes past `latest`, or zero. Early arrival waits for free.
    pub fn lateness(&self, arrival: f64) -> f64 {
        (arrival - self.latest).max(0.0)
    }
}

impl From<(f64, f64)> for TimeWindow {
    fn from((earliest, latest): (f64, f64)) -> Self {
        Self::new(earliest, latest)
    }
}

impl From<TimeWindow> for (f64, f64) {
    fn from(window: TimeWindow) -> Self {
        (window.earliest, window.latest)
    }
}

/// Score of a tour.
///
/// `total_minutes` includes travel, service and lateness penalty;
/// `total_km` is driving distance only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Evaluation {
    pub total_minutes: f64,
    pub total_km: f64,
    /// Portion of `total_minutes` that is lateness penalty.
    pub lateness_minutes: f64,
}

/// Scores a tour under the given travel model.
///
/// Windows are aligned by node index; missing or `None` entries are
/// unconstrained and the depot is never checked. Tours shorter than two
/// nodes score zero.
///
/// # Panics
///
/// Panics if the tour references an index outside `points`.
pub fn evaluate(
    tour: &[usize],
    points: &[Point],
    model: &TravelModel,
    windows: Option<&[Option<TimeWindow>]>,
) -> Evaluation {
    let Some(&last) = tour.last() else {
        return Evaluation::default();
    };
    if tour.len() < 2 {
        return Evaluation::default();
    }

    let service = model.service_minutes();
    let mut evaluation = Evaluation::default();
    let mut clock = 0.0;

    for leg in tour.windows(2) {
        let (from, to) = (points[leg[0]], points[leg[1]]);
        let travel = model.travel_minutes(from, to);
        evaluation.total_minutes += travel;
        evaluation.total_km += distance_km(from, to);
        clock += travel;

        if leg[1] == DEPOT {
            continue;
        }
        if let Some(window) = window_for(windows, leg[1]) {
            let late = window.lateness(clock) * LATENESS_WEIGHT;
            evaluation.total_minutes += late;
            evaluation.lateness_minutes += late;
        }
        evaluation.total_minutes += service;
        clock += service;
    }

    if last != DEPOT {
        let (from, to) = (points[last], points[DEPOT]);
        evaluation.total_minutes += model.travel_minutes(from, to);
        evaluation.total_km += distance_km(from, to);
    }

    evaluation
}

fn window_for(windows: Option<&[Option<TimeWindow>]>, node: usize) -> Option<TimeWindow> {
    windows.and_then(|windows| windows.get(node).copied().flatten())
}
