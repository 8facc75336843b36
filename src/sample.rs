//! Demonstration fixture: a district hospital depot and five clinics.

use serde::Serialize;

use crate::evaluate::TimeWindow;
use crate::haversine::Point;
use crate::scenario::Scenario;

const BASE_LAT: f64 = 28.6139;
const BASE_LNG: f64 = 77.2090;

/// Static sample problem for demos and smoke tests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleData {
    pub coordinates: Vec<Point>,
    pub time_windows: Vec<Option<TimeWindow>>,
    pub scenarios: Vec<&'static str>,
}

/// The six sample points, depot first.
pub fn sample_coordinates() -> Vec<Point> {
    [
        (0.0, 0.0),
        (0.01, 0.01),
        (-0.005, 0.015),
        (0.008, -0.008),
        (-0.012, -0.005),
        (0.015, 0.005),
    ]
    .into_iter()
    .map(|(dlat, dlng)| Point::new(BASE_LAT + dlat, BASE_LNG + dlng))
    .collect()
}

/// Windows aligned with [`sample_coordinates`], staggered two-hour slots.
pub fn sample_time_windows() -> Vec<Option<TimeWindow>> {
    [
        (0.0, 480.0),
        (60.0, 180.0),
        (120.0, 240.0),
        (180.0, 300.0),
        (240.0, 360.0),
        (300.0, 420.0),
    ]
    .into_iter()
    .map(|window| Some(TimeWindow::from(window)))
    .collect()
}

/// Coordinates, windows and scenario tags bundled together.
pub fn sample_data() -> SampleData {
    SampleData {
        coordinates: sample_coordinates(),
        time_windows: sample_time_windows(),
        scenarios: Scenario::ALL.iter().map(|scenario| scenario.name()).collect(),
    }
}
