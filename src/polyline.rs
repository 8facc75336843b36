//! Route geometry handed to the map renderer.
//!
//! Coordinates stay decoded; any compact encoding happens at the API
//! boundary, outside the planner core.

use serde::{Deserialize, Serialize};

use crate::haversine::Point;
use crate::tour::DEPOT;

/// Ordered (latitude, longitude) points along a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    /// Creates a polyline from decoded (lat, lng) points.
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Closed path for a tour: its stops in order, then back to the depot.
    ///
    /// Indices outside `stops` are skipped.
    pub fn for_tour(tour: &[usize], stops: &[Point]) -> Self {
        let mut points: Vec<(f64, f64)> = tour
            .iter()
            .filter_map(|&node| stops.get(node))
            .map(|&point| point.into())
            .collect();
        if tour.len() > 1 && tour.last() != Some(&DEPOT) {
            if let Some(&depot) = stops.get(DEPOT) {
                points.push(depot.into());
            }
        }
        Self { points }
    }

    /// Returns the points as a slice.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Consumes the polyline and returns its points.
    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }
}
