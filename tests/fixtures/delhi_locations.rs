//! Named Delhi locations for realistic test fixtures.
//!
//! Approximate coordinates around Connaught Place; close enough together
//! that every leg is a short urban hop.

use delivery_planner::haversine::Point;

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn point(&self) -> Point {
        Point::new(self.lat, self.lng)
    }
}

// ============================================================================
// Depot
// ============================================================================

pub const DISTRICT_HOSPITAL: Location = Location::new("District Hospital", 28.6139, 77.2090);

// ============================================================================
// Clinics
// ============================================================================

pub const CLINICS: &[Location] = &[
    Location::new("Clinic 1", 28.6239, 77.2190),
    Location::new("Clinic 2", 28.6089, 77.2240),
    Location::new("Clinic 3", 28.6219, 77.2010),
    Location::new("Clinic 4", 28.6019, 77.2040),
    Location::new("Clinic 5", 28.6289, 77.2140),
    Location::new("Clinic 6", 28.6059, 77.2210),
    Location::new("Clinic 7", 28.6189, 77.1970),
    Location::new("Clinic 8", 28.5989, 77.2010),
];

// ============================================================================
// Helpers
// ============================================================================

/// Depot followed by the first `stops` clinics.
pub fn depot_and_clinics(stops: usize) -> Vec<Point> {
    std::iter::once(DISTRICT_HOSPITAL.point())
        .chain(CLINICS.iter().take(stops).map(Location::point))
        .collect()
}

/// Clinics listed so the identity order zig-zags across the depot.
pub fn zig_zag_route() -> Vec<Point> {
    [0, 4, 1, 3, 2, 7, 5]
        .iter()
        .map(|&i| CLINICS[i].point())
        .fold(vec![DISTRICT_HOSPITAL.point()], |mut points, point| {
            points.push(point);
            points
        })
}
