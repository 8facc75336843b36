//! Baseline-versus-optimized improvement metrics.

use serde::Serialize;

use crate::evaluate::Evaluation;

/// CO2 emitted per kilometer driven.
pub const CO2_KG_PER_KM: f64 = 0.19;

/// Fuel burned per kilometer driven.
pub const FUEL_LITERS_PER_KM: f64 = 0.12;

/// Savings of an optimized route over its baseline, all clamped at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Improvement {
    pub time_saved_minutes: f64,
    pub improvement_percent: f64,
    pub distance_saved_km: f64,
    pub co2_saved_kg: f64,
    pub fuel_saved_liters: f64,
}

impl Improvement {
    /// A worse optimized route reports zero savings, never negative ones.
    /// A zero-minute baseline reports zero percent.
    pub fn between(baseline: &Evaluation, optimized: &Evaluation) -> Self {
        let time_saved_minutes = (baseline.total_minutes - optimized.total_minutes).max(0.0);
        let improvement_percent = if baseline.total_minutes > 0.0 {
            time_saved_minutes / baseline.total_minutes * 100.0
        } else {
            0.0
        };
        let distance_saved_km = (baseline.total_km - optimized.total_km).max(0.0);

        Self {
            time_saved_minutes,
            improvement_percent,
            distance_saved_km,
            co2_saved_kg: distance_saved_km * CO2_KG_PER_KM,
            fuel_saved_liters: distance_saved_km * FUEL_LITERS_PER_KM,
        }
    }
}
