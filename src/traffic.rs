//! Static time-of-day congestion table.
//!
//! Stands in for a traffic predictor: a fixed lookup on the hour.

use chrono::{NaiveTime, Timelike};

use crate::traits::TrafficPredictor;

/// Multiplier during the morning and evening rush.
const RUSH_FACTOR: f64 = 1.25;

/// Multiplier around midday.
const MIDDAY_FACTOR: f64 = 1.10;

/// Hour-of-day lookup: 08-11 and 17-21 are rush, 12-14 is midday.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeOfDayTable;

impl TrafficPredictor for TimeOfDayTable {
    fn factor_at(&self, clock: NaiveTime) -> f64 {
        match clock.hour() {
            8..=11 | 17..=21 => RUSH_FACTOR,
            12..=14 => MIDDAY_FACTOR,
            _ => 1.0,
        }
    }
}

/// Time-of-day factor from the built-in table.
pub fn time_of_day_factor(clock: NaiveTime) -> f64 {
    TimeOfDayTable.factor_at(clock)
}
