//! Test fixtures for delivery-planner.
//!
//! Provides realistic test data:
//! - Named Delhi locations around a district hospital depot
//! - Helpers that turn them into request coordinates

#![allow(dead_code)]

pub mod delhi_locations;

pub use delhi_locations::*;
