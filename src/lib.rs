//! delivery-planner core engine
//!
//! Single-vehicle delivery routing over a handful of geographic stops:
//! scenario-adjusted travel times, tour construction and refinement, a
//! QUBO formulation with an annealing solver, and baseline comparison.

pub mod anneal;
pub mod construct;
pub mod error;
pub mod evaluate;
pub mod haversine;
pub mod local_search;
pub mod metrics;
pub mod multistart;
pub mod polyline;
pub mod qubo;
pub mod sample;
pub mod scenario;
pub mod solver;
pub mod tour;
pub mod traffic;
pub mod traits;
pub mod travel;
