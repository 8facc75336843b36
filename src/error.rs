//! Error types for the planner.

use thiserror::Error;

/// Minimum number of coordinates (depot plus one stop) a solve accepts.
pub const MIN_COORDINATES: usize = 2;

/// Request-level failures, returned before any tour is built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlannerError {
    #[error("at least {MIN_COORDINATES} coordinates are required, got {count}")]
    InvalidInput { count: usize },
    #[error("coordinate {index} is not a finite latitude/longitude pair")]
    InvalidCoordinate { index: usize },
}

/// Why a QUBO bitstring does not describe a tour.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("bitstring has {actual} bits, expected {expected}")]
    WrongLength { expected: usize, actual: usize },
    #[error("position {position} holds no node")]
    EmptyPosition { position: usize },
    #[error("position {position} holds {count} nodes")]
    CrowdedPosition { position: usize, count: usize },
    #[error("node {node} occupies more than one position")]
    RepeatedNode { node: usize },
}
