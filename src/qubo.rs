//! QUBO formulation of the fixed-depot TSP.
//!
//! Variable `x[i][k]` is 1 iff node `i` sits at tour position `k`; it maps
//! to index `i * n + k`. Coefficients live in a map keyed by the ordered
//! pair `(low, high)`, so iteration is always in ascending key order and
//! repeated contributions to the same pair are summed.
//!
//! The objective charges `T[i][j]` for `x[i][k] * x[j][k+1 mod n]`. Each
//! position (row) and each node (column) group gets `-P` on every
//! diagonal and `+P` for every ordered pair of its members, the diagonal
//! included.

use std::collections::BTreeMap;

use tracing::warn;

use crate::error::DecodeError;
use crate::tour::Tour;
use crate::travel::TimeMatrix;

/// One-hot penalty weight.
///
/// Must exceed the two largest time-matrix entries combined, otherwise
/// infeasible assignments can undercut feasible ones.
pub const PENALTY_WEIGHT: f64 = 500.0;

/// Sparse symmetric quadratic binary model.
#[derive(Debug, Clone, PartialEq)]
pub struct QuboModel {
    size: usize,
    coefficients: BTreeMap<(usize, usize), f64>,
}

impl QuboModel {
    fn new(size: usize) -> Self {
        Self {
            size,
            coefficients: BTreeMap::new(),
        }
    }

    /// Number of nodes (and positions) encoded.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Length of a bit assignment, `size * size`.
    pub fn num_variables(&self) -> usize {
        self.size * self.size
    }

    /// Index of `x[node][position]`.
    pub fn variable(&self, node: usize, position: usize) -> usize {
        node * self.size + position
    }

    /// Accumulated weight of an unordered pair, zero if absent.
    pub fn coefficient(&self, a: usize, b: usize) -> f64 {
        self.coefficients.get(&pair_key(a, b)).copied().unwrap_or(0.0)
    }

    /// Non-zero terms in ascending `(low, high)` order.
    pub fn terms(&self) -> impl Iterator<Item = ((usize, usize), f64)> + '_ {
        self.coefficients.iter().map(|(&key, &weight)| (key, weight))
    }

    /// Number of stored coefficients, diagonal included.
    pub fn num_terms(&self) -> usize {
        self.coefficients.len()
    }

    fn add(&mut self, a: usize, b: usize, weight: f64) {
        *self.coefficients.entry(pair_key(a, b)).or_insert(0.0) += weight;
    }

    /// Sum of every term whose endpoint bits are both set.
    ///
    /// # Panics
    ///
    /// Panics if `bits` is shorter than `num_variables()`.
    pub fn energy(&self, bits: &[bool]) -> f64 {
        self.terms()
            .filter(|&((a, b), _)| bits[a] && bits[b])
            .map(|(_, weight)| weight)
            .sum()
    }

    /// Per-variable view for incremental energy updates.
    pub fn adjacency(&self) -> Adjacency {
        let variables = self.num_variables();
        let mut diagonal = vec![0.0; variables];
        let mut neighbors = vec![Vec::new(); variables];
        for ((a, b), weight) in self.terms() {
            if a == b {
                diagonal[a] += weight;
            } else {
                neighbors[a].push((b, weight));
                neighbors[b].push((a, weight));
            }
        }
        Adjacency { diagonal, neighbors }
    }
}

/// Flat adjacency list derived from a [`QuboModel`].
///
/// Neighbor lists are filled in the model's key order, so sums over them
/// are reproducible.
#[derive(Debug, Clone)]
pub struct Adjacency {
    diagonal: Vec<f64>,
    neighbors: Vec<Vec<(usize, f64)>>,
}

impl Adjacency {
    /// Energy change from flipping `variable` in `bits`.
    pub fn flip_delta(&self, bits: &[bool], variable: usize) -> f64 {
        let coupling: f64 = self.neighbors[variable]
            .iter()
            .filter(|&&(other, _)| bits[other])
            .map(|&(_, weight)| weight)
            .sum();
        let contribution = self.diagonal[variable] + coupling;
        if bits[variable] { -contribution } else { contribution }
    }
}

fn pair_key(a: usize, b: usize) -> (usize, usize) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Encodes the fixed-depot TSP over `matrix` as a QUBO.
pub fn build_qubo(matrix: &TimeMatrix) -> QuboModel {
    let n = matrix.size();
    let mut model = QuboModel::new(n);

    let dominance = matrix.largest_pair_sum();
    if dominance >= PENALTY_WEIGHT {
        warn!(
            penalty = PENALTY_WEIGHT,
            largest_pair_sum = dominance,
            "QUBO penalty does not dominate travel times; infeasible states may win"
        );
    }

    for position in 0..n {
        let next = (position + 1) % n;
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let (from, to) = (model.variable(i, position), model.variable(j, next));
                model.add(from, to, matrix.get(i, j));
            }
        }
    }

    // Each position holds one node.
    for position in 0..n {
        add_group_penalty(&mut model, (0..n).map(|node| node * n + position).collect());
    }

    // Each node takes one position.
    for node in 0..n {
        add_group_penalty(&mut model, (0..n).map(|position| node * n + position).collect());
    }

    model
}

fn add_group_penalty(model: &mut QuboModel, group: Vec<usize>) {
    for &a in &group {
        model.add(a, a, -PENALTY_WEIGHT);
    }
    for &a in &group {
        for &b in &group {
            model.add(a, b, PENALTY_WEIGHT);
        }
    }
}

/// One-hot encoding of a tour over `n` nodes.
pub fn encode_tour(tour: &Tour, n: usize) -> Vec<bool> {
    let mut bits = vec![false; n * n];
    for (position, &node) in tour.nodes().iter().enumerate() {
        if node < n && position < n {
            bits[node * n + position] = true;
        }
    }
    bits
}

/// Reads the tour out of a bitstring.
///
/// Every position must hold exactly one node and no node may repeat;
/// anything else is infeasible and no partial tour is returned.
pub fn decode_tour(bits: &[bool], n: usize) -> Result<Tour, DecodeError> {
    if bits.len() != n * n {
        return Err(DecodeError::WrongLength {
            expected: n * n,
            actual: bits.len(),
        });
    }

    let mut nodes = Vec::with_capacity(n);
    let mut placed = vec![false; n];
    for position in 0..n {
        let mut occupants = (0..n).filter(|&node| bits[node * n + position]);
        let Some(node) = occupants.next() else {
            return Err(DecodeError::EmptyPosition { position });
        };
        let extra = occupants.count();
        if extra > 0 {
            return Err(DecodeError::CrowdedPosition {
                position,
                count: extra + 1,
            });
        }
        if placed[node] {
            return Err(DecodeError::RepeatedNode { node });
        }
        placed[node] = true;
        nodes.push(node);
    }

    Ok(Tour::new(nodes))
}
