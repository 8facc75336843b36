//! Tour value type.

use serde::{Deserialize, Serialize};

/// Index of the depot in every point list.
pub const DEPOT: usize = 0;

/// An ordering of node indices starting at the depot.
///
/// The return leg to the depot is implicit. Solvers in this crate only
/// produce tours that are permutations of `0..n` with the depot first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tour {
    nodes: Vec<usize>,
}

impl Tour {
    /// Wraps a node sequence without validating it.
    pub fn new(nodes: Vec<usize>) -> Self {
        Self { nodes }
    }

    /// The input order `0, 1, ..., n-1`.
    pub fn identity(n: usize) -> Self {
        Self::new((0..n).collect())
    }

    /// Returns the visiting order.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Consumes the tour and returns its nodes.
    pub fn into_nodes(self) -> Vec<usize> {
        self.nodes
    }

    /// Number of visited nodes, depot included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tour visits no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// True when the tour visits each of `0..n` exactly once, depot first.
    pub fn is_valid_for(&self, n: usize) -> bool {
        if self.nodes.len() != n || self.nodes.first().is_some_and(|&node| node != DEPOT) {
            return false;
        }
        let mut seen = vec![false; n];
        for &node in &self.nodes {
            match seen.get_mut(node) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        true
    }
}

impl AsRef<[usize]> for Tour {
    fn as_ref(&self) -> &[usize] {
        &self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        assert_eq!(Tour::identity(4).nodes(), &[0, 1, 2, 3]);
        assert!(Tour::identity(4).is_valid_for(4));
    }

    #[test]
    fn test_rejects_duplicates_and_gaps() {
        assert!(!Tour::new(vec![0, 1, 1]).is_valid_for(3));
        assert!(!Tour::new(vec![0, 1, 3]).is_valid_for(3));
        assert!(!Tour::new(vec![0, 1]).is_valid_for(3));
    }

    #[test]
    fn test_rejects_depot_not_first() {
        assert!(!Tour::new(vec![1, 0, 2]).is_valid_for(3));
    }

    #[test]
    fn test_serializes_as_plain_list() {
        let json = serde_json::to_string(&Tour::new(vec![0, 2, 1])).unwrap();
        assert_eq!(json, "[0,2,1]");
    }
}
