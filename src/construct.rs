//! Nearest-neighbor tour construction.

use crate::haversine::{Point, distance_km};
use crate::tour::{DEPOT, Tour};

/// Greedy tour: from the depot, always move to the closest unvisited stop.
///
/// Ties go to the lowest index. O(n²). Returns an empty tour for an empty
/// point list.
pub fn nearest_neighbor_tour(points: &[Point]) -> Tour {
    let n = points.len();
    if n == 0 {
        return Tour::new(Vec::new());
    }

    let mut visited = vec![false; n];
    visited[DEPOT] = true;
    let mut nodes = Vec::with_capacity(n);
    nodes.push(DEPOT);
    let mut current = DEPOT;

    while nodes.len() < n {
        let mut best: Option<(usize, f64)> = None;
        for (candidate, point) in points.iter().enumerate() {
            if visited[candidate] {
                continue;
            }
            let dist = distance_km(points[current], *point);
            if best.is_none_or(|(_, best_dist)| dist < best_dist) {
                best = Some((candidate, dist));
            }
        }

        let Some((next, _)) = best else {
            break;
        };
        visited[next] = true;
        nodes.push(next);
        current = next;
    }

    Tour::new(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follows_closest_stop() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.3),
            Point::new(0.0, 0.1),
            Point::new(0.0, 0.2),
        ];
        assert_eq!(nearest_neighbor_tour(&points).nodes(), &[0, 2, 3, 1]);
    }

    #[test]
    fn test_ties_go_to_lowest_index() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.1),
            Point::new(0.0, -0.1),
        ];
        assert_eq!(nearest_neighbor_tour(&points).nodes(), &[0, 1, 2]);
    }

    #[test]
    fn test_duplicate_points_still_visited() {
        let points = vec![Point::new(1.0, 1.0); 4];
        let tour = nearest_neighbor_tour(&points);
        assert_eq!(tour.nodes(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(nearest_neighbor_tour(&[]).is_empty());
        assert_eq!(nearest_neighbor_tour(&[Point::new(0.0, 0.0)]).nodes(), &[0]);
    }
}
