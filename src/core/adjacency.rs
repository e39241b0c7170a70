// src/core/adjacency.rs

use crate::Quadrilateral;

/// Two vertices closer than this are the same point.
pub const VERTEX_MATCH_TOLERANCE: f64 = 1e-6;

/// Number of vertex pairs `(p, q)`, `p` from `a` and `q` from `b`, that coincide.
pub fn shared_vertex_count(a: &Quadrilateral, b: &Quadrilateral) -> usize {
    a.corners
        .iter()
        .flat_map(|p| b.corners.iter().map(move |q| (p, q)))
        .filter(|(p, q)| {
            let dx = p.x as f64 - q.x as f64;
            let dy = p.y as f64 - q.y as f64;
            (dx * dx + dy * dy).sqrt() < VERTEX_MATCH_TOLERANCE
        })
        .count()
}

/// Checks if two quadrilaterals share an edge: exactly two of their vertices coincide.
///
/// A single common corner does not count, and neither do duplicate detections
/// of the same face (three or four common vertices).
pub fn shares_edge(a: &Quadrilateral, b: &Quadrilateral) -> bool {
    shared_vertex_count(a, b) == 2
}

/// Edge-sharing relation over a candidate set, built once.
///
/// `neighbors[i]` lists, in increasing order, every `j != i` such that
/// `shares_edge(candidates[i], candidates[j])`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyGraph {
    neighbors: Vec<Vec<usize>>,
}

impl AdjacencyGraph {
    pub fn build(candidates: &[Quadrilateral]) -> Self {
        let mut neighbors = vec![Vec::new(); candidates.len()];
        for i in 0..candidates.len() {
            for j in (i + 1)..candidates.len() {
                if shares_edge(&candidates[i], &candidates[j]) {
                    neighbors[i].push(j);
                    neighbors[j].push(i);
                }
            }
        }
        // j > i pushes arrive in order, j < i pushes arrive in order and first
        AdjacencyGraph { neighbors }
    }

    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    pub fn neighbors(&self, i: usize) -> &[usize] {
        &self.neighbors[i]
    }

    pub fn are_adjacent(&self, i: usize, j: usize) -> bool {
        self.neighbors[i].binary_search(&j).is_ok()
    }

    pub fn edge_count(&self) -> usize {
        self.neighbors.iter().map(Vec::len).sum::<usize>() / 2
    }
}
