// src/core/cube.rs

use crate::core::adjacency::{shares_edge, AdjacencyGraph};
use crate::Quadrilateral;

/// Outcome of the cube search over one candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CubeVerdict {
    /// Candidate indices `i < j < k` of the first triple that looks like three cube faces.
    pub faces: Option<[usize; 3]>,
}

impl CubeVerdict {
    pub fn is_cube(&self) -> bool {
        self.faces.is_some()
    }

    /// The quadrilaterals behind the verdict, if any.
    pub fn face_quads(&self, candidates: &[Quadrilateral]) -> Option<[Quadrilateral; 3]> {
        let [i, j, k] = self.faces?;
        Some([*candidates.get(i)?, *candidates.get(j)?, *candidates.get(k)?])
    }
}

/// Searches for three candidates where the first two share an edge and the
/// third shares an edge with either of them.
///
/// Triples are visited in lexicographic order `i < j < k` and the first hit is
/// returned, so the verdict is stable for a given candidate order.
pub fn find_cube(candidates: &[Quadrilateral]) -> CubeVerdict {
    let n = candidates.len();
    for i in 0..n {
        for j in (i + 1)..n {
            if !shares_edge(&candidates[i], &candidates[j]) {
                continue;
            }
            for k in (j + 1)..n {
                if shares_edge(&candidates[i], &candidates[k])
                    || shares_edge(&candidates[j], &candidates[k])
                {
                    return CubeVerdict {
                        faces: Some([i, j, k]),
                    };
                }
            }
        }
    }
    CubeVerdict::default()
}

/// True if some triple of candidates matches the cube pattern.
pub fn detect_cube(candidates: &[Quadrilateral]) -> bool {
    find_cube(candidates).is_cube()
}

impl AdjacencyGraph {
    /// Same search as [`find_cube`] over prebuilt neighbor lists.
    ///
    /// For each adjacent pair `i < j` the answer is the smallest `k > j` in the
    /// union of both neighbor lists, which is the triple the brute-force scan
    /// would reach first.
    pub fn find_cube(&self) -> CubeVerdict {
        for i in 0..self.len() {
            let ni = self.neighbors(i);
            for &j in ni.iter().filter(|&&j| j > i) {
                let nj = self.neighbors(j);
                let after = |list: &[usize]| list.iter().copied().find(|&k| k > j);
                let k = match (after(ni), after(nj)) {
                    (Some(a), Some(b)) => Some(a.min(b)),
                    (a, b) => a.or(b),
                };
                if let Some(k) = k {
                    return CubeVerdict {
                        faces: Some([i, j, k]),
                    };
                }
            }
        }
        CubeVerdict::default()
    }
}
