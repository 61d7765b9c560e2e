//! Boundary loop extraction.

use hashbrown::{HashMap, HashSet};
use tracing::debug;

/// A closed ring of vertex indices bounding a hole.
///
/// Consecutive entries (wrapping from last to first) are boundary edges of
/// the mesh. The ring is oriented opposite to the winding of the interior
/// faces, so triangles built directly on it face outward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryLoop {
    /// Vertex indices along the ring.
    pub vertices: Vec<u32>,
}

impl BoundaryLoop {
    /// Number of vertices (equivalently, boundary edges) in the ring.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Check if the ring has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Find all boundary loops in a triangle mesh.
///
/// Returns one ordered vertex ring per hole, sorted by each ring's smallest
/// start vertex. A watertight mesh yields an empty vector.
///
/// The mesh must be edge-manifold at every boundary vertex (one incoming and
/// one outgoing boundary edge). Singular vertices are not supported; with
/// them the walk still terminates but its partition into loops is
/// unspecified.
pub fn find_boundary_loops(faces: &[[u32; 3]]) -> Vec<BoundaryLoop> {
    // Directed edges seen an odd number of times. An interior edge is
    // traversed once in each direction by the two faces sharing it and
    // cancels out; the survivors are boundary edges, each directed with the
    // winding of its single interior face.
    let mut edges: HashSet<(u32, u32)> = HashSet::new();
    for &[v0, v1, v2] in faces {
        for (a, b) in [(v0, v1), (v1, v2), (v2, v0)] {
            if !edges.remove(&(b, a)) {
                edges.insert((a, b));
            }
        }
    }

    // One outgoing boundary edge per boundary vertex on an edge-manifold
    // boundary, so the survivors collapse into a successor map.
    let mut successor: HashMap<u32, u32> = edges.into_iter().collect();

    // Starting every walk at the smallest unconsumed vertex pins the loop
    // order, which hash iteration would leave unspecified.
    let mut starts: Vec<u32> = successor.keys().copied().collect();
    starts.sort_unstable();

    let mut loops = Vec::new();
    for start in starts {
        if !successor.contains_key(&start) {
            continue;
        }
        let mut ring = vec![start];
        let mut vertex = start;
        while let Some(next) = successor.remove(&vertex) {
            if next == start {
                break;
            }
            ring.push(next);
            vertex = next;
        }
        // The walk follows interior winding; reverse so fill triangles built
        // on the ring face the same way as the surrounding surface.
        ring.reverse();
        loops.push(BoundaryLoop { vertices: ring });
    }

    debug!("found {} boundary loops", loops.len());
    loops
}
