//! Hole filling for triangle meshes.
//!
//! This crate closes holes in triangulated surfaces. Given a mesh with open
//! boundaries it can:
//!
//! - **Detect holes**: walk the boundary edges into closed vertex rings
//! - **Fill one hole**: triangulate a ring with the minimum-weight
//!   triangulation, minimizing either total area or the worst dihedral
//!   angle against the surrounding surface (Liepa's method)
//! - **Fill everything**: patch all holes of a mesh in one call
//!
//! No Steiner points are inserted; patches reuse the ring's own vertices,
//! so the surrounding mesh is never modified.
//!
//! # Example
//!
//! ```
//! use mesh_holes::{fill_hole_liepa, find_boundary_loops};
//! use nalgebra::Point3;
//!
//! // Four sides of a pyramid; the square base is missing.
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(0.5, 0.5, 1.0),
//! ];
//! let faces = vec![[0, 1, 4], [1, 2, 4], [2, 3, 4], [3, 0, 4]];
//!
//! let loops = find_boundary_loops(&faces);
//! assert_eq!(loops.len(), 1);
//!
//! let patch = fill_hole_liepa(&vertices, &faces, &loops[0].vertices, "area").unwrap();
//! assert_eq!(patch.len(), 2);
//! ```

mod error;
mod types;

pub mod fill;
pub mod loops;

// Re-export core types at crate root
pub use error::{FillError, FillResult};
pub use types::{Mesh, Triangle};

// Re-export commonly used functions
pub use fill::{fill_hole, fill_hole_liepa, fill_holes, fill_holes_with_max_edges, FillMethod};
pub use loops::{find_boundary_loops, BoundaryLoop};

// Convenience methods on Mesh
impl Mesh {
    /// Find all boundary loops (hole rings) in the mesh.
    pub fn boundary_loops(&self) -> Vec<BoundaryLoop> {
        loops::find_boundary_loops(&self.faces)
    }

    /// Fill all holes in the mesh, appending the new triangles.
    ///
    /// Returns the number of holes filled.
    pub fn fill_holes(&mut self, method: FillMethod) -> FillResult<usize> {
        fill::fill_holes(self, method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn test_mesh_convenience_methods() {
        let mut mesh = Mesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(0.5, 0.5, 1.0),
            ],
            vec![[0, 1, 4], [1, 2, 4], [2, 3, 4], [3, 0, 4]],
        );

        assert_eq!(mesh.boundary_loops().len(), 1);
        let filled = mesh.fill_holes(FillMethod::Angle).unwrap();
        assert_eq!(filled, 1);
        assert!(mesh.boundary_loops().is_empty());
    }
}
