//! Core mesh data types.

use nalgebra::{Point3, Vector3};

/// A triangle mesh with indexed vertices and faces.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Vertex positions.
    pub vertices: Vec<Point3<f64>>,

    /// Triangle faces as indices into the vertex array.
    /// Each face is [v0, v1, v2] with counter-clockwise winding.
    pub faces: Vec<[u32; 3]>,
}

impl Mesh {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh from existing vertex and face arrays.
    pub fn from_parts(vertices: Vec<Point3<f64>>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Number of vertices in the mesh.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces (triangles) in the mesh.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if mesh is empty (no vertices or faces).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }
}

/// A triangle with concrete vertex positions.
///
/// Utility type for geometric calculations. Winding is counter-clockwise
/// when viewed from the front (normal points toward viewer).
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    pub v0: Point3<f64>,
    pub v1: Point3<f64>,
    pub v2: Point3<f64>,
}

impl Triangle {
    /// Create a new triangle from three points.
    #[inline]
    pub fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self { v0, v1, v2 }
    }

    /// Compute the (unnormalized) face normal via cross product.
    /// The direction follows the right-hand rule with CCW winding.
    #[inline]
    pub fn normal_unnormalized(&self) -> Vector3<f64> {
        let e1 = self.v1 - self.v0;
        let e2 = self.v2 - self.v0;
        e1.cross(&e2)
    }

    /// Compute the unit face normal.
    /// Returns None for degenerate triangles (zero area).
    pub fn normal(&self) -> Option<Vector3<f64>> {
        let n = self.normal_unnormalized();
        let len_sq = n.norm_squared();
        if len_sq > f64::EPSILON {
            Some(n / len_sq.sqrt())
        } else {
            None
        }
    }

    /// Compute the area of the triangle.
    ///
    /// Always non-negative; collinear vertices yield 0.
    #[inline]
    pub fn area(&self) -> f64 {
        self.normal_unnormalized().norm() * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-10
    }

    #[test]
    fn test_triangle_normal() {
        let tri = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );

        let normal = tri.normal().expect("non-degenerate triangle");
        assert!(approx_eq(normal.x, 0.0));
        assert!(approx_eq(normal.y, 0.0));
        assert!(approx_eq(normal.z, 1.0));
    }

    #[test]
    fn test_triangle_area() {
        let tri = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        assert!(approx_eq(tri.area(), 0.5));
    }

    #[test]
    fn test_skewed_triangle_area_and_normal() {
        // Equilateral-ish triangle on the x+y+z=1 plane.
        let tri = Triangle::new(
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        );
        assert!(approx_eq(tri.area(), 3.0_f64.sqrt() / 2.0));

        let normal = tri.normal().expect("non-degenerate triangle");
        let c = 1.0 / 3.0_f64.sqrt();
        assert!(approx_eq(normal.x, c));
        assert!(approx_eq(normal.y, c));
        assert!(approx_eq(normal.z, c));
    }

    #[test]
    fn test_degenerate_triangle() {
        let tri = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        );
        assert!(tri.normal().is_none());
        assert!(approx_eq(tri.area(), 0.0));
    }

    #[test]
    fn test_mesh_counts() {
        let mut mesh = Mesh::new();
        assert!(mesh.is_empty());

        mesh.vertices.push(Point3::new(0.0, 0.0, 0.0));
        mesh.vertices.push(Point3::new(1.0, 0.0, 0.0));
        mesh.vertices.push(Point3::new(0.0, 1.0, 0.0));
        assert!(mesh.is_empty()); // no faces yet

        mesh.faces.push([0, 1, 2]);
        assert!(!mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
    }
}
