//! Minimum-weight triangulation hole filling.
//!
//! Fills a hole bounded by a vertex ring with new triangles, picking the
//! triangulation that either minimizes total area (Barequet/Sharir weights)
//! or maximizes the worst dihedral-angle compatibility with both the new
//! patch and the surrounding surface (Liepa weights). The solver is a
//! dynamic program over sub-spans of the ring: O(n³) time and O(n²) memory
//! in the ring length, all scoped to one call.

use nalgebra::{Point3, Vector3};
use tracing::{debug, info};

use crate::error::{FillError, FillResult};
use crate::loops::find_boundary_loops;
use crate::types::{Mesh, Triangle};

/// Objective used to choose among candidate triangulations of a hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMethod {
    /// Minimize the summed area of the new triangles.
    Area,
    /// Maximize the worst normal-compatibility score across the patch,
    /// breaking exact ties by smaller summed area.
    Angle,
}

impl std::str::FromStr for FillMethod {
    type Err = FillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "area" => Ok(FillMethod::Area),
            "angle" => Ok(FillMethod::Angle),
            other => Err(FillError::UnsupportedMethod {
                method: other.to_string(),
            }),
        }
    }
}

/// Fill a hole bounded by `boundary_loop` in a mesh given by its vertices
/// and faces.
///
/// `method` is `"area"` or `"angle"`; anything else fails with
/// [`FillError::UnsupportedMethod`] before any mesh data is read. `faces`
/// is consulted only by the `"angle"` method, which scores new triangles
/// against the existing faces around the hole.
///
/// Returns the new triangles; the input mesh is not modified. The returned
/// patch has exactly `boundary_loop.len() - 2` triangles and references
/// only vertices of the ring.
pub fn fill_hole_liepa(
    vertices: &[Point3<f64>],
    faces: &[[u32; 3]],
    boundary_loop: &[u32],
    method: &str,
) -> FillResult<Vec<[u32; 3]>> {
    let method = method.parse::<FillMethod>()?;
    fill_hole(vertices, faces, boundary_loop, method)
}

/// Typed entry point of [`fill_hole_liepa`].
pub fn fill_hole(
    vertices: &[Point3<f64>],
    faces: &[[u32; 3]],
    boundary_loop: &[u32],
    method: FillMethod,
) -> FillResult<Vec<[u32; 3]>> {
    let n = boundary_loop.len();
    if n < 3 {
        return Err(FillError::InvalidLoop {
            details: format!("loop has {} vertices, need at least 3", n),
        });
    }
    if let Some(&v) = boundary_loop
        .iter()
        .find(|&&v| v as usize >= vertices.len())
    {
        return Err(FillError::InvalidLoop {
            details: format!(
                "loop vertex {} is out of range for {} mesh vertices",
                v,
                vertices.len()
            ),
        });
    }

    debug!("filling hole with {} boundary edges ({:?})", n, method);

    let splits = match method {
        FillMethod::Area => solve_area(vertices, boundary_loop),
        FillMethod::Angle => solve_angle(vertices, faces, boundary_loop)?,
    };

    Ok(reconstruct(&splits, boundary_loop))
}

/// Triangle spanned by three ring positions.
#[inline]
fn ring_triangle(vertices: &[Point3<f64>], ring: &[u32], a: usize, b: usize, c: usize) -> Triangle {
    Triangle::new(
        vertices[ring[a] as usize],
        vertices[ring[b] as usize],
        vertices[ring[c] as usize],
    )
}

/// Unit normal of a triangle, or zero for degenerate triangles.
///
/// A zero normal scores 0 against every neighbor in the dot-product
/// comparisons below, so degenerate candidates rank below anything with a
/// positive worst-case score and no NaN enters the ordering.
#[inline]
fn normal_or_zero(t: &Triangle) -> Vector3<f64> {
    t.normal().unwrap_or_else(Vector3::zeros)
}

/// Triangular DP table: row `w - 1` holds spans of width `w` (ring
/// positions `start..=start + w`), one entry per start position, so `n - w`
/// entries. `row_len` maps that natural size to the allocated size; the
/// split table leaves width-1 and width-2 rows empty (a single edge spans no
/// triangle, a width-2 span has a forced apex), and the normals table grows
/// its first row to `n` for the wrap edge.
fn table_rows<T: Clone>(n: usize, fill: T, row_len: impl Fn(usize) -> usize) -> Vec<Vec<T>> {
    (1..n)
        .rev()
        .map(|size| vec![fill.clone(); row_len(size)])
        .collect()
}

/// Minimum-area triangulation tables.
fn solve_area(vertices: &[Point3<f64>], ring: &[u32]) -> Vec<Vec<usize>> {
    let n = ring.len();
    let mut areas: Vec<Vec<f64>> = table_rows(n, 0.0, |w| w);
    let mut splits: Vec<Vec<usize>> = table_rows(n, 0, |w| if w < n - 2 { w } else { 0 });

    for i in 0..n - 2 {
        areas[1][i] = ring_triangle(vertices, ring, i, i + 1, i + 2).area();
    }

    for j in 3..n {
        for i in 0..n - j {
            let mut min_area = f64::INFINITY;
            let mut optimal_m = 0;
            for m in 0..j - 1 {
                let m1 = j - m - 2;
                let i1 = i + 1 + m;
                let area = areas[m][i]
                    + areas[m1][i1]
                    + ring_triangle(vertices, ring, i, i1, i + j).area();
                if area < min_area {
                    min_area = area;
                    optimal_m = m;
                }
            }
            areas[j - 1][i] = min_area;
            splits[j - 1][i] = i + 1 + optimal_m;
        }
    }

    splits
}

/// Maximin normal-compatibility tables (Liepa's angle objective).
///
/// Alongside cost and split, every span carries the worst dot product seen
/// inside its best triangulation and the normal of the triangle covering it,
/// so a parent span can score its candidate triangle against both children
/// across the shared diagonals.
fn solve_angle(
    vertices: &[Point3<f64>],
    faces: &[[u32; 3]],
    ring: &[u32],
) -> FillResult<Vec<Vec<usize>>> {
    let n = ring.len();

    // Loop-local position of every mesh vertex.
    let mut on_ring: Vec<Option<usize>> = vec![None; vertices.len()];
    for (pos, &v) in ring.iter().enumerate() {
        on_ring[v as usize] = Some(pos);
    }

    // Row 0 holds, per boundary edge origin, the normal of the existing
    // face already sharing that edge from outside the hole; it is sized n
    // so the wrap edge (n-1 -> 0) has a slot. Rows above hold the normal
    // of the optimal triangle covering each wider span.
    let mut normals: Vec<Vec<Vector3<f64>>> =
        table_rows(n, Vector3::zeros(), |w| if w < n - 1 { w } else { n });

    for face in faces {
        let b_face = [
            on_ring[face[0] as usize],
            on_ring[face[1] as usize],
            on_ring[face[2] as usize],
        ];
        if b_face.iter().filter(|p| p.is_none()).count() >= 2 {
            continue;
        }
        let [e0, e1] = loop_edge_origins(b_face, n)?;
        if e0.is_none() && e1.is_none() {
            continue;
        }
        let normal = normal_or_zero(&Triangle::new(
            vertices[face[0] as usize],
            vertices[face[1] as usize],
            vertices[face[2] as usize],
        ));
        if let Some(e) = e0 {
            normals[0][e] = normal;
        }
        if let Some(e) = e1 {
            normals[0][e] = normal;
        }
    }

    let mut areas: Vec<Vec<f64>> = table_rows(n, 0.0, |w| w);
    let mut dots: Vec<Vec<f64>> = table_rows(n, 1.0, |w| w);
    let mut splits: Vec<Vec<usize>> = table_rows(n, 0, |w| if w < n - 2 { w } else { 0 });

    for i in 0..n - 2 {
        let ear = ring_triangle(vertices, ring, i, i + 1, i + 2);
        areas[1][i] = ear.area();
        normals[1][i] = normal_or_zero(&ear);
    }
    for i in 0..n - 2 {
        let d0 = normals[1][i].dot(&normals[0][i]);
        let d1 = normals[1][i].dot(&normals[0][i + 1]);
        dots[1][i] = d0.min(d1);
    }

    for j in 3..n {
        for i in 0..n - j {
            let mut max_dot = f64::NEG_INFINITY;
            let mut min_area = f64::INFINITY;
            let mut optimal_m = 0;
            let mut optimal_normal = Vector3::zeros();
            for m in 0..j - 1 {
                let m1 = j - m - 2;
                let i1 = i + 1 + m;
                let triangle = ring_triangle(vertices, ring, i, i1, i + j);
                let normal = normal_or_zero(&triangle);
                let mut d = normal
                    .dot(&normals[m][i])
                    .min(normal.dot(&normals[m1][i1]));
                if i == 0 && j == n - 1 {
                    // The full ring's closing triangle also shares the wrap
                    // edge (n-1 -> 0) with the existing surface.
                    d = d.min(normal.dot(&normals[0][n - 1]));
                }
                d = d.min(dots[m][i]).min(dots[m1][i1]);
                let area = areas[m][i] + areas[m1][i1] + triangle.area();
                if max_dot < d || (max_dot == d && area < min_area) {
                    max_dot = d;
                    min_area = area;
                    optimal_m = m;
                    optimal_normal = normal;
                }
            }
            dots[j - 1][i] = max_dot;
            areas[j - 1][i] = min_area;
            splits[j - 1][i] = i + 1 + optimal_m;
            normals[j - 1][i] = optimal_normal;
        }
    }

    Ok(splits)
}

/// Ring-edge origins adjacent to a face given in loop-local positions.
///
/// Each entry of `b_face` is the position of that face vertex on the ring,
/// or `None` when the vertex is off the ring. A triangular face can share
/// zero, one, or two of the ring's edges; the origin position of each shared
/// edge is returned.
///
/// A face whose three vertices all sit on the ring and straddle the wrap
/// (positions 0 and n-1) must have its middle vertex at 1 or n-2; anything
/// else cannot occur on an edge-manifold boundary and is reported as
/// [`FillError::InvalidLoop`].
fn loop_edge_origins(
    b_face: [Option<usize>; 3],
    n: usize,
) -> FillResult<[Option<usize>; 2]> {
    let mut f = b_face;
    // None sorts first, mirroring a -1 sentinel.
    f.sort_unstable();
    match f {
        [None, Some(j), Some(k)] => {
            if j == 0 && k == n - 1 {
                Ok([Some(n - 1), None])
            } else if j + 1 == k {
                Ok([Some(j), None])
            } else {
                // Chord face: touches the ring at two non-adjacent vertices.
                Ok([None, None])
            }
        }
        [Some(i), Some(j), Some(k)] => {
            if i == 0 && k == n - 1 {
                if j == 1 {
                    Ok([Some(n - 1), Some(0)])
                } else if j == n - 2 {
                    Ok([Some(n - 2), Some(n - 1)])
                } else {
                    Err(FillError::InvalidLoop {
                        details: format!(
                            "face spans ring positions 0, {} and {} across the wrap edge",
                            j,
                            n - 1
                        ),
                    })
                }
            } else {
                Ok([Some(i), Some(j)])
            }
        }
        _ => Ok([None, None]),
    }
}

/// Backtrack the split table into an explicit triangle list.
///
/// Iterative with a work stack so large rings cannot exhaust the call
/// stack. Emits exactly `ring.len() - 2` triangles in global indices.
fn reconstruct(splits: &[Vec<usize>], ring: &[u32]) -> Vec<[u32; 3]> {
    let n = ring.len();
    let mut sections = vec![(0, n - 1)];
    let mut triangles = Vec::with_capacity(n - 2);

    while let Some((d, b)) = sections.pop() {
        let m = if b - d == 2 {
            d + 1
        } else {
            splits[b - d - 1][d]
        };
        triangles.push([ring[d], ring[m], ring[b]]);
        if m - d > 1 {
            sections.push((d, m));
        }
        if b - m > 1 {
            sections.push((m, b));
        }
    }

    triangles
}

/// Fill every hole in the mesh, appending the new triangles to its faces.
///
/// Each hole is triangulated against the pre-fill surface, so patch order
/// does not influence the angle scoring. Returns the number of holes filled.
pub fn fill_holes(mesh: &mut Mesh, method: FillMethod) -> FillResult<usize> {
    fill_holes_with_max_edges(mesh, method, usize::MAX)
}

/// Fill holes with at most `max_edges` boundary edges, appending the new
/// triangles to the mesh.
///
/// Larger holes are left open; filling a huge ring from its boundary alone
/// tends to produce a poor patch, so callers cap the size. Returns the
/// number of holes filled.
pub fn fill_holes_with_max_edges(
    mesh: &mut Mesh,
    method: FillMethod,
    max_edges: usize,
) -> FillResult<usize> {
    let loops = find_boundary_loops(&mesh.faces);
    if loops.is_empty() {
        debug!("mesh is watertight, nothing to fill");
        return Ok(0);
    }

    let mut patch = Vec::new();
    let mut filled = 0;
    let mut skipped = 0;
    for ring in &loops {
        if ring.len() > max_edges {
            skipped += 1;
            continue;
        }
        patch.extend(fill_hole(&mesh.vertices, &mesh.faces, &ring.vertices, method)?);
        filled += 1;
    }
    mesh.faces.extend_from_slice(&patch);

    if skipped > 0 {
        info!(
            "filled {} holes with {} triangles ({} skipped, more than {} edges)",
            filled,
            patch.len(),
            skipped,
            max_edges
        );
    } else {
        info!("filled {} holes with {} triangles", filled, patch.len());
    }

    Ok(filled)
}
