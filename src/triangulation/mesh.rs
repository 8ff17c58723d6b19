//! Half-edge mesh adapter over the Delaunay triangulator.

use crate::primitives::Point2;
use delaunator::{triangulate, Point, EMPTY};
use num_traits::Float;

/// Returns the next half-edge within the same triangle.
#[inline]
pub fn next_halfedge(e: usize) -> usize {
    if e % 3 == 2 {
        e - 2
    } else {
        e + 1
    }
}

/// Delaunay triangulation as a half-edge mesh, plus the per-site lookup
/// tables the Voronoi engine walks.
///
/// Triangles are triples of site indices in `triangles`; `halfedges[e]` is
/// the twin of half-edge `e`, or [`EMPTY`] on the hull boundary. `hull`
/// lists hull site indices in traversal order. For degenerate input (all
/// sites collinear, fewer than three distinct sites) no triangles exist and
/// `hull` is the deduplicated site sequence ordered along the line.
#[derive(Debug, Clone)]
pub struct HalfEdgeMesh {
    /// Site indices, three per triangle.
    pub triangles: Vec<usize>,
    /// Twin half-edge indices, [`EMPTY`] for hull-boundary half-edges.
    pub halfedges: Vec<usize>,
    /// Hull site indices in traversal order.
    pub hull: Vec<usize>,
    /// One incoming half-edge per site, [`EMPTY`] for sites with no
    /// incident triangle (duplicates, or any site of a degenerate mesh).
    pub inedges: Vec<usize>,
    /// Position of each site in `hull`, [`EMPTY`] for interior sites.
    pub hull_index: Vec<usize>,
}

impl HalfEdgeMesh {
    /// Triangulates the sites and derives the lookup tables.
    pub fn build<F: Float>(sites: &[Point2<F>]) -> Self {
        let flat: Vec<Point> = sites
            .iter()
            .map(|p| Point {
                x: p.x.to_f64().unwrap(),
                y: p.y.to_f64().unwrap(),
            })
            .collect();
        let t = triangulate(&flat);

        let n = sites.len();
        let mut inedges = vec![EMPTY; n];
        for e in 0..t.halfedges.len() {
            // An incoming half-edge of site p ends at p. Prefer hull-boundary
            // edges so hull cell walks start at the boundary.
            let p = t.triangles[next_halfedge(e)];
            if t.halfedges[e] == EMPTY || inedges[p] == EMPTY {
                inedges[p] = e;
            }
        }

        let mut hull_index = vec![EMPTY; n];
        for (i, &h) in t.hull.iter().enumerate() {
            hull_index[h] = i;
        }

        Self {
            triangles: t.triangles,
            halfedges: t.halfedges,
            hull: t.hull,
            inedges,
            hull_index,
        }
    }

    /// Number of triangles in the mesh.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    /// True when triangulation produced no triangles (collinear input,
    /// fewer than three distinct sites).
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Returns the three site indices of triangle `t`.
    #[inline]
    pub fn triangle_sites(&self, t: usize) -> [usize; 3] {
        [
            self.triangles[3 * t],
            self.triangles[3 * t + 1],
            self.triangles[3 * t + 2],
        ]
    }
}
