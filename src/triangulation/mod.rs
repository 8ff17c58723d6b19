//! Delaunay triangulation access.
//!
//! The triangulation itself comes from the `delaunator` crate;
//! [`HalfEdgeMesh`] adapts its output into the half-edge form the Voronoi
//! engine walks, and [`Triangle`] derives the per-triangle quantities
//! (centroid, circumcenter) the dual diagram is built from.

mod mesh;
mod triangle;

pub use mesh::{next_halfedge, HalfEdgeMesh};
pub use triangle::{Triangle, DEGENERATE_AREA};
