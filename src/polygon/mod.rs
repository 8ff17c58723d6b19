//! Polygon type and operations.
//!
//! Provides the vertex-ring polygon the Voronoi engine hands back for each
//! cell, plus the helpers it needs:
//! - Signed area and area-weighted centroid (Lloyd relaxation)
//! - Convexity testing
//! - Sutherland-Hodgman clipping against a convex region
//!
//! # Example
//!
//! ```
//! use vorocell::polygon::Polygon;
//! use vorocell::Point2;
//!
//! let square = Polygon::new(vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(2.0, 0.0),
//!     Point2::new(2.0, 2.0),
//!     Point2::new(0.0, 2.0),
//! ]);
//!
//! let c = square.centroid().unwrap();
//! assert_eq!(c, Point2::new(1.0, 1.0));
//! ```

mod clip;
mod core;

pub use clip::sutherland_hodgman;
pub use core::{polygon_area, polygon_centroid, polygon_is_convex, polygon_signed_area, Polygon};
