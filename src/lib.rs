//! vorocell - Clipped Voronoi diagrams via Delaunay duality
//!
//! Builds the Voronoi diagram of a planar point set from its Delaunay
//! triangulation and clips every cell against an axis-aligned rectangle.
//! Per site the diagram answers: the cell polygon (raw and clipped), the
//! ordered neighbor sites, a degeneracy classification (duplicates,
//! collinear sets, solo input), and one Lloyd relaxation step.
//!
//! ```
//! use vorocell::{Point2, Voronator};
//!
//! let sites = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(0.0, 1.0),
//! ];
//! let diagram = Voronator::new(&sites).unwrap();
//!
//! // The three cells meet at the shared circumcenter.
//! assert_eq!(diagram.polygon(0).unwrap(), vec![Point2::new(0.5, 0.5)]);
//! assert_eq!(diagram.neighbors(0), vec![1, 2]);
//! ```

pub mod bounds;
pub mod error;
pub mod polygon;
pub mod primitives;
pub mod triangulation;
pub mod voronoi;

pub use bounds::Aabb2;
pub use error::VoronoiError;
pub use primitives::{Point2, Vec2};
pub use triangulation::{HalfEdgeMesh, Triangle};
pub use voronoi::{CellRing, PolygonStatus, RingKind, Voronator, DEFAULT_PADDING};
