//! Voronoi diagram engine.
//!
//! Builds the Voronoi diagram dual to the Delaunay triangulation of a point
//! set and clips every cell against an axis-aligned rectangle. Per site the
//! diagram answers: the unclipped circumcenter ring, the clipped cell
//! polygon, the ordered neighbor sites, a degeneracy classification, and
//! one Lloyd relaxation step.
//!
//! Construction is eager; every query afterward is a pure read, so a built
//! [`Voronator`] can be shared freely between readers.

mod clip;

use crate::bounds::Aabb2;
use crate::error::VoronoiError;
use crate::polygon::{polygon_centroid, sutherland_hodgman, Polygon};
use crate::primitives::{Point2, Vec2};
use crate::triangulation::{next_halfedge, HalfEdgeMesh, Triangle};
use delaunator::EMPTY;
use num_traits::Float;

/// Outward expansion applied per axis when the clip rectangle is derived
/// from the input bounding box, so every site lies strictly inside it.
pub const DEFAULT_PADDING: f64 = 1e-6;

/// Offset magnitude of the surrogate Voronoi vertex substituted for the
/// circumcenter of a degenerate (flat) triangle.
const FAR_SCALE: f64 = 1e9;

/// Degeneracy classification of a site's Voronoi cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolygonStatus {
    /// Interior site with a closed ring of circumcenters.
    Normal,
    /// Convex-hull site; the unclipped cell is open toward infinity.
    /// Two-point input is a special case (each cell is a half plane).
    Infinite,
    /// Every incident triangle is flat; the cell is a bisector strip
    /// between the site's collinear neighbors.
    Collinear,
    /// The input holds exactly one distinct site; the cell is the whole
    /// clip rectangle.
    Solo,
    /// The site coincides with an earlier site (or the mesh walk failed);
    /// no cell geometry is defined.
    Error,
}

/// Whether an unclipped cell ring closes on itself or escapes to infinity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RingKind<F> {
    /// Interior cell; the ring is a closed polygon.
    Closed,
    /// Hull cell; the ring is open, bounded by two rays.
    Open {
        /// Direction of the unbounded edge arriving at the first vertex.
        incoming: Vec2<F>,
        /// Direction of the unbounded edge leaving the last vertex.
        outgoing: Vec2<F>,
    },
}

/// An unclipped Voronoi cell: the circumcenter ring plus its openness tag.
#[derive(Debug, Clone, PartialEq)]
pub struct CellRing<F> {
    /// Voronoi vertices in walk order, one per incident triangle.
    pub points: Vec<Point2<F>>,
    /// Closed ring or open ring with its two ray directions.
    pub kind: RingKind<F>,
}

/// Result of the around-site half-edge walk.
struct CellWalk {
    /// Visited triangle indices, in rotation order.
    triangles: Vec<usize>,
    /// Neighbor site indices, same order (hull walks append the next hull
    /// site as a final neighbor).
    neighbors: Vec<usize>,
}

/// Voronoi diagram of a fixed planar point set, clipped to a rectangle.
///
/// Immutable once constructed; all queries are pure reads. Site indices
/// refer to positions in the original input sequence, duplicates included.
///
/// # Example
///
/// ```
/// use vorocell::{Point2, PolygonStatus, Voronator};
///
/// let sites = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(0.0, 1.0),
/// ];
/// let diagram = Voronator::new(&sites).unwrap();
///
/// assert_eq!(diagram.status(0), PolygonStatus::Infinite);
/// assert_eq!(diagram.neighbors(0), vec![1, 2]);
/// assert_eq!(diagram.polygon(0).unwrap(), vec![Point2::new(0.5, 0.5)]);
/// ```
#[derive(Debug, Clone)]
pub struct Voronator<F> {
    sites: Vec<Point2<F>>,
    bounds: Aabb2<F>,
    mesh: HalfEdgeMesh,
    circumcenters: Vec<Point2<F>>,
    degenerate_triangle: Vec<bool>,
    /// Ray directions of hull cells, two per site: incoming at `2i`,
    /// outgoing at `2i + 1`. Zero for interior sites.
    rays: Vec<Vec2<F>>,
    statuses: Vec<PolygonStatus>,
}

impl<F: Float> Voronator<F> {
    /// Builds the diagram with a clip rectangle derived from the input
    /// bounding box, padded by [`DEFAULT_PADDING`] per axis.
    ///
    /// # Errors
    ///
    /// [`VoronoiError::NoSites`] for an empty slice,
    /// [`VoronoiError::NonFiniteSite`] for NaN or infinite coordinates.
    pub fn new(points: &[Point2<F>]) -> Result<Self, VoronoiError> {
        check_finite(points)?;
        let bounds = Aabb2::from_points(points.iter().copied())
            .ok_or(VoronoiError::NoSites)?
            .padded(F::from(DEFAULT_PADDING).unwrap());
        Self::build(points.to_vec(), bounds)
    }

    /// Builds the diagram with an explicit clip rectangle.
    ///
    /// The rectangle need not enclose all sites; cells of outside sites may
    /// clip to nothing.
    ///
    /// # Errors
    ///
    /// [`VoronoiError::InvalidBounds`] unless `min < max` on both axes,
    /// plus the errors of [`Voronator::new`].
    pub fn with_bounds(
        points: &[Point2<F>],
        min: Point2<F>,
        max: Point2<F>,
    ) -> Result<Self, VoronoiError> {
        check_finite(points)?;
        if points.is_empty() {
            return Err(VoronoiError::NoSites);
        }
        if !(min.x < max.x && min.y < max.y) {
            return Err(VoronoiError::InvalidBounds);
        }
        Self::build(points.to_vec(), Aabb2::new(min, max))
    }

    fn build(sites: Vec<Point2<F>>, bounds: Aabb2<F>) -> Result<Self, VoronoiError> {
        let mesh = HalfEdgeMesh::build(&sites);

        // Barycenter of the hull steers surrogate vertices for flat
        // triangles away from the point set.
        let bary = hull_barycenter(&sites, &mesh.hull);

        let tri_count = mesh.triangle_count();
        let mut circumcenters = Vec::with_capacity(tri_count);
        let mut degenerate_triangle = vec![false; tri_count];
        for t in 0..tri_count {
            let [i1, i2, i3] = mesh.triangle_sites(t);
            let tri = Triangle::new(t, sites[i1], sites[i2], sites[i3]);
            match tri.circumcenter() {
                Some(c) => circumcenters.push(c),
                None => {
                    degenerate_triangle[t] = true;
                    circumcenters.push(surrogate_circumcenter(&tri, bary));
                }
            }
        }

        let mut rays = vec![Vec2::zero(); 2 * sites.len()];
        if !mesh.is_degenerate() {
            let mut p1 = mesh.hull[mesh.hull.len() - 1];
            for &h in &mesh.hull {
                let p0 = p1;
                p1 = h;
                let prev = sites[p0];
                let cur = sites[p1];
                // Outward normal of the hull edge p0 -> p1: the unbounded
                // edge shared by both cells runs along it.
                let dir = Vec2::new(prev.y - cur.y, cur.x - prev.x);
                rays[2 * p0 + 1] = dir;
                rays[2 * p1] = dir;
            }
        }

        let mut diagram = Self {
            sites,
            bounds,
            mesh,
            circumcenters,
            degenerate_triangle,
            rays,
            statuses: Vec::new(),
        };
        diagram.statuses = diagram.classify_sites();
        Ok(diagram)
    }

    /// Number of sites.
    #[inline]
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// True if the diagram holds no sites (never the case after a
    /// successful construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// The input sites, in original order.
    #[inline]
    pub fn points(&self) -> &[Point2<F>] {
        &self.sites
    }

    /// The effective clip rectangle.
    #[inline]
    pub fn bounds(&self) -> Aabb2<F> {
        self.bounds
    }

    /// Number of Delaunay triangles (equivalently, Voronoi vertices).
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }

    /// Returns Delaunay triangle `t` with its vertices resolved.
    ///
    /// # Panics
    ///
    /// Panics if `t >= triangle_count()`.
    pub fn triangle(&self, t: usize) -> Triangle<F> {
        let [i1, i2, i3] = self.mesh.triangle_sites(t);
        Triangle::new(t, self.sites[i1], self.sites[i2], self.sites[i3])
    }

    /// Returns the Voronoi vertex contributed by triangle `t` (a surrogate
    /// far point when the triangle is flat).
    ///
    /// # Panics
    ///
    /// Panics if `t >= triangle_count()`.
    #[inline]
    pub fn circumcenter(&self, t: usize) -> Point2<F> {
        self.circumcenters[t]
    }

    /// Degeneracy status of site `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    #[inline]
    pub fn status(&self, i: usize) -> PolygonStatus {
        self.check_site(i);
        self.statuses[i]
    }

    /// The raw circumcenter ring of site `i`, in walk order.
    ///
    /// Consecutive duplicate vertices (adjacent triangles sharing a
    /// circumcenter) are preserved. `None` for [`PolygonStatus::Error`]
    /// sites; empty when the mesh has no triangles at all (Solo, collinear
    /// input).
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    pub fn polygon(&self, i: usize) -> Option<Vec<Point2<F>>> {
        self.check_site(i);
        if self.statuses[i] == PolygonStatus::Error {
            return None;
        }
        if self.mesh.is_degenerate() {
            return Some(Vec::new());
        }
        self.cell_ring(i).map(|ring| ring.points)
    }

    /// The unclipped cell of site `i` with its open/closed tag.
    ///
    /// `None` when the site has no usable cell (duplicates, triangle-free
    /// meshes).
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    pub fn cell_ring(&self, i: usize) -> Option<CellRing<F>> {
        self.check_site(i);
        if self.mesh.is_degenerate() {
            return None;
        }
        let walk = self.walk_cell(i)?;
        let points = walk
            .triangles
            .iter()
            .map(|&t| self.circumcenters[t])
            .collect();
        let kind = if self.mesh.hull_index[i] != EMPTY {
            RingKind::Open {
                incoming: self.rays[2 * i],
                outgoing: self.rays[2 * i + 1],
            }
        } else {
            RingKind::Closed
        };
        Some(CellRing { points, kind })
    }

    /// The cell of site `i` clipped to the rectangle, as a closed convex
    /// polygon in consistent orientation.
    ///
    /// `None` only for [`PolygonStatus::Error`] sites. A cell lying
    /// entirely outside the rectangle comes back empty.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    pub fn clipped_polygon(&self, i: usize) -> Option<Vec<Point2<F>>> {
        self.check_site(i);
        let cell = match self.statuses[i] {
            PolygonStatus::Error => return None,
            PolygonStatus::Solo => self.full_rect_cell(),
            PolygonStatus::Collinear => self.bisector_cell(i),
            PolygonStatus::Infinite if self.mesh.is_degenerate() => self.bisector_cell(i),
            _ => match self.cell_ring(i) {
                Some(ring) => match ring.kind {
                    RingKind::Closed => self.clip_finite(i, &ring.points),
                    RingKind::Open { incoming, outgoing } => {
                        self.clip_infinite(i, &ring.points, incoming, outgoing)
                    }
                },
                None => Vec::new(),
            },
        };
        Some(clip::simplify(cell))
    }

    /// Neighbor site indices of site `i`, in walk order.
    ///
    /// Hull sites gain the next hull site as a final neighbor; sites of a
    /// triangle-free mesh get their line-adjacent sites. Empty for Solo and
    /// Error sites.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    pub fn neighbors(&self, i: usize) -> Vec<usize> {
        self.check_site(i);
        if self.mesh.is_degenerate() {
            let h = self.mesh.hull_index[i];
            if h == EMPTY {
                return Vec::new();
            }
            let mut out = Vec::new();
            if h > 0 {
                out.push(self.mesh.hull[h - 1]);
            }
            if h + 1 < self.mesh.hull.len() {
                out.push(self.mesh.hull[h + 1]);
            }
            return out;
        }
        match self.walk_cell(i) {
            Some(walk) => walk.neighbors,
            None => Vec::new(),
        }
    }

    /// The subset of `neighbors(i)` whose shared Voronoi edge survives
    /// clipping with nonzero length, in the same relative order.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    pub fn clipped_neighbors(&self, i: usize) -> Vec<usize> {
        self.check_site(i);
        let nbrs = self.neighbors(i);
        if nbrs.is_empty() {
            return nbrs;
        }
        let cell = match self.clipped_polygon(i) {
            Some(cell) if cell.len() >= 2 => cell,
            _ => return Vec::new(),
        };

        let site = self.sites[i];
        let tol = F::epsilon().sqrt();
        let mut keep = vec![false; nbrs.len()];

        // Each surviving edge of the clipped cell lies on the bisector
        // between the site and exactly one neighbor: the one equidistant
        // from the edge midpoint.
        let n = cell.len();
        for j in 0..n {
            let a = cell[j];
            let b = cell[(j + 1) % n];
            if a == b {
                continue;
            }
            let m = a.midpoint(b);
            let d_site = m.distance_squared(site);

            let mut best = 0;
            let mut best_d = F::infinity();
            for (k, &u) in nbrs.iter().enumerate() {
                let d = m.distance_squared(self.sites[u]);
                if d < best_d {
                    best_d = d;
                    best = k;
                }
            }
            if (best_d - d_site).abs() <= tol * (F::one() + d_site) {
                keep[best] = true;
            }
        }

        nbrs.into_iter()
            .zip(keep)
            .filter_map(|(u, k)| k.then_some(u))
            .collect()
    }

    /// One Lloyd relaxation step: the area-weighted centroid of every
    /// clipped cell, one entry per input site in input order.
    ///
    /// Sites without defined clipped geometry or with a degenerate (empty
    /// or zero-area) cell keep their original position.
    pub fn relaxed_points(&self) -> Vec<Point2<F>> {
        (0..self.sites.len())
            .map(|i| {
                self.clipped_polygon(i)
                    .and_then(|cell| polygon_centroid(&cell))
                    .unwrap_or(self.sites[i])
            })
            .collect()
    }

    #[inline]
    fn check_site(&self, i: usize) {
        assert!(
            i < self.sites.len(),
            "site index {} out of range for {} sites",
            i,
            self.sites.len()
        );
    }

    /// Rotates around site `i` collecting incident triangles and neighbor
    /// sites. `None` when the site has no incident half-edge or the walk
    /// exceeds the half-edge count (corrupt mesh).
    fn walk_cell(&self, i: usize) -> Option<CellWalk> {
        let e0 = self.mesh.inedges[i];
        if e0 == EMPTY {
            return None;
        }

        let mut triangles = Vec::new();
        let mut neighbors = Vec::new();
        let cap = self.mesh.halfedges.len();
        let mut steps = 0;
        let mut e = e0;
        loop {
            steps += 1;
            if steps > cap {
                return None;
            }
            triangles.push(e / 3);
            neighbors.push(self.mesh.triangles[e]);

            let en = next_halfedge(e);
            if self.mesh.triangles[en] != i {
                // Inconsistent mesh; keep the partial cell.
                break;
            }
            e = self.mesh.halfedges[en];
            if e == EMPTY {
                // Reached the hull: the next hull site closes the fan.
                let h = self.mesh.hull
                    [(self.mesh.hull_index[i] + 1) % self.mesh.hull.len()];
                if neighbors.last() != Some(&h) {
                    neighbors.push(h);
                }
                break;
            }
            if e == e0 {
                break;
            }
        }

        Some(CellWalk {
            triangles,
            neighbors,
        })
    }

    fn classify_sites(&self) -> Vec<PolygonStatus> {
        let n = self.sites.len();
        let mut statuses = Vec::with_capacity(n);

        for i in 0..n {
            let status = if self.mesh.is_degenerate() {
                let h = self.mesh.hull_index[i];
                if h == EMPTY {
                    PolygonStatus::Error
                } else if self.mesh.hull.len() == 1 {
                    PolygonStatus::Solo
                } else if h == 0 || h == self.mesh.hull.len() - 1 {
                    PolygonStatus::Infinite
                } else {
                    PolygonStatus::Collinear
                }
            } else {
                match self.walk_cell(i) {
                    None => PolygonStatus::Error,
                    Some(walk) => {
                        if walk
                            .triangles
                            .iter()
                            .all(|&t| self.degenerate_triangle[t])
                        {
                            PolygonStatus::Collinear
                        } else if self.mesh.hull_index[i] != EMPTY {
                            PolygonStatus::Infinite
                        } else {
                            PolygonStatus::Normal
                        }
                    }
                }
            };
            statuses.push(status);
        }

        statuses
    }

    /// The whole clip rectangle as a cell (Solo sites).
    fn full_rect_cell(&self) -> Vec<Point2<F>> {
        let [bl, br, tr, tl] = self.bounds.corners();
        vec![br, tr, tl, bl]
    }

    /// Cell of a site whose geometry comes from perpendicular bisectors
    /// rather than circumcenters: a strip between two collinear neighbors,
    /// or a half plane toward a single neighbor.
    fn bisector_cell(&self, i: usize) -> Vec<Point2<F>> {
        let site = self.sites[i];

        let (left, right) = if self.mesh.is_degenerate() {
            let h = self.mesh.hull_index[i];
            let left = (h > 0).then(|| self.mesh.hull[h - 1]);
            let right = (h + 1 < self.mesh.hull.len()).then(|| self.mesh.hull[h + 1]);
            (left, right)
        } else {
            // Triangulated but every incident triangle is flat: take the
            // nearest neighbor and the nearest one on the opposite side.
            let nbrs = match self.walk_cell(i) {
                Some(walk) => walk.neighbors,
                None => return Vec::new(),
            };
            let nearest = nbrs.iter().copied().min_by(|&u, &v| {
                site.distance_squared(self.sites[u])
                    .partial_cmp(&site.distance_squared(self.sites[v]))
                    .unwrap()
            });
            let opposite = nearest.and_then(|b| {
                let axis = self.sites[b] - site;
                nbrs.iter()
                    .copied()
                    .filter(|&u| (self.sites[u] - site).dot(axis) < F::zero())
                    .min_by(|&u, &v| {
                        site.distance_squared(self.sites[u])
                            .partial_cmp(&site.distance_squared(self.sites[v]))
                            .unwrap()
                    })
            });
            (opposite, nearest)
        };

        let two = F::one() + F::one();
        let diag = (self.bounds.max - self.bounds.min).magnitude();
        let center = self.bounds.center();

        let quad = match (left, right) {
            (Some(a), Some(b)) => {
                // Strip between the two bisectors, clockwise so the
                // reversed clip result is counter-clockwise.
                let ma = site.midpoint(self.sites[a]);
                let mb = site.midpoint(self.sites[b]);
                let r = two * (diag + ma.distance(center).max(mb.distance(center)));
                let dir = (self.sites[b] - site).perpendicular() * r;
                vec![mb + dir, mb - dir, ma - dir, ma + dir]
            }
            (Some(b), None) | (None, Some(b)) => {
                // Half plane on this side of the bisector toward b.
                let m = site.midpoint(self.sites[b]);
                let r = two * (diag + m.distance(center));
                let dir = (self.sites[b] - site).perpendicular() * r;
                let away = match (site - self.sites[b]).normalize() {
                    Some(v) => v * (r + r),
                    None => return Vec::new(),
                };
                vec![m + dir, m - dir, m - dir + away, m + dir + away]
            }
            (None, None) => return Vec::new(),
        };

        let clip_rect = Polygon::new(self.bounds.corners().to_vec());
        let mut cell = sutherland_hodgman(&Polygon::new(quad), &clip_rect).vertices;
        cell.reverse();
        cell
    }
}

fn check_finite<F: Float>(points: &[Point2<F>]) -> Result<(), VoronoiError> {
    for (index, p) in points.iter().enumerate() {
        if !(p.x.is_finite() && p.y.is_finite()) {
            return Err(VoronoiError::NonFiniteSite { index });
        }
    }
    Ok(())
}

fn hull_barycenter<F: Float>(sites: &[Point2<F>], hull: &[usize]) -> Point2<F> {
    if hull.is_empty() {
        return Point2::origin();
    }
    let mut x = F::zero();
    let mut y = F::zero();
    for &h in hull {
        x = x + sites[h].x;
        y = y + sites[h].y;
    }
    let n = F::from(hull.len()).unwrap();
    Point2::new(x / n, y / n)
}

/// Substitute Voronoi vertex for a flat triangle: far out along the
/// triangle's line, on the side away from the hull barycenter.
fn surrogate_circumcenter<F: Float>(tri: &Triangle<F>, bary: Point2<F>) -> Point2<F> {
    let e = tri.c - tri.a;
    let s = (bary.x - tri.a.x) * e.y - (bary.y - tri.a.y) * e.x;
    let sign = if s > F::zero() {
        F::one()
    } else if s < F::zero() {
        -F::one()
    } else {
        F::zero()
    };
    let far = F::from(FAR_SCALE).unwrap() * sign;
    let two = F::one() + F::one();
    Point2::new(
        (tri.a.x + tri.c.x) / two - far * e.y,
        (tri.a.y + tri.c.y) / two + far * e.x,
    )
}
