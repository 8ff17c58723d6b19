//! Delaunay triangle with derived Voronoi quantities.

use crate::primitives::Point2;
use num_traits::Float;

/// Doubled-area threshold below which a triangle is treated as collinear
/// and its circumcenter as undefined.
pub const DEGENERATE_AREA: f64 = 1e-9;

/// One triangle of a Delaunay triangulation.
///
/// Carries the index of the mesh triangle it came from; that index is also
/// the index of the Voronoi vertex the triangle contributes (its
/// circumcenter).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle<F> {
    /// Index of this triangle in the mesh.
    pub index: usize,
    /// First vertex.
    pub a: Point2<F>,
    /// Second vertex.
    pub b: Point2<F>,
    /// Third vertex.
    pub c: Point2<F>,
}

impl<F: Float> Triangle<F> {
    /// Creates a triangle from its mesh index and three vertices.
    #[inline]
    pub fn new(index: usize, a: Point2<F>, b: Point2<F>, c: Point2<F>) -> Self {
        Self { index, a, b, c }
    }

    /// Returns the arithmetic mean of the three vertices.
    pub fn centroid(&self) -> Point2<F> {
        let three = F::from(3.0).unwrap();
        Point2::new(
            (self.a.x + self.b.x + self.c.x) / three,
            (self.a.y + self.b.y + self.c.y) / three,
        )
    }

    /// Returns the point equidistant from all three vertices.
    ///
    /// Computed from offsets relative to the first vertex, which keeps the
    /// formula stable far from the origin. Returns `None` when the vertices
    /// are collinear within [`DEGENERATE_AREA`] and no trustworthy
    /// circumcenter exists.
    pub fn circumcenter(&self) -> Option<Point2<F>> {
        let d = self.b - self.a;
        let e = self.c - self.a;

        let det = d.cross(e);
        if (det + det).abs() < F::from(DEGENERATE_AREA).unwrap() {
            return None;
        }

        let bl = d.magnitude_squared();
        let cl = e.magnitude_squared();
        let half = F::from(0.5).unwrap();

        let x = self.a.x + (e.y * bl - d.y * cl) * half / det;
        let y = self.a.y + (d.x * cl - e.x * bl) * half / det;

        Some(Point2::new(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_centroid() {
        let t: Triangle<f64> = Triangle::new(
            0,
            Point2::new(0.0, 0.0),
            Point2::new(3.0, 0.0),
            Point2::new(0.0, 3.0),
        );
        let c = t.centroid();
        assert_eq!(c.x, 1.0);
        assert_eq!(c.y, 1.0);
    }

    #[test]
    fn test_circumcenter_right_triangle() {
        // Circumcenter of a right triangle is the hypotenuse midpoint
        let t: Triangle<f64> = Triangle::new(
            0,
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        );
        let c = t.circumcenter().unwrap();
        assert_eq!(c.x, 0.5);
        assert_eq!(c.y, 0.5);
    }

    #[test]
    fn test_circumcenter_equilateral() {
        let t: Triangle<f64> = Triangle::new(
            0,
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.5, 3.0_f64.sqrt() / 2.0),
        );
        let c = t.circumcenter().unwrap();
        assert_relative_eq!(c.x, 0.5, epsilon = 1e-12);
        assert_relative_eq!(c.y, 1.0 / (2.0 * 3.0_f64.sqrt()), epsilon = 1e-12);

        // Equidistant from all vertices
        let r = c.distance(t.a);
        assert_relative_eq!(c.distance(t.b), r, epsilon = 1e-12);
        assert_relative_eq!(c.distance(t.c), r, epsilon = 1e-12);
    }

    #[test]
    fn test_circumcenter_collinear() {
        let t: Triangle<f64> = Triangle::new(
            0,
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
        );
        assert!(t.circumcenter().is_none());
    }

    #[test]
    fn test_circumcenter_near_collinear() {
        // Thin enough to fall under the degeneracy threshold
        let t: Triangle<f64> = Triangle::new(
            0,
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 1e-12),
        );
        assert!(t.circumcenter().is_none());
    }

    #[test]
    fn test_circumcenter_translated() {
        // The relative formulation keeps precision away from the origin
        let offset = 1000.0;
        let t: Triangle<f64> = Triangle::new(
            0,
            Point2::new(offset, offset),
            Point2::new(offset + 1.0, offset),
            Point2::new(offset, offset + 1.0),
        );
        let c = t.circumcenter().unwrap();
        assert_relative_eq!(c.x, offset + 0.5, epsilon = 1e-9);
        assert_relative_eq!(c.y, offset + 0.5, epsilon = 1e-9);
    }
}
