//! Rectangle clipping of walk-derived cells.
//!
//! A cell arrives as a ring of Voronoi vertices, possibly open toward
//! infinity. Clipping sweeps the ring edge by edge: each edge is reduced to
//! its in-rectangle portion via region codes, and whenever consecutive
//! surviving vertices sit on different rectangle edges the rectangle
//! corners between them are inserted, but only those closer to this cell's
//! site than to any neighbor.

use super::Voronator;
use crate::primitives::{Point2, Vec2};
use num_traits::Float;

// Region/edge code bits.
const LEFT: u8 = 0b0001;
const RIGHT: u8 = 0b0010;
const BOTTOM: u8 = 0b0100;
const TOP: u8 = 0b1000;

impl<F: Float> Voronator<F> {
    /// Clips a closed ring against the rectangle.
    ///
    /// Empty output means the cell vanished; if the rectangle center still
    /// belongs to this cell the whole rectangle is the cell.
    pub(super) fn clip_finite(&self, i: usize, points: &[Point2<F>]) -> Vec<Point2<F>> {
        let n = points.len();
        let mut out: Vec<Point2<F>> = Vec::new();

        let mut p1 = points[n - 1];
        let mut c1 = self.region_code(p1);
        // Edge code of the last emitted vertex; nonzero codes on both ends
        // of a gap mean rectangle corners may lie between them.
        let mut e1: u8 = 0;

        for &point in points {
            let p0 = p1;
            let c0 = c1;
            p1 = point;
            c1 = self.region_code(p1);

            if c0 == 0 && c1 == 0 {
                e1 = 0;
                out.push(p1);
            } else {
                let s1;
                if c0 == 0 {
                    match self.clip_segment(p0, p1, c0, c1) {
                        Some((_, b)) => s1 = b,
                        None => continue,
                    }
                } else {
                    let s0;
                    match self.clip_segment(p1, p0, c1, c0) {
                        Some((b, a)) => {
                            s1 = b;
                            s0 = a;
                        }
                        None => continue,
                    }
                    let e0 = e1;
                    e1 = self.edge_code(s0);
                    if e0 != 0 && e1 != 0 {
                        let at = out.len();
                        self.insert_corners(i, e0, e1, &mut out, at);
                    }
                    out.push(s0);
                }
                let e0 = e1;
                e1 = self.edge_code(s1);
                if e0 != 0 && e1 != 0 {
                    let at = out.len();
                    self.insert_corners(i, e0, e1, &mut out, at);
                }
                out.push(s1);
            }
        }

        if !out.is_empty() {
            let e0 = e1;
            let first = self.edge_code(out[0]);
            if e0 != 0 && first != 0 {
                let at = out.len();
                self.insert_corners(i, e0, first, &mut out, at);
            }
        } else if self.cell_contains(i, self.bounds.center()) {
            let [bl, br, tr, tl] = self.bounds.corners();
            return vec![br, tr, tl, bl];
        }

        out
    }

    /// Clips an open ring: both ends are first extended along their ray
    /// directions onto (or past) the rectangle, then the result is clipped
    /// as a closed ring and missing corners are filled in.
    pub(super) fn clip_infinite(
        &self,
        i: usize,
        points: &[Point2<F>],
        incoming: Vec2<F>,
        outgoing: Vec2<F>,
    ) -> Vec<Point2<F>> {
        let mut ring = points.to_vec();
        if let Some(p) = self.project_ray(ring[0], incoming) {
            ring.insert(0, p);
        }
        if let Some(p) = self.project_ray(ring[ring.len() - 1], outgoing) {
            ring.push(p);
        }

        let mut out = self.clip_finite(i, &ring);
        if !out.is_empty() {
            let mut j = 0;
            let mut n = out.len();
            let mut c1 = self.edge_code(out[n - 1]);
            while j < n {
                let c0 = c1;
                c1 = self.edge_code(out[j]);
                if c0 != 0 && c1 != 0 {
                    j = self.insert_corners(i, c0, c1, &mut out, j);
                    n = out.len();
                }
                j += 1;
            }
        } else if self.cell_contains(i, self.bounds.center()) {
            let [bl, br, tr, tl] = self.bounds.corners();
            out = vec![bl, br, tr, tl];
        }

        out
    }

    /// Cohen-Sutherland style reduction of a segment to its in-rectangle
    /// portion. `None` if the segment misses the rectangle entirely.
    fn clip_segment(
        &self,
        mut p0: Point2<F>,
        mut p1: Point2<F>,
        mut c0: u8,
        mut c1: u8,
    ) -> Option<(Point2<F>, Point2<F>)> {
        // Normalize the clip order for reproducible endpoints.
        let flip = c0 < c1;
        if flip {
            std::mem::swap(&mut p0, &mut p1);
            std::mem::swap(&mut c0, &mut c1);
        }

        loop {
            if c0 == 0 && c1 == 0 {
                return Some(if flip { (p1, p0) } else { (p0, p1) });
            }
            if c0 & c1 != 0 {
                return None;
            }

            let c = if c0 != 0 { c0 } else { c1 };
            let p = if c & TOP != 0 {
                Point2::new(
                    p0.x + (p1.x - p0.x) * (self.bounds.max.y - p0.y) / (p1.y - p0.y),
                    self.bounds.max.y,
                )
            } else if c & BOTTOM != 0 {
                Point2::new(
                    p0.x + (p1.x - p0.x) * (self.bounds.min.y - p0.y) / (p1.y - p0.y),
                    self.bounds.min.y,
                )
            } else if c & RIGHT != 0 {
                Point2::new(
                    self.bounds.max.x,
                    p0.y + (p1.y - p0.y) * (self.bounds.max.x - p0.x) / (p1.x - p0.x),
                )
            } else {
                Point2::new(
                    self.bounds.min.x,
                    p0.y + (p1.y - p0.y) * (self.bounds.min.x - p0.x) / (p1.x - p0.x),
                )
            };

            if c0 != 0 {
                p0 = p;
                c0 = self.region_code(p0);
            } else {
                p1 = p;
                c1 = self.region_code(p1);
            }
        }
    }

    /// Projects `p` along ray direction `v` onto the rectangle boundary.
    ///
    /// `None` when the ray starts on or beyond the boundary it points at
    /// (nothing of it can be inside).
    fn project_ray(&self, p: Point2<F>, v: Vec2<F>) -> Option<Point2<F>> {
        let mut t = F::infinity();
        let mut out = Point2::origin();

        if v.y < F::zero() {
            if p.y <= self.bounds.min.y {
                return None;
            }
            let c = (self.bounds.min.y - p.y) / v.y;
            if c < t {
                t = c;
                out = Point2::new(p.x + c * v.x, self.bounds.min.y);
            }
        } else if v.y > F::zero() {
            if p.y >= self.bounds.max.y {
                return None;
            }
            let c = (self.bounds.max.y - p.y) / v.y;
            if c < t {
                t = c;
                out = Point2::new(p.x + c * v.x, self.bounds.max.y);
            }
        }

        if v.x > F::zero() {
            if p.x >= self.bounds.max.x {
                return None;
            }
            let c = (self.bounds.max.x - p.x) / v.x;
            if c < t {
                t = c;
                out = Point2::new(self.bounds.max.x, p.y + c * v.y);
            }
        } else if v.x < F::zero() {
            if p.x <= self.bounds.min.x {
                return None;
            }
            let c = (self.bounds.min.x - p.x) / v.x;
            if c < t {
                t = c;
                out = Point2::new(self.bounds.min.x, p.y + c * v.y);
            }
        }

        t.is_finite().then_some(out)
    }

    /// Walks the rectangle boundary from edge code `e0` to `e1`, inserting
    /// the corners passed on the way before position `at` — but only the
    /// corners that belong to cell `i`. Returns the updated position of the
    /// element originally at `at`.
    fn insert_corners(
        &self,
        i: usize,
        mut e0: u8,
        e1: u8,
        out: &mut Vec<Point2<F>>,
        mut at: usize,
    ) -> usize {
        while e0 != e1 {
            let corner = match e0 {
                0b0101 => {
                    // bottom-left corner code: continue along the bottom
                    e0 = BOTTOM;
                    continue;
                }
                0b0100 => {
                    e0 = BOTTOM | RIGHT;
                    Point2::new(self.bounds.max.x, self.bounds.min.y)
                }
                0b0110 => {
                    e0 = RIGHT;
                    continue;
                }
                0b0010 => {
                    e0 = RIGHT | TOP;
                    self.bounds.max
                }
                0b1010 => {
                    e0 = TOP;
                    continue;
                }
                0b1000 => {
                    e0 = TOP | LEFT;
                    Point2::new(self.bounds.min.x, self.bounds.max.y)
                }
                0b1001 => {
                    e0 = LEFT;
                    continue;
                }
                0b0001 => {
                    e0 = LEFT | BOTTOM;
                    self.bounds.min
                }
                _ => break,
            };
            if (at >= out.len() || out[at] != corner) && self.cell_contains(i, corner) {
                out.insert(at, corner);
                at += 1;
            }
        }
        at
    }

    /// True when `p` belongs to cell `i`: no neighbor site is strictly
    /// closer to `p` than site `i` itself.
    fn cell_contains(&self, i: usize, p: Point2<F>) -> bool {
        let d = p.distance_squared(self.sites[i]);
        self.neighbors(i)
            .into_iter()
            .all(|u| p.distance_squared(self.sites[u]) >= d)
    }

    /// Strict outside codes: which rectangle half-planes exclude `p`.
    fn region_code(&self, p: Point2<F>) -> u8 {
        let mut code = 0;
        if p.x < self.bounds.min.x {
            code |= LEFT;
        } else if p.x > self.bounds.max.x {
            code |= RIGHT;
        }
        if p.y < self.bounds.min.y {
            code |= BOTTOM;
        } else if p.y > self.bounds.max.y {
            code |= TOP;
        }
        code
    }

    /// Boundary codes: which rectangle edges `p` lies exactly on.
    fn edge_code(&self, p: Point2<F>) -> u8 {
        let mut code = 0;
        if p.x == self.bounds.min.x {
            code |= LEFT;
        } else if p.x == self.bounds.max.x {
            code |= RIGHT;
        }
        if p.y == self.bounds.min.y {
            code |= BOTTOM;
        } else if p.y == self.bounds.max.y {
            code |= TOP;
        }
        code
    }
}

/// Collapses runs of vertices sharing an x or y coordinate (artifacts of
/// clipping along a rectangle edge) and duplicate vertices. Rings of one or
/// two vertices pass through untouched.
pub(super) fn simplify<F: Float>(mut pts: Vec<Point2<F>>) -> Vec<Point2<F>> {
    if pts.len() > 2 {
        let mut i = 0;
        while i < pts.len() {
            let n = pts.len();
            let j = (i + 1) % n;
            let k = (i + 2) % n;
            let (a, b, c) = (pts[i], pts[j], pts[k]);
            if (a.x == b.x && b.x == c.x) || (a.y == b.y && b.y == c.y) {
                pts.remove(j);
                if j < i {
                    i -= 1;
                }
                // Re-test the same position after the removal.
            } else {
                i += 1;
            }
        }
    }
    pts
}
