//! Vertex-ring polygon and its total primitive operations.

use nalgebra::Vector2;

use super::types::{Aabb, GeomCfg};

/// Closed polygon as an ordered vertex ring (insertion order = ring order).
///
/// The ring is stored open: an explicitly closed input (last vertex repeating
/// the first within tolerance) is normalized on construction. The engine never
/// mutates a polygon in place; every operation returns derived data.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    verts: Vec<Vector2<f64>>,
}

impl Polygon {
    /// Build from a vertex ring, dropping an explicit closing vertex.
    pub fn new(mut verts: Vec<Vector2<f64>>) -> Self {
        if verts.len() >= 2 {
            let first = verts[0];
            let last = verts[verts.len() - 1];
            if (last - first).norm() < 1e-9 {
                verts.pop();
            }
        }
        Self { verts }
    }

    #[inline]
    pub fn verts(&self) -> &[Vector2<f64>] {
        &self.verts
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.verts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.verts.is_empty()
    }

    /// Ring edges as (start, end) pairs, last vertex wrapping to the first.
    pub fn edges(&self) -> impl Iterator<Item = (Vector2<f64>, Vector2<f64>)> + '_ {
        let n = self.verts.len();
        (0..n).map(move |i| (self.verts[i], self.verts[(i + 1) % n]))
    }

    /// Signed shoelace area (positive for CCW winding).
    pub fn signed_area(&self) -> f64 {
        let mut a = 0.0;
        for (p, q) in self.edges() {
            a += p.x * q.y - q.x * p.y;
        }
        0.5 * a
    }

    /// Even-odd ray-casting containment with inclusive boundary.
    ///
    /// Boundary points within `cfg.eps_boundary` of any edge count as inside.
    /// Rings with fewer than 3 vertices contain nothing.
    pub fn contains(&self, p: Vector2<f64>, cfg: &GeomCfg) -> bool {
        if self.verts.len() < 3 {
            return false;
        }
        for (a, b) in self.edges() {
            if point_on_segment(p, a, b, cfg.eps_boundary) {
                return true;
            }
        }
        let mut inside = false;
        for (a, b) in self.edges() {
            // Half-open rule on y avoids double-counting shared vertices.
            if (a.y > p.y) != (b.y > p.y) {
                let t = (p.y - a.y) / (b.y - a.y);
                let x = a.x + t * (b.x - a.x);
                if x > p.x {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Signed-area-weighted centroid; degenerate rings fall back to the first
    /// vertex (empty rings to the origin).
    pub fn centroid(&self) -> Vector2<f64> {
        let Some(&first) = self.verts.first() else {
            return Vector2::zeros();
        };
        if self.verts.len() < 3 {
            return first;
        }
        let mut a = 0.0;
        let mut cx = 0.0;
        let mut cy = 0.0;
        for (p, q) in self.edges() {
            let cross = p.x * q.y - q.x * p.y;
            a += cross;
            cx += (p.x + q.x) * cross;
            cy += (p.y + q.y) * cross;
        }
        a *= 0.5;
        if a.abs() < 1e-12 {
            return first;
        }
        Vector2::new(cx / (6.0 * a), cy / (6.0 * a))
    }

    /// Tight bounding box; `None` for an empty ring.
    pub fn aabb(&self) -> Option<Aabb> {
        Aabb::from_points(&self.verts)
    }

    /// Closest point on the ring boundary to `p`; `None` for an empty ring.
    pub fn nearest_boundary_point(&self, p: Vector2<f64>) -> Option<Vector2<f64>> {
        if self.verts.is_empty() {
            return None;
        }
        if self.verts.len() == 1 {
            return Some(self.verts[0]);
        }
        let mut best = self.verts[0];
        let mut best_d2 = f64::INFINITY;
        for (a, b) in self.edges() {
            let q = project_onto_segment(p, a, b);
            let d2 = (q - p).norm_squared();
            if d2 < best_d2 {
                best_d2 = d2;
                best = q;
            }
        }
        Some(best)
    }

    /// A point safely interior to the ring, best effort.
    ///
    /// Heuristic chain: area centroid if it lands inside; else the midpoint of
    /// the first crossing pair of a horizontal ray at the box mid-height; else
    /// the vertex mean. The last resort may lie outside a strongly non-convex
    /// ring, which callers tolerate (it only seeds fallback axes/targets).
    pub fn interior_point(&self, cfg: &GeomCfg) -> Vector2<f64> {
        let c = self.centroid();
        if self.contains(c, cfg) {
            return c;
        }
        if let Some(bb) = self.aabb() {
            let y = bb.center().y;
            let mut xs: Vec<f64> = Vec::new();
            for (a, b) in self.edges() {
                if (a.y > y) != (b.y > y) {
                    let t = (y - a.y) / (b.y - a.y);
                    xs.push(a.x + t * (b.x - a.x));
                }
            }
            xs.sort_by(|u, v| u.partial_cmp(v).unwrap_or(std::cmp::Ordering::Equal));
            if xs.len() >= 2 {
                let mid = Vector2::new((xs[0] + xs[1]) * 0.5, y);
                if self.contains(mid, cfg) {
                    return mid;
                }
            }
        }
        vertex_mean(&self.verts)
    }
}

fn vertex_mean(verts: &[Vector2<f64>]) -> Vector2<f64> {
    if verts.is_empty() {
        return Vector2::zeros();
    }
    let sum: Vector2<f64> = verts.iter().copied().sum();
    sum / verts.len() as f64
}

/// Is `p` within `eps` of segment `a`→`b`?
pub(crate) fn point_on_segment(p: Vector2<f64>, a: Vector2<f64>, b: Vector2<f64>, eps: f64) -> bool {
    let ab = b - a;
    let ap = p - a;
    let len2 = ab.norm_squared();
    if len2 < eps * eps {
        return ap.norm() <= eps;
    }
    let cross = ab.x * ap.y - ab.y * ap.x;
    if cross.abs() / len2.sqrt() > eps {
        return false;
    }
    let t = ap.dot(&ab) / len2;
    (-eps..=1.0 + eps).contains(&t)
}

fn project_onto_segment(p: Vector2<f64>, a: Vector2<f64>, b: Vector2<f64>) -> Vector2<f64> {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 <= 0.0 {
        return a;
    }
    let t = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
    a + ab * t
}
