//! Basic 2D types and tolerances.
//!
//! - `GeomCfg`: centralizes epsilons for boundary inclusion, parallel-line
//!   skips, and intersection dedup.
//! - `Aabb`: axis-aligned box used only as a fast-reject pre-filter; overlap
//!   is inclusive on every boundary (touching counts).

use nalgebra::Vector2;

/// Geometry configuration (tolerances).
///
/// One value is threaded through all predicates so the boundary-inclusion
/// behavior of containment, clipping, and dedup stays consistent across
/// components.
#[derive(Clone, Copy, Debug)]
pub struct GeomCfg {
    /// Absolute slack on point-on-boundary and clip side tests.
    pub eps_boundary: f64,
    /// Cross-product threshold below which two directions count as parallel.
    pub eps_parallel: f64,
    /// Distance below which probe intersection points coalesce.
    pub eps_dedup: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_boundary: 1e-9,
            eps_parallel: 1e-9,
            eps_dedup: 1e-6,
        }
    }
}

/// Axis-aligned bounding box in 2D.
///
/// Invariants (by construction via `from_points`): `min.x <= max.x` and
/// `min.y <= max.y`. This is a pre-filter type only; it never substitutes for
/// true polygon intersection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vector2<f64>,
    pub max: Vector2<f64>,
}

impl Aabb {
    /// Tight box over a point set. `None` for an empty set.
    pub fn from_points(points: &[Vector2<f64>]) -> Option<Self> {
        let first = *points.first()?;
        let mut min = first;
        let mut max = first;
        for p in &points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some(Self { min, max })
    }

    /// Box centered at `center` with the given full extents.
    pub fn centered(center: Vector2<f64>, size: Vector2<f64>) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Inclusive overlap: boxes that merely touch count as overlapping.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    /// Inclusive point membership.
    #[inline]
    pub fn contains(&self, p: Vector2<f64>) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    #[inline]
    pub fn center(&self) -> Vector2<f64> {
        (self.min + self.max) * 0.5
    }

    /// Overlap region of two boxes, if any (inclusive, may be zero-width).
    pub fn intersection(&self, other: &Aabb) -> Option<Aabb> {
        let min = Vector2::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y));
        let max = Vector2::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y));
        if min.x <= max.x && min.y <= max.y {
            Some(Aabb { min, max })
        } else {
            None
        }
    }

    /// Corner ring in CCW order, usable as a polygon ring.
    pub fn corners(&self) -> [Vector2<f64>; 4] {
        [
            self.min,
            Vector2::new(self.max.x, self.min.y),
            self.max,
            Vector2::new(self.min.x, self.max.y),
        ]
    }
}
