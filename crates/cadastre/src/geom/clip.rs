//! Half-plane clipping against an infinite line (Sutherland–Hodgman).

use nalgebra::Vector2;

use super::polygon::Polygon;
use super::types::GeomCfg;

/// Which side of the directed line `a`→`b` survives a clip.
///
/// The side test is the 2D cross product `cross(b - a, p - a)`: `Left` keeps
/// non-negative values (points to the left of travel), `Right` non-positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    fn keeps(self, signed: f64, eps: f64) -> bool {
        // Points within eps of the line are kept on either side (inclusive
        // boundary; the seam vertex appears in both halves, no gap opens).
        match self {
            Side::Left => signed >= -eps,
            Side::Right => signed <= eps,
        }
    }
}

/// Clip `poly` against the infinite line through `a`→`b`, keeping `side`.
///
/// Standard Sutherland–Hodgman sweep. Near-parallel ring edges emit no
/// intersection vertex (the crossing is numerically meaningless), which can
/// leave the result degenerate; callers re-validate vertex count (>= 3).
pub fn clip_half_plane(
    poly: &Polygon,
    a: Vector2<f64>,
    b: Vector2<f64>,
    side: Side,
    cfg: &GeomCfg,
) -> Polygon {
    let verts = poly.verts();
    if verts.len() < 3 {
        return Polygon::new(Vec::new());
    }
    let dir = b - a;
    let mut out: Vec<Vector2<f64>> = Vec::with_capacity(verts.len() + 2);
    let n = verts.len();
    for i in 0..n {
        let cur = verts[i];
        let next = verts[(i + 1) % n];
        let sc = cross2(dir, cur - a);
        let sn = cross2(dir, next - a);
        let cur_in = side.keeps(sc, cfg.eps_boundary);
        let next_in = side.keeps(sn, cfg.eps_boundary);
        if cur_in {
            push_dedup(&mut out, cur, cfg.eps_boundary);
        }
        if cur_in != next_in {
            if let Some(p) = line_segment_intersection(a, b, cur, next, cfg) {
                push_dedup(&mut out, p, cfg.eps_boundary);
            }
        }
    }
    // The sweep can emit the seam vertex both first and last.
    if out.len() >= 2 && (out[0] - out[out.len() - 1]).norm() < cfg.eps_boundary {
        out.pop();
    }
    Polygon::new(out)
}

/// Intersection of the infinite line `a`→`b` with segment `p`→`q`.
///
/// Parametric 2D line-line solve; `None` when the pair is near-parallel
/// (cross below `cfg.eps_parallel`) or the hit lies outside the segment.
pub fn line_segment_intersection(
    a: Vector2<f64>,
    b: Vector2<f64>,
    p: Vector2<f64>,
    q: Vector2<f64>,
    cfg: &GeomCfg,
) -> Option<Vector2<f64>> {
    let r = b - a;
    let s = q - p;
    let denom = cross2(r, s);
    if denom.abs() < cfg.eps_parallel {
        return None;
    }
    // Solve p + u s = a + t r for u along the segment.
    let u = cross2(r, a - p) / denom;
    if !u.is_finite() || !(-1e-9..=1.0 + 1e-9).contains(&u) {
        return None;
    }
    Some(p + s * u)
}

/// Intersection of the finite segment `a`→`b` with segment `p`→`q`.
pub fn segment_segment_intersection(
    a: Vector2<f64>,
    b: Vector2<f64>,
    p: Vector2<f64>,
    q: Vector2<f64>,
    cfg: &GeomCfg,
) -> Option<Vector2<f64>> {
    let hit = line_segment_intersection(a, b, p, q, cfg)?;
    let r = b - a;
    let len2 = r.norm_squared();
    if len2 <= 0.0 {
        return None;
    }
    let t = (hit - a).dot(&r) / len2;
    if (-1e-9..=1.0 + 1e-9).contains(&t) {
        Some(hit)
    } else {
        None
    }
}

#[inline]
fn cross2(u: Vector2<f64>, v: Vector2<f64>) -> f64 {
    u.x * v.y - u.y * v.x
}

fn push_dedup(out: &mut Vec<Vector2<f64>>, p: Vector2<f64>, eps: f64) {
    if let Some(last) = out.last() {
        if (*last - p).norm() < eps {
            return;
        }
    }
    out.push(p);
}
