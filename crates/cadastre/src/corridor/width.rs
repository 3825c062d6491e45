//! Cross-section width sampling along the corridor's major axis.

use nalgebra::Vector2;

use crate::geom::{segment_segment_intersection, GeomCfg, Polygon};

use super::{principal_axes, PrincipalAxes};

/// Width-measurement configuration.
#[derive(Clone, Copy, Debug)]
pub struct WidthCfg {
    /// Number of probe stations strictly between the corridor ends.
    pub samples: usize,
    /// Absolute spread tolerance before a corridor counts as variable-width.
    pub abs_tol: f64,
    /// Relative spread tolerance (fraction of the median width).
    pub rel_tol: f64,
}

impl Default for WidthCfg {
    fn default() -> Self {
        Self {
            samples: 7,
            abs_tol: 0.1,
            rel_tol: 0.05,
        }
    }
}

/// Width measurement over the surviving cross-section samples.
#[derive(Clone, Copy, Debug)]
pub struct WidthMeasurement {
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Spread exceeded `max(abs_tol, median * rel_tol)`.
    pub variable: bool,
    /// False when zero samples survived and the oriented-bounding width was
    /// substituted.
    pub used_samples: bool,
}

/// Measure the width of an elongated corridor polygon.
///
/// Probes the corridor perpendicular to its major axis at `cfg.samples`
/// evenly spaced interior stations and reduces the surviving local widths to
/// median/min/max. `None` only for rings with fewer than 3 vertices; every
/// other degeneracy takes a documented fallback.
pub fn measure_width(
    poly: &Polygon,
    cfg: &WidthCfg,
    gcfg: &GeomCfg,
) -> Option<WidthMeasurement> {
    if poly.len() < 3 {
        return None;
    }
    let axes = principal_axes(poly.verts()).unwrap_or_else(|| {
        tracing::debug!("isotropic vertex cloud; using world-aligned axes");
        PrincipalAxes::world_aligned(poly.interior_point(gcfg))
    });

    // Projected ranges along (major, minor); non-finite projections reset the
    // affected range to zero rather than poisoning every sample downstream.
    let mut t_range = ProjRange::default();
    let mut s_range = ProjRange::default();
    for &v in poly.verts() {
        let (t, s) = axes.project(v);
        t_range.extend(t);
        s_range.extend(s);
    }
    let (min_t, max_t) = t_range.get();
    let (min_s, max_s) = s_range.get();
    let span_t = max_t - min_t;
    let span_s = max_s - min_s;
    let mid_s = 0.5 * (min_s + max_s);
    let probe_len = (4.0 * span_t.max(span_s)).max(10.0);

    let n = cfg.samples;
    let mut widths: Vec<f64> = Vec::with_capacity(n);
    for i in 1..=n {
        // Fractions strictly between 0 and 1; both corridor ends are skipped.
        let frac = i as f64 / (n + 1) as f64;
        let t = min_t + frac * span_t;
        let center = axes.origin + axes.major * t + axes.minor * mid_s;
        let a = center - axes.minor * (probe_len * 0.5);
        let b = center + axes.minor * (probe_len * 0.5);
        if let Some(w) = sample_width(poly, a, b, center, axes.minor, gcfg) {
            widths.push(w);
        }
    }

    if widths.is_empty() {
        tracing::debug!("no cross-section samples survived; using minor-range width");
        let w = span_s.abs();
        return Some(WidthMeasurement {
            median: w,
            min: w,
            max: w,
            variable: false,
            used_samples: false,
        });
    }

    widths.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let median = median_of_sorted(&widths);
    let min = widths[0];
    let max = widths[widths.len() - 1];
    let variable = (max - min) > cfg.abs_tol.max(median * cfg.rel_tol);
    Some(WidthMeasurement {
        median,
        min,
        max,
        variable,
        used_samples: true,
    })
}

/// Snap a measured width to the nearest acceptable value within `tol`.
///
/// Ties go to the first minimal-distance candidate in input order; a width
/// with no acceptable value in range passes through unchanged.
pub fn snap_to_acceptable(width: f64, acceptable: &[f64], tol: f64) -> f64 {
    let mut best: Option<(f64, f64)> = None;
    for &cand in acceptable {
        let d = (cand - width).abs();
        if best.map_or(true, |(bd, _)| d < bd) {
            best = Some((d, cand));
        }
    }
    match best {
        Some((d, cand)) if d <= tol => cand,
        _ => width,
    }
}

/// One cross-section: intersect the probe with the ring, dedup, and take the
/// projected spread. Fewer than two surviving points discards the sample.
fn sample_width(
    poly: &Polygon,
    a: Vector2<f64>,
    b: Vector2<f64>,
    center: Vector2<f64>,
    dir: Vector2<f64>,
    gcfg: &GeomCfg,
) -> Option<f64> {
    let mut hits: Vec<Vector2<f64>> = Vec::new();
    for (p, q) in poly.edges() {
        if let Some(x) = segment_segment_intersection(a, b, p, q, gcfg) {
            if !hits.iter().any(|h| (h - x).norm() < gcfg.eps_dedup) {
                hits.push(x);
            }
        }
    }
    if hits.len() < 2 {
        return None;
    }
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for h in &hits {
        let d = (h - center).dot(&dir);
        lo = lo.min(d);
        hi = hi.max(d);
    }
    Some(hi - lo)
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        0.5 * (sorted[n / 2 - 1] + sorted[n / 2])
    }
}

/// Running [min, max] with a finiteness guard: a non-finite projection resets
/// the range to zero instead of propagating NaN/∞.
#[derive(Clone, Copy, Debug, Default)]
struct ProjRange {
    range: Option<(f64, f64)>,
    poisoned: bool,
}

impl ProjRange {
    fn extend(&mut self, v: f64) {
        if !v.is_finite() {
            self.poisoned = true;
            return;
        }
        self.range = Some(match self.range {
            None => (v, v),
            Some((lo, hi)) => (lo.min(v), hi.max(v)),
        });
    }

    fn get(self) -> (f64, f64) {
        if self.poisoned {
            return (0.0, 0.0);
        }
        self.range.unwrap_or((0.0, 0.0))
    }
}
