//! Best-effort polygon Boolean intersection behind a strategy seam.
//!
//! Why a trait
//! - The original drafting pipeline tried a native region/solid-modeling
//!   library first and degraded to a clipping approximation when region
//!   construction failed. The seam keeps that try/fallback shape: callers
//!   depend on `Intersect`, and `intersect_polygons` wires the default chain.
//!
//! Failure contract
//! - A strategy returns an empty list when it cannot produce a valid (>= 3
//!   vertex) region. Callers always carry their own fallback path.

use super::clip::{clip_half_plane, Side};
use super::polygon::Polygon;
use super::types::GeomCfg;

/// Polygon-intersection strategy.
pub trait Intersect {
    /// Regions of `subject ∩ clip`; empty on failure or empty intersection.
    fn intersect(&self, subject: &Polygon, clip: &Polygon, cfg: &GeomCfg) -> Vec<Polygon>;
}

/// Successive half-plane clipping by the clip ring's edges.
///
/// Exact for convex clip polygons; best effort (may over-cover reflex
/// notches) for non-convex ones, which the drafting use cases tolerate.
#[derive(Clone, Copy, Debug, Default)]
pub struct EdgeClip;

impl Intersect for EdgeClip {
    fn intersect(&self, subject: &Polygon, clip: &Polygon, cfg: &GeomCfg) -> Vec<Polygon> {
        if subject.len() < 3 || clip.len() < 3 {
            return Vec::new();
        }
        // Interior of the clip ring is to the left of travel for CCW winding.
        let side = if clip.signed_area() >= 0.0 {
            Side::Left
        } else {
            Side::Right
        };
        let mut acc = subject.clone();
        for (a, b) in clip.edges() {
            acc = clip_half_plane(&acc, a, b, side, cfg);
            if acc.len() < 3 {
                return Vec::new();
            }
        }
        vec![acc]
    }
}

/// Clip the subject to the clip polygon's bounding box.
///
/// The coarse approximation fallback: cheap, always constructible, and an
/// over-estimate of the true region. Target-selection callers re-check
/// containment of anything derived from it.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExtentsClip;

impl Intersect for ExtentsClip {
    fn intersect(&self, subject: &Polygon, clip: &Polygon, cfg: &GeomCfg) -> Vec<Polygon> {
        if subject.len() < 3 {
            return Vec::new();
        }
        let Some(bb) = clip.aabb() else {
            return Vec::new();
        };
        let corners = bb.corners();
        let mut acc = subject.clone();
        for i in 0..4 {
            let a = corners[i];
            let b = corners[(i + 1) % 4];
            acc = clip_half_plane(&acc, a, b, Side::Left, cfg);
            if acc.len() < 3 {
                return Vec::new();
            }
        }
        vec![acc]
    }
}

/// Default intersection chain: edge clipping first, extents clipping second.
///
/// Returns an empty list when both strategies fail; the caller's own fallback
/// chain (e.g. label target selection) takes over from there.
pub fn intersect_polygons(subject: &Polygon, clip: &Polygon, cfg: &GeomCfg) -> Vec<Polygon> {
    let primary = EdgeClip.intersect(subject, clip, cfg);
    if !primary.is_empty() {
        return primary;
    }
    tracing::debug!("edge-clip intersection failed; trying extents fallback");
    ExtentsClip.intersect(subject, clip, cfg)
}
