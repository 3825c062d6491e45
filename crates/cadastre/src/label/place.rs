//! Per-disposition placement: target derivation, overlap search, leaders.

use nalgebra::Vector2;

use crate::geom::{intersect_polygons, Aabb, GeomCfg, Polygon};

use super::spiral::Spiral;

/// Placement configuration.
#[derive(Clone, Copy, Debug)]
pub struct PlacementCfg {
    /// Spiral step; conventionally the label text height.
    pub step: f64,
    /// Total candidate budget per request (spiral cap).
    pub max_attempts: usize,
    /// Use the last attempted candidate when every candidate overlaps.
    pub force_on_overlap: bool,
    /// Derive the target from the subject/container intersection centroid.
    pub use_intersection_target: bool,
    /// Leader start marker radius; `0` draws leaders from the target itself.
    pub marker_radius: f64,
    pub geom: GeomCfg,
}

impl Default for PlacementCfg {
    fn default() -> Self {
        Self {
            step: 2.5,
            max_attempts: 49, // target + 6 full rings
            force_on_overlap: true,
            use_intersection_target: true,
            marker_radius: 0.0,
            geom: GeomCfg::default(),
        }
    }
}

/// One placement request: a disposition inside its containing quarter.
///
/// All geometry is borrowed for the duration of the call; the engine retains
/// nothing beyond the accepted extent box.
#[derive(Clone, Copy, Debug)]
pub struct LabelRequest<'a> {
    pub subject: &'a Polygon,
    pub container: &'a Polygon,
    /// Caller-supplied safe point, the unconditional last resort.
    pub fallback: Vector2<f64>,
    /// Full label extents (width, height) used for overlap boxes.
    pub size: Vector2<f64>,
    /// Draw a leader from the target to the label point.
    pub needs_leader: bool,
    /// The subject may legitimately extend outside the container (e.g.
    /// width-required corridor categories); candidates inside the container
    /// but outside the subject are then preferred.
    pub prefer_outside_subject: bool,
}

/// Placement outcome for one request.
#[derive(Clone, Copy, Debug)]
pub struct Placement {
    pub point: Vector2<f64>,
    /// False only when forcing is disabled and every candidate overlapped.
    pub placed: bool,
    /// Placed despite a detected overlap (attempt budget exhausted).
    pub forced: bool,
    /// Leader endpoints (start, end), trimmed at the marker edge.
    pub leader: Option<(Vector2<f64>, Vector2<f64>)>,
}

/// Run-scoped statistics, reset by constructing a new `PlacementRun`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunCounters {
    /// Labels placed (including forced and direct-fallback placements).
    pub placed: usize,
    /// Placements forced through a detected overlap.
    pub forced: usize,
    /// Dispositions observed to span more than one quarter.
    pub multi_quarter: usize,
    /// Dispositions the host dropped before placement (no attribute mapping).
    pub skipped_no_mapping: usize,
    /// Subjects with no overlap-free candidate while forcing was disabled.
    pub skipped_overlap: usize,
}

/// One sequential placement run over a container's dispositions.
///
/// Owns the only mutable state of the engine: the accumulated extent boxes of
/// accepted labels, against which later requests are overlap-tested.
#[derive(Clone, Debug)]
pub struct PlacementRun {
    cfg: PlacementCfg,
    placed_extents: Vec<Aabb>,
    counters: RunCounters,
}

impl PlacementRun {
    pub fn new(cfg: PlacementCfg) -> Self {
        Self {
            cfg,
            placed_extents: Vec::new(),
            counters: RunCounters::default(),
        }
    }

    #[inline]
    pub fn counters(&self) -> RunCounters {
        self.counters
    }

    /// Extent boxes accepted so far, in placement order.
    #[inline]
    pub fn placed_extents(&self) -> &[Aabb] {
        &self.placed_extents
    }

    /// The host observed a disposition spanning several quarters.
    pub fn record_multi_quarter(&mut self) {
        self.counters.multi_quarter += 1;
    }

    /// The host dropped a disposition before placement (no mapping).
    pub fn record_skipped(&mut self) {
        self.counters.skipped_no_mapping += 1;
    }

    /// Place one label; the accepted extent immediately joins the run's
    /// accumulator, so request order decides which later labels get forced.
    pub fn place(&mut self, req: &LabelRequest<'_>) -> Placement {
        let target = self.select_target(req);
        let candidates = self.candidates(req, target);

        if candidates.is_empty() {
            // Container/subject too small or degenerate: the caller's safe
            // point is used directly, without an overlap check.
            tracing::debug!("no spiral candidates; using caller fallback point");
            self.accept(req, req.fallback);
            return self.finish(req, target, req.fallback, true, false);
        }

        let mut last = candidates[0];
        for &cand in &candidates {
            last = cand;
            let extent = Aabb::centered(cand, req.size);
            if !self.placed_extents.iter().any(|e| e.overlaps(&extent)) {
                self.placed_extents.push(extent);
                self.counters.placed += 1;
                return self.finish(req, target, cand, true, false);
            }
        }

        if self.cfg.force_on_overlap {
            tracing::debug!(
                attempts = candidates.len(),
                "no overlap-free candidate; forcing placement"
            );
            self.accept(req, last);
            self.counters.forced += 1;
            return self.finish(req, target, last, true, true);
        }

        tracing::warn!(
            attempts = candidates.len(),
            "no overlap-free candidate and forcing disabled; skipping label"
        );
        self.counters.skipped_overlap += 1;
        Placement {
            point: req.fallback,
            placed: false,
            forced: false,
            leader: None,
        }
    }

    /// Target point chain, first success wins.
    fn select_target(&self, req: &LabelRequest<'_>) -> Vector2<f64> {
        let g = &self.cfg.geom;
        let inside_both = |p: Vector2<f64>| {
            req.subject.contains(p, g) && req.container.contains(p, g)
        };

        if self.cfg.use_intersection_target {
            let pieces = intersect_polygons(req.subject, req.container, g);
            if let Some(c) = largest_centroid(&pieces) {
                if inside_both(c) {
                    return c;
                }
            }
        }
        if inside_both(req.fallback) {
            return req.fallback;
        }
        if let (Some(sb), Some(cb)) = (req.subject.aabb(), req.container.aabb()) {
            if let Some(overlap) = sb.intersection(&cb) {
                let c = overlap.center();
                if inside_both(c) {
                    return c;
                }
            }
        }
        let safe = req.container.interior_point(g);
        if let Some(p) = req.subject.nearest_boundary_point(safe) {
            if req.container.contains(p, g) {
                return p;
            }
        }
        req.fallback
    }

    /// Materialize the candidate sequence for one request.
    ///
    /// Fresh spiral per call. When the subject may extend outside the
    /// container, candidates inside the container but outside the subject are
    /// yielded before candidates inside both; everything else is dropped. The
    /// plain mode keeps the raw spiral order unfiltered.
    fn candidates(&self, req: &LabelRequest<'_>, target: Vector2<f64>) -> Vec<Vector2<f64>> {
        let spiral = Spiral::new(target, self.cfg.step, self.cfg.max_attempts);
        if !req.prefer_outside_subject {
            return spiral.collect();
        }
        let g = &self.cfg.geom;
        let mut outside: Vec<Vector2<f64>> = Vec::new();
        let mut inside: Vec<Vector2<f64>> = Vec::new();
        for p in spiral {
            if !req.container.contains(p, g) {
                continue;
            }
            if req.subject.contains(p, g) {
                inside.push(p);
            } else {
                outside.push(p);
            }
        }
        outside.extend(inside);
        outside
    }

    fn accept(&mut self, req: &LabelRequest<'_>, point: Vector2<f64>) {
        self.placed_extents.push(Aabb::centered(point, req.size));
        self.counters.placed += 1;
    }

    fn finish(
        &self,
        req: &LabelRequest<'_>,
        target: Vector2<f64>,
        point: Vector2<f64>,
        placed: bool,
        forced: bool,
    ) -> Placement {
        let leader = if req.needs_leader {
            leader_geometry(target, point, self.cfg.marker_radius, &self.cfg.geom)
        } else {
            None
        };
        Placement {
            point,
            placed,
            forced,
            leader,
        }
    }
}

/// Leader from the target to the label point, trimmed at the marker circle.
///
/// With a marker radius the connector starts on the circle's edge along the
/// direction to the label point; a label point inside the marker (or on top
/// of the target) collapses the segment and no leader is drawn.
fn leader_geometry(
    target: Vector2<f64>,
    label: Vector2<f64>,
    marker_radius: f64,
    g: &GeomCfg,
) -> Option<(Vector2<f64>, Vector2<f64>)> {
    let d = label - target;
    let len = d.norm();
    if len <= g.eps_boundary {
        return None;
    }
    if marker_radius <= 0.0 {
        return Some((target, label));
    }
    if len <= marker_radius + g.eps_boundary {
        return None;
    }
    let start = target + d * (marker_radius / len);
    Some((start, label))
}

/// Centroid of the largest-area intersection piece, if any.
fn largest_centroid(pieces: &[Polygon]) -> Option<Vector2<f64>> {
    pieces
        .iter()
        .max_by(|a, b| {
            let aa = a.signed_area().abs();
            let ab = b.signed_area().abs();
            aa.partial_cmp(&ab).unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|p| p.centroid())
}
