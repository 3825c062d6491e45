//! Cardinal anchor selection on a section ring.

use nalgebra::Vector2;

use crate::geom::Polygon;

use super::edges::{build_edges, partition_chains, Chain, DirectedEdge, EdgeClass};

/// Reference edge qualifies as near-horizontal within 12 degrees of the X axis.
const HORIZONTAL_COS: f64 = 0.97814760073; // cos(12°)

/// Anchor-midpoint deviation beyond this fraction of a span triggers the
/// synthesized-extents fallback.
const SANITY_FRAC: f64 = 0.25;

/// The four cardinal anchor points of a section ring.
///
/// Anchors are points on the ring (vertices or edge midpoints) unless
/// `synthesized` is set, in which case the chain-derived anchors failed the
/// mid-span sanity check and exact extents mid-span points were substituted.
#[derive(Clone, Copy, Debug)]
pub struct QuarterAnchors {
    pub top: Vector2<f64>,
    pub bottom: Vector2<f64>,
    pub left: Vector2<f64>,
    pub right: Vector2<f64>,
    pub synthesized: bool,
}

/// Detect the four cardinal anchors of a section ring.
///
/// `None` only for rings with fewer than 3 usable edges; every other
/// degeneracy resolves through the chain fallbacks or the synthesized-extents
/// substitution, so detection always terminates with four points.
pub fn quarter_anchors(poly: &Polygon) -> Option<QuarterAnchors> {
    let edges = build_edges(poly);
    if edges.len() < 3 {
        return None;
    }

    let (east, north) = local_axes(&edges);

    // Extents and band tolerance in the local frame.
    let mut min_e = f64::INFINITY;
    let mut max_e = f64::NEG_INFINITY;
    let mut min_n = f64::INFINITY;
    let mut max_n = f64::NEG_INFINITY;
    for &v in poly.verts() {
        let e = v.dot(&east);
        let n = v.dot(&north);
        min_e = min_e.min(e);
        max_e = max_e.max(e);
        min_n = min_n.min(n);
        max_n = max_n.max(n);
    }
    let span_e = max_e - min_e;
    let span_n = max_n - min_n;
    let band = (0.01 * span_e.max(span_n)).max(5.0);
    let mid_e = 0.5 * (min_e + max_e);
    let mid_n = 0.5 * (min_n + max_n);

    let chains = partition_chains(&edges, east, north);

    let top = select_anchor(
        &chains, &edges, EdgeClass::EastWest, north, max_n, band, true, east, mid_e,
    );
    let bottom = select_anchor(
        &chains, &edges, EdgeClass::EastWest, north, min_n, band, false, east, mid_e,
    );
    let right = select_anchor(
        &chains, &edges, EdgeClass::NorthSouth, east, max_e, band, true, north, mid_n,
    );
    let left = select_anchor(
        &chains, &edges, EdgeClass::NorthSouth, east, min_e, band, false, north, mid_n,
    );

    let (top, bottom, left, right, synthesized) = match (top, bottom, left, right) {
        (Some(t), Some(b), Some(l), Some(r)) => {
            let mid = (t + b + l + r) * 0.25;
            let dev_e = (mid.dot(&east) - mid_e).abs();
            let dev_n = (mid.dot(&north) - mid_n).abs();
            if dev_e > SANITY_FRAC * span_e || dev_n > SANITY_FRAC * span_n {
                tracing::debug!(
                    dev_e,
                    dev_n,
                    "chain anchors off mid-span; substituting extents anchors"
                );
                synthesized_anchors(east, north, min_e, max_e, min_n, max_n)
            } else {
                (t, b, l, r, false)
            }
        }
        // A cardinal direction with no chain at all (e.g. a triangle with no
        // north-south edges) goes straight to the extents fallback.
        _ => synthesized_anchors(east, north, min_e, max_e, min_n, max_n),
    };

    Some(QuarterAnchors {
        top,
        bottom,
        left,
        right,
        synthesized,
    })
}

/// Local frame from the reference top edge.
///
/// The near-horizontal edge (within 12° of the X axis) with the highest mean
/// endpoint Y wins; a ring with no near-horizontal edge falls back to its
/// single longest edge. `east` is canonicalized into the +X half-plane and
/// `north` is `east` rotated 90° CCW (flipped upward if needed).
fn local_axes(edges: &[DirectedEdge]) -> (Vector2<f64>, Vector2<f64>) {
    let reference = edges
        .iter()
        .filter(|e| e.dir.x.abs() >= HORIZONTAL_COS)
        .max_by(|a, b| {
            let ya = a.start.y + a.end.y;
            let yb = b.start.y + b.end.y;
            ya.partial_cmp(&yb).unwrap_or(std::cmp::Ordering::Equal)
        })
        .or_else(|| {
            edges.iter().max_by(|a, b| {
                a.len.partial_cmp(&b.len).unwrap_or(std::cmp::Ordering::Equal)
            })
        });
    let dir = reference.map(|e| e.dir).unwrap_or_else(|| Vector2::new(1.0, 0.0));
    let east = if dir.x < 0.0 { -dir } else { dir };
    let mut north = Vector2::new(-east.y, east.x);
    if north.y < 0.0 {
        north = -north;
    }
    (east, north)
}

/// Pick the anchor vertex for one cardinal direction.
///
/// Chain choice: chains of the right class whose member vertices come within
/// `band` of the extreme value, ranked by score; no band contact falls back
/// to the most extreme score. Within the chain, the ring point (endpoint or
/// edge midpoint) whose cross-axis projection is nearest the mid-span target
/// wins.
#[allow(clippy::too_many_arguments)]
fn select_anchor(
    chains: &[Chain],
    edges: &[DirectedEdge],
    class: EdgeClass,
    axis: Vector2<f64>,
    extreme: f64,
    band: f64,
    toward_max: bool,
    cross_axis: Vector2<f64>,
    target: f64,
) -> Option<Vector2<f64>> {
    let touches_band = |c: &Chain| {
        c.edges.iter().any(|&i| {
            let e = &edges[i];
            (e.start.dot(&axis) - extreme).abs() <= band
                || (e.end.dot(&axis) - extreme).abs() <= band
        })
    };
    let rank = |c: &Chain| if toward_max { c.score } else { -c.score };

    // Prefer the best-ranked chain touching the band; no band contact falls
    // back to the most extreme score overall.
    let mut banded: Option<&Chain> = None;
    let mut extreme_chain: Option<&Chain> = None;
    for c in chains.iter().filter(|c| c.class == class) {
        if extreme_chain.map_or(true, |b| rank(c) > rank(b)) {
            extreme_chain = Some(c);
        }
        if touches_band(c) && banded.map_or(true, |b| rank(c) > rank(b)) {
            banded = Some(c);
        }
    }
    let chain = banded.or(extreme_chain)?;

    // Existing ring point nearest the cross-axis mid-span: member-edge
    // endpoints plus their precomputed midpoints (the midpoint wins on a long
    // straight side whose corners sit far from mid-span). Nothing off the
    // ring is produced at this stage.
    let mut best: Option<(f64, Vector2<f64>)> = None;
    for &i in &chain.edges {
        for v in [edges[i].start, edges[i].mid, edges[i].end] {
            let d = (v.dot(&cross_axis) - target).abs();
            if best.map_or(true, |(bd, _)| d < bd) {
                best = Some((d, v));
            }
        }
    }
    best.map(|(_, v)| v)
}

/// Deterministic extents fallback: exact mid-span/extreme combinations in the
/// local frame, mapped back to world coordinates.
fn synthesized_anchors(
    east: Vector2<f64>,
    north: Vector2<f64>,
    min_e: f64,
    max_e: f64,
    min_n: f64,
    max_n: f64,
) -> (Vector2<f64>, Vector2<f64>, Vector2<f64>, Vector2<f64>, bool) {
    let mid_e = 0.5 * (min_e + max_e);
    let mid_n = 0.5 * (min_n + max_n);
    let at = |e: f64, n: f64| east * e + north * n;
    (
        at(mid_e, max_n),
        at(mid_e, min_n),
        at(min_e, mid_n),
        at(max_e, mid_n),
        true,
    )
}
