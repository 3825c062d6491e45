//! Clip-based quartering along the anchor lines.

use nalgebra::Vector2;

use crate::geom::{clip_half_plane, GeomCfg, Polygon, Side};

use super::anchors::{quarter_anchors, QuarterAnchors};

/// Cardinal quadrant of a section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    Nw,
    Ne,
    Sw,
    Se,
}

/// The four quarter polygons of a section, keyed by quadrant.
#[derive(Clone, Debug)]
pub struct Quarters {
    pub nw: Polygon,
    pub ne: Polygon,
    pub sw: Polygon,
    pub se: Polygon,
    /// True when the clip-based split failed and the axis-aligned box
    /// quartering was substituted.
    pub from_box: bool,
}

impl Quarters {
    /// Quadrant/polygon pairs in fixed NW, NE, SW, SE order.
    pub fn iter(&self) -> impl Iterator<Item = (Quadrant, &Polygon)> {
        [
            (Quadrant::Nw, &self.nw),
            (Quadrant::Ne, &self.ne),
            (Quadrant::Sw, &self.sw),
            (Quadrant::Se, &self.se),
        ]
        .into_iter()
    }

    pub fn get(&self, q: Quadrant) -> &Polygon {
        match q {
            Quadrant::Nw => &self.nw,
            Quadrant::Ne => &self.ne,
            Quadrant::Sw => &self.sw,
            Quadrant::Se => &self.se,
        }
    }
}

/// Split a section ring into NW/NE/SW/SE quarter polygons.
///
/// Builds the north-south clip line through (bottom, top) and the east-west
/// line through (left, right), then clips twice. Fewer than four valid
/// (>= 3 vertex) pieces falls back to axis-aligned box quartering through the
/// box center; a ring degenerate even for that yields the four box
/// rectangles, so the operation is total past anchor detection.
///
/// `None` only when anchor detection itself fails (< 3 usable edges) or the
/// ring has no extent.
pub fn quarter_polygon(poly: &Polygon, cfg: &GeomCfg) -> Option<Quarters> {
    let anchors = quarter_anchors(poly)?;
    if let Some(q) = clip_quarters(poly, &anchors, cfg) {
        return Some(q);
    }
    tracing::debug!("anchor-line quartering degenerate; using box quartering");
    box_quarters(poly, cfg)
}

/// Quartering along the anchor lines; `None` when any piece degenerates.
fn clip_quarters(poly: &Polygon, anchors: &QuarterAnchors, cfg: &GeomCfg) -> Option<Quarters> {
    // Coincident anchors give a zero-length clip line that keeps everything
    // on both sides; treat that as a failed split.
    if (anchors.top - anchors.bottom).norm() < cfg.eps_boundary
        || (anchors.right - anchors.left).norm() < cfg.eps_boundary
    {
        return None;
    }
    // The (bottom -> top) line points roughly north, so its left side is
    // west; the (left -> right) line points roughly east, left side north.
    let west = clip_half_plane(poly, anchors.bottom, anchors.top, Side::Left, cfg);
    let east = clip_half_plane(poly, anchors.bottom, anchors.top, Side::Right, cfg);
    let nw = clip_half_plane(&west, anchors.left, anchors.right, Side::Left, cfg);
    let sw = clip_half_plane(&west, anchors.left, anchors.right, Side::Right, cfg);
    let ne = clip_half_plane(&east, anchors.left, anchors.right, Side::Left, cfg);
    let se = clip_half_plane(&east, anchors.left, anchors.right, Side::Right, cfg);
    if [&nw, &ne, &sw, &se].iter().all(|p| p.len() >= 3) {
        Some(Quarters {
            nw,
            ne,
            sw,
            se,
            from_box: false,
        })
    } else {
        None
    }
}

/// Axis-aligned fallback: clip along the vertical and horizontal lines
/// through the bounding-box center; pieces that still degenerate are replaced
/// by the corresponding box rectangle.
fn box_quarters(poly: &Polygon, cfg: &GeomCfg) -> Option<Quarters> {
    let bb = poly.aabb()?;
    let c = bb.center();
    let v_lo = Vector2::new(c.x, bb.min.y);
    let v_hi = Vector2::new(c.x, bb.max.y);
    let h_lo = Vector2::new(bb.min.x, c.y);
    let h_hi = Vector2::new(bb.max.x, c.y);

    let west = clip_half_plane(poly, v_lo, v_hi, Side::Left, cfg);
    let east = clip_half_plane(poly, v_lo, v_hi, Side::Right, cfg);
    let mut nw = clip_half_plane(&west, h_lo, h_hi, Side::Left, cfg);
    let mut sw = clip_half_plane(&west, h_lo, h_hi, Side::Right, cfg);
    let mut ne = clip_half_plane(&east, h_lo, h_hi, Side::Left, cfg);
    let mut se = clip_half_plane(&east, h_lo, h_hi, Side::Right, cfg);

    let rect = |min: Vector2<f64>, max: Vector2<f64>| {
        Polygon::new(vec![
            min,
            Vector2::new(max.x, min.y),
            max,
            Vector2::new(min.x, max.y),
        ])
    };
    if nw.len() < 3 {
        nw = rect(Vector2::new(bb.min.x, c.y), Vector2::new(c.x, bb.max.y));
    }
    if ne.len() < 3 {
        ne = rect(c, bb.max);
    }
    if sw.len() < 3 {
        sw = rect(bb.min, c);
    }
    if se.len() < 3 {
        se = rect(Vector2::new(c.x, bb.min.y), Vector2::new(bb.max.x, c.y));
    }
    Some(Quarters {
        nw,
        ne,
        sw,
        se,
        from_box: true,
    })
}
