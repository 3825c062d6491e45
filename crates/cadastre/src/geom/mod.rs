//! Polygon primitives on vertex rings (V-representation).
//!
//! Purpose
//! - Provide the small set of total, eps-aware operations every other
//!   component leans on: even-odd containment, shoelace centroid, inclusive
//!   box overlap, half-plane clipping, and best-effort polygon intersection.
//!
//! Why V-rep
//! - Cadastral inputs arrive as ordered vertex rings from the host and may be
//!   irregular or mildly non-convex; keeping the ring as the single source of
//!   truth avoids lossy conversions and matches what the host consumes back.
//!
//! Numerical tolerances are centralized in `GeomCfg`; boundary predicates are
//! inclusive so that clip seams and touching extents never open gaps.

mod boolean;
mod clip;
mod polygon;
mod types;

pub use boolean::{intersect_polygons, EdgeClip, ExtentsClip, Intersect};
pub use clip::{clip_half_plane, line_segment_intersection, segment_segment_intersection, Side};
pub use polygon::Polygon;
pub use types::{Aabb, GeomCfg};

#[cfg(test)]
mod tests;
