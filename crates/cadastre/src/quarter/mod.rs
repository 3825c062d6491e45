//! Quarter-anchor detection and quartering of section polygons.
//!
//! Purpose
//! - A cadastral section ring is rarely a clean rectangle: edges wobble, the
//!   ring may be rotated, and corners carry extra vertices. This component
//!   finds the four cardinal anchor vertices (top/bottom/left/right of the
//!   section in its own local frame) and splits the ring into NW/NE/SW/SE
//!   quarter polygons along the anchor lines.
//!
//! Approach
//! - Build directed edges, derive a local (east, north) frame from the most
//!   plausible top edge, partition the ring into contiguous edge chains per
//!   axis, and pick the mid-span vertex of the most extreme chain in each
//!   cardinal direction. Anchors are existing vertices except in the
//!   documented extents fallback.

mod anchors;
mod edges;
mod split;

pub use anchors::{quarter_anchors, QuarterAnchors};
pub use edges::{build_edges, partition_chains, Chain, DirectedEdge, EdgeClass};
pub use split::{quarter_polygon, Quadrant, Quarters};
