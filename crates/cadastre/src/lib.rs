//! Cadastral drafting geometry engine.
//!
//! Purpose
//! - Self-contained computational geometry for automated disposition labelling
//!   and quarter-section subdivision on survey drawings. The CAD host owns all
//!   entity/attribute plumbing; this crate only consumes plain vertex rings and
//!   numeric configuration and returns derived points, polygons, and counters.
//!
//! Components (leaf-first)
//! - `geom`: polygon primitives — containment, centroid, boxes, half-plane
//!   clipping, best-effort polygon intersection.
//! - `corridor`: principal-axis extraction (2D PCA) and perpendicular
//!   cross-section width sampling for right-of-way corridors.
//! - `quarter`: cardinal anchor detection on irregular section polygons and
//!   clip-based NW/NE/SW/SE quartering.
//! - `label`: deterministic spiral label placement with overlap avoidance,
//!   forced-placement fallback, and leader-line geometry.
//!
//! Numerics policy
//! - Geometry functions are total: degenerate inputs (too few vertices,
//!   near-zero area or variance, parallel clip lines) take documented
//!   fallbacks instead of panicking. Tolerances are centralized in
//!   `geom::GeomCfg`.

pub mod corridor;
pub mod geom;
pub mod label;
pub mod quarter;
pub mod sample;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Convenience re-export: all point/vector math uses nalgebra's fixed 2-vector.
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::corridor::{
        measure_width, principal_axes, snap_to_acceptable, PrincipalAxes, WidthCfg,
        WidthMeasurement,
    };
    pub use crate::geom::{
        clip_half_plane, intersect_polygons, Aabb, GeomCfg, Polygon, Side,
    };
    pub use crate::label::{
        LabelRequest, Placement, PlacementCfg, PlacementRun, RunCounters, Spiral,
    };
    pub use crate::quarter::{quarter_anchors, quarter_polygon, Quadrant, QuarterAnchors, Quarters};
    pub use nalgebra::Vector2 as Vec2;
}
