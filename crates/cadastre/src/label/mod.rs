//! Overlap-avoiding label placement with deterministic spiral search.
//!
//! Purpose
//! - Place one text label per disposition polygon inside its containing
//!   quarter without colliding with labels already placed in the same run,
//!   degrading gracefully: spiral outward from a derived target point, force
//!   the last candidate when configured, and fall back to the caller's safe
//!   point when candidate generation yields nothing.
//!
//! Ordering contract
//! - Placement is strictly sequential: each accepted extent joins the run's
//!   accumulator before the next request is evaluated, so results are
//!   deterministic given input order. Parallelizing across independent
//!   containers requires one `PlacementRun` per container.

mod place;
mod spiral;

pub use place::{LabelRequest, Placement, PlacementCfg, PlacementRun, RunCounters};
pub use spiral::Spiral;

#[cfg(test)]
mod tests;
