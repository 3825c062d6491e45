//! Corridor width measurement (2D PCA + perpendicular cross-sections).
//!
//! Purpose
//! - Classify and measure elongated right-of-way polygons (pipelines, road
//!   allowances): extract the dominant axis of the vertex cloud, probe the
//!   corridor perpendicular to it at evenly spaced stations, and reduce the
//!   surviving cross-sections to a `WidthMeasurement`.
//!
//! Degeneracy policy
//! - Near-isotropic vertex clouds have no meaningful major axis; extraction
//!   returns `None` and measurement substitutes world-aligned axes through a
//!   safe interior point. Zero surviving probe samples degrade to the
//!   oriented-bounding width with `used_samples = false`.

mod width;

pub use width::{measure_width, snap_to_acceptable, WidthCfg, WidthMeasurement};

use nalgebra::Vector2;

/// Origin plus orthonormal (major, minor) directions of a point cloud.
#[derive(Clone, Copy, Debug)]
pub struct PrincipalAxes {
    pub origin: Vector2<f64>,
    pub major: Vector2<f64>,
    pub minor: Vector2<f64>,
}

impl PrincipalAxes {
    /// World-aligned axes through `origin` (the degenerate-cloud fallback).
    pub fn world_aligned(origin: Vector2<f64>) -> Self {
        Self {
            origin,
            major: Vector2::new(1.0, 0.0),
            minor: Vector2::new(0.0, 1.0),
        }
    }

    /// Projection of `p` onto (major, minor) relative to the origin.
    #[inline]
    pub fn project(&self, p: Vector2<f64>) -> (f64, f64) {
        let d = p - self.origin;
        (d.dot(&self.major), d.dot(&self.minor))
    }
}

/// Principal axes of a 2D point cloud via covariance diagonalization.
///
/// Major-axis angle is `0.5 * atan2(2*sxy, sxx - syy)`. Returns `None` when
/// the covariance is numerically isotropic (`|sxy|` and `|sxx - syy|` both
/// below 1e-9) or the cloud has fewer than 2 points; callers substitute
/// `PrincipalAxes::world_aligned`.
pub fn principal_axes(points: &[Vector2<f64>]) -> Option<PrincipalAxes> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let mean: Vector2<f64> = points.iter().copied().sum::<Vector2<f64>>() / n;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for p in points {
        let d = p - mean;
        sxx += d.x * d.x;
        syy += d.y * d.y;
        sxy += d.x * d.y;
    }
    sxx /= n;
    syy /= n;
    sxy /= n;
    if sxy.abs() < 1e-9 && (sxx - syy).abs() < 1e-9 {
        return None;
    }
    let theta = 0.5 * (2.0 * sxy).atan2(sxx - syy);
    let major = Vector2::new(theta.cos(), theta.sin());
    let minor = Vector2::new(-theta.sin(), theta.cos());
    Some(PrincipalAxes {
        origin: mean,
        major,
        minor,
    })
}
