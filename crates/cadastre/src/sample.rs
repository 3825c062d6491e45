//! Deterministic random fixture polygons (jitter + replay tokens).
//!
//! Purpose
//! - Provide reproducible corridor and section rings for tests and benches.
//!   Each draw is fully determined by a `ReplayToken` (seed, index), so a
//!   failing case can be replayed by token alone.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geom::Polygon;

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Corridor fixture configuration.
#[derive(Clone, Copy, Debug)]
pub struct CorridorCfg {
    /// Nominal corridor width.
    pub width: f64,
    /// Centerline length.
    pub length: f64,
    /// Vertices per side.
    pub stations: usize,
    /// Relative width jitter per station (0 = perfectly uniform sides).
    pub width_jitter: f64,
    /// Corridor rotation angle in radians.
    pub angle: f64,
}

impl Default for CorridorCfg {
    fn default() -> Self {
        Self {
            width: 20.0,
            length: 200.0,
            stations: 8,
            width_jitter: 0.0,
            angle: 0.0,
        }
    }
}

/// Draw an elongated corridor ring: two roughly parallel sides at
/// `±width/2` around a straight centerline, with optional per-station width
/// jitter, rotated by `angle`.
pub fn draw_corridor(cfg: CorridorCfg, tok: ReplayToken) -> Polygon {
    let mut rng = tok.to_std_rng();
    let n = cfg.stations.max(2);
    let half = cfg.width * 0.5;
    let rot = |p: Vector2<f64>| {
        Vector2::new(
            p.x * cfg.angle.cos() - p.y * cfg.angle.sin(),
            p.x * cfg.angle.sin() + p.y * cfg.angle.cos(),
        )
    };
    let mut verts: Vec<Vector2<f64>> = Vec::with_capacity(2 * n);
    let mut upper: Vec<Vector2<f64>> = Vec::with_capacity(n);
    for i in 0..n {
        let x = cfg.length * i as f64 / (n - 1) as f64;
        let j_lo = 1.0 + (rng.gen::<f64>() * 2.0 - 1.0) * cfg.width_jitter;
        let j_hi = 1.0 + (rng.gen::<f64>() * 2.0 - 1.0) * cfg.width_jitter;
        verts.push(rot(Vector2::new(x, -half * j_lo)));
        upper.push(rot(Vector2::new(x, half * j_hi)));
    }
    verts.extend(upper.into_iter().rev());
    Polygon::new(verts)
}

/// Section fixture configuration.
#[derive(Clone, Copy, Debug)]
pub struct SectionCfg {
    /// Nominal side length.
    pub size: f64,
    /// Extra vertices per side (0 = plain rectangle).
    pub side_verts: usize,
    /// Absolute vertex jitter.
    pub jitter: f64,
}

impl Default for SectionCfg {
    fn default() -> Self {
        Self {
            size: 800.0,
            side_verts: 3,
            jitter: 4.0,
        }
    }
}

/// Draw an irregular roughly square section ring: a rectangle with extra
/// vertices along each side, each perturbed by bounded jitter.
pub fn draw_section(cfg: SectionCfg, tok: ReplayToken) -> Polygon {
    let mut rng = tok.to_std_rng();
    let s = cfg.size;
    let corners = [
        Vector2::new(0.0, 0.0),
        Vector2::new(s, 0.0),
        Vector2::new(s, s),
        Vector2::new(0.0, s),
    ];
    let mut verts: Vec<Vector2<f64>> = Vec::new();
    for k in 0..4 {
        let a = corners[k];
        let b = corners[(k + 1) % 4];
        let steps = cfg.side_verts + 1;
        for i in 0..steps {
            let t = i as f64 / steps as f64;
            let base = a + (b - a) * t;
            let jx = (rng.gen::<f64>() * 2.0 - 1.0) * cfg.jitter;
            let jy = (rng.gen::<f64>() * 2.0 - 1.0) * cfg.jitter;
            verts.push(base + Vector2::new(jx, jy));
        }
    }
    Polygon::new(verts)
}

/// Draw a random convex polygon by sorting points on a jittered circle.
/// Used by property tests as a generic convex subject.
pub fn draw_convex(n: usize, radius: f64, tok: ReplayToken) -> Polygon {
    let mut rng = tok.to_std_rng();
    let n = n.max(3);
    let mut angles: Vec<f64> = (0..n)
        .map(|_| rng.gen::<f64>() * std::f64::consts::TAU)
        .collect();
    angles.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    angles.dedup_by(|a, b| (*a - *b).abs() < 1e-6);
    while angles.len() < 3 {
        angles.push(angles.last().copied().unwrap_or(0.0) + 0.5);
    }
    let verts = angles
        .into_iter()
        .map(|th| Vector2::new(th.cos(), th.sin()) * radius)
        .collect();
    Polygon::new(verts)
}
