use nalgebra::Vector2;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::sample::{draw_convex, ReplayToken};

fn square(side: f64) -> Polygon {
    Polygon::new(vec![
        Vector2::new(0.0, 0.0),
        Vector2::new(side, 0.0),
        Vector2::new(side, side),
        Vector2::new(0.0, side),
    ])
}

/// Half-plane reference containment for a convex CCW ring.
fn convex_reference_contains(poly: &Polygon, p: Vector2<f64>) -> bool {
    poly.edges().all(|(a, b)| {
        let d = b - a;
        let v = p - a;
        d.x * v.y - d.y * v.x >= -1e-9
    })
}

#[test]
fn containment_agrees_with_convex_reference() {
    let cfg = GeomCfg::default();
    let poly = draw_convex(12, 10.0, ReplayToken { seed: 7, index: 0 });
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..1000 {
        let p = Vector2::new(rng.gen::<f64>() * 24.0 - 12.0, rng.gen::<f64>() * 24.0 - 12.0);
        assert_eq!(
            poly.contains(p, &cfg),
            convex_reference_contains(&poly, p),
            "disagreement at {p:?}"
        );
    }
}

#[test]
fn boundary_points_count_inside() {
    let cfg = GeomCfg::default();
    let sq = square(10.0);
    // Edge midpoint, vertex, and a point within tolerance of an edge.
    assert!(sq.contains(Vector2::new(5.0, 0.0), &cfg));
    assert!(sq.contains(Vector2::new(10.0, 10.0), &cfg));
    assert!(sq.contains(Vector2::new(5.0, -0.5e-9), &cfg));
    assert!(!sq.contains(Vector2::new(5.0, -1e-6), &cfg));
}

#[test]
fn containment_rejects_degenerate_rings() {
    let cfg = GeomCfg::default();
    let line = Polygon::new(vec![Vector2::new(0.0, 0.0), Vector2::new(5.0, 0.0)]);
    assert!(!line.contains(Vector2::new(2.0, 0.0), &cfg));
}

#[test]
fn centroid_square_and_degenerate_fallback() {
    let sq = square(10.0);
    assert!((sq.centroid() - Vector2::new(5.0, 5.0)).norm() < 1e-12);
    // Collinear ring: near-zero signed area falls back to the first vertex.
    let flat = Polygon::new(vec![
        Vector2::new(1.0, 2.0),
        Vector2::new(3.0, 2.0),
        Vector2::new(5.0, 2.0),
    ]);
    assert_eq!(flat.centroid(), Vector2::new(1.0, 2.0));
}

#[test]
fn aabb_overlap_is_inclusive() {
    let a = Aabb {
        min: Vector2::new(0.0, 0.0),
        max: Vector2::new(1.0, 1.0),
    };
    let touching = Aabb {
        min: Vector2::new(1.0, 0.0),
        max: Vector2::new(2.0, 1.0),
    };
    let corner = Aabb {
        min: Vector2::new(1.0, 1.0),
        max: Vector2::new(2.0, 2.0),
    };
    let apart = Aabb {
        min: Vector2::new(1.1, 0.0),
        max: Vector2::new(2.0, 1.0),
    };
    assert!(a.overlaps(&touching));
    assert!(a.overlaps(&corner));
    assert!(!a.overlaps(&apart));
}

#[test]
fn clip_square_in_half() {
    let cfg = GeomCfg::default();
    let sq = square(10.0);
    // Vertical line x = 4, pointing +y: left keeps x <= 4.
    let a = Vector2::new(4.0, -5.0);
    let b = Vector2::new(4.0, 15.0);
    let west = clip_half_plane(&sq, a, b, Side::Left, &cfg);
    let east = clip_half_plane(&sq, a, b, Side::Right, &cfg);
    assert!((west.signed_area().abs() - 40.0).abs() < 1e-9);
    assert!((east.signed_area().abs() - 60.0).abs() < 1e-9);
}

#[test]
fn clip_line_missing_polygon_keeps_or_empties() {
    let cfg = GeomCfg::default();
    let sq = square(10.0);
    let a = Vector2::new(-5.0, 0.0);
    let b = Vector2::new(-5.0, 10.0);
    let kept = clip_half_plane(&sq, a, b, Side::Right, &cfg);
    let gone = clip_half_plane(&sq, a, b, Side::Left, &cfg);
    assert!((kept.signed_area().abs() - 100.0).abs() < 1e-9);
    assert!(gone.len() < 3);
}

#[test]
fn line_segment_intersection_basics() {
    let cfg = GeomCfg::default();
    let hit = line_segment_intersection(
        Vector2::new(0.0, 0.0),
        Vector2::new(1.0, 0.0),
        Vector2::new(0.5, -1.0),
        Vector2::new(0.5, 1.0),
        &cfg,
    );
    assert!((hit.unwrap() - Vector2::new(0.5, 0.0)).norm() < 1e-12);
    // Parallel pair emits nothing.
    let none = line_segment_intersection(
        Vector2::new(0.0, 0.0),
        Vector2::new(1.0, 0.0),
        Vector2::new(0.0, 1.0),
        Vector2::new(1.0, 1.0),
        &cfg,
    );
    assert!(none.is_none());
    // Off-segment hit is rejected.
    let off = line_segment_intersection(
        Vector2::new(0.0, 0.0),
        Vector2::new(1.0, 0.0),
        Vector2::new(2.0, 1.0),
        Vector2::new(2.0, 2.0),
        &cfg,
    );
    assert!(off.is_none());
}

#[test]
fn intersect_overlapping_squares() {
    let cfg = GeomCfg::default();
    let a = square(10.0);
    let b = Polygon::new(vec![
        Vector2::new(5.0, 5.0),
        Vector2::new(15.0, 5.0),
        Vector2::new(15.0, 15.0),
        Vector2::new(5.0, 15.0),
    ]);
    let pieces = intersect_polygons(&a, &b, &cfg);
    assert_eq!(pieces.len(), 1);
    assert!((pieces[0].signed_area().abs() - 25.0).abs() < 1e-9);
}

#[test]
fn intersect_disjoint_squares_is_empty() {
    let cfg = GeomCfg::default();
    let a = square(10.0);
    let b = Polygon::new(vec![
        Vector2::new(20.0, 20.0),
        Vector2::new(30.0, 20.0),
        Vector2::new(30.0, 30.0),
        Vector2::new(20.0, 30.0),
    ]);
    assert!(EdgeClip.intersect(&a, &b, &cfg).is_empty());
    assert!(intersect_polygons(&a, &b, &cfg).is_empty());
}

#[test]
fn extents_strategy_overestimates_but_constructs() {
    let cfg = GeomCfg::default();
    // L-shaped clip: the extents fallback clips to its box instead.
    let subject = square(10.0);
    let clip = Polygon::new(vec![
        Vector2::new(2.0, 2.0),
        Vector2::new(8.0, 2.0),
        Vector2::new(8.0, 5.0),
        Vector2::new(5.0, 5.0),
        Vector2::new(5.0, 8.0),
        Vector2::new(2.0, 8.0),
    ]);
    let pieces = ExtentsClip.intersect(&subject, &clip, &cfg);
    assert_eq!(pieces.len(), 1);
    assert!((pieces[0].signed_area().abs() - 36.0).abs() < 1e-9);
}

#[test]
fn interior_point_lands_inside() {
    let cfg = GeomCfg::default();
    // U-shape whose area centroid falls in the notch.
    let u = Polygon::new(vec![
        Vector2::new(0.0, 0.0),
        Vector2::new(10.0, 0.0),
        Vector2::new(10.0, 10.0),
        Vector2::new(8.0, 10.0),
        Vector2::new(8.0, 2.0),
        Vector2::new(2.0, 2.0),
        Vector2::new(2.0, 10.0),
        Vector2::new(0.0, 10.0),
    ]);
    let p = u.interior_point(&cfg);
    assert!(u.contains(p, &cfg));
}

#[test]
fn nearest_boundary_point_projects_onto_edges() {
    let sq = square(10.0);
    let p = sq.nearest_boundary_point(Vector2::new(5.0, -3.0)).unwrap();
    assert!((p - Vector2::new(5.0, 0.0)).norm() < 1e-12);
    let q = sq.nearest_boundary_point(Vector2::new(20.0, 20.0)).unwrap();
    assert!((q - Vector2::new(10.0, 10.0)).norm() < 1e-12);
}

#[test]
fn explicit_closure_is_normalized() {
    let closed = Polygon::new(vec![
        Vector2::new(0.0, 0.0),
        Vector2::new(4.0, 0.0),
        Vector2::new(4.0, 4.0),
        Vector2::new(0.0, 0.0),
    ]);
    assert_eq!(closed.len(), 3);
}

proptest! {
    /// Clipping a convex polygon by any line conserves total area.
    #[test]
    fn clip_conserves_area(seed in 0u64..500, angle in 0.0..std::f64::consts::TAU, offset in -8.0..8.0f64) {
        let cfg = GeomCfg::default();
        let poly = draw_convex(10, 10.0, ReplayToken { seed, index: 1 });
        let dir = Vector2::new(angle.cos(), angle.sin());
        let normal = Vector2::new(-dir.y, dir.x);
        let a = normal * offset;
        let b = a + dir;
        let left = clip_half_plane(&poly, a, b, Side::Left, &cfg);
        let right = clip_half_plane(&poly, a, b, Side::Right, &cfg);
        let total = left.signed_area().abs() + right.signed_area().abs();
        prop_assert!((total - poly.signed_area().abs()).abs() < 1e-6);
    }

    /// Clipped pieces stay within the kept half-plane (up to tolerance).
    #[test]
    fn clip_respects_side(seed in 0u64..200, angle in 0.0..std::f64::consts::TAU) {
        let cfg = GeomCfg::default();
        let poly = draw_convex(8, 5.0, ReplayToken { seed, index: 2 });
        let dir = Vector2::new(angle.cos(), angle.sin());
        let a = Vector2::new(0.5, -0.25);
        let b = a + dir;
        let left = clip_half_plane(&poly, a, b, Side::Left, &cfg);
        for &v in left.verts() {
            let s = dir.x * (v - a).y - dir.y * (v - a).x;
            prop_assert!(s >= -1e-6);
        }
    }
}
