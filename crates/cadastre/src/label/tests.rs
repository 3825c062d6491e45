use nalgebra::Vector2;

use super::*;
use crate::geom::{GeomCfg, Polygon};

fn square_at(center: Vector2<f64>, side: f64) -> Polygon {
    let h = side * 0.5;
    Polygon::new(vec![
        center + Vector2::new(-h, -h),
        center + Vector2::new(h, -h),
        center + Vector2::new(h, h),
        center + Vector2::new(-h, h),
    ])
}

fn container_100() -> Polygon {
    square_at(Vector2::new(50.0, 50.0), 100.0)
}

fn request<'a>(
    subject: &'a Polygon,
    container: &'a Polygon,
    fallback: Vector2<f64>,
) -> LabelRequest<'a> {
    LabelRequest {
        subject,
        container,
        fallback,
        size: Vector2::new(6.0, 3.0),
        needs_leader: false,
        prefer_outside_subject: false,
    }
}

#[test]
fn spiral_is_deterministic() {
    let a: Vec<_> = Spiral::new(Vector2::new(3.0, -2.0), 1.5, 25).collect();
    let b: Vec<_> = Spiral::new(Vector2::new(3.0, -2.0), 1.5, 25).collect();
    assert_eq!(a.len(), 25);
    assert_eq!(a, b);
}

#[test]
fn spiral_rings_radiate_outward() {
    let target = Vector2::new(0.0, 0.0);
    let pts: Vec<_> = Spiral::new(target, 2.0, 17).collect();
    assert_eq!(pts[0], target);
    for p in &pts[1..9] {
        assert!(((p - target).norm() - 2.0).abs() < 1e-12);
    }
    for p in &pts[9..17] {
        assert!(((p - target).norm() - 4.0).abs() < 1e-12);
    }
    // First ring starts east.
    assert!((pts[1] - Vector2::new(2.0, 0.0)).norm() < 1e-12);
}

#[test]
fn spiral_respects_cap() {
    assert_eq!(Spiral::new(Vector2::zeros(), 1.0, 0).count(), 0);
    assert_eq!(Spiral::new(Vector2::zeros(), 1.0, 5).count(), 5);
}

#[test]
fn lone_label_lands_on_intersection_centroid() {
    let container = container_100();
    let subject = square_at(Vector2::new(30.0, 40.0), 10.0);
    let mut run = PlacementRun::new(PlacementCfg::default());
    let p = run.place(&request(&subject, &container, Vector2::new(1.0, 1.0)));
    assert!(p.placed && !p.forced);
    assert!((p.point - Vector2::new(30.0, 40.0)).norm() < 1e-9);
    assert_eq!(run.counters().placed, 1);
}

#[test]
fn placement_run_avoids_overlap() {
    let container = container_100();
    let cfg = PlacementCfg {
        step: 4.0,
        max_attempts: 200,
        ..PlacementCfg::default()
    };
    let mut run = PlacementRun::new(cfg);
    // Nine dispositions packed close enough that naive targets would collide.
    let mut results = Vec::new();
    for gy in 0..3 {
        for gx in 0..3 {
            let c = Vector2::new(44.0 + gx as f64 * 6.0, 44.0 + gy as f64 * 6.0);
            let subject = square_at(c, 8.0);
            results.push(run.place(&request(&subject, &container, c)));
        }
    }
    assert!(results.iter().all(|p| p.placed && !p.forced));
    assert_eq!(run.counters().forced, 0);
    let extents = run.placed_extents();
    for i in 0..extents.len() {
        for j in (i + 1)..extents.len() {
            assert!(
                !extents[i].overlaps(&extents[j]),
                "extents {i} and {j} overlap"
            );
        }
    }
}

#[test]
fn exhausted_attempts_force_distinct_points() {
    let container = container_100();
    let cfg = PlacementCfg {
        step: 2.0,
        max_attempts: 1,
        ..PlacementCfg::default()
    };
    let mut run = PlacementRun::new(cfg);

    // A wide obstacle label occupies the middle of the container.
    let obstacle = square_at(Vector2::new(50.0, 50.0), 40.0);
    let mut obstacle_req = request(&obstacle, &container, Vector2::new(50.0, 50.0));
    obstacle_req.size = Vector2::new(40.0, 40.0);
    let first = run.place(&obstacle_req);
    assert!(first.placed && !first.forced);

    // Two dispositions under the obstacle: one candidate each, both overlap.
    let sub_a = square_at(Vector2::new(44.0, 50.0), 4.0);
    let sub_b = square_at(Vector2::new(56.0, 50.0), 4.0);
    let pa = run.place(&request(&sub_a, &container, Vector2::new(44.0, 50.0)));
    let pb = run.place(&request(&sub_b, &container, Vector2::new(56.0, 50.0)));
    assert!(pa.forced && pb.forced);
    assert!(pa.placed && pb.placed);
    // Forced points equal each subject's last (sole) spiral candidate.
    assert!((pa.point - Vector2::new(44.0, 50.0)).norm() < 1e-9);
    assert!((pb.point - Vector2::new(56.0, 50.0)).norm() < 1e-9);
    assert_ne!(pa.point, pb.point);
    assert_eq!(run.counters().forced, 2);
    assert_eq!(run.counters().placed, 3);
}

#[test]
fn forcing_disabled_skips_and_counts() {
    let container = container_100();
    let cfg = PlacementCfg {
        step: 2.0,
        max_attempts: 1,
        force_on_overlap: false,
        ..PlacementCfg::default()
    };
    let mut run = PlacementRun::new(cfg);
    let obstacle = square_at(Vector2::new(50.0, 50.0), 40.0);
    let mut obstacle_req = request(&obstacle, &container, Vector2::new(50.0, 50.0));
    obstacle_req.size = Vector2::new(40.0, 40.0);
    run.place(&obstacle_req);

    let subject = square_at(Vector2::new(50.0, 50.0), 4.0);
    let p = run.place(&request(&subject, &container, Vector2::new(50.0, 50.0)));
    assert!(!p.placed && !p.forced);
    assert_eq!(run.counters().skipped_overlap, 1);
    // Host-side no-mapping skips are a separate counter.
    assert_eq!(run.counters().skipped_no_mapping, 0);
    assert_eq!(run.counters().placed, 1);
}

#[test]
fn zero_candidate_budget_uses_fallback_directly() {
    let container = container_100();
    let subject = square_at(Vector2::new(50.0, 50.0), 10.0);
    let cfg = PlacementCfg {
        max_attempts: 0,
        ..PlacementCfg::default()
    };
    let mut run = PlacementRun::new(cfg);
    let fallback = Vector2::new(12.0, 13.0);
    let p = run.place(&request(&subject, &container, fallback));
    assert!(p.placed && !p.forced);
    assert_eq!(p.point, fallback);
    assert_eq!(run.counters().placed, 1);
}

#[test]
fn outside_subject_candidates_come_first() {
    let container = container_100();
    let subject = square_at(Vector2::new(50.0, 50.0), 10.0);
    let cfg = PlacementCfg {
        step: 20.0,
        max_attempts: 9,
        ..PlacementCfg::default()
    };
    let gcfg = GeomCfg::default();
    let mut run = PlacementRun::new(cfg);
    let mut req = request(&subject, &container, Vector2::new(50.0, 50.0));
    req.prefer_outside_subject = true;
    let p = run.place(&req);
    assert!(p.placed && !p.forced);
    assert!(!subject.contains(p.point, &gcfg));
    assert!(container.contains(p.point, &gcfg));
    // First ring east candidate is the first outside-subject point.
    assert!((p.point - Vector2::new(70.0, 50.0)).norm() < 1e-9);
}

#[test]
fn leader_trims_at_marker_edge() {
    let container = container_100();
    let subject = square_at(Vector2::new(50.0, 50.0), 30.0);
    let cfg = PlacementCfg {
        step: 10.0,
        max_attempts: 9,
        marker_radius: 2.0,
        ..PlacementCfg::default()
    };
    let mut run = PlacementRun::new(cfg);

    // Occupy the target so the label moves one ring east.
    let obstacle = square_at(Vector2::new(50.0, 50.0), 6.0);
    let mut obstacle_req = request(&obstacle, &container, Vector2::new(50.0, 50.0));
    obstacle_req.size = Vector2::new(6.0, 6.0);
    run.place(&obstacle_req);

    let mut req = request(&subject, &container, Vector2::new(50.0, 50.0));
    req.size = Vector2::new(4.0, 4.0);
    req.needs_leader = true;
    let p = run.place(&req);
    assert!(p.placed && !p.forced);
    let (start, end) = p.leader.unwrap();
    assert_eq!(end, p.point);
    // Start sits on the marker circle along the leader direction.
    assert!(((start - Vector2::new(50.0, 50.0)).norm() - 2.0).abs() < 1e-9);
}

#[test]
fn collapsed_leader_is_skipped() {
    let container = container_100();
    let subject = square_at(Vector2::new(50.0, 50.0), 30.0);
    let cfg = PlacementCfg {
        marker_radius: 5.0,
        ..PlacementCfg::default()
    };
    let mut run = PlacementRun::new(cfg);
    let mut req = request(&subject, &container, Vector2::new(50.0, 50.0));
    req.needs_leader = true;
    // Label lands on the target itself: the trimmed segment collapses.
    let p = run.place(&req);
    assert!(p.placed);
    assert!(p.leader.is_none());
}

#[test]
fn host_counters_accumulate() {
    let mut run = PlacementRun::new(PlacementCfg::default());
    run.record_multi_quarter();
    run.record_multi_quarter();
    run.record_skipped();
    let c = run.counters();
    assert_eq!(c.multi_quarter, 2);
    assert_eq!(c.skipped_no_mapping, 1);
    assert_eq!(c.skipped_overlap, 0);
}
