//! Directed ring edges and contiguous axis-aligned chains.

use nalgebra::Vector2;

use crate::geom::Polygon;

/// One directed ring edge with precomputed unit direction, midpoint, length.
#[derive(Clone, Copy, Debug)]
pub struct DirectedEdge {
    /// Ring index of the start vertex.
    pub start_idx: usize,
    pub start: Vector2<f64>,
    pub end: Vector2<f64>,
    pub dir: Vector2<f64>,
    pub mid: Vector2<f64>,
    pub len: f64,
}

/// Which local axis an edge direction is closer to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeClass {
    /// Direction closer to `east`: a top/bottom candidate.
    EastWest,
    /// Direction closer to `north`: a left/right candidate.
    NorthSouth,
}

/// Maximal contiguous run of equally classified edges.
#[derive(Clone, Debug)]
pub struct Chain {
    pub class: EdgeClass,
    /// Indices into the edge list, in ring order.
    pub edges: Vec<usize>,
    /// Mean perpendicular-axis projection of member edge midpoints; ranks
    /// chains as most northern/southern (EW) or most eastern/western (NS).
    pub score: f64,
}

/// Build the directed edge list of a ring, dropping near-zero edges.
pub fn build_edges(poly: &Polygon) -> Vec<DirectedEdge> {
    let verts = poly.verts();
    let n = verts.len();
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let start = verts[i];
        let end = verts[(i + 1) % n];
        let d = end - start;
        let len = d.norm();
        if len < 1e-9 {
            continue;
        }
        out.push(DirectedEdge {
            start_idx: i,
            start,
            end,
            dir: d / len,
            mid: (start + end) * 0.5,
            len,
        });
    }
    out
}

/// Partition edges into maximal contiguous chains by nearest local axis.
///
/// A run that wraps around the ring origin (first and last run share a class)
/// is merged into one chain, so a top side split across the index origin is
/// still ranked as a single candidate.
pub fn partition_chains(
    edges: &[DirectedEdge],
    east: Vector2<f64>,
    north: Vector2<f64>,
) -> Vec<Chain> {
    if edges.is_empty() {
        return Vec::new();
    }
    let class_of = |e: &DirectedEdge| {
        if e.dir.dot(&east).abs() >= e.dir.dot(&north).abs() {
            EdgeClass::EastWest
        } else {
            EdgeClass::NorthSouth
        }
    };

    let mut runs: Vec<(EdgeClass, Vec<usize>)> = Vec::new();
    for (i, e) in edges.iter().enumerate() {
        let c = class_of(e);
        match runs.last_mut() {
            Some((rc, idxs)) if *rc == c => idxs.push(i),
            _ => runs.push((c, vec![i])),
        }
    }
    // Wrap-around merge: the last run continues into the first one.
    if runs.len() > 1 {
        let first_class = runs[0].0;
        let last_class = runs[runs.len() - 1].0;
        if first_class == last_class {
            let (_, mut tail) = runs.pop().unwrap_or((first_class, Vec::new()));
            tail.extend(std::mem::take(&mut runs[0].1));
            runs[0].1 = tail;
        }
    }

    runs.into_iter()
        .map(|(class, idxs)| {
            let axis = match class {
                EdgeClass::EastWest => north,
                EdgeClass::NorthSouth => east,
            };
            let score = idxs
                .iter()
                .map(|&i| edges[i].mid.dot(&axis))
                .sum::<f64>()
                / idxs.len() as f64;
            Chain {
                class,
                edges: idxs,
                score,
            }
        })
        .collect()
}
