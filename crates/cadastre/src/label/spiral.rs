//! Finite outward ring spiral of label candidate points.

use nalgebra::Vector2;

/// The eight compass directions of one spiral ring, in fixed emission order.
const DIRECTIONS: [Vector2<f64>; 8] = {
    const D: f64 = std::f64::consts::FRAC_1_SQRT_2;
    [
        Vector2::new(1.0, 0.0),  // E
        Vector2::new(D, D),      // NE
        Vector2::new(0.0, 1.0),  // N
        Vector2::new(-D, D),     // NW
        Vector2::new(-1.0, 0.0), // W
        Vector2::new(-D, -D),    // SW
        Vector2::new(0.0, -1.0), // S
        Vector2::new(D, -D),     // SE
    ]
};

/// Finite, non-restartable candidate sequence radiating out from a target.
///
/// Yields the target itself first, then the eight compass points of each
/// ring at radius `ring * step`, capped at `cap` points total. Every
/// construction allocates fresh state; two spirals with identical
/// (target, step, cap) yield identical ordered sequences.
#[derive(Clone, Debug)]
pub struct Spiral {
    target: Vector2<f64>,
    step: f64,
    cap: usize,
    emitted: usize,
}

impl Spiral {
    pub fn new(target: Vector2<f64>, step: f64, cap: usize) -> Self {
        Self {
            target,
            step,
            cap,
            emitted: 0,
        }
    }
}

impl Iterator for Spiral {
    type Item = Vector2<f64>;

    fn next(&mut self) -> Option<Vector2<f64>> {
        if self.emitted >= self.cap {
            return None;
        }
        let i = self.emitted;
        self.emitted += 1;
        if i == 0 {
            return Some(self.target);
        }
        let ring = 1 + (i - 1) / 8;
        let dir = DIRECTIONS[(i - 1) % 8];
        Some(self.target + dir * (ring as f64 * self.step))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rem = self.cap - self.emitted;
        (rem, Some(rem))
    }
}

impl ExactSizeIterator for Spiral {}
