//! Robust solver for `a·x² + b·x + c = 0`.
//!
//! The textbook `(-b ± sqrt(b² - 4ac)) / 2a` loses the small root to
//! catastrophic cancellation when `b² ≫ 4ac`. This formulation normalizes
//! by `a`, scales by `sqrt(|c/a|)` and keeps the one subtraction
//! well-conditioned.

/// Real roots of `a·x² + b·x + c = 0` in ascending order.
///
/// Returns `None` when `a == 0` (not a quadratic; the linear case is the
/// caller's problem) and when the roots are complex — no complex pair is
/// ever computed.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> Option<(f64, f64)> {
    if a == 0.0 {
        return None;
    }
    let b1 = b / a;
    let c1 = c / a;

    if b == 0.0 {
        if -c1 < 0.0 {
            return None;
        }
        let r = (-c1).sqrt();
        return Some((-r, r));
    }
    if c == 0.0 {
        return Some(ordered(-b1, 0.0));
    }

    // scale carries the sign of b1, so beta is non-negative.
    let scale = c1.abs().sqrt() * b1.signum();
    let beta = b1 / (2.0 * scale);

    let (y1, y2);
    if c1 < 0.0 {
        // Roots straddle zero; real for any beta.
        y1 = beta + (beta * beta + 1.0).sqrt();
        y2 = -1.0 / y1;
    } else if beta >= 1.0 {
        y1 = beta + ((beta + 1.0) * (beta - 1.0)).sqrt();
        y2 = 1.0 / y1;
    } else {
        // beta < 1 with c1 > 0: complex pair.
        return None;
    }

    Some(ordered(-y1 * scale, -y2 * scale))
}

fn ordered(r1: f64, r2: f64) -> (f64, f64) {
    if r1 <= r2 {
        (r1, r2)
    } else {
        (r2, r1)
    }
}
