//! Answer verification.
//!
//! An answer is correct when it matches the true roots in either order,
//! each coordinate within [`TOLERANCE`].

/// Absolute per-coordinate tolerance. Comparison is strict: a difference of
/// exactly `TOLERANCE` is wrong.
pub const TOLERANCE: f64 = 0.01;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < TOLERANCE
}

/// Order-insensitive comparison of a submitted pair against the true roots.
pub fn is_correct(truth: (f64, f64), submitted: (f64, f64)) -> bool {
    let (t1, t2) = truth;
    let (u1, u2) = submitted;
    (close(t1, u1) && close(t2, u2)) || (close(t1, u2) && close(t2, u1))
}

/// Real roots of `x² + bx + c = 0`, or `None` when the discriminant is
/// negative beyond float noise.
///
/// Uses the cancellation-free form `q = -(b + sign(b)·√D) / 2`,
/// `x₁ = q`, `x₂ = c / q`.
pub fn solve_monic(b: f64, c: f64) -> Option<(f64, f64)> {
    let discriminant = b * b - 4.0 * c;
    let noise = 1e-9 * (b * b).max(c.abs()).max(1.0);
    if discriminant < -noise {
        return None;
    }
    let sqrt_d = discriminant.max(0.0).sqrt();
    let q = -0.5 * (b + b.signum() * sqrt_d);
    if q == 0.0 {
        return Some((0.0, 0.0));
    }
    Some((q, c / q))
}
