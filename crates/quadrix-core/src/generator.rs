//! Random quadratic equation generator.
//!
//! Equations are built backwards from their roots (Vieta's formulas), so
//! every generated equation has two known real roots and no discriminant
//! check is needed.

use std::ops::RangeInclusive;

use rand::Rng;

use crate::error::QuizError;
use crate::model::{Equation, EquationId};

/// Allowed number of equations per generation request.
pub const COUNT_RANGE: RangeInclusive<usize> = 1..=100;

/// Roots are drawn uniformly from this interval.
pub const ROOT_RANGE: RangeInclusive<f64> = -100.0..=100.0;

/// Check a requested equation count against the allowed range.
pub fn check_count(count: usize, range: &RangeInclusive<usize>) -> Result<(), QuizError> {
    if range.contains(&count) {
        Ok(())
    } else {
        Err(QuizError::InvalidCount {
            count,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

/// Generate `count` equations from the supplied random source.
///
/// Ids are drawn from the same source, so a seeded `rng` reproduces the
/// whole batch exactly.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Result<Vec<Equation>, QuizError> {
    check_count(count, &COUNT_RANGE)?;
    Ok((0..count).map(|_| generate_one(rng)).collect())
}

/// Generate a single equation.
pub fn generate_one<R: Rng + ?Sized>(rng: &mut R) -> Equation {
    let root1 = rng.gen_range(ROOT_RANGE);
    let root2 = rng.gen_range(ROOT_RANGE);
    let id = EquationId(uuid::Builder::from_random_bytes(rng.gen()).into_uuid());
    Equation::from_roots(id, root1, root2)
}

/// Truncate toward zero to two decimal places.
///
/// Values that are already a hundredth up to float noise (`0.29 * 100.0`
/// is `28.999999999999996`) keep that hundredth. This deliberately differs
/// from a plain `trunc(value * 100.0) / 100.0`, which would turn `0.29`
/// into `0.28`.
pub fn truncate_hundredths(value: f64) -> f64 {
    let scaled = value * 100.0;
    let nearest = scaled.round();
    let whole = if (scaled - nearest).abs() < 1e-9 {
        nearest
    } else {
        scaled.trunc()
    };
    // `+ 0.0` turns -0.0 into 0.0
    whole / 100.0 + 0.0
}

/// Render `x² + bx + c = 0` in canonical form.
pub fn render_equation(b: f64, c: f64) -> String {
    let mut text = String::from("x²");

    if b > 0.0 {
        text.push_str(&format!(" + {b:.2}x"));
    } else if b < 0.0 {
        text.push_str(&format!(" - {:.2}x", -b));
    }

    if c > 0.0 {
        text.push_str(&format!(" + {c:.2}"));
    } else if c < 0.0 {
        text.push_str(&format!(" - {:.2}", -c));
    }

    text.push_str(" = 0");
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verifier::solve_monic;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn is_hundredth(x: f64) -> bool {
        ((x * 100.0).round() - x * 100.0).abs() < 1e-6
    }

    #[test]
    fn render_all_sign_combinations() {
        assert_eq!(render_equation(2.0, -15.0), "x² + 2.00x - 15.00 = 0");
        assert_eq!(render_equation(-3.5, 1.25), "x² - 3.50x + 1.25 = 0");
        assert_eq!(render_equation(0.0, -4.0), "x² - 4.00 = 0");
        assert_eq!(render_equation(-1.0, 0.0), "x² - 1.00x = 0");
        assert_eq!(render_equation(0.0, 0.0), "x² = 0");
        assert_eq!(render_equation(-0.0, -0.0), "x² = 0");
    }

    #[test]
    fn truncation_is_toward_zero() {
        assert_eq!(truncate_hundredths(12.349), 12.34);
        assert_eq!(truncate_hundredths(-12.349), -12.34);
        assert_eq!(truncate_hundredths(0.999), 0.99);
        assert_eq!(truncate_hundredths(0.29), 0.29);
        assert_eq!(truncate_hundredths(-0.004), 0.0);
        assert!(truncate_hundredths(-0.004).is_sign_positive());
    }

    #[test]
    fn exact_hundredths_are_not_pushed_down() {
        for v in [0.29, 1.13, -0.57, 4.35] {
            assert_eq!(truncate_hundredths(v), v);
            assert_ne!((v * 100.0).trunc() / 100.0 + 0.0, v, "{v} has no float noise");
        }
    }

    #[test]
    fn injected_roots_example() {
        let eq = Equation::from_roots(EquationId::new(), 3.00, -5.00);
        assert_eq!(eq.text, "x² + 2.00x - 15.00 = 0");
    }

    #[test]
    fn count_is_range_checked() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            generate(&mut rng, 0),
            Err(QuizError::InvalidCount { count: 0, .. })
        ));
        assert!(matches!(
            generate(&mut rng, 101),
            Err(QuizError::InvalidCount { count: 101, min: 1, max: 100 })
        ));
        assert_eq!(generate(&mut rng, 1).unwrap().len(), 1);
        assert_eq!(generate(&mut rng, 100).unwrap().len(), 100);
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = generate(&mut StdRng::seed_from_u64(42), 10).unwrap();
        let b = generate(&mut StdRng::seed_from_u64(42), 10).unwrap();
        assert_eq!(a, b);
        let c = generate(&mut StdRng::seed_from_u64(43), 10).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn generated_ids_are_distinct() {
        let eqs = generate(&mut StdRng::seed_from_u64(7), 100).unwrap();
        let ids: std::collections::HashSet<_> = eqs.iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn generated_roots_are_truncated_hundredths_in_range() {
        let eqs = generate(&mut StdRng::seed_from_u64(99), 100).unwrap();
        for eq in &eqs {
            for r in [eq.root1, eq.root2] {
                assert!(ROOT_RANGE.contains(&r), "root {r} out of range");
                assert!(is_hundredth(r), "root {r} is not a hundredth");
            }
            assert!(eq.text.starts_with("x²"));
            assert!(eq.text.ends_with(" = 0"));
        }
    }

    #[test]
    fn coefficients_recover_roots() {
        let mut rng = StdRng::seed_from_u64(2024);
        for eq in generate(&mut rng, 100).unwrap() {
            let (b, c) = eq.coefficients();
            let (s1, s2) = solve_monic(b, c).expect("real roots by construction");
            let (r1, r2) = eq.roots();
            let direct = (s1 - r1).abs() < 0.005 && (s2 - r2).abs() < 0.005;
            let swapped = (s1 - r2).abs() < 0.005 && (s2 - r1).abs() < 0.005;
            assert!(direct || swapped, "{} -> ({s1}, {s2})", eq.text);
        }
    }
}
