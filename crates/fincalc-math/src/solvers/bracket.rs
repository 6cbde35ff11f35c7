//! Bracket search.

use crate::error::{MathError, MathResult};

/// Maximum number of outward steps taken by [`find_bracket`].
pub const MAX_BRACKET_EXPANSIONS: u32 = 50;

const INITIAL_STEP: f64 = 0.1;

/// Scans outward from `initial_guess` for a sign change of `f`.
///
/// Steps of 0.1, 0.2, 0.4, ... are taken to the left and right, clamped to
/// `domain` when one is given. The first adjacent pair of points whose
/// function values differ in sign (or touch zero) is returned, lower end
/// first. Non-finite function values stop the scan on that side.
///
/// Two roots closer together than the current step can hide each other;
/// the scan reports only sign changes it actually observes.
///
/// # Example
///
/// ```rust
/// use fincalc_math::solvers::find_bracket;
///
/// let f = |x: f64| x * x - 2.0;
/// let (a, b) = find_bracket(&f, 0.5, Some((0.0, 10.0))).unwrap();
/// assert!(f(a) * f(b) <= 0.0);
/// ```
pub fn find_bracket<F>(f: &F, initial_guess: f64, domain: Option<(f64, f64)>) -> MathResult<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    let (min, max) = match domain {
        Some((a, b)) => (a.min(b), a.max(b)),
        None => (f64::MIN, f64::MAX),
    };

    if !initial_guess.is_finite() || initial_guess < min || initial_guess > max {
        return Err(MathError::invalid_input(format!(
            "initial guess {initial_guess} lies outside [{min}, {max}]"
        )));
    }

    let f_init = f(initial_guess);
    if !f_init.is_finite() {
        return Err(MathError::invalid_input(format!(
            "function is not finite at the initial guess {initial_guess}"
        )));
    }
    if f_init == 0.0 {
        return Ok((initial_guess, initial_guess));
    }

    let (mut left, mut f_left) = (initial_guess, f_init);
    let (mut right, mut f_right) = (initial_guess, f_init);
    let mut left_open = left > min;
    let mut right_open = right < max;
    let mut delta = INITIAL_STEP;

    for _ in 0..MAX_BRACKET_EXPANSIONS {
        if !left_open && !right_open {
            break;
        }

        if left_open {
            let next = (left - delta).max(min);
            let f_next = f(next);
            if !f_next.is_finite() {
                left_open = false;
            } else if f_next * f_left <= 0.0 {
                return Ok((next, left));
            } else {
                left = next;
                f_left = f_next;
                left_open = left > min;
            }
        }

        if right_open {
            let next = (right + delta).min(max);
            let f_next = f(next);
            if !f_next.is_finite() {
                right_open = false;
            } else if f_next * f_right <= 0.0 {
                return Ok((right, next));
            } else {
                right = next;
                f_right = f_next;
                right_open = right < max;
            }
        }

        delta *= 2.0;
    }

    Err(MathError::BracketNotFound {
        lo: left,
        hi: right,
    })
}
