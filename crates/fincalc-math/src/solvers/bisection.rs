//! Bisection root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverMethod, SolverResult};

/// Bisection root-finding algorithm.
///
/// Repeatedly halves the bracket, keeping the half whose endpoints still
/// straddle a sign change. Converges linearly but never fails once the
/// bracket is valid.
///
/// Requires: `f(a) * f(b) <= 0` (opposite signs at endpoints)
///
/// # Example
///
/// ```rust
/// use fincalc_math::solvers::{bisection, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
///
/// let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn bisection<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let mut lo = a.min(b);
    let mut hi = a.max(b);
    let mut f_lo = f(lo);
    let f_hi = f(hi);

    if f_lo * f_hi > 0.0 {
        return Err(MathError::InvalidBracket {
            a: lo,
            b: hi,
            fa: f_lo,
            fb: f_hi,
        });
    }

    let done = |root: f64, residual: f64, iterations: u32| SolverResult {
        root,
        iterations,
        residual,
        method: SolverMethod::Bisection,
    };

    if f_lo.abs() < config.tolerance {
        return Ok(done(lo, f_lo, 0));
    }
    if f_hi.abs() < config.tolerance {
        return Ok(done(hi, f_hi, 0));
    }

    for iteration in 0..config.max_iterations {
        let mid = lo + (hi - lo) / 2.0;
        let f_mid = f(mid);

        if f_mid.abs() < config.tolerance || (hi - lo) / 2.0 < config.tolerance {
            return Ok(done(mid, f_mid, iteration + 1));
        }

        if f_mid * f_lo < 0.0 {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }
    }

    let mid = lo + (hi - lo) / 2.0;
    Err(MathError::convergence_failed(
        config.max_iterations,
        f(mid).abs(),
    ))
}
