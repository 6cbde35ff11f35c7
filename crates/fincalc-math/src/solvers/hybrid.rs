//! Hybrid root-finding algorithm.
//!
//! Combines Newton-Raphson with a bracketed fallback for robust convergence.

use crate::error::{MathError, MathResult};
use crate::solvers::{
    bisection, brent, find_bracket, BracketMethod, SolverConfig, SolverMethod, SolverResult,
    MIN_DERIVATIVE,
};

/// Consecutive residual blow-ups tolerated before Newton is abandoned.
const MAX_DIVERGENCE: u32 = 3;

/// Newton iteration cap inside the hybrid; the fallback gets the full budget.
const NEWTON_MAX_ITERATIONS: u32 = 20;

/// Hybrid root-finding algorithm.
///
/// Starts with Newton-Raphson for fast quadratic convergence. If Newton
/// diverges, meets a vanishing derivative, produces a non-finite iterate or
/// leaves `domain`, the solver scans outward from `initial_guess` for a
/// sign change (see [`find_bracket`]) and finishes with the bracketing method
/// chosen in [`SolverConfig::fallback`].
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `df` - The derivative of the function
/// * `initial_guess` - Starting point for Newton iteration
/// * `domain` - Optional interval the root must lie in
/// * `config` - Solver configuration
///
/// # Example
///
/// ```rust
/// use fincalc_math::solvers::{hybrid, SolverConfig};
///
/// let f = |x: f64| x * x * x - x - 2.0;
/// let df = |x: f64| 3.0 * x * x - 1.0;
///
/// let result = hybrid(f, df, 1.5, Some((1.0, 2.0)), &SolverConfig::default()).unwrap();
/// assert!((f(result.root)).abs() < 1e-10);
/// ```
pub fn hybrid<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    domain: Option<(f64, f64)>,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    match newton_with_monitoring(&f, &df, initial_guess, domain, config) {
        Ok(result) => Ok(result),
        Err(newton_err) => {
            log::debug!(
                "Newton-Raphson from {initial_guess} failed ({newton_err}); falling back to {:?}",
                config.fallback
            );

            let (a, b) = find_bracket(&f, initial_guess, domain)?;
            log::trace!("bracket found: [{a}, {b}]");

            match config.fallback {
                BracketMethod::Brent => brent(&f, a, b, config),
                BracketMethod::Bisection => bisection(&f, a, b, config),
            }
        }
    }
}

/// Newton-Raphson with divergence detection.
///
/// Fails fast so the bracketed fallback still has its full budget.
fn newton_with_monitoring<F, DF>(
    f: &F,
    df: &DF,
    initial_guess: f64,
    domain: Option<(f64, f64)>,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let in_domain = |x: f64| match domain {
        Some((a, b)) => x >= a.min(b) && x <= a.max(b),
        None => true,
    };

    let mut x = initial_guess;
    let mut prev_residual = f64::MAX;
    let mut divergence_count = 0;
    let max_iter = config.max_iterations.min(NEWTON_MAX_ITERATIONS);

    for iteration in 0..max_iter {
        let fx = f(x);
        let residual = fx.abs();

        if !fx.is_finite() {
            return Err(MathError::diverged(format!("f({x}) is not finite")));
        }

        if residual < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
                method: SolverMethod::Newton,
            });
        }

        if residual > prev_residual * 2.0 {
            divergence_count += 1;
            if divergence_count >= MAX_DIVERGENCE {
                return Err(MathError::diverged("residual keeps growing"));
            }
        } else {
            divergence_count = 0;
        }
        prev_residual = residual;

        let dfx = df(x);
        if dfx.is_nan() || dfx.abs() < MIN_DERIVATIVE {
            return Err(MathError::DivisionByZero { value: dfx });
        }

        let step = fx / dfx;
        x -= step;

        if !x.is_finite() {
            return Err(MathError::diverged("non-finite iterate"));
        }
        if !in_domain(x) {
            return Err(MathError::diverged(format!("iterate {x} left the search domain")));
        }

        if step.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration + 1,
                residual: f(x),
                method: SolverMethod::Newton,
            });
        }
    }

    Err(MathError::convergence_failed(max_iter, f(x).abs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_newton_path() {
        let f = |x: f64| x * x - 2.0;
        let df = |x: f64| 2.0 * x;

        let result = hybrid(f, df, 1.5, Some((1.0, 2.0)), &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
        assert_eq!(result.method, SolverMethod::Newton);
    }

    #[test]
    fn test_single_period_rate() {
        // 1000 grows to 1100 in one year
        let f = |r: f64| 1100.0 / (1.0 + r) - 1000.0;
        let df = |r: f64| -1100.0 / ((1.0 + r) * (1.0 + r));

        let result = hybrid(f, df, 0.0, Some((-0.99, 10.0)), &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 0.10, epsilon = 1e-10);
        assert_eq!(result.method, SolverMethod::Newton);
    }

    #[test]
    fn test_fallback_when_newton_overshoots() {
        // First step from 3.0 lands near -9.5, outside the domain
        let f = |x: f64| x.atan();
        let df = |x: f64| 1.0 / (1.0 + x * x);

        let result = hybrid(f, df, 3.0, Some((-5.0, 5.0)), &SolverConfig::default()).unwrap();

        assert!(result.root.abs() < 1e-8);
        assert_eq!(result.method, SolverMethod::Brent);
    }

    #[test]
    fn test_fallback_on_flat_derivative() {
        // f'(0) = 0 stops Newton on the first step
        let f = |x: f64| x * x * x - 1.0;
        let df = |x: f64| 3.0 * x * x;

        let result = hybrid(f, df, 0.0, Some((-5.0, 5.0)), &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 1.0, epsilon = 1e-9);
        assert_eq!(result.method, SolverMethod::Brent);
    }

    #[test]
    fn test_fallback_when_newton_leaves_domain() {
        // Second Newton step from -0.5 overshoots below the domain floor
        let f = |x: f64| (x - 2.0).atan();
        let df = |x: f64| 1.0 / (1.0 + (x - 2.0) * (x - 2.0));

        let result = hybrid(f, df, -0.5, Some((-0.99, 10.0)), &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 2.0, epsilon = 1e-9);
        assert_ne!(result.method, SolverMethod::Newton);
    }

    #[test]
    fn test_bisection_fallback() {
        let f = |x: f64| x * x * x - 1.0;
        let df = |x: f64| 3.0 * x * x;
        let config = SolverConfig::default().with_fallback(BracketMethod::Bisection);

        let result = hybrid(f, df, 0.0, Some((-5.0, 5.0)), &config).unwrap();

        assert_relative_eq!(result.root, 1.0, epsilon = 1e-9);
        assert_eq!(result.method, SolverMethod::Bisection);
    }

    #[test]
    fn test_no_root_reports_bracket_failure() {
        let f = |x: f64| x * x + 1.0;
        let df = |x: f64| 2.0 * x;

        let result = hybrid(f, df, 0.1, Some((-0.99, 10.0)), &SolverConfig::default());

        assert!(matches!(result, Err(MathError::BracketNotFound { .. })));
    }
}
