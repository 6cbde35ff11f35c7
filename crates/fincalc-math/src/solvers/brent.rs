//! Brent's method.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverMethod, SolverResult};

/// Finds a root of `f` inside `[lower, upper]` with Brent's method.
///
/// `f(lower)` and `f(upper)` must not share a sign. Each iteration tries
/// inverse quadratic interpolation (or a secant step when only two distinct
/// points are known) and falls back to bisection whenever the interpolated
/// point would leave the bracket or shrink it too slowly, so the bracket
/// always contains the root.
///
/// Stops when `|f(x)|` or the half-width of the bracket drops below
/// `config.tolerance`.
///
/// # Example
///
/// ```rust
/// use fincalc_math::solvers::{brent, SolverConfig};
///
/// let f = |x: f64| x * x * x - x - 2.0;
///
/// let result = brent(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - 1.521_379_706_8).abs() < 1e-9);
/// ```
pub fn brent<F>(f: F, lower: f64, upper: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    // `best` is the current estimate, `prev` the one before it and
    // `partner` the endpoint whose value has the opposite sign to `best`.
    let (mut prev, mut f_prev) = (lower, f(lower));
    let (mut best, mut f_best) = (upper, f(upper));

    if f_prev * f_best > 0.0 {
        return Err(MathError::InvalidBracket {
            a: lower,
            b: upper,
            fa: f_prev,
            fb: f_best,
        });
    }

    let (mut partner, mut f_partner) = (best, f_best);
    let mut step = best - prev;
    let mut last_step = step;

    for iteration in 0..config.max_iterations {
        if f_best * f_partner > 0.0 {
            partner = prev;
            f_partner = f_prev;
            step = best - prev;
            last_step = step;
        }

        if f_partner.abs() < f_best.abs() {
            prev = best;
            f_prev = f_best;
            best = partner;
            f_best = f_partner;
            partner = prev;
            f_partner = f_prev;
        }

        let slack = 2.0 * f64::EPSILON * best.abs() + 0.5 * config.tolerance;
        let half_width = 0.5 * (partner - best);

        if f_best.abs() < config.tolerance || half_width.abs() <= slack {
            return Ok(SolverResult {
                root: best,
                iterations: iteration,
                residual: f_best,
                method: SolverMethod::Brent,
            });
        }

        if last_step.abs() >= slack && f_prev.abs() > f_best.abs() {
            let s = f_best / f_prev;
            let (mut p, mut q) = if prev == partner {
                (2.0 * half_width * s, 1.0 - s)
            } else {
                let q0 = f_prev / f_partner;
                let r = f_best / f_partner;
                (
                    s * (2.0 * half_width * q0 * (q0 - r) - (best - prev) * (r - 1.0)),
                    (q0 - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };
            if p > 0.0 {
                q = -q;
            }
            p = p.abs();

            let limit = (3.0 * half_width * q - (slack * q).abs()).min((last_step * q).abs());
            if 2.0 * p < limit {
                last_step = step;
                step = p / q;
            } else {
                step = half_width;
                last_step = step;
            }
        } else {
            step = half_width;
            last_step = step;
        }

        prev = best;
        f_prev = f_best;
        best += if step.abs() > slack {
            step
        } else {
            slack.copysign(half_width)
        };
        f_best = f(best);
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        f_best.abs(),
    ))
}
