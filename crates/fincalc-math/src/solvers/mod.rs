//! Root-finding algorithms.
//!
//! This module provides numerical solvers for finding roots of equations:
//!
//! - [`hybrid`]: monitored Newton-Raphson, then a bracketed fallback
//! - [`brent`]: inverse quadratic interpolation guarded by bisection
//! - [`bisection`]: interval halving
//! - [`find_bracket`]: Bounded outward scan for a sign change
//!
//! # Choosing a Solver
//!
//! | Solver | Speed | Reliability | Requires |
//! |--------|-------|-------------|----------|
//! | Hybrid | Quadratic near the root | Guaranteed* | Guess and derivative |
//! | Brent | Superlinear | Guaranteed | Bracket |
//! | Bisection | Linear | Guaranteed | Bracket |
//!
//! *When a sign change exists inside the search domain.
//!
//! # Example: Rate of Return
//!
//! ```rust
//! use fincalc_math::solvers::{hybrid, SolverConfig};
//!
//! // Pay 1000 today, receive 300 a year for 5 years
//! let npv = |r: f64| (1..=5).map(|t| 300.0 / (1.0 + r).powi(t)).sum::<f64>() - 1000.0;
//! let d_npv = |r: f64| (1..=5).map(|t| -f64::from(t) * 300.0 / (1.0 + r).powi(t + 1)).sum::<f64>();
//!
//! let result = hybrid(npv, d_npv, 0.10, Some((-0.99, 10.0)), &SolverConfig::default()).unwrap();
//! assert!((result.root - 0.1524).abs() < 1e-4);
//! ```

mod bisection;
mod bracket;
mod brent;
mod hybrid;

pub use bisection::bisection;
pub use bracket::{find_bracket, MAX_BRACKET_EXPANSIONS};
pub use brent::brent;
pub use hybrid::hybrid;

use std::fmt;

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Derivatives smaller than this abort the Newton stage of [`hybrid`].
pub const MIN_DERIVATIVE: f64 = 1e-15;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Tolerance for convergence.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
    /// Bracketing method used once Newton gives up.
    pub fallback: BracketMethod,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            fallback: BracketMethod::Brent,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
            fallback: BracketMethod::Brent,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the bracketing fallback.
    #[must_use]
    pub fn with_fallback(mut self, fallback: BracketMethod) -> Self {
        self.fallback = fallback;
        self
    }
}

/// Bracketing method used by [`hybrid`] when Newton fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BracketMethod {
    /// Brent's method
    #[default]
    Brent,
    /// Plain bisection
    Bisection,
}

/// The algorithm that produced a root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverMethod {
    /// Newton-Raphson iteration
    Newton,
    /// Brent's method
    Brent,
    /// Bisection
    Bisection,
}

impl fmt::Display for SolverMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SolverMethod::Newton => "Newton-Raphson",
            SolverMethod::Brent => "Brent",
            SolverMethod::Bisection => "Bisection",
        };
        f.write_str(name)
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
    /// Algorithm that found the root.
    pub method: SolverMethod,
}
