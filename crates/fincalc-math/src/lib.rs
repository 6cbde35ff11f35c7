//! # fincalc Math
//!
//! Numerical utilities for the fincalc calculators.
//!
//! This crate provides bounded root-finding algorithms:
//!
//! - **Hybrid**: monitored Newton-Raphson first, then a bracket search and a
//!   bracketed method
//! - **Brent**: guaranteed convergence inside a sign-changing bracket
//! - **Bisection**: the slow, simple bracketing fallback
//!
//! Every solver stops after [`SolverConfig::max_iterations`](solvers::SolverConfig)
//! iterations, so each call terminates with either a root or an error.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_precision_loss)]

pub mod error;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{
        bisection, brent, find_bracket, hybrid, BracketMethod, SolverConfig, SolverMethod,
        SolverResult,
    };
}

pub use error::{MathError, MathResult};
