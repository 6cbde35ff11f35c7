//! # fincalc Core
//!
//! Core types and error taxonomy shared by the fincalc calculators.
//!
//! This crate provides the foundational building blocks used throughout fincalc:
//!
//! - **Types**: Immutable input records for each calculator, the six-slot
//!   [`CashFlowSeries`](types::CashFlowSeries) and the bond compounding
//!   [`Frequency`](types::Frequency)
//! - **Errors**: The numeric-domain error taxonomy ([`CalcError`])
//!
//! ## Example
//!
//! ```rust
//! use fincalc_core::prelude::*;
//!
//! let series = CashFlowSeries::new([-1000.0, 200.0, 200.0, 200.0, 200.0, 200.0]);
//! assert_eq!(series.last_projected(), 200.0);
//!
//! let frequency: Frequency = "Half-Yearly".parse().unwrap();
//! assert_eq!(frequency.periods_per_year(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CalcError, CalcResult};
    pub use crate::types::{
        BondInputs, BreakevenInputs, CapitalCostInputs, CashFlowSeries, Frequency,
        ValuationInputs, CASH_FLOW_SLOTS,
    };
}

pub use error::{CalcError, CalcResult};
