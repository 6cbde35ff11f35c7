//! # fincalc Analytics
//!
//! The financial formula library behind the fincalc calculators.
//!
//! Four independent groups of pure functions:
//! - **Breakeven**: breakeven point, target quantity, cost/revenue chart data
//! - **Valuation**: perpetuity value, NPV, IRR, profitability index, equity
//!   value and fair value per share
//! - **Capital cost**: CAPM cost of equity and WACC
//! - **Bond**: present value of a coupon bond
//!
//! Nothing here holds state or performs I/O. Identical inputs always give
//! identical outputs, so every function may be called from any thread.
//!
//! ## Usage
//!
//! ```rust
//! use fincalc_analytics::prelude::*;
//!
//! let point = breakeven(50.0, 30.0, 2000.0).unwrap();
//! assert!((point.quantity - 100.0).abs() < 1e-9);
//!
//! let re = cost_of_equity(0.03, 1.0, 0.08);
//! let rate = wacc(1_000_000.0, 500_000.0, re, 0.05, 0.21).unwrap();
//! assert!((rate - 0.06650).abs() < 1e-4);
//!
//! let value = bond_value(1000.0, 0.05, 0.05, 10, Frequency::Yearly).unwrap();
//! assert!((value - 1000.0).abs() < 1e-6);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all)]
#![allow(clippy::float_cmp)]

pub mod bond;
pub mod breakeven;
pub mod capital_cost;
pub mod valuation;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bond::{bond_value, value_bond, BondValuation};
    pub use crate::breakeven::chart::{plot_range, ChartData, ChartMarker, MarkerKind};
    pub use crate::breakeven::{analyze, breakeven, target_quantity, BreakevenAnalysis, BreakevenPoint};
    pub use crate::capital_cost::{capital_cost, cost_of_equity, wacc, CapitalCostReport};
    pub use crate::valuation::{
        equity_value, fair_value_per_share, irr, npv, npv_derivative, perpetuity_value,
        perpetuity_value_or_zero, profitability_index, solve_irr, value_firm, IrrConfig,
        IrrSolution, PerpetuityPolicy, ValuationReport,
    };
    pub use fincalc_core::prelude::*;
}
