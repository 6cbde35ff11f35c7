//! Domain types for the calculators.
//!
//! - [`CashFlowSeries`]: Initial outlay plus five projected years of FCFF
//! - [`Frequency`]: Bond compounding frequency
//! - [`BreakevenInputs`], [`ValuationInputs`], [`CapitalCostInputs`],
//!   [`BondInputs`]: Per-calculator input records

mod cashflow;
mod frequency;
mod inputs;

pub use cashflow::{CashFlowSeries, CASH_FLOW_SLOTS, PROJECTION_YEARS};
pub use frequency::Frequency;
pub use inputs::{
    BondInputs, BreakevenInputs, CapitalCostInputs, ValuationInputs, MAX_BETA, MAX_RATE,
};
