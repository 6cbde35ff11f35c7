//! Breakeven analysis.
//!
//! Provides:
//! - The breakeven point (units and sales amount) for a unit price, a unit
//!   variable cost and a fixed cost
//! - The unit volume needed to earn a desired profit
//! - Cost/revenue series for charting both (see [`chart`])

pub mod chart;

use fincalc_core::types::BreakevenInputs;
use fincalc_core::{CalcError, CalcResult};
use serde::Serialize;

use self::chart::ChartData;

/// Unit volume and sales amount at which revenue equals total cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BreakevenPoint {
    /// Units sold
    pub quantity: f64,
    /// Sales revenue at that volume
    pub amount: f64,
}

/// Full result of the breakeven calculator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakevenAnalysis {
    /// Inputs the analysis was run with
    pub inputs: BreakevenInputs,
    /// Breakeven point
    pub point: BreakevenPoint,
    /// Units needed for the desired profit, when a positive profit was given
    pub target_quantity: Option<f64>,
    /// Cost/revenue chart data, absent when the plot range is too large
    pub chart: Option<ChartData>,
}

/// Per-unit contribution margin, which must be strictly positive.
fn contribution_margin(sales_price: f64, variable_cost: f64) -> CalcResult<f64> {
    let margin = sales_price - variable_cost;
    if margin.is_nan() || margin <= 0.0 {
        return Err(CalcError::division_by_zero(format!(
            "contribution margin must be positive (sales price {sales_price}, variable cost {variable_cost})"
        )));
    }
    Ok(margin)
}

/// Breakeven quantity and amount.
///
/// ```text
/// quantity = fixed_cost / (sales_price - variable_cost)
/// amount   = quantity * sales_price
/// ```
///
/// A zero or negative contribution margin is a domain error rather than an
/// infinite or negative quantity.
///
/// # Example
///
/// ```rust
/// use fincalc_analytics::breakeven::breakeven;
///
/// let point = breakeven(50.0, 30.0, 2000.0).unwrap();
/// assert_eq!(point.quantity, 100.0);
/// assert_eq!(point.amount, 5000.0);
///
/// assert!(breakeven(30.0, 30.0, 2000.0).is_err());
/// ```
pub fn breakeven(sales_price: f64, variable_cost: f64, fixed_cost: f64) -> CalcResult<BreakevenPoint> {
    let margin = contribution_margin(sales_price, variable_cost)?;
    let quantity = fixed_cost / margin;

    Ok(BreakevenPoint {
        quantity,
        amount: quantity * sales_price,
    })
}

/// Units required to earn `desired_profit` on top of covering fixed cost.
///
/// ```text
/// quantity = (fixed_cost + desired_profit) / (sales_price - variable_cost)
/// ```
pub fn target_quantity(
    sales_price: f64,
    variable_cost: f64,
    fixed_cost: f64,
    desired_profit: f64,
) -> CalcResult<f64> {
    if desired_profit.is_nan() || desired_profit < 0.0 {
        return Err(CalcError::invalid_input(format!(
            "desired profit must be non-negative, got {desired_profit}"
        )));
    }
    let margin = contribution_margin(sales_price, variable_cost)?;
    Ok((fixed_cost + desired_profit) / margin)
}

/// Runs the breakeven calculator end to end.
///
/// Price and both costs must be positive. A target quantity is computed only
/// for a strictly positive desired profit, and the chart range follows the
/// same rule (see [`chart::plot_range`]).
pub fn analyze(inputs: &BreakevenInputs) -> CalcResult<BreakevenAnalysis> {
    inputs.validate()?;

    let point = breakeven(inputs.sales_price, inputs.variable_cost, inputs.fixed_cost)?;

    let target_quantity = match inputs.profit_target() {
        Some(profit) => Some(target_quantity(
            inputs.sales_price,
            inputs.variable_cost,
            inputs.fixed_cost,
            profit,
        )?),
        None => None,
    };

    let chart = match ChartData::build(inputs, point, target_quantity) {
        Ok(chart) => Some(chart),
        Err(err) => {
            log::warn!("breakeven chart skipped: {err}");
            None
        }
    };

    Ok(BreakevenAnalysis {
        inputs: *inputs,
        point,
        target_quantity,
        chart,
    })
}
