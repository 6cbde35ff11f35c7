//! Cost of capital: CAPM cost of equity and WACC.

use fincalc_core::types::CapitalCostInputs;
use fincalc_core::{CalcError, CalcResult};
use serde::Serialize;

/// CAPM cost of equity, `rf + beta * (rm - rf)`.
#[must_use]
pub fn cost_of_equity(risk_free_rate: f64, beta: f64, market_return: f64) -> f64 {
    risk_free_rate + beta * (market_return - risk_free_rate)
}

/// Weighted average cost of capital.
///
/// ```text
/// V    = E + D
/// WACC = (E / V) * Re + (D / V) * Rd * (1 - t)
/// ```
///
/// # Errors
///
/// Negative `E` or `D`, or `E + D == 0`.
pub fn wacc(
    equity_value: f64,
    debt_value: f64,
    cost_of_equity: f64,
    cost_of_debt: f64,
    tax_rate: f64,
) -> CalcResult<f64> {
    if equity_value < 0.0 || debt_value < 0.0 {
        return Err(CalcError::invalid_input(format!(
            "equity and debt values must be non-negative, got E={equity_value}, D={debt_value}"
        )));
    }

    let total = equity_value + debt_value;
    if total == 0.0 {
        return Err(CalcError::division_by_zero("total capital (E + D) is zero"));
    }

    Ok(equity_value / total * cost_of_equity
        + debt_value / total * cost_of_debt * (1.0 - tax_rate))
}

/// Everything the capital cost calculator shows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CapitalCostReport {
    /// CAPM cost of equity
    pub cost_of_equity: f64,
    /// After-tax cost of debt, `Rd * (1 - t)`
    pub after_tax_cost_of_debt: f64,
    /// `E / V`
    pub equity_weight: f64,
    /// `D / V`
    pub debt_weight: f64,
    /// Weighted average cost of capital
    pub wacc: f64,
}

/// Runs the capital cost calculator on validated inputs.
pub fn capital_cost(inputs: &CapitalCostInputs) -> CalcResult<CapitalCostReport> {
    inputs.validate()?;

    let re = cost_of_equity(inputs.risk_free_rate, inputs.beta, inputs.market_return);
    let wacc = wacc(
        inputs.equity_value,
        inputs.debt_value,
        re,
        inputs.cost_of_debt,
        inputs.tax_rate,
    )?;
    let total = inputs.equity_value + inputs.debt_value;

    Ok(CapitalCostReport {
        cost_of_equity: re,
        after_tax_cost_of_debt: inputs.cost_of_debt * (1.0 - inputs.tax_rate),
        equity_weight: inputs.equity_value / total,
        debt_weight: inputs.debt_value / total,
        wacc,
    })
}
