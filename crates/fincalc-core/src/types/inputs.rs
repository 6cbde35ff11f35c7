//! Immutable input records, one per calculator.
//!
//! Each record carries the scalar fields a calculator form collects. The
//! `validate` methods enforce the ranges the input widgets allow; the formula
//! functions themselves only guard their own numeric domains.

use serde::{Deserialize, Serialize};

use super::Frequency;
use crate::error::{ensure_finite, ensure_in_range, ensure_positive, CalcError, CalcResult};

/// Upper bound for rate inputs (as decimals).
pub const MAX_RATE: f64 = 1.0;

/// Upper bound for equity beta.
pub const MAX_BETA: f64 = 10.0;

/// Inputs to breakeven analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakevenInputs {
    /// Sales price per unit
    pub sales_price: f64,
    /// Variable cost per unit
    pub variable_cost: f64,
    /// Fixed cost for the period
    pub fixed_cost: f64,
    /// Profit to target, if any
    #[serde(default)]
    pub desired_profit: Option<f64>,
}

impl BreakevenInputs {
    /// Creates breakeven inputs without a profit target.
    #[must_use]
    pub fn new(sales_price: f64, variable_cost: f64, fixed_cost: f64) -> Self {
        Self {
            sales_price,
            variable_cost,
            fixed_cost,
            desired_profit: None,
        }
    }

    /// Sets the desired profit.
    #[must_use]
    pub fn with_desired_profit(mut self, desired_profit: f64) -> Self {
        self.desired_profit = Some(desired_profit);
        self
    }

    /// Desired profit when one is set and strictly positive.
    #[must_use]
    pub fn profit_target(&self) -> Option<f64> {
        self.desired_profit.filter(|p| *p > 0.0)
    }

    /// Requires positive price and costs, and a non-negative profit target.
    pub fn validate(&self) -> CalcResult<()> {
        ensure_positive("sales price", self.sales_price)?;
        ensure_positive("variable cost", self.variable_cost)?;
        ensure_positive("fixed cost", self.fixed_cost)?;
        if let Some(profit) = self.desired_profit {
            ensure_in_range("desired profit", profit, 0.0, f64::MAX)?;
        }
        Ok(())
    }
}

/// Inputs to discounted-cash-flow valuation (besides the cash flow series).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationInputs {
    /// Perpetual growth rate after year 5
    pub growth_rate: f64,
    /// Discount rate
    pub discount_rate: f64,
    /// Current cash
    #[serde(default)]
    pub cash: f64,
    /// Liquid assets
    #[serde(default)]
    pub liquid_assets: f64,
    /// Current bank loan
    #[serde(default)]
    pub bank_loan: f64,
    /// Shares outstanding
    pub outstanding_shares: f64,
}

impl ValuationInputs {
    /// Creates valuation inputs with zero balance-sheet adjustments.
    #[must_use]
    pub fn new(growth_rate: f64, discount_rate: f64, outstanding_shares: f64) -> Self {
        Self {
            growth_rate,
            discount_rate,
            cash: 0.0,
            liquid_assets: 0.0,
            bank_loan: 0.0,
            outstanding_shares,
        }
    }

    /// Sets cash, liquid assets and bank loan.
    #[must_use]
    pub fn with_balance_sheet(mut self, cash: f64, liquid_assets: f64, bank_loan: f64) -> Self {
        self.cash = cash;
        self.liquid_assets = liquid_assets;
        self.bank_loan = bank_loan;
        self
    }

    /// Requires finite rates in `[-1, 1]`, finite balances and non-negative shares.
    ///
    /// Zero shares passes validation: the per-share figure is then reported as
    /// undefined rather than rejecting the whole valuation.
    pub fn validate(&self) -> CalcResult<()> {
        ensure_in_range("growth rate", self.growth_rate, -MAX_RATE, MAX_RATE)?;
        ensure_in_range("discount rate", self.discount_rate, -MAX_RATE, MAX_RATE)?;
        ensure_finite("cash", self.cash)?;
        ensure_finite("liquid assets", self.liquid_assets)?;
        ensure_finite("bank loan", self.bank_loan)?;
        ensure_in_range("outstanding shares", self.outstanding_shares, 0.0, f64::MAX)?;
        if self.discount_rate <= -1.0 {
            return Err(CalcError::invalid_input(
                "discount rate must be greater than -100%",
            ));
        }
        Ok(())
    }
}

/// Inputs to the CAPM / WACC calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapitalCostInputs {
    /// Risk-free rate
    pub risk_free_rate: f64,
    /// Equity beta
    pub beta: f64,
    /// Expected market return
    pub market_return: f64,
    /// Market value of equity (E)
    pub equity_value: f64,
    /// Market value of debt (D)
    pub debt_value: f64,
    /// Pre-tax cost of debt
    pub cost_of_debt: f64,
    /// Corporate tax rate
    pub tax_rate: f64,
}

impl CapitalCostInputs {
    /// Requires rates in `[0, 1]`, beta in `[0, 10]` and non-negative E and D.
    pub fn validate(&self) -> CalcResult<()> {
        ensure_in_range("risk-free rate", self.risk_free_rate, 0.0, MAX_RATE)?;
        ensure_in_range("beta", self.beta, 0.0, MAX_BETA)?;
        ensure_in_range("market return", self.market_return, 0.0, MAX_RATE)?;
        ensure_in_range("equity value", self.equity_value, 0.0, f64::MAX)?;
        ensure_in_range("debt value", self.debt_value, 0.0, f64::MAX)?;
        ensure_in_range("cost of debt", self.cost_of_debt, 0.0, MAX_RATE)?;
        ensure_in_range("tax rate", self.tax_rate, 0.0, MAX_RATE)?;
        Ok(())
    }
}

/// Inputs to coupon bond valuation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BondInputs {
    /// Face (par) value
    pub face_value: f64,
    /// Annual coupon rate
    pub coupon_rate: f64,
    /// Annual market (discount) rate
    pub market_rate: f64,
    /// Whole years to maturity
    pub years: u32,
    /// Compounding frequency; required, there is no default
    pub frequency: Frequency,
}

impl BondInputs {
    /// Requires positive face value, rates in `[0, 1]` and at least one year.
    pub fn validate(&self) -> CalcResult<()> {
        ensure_positive("face value", self.face_value)?;
        ensure_in_range("coupon rate", self.coupon_rate, 0.0, MAX_RATE)?;
        ensure_in_range("market rate", self.market_rate, 0.0, MAX_RATE)?;
        if self.years == 0 {
            return Err(CalcError::invalid_input("years must be at least 1"));
        }
        Ok(())
    }
}
