//! WACC command implementation.

use anyhow::Result;
use clap::Args;

use fincalc_analytics::capital_cost::capital_cost;
use fincalc_core::types::CapitalCostInputs;

use crate::commands::Context;
use crate::output::{format_percent, KeyValue, Report};

/// Arguments for the wacc command. Rates are decimals (0.05 for 5%).
#[derive(Args, Debug)]
pub struct WaccArgs {
    /// Risk-free rate
    #[arg(long)]
    pub risk_free_rate: f64,

    /// Equity beta
    #[arg(long)]
    pub beta: f64,

    /// Expected market return
    #[arg(long)]
    pub market_return: f64,

    /// Market value of equity
    #[arg(long)]
    pub equity: f64,

    /// Market value of debt
    #[arg(long)]
    pub debt: f64,

    /// Pre-tax cost of debt
    #[arg(long)]
    pub cost_of_debt: f64,

    /// Corporate tax rate
    #[arg(long)]
    pub tax_rate: f64,
}

/// Execute the wacc command.
pub fn execute(args: WaccArgs, ctx: &Context) -> Result<()> {
    let inputs = CapitalCostInputs {
        risk_free_rate: args.risk_free_rate,
        beta: args.beta,
        market_return: args.market_return,
        equity_value: args.equity,
        debt_value: args.debt,
        cost_of_debt: args.cost_of_debt,
        tax_rate: args.tax_rate,
    };
    let report = capital_cost(&inputs)?;

    let precision = ctx.output.precision;
    let results = vec![
        KeyValue::percent("Cost of Equity", report.cost_of_equity, precision),
        KeyValue::percent("After-tax Cost of Debt", report.after_tax_cost_of_debt, precision),
        KeyValue::percent("Equity Weight", report.equity_weight, precision),
        KeyValue::percent("Debt Weight", report.debt_weight, precision),
        KeyValue::percent("WACC", report.wacc, precision),
    ];

    Report {
        title: "Cost of Capital",
        rows: results,
        data: &report,
        headline: format_percent(report.wacc, precision),
    }
    .print(&ctx.output)
}
