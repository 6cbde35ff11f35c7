//! Valuation command implementation.
//!
//! Values a firm from six free cash flows (initial outlay, then years 1-5)
//! with a growing perpetuity after year 5.

use anyhow::Result;
use clap::Args;

use fincalc_analytics::valuation::{value_firm, PerpetuityPolicy};
use fincalc_core::types::{CashFlowSeries, ValuationInputs};

use crate::commands::Context;
use crate::output::{format_currency, print_warning, KeyValue, Report};

/// Arguments for the valuation command.
#[derive(Args, Debug)]
pub struct ValuationArgs {
    /// Six comma-separated cash flows: initial outlay, then years 1-5
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
    pub cash_flows: Vec<f64>,

    /// Perpetual growth rate after year 5 (decimal, e.g. 0.02)
    #[arg(long, allow_hyphen_values = true)]
    pub growth_rate: f64,

    /// Discount rate (decimal, e.g. 0.10)
    #[arg(long, allow_hyphen_values = true)]
    pub discount_rate: f64,

    /// Current cash
    #[arg(long, default_value = "0")]
    pub cash: f64,

    /// Liquid assets
    #[arg(long, default_value = "0")]
    pub liquid_assets: f64,

    /// Current bank loan
    #[arg(long, default_value = "0")]
    pub bank_loan: f64,

    /// Shares outstanding (fair value per share is N/A without it)
    #[arg(long, default_value = "0")]
    pub shares: f64,

    /// Treatment of growth rate == discount rate: strict or zero
    #[arg(long)]
    pub perpetuity: Option<PerpetuityPolicy>,
}

/// Execute the valuation command.
pub fn execute(args: ValuationArgs, ctx: &Context) -> Result<()> {
    let series = CashFlowSeries::try_from_slice(&args.cash_flows)?;
    let inputs = ValuationInputs::new(args.growth_rate, args.discount_rate, args.shares)
        .with_balance_sheet(args.cash, args.liquid_assets, args.bank_loan);
    let policy = args.perpetuity.unwrap_or(ctx.perpetuity);

    tracing::debug!(%policy, "valuing firm");
    let report = value_firm(&series, &inputs, policy)?;

    if !ctx.output.quiet {
        if report.irr.is_nan() {
            print_warning("IRR could not be determined for these cash flows");
        }
        if report.perpetuity_value == 0.0 && policy == PerpetuityPolicy::ZeroWhenDegenerate {
            print_warning("Perpetuity value taken as zero");
        }
    }

    let precision = ctx.output.precision;
    let mut results: Vec<KeyValue> = series
        .as_array()
        .iter()
        .enumerate()
        .map(|(year, amount)| KeyValue::currency(format!("FCFF Year {year}"), *amount))
        .collect();
    results.push(KeyValue::new("", "")); // Separator
    results.push(KeyValue::currency("Perpetuity Value", report.perpetuity_value));
    results.push(KeyValue::currency("NPV", report.npv));
    results.push(KeyValue::percent("IRR", report.irr, precision));
    results.push(KeyValue::number("Profitability Index", report.profitability_index, precision));
    results.push(KeyValue::currency("Equity Value", report.equity_value));
    results.push(KeyValue::currency("Fair Value per Share", report.fair_value_per_share));

    Report {
        title: "DCF Valuation",
        rows: results,
        data: &report,
        headline: format_currency(report.fair_value_per_share),
    }
    .print(&ctx.output)
}
