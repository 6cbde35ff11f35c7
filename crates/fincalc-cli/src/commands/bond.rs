//! Bond command implementation.

use anyhow::Result;
use clap::Args;

use fincalc_analytics::bond::value_bond;
use fincalc_core::types::{BondInputs, Frequency};

use crate::commands::Context;
use crate::output::{format_currency, KeyValue, Report};

/// Arguments for the bond command.
#[derive(Args, Debug)]
pub struct BondArgs {
    /// Face (par) value
    #[arg(long, default_value = "1000")]
    pub face_value: f64,

    /// Annual coupon rate (decimal, e.g. 0.05)
    #[arg(long)]
    pub coupon_rate: f64,

    /// Annual market rate (decimal, e.g. 0.04)
    #[arg(long)]
    pub market_rate: f64,

    /// Whole years to maturity
    #[arg(long)]
    pub years: u32,

    /// Compounding frequency: yearly, half-yearly or quarterly
    #[arg(long, default_value = "yearly")]
    pub frequency: Frequency,
}

/// Execute the bond command.
pub fn execute(args: BondArgs, ctx: &Context) -> Result<()> {
    let inputs = BondInputs {
        face_value: args.face_value,
        coupon_rate: args.coupon_rate,
        market_rate: args.market_rate,
        years: args.years,
        frequency: args.frequency,
    };
    let valuation = value_bond(&inputs)?;

    let precision = ctx.output.precision;
    let results = vec![
        KeyValue::currency("Face Value", inputs.face_value),
        KeyValue::new("Frequency", valuation.frequency.label()),
        KeyValue::new("Periods", valuation.periods.to_string()),
        KeyValue::currency("Coupon Payment", valuation.coupon_payment),
        KeyValue::percent("Rate per Period", valuation.discount_rate_per_period, precision),
        KeyValue::new("", ""), // Separator
        KeyValue::currency("Bond Value", valuation.value),
        KeyValue::currency("Premium / Discount", valuation.premium(inputs.face_value)),
    ];

    Report {
        title: "Bond Valuation",
        rows: results,
        data: &valuation,
        headline: format_currency(valuation.value),
    }
    .print(&ctx.output)
}
