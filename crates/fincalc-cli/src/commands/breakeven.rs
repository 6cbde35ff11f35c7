//! Breakeven command implementation.
//!
//! Calculates the breakeven point and, given a desired profit, the target
//! quantity. `--chart` adds the cost/revenue series behind the chart.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use fincalc_analytics::breakeven::chart::ChartData;
use fincalc_analytics::breakeven::{analyze, BreakevenAnalysis};
use fincalc_core::types::BreakevenInputs;

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{format_number, print_header, print_output, KeyValue, Report};

/// Arguments for the breakeven command.
#[derive(Args, Debug)]
pub struct BreakevenArgs {
    /// Sales price per unit
    #[arg(long)]
    pub sales_price: f64,

    /// Variable cost per unit
    #[arg(long)]
    pub variable_cost: f64,

    /// Fixed cost for the period
    #[arg(long)]
    pub fixed_cost: f64,

    /// Profit to target (a target quantity is shown when positive)
    #[arg(long)]
    pub desired_profit: Option<f64>,

    /// Include the cost/revenue chart series
    #[arg(long)]
    pub chart: bool,
}

/// One point of the chart series.
#[derive(Debug, Serialize, Tabled)]
pub struct ChartRow {
    #[tabled(rename = "Quantity")]
    pub quantity: u64,
    #[tabled(rename = "Total Cost")]
    pub total_cost: f64,
    #[tabled(rename = "Total Revenue")]
    pub total_revenue: f64,
}

fn chart_rows(chart: &ChartData) -> Vec<ChartRow> {
    chart
        .quantities
        .iter()
        .zip(&chart.total_cost)
        .zip(&chart.total_revenue)
        .map(|((&quantity, &total_cost), &total_revenue)| ChartRow {
            quantity,
            total_cost,
            total_revenue,
        })
        .collect()
}

fn units(value: f64, precision: u32) -> String {
    format!("{} units", format_number(value, precision))
}

/// Execute the breakeven command.
pub fn execute(args: BreakevenArgs, ctx: &Context) -> Result<()> {
    let mut inputs = BreakevenInputs::new(args.sales_price, args.variable_cost, args.fixed_cost);
    if let Some(profit) = args.desired_profit {
        inputs = inputs.with_desired_profit(profit);
    }

    let mut analysis: BreakevenAnalysis = analyze(&inputs)?;
    tracing::debug!(quantity = analysis.point.quantity, "breakeven computed");

    let precision = ctx.output.precision;
    let mut results = vec![
        KeyValue::currency("Sales Price", inputs.sales_price),
        KeyValue::currency("Variable Cost", inputs.variable_cost),
        KeyValue::currency("Fixed Cost", inputs.fixed_cost),
        KeyValue::new("", ""), // Separator
        KeyValue::new("Breakeven Quantity", units(analysis.point.quantity, precision)),
        KeyValue::currency("Breakeven Amount", analysis.point.amount),
    ];
    if let (Some(target), Some(profit)) = (analysis.target_quantity, inputs.profit_target()) {
        results.push(KeyValue::currency("Desired Profit", profit));
        results.push(KeyValue::new("Target Quantity", units(target, precision)));
    }

    let chart = if args.chart {
        analysis.chart.take()
    } else {
        None
    };
    if args.chart && chart.is_none() {
        crate::output::print_warning("Chart range too large; series omitted");
    }

    // CSV output carries either the summary or the series, never both
    if ctx.output.format == OutputFormat::Csv {
        if let Some(chart) = &chart {
            return print_output(&chart_rows(chart), OutputFormat::Csv);
        }
    }

    analysis.chart = chart;
    let report = Report {
        title: "Breakeven Analysis",
        rows: results,
        data: &analysis,
        headline: format_number(analysis.point.quantity, precision),
    };
    report.print(&ctx.output)?;

    if ctx.output.format == OutputFormat::Table {
        if let Some(chart) = &analysis.chart {
            if !ctx.output.quiet {
                print_header("Chart Data");
            }
            print_output(&chart_rows(chart), OutputFormat::Table)?;
        }
    }

    Ok(())
}
