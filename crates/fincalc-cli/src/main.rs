//! fincalc CLI - Command-line interface for the financial calculators.
//!
//! # Usage
//!
//! ```bash
//! # Breakeven point with a profit target
//! fincalc breakeven --sales-price 50 --variable-cost 30 --fixed-cost 2000 --desired-profit 1000
//!
//! # DCF valuation
//! fincalc valuation --cash-flows -1000,200,200,200,200,200 --growth-rate 0.02 --discount-rate 0.10 --shares 100
//!
//! # Cost of capital
//! fincalc wacc --risk-free-rate 0.03 --beta 1.0 --market-return 0.08 \
//!     --equity 1000000 --debt 500000 --cost-of-debt 0.05 --tax-rate 0.21
//!
//! # Bond value
//! fincalc bond --face-value 1000 --coupon-rate 0.05 --market-rate 0.04 --years 10 --frequency half-yearly
//! ```

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::config::{config_path, Settings};
use commands::Context;
use output::{print_error, OutputOptions};

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so they never mix with results.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config_path = config_path(cli.config.as_deref())?;
    let settings = Settings::load(&config_path)?;

    if !settings.use_colors() {
        colored::control::set_override(false);
    }

    let ctx = Context {
        output: OutputOptions {
            format: cli.format.unwrap_or_else(|| settings.format()),
            precision: settings.precision(),
            quiet: cli.quiet,
        },
        perpetuity: settings.perpetuity_policy(),
        config_path,
    };
    tracing::debug!(?ctx, "resolved settings");

    // Execute command
    match cli.command {
        Commands::Breakeven(args) => commands::breakeven::execute(args, &ctx),
        Commands::Valuation(args) => commands::valuation::execute(args, &ctx),
        Commands::Wacc(args) => commands::wacc::execute(args, &ctx),
        Commands::Bond(args) => commands::bond::execute(args, &ctx),
        Commands::Config(args) => commands::config::execute(args, &ctx),
    }
}
