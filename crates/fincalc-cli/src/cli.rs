//! CLI argument definitions.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{BondArgs, BreakevenArgs, ConfigArgs, ValuationArgs, WaccArgs};
use crate::error::CliError;

/// fincalc - Small financial calculators
#[derive(Parser)]
#[command(name = "fincalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format, else table)
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log solver and validation details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to the user config directory)
    #[arg(long, env = "FINCALC_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Breakeven quantity and amount, with an optional profit target
    Breakeven(BreakevenArgs),

    /// Discounted-cash-flow valuation (NPV, IRR, fair value per share)
    Valuation(ValuationArgs),

    /// CAPM cost of equity and weighted average cost of capital
    Wacc(WaccArgs),

    /// Present value of a coupon bond
    Bond(BondArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the headline value)
    Minimal,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true).map_err(|_| CliError::InvalidFormat(s.to_string()))
    }
}
