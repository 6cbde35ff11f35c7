//! Output formatting utilities.

use colored::Colorize;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;

/// Shown in place of a figure that is undefined.
pub const NOT_AVAILABLE: &str = "N/A";

/// How results are rendered, resolved from flags and the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputOptions {
    /// Output format
    pub format: OutputFormat,
    /// Decimal places for quantities, ratios and percentages
    pub precision: u32,
    /// Suppress headers and status lines
    pub quiet: bool,
}

/// A calculator result ready for printing.
pub struct Report<'a, T: Serialize> {
    /// Table heading
    pub title: &'a str,
    /// Formatted rows for table and CSV output
    pub rows: Vec<KeyValue>,
    /// Raw result for JSON output
    pub data: &'a T,
    /// The single value printed in minimal mode
    pub headline: String,
}

impl<T: Serialize> Report<'_, T> {
    /// Prints the report in the requested format.
    pub fn print(&self, options: &OutputOptions) -> anyhow::Result<()> {
        match options.format {
            OutputFormat::Table => {
                if !options.quiet {
                    print_header(self.title);
                }
                print_output(&self.rows, options.format)
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(self.data)?);
                Ok(())
            }
            OutputFormat::Csv => print_output(&self.rows, options.format),
            OutputFormat::Minimal => {
                println!("{}", self.headline);
                Ok(())
            }
        }
    }
}

/// Formats and prints output based on the specified format.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print_table(data),
        OutputFormat::Json => print_json(data),
        OutputFormat::Csv => print_csv(data),
        OutputFormat::Minimal => print_minimal(data),
    }
}

/// Prints data as a formatted table.
fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{table}");
    Ok(())
}

/// Prints data as JSON.
fn print_json<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints data as CSV.
fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Prints minimal output (first value only).
fn print_minimal<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    if let Some(first) = data.first() {
        println!("{}", serde_json::to_string(first)?);
    }
    Ok(())
}

/// Rounds half away from zero, or `None` for NaN and infinities.
fn round(value: f64, places: u32) -> Option<Decimal> {
    Decimal::from_f64(value).map(|d| d.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero))
}

/// Formats a plain number to `places` decimals.
pub fn format_number(value: f64, places: u32) -> String {
    match round(value, places) {
        Some(d) => format!("{d:.prec$}", prec = places as usize),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Formats money as `$1234.56` (or `-$1234.56`).
pub fn format_currency(value: f64) -> String {
    match round(value, 2) {
        Some(d) if d.is_sign_negative() && !d.is_zero() => format!("-${:.2}", d.abs()),
        Some(d) => format!("${:.2}", d.abs()),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Formats a decimal rate as a percentage, e.g. `0.0665` -> `6.65%`.
pub fn format_percent(value: f64, places: u32) -> String {
    match round(value * 100.0, places) {
        Some(d) => format!("{d:.prec$}%", prec = places as usize),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a key-value pair formatted as money.
    pub fn currency(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, format_currency(value))
    }

    /// Creates a key-value pair formatted as a percentage.
    pub fn percent(key: impl Into<String>, value: f64, places: u32) -> Self {
        Self::new(key, format_percent(value, places))
    }

    /// Creates a key-value pair formatted as a plain number.
    pub fn number(key: impl Into<String>, value: f64, places: u32) -> Self {
        Self::new(key, format_number(value, places))
    }
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}
