//! Config command implementation.
//!
//! Manages persisted CLI defaults.

use anyhow::Result;
use clap::{Args, Subcommand};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use fincalc_analytics::valuation::PerpetuityPolicy;

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::error::{CliError, CliResult};
use crate::output::{print_header, print_info, print_success, print_warning, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// List available configuration keys
    List,

    /// Reset configuration to defaults
    Reset(ResetArgs),

    /// Show configuration file location
    Path,
}

/// Arguments for get subcommand.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key
    pub key: String,
}

/// Arguments for set subcommand.
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key
    pub key: String,

    /// Configuration value
    pub value: String,
}

/// Arguments for reset subcommand.
#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Reset all settings (not just one)
    #[arg(long)]
    pub all: bool,

    /// Specific key to reset (optional)
    pub key: Option<String>,
}

/// CLI configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// Default output format
    DefaultFormat,
    /// Precision for quantities, ratios and percentages
    DecimalPrecision,
    /// Whether to use colors
    UseColors,
    /// Treatment of growth rate == discount rate
    PerpetuityPolicy,
}

impl ConfigKey {
    /// Every key, in display order.
    pub const ALL: [ConfigKey; 4] = [
        Self::DefaultFormat,
        Self::DecimalPrecision,
        Self::UseColors,
        Self::PerpetuityPolicy,
    ];

    fn parse(s: &str) -> CliResult<Self> {
        match s.to_lowercase().as_str() {
            "default_format" | "format" => Ok(Self::DefaultFormat),
            "decimal_precision" | "precision" => Ok(Self::DecimalPrecision),
            "use_colors" | "colors" => Ok(Self::UseColors),
            "perpetuity_policy" | "perpetuity" => Ok(Self::PerpetuityPolicy),
            _ => Err(CliError::UnknownKey(s.to_string())),
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::DefaultFormat => "default_format",
            Self::DecimalPrecision => "decimal_precision",
            Self::UseColors => "use_colors",
            Self::PerpetuityPolicy => "perpetuity_policy",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Self::DefaultFormat => "Default output format (table, json, csv, minimal)",
            Self::DecimalPrecision => "Decimal places for quantities, ratios and percentages (0-10)",
            Self::UseColors => "Enable colored output (true, false)",
            Self::PerpetuityPolicy => "Perpetuity when growth equals discount rate (strict, zero)",
        }
    }

    fn default_value(&self) -> &'static str {
        match self {
            Self::DefaultFormat => "table",
            Self::DecimalPrecision => "2",
            Self::UseColors => "true",
            Self::PerpetuityPolicy => "strict",
        }
    }

    /// Checks a value for this key.
    fn validate(&self, value: &str) -> CliResult<()> {
        let invalid = |hint: &'static str| CliError::InvalidValue {
            key: self.as_str(),
            value: value.to_string(),
            hint,
        };
        match self {
            Self::DefaultFormat => {
                value.parse::<OutputFormat>()?;
            }
            Self::DecimalPrecision => {
                parse_precision(value).ok_or_else(|| invalid("Must be a whole number from 0 to 10."))?;
            }
            Self::UseColors => {
                parse_bool(value).ok_or_else(|| invalid("Use true or false."))?;
            }
            Self::PerpetuityPolicy => {
                value
                    .parse::<PerpetuityPolicy>()
                    .map_err(|_| invalid("Use strict or zero."))?;
            }
        }
        Ok(())
    }
}

fn parse_precision(value: &str) -> Option<u32> {
    value.trim().parse().ok().filter(|p| *p <= 10)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Persisted key/value settings.
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Settings {
    #[serde(flatten)]
    values: HashMap<String, String>,
}

impl Settings {
    /// Loads settings, or defaults if the file does not exist yet.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&content).map_err(|e| {
                CliError::Config(format!("{} is not valid JSON: {e}", path.display()))
            })?)
        } else {
            Ok(Self::default())
        }
    }

    fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Stored value, or the key's default.
    fn value(&self, key: ConfigKey) -> &str {
        self.values
            .get(key.as_str())
            .map_or(key.default_value(), String::as_str)
    }

    /// Stored value parsed by `parse`, falling back to the default when invalid.
    fn typed<T>(&self, key: ConfigKey, parse: impl Fn(&str) -> Option<T>) -> T
    where
        T: Default,
    {
        parse(self.value(key))
            .or_else(|| {
                tracing::warn!(key = key.as_str(), "ignoring invalid configuration value");
                parse(key.default_value())
            })
            .unwrap_or_default()
    }

    /// Configured output format.
    pub fn format(&self) -> OutputFormat {
        self.typed(ConfigKey::DefaultFormat, |v| v.parse().ok())
    }

    /// Configured decimal precision.
    pub fn precision(&self) -> u32 {
        self.typed(ConfigKey::DecimalPrecision, parse_precision)
    }

    /// Whether colored output is enabled.
    pub fn use_colors(&self) -> bool {
        self.typed(ConfigKey::UseColors, parse_bool)
    }

    /// Configured perpetuity policy.
    pub fn perpetuity_policy(&self) -> PerpetuityPolicy {
        self.typed(ConfigKey::PerpetuityPolicy, |v| v.parse().ok())
    }

    fn set(&mut self, key: ConfigKey, value: String) {
        self.values.insert(key.as_str().to_string(), value);
    }

    fn remove(&mut self, key: ConfigKey) {
        self.values.remove(key.as_str());
    }

    fn clear(&mut self) {
        self.values.clear();
    }
}

/// Resolves the config file path, preferring an explicit override.
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    let home = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    Ok(home.join("fincalc").join("config.json"))
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, ctx: &Context) -> Result<()> {
    let path = ctx.config_path.as_path();
    let format = ctx.output.format;
    match args.command {
        ConfigCommand::Show => execute_show(path, format),
        ConfigCommand::Get(get_args) => execute_get(path, get_args, format),
        ConfigCommand::Set(set_args) => execute_set(path, set_args),
        ConfigCommand::List => execute_list(format),
        ConfigCommand::Reset(reset_args) => execute_reset(path, reset_args),
        ConfigCommand::Path => execute_path(path),
    }
}

/// Show current configuration.
fn execute_show(path: &Path, format: OutputFormat) -> Result<()> {
    let settings = Settings::load(path)?;

    let results: Vec<KeyValue> = ConfigKey::ALL
        .iter()
        .map(|key| KeyValue::new(key.as_str(), settings.value(*key)))
        .collect();

    match format {
        OutputFormat::Table => {
            print_header("Current Configuration");
            crate::output::print_output(&results, format)?;
        }
        OutputFormat::Json => {
            let output: HashMap<&str, &str> = ConfigKey::ALL
                .iter()
                .map(|key| (key.as_str(), settings.value(*key)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Csv => {
            crate::output::print_output(&results, format)?;
        }
        OutputFormat::Minimal => {
            for key in ConfigKey::ALL {
                println!("{}={}", key.as_str(), settings.value(key));
            }
        }
    }

    Ok(())
}

/// Get a configuration value.
fn execute_get(path: &Path, args: GetArgs, format: OutputFormat) -> Result<()> {
    let settings = Settings::load(path)?;
    let key = ConfigKey::parse(&args.key)?;
    let value = settings.value(key);

    match format {
        OutputFormat::Table | OutputFormat::Csv => {
            println!("{}: {}", key.as_str(), value);
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "key": key.as_str(),
                "value": value
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Minimal => {
            println!("{value}");
        }
    }

    Ok(())
}

/// Set a configuration value.
fn execute_set(path: &Path, args: SetArgs) -> Result<()> {
    let key = ConfigKey::parse(&args.key)?;
    key.validate(&args.value)?;

    let mut settings = Settings::load(path)?;
    settings.set(key, args.value.clone());
    settings.save(path)?;

    print_success(&format!("Set {} = {}", key.as_str(), args.value));
    Ok(())
}

/// List available configuration keys.
fn execute_list(format: OutputFormat) -> Result<()> {
    let results: Vec<KeyValue> = ConfigKey::ALL
        .iter()
        .map(|key| {
            KeyValue::new(
                key.as_str(),
                format!("{} (default: {})", key.description(), key.default_value()),
            )
        })
        .collect();

    match format {
        OutputFormat::Table => {
            print_header("Available Configuration Keys");
            crate::output::print_output(&results, format)?;
        }
        OutputFormat::Json => {
            let output: Vec<_> = ConfigKey::ALL
                .iter()
                .map(|key| {
                    serde_json::json!({
                        "key": key.as_str(),
                        "description": key.description(),
                        "default": key.default_value()
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            wtr.write_record(["key", "description", "default"])?;
            for key in ConfigKey::ALL {
                wtr.write_record([key.as_str(), key.description(), key.default_value()])?;
            }
            wtr.flush()?;
        }
        OutputFormat::Minimal => {
            for key in ConfigKey::ALL {
                println!("{}", key.as_str());
            }
        }
    }

    Ok(())
}

/// Reset configuration.
fn execute_reset(path: &Path, args: ResetArgs) -> Result<()> {
    let mut settings = Settings::load(path)?;

    if args.all {
        settings.clear();
        settings.save(path)?;
        print_success("Reset all configuration to defaults");
    } else if let Some(key_str) = args.key {
        let key = ConfigKey::parse(&key_str)?;
        settings.remove(key);
        settings.save(path)?;
        print_success(&format!("Reset {} to default ({})", key.as_str(), key.default_value()));
    } else {
        print_warning("Use --all to reset all settings, or specify a key to reset");
    }

    Ok(())
}

/// Show configuration file path.
fn execute_path(path: &Path) -> Result<()> {
    print_info(&format!("Config file: {}", path.display()));
    if path.exists() {
        print_info("Status: exists");
    } else {
        print_info("Status: not created yet (using defaults)");
    }
    Ok(())
}
