//! CLI command implementations.

pub mod bond;
pub mod breakeven;
pub mod config;
pub mod valuation;
pub mod wacc;

// Re-export submodules for convenience
pub use bond::BondArgs;
pub use breakeven::BreakevenArgs;
pub use config::ConfigArgs;
pub use valuation::ValuationArgs;
pub use wacc::WaccArgs;

use std::path::PathBuf;

use fincalc_analytics::valuation::PerpetuityPolicy;

use crate::output::OutputOptions;

/// Settings every command runs with.
#[derive(Debug, Clone)]
pub struct Context {
    /// Output rendering
    pub output: OutputOptions,
    /// Default perpetuity policy for valuations
    pub perpetuity: PerpetuityPolicy,
    /// Location of the configuration file
    pub config_path: PathBuf,
}
