//! Discounted-cash-flow valuation.
//!
//! A firm is valued from a six-slot free-cash-flow series: the initial outlay
//! at index 0 and five projected years. Cash flows after year 5 are captured
//! by a growing perpetuity on the year-5 amount.
//!
//! ```text
//! PV_perp = FCFF_5 * (1 + g) / (r - g)
//! NPV     = sum_{i=1..5} FCFF_i / (1 + r)^i + PV_perp / (1 + r)^5 - |FCFF_0|
//! ```
//!
//! The IRR is the rate at which that NPV is zero. It is solved with a
//! monitored Newton-Raphson iteration seeded at 10%, falling back to a
//! bracket scan and Brent's method (see [`solve_irr`]).

use fincalc_core::types::{CashFlowSeries, ValuationInputs, PROJECTION_YEARS};
use fincalc_core::{CalcError, CalcResult};
use fincalc_math::error::MathError;
use fincalc_math::solvers::{hybrid, SolverConfig, SolverMethod};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Seed rate for the IRR search.
pub const IRR_SEED: f64 = 0.10;

/// Rates the IRR search is confined to.
pub const IRR_DOMAIN: (f64, f64) = (-0.99, 10.0);

/// Year the perpetuity is discounted from.
const HORIZON: i32 = PROJECTION_YEARS as i32;

/// How [`value_firm`] treats a growth rate equal to the discount rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerpetuityPolicy {
    /// Report the degenerate perpetuity as an error.
    #[default]
    #[serde(alias = "strict")]
    Undefined,
    /// Use a perpetuity value of 0 and carry on.
    #[serde(alias = "zero")]
    ZeroWhenDegenerate,
}

impl PerpetuityPolicy {
    /// Short label used by the CLI and config files.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Undefined => "strict",
            Self::ZeroWhenDegenerate => "zero",
        }
    }
}

impl fmt::Display for PerpetuityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for PerpetuityPolicy {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" | "undefined" => Ok(Self::Undefined),
            "zero" | "zero_when_degenerate" => Ok(Self::ZeroWhenDegenerate),
            _ => Err(CalcError::InvalidEnumeration {
                field: "perpetuity policy",
                value: s.to_string(),
            }),
        }
    }
}

/// Growing perpetuity value at the end of year 5.
///
/// Fails with [`CalcError::DegeneratePerpetuity`] when `r == g`.
///
/// # Example
///
/// ```rust
/// use fincalc_analytics::valuation::perpetuity_value;
///
/// let pv = perpetuity_value(200.0, 0.02, 0.10).unwrap();
/// assert!((pv - 2550.0).abs() < 1e-9);
/// assert!(perpetuity_value(200.0, 0.10, 0.10).is_err());
/// ```
pub fn perpetuity_value(last_fcff: f64, growth_rate: f64, discount_rate: f64) -> CalcResult<f64> {
    if discount_rate == growth_rate {
        return Err(CalcError::DegeneratePerpetuity {
            rate: discount_rate,
        });
    }
    Ok(last_fcff * (1.0 + growth_rate) / (discount_rate - growth_rate))
}

/// Like [`perpetuity_value`] but returns 0 when `r == g`.
#[must_use]
pub fn perpetuity_value_or_zero(last_fcff: f64, growth_rate: f64, discount_rate: f64) -> f64 {
    perpetuity_value(last_fcff, growth_rate, discount_rate).unwrap_or(0.0)
}

fn npv_unchecked(series: &CashFlowSeries, rate: f64, perpetuity_value: f64) -> f64 {
    let base = 1.0 + rate;
    let discounted: f64 = series
        .projected_by_year()
        .map(|(year, amount)| amount / base.powi(year))
        .sum();

    discounted + perpetuity_value / base.powi(HORIZON) - series.initial_outlay().abs()
}

/// Net present value of the series plus the discounted perpetuity.
///
/// The initial outlay is subtracted by magnitude, so `-1000` and `1000` at
/// index 0 both mean 1000 invested. Rates at or below -100% are rejected.
///
/// # Example
///
/// ```rust
/// use fincalc_analytics::valuation::npv;
/// use fincalc_core::types::CashFlowSeries;
///
/// let series = CashFlowSeries::new([-1000.0, 200.0, 200.0, 200.0, 200.0, 200.0]);
/// let value = npv(&series, 0.0, 0.0).unwrap();
/// assert!(value.abs() < 1e-9);
/// ```
pub fn npv(series: &CashFlowSeries, rate: f64, perpetuity_value: f64) -> CalcResult<f64> {
    if !rate.is_finite() || rate <= -1.0 {
        return Err(CalcError::invalid_input(format!(
            "discount rate must be finite and greater than -100%, got {rate}"
        )));
    }
    Ok(npv_unchecked(series, rate, perpetuity_value))
}

/// Derivative of [`npv`] with respect to the rate.
#[must_use]
pub fn npv_derivative(series: &CashFlowSeries, rate: f64, perpetuity_value: f64) -> f64 {
    let base = 1.0 + rate;
    let discounted: f64 = series
        .projected_by_year()
        .map(|(year, amount)| -f64::from(year) * amount / base.powi(year + 1))
        .sum();

    discounted - f64::from(HORIZON) * perpetuity_value / base.powi(HORIZON + 1)
}

/// Settings for [`solve_irr`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrrConfig {
    /// Starting rate for Newton-Raphson
    pub seed: f64,
    /// Interval the rate is searched in
    pub domain: (f64, f64),
    /// Tolerance, iteration cap and fallback method
    pub solver: SolverConfig,
}

impl Default for IrrConfig {
    fn default() -> Self {
        Self {
            seed: IRR_SEED,
            domain: IRR_DOMAIN,
            solver: SolverConfig::default(),
        }
    }
}

impl IrrConfig {
    /// Sets the seed rate.
    #[must_use]
    pub fn with_seed(mut self, seed: f64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the interval the rate is searched in.
    #[must_use]
    pub fn with_domain(mut self, lower: f64, upper: f64) -> Self {
        self.domain = (lower, upper);
        self
    }

    /// Sets the solver configuration.
    #[must_use]
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }
}

/// A converged IRR.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrrSolution {
    /// The internal rate of return
    pub rate: f64,
    /// Iterations used by the stage that converged
    pub iterations: u32,
    /// NPV at `rate`
    pub residual: f64,
    /// Stage that converged
    pub method: SolverMethod,
}

/// Solves for the rate at which [`npv`] is zero.
///
/// Newton-Raphson runs first from `config.seed` with the analytic derivative.
/// If it stalls, diverges or leaves `config.domain`, the domain is scanned
/// outward from the seed for a sign change and the bracketing fallback
/// finishes the job. Every stage is bounded, so this always terminates.
///
/// A series whose NPV never changes sign inside the domain, or one that is
/// not finite at the seed, yields [`CalcError::NonConvergence`].
pub fn solve_irr(
    series: &CashFlowSeries,
    perpetuity_value: f64,
    config: &IrrConfig,
) -> CalcResult<IrrSolution> {
    if !perpetuity_value.is_finite() {
        return Err(CalcError::invalid_input(format!(
            "perpetuity value must be finite, got {perpetuity_value}"
        )));
    }

    let f = |r: f64| {
        if r <= -1.0 {
            f64::NAN
        } else {
            npv_unchecked(series, r, perpetuity_value)
        }
    };
    let df = |r: f64| npv_derivative(series, r, perpetuity_value);

    let result = hybrid(f, df, config.seed, Some(config.domain), &config.solver)
        .map_err(|err| solver_error(&err, config))?;

    log::trace!(
        "IRR {} found by {} in {} iterations",
        result.root,
        result.method,
        result.iterations
    );

    Ok(IrrSolution {
        rate: result.root,
        iterations: result.iterations,
        residual: result.residual,
        method: result.method,
    })
}

fn solver_error(err: &MathError, config: &IrrConfig) -> CalcError {
    log::debug!("IRR search failed: {err}");
    let iterations = match err {
        MathError::ConvergenceFailed { iterations, .. } => *iterations,
        _ => config.solver.max_iterations,
    };
    CalcError::non_convergence(iterations, err.residual())
}

/// Internal rate of return, or `f64::NAN` when no rate could be found.
///
/// The search is confined to [`IRR_DOMAIN`], -99% to 1000%. `NaN` therefore
/// also covers series whose only root lies above 1000%; call [`solve_irr`]
/// with [`IrrConfig::with_domain`] to look further out.
///
/// # Example
///
/// ```rust
/// use fincalc_analytics::valuation::irr;
/// use fincalc_core::types::CashFlowSeries;
///
/// let series = CashFlowSeries::new([-1000.0, 200.0, 200.0, 200.0, 200.0, 200.0]);
/// assert!(irr(&series, 2550.0) > 0.35);
///
/// let no_root = CashFlowSeries::new([0.0, 100.0, 100.0, 100.0, 100.0, 100.0]);
/// assert!(irr(&no_root, 500.0).is_nan());
/// ```
#[must_use]
pub fn irr(series: &CashFlowSeries, perpetuity_value: f64) -> f64 {
    solve_irr(series, perpetuity_value, &IrrConfig::default()).map_or(f64::NAN, |s| s.rate)
}

/// `(npv + |I|) / |I|`.
pub fn profitability_index(npv: f64, initial_investment: f64) -> CalcResult<f64> {
    if initial_investment == 0.0 {
        return Err(CalcError::division_by_zero("initial investment is zero"));
    }
    let invested = initial_investment.abs();
    Ok((npv + invested) / invested)
}

/// `cash + liquid_assets - bank_loan + npv`.
#[must_use]
pub fn equity_value(cash: f64, liquid_assets: f64, bank_loan: f64, npv: f64) -> f64 {
    cash + liquid_assets - bank_loan + npv
}

/// Equity value divided by shares outstanding.
pub fn fair_value_per_share(equity_value: f64, outstanding_shares: f64) -> CalcResult<f64> {
    if outstanding_shares == 0.0 {
        return Err(CalcError::division_by_zero("outstanding shares is zero"));
    }
    Ok(equity_value / outstanding_shares)
}

/// Every figure the DCF calculator shows.
///
/// `irr`, `profitability_index` and `fair_value_per_share` are `NaN` when
/// undefined; JSON output renders them as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValuationReport {
    /// Terminal value at the end of year 5
    pub perpetuity_value: f64,
    /// Net present value at the discount rate
    pub npv: f64,
    /// Internal rate of return
    pub irr: f64,
    /// Profitability index against the initial outlay
    pub profitability_index: f64,
    /// Equity value after balance-sheet adjustments
    pub equity_value: f64,
    /// Equity value per share
    pub fair_value_per_share: f64,
}

impl ValuationReport {
    /// Names of the fields that came out undefined.
    #[must_use]
    pub fn undefined_fields(&self) -> Vec<&'static str> {
        [
            ("irr", self.irr),
            ("profitability_index", self.profitability_index),
            ("fair_value_per_share", self.fair_value_per_share),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_nan())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Values a firm from its cash flow series and balance-sheet inputs.
///
/// # Errors
///
/// Invalid inputs, and a degenerate perpetuity under
/// [`PerpetuityPolicy::Undefined`]. The IRR, profitability index and fair
/// value do not fail the call; they are reported as `NaN`.
pub fn value_firm(
    series: &CashFlowSeries,
    inputs: &ValuationInputs,
    policy: PerpetuityPolicy,
) -> CalcResult<ValuationReport> {
    inputs.validate()?;

    let last = series.last_projected();
    let perpetuity_value = match policy {
        PerpetuityPolicy::Undefined => {
            perpetuity_value(last, inputs.growth_rate, inputs.discount_rate)?
        }
        PerpetuityPolicy::ZeroWhenDegenerate => {
            perpetuity_value_or_zero(last, inputs.growth_rate, inputs.discount_rate)
        }
    };

    let npv = npv(series, inputs.discount_rate, perpetuity_value)?;
    let irr = irr(series, perpetuity_value);
    let profitability_index = profitability_index(npv, series.initial_outlay()).unwrap_or(f64::NAN);
    let equity_value = equity_value(inputs.cash, inputs.liquid_assets, inputs.bank_loan, npv);
    let fair_value_per_share =
        fair_value_per_share(equity_value, inputs.outstanding_shares).unwrap_or(f64::NAN);

    let report = ValuationReport {
        perpetuity_value,
        npv,
        irr,
        profitability_index,
        equity_value,
        fair_value_per_share,
    };

    let undefined = report.undefined_fields();
    if !undefined.is_empty() {
        log::debug!("valuation has undefined fields: {}", undefined.join(", "));
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference_series() -> CashFlowSeries {
        CashFlowSeries::new([-1000.0, 200.0, 200.0, 200.0, 200.0, 200.0])
    }

    #[test]
    fn test_perpetuity_reference_case() {
        assert_relative_eq!(perpetuity_value(200.0, 0.02, 0.10).unwrap(), 2550.0, epsilon = 1e-9);
    }

    #[test]
    fn test_degenerate_perpetuity() {
        let err = perpetuity_value(200.0, 0.05, 0.05).unwrap_err();

        assert_eq!(err, CalcError::DegeneratePerpetuity { rate: 0.05 });
        assert_eq!(perpetuity_value_or_zero(200.0, 0.05, 0.05), 0.0);
    }

    #[test]
    fn test_npv_reference_case() {
        let value = npv(&reference_series(), 0.10, 2550.0).unwrap();

        assert_relative_eq!(value, 1341.506_727_682_535, epsilon = 1e-6);
    }

    #[test]
    fn test_npv_outlay_sign_is_ignored() {
        let positive = CashFlowSeries::new([1000.0, 200.0, 200.0, 200.0, 200.0, 200.0]);

        assert_relative_eq!(
            npv(&positive, 0.10, 2550.0).unwrap(),
            npv(&reference_series(), 0.10, 2550.0).unwrap()
        );
    }

    #[test]
    fn test_npv_rejects_rate_at_minus_one() {
        assert!(npv(&reference_series(), -1.0, 0.0).is_err());
        assert!(npv(&reference_series(), f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_npv_derivative_matches_finite_difference() {
        let series = reference_series();
        let h = 1e-6;
        let rate = 0.07;
        let numeric = (npv_unchecked(&series, rate + h, 2550.0)
            - npv_unchecked(&series, rate - h, 2550.0))
            / (2.0 * h);

        assert_relative_eq!(npv_derivative(&series, rate, 2550.0), numeric, max_relative = 1e-6);
    }

    #[test]
    fn test_irr_reference_case() {
        let solution = solve_irr(&reference_series(), 2550.0, &IrrConfig::default()).unwrap();

        assert_relative_eq!(solution.rate, 0.354_406_288_030_391, epsilon = 1e-8);
        assert!(npv(&reference_series(), solution.rate, 2550.0).unwrap().abs() < 1e-6);
    }

    #[test]
    fn test_irr_zero_rate() {
        // Undiscounted inflows exactly repay the outlay
        assert_relative_eq!(irr(&reference_series(), 0.0), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_irr_without_root_is_nan() {
        let series = CashFlowSeries::new([0.0, 100.0, 100.0, 100.0, 100.0, 100.0]);

        assert!(irr(&series, 500.0).is_nan());
        let err = solve_irr(&series, 500.0, &IrrConfig::default()).unwrap_err();
        assert_eq!(err.kind(), "non_convergence");
    }

    #[test]
    fn test_irr_above_search_domain() {
        // 100 today returns 1500 in a year: the rate is 1400%
        let series = CashFlowSeries::new([-100.0, 1500.0, 0.0, 0.0, 0.0, 0.0]);
        assert_relative_eq!(npv(&series, 14.0, 0.0).unwrap(), 0.0, epsilon = 1e-9);

        assert!(irr(&series, 0.0).is_nan());

        let wide = IrrConfig::default().with_domain(-0.99, 20.0);
        let solution = solve_irr(&series, 0.0, &wide).unwrap();
        assert_relative_eq!(solution.rate, 14.0, epsilon = 1e-8);
    }

    #[test]
    fn test_irr_with_non_finite_perpetuity() {
        assert!(irr(&reference_series(), f64::INFINITY).is_nan());
    }

    #[test]
    fn test_irr_terminates_for_sign_changing_series() {
        let series = CashFlowSeries::new([-100.0, 230.0, -132.0, 0.0, 0.0, 0.0]);

        let rate = irr(&series, 0.0);

        if !rate.is_nan() {
            assert!(npv(&series, rate, 0.0).unwrap().abs() < 1e-6);
        }
    }

    #[test]
    fn test_profitability_index() {
        assert_relative_eq!(profitability_index(500.0, -1000.0).unwrap(), 1.5);
        assert_relative_eq!(profitability_index(500.0, 1000.0).unwrap(), 1.5);
        assert_eq!(profitability_index(500.0, 0.0).unwrap_err().kind(), "division_by_zero");
    }

    #[test]
    fn test_equity_and_fair_value() {
        let equity = equity_value(50.0, 10.0, 20.0, 1000.0);

        assert_relative_eq!(equity, 1040.0);
        assert_relative_eq!(fair_value_per_share(equity, 100.0).unwrap(), 10.4);
        assert!(fair_value_per_share(equity, 0.0).is_err());
    }

    #[test]
    fn test_value_firm_reference_case() {
        let inputs = ValuationInputs::new(0.02, 0.10, 100.0).with_balance_sheet(50.0, 10.0, 20.0);

        let report = value_firm(&reference_series(), &inputs, PerpetuityPolicy::default()).unwrap();

        assert_relative_eq!(report.perpetuity_value, 2550.0, epsilon = 1e-9);
        assert_relative_eq!(report.npv, 1341.506_727_682_535, epsilon = 1e-6);
        assert_relative_eq!(report.irr, 0.354_406_288_030_391, epsilon = 1e-8);
        assert_relative_eq!(report.profitability_index, 2.341_506_727_682_535, epsilon = 1e-9);
        assert_relative_eq!(report.equity_value, 1381.506_727_682_535, epsilon = 1e-6);
        assert_relative_eq!(report.fair_value_per_share, 13.815_067_276_825_35, epsilon = 1e-8);
        assert!(report.undefined_fields().is_empty());
    }

    #[test]
    fn test_value_firm_degenerate_policy() {
        let inputs = ValuationInputs::new(0.10, 0.10, 100.0);

        let err = value_firm(&reference_series(), &inputs, PerpetuityPolicy::Undefined).unwrap_err();
        assert_eq!(err.kind(), "degenerate_perpetuity");

        let report =
            value_firm(&reference_series(), &inputs, PerpetuityPolicy::ZeroWhenDegenerate).unwrap();
        assert_eq!(report.perpetuity_value, 0.0);
        assert_relative_eq!(report.npv, -241.842_646_118_310_5, epsilon = 1e-6);
    }

    #[test]
    fn test_value_firm_undefined_fields() {
        let series = CashFlowSeries::new([0.0, 200.0, 200.0, 200.0, 200.0, 200.0]);
        let inputs = ValuationInputs::new(0.02, 0.10, 0.0);

        let report = value_firm(&series, &inputs, PerpetuityPolicy::default()).unwrap();

        assert!(report.npv.is_finite());
        assert_eq!(
            report.undefined_fields(),
            vec!["irr", "profitability_index", "fair_value_per_share"]
        );
    }

    #[test]
    fn test_report_serializes_nan_as_null() {
        let series = CashFlowSeries::new([0.0, 200.0, 200.0, 200.0, 200.0, 200.0]);
        let inputs = ValuationInputs::new(0.02, 0.10, 0.0);
        let report = value_firm(&series, &inputs, PerpetuityPolicy::default()).unwrap();

        let json = serde_json::to_value(report).unwrap();

        assert!(json["irr"].is_null());
        assert!(json["npv"].is_number());
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("strict".parse::<PerpetuityPolicy>().unwrap(), PerpetuityPolicy::Undefined);
        assert_eq!("Zero".parse::<PerpetuityPolicy>().unwrap(), PerpetuityPolicy::ZeroWhenDegenerate);
        assert!("lenient".parse::<PerpetuityPolicy>().is_err());

        let policy: PerpetuityPolicy = serde_json::from_str("\"zero\"").unwrap();
        assert_eq!(policy, PerpetuityPolicy::ZeroWhenDegenerate);
        assert_eq!(serde_json::to_string(&PerpetuityPolicy::Undefined).unwrap(), "\"undefined\"");
    }
}
