//! Coupon bond valuation.
//!
//! A bond pays `face * coupon_rate / n` each period for `years * n` periods
//! and returns the face value at maturity. Its value is the sum of those
//! payments discounted at the market rate per period.

use fincalc_core::types::{BondInputs, Frequency};
use fincalc_core::{CalcError, CalcResult};
use serde::Serialize;

/// Present value of a coupon bond.
///
/// ```text
/// c     = face * coupon_rate / n
/// value = sum_{t=1..years*n} c / (1 + m/n)^t + face / (1 + m/n)^(years*n)
/// ```
///
/// # Errors
///
/// `years == 0`, a per-period discount factor `1 + m/n <= 0`, or a period
/// count that overflows.
///
/// # Example
///
/// ```rust
/// use fincalc_analytics::bond::bond_value;
/// use fincalc_core::types::Frequency;
///
/// let par = bond_value(1000.0, 0.05, 0.05, 10, Frequency::Yearly).unwrap();
/// assert!((par - 1000.0).abs() < 1e-6);
///
/// let premium = bond_value(1000.0, 0.05, 0.04, 10, Frequency::Yearly).unwrap();
/// assert!(premium > 1000.0);
/// ```
pub fn bond_value(
    face_value: f64,
    coupon_rate: f64,
    market_rate: f64,
    years: u32,
    frequency: Frequency,
) -> CalcResult<f64> {
    let (periods, rate) = period_terms(market_rate, years, frequency)?;
    let coupon = face_value * coupon_rate / f64::from(frequency.periods_per_year());
    let factor = 1.0 / (1.0 + rate);

    let mut discount = 1.0;
    let mut value = 0.0;
    for _ in 0..periods {
        discount *= factor;
        value += coupon * discount;
    }

    Ok(value + face_value * discount)
}

/// Period count and per-period discount rate.
fn period_terms(market_rate: f64, years: u32, frequency: Frequency) -> CalcResult<(u32, f64)> {
    if years == 0 {
        return Err(CalcError::invalid_input("years to maturity must be at least 1"));
    }

    let n = frequency.periods_per_year();
    let periods = years
        .checked_mul(n)
        .ok_or_else(|| CalcError::invalid_input(format!("{years} years at {frequency} is too many periods")))?;

    let rate = market_rate / f64::from(n);
    if !rate.is_finite() || 1.0 + rate <= 0.0 {
        return Err(CalcError::invalid_input(format!(
            "per-period discount factor 1 + {rate} must be positive"
        )));
    }

    Ok((periods, rate))
}

/// Bond value with the intermediate figures the calculator shows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BondValuation {
    /// Present value of the bond
    pub value: f64,
    /// Coupon paid each period
    pub coupon_payment: f64,
    /// Number of coupon periods
    pub periods: u32,
    /// Market rate per period
    pub discount_rate_per_period: f64,
    /// Compounding frequency
    pub frequency: Frequency,
}

impl BondValuation {
    /// Value minus face: positive for a premium bond, negative for a discount bond.
    #[must_use]
    pub fn premium(&self, face_value: f64) -> f64 {
        self.value - face_value
    }
}

/// Runs the bond calculator on validated inputs.
pub fn value_bond(inputs: &BondInputs) -> CalcResult<BondValuation> {
    inputs.validate()?;

    let (periods, rate) = period_terms(inputs.market_rate, inputs.years, inputs.frequency)?;
    let value = bond_value(
        inputs.face_value,
        inputs.coupon_rate,
        inputs.market_rate,
        inputs.years,
        inputs.frequency,
    )?;

    Ok(BondValuation {
        value,
        coupon_payment: inputs.face_value * inputs.coupon_rate
            / f64::from(inputs.frequency.periods_per_year()),
        periods,
        discount_rate_per_period: rate,
        frequency: inputs.frequency,
    })
}
