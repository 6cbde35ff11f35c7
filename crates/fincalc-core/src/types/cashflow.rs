//! Cash flow series for discounted-cash-flow valuation.

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, CalcResult};

/// Number of slots in a [`CashFlowSeries`]: the initial outlay plus five
/// projected years.
pub const CASH_FLOW_SLOTS: usize = 6;

/// Number of projected years in a [`CashFlowSeries`].
pub const PROJECTION_YEARS: usize = CASH_FLOW_SLOTS - 1;

/// Initial outlay followed by five years of projected free cash flow to firm.
///
/// Index 0 is the outlay at time 0 (conventionally negative or zero), indices
/// 1 through 5 are year-end FCFF amounts.
///
/// # Example
///
/// ```rust
/// use fincalc_core::types::CashFlowSeries;
///
/// let series = CashFlowSeries::try_from_slice(&[-1000.0, 200.0, 250.0, 300.0, 350.0, 400.0]).unwrap();
/// assert_eq!(series.initial_outlay(), -1000.0);
/// assert_eq!(series.projected().len(), 5);
///
/// assert!(CashFlowSeries::try_from_slice(&[1.0, 2.0]).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct CashFlowSeries {
    amounts: [f64; CASH_FLOW_SLOTS],
}

impl CashFlowSeries {
    /// Creates a series from exactly six amounts.
    #[must_use]
    pub fn new(amounts: [f64; CASH_FLOW_SLOTS]) -> Self {
        Self { amounts }
    }

    /// Creates a series from a slice, checking its length and that every
    /// amount is finite.
    pub fn try_from_slice(amounts: &[f64]) -> CalcResult<Self> {
        let amounts: [f64; CASH_FLOW_SLOTS] = amounts.try_into().map_err(|_| {
            CalcError::invalid_cash_flow(format!(
                "expected {CASH_FLOW_SLOTS} amounts (initial outlay + {PROJECTION_YEARS} years), got {}",
                amounts.len()
            ))
        })?;

        if let Some((index, value)) = amounts.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(CalcError::invalid_cash_flow(format!(
                "amount at index {index} is not finite ({value})"
            )));
        }

        Ok(Self { amounts })
    }

    /// The time-0 outlay.
    #[must_use]
    pub fn initial_outlay(&self) -> f64 {
        self.amounts[0]
    }

    /// The five projected yearly amounts.
    #[must_use]
    pub fn projected(&self) -> &[f64] {
        &self.amounts[1..]
    }

    /// The final projected amount, which seeds the terminal perpetuity.
    #[must_use]
    pub fn last_projected(&self) -> f64 {
        self.amounts[PROJECTION_YEARS]
    }

    /// All six amounts.
    #[must_use]
    pub fn as_array(&self) -> &[f64; CASH_FLOW_SLOTS] {
        &self.amounts
    }

    /// Iterator of `(year, amount)` for the projected years (1-based).
    pub fn projected_by_year(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.projected()
            .iter()
            .enumerate()
            .map(|(i, &amount)| (i as i32 + 1, amount))
    }
}

impl TryFrom<Vec<f64>> for CashFlowSeries {
    type Error = CalcError;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        Self::try_from_slice(&value)
    }
}

impl From<CashFlowSeries> for Vec<f64> {
    fn from(series: CashFlowSeries) -> Self {
        series.amounts.to_vec()
    }
}
