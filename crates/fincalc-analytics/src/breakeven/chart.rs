//! Cost/revenue series for the breakeven chart.

use fincalc_core::types::BreakevenInputs;
use fincalc_core::{CalcError, CalcResult};
use serde::Serialize;

use super::BreakevenPoint;

/// Extra units plotted past the target quantity.
pub const TARGET_HEADROOM: u64 = 20;

/// Largest number of points a chart is built with.
pub const MAX_CHART_POINTS: u64 = 1_000_000;

/// Which reference line a marker draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    /// Vertical line at the breakeven quantity
    BreakevenQuantity,
    /// Horizontal line at the breakeven sales amount
    BreakevenAmount,
    /// Vertical line at the target quantity
    TargetQuantity,
}

/// Reference line on the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartMarker {
    /// What the line marks
    pub kind: MarkerKind,
    /// Quantity (vertical) or amount (horizontal) the line sits at
    pub value: f64,
}

impl ChartMarker {
    /// True for lines drawn parallel to the y axis.
    #[must_use]
    pub fn is_vertical(&self) -> bool {
        !matches!(self.kind, MarkerKind::BreakevenAmount)
    }
}

/// Total cost and total revenue sampled at every whole quantity of the plot range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    /// Quantities `0, 1, ..., n - 1`
    pub quantities: Vec<u64>,
    /// `fixed_cost + variable_cost * q`
    pub total_cost: Vec<f64>,
    /// `sales_price * q`
    pub total_revenue: Vec<f64>,
    /// Reference lines
    pub markers: Vec<ChartMarker>,
}

/// Number of quantities to plot, i.e. the exclusive upper bound of `0..n`.
///
/// With a target quantity the range runs 20 units past it; otherwise it runs
/// to twice the breakeven quantity. Both quantities are truncated to whole
/// units first.
///
/// # Example
///
/// ```rust
/// use fincalc_analytics::breakeven::chart::plot_range;
///
/// assert_eq!(plot_range(100.0, None), 200);
/// assert_eq!(plot_range(100.0, Some(150.0)), 170);
/// assert_eq!(plot_range(100.7, None), 200);
/// ```
#[must_use]
pub fn plot_range(breakeven_quantity: f64, target_quantity: Option<f64>) -> u64 {
    // `as` saturates, so NaN and negatives land on 0
    match target_quantity {
        Some(target) => (target.trunc() as u64).saturating_add(TARGET_HEADROOM),
        None => (breakeven_quantity.trunc() as u64).saturating_mul(2),
    }
}

/// Total cost at quantity `q`.
#[must_use]
pub fn total_cost(variable_cost: f64, fixed_cost: f64, q: f64) -> f64 {
    fixed_cost + variable_cost * q
}

/// Total revenue at quantity `q`.
#[must_use]
pub fn total_revenue(sales_price: f64, q: f64) -> f64 {
    sales_price * q
}

impl ChartData {
    /// Samples both lines over [`plot_range`] and attaches the reference markers.
    pub fn build(
        inputs: &BreakevenInputs,
        point: BreakevenPoint,
        target_quantity: Option<f64>,
    ) -> CalcResult<Self> {
        let n = plot_range(point.quantity, target_quantity);
        if n > MAX_CHART_POINTS {
            return Err(CalcError::invalid_input(format!(
                "chart range of {n} points exceeds the limit of {MAX_CHART_POINTS}"
            )));
        }

        let quantities: Vec<u64> = (0..n).collect();
        let total_cost = quantities
            .iter()
            .map(|&q| total_cost(inputs.variable_cost, inputs.fixed_cost, q as f64))
            .collect();
        let total_revenue = quantities
            .iter()
            .map(|&q| total_revenue(inputs.sales_price, q as f64))
            .collect();

        let mut markers = vec![
            ChartMarker {
                kind: MarkerKind::BreakevenQuantity,
                value: point.quantity,
            },
            ChartMarker {
                kind: MarkerKind::BreakevenAmount,
                value: point.amount,
            },
        ];
        if let Some(target) = target_quantity {
            markers.push(ChartMarker {
                kind: MarkerKind::TargetQuantity,
                value: target,
            });
        }

        Ok(Self {
            quantities,
            total_cost,
            total_revenue,
            markers,
        })
    }

    /// Number of sampled quantities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    /// True when the plot range is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }
}
