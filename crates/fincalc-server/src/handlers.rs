//! Request handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use fincalc_analytics::bond::{value_bond, BondValuation};
use fincalc_analytics::breakeven::{analyze, BreakevenAnalysis};
use fincalc_analytics::capital_cost::{capital_cost as compute_capital_cost, CapitalCostReport};
use fincalc_analytics::valuation::{value_firm, PerpetuityPolicy, ValuationReport};
use fincalc_core::error::CalcError;
use fincalc_core::types::{
    BondInputs, BreakevenInputs, CapitalCostInputs, CashFlowSeries, Frequency, ValuationInputs,
};

use crate::config::ServerConfig;

/// Application state.
pub struct AppState {
    /// Server configuration
    pub config: ServerConfig,
}

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check handler.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Error response.
#[derive(Serialize)]
pub struct ErrorResponse {
    error: String,
    kind: &'static str,
}

/// Error returned by the calculator handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The calculation rejected its inputs.
    #[error(transparent)]
    Calculation(#[from] CalcError),

    /// The body is not JSON or does not match the request record.
    #[error(transparent)]
    Rejected(#[from] JsonRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::Calculation(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse {
                    error: err.to_string(),
                    kind: err.kind(),
                },
            ),
            Self::Rejected(rejection) => (
                rejection.status(),
                ErrorResponse {
                    error: rejection.body_text(),
                    kind: "invalid_request",
                },
            ),
        };
        tracing::debug!(kind = body.kind, "request rejected: {}", body.error);

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// BREAKEVEN
// =============================================================================

/// Breakeven request.
#[derive(Debug, Deserialize)]
pub struct BreakevenRequest {
    /// Unit economics and optional profit target
    #[serde(flatten)]
    pub inputs: BreakevenInputs,
    /// Include cost and revenue chart series
    #[serde(default)]
    pub chart: bool,
}

/// Breakeven point, target quantity and optional chart data.
pub async fn breakeven(
    payload: Result<Json<BreakevenRequest>, JsonRejection>,
) -> Result<Json<BreakevenAnalysis>, ApiError> {
    let Json(request) = payload?;
    let mut analysis = analyze(&request.inputs)?;
    if !request.chart {
        analysis.chart = None;
    }
    Ok(Json(analysis))
}

// =============================================================================
// VALUATION
// =============================================================================

/// Valuation request.
#[derive(Debug, Deserialize)]
pub struct ValuationRequest {
    /// Initial outlay followed by five projected years
    pub cash_flows: Vec<f64>,
    /// Rates, balance sheet and shares outstanding
    #[serde(flatten)]
    pub inputs: ValuationInputs,
    /// Overrides the configured perpetuity policy
    #[serde(default)]
    pub perpetuity_policy: Option<PerpetuityPolicy>,
}

/// DCF valuation. Undefined figures are returned as `null`.
pub async fn valuation(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ValuationRequest>, JsonRejection>,
) -> Result<Json<ValuationReport>, ApiError> {
    let Json(request) = payload?;
    let series = CashFlowSeries::try_from_slice(&request.cash_flows)?;
    let policy = request
        .perpetuity_policy
        .unwrap_or(state.config.perpetuity_policy);

    tracing::debug!(policy = policy.label(), "valuation request");

    Ok(Json(value_firm(&series, &request.inputs, policy)?))
}

// =============================================================================
// CAPITAL COST
// =============================================================================

/// CAPM cost of equity and WACC.
pub async fn capital_cost(
    payload: Result<Json<CapitalCostInputs>, JsonRejection>,
) -> Result<Json<CapitalCostReport>, ApiError> {
    let Json(inputs) = payload?;
    Ok(Json(compute_capital_cost(&inputs)?))
}

// =============================================================================
// BOND
// =============================================================================

/// Bond request.
///
/// The frequency travels as a label so an unknown one is reported as an
/// enumeration error rather than a body mismatch.
#[derive(Debug, Deserialize)]
pub struct BondRequest {
    /// Face (par) value
    pub face_value: f64,
    /// Annual coupon rate
    pub coupon_rate: f64,
    /// Annual market rate
    pub market_rate: f64,
    /// Whole years to maturity
    pub years: u32,
    /// "Yearly", "Half-Yearly" or "Quarterly"
    pub frequency: Option<String>,
}

impl TryFrom<BondRequest> for BondInputs {
    type Error = CalcError;

    fn try_from(request: BondRequest) -> Result<Self, Self::Error> {
        let frequency: Frequency = request
            .frequency
            .ok_or_else(|| {
                CalcError::invalid_input("frequency is required (Yearly, Half-Yearly or Quarterly)")
            })?
            .parse()?;

        Ok(BondInputs {
            face_value: request.face_value,
            coupon_rate: request.coupon_rate,
            market_rate: request.market_rate,
            years: request.years,
            frequency,
        })
    }
}

/// Present value of a coupon bond.
pub async fn bond(
    payload: Result<Json<BondRequest>, JsonRejection>,
) -> Result<Json<BondValuation>, ApiError> {
    let Json(request) = payload?;
    let inputs = BondInputs::try_from(request)?;
    Ok(Json(value_bond(&inputs)?))
}
