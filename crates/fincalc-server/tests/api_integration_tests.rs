//! Integration tests for the fincalc server API endpoints.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use fincalc_analytics::valuation::PerpetuityPolicy;
use fincalc_server::routes::create_router;
use fincalc_server::ServerConfig;

fn app() -> Router {
    create_router(ServerConfig::default())
}

/// Helper to POST JSON and return the status and parsed body.
async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap_or(json!({}));

    (status, json)
}

fn assert_close(value: &Value, expected: f64, tolerance: f64) {
    let actual = value.as_f64().unwrap_or(f64::NAN);
    assert!(
        (actual - expected).abs() < tolerance,
        "expected {expected}, got {value}"
    );
}

// =============================================================================
// HEALTH
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

// =============================================================================
// BREAKEVEN
// =============================================================================

#[tokio::test]
async fn test_breakeven_with_target() {
    let (status, json) = post_json(
        app(),
        "/api/v1/breakeven",
        json!({
            "sales_price": 50.0,
            "variable_cost": 30.0,
            "fixed_cost": 2000.0,
            "desired_profit": 1000.0
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_close(&json["point"]["quantity"], 100.0, 1e-9);
    assert_close(&json["point"]["amount"], 5000.0, 1e-9);
    assert_close(&json["target_quantity"], 150.0, 1e-9);
    assert!(json["chart"].is_null());
}

#[tokio::test]
async fn test_breakeven_chart() {
    let (status, json) = post_json(
        app(),
        "/api/v1/breakeven",
        json!({
            "sales_price": 50.0,
            "variable_cost": 30.0,
            "fixed_cost": 2000.0,
            "chart": true
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let quantities = json["chart"]["quantities"].as_array().unwrap();
    assert_eq!(quantities.len(), 200);
    assert_eq!(quantities[0], 0);
    assert_eq!(json["chart"]["total_cost"].as_array().unwrap().len(), 200);
    assert_eq!(json["chart"]["total_revenue"][100], 5000.0);
}

#[tokio::test]
async fn test_breakeven_zero_margin_rejected() {
    let (status, json) = post_json(
        app(),
        "/api/v1/breakeven",
        json!({ "sales_price": 30.0, "variable_cost": 30.0, "fixed_cost": 2000.0 }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["kind"], "division_by_zero");
    assert!(json["error"].as_str().unwrap().contains("contribution margin"));
}

// =============================================================================
// VALUATION
// =============================================================================

#[tokio::test]
async fn test_valuation_reference_scenario() {
    let (status, json) = post_json(
        app(),
        "/api/v1/valuation",
        json!({
            "cash_flows": [-1000.0, 200.0, 200.0, 200.0, 200.0, 200.0],
            "growth_rate": 0.02,
            "discount_rate": 0.10,
            "outstanding_shares": 100.0
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_close(&json["perpetuity_value"], 2550.0, 1e-9);
    assert_close(&json["irr"], 0.354_406, 1e-5);
    assert_close(&json["fair_value_per_share"], 13.415_067, 1e-5);
}

#[tokio::test]
async fn test_valuation_undefined_figures_are_null() {
    let (status, json) = post_json(
        app(),
        "/api/v1/valuation",
        json!({
            "cash_flows": [0.0, 200.0, 200.0, 200.0, 200.0, 200.0],
            "growth_rate": 0.02,
            "discount_rate": 0.10,
            "outstanding_shares": 0.0
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["irr"].is_null());
    assert!(json["profitability_index"].is_null());
    assert!(json["fair_value_per_share"].is_null());
    assert!(json["npv"].is_number());
}

#[tokio::test]
async fn test_valuation_degenerate_perpetuity() {
    let body = json!({
        "cash_flows": [-1000.0, 200.0, 200.0, 200.0, 200.0, 200.0],
        "growth_rate": 0.10,
        "discount_rate": 0.10,
        "outstanding_shares": 100.0
    });

    let (status, json) = post_json(app(), "/api/v1/valuation", body.clone()).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["kind"], "degenerate_perpetuity");

    let mut lenient = body;
    lenient["perpetuity_policy"] = json!("zero_when_degenerate");
    let (status, json) = post_json(app(), "/api/v1/valuation", lenient).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["perpetuity_value"], 0.0);
}

#[tokio::test]
async fn test_valuation_configured_policy() {
    let config = ServerConfig {
        perpetuity_policy: PerpetuityPolicy::ZeroWhenDegenerate,
        ..ServerConfig::default()
    };

    let (status, json) = post_json(
        create_router(config),
        "/api/v1/valuation",
        json!({
            "cash_flows": [-1000.0, 200.0, 200.0, 200.0, 200.0, 200.0],
            "growth_rate": 0.10,
            "discount_rate": 0.10,
            "outstanding_shares": 100.0
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["perpetuity_value"], 0.0);
}

#[tokio::test]
async fn test_valuation_wrong_series_length() {
    let (status, json) = post_json(
        app(),
        "/api/v1/valuation",
        json!({
            "cash_flows": [-1000.0, 200.0],
            "growth_rate": 0.02,
            "discount_rate": 0.10,
            "outstanding_shares": 100.0
        }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["kind"], "invalid_cash_flow");
}

// =============================================================================
// CAPITAL COST AND BOND
// =============================================================================

#[tokio::test]
async fn test_capital_cost() {
    let (status, json) = post_json(
        app(),
        "/api/v1/capital-cost",
        json!({
            "risk_free_rate": 0.03,
            "beta": 1.0,
            "market_return": 0.08,
            "equity_value": 1_000_000.0,
            "debt_value": 500_000.0,
            "cost_of_debt": 0.05,
            "tax_rate": 0.21
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_close(&json["cost_of_equity"], 0.08, 1e-12);
    assert_close(&json["wacc"], 0.066_5, 1e-4);
}

#[tokio::test]
async fn test_capital_cost_zero_capital_rejected() {
    let (status, json) = post_json(
        app(),
        "/api/v1/capital-cost",
        json!({
            "risk_free_rate": 0.03,
            "beta": 1.0,
            "market_return": 0.08,
            "equity_value": 0.0,
            "debt_value": 0.0,
            "cost_of_debt": 0.05,
            "tax_rate": 0.21
        }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["kind"], "division_by_zero");
}

#[tokio::test]
async fn test_par_bond() {
    let (status, json) = post_json(
        app(),
        "/api/v1/bond",
        json!({
            "face_value": 1000.0,
            "coupon_rate": 0.05,
            "market_rate": 0.05,
            "years": 10,
            "frequency": "Half-Yearly"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_close(&json["value"], 1000.0, 1e-6);
    assert_eq!(json["periods"], 20);
}

#[tokio::test]
async fn test_bond_zero_years_rejected() {
    let (status, json) = post_json(
        app(),
        "/api/v1/bond",
        json!({
            "face_value": 1000.0,
            "coupon_rate": 0.05,
            "market_rate": 0.05,
            "years": 0,
            "frequency": "Yearly"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["kind"], "invalid_input");
}

#[tokio::test]
async fn test_bond_requires_frequency() {
    let (status, json) = post_json(
        app(),
        "/api/v1/bond",
        json!({
            "face_value": 1000.0,
            "coupon_rate": 0.05,
            "market_rate": 0.04,
            "years": 10
        }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["kind"], "invalid_input");
    assert!(json["error"].as_str().unwrap().contains("frequency"));
}

#[tokio::test]
async fn test_bond_unknown_frequency() {
    let (status, json) = post_json(
        app(),
        "/api/v1/bond",
        json!({
            "face_value": 1000.0,
            "coupon_rate": 0.05,
            "market_rate": 0.04,
            "years": 10,
            "frequency": "Monthly"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["kind"], "invalid_enumeration");
    assert!(json["error"].as_str().unwrap().contains("Monthly"));
}

#[tokio::test]
async fn test_bond_frequency_labels_are_normalised() {
    let (status, json) = post_json(
        app(),
        "/api/v1/bond",
        json!({
            "face_value": 1000.0,
            "coupon_rate": 0.05,
            "market_rate": 0.05,
            "years": 10,
            "frequency": "quarterly"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["frequency"], "Quarterly");
    assert_eq!(json["periods"], 40);
}

// =============================================================================
// MALFORMED REQUESTS
// =============================================================================

#[tokio::test]
async fn test_malformed_body_has_error_body() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/capital-cost")
        .header("Content-Type", "application/json")
        .body(Body::from("{\"beta\": 1.0"))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["kind"], "invalid_request");
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_missing_field_has_error_body() {
    let (status, json) = post_json(
        app(),
        "/api/v1/breakeven",
        json!({ "sales_price": 50.0, "variable_cost": 30.0 }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["kind"], "invalid_request");
}
