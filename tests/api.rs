use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use raise_engine::api::build_router;
use raise_engine::rates::RateTable;
use serde_json::{json, Value};
use tower::ServiceExt;

fn router() -> Router {
    build_router(RateTable::default()).0
}

async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_check_responds() {
    let request = Request::builder().uri("/api/health").body(Body::empty()).unwrap();
    let response = router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn rates_reflect_the_loaded_table() {
    let table = RateTable {
        non_manager: 0.80,
        manager: 0.76,
    };
    let request = Request::builder().uri("/api/rates").body(Body::empty()).unwrap();
    let response = build_router(table).0.oneshot(request).await.unwrap();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({"nonManager": 0.80, "manager": 0.76}));
}

#[tokio::test]
async fn calculate_returns_result_summary_and_chart() {
    let (status, body) = post_json(
        router(),
        "/api/calculate",
        json!({
            "salaryPeriod": "yearly",
            "salaryValue": "42000",
            "targetNet": "150",
            "taxRate": "",
            "profile": "cadre"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let increase = body["result"]["grossMonthlyIncrease"].as_f64().unwrap();
    assert!((increase - 200.0).abs() < 1e-9);
    assert_eq!(body["result"]["currentGrossMonthly"], json!(3500.0));
    assert!(body["result"].get("employerMonthlyCost").is_none());
    assert!(body["summary"].as_str().unwrap().contains("brut/an"));
    assert_eq!(body["chart"]["labels"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn invalid_custom_rate_is_unprocessable() {
    let (status, body) = post_json(
        router(),
        "/api/calculate",
        json!({
            "salaryValue": "3000",
            "targetNet": "200",
            "taxRate": "10",
            "profile": "custom",
            "customNetRate": "0.95"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["kind"], "validation");
    assert_eq!(body["field"], "customNetConversionRate");
    assert_eq!(body["reason"], "out of [0.60,0.90]");
}

#[tokio::test]
async fn batch_reports_each_submission() {
    let (status, body) = post_json(
        router(),
        "/api/batch",
        json!([
            {"salaryValue": "3000", "targetNet": "200", "taxRate": "10", "profile": "non-cadre"},
            {"salaryValue": "3000", "targetNet": "200", "profile": "stagiaire"},
            {
                "salaryValue": "2500",
                "mode": "target-percent-increase",
                "targetPercent": "5",
                "taxRate": "20",
                "profile": "non-cadre",
                "employerChargeRate": "0.45"
            }
        ]),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert!(entries[0]["result"].is_object());
    assert_eq!(entries[1]["error"]["field"], "profile");
    let net = entries[2]["result"]["netMonthlyGainAfterTax"].as_f64().unwrap();
    assert!((net - 78.0).abs() < 1e-9);
    assert!(entries[2]["result"]["employerMonthlyCost"].is_number());
}

#[tokio::test]
async fn sweep_returns_one_point_per_target() {
    let (status, body) = post_json(
        router(),
        "/api/sweep",
        json!({
            "submission": {"salaryValue": "3000", "taxRate": "10", "profile": "non-cadre"},
            "targets": [100.0, 200.0, 300.0]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let points = body.as_array().unwrap();
    assert_eq!(points.len(), 3);
    assert_eq!(points[1]["targetNetMonthlyGain"], json!(200.0));

    let (status, body) = post_json(
        router(),
        "/api/sweep",
        json!({"submission": {"salaryValue": "3000", "profile": "cadre"}, "targets": []}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "badRequest");
}

#[tokio::test]
async fn overflowing_target_is_reported_as_impossible() {
    let (status, body) = post_json(
        router(),
        "/api/calculate",
        json!({"salaryValue": "3000", "targetNet": "1e308", "taxRate": "10", "profile": "non-cadre"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["kind"], "impossibleParameters");
    assert!(body.get("field").is_none());
}

#[tokio::test]
async fn out_of_bounds_table_rate_is_rejected_per_request() {
    let table = RateTable {
        non_manager: 0.0,
        manager: 0.75,
    };
    let (status, body) = post_json(
        build_router(table).0,
        "/api/calculate",
        json!({"salaryValue": "3000", "targetNet": "200", "taxRate": "10", "profile": "non-cadre"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["kind"], "validation");
    assert_eq!(body["field"], "profile");
}
