//! HTTP API for the Raise Engine.
//!
//! This module exposes a small JSON API around the calculator using
//! the [`axum`](https://crates.io/crates/axum) framework.  Clients post
//! raw form values and receive the computed figures, the negotiation
//! text and chart series.  Every handler shares one immutable
//! [`Calculator`].

use crate::chart::ComparisonChart;
use crate::config::Settings;
use crate::engine::{Calculator, SweepPoint};
use crate::error::{CalcError, Field};
use crate::form::RawSubmission;
use crate::models::{CalculationInput, CalculationResult};
use crate::rates::RateTable;
use crate::summary::negotiation_text;
use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tower_http::trace::TraceLayer;

/// Largest number of submissions accepted by `/api/batch`.
pub const MAX_BATCH_SIZE: usize = 1000;
/// Largest number of targets accepted by `/api/sweep`.
pub const MAX_SWEEP_POINTS: usize = 1000;

/// Application state shared across requests.
pub struct AppState {
    pub calculator: Calculator,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Calc(#[from] CalcError),
    #[error("bad request: {0}")]
    BadRequest(String),
}

/// JSON body describing a rejected computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<Field>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<&CalcError> for ErrorBody {
    fn from(err: &CalcError) -> Self {
        match err {
            CalcError::Validation { field, reason } => ErrorBody {
                error: err.to_string(),
                kind: "validation".to_string(),
                field: Some(*field),
                reason: Some(reason.clone()),
            },
            CalcError::ImpossibleParameters => ErrorBody {
                error: err.to_string(),
                kind: "impossibleParameters".to_string(),
                field: None,
                reason: None,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Calc(err) => {
                tracing::debug!(error = %err, "calculation rejected");
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorBody::from(err))
            }
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: message.clone(),
                    kind: "badRequest".to_string(),
                    field: None,
                    reason: None,
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResponse {
    pub input: CalculationInput,
    pub result: CalculationResult,
    pub summary: String,
    pub chart: ComparisonChart,
}

/// Outcome of one submission in a batch: either a result or an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<CalculationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl BatchEntry {
    fn succeeded(input: &CalculationInput, result: CalculationResult) -> Self {
        BatchEntry {
            summary: Some(negotiation_text(input, &result)),
            result: Some(result),
            error: None,
        }
    }

    fn failed(err: &CalcError) -> Self {
        BatchEntry {
            result: None,
            summary: None,
            error: Some(ErrorBody::from(err)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepRequest {
    pub submission: RawSubmission,
    pub targets: Vec<f64>,
}

/// Build the API router around the given rate table.
pub fn build_router(rates: RateTable) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        calculator: Calculator::new(rates),
    });
    let router = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/rates", get(rates_handler))
        .route("/api/calculate", post(calculate_handler))
        .route("/api/batch", post(batch_handler))
        .route("/api/sweep", post(sweep_handler))
        .with_state(state.clone())
        .layer(TraceLayer::new_for_http());
    (router, state)
}

/// Handler for GET /api/rates
async fn rates_handler(State(app_state): State<Arc<AppState>>) -> Json<RateTable> {
    Json(*app_state.calculator.rates())
}

/// Handler for POST /api/calculate
async fn calculate_handler(
    State(app_state): State<Arc<AppState>>,
    Json(submission): Json<RawSubmission>,
) -> Result<Json<CalculationResponse>, ApiError> {
    let input = submission.into_input()?;
    let result = app_state.calculator.compute(&input)?;
    let summary = negotiation_text(&input, &result);
    let chart = ComparisonChart::from_result(&result);
    Ok(Json(CalculationResponse {
        input,
        result,
        summary,
        chart,
    }))
}

/// Handler for POST /api/batch
async fn batch_handler(
    State(app_state): State<Arc<AppState>>,
    Json(submissions): Json<Vec<RawSubmission>>,
) -> Result<Json<Vec<BatchEntry>>, ApiError> {
    if submissions.len() > MAX_BATCH_SIZE {
        return Err(ApiError::BadRequest(format!(
            "at most {} submissions per batch",
            MAX_BATCH_SIZE
        )));
    }

    let parsed: Vec<Result<CalculationInput, CalcError>> =
        submissions.into_iter().map(RawSubmission::into_input).collect();
    let inputs: Vec<CalculationInput> = parsed.iter().filter_map(|p| p.as_ref().ok().cloned()).collect();
    let mut computed = inputs.iter().zip(app_state.calculator.run_batch(&inputs));

    let entries: Vec<BatchEntry> = parsed
        .iter()
        .map(|p| match p {
            Err(err) => BatchEntry::failed(err),
            Ok(_) => match computed.next() {
                Some((input, Ok(result))) => BatchEntry::succeeded(input, result),
                Some((_, Err(err))) => BatchEntry::failed(&err),
                None => unreachable!("one computed outcome per parsed input"),
            },
        })
        .collect();
    tracing::info!(count = entries.len(), "batch computed");
    Ok(Json(entries))
}

/// Handler for POST /api/sweep
async fn sweep_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<SweepRequest>,
) -> Result<Json<Vec<SweepPoint>>, ApiError> {
    if request.targets.is_empty() || request.targets.len() > MAX_SWEEP_POINTS {
        return Err(ApiError::BadRequest(format!(
            "between 1 and {} targets required",
            MAX_SWEEP_POINTS
        )));
    }
    let mut submission = request.submission;
    // Each sweep point supplies its own target.
    submission.mode = None;
    submission.target_net = Some("1".to_string());
    let base = submission.into_input()?;
    let points = app_state.calculator.sweep(&base, &request.targets)?;
    Ok(Json(points))
}

/// Launch the API server.  This function loads the rate table named by
/// `settings`, binds to the configured address and blocks until the
/// server terminates (e.g. when interrupted).
pub async fn serve(settings: &Settings) -> Result<()> {
    let rates = settings.load_rates()?;
    let (router, _state) = build_router(rates);
    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!(addr = %settings.bind_addr, "server listening");
    axum::serve(listener, router).await?;
    Ok(())
}
