use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post, put},
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    CalculatorConfig, CalculatorInput, CalculatorOutput, CalculatorSession, DashboardFigures,
    InputField, JobPreset, ReferenceSummary, calculate, coerce_amount, coerce_value,
    ensure_known_members,
};

#[derive(Clone)]
pub struct AppState {
    session: Arc<RwLock<CalculatorSession>>,
}

impl AppState {
    pub fn new(session: CalculatorSession) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
        }
    }

    fn session(&self) -> Arc<RwLock<CalculatorSession>> {
        self.session.clone()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    NotFound(String),
    Invalid(String),
    Internal(String),
}

impl ApiError {
    fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    fn invalid(message: impl Into<String>) -> Self {
        ApiError::Invalid(message.into())
    }

    fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, "not_found", message),
            ApiError::Invalid(message) => (StatusCode::BAD_REQUEST, "invalid_request", message),
            ApiError::Internal(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
            }
        };
        (status, Json(ErrorBody { error, message })).into_response()
    }
}

/// A number as sent by a form: a JSON number, numeric text, or anything else (read as 0).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LooseAmount {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl LooseAmount {
    fn coerce(&self) -> f64 {
        match self {
            LooseAmount::Number(value) => coerce_value(*value),
            LooseAmount::Text(text) => coerce_amount(text),
            LooseAmount::Other(_) => 0.0,
        }
    }
}

#[derive(Debug, Deserialize)]
struct FieldUpdatePayload {
    field: String,
    value: LooseAmount,
}

#[derive(Debug, Deserialize)]
struct TeamDaysPayload {
    days: LooseAmount,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OverheadPayload {
    include_overhead: bool,
}

/// Current input and the output derived from it, returned by every mutating route.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub input: CalculatorInput,
    pub output: CalculatorOutput,
}

impl SessionSnapshot {
    fn of(session: &CalculatorSession) -> Self {
        Self {
            input: session.input().clone(),
            output: session.output().clone(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/config", get(get_config))
        .route("/input", get(get_input).put(replace_input))
        .route("/input/fields", patch(update_field))
        .route("/input/team/:member", put(update_team_days))
        .route("/input/overhead", put(update_overhead))
        .route("/output", get(get_output))
        .route("/dashboard", get(get_dashboard))
        .route("/presets", get(list_presets))
        .route("/presets/:key", post(apply_preset))
        .route("/reset", post(reset_input))
        .route("/reference", get(get_reference))
        .route("/calculate", post(calculate_stateless))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, session: CalculatorSession) -> std::io::Result<()> {
    let state = AppState::new(session);
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("shoot-margin HTTP API listening on http://{addr}");
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn get_config(State(state): State<AppState>) -> Json<CalculatorConfig> {
    let session = state.session();
    let config = session.read().config().clone();
    Json(config)
}

async fn get_input(State(state): State<AppState>) -> Json<CalculatorInput> {
    let session = state.session();
    let input = session.read().input().clone();
    Json(input)
}

async fn replace_input(
    State(state): State<AppState>,
    Json(input): Json<CalculatorInput>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let session = state.session();
    let mut guard = session.write();
    guard
        .replace_input(input.sanitized())
        .map_err(|err| ApiError::invalid(err.to_string()))?;
    Ok(Json(SessionSnapshot::of(&guard)))
}

async fn update_field(
    State(state): State<AppState>,
    Json(payload): Json<FieldUpdatePayload>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let field: InputField = payload.field.parse().map_err(ApiError::invalid)?;
    let session = state.session();
    let mut guard = session.write();
    guard.set_field(field, payload.value.coerce());
    Ok(Json(SessionSnapshot::of(&guard)))
}

async fn update_team_days(
    State(state): State<AppState>,
    Path(member): Path<String>,
    Json(payload): Json<TeamDaysPayload>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let session = state.session();
    let mut guard = session.write();
    guard
        .set_team_days(&member, payload.days.coerce())
        .map_err(|err| ApiError::not_found(err.to_string()))?;
    Ok(Json(SessionSnapshot::of(&guard)))
}

async fn update_overhead(
    State(state): State<AppState>,
    Json(payload): Json<OverheadPayload>,
) -> Json<SessionSnapshot> {
    let session = state.session();
    let mut guard = session.write();
    guard.set_include_overhead(payload.include_overhead);
    Json(SessionSnapshot::of(&guard))
}

async fn get_output(State(state): State<AppState>) -> Json<CalculatorOutput> {
    let session = state.session();
    let output = session.read().output().clone();
    Json(output)
}

async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardFigures> {
    let session = state.session();
    let figures = session.read().dashboard();
    Json(figures)
}

async fn list_presets(State(state): State<AppState>) -> Json<Vec<JobPreset>> {
    let session = state.session();
    let presets = session.read().config().presets.presets().to_vec();
    Json(presets)
}

async fn apply_preset(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let session = state.session();
    let mut guard = session.write();
    if !guard.apply_preset(&key) {
        return Err(ApiError::not_found(format!("preset '{key}' not found")));
    }
    Ok(Json(SessionSnapshot::of(&guard)))
}

async fn reset_input(State(state): State<AppState>) -> Json<SessionSnapshot> {
    let session = state.session();
    let mut guard = session.write();
    guard.reset();
    Json(SessionSnapshot::of(&guard))
}

async fn get_reference(
    State(state): State<AppState>,
) -> Result<Json<ReferenceSummary>, ApiError> {
    let session = state.session();
    let summary = session
        .read()
        .reference()
        .summary()
        .map_err(|err| ApiError::internal(err.to_string()))?;
    Ok(Json(summary))
}

async fn calculate_stateless(
    State(state): State<AppState>,
    Json(input): Json<CalculatorInput>,
) -> Result<Json<CalculatorOutput>, ApiError> {
    let session = state.session();
    let config = session.read().config().clone();
    ensure_known_members(&input, &config.roster)
        .map_err(|err| ApiError::invalid(err.to_string()))?;
    Ok(Json(calculate(&input.sanitized(), &config)))
}
