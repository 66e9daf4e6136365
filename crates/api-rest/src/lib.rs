//! # API REST
//!
//! REST API implementation for CureCast.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, request rejection, CORS)
//!
//! Uses `api-shared` for wire types and `curecast-core` for predictions.

#![warn(rust_2018_idioms)]

use std::sync::Arc;

use api_shared::{
    DiseaseRes, ErrorRes, HealthRes, HealthService, MessageRes, PredictReq, PredictionRes,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use curecast_core::PredictionService;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Message returned by `GET /`.
pub const ROOT_MESSAGE: &str = "CureCast API is running.";

/// Application state shared across REST API handlers
///
/// Holds the prediction context built once at startup. Handlers only read from it.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PredictionService>,
}

impl AppState {
    pub fn new(service: PredictionService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

type ApiError = (StatusCode, Json<ErrorRes>);

fn api_error(status: StatusCode, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorRes {
            error: error.into(),
        }),
    )
}

#[derive(OpenApi)]
#[openapi(
    paths(root, health, list_symptoms, list_diseases, predict),
    components(schemas(MessageRes, HealthRes, ErrorRes, DiseaseRes, PredictReq, PredictionRes))
)]
pub struct ApiDoc;

/// Build the REST router with CORS and Swagger UI.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/symptoms", get(list_symptoms))
        .route("/diseases", get(list_diseases))
        .route("/predict", post(predict))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service status message", body = MessageRes)
    )
)]
#[axum::debug_handler]
async fn root() -> Json<MessageRes> {
    Json(MessageRes {
        message: ROOT_MESSAGE.into(),
    })
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Reports the sizes of the vocabulary, catalog and model loaded at startup.
#[axum::debug_handler]
async fn health(State(state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health(&state.service))
}

#[utoipa::path(
    get,
    path = "/symptoms",
    responses(
        (status = 200, description = "Symptom vocabulary in model column order", body = [String])
    )
)]
/// List the symptoms the model was trained on, in vocabulary order.
#[axum::debug_handler]
async fn list_symptoms(State(state): State<AppState>) -> Json<Vec<String>> {
    let symptoms = state.service.vocabulary().as_slice().to_vec();
    tracing::debug!("/symptoms sending {} symptoms", symptoms.len());
    Json(symptoms)
}

#[utoipa::path(
    get,
    path = "/diseases",
    responses(
        (status = 200, description = "Disease catalog rows", body = [DiseaseRes])
    )
)]
#[axum::debug_handler]
async fn list_diseases(State(state): State<AppState>) -> Json<Vec<DiseaseRes>> {
    Json(
        state
            .service
            .catalog()
            .entries()
            .iter()
            .map(DiseaseRes::from)
            .collect(),
    )
}

#[utoipa::path(
    post,
    path = "/predict",
    request_body = PredictReq,
    responses(
        (status = 200, description = "Up to three ranked predictions", body = [PredictionRes]),
        (status = 400, description = "Request body is not valid JSON", body = ErrorRes),
        (status = 415, description = "Missing JSON content type", body = ErrorRes),
        (status = 422, description = "`symptoms` missing or not a list of strings", body = ErrorRes),
        (status = 500, description = "Inference failed", body = ErrorRes)
    )
)]
/// Predict the most likely diseases for a set of symptoms
///
/// Unknown symptom names are ignored and an empty list returns an empty result.
///
/// # Errors
/// Returns the extractor's status (400, 415 or 422) with a JSON error body if the request
/// body is malformed, and `500 Internal Server Error` if the classifier fails.
#[axum::debug_handler]
async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictReq>, JsonRejection>,
) -> Result<Json<Vec<PredictionRes>>, ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        tracing::warn!("Rejected predict request: {}", rejection.body_text());
        api_error(rejection.status(), rejection.body_text())
    })?;

    match state.service.predict(req.symptoms.as_slice()) {
        Ok(results) => Ok(Json(results.into_iter().map(PredictionRes::from).collect())),
        Err(e) => {
            tracing::error!("Predict error: {:?}", e);
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, "Inference failed"))
        }
    }
}
