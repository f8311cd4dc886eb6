//! Router assembly and the shared JSON error shape.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every endpoint answers JSON. Success bodies carry `"status": "ok"`; any
//! failure is `{"status": "error", "message": ...}` with a matching HTTP
//! status. Uploaded floorplan images are served from `UPLOAD_DIR` under
//! `/static/floorplans`.

pub mod analysis;
pub mod floorplan;
pub mod hallways;
pub mod spaces;


use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{delete, get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::services::upload::FLOORPLAN_URL_PREFIX;
use crate::state::AppState;

// =============================================================================
// ERRORS
// =============================================================================

/// Error response rendered as `{"status": "error", "message": ...}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "status": "error", "message": self.message });
        (self.status, Json(body)).into_response()
    }
}

/// Unwrap a JSON body, turning any extractor rejection into the shared error shape.
///
/// # Errors
///
/// Returns a 400 `ApiError` when the body is missing or malformed.
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "rejected JSON body");
            Err(ApiError::bad_request("Missing JSON body"))
        }
    }
}

/// Merge `"status": "ok"` into a serializable success payload.
pub(crate) fn ok_json(mut body: serde_json::Value) -> Json<serde_json::Value> {
    if let Some(map) = body.as_object_mut() {
        map.insert("status".to_owned(), serde_json::Value::from("ok"));
    }
    Json(body)
}

// =============================================================================
// ROUTER
// =============================================================================

/// Full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    let floorplans = ServeDir::new(&state.config.upload_dir);
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/upload_floorplan", post(floorplan::upload_floorplan))
        .route("/floorplan", get(floorplan::current_floorplan))
        .route("/upload_schedule", post(floorplan::upload_schedule))
        .route("/schedule_info", get(floorplan::schedule_info))
        .route("/spaces", get(spaces::list_spaces).post(spaces::create_space))
        .route("/spaces/{id}", delete(spaces::delete_space))
        .route("/hallways", get(hallways::list_hallways).post(hallways::create_hallway))
        .route("/hallways/{id}", delete(hallways::delete_hallway))
        .route("/route", post(analysis::route))
        .route("/congestion", post(analysis::congestion))
        .route("/healthz", get(healthz))
        .nest_service(FLOORPLAN_URL_PREFIX, floorplans)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
