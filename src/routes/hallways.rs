//! Hallway routes.

#[cfg(test)]
#[path = "hallways_test.rs"]
mod hallways_test;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;

use super::{ApiError, json_body, ok_json};
use crate::services::hallway::{self, HallwayError};
use crate::state::{AppState, HallwayId};

#[derive(Debug, Deserialize)]
pub struct CreateHallwayBody {
    pub name: Option<String>,
    pub x1: Option<f64>,
    pub y1: Option<f64>,
    pub x2: Option<f64>,
    pub y2: Option<f64>,
}

pub(crate) fn hallway_error_to_status(err: &HallwayError) -> StatusCode {
    match err {
        HallwayError::NotFound(_) => StatusCode::NOT_FOUND,
        HallwayError::EmptyName | HallwayError::InvalidCoordinate => StatusCode::BAD_REQUEST,
    }
}

impl From<HallwayError> for ApiError {
    fn from(err: HallwayError) -> Self {
        Self::new(hallway_error_to_status(&err), err.to_string())
    }
}

/// `GET /hallways`: all hallways in creation order.
pub async fn list_hallways(State(state): State<AppState>) -> Json<serde_json::Value> {
    let hallways = hallway::list_hallways(&state).await;
    ok_json(serde_json::json!({ "hallways": hallways }))
}

/// `POST /hallways`: create a hallway from `{name, x1, y1, x2, y2}`, snapping
/// both ends. Intersections created for the ends come back in `created_spaces`.
pub async fn create_hallway(
    State(state): State<AppState>,
    body: Result<Json<CreateHallwayBody>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let body = json_body(body)?;
    let (Some(name), Some(x1), Some(y1), Some(x2), Some(y2)) = (body.name, body.x1, body.y1, body.x2, body.y2) else {
        return Err(ApiError::bad_request("Missing fields"));
    };

    let created = hallway::create_hallway(&state, &name, (x1, y1), (x2, y2)).await?;
    Ok(ok_json(serde_json::json!({
        "hallway": created.hallway,
        "created_spaces": created.created_spaces,
    })))
}

/// `DELETE /hallways/{id}`: delete one hallway.
pub async fn delete_hallway(
    State(state): State<AppState>,
    Path(id): Path<HallwayId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let deletion = hallway::delete_hallway(&state, id).await?;
    Ok(ok_json(serde_json::json!({
        "deleted_hallway_id": deletion.deleted_hallway_id,
        "remaining_hallways": deletion.remaining_hallways,
    })))
}
