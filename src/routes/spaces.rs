//! Space routes.

#[cfg(test)]
#[path = "spaces_test.rs"]
mod spaces_test;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;

use super::{ApiError, json_body, ok_json};
use crate::services::space::{self, SpaceError};
use crate::state::{AppState, SpaceId};

#[derive(Debug, Deserialize)]
pub struct CreateSpaceBody {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

pub(crate) fn space_error_to_status(err: &SpaceError) -> StatusCode {
    match err {
        SpaceError::NotFound(_) => StatusCode::NOT_FOUND,
        SpaceError::EmptyName | SpaceError::InvalidCoordinate => StatusCode::BAD_REQUEST,
    }
}

impl From<SpaceError> for ApiError {
    fn from(err: SpaceError) -> Self {
        Self::new(space_error_to_status(&err), err.to_string())
    }
}

/// `GET /spaces`: all spaces in creation order.
pub async fn list_spaces(State(state): State<AppState>) -> Json<serde_json::Value> {
    let spaces = space::list_spaces(&state).await;
    ok_json(serde_json::json!({ "spaces": spaces }))
}

/// `POST /spaces`: create a space from `{name, type, x, y}`.
pub async fn create_space(
    State(state): State<AppState>,
    body: Result<Json<CreateSpaceBody>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let body = json_body(body)?;
    let (Some(name), Some(kind), Some(x), Some(y)) = (body.name, body.kind, body.x, body.y) else {
        return Err(ApiError::bad_request("Missing fields"));
    };

    let space = space::create_space(&state, &name, &kind, x, y).await?;
    Ok(ok_json(serde_json::json!({ "space": space })))
}

/// `DELETE /spaces/{id}`: delete a space and the hallways touching it.
pub async fn delete_space(
    State(state): State<AppState>,
    Path(id): Path<SpaceId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let deletion = space::delete_space(&state, id).await?;
    Ok(ok_json(serde_json::json!({
        "deleted_space_id": deletion.deleted_space_id,
        "removed_hallways": deletion.removed_hallways,
        "remaining_spaces": deletion.remaining_spaces,
        "remaining_hallways": deletion.remaining_hallways,
    })))
}
