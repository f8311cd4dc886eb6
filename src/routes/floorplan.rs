//! Floorplan image and schedule upload routes.
//!
//! Both uploads are `multipart/form-data` with a single file field:
//! `floorplan` for the image and `schedule` for the CSV.

#[cfg(test)]
#[path = "floorplan_test.rs"]
mod floorplan_test;

use axum::body::Bytes;
use axum::extract::State;
use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::http::StatusCode;
use axum::response::Json;

use super::{ApiError, ok_json};
use crate::services::schedule::{self, ScheduleError};
use crate::services::upload::{self, UploadError};
use crate::state::AppState;

pub(crate) fn upload_error_to_status(err: &UploadError) -> StatusCode {
    match err {
        UploadError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        UploadError::MissingFile
        | UploadError::NoFilename
        | UploadError::InvalidFilename(_)
        | UploadError::Read(_) => StatusCode::BAD_REQUEST,
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        if let UploadError::Io(io) = &err {
            tracing::error!(error = %io, "upload write failed");
        }
        Self::new(upload_error_to_status(&err), err.to_string())
    }
}

impl From<ScheduleError> for ApiError {
    fn from(err: ScheduleError) -> Self {
        Self::bad_request(err.to_string())
    }
}

/// Pull the first file part named `field_name` out of the form.
async fn read_file_field(
    multipart: Result<Multipart, MultipartRejection>,
    field_name: &str,
) -> Result<(String, Bytes), UploadError> {
    let mut multipart = multipart.map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected multipart body");
        UploadError::MissingFile
    })?;

    while let Some(field) = multipart.next_field().await.map_err(|e| UploadError::Read(e.to_string()))? {
        if field.name() != Some(field_name) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_owned();
        let bytes = field.bytes().await.map_err(|e| UploadError::Read(e.to_string()))?;
        return Ok((filename, bytes));
    }
    Err(UploadError::MissingFile)
}

/// `POST /upload_floorplan`: store the image and make it current.
pub async fn upload_floorplan(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let (filename, bytes) = read_file_field(multipart, "floorplan").await?;
    let url = upload::save_floorplan(&state, &filename, &bytes).await?;
    Ok(ok_json(serde_json::json!({ "url": url })))
}

/// `GET /floorplan`: URL of the current image, `null` before any upload.
pub async fn current_floorplan(State(state): State<AppState>) -> Json<serde_json::Value> {
    let url = upload::floorplan_url(&state).await;
    ok_json(serde_json::json!({ "url": url }))
}

/// `POST /upload_schedule`: keep a copy of the CSV and load it as the active schedule.
pub async fn upload_schedule(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let (filename, bytes) = read_file_field(multipart, "schedule").await?;
    let path = upload::save_schedule_file(&state, &filename, &bytes).await?;
    let summary = schedule::load_schedule(&state, &bytes).await?;

    Ok(ok_json(serde_json::json!({
        "path": path.display().to_string(),
        "num_students": summary.num_students,
        "period_names": summary.period_names,
        "unmatched_rooms": summary.unmatched_rooms,
    })))
}

/// `GET /schedule_info`: periods and student count, empty before any upload.
pub async fn schedule_info(State(state): State<AppState>) -> Json<serde_json::Value> {
    let info = schedule::schedule_info(&state).await;
    ok_json(serde_json::json!({
        "period_names": info.period_names,
        "num_students": info.num_students,
    }))
}
