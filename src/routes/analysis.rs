//! Route-finding and congestion endpoints.

#[cfg(test)]
#[path = "analysis_test.rs"]
mod analysis_test;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;

use super::{ApiError, json_body, ok_json};
use crate::services::congestion::{self, CongestionError};
use crate::services::route::{self, RouteError};
use crate::state::{AppState, SpaceId};

#[derive(Debug, Deserialize)]
pub struct RouteBody {
    pub from_space_id: Option<SpaceId>,
    pub to_space_id: Option<SpaceId>,
}

#[derive(Debug, Deserialize)]
pub struct CongestionBody {
    pub from_period_index: Option<i64>,
    pub to_period_index: Option<i64>,
}

pub(crate) fn route_error_to_status(err: &RouteError) -> StatusCode {
    match err {
        RouteError::SpaceNotFound(_) => StatusCode::BAD_REQUEST,
        RouteError::NoRoute { .. } => StatusCode::NOT_FOUND,
    }
}

impl From<RouteError> for ApiError {
    fn from(err: RouteError) -> Self {
        let message = match err {
            RouteError::SpaceNotFound(_) => "One or both spaces not found".to_owned(),
            RouteError::NoRoute { .. } => "No route found between the selected spaces.".to_owned(),
        };
        Self::new(route_error_to_status(&err), message)
    }
}

pub(crate) fn congestion_error_to_status(err: &CongestionError) -> StatusCode {
    match err {
        CongestionError::NoSchedule | CongestionError::PeriodOutOfRange { .. } => StatusCode::BAD_REQUEST,
    }
}

impl From<CongestionError> for ApiError {
    fn from(err: CongestionError) -> Self {
        Self::new(congestion_error_to_status(&err), err.to_string())
    }
}

/// `POST /route`: shortest route between `{from_space_id, to_space_id}`.
pub async fn route(
    State(state): State<AppState>,
    body: Result<Json<RouteBody>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let body = json_body(body)?;
    let (Some(from), Some(to)) = (body.from_space_id, body.to_space_id) else {
        return Err(ApiError::bad_request("Invalid space ids"));
    };

    let found = {
        let fp = state.floorplan.read().await;
        route::shortest_path(&fp, from, to)?
    };
    tracing::info!(from, to, hops = found.hallway_ids.len(), "route computed");

    let mut body = serde_json::json!({
        "space_ids": found.space_ids,
        "total_segments": found.hallway_ids.len(),
        "hallway_ids": found.hallway_ids,
    });
    if from == to {
        body["message"] = serde_json::Value::from("Start and end are the same space.");
    }
    Ok(ok_json(body))
}

/// `POST /congestion`: hallway counts for `{from_period_index, to_period_index}`.
pub async fn congestion(
    State(state): State<AppState>,
    body: Result<Json<CongestionBody>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    // A missing schedule is reported before the body is looked at.
    if state.floorplan.read().await.schedule.is_empty() {
        return Err(CongestionError::NoSchedule.into());
    }
    let body = json_body(body)?;
    let (Some(from), Some(to)) = (body.from_period_index, body.to_period_index) else {
        return Err(ApiError::bad_request("Invalid period indices"));
    };

    let report = congestion::congestion(&state, from, to).await?;
    Ok(ok_json(serde_json::json!({
        "period_from": report.period_from,
        "period_to": report.period_to,
        "hallway_counts": report.hallway_counts,
        "total_trips": report.total_trips,
        "max_count": report.max_count,
    })))
}
