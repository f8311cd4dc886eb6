use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;

use super::*;
use crate::state::test_helpers::*;

fn body(x1: f64, y1: f64, x2: f64, y2: f64) -> CreateHallwayBody {
    CreateHallwayBody { name: Some("Main".to_owned()), x1: Some(x1), y1: Some(y1), x2: Some(x2), y2: Some(y2) }
}

#[tokio::test]
async fn list_hallways_wraps_in_status_ok() {
    let state = test_app_state();
    seed_corridor(&state).await;

    let Json(value) = list_hallways(State(state)).await;
    assert_eq!(value["status"], "ok");
    assert_eq!(value["hallways"].as_array().map(Vec::len), Some(4));
    assert_eq!(value["hallways"][0]["from_space_id"], 1);
    assert_eq!(value["hallways"][0]["to_space_id"], 2);
}

#[tokio::test]
async fn create_hallway_snaps_to_existing_spaces() {
    let state = test_app_state();
    seed_corridor(&state).await;

    let Json(value) = create_hallway(State(state.clone()), Ok(Json(body(0.11, 0.1, 0.5, 0.49)))).await.unwrap();
    assert_eq!(value["hallway"]["from_space_id"], 1);
    assert_eq!(value["hallway"]["to_space_id"], 4);
    assert_eq!(value["created_spaces"], serde_json::json!([]));
    assert_eq!(state.floorplan.read().await.spaces.len(), 4);
}

#[tokio::test]
async fn create_hallway_reports_new_intersections() {
    let state = test_app_state();

    let Json(value) = create_hallway(State(state), Ok(Json(body(0.2, 0.2, 0.8, 0.2)))).await.unwrap();
    let created = value["created_spaces"].as_array().cloned().unwrap_or_default();
    assert_eq!(created.len(), 2);
    assert_eq!(created[0]["type"], "Intersection");
    assert_eq!(created[0]["name"], "Node 1");
    assert_eq!(value["hallway"]["to_space_id"], 2);
}

#[tokio::test]
async fn create_hallway_missing_coordinate_is_bad_request() {
    let state = test_app_state();
    let mut partial = body(0.2, 0.2, 0.8, 0.2);
    partial.y2 = None;

    let err = create_hallway(State(state.clone()), Ok(Json(partial))).await.unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert_eq!(err.message, "Missing fields");
    assert!(state.floorplan.read().await.hallways.is_empty());
}

#[tokio::test]
async fn delete_hallway_keeps_spaces() {
    let state = test_app_state();
    seed_corridor(&state).await;

    let Json(value) = delete_hallway(State(state.clone()), Path(2)).await.unwrap();
    assert_eq!(value["deleted_hallway_id"], 2);
    assert_eq!(value["remaining_hallways"], 3);
    assert_eq!(state.floorplan.read().await.spaces.len(), 4);
}

#[tokio::test]
async fn delete_unknown_hallway_is_not_found() {
    let state = test_app_state();
    let err = delete_hallway(State(state), Path(7)).await.unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
}
