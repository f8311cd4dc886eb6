use super::*;
use crate::state::test_helpers::*;

#[tokio::test]
async fn create_space_assigns_ids_and_trims() {
    let state = test_app_state();
    let a = create_space(&state, "  Room 101 ", " Classroom ", 0.2, 0.4).await.unwrap();
    let b = create_space(&state, "Room 102", "Classroom", 0.3, 0.4).await.unwrap();

    assert_eq!(a.id, 1);
    assert_eq!(b.id, 2);
    assert_eq!(a.name, "Room 101");
    assert_eq!(a.kind, "Classroom");
    assert_eq!(list_spaces(&state).await.len(), 2);
    assert!(state.floorplan.read().await.is_dirty());
}

#[tokio::test]
async fn create_space_rejects_blank_name() {
    let state = test_app_state();
    let err = create_space(&state, "   ", "Classroom", 0.2, 0.4).await.unwrap_err();
    assert!(matches!(err, SpaceError::EmptyName));
    assert!(list_spaces(&state).await.is_empty());
}

#[tokio::test]
async fn create_space_rejects_nan() {
    let state = test_app_state();
    let err = create_space(&state, "Room", "Classroom", f64::NAN, 0.4).await.unwrap_err();
    assert!(matches!(err, SpaceError::InvalidCoordinate));
}

#[tokio::test]
async fn delete_space_cascades_to_hallways() {
    let state = test_app_state();
    let [_, b, _, _] = seed_corridor(&state).await;

    let deletion = delete_space(&state, b.id).await.unwrap();
    assert_eq!(deletion.deleted_space_id, b.id);
    assert_eq!(deletion.removed_hallways, 2);
    assert_eq!(deletion.remaining_spaces, 3);
    assert_eq!(deletion.remaining_hallways, 2);

    let fp = state.floorplan.read().await;
    assert!(fp.hallways.iter().all(|h| !h.touches(b.id)));
}

#[tokio::test]
async fn deleted_ids_are_not_reused() {
    let state = test_app_state();
    let a = create_space(&state, "A", "Classroom", 0.1, 0.1).await.unwrap();
    delete_space(&state, a.id).await.unwrap();
    let b = create_space(&state, "B", "Classroom", 0.1, 0.1).await.unwrap();
    assert_eq!(b.id, 2);
}

#[tokio::test]
async fn delete_unknown_space_is_not_found() {
    let state = test_app_state();
    let err = delete_space(&state, 42).await.unwrap_err();
    assert!(matches!(err, SpaceError::NotFound(42)));
}
