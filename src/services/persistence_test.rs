use super::*;
use crate::state::test_helpers::*;

#[tokio::test]
async fn missing_snapshot_loads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = load_snapshot(&dir.path().join("absent.json")).await.unwrap();
    assert!(loaded.is_none());
}

#[tokio::test]
async fn corrupt_snapshot_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("floorplan.json");
    std::fs::write(&path, b"{not json").unwrap();
    assert!(matches!(load_snapshot(&path).await, Err(PersistenceError::Json(_))));
}

#[tokio::test]
async fn write_then_load_restores_floorplan() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/floorplan.json");
    let state = test_app_state();
    seed_corridor(&state).await;
    let original = state.floorplan.read().await.clone();

    write_snapshot(&path, &original).await.unwrap();
    assert!(!path.with_extension("json.tmp").exists());

    let loaded = load_snapshot(&path).await.unwrap().unwrap();
    assert_eq!(loaded.spaces, original.spaces);
    assert_eq!(loaded.hallways, original.hallways);
    assert_eq!(loaded.next_space_id, 5);
    assert_eq!(loaded.next_hallway_id, 5);
}

#[tokio::test]
async fn flush_writes_only_when_dirty() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_app_state_in(dir.path());

    assert!(!flush_if_dirty(&state).await.unwrap());
    assert!(!state.config.snapshot_path().exists());

    seed_space(&state, "A", "Classroom", 0.1, 0.1).await;
    assert!(flush_if_dirty(&state).await.unwrap());
    assert!(state.config.snapshot_path().exists());
    assert!(!state.floorplan.read().await.is_dirty());

    assert!(!flush_if_dirty(&state).await.unwrap());
}

#[tokio::test]
async fn failed_flush_keeps_state_dirty() {
    let dir = tempfile::tempdir().unwrap();
    // A regular file where the data directory should be makes every write fail.
    let blocker = dir.path().join("data");
    std::fs::write(&blocker, b"").unwrap();
    let state = test_app_state_in(dir.path());
    seed_space(&state, "A", "Classroom", 0.1, 0.1).await;

    assert!(flush_if_dirty(&state).await.is_err());
    assert!(state.floorplan.read().await.is_dirty());
}

#[tokio::test]
async fn snapshot_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_app_state_in(dir.path());
    seed_corridor(&state).await;
    flush_if_dirty(&state).await.unwrap();

    let restored = load_snapshot(&state.config.snapshot_path()).await.unwrap().unwrap();
    let restarted = AppState::new((*state.config).clone(), restored);
    let fp = restarted.floorplan.read().await;
    assert_eq!(fp.spaces.len(), 4);
    assert_eq!(fp.hallways.len(), 4);
    assert!(!fp.is_dirty());
}
