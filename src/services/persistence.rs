//! Persistence service: JSON snapshot of the floorplan state.
//!
//! DESIGN
//! ======
//! A background task checks the state every `PERSIST_INTERVAL_MS`. When the
//! revision has moved since the last write it clones the state under a read
//! lock, writes the snapshot without holding any lock, then records the
//! written revision. The file is written to a temporary sibling and renamed
//! into place so a crash mid-write leaves the previous snapshot intact.
//!
//! ERROR HANDLING
//! ==============
//! `persisted_revision` only advances after a successful write, so a failed
//! flush is retried on the next tick. Edits that land while a write is in
//! flight keep the state dirty for the following tick.

#[cfg(test)]
#[path = "persistence_test.rs"]
mod persistence_test;

use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::state::{AppState, FloorplanState};

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("snapshot io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read a snapshot. A missing file is `Ok(None)`.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or decoded.
pub async fn load_snapshot(path: &Path) -> Result<Option<FloorplanState>, PersistenceError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let state: FloorplanState = serde_json::from_slice(&bytes)?;
    info!(
        path = %path.display(),
        spaces = state.spaces.len(),
        hallways = state.hallways.len(),
        students = state.schedule.students.len(),
        "snapshot loaded"
    );
    Ok(Some(state))
}

/// Write a snapshot atomically (temp file + rename).
///
/// # Errors
///
/// Returns an error if encoding or any filesystem step fails.
pub async fn write_snapshot(path: &Path, state: &FloorplanState) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let bytes = serde_json::to_vec_pretty(state)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, &bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

/// Write the snapshot if anything changed since the last write.
///
/// Returns `true` when a snapshot was written.
///
/// # Errors
///
/// Returns an error if the write fails; the state stays dirty.
pub async fn flush_if_dirty(state: &AppState) -> Result<bool, PersistenceError> {
    // PHASE: SNAPSHOT UNDER LOCK
    let snapshot = {
        let fp = state.floorplan.read().await;
        if !fp.is_dirty() {
            return Ok(false);
        }
        fp.clone()
    };

    // PHASE: WRITE WITHOUT LOCK, THEN ACK THE WRITTEN REVISION
    write_snapshot(&state.config.snapshot_path(), &snapshot).await?;
    let mut fp = state.floorplan.write().await;
    fp.persisted_revision = fp.persisted_revision.max(snapshot.revision);
    Ok(true)
}

/// Spawn the background persistence task. Returns a handle for shutdown.
pub fn spawn_persistence_task(state: AppState) -> JoinHandle<()> {
    let interval_ms = state.config.persist_interval_ms;
    let path = state.config.snapshot_path();
    info!(interval_ms, path = %path.display(), "snapshot persistence configured");
    tokio::spawn(async move {
        loop {
            match flush_if_dirty(&state).await {
                Ok(true) => debug!(path = %path.display(), "snapshot written"),
                Ok(false) => {}
                Err(e) => error!(error = %e, path = %path.display(), "snapshot write failed"),
            }
            tokio::time::sleep(Duration::from_millis(interval_ms)).await;
        }
    })
}
