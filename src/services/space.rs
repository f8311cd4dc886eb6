//! Space service: create, list, and delete floorplan spaces.
//!
//! DESIGN
//! ======
//! Spaces get monotonically increasing ids that are never reused, even after
//! deletion. Deleting a space also deletes every hallway that touches it, so
//! the hallway list never refers to a missing endpoint through this path.

#[cfg(test)]
#[path = "space_test.rs"]
mod space_test;

use serde::Serialize;
use tracing::info;

use crate::state::{AppState, Space, SpaceId};

#[derive(Debug, thiserror::Error)]
pub enum SpaceError {
    #[error("space not found: {0}")]
    NotFound(SpaceId),
    #[error("space name must not be empty")]
    EmptyName,
    #[error("coordinates must be finite numbers")]
    InvalidCoordinate,
}

/// Outcome of a space deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpaceDeletion {
    pub deleted_space_id: SpaceId,
    pub removed_hallways: usize,
    pub remaining_spaces: usize,
    pub remaining_hallways: usize,
}

/// Snapshot of all spaces in creation order.
pub async fn list_spaces(state: &AppState) -> Vec<Space> {
    state.floorplan.read().await.spaces.clone()
}

/// Create a space at a normalized image point.
///
/// # Errors
///
/// Returns an error if the name is blank or a coordinate is not finite.
pub async fn create_space(state: &AppState, name: &str, kind: &str, x: f64, y: f64) -> Result<Space, SpaceError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(SpaceError::EmptyName);
    }
    if !x.is_finite() || !y.is_finite() {
        return Err(SpaceError::InvalidCoordinate);
    }

    let space = {
        let mut fp = state.floorplan.write().await;
        fp.push_space(name.to_owned(), kind.trim().to_owned(), x, y)
    };
    info!(id = space.id, name = %space.name, kind = %space.kind, "space created");
    Ok(space)
}

/// Delete a space and every hallway touching it.
///
/// # Errors
///
/// Returns `NotFound` if no space has this id.
pub async fn delete_space(state: &AppState, id: SpaceId) -> Result<SpaceDeletion, SpaceError> {
    let mut fp = state.floorplan.write().await;
    let before_spaces = fp.spaces.len();
    fp.spaces.retain(|s| s.id != id);
    if fp.spaces.len() == before_spaces {
        return Err(SpaceError::NotFound(id));
    }

    let before_hallways = fp.hallways.len();
    fp.hallways.retain(|h| !h.touches(id));
    fp.mark_dirty();

    let deletion = SpaceDeletion {
        deleted_space_id: id,
        removed_hallways: before_hallways - fp.hallways.len(),
        remaining_spaces: fp.spaces.len(),
        remaining_hallways: fp.hallways.len(),
    };
    info!(
        id,
        removed_hallways = deletion.removed_hallways,
        remaining_spaces = deletion.remaining_spaces,
        "space deleted"
    );
    Ok(deletion)
}
