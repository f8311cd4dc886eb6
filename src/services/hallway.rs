//! Hallway service: endpoint snapping, create, list, and delete.
//!
//! DESIGN
//! ======
//! A hallway is drawn between two free points. Each endpoint snaps to the
//! nearest existing space within `SNAP_THRESHOLD` (normalized units); when
//! none is close enough an `Intersection` space named `Node {id}` is created
//! at the point. The stored hallway copies the snapped positions, so it
//! always starts and ends exactly on its endpoint spaces.

#[cfg(test)]
#[path = "hallway_test.rs"]
mod hallway_test;

use serde::Serialize;
use tracing::{debug, info};

use crate::state::{AppState, FloorplanState, Hallway, HallwayId, INTERSECTION_KIND, Space};

#[derive(Debug, thiserror::Error)]
pub enum HallwayError {
    #[error("hallway not found: {0}")]
    NotFound(HallwayId),
    #[error("hallway name must not be empty")]
    EmptyName,
    #[error("coordinates must be finite numbers")]
    InvalidCoordinate,
}

/// Outcome of a hallway deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HallwayDeletion {
    pub deleted_hallway_id: HallwayId,
    pub remaining_hallways: usize,
}

/// Nearest space to `(x, y)` within `threshold`, or a new intersection there.
///
/// Ties keep the earliest space. The returned flag is `true` when a space was
/// created.
pub fn find_or_create_space_at(fp: &mut FloorplanState, x: f64, y: f64, threshold: f64) -> (Space, bool) {
    let mut best: Option<(&Space, f64)> = None;
    for space in &fp.spaces {
        let d_sq = (space.x - x).powi(2) + (space.y - y).powi(2);
        if best.is_none_or(|(_, best_sq)| d_sq < best_sq) {
            best = Some((space, d_sq));
        }
    }

    if let Some((space, d_sq)) = best {
        if d_sq.sqrt() <= threshold {
            debug!(id = space.id, x, y, "endpoint snapped to existing space");
            return (space.clone(), false);
        }
    }

    let name = format!("Node {}", fp.next_space_id);
    let space = fp.push_space(name, INTERSECTION_KIND.to_owned(), x, y);
    debug!(id = space.id, x, y, "endpoint created intersection");
    (space, true)
}

/// Snapshot of all hallways in creation order.
pub async fn list_hallways(state: &AppState) -> Vec<Hallway> {
    state.floorplan.read().await.hallways.clone()
}

/// A created hallway plus any intersections made for its endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedHallway {
    pub hallway: Hallway,
    pub created_spaces: Vec<Space>,
}

/// Create a hallway between two normalized points, snapping both endpoints.
///
/// # Errors
///
/// Returns an error if the name is blank or a coordinate is not finite.
pub async fn create_hallway(
    state: &AppState,
    name: &str,
    (x1, y1): (f64, f64),
    (x2, y2): (f64, f64),
) -> Result<CreatedHallway, HallwayError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(HallwayError::EmptyName);
    }
    if ![x1, y1, x2, y2].iter().all(|v| v.is_finite()) {
        return Err(HallwayError::InvalidCoordinate);
    }

    let threshold = state.config.snap_threshold;
    let mut fp = state.floorplan.write().await;
    let (from, from_created) = find_or_create_space_at(&mut fp, x1, y1, threshold);
    let (to, to_created) = find_or_create_space_at(&mut fp, x2, y2, threshold);
    let hallway = fp.push_hallway(name.to_owned(), &from, &to);

    let created_spaces = [(from, from_created), (to, to_created)]
        .into_iter()
        .filter_map(|(space, created)| created.then_some(space))
        .collect::<Vec<_>>();
    info!(
        id = hallway.id,
        from = hallway.from_space_id,
        to = hallway.to_space_id,
        created_spaces = created_spaces.len(),
        "hallway created"
    );
    Ok(CreatedHallway { hallway, created_spaces })
}

/// Delete one hallway. Its endpoint spaces stay.
///
/// # Errors
///
/// Returns `NotFound` if no hallway has this id.
pub async fn delete_hallway(state: &AppState, id: HallwayId) -> Result<HallwayDeletion, HallwayError> {
    let mut fp = state.floorplan.write().await;
    let before = fp.hallways.len();
    fp.hallways.retain(|h| h.id != id);
    if fp.hallways.len() == before {
        return Err(HallwayError::NotFound(id));
    }
    fp.mark_dirty();

    let remaining_hallways = fp.hallways.len();
    info!(id, remaining_hallways, "hallway deleted");
    Ok(HallwayDeletion { deleted_hallway_id: id, remaining_hallways })
}
