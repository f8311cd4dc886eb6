//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. One
//! floorplan is live at a time: its spaces, hallways, and loaded schedule sit
//! in a single `FloorplanState` behind an async `RwLock`. Every mutation bumps
//! `revision`; the persistence task snapshots to disk whenever `revision` is
//! ahead of `persisted_revision`.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::config::Config;

pub type SpaceId = i64;
pub type HallwayId = i64;

/// Space type given to endpoints created by hallway snapping.
pub const INTERSECTION_KIND: &str = "Intersection";

// =============================================================================
// FLOORPLAN ENTITIES
// =============================================================================

/// A point of interest on the floorplan. Coordinates are normalized to the image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Space {
    pub id: SpaceId,
    pub name: String,
    /// Free-form type label: `Classroom`, `Stairwell`, `Intersection`, ...
    #[serde(rename = "type")]
    pub kind: String,
    pub x: f64,
    pub y: f64,
}

impl Space {
    /// Straight-line distance to another space in normalized units.
    #[must_use]
    pub fn distance_to(&self, other: &Space) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A walkable segment between two spaces. The coordinates are copies of the
/// endpoint positions at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hallway {
    pub id: HallwayId,
    pub name: String,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub from_space_id: SpaceId,
    pub to_space_id: SpaceId,
}

impl Hallway {
    #[must_use]
    pub fn touches(&self, space_id: SpaceId) -> bool {
        self.from_space_id == space_id || self.to_space_id == space_id
    }
}

// =============================================================================
// SCHEDULE
// =============================================================================

/// One student's room per period; `None` where the cell was blank or named an
/// unknown room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentSchedule {
    pub student_id: String,
    pub student_name: String,
    pub space_ids: Vec<Option<SpaceId>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub period_names: Vec<String>,
    pub students: Vec<StudentSchedule>,
}

impl Schedule {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.period_names.is_empty() || self.students.is_empty()
    }
}

// =============================================================================
// FLOORPLAN STATE
// =============================================================================

/// Everything the server knows about the current floorplan. Serialized as the
/// on-disk snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloorplanState {
    /// Public URL of the uploaded floorplan image, if any.
    pub floorplan_url: Option<String>,
    pub spaces: Vec<Space>,
    pub hallways: Vec<Hallway>,
    pub next_space_id: SpaceId,
    pub next_hallway_id: HallwayId,
    #[serde(default)]
    pub schedule: Schedule,
    /// Bumped on every mutation.
    #[serde(skip)]
    pub revision: u64,
    /// Revision last written to disk.
    #[serde(skip)]
    pub persisted_revision: u64,
}

impl Default for FloorplanState {
    fn default() -> Self {
        Self {
            floorplan_url: None,
            spaces: Vec::new(),
            hallways: Vec::new(),
            next_space_id: 1,
            next_hallway_id: 1,
            schedule: Schedule::default(),
            revision: 0,
            persisted_revision: 0,
        }
    }
}

impl FloorplanState {
    #[must_use]
    pub fn space(&self, id: SpaceId) -> Option<&Space> {
        self.spaces.iter().find(|s| s.id == id)
    }

    /// First space with exactly this name.
    #[must_use]
    pub fn space_by_name(&self, name: &str) -> Option<&Space> {
        self.spaces.iter().find(|s| s.name == name)
    }

    /// Append a new space with the next id.
    pub fn push_space(&mut self, name: String, kind: String, x: f64, y: f64) -> Space {
        let space = Space { id: self.next_space_id, name, kind, x, y };
        self.next_space_id += 1;
        self.spaces.push(space.clone());
        self.mark_dirty();
        space
    }

    /// Append a new hallway between two spaces with the next id, copying their
    /// positions as the hallway endpoints.
    pub fn push_hallway(&mut self, name: String, from: &Space, to: &Space) -> Hallway {
        let hallway = Hallway {
            id: self.next_hallway_id,
            name,
            x1: from.x,
            y1: from.y,
            x2: to.x,
            y2: to.y,
            from_space_id: from.id,
            to_space_id: to.id,
        };
        self.next_hallway_id += 1;
        self.hallways.push(hallway.clone());
        self.mark_dirty();
        hallway
    }

    pub fn mark_dirty(&mut self) {
        self.revision += 1;
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.revision != self.persisted_revision
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
#[derive(Clone)]
pub struct AppState {
    pub floorplan: Arc<RwLock<FloorplanState>>,
    pub config: Arc<Config>,
}

impl AppState {
    #[must_use]
    pub fn new(config: Config, floorplan: FloorplanState) -> Self {
        Self { floorplan: Arc::new(RwLock::new(floorplan)), config: Arc::new(config) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use std::path::Path;

    use super::*;

    /// Empty floorplan with default config.
    #[must_use]
    pub fn test_app_state() -> AppState {
        AppState::new(Config::default(), FloorplanState::default())
    }

    /// Empty floorplan whose upload and data directories live under `root`.
    #[must_use]
    pub fn test_app_state_in(root: &Path) -> AppState {
        let config = Config {
            upload_dir: root.join("floorplans"),
            data_dir: root.join("data"),
            ..Config::default()
        };
        AppState::new(config, FloorplanState::default())
    }

    /// Seed a space and return it.
    pub async fn seed_space(state: &AppState, name: &str, kind: &str, x: f64, y: f64) -> Space {
        let mut fp = state.floorplan.write().await;
        fp.push_space(name.to_owned(), kind.to_owned(), x, y)
    }

    /// Seed a hallway between two existing spaces and return it.
    pub async fn seed_hallway(state: &AppState, name: &str, from: &Space, to: &Space) -> Hallway {
        let mut fp = state.floorplan.write().await;
        fp.push_hallway(name.to_owned(), from, to)
    }

    /// Three classrooms on a straight corridor plus a detour through a stairwell.
    ///
    /// ```text
    /// A(0.1,0.1) --1-- B(0.5,0.1) --2-- C(0.9,0.1)
    ///        \                          /
    ///         3 --- D(0.5,0.5) ---- 4
    /// ```
    ///
    /// Hallway ids are 1..=4 in the order shown.
    pub async fn seed_corridor(state: &AppState) -> [Space; 4] {
        let a = seed_space(state, "A", "Classroom", 0.1, 0.1).await;
        let b = seed_space(state, "B", "Classroom", 0.5, 0.1).await;
        let c = seed_space(state, "C", "Classroom", 0.9, 0.1).await;
        let d = seed_space(state, "D", "Stairwell", 0.5, 0.5).await;
        seed_hallway(state, "AB", &a, &b).await;
        seed_hallway(state, "BC", &b, &c).await;
        seed_hallway(state, "AD", &a, &d).await;
        seed_hallway(state, "DC", &d, &c).await;
        [a, b, c, d]
    }
}
