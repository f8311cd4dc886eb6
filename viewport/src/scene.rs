//! Scene model: spaces, hallways, and the overlays computed by the server.
//!
//! Spaces and hallways arrive as JSON from the floorplan service with
//! coordinates already normalized to the image. Congestion counts and the
//! current route are overlays layered on top; they never change geometry.
//! The renderer reads from `SceneStore`, and hit-testing reads the segment
//! list it produces.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::hit::Segment;
use crate::transform::Point;

/// Identifier of a space (room, stairwell, intersection, ...).
pub type SpaceId = i64;

/// Identifier of a hallway.
pub type HallwayId = i64;

/// What a space represents on the floorplan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SpaceKind {
    Classroom,
    Stairwell,
    Intersection,
    Office,
    /// Any label the editor typed that is not one of the known kinds.
    Other(String),
}

impl From<String> for SpaceKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Classroom" => Self::Classroom,
            "Stairwell" => Self::Stairwell,
            "Intersection" => Self::Intersection,
            "Office" => Self::Office,
            _ => Self::Other(value),
        }
    }
}

impl From<SpaceKind> for String {
    fn from(kind: SpaceKind) -> Self {
        kind.to_string()
    }
}

impl fmt::Display for SpaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Classroom => f.write_str("Classroom"),
            Self::Stairwell => f.write_str("Stairwell"),
            Self::Intersection => f.write_str("Intersection"),
            Self::Office => f.write_str("Office"),
            Self::Other(label) => f.write_str(label),
        }
    }
}

/// A named point on the floorplan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Space {
    pub id: SpaceId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SpaceKind,
    pub x: f64,
    pub y: f64,
}

impl Space {
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A hallway between two spaces. Endpoints are copies of the spaces' positions.
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
    pub fn segment(&self) -> Segment {
        Segment { id: self.id, x1: self.x1, y1: self.y1, x2: self.x2, y2: self.y2 }
    }

    #[must_use]
    pub fn touches(&self, space_id: SpaceId) -> bool {
        self.from_space_id == space_id || self.to_space_id == space_id
    }
}

/// Per-hallway traversal counts for one period transition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CongestionOverlay {
    counts: HashMap<HallwayId, u32>,
    max_count: u32,
}

impl CongestionOverlay {
    #[must_use]
    pub fn new(counts: HashMap<HallwayId, u32>) -> Self {
        let max_count = counts.values().copied().max().unwrap_or(0);
        Self { counts, max_count }
    }

    #[must_use]
    pub fn count(&self, id: HallwayId) -> u32 {
        self.counts.get(&id).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn max_count(&self) -> u32 {
        self.max_count
    }
}

/// The spaces and hallways along the currently highlighted route.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteOverlay {
    pub space_ids: Vec<SpaceId>,
    pub hallway_ids: HashSet<HallwayId>,
}

/// Runtime store for everything drawn on top of the floorplan image.
#[derive(Debug, Default)]
pub struct SceneStore {
    spaces: Vec<Space>,
    hallways: Vec<Hallway>,
    congestion: Option<CongestionOverlay>,
    route: Option<RouteOverlay>,
}

impl SceneStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Loading ---

    /// Replace all spaces with a server listing.
    pub fn load_spaces(&mut self, spaces: Vec<Space>) {
        self.spaces = spaces;
    }

    /// Replace all hallways with a server listing.
    pub fn load_hallways(&mut self, hallways: Vec<Hallway>) {
        self.hallways = hallways;
    }

    /// Insert or replace a space by id.
    pub fn insert_space(&mut self, space: Space) {
        match self.spaces.iter_mut().find(|s| s.id == space.id) {
            Some(existing) => *existing = space,
            None => self.spaces.push(space),
        }
    }

    /// Insert or replace a hallway by id.
    pub fn insert_hallway(&mut self, hallway: Hallway) {
        match self.hallways.iter_mut().find(|h| h.id == hallway.id) {
            Some(existing) => *existing = hallway,
            None => self.hallways.push(hallway),
        }
    }

    /// Remove a space and every hallway attached to it, mirroring the server cascade.
    pub fn remove_space(&mut self, id: SpaceId) -> Option<Space> {
        let index = self.spaces.iter().position(|s| s.id == id)?;
        self.hallways.retain(|h| !h.touches(id));
        Some(self.spaces.remove(index))
    }

    pub fn remove_hallway(&mut self, id: HallwayId) -> Option<Hallway> {
        let index = self.hallways.iter().position(|h| h.id == id)?;
        Some(self.hallways.remove(index))
    }

    // --- Overlays ---

    pub fn apply_congestion(&mut self, counts: HashMap<HallwayId, u32>) {
        self.congestion = Some(CongestionOverlay::new(counts));
    }

    pub fn apply_route(&mut self, space_ids: Vec<SpaceId>, hallway_ids: Vec<HallwayId>) {
        self.route = Some(RouteOverlay { space_ids, hallway_ids: hallway_ids.into_iter().collect() });
    }

    pub fn clear_overlays(&mut self) {
        self.congestion = None;
        self.route = None;
    }

    // --- Queries ---

    #[must_use]
    pub fn spaces(&self) -> &[Space] {
        &self.spaces
    }

    #[must_use]
    pub fn hallways(&self) -> &[Hallway] {
        &self.hallways
    }

    #[must_use]
    pub fn space(&self, id: SpaceId) -> Option<&Space> {
        self.spaces.iter().find(|s| s.id == id)
    }

    #[must_use]
    pub fn hallway(&self, id: HallwayId) -> Option<&Hallway> {
        self.hallways.iter().find(|h| h.id == id)
    }

    #[must_use]
    pub fn congestion(&self) -> Option<&CongestionOverlay> {
        self.congestion.as_ref()
    }

    #[must_use]
    pub fn route(&self) -> Option<&RouteOverlay> {
        self.route.as_ref()
    }

    /// Traversal count for a hallway; zero when no congestion is loaded.
    #[must_use]
    pub fn congestion_count(&self, id: HallwayId) -> u32 {
        self.congestion.as_ref().map_or(0, |c| c.count(id))
    }

    /// Every hallway as a segment, in store order.
    #[must_use]
    pub fn segments(&self) -> Vec<Segment> {
        self.hallways.iter().map(Hallway::segment).collect()
    }

    /// Segments eligible for hover: hallways somebody walks. Without a
    /// congestion overlay nothing is hoverable.
    #[must_use]
    pub fn hoverable_segments(&self) -> Vec<Segment> {
        let Some(congestion) = &self.congestion else {
            return Vec::new();
        };
        self.hallways
            .iter()
            .filter(|h| congestion.count(h.id) > 0)
            .map(Hallway::segment)
            .collect()
    }

    /// Space ids paired with their normalized positions, for marker hit-testing.
    pub fn markers(&self) -> impl Iterator<Item = (SpaceId, Point)> + '_ {
        self.spaces.iter().map(|s| (s.id, s.position()))
    }
}
