//! Shortest walking route between two spaces.
//!
//! DESIGN
//! ======
//! Spaces are graph nodes and hallways undirected edges weighted by the
//! straight-line distance between their endpoint spaces. Hallways whose
//! endpoints no longer exist are skipped. `Graph` is built once per request
//! so congestion can run many searches against one adjacency list.
//!
//! Dijkstra pops the cheapest frontier entry from a binary heap; equal costs
//! break on the lower space id so results are deterministic.

#[cfg(test)]
#[path = "route_test.rs"]
mod route_test;

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use serde::Serialize;

use crate::state::{FloorplanState, HallwayId, SpaceId};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("space not found: {0}")]
    SpaceNotFound(SpaceId),
    #[error("no route from space {from} to space {to}")]
    NoRoute { from: SpaceId, to: SpaceId },
}

/// Spaces visited in order, and the hallways walked between them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub space_ids: Vec<SpaceId>,
    pub hallway_ids: Vec<HallwayId>,
}

#[derive(Debug, Clone, Copy)]
struct Edge {
    to: SpaceId,
    weight: f64,
    hallway_id: HallwayId,
}

/// Adjacency list over the current spaces and hallways.
#[derive(Debug, Default)]
pub struct Graph {
    adjacency: HashMap<SpaceId, Vec<Edge>>,
}

impl Graph {
    #[must_use]
    pub fn build(fp: &FloorplanState) -> Self {
        let mut adjacency: HashMap<SpaceId, Vec<Edge>> = fp.spaces.iter().map(|s| (s.id, Vec::new())).collect();

        for hallway in &fp.hallways {
            let (Some(a), Some(b)) = (fp.space(hallway.from_space_id), fp.space(hallway.to_space_id)) else {
                continue;
            };
            let weight = a.distance_to(b);
            if let Some(edges) = adjacency.get_mut(&a.id) {
                edges.push(Edge { to: b.id, weight, hallway_id: hallway.id });
            }
            if let Some(edges) = adjacency.get_mut(&b.id) {
                edges.push(Edge { to: a.id, weight, hallway_id: hallway.id });
            }
        }

        Self { adjacency }
    }

    #[must_use]
    pub fn contains(&self, id: SpaceId) -> bool {
        self.adjacency.contains_key(&id)
    }

    /// Cheapest route from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns `SpaceNotFound` for an unknown endpoint and `NoRoute` when the
    /// two spaces are not connected.
    pub fn shortest_path(&self, from: SpaceId, to: SpaceId) -> Result<Route, RouteError> {
        for id in [from, to] {
            if !self.contains(id) {
                return Err(RouteError::SpaceNotFound(id));
            }
        }
        if from == to {
            return Ok(Route { space_ids: vec![from], hallway_ids: Vec::new() });
        }

        let mut dist: HashMap<SpaceId, f64> = HashMap::from([(from, 0.0)]);
        let mut prev: HashMap<SpaceId, (SpaceId, HallwayId)> = HashMap::new();
        let mut heap = BinaryHeap::from([Frontier { cost: 0.0, space: from }]);

        while let Some(Frontier { cost, space }) = heap.pop() {
            if space == to {
                break;
            }
            if dist.get(&space).is_some_and(|&best| cost > best) {
                continue;
            }
            for edge in self.adjacency.get(&space).into_iter().flatten() {
                let alt = cost + edge.weight;
                if dist.get(&edge.to).is_none_or(|&best| alt < best) {
                    dist.insert(edge.to, alt);
                    prev.insert(edge.to, (space, edge.hallway_id));
                    heap.push(Frontier { cost: alt, space: edge.to });
                }
            }
        }

        if !prev.contains_key(&to) {
            return Err(RouteError::NoRoute { from, to });
        }

        let mut space_ids = vec![to];
        let mut hallway_ids = Vec::new();
        let mut current = to;
        while let Some(&(previous, hallway_id)) = prev.get(&current) {
            space_ids.push(previous);
            hallway_ids.push(hallway_id);
            current = previous;
        }
        space_ids.reverse();
        hallway_ids.reverse();
        Ok(Route { space_ids, hallway_ids })
    }
}

/// One-off route search over the current floorplan.
///
/// # Errors
///
/// See [`Graph::shortest_path`].
pub fn shortest_path(fp: &FloorplanState, from: SpaceId, to: SpaceId) -> Result<Route, RouteError> {
    Graph::build(fp).shortest_path(from, to)
}

/// Heap entry ordered so `BinaryHeap` pops the lowest cost first.
#[derive(Debug, Clone, Copy)]
struct Frontier {
    cost: f64,
    space: SpaceId,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.total_cmp(&self.cost).then_with(|| other.space.cmp(&self.space))
    }
}
