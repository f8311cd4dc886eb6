//! Hallway congestion between two class periods.
//!
//! DESIGN
//! ======
//! Every student whose rooms for both periods are known and different walks
//! the shortest route between them; each hallway on that route counts one
//! traversal. Students with no route are skipped. The graph is built once
//! per request and reused for every student.

#[cfg(test)]
#[path = "congestion_test.rs"]
mod congestion_test;

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info};

use crate::services::route::Graph;
use crate::state::{AppState, FloorplanState, HallwayId};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CongestionError {
    #[error("No schedule loaded yet.")]
    NoSchedule,
    #[error("Period index out of range")]
    PeriodOutOfRange { index: i64, periods: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HallwayCount {
    pub hallway_id: HallwayId,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CongestionReport {
    pub period_from: String,
    pub period_to: String,
    /// Hallways walked at least once, ordered by hallway id.
    pub hallway_counts: Vec<HallwayCount>,
    /// Sum of all counts (total hallway traversals).
    pub total_trips: u64,
    pub max_count: u32,
}

fn period_index(index: i64, periods: usize) -> Result<usize, CongestionError> {
    usize::try_from(index)
        .ok()
        .filter(|&i| i < periods)
        .ok_or(CongestionError::PeriodOutOfRange { index, periods })
}

/// Count hallway traversals for the move from period `from` to period `to`.
///
/// # Errors
///
/// Returns `NoSchedule` before a schedule with students is loaded, and
/// `PeriodOutOfRange` for an index outside the loaded periods.
pub fn compute_congestion(fp: &FloorplanState, from: i64, to: i64) -> Result<CongestionReport, CongestionError> {
    let schedule = &fp.schedule;
    if schedule.is_empty() {
        return Err(CongestionError::NoSchedule);
    }
    let periods = schedule.period_names.len();
    let from_idx = period_index(from, periods)?;
    let to_idx = period_index(to, periods)?;

    let graph = Graph::build(fp);
    let mut counts: BTreeMap<HallwayId, u32> = BTreeMap::new();
    let mut skipped = 0usize;

    for student in &schedule.students {
        let (Some(Some(start)), Some(Some(end))) =
            (student.space_ids.get(from_idx).copied(), student.space_ids.get(to_idx).copied())
        else {
            continue;
        };
        if start == end {
            continue;
        }
        match graph.shortest_path(start, end) {
            Ok(route) => {
                for hallway_id in route.hallway_ids {
                    *counts.entry(hallway_id).or_default() += 1;
                }
            }
            Err(e) => {
                skipped += 1;
                debug!(student = %student.student_id, error = %e, "student skipped");
            }
        }
    }

    let hallway_counts: Vec<HallwayCount> =
        counts.into_iter().map(|(hallway_id, count)| HallwayCount { hallway_id, count }).collect();
    let total_trips = hallway_counts.iter().map(|c| u64::from(c.count)).sum();
    let max_count = hallway_counts.iter().map(|c| c.count).max().unwrap_or(0);

    let report = CongestionReport {
        period_from: schedule.period_names[from_idx].clone(),
        period_to: schedule.period_names[to_idx].clone(),
        hallway_counts,
        total_trips,
        max_count,
    };
    info!(
        from = %report.period_from,
        to = %report.period_to,
        hallways = report.hallway_counts.len(),
        total_trips = report.total_trips,
        max_count = report.max_count,
        skipped,
        "congestion computed"
    );
    Ok(report)
}

/// [`compute_congestion`] against the live floorplan.
///
/// # Errors
///
/// See [`compute_congestion`].
pub async fn congestion(state: &AppState, from: i64, to: i64) -> Result<CongestionReport, CongestionError> {
    let fp = state.floorplan.read().await;
    compute_congestion(&fp, from, to)
}
