//! Class schedule ingest from CSV.
//!
//! DESIGN
//! ======
//! The header row is `student_id, student_name, P1, P2, ...`: the first two
//! columns identify the student and every later column is a period whose
//! cells name a space. Room names resolve against the spaces that exist at
//! upload time; blank cells and unknown rooms become `None`, and unknown
//! names are reported back so the user can fix the floorplan or the file.
//!
//! ERROR HANDLING
//! ==============
//! A malformed file leaves the previously loaded schedule untouched.

#[cfg(test)]
#[path = "schedule_test.rs"]
mod schedule_test;

use std::collections::BTreeSet;
use std::io::Read;

use serde::Serialize;
use tracing::info;

use crate::state::{AppState, FloorplanState, Schedule, StudentSchedule};

/// Header columns before the first period.
const IDENTITY_COLUMNS: usize = 2;

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("CSV must have at least: student_id, student_name, and one period column (e.g. P1).")]
    TooFewColumns,
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Result of parsing a schedule file against the current spaces.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSchedule {
    pub schedule: Schedule,
    /// Room names that matched no space, sorted and de-duplicated.
    pub unmatched_rooms: Vec<String>,
}

/// What the client sees after an upload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleSummary {
    pub num_students: usize,
    pub period_names: Vec<String>,
    pub unmatched_rooms: Vec<String>,
}

/// Periods and student count of the loaded schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleInfo {
    pub period_names: Vec<String>,
    pub num_students: usize,
}

/// Parse schedule CSV, resolving room names against the spaces in `fp`.
///
/// # Errors
///
/// Returns an error if the header has fewer than three columns or the CSV is
/// malformed.
pub fn parse_schedule<R: Read>(reader: R, fp: &FloorplanState) -> Result<ParsedSchedule, ScheduleError> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).trim(csv::Trim::All).from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    if headers.len() <= IDENTITY_COLUMNS {
        return Err(ScheduleError::TooFewColumns);
    }
    let period_names: Vec<String> = headers.iter().skip(IDENTITY_COLUMNS).map(str::to_owned).collect();

    let mut students = Vec::new();
    let mut unmatched = BTreeSet::new();
    for record in csv_reader.records() {
        let record = record?;
        let student_id = record.get(0).unwrap_or_default();
        let student_name = record.get(1).unwrap_or_default();
        if student_id.is_empty() && student_name.is_empty() {
            continue;
        }

        let space_ids = (0..period_names.len())
            .map(|period| {
                let room = record.get(IDENTITY_COLUMNS + period).unwrap_or_default();
                if room.is_empty() {
                    return None;
                }
                let found = fp.space_by_name(room).map(|s| s.id);
                if found.is_none() {
                    unmatched.insert(room.to_owned());
                }
                found
            })
            .collect();

        students.push(StudentSchedule {
            student_id: student_id.to_owned(),
            student_name: student_name.to_owned(),
            space_ids,
        });
    }

    Ok(ParsedSchedule {
        schedule: Schedule { period_names, students },
        unmatched_rooms: unmatched.into_iter().collect(),
    })
}

/// Parse `bytes` and make the result the active schedule.
///
/// # Errors
///
/// See [`parse_schedule`]. On error the previous schedule stays loaded.
pub async fn load_schedule(state: &AppState, bytes: &[u8]) -> Result<ScheduleSummary, ScheduleError> {
    let mut fp = state.floorplan.write().await;
    let parsed = parse_schedule(bytes, &fp)?;

    let summary = ScheduleSummary {
        num_students: parsed.schedule.students.len(),
        period_names: parsed.schedule.period_names.clone(),
        unmatched_rooms: parsed.unmatched_rooms,
    };
    fp.schedule = parsed.schedule;
    fp.mark_dirty();

    info!(
        students = summary.num_students,
        periods = ?summary.period_names,
        unmatched = summary.unmatched_rooms.len(),
        "schedule loaded"
    );
    Ok(summary)
}

pub async fn schedule_info(state: &AppState) -> ScheduleInfo {
    let fp = state.floorplan.read().await;
    ScheduleInfo { period_names: fp.schedule.period_names.clone(), num_students: fp.schedule.students.len() }
}
