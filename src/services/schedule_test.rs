use super::*;
use crate::state::test_helpers::*;

/// Room 101 = 1, Room 102 = 2, Gym = 3.
fn rooms() -> FloorplanState {
    let mut fp = FloorplanState::default();
    fp.push_space("Room 101".into(), "Classroom".into(), 0.1, 0.1);
    fp.push_space("Room 102".into(), "Classroom".into(), 0.5, 0.1);
    fp.push_space("Gym".into(), "Other".into(), 0.9, 0.1);
    fp
}

#[test]
fn duplicate_room_names_resolve_to_first_space() {
    let mut fp = rooms();
    fp.push_space("Gym".into(), "Other".into(), 0.9, 0.9);
    let parsed = parse_schedule(&b"student_id,student_name,P1\ns1,Ada,Gym\n"[..], &fp).unwrap();
    assert_eq!(parsed.schedule.students[0].space_ids, vec![Some(3)]);
}

#[test]
fn parses_periods_and_students() {
    let csv = "student_id,student_name,P1,P2,P3\n\
               s1,Ada,Room 101,Room 102,Gym\n\
               s2,Grace,Gym,Room 101,Room 102\n";
    let parsed = parse_schedule(csv.as_bytes(), &rooms()).unwrap();

    assert_eq!(parsed.schedule.period_names, vec!["P1", "P2", "P3"]);
    assert_eq!(parsed.schedule.students.len(), 2);
    assert_eq!(parsed.schedule.students[0].student_name, "Ada");
    assert_eq!(parsed.schedule.students[0].space_ids, vec![Some(1), Some(2), Some(3)]);
    assert_eq!(parsed.schedule.students[1].space_ids, vec![Some(3), Some(1), Some(2)]);
    assert!(parsed.unmatched_rooms.is_empty());
}

#[test]
fn blank_and_unknown_cells_become_none() {
    let csv = "student_id,student_name,P1,P2,P3\n\
               s1,Ada, Room 101 ,,Library\n\
               s2,Grace,Library,Annex,Room 102\n";
    let parsed = parse_schedule(csv.as_bytes(), &rooms()).unwrap();

    assert_eq!(parsed.schedule.students[0].space_ids, vec![Some(1), None, None]);
    assert_eq!(parsed.schedule.students[1].space_ids, vec![None, None, Some(2)]);
    assert_eq!(parsed.unmatched_rooms, vec!["Annex", "Library"]);
}

#[test]
fn short_rows_pad_with_none() {
    let csv = "student_id,student_name,P1,P2\ns1,Ada,Gym\n";
    let parsed = parse_schedule(csv.as_bytes(), &rooms()).unwrap();
    assert_eq!(parsed.schedule.students[0].space_ids, vec![Some(3), None]);
}

#[test]
fn rows_without_identity_are_skipped() {
    let csv = "student_id,student_name,P1\n,,Gym\ns2,,Gym\n,Grace,Gym\n";
    let parsed = parse_schedule(csv.as_bytes(), &rooms()).unwrap();
    let ids: Vec<_> = parsed.schedule.students.iter().map(|s| s.student_id.as_str()).collect();
    assert_eq!(ids, vec!["s2", ""]);
}

#[test]
fn too_few_columns_is_rejected() {
    let csv = "student_id,student_name\ns1,Ada\n";
    assert!(matches!(parse_schedule(csv.as_bytes(), &rooms()), Err(ScheduleError::TooFewColumns)));
}

#[test]
fn empty_file_is_rejected() {
    assert!(matches!(parse_schedule(&b""[..], &rooms()), Err(ScheduleError::TooFewColumns)));
}

#[test]
fn header_names_are_trimmed() {
    let csv = "student_id, student_name , Period 1 \ns1,Ada,Gym\n";
    let parsed = parse_schedule(csv.as_bytes(), &rooms()).unwrap();
    assert_eq!(parsed.schedule.period_names, vec!["Period 1"]);
}

#[tokio::test]
async fn load_schedule_replaces_active_schedule() {
    let state = test_app_state();
    seed_space(&state, "Room 101", "Classroom", 0.1, 0.1).await;

    let summary = load_schedule(&state, b"student_id,student_name,P1,P2\ns1,Ada,Room 101,Room 999\n")
        .await
        .unwrap();
    assert_eq!(summary.num_students, 1);
    assert_eq!(summary.period_names, vec!["P1", "P2"]);
    assert_eq!(summary.unmatched_rooms, vec!["Room 999"]);

    let info = schedule_info(&state).await;
    assert_eq!(info, ScheduleInfo { period_names: vec!["P1".into(), "P2".into()], num_students: 1 });
}

#[tokio::test]
async fn failed_load_keeps_previous_schedule() {
    let state = test_app_state();
    load_schedule(&state, b"student_id,student_name,P1\ns1,Ada,Gym\n").await.unwrap();

    assert!(load_schedule(&state, b"only_one_column\nx\n").await.is_err());
    assert_eq!(schedule_info(&state).await.num_students, 1);
}

#[tokio::test]
async fn schedule_info_before_upload_is_empty() {
    let state = test_app_state();
    let info = schedule_info(&state).await;
    assert!(info.period_names.is_empty());
    assert_eq!(info.num_students, 0);
}
