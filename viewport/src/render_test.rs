#![allow(clippy::float_cmp)]

use super::*;

fn hallway(name: &str) -> Hallway {
    Hallway {
        id: 1,
        name: name.into(),
        x1: 0.0,
        y1: 0.0,
        x2: 1.0,
        y2: 0.0,
        from_space_id: 1,
        to_space_id: 2,
    }
}

#[test]
fn idle_hallway_is_grey_and_thin() {
    let style = congestion_style(0, 10);
    assert_eq!(style.color, IDLE_HALLWAY_COLOR);
    assert_eq!(style.width, IDLE_HALLWAY_WIDTH_PX);
}

#[test]
fn no_congestion_loaded_is_idle() {
    assert_eq!(congestion_style(5, 0).width, IDLE_HALLWAY_WIDTH_PX);
}

#[test]
fn busiest_hallway_is_red_and_widest() {
    let style = congestion_style(10, 10);
    assert_eq!(style.color, "rgb(255, 0, 60)");
    assert_eq!(style.width, MAX_CONGESTION_WIDTH_PX);
}

#[test]
fn half_load_is_midway() {
    let style = congestion_style(5, 10);
    assert_eq!(style.color, "rgb(128, 128, 60)");
    assert!((style.width - 6.0).abs() < 1e-9);
}

#[test]
fn width_grows_with_count() {
    let low = congestion_style(1, 10).width;
    let high = congestion_style(9, 10).width;
    assert!(high > low);
    assert!(low >= MIN_CONGESTION_WIDTH_PX);
}

#[test]
fn marker_colors_differ_by_kind() {
    assert_ne!(marker_color(&SpaceKind::Classroom), marker_color(&SpaceKind::Stairwell));
    assert_eq!(marker_color(&SpaceKind::Other("Gym".into())), "#fb8c00");
}

#[test]
fn hover_label_pluralizes() {
    assert_eq!(hover_label(&hallway("Main"), 1), "Main: 1 student");
    assert_eq!(hover_label(&hallway("Main"), 4), "Main: 4 students");
}
