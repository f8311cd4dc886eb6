#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Tool
// =============================================================

#[test]
fn tool_default_is_select() {
    assert_eq!(Tool::default(), Tool::Select);
}

#[test]
fn tool_select_is_not_editing() {
    assert!(!Tool::Select.is_editing());
}

#[test]
fn tool_editing_variants() {
    for tool in [Tool::PlaceSpace, Tool::DrawHallway, Tool::Erase] {
        assert!(tool.is_editing(), "{tool:?} should edit");
    }
}

#[test]
fn tool_all_variants_distinct() {
    let variants = [Tool::Select, Tool::PlaceSpace, Tool::DrawHallway, Tool::Erase];
    for (i, a) in variants.iter().enumerate() {
        for (j, b) in variants.iter().enumerate() {
            if i == j {
                assert_eq!(a, b);
            } else {
                assert_ne!(a, b);
            }
        }
    }
}

// =============================================================
// ViewOptions
// =============================================================

#[test]
fn editor_options_have_no_tooltip() {
    let opts = ViewOptions::editor();
    assert!(!opts.hover_tooltip);
    assert!(opts.show_labels);
    assert!(opts.pan_enabled());
}

#[test]
fn viewer_options_have_tooltip() {
    let opts = ViewOptions::viewer();
    assert!(opts.hover_tooltip);
    assert_eq!(opts.hover_threshold_px, HOVER_THRESHOLD_PX);
}

#[test]
fn surface_scale_disables_pan() {
    let opts = ViewOptions { zoom_model: ZoomModel::SurfaceScale, ..ViewOptions::viewer() };
    assert!(!opts.pan_enabled());
}

#[test]
fn default_options_are_viewer() {
    assert_eq!(ViewOptions::default(), ViewOptions::viewer());
}

// =============================================================
// UiState / InputState
// =============================================================

#[test]
fn ui_state_default() {
    let ui = UiState::default();
    assert_eq!(ui.tool, Tool::Select);
    assert!(ui.hovered.is_none());
    assert!(ui.pointer_screen.is_none());
}

#[test]
fn input_state_default_is_idle() {
    assert_eq!(InputState::default(), InputState::Idle);
}

#[test]
fn input_state_panning_carries_points() {
    let state = InputState::Panning {
        button: Button::Primary,
        origin_screen: Point::new(1.0, 2.0),
        last_screen: Point::new(3.0, 4.0),
    };
    match state {
        InputState::Panning { origin_screen, last_screen, .. } => {
            assert_eq!(origin_screen, Point::new(1.0, 2.0));
            assert_eq!(last_screen, Point::new(3.0, 4.0));
        }
        other => panic!("unexpected state {other:?}"),
    }
}
