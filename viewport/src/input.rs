//! Input model: tools, mouse buttons, and the gesture state machine.
//!
//! `Tool` captures what a primary click means in the editor. `InputState` is
//! the gesture being tracked between pointer-down and pointer-up. Loading a
//! new floorplan image drops any gesture back to `Idle`.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::consts::HOVER_THRESHOLD_PX;
use crate::hit::Hit;
use crate::transform::{Point, ZoomModel};

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Click spaces, drag to pan, hover hallways (default).
    #[default]
    Select,
    /// Click on the image to place a new space.
    PlaceSpace,
    /// Drag from one point to another to draw a hallway.
    DrawHallway,
    /// Click a space or hallway to delete it.
    Erase,
}

impl Tool {
    /// Whether a primary click with this tool edits the floorplan.
    #[must_use]
    pub fn is_editing(self) -> bool {
        !matches!(self, Self::Select)
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// Per-view configuration. The editor and viewer pages share one engine and
/// differ only in these flags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewOptions {
    pub zoom_model: ZoomModel,
    /// Draw space names next to their markers.
    pub show_labels: bool,
    /// Report hallway hover changes so the host can show a tooltip.
    pub hover_tooltip: bool,
    pub hover_threshold_px: f64,
}

impl ViewOptions {
    /// Floorplan editor: placement zoom with pan, labels on, no tooltip.
    #[must_use]
    pub fn editor() -> Self {
        Self {
            zoom_model: ZoomModel::Placement,
            show_labels: true,
            hover_tooltip: false,
            hover_threshold_px: HOVER_THRESHOLD_PX,
        }
    }

    /// Congestion viewer: placement zoom with pan, labels on, hover tooltip.
    #[must_use]
    pub fn viewer() -> Self {
        Self { hover_tooltip: true, ..Self::editor() }
    }

    /// Whether drag-to-pan does anything under these options.
    #[must_use]
    pub fn pan_enabled(&self) -> bool {
        self.zoom_model == ZoomModel::Placement
    }
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self::viewer()
    }
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Currently active tool.
    pub tool: Tool,
    /// The hallway currently under the pointer, if any.
    pub hovered: Option<Hit>,
    /// Last pointer position in screen space, for the rubber band and tooltip.
    pub pointer_screen: Option<Point>,
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user pressed in Select mode and may be dragging to pan.
    Panning {
        /// Button that started the gesture; only a primary click picks a space.
        button: Button,
        /// Screen position at pointer-down, used to tell a click from a drag.
        origin_screen: Point,
        /// Screen position of the previous pointer event, used to compute pan delta.
        last_screen: Point,
    },
    /// The user is dragging out a new hallway.
    DrawingHallway {
        /// Normalized image point where the drag started.
        start_norm: Point,
        /// Current pointer position in screen space.
        current_screen: Point,
    },
}
