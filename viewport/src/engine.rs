use std::collections::HashMap;

use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::consts::{CLICK_SLOP_PX, MARKER_RADIUS_PX};
use crate::hit::{self, Hit};
use crate::input::{Button, InputState, Tool, UiState, ViewOptions};
use crate::render;
use crate::scene::{Hallway, HallwayId, SceneStore, Space, SpaceId};
use crate::transform::{DisplayRect, Point, Size, Viewport};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Action {
    /// Create a space at this normalized point (host prompts for name and type).
    PlaceSpaceRequested { x: f64, y: f64 },
    /// Create a hallway between two normalized points; the server snaps them.
    CreateHallwayRequested { x1: f64, y1: f64, x2: f64, y2: f64 },
    /// A space marker was clicked in Select mode (route endpoint picking).
    SpaceClicked(SpaceId),
    DeleteSpaceRequested(SpaceId),
    DeleteHallwayRequested(HallwayId),
    /// The hovered hallway changed; `None` hides the tooltip.
    HoverChanged(Option<Hit>),
    RenderNeeded,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
#[derive(Debug, Default)]
pub struct EngineCore {
    pub viewport: Viewport,
    pub scene: SceneStore,
    pub ui: UiState,
    pub input: InputState,
    pub options: ViewOptions,
}

impl EngineCore {
    #[must_use]
    pub fn new(options: ViewOptions) -> Self {
        Self {
            viewport: Viewport::default().with_model(options.zoom_model),
            options,
            ..Self::default()
        }
    }

    // --- Data inputs ---

    pub fn load_spaces(&mut self, spaces: Vec<Space>) {
        self.scene.load_spaces(spaces);
    }

    pub fn load_hallways(&mut self, hallways: Vec<Hallway>) {
        self.scene.load_hallways(hallways);
        self.ui.hovered = None;
    }

    pub fn apply_space_created(&mut self, space: Space) {
        self.scene.insert_space(space);
    }

    pub fn apply_hallway_created(&mut self, hallway: Hallway) {
        self.scene.insert_hallway(hallway);
    }

    pub fn apply_space_deleted(&mut self, id: SpaceId) {
        self.scene.remove_space(id);
        self.ui.hovered = None;
    }

    pub fn apply_hallway_deleted(&mut self, id: HallwayId) {
        self.scene.remove_hallway(id);
        if self.ui.hovered.is_some_and(|h| h.segment_id == id) {
            self.ui.hovered = None;
        }
    }

    pub fn apply_congestion(&mut self, counts: HashMap<HallwayId, u32>) {
        self.scene.apply_congestion(counts);
        self.ui.hovered = None;
    }

    pub fn apply_route(&mut self, space_ids: Vec<SpaceId>, hallway_ids: Vec<HallwayId>) {
        self.scene.apply_route(space_ids, hallway_ids);
    }

    pub fn clear_overlays(&mut self) {
        self.scene.clear_overlays();
        self.ui.hovered = None;
    }

    // --- View state ---

    /// Resize the drawing surface (CSS pixels).
    pub fn set_surface(&mut self, width: f64, height: f64) -> Action {
        self.viewport = self.viewport.with_surface(Size::new(width, height));
        Action::RenderNeeded
    }

    /// A new floorplan image finished loading. Resets zoom and pan and drops
    /// any gesture in progress.
    pub fn load_image(&mut self, width: f64, height: f64) -> Action {
        self.viewport = self.viewport.with_image(Size::new(width, height));
        self.input = InputState::Idle;
        self.ui.hovered = None;
        Action::RenderNeeded
    }

    /// Set the active tool, abandoning any gesture.
    pub fn set_tool(&mut self, tool: Tool) {
        self.ui.tool = tool;
        self.input = InputState::Idle;
    }

    /// Zoom slider input.
    pub fn set_zoom(&mut self, zoom: f64) -> Vec<Action> {
        let next = self.viewport.with_zoom(zoom);
        self.replace_viewport(next)
    }

    /// Zoom-in / zoom-out buttons.
    pub fn nudge_zoom(&mut self, steps: i32) -> Vec<Action> {
        let next = self.viewport.nudge_zoom(steps);
        self.replace_viewport(next)
    }

    /// Back to zoom 1 with no pan.
    pub fn reset_view(&mut self) -> Vec<Action> {
        let next = self.viewport.reset();
        self.replace_viewport(next)
    }

    fn replace_viewport(&mut self, next: Viewport) -> Vec<Action> {
        if next == self.viewport {
            return Vec::new();
        }
        self.viewport = next;
        vec![Action::RenderNeeded]
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        self.ui.pointer_screen = Some(screen_pt);
        match button {
            Button::Primary => {}
            Button::Middle => {
                self.input = InputState::Panning { button, origin_screen: screen_pt, last_screen: screen_pt };
                return Vec::new();
            }
            Button::Secondary => return Vec::new(),
        }

        match self.ui.tool {
            Tool::Select => {
                self.input = InputState::Panning { button, origin_screen: screen_pt, last_screen: screen_pt };
                Vec::new()
            }
            Tool::PlaceSpace => self
                .screen_to_image(screen_pt)
                .map(|n| vec![Action::PlaceSpaceRequested { x: n.x, y: n.y }])
                .unwrap_or_default(),
            Tool::DrawHallway => {
                if let Some(start_norm) = self.screen_to_image(screen_pt) {
                    self.input = InputState::DrawingHallway { start_norm, current_screen: screen_pt };
                    return vec![Action::RenderNeeded];
                }
                Vec::new()
            }
            Tool::Erase => self.erase_at(screen_pt),
        }
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        self.ui.pointer_screen = Some(screen_pt);
        match self.input {
            InputState::Idle => self.update_hover(screen_pt),
            InputState::Panning { button, origin_screen, last_screen } => {
                if !self.options.pan_enabled() {
                    return Vec::new();
                }
                self.viewport = self
                    .viewport
                    .panned_by(screen_pt.x - last_screen.x, screen_pt.y - last_screen.y);
                self.input = InputState::Panning { button, origin_screen, last_screen: screen_pt };
                vec![Action::RenderNeeded]
            }
            InputState::DrawingHallway { start_norm, .. } => {
                self.input = InputState::DrawingHallway { start_norm, current_screen: screen_pt };
                vec![Action::RenderNeeded]
            }
        }
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, _button: Button) -> Vec<Action> {
        self.ui.pointer_screen = Some(screen_pt);
        let state = std::mem::take(&mut self.input);
        match state {
            InputState::Idle => Vec::new(),
            InputState::Panning { button, origin_screen, .. } => {
                if button != Button::Primary
                    || self.ui.tool != Tool::Select
                    || origin_screen.distance(screen_pt) > CLICK_SLOP_PX
                {
                    return Vec::new();
                }
                self.marker_at(screen_pt)
                    .map(|id| vec![Action::SpaceClicked(id)])
                    .unwrap_or_default()
            }
            InputState::DrawingHallway { start_norm, .. } => {
                let mut actions = vec![Action::RenderNeeded];
                if let Some(end) = self.screen_to_image(screen_pt) {
                    if end != start_norm {
                        actions.insert(
                            0,
                            Action::CreateHallwayRequested { x1: start_norm.x, y1: start_norm.y, x2: end.x, y2: end.y },
                        );
                    }
                }
                actions
            }
        }
    }

    /// The pointer left the surface: end gestures and hide the tooltip.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.ui.pointer_screen = None;
        let was_drawing = matches!(self.input, InputState::DrawingHallway { .. });
        self.input = InputState::Idle;

        let mut actions = Vec::new();
        if self.ui.hovered.take().is_some() {
            actions.push(Action::HoverChanged(None));
        }
        if was_drawing || !actions.is_empty() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    fn update_hover(&mut self, screen_pt: Point) -> Vec<Action> {
        if !self.options.hover_tooltip || self.ui.tool != Tool::Select {
            return Vec::new();
        }
        let Some(rect) = self.display_rect() else {
            return Vec::new();
        };

        let segments = self.scene.hoverable_segments();
        let hit = hit::find_nearest_segment(screen_pt, &segments, &self.viewport, &rect, self.options.hover_threshold_px);
        let changed = hit.map(|h| h.segment_id) != self.ui.hovered.map(|h| h.segment_id);
        self.ui.hovered = hit;
        if changed {
            vec![Action::HoverChanged(hit), Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    fn erase_at(&self, screen_pt: Point) -> Vec<Action> {
        if let Some(id) = self.marker_at(screen_pt) {
            return vec![Action::DeleteSpaceRequested(id)];
        }
        let Some(rect) = self.display_rect() else {
            return Vec::new();
        };
        let segments = self.scene.segments();
        hit::find_nearest_segment(screen_pt, &segments, &self.viewport, &rect, self.options.hover_threshold_px)
            .map(|h| vec![Action::DeleteHallwayRequested(h.segment_id)])
            .unwrap_or_default()
    }

    fn marker_at(&self, screen_pt: Point) -> Option<SpaceId> {
        let rect = self.display_rect()?;
        hit::find_nearest_marker(screen_pt, self.scene.markers(), &self.viewport, &rect, MARKER_RADIUS_PX)
            .map(|h| h.space_id)
    }

    // --- Queries ---

    /// Current display rect, or `None` until both surface and image are sized.
    #[must_use]
    pub fn display_rect(&self) -> Option<DisplayRect> {
        match self.viewport.compute_display_rect() {
            Ok(rect) => Some(rect),
            Err(_) => None,
        }
    }

    /// Normalized image point under `screen_pt`, or `None` off the image.
    #[must_use]
    pub fn screen_to_image(&self, screen_pt: Point) -> Option<Point> {
        let rect = self.display_rect()?;
        match self.viewport.to_normalized(&rect, screen_pt) {
            Ok(norm) => Some(norm),
            Err(_) => None,
        }
    }

    #[must_use]
    pub fn hovered(&self) -> Option<Hit> {
        self.ui.hovered
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.viewport.zoom()
    }
}

/// The full viewport engine. Wraps `EngineCore` and owns the browser canvas
/// element and the loaded floorplan image.
pub struct Engine {
    canvas: HtmlCanvasElement,
    image: Option<HtmlImageElement>,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, options: ViewOptions) -> Self {
        let mut core = EngineCore::new(options);
        core.set_surface(f64::from(canvas.width()), f64::from(canvas.height()));
        Self { canvas, image: None, core }
    }

    /// Adopt a floorplan image that has finished loading.
    pub fn set_image(&mut self, image: HtmlImageElement) -> Action {
        let action = self
            .core
            .load_image(f64::from(image.natural_width()), f64::from(image.natural_height()));
        self.image = Some(image);
        action
    }

    /// Match the canvas backing store to its CSS size.
    pub fn resize(&mut self, width: u32, height: u32) -> Action {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.core.set_surface(f64::from(width), f64::from(height))
    }

    // --- Delegated input ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button)
    }

    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.core.on_pointer_leave()
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.core.set_tool(tool);
    }

    pub fn set_zoom(&mut self, zoom: f64) -> Vec<Action> {
        self.core.set_zoom(zoom)
    }

    pub fn nudge_zoom(&mut self, steps: i32) -> Vec<Action> {
        self.core.nudge_zoom(steps)
    }

    pub fn reset_view(&mut self) -> Vec<Action> {
        self.core.reset_view()
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a draw call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        render::draw(&ctx, self.image.as_ref(), &self.core)
    }
}
