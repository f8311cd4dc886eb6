//! JavaScript-facing wrapper around [`Engine`].
//!
//! The host page wires DOM events to these methods and feeds server JSON in
//! as strings. Every input method returns the resulting [`crate::engine::Action`]
//! list serialized as a JSON array, which the host dispatches (HTTP calls,
//! re-render, tooltip updates).

#[cfg(test)]
#[path = "bindings_test.rs"]
mod bindings_test;

use std::collections::HashMap;

use serde::Deserialize;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, HtmlImageElement};

use crate::engine::{Action, Engine};
use crate::input::{Button, Tool, ViewOptions};
use crate::scene::{Hallway, HallwayId, Space, SpaceId};
use crate::transform::{Point, ZoomModel};

/// Map a DOM `MouseEvent.button` code to a [`Button`].
#[must_use]
pub fn parse_button(code: i16) -> Option<Button> {
    match code {
        0 => Some(Button::Primary),
        1 => Some(Button::Middle),
        2 => Some(Button::Secondary),
        _ => None,
    }
}

/// Map a toolbar tool name to a [`Tool`].
#[must_use]
pub fn parse_tool(name: &str) -> Option<Tool> {
    match name {
        "select" => Some(Tool::Select),
        "place_space" => Some(Tool::PlaceSpace),
        "draw_hallway" => Some(Tool::DrawHallway),
        "erase" => Some(Tool::Erase),
        _ => None,
    }
}

/// Pick the view preset by page mode, with the zoom model layered on top.
#[must_use]
pub fn view_options(mode: &str, surface_scale: bool) -> ViewOptions {
    let base = if mode == "editor" { ViewOptions::editor() } else { ViewOptions::viewer() };
    let zoom_model = if surface_scale { ZoomModel::SurfaceScale } else { ZoomModel::Placement };
    ViewOptions { zoom_model, ..base }
}

#[derive(Debug, Deserialize)]
struct SpacesPayload {
    spaces: Vec<Space>,
}

#[derive(Debug, Deserialize)]
struct HallwaysPayload {
    hallways: Vec<Hallway>,
}

#[derive(Debug, Deserialize)]
struct HallwayCount {
    hallway_id: HallwayId,
    count: u32,
}

#[derive(Debug, Deserialize)]
struct CongestionPayload {
    hallway_counts: Vec<HallwayCount>,
}

#[derive(Debug, Deserialize)]
struct RoutePayload {
    space_ids: Vec<SpaceId>,
    hallway_ids: Vec<HallwayId>,
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

fn actions_to_js(actions: &[Action]) -> Result<String, JsValue> {
    serde_json::to_string(actions).map_err(js_error)
}

/// Engine handle exported to JavaScript.
#[wasm_bindgen]
pub struct FloorplanView {
    engine: Engine,
}

#[wasm_bindgen]
impl FloorplanView {
    /// `mode` is `"editor"` or `"viewer"`.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, mode: &str, surface_scale: bool) -> Self {
        Self { engine: Engine::new(canvas, view_options(mode, surface_scale)) }
    }

    /// # Errors
    ///
    /// Returns a JS error if the actions cannot be serialized.
    pub fn set_image(&mut self, image: HtmlImageElement) -> Result<String, JsValue> {
        let action = self.engine.set_image(image);
        actions_to_js(&[action])
    }

    /// # Errors
    ///
    /// Returns a JS error if the actions cannot be serialized.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<String, JsValue> {
        let action = self.engine.resize(width, height);
        actions_to_js(&[action])
    }

    /// Replace all spaces from a `GET /spaces` body.
    ///
    /// # Errors
    ///
    /// Returns a JS error if the JSON does not match the expected shape.
    pub fn load_spaces(&mut self, json: &str) -> Result<(), JsValue> {
        let payload: SpacesPayload = serde_json::from_str(json).map_err(js_error)?;
        self.engine.core.load_spaces(payload.spaces);
        Ok(())
    }

    /// Replace all hallways from a `GET /hallways` body.
    ///
    /// # Errors
    ///
    /// Returns a JS error if the JSON does not match the expected shape.
    pub fn load_hallways(&mut self, json: &str) -> Result<(), JsValue> {
        let payload: HallwaysPayload = serde_json::from_str(json).map_err(js_error)?;
        self.engine.core.load_hallways(payload.hallways);
        Ok(())
    }

    /// Apply a `POST /congestion` body.
    ///
    /// # Errors
    ///
    /// Returns a JS error if the JSON does not match the expected shape.
    pub fn apply_congestion(&mut self, json: &str) -> Result<(), JsValue> {
        let payload: CongestionPayload = serde_json::from_str(json).map_err(js_error)?;
        let counts: HashMap<HallwayId, u32> =
            payload.hallway_counts.into_iter().map(|c| (c.hallway_id, c.count)).collect();
        self.engine.core.apply_congestion(counts);
        Ok(())
    }

    /// Apply a `POST /route` body.
    ///
    /// # Errors
    ///
    /// Returns a JS error if the JSON does not match the expected shape.
    pub fn apply_route(&mut self, json: &str) -> Result<(), JsValue> {
        let payload: RoutePayload = serde_json::from_str(json).map_err(js_error)?;
        self.engine.core.apply_route(payload.space_ids, payload.hallway_ids);
        Ok(())
    }

    pub fn clear_overlays(&mut self) {
        self.engine.core.clear_overlays();
    }

    pub fn space_deleted(&mut self, id: SpaceId) {
        self.engine.core.apply_space_deleted(id);
    }

    pub fn hallway_deleted(&mut self, id: HallwayId) {
        self.engine.core.apply_hallway_deleted(id);
    }

    /// # Errors
    ///
    /// Returns a JS error for an unknown tool name.
    pub fn set_tool(&mut self, name: &str) -> Result<(), JsValue> {
        let tool = parse_tool(name).ok_or_else(|| js_error(format!("unknown tool: {name}")))?;
        self.engine.set_tool(tool);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns a JS error if the actions cannot be serialized.
    pub fn set_zoom(&mut self, zoom: f64) -> Result<String, JsValue> {
        actions_to_js(&self.engine.set_zoom(zoom))
    }

    /// # Errors
    ///
    /// Returns a JS error if the actions cannot be serialized.
    pub fn nudge_zoom(&mut self, steps: i32) -> Result<String, JsValue> {
        actions_to_js(&self.engine.nudge_zoom(steps))
    }

    /// # Errors
    ///
    /// Returns a JS error if the actions cannot be serialized.
    pub fn reset_view(&mut self) -> Result<String, JsValue> {
        actions_to_js(&self.engine.reset_view())
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.engine.core.zoom()
    }

    /// # Errors
    ///
    /// Returns a JS error if the actions cannot be serialized.
    pub fn pointer_down(&mut self, x: f64, y: f64, button: i16) -> Result<String, JsValue> {
        let Some(button) = parse_button(button) else {
            return actions_to_js(&[]);
        };
        actions_to_js(&self.engine.on_pointer_down(Point::new(x, y), button))
    }

    /// # Errors
    ///
    /// Returns a JS error if the actions cannot be serialized.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Result<String, JsValue> {
        actions_to_js(&self.engine.on_pointer_move(Point::new(x, y)))
    }

    /// # Errors
    ///
    /// Returns a JS error if the actions cannot be serialized.
    pub fn pointer_up(&mut self, x: f64, y: f64, button: i16) -> Result<String, JsValue> {
        let Some(button) = parse_button(button) else {
            return actions_to_js(&[]);
        };
        actions_to_js(&self.engine.on_pointer_up(Point::new(x, y), button))
    }

    /// # Errors
    ///
    /// Returns a JS error if the actions cannot be serialized.
    pub fn pointer_leave(&mut self) -> Result<String, JsValue> {
        actions_to_js(&self.engine.on_pointer_leave())
    }

    /// # Errors
    ///
    /// Returns a JS error if the canvas context is unavailable or a draw call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        self.engine.render()
    }
}
