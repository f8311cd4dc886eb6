//! Rendering: draws the floorplan scene to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives a read-only view of engine state and produces pixels. It does
//! not mutate any application state.
//!
//! Every coordinate goes through [`Viewport::to_screen`], so both zoom models
//! render without pushing a canvas transform.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::consts::{
    IDLE_HALLWAY_WIDTH_PX, MARKER_RADIUS_PX, MAX_CONGESTION_WIDTH_PX, MIN_CONGESTION_WIDTH_PX, ROUTE_WIDTH_PX,
};
use crate::engine::EngineCore;
use crate::input::InputState;
use crate::scene::{Hallway, SpaceId, SpaceKind};
use crate::transform::{DisplayRect, Point, Viewport};

const IDLE_HALLWAY_COLOR: &str = "#9e9e9e";
const ROUTE_COLOR: &str = "#1565c0";
const HOVER_COLOR: &str = "rgba(255, 235, 59, 0.6)";
const RUBBER_BAND_COLOR: &str = "#424242";
const LABEL_FONT: &str = "12px sans-serif";

/// Stroke appearance of one hallway.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    pub color: String,
    pub width: f64,
}

/// Map a traversal count onto a green→red ramp relative to the busiest hallway.
#[must_use]
pub fn congestion_style(count: u32, max_count: u32) -> StrokeStyle {
    if count == 0 || max_count == 0 {
        return StrokeStyle { color: IDLE_HALLWAY_COLOR.to_owned(), width: IDLE_HALLWAY_WIDTH_PX };
    }

    let ratio = (f64::from(count) / f64::from(max_count)).clamp(0.0, 1.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (red, green) = ((255.0 * ratio).round() as u8, (255.0 * (1.0 - ratio)).round() as u8);
    StrokeStyle {
        color: format!("rgb({red}, {green}, 60)"),
        width: MIN_CONGESTION_WIDTH_PX + (MAX_CONGESTION_WIDTH_PX - MIN_CONGESTION_WIDTH_PX) * ratio,
    }
}

/// Marker fill for a space kind.
#[must_use]
pub fn marker_color(kind: &SpaceKind) -> &'static str {
    match kind {
        SpaceKind::Classroom => "#1e88e5",
        SpaceKind::Stairwell => "#8e24aa",
        SpaceKind::Intersection => "#757575",
        SpaceKind::Office => "#43a047",
        SpaceKind::Other(_) => "#fb8c00",
    }
}

/// Tooltip text for a hovered hallway.
#[must_use]
pub fn hover_label(hallway: &Hallway, count: u32) -> String {
    let noun = if count == 1 { "student" } else { "students" };
    format!("{}: {count} {noun}", hallway.name)
}

/// Draw the full scene: image, hallways, route, markers, and pointer feedback.
///
/// Draws nothing beyond a clear until both the surface and the image are sized.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(ctx: &CanvasRenderingContext2d, image: Option<&HtmlImageElement>, core: &EngineCore) -> Result<(), JsValue> {
    let surface = core.viewport.surface();
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, surface.width, surface.height);

    let Some(rect) = core.display_rect() else {
        return Ok(());
    };
    let view = &core.viewport;

    // Layer 1: floorplan image.
    if let Some(img) = image {
        let tl = view.to_screen(&rect, Point::new(0.0, 0.0));
        let br = view.to_screen(&rect, Point::new(1.0, 1.0));
        ctx.draw_image_with_html_image_element_and_dw_and_dh(img, tl.x, tl.y, br.x - tl.x, br.y - tl.y)?;
    }

    // Layer 2: hallways, styled by congestion.
    let max_count = core.scene.congestion().map_or(0, |c| c.max_count());
    ctx.set_line_cap("round");
    for hallway in core.scene.hallways() {
        let style = congestion_style(core.scene.congestion_count(hallway.id), max_count);
        stroke_hallway(ctx, view, &rect, hallway, &style.color, style.width);
    }

    // Layer 3: route overlay.
    if let Some(route) = core.scene.route() {
        for hallway in core.scene.hallways().iter().filter(|h| route.hallway_ids.contains(&h.id)) {
            stroke_hallway(ctx, view, &rect, hallway, ROUTE_COLOR, ROUTE_WIDTH_PX);
        }
    }

    // Layer 4: hover highlight.
    if let Some(hit) = core.ui.hovered {
        if let Some(hallway) = core.scene.hallway(hit.segment_id) {
            let width = congestion_style(core.scene.congestion_count(hallway.id), max_count).width + 6.0;
            stroke_hallway(ctx, view, &rect, hallway, HOVER_COLOR, width);
        }
    }

    // Layer 5: in-progress hallway.
    if let InputState::DrawingHallway { start_norm, current_screen } = core.input {
        let start = view.to_screen(&rect, start_norm);
        ctx.set_stroke_style_str(RUBBER_BAND_COLOR);
        ctx.set_line_width(2.0);
        ctx.begin_path();
        ctx.move_to(start.x, start.y);
        ctx.line_to(current_screen.x, current_screen.y);
        ctx.stroke();
    }

    // Layer 6: space markers and labels.
    draw_markers(ctx, core, &rect)?;

    // Layer 7: tooltip.
    if core.options.hover_tooltip {
        draw_tooltip(ctx, core)?;
    }

    Ok(())
}

fn stroke_hallway(
    ctx: &CanvasRenderingContext2d,
    view: &Viewport,
    rect: &DisplayRect,
    hallway: &Hallway,
    color: &str,
    width: f64,
) {
    let seg = hallway.segment();
    let a = view.to_screen(rect, seg.start());
    let b = view.to_screen(rect, seg.end());
    ctx.set_stroke_style_str(color);
    ctx.set_line_width(width);
    ctx.begin_path();
    ctx.move_to(a.x, a.y);
    ctx.line_to(b.x, b.y);
    ctx.stroke();
}

fn draw_markers(ctx: &CanvasRenderingContext2d, core: &EngineCore, rect: &DisplayRect) -> Result<(), JsValue> {
    let on_route = |id: SpaceId| core.scene.route().is_some_and(|r| r.space_ids.contains(&id));

    ctx.set_font(LABEL_FONT);
    for space in core.scene.spaces() {
        let p = core.viewport.to_screen(rect, space.position());

        ctx.begin_path();
        ctx.arc(p.x, p.y, MARKER_RADIUS_PX, 0.0, TAU)?;
        ctx.set_fill_style_str(marker_color(&space.kind));
        ctx.fill();
        if on_route(space.id) {
            ctx.set_stroke_style_str(ROUTE_COLOR);
            ctx.set_line_width(2.0);
            ctx.stroke();
        }

        if core.options.show_labels && space.kind != SpaceKind::Intersection {
            ctx.set_fill_style_str("#212121");
            ctx.fill_text(&space.name, p.x + MARKER_RADIUS_PX + 2.0, p.y - MARKER_RADIUS_PX)?;
        }
    }
    Ok(())
}

fn draw_tooltip(ctx: &CanvasRenderingContext2d, core: &EngineCore) -> Result<(), JsValue> {
    let (Some(hit), Some(pointer)) = (core.ui.hovered, core.ui.pointer_screen) else {
        return Ok(());
    };
    let Some(hallway) = core.scene.hallway(hit.segment_id) else {
        return Ok(());
    };

    let text = hover_label(hallway, core.scene.congestion_count(hallway.id));
    ctx.set_font(LABEL_FONT);
    let width = ctx.measure_text(&text)?.width();
    let (x, y) = (pointer.x + 12.0, pointer.y + 12.0);

    ctx.set_fill_style_str("rgba(33, 33, 33, 0.85)");
    ctx.fill_rect(x, y, width + 12.0, 20.0);
    ctx.set_fill_style_str("#ffffff");
    ctx.fill_text(&text, x + 6.0, y + 14.0)?;
    Ok(())
}
