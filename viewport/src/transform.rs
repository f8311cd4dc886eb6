//! Viewport transform: normalized image space ↔ screen space under zoom and pan.
//!
//! The floorplan image is fitted to the drawing surface (aspect preserved),
//! centered, and then adjusted by the user's zoom and pan. Every placement is
//! recomputed from a [`Viewport`] value on each draw rather than pushed as a
//! transform matrix, so inverting a pointer position is plain arithmetic.
//!
//! Two zoom models exist (see [`ZoomModel`]). They agree whenever pan is zero;
//! only [`ZoomModel::Placement`] supports panning.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use serde::{Deserialize, Serialize};

use crate::consts::{ZOOM_MAX, ZOOM_MIN, ZOOM_STEP};

/// Slack allowed when deciding whether an inverted point lies on the image edge.
const BOUNDS_EPSILON: f64 = 1e-9;

/// A point in either screen or normalized image space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn is_drawable(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// How zoom is applied to the drawn image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomModel {
    /// Zoom and pan are folded into the display rect (affine re-placement).
    #[default]
    Placement,
    /// The display rect stays at its fitted placement and the whole surface is
    /// scaled about its center. Pan is not available in this model.
    SurfaceScale,
}

/// Errors from viewport math.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ViewportError {
    /// A surface or image dimension is zero, negative, or not finite.
    #[error("invalid viewport input: {0}")]
    InvalidInput(&'static str),
    /// A screen point maps outside the image. Callers ignore the interaction.
    #[error("point ({x}, {y}) is outside the image")]
    OutOfBounds { x: f64, y: f64 },
}

/// Screen-space rectangle at which the whole image is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Pan/zoom state for one floorplan view.
///
/// All mutation goes through consuming `with_*` / `*_by` methods that return
/// a new value, so the zoom clamp can never be bypassed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    surface: Size,
    image: Size,
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    model: ZoomModel,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            surface: Size::default(),
            image: Size::default(),
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            model: ZoomModel::default(),
        }
    }
}

impl Viewport {
    /// A fitted, unzoomed, unpanned viewport.
    #[must_use]
    pub fn new(surface: Size, image: Size) -> Self {
        Self { surface, image, ..Self::default() }
    }

    // --- Accessors ---

    #[must_use]
    pub fn surface(&self) -> Size {
        self.surface
    }

    #[must_use]
    pub fn image(&self) -> Size {
        self.image
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Pan offset in screen pixels.
    #[must_use]
    pub fn pan(&self) -> Point {
        Point::new(self.pan_x, self.pan_y)
    }

    #[must_use]
    pub fn model(&self) -> ZoomModel {
        self.model
    }

    #[must_use]
    pub fn surface_center(&self) -> Point {
        Point::new(self.surface.width * 0.5, self.surface.height * 0.5)
    }

    // --- Updates ---

    /// Switch zoom model. Entering [`ZoomModel::SurfaceScale`] drops any pan.
    #[must_use]
    pub fn with_model(self, model: ZoomModel) -> Self {
        match model {
            ZoomModel::Placement => Self { model, ..self },
            ZoomModel::SurfaceScale => Self { model, pan_x: 0.0, pan_y: 0.0, ..self },
        }
    }

    /// Resize the drawing surface. Zoom and pan are kept.
    #[must_use]
    pub fn with_surface(self, surface: Size) -> Self {
        Self { surface, ..self }
    }

    /// Swap in a newly loaded image. Zoom and pan reset.
    #[must_use]
    pub fn with_image(self, image: Size) -> Self {
        Self { image, ..self }.reset()
    }

    /// Set zoom directly (slider input), clamped to `[ZOOM_MIN, ZOOM_MAX]`.
    /// Non-finite requests leave the zoom unchanged.
    #[must_use]
    pub fn with_zoom(self, zoom: f64) -> Self {
        if !zoom.is_finite() {
            return self;
        }
        Self { zoom: zoom.clamp(ZOOM_MIN, ZOOM_MAX), ..self }
    }

    /// Step zoom by `steps` button presses. The result lands on the step grid
    /// so repeated nudges do not accumulate float error.
    #[must_use]
    pub fn nudge_zoom(self, steps: i32) -> Self {
        let raw = self.zoom + f64::from(steps) * ZOOM_STEP;
        let snapped = (raw / ZOOM_STEP).round() / ZOOM_STEP.recip();
        self.with_zoom(snapped)
    }

    /// Shift the image by a screen-space delta. Ignored under
    /// [`ZoomModel::SurfaceScale`].
    #[must_use]
    pub fn panned_by(self, dx: f64, dy: f64) -> Self {
        if self.model == ZoomModel::SurfaceScale || !dx.is_finite() || !dy.is_finite() {
            return self;
        }
        Self { pan_x: self.pan_x + dx, pan_y: self.pan_y + dy, ..self }
    }

    /// Back to zoom 1 with no pan.
    #[must_use]
    pub fn reset(self) -> Self {
        Self { zoom: 1.0, pan_x: 0.0, pan_y: 0.0, ..self }
    }

    // --- Projection ---

    /// Where the image is drawn for the current state.
    ///
    /// Under [`ZoomModel::SurfaceScale`] this is the zoom-1 placement; the
    /// surface scale is applied by [`Viewport::to_screen`].
    ///
    /// # Errors
    ///
    /// Returns [`ViewportError::InvalidInput`] if the surface or image has a
    /// dimension that is not a positive finite number.
    pub fn compute_display_rect(&self) -> Result<DisplayRect, ViewportError> {
        if !self.image.is_drawable() {
            return Err(ViewportError::InvalidInput("image dimensions must be positive"));
        }
        if !self.surface.is_drawable() {
            return Err(ViewportError::InvalidInput("surface dimensions must be positive"));
        }

        let base_scale = (self.surface.width / self.image.width).min(self.surface.height / self.image.height);
        let (scale, pan_x, pan_y) = match self.model {
            ZoomModel::Placement => (base_scale * self.zoom, self.pan_x, self.pan_y),
            ZoomModel::SurfaceScale => (base_scale, 0.0, 0.0),
        };

        let width = self.image.width * scale;
        let height = self.image.height * scale;
        Ok(DisplayRect {
            x: (self.surface.width - width) / 2.0 + pan_x,
            y: (self.surface.height - height) / 2.0 + pan_y,
            width,
            height,
        })
    }

    /// Map a normalized image point to screen space.
    #[must_use]
    pub fn to_screen(&self, rect: &DisplayRect, norm: Point) -> Point {
        let placed = Point::new(rect.x + norm.x * rect.width, rect.y + norm.y * rect.height);
        match self.model {
            ZoomModel::Placement => placed,
            ZoomModel::SurfaceScale => {
                let c = self.surface_center();
                Point::new(c.x + (placed.x - c.x) * self.zoom, c.y + (placed.y - c.y) * self.zoom)
            }
        }
    }

    /// Map a screen point back to normalized image space.
    ///
    /// # Errors
    ///
    /// Returns [`ViewportError::OutOfBounds`] when the point falls outside the
    /// image, and [`ViewportError::InvalidInput`] for a zero-sized rect.
    pub fn to_normalized(&self, rect: &DisplayRect, screen: Point) -> Result<Point, ViewportError> {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return Err(ViewportError::InvalidInput("display rect has no area"));
        }

        let placed = match self.model {
            ZoomModel::Placement => screen,
            ZoomModel::SurfaceScale => {
                let c = self.surface_center();
                Point::new(c.x + (screen.x - c.x) / self.zoom, c.y + (screen.y - c.y) / self.zoom)
            }
        };

        let nx = (placed.x - rect.x) / rect.width;
        let ny = (placed.y - rect.y) / rect.height;
        if !within_unit(nx) || !within_unit(ny) {
            return Err(ViewportError::OutOfBounds { x: nx, y: ny });
        }
        Ok(Point::new(nx.clamp(0.0, 1.0), ny.clamp(0.0, 1.0)))
    }
}

/// Whether `v` lies in `[0, 1]`, give or take float noise.
fn within_unit(v: f64) -> bool {
    (-BOUNDS_EPSILON..=1.0 + BOUNDS_EPSILON).contains(&v)
}
