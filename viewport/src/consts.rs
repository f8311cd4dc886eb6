//! Shared numeric constants for the viewport crate.

// ── Zoom ────────────────────────────────────────────────────────

/// Smallest zoom factor the slider and nudge buttons can reach.
pub const ZOOM_MIN: f64 = 0.1;

/// Largest zoom factor the slider and nudge buttons can reach.
pub const ZOOM_MAX: f64 = 3.0;

/// Zoom change applied by one press of the zoom-in / zoom-out buttons.
pub const ZOOM_STEP: f64 = 0.1;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space distance in pixels within which a hallway counts as hovered.
pub const HOVER_THRESHOLD_PX: f64 = 8.0;

/// Screen-space radius of a space marker, also its click target.
pub const MARKER_RADIUS_PX: f64 = 6.0;

/// Pointer travel in pixels below which a press-release counts as a click.
pub const CLICK_SLOP_PX: f64 = 3.0;

// ── Rendering ───────────────────────────────────────────────────

/// Stroke width for a hallway nobody walks.
pub const IDLE_HALLWAY_WIDTH_PX: f64 = 1.5;

/// Stroke width at the low end of the congestion ramp.
pub const MIN_CONGESTION_WIDTH_PX: f64 = 2.0;

/// Stroke width for the busiest hallway.
pub const MAX_CONGESTION_WIDTH_PX: f64 = 10.0;

/// Stroke width of the highlighted route.
pub const ROUTE_WIDTH_PX: f64 = 5.0;
