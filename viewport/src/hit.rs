//! Nearest hallway segment or space marker under a screen point.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use serde::{Deserialize, Serialize};

use crate::scene::{HallwayId, SpaceId};
use crate::transform::{DisplayRect, Point, Viewport};

/// A hallway centerline in normalized image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: HallwayId,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Segment {
    #[must_use]
    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    #[must_use]
    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }
}

/// The segment nearest a query point, with its screen-space distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hit {
    pub segment_id: HallwayId,
    pub distance: f64,
}

/// The space marker nearest a query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerHit {
    pub space_id: SpaceId,
    pub distance: f64,
}

/// Distance from `p` to the closed segment `a`–`b`.
///
/// A zero-length segment degrades to the distance from `p` to `a`.
#[must_use]
pub fn distance_point_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.distance(a);
    }

    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance(Point::new(a.x + t * dx, a.y + t * dy))
}

/// Find the segment nearest `screen_pt`, within `threshold` screen pixels.
///
/// Segments are projected with `viewport.to_screen`. On equal distances the
/// earlier segment in `segments` wins.
#[must_use]
pub fn find_nearest_segment(
    screen_pt: Point,
    segments: &[Segment],
    viewport: &Viewport,
    rect: &DisplayRect,
    threshold: f64,
) -> Option<Hit> {
    let mut best: Option<Hit> = None;
    for seg in segments {
        let a = viewport.to_screen(rect, seg.start());
        let b = viewport.to_screen(rect, seg.end());
        let distance = distance_point_to_segment(screen_pt, a, b);
        if best.is_none_or(|hit| distance < hit.distance) {
            best = Some(Hit { segment_id: seg.id, distance });
        }
    }
    best.filter(|hit| hit.distance <= threshold)
}

/// Find the marker nearest `screen_pt`, within `radius` screen pixels.
///
/// `markers` yields `(id, normalized position)` pairs; ties keep the first.
#[must_use]
pub fn find_nearest_marker<I>(
    screen_pt: Point,
    markers: I,
    viewport: &Viewport,
    rect: &DisplayRect,
    radius: f64,
) -> Option<MarkerHit>
where
    I: IntoIterator<Item = (SpaceId, Point)>,
{
    let mut best: Option<MarkerHit> = None;
    for (space_id, norm) in markers {
        let distance = screen_pt.distance(viewport.to_screen(rect, norm));
        if best.is_none_or(|hit| distance < hit.distance) {
            best = Some(MarkerHit { space_id, distance });
        }
    }
    best.filter(|hit| hit.distance <= radius)
}
