//! Hit testing: point → shape + handle lookup.
//!
//! Reverse-walks the board (front-to-back) to find which shape is at a given
//! (x, y) canvas position, and which handle of that shape is under the point.
//! Assumes committed shapes are normalized.

use crate::measure::TextMeasure;
use wb_core::geometry::{near_point, on_segment};
use wb_core::{Bounds, Handle, Shape, ShapeId, ShapeKind};

/// Tolerances used by the hit tester.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitConfig {
    /// Max per-axis distance for a point to grab a corner or endpoint.
    pub handle_tolerance: f32,
    /// Max detour for a point to count as on a line body.
    pub line_slack: f32,
    /// Height of a text shape's single line.
    pub text_line_height: f32,
}

impl Default for HitConfig {
    fn default() -> Self {
        Self {
            handle_tolerance: 5.0,
            line_slack: 1.0,
            text_line_height: 16.0,
        }
    }
}

/// A picked shape and the handle under the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit<'a> {
    /// Position of the shape in the board (z-order).
    pub index: usize,
    pub shape: &'a Shape,
    pub handle: Handle,
}

fn corner_handle(shape: &Shape, x: f32, y: f32, tolerance: f32) -> Option<Handle> {
    [
        (Handle::Tl, shape.x1, shape.y1),
        (Handle::Tr, shape.x2, shape.y1),
        (Handle::Bl, shape.x1, shape.y2),
        (Handle::Br, shape.x2, shape.y2),
    ]
    .into_iter()
    .find(|&(_, px, py)| near_point(x, y, px, py, tolerance))
    .map(|(handle, ..)| handle)
}

/// Which handle (or the body) of `shape` is at `(x, y)`, if any.
///
/// Handles are checked before the body, so a corner wins over `Inside`.
pub fn position_within(
    shape: &Shape,
    x: f32,
    y: f32,
    config: &HitConfig,
    measure: &dyn TextMeasure,
) -> Option<Handle> {
    let tol = config.handle_tolerance;
    match &shape.kind {
        ShapeKind::Line => {
            let a = (shape.x1, shape.y1);
            let b = (shape.x2, shape.y2);
            if near_point(x, y, a.0, a.1, tol) {
                Some(Handle::Start)
            } else if near_point(x, y, b.0, b.1, tol) {
                Some(Handle::End)
            } else {
                on_segment(a, b, (x, y), config.line_slack).then_some(Handle::Inside)
            }
        }
        ShapeKind::Rectangle | ShapeKind::Frame { .. } => corner_handle(shape, x, y, tol)
            .or_else(|| {
                (x >= shape.x1 && x <= shape.x2 && y >= shape.y1 && y <= shape.y2)
                    .then_some(Handle::Inside)
            }),
        ShapeKind::Ellipse { cx, cy, rx, ry } => corner_handle(shape, x, y, tol).or_else(|| {
            if *rx <= 0.0 || *ry <= 0.0 {
                return None;
            }
            let nx = (x - cx) / rx;
            let ny = (y - cy) / ry;
            (nx * nx + ny * ny < 1.0).then_some(Handle::Inside)
        }),
        ShapeKind::Text { content } => {
            let width = measure.text_width(content);
            let inside = x >= shape.x1
                && x <= shape.x1 + width
                && y >= shape.y1
                && y <= shape.y1 + config.text_line_height;
            inside.then_some(Handle::Inside)
        }
    }
}

/// Find the topmost shape at `(x, y)`. Later shapes sit on top.
///
/// Frames are skipped unless `include_frames` is set, so a frame never steals
/// a hit meant for the shapes inside it. Returns `None` on a miss or an
/// empty board.
pub fn pick_at<'a>(
    shapes: &'a [Shape],
    x: f32,
    y: f32,
    include_frames: bool,
    config: &HitConfig,
    measure: &dyn TextMeasure,
) -> Option<Hit<'a>> {
    let hit = shapes
        .iter()
        .enumerate()
        .rev()
        .filter(|(_, s)| include_frames || !s.is_frame())
        .find_map(|(index, shape)| {
            position_within(shape, x, y, config, measure).map(|handle| Hit {
                index,
                shape,
                handle,
            })
        });
    if let Some(h) = &hit {
        log::trace!("hit {} {:?} at ({x}, {y})", h.shape.id, h.handle);
    }
    hit
}

/// Pick a regular shape first and fall back to frames.
pub fn pick_prefer_contents<'a>(
    shapes: &'a [Shape],
    x: f32,
    y: f32,
    config: &HitConfig,
    measure: &dyn TextMeasure,
) -> Option<Hit<'a>> {
    pick_at(shapes, x, y, false, config, measure)
        .or_else(|| pick_at(shapes, x, y, true, config, measure))
}

/// Ids of all shapes whose box intersects `area`, in board order.
/// Used for marquee (box) selection.
pub fn pick_in_rect(shapes: &[Shape], area: Bounds) -> Vec<ShapeId> {
    shapes
        .iter()
        .filter(|s| s.bounds().intersects(&area))
        .map(|s| s.id)
        .collect()
}
