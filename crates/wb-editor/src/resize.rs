//! Resize engine: drag handle + pointer → new corners.
//!
//! ## Shift behaviors
//!
//! | Gesture | Without Shift | With Shift |
//! |---------|---------------|------------|
//! | Draw box (rect, ellipse, frame) | free | square |
//! | Draw line | free | angle snapped to 45° |
//! | Move | free | dominant axis only |

use std::f32::consts::FRAC_PI_4;
use wb_core::{Bounds, Handle, ShapeType};

/// Move the corner(s) named by `handle` to `(x, y)`; the rest of the box is
/// left untouched. `Inside` and `None` leave the box unchanged.
pub fn resize(x: f32, y: f32, handle: Option<Handle>, bounds: Bounds) -> Bounds {
    let Bounds { x1, y1, x2, y2 } = bounds;
    match handle {
        Some(Handle::Tl | Handle::Start) => Bounds::new(x, y, x2, y2),
        Some(Handle::Tr) => Bounds::new(x1, y, x, y2),
        Some(Handle::Bl) => Bounds::new(x, y1, x2, y),
        Some(Handle::Br | Handle::End) => Bounds::new(x1, y1, x, y),
        Some(Handle::Inside) | None => bounds,
    }
}

/// The corner that stays fixed while `handle` is dragged.
pub fn anchor(handle: Handle, bounds: Bounds) -> Option<(f32, f32)> {
    let Bounds { x1, y1, x2, y2 } = bounds;
    match handle {
        Handle::Tl | Handle::Start => Some((x2, y2)),
        Handle::Tr => Some((x1, y2)),
        Handle::Bl => Some((x2, y1)),
        Handle::Br | Handle::End => Some((x1, y1)),
        Handle::Inside => None,
    }
}

/// A zero delta counts as positive so a constrained box stays square.
fn sign(v: f32) -> f32 {
    if v < 0.0 { -1.0 } else { 1.0 }
}

/// Second corner of a Shift-constrained draw from `origin` toward `pointer`.
///
/// Boxed types get equal absolute extents on both axes (the larger delta
/// wins) with each axis keeping its drag direction. Lines keep their length
/// and snap to the nearest multiple of 45°. Text is unconstrained.
pub fn constrained_draw(origin: (f32, f32), pointer: (f32, f32), shape_type: ShapeType) -> (f32, f32) {
    let (ox, oy) = origin;
    let dx = pointer.0 - ox;
    let dy = pointer.1 - oy;

    match shape_type {
        ShapeType::Rectangle | ShapeType::Ellipse | ShapeType::Frame => {
            let size = dx.abs().max(dy.abs());
            (ox + size * sign(dx), oy + size * sign(dy))
        }
        ShapeType::Line => {
            let length = dx.hypot(dy);
            let snapped = (dy.atan2(dx) / FRAC_PI_4).round() * FRAC_PI_4;
            (ox + length * snapped.cos(), oy + length * snapped.sin())
        }
        ShapeType::Text => pointer,
    }
}

/// Shift-constrained move delta: keep only the dominant axis.
pub fn constrained_translate(dx: f32, dy: f32) -> (f32, f32) {
    if dx.abs() > dy.abs() { (dx, 0.0) } else { (0.0, dy) }
}
