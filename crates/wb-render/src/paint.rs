//! Board → drawing-surface commands.
//!
//! Walks the board in z-order and hands each shape's outline to an injected
//! [`Surface`]. The painter never owns or caches the surface; the caller
//! presents it after `paint_scene` returns.

use crate::measure::TextMeasure;
use kurbo::{BezPath, Ellipse as KurboEllipse, Line, Point, Rect, Shape as _};
use wb_core::model::{Color, Shape, ShapeKind, Style};

/// Flattening tolerance for curved outlines.
const PATH_TOLERANCE: f64 = 0.1;
/// Frame titles sit this far above the frame's top edge.
const FRAME_TITLE_OFFSET: f64 = 8.0;
const FRAME_TITLE_SIZE: f32 = 12.0;
const TEXT_SIZE: f32 = 16.0;

/// A drawing surface the painter can call into.
pub trait Surface: TextMeasure {
    fn clear(&mut self);
    fn fill_path(&mut self, path: &BezPath, color: Color);
    fn stroke_path(&mut self, path: &BezPath, color: Color, width: f64);
    /// Draw one line of text with its top-left corner at `origin`.
    fn fill_text(&mut self, text: &str, origin: Point, color: Color, size: f32);
}

/// Outline geometry of a shape, or `None` for text.
pub fn outline(shape: &Shape) -> Option<BezPath> {
    match &shape.kind {
        ShapeKind::Rectangle | ShapeKind::Frame { .. } => {
            let b = shape.bounds().ordered();
            let rect = Rect::new(b.x1 as f64, b.y1 as f64, b.x2 as f64, b.y2 as f64);
            Some(
                rect.to_rounded_rect(shape.style.corner_radius as f64)
                    .to_path(PATH_TOLERANCE),
            )
        }
        ShapeKind::Ellipse { cx, cy, rx, ry } => {
            let ellipse = KurboEllipse::new(
                Point::new(*cx as f64, *cy as f64),
                (*rx as f64, *ry as f64),
                0.0,
            );
            Some(ellipse.to_path(PATH_TOLERANCE))
        }
        ShapeKind::Line => {
            let line = Line::new(
                (shape.x1 as f64, shape.y1 as f64),
                (shape.x2 as f64, shape.y2 as f64),
            );
            Some(line.to_path(PATH_TOLERANCE))
        }
        ShapeKind::Text { .. } => None,
    }
}

/// Paint the whole board. Call once per frame.
pub fn paint_scene(surface: &mut dyn Surface, shapes: &[Shape]) {
    surface.clear();
    for shape in shapes {
        paint_shape(surface, shape);
    }
}

/// Paint a single shape.
pub fn paint_shape(surface: &mut dyn Surface, shape: &Shape) {
    log::trace!("PAINT {} {}", shape.shape_type(), shape.id);

    match &shape.kind {
        ShapeKind::Text { content } => {
            if !content.is_empty() {
                let origin = Point::new(shape.x1 as f64, shape.y1 as f64);
                surface.fill_text(content, origin, shape.style.stroke, TEXT_SIZE);
            }
        }
        ShapeKind::Frame { .. } => {
            if let Some(path) = outline(shape) {
                fill_and_stroke(surface, &path, &shape.style);
            }
            let b = shape.bounds().ordered();
            let title_y = b.y1 as f64 - FRAME_TITLE_OFFSET - FRAME_TITLE_SIZE as f64;
            let origin = Point::new(b.x1 as f64, title_y);
            surface.fill_text(&shape.title(), origin, Color::GRAY, FRAME_TITLE_SIZE);
        }
        _ => {
            if let Some(path) = outline(shape) {
                fill_and_stroke(surface, &path, &shape.style);
            }
        }
    }
}

fn fill_and_stroke(surface: &mut dyn Surface, path: &BezPath, style: &Style) {
    if let Some(fill) = style.fill {
        surface.fill_path(path, fill);
    }
    if style.line_width > 0.0 {
        surface.stroke_path(path, style.stroke, style.line_width as f64);
    }
}
