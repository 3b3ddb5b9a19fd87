//! Canonical coordinates for committed shapes.
//!
//! Hit testing and resize-handle lookup assume every shape on the board has
//! been through `normalize` after its last draw or resize.

use crate::factory::ellipse_kind;
use crate::model::*;

/// Whether committing a shape of this type can reorder its corners.
pub fn needs_normalize(shape_type: ShapeType) -> bool {
    matches!(
        shape_type,
        ShapeType::Line | ShapeType::Rectangle | ShapeType::Frame
    )
}

/// Reduce a shape to its canonical form. Idempotent.
///
/// - rectangle / frame: corners become (min, min)-(max, max).
/// - ellipse: center and radii are recomputed from the corners.
/// - line: the start is the lexicographically smaller endpoint (x, then y).
/// - text: unchanged.
pub fn normalize(shape: &Shape) -> Shape {
    match &shape.kind {
        ShapeKind::Rectangle | ShapeKind::Frame { .. } => {
            let b = shape.bounds().ordered();
            Shape {
                x1: b.x1,
                y1: b.y1,
                x2: b.x2,
                y2: b.y2,
                ..shape.clone()
            }
        }
        ShapeKind::Ellipse { .. } => Shape {
            kind: ellipse_kind(&shape.bounds()),
            ..shape.clone()
        },
        ShapeKind::Line => {
            let Shape { x1, y1, x2, y2, .. } = *shape;
            if x1 < x2 || (x1 == x2 && y1 <= y2) {
                shape.clone()
            } else {
                Shape {
                    x1: x2,
                    y1: y2,
                    x2: x1,
                    y2: y1,
                    ..shape.clone()
                }
            }
        }
        ShapeKind::Text { .. } => shape.clone(),
    }
}

/// Normalize every shape of a collection, preserving order.
pub fn normalize_all(shapes: &[Shape]) -> Vec<Shape> {
    shapes.iter().map(normalize).collect()
}
