//! Shape factory: builds complete shape records from two corners.
//!
//! Construction rules per type:
//!
//! | Type | Stored corners | Payload |
//! |------|----------------|---------|
//! | rectangle, frame | min/max ordered | — / empty children |
//! | line | as given | — |
//! | ellipse | as given | center + radii |
//! | text | as given | empty content |

use crate::error::ShapeError;
use crate::id::ShapeId;
use crate::model::*;
use smallvec::SmallVec;

/// The stock style of each shape type.
pub fn default_style(shape_type: ShapeType) -> Style {
    match shape_type {
        ShapeType::Rectangle | ShapeType::Ellipse => Style {
            stroke: Color::LIGHT_GRAY,
            fill: Some(Color::LIGHT_GRAY),
            line_width: 1.0,
            corner_radius: 0.0,
        },
        ShapeType::Frame => Style {
            stroke: Color::WHITE,
            fill: Some(Color::WHITE),
            line_width: 1.0,
            corner_radius: 0.0,
        },
        ShapeType::Line => Style {
            stroke: Color::LIGHT_GRAY,
            fill: None,
            line_width: 1.0,
            corner_radius: 0.0,
        },
        ShapeType::Text => Style {
            stroke: Color::BLACK,
            fill: None,
            line_width: 1.0,
            corner_radius: 0.0,
        },
    }
}

/// Center and radii of the ellipse inscribed in `bounds`.
pub(crate) fn ellipse_kind(bounds: &Bounds) -> ShapeKind {
    let (cx, cy) = bounds.center();
    ShapeKind::Ellipse {
        cx,
        cy,
        rx: bounds.width() / 2.0,
        ry: bounds.height() / 2.0,
    }
}

/// Build a shape of `shape_type` spanning `bounds`.
pub fn create_shape(
    shape_type: ShapeType,
    id: ShapeId,
    bounds: Bounds,
    shape_number: u32,
    overrides: &StyleOverrides,
) -> Shape {
    let (bounds, kind) = match shape_type {
        ShapeType::Rectangle => (bounds.ordered(), ShapeKind::Rectangle),
        ShapeType::Frame => (
            bounds.ordered(),
            ShapeKind::Frame {
                children: SmallVec::new(),
            },
        ),
        ShapeType::Line => (bounds, ShapeKind::Line),
        ShapeType::Ellipse => (bounds, ellipse_kind(&bounds)),
        ShapeType::Text => (
            bounds,
            ShapeKind::Text {
                content: String::new(),
            },
        ),
    };

    log::trace!("create {shape_type} {id} #{shape_number} {bounds:?}");

    Shape {
        id,
        x1: bounds.x1,
        y1: bounds.y1,
        x2: bounds.x2,
        y2: bounds.y2,
        shape_number,
        style: overrides.apply_to(default_style(shape_type)),
        kind,
    }
}

/// Like [`create_shape`], but takes the type by name (`"rectangle"`, …).
///
/// # Errors
/// Returns `ShapeError::UnknownShapeType` when `type_name` is not supported.
pub fn create_shape_named(
    type_name: &str,
    id: ShapeId,
    bounds: Bounds,
    shape_number: u32,
    overrides: &StyleOverrides,
) -> Result<Shape, ShapeError> {
    let shape_type = type_name.parse::<ShapeType>().inspect_err(|e| {
        log::warn!("refusing to create shape {id}: {e}");
    })?;
    Ok(create_shape(shape_type, id, bounds, shape_number, overrides))
}

impl Shape {
    /// A replacement record spanning `bounds`, built with the same rules as
    /// [`create_shape`]. Identity, number, style, text content and frame
    /// children carry over.
    pub fn with_bounds(&self, bounds: Bounds) -> Shape {
        let (bounds, kind) = match &self.kind {
            ShapeKind::Rectangle | ShapeKind::Frame { .. } => (bounds.ordered(), self.kind.clone()),
            ShapeKind::Ellipse { .. } => (bounds, ellipse_kind(&bounds)),
            ShapeKind::Line | ShapeKind::Text { .. } => (bounds, self.kind.clone()),
        };
        Shape {
            x1: bounds.x1,
            y1: bounds.y1,
            x2: bounds.x2,
            y2: bounds.y2,
            kind,
            ..self.clone()
        }
    }

    /// A replacement text record with new content. Other types are returned as-is.
    pub fn with_text(&self, content: impl Into<String>) -> Shape {
        match self.kind {
            ShapeKind::Text { .. } => Shape {
                kind: ShapeKind::Text {
                    content: content.into(),
                },
                ..self.clone()
            },
            _ => self.clone(),
        }
    }

    /// A replacement frame record with a new child list. Other types are returned as-is.
    pub fn with_children(&self, children: impl IntoIterator<Item = ShapeId>) -> Shape {
        match self.kind {
            ShapeKind::Frame { .. } => Shape {
                kind: ShapeKind::Frame {
                    children: children.into_iter().collect(),
                },
                ..self.clone()
            },
            _ => self.clone(),
        }
    }
}
