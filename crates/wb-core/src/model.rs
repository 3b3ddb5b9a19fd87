//! Core data model for whiteboard shapes.
//!
//! A board is a flat, z-ordered list of `Shape` records: later entries paint
//! on top of earlier ones. Every shape carries its two bounding corners
//! (`x1, y1, x2, y2`) plus a type-specific payload. Frames do not own their
//! children; they hold the ids of shapes that currently sit inside them, and
//! that list is recomputed from geometry after each edit.

use crate::error::ShapeError;
use crate::id::ShapeId;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const GRAY: Color = Color::rgba(128.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0, 1.0);
    /// `#D9D9D9`, the stock stroke and fill of drawn shapes.
    pub const LIGHT_GRAY: Color = Color::rgba(217.0 / 255.0, 217.0 / 255.0, 217.0 / 255.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA`. The `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();
        let byte = |i: usize| -> Option<f32> {
            Some((hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?) as f32 / 255.0)
        };

        match bytes.len() {
            3 => {
                let r = hex_val(bytes[0])?;
                let g = hex_val(bytes[1])?;
                let b = hex_val(bytes[2])?;
                Some(Self::rgba(
                    (r * 17) as f32 / 255.0,
                    (g * 17) as f32 / 255.0,
                    (b * 17) as f32 / 255.0,
                    1.0,
                ))
            }
            6 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, 1.0)),
            8 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b, a) = (channel(self.r), channel(self.g), channel(self.b), channel(self.a));
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

// ─── Styling ─────────────────────────────────────────────────────────────

/// Fully resolved visual style of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub stroke: Color,
    pub fill: Option<Color>,
    pub line_width: f32,
    pub corner_radius: f32,
}

/// Caller-supplied style values. `None` means "not supplied" and falls back
/// to the shape type's default; any supplied value, zero included, wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleOverrides {
    pub stroke: Option<Color>,
    pub fill: Option<Color>,
    pub line_width: Option<f32>,
    pub corner_radius: Option<f32>,
}

impl StyleOverrides {
    pub fn stroke(mut self, color: Color) -> Self {
        self.stroke = Some(color);
        self
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn line_width(mut self, width: f32) -> Self {
        self.line_width = Some(width);
        self
    }

    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = Some(radius);
        self
    }

    /// Merge onto `base`: only supplied fields replace the base values.
    pub fn apply_to(&self, base: Style) -> Style {
        let mut dst = base;
        if let Some(stroke) = self.stroke {
            dst.stroke = stroke;
        }
        if self.fill.is_some() {
            dst.fill = self.fill;
        }
        if let Some(width) = self.line_width {
            dst.line_width = width;
        }
        if let Some(radius) = self.corner_radius {
            dst.corner_radius = radius;
        }
        dst
    }
}

// ─── Shape types ─────────────────────────────────────────────────────────

/// The closed set of shape types a board can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    Rectangle,
    Ellipse,
    Line,
    Frame,
    Text,
}

impl ShapeType {
    pub const ALL: [ShapeType; 5] = [
        ShapeType::Rectangle,
        ShapeType::Ellipse,
        ShapeType::Line,
        ShapeType::Frame,
        ShapeType::Text,
    ];

    /// Lowercase wire name (`"rectangle"`).
    pub fn name(self) -> &'static str {
        match self {
            ShapeType::Rectangle => "rectangle",
            ShapeType::Ellipse => "ellipse",
            ShapeType::Line => "line",
            ShapeType::Frame => "frame",
            ShapeType::Text => "text",
        }
    }

    /// Capitalized label used in display titles (`"Rectangle"`).
    pub fn label(self) -> &'static str {
        match self {
            ShapeType::Rectangle => "Rectangle",
            ShapeType::Ellipse => "Ellipse",
            ShapeType::Line => "Line",
            ShapeType::Frame => "Frame",
            ShapeType::Text => "Text",
        }
    }

    /// Types whose extent is a bounding box (rectangle, ellipse, frame).
    pub fn is_boxed(self) -> bool {
        matches!(self, ShapeType::Rectangle | ShapeType::Ellipse | ShapeType::Frame)
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeType {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeType::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| ShapeError::UnknownShapeType(s.to_string()))
    }
}

// ─── Handles ─────────────────────────────────────────────────────────────

/// A named manipulable point or region of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handle {
    /// Top-left corner.
    Tl,
    /// Top-right corner.
    Tr,
    /// Bottom-left corner.
    Bl,
    /// Bottom-right corner.
    Br,
    /// First endpoint of a line.
    Start,
    /// Second endpoint of a line.
    End,
    /// The shape body.
    Inside,
}

impl Handle {
    pub fn name(self) -> &'static str {
        match self {
            Handle::Tl => "tl",
            Handle::Tr => "tr",
            Handle::Bl => "bl",
            Handle::Br => "br",
            Handle::Start => "start",
            Handle::End => "end",
            Handle::Inside => "inside",
        }
    }

    /// Whether dragging this handle reshapes rather than moves.
    pub fn is_resize(self) -> bool {
        !matches!(self, Handle::Inside)
    }
}

// ─── Bounds ──────────────────────────────────────────────────────────────

/// Two corners of a shape's box. Not necessarily ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Bounds {
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Corners reordered to (min, min)-(max, max).
    pub fn ordered(&self) -> Self {
        Self {
            x1: self.x1.min(self.x2),
            y1: self.y1.min(self.y2),
            x2: self.x1.max(self.x2),
            y2: self.y1.max(self.y2),
        }
    }

    pub fn width(&self) -> f32 {
        (self.x2 - self.x1).abs()
    }

    pub fn height(&self) -> f32 {
        (self.y2 - self.y1).abs()
    }

    pub fn center(&self) -> (f32, f32) {
        ((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// Inclusive point containment against the ordered box.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        let b = self.ordered();
        px >= b.x1 && px <= b.x2 && py >= b.y1 && py <= b.y2
    }

    /// AABB overlap with another box (both ordered first).
    pub fn intersects(&self, other: &Bounds) -> bool {
        let a = self.ordered();
        let b = other.ordered();
        a.x1 <= b.x2 && a.x2 >= b.x1 && a.y1 <= b.y2 && a.y2 >= b.y1
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self {
            x1: self.x1 + dx,
            y1: self.y1 + dy,
            x2: self.x2 + dx,
            y2: self.y2 + dy,
        }
    }
}

// ─── Shapes ──────────────────────────────────────────────────────────────

/// Type-specific payload of a shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    /// Center and independent x/y radii, derived from the corners.
    Ellipse { cx: f32, cy: f32, rx: f32, ry: f32 },
    Line,
    /// Ids of the shapes currently inside this frame.
    Frame { children: SmallVec<[ShapeId; 4]> },
    Text { content: String },
}

impl ShapeKind {
    pub fn shape_type(&self) -> ShapeType {
        match self {
            ShapeKind::Rectangle => ShapeType::Rectangle,
            ShapeKind::Ellipse { .. } => ShapeType::Ellipse,
            ShapeKind::Line => ShapeType::Line,
            ShapeKind::Frame { .. } => ShapeType::Frame,
            ShapeKind::Text { .. } => ShapeType::Text,
        }
    }
}

/// One shape on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    /// Creation ordinal; feeds the display title.
    pub shape_number: u32,
    pub style: Style,
    #[serde(flatten)]
    pub kind: ShapeKind,
}

impl Shape {
    pub fn shape_type(&self) -> ShapeType {
        self.kind.shape_type()
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x1, self.y1, self.x2, self.y2)
    }

    /// Midpoint of the two corners.
    pub fn center(&self) -> (f32, f32) {
        self.bounds().center()
    }

    /// Display title, e.g. `"Frame 3"`.
    pub fn title(&self) -> String {
        format!("{} {}", self.shape_type().label(), self.shape_number)
    }

    pub fn is_frame(&self) -> bool {
        matches!(self.kind, ShapeKind::Frame { .. })
    }

    /// Contained shape ids for frames; empty for every other type.
    pub fn children(&self) -> &[ShapeId] {
        match &self.kind {
            ShapeKind::Frame { children } => children.as_slice(),
            _ => &[],
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            ShapeKind::Text { content } => Some(content),
            _ => None,
        }
    }
}
