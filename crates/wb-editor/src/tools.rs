//! Tool system for canvas interactions.
//!
//! The active tool decides what a pointer-down starts; the resulting
//! [`Gesture`] carries the drag state until pointer-up or cancel.
//!
//! ## Modifier behaviors
//!
//! | Modifier | Select Tool | Draw Tool |
//! |----------|-------------|-----------|
//! | **Shift** | Axis-constrain move, square resize | Square box / 45° line |

use crate::shortcuts::ShortcutAction;
use wb_core::{Bounds, Handle, ShapeId, ShapeType};

/// The active tool determines how pointer input is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToolKind {
    #[default]
    Select,
    Draw(ShapeType),
}

impl ToolKind {
    /// The tool a shortcut switches to, if it is a tool shortcut.
    pub fn from_shortcut(action: ShortcutAction) -> Option<Self> {
        match action {
            ShortcutAction::ToolSelect => Some(ToolKind::Select),
            ShortcutAction::ToolDraw(t) => Some(ToolKind::Draw(t)),
            _ => None,
        }
    }
}

/// An in-progress pointer gesture.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// A new shape is being dragged out from `origin`.
    Drawing {
        id: ShapeId,
        shape_type: ShapeType,
        origin: (f32, f32),
    },
    /// A handle of `id` is being dragged. `origin` is the box at pointer-down.
    Resizing {
        id: ShapeId,
        shape_type: ShapeType,
        handle: Handle,
        origin: Bounds,
        committed: bool,
    },
    /// Shapes are being dragged from `start`, each from its box at pointer-down.
    Moving {
        start: (f32, f32),
        origins: Vec<(ShapeId, Bounds)>,
        committed: bool,
    },
    /// Rubber-band selection over empty canvas.
    Marquee { origin: (f32, f32) },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    /// Whether the gesture has already pushed a snapshot to history.
    pub fn has_committed(&self) -> bool {
        match self {
            Gesture::Drawing { .. } => true,
            Gesture::Resizing { committed, .. } | Gesture::Moving { committed, .. } => *committed,
            Gesture::Idle | Gesture::Marquee { .. } => false,
        }
    }
}
