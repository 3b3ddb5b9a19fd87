//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s.
//! The session resolves every `InputEvent::Key` through here.

use crate::input::Modifiers;
use wb_core::ShapeType;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── Tool switching ──
    ToolSelect,
    ToolDraw(ShapeType),

    // ── Edit ──
    Undo,
    Redo,
    Delete,

    // ── UI ──
    /// Abort the gesture in progress, or drop the selection.
    Deselect,
}

/// Resolves key events into shortcut actions.
///
/// Uses platform-aware modifier detection: on macOS `meta` is ⌘,
/// on other platforms `ctrl` serves the same role.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"z"`, `"Delete"`).
    /// Returns `None` if the key combo has no binding.
    pub fn resolve(key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        let cmd = modifiers.command();

        if cmd && modifiers.shift {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Redo),
                _ => None,
            };
        }

        if cmd {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Undo),
                "y" | "Y" => Some(ShortcutAction::Redo),
                _ => None,
            };
        }

        // Single keys. Shift alone is a drawing constraint, not a chord.
        match key {
            "v" | "V" => Some(ShortcutAction::ToolSelect),
            "r" | "R" => Some(ShortcutAction::ToolDraw(ShapeType::Rectangle)),
            "o" | "O" => Some(ShortcutAction::ToolDraw(ShapeType::Ellipse)),
            "l" | "L" => Some(ShortcutAction::ToolDraw(ShapeType::Line)),
            "f" | "F" => Some(ShortcutAction::ToolDraw(ShapeType::Frame)),
            "t" | "T" => Some(ShortcutAction::ToolDraw(ShapeType::Text)),
            "Delete" | "Backspace" => Some(ShortcutAction::Delete),
            "Escape" => Some(ShortcutAction::Deselect),
            _ => None,
        }
    }
}
