//! Pointer cursor for the handle under the pointer.

use wb_core::Handle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cursor {
    /// Diagonal resize, top-left ↔ bottom-right.
    ResizeNwse,
    /// Diagonal resize, top-right ↔ bottom-left.
    ResizeNesw,
    Move,
    Default,
}

impl Cursor {
    /// CSS `cursor` keyword.
    pub fn css_name(self) -> &'static str {
        match self {
            Cursor::ResizeNwse => "nwse-resize",
            Cursor::ResizeNesw => "nesw-resize",
            Cursor::Move => "move",
            Cursor::Default => "default",
        }
    }
}

pub fn cursor_for(handle: Option<Handle>) -> Cursor {
    match handle {
        Some(Handle::Tl | Handle::Br | Handle::Start | Handle::End) => Cursor::ResizeNwse,
        Some(Handle::Tr | Handle::Bl) => Cursor::ResizeNesw,
        Some(Handle::Inside) => Cursor::Move,
        None => Cursor::Default,
    }
}
