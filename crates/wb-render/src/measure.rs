//! Text measuring capability.
//!
//! Text shapes have no stored width; their extent comes from whatever font
//! the drawing surface renders with. Hit testing borrows that capability
//! instead of owning a font context.

/// Measures the advance width of a single line of text.
pub trait TextMeasure {
    fn text_width(&self, text: &str) -> f32;
}

/// Fixed advance per character. Handy for headless callers and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasure {
    pub char_width: f32,
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self { char_width: 8.0 }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.char_width
    }
}
