pub mod cursor;
pub mod hit;
pub mod measure;
pub mod paint;

pub use cursor::{Cursor, cursor_for};
pub use hit::{Hit, HitConfig, pick_at, pick_in_rect, pick_prefer_contents, position_within};
pub use measure::{MonospaceMeasure, TextMeasure};
pub use paint::{Surface, paint_scene, paint_shape};
