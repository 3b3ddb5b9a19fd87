pub mod history;
pub mod input;
pub mod resize;
pub mod session;
pub mod shortcuts;
pub mod tools;

pub use history::{Action, History, HistoryConfig, SubscriptionId};
pub use input::{EventQueue, InputEvent, InputSource, ListenerId, Modifiers};
pub use resize::{constrained_draw, constrained_translate, resize};
pub use session::{EditorSession, SessionConfig, ShapeCounter};
pub use shortcuts::{ShortcutAction, ShortcutMap};
pub use tools::{Gesture, ToolKind};
