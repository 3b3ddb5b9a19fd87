//! Editor session: input events → board edits.
//!
//! The session holds the authoritative board (the current snapshot of its
//! [`History`]) and turns pointer and key events into edits:
//!
//! - **Draw**: pointer-down commits a new zero-size shape; each move
//!   overwrites it in place; pointer-up normalizes it.
//! - **Move / resize**: the first move commits a snapshot, later moves
//!   overwrite it, pointer-up normalizes.
//! - **Cancel** (Escape or `InputEvent::Cancel`) rolls the gesture's
//!   snapshot back, restoring the board as it was at pointer-down.
//!
//! Every finished edit ends with a frame-children recompute, so each gesture
//! is exactly one undo step.

use crate::history::{Action, History, HistoryConfig, SubscriptionId};
use crate::input::{InputEvent, InputSource, ListenerId, Modifiers};
use crate::resize::{anchor, constrained_draw, constrained_translate, resize};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::tools::{Gesture, ToolKind};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use wb_core::{
    Bounds, Shape, ShapeId, ShapeType, StyleOverrides, create_shape, normalize_all,
    recompute_frame_children,
};
use wb_render::{Cursor, HitConfig, MonospaceMeasure, TextMeasure, cursor_for, pick_in_rect, pick_prefer_contents};

/// Session settings.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SessionConfig {
    pub hit: HitConfig,
    pub history: HistoryConfig,
}

/// Hands out shape numbers: unique and increasing, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeCounter {
    next: u32,
}

impl Default for ShapeCounter {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl ShapeCounter {
    /// A counter that continues after the highest number on `shapes`.
    pub fn after(shapes: &[Shape]) -> Self {
        let max = shapes.iter().map(|s| s.shape_number).max().unwrap_or(0);
        Self { next: max + 1 }
    }

    pub fn next_number(&mut self) -> u32 {
        let n = self.next;
        self.next += 1;
        n
    }
}

/// One editing session over one board.
pub struct EditorSession {
    history: History<Vec<Shape>>,
    config: SessionConfig,
    measure: Box<dyn TextMeasure>,
    counter: ShapeCounter,
    tool: ToolKind,
    gesture: Gesture,
    selected: Vec<ShapeId>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(SessionConfig::default(), Box::new(MonospaceMeasure::default()))
    }
}

impl EditorSession {
    /// An empty board.
    pub fn new(config: SessionConfig, measure: Box<dyn TextMeasure>) -> Self {
        Self::with_shapes(Vec::new(), config, measure)
    }

    /// Start from an existing board. It becomes the first snapshot.
    pub fn with_shapes(shapes: Vec<Shape>, config: SessionConfig, measure: Box<dyn TextMeasure>) -> Self {
        let counter = ShapeCounter::after(&shapes);
        let shapes = recompute_frame_children(&normalize_all(&shapes));
        Self {
            history: History::with_config(shapes, config.history),
            config,
            measure,
            counter,
            tool: ToolKind::Select,
            gesture: Gesture::Idle,
            selected: Vec::new(),
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    /// The current board, bottom to top.
    pub fn shapes(&self) -> &[Shape] {
        self.history.current()
    }

    /// Shared handle to the current board.
    pub fn snapshot(&self) -> Arc<Vec<Shape>> {
        self.history.snapshot()
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        find(self.shapes(), id)
    }

    pub fn history(&self) -> &History<Vec<Shape>> {
        &self.history
    }

    pub fn selected(&self) -> &[ShapeId] {
        &self.selected
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// Switch tools. A gesture in progress is finished first.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if !self.gesture.is_idle() {
            self.finish_gesture(None);
        }
        log::debug!("tool → {tool:?}");
        self.tool = tool;
    }

    /// Observe every board change (UI binding).
    pub fn subscribe(&mut self, observer: impl FnMut(&Vec<Shape>) + 'static) -> SubscriptionId {
        self.history.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.history.unsubscribe(id)
    }

    /// Cursor to show with the pointer at `(x, y)`.
    pub fn cursor_at(&self, x: f32, y: f32) -> Cursor {
        match self.tool {
            ToolKind::Select => {
                let hit = pick_prefer_contents(self.shapes(), x, y, &self.config.hit, self.measure.as_ref());
                cursor_for(hit.map(|h| h.handle))
            }
            ToolKind::Draw(_) => Cursor::Default,
        }
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Route a single input event.
    pub fn handle(&mut self, event: &InputEvent) {
        match event {
            InputEvent::PointerDown { x, y, modifiers } => self.pointer_down(*x, *y, *modifiers),
            InputEvent::PointerMove { x, y, modifiers } => self.pointer_move(*x, *y, *modifiers),
            InputEvent::PointerUp { x, y, .. } => self.finish_gesture(Some((*x, *y))),
            InputEvent::Key { key, modifiers } => self.key(key, *modifiers),
            InputEvent::Cancel => self.cancel(),
        }
    }

    /// Subscribe `session` to `source`. The listener holds only a weak
    /// reference, so dropping the session silences it; unsubscribe with the
    /// returned id to remove it.
    pub fn attach(session: &Rc<RefCell<Self>>, source: &mut dyn InputSource) -> ListenerId {
        let weak = Rc::downgrade(session);
        source.subscribe(Box::new(move |event: &InputEvent| {
            let Some(session) = weak.upgrade() else {
                return;
            };
            match session.try_borrow_mut() {
                Ok(mut session) => session.handle(event),
                Err(_) => log::warn!("session busy, dropped {event:?}"),
            };
        }))
    }

    fn pointer_down(&mut self, x: f32, y: f32, modifiers: Modifiers) {
        if !self.gesture.is_idle() {
            // The matching pointer-up never arrived.
            self.finish_gesture(Some((x, y)));
        }

        match self.tool {
            ToolKind::Draw(ShapeType::Text) => {
                let height = self.config.hit.text_line_height;
                let shape = self.new_shape(ShapeType::Text, Bounds::new(x, y, x, y + height));
                self.selected = vec![shape.id];
                self.history.set_state(Action::transform(move |shapes: &Vec<Shape>| with_pushed(shapes, shape)), false);
            }
            ToolKind::Draw(shape_type) => {
                let shape = self.new_shape(shape_type, Bounds::new(x, y, x, y));
                let id = shape.id;
                self.history.set_state(Action::transform(move |shapes: &Vec<Shape>| with_pushed(shapes, shape)), false);
                self.selected = vec![id];
                self.gesture = Gesture::Drawing {
                    id,
                    shape_type,
                    origin: (x, y),
                };
            }
            ToolKind::Select => self.select_at(x, y, modifiers),
        }
    }

    fn select_at(&mut self, x: f32, y: f32, modifiers: Modifiers) {
        let shapes = self.history.snapshot();
        let Some(hit) = pick_prefer_contents(&shapes, x, y, &self.config.hit, self.measure.as_ref()) else {
            if !modifiers.shift {
                self.selected.clear();
            }
            self.gesture = Gesture::Marquee { origin: (x, y) };
            return;
        };

        let id = hit.shape.id;
        if hit.handle.is_resize() {
            self.selected = vec![id];
            self.gesture = Gesture::Resizing {
                id,
                shape_type: hit.shape.shape_type(),
                handle: hit.handle,
                origin: hit.shape.bounds(),
                committed: false,
            };
            return;
        }

        if modifiers.shift && !self.selected.contains(&id) {
            self.selected.push(id);
        } else if !self.selected.contains(&id) {
            self.selected = vec![id];
        }

        // Frames drag their contents along.
        let mut moving: Vec<ShapeId> = Vec::new();
        for sid in &self.selected {
            let Some(shape) = find(&shapes, *sid) else { continue };
            for member in std::iter::once(sid).chain(shape.children()) {
                if !moving.contains(member) {
                    moving.push(*member);
                }
            }
        }
        let origins = moving
            .into_iter()
            .filter_map(|sid| find(&shapes, sid).map(|s| (sid, s.bounds())))
            .collect();
        self.gesture = Gesture::Moving {
            start: (x, y),
            origins,
            committed: false,
        };
    }

    fn pointer_move(&mut self, x: f32, y: f32, modifiers: Modifiers) {
        let shapes = self.history.current();
        let (updates, overwrite) = match &mut self.gesture {
            Gesture::Idle | Gesture::Marquee { .. } => return,
            Gesture::Drawing { id, shape_type, origin } => {
                let (x2, y2) = if modifiers.shift {
                    constrained_draw(*origin, (x, y), *shape_type)
                } else {
                    (x, y)
                };
                let Some(shape) = find(shapes, *id) else { return };
                (vec![shape.with_bounds(Bounds::new(origin.0, origin.1, x2, y2))], true)
            }
            Gesture::Resizing {
                id,
                shape_type,
                handle,
                origin,
                committed,
            } => {
                let (px, py) = match anchor(*handle, *origin) {
                    Some(fixed) if modifiers.shift => constrained_draw(fixed, (x, y), *shape_type),
                    _ => (x, y),
                };
                let Some(shape) = find(shapes, *id) else { return };
                let update = shape.with_bounds(resize(px, py, Some(*handle), *origin));
                let overwrite = std::mem::replace(committed, true);
                (vec![update], overwrite)
            }
            Gesture::Moving {
                start,
                origins,
                committed,
            } => {
                let (mut dx, mut dy) = (x - start.0, y - start.1);
                if modifiers.shift {
                    (dx, dy) = constrained_translate(dx, dy);
                }
                let updates: Vec<Shape> = origins
                    .iter()
                    .filter_map(|(sid, b)| find(shapes, *sid).map(|s| s.with_bounds(b.translated(dx, dy))))
                    .collect();
                let overwrite = std::mem::replace(committed, true);
                (updates, overwrite)
            }
        };
        self.history
            .set_state(Action::transform(move |shapes: &Vec<Shape>| with_replaced(shapes, &updates)), overwrite);
    }

    /// Pointer-up: normalize what the gesture touched and close it.
    fn finish_gesture(&mut self, pointer: Option<(f32, f32)>) {
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle => {}
            Gesture::Marquee { origin } => {
                if let Some((x, y)) = pointer {
                    let area = Bounds::new(origin.0, origin.1, x, y);
                    for id in pick_in_rect(self.shapes(), area) {
                        if !self.selected.contains(&id) {
                            self.selected.push(id);
                        }
                    }
                }
            }
            Gesture::Drawing { id, shape_type, .. } => {
                let empty = self
                    .shape(id)
                    .is_some_and(|s| s.bounds().width() == 0.0 && s.bounds().height() == 0.0);
                if empty {
                    log::debug!("discarding zero-size {shape_type} {id}");
                    self.history.rollback();
                    self.selected.retain(|s| *s != id);
                } else {
                    self.settle();
                }
            }
            gesture @ (Gesture::Resizing { .. } | Gesture::Moving { .. }) => {
                if gesture.has_committed() {
                    self.settle();
                }
            }
        }
    }

    /// Abandon the gesture in progress and restore the pre-gesture board.
    pub fn cancel(&mut self) {
        let gesture = std::mem::take(&mut self.gesture);
        if gesture.has_committed() {
            log::debug!("cancel {gesture:?}");
            self.history.rollback();
            self.prune_selection();
        }
    }

    fn settle(&mut self) {
        self.history.set_state(
            Action::transform(|shapes: &Vec<Shape>| recompute_frame_children(&normalize_all(shapes))),
            true,
        );
    }

    fn key(&mut self, key: &str, modifiers: Modifiers) {
        let Some(action) = ShortcutMap::resolve(key, modifiers) else {
            return;
        };
        log::trace!("shortcut {key} → {action:?}");
        if let Some(tool) = ToolKind::from_shortcut(action) {
            self.set_tool(tool);
            return;
        }
        match action {
            ShortcutAction::Undo => {
                self.undo();
            }
            ShortcutAction::Redo => {
                self.redo();
            }
            ShortcutAction::Delete => {
                let ids = self.selected.clone();
                self.delete(&ids);
            }
            ShortcutAction::Deselect => {
                if self.gesture.is_idle() {
                    self.selected.clear();
                } else {
                    self.cancel();
                }
            }
            ShortcutAction::ToolSelect | ShortcutAction::ToolDraw(_) => {}
        }
    }

    // ─── Edits ───────────────────────────────────────────────────────────

    /// Undo the last edit. Ignored while a gesture is in progress.
    pub fn undo(&mut self) -> bool {
        if !self.gesture.is_idle() {
            log::warn!("undo ignored mid-gesture");
            return false;
        }
        let moved = self.history.undo();
        self.prune_selection();
        moved
    }

    /// Redo the last undone edit. Ignored while a gesture is in progress.
    pub fn redo(&mut self) -> bool {
        if !self.gesture.is_idle() {
            log::warn!("redo ignored mid-gesture");
            return false;
        }
        let moved = self.history.redo();
        self.prune_selection();
        moved
    }

    /// Replace the content of text shape `id`, resizing it to the measured
    /// text. Returns `false` if `id` is not a text shape on the board, or a
    /// gesture is in progress.
    pub fn set_text(&mut self, id: ShapeId, content: &str) -> bool {
        if !self.gesture.is_idle() {
            log::warn!("set_text ignored mid-gesture");
            return false;
        }
        let Some(shape) = self.shape(id).filter(|s| s.shape_type() == ShapeType::Text) else {
            log::warn!("set_text: no text shape {id}");
            return false;
        };
        let width = self.measure.text_width(content);
        let bounds = Bounds::new(
            shape.x1,
            shape.y1,
            shape.x1 + width,
            shape.y1 + self.config.hit.text_line_height,
        );
        let updated = shape.with_text(content).with_bounds(bounds);
        self.history.set_state(
            Action::transform(move |shapes: &Vec<Shape>| {
                recompute_frame_children(&with_replaced(shapes, std::slice::from_ref(&updated)))
            }),
            false,
        );
        true
    }

    /// Remove shapes by id. Returns how many were removed; nothing is removed
    /// mid-gesture.
    pub fn delete(&mut self, ids: &[ShapeId]) -> usize {
        if !self.gesture.is_idle() {
            log::warn!("delete ignored mid-gesture");
            return 0;
        }
        let removed = self.shapes().iter().filter(|s| ids.contains(&s.id)).count();
        if removed == 0 {
            return 0;
        }
        let ids = ids.to_vec();
        self.history.set_state(
            Action::transform(move |shapes: &Vec<Shape>| {
                let kept: Vec<Shape> = shapes.iter().filter(|s| !ids.contains(&s.id)).cloned().collect();
                recompute_frame_children(&kept)
            }),
            false,
        );
        self.prune_selection();
        log::debug!("deleted {removed} shape(s)");
        removed
    }

    fn new_shape(&mut self, shape_type: ShapeType, bounds: Bounds) -> Shape {
        let id = ShapeId::fresh(shape_type);
        let number = self.counter.next_number();
        create_shape(shape_type, id, bounds, number, &StyleOverrides::default())
    }

    fn prune_selection(&mut self) {
        let shapes = self.history.current();
        self.selected.retain(|id| find(shapes, *id).is_some());
    }
}

fn find(shapes: &[Shape], id: ShapeId) -> Option<&Shape> {
    shapes.iter().find(|s| s.id == id)
}

fn with_pushed(shapes: &[Shape], shape: Shape) -> Vec<Shape> {
    let mut next = shapes.to_vec();
    next.push(shape);
    next
}

/// `shapes` with every record that has a counterpart in `updates` replaced.
fn with_replaced(shapes: &[Shape], updates: &[Shape]) -> Vec<Shape> {
    shapes
        .iter()
        .map(|s| updates.iter().find(|u| u.id == s.id).unwrap_or(s).clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wb_core::Handle;

    fn drag(session: &mut EditorSession, from: (f32, f32), to: (f32, f32), modifiers: Modifiers) {
        session.handle(&InputEvent::PointerDown {
            x: from.0,
            y: from.1,
            modifiers,
        });
        session.handle(&InputEvent::PointerMove {
            x: to.0,
            y: to.1,
            modifiers,
        });
        session.handle(&InputEvent::PointerUp {
            x: to.0,
            y: to.1,
            modifiers,
        });
    }

    #[test]
    fn shape_counter_continues() {
        let mut c = ShapeCounter::default();
        assert_eq!(c.next_number(), 1);
        assert_eq!(c.next_number(), 2);
        assert_eq!(ShapeCounter::after(&[]).next_number(), 1);
    }

    #[test]
    fn drawing_backwards_normalizes_on_release() {
        let mut s = EditorSession::default();
        s.set_tool(ToolKind::Draw(ShapeType::Line));
        drag(&mut s, (50.0, 80.0), (10.0, 20.0), Modifiers::NONE);

        let line = &s.shapes()[0];
        assert_eq!((line.x1, line.y1, line.x2, line.y2), (10.0, 20.0, 50.0, 80.0));
        assert_eq!(s.history().len(), 2);
        assert_eq!(s.selected(), &[line.id]);
    }

    #[test]
    fn click_without_drag_draws_nothing() {
        let mut s = EditorSession::default();
        s.set_tool(ToolKind::Draw(ShapeType::Rectangle));
        s.handle(&InputEvent::pointer_down(5.0, 5.0));
        s.handle(&InputEvent::pointer_up(5.0, 5.0));
        assert!(s.shapes().is_empty());
        assert_eq!(s.history().len(), 1);
        assert!(s.selected().is_empty());
    }

    #[test]
    fn shift_draw_makes_square() {
        let mut s = EditorSession::default();
        s.set_tool(ToolKind::Draw(ShapeType::Rectangle));
        drag(&mut s, (0.0, 0.0), (30.0, -10.0), Modifiers::SHIFT);
        let r = &s.shapes()[0];
        assert_eq!((r.x1, r.y1, r.x2, r.y2), (0.0, -30.0, 30.0, 0.0));
    }

    #[test]
    fn resize_past_anchor_keeps_anchor_fixed() {
        let mut s = EditorSession::default();
        s.set_tool(ToolKind::Draw(ShapeType::Rectangle));
        drag(&mut s, (10.0, 20.0), (50.0, 80.0), Modifiers::NONE);
        s.set_tool(ToolKind::Select);

        s.handle(&InputEvent::pointer_down(11.0, 21.0));
        assert!(matches!(s.gesture(), Gesture::Resizing { handle: Handle::Tl, .. }));
        s.handle(&InputEvent::pointer_move(60.0, 21.0));
        s.handle(&InputEvent::pointer_move(70.0, 21.0));
        s.handle(&InputEvent::pointer_up(70.0, 21.0));

        let r = &s.shapes()[0];
        assert_eq!((r.x1, r.y1, r.x2, r.y2), (50.0, 21.0, 70.0, 80.0));
        assert_eq!(s.history().len(), 3);
    }

    #[test]
    fn escape_mid_drag_restores_board() {
        let mut s = EditorSession::default();
        s.set_tool(ToolKind::Draw(ShapeType::Ellipse));
        drag(&mut s, (0.0, 0.0), (20.0, 10.0), Modifiers::NONE);
        s.set_tool(ToolKind::Select);
        let before = s.snapshot();

        s.handle(&InputEvent::pointer_down(10.0, 5.0));
        s.handle(&InputEvent::pointer_move(40.0, 40.0));
        assert_ne!(s.shapes(), before.as_slice());
        s.handle(&InputEvent::key("Escape", Modifiers::NONE));

        assert_eq!(s.shapes(), before.as_slice());
        assert!(s.gesture().is_idle());
        assert!(!s.history().can_redo());
    }

    #[test]
    fn set_text_resizes_to_measured_width() {
        let mut s = EditorSession::default();
        s.set_tool(ToolKind::Draw(ShapeType::Text));
        s.handle(&InputEvent::pointer_down(10.0, 10.0));
        s.handle(&InputEvent::pointer_up(10.0, 10.0));
        let id = s.selected()[0];

        assert!(s.set_text(id, "hello"));
        let t = s.shape(id).unwrap();
        assert_eq!(t.text(), Some("hello"));
        assert_eq!((t.x2, t.y2), (50.0, 26.0));
        assert!(!s.set_text(ShapeId::intern("missing"), "x"));
    }

    #[test]
    fn set_text_rejects_other_types() {
        let mut s = EditorSession::default();
        s.set_tool(ToolKind::Draw(ShapeType::Rectangle));
        drag(&mut s, (0.0, 0.0), (10.0, 10.0), Modifiers::NONE);
        let id = s.shapes()[0].id;
        assert!(!s.set_text(id, "nope"));
        assert_eq!(s.history().len(), 2);
    }

    #[test]
    fn edits_are_ignored_mid_drag_so_cancel_restores_board() {
        let mut s = EditorSession::default();
        s.set_tool(ToolKind::Draw(ShapeType::Text));
        s.handle(&InputEvent::pointer_down(200.0, 200.0));
        s.handle(&InputEvent::pointer_up(200.0, 200.0));
        let text = s.selected()[0];
        s.set_tool(ToolKind::Draw(ShapeType::Rectangle));
        drag(&mut s, (10.0, 10.0), (50.0, 50.0), Modifiers::NONE);
        s.set_tool(ToolKind::Select);
        let before = s.snapshot();
        let len = s.history().len();

        s.handle(&InputEvent::pointer_down(30.0, 30.0));
        s.handle(&InputEvent::pointer_move(130.0, 30.0));
        s.handle(&InputEvent::key("Delete", Modifiers::NONE));
        assert!(!s.set_text(text, "late"));
        assert_eq!(s.delete(&[text]), 0);
        s.handle(&InputEvent::Cancel);

        assert_eq!(s.shapes(), before.as_slice());
        assert_eq!(s.history().len(), len);
    }

    #[test]
    fn undo_is_ignored_mid_gesture() {
        let mut s = EditorSession::default();
        s.set_tool(ToolKind::Draw(ShapeType::Rectangle));
        s.handle(&InputEvent::pointer_down(0.0, 0.0));
        assert!(!s.undo());
        s.handle(&InputEvent::pointer_move(5.0, 5.0));
        s.handle(&InputEvent::pointer_up(5.0, 5.0));
        assert!(s.undo());
        assert!(s.shapes().is_empty());
        assert!(s.selected().is_empty());
    }
}
