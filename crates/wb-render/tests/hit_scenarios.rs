//! Integration tests: factory → normalizer → hit tester → cursor.

use wb_core::*;
use wb_render::{Cursor, HitConfig, MonospaceMeasure, cursor_for, pick_at, position_within};

const CONFIG: HitConfig = HitConfig {
    handle_tolerance: 5.0,
    line_slack: 1.0,
    text_line_height: 16.0,
};

fn committed(t: ShapeType, id: &str, x1: f32, y1: f32, x2: f32, y2: f32) -> Shape {
    normalize(&create_shape(
        t,
        ShapeId::intern(id),
        Bounds::new(x1, y1, x2, y2),
        1,
        &StyleOverrides::default(),
    ))
}

#[test]
fn drawn_backwards_rectangle_has_canonical_handles() {
    let r = committed(ShapeType::Rectangle, "rect", 50.0, 80.0, 10.0, 20.0);
    let m = MonospaceMeasure::default();

    let tl = position_within(&r, 12.0, 22.0, &CONFIG, &m);
    assert_eq!(tl, Some(Handle::Tl));
    assert_eq!(cursor_for(tl), Cursor::ResizeNwse);

    let body = position_within(&r, 30.0, 50.0, &CONFIG, &m);
    assert_eq!(body, Some(Handle::Inside));
    assert_eq!(cursor_for(body), Cursor::Move);
}

#[test]
fn horizontal_line_body_slack() {
    let l = committed(ShapeType::Line, "line", 10.0, 0.0, 0.0, 0.0);
    let m = MonospaceMeasure::default();
    assert_eq!(position_within(&l, 5.0, 0.5, &CONFIG, &m), Some(Handle::Inside));
    assert_eq!(position_within(&l, 5.0, 5.0, &CONFIG, &m), None);
}

#[test]
fn overlapping_shapes_last_inserted_wins() {
    let board = vec![
        committed(ShapeType::Ellipse, "under", 0.0, 0.0, 100.0, 100.0),
        committed(ShapeType::Rectangle, "over", 25.0, 25.0, 75.0, 75.0),
    ];
    let m = MonospaceMeasure::default();
    let hit = pick_at(&board, 50.0, 50.0, false, &CONFIG, &m).unwrap();
    assert_eq!(hit.shape.id, ShapeId::intern("over"));

    let hit = pick_at(&board, 20.0, 50.0, false, &CONFIG, &m).unwrap();
    assert_eq!(hit.shape.id, ShapeId::intern("under"));
}

#[test]
fn frame_only_hit_when_requested() {
    let board = vec![committed(ShapeType::Frame, "frame", 0.0, 0.0, 300.0, 300.0)];
    let m = MonospaceMeasure::default();
    assert!(pick_at(&board, 150.0, 150.0, false, &CONFIG, &m).is_none());
    let hit = pick_at(&board, 298.0, 298.0, true, &CONFIG, &m).unwrap();
    assert_eq!(hit.handle, Handle::Br);
    assert_eq!(cursor_for(Some(hit.handle)).css_name(), "nwse-resize");
}
