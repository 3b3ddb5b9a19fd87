//! Integration tests: factory → normalizer → frame containment.
//!
//! Exercises the `wb-core` pipeline the way the editor session uses it:
//! build shapes from raw drag corners, canonicalize on commit, and rebuild
//! frame membership.

use pretty_assertions::assert_eq;
use wb_core::*;

fn build(t: ShapeType, id: &str, x1: f32, y1: f32, x2: f32, y2: f32) -> Shape {
    create_shape(
        t,
        ShapeId::intern(id),
        Bounds::new(x1, y1, x2, y2),
        1,
        &StyleOverrides::default(),
    )
}

// ─── Canonical form ──────────────────────────────────────────────────────

#[test]
fn rectangle_from_reversed_corners() {
    let r = normalize(&build(ShapeType::Rectangle, "r", 50.0, 80.0, 10.0, 20.0));
    assert_eq!((r.x1, r.y1, r.x2, r.y2), (10.0, 20.0, 50.0, 80.0));
}

#[test]
fn boxes_ordered_for_every_drag_direction() {
    let origin = (40.0, 40.0);
    let pointers = [(0.0, 0.0), (80.0, 0.0), (0.0, 80.0), (80.0, 80.0)];
    for t in [ShapeType::Rectangle, ShapeType::Frame] {
        for (px, py) in pointers {
            let s = normalize(&build(t, "box", origin.0, origin.1, px, py));
            assert!(s.x1 <= s.x2 && s.y1 <= s.y2, "{t} from {origin:?} to ({px}, {py})");
            assert_eq!(normalize(&s), s);
        }
    }
}

#[test]
fn line_direction_carries_no_meaning() {
    let a = (3.0, 9.0);
    let b = (-4.0, 2.0);
    let forward = normalize(&build(ShapeType::Line, "l", a.0, a.1, b.0, b.1));
    let backward = normalize(&build(ShapeType::Line, "l", b.0, b.1, a.0, a.1));
    assert_eq!(forward, backward);
    assert_eq!(normalize(&forward), forward);
}

#[test]
fn ellipse_from_corners() {
    let e = build(ShapeType::Ellipse, "e", 0.0, 0.0, 20.0, 10.0);
    match e.kind {
        ShapeKind::Ellipse { cx, cy, rx, ry } => {
            assert_eq!((cx, cy), (10.0, 5.0));
            assert_eq!((rx, ry), (10.0, 5.0));
        }
        other => panic!("expected ellipse, got {other:?}"),
    }
}

// ─── Frames ──────────────────────────────────────────────────────────────

#[test]
fn frame_children_follow_geometry() {
    let board = vec![
        build(ShapeType::Frame, "frame", 0.0, 0.0, 200.0, 200.0),
        build(ShapeType::Rectangle, "inside", 10.0, 10.0, 50.0, 50.0),
        build(ShapeType::Line, "crossing", 150.0, 150.0, 250.0, 150.0),
        build(ShapeType::Text, "label", 20.0, 100.0, 20.0, 100.0),
    ];
    let board = recompute_frame_children(&board);
    assert_eq!(
        board[0].children(),
        &[ShapeId::intern("inside"), ShapeId::intern("label")]
    );
}

#[test]
fn frame_children_use_each_shapes_box_not_drag_order() {
    let board = normalize_all(&[
        build(ShapeType::Frame, "board_frame", 0.0, 20.0, 100.0, 100.0),
        // Drawn bottom-up; the top end leaves the frame at y = 5.
        build(ShapeType::Line, "tall_line", 10.0, 90.0, 30.0, 5.0),
        build(ShapeType::Line, "short_line", 10.0, 90.0, 30.0, 40.0),
        // Drawn toward the top-left, half outside.
        build(ShapeType::Ellipse, "wide_ellipse", 150.0, 150.0, 50.0, 50.0),
        build(ShapeType::Ellipse, "small_ellipse", 80.0, 80.0, 40.0, 30.0),
    ]);
    let board = recompute_frame_children(&board);
    assert_eq!(
        board[0].children(),
        &[ShapeId::intern("short_line"), ShapeId::intern("small_ellipse")]
    );
}

// ─── Serialization ───────────────────────────────────────────────────────

#[test]
fn shapes_serialize_with_type_tag() {
    let r = build(ShapeType::Rectangle, "tagged", 0.0, 0.0, 10.0, 10.0);
    let value = serde_json::to_value(&r).unwrap();
    assert_eq!(value["type"], "rectangle");
    assert_eq!(value["id"], "tagged");
    assert_eq!(value["shape_number"], 1);
}

#[test]
fn unknown_type_fails_to_deserialize() {
    let json = r#"{"id":"x","x1":0,"y1":0,"x2":1,"y2":1,"shape_number":1,
        "style":{"stroke":{"r":0,"g":0,"b":0,"a":1},"fill":null,"line_width":1,"corner_radius":0},
        "type":"triangle"}"#;
    assert!(serde_json::from_str::<Shape>(json).is_err());
}
