//! Frame containment: which shapes sit inside which frames.
//!
//! Containment is purely geometric. Frames never own their children; the
//! `children` list is a cache rebuilt by [`recompute_frame_children`].

use crate::id::ShapeId;
use crate::model::Shape;

/// True iff `shape`'s box lies component-wise within `frame`'s box.
///
/// Both boxes are ordered first: lines and ellipses keep their corners in
/// drag order, so raw `x2` is not necessarily the right edge.
pub fn is_inside(shape: &Shape, frame: &Shape) -> bool {
    let s = shape.bounds().ordered();
    let f = frame.bounds().ordered();
    s.x1 >= f.x1 && s.y1 >= f.y1 && s.x2 <= f.x2 && s.y2 <= f.y2
}

/// Ids of the non-frame shapes inside `frame`, in board order.
pub fn contained_ids(frame: &Shape, shapes: &[Shape]) -> Vec<ShapeId> {
    shapes
        .iter()
        .filter(|s| !s.is_frame() && s.id != frame.id && is_inside(s, frame))
        .map(|s| s.id)
        .collect()
}

/// Rebuild the `children` list of every frame on the board.
pub fn recompute_frame_children(shapes: &[Shape]) -> Vec<Shape> {
    shapes
        .iter()
        .map(|s| {
            if s.is_frame() {
                let children = contained_ids(s, shapes);
                if children.as_slice() != s.children() {
                    log::trace!("frame {} now holds {} shapes", s.id, children.len());
                }
                s.with_children(children)
            } else {
                s.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::create_shape;
    use crate::model::{Bounds, ShapeType, StyleOverrides};
    use crate::normalize::normalize;
    use pretty_assertions::assert_eq;

    fn shape(name: &str, t: ShapeType, x1: f32, y1: f32, x2: f32, y2: f32) -> Shape {
        create_shape(
            t,
            ShapeId::intern(name),
            Bounds::new(x1, y1, x2, y2),
            1,
            &StyleOverrides::default(),
        )
    }

    #[test]
    fn inside_is_inclusive() {
        let frame = shape("f", ShapeType::Frame, 0.0, 0.0, 100.0, 100.0);
        let edge = shape("r", ShapeType::Rectangle, 0.0, 0.0, 100.0, 100.0);
        let spill = shape("r2", ShapeType::Rectangle, 50.0, 50.0, 101.0, 60.0);
        assert!(is_inside(&edge, &frame));
        assert!(!is_inside(&spill, &frame));
    }

    #[test]
    fn line_leaving_the_top_edge_is_outside() {
        let frame = shape("f", ShapeType::Frame, 0.0, 20.0, 100.0, 100.0);
        // Start sits inside; the end pokes out above the frame.
        let line = normalize(&shape("l", ShapeType::Line, 30.0, 5.0, 10.0, 90.0));
        assert_eq!((line.x1, line.y1, line.x2, line.y2), (10.0, 90.0, 30.0, 5.0));
        assert!(!is_inside(&line, &frame));

        let contained = normalize(&shape("l2", ShapeType::Line, 30.0, 25.0, 10.0, 90.0));
        assert!(is_inside(&contained, &frame));
    }

    #[test]
    fn ellipse_drawn_up_left_is_checked_by_its_box() {
        let board = vec![
            shape("f", ShapeType::Frame, 0.0, 0.0, 100.0, 100.0),
            shape("spill", ShapeType::Ellipse, 150.0, 150.0, 50.0, 50.0),
            shape("fits", ShapeType::Ellipse, 90.0, 90.0, 10.0, 10.0),
        ];
        let board = recompute_frame_children(&board);
        assert_eq!(board[0].children(), &[ShapeId::intern("fits")]);
    }

    #[test]
    fn children_recomputed_after_move() {
        let board = vec![
            shape("frame_a", ShapeType::Frame, 0.0, 0.0, 100.0, 100.0),
            shape("in", ShapeType::Rectangle, 10.0, 10.0, 20.0, 20.0),
            shape("out", ShapeType::Ellipse, 150.0, 150.0, 160.0, 170.0),
        ];
        let board = recompute_frame_children(&board);
        assert_eq!(board[0].children(), &[ShapeId::intern("in")]);

        let moved: Vec<Shape> = board
            .iter()
            .map(|s| {
                if s.id == ShapeId::intern("out") {
                    s.with_bounds(Bounds::new(50.0, 50.0, 60.0, 70.0))
                } else {
                    s.clone()
                }
            })
            .collect();
        let board = recompute_frame_children(&moved);
        assert_eq!(
            board[0].children(),
            &[ShapeId::intern("in"), ShapeId::intern("out")]
        );
    }

    #[test]
    fn frames_do_not_contain_frames() {
        let board = vec![
            shape("outer", ShapeType::Frame, 0.0, 0.0, 100.0, 100.0),
            shape("inner", ShapeType::Frame, 10.0, 10.0, 50.0, 50.0),
        ];
        let board = recompute_frame_children(&board);
        assert!(board[0].children().is_empty());
        assert!(board[1].children().is_empty());
    }
}
