//! Point helpers shared by hit testing and the resize engine.

/// Euclidean distance between two points.
pub fn distance(a: (f32, f32), b: (f32, f32)) -> f32 {
    (a.0 - b.0).hypot(a.1 - b.1)
}

/// True when `(x, y)` is within `tolerance` of `(px, py)` on both axes.
pub fn near_point(x: f32, y: f32, px: f32, py: f32, tolerance: f32) -> bool {
    (x - px).abs() < tolerance && (y - py).abs() < tolerance
}

/// True when `c` lies on segment `a`–`b` within `slack`.
///
/// Uses the triangle inequality: for a point on the segment, the detour
/// `|ac| + |cb|` equals `|ab|`.
pub fn on_segment(a: (f32, f32), b: (f32, f32), c: (f32, f32), slack: f32) -> bool {
    let offset = distance(a, b) - (distance(a, c) + distance(b, c));
    offset.abs() < slack
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_3_4_5() {
        assert!((distance((0.0, 0.0), (3.0, 4.0)) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn near_point_is_strict() {
        assert!(near_point(12.0, 22.0, 10.0, 20.0, 5.0));
        assert!(!near_point(15.0, 20.0, 10.0, 20.0, 5.0));
    }

    #[test]
    fn segment_slack() {
        let a = (0.0, 0.0);
        let b = (10.0, 0.0);
        assert!(on_segment(a, b, (5.0, 0.5), 1.0));
        assert!(!on_segment(a, b, (5.0, 5.0), 1.0));
        assert!(!on_segment(a, b, (20.0, 0.0), 1.0));
    }
}
