use egui::{Pos2, Rect};

/// Half-angle between the arrow shaft and each side of the head
pub const ARROW_HEAD_SPREAD: f32 = std::f32::consts::PI / 6.0;

/// Vertices of an arrow from `tail` to `tip`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowGeometry {
    pub tail: Pos2,
    pub tip: Pos2,
    /// Filled head: the tip followed by the two base vertices
    pub head: [Pos2; 3],
}

impl ArrowGeometry {
    /// Compute the shaft and head for an arrow.
    ///
    /// A zero-length arrow has `atan2(0, 0) == 0`, so its head points along +x.
    pub fn new(tail: Pos2, tip: Pos2, head_length: f32) -> Self {
        let angle = (tip.y - tail.y).atan2(tip.x - tail.x);
        let base = |theta: f32| {
            Pos2::new(
                tip.x - head_length * theta.cos(),
                tip.y - head_length * theta.sin(),
            )
        };

        Self {
            tail,
            tip,
            head: [
                tip,
                base(angle - ARROW_HEAD_SPREAD),
                base(angle + ARROW_HEAD_SPREAD),
            ],
        }
    }

    /// Bounding box of shaft and head
    pub fn bounds(&self) -> Rect {
        calculate_bounds(&[self.tail, self.head[0], self.head[1], self.head[2]], 0.0)
    }
}

/// Calculate distance from a point to a line segment
pub fn distance_to_line_segment(point: Pos2, line_start: Pos2, line_end: Pos2) -> f32 {
    let line_vec = line_end - line_start;
    let point_vec = point - line_start;

    let line_len = line_vec.length();
    if line_len == 0.0 {
        return point_vec.length();
    }

    let t = ((point_vec.x * line_vec.x + point_vec.y * line_vec.y) / line_len).clamp(0.0, line_len);
    let projection = line_start + (line_vec * t / line_len);
    (point - projection).length()
}

/// Whether a point lies within `half_width` of the segment without extending past its ends
pub fn within_butt_segment(point: Pos2, line_start: Pos2, line_end: Pos2, half_width: f32) -> bool {
    let line_vec = line_end - line_start;
    let line_len = line_vec.length();
    if line_len == 0.0 {
        return false;
    }

    let point_vec = point - line_start;
    let along = (point_vec.x * line_vec.x + point_vec.y * line_vec.y) / line_len;
    let across = (point_vec.x * line_vec.y - point_vec.y * line_vec.x).abs() / line_len;
    (0.0..=line_len).contains(&along) && across <= half_width
}

/// Whether a point lies inside (or on the edge of) a triangle of either winding.
/// Degenerate triangles contain nothing.
pub fn triangle_contains(triangle: &[Pos2; 3], point: Pos2) -> bool {
    let [a, b, c] = *triangle;
    let edge = |p: Pos2, q: Pos2| (q.x - p.x) * (point.y - p.y) - (q.y - p.y) * (point.x - p.x);

    let area = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
    if area == 0.0 {
        return false;
    }

    let (e0, e1, e2) = (edge(a, b), edge(b, c), edge(c, a));
    if area > 0.0 {
        e0 >= 0.0 && e1 >= 0.0 && e2 >= 0.0
    } else {
        e0 <= 0.0 && e1 <= 0.0 && e2 <= 0.0
    }
}

/// Calculate the bounding box for a set of points
pub fn calculate_bounds(points: &[Pos2], padding: f32) -> Rect {
    if points.is_empty() {
        return Rect::NOTHING;
    }

    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;

    for point in points {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }

    Rect::from_min_max(
        Pos2::new(min_x - padding, min_y - padding),
        Pos2::new(max_x + padding, max_y + padding),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    const EPSILON: f32 = 1e-4;

    fn assert_near(actual: Pos2, expected: Pos2) {
        assert!(
            (actual.x - expected.x).abs() < EPSILON && (actual.y - expected.y).abs() < EPSILON,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_horizontal_arrow_head() {
        let arrow = ArrowGeometry::new(pos2(0.0, 0.0), pos2(10.0, 0.0), 15.0);
        let thirty = 30f32.to_radians();

        assert_eq!(arrow.head[0], pos2(10.0, 0.0));
        assert_near(arrow.head[1], pos2(10.0 - 15.0 * (-thirty).cos(), -15.0 * (-thirty).sin()));
        assert_near(arrow.head[2], pos2(10.0 - 15.0 * thirty.cos(), -15.0 * thirty.sin()));
    }

    #[test]
    fn test_zero_length_arrow_points_along_x() {
        let arrow = ArrowGeometry::new(pos2(5.0, 5.0), pos2(5.0, 5.0), 15.0);
        let dx = 15.0 * ARROW_HEAD_SPREAD.cos();

        assert_near(arrow.head[1], pos2(5.0 - dx, 12.5));
        assert_near(arrow.head[2], pos2(5.0 - dx, -2.5));
        assert!(arrow.bounds().is_finite());
    }

    #[test]
    fn test_distance_to_segment() {
        let a = pos2(0.0, 0.0);
        let b = pos2(10.0, 0.0);
        assert!((distance_to_line_segment(pos2(5.0, 3.0), a, b) - 3.0).abs() < EPSILON);
        assert!((distance_to_line_segment(pos2(13.0, 4.0), a, b) - 5.0).abs() < EPSILON);
        assert!((distance_to_line_segment(pos2(3.0, 4.0), a, a) - 5.0).abs() < EPSILON);
    }

    #[test]
    fn test_butt_segment_stops_at_ends() {
        let a = pos2(0.0, 0.0);
        let b = pos2(10.0, 0.0);
        assert!(within_butt_segment(pos2(5.0, 1.0), a, b, 1.5));
        assert!(!within_butt_segment(pos2(-0.5, 0.0), a, b, 1.5));
        assert!(!within_butt_segment(pos2(5.0, 2.0), a, b, 1.5));
        assert!(!within_butt_segment(a, a, a, 1.5));
    }

    #[test]
    fn test_triangle_contains_both_windings() {
        let cw = [pos2(0.0, 0.0), pos2(10.0, 0.0), pos2(0.0, 10.0)];
        let ccw = [pos2(0.0, 0.0), pos2(0.0, 10.0), pos2(10.0, 0.0)];
        for triangle in [cw, ccw] {
            assert!(triangle_contains(&triangle, pos2(2.0, 2.0)));
            assert!(!triangle_contains(&triangle, pos2(8.0, 8.0)));
        }

        let flat = [pos2(0.0, 0.0), pos2(5.0, 0.0), pos2(10.0, 0.0)];
        assert!(!triangle_contains(&flat, pos2(5.0, 0.0)));
    }
}
