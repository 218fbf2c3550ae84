//! 2D geometry helpers for hit testing and measurement
//!
//! All functions are total: degenerate inputs produce `None` or a
//! documented fallback instead of NaN.

use crate::model::Point;

/// Euclidean distance between two points
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance_to(&b)
}

/// Distance from `p` to the segment from `a` to `b`
///
/// Projects `p` onto the segment's supporting line, clamps the projection
/// parameter to [0, 1], and measures to the clamped point. A zero-length
/// segment degrades to plain point distance.
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let abx = b.x - a.x;
    let aby = b.y - a.y;
    let len_sq = abx * abx + aby * aby;
    if len_sq == 0.0 {
        return distance(p, a);
    }
    let t = (((p.x - a.x) * abx + (p.y - a.y) * aby) / len_sq).clamp(0.0, 1.0);
    distance(p, Point::new(a.x + t * abx, a.y + t * aby))
}

/// Center and radius of the circle through three points
///
/// Returns `None` for collinear or coincident inputs (degenerate
/// determinant); callers must treat that as "no circle", not as an error.
pub fn circle_from_three_points(p1: Point, p2: Point, p3: Point) -> Option<(Point, f64)> {
    let d = 2.0 * (p1.x * (p2.y - p3.y) + p2.x * (p3.y - p1.y) + p3.x * (p1.y - p2.y));
    if d.abs() < 1e-10 {
        return None;
    }

    let s1 = p1.x * p1.x + p1.y * p1.y;
    let s2 = p2.x * p2.x + p2.y * p2.y;
    let s3 = p3.x * p3.x + p3.y * p3.y;

    let ux = (s1 * (p2.y - p3.y) + s2 * (p3.y - p1.y) + s3 * (p1.y - p2.y)) / d;
    let uy = (s1 * (p3.x - p2.x) + s2 * (p1.x - p3.x) + s3 * (p2.x - p1.x)) / d;

    let center = Point::new(ux, uy);
    Some((center, distance(center, p1)))
}

/// Total length of an open polyline
pub fn polyline_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| distance(w[0], w[1])).sum()
}

/// Area of a polygon via the shoelace formula
///
/// The polygon is implicitly closed. Fewer than 3 points enclose nothing.
pub fn polygon_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..points.len() {
        let j = (i + 1) % points.len();
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum.abs() / 2.0
}

/// Start and end angles of the arc from `start_pt` to `end_pt` around `center`
///
/// Both are normalized into [0, 2π); the end angle is then lifted by 2π
/// until it is at least the start angle, so the sweep is always
/// counter-clockwise from start to end.
pub fn arc_angles(center: Point, start_pt: Point, end_pt: Point) -> (f64, f64) {
    let start = normalize_angle((start_pt.y - center.y).atan2(start_pt.x - center.x));
    let mut end = normalize_angle((end_pt.y - center.y).atan2(end_pt.x - center.x));
    while end < start {
        end += std::f64::consts::TAU;
    }
    (start, end)
}

/// Whether `theta` falls inside the CCW span `start`..=`end`
///
/// `theta` is lifted into the same wrap-around frame as the span before
/// comparison.
pub fn arc_contains_angle(start: f64, end: f64, theta: f64) -> bool {
    let mut theta = normalize_angle(theta);
    while theta < start {
        theta += std::f64::consts::TAU;
    }
    theta <= end
}

/// Angle at `vertex` between the rays toward `a` and `b`, in degrees
///
/// Folded into [0, 180].
pub fn angle_at_vertex(vertex: Point, a: Point, b: Point) -> f64 {
    let ang_a = (a.y - vertex.y).atan2(a.x - vertex.x);
    let ang_b = (b.y - vertex.y).atan2(b.x - vertex.x);
    let mut degrees = (ang_b - ang_a).to_degrees().abs();
    if degrees > 180.0 {
        degrees = 360.0 - degrees;
    }
    degrees
}

/// Round to `n` decimal places
///
/// Calibrated measurements are stored at 11 decimals so recomputing with
/// the same ratio reproduces the stored value bit-for-bit.
pub fn round_to_decimals(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle % std::f64::consts::TAU;
    if a < 0.0 {
        a += std::f64::consts::TAU;
    }
    a
}
