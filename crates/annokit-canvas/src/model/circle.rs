use serde::{Deserialize, Serialize};

use super::{CanvasShape, Point};
use crate::geometry;

/// Calibrated circle measurements
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleMeasurement {
    pub radius: f64,
    pub diameter: f64,
    pub area: f64,
}

/// A circle defined by three control points on its circumference
///
/// Center and radius are always derived from the points, never stored;
/// collinear points have no fit and the shape degrades to its dots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircleShape {
    pub points: Vec<Point>,
    /// Filled by the calibration service
    pub measurement: Option<CircleMeasurement>,
}

impl CircleShape {
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            measurement: None,
        }
    }

    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            points,
            measurement: None,
        }
    }

    /// Add a control point; points beyond the third are ignored
    pub fn add_point(&mut self, p: Point) -> bool {
        if self.points.len() < 3 {
            self.points.push(p);
            true
        } else {
            false
        }
    }

    /// The circumscribed fit, when three non-collinear points exist
    pub fn fit(&self) -> Option<(Point, f64)> {
        if self.points.len() < 3 {
            return None;
        }
        geometry::circle_from_three_points(self.points[0], self.points[1], self.points[2])
    }
}

impl Default for CircleShape {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasShape for CircleShape {
    fn bounds(&self) -> (f64, f64, f64, f64) {
        if let Some((center, radius)) = self.fit() {
            return (
                center.x - radius,
                center.y - radius,
                center.x + radius,
                center.y + radius,
            );
        }
        bounds_of_points(&self.points)
    }

    fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        match self.fit() {
            Some((center, radius)) => (center.distance_to(&p) - radius).abs() <= tolerance,
            None => false,
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        for point in &mut self.points {
            point.x += dx;
            point.y += dy;
        }
    }

    fn is_complete(&self) -> bool {
        self.points.len() == 3
    }
}

/// Bounding box over a point list; empty lists collapse to the origin
pub(super) fn bounds_of_points(points: &[Point]) -> (f64, f64, f64, f64) {
    if points.is_empty() {
        return (0.0, 0.0, 0.0, 0.0);
    }
    let mut min_x = f64::MAX;
    let mut min_y = f64::MAX;
    let mut max_x = f64::MIN;
    let mut max_y = f64::MIN;
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    (min_x, min_y, max_x, max_y)
}
