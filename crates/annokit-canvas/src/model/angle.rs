use serde::{Deserialize, Serialize};

use super::circle::bounds_of_points;
use super::{CanvasShape, Point};
use crate::geometry;

/// An angle gauge: two rays meeting at the middle point
///
/// The included angle is unit-independent, so it is computed on demand
/// instead of being cached by the calibration service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AngleShape {
    /// Up to three points; the second is the vertex
    pub points: Vec<Point>,
}

impl AngleShape {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
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

    /// Included angle in degrees, folded into [0, 180]
    pub fn angle_degrees(&self) -> Option<f64> {
        if self.points.len() < 3 {
            return None;
        }
        Some(geometry::angle_at_vertex(
            self.points[1],
            self.points[0],
            self.points[2],
        ))
    }
}

impl Default for AngleShape {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasShape for AngleShape {
    fn bounds(&self) -> (f64, f64, f64, f64) {
        bounds_of_points(&self.points)
    }

    fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        self.points
            .windows(2)
            .any(|w| geometry::distance_to_segment(p, w[0], w[1]) <= tolerance)
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
