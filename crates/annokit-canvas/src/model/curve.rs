use serde::{Deserialize, Serialize};

use super::circle::bounds_of_points;
use super::{CanvasShape, Point};
use crate::geometry;

/// An open polyline, rendered smoothed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveShape {
    pub points: Vec<Point>,
    /// Path length in calibrated units, filled by the calibration service
    pub calibrated_length: Option<f64>,
}

impl CurveShape {
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            calibrated_length: None,
        }
    }

    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            points,
            calibrated_length: None,
        }
    }

    pub fn add_point(&mut self, p: Point) {
        self.points.push(p);
    }

    /// Path length in pixels
    pub fn pixel_length(&self) -> f64 {
        geometry::polyline_length(&self.points)
    }
}

impl Default for CurveShape {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasShape for CurveShape {
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
        self.points.len() >= 2
    }
}
