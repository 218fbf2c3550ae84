use serde::{Deserialize, Serialize};

use super::circle::bounds_of_points;
use super::{CanvasShape, Point};
use crate::geometry;

/// A closed region outlined by a smoothed polyline
///
/// Finalizing appends the first point again as the closing point, so the
/// stored list ends where it began.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosedCurveShape {
    pub points: Vec<Point>,
    /// Enclosed area in calibrated units², filled by the calibration service
    pub calibrated_area: Option<f64>,
}

impl ClosedCurveShape {
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            calibrated_area: None,
        }
    }

    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            points,
            calibrated_area: None,
        }
    }

    pub fn add_point(&mut self, p: Point) {
        self.points.push(p);
    }

    /// Append the first point as the closing point
    pub fn close(&mut self) {
        if let Some(&first) = self.points.first() {
            if self.points.last() != Some(&first) {
                self.points.push(first);
            }
        }
    }

    /// Enclosed area in px² via the shoelace formula
    pub fn pixel_area(&self) -> f64 {
        geometry::polygon_area(&self.points)
    }
}

impl Default for ClosedCurveShape {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasShape for ClosedCurveShape {
    fn bounds(&self) -> (f64, f64, f64, f64) {
        bounds_of_points(&self.points)
    }

    fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        if self.points.len() < 2 {
            return false;
        }
        let on_segment = self
            .points
            .windows(2)
            .any(|w| geometry::distance_to_segment(p, w[0], w[1]) <= tolerance);
        if on_segment {
            return true;
        }
        // Closing segment, for collections finalized without close()
        let first = self.points[0];
        let last = self.points[self.points.len() - 1];
        geometry::distance_to_segment(p, last, first) <= tolerance
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        for point in &mut self.points {
            point.x += dx;
            point.y += dy;
        }
    }

    fn is_complete(&self) -> bool {
        self.points.len() > 2
    }
}
