use serde::{Deserialize, Serialize};

use super::{CanvasShape, Point};
use crate::geometry;

/// A measured line segment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineShape {
    pub start: Point,
    pub end: Point,
    /// Length in calibrated units, filled by the calibration service
    pub calibrated_distance: Option<f64>,
}

impl LineShape {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            calibrated_distance: None,
        }
    }

    /// Length in pixels
    pub fn pixel_length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    /// Midpoint, where the measurement label sits
    pub fn midpoint(&self) -> Point {
        Point::new(
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
        )
    }
}

impl CanvasShape for LineShape {
    fn bounds(&self) -> (f64, f64, f64, f64) {
        (
            self.start.x.min(self.end.x),
            self.start.y.min(self.end.y),
            self.start.x.max(self.end.x),
            self.start.y.max(self.end.y),
        )
    }

    fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        geometry::distance_to_segment(p, self.start, self.end) <= tolerance
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.start.x += dx;
        self.start.y += dy;
        self.end.x += dx;
        self.end.y += dy;
    }

    fn is_complete(&self) -> bool {
        true
    }
}
