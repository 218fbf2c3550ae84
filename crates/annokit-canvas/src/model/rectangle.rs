use serde::{Deserialize, Serialize};

use super::{CanvasShape, Point};
use crate::geometry;

/// Calibrated rectangle measurements
///
/// `area` is the product of the already-rounded width and height, matching
/// what the labels display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectMeasurement {
    pub width: f64,
    pub height: f64,
    pub area: f64,
}

/// An axis-aligned rectangle spanned by two opposite corners
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RectShape {
    pub start: Point,
    pub end: Point,
    /// Filled by the calibration service
    pub measurement: Option<RectMeasurement>,
}

impl RectShape {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            measurement: None,
        }
    }

    /// Width in pixels
    pub fn pixel_width(&self) -> f64 {
        (self.end.x - self.start.x).abs()
    }

    /// Height in pixels
    pub fn pixel_height(&self) -> f64 {
        (self.end.y - self.start.y).abs()
    }

    /// The four corners, cycling from `start`
    pub fn corners(&self) -> [Point; 4] {
        [
            self.start,
            Point::new(self.end.x, self.start.y),
            self.end,
            Point::new(self.start.x, self.end.y),
        ]
    }
}

impl CanvasShape for RectShape {
    fn bounds(&self) -> (f64, f64, f64, f64) {
        (
            self.start.x.min(self.end.x),
            self.start.y.min(self.end.y),
            self.start.x.max(self.end.x),
            self.start.y.max(self.end.y),
        )
    }

    // Edges only; a click in the interior does not select.
    fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        let corners = self.corners();
        (0..4).any(|i| {
            geometry::distance_to_segment(p, corners[i], corners[(i + 1) % 4]) <= tolerance
        })
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
