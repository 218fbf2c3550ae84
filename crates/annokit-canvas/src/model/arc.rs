use serde::{Deserialize, Serialize};

use super::circle::bounds_of_points;
use super::{CanvasShape, Point};
use crate::geometry;

/// Calibrated arc measurements
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcMeasurement {
    pub radius: f64,
    pub arc_length: f64,
    /// Included angle in degrees, rounded to one decimal
    pub angle_degrees: f64,
}

/// A circular arc through three points: start, a point on the arc, end
///
/// The supporting circle is the circumscribed fit; the sweep runs
/// counter-clockwise from the first point to the third.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArcShape {
    pub points: Vec<Point>,
    /// Filled by the calibration service
    pub measurement: Option<ArcMeasurement>,
}

impl ArcShape {
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

    /// The supporting circle, when three non-collinear points exist
    pub fn fit(&self) -> Option<(Point, f64)> {
        if self.points.len() < 3 {
            return None;
        }
        geometry::circle_from_three_points(self.points[0], self.points[1], self.points[2])
    }

    /// CCW start/end angles of the sweep from the first to the third point
    pub fn angles(&self) -> Option<(f64, f64)> {
        let (center, _) = self.fit()?;
        Some(geometry::arc_angles(center, self.points[0], self.points[2]))
    }

    /// Included angle of the sweep, in radians
    pub fn span(&self) -> Option<f64> {
        self.angles().map(|(start, end)| end - start)
    }
}

impl Default for ArcShape {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasShape for ArcShape {
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
        let Some((center, radius)) = self.fit() else {
            return false;
        };
        if (center.distance_to(&p) - radius).abs() > tolerance {
            return false;
        }
        match self.angles() {
            Some((start, end)) => {
                let theta = (p.y - center.y).atan2(p.x - center.x);
                geometry::arc_contains_angle(start, end, theta)
            }
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
