use serde::{Deserialize, Serialize};

use super::{CanvasShape, Point};

/// A labeled point marker ("p1", "p2", ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointMarker {
    pub position: Point,
    pub label: String,
}

impl PointMarker {
    pub fn new(position: Point, label: impl Into<String>) -> Self {
        Self {
            position,
            label: label.into(),
        }
    }
}

impl CanvasShape for PointMarker {
    fn bounds(&self) -> (f64, f64, f64, f64) {
        (self.position.x, self.position.y, self.position.x, self.position.y)
    }

    fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        self.position.distance_to(&p) <= tolerance
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.position.x += dx;
        self.position.y += dy;
    }

    fn is_complete(&self) -> bool {
        true
    }
}
