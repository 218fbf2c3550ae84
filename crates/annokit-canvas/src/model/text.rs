use serde::{Deserialize, Serialize};

use super::{CanvasShape, Point};

/// Nominal glyph advance used for hit testing, in pixels
const CHAR_WIDTH: f64 = 8.0;
/// Nominal line height used for hit testing, in pixels
const LINE_HEIGHT: f64 = 14.0;

/// A free-form text label anchored at its top-left corner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextShape {
    pub position: Point,
    pub content: String,
}

impl TextShape {
    pub fn new(position: Point, content: impl Into<String>) -> Self {
        Self {
            position,
            content: content.into(),
        }
    }

    /// Hit box derived from the content length, not from rendered glyphs
    pub fn hit_box(&self) -> (f64, f64, f64, f64) {
        let width = self.content.chars().count() as f64 * CHAR_WIDTH;
        (
            self.position.x,
            self.position.y,
            self.position.x + width,
            self.position.y + LINE_HEIGHT,
        )
    }
}

impl CanvasShape for TextShape {
    fn bounds(&self) -> (f64, f64, f64, f64) {
        self.hit_box()
    }

    fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        let (min_x, min_y, max_x, max_y) = self.hit_box();
        p.x >= min_x - tolerance
            && p.x <= max_x + tolerance
            && p.y >= min_y - tolerance
            && p.y <= max_y + tolerance
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.position.x += dx;
        self.position.y += dy;
    }

    fn is_complete(&self) -> bool {
        true
    }
}
