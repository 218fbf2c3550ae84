//! Viewport transform
//!
//! One struct owns the zoom factor and pan offset and both coordinate
//! conversions, so screen-to-canvas math lives in exactly one place.
//! Canvas coordinates are image pixels, y-down; screen coordinates are
//! the rendered surface after zoom and pan.

use crate::model::Point;

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 5.0;
/// Multiplicative step for one wheel notch
pub const ZOOM_STEP_IN: f64 = 1.1;
pub const ZOOM_STEP_OUT: f64 = 0.9;

#[derive(Debug, Clone, PartialEq)]
pub struct ViewportTransform {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    canvas_width: f64,
    canvas_height: f64,
}

impl ViewportTransform {
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            canvas_width,
            canvas_height,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> (f64, f64) {
        (self.pan_x, self.pan_y)
    }

    pub fn canvas_size(&self) -> (f64, f64) {
        (self.canvas_width, self.canvas_height)
    }

    /// Screen position to canvas (image) coordinates
    pub fn pixel_to_world(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.pan_x) / self.zoom,
            (screen.y - self.pan_y) / self.zoom,
        )
    }

    /// Canvas (image) coordinates to screen position
    pub fn world_to_pixel(&self, world: Point) -> Point {
        Point::new(
            world.x * self.zoom + self.pan_x,
            world.y * self.zoom + self.pan_y,
        )
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Zoom by `factor`, keeping the canvas point under `cursor` fixed
    pub fn zoom_at(&mut self, cursor: Point, factor: f64) {
        let anchor = self.pixel_to_world(cursor);
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        self.pan_x = cursor.x - anchor.x * self.zoom;
        self.pan_y = cursor.y - anchor.y * self.zoom;
    }

    pub fn zoom_in_at(&mut self, cursor: Point) {
        self.zoom_at(cursor, ZOOM_STEP_IN);
    }

    pub fn zoom_out_at(&mut self, cursor: Point) {
        self.zoom_at(cursor, ZOOM_STEP_OUT);
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Back to 1:1 with no offset
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }

    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
    }

    /// Zoom so the whole image is visible, centered in the canvas
    ///
    /// Picks the smaller of the two axis ratios, clamped to the zoom
    /// range. Zero-sized images leave the transform unchanged.
    pub fn fit_to_window(&mut self, image_width: f64, image_height: f64) {
        if image_width <= 0.0 || image_height <= 0.0 {
            return;
        }
        let fit = (self.canvas_width / image_width).min(self.canvas_height / image_height);
        self.zoom = fit.clamp(MIN_ZOOM, MAX_ZOOM);
        self.pan_x = (self.canvas_width - image_width * self.zoom) / 2.0;
        self.pan_y = (self.canvas_height - image_height * self.zoom) / 2.0;
    }
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::new(1920.0, 1080.0)
    }
}

impl std::fmt::Display for ViewportTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.0}% at ({:.0}, {:.0})",
            self.zoom * 100.0,
            self.pan_x,
            self.pan_y
        )
    }
}
