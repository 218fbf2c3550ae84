//! Annotation shape model
//!
//! One file per shape kind, a `CanvasShape` trait for the shared geometry
//! operations, and a `ShapeKind` tagged union dispatching by `match`.
//! Calibrated measurement payloads live on the kinds as `Option`s and are
//! filled in by the calibration service, never computed at draw time.

use serde::{Deserialize, Serialize};

mod angle;
mod arc;
mod arrow;
mod circle;
mod closed_curve;
mod curve;
mod line;
mod point;
mod rectangle;
mod text;

pub use angle::AngleShape;
pub use arc::{ArcMeasurement, ArcShape};
pub use arrow::ArrowShape;
pub use circle::{CircleMeasurement, CircleShape};
pub use closed_curve::ClosedCurveShape;
pub use curve::CurveShape;
pub use line::LineShape;
pub use point::PointMarker;
pub use rectangle::{RectMeasurement, RectShape};
pub use text::TextShape;

/// A point in canvas (image) coordinates, y-down
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Stroke and label styling, captured from the globals at creation time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke color (hex, e.g. "#00ff00")
    pub color: String,
    /// Label and text color (hex)
    pub font_color: String,
    /// Stroke thickness in pixels
    pub thickness: f32,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            color: "#00ff00".to_string(),
            font_color: "#ffffff".to_string(),
            thickness: 2.0,
        }
    }
}

/// Geometry operations every shape kind supports
pub trait CanvasShape {
    /// Axis-aligned bounding box as (min_x, min_y, max_x, max_y)
    fn bounds(&self) -> (f64, f64, f64, f64);

    /// Whether `p` lies on or near the shape, within `tolerance` pixels
    fn contains_point(&self, p: Point, tolerance: f64) -> bool;

    /// Move every stored point; measurements are untouched
    fn translate(&mut self, dx: f64, dy: f64);

    /// Whether the shape has all the geometry its kind requires
    fn is_complete(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeType {
    Point,
    Line,
    Rectangle,
    Circle,
    Curve,
    ClosedCurve,
    Arc,
    Angle,
    Arrow,
    Text,
}

impl std::fmt::Display for ShapeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapeType::Point => write!(f, "point"),
            ShapeType::Line => write!(f, "line"),
            ShapeType::Rectangle => write!(f, "rectangle"),
            ShapeType::Circle => write!(f, "circle"),
            ShapeType::Curve => write!(f, "curve"),
            ShapeType::ClosedCurve => write!(f, "closedCurve"),
            ShapeType::Arc => write!(f, "arc"),
            ShapeType::Angle => write!(f, "angle"),
            ShapeType::Arrow => write!(f, "arrow"),
            ShapeType::Text => write!(f, "text"),
        }
    }
}

/// Tagged union over the shape kinds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ShapeKind {
    Point(PointMarker),
    Line(LineShape),
    Rectangle(RectShape),
    Circle(CircleShape),
    Curve(CurveShape),
    ClosedCurve(ClosedCurveShape),
    Arc(ArcShape),
    Angle(AngleShape),
    Arrow(ArrowShape),
    Text(TextShape),
}

impl CanvasShape for ShapeKind {
    fn bounds(&self) -> (f64, f64, f64, f64) {
        match self {
            ShapeKind::Point(s) => s.bounds(),
            ShapeKind::Line(s) => s.bounds(),
            ShapeKind::Rectangle(s) => s.bounds(),
            ShapeKind::Circle(s) => s.bounds(),
            ShapeKind::Curve(s) => s.bounds(),
            ShapeKind::ClosedCurve(s) => s.bounds(),
            ShapeKind::Arc(s) => s.bounds(),
            ShapeKind::Angle(s) => s.bounds(),
            ShapeKind::Arrow(s) => s.bounds(),
            ShapeKind::Text(s) => s.bounds(),
        }
    }

    fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        match self {
            ShapeKind::Point(s) => s.contains_point(p, tolerance),
            ShapeKind::Line(s) => s.contains_point(p, tolerance),
            ShapeKind::Rectangle(s) => s.contains_point(p, tolerance),
            ShapeKind::Circle(s) => s.contains_point(p, tolerance),
            ShapeKind::Curve(s) => s.contains_point(p, tolerance),
            ShapeKind::ClosedCurve(s) => s.contains_point(p, tolerance),
            ShapeKind::Arc(s) => s.contains_point(p, tolerance),
            ShapeKind::Angle(s) => s.contains_point(p, tolerance),
            ShapeKind::Arrow(s) => s.contains_point(p, tolerance),
            ShapeKind::Text(s) => s.contains_point(p, tolerance),
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            ShapeKind::Point(s) => s.translate(dx, dy),
            ShapeKind::Line(s) => s.translate(dx, dy),
            ShapeKind::Rectangle(s) => s.translate(dx, dy),
            ShapeKind::Circle(s) => s.translate(dx, dy),
            ShapeKind::Curve(s) => s.translate(dx, dy),
            ShapeKind::ClosedCurve(s) => s.translate(dx, dy),
            ShapeKind::Arc(s) => s.translate(dx, dy),
            ShapeKind::Angle(s) => s.translate(dx, dy),
            ShapeKind::Arrow(s) => s.translate(dx, dy),
            ShapeKind::Text(s) => s.translate(dx, dy),
        }
    }

    fn is_complete(&self) -> bool {
        match self {
            ShapeKind::Point(s) => s.is_complete(),
            ShapeKind::Line(s) => s.is_complete(),
            ShapeKind::Rectangle(s) => s.is_complete(),
            ShapeKind::Circle(s) => s.is_complete(),
            ShapeKind::Curve(s) => s.is_complete(),
            ShapeKind::ClosedCurve(s) => s.is_complete(),
            ShapeKind::Arc(s) => s.is_complete(),
            ShapeKind::Angle(s) => s.is_complete(),
            ShapeKind::Arrow(s) => s.is_complete(),
            ShapeKind::Text(s) => s.is_complete(),
        }
    }
}

impl ShapeKind {
    pub fn shape_type(&self) -> ShapeType {
        match self {
            ShapeKind::Point(_) => ShapeType::Point,
            ShapeKind::Line(_) => ShapeType::Line,
            ShapeKind::Rectangle(_) => ShapeType::Rectangle,
            ShapeKind::Circle(_) => ShapeType::Circle,
            ShapeKind::Curve(_) => ShapeType::Curve,
            ShapeKind::ClosedCurve(_) => ShapeType::ClosedCurve,
            ShapeKind::Arc(_) => ShapeType::Arc,
            ShapeKind::Angle(_) => ShapeType::Angle,
            ShapeKind::Arrow(_) => ShapeType::Arrow,
            ShapeKind::Text(_) => ShapeType::Text,
        }
    }
}

/// A committed shape: stable id, geometry, and the style it was drawn with
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shape {
    pub id: u64,
    pub kind: ShapeKind,
    pub style: ShapeStyle,
}

impl Shape {
    pub fn new(id: u64, kind: ShapeKind, style: ShapeStyle) -> Self {
        Self { id, kind, style }
    }

    pub fn shape_type(&self) -> ShapeType {
        self.kind.shape_type()
    }

    pub fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        self.kind.contains_point(p, tolerance)
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.kind.translate(dx, dy);
    }
}
