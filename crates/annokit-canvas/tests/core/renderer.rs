use image::{Rgba, RgbaImage};
use tiny_skia::{Color, Pixmap};

use annokit_canvas::model::{CircleShape, LineShape, PointMarker, RectShape, TextShape};
use annokit_canvas::renderer::{composite_over, render};
use annokit_canvas::{
    CalibrationCapture, FrameInput, Point, Shape, ShapeKind, ShapeStyle,
};
use annokit_core::Unit;

fn frame<'a>(shapes: &'a [Shape]) -> FrameInput<'a> {
    FrameInput {
        shapes,
        selected: None,
        draft: None,
        draft_style: ShapeStyle::default(),
        eraser: None,
        capture: None,
        unit: Unit::Micrometer,
        width: 200,
        height: 150,
    }
}

fn sample_shapes() -> Vec<Shape> {
    vec![
        Shape::new(
            1,
            ShapeKind::Point(PointMarker::new(Point::new(20.0, 20.0), "p1")),
            ShapeStyle::default(),
        ),
        Shape::new(
            2,
            ShapeKind::Line(LineShape::new(Point::new(10.0, 40.0), Point::new(120.0, 40.0))),
            ShapeStyle::default(),
        ),
        Shape::new(
            3,
            ShapeKind::Rectangle(RectShape::new(Point::new(30.0, 60.0), Point::new(90.0, 100.0))),
            ShapeStyle::default(),
        ),
        Shape::new(
            4,
            ShapeKind::Circle(CircleShape::from_points(vec![
                Point::new(120.0, 80.0),
                Point::new(160.0, 80.0),
                Point::new(140.0, 110.0),
            ])),
            ShapeStyle::default(),
        ),
        Shape::new(
            5,
            ShapeKind::Text(TextShape::new(Point::new(10.0, 120.0), "sample")),
            ShapeStyle::default(),
        ),
    ]
}

#[test]
fn test_render_produces_requested_dimensions() {
    let shapes = sample_shapes();
    let pixmap = render(&frame(&shapes)).unwrap();
    assert_eq!(pixmap.width(), 200);
    assert_eq!(pixmap.height(), 150);
}

#[test]
fn test_render_rejects_zero_size() {
    let shapes = Vec::new();
    let mut input = frame(&shapes);
    input.width = 0;
    assert!(render(&input).is_none());
}

#[test]
fn test_render_marks_drawn_pixels() {
    let shapes = vec![Shape::new(
        1,
        ShapeKind::Line(LineShape::new(Point::new(0.0, 75.0), Point::new(200.0, 75.0))),
        ShapeStyle::default(),
    )];
    let pixmap = render(&frame(&shapes)).unwrap();
    let covered = pixmap.data().chunks_exact(4).any(|px| px[3] != 0);
    assert!(covered);
}

#[test]
fn test_render_with_selection_highlight() {
    let shapes = sample_shapes();
    let mut input = frame(&shapes);
    input.selected = Some(2);
    assert!(render(&input).is_some());
}

#[test]
fn test_render_with_draft_preview() {
    let shapes = Vec::new();
    let mut input = frame(&shapes);
    input.draft = Some(ShapeKind::Circle(CircleShape::from_points(vec![
        Point::new(50.0, 50.0),
        Point::new(90.0, 50.0),
    ])));
    assert!(render(&input).is_some());
}

#[test]
fn test_render_with_eraser_cursor_and_capture() {
    let shapes = Vec::new();
    let mut input = frame(&shapes);
    input.eraser = Some((Point::new(100.0, 75.0), 15.0));
    let mut capture = CalibrationCapture::new();
    capture.add_point(Point::new(40.0, 70.0));
    capture.set_preview(Point::new(160.0, 90.0));
    input.capture = Some(&capture);
    assert!(render(&input).is_some());
}

#[test]
fn test_composite_opaque_overlay_wins() {
    let base = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
    let mut overlay = Pixmap::new(4, 4).unwrap();
    overlay.fill(Color::from_rgba8(255, 0, 0, 255));

    let out = composite_over(&base, &overlay);
    let px = out.get_pixel(2, 2);
    assert_eq!(px[0], 255);
    assert_eq!(px[1], 0);
    assert_eq!(px[2], 0);
    assert_eq!(px[3], 255);
}

#[test]
fn test_composite_transparent_overlay_preserves_base() {
    let base = RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 255]));
    let overlay = Pixmap::new(4, 4).unwrap();

    let out = composite_over(&base, &overlay);
    assert_eq!(*out.get_pixel(1, 1), Rgba([10, 20, 30, 255]));
}

#[test]
fn test_composite_blends_partial_alpha() {
    let base = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255]));
    let mut overlay = Pixmap::new(2, 2).unwrap();
    overlay.fill(Color::from_rgba8(255, 0, 0, 128));

    let out = composite_over(&base, &overlay);
    let px = out.get_pixel(0, 0);
    assert_eq!(px[0], 255);
    assert!((px[1] as i16 - 127).unsigned_abs() <= 2);
    assert_eq!(px[3], 255);
}

#[test]
fn test_composite_handles_size_mismatch() {
    // Overlay smaller than the base: uncovered pixels pass through
    let base = RgbaImage::from_pixel(8, 8, Rgba([5, 5, 5, 255]));
    let mut overlay = Pixmap::new(4, 4).unwrap();
    overlay.fill(Color::from_rgba8(0, 255, 0, 255));

    let out = composite_over(&base, &overlay);
    assert_eq!(out.get_pixel(2, 2)[1], 255);
    assert_eq!(*out.get_pixel(6, 6), Rgba([5, 5, 5, 255]));
}
