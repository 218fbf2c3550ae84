use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;

use annokit_canvas::model::{
    ArcShape, CircleShape, ClosedCurveShape, CurveShape, LineShape, RectShape,
};
use annokit_canvas::{
    geometry, recalculate, CalibrationCapture, CalibrationService, Point, Shape, ShapeKind,
    ShapeStore, ShapeStyle,
};
use annokit_core::error::CalibrationError;
use annokit_core::{CalibrationContext, Unit};

fn shape(id: u64, kind: ShapeKind) -> Shape {
    Shape::new(id, kind, ShapeStyle::default())
}

fn half_micron_per_pixel() -> CalibrationContext {
    CalibrationContext::from_ratio(0.5, Unit::Micrometer)
}

#[test]
fn test_capture_first_point_locks_guide() {
    let mut capture = CalibrationCapture::new();
    assert_eq!(capture.guide_y(), None);
    capture.add_point(Point::new(100.0, 50.0));
    assert_eq!(capture.guide_y(), Some(50.0));
    assert_eq!(capture.collected(), 1);
    assert!(!capture.is_complete());
}

#[test]
fn test_capture_second_point_snaps_to_guide() {
    let mut capture = CalibrationCapture::new();
    capture.add_point(Point::new(100.0, 50.0));
    capture.add_point(Point::new(300.0, 80.0));
    let second = capture.second().unwrap();
    assert_eq!(second.x, 300.0);
    assert_eq!(second.y, 50.0);
    assert!(capture.is_complete());
    assert_eq!(capture.pixel_distance(), Some(200.0));
}

#[test]
fn test_capture_preview_snaps_and_clears() {
    let mut capture = CalibrationCapture::new();
    // No preview before the first point
    capture.set_preview(Point::new(10.0, 10.0));
    assert_eq!(capture.preview(), None);

    capture.add_point(Point::new(100.0, 50.0));
    capture.set_preview(Point::new(250.0, 95.0));
    let preview = capture.preview().unwrap();
    assert_eq!(preview.x, 250.0);
    assert_eq!(preview.y, 50.0);

    capture.add_point(Point::new(300.0, 80.0));
    assert_eq!(capture.preview(), None);
    // No preview after completion either
    capture.set_preview(Point::new(400.0, 10.0));
    assert_eq!(capture.preview(), None);
}

#[test]
fn test_capture_ignores_extra_clicks() {
    let mut capture = CalibrationCapture::new();
    capture.add_point(Point::new(100.0, 50.0));
    capture.add_point(Point::new(300.0, 50.0));
    capture.add_point(Point::new(700.0, 50.0));
    assert_eq!(capture.second().unwrap().x, 300.0);
    assert_eq!(capture.collected(), 2);
}

#[test]
fn test_capture_distance_is_absolute() {
    let mut capture = CalibrationCapture::new();
    capture.add_point(Point::new(300.0, 50.0));
    capture.add_point(Point::new(100.0, 50.0));
    assert_eq!(capture.pixel_distance(), Some(200.0));
}

#[test]
fn test_finish_requires_two_points() {
    let mut capture = CalibrationCapture::new();
    match capture.finish(100.0, Unit::Micrometer) {
        Err(CalibrationError::CaptureIncomplete { collected }) => assert_eq!(collected, 0),
        other => panic!("expected CaptureIncomplete, got {other:?}"),
    }
    capture.add_point(Point::new(10.0, 10.0));
    match capture.finish(100.0, Unit::Micrometer) {
        Err(CalibrationError::CaptureIncomplete { collected }) => assert_eq!(collected, 1),
        other => panic!("expected CaptureIncomplete, got {other:?}"),
    }
}

#[test]
fn test_finish_rejects_zero_span() {
    let mut capture = CalibrationCapture::new();
    capture.add_point(Point::new(100.0, 50.0));
    capture.add_point(Point::new(100.0, 90.0));
    assert!(matches!(
        capture.finish(100.0, Unit::Micrometer),
        Err(CalibrationError::ZeroPixelDistance)
    ));
}

#[test]
fn test_finish_rejects_nonpositive_length() {
    let mut capture = CalibrationCapture::new();
    capture.add_point(Point::new(100.0, 50.0));
    capture.add_point(Point::new(300.0, 50.0));
    assert!(matches!(
        capture.finish(0.0, Unit::Micrometer),
        Err(CalibrationError::InvalidLength { .. })
    ));
    assert!(matches!(
        capture.finish(-5.0, Unit::Micrometer),
        Err(CalibrationError::InvalidLength { .. })
    ));
    assert!(matches!(
        capture.finish(f64::NAN, Unit::Micrometer),
        Err(CalibrationError::InvalidLength { .. })
    ));
}

#[test]
fn test_finish_derives_ratio() {
    let mut capture = CalibrationCapture::new();
    capture.add_point(Point::new(100.0, 50.0));
    capture.add_point(Point::new(300.0, 50.0));
    let context = capture.finish(100.0, Unit::Micrometer).unwrap();
    assert_eq!(context.effective_ratio(), Some(0.5));
    assert_eq!(context.unit, Unit::Micrometer);
}

#[test]
fn test_capture_reset() {
    let mut capture = CalibrationCapture::new();
    capture.add_point(Point::new(100.0, 50.0));
    capture.reset();
    assert_eq!(capture.collected(), 0);
    assert_eq!(capture.guide_y(), None);
}

#[test]
fn test_recalculate_line() {
    let mut shapes = vec![shape(
        1,
        ShapeKind::Line(LineShape::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0))),
    )];
    recalculate(&mut shapes, &half_micron_per_pixel());
    match &shapes[0].kind {
        ShapeKind::Line(line) => assert_eq!(line.calibrated_distance, Some(50.0)),
        other => panic!("unexpected kind {:?}", other.shape_type()),
    }
}

#[test]
fn test_recalculate_rectangle() {
    let mut shapes = vec![shape(
        1,
        ShapeKind::Rectangle(RectShape::new(Point::new(0.0, 0.0), Point::new(20.0, 10.0))),
    )];
    recalculate(&mut shapes, &half_micron_per_pixel());
    match &shapes[0].kind {
        ShapeKind::Rectangle(rect) => {
            let m = rect.measurement.as_ref().unwrap();
            assert_eq!(m.width, 10.0);
            assert_eq!(m.height, 5.0);
            assert_eq!(m.area, 50.0);
        }
        other => panic!("unexpected kind {:?}", other.shape_type()),
    }
}

#[test]
fn test_recalculate_circle() {
    let mut shapes = vec![shape(
        1,
        ShapeKind::Circle(CircleShape::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 10.0),
        ])),
    )];
    recalculate(&mut shapes, &CalibrationContext::from_ratio(1.0, Unit::Micrometer));
    match &shapes[0].kind {
        ShapeKind::Circle(circle) => {
            let m = circle.measurement.as_ref().unwrap();
            assert_eq!(m.radius, 6.25);
            assert_eq!(m.diameter, 12.5);
            let expected = geometry::round_to_decimals(std::f64::consts::PI * 6.25 * 6.25, 11);
            assert!((m.area - expected).abs() < 1e-9);
        }
        other => panic!("unexpected kind {:?}", other.shape_type()),
    }
}

#[test]
fn test_recalculate_curve_and_closed_curve() {
    let mut shapes = vec![
        shape(
            1,
            ShapeKind::Curve(CurveShape::from_points(vec![
                Point::new(0.0, 0.0),
                Point::new(3.0, 4.0),
                Point::new(3.0, 9.0),
            ])),
        ),
        shape(
            2,
            ShapeKind::ClosedCurve(ClosedCurveShape::from_points(vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
                Point::new(0.0, 10.0),
            ])),
        ),
    ];
    recalculate(&mut shapes, &half_micron_per_pixel());
    match &shapes[0].kind {
        ShapeKind::Curve(curve) => assert_eq!(curve.calibrated_length, Some(5.0)),
        other => panic!("unexpected kind {:?}", other.shape_type()),
    }
    // Area scales by the square of the ratio: 100 px² × 0.5²
    match &shapes[1].kind {
        ShapeKind::ClosedCurve(closed) => assert_eq!(closed.calibrated_area, Some(25.0)),
        other => panic!("unexpected kind {:?}", other.shape_type()),
    }
}

#[test]
fn test_recalculate_arc() {
    let mut shapes = vec![shape(
        1,
        ShapeKind::Arc(ArcShape::from_points(vec![
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(-10.0, 0.0),
        ])),
    )];
    recalculate(&mut shapes, &half_micron_per_pixel());
    match &shapes[0].kind {
        ShapeKind::Arc(arc) => {
            let m = arc.measurement.as_ref().unwrap();
            assert_eq!(m.radius, 5.0);
            // Half circle of pixel radius 10: length π·10·0.5
            assert!((m.arc_length - std::f64::consts::PI * 5.0).abs() < 1e-9);
            assert_eq!(m.angle_degrees, 180.0);
        }
        other => panic!("unexpected kind {:?}", other.shape_type()),
    }
}

#[test]
fn test_recalculate_without_ratio_leaves_shapes_alone() {
    let mut shapes = vec![shape(
        1,
        ShapeKind::Line(LineShape::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0))),
    )];
    recalculate(&mut shapes, &CalibrationContext::default());
    match &shapes[0].kind {
        ShapeKind::Line(line) => assert_eq!(line.calibrated_distance, None),
        other => panic!("unexpected kind {:?}", other.shape_type()),
    }
}

#[test]
fn test_recalculate_is_idempotent() {
    let context = CalibrationContext::from_ratio(0.123456789, Unit::Micrometer);
    let mut shapes = vec![
        shape(
            1,
            ShapeKind::Line(LineShape::new(Point::new(1.0, 2.0), Point::new(77.3, 41.9))),
        ),
        shape(
            2,
            ShapeKind::Circle(CircleShape::from_points(vec![
                Point::new(3.0, 1.0),
                Point::new(19.0, 4.0),
                Point::new(11.0, 17.0),
            ])),
        ),
        shape(
            3,
            ShapeKind::Rectangle(RectShape::new(Point::new(0.5, 0.5), Point::new(33.3, 21.7))),
        ),
    ];
    recalculate(&mut shapes, &context);
    let first_pass = shapes.clone();
    recalculate(&mut shapes, &context);

    for (a, b) in first_pass.iter().zip(shapes.iter()) {
        match (&a.kind, &b.kind) {
            (ShapeKind::Line(x), ShapeKind::Line(y)) => {
                assert_eq!(x.calibrated_distance, y.calibrated_distance);
            }
            (ShapeKind::Circle(x), ShapeKind::Circle(y)) => {
                let (mx, my) = (x.measurement.as_ref().unwrap(), y.measurement.as_ref().unwrap());
                assert_eq!(mx.radius, my.radius);
                assert_eq!(mx.diameter, my.diameter);
                assert_eq!(mx.area, my.area);
            }
            (ShapeKind::Rectangle(x), ShapeKind::Rectangle(y)) => {
                let (mx, my) = (x.measurement.as_ref().unwrap(), y.measurement.as_ref().unwrap());
                assert_eq!(mx.width, my.width);
                assert_eq!(mx.height, my.height);
                assert_eq!(mx.area, my.area);
            }
            _ => panic!("shape kinds diverged"),
        }
    }
}

#[test]
fn test_service_rejects_invalid_ratio() {
    let service = CalibrationService::new();
    assert!(!service.is_calibrated());
    let bad = CalibrationContext::from_ratio(0.0, Unit::Micrometer);
    assert!(matches!(
        service.set_context(bad),
        Err(CalibrationError::InvalidRatio { .. })
    ));
    let nan = CalibrationContext::from_ratio(f64::NAN, Unit::Micrometer);
    assert!(matches!(
        service.set_context(nan),
        Err(CalibrationError::InvalidRatio { .. })
    ));
}

#[test]
fn test_service_recalculate_now() {
    let service = CalibrationService::new();
    service.set_context(half_micron_per_pixel()).unwrap();
    assert!(service.is_calibrated());

    let mut store = ShapeStore::new();
    store.add_shape(
        ShapeKind::Line(LineShape::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0))),
        ShapeStyle::default(),
    );
    let depth = store.undo_depth();
    service.recalculate_now(&mut store);
    match &store.shapes()[0].kind {
        ShapeKind::Line(line) => assert_eq!(line.calibrated_distance, Some(50.0)),
        other => panic!("unexpected kind {:?}", other.shape_type()),
    }
    // Remeasurement is not an edit and records no history entry
    assert_eq!(store.undo_depth(), depth);
}

#[tokio::test]
async fn test_scheduled_recalculate_fires_after_delay() {
    let service = CalibrationService::new();
    service.set_context(half_micron_per_pixel()).unwrap();

    let store = Arc::new(RwLock::new(ShapeStore::new()));
    store.write().add_shape(
        ShapeKind::Line(LineShape::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0))),
        ShapeStyle::default(),
    );
    let drawing = Arc::new(AtomicBool::new(false));

    service.schedule_recalculate(Arc::clone(&store), Arc::clone(&drawing));
    tokio::time::sleep(Duration::from_millis(300)).await;

    match &store.read().shapes()[0].kind {
        ShapeKind::Line(line) => assert_eq!(line.calibrated_distance, Some(50.0)),
        other => panic!("unexpected kind {:?}", other.shape_type()),
    };
}

#[tokio::test]
async fn test_scheduled_recalculate_skipped_while_drawing() {
    let service = CalibrationService::new();
    service.set_context(half_micron_per_pixel()).unwrap();

    let store = Arc::new(RwLock::new(ShapeStore::new()));
    store.write().add_shape(
        ShapeKind::Line(LineShape::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0))),
        ShapeStyle::default(),
    );
    let drawing = Arc::new(AtomicBool::new(true));

    service.schedule_recalculate(Arc::clone(&store), Arc::clone(&drawing));
    tokio::time::sleep(Duration::from_millis(300)).await;

    // The gesture was still open when the debounce fired
    match &store.read().shapes()[0].kind {
        ShapeKind::Line(line) => assert_eq!(line.calibrated_distance, None),
        other => panic!("unexpected kind {:?}", other.shape_type()),
    };
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn measured(shapes: &[Shape]) -> (Option<f64>, Option<(f64, f64, f64)>) {
        let line = match &shapes[0].kind {
            ShapeKind::Line(l) => l.calibrated_distance,
            _ => None,
        };
        let rect = match &shapes[1].kind {
            ShapeKind::Rectangle(r) => r.measurement.map(|m| (m.width, m.height, m.area)),
            _ => None,
        };
        (line, rect)
    }

    proptest! {
        #[test]
        fn recalculation_is_idempotent_for_any_ratio(
            ratio in 1e-4..100.0f64,
            x0 in -200.0..200.0f64, y0 in -200.0..200.0f64,
            x1 in -200.0..200.0f64, y1 in -200.0..200.0f64,
        ) {
            let context = CalibrationContext::from_ratio(ratio, Unit::Micrometer);
            let mut shapes = vec![
                shape(
                    1,
                    ShapeKind::Line(LineShape::new(Point::new(x0, y0), Point::new(x1, y1))),
                ),
                shape(
                    2,
                    ShapeKind::Rectangle(RectShape::new(Point::new(x0, y0), Point::new(x1, y1))),
                ),
            ];

            recalculate(&mut shapes, &context);
            let first = measured(&shapes);
            recalculate(&mut shapes, &context);
            prop_assert_eq!(measured(&shapes), first);
        }
    }
}
