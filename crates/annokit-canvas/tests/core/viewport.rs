use annokit_canvas::viewport::{MAX_ZOOM, MIN_ZOOM};
use annokit_canvas::{Point, ViewportTransform};

#[test]
fn test_identity_transform() {
    let vp = ViewportTransform::new(1000.0, 800.0);
    let p = vp.pixel_to_world(Point::new(123.0, 456.0));
    assert_eq!(p.x, 123.0);
    assert_eq!(p.y, 456.0);
}

#[test]
fn test_round_trip_with_zoom_and_pan() {
    let mut vp = ViewportTransform::new(1000.0, 800.0);
    vp.set_zoom(2.0);
    vp.pan_by(30.0, -40.0);
    let world = Point::new(57.5, 19.25);
    let screen = vp.world_to_pixel(world);
    let back = vp.pixel_to_world(screen);
    assert!((back.x - world.x).abs() < 1e-9);
    assert!((back.y - world.y).abs() < 1e-9);
}

#[test]
fn test_pixel_to_world_accounts_for_pan_then_zoom() {
    let mut vp = ViewportTransform::new(1000.0, 800.0);
    vp.set_zoom(2.0);
    vp.pan_by(100.0, 50.0);
    let world = vp.pixel_to_world(Point::new(300.0, 250.0));
    assert_eq!(world.x, 100.0);
    assert_eq!(world.y, 100.0);
}

#[test]
fn test_zoom_clamps_to_range() {
    let mut vp = ViewportTransform::new(1000.0, 800.0);
    vp.set_zoom(0.01);
    assert_eq!(vp.zoom(), MIN_ZOOM);
    vp.set_zoom(50.0);
    assert_eq!(vp.zoom(), MAX_ZOOM);
}

#[test]
fn test_zoom_at_keeps_cursor_point_fixed() {
    let mut vp = ViewportTransform::new(1000.0, 800.0);
    vp.set_zoom(1.5);
    vp.pan_by(20.0, 10.0);
    let cursor = Point::new(400.0, 300.0);
    let anchor_before = vp.pixel_to_world(cursor);
    vp.zoom_in_at(cursor);
    let anchor_after = vp.pixel_to_world(cursor);
    assert!((anchor_before.x - anchor_after.x).abs() < 1e-9);
    assert!((anchor_before.y - anchor_after.y).abs() < 1e-9);
    assert!(vp.zoom() > 1.5);
}

#[test]
fn test_zoom_out_then_in_restores_zoom_level() {
    let mut vp = ViewportTransform::new(1000.0, 800.0);
    let cursor = Point::new(500.0, 400.0);
    vp.zoom_out_at(cursor);
    assert!(vp.zoom() < 1.0);
    vp.reset();
    assert_eq!(vp.zoom(), 1.0);
    assert_eq!(vp.pan(), (0.0, 0.0));
}

#[test]
fn test_fit_to_window_centers_image() {
    let mut vp = ViewportTransform::new(1000.0, 1000.0);
    vp.fit_to_window(2000.0, 1000.0);
    assert_eq!(vp.zoom(), 0.5);
    let (pan_x, pan_y) = vp.pan();
    assert_eq!(pan_x, 0.0);
    assert_eq!(pan_y, 250.0);
}

#[test]
fn test_fit_to_window_small_image_is_magnified() {
    let mut vp = ViewportTransform::new(1000.0, 1000.0);
    vp.fit_to_window(250.0, 100.0);
    // The smaller axis ratio (width, 4x) wins
    assert_eq!(vp.zoom(), 4.0);

    vp.fit_to_window(150.0, 100.0);
    // Both ratios exceed the ceiling and clamp to it
    assert_eq!(vp.zoom(), MAX_ZOOM);
}

#[test]
fn test_fit_to_window_ignores_zero_dimensions() {
    let mut vp = ViewportTransform::new(1000.0, 1000.0);
    vp.set_zoom(2.0);
    vp.pan_by(10.0, 10.0);
    let before = vp.clone();
    vp.fit_to_window(0.0, 500.0);
    assert_eq!(vp, before);
}

#[test]
fn test_display_shows_percent_and_pan() {
    let mut vp = ViewportTransform::new(1000.0, 800.0);
    vp.set_zoom(2.0);
    vp.pan_by(15.0, 25.0);
    assert_eq!(vp.to_string(), "200% at (15, 25)");
}
