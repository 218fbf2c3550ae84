//! Annotation layer renderer
//!
//! Draws the committed shapes, the in-progress draft, the calibration
//! overlay, and the eraser cursor into a transparent RGBA pixmap at
//! canvas resolution, using tiny-skia for the geometry and rusttype for
//! labels. The pixmap is composited over the loaded micrograph with
//! [`composite_over`]; zooming and panning happen at display time, not
//! here, so the layer stays aligned with image pixels.
//!
//! Rendering is immediate-mode: every frame redraws everything from the
//! current state, so a redraw is always safe to repeat.

use image::RgbaImage;
use rusttype::{point as rt_point, Scale};
use tiny_skia::{Color, FillRule, Paint, Path, PathBuilder, Pixmap, Stroke, StrokeDash, Transform};

use annokit_core::units::{format_area, format_length, Unit};

use crate::calibration::CalibrationCapture;
use crate::font_manager;
use crate::geometry;
use crate::model::{
    ArcShape, CanvasShape, CircleShape, ClosedCurveShape, Point, Shape, ShapeKind, ShapeStyle,
};

/// Font size for measurement labels
const LABEL_SIZE: f32 = 12.0;
/// Font size for text shapes
const TEXT_SIZE: f32 = 14.0;
/// Font size for calibration coordinate captions
const CAPTION_SIZE: f32 = 10.0;

/// Dot radius for point markers and control points
const POINT_RADIUS: f32 = 5.0;
/// Length of the perpendicular caps on measured lines
const END_CAP_LENGTH: f64 = 10.0;
/// Arrow head segment length and half-angle
const ARROW_HEAD_LENGTH: f64 = 20.0;
const ARROW_HEAD_ANGLE: f64 = std::f64::consts::PI / 6.0;
/// Radius of the angle tool's indicator arc at the vertex
const ANGLE_INDICATOR_RADIUS: f64 = 30.0;

fn selection_color() -> Color {
    Color::from_rgba8(0, 255, 255, 255)
}

fn calibration_guide_color() -> Color {
    Color::from_rgba8(24, 144, 255, 255)
}

fn calibration_point_color() -> Color {
    Color::from_rgba8(255, 77, 79, 255)
}

fn calibration_preview_color() -> Color {
    Color::from_rgba8(82, 196, 26, 179)
}

fn eraser_stroke_color() -> Color {
    Color::from_rgba8(255, 0, 0, 128)
}

fn eraser_fill_color() -> Color {
    Color::from_rgba8(255, 255, 255, 77)
}

/// Everything one frame needs, borrowed from the display container
#[derive(Debug)]
pub struct FrameInput<'a> {
    pub shapes: &'a [Shape],
    pub selected: Option<u64>,
    /// Draft preview (clicked points plus the live cursor) and its style
    pub draft: Option<ShapeKind>,
    pub draft_style: ShapeStyle,
    /// Eraser cursor position and radius, when the eraser is armed
    pub eraser: Option<(Point, f64)>,
    /// Active calibration capture, when point picking is in progress
    pub capture: Option<&'a CalibrationCapture>,
    /// Unit shown on measurement labels
    pub unit: Unit,
    pub width: u32,
    pub height: u32,
}

/// Render the annotation layer; `None` for a zero-sized canvas
pub fn render(frame: &FrameInput) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(frame.width, frame.height)?;

    if let Some(capture) = frame.capture {
        draw_calibration_overlay(&mut pixmap, capture);
    }

    for shape in frame.shapes {
        let selected = frame.selected == Some(shape.id);
        if selected {
            let mut highlight = shape.style.clone();
            highlight.thickness += 2.0;
            draw_kind_geometry(&mut pixmap, &shape.kind, selection_color(), &highlight);
        }
        let color = parse_color(&shape.style.color);
        draw_kind_geometry(&mut pixmap, &shape.kind, color, &shape.style);
        draw_kind_labels(&mut pixmap, &shape.kind, &shape.style, frame.unit);
    }

    if let Some(draft) = &frame.draft {
        let color = parse_color(&frame.draft_style.color);
        draw_kind_geometry(&mut pixmap, draft, color, &frame.draft_style);
        draw_kind_labels(&mut pixmap, draft, &frame.draft_style, frame.unit);
    }

    if let Some((cursor, radius)) = frame.eraser {
        draw_eraser_cursor(&mut pixmap, cursor, radius);
    }

    Some(pixmap)
}

/// Flatten the annotation layer onto the micrograph
pub fn composite_over(base: &RgbaImage, overlay: &Pixmap) -> RgbaImage {
    let mut out = base.clone();
    let data = overlay.data();
    let ow = overlay.width();
    let oh = overlay.height();

    for (x, y, pixel) in out.enumerate_pixels_mut() {
        if x >= ow || y >= oh {
            continue;
        }
        let idx = ((y * ow + x) * 4) as usize;
        let sa = data[idx + 3] as u16;
        if sa == 0 {
            continue;
        }
        let inv = 255 - sa;
        // Overlay data is premultiplied; source-over per channel
        pixel[0] = (data[idx] as u16 + pixel[0] as u16 * inv / 255) as u8;
        pixel[1] = (data[idx + 1] as u16 + pixel[1] as u16 * inv / 255) as u8;
        pixel[2] = (data[idx + 2] as u16 + pixel[2] as u16 * inv / 255) as u8;
        pixel[3] = (sa + pixel[3] as u16 * inv / 255) as u8;
    }
    out
}

fn draw_kind_geometry(pixmap: &mut Pixmap, kind: &ShapeKind, color: Color, style: &ShapeStyle) {
    let thickness = style.thickness;
    match kind {
        ShapeKind::Point(marker) => {
            fill_dot(pixmap, marker.position, POINT_RADIUS, color);
        }
        ShapeKind::Line(line) => {
            stroke_segment(pixmap, line.start, line.end, color, thickness);
            for cap in end_cap(line.start, line.end) {
                stroke_segment(pixmap, cap.0, cap.1, color, thickness);
            }
        }
        ShapeKind::Arrow(arrow) => {
            stroke_segment(pixmap, arrow.start, arrow.end, color, thickness);
            for wing in arrow_head(arrow.start, arrow.end) {
                stroke_segment(pixmap, wing.0, wing.1, color, thickness);
            }
        }
        ShapeKind::Rectangle(rect) => {
            let corners = rect.corners();
            let mut pb = PathBuilder::new();
            pb.move_to(corners[0].x as f32, corners[0].y as f32);
            for corner in &corners[1..] {
                pb.line_to(corner.x as f32, corner.y as f32);
            }
            pb.close();
            if let Some(path) = pb.finish() {
                stroke_path(pixmap, &path, color, thickness);
            }
        }
        ShapeKind::Circle(circle) => draw_circle_geometry(pixmap, circle, color, thickness),
        ShapeKind::Curve(curve) => {
            if let Some(path) = smooth_path(&curve.points, false) {
                stroke_path(pixmap, &path, color, thickness);
            }
        }
        ShapeKind::ClosedCurve(closed) => draw_closed_curve_geometry(pixmap, closed, color, thickness),
        ShapeKind::Arc(arc) => draw_arc_geometry(pixmap, arc, color, thickness),
        ShapeKind::Angle(angle) => {
            for w in angle.points.windows(2) {
                stroke_segment(pixmap, w[0], w[1], color, thickness);
            }
            if angle.points.len() == 3 {
                let vertex = angle.points[1];
                let (start, end) =
                    geometry::arc_angles(vertex, angle.points[0], angle.points[2]);
                // Indicator sweeps the included angle, not the reflex side
                let (start, end) = if end - start > std::f64::consts::PI {
                    (end - std::f64::consts::TAU, start)
                } else {
                    (start, end)
                };
                if let Some(path) = arc_path(vertex, ANGLE_INDICATOR_RADIUS, start, end) {
                    stroke_path(pixmap, &path, color, 1.0);
                }
            }
        }
        // Text has no geometry pass; the content is its rendering
        ShapeKind::Text(_) => {}
    }
}

fn draw_kind_labels(pixmap: &mut Pixmap, kind: &ShapeKind, style: &ShapeStyle, unit: Unit) {
    let font_color = parse_color(&style.font_color);
    match kind {
        ShapeKind::Point(marker) => {
            draw_text(
                pixmap,
                &marker.label,
                (marker.position.x + 8.0) as f32,
                (marker.position.y - 8.0) as f32,
                LABEL_SIZE,
                font_color,
                false,
            );
        }
        ShapeKind::Line(line) => {
            let value = line.calibrated_distance.unwrap_or_else(|| line.pixel_length());
            let mid = line.midpoint();
            draw_text_centered(
                pixmap,
                &format_length(value, unit),
                mid.x as f32,
                (mid.y - 14.0) as f32,
                LABEL_SIZE,
                font_color,
            );
        }
        ShapeKind::Arrow(_) => {}
        ShapeKind::Rectangle(rect) => {
            let (w, h, area) = match &rect.measurement {
                Some(m) => (m.width, m.height, m.area),
                None => {
                    let w = rect.pixel_width();
                    let h = rect.pixel_height();
                    (w, h, w * h)
                }
            };
            let (min_x, min_y, max_x, max_y) = rect.bounds();
            let cx = ((min_x + max_x) / 2.0) as f32;
            draw_text_centered(
                pixmap,
                &format!("{} × {} {}", w.round(), h.round(), unit),
                cx,
                (min_y - 16.0) as f32,
                LABEL_SIZE,
                font_color,
            );
            draw_text_centered(
                pixmap,
                &format!("Area: {}", format_area(area, unit)),
                cx,
                (max_y + 4.0) as f32,
                LABEL_SIZE,
                font_color,
            );
        }
        ShapeKind::Circle(circle) => {
            if let Some((center, radius_px)) = circle.fit() {
                let (radius, area) = match &circle.measurement {
                    Some(m) => (m.radius, m.area),
                    None => (radius_px, std::f64::consts::PI * radius_px * radius_px),
                };
                draw_text_centered(
                    pixmap,
                    &format!("R: {}", format_length(radius, unit)),
                    center.x as f32,
                    (center.y - 14.0) as f32,
                    LABEL_SIZE,
                    font_color,
                );
                draw_text_centered(
                    pixmap,
                    &format!("Area: {}", format_area(area, unit)),
                    center.x as f32,
                    (center.y + 2.0) as f32,
                    LABEL_SIZE,
                    font_color,
                );
            }
        }
        ShapeKind::Curve(curve) => {
            if curve.points.len() >= 2 {
                let value = curve.calibrated_length.unwrap_or_else(|| curve.pixel_length());
                if let Some(last) = curve.points.last() {
                    draw_text(
                        pixmap,
                        &format_length(value, unit),
                        (last.x + 8.0) as f32,
                        (last.y - 8.0) as f32,
                        LABEL_SIZE,
                        font_color,
                        false,
                    );
                }
            }
        }
        ShapeKind::ClosedCurve(closed) => {
            if closed.points.len() > 2 {
                let value = closed.calibrated_area.unwrap_or_else(|| closed.pixel_area());
                let (min_x, min_y, max_x, max_y) = closed.bounds();
                draw_text_centered(
                    pixmap,
                    &format!("Area: {}", format_area(value, unit)),
                    ((min_x + max_x) / 2.0) as f32,
                    ((min_y + max_y) / 2.0) as f32,
                    LABEL_SIZE,
                    font_color,
                );
            }
        }
        ShapeKind::Arc(arc) => {
            if let (Some((center, radius_px)), Some(span), Some((start, end))) =
                (arc.fit(), arc.span(), arc.angles())
            {
                let (radius, length, degrees) = match &arc.measurement {
                    Some(m) => (m.radius, m.arc_length, m.angle_degrees),
                    None => (
                        radius_px,
                        span * radius_px,
                        geometry::round_to_decimals(span.to_degrees(), 1),
                    ),
                };
                let mid_angle = (start + end) / 2.0;
                let lx = (center.x + mid_angle.cos() * radius_px * 0.7) as f32;
                let ly = (center.y + mid_angle.sin() * radius_px * 0.7) as f32;
                draw_text(
                    pixmap,
                    &format!("R: {}", format_length(radius, unit)),
                    lx,
                    ly - 16.0,
                    LABEL_SIZE,
                    font_color,
                    false,
                );
                draw_text(
                    pixmap,
                    &format!("L: {}", format_length(length, unit)),
                    lx,
                    ly,
                    LABEL_SIZE,
                    font_color,
                    false,
                );
                draw_text(
                    pixmap,
                    &format!("A: {degrees:.1}°"),
                    lx,
                    ly + 16.0,
                    LABEL_SIZE,
                    font_color,
                    false,
                );
            }
        }
        ShapeKind::Angle(angle) => {
            for (i, p) in angle.points.iter().enumerate() {
                draw_text(
                    pixmap,
                    &format!("P{}", i + 1),
                    (p.x + 6.0) as f32,
                    (p.y - 14.0) as f32,
                    LABEL_SIZE,
                    font_color,
                    false,
                );
            }
            if let Some(degrees) = angle.angle_degrees() {
                let vertex = angle.points[1];
                let (start, end) = geometry::arc_angles(vertex, angle.points[0], angle.points[2]);
                let mid = if end - start > std::f64::consts::PI {
                    (start + end) / 2.0 + std::f64::consts::PI
                } else {
                    (start + end) / 2.0
                };
                draw_text(
                    pixmap,
                    &format!("{degrees:.1}°"),
                    (vertex.x + mid.cos() * (ANGLE_INDICATOR_RADIUS + 8.0)) as f32,
                    (vertex.y + mid.sin() * (ANGLE_INDICATOR_RADIUS + 8.0)) as f32,
                    LABEL_SIZE,
                    font_color,
                    false,
                );
            }
        }
        ShapeKind::Text(text) => {
            draw_text(
                pixmap,
                &text.content,
                text.position.x as f32,
                text.position.y as f32,
                TEXT_SIZE,
                font_color,
                false,
            );
        }
    }
}

fn draw_circle_geometry(pixmap: &mut Pixmap, circle: &CircleShape, color: Color, thickness: f32) {
    match (circle.points.len(), circle.fit()) {
        (3.., Some((center, radius))) => {
            if let Some(path) =
                PathBuilder::from_circle(center.x as f32, center.y as f32, radius as f32)
            {
                stroke_path(pixmap, &path, color, thickness);
            }
        }
        // Two points: preview the chord while the third is picked
        (2, _) => stroke_segment(pixmap, circle.points[0], circle.points[1], color, thickness),
        _ => {}
    }
    for p in &circle.points {
        fill_dot(pixmap, *p, 3.0, color);
    }
}

fn draw_closed_curve_geometry(
    pixmap: &mut Pixmap,
    closed: &ClosedCurveShape,
    color: Color,
    thickness: f32,
) {
    let Some(path) = smooth_path(&closed.points, true) else {
        return;
    };
    if closed.points.len() > 2 {
        let mut fill = color;
        fill.set_alpha(0.2);
        let mut paint = Paint::default();
        paint.set_color(fill);
        paint.anti_alias = true;
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }
    stroke_path(pixmap, &path, color, thickness);
}

fn draw_arc_geometry(pixmap: &mut Pixmap, arc: &ArcShape, color: Color, thickness: f32) {
    if let (Some((center, radius)), Some((start, end))) = (arc.fit(), arc.angles()) {
        if let Some(path) = arc_path(center, radius, start, end) {
            stroke_path(pixmap, &path, color, thickness);
        }
    } else if arc.points.len() == 2 {
        stroke_segment(pixmap, arc.points[0], arc.points[1], color, thickness);
    }
    for p in &arc.points {
        fill_dot(pixmap, *p, 3.0, color);
    }
}

fn draw_eraser_cursor(pixmap: &mut Pixmap, cursor: Point, radius: f64) {
    let Some(path) = PathBuilder::from_circle(cursor.x as f32, cursor.y as f32, radius as f32)
    else {
        return;
    };
    let mut paint = Paint::default();
    paint.set_color(eraser_fill_color());
    paint.anti_alias = true;
    pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    stroke_path(pixmap, &path, eraser_stroke_color(), 1.5);
}

fn draw_calibration_overlay(pixmap: &mut Pixmap, capture: &CalibrationCapture) {
    let Some(guide_y) = capture.guide_y() else {
        return;
    };

    // Dashed guide across the full canvas width
    let mut pb = PathBuilder::new();
    pb.move_to(0.0, guide_y as f32);
    pb.line_to(pixmap.width() as f32, guide_y as f32);
    if let Some(path) = pb.finish() {
        let mut paint = Paint::default();
        paint.set_color(calibration_guide_color());
        paint.anti_alias = true;
        let mut stroke = Stroke {
            width: 1.0,
            ..Default::default()
        };
        stroke.dash = StrokeDash::new(vec![5.0, 5.0], 0.0);
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    let second = capture.second().or(capture.preview());
    if let (Some(first), Some(other)) = (capture.first(), second) {
        stroke_segment(pixmap, first, other, calibration_guide_color(), 1.0);
        let dx = (other.x - first.x).abs();
        draw_text_centered(
            pixmap,
            &format!("{dx:.1} px"),
            ((first.x + other.x) / 2.0) as f32,
            (guide_y - 22.0) as f32,
            LABEL_SIZE,
            calibration_guide_color(),
        );
    }

    for (index, p) in [capture.first(), capture.second()].into_iter().flatten().enumerate() {
        fill_dot(pixmap, p, 8.0, calibration_point_color());
        draw_text(
            pixmap,
            &format!("P{}", index + 1),
            (p.x + 10.0) as f32,
            (p.y - 20.0) as f32,
            LABEL_SIZE,
            calibration_point_color(),
            true,
        );
        draw_text(
            pixmap,
            &format!("({:.0}, {:.0})", p.x, p.y),
            (p.x + 10.0) as f32,
            (p.y + 6.0) as f32,
            CAPTION_SIZE,
            calibration_point_color(),
            false,
        );
    }

    if capture.second().is_none() {
        if let Some(preview) = capture.preview() {
            fill_dot(pixmap, preview, 6.0, calibration_preview_color());
        }
    }
}

fn stroke_segment(pixmap: &mut Pixmap, a: Point, b: Point, color: Color, thickness: f32) {
    let mut pb = PathBuilder::new();
    pb.move_to(a.x as f32, a.y as f32);
    pb.line_to(b.x as f32, b.y as f32);
    if let Some(path) = pb.finish() {
        stroke_path(pixmap, &path, color, thickness);
    }
}

fn stroke_path(pixmap: &mut Pixmap, path: &Path, color: Color, thickness: f32) {
    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;
    let stroke = Stroke {
        width: thickness.max(0.5),
        ..Default::default()
    };
    pixmap.stroke_path(path, &paint, &stroke, Transform::identity(), None);
}

fn fill_dot(pixmap: &mut Pixmap, center: Point, radius: f32, color: Color) {
    if let Some(path) = PathBuilder::from_circle(center.x as f32, center.y as f32, radius) {
        let mut paint = Paint::default();
        paint.set_color(color);
        paint.anti_alias = true;
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }
}

/// Perpendicular caps at both ends of a measured line
fn end_cap(start: Point, end: Point) -> [(Point, Point); 2] {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let len = (dx * dx + dy * dy).sqrt();
    if len == 0.0 {
        return [(start, start), (end, end)];
    }
    let half = END_CAP_LENGTH / 2.0;
    let nx = -dy / len * half;
    let ny = dx / len * half;
    [
        (
            Point::new(start.x + nx, start.y + ny),
            Point::new(start.x - nx, start.y - ny),
        ),
        (
            Point::new(end.x + nx, end.y + ny),
            Point::new(end.x - nx, end.y - ny),
        ),
    ]
}

/// The two head segments of an arrow, swept back from the tip
fn arrow_head(start: Point, end: Point) -> [(Point, Point); 2] {
    let angle = (end.y - start.y).atan2(end.x - start.x);
    let left = angle + std::f64::consts::PI - ARROW_HEAD_ANGLE;
    let right = angle + std::f64::consts::PI + ARROW_HEAD_ANGLE;
    [
        (
            end,
            Point::new(
                end.x + left.cos() * ARROW_HEAD_LENGTH,
                end.y + left.sin() * ARROW_HEAD_LENGTH,
            ),
        ),
        (
            end,
            Point::new(
                end.x + right.cos() * ARROW_HEAD_LENGTH,
                end.y + right.sin() * ARROW_HEAD_LENGTH,
            ),
        ),
    ]
}

/// Polyline smoothed with quadratics through segment midpoints
fn smooth_path(points: &[Point], close: bool) -> Option<Path> {
    let mut pb = PathBuilder::new();
    match points.len() {
        0 | 1 => return None,
        2 => {
            pb.move_to(points[0].x as f32, points[0].y as f32);
            pb.line_to(points[1].x as f32, points[1].y as f32);
        }
        _ => {
            pb.move_to(points[0].x as f32, points[0].y as f32);
            for i in 1..points.len() - 1 {
                let mid_x = (points[i].x + points[i + 1].x) / 2.0;
                let mid_y = (points[i].y + points[i + 1].y) / 2.0;
                pb.quad_to(
                    points[i].x as f32,
                    points[i].y as f32,
                    mid_x as f32,
                    mid_y as f32,
                );
            }
            let last = points[points.len() - 1];
            pb.line_to(last.x as f32, last.y as f32);
        }
    }
    if close {
        pb.close();
    }
    pb.finish()
}

/// CCW arc approximated with short segments
fn arc_path(center: Point, radius: f64, start: f64, end: f64) -> Option<Path> {
    let span = end - start;
    if span == 0.0 || radius <= 0.0 {
        return None;
    }
    let steps = ((span.abs() / 0.05).ceil() as usize).max(2);
    let mut pb = PathBuilder::new();
    for i in 0..=steps {
        let theta = start + span * (i as f64 / steps as f64);
        let x = (center.x + theta.cos() * radius) as f32;
        let y = (center.y + theta.sin() * radius) as f32;
        if i == 0 {
            pb.move_to(x, y);
        } else {
            pb.line_to(x, y);
        }
    }
    pb.finish()
}

fn draw_text_centered(
    pixmap: &mut Pixmap,
    text: &str,
    cx: f32,
    y: f32,
    size: f32,
    color: Color,
) {
    let Some(font) = font_manager::label_font(false) else {
        return;
    };
    let width = text_width(font, text, size);
    draw_text(pixmap, text, cx - width / 2.0, y, size, color, false);
}

fn draw_text(
    pixmap: &mut Pixmap,
    text: &str,
    x: f32,
    y: f32,
    size: f32,
    color: Color,
    bold: bool,
) {
    let Some(font) = font_manager::label_font(bold) else {
        return;
    };
    let scale = Scale::uniform(size);
    let v_metrics = font.v_metrics(scale);
    let start = rt_point(x, y + v_metrics.ascent);

    let width = pixmap.width();
    let height = pixmap.height();
    let r = (color.red() * 255.0) as u32;
    let g = (color.green() * 255.0) as u32;
    let b = (color.blue() * 255.0) as u32;
    let base_alpha = color.alpha();
    let data = pixmap.data_mut();

    for glyph in font.layout(text, scale, start) {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, v| {
                let px = gx as i32 + bb.min.x;
                let py = gy as i32 + bb.min.y;
                if px < 0 || px >= width as i32 || py < 0 || py >= height as i32 {
                    return;
                }
                let a = ((v * base_alpha).clamp(0.0, 1.0) * 255.0) as u32;
                if a == 0 {
                    return;
                }
                let inv = 255 - a;
                let idx = ((py as u32 * width + px as u32) * 4) as usize;
                // Premultiplied source over the existing layer
                data[idx] = ((r * a + data[idx] as u32 * inv) / 255) as u8;
                data[idx + 1] = ((g * a + data[idx + 1] as u32 * inv) / 255) as u8;
                data[idx + 2] = ((b * a + data[idx + 2] as u32 * inv) / 255) as u8;
                data[idx + 3] = (a + data[idx + 3] as u32 * inv / 255) as u8;
            });
        }
    }
}

fn text_width(font: &rusttype::Font<'_>, text: &str, size: f32) -> f32 {
    let scale = Scale::uniform(size);
    font.layout(text, scale, rt_point(0.0, 0.0))
        .last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
}

/// Parse `#rgb` or `#rrggbb`; anything else renders white
fn parse_color(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');
    let (r, g, b) = match hex.len() {
        3 => {
            let parse = |c: u8| {
                let d = (c as char).to_digit(16).unwrap_or(15) as u8;
                d * 16 + d
            };
            let bytes = hex.as_bytes();
            (parse(bytes[0]), parse(bytes[1]), parse(bytes[2]))
        }
        6 => (
            u8::from_str_radix(&hex[0..2], 16).unwrap_or(255),
            u8::from_str_radix(&hex[2..4], 16).unwrap_or(255),
            u8::from_str_radix(&hex[4..6], 16).unwrap_or(255),
        ),
        _ => (255, 255, 255),
    };
    Color::from_rgba8(r, g, b, 255)
}
