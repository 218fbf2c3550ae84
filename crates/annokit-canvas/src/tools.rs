//! Tool state machine
//!
//! One controller dispatches every pointer event by matching on the
//! armed tool and the gesture in progress. Shapes under construction
//! live in the controller's draft, never in the store; they enter the
//! store (and history) only when their tool's finish trigger fires.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use annokit_core::event_bus::{event_bus, AppEvent, ShapeEvent, ToolEvent};

use crate::geometry;
use crate::model::{
    AngleShape, ArcShape, ArrowShape, CircleShape, ClosedCurveShape, CurveShape, LineShape, Point,
    PointMarker, RectShape, Shape, ShapeKind, ShapeStyle, TextShape,
};
use crate::store::{ShapeStore, DEFAULT_HIT_THRESHOLD};

/// Default eraser radius in canvas pixels
pub const DEFAULT_ERASER_RADIUS: f64 = 15.0;

/// Minimum interval between erase samples during a stroke
const ERASE_SAMPLE_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tool {
    Pointer,
    Point,
    Line,
    Rectangle,
    Circle,
    Curve,
    ClosedCurve,
    Arc,
    Angle,
    Arrow,
    TextBox,
    Eraser,
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tool::Pointer => write!(f, "pointer"),
            Tool::Point => write!(f, "point"),
            Tool::Line => write!(f, "line"),
            Tool::Rectangle => write!(f, "rectangle"),
            Tool::Circle => write!(f, "circle"),
            Tool::Curve => write!(f, "curve"),
            Tool::ClosedCurve => write!(f, "closedCurve"),
            Tool::Arc => write!(f, "arc"),
            Tool::Angle => write!(f, "angle"),
            Tool::Arrow => write!(f, "arrow"),
            Tool::TextBox => write!(f, "textbox"),
            Tool::Eraser => write!(f, "eraser"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Right,
}

/// An in-flight move gesture
#[derive(Debug, Clone)]
struct MoveState {
    id: u64,
    /// Pointer position at the previous event; deltas are taken against
    /// this and it is replaced each move, so repeated small deltas never
    /// accumulate drift.
    last: Point,
    moved: bool,
}

/// Dispatches pointer events for the armed tool
#[derive(Debug)]
pub struct ToolController {
    tool: Tool,
    style: ShapeStyle,
    eraser_radius: f64,
    hit_threshold: f64,
    draft: Option<ShapeKind>,
    moving: Option<MoveState>,
    pending_text: Option<Point>,
    erasing: bool,
    last_erase: Option<Instant>,
    cursor: Option<Point>,
}

impl ToolController {
    pub fn new() -> Self {
        Self {
            tool: Tool::Pointer,
            style: ShapeStyle::default(),
            eraser_radius: DEFAULT_ERASER_RADIUS,
            hit_threshold: DEFAULT_HIT_THRESHOLD,
            draft: None,
            moving: None,
            pending_text: None,
            erasing: false,
            last_erase: None,
            cursor: None,
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Arm a tool, abandoning any gesture in progress
    pub fn set_tool(&mut self, tool: Tool) {
        if tool == self.tool {
            return;
        }
        self.cancel();
        self.tool = tool;
        tracing::debug!(%tool, "tool armed");
        event_bus()
            .publish(AppEvent::Tool(ToolEvent::Activated {
                tool: tool.to_string(),
            }))
            .ok();
    }

    pub fn style(&self) -> &ShapeStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: ShapeStyle) {
        self.style = style;
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.style.color = color.into();
    }

    pub fn set_font_color(&mut self, color: impl Into<String>) {
        self.style.font_color = color.into();
    }

    pub fn set_thickness(&mut self, thickness: f32) {
        self.style.thickness = thickness;
    }

    pub fn eraser_radius(&self) -> f64 {
        self.eraser_radius
    }

    pub fn set_eraser_radius(&mut self, radius: f64) {
        self.eraser_radius = radius;
    }

    pub fn hit_threshold(&self) -> f64 {
        self.hit_threshold
    }

    pub fn set_hit_threshold(&mut self, threshold: f64) {
        self.hit_threshold = threshold;
    }

    /// Clicked points of the shape under construction
    pub fn draft(&self) -> Option<&ShapeKind> {
        self.draft.as_ref()
    }

    /// Where a text entry is pending, if one is
    pub fn pending_text(&self) -> Option<Point> {
        self.pending_text
    }

    /// Latest pointer position seen by the controller
    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    pub fn is_erasing(&self) -> bool {
        self.erasing
    }

    /// True while a draft, multi-point collection, or erase stroke is open
    ///
    /// The calibration service skips remeasurement while this holds.
    pub fn is_drawing(&self) -> bool {
        self.draft.is_some() || self.erasing
    }

    /// Abandon any gesture in progress without committing
    pub fn cancel(&mut self) {
        self.draft = None;
        self.moving = None;
        self.pending_text = None;
        self.erasing = false;
        self.last_erase = None;
    }

    pub fn pointer_down(&mut self, store: &mut ShapeStore, p: Point, button: PointerButton) {
        self.cursor = Some(p);
        match button {
            PointerButton::Left => self.left_down(store, p),
            // Right-click finishes multi-point tools, same as double-click
            PointerButton::Right => self.finalize_collection(store),
        }
    }

    pub fn pointer_move(&mut self, store: &mut ShapeStore, p: Point) {
        self.cursor = Some(p);

        if let Some(mv) = &mut self.moving {
            let dx = p.x - mv.last.x;
            let dy = p.y - mv.last.y;
            if let Some(shape) = store.shape_mut(mv.id) {
                shape.translate(dx, dy);
            }
            mv.last = p;
            mv.moved = true;
            return;
        }

        if self.erasing {
            let due = self
                .last_erase
                .is_none_or(|t| t.elapsed() >= ERASE_SAMPLE_INTERVAL);
            if due {
                self.erase_at(store, p);
                self.last_erase = Some(Instant::now());
            }
            return;
        }

        // Drag tools track the cursor in their end point
        match &mut self.draft {
            Some(ShapeKind::Line(line)) => line.end = p,
            Some(ShapeKind::Arrow(arrow)) => arrow.end = p,
            Some(ShapeKind::Rectangle(rect)) => rect.end = p,
            _ => {}
        }
    }

    pub fn pointer_up(&mut self, store: &mut ShapeStore, p: Point) {
        self.cursor = Some(p);

        if let Some(mv) = self.moving.take() {
            if mv.moved {
                store.commit_current();
                self.publish_updated(store);
            }
            return;
        }

        if self.erasing {
            self.erasing = false;
            self.last_erase = None;
            return;
        }

        // Drag tools finish on release
        match self.tool {
            Tool::Line | Tool::Rectangle | Tool::Arrow => {
                if let Some(kind) = self.draft.take() {
                    self.commit_shape(store, kind);
                }
            }
            _ => {}
        }
    }

    /// Finish trigger for the multi-point tools
    pub fn double_click(&mut self, store: &mut ShapeStore, p: Point) {
        self.cursor = Some(p);
        self.finalize_collection(store);
    }

    /// Right-click finish, identical to double-click
    pub fn context_menu(&mut self, store: &mut ShapeStore, p: Point) {
        self.cursor = Some(p);
        self.finalize_collection(store);
    }

    /// Complete a pending text entry
    ///
    /// Empty content cancels the entry. Returns the new shape's id when
    /// one was created.
    pub fn submit_text(&mut self, store: &mut ShapeStore, content: &str) -> Option<u64> {
        let position = self.pending_text.take()?;
        if content.is_empty() {
            return None;
        }
        let id = self.commit_shape(store, ShapeKind::Text(TextShape::new(position, content)));
        Some(id)
    }

    /// Remove every shape within the eraser radius of `p`
    ///
    /// Commits one history entry when anything was removed; erasing over
    /// empty canvas leaves the history untouched.
    pub fn erase_at(&mut self, store: &mut ShapeStore, p: Point) -> usize {
        let radius = self.eraser_radius;
        let survivors: Vec<Shape> = store
            .shapes()
            .iter()
            .filter(|s| !s.contains_point(p, radius))
            .cloned()
            .collect();
        let removed = store.len() - survivors.len();
        if removed > 0 {
            store.commit(survivors);
            self.publish_updated(store);
        }
        removed
    }

    /// Draft plus the live cursor, as the shape the renderer should preview
    pub fn preview_kind(&self) -> Option<ShapeKind> {
        let mut preview = self.draft.clone()?;
        if let Some(cursor) = self.cursor {
            match &mut preview {
                ShapeKind::Circle(c) => {
                    if c.points.len() < 3 {
                        c.points.push(cursor);
                    }
                }
                ShapeKind::Arc(a) => {
                    if a.points.len() < 3 {
                        a.points.push(cursor);
                    }
                }
                ShapeKind::Angle(a) => {
                    if a.points.len() < 3 {
                        a.points.push(cursor);
                    }
                }
                ShapeKind::Curve(c) => c.points.push(cursor),
                ShapeKind::ClosedCurve(c) => c.points.push(cursor),
                _ => {}
            }
        }
        Some(preview)
    }

    fn left_down(&mut self, store: &mut ShapeStore, p: Point) {
        if self.tool == Tool::Eraser {
            self.erasing = true;
            self.erase_at(store, p);
            self.last_erase = Some(Instant::now());
            return;
        }

        // Direct manipulation beats the armed tool: a click on an existing
        // shape selects it and starts a move, unless a gesture is open.
        if self.draft.is_none() && self.pending_text.is_none() {
            if let Some(shape) = store.find_at(p, self.hit_threshold) {
                let id = shape.id;
                store.select(Some(id));
                self.moving = Some(MoveState {
                    id,
                    last: p,
                    moved: false,
                });
                event_bus()
                    .publish(AppEvent::Shapes(ShapeEvent::Selected { id: Some(id) }))
                    .ok();
                return;
            }
        }

        match self.tool {
            Tool::Pointer => {
                if store.selected_id().is_some() {
                    store.select(None);
                    event_bus()
                        .publish(AppEvent::Shapes(ShapeEvent::Selected { id: None }))
                        .ok();
                }
            }
            Tool::Point => {
                let label = store.next_point_label();
                self.commit_shape(store, ShapeKind::Point(PointMarker::new(p, label)));
            }
            Tool::Line => {
                self.draft = Some(ShapeKind::Line(LineShape::new(p, p)));
            }
            Tool::Rectangle => {
                self.draft = Some(ShapeKind::Rectangle(RectShape::new(p, p)));
            }
            Tool::Arrow => {
                self.draft = Some(ShapeKind::Arrow(ArrowShape::new(p, p)));
            }
            Tool::Circle => self.collect_fitted(p, true),
            Tool::Arc => self.collect_fitted(p, false),
            Tool::Angle => {
                match &mut self.draft {
                    Some(ShapeKind::Angle(angle)) => {
                        angle.add_point(p);
                    }
                    _ => self.draft = Some(ShapeKind::Angle(AngleShape::from_points(vec![p]))),
                }
            }
            Tool::Curve => {
                match &mut self.draft {
                    Some(ShapeKind::Curve(curve)) => curve.add_point(p),
                    _ => self.draft = Some(ShapeKind::Curve(CurveShape::from_points(vec![p]))),
                }
            }
            Tool::ClosedCurve => {
                match &mut self.draft {
                    Some(ShapeKind::ClosedCurve(curve)) => curve.add_point(p),
                    _ => {
                        self.draft =
                            Some(ShapeKind::ClosedCurve(ClosedCurveShape::from_points(vec![p])))
                    }
                }
            }
            Tool::TextBox => {
                self.pending_text = Some(p);
            }
            // Handled by the early return
            Tool::Eraser => {}
        }
    }

    /// Append a control point to a circle or arc draft
    ///
    /// A third point collinear with the first two would make the circle
    /// fit degenerate, so it is rejected and the collection stays open.
    fn collect_fitted(&mut self, p: Point, circle: bool) {
        let points = match &self.draft {
            Some(ShapeKind::Circle(c)) => Some(&c.points),
            Some(ShapeKind::Arc(a)) => Some(&a.points),
            _ => None,
        };
        if let Some(points) = points {
            if points.len() == 2
                && geometry::circle_from_three_points(points[0], points[1], p).is_none()
            {
                tracing::debug!("rejected collinear third control point");
                return;
            }
        }
        match &mut self.draft {
            Some(ShapeKind::Circle(c)) => {
                c.add_point(p);
            }
            Some(ShapeKind::Arc(a)) => {
                a.add_point(p);
            }
            _ => {
                self.draft = if circle {
                    Some(ShapeKind::Circle(CircleShape::from_points(vec![p])))
                } else {
                    Some(ShapeKind::Arc(ArcShape::from_points(vec![p])))
                };
            }
        }
    }

    /// Finish an open multi-point collection if it has enough points
    fn finalize_collection(&mut self, store: &mut ShapeStore) {
        let ready = match &self.draft {
            Some(ShapeKind::Circle(c)) => c.points.len() == 3,
            Some(ShapeKind::Arc(a)) => a.points.len() == 3,
            Some(ShapeKind::Angle(a)) => a.points.len() == 3,
            Some(ShapeKind::Curve(c)) => c.points.len() >= 2,
            Some(ShapeKind::ClosedCurve(c)) => c.points.len() > 2,
            _ => false,
        };
        if !ready {
            return;
        }
        if let Some(mut kind) = self.draft.take() {
            if let ShapeKind::ClosedCurve(curve) = &mut kind {
                curve.close();
            }
            self.commit_shape(store, kind);
        }
    }

    fn commit_shape(&mut self, store: &mut ShapeStore, kind: ShapeKind) -> u64 {
        let id = store.add_shape(kind, self.style.clone());
        self.publish_updated(store);
        id
    }

    fn publish_updated(&self, store: &ShapeStore) {
        event_bus()
            .publish(AppEvent::Shapes(ShapeEvent::Updated { count: store.len() }))
            .ok();
    }
}

impl Default for ToolController {
    fn default() -> Self {
        Self::new()
    }
}
