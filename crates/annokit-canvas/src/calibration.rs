//! Scale capture and debounced remeasurement
//!
//! [`CalibrationCapture`] runs the two-click capture gesture: the first
//! click locks a horizontal guide, the second click is snapped onto it,
//! and the known physical length divided by the horizontal pixel span
//! yields the µm-per-pixel ratio. [`CalibrationService`] owns the active
//! [`CalibrationContext`] and re-derives every stored measurement from
//! pixel geometry whenever the context changes, debounced so a burst of
//! edits costs one pass.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;

use annokit_core::calibration::CalibrationContext;
use annokit_core::error::CalibrationError;
use annokit_core::event_bus::{event_bus, AppEvent, CalibrationEvent, ShapeEvent};
use annokit_core::units::Unit;
use annokit_core::Debouncer;

use crate::geometry;
use crate::model::{
    ArcMeasurement, CircleMeasurement, Point, RectMeasurement, Shape, ShapeKind,
};
use crate::store::ShapeStore;

/// Decimal places kept on stored measurements
///
/// Chosen so that recomputing a measurement from unchanged pixel geometry
/// reproduces the stored value exactly.
const MEASURE_DECIMALS: u32 = 11;

/// Debounce window for remeasurement after a context change or edit
const RECALC_DEBOUNCE: Duration = Duration::from_millis(100);

/// Two-click scale capture with a horizontal guide
///
/// The gesture measures a feature of known physical length (a stage
/// micrometer graticule, typically). The second point and the live
/// preview are snapped to the first point's y so the measured span is
/// purely horizontal.
#[derive(Debug, Clone, Default)]
pub struct CalibrationCapture {
    first: Option<Point>,
    second: Option<Point>,
    preview: Option<Point>,
}

impl CalibrationCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// y of the guide line, once the first point is placed
    pub fn guide_y(&self) -> Option<f64> {
        self.first.map(|p| p.y)
    }

    pub fn first(&self) -> Option<Point> {
        self.first
    }

    pub fn second(&self) -> Option<Point> {
        self.second
    }

    /// Cursor position snapped to the guide, shown between the clicks
    pub fn preview(&self) -> Option<Point> {
        self.preview
    }

    /// Number of points placed so far (0..=2)
    pub fn collected(&self) -> usize {
        self.first.is_some() as usize + self.second.is_some() as usize
    }

    /// Place the next capture point
    ///
    /// The first click is taken as-is; the second is snapped onto the
    /// guide. Clicks after the second are ignored.
    pub fn add_point(&mut self, p: Point) {
        match self.first {
            None => self.first = Some(p),
            Some(anchor) => {
                if self.second.is_none() {
                    self.second = Some(Point::new(p.x, anchor.y));
                    self.preview = None;
                }
            }
        }
    }

    /// Track the cursor between the first and second clicks
    pub fn set_preview(&mut self, p: Point) {
        if let Some(anchor) = self.first {
            if self.second.is_none() {
                self.preview = Some(Point::new(p.x, anchor.y));
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        self.first.is_some() && self.second.is_some()
    }

    /// Measured horizontal span in pixels
    pub fn pixel_distance(&self) -> Option<f64> {
        match (self.first, self.second) {
            (Some(a), Some(b)) => Some((b.x - a.x).abs()),
            _ => None,
        }
    }

    /// Derive a calibration context from the capture and the known length
    pub fn finish(&self, real_length: f64, unit: Unit) -> Result<CalibrationContext, CalibrationError> {
        let pixels = self
            .pixel_distance()
            .ok_or(CalibrationError::CaptureIncomplete {
                collected: self.collected(),
            })?;
        if pixels == 0.0 {
            return Err(CalibrationError::ZeroPixelDistance);
        }
        if !real_length.is_finite() || real_length <= 0.0 {
            return Err(CalibrationError::InvalidLength { value: real_length });
        }
        Ok(CalibrationContext::from_ratio(real_length / pixels, unit))
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Holds the active calibration and keeps stored measurements in sync
#[derive(Debug)]
pub struct CalibrationService {
    context: Arc<RwLock<CalibrationContext>>,
    debouncer: Debouncer,
}

impl CalibrationService {
    pub fn new() -> Self {
        Self {
            context: Arc::new(RwLock::new(CalibrationContext::default())),
            debouncer: Debouncer::new(RECALC_DEBOUNCE),
        }
    }

    /// Snapshot of the active context
    pub fn context(&self) -> CalibrationContext {
        self.context.read().clone()
    }

    pub fn is_calibrated(&self) -> bool {
        self.context.read().is_calibrated()
    }

    /// Install a new context and announce the change
    ///
    /// A present ratio must be a positive finite number; legacy contexts
    /// carrying only a factor are accepted as-is.
    pub fn set_context(&self, context: CalibrationContext) -> Result<(), CalibrationError> {
        if let Some(ratio) = context.ratio {
            if !ratio.is_finite() || ratio <= 0.0 {
                return Err(CalibrationError::InvalidRatio { value: ratio });
            }
        }
        *self.context.write() = context.clone();
        tracing::info!(
            unit = %context.unit,
            ratio = ?context.effective_ratio(),
            "calibration context changed"
        );
        event_bus()
            .publish(AppEvent::Calibration(CalibrationEvent::Changed { context }))
            .ok();
        Ok(())
    }

    /// Recompute every stored measurement right now
    ///
    /// Bypasses the store's history: remeasurement is bookkeeping, not an
    /// edit the user should undo.
    pub fn recalculate_now(&self, store: &mut ShapeStore) {
        let context = self.context.read().clone();
        if context.effective_ratio().is_none() || store.is_empty() {
            return;
        }
        let mut shapes = store.shapes().to_vec();
        recalculate(&mut shapes, &context);
        let count = shapes.len();
        store.replace_shapes(shapes);
        event_bus()
            .publish(AppEvent::Shapes(ShapeEvent::Recalculated { count }))
            .ok();
    }

    /// Schedule a debounced recompute of the store's measurements
    ///
    /// Successive calls within the debounce window collapse into one
    /// pass. The pass is skipped while `drawing` is set; whoever clears
    /// the flag is expected to schedule again.
    pub fn schedule_recalculate(&self, store: Arc<RwLock<ShapeStore>>, drawing: Arc<AtomicBool>) {
        let context = Arc::clone(&self.context);
        self.debouncer.call(move || {
            if drawing.load(Ordering::Relaxed) {
                return;
            }
            let context = context.read().clone();
            if context.effective_ratio().is_none() {
                return;
            }
            let mut store = store.write();
            if store.is_empty() {
                return;
            }
            let mut shapes = store.shapes().to_vec();
            recalculate(&mut shapes, &context);
            let count = shapes.len();
            store.replace_shapes(shapes);
            drop(store);
            tracing::debug!(count, "recalculated shape measurements");
            event_bus()
                .publish(AppEvent::Shapes(ShapeEvent::Recalculated { count }))
                .ok();
        });
    }
}

impl Default for CalibrationService {
    fn default() -> Self {
        Self::new()
    }
}

/// Re-derive calibrated measurements from pixel geometry
///
/// Runs against every shape: measurements are always a pure function of
/// the current pixel geometry and the context, so running this twice with
/// the same inputs changes nothing. Incomplete shapes and shapes whose
/// circle fit is degenerate are left untouched. Angle gauges carry no
/// calibrated payload; degrees are unit-independent.
pub fn recalculate(shapes: &mut [Shape], context: &CalibrationContext) {
    let Some(ratio) = context.effective_ratio() else {
        return;
    };

    for shape in shapes.iter_mut() {
        match &mut shape.kind {
            ShapeKind::Line(line) => {
                line.calibrated_distance = Some(round(line.pixel_length() * ratio));
            }
            ShapeKind::Arrow(arrow) => {
                arrow.calibrated_distance = Some(round(arrow.pixel_length() * ratio));
            }
            ShapeKind::Rectangle(rect) => {
                let width = round(rect.pixel_width() * ratio);
                let height = round(rect.pixel_height() * ratio);
                rect.measurement = Some(RectMeasurement {
                    width,
                    height,
                    // Area is the product of the rounded sides, so the
                    // on-canvas label agrees with width x height.
                    area: round(width * height),
                });
            }
            ShapeKind::Circle(circle) => {
                if let Some((_, radius_px)) = circle.fit() {
                    let radius = radius_px * ratio;
                    circle.measurement = Some(CircleMeasurement {
                        radius: round(radius),
                        diameter: round(radius * 2.0),
                        area: round(std::f64::consts::PI * radius * radius),
                    });
                }
            }
            ShapeKind::Curve(curve) => {
                if curve.points.len() >= 2 {
                    curve.calibrated_length = Some(round(curve.pixel_length() * ratio));
                }
            }
            ShapeKind::ClosedCurve(closed) => {
                if closed.points.len() > 2 {
                    closed.calibrated_area = Some(round(closed.pixel_area() * ratio * ratio));
                }
            }
            ShapeKind::Arc(arc) => {
                if let (Some((_, radius_px)), Some(span)) = (arc.fit(), arc.span()) {
                    arc.measurement = Some(ArcMeasurement {
                        radius: round(radius_px * ratio),
                        arc_length: round(span * radius_px * ratio),
                        angle_degrees: geometry::round_to_decimals(span.to_degrees(), 1),
                    });
                }
            }
            ShapeKind::Point(_) | ShapeKind::Angle(_) | ShapeKind::Text(_) => {}
        }
    }
}

fn round(value: f64) -> f64 {
    geometry::round_to_decimals(value, MEASURE_DECIMALS)
}
