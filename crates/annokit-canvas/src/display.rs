//! Display container
//!
//! `DisplayController` composes the store, tools, calibration, viewport,
//! and renderer into the one object the host UI talks to. Pointer entry
//! points take screen coordinates and convert through the viewport; when
//! a calibration capture is active it owns the canvas and every pointer
//! event is redirected to it. Undo and redo are unified across the image
//! history and the annotation history, image first.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use image::RgbaImage;
use parking_lot::RwLock;
use tiny_skia::Pixmap;

use annokit_core::calibration::CalibrationContext;
use annokit_core::error::{CalibrationError, Error, ImageError, Result};
use annokit_core::event_bus::{event_bus, AppEvent, CalibrationEvent, ImageEvent, ShapeEvent};
use annokit_core::units::Unit;
use annokit_settings::{CalibrationLibrary, CanvasConfig};

use crate::calibration::{CalibrationCapture, CalibrationService};
use crate::history::{unified_redo, unified_undo, HistoryDomain, SnapshotHistory};
use crate::model::{Point, ShapeStyle};
use crate::renderer::{self, FrameInput};
use crate::store::ShapeStore;
use crate::tools::{PointerButton, Tool, ToolController};
use crate::viewport::ViewportTransform;

/// Keyboard-triggered edit action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    Undo,
    Redo,
}

/// Map a keyboard chord to an edit action
///
/// Ctrl/Cmd+Z undoes; Ctrl/Cmd+Shift+Z and Ctrl/Cmd+Y redo.
pub fn action_for_key(key: &str, ctrl_or_cmd: bool, shift: bool) -> Option<EditAction> {
    if !ctrl_or_cmd {
        return None;
    }
    match (key.to_ascii_lowercase().as_str(), shift) {
        ("z", false) => Some(EditAction::Undo),
        ("z", true) => Some(EditAction::Redo),
        ("y", _) => Some(EditAction::Redo),
        _ => None,
    }
}

/// One displayed version of the micrograph
#[derive(Debug, Clone)]
struct ImageVersion {
    source: String,
    pixels: Arc<RgbaImage>,
}

/// Versions of the processed micrograph, oldest first
///
/// Empty until an image loads. Loading a new micrograph resets it;
/// applying a processed result records an undoable version.
#[derive(Debug, Default)]
pub struct ImageHistory {
    versions: Option<SnapshotHistory<ImageVersion>>,
}

impl ImageHistory {
    fn reset(&mut self, version: ImageVersion) {
        self.versions = Some(SnapshotHistory::new(version));
    }

    fn record(&mut self, version: ImageVersion) {
        match &mut self.versions {
            Some(history) => history.record(version),
            None => self.versions = Some(SnapshotHistory::new(version)),
        }
    }

    fn clear(&mut self) {
        self.versions = None;
    }

    fn current(&self) -> Option<&ImageVersion> {
        self.versions.as_ref().map(|h| h.current())
    }
}

impl HistoryDomain for ImageHistory {
    fn can_undo(&self) -> bool {
        self.versions.as_ref().is_some_and(|h| h.can_undo())
    }

    fn can_redo(&self) -> bool {
        self.versions.as_ref().is_some_and(|h| h.can_redo())
    }

    fn undo(&mut self) -> bool {
        self.versions
            .as_mut()
            .is_some_and(|h| h.undo().is_some())
    }

    fn redo(&mut self) -> bool {
        self.versions
            .as_mut()
            .is_some_and(|h| h.redo().is_some())
    }
}

/// The annotation canvas container
pub struct DisplayController {
    store: Arc<RwLock<ShapeStore>>,
    tools: ToolController,
    calibration: CalibrationService,
    capture: Option<CalibrationCapture>,
    viewport: ViewportTransform,
    image_history: ImageHistory,
    calibrations: CalibrationLibrary,
    config: CanvasConfig,
    /// Shared with the debounced recompute task, which skips its pass
    /// while an input gesture is open
    drawing: Arc<AtomicBool>,
}

impl DisplayController {
    pub fn new(config: CanvasConfig) -> Self {
        let mut tools = ToolController::new();
        tools.set_style(ShapeStyle {
            color: config.default_color.clone(),
            font_color: config.text_color.clone(),
            thickness: config.default_thickness,
        });
        tools.set_eraser_radius(config.eraser_radius);
        tools.set_hit_threshold(config.hit_threshold);

        Self {
            store: Arc::new(RwLock::new(ShapeStore::new())),
            tools,
            calibration: CalibrationService::new(),
            capture: None,
            viewport: ViewportTransform::new(config.width as f64, config.height as f64),
            image_history: ImageHistory::default(),
            calibrations: CalibrationLibrary::new(),
            config,
            drawing: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn store(&self) -> &Arc<RwLock<ShapeStore>> {
        &self.store
    }

    pub fn tools(&self) -> &ToolController {
        &self.tools
    }

    pub fn viewport(&self) -> &ViewportTransform {
        &self.viewport
    }

    pub fn calibration(&self) -> &CalibrationService {
        &self.calibration
    }

    pub fn calibrations(&self) -> &CalibrationLibrary {
        &self.calibrations
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn image(&self) -> Option<&RgbaImage> {
        self.image_history.current().map(|v| v.pixels.as_ref())
    }

    pub fn image_source(&self) -> Option<&str> {
        self.image_history.current().map(|v| v.source.as_str())
    }

    pub fn is_drawing(&self) -> bool {
        self.tools.is_drawing()
    }

    // ---- image loading -------------------------------------------------

    /// Load a fresh micrograph, replacing the image history
    pub fn load_image(&mut self, bytes: &[u8], source: &str) -> Result<()> {
        let rgba = match Self::decode(bytes, source) {
            Ok(rgba) => rgba,
            Err(err) => {
                self.image_history.clear();
                return Err(err);
            }
        };
        let (width, height) = rgba.dimensions();
        self.image_history.reset(ImageVersion {
            source: source.to_string(),
            pixels: Arc::new(rgba),
        });
        self.viewport.fit_to_window(width as f64, height as f64);
        tracing::info!(source, width, height, "image loaded");
        event_bus()
            .publish(AppEvent::Image(ImageEvent::Loaded {
                width,
                height,
                source: source.to_string(),
            }))
            .ok();
        Ok(())
    }

    /// Record a processed result as a new, undoable image version
    ///
    /// A failed decode leaves the current version in place.
    pub fn apply_processed_image(&mut self, bytes: &[u8], source: &str) -> Result<()> {
        let rgba = Self::decode(bytes, source)?;
        let (width, height) = rgba.dimensions();
        self.image_history.record(ImageVersion {
            source: source.to_string(),
            pixels: Arc::new(rgba),
        });
        event_bus()
            .publish(AppEvent::Image(ImageEvent::Loaded {
                width,
                height,
                source: source.to_string(),
            }))
            .ok();
        Ok(())
    }

    fn decode(bytes: &[u8], source: &str) -> Result<RgbaImage> {
        let decoded = match image::load_from_memory(bytes) {
            Ok(decoded) => decoded,
            Err(err) => {
                tracing::warn!(source, error = %err, "image decode failed");
                event_bus()
                    .publish(AppEvent::Image(ImageEvent::LoadFailed {
                        source: source.to_string(),
                        reason: err.to_string(),
                    }))
                    .ok();
                return Err(Error::from(ImageError::DecodeFailed {
                    reason: err.to_string(),
                }));
            }
        };
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            tracing::warn!(source, width, height, "image has invalid dimensions");
            event_bus()
                .publish(AppEvent::Image(ImageEvent::LoadFailed {
                    source: source.to_string(),
                    reason: format!("invalid dimensions {width}x{height}"),
                }))
                .ok();
            return Err(Error::from(ImageError::InvalidDimensions { width, height }));
        }
        Ok(rgba)
    }

    // ---- pointer wiring ------------------------------------------------

    /// Pointer press at screen coordinates
    pub fn pointer_down(&mut self, screen: Point, button: PointerButton) {
        let world = self.viewport.pixel_to_world(screen);
        if let Some(capture) = &mut self.capture {
            if button == PointerButton::Left {
                capture.add_point(world);
            }
            return;
        }
        {
            let mut store = self.store.write();
            self.tools.pointer_down(&mut store, world, button);
        }
        self.after_tool_event();
    }

    pub fn pointer_move(&mut self, screen: Point) {
        let world = self.viewport.pixel_to_world(screen);
        if let Some(capture) = &mut self.capture {
            capture.set_preview(world);
            return;
        }
        {
            let mut store = self.store.write();
            self.tools.pointer_move(&mut store, world);
        }
        self.after_tool_event();
    }

    pub fn pointer_up(&mut self, screen: Point) {
        let world = self.viewport.pixel_to_world(screen);
        if self.capture.is_some() {
            return;
        }
        {
            let mut store = self.store.write();
            self.tools.pointer_up(&mut store, world);
        }
        self.after_tool_event();
    }

    pub fn double_click(&mut self, screen: Point) {
        let world = self.viewport.pixel_to_world(screen);
        if self.capture.is_some() {
            return;
        }
        {
            let mut store = self.store.write();
            self.tools.double_click(&mut store, world);
        }
        self.after_tool_event();
    }

    pub fn context_menu(&mut self, screen: Point) {
        let world = self.viewport.pixel_to_world(screen);
        if self.capture.is_some() {
            return;
        }
        {
            let mut store = self.store.write();
            self.tools.context_menu(&mut store, world);
        }
        self.after_tool_event();
    }

    /// Complete a pending text entry; empty content cancels
    pub fn submit_text(&mut self, content: &str) -> Option<u64> {
        let id = {
            let mut store = self.store.write();
            self.tools.submit_text(&mut store, content)
        };
        self.after_tool_event();
        id
    }

    fn after_tool_event(&mut self) {
        self.drawing
            .store(self.tools.is_drawing(), Ordering::Relaxed);
        self.schedule_recalculate();
    }

    // ---- tools and style -----------------------------------------------

    pub fn set_tool(&mut self, tool: Tool) {
        self.tools.set_tool(tool);
        self.drawing
            .store(self.tools.is_drawing(), Ordering::Relaxed);
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.tools.set_color(color);
    }

    pub fn set_font_color(&mut self, color: impl Into<String>) {
        self.tools.set_font_color(color);
    }

    pub fn set_thickness(&mut self, thickness: f32) {
        self.tools.set_thickness(thickness);
    }

    /// Remove every annotation and start a fresh numbering epoch
    pub fn clear_annotations(&mut self) {
        {
            let mut store = self.store.write();
            store.clear();
        }
        self.tools.cancel();
        self.drawing.store(false, Ordering::Relaxed);
        event_bus()
            .publish(AppEvent::Shapes(ShapeEvent::Cleared))
            .ok();
    }

    // ---- calibration workflow ------------------------------------------

    /// Enter calibration point picking; the capture owns the canvas
    pub fn begin_calibration(&mut self) {
        self.tools.cancel();
        self.drawing.store(false, Ordering::Relaxed);
        self.capture = Some(CalibrationCapture::new());
    }

    pub fn capture_state(&self) -> Option<&CalibrationCapture> {
        self.capture.as_ref()
    }

    /// Build a context from the capture, install it, and leave capture mode
    ///
    /// When a magnification label is given the context is also stored in
    /// the calibration library under that label.
    pub fn complete_calibration(
        &mut self,
        real_length: f64,
        unit: Unit,
        magnification: Option<&str>,
    ) -> std::result::Result<CalibrationContext, CalibrationError> {
        let capture = self
            .capture
            .as_ref()
            .ok_or(CalibrationError::CaptureIncomplete { collected: 0 })?;
        let context = capture.finish(real_length, unit)?;
        self.capture = None;
        if let Some(name) = magnification {
            self.calibrations.upsert(name, context.clone());
            let _ = self.calibrations.set_current(name);
        }
        self.calibration.set_context(context.clone())?;
        self.schedule_recalculate();
        Ok(context)
    }

    pub fn cancel_calibration(&mut self) {
        self.capture = None;
    }

    /// Switch to a calibration saved in the library
    pub fn apply_magnification(
        &mut self,
        name: &str,
    ) -> std::result::Result<(), CalibrationError> {
        self.calibrations
            .set_current(name)
            .map_err(|e| CalibrationError::Other {
                message: e.to_string(),
            })?;
        if let Some(context) = self.calibrations.current().cloned() {
            self.calibration.set_context(context)?;
            self.schedule_recalculate();
        }
        Ok(())
    }

    /// Install a library loaded from disk and apply its current entry
    pub fn set_calibration_library(
        &mut self,
        library: CalibrationLibrary,
    ) -> std::result::Result<(), CalibrationError> {
        self.calibrations = library;
        event_bus()
            .publish(AppEvent::Calibration(CalibrationEvent::Reloaded))
            .ok();
        if let Some(context) = self.calibrations.current().cloned() {
            self.calibration.set_context(context)?;
            self.schedule_recalculate();
        }
        Ok(())
    }

    /// Synchronous remeasurement, bypassing the debounce window
    pub fn recalculate_now(&self) {
        let mut store = self.store.write();
        self.calibration.recalculate_now(&mut store);
    }

    fn schedule_recalculate(&self) {
        self.calibration
            .schedule_recalculate(Arc::clone(&self.store), Arc::clone(&self.drawing));
    }

    // ---- unified undo/redo ---------------------------------------------

    /// Undo across both histories; image versions take priority
    pub fn undo(&mut self) -> bool {
        let image_acted = self.image_history.can_undo();
        let changed = {
            let mut store = self.store.write();
            let mut domains: [&mut dyn HistoryDomain; 2] =
                [&mut self.image_history, &mut *store];
            unified_undo(&mut domains)
        };
        if changed {
            self.publish_history_change(image_acted);
        }
        changed
    }

    /// Redo across both histories; image versions take priority
    pub fn redo(&mut self) -> bool {
        let image_acted = self.image_history.can_redo();
        let changed = {
            let mut store = self.store.write();
            let mut domains: [&mut dyn HistoryDomain; 2] =
                [&mut self.image_history, &mut *store];
            unified_redo(&mut domains)
        };
        if changed {
            self.publish_history_change(image_acted);
        }
        changed
    }

    pub fn undo_enabled(&self) -> bool {
        self.image_history.can_undo() || self.store.read().can_undo()
    }

    pub fn redo_enabled(&self) -> bool {
        self.image_history.can_redo() || self.store.read().can_redo()
    }

    pub fn apply_action(&mut self, action: EditAction) -> bool {
        match action {
            EditAction::Undo => self.undo(),
            EditAction::Redo => self.redo(),
        }
    }

    fn publish_history_change(&self, image_acted: bool) {
        if image_acted {
            if let Some(version) = self.image_history.current() {
                event_bus()
                    .publish(AppEvent::Image(ImageEvent::Loaded {
                        width: version.pixels.width(),
                        height: version.pixels.height(),
                        source: version.source.clone(),
                    }))
                    .ok();
            }
        } else {
            let count = self.store.read().len();
            event_bus()
                .publish(AppEvent::Shapes(ShapeEvent::Updated { count }))
                .ok();
        }
    }

    // ---- view ----------------------------------------------------------

    /// Browser wheel-delta convention: negative delta (scroll up) zooms in
    pub fn wheel_zoom(&mut self, screen_cursor: Point, delta_y: f64) {
        if delta_y < 0.0 {
            self.viewport.zoom_in_at(screen_cursor);
        } else if delta_y > 0.0 {
            self.viewport.zoom_out_at(screen_cursor);
        }
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.viewport.pan_by(dx, dy);
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
    }

    /// The host window was resized
    pub fn resize_canvas(&mut self, width: f64, height: f64) {
        self.viewport.set_canvas_size(width, height);
    }

    /// Resolution of the annotation layer: the image's natural size, or
    /// the configured canvas size before any image loads
    fn frame_size(&self) -> (u32, u32) {
        match self.image() {
            Some(image) => (image.width(), image.height()),
            None => (self.config.width, self.config.height),
        }
    }

    /// Render the annotation layer at canvas resolution
    pub fn render(&self) -> Option<Pixmap> {
        let store = self.store.read();
        let (width, height) = self.frame_size();
        let eraser = match (self.tools.tool(), self.tools.cursor()) {
            (Tool::Eraser, Some(cursor)) => Some((cursor, self.tools.eraser_radius())),
            _ => None,
        };
        let frame = FrameInput {
            shapes: store.shapes(),
            selected: store.selected_id(),
            draft: self.tools.preview_kind(),
            draft_style: self.tools.style().clone(),
            eraser,
            capture: self.capture.as_ref(),
            unit: self.calibration.context().unit,
            width,
            height,
        };
        renderer::render(&frame)
    }

    /// Annotation layer flattened over the micrograph
    pub fn render_composited(&self) -> Option<RgbaImage> {
        let overlay = self.render()?;
        match self.image() {
            Some(base) => Some(renderer::composite_over(base, &overlay)),
            None => {
                let blank = RgbaImage::new(overlay.width(), overlay.height());
                Some(renderer::composite_over(&blank, &overlay))
            }
        }
    }
}

impl std::fmt::Debug for DisplayController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisplayController")
            .field("shapes", &self.store.read().len())
            .field("tool", &self.tools.tool())
            .field("calibrated", &self.calibration.is_calibrated())
            .field("viewport", &self.viewport)
            .field("capturing", &self.capture.is_some())
            .finish()
    }
}
