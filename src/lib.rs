//! # AnnoKit
//!
//! Annotation and measurement canvas engine for desktop micrography.
//! Users draw measurement annotations (points, lines, rectangles,
//! three-point circles, curves, arcs, angles, arrows, text) over a
//! micrograph, calibrate pixel distances against a physical scale, and
//! read calibrated values off the canvas and the shape tracker panel.
//!
//! ## Architecture
//!
//! AnnoKit is organized as a workspace with multiple crates:
//!
//! 1. **annokit-core** - Errors, units, calibration context, event bus
//! 2. **annokit-settings** - Configuration and calibration persistence
//! 3. **annokit-canvas** - Geometry, shape model, tools, renderer, display
//! 4. **annokit** - Facade crate that re-exports the public surface
//!
//! ## Features
//!
//! - **Calibrated Measurements**: units-per-pixel calibration with
//!   debounced recomputation of every annotation's derived values
//! - **Shape Tools**: drag tools, three-point collectors, freehand curves,
//!   eraser strokes, and direct-manipulation move
//! - **Snapshot History**: unified undo/redo across image-processing and
//!   annotation domains
//! - **Typed Events**: broadcast event bus for calibration, shape, image,
//!   and tool notifications

#![allow(dead_code)]

pub use annokit_canvas as canvas;
pub use annokit_core as core;
pub use annokit_settings as settings;

pub use annokit_core::{
    AppEvent, CalibrationContext, CalibrationError, CalibrationEvent, Debouncer, Error, EventBus,
    EventBusConfig, EventCategory, EventFilter, ImageError, ImageEvent, Result, ShapeEvent,
    StoreError, SubscriptionId, ToolEvent, Unit,
};

pub use annokit_settings::{CalibrationLibrary, CanvasConfig, SettingsError};

pub use annokit_canvas::{
    CalibrationCapture, CalibrationService, CanvasShape, DisplayController, EditAction, Point,
    PointerButton, Shape, ShapeKind, ShapeStore, ShapeStyle, ShapeType, SnapshotHistory, Tool,
    ToolController, TrackerEntry, ViewportTransform,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
