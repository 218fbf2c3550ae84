//! # Annokit Canvas
//!
//! Annotation and measurement canvas for micrographs. Shapes are drawn
//! over a loaded image, measured through the active calibration, and
//! rendered to a raster overlay that the host UI composites on screen.
//!
//! ## Core Components
//!
//! ### Annotation
//! - **Shapes**: Points, lines, rectangles, circles, curves, arcs,
//!   angles, and text labels
//! - **Store**: Shape collection with ids, selection, and snapshot undo
//! - **Tools**: Pointer state machines for every drawing tool
//! - **Tracker**: Panel rows summarizing the annotation list
//!
//! ### Measurement
//! - **Calibration**: Two-point capture and ratio-based remeasurement
//! - **Geometry**: Distance, circle fitting, arc math, shoelace area
//!
//! ### Display
//! - **Viewport**: Zoom and pan between screen and image coordinates
//! - **Renderer**: Raster overlay with measurement labels
//! - **Display controller**: The container the host UI talks to
//!
//! ## Architecture
//!
//! ```text
//! DisplayController (host-facing container)
//!   ├── ShapeStore (annotations + history)
//!   ├── ToolController (pointer gestures)
//!   ├── CalibrationService (ratio + debounced remeasure)
//!   ├── ViewportTransform (screen <-> image)
//!   └── Renderer (overlay raster)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use annokit_canvas::{DisplayController, Point, PointerButton, Tool};
//! use annokit_settings::CanvasConfig;
//!
//! let mut display = DisplayController::new(CanvasConfig::default());
//! display.set_tool(Tool::Line);
//! display.pointer_down(Point::new(10.0, 10.0), PointerButton::Left);
//! display.pointer_move(Point::new(110.0, 10.0));
//! display.pointer_up(Point::new(110.0, 10.0));
//!
//! let overlay = display.render();
//! ```

pub mod calibration;
pub mod display;
pub mod font_manager;
pub mod geometry;
pub mod history;
pub mod model;
pub mod renderer;
pub mod store;
pub mod tools;
pub mod tracker;
pub mod viewport;

pub use calibration::{recalculate, CalibrationCapture, CalibrationService};
pub use display::{action_for_key, DisplayController, EditAction, ImageHistory};
pub use history::{unified_redo, unified_undo, HistoryDomain, SnapshotHistory};
pub use model::{CanvasShape, Point, Shape, ShapeKind, ShapeStyle, ShapeType};
pub use renderer::FrameInput;
pub use store::{ShapeStore, DEFAULT_HIT_THRESHOLD};
pub use tools::{PointerButton, Tool, ToolController};
pub use tracker::TrackerEntry;
pub use viewport::ViewportTransform;
