//! Event type definitions for the event bus.
//!
//! This module defines all application events organized by category.
//! Events are designed to be cloneable and serializable for logging/replay.

use serde::{Deserialize, Serialize};

use crate::calibration::CalibrationContext;

/// Root event enum for all application events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AppEvent {
    /// Calibration lifecycle events
    Calibration(CalibrationEvent),
    /// Shape collection events
    Shapes(ShapeEvent),
    /// Image loading events
    Image(ImageEvent),
    /// Tool selection events
    Tool(ToolEvent),
}

impl AppEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            AppEvent::Calibration(_) => EventCategory::Calibration,
            AppEvent::Shapes(_) => EventCategory::Shapes,
            AppEvent::Image(_) => EventCategory::Image,
            AppEvent::Tool(_) => EventCategory::Tool,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            AppEvent::Calibration(e) => e.description(),
            AppEvent::Shapes(e) => e.description(),
            AppEvent::Image(e) => e.description(),
            AppEvent::Tool(e) => e.description(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Calibration lifecycle events.
    Calibration,
    /// Shape collection events.
    Shapes,
    /// Image loading events.
    Image,
    /// Tool selection events.
    Tool,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Calibration => write!(f, "Calibration"),
            EventCategory::Shapes => write!(f, "Shapes"),
            EventCategory::Image => write!(f, "Image"),
            EventCategory::Tool => write!(f, "Tool"),
        }
    }
}

/// Calibration lifecycle events
///
/// `Changed` carries the new context so subscribers can use it directly;
/// `Reloaded` only signals that the stored context was replaced and should
/// be re-read. Producers publish both so either subscription style works.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CalibrationEvent {
    /// A new calibration context is active.
    Changed {
        /// The calibration context that is now in effect.
        context: CalibrationContext,
    },
    /// The stored calibration was replaced; subscribers should re-read it.
    Reloaded,
}

impl CalibrationEvent {
    fn description(&self) -> String {
        match self {
            CalibrationEvent::Changed { context } => match context.effective_ratio() {
                Some(ratio) => format!("Calibration: {:.6} {}/px", ratio, context.unit),
                None => "Calibration: cleared".to_string(),
            },
            CalibrationEvent::Reloaded => "Calibration reloaded".to_string(),
        }
    }
}

/// Shape collection events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ShapeEvent {
    /// The shape collection changed through an undoable edit.
    Updated {
        /// Number of shapes after the edit.
        count: usize,
    },
    /// Calibrated fields were recomputed in place.
    Recalculated {
        /// Number of shapes in the collection.
        count: usize,
    },
    /// All shapes were removed.
    Cleared,
    /// The selected shape changed.
    Selected {
        /// Id of the newly selected shape, or `None` when deselected.
        id: Option<u64>,
    },
}

impl ShapeEvent {
    fn description(&self) -> String {
        match self {
            ShapeEvent::Updated { count } => format!("Shapes updated: {} total", count),
            ShapeEvent::Recalculated { count } => {
                format!("Shapes recalculated: {} total", count)
            }
            ShapeEvent::Cleared => "Shapes cleared".to_string(),
            ShapeEvent::Selected { id } => match id {
                Some(id) => format!("Selected shape {}", id),
                None => "Selection cleared".to_string(),
            },
        }
    }
}

/// Image loading events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ImageEvent {
    /// An image was decoded and is now displayed.
    Loaded {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
        /// Where the image came from (path or label).
        source: String,
    },
    /// Image decoding failed.
    LoadFailed {
        /// Where the image came from (path or label).
        source: String,
        /// Error message describing the failure.
        reason: String,
    },
}

impl ImageEvent {
    fn description(&self) -> String {
        match self {
            ImageEvent::Loaded {
                width,
                height,
                source,
            } => format!("Loaded {} ({}x{})", source, width, height),
            ImageEvent::LoadFailed { source, reason } => {
                format!("Load failed for {}: {}", source, reason)
            }
        }
    }
}

/// Tool selection events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ToolEvent {
    /// A drawing tool became active.
    Activated {
        /// Name of the activated tool.
        tool: String,
    },
}

impl ToolEvent {
    fn description(&self) -> String {
        match self {
            ToolEvent::Activated { tool } => format!("Tool: {}", tool),
        }
    }
}
