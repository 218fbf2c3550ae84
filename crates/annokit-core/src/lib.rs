//! # AnnoKit Core
//!
//! Core types and utilities for AnnoKit.
//! Provides the calibration context, measurement units, error types,
//! debouncing, and the application event bus.

pub mod calibration;
pub mod debounce;
pub mod error;
pub mod event_bus;
pub mod units;

pub use calibration::CalibrationContext;

pub use debounce::Debouncer;

pub use error::{CalibrationError, Error, ImageError, Result, StoreError};

// Re-export event bus for convenience
pub use event_bus::{
    event_bus, AppEvent, CalibrationEvent, EventBus, EventBusConfig, EventCategory, EventFilter,
    ImageEvent, ShapeEvent, SubscriptionId, ToolEvent,
};

pub use units::{format_area, format_length, Unit};
