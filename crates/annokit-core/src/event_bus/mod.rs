//! # Event Bus Module
//!
//! Provides a unified event bus system for decoupled communication between
//! application components.
//!
//! ## Overview
//!
//! The event bus enables publish/subscribe patterns across the application:
//! - Publishers emit typed events without knowing subscribers
//! - Subscribers filter and receive events of interest
//! - Supports both sync and async event handling
//!
//! ## Usage
//!
//! ```rust,ignore
//! use annokit_core::event_bus::{event_bus, AppEvent, CalibrationEvent, EventFilter, EventCategory};
//!
//! // Subscribe to calibration events
//! let subscription = event_bus().subscribe(
//!     EventFilter::Categories(vec![EventCategory::Calibration]),
//!     |event| {
//!         if let AppEvent::Calibration(cal) = event {
//!             println!("Calibration event: {:?}", cal);
//!         }
//!     },
//! );
//!
//! // Publish an event
//! event_bus().publish(AppEvent::Calibration(CalibrationEvent::Reloaded));
//!
//! // Unsubscribe when done
//! event_bus().unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
