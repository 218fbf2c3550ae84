//! Shape tracker panel model
//!
//! The list the sidebar renders: one row per committed shape, with a
//! generated label, the shape's colors, and its selection state. Labels
//! are recomputed from collection order on every call, so deleting a
//! shape renumbers the rest on the next refresh.

use std::collections::HashMap;

use annokit_core::error::StoreError;
use annokit_core::event_bus::{event_bus, AppEvent, ShapeEvent};

use crate::model::ShapeType;
use crate::store::ShapeStore;

/// One row in the tracker list
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerEntry {
    pub id: u64,
    pub label: String,
    pub shape_type: ShapeType,
    pub color: String,
    pub font_color: String,
    pub selected: bool,
}

fn type_prefix(shape_type: ShapeType) -> &'static str {
    match shape_type {
        ShapeType::Point => "P",
        ShapeType::Line => "L",
        ShapeType::Rectangle => "R",
        ShapeType::Circle => "C",
        ShapeType::Curve => "CV",
        ShapeType::ClosedCurve => "CC",
        ShapeType::Arc => "A",
        ShapeType::Angle => "AG",
        ShapeType::Arrow => "AR",
        ShapeType::Text => "T",
    }
}

/// Rows for every shape, in collection order
///
/// The label is the type prefix plus the 1-based ordinal among shapes of
/// the same type, counted in collection order.
pub fn entries(store: &ShapeStore) -> Vec<TrackerEntry> {
    let selected = store.selected_id();
    let mut counts: HashMap<ShapeType, usize> = HashMap::new();

    store
        .shapes()
        .iter()
        .map(|shape| {
            let shape_type = shape.shape_type();
            let ordinal = counts.entry(shape_type).or_insert(0);
            *ordinal += 1;
            TrackerEntry {
                id: shape.id,
                label: format!("{}{}", type_prefix(shape_type), ordinal),
                shape_type,
                color: shape.style.color.clone(),
                font_color: shape.style.font_color.clone(),
                selected: selected == Some(shape.id),
            }
        })
        .collect()
}

/// Select a row (or clear with None); the canvas highlight follows
pub fn select(store: &mut ShapeStore, id: Option<u64>) {
    store.select(id);
    event_bus()
        .publish(AppEvent::Shapes(ShapeEvent::Selected { id }))
        .ok();
}

/// Recolor a shape's stroke, with a history entry
///
/// Returns the applied color so the caller can mirror it into the global
/// current style. Errors when the row's shape no longer exists, which
/// tells the panel to refresh.
pub fn set_color(store: &mut ShapeStore, id: u64, color: &str) -> Result<String, StoreError> {
    if store.update_shape(id, |s| s.style.color = color.to_string()) {
        publish_updated(store);
        Ok(color.to_string())
    } else {
        Err(StoreError::ShapeNotFound { id })
    }
}

/// Recolor a shape's labels, with a history entry
pub fn set_font_color(store: &mut ShapeStore, id: u64, color: &str) -> Result<String, StoreError> {
    if store.update_shape(id, |s| s.style.font_color = color.to_string()) {
        publish_updated(store);
        Ok(color.to_string())
    } else {
        Err(StoreError::ShapeNotFound { id })
    }
}

/// Delete a row's shape, with a history entry; unknown ids are a no-op
pub fn delete(store: &mut ShapeStore, id: u64) -> bool {
    let removed = store.remove_shape(id);
    if removed {
        publish_updated(store);
    }
    removed
}

fn publish_updated(store: &ShapeStore) {
    event_bus()
        .publish(AppEvent::Shapes(ShapeEvent::Updated { count: store.len() }))
        .ok();
}
