//! Shape store
//!
//! Owns the committed shape collection, the annotation history, and the
//! id and point-label counters. Every mutation that should be undoable
//! goes through a method that records a snapshot; live previews (mid-drag
//! moves, debounced remeasurement) use [`ShapeStore::replace_shapes`],
//! which bypasses history.
//!
//! The store does not publish events itself. Controllers that mutate it
//! decide what to announce on the bus.

use crate::history::{HistoryDomain, SnapshotHistory};
use crate::model::{Point, Shape, ShapeKind, ShapeStyle};

/// Default hit-test tolerance in canvas pixels
pub const DEFAULT_HIT_THRESHOLD: f64 = 10.0;

#[derive(Debug)]
pub struct ShapeStore {
    shapes: Vec<Shape>,
    history: SnapshotHistory<Vec<Shape>>,
    next_id: u64,
    point_counter: u64,
    selected: Option<u64>,
}

impl ShapeStore {
    pub fn new() -> Self {
        Self {
            shapes: Vec::new(),
            history: SnapshotHistory::new(Vec::new()),
            next_id: 1,
            point_counter: 1,
            selected: None,
        }
    }

    /// The committed collection, in draw order (oldest first)
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Allocate the next shape id
    ///
    /// Ids are monotonic across add and remove; undo does not return an
    /// id to the pool. The counter restarts only on [`ShapeStore::clear`].
    pub fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Next auto-label for a point marker ("p1", "p2", ...)
    pub fn next_point_label(&mut self) -> String {
        let label = format!("p{}", self.point_counter);
        self.point_counter += 1;
        label
    }

    /// Add a completed shape and record a history entry; returns its id
    pub fn add_shape(&mut self, kind: ShapeKind, style: ShapeStyle) -> u64 {
        let id = self.allocate_id();
        self.shapes.push(Shape::new(id, kind, style));
        self.history.record(self.shapes.clone());
        id
    }

    /// Apply an edit to one shape and record a history entry
    ///
    /// Returns false without touching history when the id is unknown.
    pub fn update_shape(&mut self, id: u64, f: impl FnOnce(&mut Shape)) -> bool {
        match self.shapes.iter_mut().find(|s| s.id == id) {
            Some(shape) => {
                f(shape);
                self.history.record(self.shapes.clone());
                true
            }
            None => false,
        }
    }

    /// Remove a shape by id and record a history entry
    ///
    /// Removing an unknown id is a no-op and leaves history untouched.
    pub fn remove_shape(&mut self, id: u64) -> bool {
        let before = self.shapes.len();
        self.shapes.retain(|s| s.id != id);
        if self.shapes.len() == before {
            return false;
        }
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.history.record(self.shapes.clone());
        true
    }

    /// Replace the collection and record a history entry
    pub fn commit(&mut self, shapes: Vec<Shape>) {
        self.shapes = shapes;
        self.prune_selection();
        self.history.record(self.shapes.clone());
    }

    /// Record the current collection as a history entry
    ///
    /// Used after a run of [`ShapeStore::replace_shapes`] previews, e.g.
    /// when a move drag ends, so the whole drag is one undo step.
    pub fn commit_current(&mut self) {
        self.history.record(self.shapes.clone());
    }

    /// Replace the collection without touching history
    pub fn replace_shapes(&mut self, shapes: Vec<Shape>) {
        self.shapes = shapes;
        self.prune_selection();
    }

    pub fn shape(&self, id: u64) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    /// Mutable access without a history entry; callers commit explicitly
    pub fn shape_mut(&mut self, id: u64) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id == id)
    }

    /// Topmost shape within `threshold` pixels of `p`
    ///
    /// Later shapes draw on top, so the collection is scanned in reverse.
    pub fn find_at(&self, p: Point, threshold: f64) -> Option<&Shape> {
        self.shapes
            .iter()
            .rev()
            .find(|s| s.contains_point(p, threshold))
    }

    pub fn select(&mut self, id: Option<u64>) {
        self.selected = id;
    }

    pub fn selected_id(&self) -> Option<u64> {
        self.selected
    }

    pub fn selected_shape(&self) -> Option<&Shape> {
        self.selected.and_then(|id| self.shape(id))
    }

    /// Step the annotation history back one snapshot
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.shapes = snapshot;
                self.prune_selection();
                true
            }
            None => false,
        }
    }

    /// Step the annotation history forward one snapshot
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.shapes = snapshot;
                self.prune_selection();
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    /// Remove every shape and start a fresh numbering epoch
    ///
    /// The history collapses to a single empty snapshot, so clearing is
    /// not undoable. Both the id counter and the point-label counter
    /// restart from 1.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.history.clear_with(Vec::new());
        self.next_id = 1;
        self.point_counter = 1;
        self.selected = None;
    }

    /// Drop the selection when the selected shape no longer exists
    fn prune_selection(&mut self) {
        if let Some(id) = self.selected {
            if !self.shapes.iter().any(|s| s.id == id) {
                self.selected = None;
            }
        }
    }
}

impl Default for ShapeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryDomain for ShapeStore {
    fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn undo(&mut self) -> bool {
        ShapeStore::undo(self)
    }

    fn redo(&mut self) -> bool {
        ShapeStore::redo(self)
    }
}
