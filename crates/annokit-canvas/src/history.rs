//! Snapshot undo/redo
//!
//! Edits are recorded as full snapshots of the edited state rather than
//! inverse operations. A cursor walks the snapshot stack; recording after
//! an undo discards the redo tail. The unified helpers walk several
//! independent histories in priority order so one keyboard shortcut can
//! serve both image edits and annotation edits.

/// A linear snapshot stack with a cursor
#[derive(Debug, Clone)]
pub struct SnapshotHistory<T> {
    stack: Vec<T>,
    cursor: usize,
}

impl<T: Clone> SnapshotHistory<T> {
    /// Start a history whose baseline is `initial`
    pub fn new(initial: T) -> Self {
        Self {
            stack: vec![initial],
            cursor: 0,
        }
    }

    /// Record a snapshot after a committed edit
    ///
    /// Any snapshots ahead of the cursor (the redo tail) are discarded.
    pub fn record(&mut self, snapshot: T) {
        self.stack.truncate(self.cursor + 1);
        self.stack.push(snapshot);
        self.cursor = self.stack.len() - 1;
    }

    /// Step back one snapshot, returning the state to restore
    pub fn undo(&mut self) -> Option<T> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.stack[self.cursor].clone())
    }

    /// Step forward one snapshot, returning the state to restore
    pub fn redo(&mut self) -> Option<T> {
        if self.cursor + 1 >= self.stack.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.stack[self.cursor].clone())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.stack.len()
    }

    /// Number of undo steps currently available
    pub fn undo_depth(&self) -> usize {
        self.cursor
    }

    /// Number of redo steps currently available
    pub fn redo_depth(&self) -> usize {
        self.stack.len() - 1 - self.cursor
    }

    /// The snapshot the cursor points at
    pub fn current(&self) -> &T {
        &self.stack[self.cursor]
    }

    /// Drop the whole stack and restart from `baseline`
    pub fn clear_with(&mut self, baseline: T) {
        self.stack.clear();
        self.stack.push(baseline);
        self.cursor = 0;
    }
}

/// One undoable domain in the unified edit history
///
/// `undo` and `redo` restore the domain's own state and report whether a
/// step was actually taken.
pub trait HistoryDomain {
    fn can_undo(&self) -> bool;
    fn can_redo(&self) -> bool;
    fn undo(&mut self) -> bool;
    fn redo(&mut self) -> bool;
}

/// Undo across domains: the first domain with something to undo wins
pub fn unified_undo(domains: &mut [&mut dyn HistoryDomain]) -> bool {
    for domain in domains.iter_mut() {
        if domain.can_undo() {
            return domain.undo();
        }
    }
    false
}

/// Redo across domains: the first domain with something to redo wins
pub fn unified_redo(domains: &mut [&mut dyn HistoryDomain]) -> bool {
    for domain in domains.iter_mut() {
        if domain.can_redo() {
            return domain.redo();
        }
    }
    false
}
