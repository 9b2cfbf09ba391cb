//! # Edit History
//!
//! Snapshot buffer behind undo/redo while a page is being edited.
//!
//! ## Design
//!
//! - Every committed edit pushes a full copy of the layout
//! - A cursor marks the snapshot currently shown
//! - Undo/redo only move the cursor
//! - Committing after an undo drops everything past the cursor
//! - Oldest snapshots are dropped once `max_levels` undo steps are stored
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = EditHistory::new(Layout::default());
//! history.commit(edited);
//!
//! history.undo();   // back to the default layout
//! history.redo();   // forward to `edited`
//! ```

use folio_layout::Layout;

/// Undo levels kept when no limit is given
pub const DEFAULT_MAX_LEVELS: usize = 100;

#[derive(Debug, Clone)]
pub struct EditHistory {
    /// Snapshots, oldest first; never empty
    snapshots: Vec<Layout>,

    /// Index of the snapshot currently shown
    cursor: usize,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,
}

impl EditHistory {
    pub fn new(initial: Layout) -> Self {
        Self::with_max_levels(initial, DEFAULT_MAX_LEVELS)
    }

    pub fn with_max_levels(initial: Layout, max_levels: usize) -> Self {
        Self {
            snapshots: vec![initial],
            cursor: 0,
            max_levels,
        }
    }

    /// Record a new current layout, discarding any redo future
    pub fn commit(&mut self, layout: Layout) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(layout);

        if self.max_levels > 0 && self.snapshots.len() > self.max_levels + 1 {
            let excess = self.snapshots.len() - (self.max_levels + 1);
            self.snapshots.drain(..excess);
        }

        self.cursor = self.snapshots.len() - 1;
    }

    /// Step back one snapshot; `None` when already at the oldest
    pub fn undo(&mut self) -> Option<&Layout> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(&self.snapshots[self.cursor])
    }

    /// Step forward one snapshot; `None` when already at the newest
    pub fn redo(&mut self) -> Option<&Layout> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(&self.snapshots[self.cursor])
    }

    pub fn current(&self) -> &Layout {
        &self.snapshots[self.cursor]
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.cursor
    }

    pub fn redo_levels(&self) -> usize {
        self.snapshots.len() - 1 - self.cursor
    }

    /// Forget all history and start over from `layout`
    pub fn clear(&mut self, layout: Layout) {
        self.snapshots.clear();
        self.snapshots.push(layout);
        self.cursor = 0;
    }
}
