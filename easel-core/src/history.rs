//! Undo/redo history of canvas snapshots.
//!
//! Each entry is an owned deep copy of a whole [`Canvas`]. Restoring a
//! snapshot replaces the canvas wholesale, so there is no inverse-command
//! chain to keep consistent.

use std::collections::VecDeque;

use crate::canvas::Canvas;

/// Undo and redo stacks.
#[derive(Debug, Clone, Default)]
pub struct History {
    /// Oldest entry at the front.
    undo: VecDeque<Canvas>,
    redo: Vec<Canvas>,
    /// Maximum undo depth; `None` is unbounded.
    limit: Option<usize>,
}

impl History {
    /// Create an unbounded history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history that keeps at most `limit` undo entries.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            undo: VecDeque::with_capacity(limit.min(64)),
            redo: Vec::new(),
            limit: Some(limit),
        }
    }

    /// Maximum undo depth.
    #[must_use]
    pub const fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Record the state before an edit. Clears redo.
    pub fn record(&mut self, snapshot: Canvas) {
        self.undo.push_back(snapshot);
        if let Some(limit) = self.limit {
            while self.undo.len() > limit {
                self.undo.pop_front();
                tracing::debug!(limit, "History full, dropped oldest snapshot");
            }
        }
        self.redo.clear();
    }

    /// Step back: returns the snapshot to restore and keeps `current` for redo.
    ///
    /// Returns `None` (and drops nothing) when there is nothing to undo.
    pub fn undo(&mut self, current: &Canvas) -> Option<Canvas> {
        let snapshot = self.undo.pop_back()?;
        self.redo.push(current.clone());
        Some(snapshot)
    }

    /// Step forward again after an undo.
    ///
    /// Returns `None` when there is nothing to redo.
    pub fn redo(&mut self, current: &Canvas) -> Option<Canvas> {
        let snapshot = self.redo.pop()?;
        self.undo.push_back(current.clone());
        if let Some(limit) = self.limit {
            while self.undo.len() > limit {
                self.undo.pop_front();
            }
        }
        Some(snapshot)
    }

    /// Whether an undo is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Whether a redo is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Number of undo entries.
    #[must_use]
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Number of redo entries.
    #[must_use]
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn canvas(width: u32) -> Canvas {
        Canvas::new(width, 100, Color::WHITE).expect("canvas")
    }

    #[test]
    fn test_undo_on_empty_history_is_none() {
        let mut history = History::new();
        assert!(history.undo(&canvas(100)).is_none());
        assert!(history.redo(&canvas(100)).is_none());
        assert_eq!(history.redo_len(), 0);
    }

    #[test]
    fn test_undo_redo_cycle() {
        let mut history = History::new();
        history.record(canvas(100));
        let restored = history.undo(&canvas(200)).expect("undo");
        assert_eq!(restored.width(), 100);
        assert!(history.can_redo());
        let redone = history.redo(&restored).expect("redo");
        assert_eq!(redone.width(), 200);
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_record_clears_redo() {
        let mut history = History::new();
        history.record(canvas(100));
        history.undo(&canvas(200));
        assert!(history.can_redo());
        history.record(canvas(100));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_limit_evicts_oldest() {
        let mut history = History::with_limit(2);
        history.record(canvas(1));
        history.record(canvas(2));
        history.record(canvas(3));
        assert_eq!(history.undo_len(), 2);
        let last = history.undo(&canvas(4)).expect("undo");
        assert_eq!(last.width(), 3);
        let first = history.undo(&last).expect("undo");
        assert_eq!(first.width(), 2);
        assert!(history.undo(&first).is_none());
    }
}
