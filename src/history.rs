pub const DEFAULT_UNDO_LIMIT: usize = 100;

/// Bounded undo/redo history of snapshots
#[derive(Debug, Clone)]
pub struct History<T> {
    undo_stack: Vec<T>,
    redo_stack: Vec<T>,
    limit: usize,
}

impl<T> History<T> {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_UNDO_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        History {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Record the state before an edit
    /// This clears any redo history
    pub fn push(&mut self, snapshot: T) {
        self.redo_stack.clear();
        self.undo_stack.push(snapshot);

        // Limit history size
        if self.undo_stack.len() > self.limit {
            self.undo_stack.remove(0);
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Step back one edit
    /// `current` is the present state; it becomes redoable.
    /// Returns the state to restore, or None if there is nothing to undo
    pub fn undo(&mut self, current: T) -> Option<T> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    /// Step forward one undone edit
    pub fn redo(&mut self, current: T) -> Option<T> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(next)
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new()
    }
}
