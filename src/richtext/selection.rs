// Selection state and the resolution of a selection to the paragraphs it touches

use super::document::Document;
use std::cmp::{max, min};
use std::ops::{Range, RangeInclusive};

/// A selection as an (anchor, caret) pair of flat-text offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub anchor: usize,
    pub caret: usize,
}

/// The two shapes a selection can take
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    CaretOnly(usize),
    RangeSelected { start: usize, end: usize },
}

impl Selection {
    /// An empty selection (just a caret)
    pub fn caret(offset: usize) -> Self {
        Selection {
            anchor: offset,
            caret: offset,
        }
    }

    pub fn new(anchor: usize, caret: usize) -> Self {
        Selection { anchor, caret }
    }

    pub fn has_selection(&self) -> bool {
        self.anchor != self.caret
    }

    pub fn start(&self) -> usize {
        min(self.anchor, self.caret)
    }

    pub fn end(&self) -> usize {
        max(self.anchor, self.caret)
    }

    pub fn range(&self) -> Range<usize> {
        self.start()..self.end()
    }

    pub fn state(&self) -> SelectionState {
        if self.has_selection() {
            SelectionState::RangeSelected {
                start: self.start(),
                end: self.end(),
            }
        } else {
            SelectionState::CaretOnly(self.caret)
        }
    }

    /// Clamp both ends to [0..=len]
    pub fn clamped(self, len: usize) -> Self {
        Selection {
            anchor: min(self.anchor, len),
            caret: min(self.caret, len),
        }
    }
}

/// The contiguous range of paragraph indices a selection touches.
///
/// A selection that ends exactly at the start of a later paragraph selects
/// nothing of it, so that paragraph is left out.
pub fn resolve_touched_paragraphs(
    document: &Document,
    selection: Selection,
) -> RangeInclusive<usize> {
    match selection.state() {
        SelectionState::CaretOnly(caret) => {
            let index = document.paragraph_at(caret);
            index..=index
        }
        SelectionState::RangeSelected { start, end } => {
            let start_block = document.paragraph_at(start);
            let mut end_block = document.paragraph_at(end);
            if end == document.paragraph_start(end_block) && start_block != end_block {
                end_block -= 1;
            }
            start_block..=end_block
        }
    }
}
