// Rich Text Editor
// Owns a Document together with the selection, the pending input format and
// the undo history. Formatting commands live in `formatting`.

use super::document::Document;
use super::format::CharFormat;
use super::selection::{Selection, SelectionState};
use crate::history::History;
use unicode_segmentation::UnicodeSegmentation;

/// Everything an undo step restores
#[derive(Debug, Clone)]
struct Snapshot {
    document: Document,
    selection: Selection,
    pending_format: CharFormat,
}

/// The editor with cursor state
#[derive(Debug, Clone)]
pub struct Editor {
    document: Document,
    selection: Selection,
    pending_format: CharFormat,
    plain_format: CharFormat,
    history: History<Snapshot>,
    revision: u64,
}

impl Editor {
    /// Create a new editor with an empty document
    pub fn new() -> Self {
        Self::with_document(Document::new())
    }

    /// Create an editor with an existing document, caret at the start
    pub fn with_document(document: Document) -> Self {
        let pending_format = document.cursor_format_at(0);
        Editor {
            document,
            selection: Selection::caret(0),
            pending_format,
            plain_format: CharFormat::plain(),
            history: History::new(),
            revision: 0,
        }
    }

    pub fn with_undo_limit(mut self, limit: usize) -> Self {
        self.history = History::with_limit(limit);
        self
    }

    /// Format that "make plain text" leaves on the selection
    pub fn with_plain_format(mut self, format: CharFormat) -> Self {
        self.plain_format = format;
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub(crate) fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn plain_format(&self) -> &CharFormat {
        &self.plain_format
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Set the selection (clamped to the document). The pending input format
    /// follows the caret, as it does when the user clicks somewhere.
    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection.clamped(self.document.len());
        self.pending_format = self.document.cursor_format_at(self.selection.caret);
    }

    /// Put the selection back after a block-level command. Unlike
    /// `set_selection` this keeps the pending input format.
    pub(crate) fn restore_selection(&mut self, selection: Selection) {
        self.selection = selection.clamped(self.document.len());
    }

    /// Move the caret, clearing the selection
    pub fn set_caret(&mut self, offset: usize) {
        self.set_selection(Selection::caret(offset));
    }

    pub fn select_all(&mut self) {
        self.set_selection(Selection::new(0, self.document.len()));
    }

    /// Format applied to the next typed characters
    pub fn pending_format(&self) -> &CharFormat {
        &self.pending_format
    }

    pub fn set_pending_format(&mut self, format: CharFormat) {
        self.pending_format = format;
    }

    /// The representative format of the selection: the first selected
    /// character's format, or the pending format when nothing is selected
    pub fn selection_char_format(&self) -> CharFormat {
        match self.selection.state() {
            SelectionState::CaretOnly(_) => self.pending_format.clone(),
            SelectionState::RangeSelected { start, .. } => self.document.char_format_at(start),
        }
    }

    /// Get the selected text as plain text
    pub fn selected_text(&self) -> String {
        self.document.text_in_range(self.selection.range())
    }

    // Undo

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            document: self.document.clone(),
            selection: self.selection,
            pending_format: self.pending_format.clone(),
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.document = snapshot.document;
        self.selection = snapshot.selection;
        self.pending_format = snapshot.pending_format;
    }

    /// Remember the current state as one undo step.
    /// Called right before every change to the document.
    pub(crate) fn record_undo(&mut self) {
        let snapshot = self.snapshot();
        self.history.push(snapshot);
        self.revision += 1;
    }

    /// Counter bumped by every document change, undo and redo
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Returns false if there was nothing to undo
    pub fn undo(&mut self) -> bool {
        let current = self.snapshot();
        match self.history.undo(current) {
            Some(previous) => {
                self.restore(previous);
                self.revision += 1;
                true
            }
            None => false,
        }
    }

    /// Returns false if there was nothing to redo
    pub fn redo(&mut self) -> bool {
        let current = self.snapshot();
        match self.history.redo(current) {
            Some(next) => {
                self.restore(next);
                self.revision += 1;
                true
            }
            None => false,
        }
    }

    // Text editing

    /// Insert text at the caret, replacing the selection. '\n' starts a new paragraph.
    pub fn insert_text(&mut self, text: &str) {
        if text.is_empty() && !self.selection.has_selection() {
            return;
        }
        self.record_undo();
        let start = self.selection.start();
        self.document.delete_range(self.selection.range());
        let end = self.document.insert_text(start, text, &self.pending_format);
        self.selection = Selection::caret(end);
    }

    pub fn insert_newline(&mut self) {
        self.insert_text("\n");
    }

    /// Length in chars of the grapheme cluster before (or after) the caret.
    /// A paragraph separator counts as one.
    fn grapheme_len(&self, caret: usize, backward: bool) -> usize {
        let (index, local) = self.document.locate(caret);
        let Some(paragraph) = self.document.paragraph(index) else {
            return 1;
        };
        let text = paragraph.to_plain_text();
        let split = text
            .char_indices()
            .nth(local)
            .map(|(i, _)| i)
            .unwrap_or(text.len());
        let grapheme = if backward {
            text[..split].graphemes(true).next_back()
        } else {
            text[split..].graphemes(true).next()
        };
        grapheme.map_or(1, |g| g.chars().count())
    }

    /// Delete the selection, or the grapheme before the caret
    pub fn delete_backward(&mut self) {
        if self.selection.has_selection() {
            self.delete_selection();
            return;
        }
        let caret = self.selection.caret;
        if caret == 0 {
            return;
        }
        let start = caret - self.grapheme_len(caret, true);
        self.record_undo();
        self.document.delete_range(start..caret);
        self.selection = Selection::caret(start);
    }

    /// Delete the selection, or the grapheme after the caret
    pub fn delete_forward(&mut self) {
        if self.selection.has_selection() {
            self.delete_selection();
            return;
        }
        let caret = self.selection.caret;
        if caret >= self.document.len() {
            return;
        }
        let end = caret + self.grapheme_len(caret, false);
        self.record_undo();
        self.document.delete_range(caret..end);
    }

    pub fn delete_selection(&mut self) {
        if !self.selection.has_selection() {
            return;
        }
        self.record_undo();
        let start = self.selection.start();
        self.document.delete_range(self.selection.range());
        self.selection = Selection::caret(start);
    }

    /// Cut the selected text (copy and delete)
    pub fn cut(&mut self) -> String {
        let text = self.selected_text();
        self.delete_selection();
        text
    }

    /// Copy the selected text
    pub fn copy(&self) -> String {
        self.selected_text()
    }

    /// Paste text at the caret (or replace the selection)
    pub fn paste(&mut self, text: &str) {
        self.insert_text(text);
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}
