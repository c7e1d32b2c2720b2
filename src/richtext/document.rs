// Document Model
// An ordered sequence of paragraphs made of styled text runs, plus the
// registry of lists the paragraphs belong to.
//
// The flat text of a document joins paragraphs with a single '\n'. All
// offsets are counted in chars of that flat text.

use super::format::{BlockFormat, BlockFormatPatch, CharFormat, CharFormatPatch, ListStyle};
use std::cmp::min;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;

/// Identifier of a paragraph, only used to express list membership
pub type ElementId = usize;

/// Identifier of a list in the document's list registry
pub type ListId = usize;

/// Byte index of the `chars`-th char of `text` (or its length)
fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// A run of text with uniform character formatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub text: String,
    pub format: CharFormat,
}

impl TextRun {
    pub fn new(text: impl Into<String>, format: CharFormat) -> Self {
        TextRun {
            text: text.into(),
            format,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, CharFormat::plain())
    }

    /// Length in chars
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Split this run at the given char offset
    /// Returns (left_run, right_run)
    pub fn split_at(&self, offset: usize) -> (TextRun, TextRun) {
        let (left, right) = self.text.split_at(byte_offset(&self.text, offset));
        (
            TextRun::new(left, self.format.clone()),
            TextRun::new(right, self.format.clone()),
        )
    }
}

/// What a paragraph holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParagraphKind {
    #[default]
    Text,
    /// A horizontal line. Holds no text.
    HorizontalRule,
}

/// A paragraph (block): block format, optional list membership and content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub id: ElementId,
    pub kind: ParagraphKind,
    pub format: BlockFormat,
    pub list: Option<ListId>,
    pub runs: Vec<TextRun>,
}

impl Paragraph {
    pub fn new(id: ElementId) -> Self {
        Paragraph {
            id,
            kind: ParagraphKind::Text,
            format: BlockFormat::default(),
            list: None,
            runs: Vec::new(),
        }
    }

    pub fn horizontal_rule(id: ElementId) -> Self {
        Paragraph {
            kind: ParagraphKind::HorizontalRule,
            ..Paragraph::new(id)
        }
    }

    pub fn is_horizontal_rule(&self) -> bool {
        self.kind == ParagraphKind::HorizontalRule
    }

    pub fn with_text(mut self, text: impl Into<String>, format: CharFormat) -> Self {
        let run = TextRun::new(text, format);
        if !run.is_empty() {
            self.runs.push(run);
            self.normalize();
        }
        self
    }

    pub fn with_plain_text(self, text: impl Into<String>) -> Self {
        self.with_text(text, CharFormat::plain())
    }

    pub fn with_format(mut self, format: BlockFormat) -> Self {
        self.format = format;
        self
    }

    /// Length of the paragraph text in chars (without the separator)
    pub fn text_len(&self) -> usize {
        self.runs.iter().map(|r| r.len()).sum()
    }

    pub fn to_plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|r| r.is_empty())
    }

    /// Format of the char starting at `offset`, if there is one
    pub fn char_format_at(&self, offset: usize) -> Option<&CharFormat> {
        let mut pos = 0;
        for run in &self.runs {
            let len = run.len();
            if offset < pos + len {
                return Some(&run.format);
            }
            pos += len;
        }
        None
    }

    /// Make sure a run boundary exists at `offset`.
    /// Returns the index of the first run that starts at or after it.
    fn split_runs_at(&mut self, offset: usize) -> usize {
        let mut pos = 0;
        for i in 0..self.runs.len() {
            if offset == pos {
                return i;
            }
            let len = self.runs[i].len();
            if offset < pos + len {
                let (left, right) = self.runs[i].split_at(offset - pos);
                self.runs[i] = left;
                self.runs.insert(i + 1, right);
                return i + 1;
            }
            pos += len;
        }
        self.runs.len()
    }

    /// Drop empty runs and coalesce neighbours with equal formats
    fn normalize(&mut self) {
        let mut runs: Vec<TextRun> = Vec::with_capacity(self.runs.len());
        for run in self.runs.drain(..) {
            if run.is_empty() {
                continue;
            }
            match runs.last_mut() {
                Some(last) if last.format == run.format => last.text.push_str(&run.text),
                _ => runs.push(run),
            }
        }
        self.runs = runs;
    }

    /// Merge a partial format onto the chars in [start..end)
    pub fn merge_char_format(&mut self, start: usize, end: usize, patch: &CharFormatPatch) {
        let len = self.text_len();
        let (start, end) = (min(start, len), min(end, len));
        if start >= end {
            return;
        }
        let first = self.split_runs_at(start);
        let last = self.split_runs_at(end);
        for run in &mut self.runs[first..last] {
            run.format.merge(patch);
        }
        self.normalize();
    }

    /// Insert single-line text at a char offset
    pub fn insert_text(&mut self, offset: usize, text: &str, format: &CharFormat) {
        if text.is_empty() {
            return;
        }
        let offset = min(offset, self.text_len());
        let index = self.split_runs_at(offset);
        self.runs.insert(index, TextRun::new(text, format.clone()));
        self.normalize();
    }

    /// Delete text in [start..end)
    pub fn delete_text_range(&mut self, start: usize, end: usize) {
        let len = self.text_len();
        let (start, end) = (min(start, len), min(end, len));
        if start >= end {
            return;
        }
        let first = self.split_runs_at(start);
        let last = self.split_runs_at(end);
        self.runs.drain(first..last);
        self.normalize();
    }

    /// Split the content at a char offset, returning the right part.
    /// The left part remains in self.
    pub fn split_off(&mut self, offset: usize) -> Vec<TextRun> {
        let offset = min(offset, self.text_len());
        let index = self.split_runs_at(offset);
        self.runs.split_off(index)
    }

    fn append_runs(&mut self, runs: Vec<TextRun>) {
        self.runs.extend(runs);
        self.normalize();
    }
}

/// A list: a style plus the paragraphs that belong to it, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    pub style: ListStyle,
    pub indent: u8,
    members: Vec<ElementId>,
}

impl List {
    pub fn members(&self) -> &[ElementId] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// The rich-text document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    paragraphs: Vec<Paragraph>,
    lists: BTreeMap<ListId, List>,
    next_id: ElementId,
    next_list_id: ListId,
}

impl Document {
    /// A document holding one empty paragraph
    pub fn new() -> Self {
        Self::from_paragraphs(Vec::new())
    }

    /// Build a document from paragraphs. Paragraphs with id 0 get a fresh id;
    /// list references are dropped since the registry starts out empty.
    pub fn from_paragraphs(paragraphs: Vec<Paragraph>) -> Self {
        let mut doc = Document {
            paragraphs: Vec::new(),
            lists: BTreeMap::new(),
            next_id: 1,
            next_list_id: 1,
        };
        for paragraph in paragraphs {
            doc.push_paragraph(paragraph);
        }
        if doc.paragraphs.is_empty() {
            let id = doc.next_id();
            doc.paragraphs.push(Paragraph::new(id));
        }
        doc
    }

    /// One plain paragraph per line
    pub fn from_plain_text(text: &str) -> Self {
        Self::from_paragraphs(
            text.split('\n')
                .map(|line| Paragraph::new(0).with_plain_text(line))
                .collect(),
        )
    }

    fn next_id(&mut self) -> ElementId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append a paragraph at the end of the document
    pub fn push_paragraph(&mut self, mut paragraph: Paragraph) {
        if paragraph.id == 0 || self.index_of(paragraph.id).is_some() {
            paragraph.id = self.next_id();
        } else {
            self.next_id = self.next_id.max(paragraph.id + 1);
        }
        paragraph.list = None;
        self.paragraphs.push(paragraph);
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    pub fn paragraph(&self, index: usize) -> Option<&Paragraph> {
        self.paragraphs.get(index)
    }

    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Index of the paragraph with the given id
    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.paragraphs.iter().position(|p| p.id == id)
    }

    /// Length of the flat text in chars, separators included
    pub fn len(&self) -> usize {
        let text: usize = self.paragraphs.iter().map(|p| p.text_len()).sum();
        text + self.paragraphs.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.to_plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Offset of the first char of a paragraph
    pub fn paragraph_start(&self, index: usize) -> usize {
        self.paragraphs
            .iter()
            .take(index)
            .map(|p| p.text_len() + 1)
            .sum()
    }

    /// Offset just past the last char of a paragraph (its separator position)
    pub fn paragraph_end(&self, index: usize) -> usize {
        let len = self.paragraphs.get(index).map_or(0, |p| p.text_len());
        self.paragraph_start(index) + len
    }

    /// Index of the paragraph containing `offset`. A paragraph owns its
    /// trailing separator; offsets past the end belong to the last paragraph.
    pub fn paragraph_at(&self, offset: usize) -> usize {
        let mut start = 0;
        for (index, paragraph) in self.paragraphs.iter().enumerate() {
            let end = start + paragraph.text_len();
            if offset <= end {
                return index;
            }
            start = end + 1;
        }
        self.paragraphs.len() - 1
    }

    /// (paragraph index, char offset within that paragraph)
    pub fn locate(&self, offset: usize) -> (usize, usize) {
        let index = self.paragraph_at(offset);
        let local = offset.saturating_sub(self.paragraph_start(index));
        (index, min(local, self.paragraphs[index].text_len()))
    }

    pub fn block_format(&self, index: usize) -> BlockFormat {
        self.paragraphs
            .get(index)
            .map(|p| p.format)
            .unwrap_or_default()
    }

    pub fn merge_block_format(&mut self, index: usize, patch: &BlockFormatPatch) {
        if let Some(paragraph) = self.paragraphs.get_mut(index) {
            paragraph.format.merge(patch);
        }
    }

    // Lists

    pub fn list_of(&self, index: usize) -> Option<ListId> {
        self.paragraphs.get(index).and_then(|p| p.list)
    }

    pub fn list(&self, id: ListId) -> Option<&List> {
        self.lists.get(&id)
    }

    pub fn lists(&self) -> impl Iterator<Item = (ListId, &List)> {
        self.lists.iter().map(|(id, list)| (*id, list))
    }

    pub fn list_count(&self) -> usize {
        self.lists.len()
    }

    /// Indices of a list's member paragraphs, in document order
    pub fn list_member_indices(&self, id: ListId) -> Vec<usize> {
        self.lists.get(&id).map_or_else(Vec::new, |list| {
            list.members
                .iter()
                .filter_map(|member| self.index_of(*member))
                .collect()
        })
    }

    /// Take a paragraph out of a list. A list left without members is discarded.
    pub fn remove_from_list(&mut self, list_id: ListId, index: usize) {
        let Some(paragraph) = self.paragraphs.get_mut(index) else {
            return;
        };
        if paragraph.list != Some(list_id) {
            return;
        }
        paragraph.list = None;
        let id = paragraph.id;
        if let Some(list) = self.lists.get_mut(&list_id) {
            list.members.retain(|member| *member != id);
            if list.members.is_empty() {
                self.lists.remove(&list_id);
            }
        }
    }

    /// Create a new list whose first member is the paragraph at `anchor`
    pub fn create_list(&mut self, anchor: usize, style: ListStyle, indent: u8) -> ListId {
        let anchor = min(anchor, self.paragraphs.len() - 1);
        if let Some(current) = self.paragraphs[anchor].list {
            self.remove_from_list(current, anchor);
        }
        let list_id = self.next_list_id;
        self.next_list_id += 1;
        self.lists.insert(
            list_id,
            List {
                style,
                indent,
                members: vec![self.paragraphs[anchor].id],
            },
        );
        self.paragraphs[anchor].list = Some(list_id);
        list_id
    }

    /// Add a paragraph to an existing list, keeping members in document order
    pub fn add_to_list(&mut self, list_id: ListId, index: usize) {
        let Some(list) = self.lists.get(&list_id) else {
            tracing::warn!(list_id, index, "add_to_list: no such list");
            return;
        };
        let Some(paragraph) = self.paragraphs.get(index) else {
            return;
        };
        let id = paragraph.id;
        match paragraph.list {
            Some(current) if current == list_id => return,
            _ => {}
        }
        let position = list
            .members
            .iter()
            .position(|member| self.index_of(*member).is_some_and(|i| i > index))
            .unwrap_or(list.members.len());

        if let Some(current) = self.paragraphs[index].list {
            self.remove_from_list(current, index);
        }
        if let Some(list) = self.lists.get_mut(&list_id) {
            list.members.insert(position, id);
            self.paragraphs[index].list = Some(list_id);
        }
    }

    // Character formats

    /// Format of the char at `offset`. At a paragraph end this falls back to
    /// the last char of the paragraph; an empty paragraph reports the plain format.
    pub fn char_format_at(&self, offset: usize) -> CharFormat {
        let (index, local) = self.locate(offset);
        let paragraph = &self.paragraphs[index];
        paragraph
            .char_format_at(local)
            .or_else(|| local.checked_sub(1).and_then(|l| paragraph.char_format_at(l)))
            .cloned()
            .unwrap_or_default()
    }

    /// Format a caret at `offset` picks up: the char before it, or the char
    /// after it at the start of a paragraph.
    pub fn cursor_format_at(&self, offset: usize) -> CharFormat {
        let (index, local) = self.locate(offset);
        let paragraph = &self.paragraphs[index];
        local
            .checked_sub(1)
            .and_then(|l| paragraph.char_format_at(l))
            .or_else(|| paragraph.char_format_at(local))
            .cloned()
            .unwrap_or_default()
    }

    /// Merge a partial format onto every char in `range`
    pub fn merge_char_format(&mut self, range: Range<usize>, patch: &CharFormatPatch) {
        let end = min(range.end, self.len());
        if range.start >= end {
            return;
        }
        let (first, first_local) = self.locate(range.start);
        let (last, last_local) = self.locate(end);
        for index in first..=last {
            let from = if index == first { first_local } else { 0 };
            let to = if index == last {
                last_local
            } else {
                self.paragraphs[index].text_len()
            };
            self.paragraphs[index].merge_char_format(from, to, patch);
        }
    }

    // Text

    /// The flat text in `range`, paragraph breaks as '\n'
    pub fn text_in_range(&self, range: Range<usize>) -> String {
        self.to_plain_text()
            .chars()
            .skip(range.start)
            .take(range.end.saturating_sub(range.start))
            .collect()
    }

    /// Split the paragraph containing `offset` in two. The new paragraph
    /// inherits the block format and list membership.
    pub fn split_paragraph(&mut self, offset: usize) {
        let (index, local) = self.locate(offset);
        let tail = self.paragraphs[index].split_off(local);
        let id = self.next_id();
        let mut paragraph = Paragraph::new(id).with_format(self.paragraphs[index].format);
        paragraph.runs = tail;
        self.paragraphs.insert(index + 1, paragraph);
        if let Some(list) = self.paragraphs[index].list {
            self.add_to_list(list, index + 1);
        }
    }

    /// Insert text at `offset`; each '\n' starts a new paragraph.
    /// Returns the offset just past the inserted text.
    pub fn insert_text(&mut self, offset: usize, text: &str, format: &CharFormat) -> usize {
        let offset = min(offset, self.len());
        let mut position = offset;
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                self.split_paragraph(position);
                position += 1;
            }
            let (mut index, mut local) = self.locate(position);
            if self.paragraphs[index].is_horizontal_rule() && !line.is_empty() {
                // text typed on a line goes into a new paragraph below it
                self.split_paragraph(position);
                position += 1;
                (index, local) = (index + 1, 0);
            }
            self.paragraphs[index].insert_text(local, line, format);
            position += line.chars().count();
        }
        position
    }

    /// Delete [start..end) across paragraphs. Paragraphs fully or partially
    /// covered after the first are merged into it and leave their lists.
    pub fn delete_range(&mut self, range: Range<usize>) {
        let len = self.len();
        let (start, end) = (min(range.start, len), min(range.end, len));
        if start >= end {
            return;
        }
        let (first, first_local) = self.locate(start);
        let (last, last_local) = self.locate(end);

        if first == last {
            self.paragraphs[first].delete_text_range(first_local, last_local);
            return;
        }

        let tail = self.paragraphs[last].split_off(last_local);
        let first_len = self.paragraphs[first].text_len();
        self.paragraphs[first].delete_text_range(first_local, first_len);

        for index in (first + 1..=last).rev() {
            if let Some(list) = self.paragraphs[index].list {
                self.remove_from_list(list, index);
            }
            self.paragraphs.remove(index);
        }
        if !tail.is_empty() {
            self.paragraphs[first].kind = ParagraphKind::Text;
        }
        self.paragraphs[first].append_runs(tail);
    }

    /// Insert a horizontal line at `offset`, splitting the paragraph there.
    /// Returns the offset of the paragraph below the line.
    pub fn insert_horizontal_rule(&mut self, offset: usize) -> usize {
        let offset = min(offset, self.len());
        self.split_paragraph(offset);
        let index = self.paragraph_at(offset);
        let id = self.next_id();
        self.paragraphs.insert(index + 1, Paragraph::horizontal_rule(id));
        offset + 2
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Document (paragraphs: {}, lists: {}):",
            self.paragraphs.len(),
            self.lists.len()
        )?;
        for (i, paragraph) in self.paragraphs.iter().enumerate() {
            write!(f, "  [{}] {}", i, paragraph.format.alignment)?;
            if paragraph.format.indent > 0 {
                write!(f, " indent={}", paragraph.format.indent)?;
            }
            if let Some(list_id) = paragraph.list {
                let style = self.lists.get(&list_id).map(|l| l.style).unwrap_or_default();
                write!(f, " list#{}({})", list_id, style)?;
            }
            write!(f, ":")?;
            if paragraph.is_horizontal_rule() {
                writeln!(f, " ---")?;
                continue;
            }
            if paragraph.runs.is_empty() {
                write!(f, " \"\"")?;
            }
            for run in &paragraph.runs {
                write!(f, " {:?}{}", run.text, run.format)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Every list member points back at its list and vice versa
#[cfg(test)]
pub(crate) fn assert_lists_consistent(doc: &Document) {
    for (list_id, list) in doc.lists() {
        assert!(!list.is_empty());
        for member in list.members() {
            let index = doc.index_of(*member).expect("member exists");
            assert_eq!(doc.list_of(index), Some(list_id));
        }
    }
    for (index, paragraph) in doc.paragraphs().iter().enumerate() {
        if let Some(list_id) = paragraph.list {
            let members = doc.list_member_indices(list_id);
            assert!(members.contains(&index));
        }
    }
}
