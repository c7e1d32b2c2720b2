// Selection-scoped formatting
// Block formats and list membership are applied to every paragraph the
// selection touches; character formats to the selected characters (or the
// pending input format when there is only a caret).

use super::editor::Editor;
use super::format::{
    Alignment, BlockFormatPatch, CharAttribute, CharFormatPatch, Color, FontDescriptor, ListStyle,
};
use super::selection::{SelectionState, resolve_touched_paragraphs};

/// Indent level of lists created from the menu
pub const LIST_INDENT: u8 = 1;

/// Set the alignment of every touched paragraph, keeping indent and list membership
pub fn apply_alignment(editor: &mut Editor, alignment: Alignment) {
    let touched = resolve_touched_paragraphs(editor.document(), editor.selection());
    tracing::debug!(%alignment, ?touched, "apply alignment");

    editor.record_undo();
    let patch = BlockFormatPatch::alignment(alignment);
    let document = editor.document_mut();
    for index in touched {
        document.merge_block_format(index, &patch);
    }
}

/// Put every touched paragraph into one new list of the given style.
///
/// Paragraphs are first taken out of whatever list they were in, so the
/// result is always a single homogeneous list.
pub fn apply_list_style(editor: &mut Editor, style: ListStyle) {
    let selection = editor.selection();
    let touched = resolve_touched_paragraphs(editor.document(), selection);
    tracing::debug!(%style, ?touched, "apply list style");

    editor.record_undo();
    let document = editor.document_mut();
    for index in touched.clone() {
        if let Some(list) = document.list_of(index) {
            document.remove_from_list(list, index);
        }
    }

    let list = document.create_list(*touched.start(), style, LIST_INDENT);
    for index in touched.skip(1) {
        document.add_to_list(list, index);
    }

    editor.restore_selection(selection);
}

/// Flip bold, italic or underline.
///
/// With a selection the new value is decided by the selection's
/// representative format and then applied to every selected character.
pub fn toggle_char_attribute(editor: &mut Editor, attribute: CharAttribute) {
    match editor.selection().state() {
        SelectionState::CaretOnly(_) => {
            let mut format = editor.pending_format().clone();
            format.toggle(attribute);
            editor.set_pending_format(format);
        }
        SelectionState::RangeSelected { start, end } => {
            let selection = editor.selection();
            let value = !editor.selection_char_format().attribute(attribute);
            tracing::debug!(%attribute, value, start, end, "toggle char attribute");

            editor.record_undo();
            editor
                .document_mut()
                .merge_char_format(start..end, &CharFormatPatch::attribute(attribute, value));
            editor.set_selection(selection);
        }
    }
}

/// Merge a partial character format onto the selection, or onto the
/// pending format when there is only a caret
pub fn merge_char_format(editor: &mut Editor, patch: &CharFormatPatch) {
    match editor.selection().state() {
        SelectionState::CaretOnly(_) => {
            let mut format = editor.pending_format().clone();
            format.merge(patch);
            editor.set_pending_format(format);
        }
        SelectionState::RangeSelected { start, end } => {
            let selection = editor.selection();
            editor.record_undo();
            editor.document_mut().merge_char_format(start..end, patch);
            editor.set_selection(selection);
        }
    }
}

pub fn apply_foreground(editor: &mut Editor, color: Color) {
    tracing::debug!(%color, "apply foreground");
    merge_char_format(editor, &CharFormatPatch::foreground(color));
}

pub fn apply_font(editor: &mut Editor, font: FontDescriptor) {
    tracing::debug!(%font, "apply font");
    merge_char_format(editor, &CharFormatPatch::font(font));
}

/// Strip character formatting.
///
/// With only a caret the pending format is reset. With a selection the
/// selected text is deleted and reinserted in the editor's plain format;
/// the caret ends up after it.
pub fn make_plain_text(editor: &mut Editor) {
    match editor.selection().state() {
        SelectionState::CaretOnly(_) => editor.set_pending_format(Default::default()),
        SelectionState::RangeSelected { start, end } => {
            let text = editor.selected_text();
            let mut format = editor.selection_char_format();
            format.merge(&CharFormatPatch::replace_with(editor.plain_format()));
            tracing::debug!(start, end, "make plain text");

            editor.record_undo();
            let document = editor.document_mut();
            document.delete_range(start..end);
            let caret = document.insert_text(start, &text, &format);
            editor.set_caret(caret);
        }
    }
}

/// Insert a horizontal line at the caret, replacing the selection.
/// The caret ends up at the start of the paragraph below the line.
pub fn insert_horizontal_rule(editor: &mut Editor) {
    let range = editor.selection().range();
    tracing::debug!(?range, "insert horizontal rule");

    editor.record_undo();
    let document = editor.document_mut();
    document.delete_range(range.clone());
    let caret = document.insert_horizontal_rule(range.start);
    editor.set_caret(caret);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::richtext::document::{Document, Paragraph, TextRun, assert_lists_consistent};
    use crate::richtext::format::{BlockFormat, CharFormat};
    use crate::richtext::selection::Selection;

    fn editor(text: &str) -> Editor {
        Editor::with_document(Document::from_plain_text(text))
    }

    fn members(editor: &Editor, index: usize) -> Vec<usize> {
        let list = editor.document().list_of(index).expect("paragraph is in a list");
        editor.document().list_member_indices(list)
    }

    #[test]
    fn test_alignment_with_caret_only_touches_caret_paragraph() {
        let mut editor = editor("One\nTwo\nThree");
        editor.set_caret(5);
        let len = editor.document().len();

        apply_alignment(&mut editor, Alignment::Right);

        let doc = editor.document();
        assert_eq!(doc.block_format(0).alignment, Alignment::Left);
        assert_eq!(doc.block_format(1).alignment, Alignment::Right);
        assert_eq!(doc.block_format(2).alignment, Alignment::Left);
        assert_eq!(doc.len(), len);
        assert_eq!(editor.selection(), Selection::caret(5));
    }

    #[test]
    fn test_alignment_preserves_indent_and_list() {
        let doc = Document::from_paragraphs(vec![
            Paragraph::new(0)
                .with_plain_text("indented")
                .with_format(BlockFormat {
                    alignment: Alignment::Left,
                    indent: 2,
                }),
        ]);
        let mut editor = Editor::with_document(doc);
        apply_list_style(&mut editor, ListStyle::Bulleted);
        apply_alignment(&mut editor, Alignment::Center);

        let format = editor.document().block_format(0);
        assert_eq!(format.alignment, Alignment::Center);
        assert_eq!(format.indent, 2);
        assert!(editor.document().list_of(0).is_some());
        assert_lists_consistent(editor.document());
    }

    #[test]
    fn test_alignment_over_selection_skips_trailing_boundary_paragraph() {
        let mut editor = editor("AAA\nBBB\nCCC");
        editor.set_selection(Selection::new(0, 8));
        apply_alignment(&mut editor, Alignment::Justify);

        let doc = editor.document();
        assert_eq!(doc.block_format(0).alignment, Alignment::Justify);
        assert_eq!(doc.block_format(1).alignment, Alignment::Justify);
        assert_eq!(doc.block_format(2).alignment, Alignment::Left);
        assert_eq!(editor.selection(), Selection::new(0, 8));
    }

    #[test]
    fn test_list_from_caret() {
        let mut editor = editor("One\nTwo");
        editor.set_caret(6);
        apply_list_style(&mut editor, ListStyle::Numbered);

        let doc = editor.document();
        assert_eq!(doc.list_of(0), None);
        assert_eq!(members(&editor, 1), vec![1]);
        let list = doc.list(doc.list_of(1).unwrap()).unwrap();
        assert_eq!(list.style, ListStyle::Numbered);
        assert_eq!(list.indent, LIST_INDENT);
        assert_eq!(editor.document().paragraph_count(), 2);
        assert_lists_consistent(doc);
    }

    #[test]
    fn test_list_from_caret_replaces_existing_membership() {
        let mut editor = editor("One\nTwo");
        editor.select_all();
        apply_list_style(&mut editor, ListStyle::Bulleted);
        let old = editor.document().list_of(0).unwrap();

        editor.set_caret(0);
        apply_list_style(&mut editor, ListStyle::Numbered);

        let doc = editor.document();
        assert_eq!(doc.list_member_indices(old), vec![1]);
        assert_ne!(doc.list_of(0), Some(old));
        assert_eq!(members(&editor, 0), vec![0]);
        assert_lists_consistent(doc);
    }

    #[test]
    fn test_list_unifies_existing_lists() {
        let mut editor = editor("P1\nP2\nP3");
        editor.set_caret(0);
        apply_list_style(&mut editor, ListStyle::Bulleted);
        let a = editor.document().list_of(0).unwrap();
        editor.set_caret(6);
        apply_list_style(&mut editor, ListStyle::Numbered);
        let b = editor.document().list_of(2).unwrap();

        editor.select_all();
        apply_list_style(&mut editor, ListStyle::Bulleted);

        let doc = editor.document();
        assert!(doc.list(a).is_none());
        assert!(doc.list(b).is_none());
        assert_eq!(doc.list_count(), 1);
        assert_eq!(members(&editor, 0), vec![0, 1, 2]);
        let list = doc.list(doc.list_of(0).unwrap()).unwrap();
        assert_eq!(list.style, ListStyle::Bulleted);
        assert_lists_consistent(doc);
    }

    #[test]
    fn test_list_excludes_paragraph_selection_merely_touches() {
        let mut editor = editor("One\nTwo\nThree");
        editor.set_selection(Selection::new(0, 8));
        apply_list_style(&mut editor, ListStyle::Numbered);

        assert_eq!(members(&editor, 0), vec![0, 1]);
        assert_eq!(editor.document().list_of(2), None);
        assert_eq!(editor.selection(), Selection::new(0, 8));
        assert_lists_consistent(editor.document());
    }

    #[test]
    fn test_list_keeps_paragraph_count() {
        let mut editor = editor("a\nb\nc\nd");
        editor.set_selection(Selection::new(2, 5));
        apply_list_style(&mut editor, ListStyle::Bulleted);
        assert_eq!(editor.document().paragraph_count(), 4);
        assert_eq!(members(&editor, 1), vec![1, 2]);
        assert_lists_consistent(editor.document());
    }

    #[test]
    fn test_list_over_part_of_a_list_leaves_the_rest_in_it() {
        let mut editor = editor("a\nb\nc\nd");
        editor.select_all();
        apply_list_style(&mut editor, ListStyle::Bulleted);
        let outer = editor.document().list_of(0).unwrap();

        editor.set_selection(Selection::new(2, 5));
        apply_list_style(&mut editor, ListStyle::Numbered);

        let doc = editor.document();
        assert_eq!(doc.list_member_indices(outer), vec![0, 3]);
        assert_eq!(doc.list(outer).unwrap().style, ListStyle::Bulleted);
        let inner = doc.list_of(1).unwrap();
        assert_ne!(inner, outer);
        assert_eq!(doc.list_member_indices(inner), vec![1, 2]);
        assert_eq!(doc.list(inner).unwrap().style, ListStyle::Numbered);
        assert_eq!(doc.list_count(), 2);
        assert_lists_consistent(doc);
    }

    #[test]
    fn test_list_with_caret_only_keeps_pending_format() {
        let mut editor = editor("ab");
        editor.set_caret(2);
        toggle_char_attribute(&mut editor, CharAttribute::Bold);
        apply_list_style(&mut editor, ListStyle::Bulleted);

        assert!(editor.pending_format().bold);
        editor.insert_text("X");
        assert!(editor.document().char_format_at(2).bold);
        assert!(!editor.document().char_format_at(1).bold);
        assert_lists_consistent(editor.document());
    }

    #[test]
    fn test_toggle_twice_restores_value() {
        let mut editor = editor("Hello world");
        editor.set_selection(Selection::new(0, 5));

        toggle_char_attribute(&mut editor, CharAttribute::Bold);
        assert!(editor.document().char_format_at(0).bold);
        assert!(editor.document().char_format_at(4).bold);
        assert!(!editor.document().char_format_at(5).bold);
        assert_eq!(editor.selection(), Selection::new(0, 5));

        toggle_char_attribute(&mut editor, CharAttribute::Bold);
        assert!(!editor.document().char_format_at(0).bold);
        assert_eq!(editor.document().paragraphs()[0].runs.len(), 1);
    }

    #[test]
    fn test_toggle_keeps_backwards_selection() {
        let mut editor = editor("Hello");
        editor.set_selection(Selection::new(5, 1));
        toggle_char_attribute(&mut editor, CharAttribute::Italic);
        assert_eq!(editor.selection(), Selection::new(5, 1));
        assert!(editor.document().char_format_at(1).italic);
        assert!(!editor.document().char_format_at(0).italic);
    }

    #[test]
    fn test_toggle_uses_first_character_of_mixed_selection() {
        let mut editor = editor("abcd");
        editor.set_selection(Selection::new(2, 4));
        toggle_char_attribute(&mut editor, CharAttribute::Underline);

        // "ab" plain, "cd" underlined: the first char decides
        editor.set_selection(Selection::new(0, 4));
        toggle_char_attribute(&mut editor, CharAttribute::Underline);
        for offset in 0..4 {
            assert!(editor.document().char_format_at(offset).underline);
        }
    }

    #[test]
    fn test_toggle_only_changes_named_attribute() {
        let mut editor = editor("ab");
        editor.set_selection(Selection::new(1, 2));
        toggle_char_attribute(&mut editor, CharAttribute::Italic);
        editor.set_selection(Selection::new(0, 2));
        toggle_char_attribute(&mut editor, CharAttribute::Bold);

        assert!(!editor.document().char_format_at(0).italic);
        assert!(editor.document().char_format_at(1).italic);
        assert!(editor.document().char_format_at(1).bold);
    }

    #[test]
    fn test_toggle_with_caret_only_changes_pending_format() {
        let mut editor = editor("abc");
        editor.set_caret(1);
        toggle_char_attribute(&mut editor, CharAttribute::Bold);

        assert!(editor.pending_format().bold);
        assert!(!editor.document().char_format_at(0).bold);
        assert!(!editor.can_undo());

        editor.insert_text("X");
        assert!(editor.document().char_format_at(1).bold);
    }

    #[test]
    fn test_toggle_across_paragraphs() {
        let mut editor = editor("First para\nSecond\nThird para");
        editor.set_selection(Selection::new(3, 20));
        toggle_char_attribute(&mut editor, CharAttribute::Bold);

        let doc = editor.document();
        assert_eq!(doc.paragraphs()[0].runs[0], TextRun::plain("Fir"));
        assert!(doc.paragraphs()[1].runs.iter().all(|r| r.format.bold));
        assert_eq!(doc.paragraphs()[2].runs[0].text, "Th");
        assert!(doc.paragraphs()[2].runs[0].format.bold);
        assert!(!doc.paragraphs()[2].runs[1].format.bold);
    }

    #[test]
    fn test_color_and_font_keep_selection() {
        let mut editor = editor("colorful");
        editor.set_selection(Selection::new(0, 5));
        apply_foreground(&mut editor, Color::rgb(255, 0, 0));
        apply_font(&mut editor, FontDescriptor::new("Serif", 14));

        let format = editor.document().char_format_at(0);
        assert_eq!(format.foreground, Some(Color::rgb(255, 0, 0)));
        assert_eq!(format.font, Some(FontDescriptor::new("Serif", 14)));
        assert_eq!(editor.document().char_format_at(5), CharFormat::plain());
        assert_eq!(editor.selection(), Selection::new(0, 5));
    }

    #[test]
    fn test_color_with_caret_only_sets_pending_format() {
        let mut editor = editor("x");
        apply_foreground(&mut editor, Color::WHITE);
        assert_eq!(editor.pending_format().foreground, Some(Color::WHITE));
        assert_eq!(editor.document().char_format_at(0).foreground, None);
    }

    #[test]
    fn test_make_plain_text_over_selection() {
        let mut editor = editor("styled text\nnext");
        editor.set_selection(Selection::new(0, 14));
        toggle_char_attribute(&mut editor, CharAttribute::Bold);
        apply_foreground(&mut editor, Color::rgb(0, 0, 255));
        let len = editor.document().len();

        make_plain_text(&mut editor);

        let doc = editor.document();
        assert_eq!(doc.to_plain_text(), "styled text\nnext");
        assert_eq!(doc.len(), len);
        for offset in 0..len {
            assert_eq!(doc.char_format_at(offset), CharFormat::plain());
        }
        assert_eq!(editor.selection(), Selection::caret(14));
    }

    #[test]
    fn test_make_plain_text_uses_configured_plain_format() {
        let plain = CharFormat {
            foreground: Some(Color::WHITE),
            font: Some(FontDescriptor::new("Sans", 11)),
            ..Default::default()
        };
        let mut editor = Editor::with_document(Document::from_plain_text("abc"))
            .with_plain_format(plain.clone());
        editor.select_all();
        toggle_char_attribute(&mut editor, CharAttribute::Italic);
        make_plain_text(&mut editor);
        assert_eq!(editor.document().char_format_at(1), plain);
    }

    #[test]
    fn test_make_plain_text_with_caret_resets_pending_format() {
        let mut editor = editor("abc");
        toggle_char_attribute(&mut editor, CharAttribute::Bold);
        apply_foreground(&mut editor, Color::BLACK);
        make_plain_text(&mut editor);
        assert_eq!(editor.pending_format(), &CharFormat::plain());
        assert_eq!(editor.document().to_plain_text(), "abc");
    }

    #[test]
    fn test_formatting_is_undoable() {
        let mut editor = editor("One\nTwo");
        let before = editor.document().clone();
        editor.select_all();
        apply_list_style(&mut editor, ListStyle::Numbered);
        apply_alignment(&mut editor, Alignment::Center);
        assert_lists_consistent(editor.document());
        assert!(editor.undo());
        assert!(editor.undo());
        assert_eq!(editor.document(), &before);
    }

    #[test]
    fn test_horizontal_rule_replaces_selection() {
        let mut editor = editor("abXXcd");
        editor.set_selection(Selection::new(4, 2));
        insert_horizontal_rule(&mut editor);

        let doc = editor.document();
        assert_eq!(doc.paragraph_count(), 3);
        assert!(doc.paragraphs()[1].is_horizontal_rule());
        assert_eq!(doc.to_plain_text(), "ab\n\ncd");
        assert_eq!(editor.selection(), Selection::caret(4));

        editor.insert_text("!");
        assert_eq!(editor.document().to_plain_text(), "ab\n\n!cd");
        assert!(editor.undo());
        assert!(editor.undo());
        assert_eq!(editor.document().to_plain_text(), "abXXcd");
    }
}
