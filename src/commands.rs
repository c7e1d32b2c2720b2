// Editor commands and the menu they are offered in

use crate::richtext::format::{Alignment, CharAttribute, Color, FontDescriptor, ListStyle};
use std::path::PathBuf;

pub const FILE_NEW: &str = "File/New";
pub const FILE_OPEN: &str = "File/Open…";
pub const FILE_SAVE: &str = "File/Save";
pub const FILE_SAVE_AS: &str = "File/Save as…";
pub const FILE_EXPORT: &str = "File/Export as plain text…";

pub const EDIT_UNDO: &str = "Edit/Undo";
pub const EDIT_REDO: &str = "Edit/Redo";
pub const EDIT_CUT: &str = "Edit/Cut";
pub const EDIT_COPY: &str = "Edit/Copy";
pub const EDIT_PASTE: &str = "Edit/Paste";
pub const EDIT_SELECT_ALL: &str = "Edit/Select all";

pub const FORMAT_BOLD: &str = "Format/Bold";
pub const FORMAT_ITALIC: &str = "Format/Italic";
pub const FORMAT_UNDERLINE: &str = "Format/Underline";
pub const FORMAT_COLOR: &str = "Format/Color…";
pub const FORMAT_FONT: &str = "Format/Font…";
pub const FORMAT_ALIGN_LEFT: &str = "Format/Align left";
pub const FORMAT_CENTER: &str = "Format/Center";
pub const FORMAT_ALIGN_RIGHT: &str = "Format/Align right";
pub const FORMAT_JUSTIFY: &str = "Format/Justify";
pub const FORMAT_DISC_LIST: &str = "Format/Disc list";
pub const FORMAT_NUMBERED_LIST: &str = "Format/Numbered list";
pub const FORMAT_HORIZONTAL_LINE: &str = "Format/Horizontal line";
pub const FORMAT_PLAIN_TEXT: &str = "Format/Make plain text";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub path: &'static str,
    pub shortcut: Option<&'static str>,
}

const fn entry(path: &'static str, shortcut: Option<&'static str>) -> MenuEntry {
    MenuEntry { path, shortcut }
}

pub const MENU: &[MenuEntry] = &[
    entry(FILE_NEW, Some("Ctrl+N")),
    entry(FILE_OPEN, Some("Ctrl+O")),
    entry(FILE_SAVE, Some("Ctrl+S")),
    entry(FILE_SAVE_AS, Some("Ctrl+Shift+S")),
    entry(FILE_EXPORT, None),
    entry(EDIT_UNDO, Some("Ctrl+Z")),
    entry(EDIT_REDO, Some("Ctrl+Shift+Z")),
    entry(EDIT_CUT, Some("Ctrl+X")),
    entry(EDIT_COPY, Some("Ctrl+C")),
    entry(EDIT_PASTE, Some("Ctrl+V")),
    entry(EDIT_SELECT_ALL, Some("Ctrl+A")),
    entry(FORMAT_BOLD, Some("Ctrl+B")),
    entry(FORMAT_ITALIC, Some("Ctrl+I")),
    entry(FORMAT_UNDERLINE, Some("Ctrl+U")),
    entry(FORMAT_COLOR, None),
    entry(FORMAT_FONT, None),
    entry(FORMAT_ALIGN_LEFT, None),
    entry(FORMAT_CENTER, None),
    entry(FORMAT_ALIGN_RIGHT, None),
    entry(FORMAT_JUSTIFY, None),
    entry(FORMAT_DISC_LIST, None),
    entry(FORMAT_NUMBERED_LIST, None),
    entry(FORMAT_HORIZONTAL_LINE, None),
    entry(FORMAT_PLAIN_TEXT, None),
];

/// Everything a session can be asked to do
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    New,
    Open(PathBuf),
    Save,
    SaveAs(PathBuf),
    ExportPlainText(PathBuf),

    Undo,
    Redo,
    Cut,
    Copy,
    Paste,
    SelectAll,

    Toggle(CharAttribute),
    /// `None` when the color dialog was cancelled
    Color(Option<Color>),
    /// `None` when the font dialog was cancelled
    Font(Option<FontDescriptor>),
    Align(Alignment),
    List(ListStyle),
    HorizontalRule,
    MakePlainText,

    Type(String),
    Newline,
    Backspace,
    Delete,
    Select { anchor: usize, caret: usize },
}

impl Command {
    /// The menu item that triggers this command, if any
    pub fn menu_path(&self) -> Option<&'static str> {
        let path = match self {
            Command::New => FILE_NEW,
            Command::Open(_) => FILE_OPEN,
            Command::Save => FILE_SAVE,
            Command::SaveAs(_) => FILE_SAVE_AS,
            Command::ExportPlainText(_) => FILE_EXPORT,
            Command::Undo => EDIT_UNDO,
            Command::Redo => EDIT_REDO,
            Command::Cut => EDIT_CUT,
            Command::Copy => EDIT_COPY,
            Command::Paste => EDIT_PASTE,
            Command::SelectAll => EDIT_SELECT_ALL,
            Command::Toggle(CharAttribute::Bold) => FORMAT_BOLD,
            Command::Toggle(CharAttribute::Italic) => FORMAT_ITALIC,
            Command::Toggle(CharAttribute::Underline) => FORMAT_UNDERLINE,
            Command::Color(_) => FORMAT_COLOR,
            Command::Font(_) => FORMAT_FONT,
            Command::Align(Alignment::Left) => FORMAT_ALIGN_LEFT,
            Command::Align(Alignment::Center) => FORMAT_CENTER,
            Command::Align(Alignment::Right) => FORMAT_ALIGN_RIGHT,
            Command::Align(Alignment::Justify) => FORMAT_JUSTIFY,
            Command::List(ListStyle::Bulleted) => FORMAT_DISC_LIST,
            Command::List(ListStyle::Numbered) => FORMAT_NUMBERED_LIST,
            Command::HorizontalRule => FORMAT_HORIZONTAL_LINE,
            Command::MakePlainText => FORMAT_PLAIN_TEXT,
            Command::List(ListStyle::None)
            | Command::Type(_)
            | Command::Newline
            | Command::Backspace
            | Command::Delete
            | Command::Select { .. } => return None,
        };
        Some(path)
    }
}
