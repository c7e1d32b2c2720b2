pub mod document;
pub mod editor;
pub mod format;
pub mod formatting;
pub mod selection;
