use crate::commands::Command;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::richtext::document::Document;
use crate::richtext::editor::Editor;
use crate::richtext::formatting;
use crate::richtext::selection::Selection;
use std::fs;
use std::path::{Path, PathBuf};

const UNTITLED: &str = "Untitled";

/// One open document: the editor, where it lives on disk and whether it has
/// unsaved changes
pub struct Session {
    editor: Editor,
    config: Config,
    path: Option<PathBuf>,
    /// Editor revision at the last load or save
    clean_revision: u64,
    clipboard: String,
}

impl Session {
    pub fn new(config: Config) -> Self {
        let editor = Self::make_editor(&config, Document::new());
        Session {
            editor,
            config,
            path: None,
            clean_revision: 0,
            clipboard: String::new(),
        }
    }

    /// Start a session on a plain-text file
    pub fn open(path: &Path, config: Config) -> Result<Self> {
        let mut session = Self::new(config);
        session.open_plain_text(path)?;
        Ok(session)
    }

    fn make_editor(config: &Config, document: Document) -> Editor {
        Editor::with_document(document)
            .with_undo_limit(config.undo_limit)
            .with_plain_format(config.plain_format())
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn document(&self) -> &Document {
        self.editor.document()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn clipboard(&self) -> &str {
        &self.clipboard
    }

    /// Whether the document changed since it was loaded or last saved
    pub fn is_modified(&self) -> bool {
        self.editor.revision() != self.clean_revision
    }

    /// Window title: the file name, with a trailing `*` when modified
    pub fn title(&self) -> String {
        let name = self
            .path
            .as_deref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| UNTITLED.to_string());
        if self.is_modified() {
            format!("{name}*")
        } else {
            name
        }
    }

    /// Record that the document was written to `path`
    fn mark_saved(&mut self, path: PathBuf) {
        tracing::info!(path = %path.display(), "document saved");
        self.path = Some(path);
        self.clean_revision = self.editor.revision();
    }

    /// Replace the document with an empty one
    pub fn new_document(&mut self) {
        self.editor = Self::make_editor(&self.config, Document::new());
        self.path = None;
        self.clean_revision = self.editor.revision();
    }

    /// Load a plain-text file, one paragraph per line
    pub fn open_plain_text(&mut self, path: &Path) -> Result<()> {
        let text = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let text = text.replace("\r\n", "\n");
        let document = Document::from_plain_text(text.strip_suffix('\n').unwrap_or(&text));
        tracing::info!(
            path = %path.display(),
            paragraphs = document.paragraph_count(),
            "opened plain text"
        );
        self.editor = Self::make_editor(&self.config, document);
        self.path = Some(path.to_path_buf());
        self.clean_revision = self.editor.revision();
        Ok(())
    }

    fn write_plain_text(&self, path: &Path) -> Result<()> {
        let mut text = self.document().to_plain_text();
        text.push('\n');
        fs::write(path, text).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the document back to the file it came from
    pub fn save(&mut self) -> Result<()> {
        let Some(path) = self.path.clone() else {
            return Err(Error::Untitled);
        };
        self.save_as(path)
    }

    /// Write the document to `path`, which becomes its file from now on
    pub fn save_as(&mut self, path: PathBuf) -> Result<()> {
        self.write_plain_text(&path)?;
        self.mark_saved(path);
        Ok(())
    }

    /// Write the document's text. Does not count as saving the document.
    pub fn export_plain_text(&self, path: &Path) -> Result<()> {
        self.write_plain_text(path)?;
        tracing::info!(path = %path.display(), "exported plain text");
        Ok(())
    }

    /// Run one command against the document
    pub fn execute(&mut self, command: Command) -> Result<()> {
        tracing::debug!(?command, "execute");
        match command {
            Command::New => self.new_document(),
            Command::Open(path) => self.open_plain_text(&path)?,
            Command::Save => self.save()?,
            Command::SaveAs(path) => self.save_as(path)?,
            Command::ExportPlainText(path) => self.export_plain_text(&path)?,

            Command::Undo => {
                if !self.editor.undo() {
                    tracing::debug!("nothing to undo");
                }
            }
            Command::Redo => {
                if !self.editor.redo() {
                    tracing::debug!("nothing to redo");
                }
            }
            Command::Cut => {
                if self.editor.selection().has_selection() {
                    self.clipboard = self.editor.cut();
                }
            }
            Command::Copy => {
                if self.editor.selection().has_selection() {
                    self.clipboard = self.editor.copy();
                }
            }
            Command::Paste => self.editor.paste(&self.clipboard),
            Command::SelectAll => self.editor.select_all(),

            Command::Toggle(attribute) => {
                formatting::toggle_char_attribute(&mut self.editor, attribute)
            }
            Command::Color(Some(color)) => formatting::apply_foreground(&mut self.editor, color),
            Command::Font(Some(font)) => formatting::apply_font(&mut self.editor, font),
            Command::Color(None) | Command::Font(None) => {
                tracing::debug!("dialog cancelled; nothing applied");
            }
            Command::Align(alignment) => formatting::apply_alignment(&mut self.editor, alignment),
            Command::List(style) => formatting::apply_list_style(&mut self.editor, style),
            Command::HorizontalRule => formatting::insert_horizontal_rule(&mut self.editor),
            Command::MakePlainText => formatting::make_plain_text(&mut self.editor),

            Command::Type(text) => self.editor.insert_text(&text),
            Command::Newline => self.editor.insert_newline(),
            Command::Backspace => self.editor.delete_backward(),
            Command::Delete => self.editor.delete_forward(),
            Command::Select { anchor, caret } => {
                self.editor.set_selection(Selection::new(anchor, caret))
            }
        }
        Ok(())
    }
}
