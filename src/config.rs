use crate::error::{Error, Result};
use crate::history::DEFAULT_UNDO_LIMIT;
use crate::richtext::format::{CharFormat, Color, FontDescriptor};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

const QUALIFIER: &str = "org";
const ORGANIZATION: &str = "Richpad";
const APPLICATION: &str = "richpad";
const CONFIG_FILE_NAME: &str = "config.toml";

/// User configuration, read from `config.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Foreground color that "make plain text" resets the selection to
    pub plain_text_color: Option<Color>,
    pub undo_limit: usize,
    /// Log filter used when RUST_LOG is not set
    pub log_level: String,
    /// Font that "make plain text" resets the selection to
    pub default_font: Option<FontDescriptor>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            plain_text_color: None,
            undo_limit: DEFAULT_UNDO_LIMIT,
            log_level: "warn".to_string(),
            default_font: None,
        }
    }
}

pub fn config_file_path() -> Option<PathBuf> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

impl Config {
    /// Load from an explicit path. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Config::default()),
            Err(source) => {
                return Err(Error::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        toml::from_str(&contents).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from the platform config directory, falling back to the defaults
    pub fn load_default() -> Self {
        let Some(path) = config_file_path() else {
            return Config::default();
        };
        match Self::load(&path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("{err}; using default configuration");
                Config::default()
            }
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| Error::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(path, self.to_toml()?).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The character format "make plain text" leaves behind
    pub fn plain_format(&self) -> CharFormat {
        CharFormat {
            foreground: self.plain_text_color,
            font: self.default_font.clone(),
            ..CharFormat::plain()
        }
    }
}
