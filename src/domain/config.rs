use std::{
    io,
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::storage::Encoding;

/// Configuration for the contact book.
///
/// Controls where the book is stored, which encoding is used, and defaults
/// for listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The encoding used to save and load the book.
    pub encoding: Encoding,

    /// Path to the book.
    ///
    /// If unset, the book is `address_book.<ext>` next to the configuration,
    /// with the extension chosen by [`Config::encoding`].
    book: Option<PathBuf>,

    /// Number of records shown per page when listing.
    page_size: NonZeroUsize,

    /// How many days ahead to look when listing upcoming birthdays.
    pub upcoming_days: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            encoding: Encoding::default(),
            book: None,
            page_size: default_page_size(),
            upcoming_days: default_upcoming_days(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        Ok(toml::from_str(&content)?)
    }

    /// Loads the configuration, falling back to the defaults if the file is
    /// missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Read(e)) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            result => result,
        }
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(ConfigError::Write)
    }

    /// The path of the book, resolved relative to `root`.
    #[must_use]
    pub fn book_path(&self, root: &Path) -> PathBuf {
        self.book.as_ref().map_or_else(
            || root.join(format!("address_book.{}", self.encoding.extension())),
            |book| root.join(book),
        )
    }

    /// Sets an explicit path for the book.
    pub fn set_book(&mut self, book: PathBuf) {
        self.book = Some(book);
    }

    /// Returns the number of records per page.
    #[must_use]
    pub const fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }
}

const fn default_page_size() -> NonZeroUsize {
    match NonZeroUsize::new(10) {
        Some(size) => size,
        None => NonZeroUsize::MIN,
    }
}

const fn default_upcoming_days() -> u32 {
    7
}

/// Errors that can occur when reading or writing the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config file: {0}")]
    Read(#[source] io::Error),

    /// The file could not be written.
    #[error("Failed to write config file: {0}")]
    Write(#[source] io::Error),

    /// The file is not valid configuration TOML.
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be rendered as TOML.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default)]
        encoding: Encoding,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        book: Option<PathBuf>,

        #[serde(default = "default_page_size")]
        page_size: NonZeroUsize,

        #[serde(default = "default_upcoming_days")]
        upcoming_days: u32,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                encoding,
                book,
                page_size,
                upcoming_days,
            } => Self {
                encoding,
                book,
                page_size,
                upcoming_days,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            encoding: config.encoding,
            book: config.book,
            page_size: config.page_size,
            upcoming_days: config.upcoming_days,
        }
    }
}
