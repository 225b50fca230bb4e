//! A file backed address book.

use std::{
    fs::File,
    io::{self, BufReader, BufWriter},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::instrument;

use crate::{
    domain::AddressBook,
    storage::{Encoding, LoadError},
};

/// One address book file in a fixed encoding.
///
/// Every save rewrites the whole file. Every load reads the whole file and
/// returns a fresh book; nothing is kept open between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    path: PathBuf,
    encoding: Encoding,
}

impl Store {
    /// Creates a store for the file at `path`.
    #[must_use]
    pub const fn new(path: PathBuf, encoding: Encoding) -> Self {
        Self { path, encoding }
    }

    /// The file the book is stored in.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The encoding used for the file.
    #[must_use]
    pub const fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Writes `book` to the file, replacing any previous content.
    ///
    /// The book is written to a temporary file in the same directory, which
    /// then replaces the old file. A failed save leaves the old file intact.
    /// Parent directories are created automatically if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written to.
    #[instrument(level = "debug", skip(self, book), fields(path = %self.path.display(), encoding = %self.encoding))]
    pub fn save(&self, book: &AddressBook) -> io::Result<()> {
        let parent = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent)?;

        let mut file = NamedTempFile::new_in(parent)?;
        self.encoding.write(book, BufWriter::new(file.as_file_mut()))?;
        file.persist(&self.path).map_err(|e| e.error)?;

        tracing::debug!(contacts = book.len(), "saved address book");
        Ok(())
    }

    /// Reads the book from the file.
    ///
    /// The result replaces, rather than merges with, any book held by the
    /// caller.
    ///
    /// # Errors
    ///
    /// - [`LoadError::NotFound`] if the file does not exist
    /// - [`LoadError::Io`] if it cannot be read
    /// - [`LoadError::Format`] if its content is not a valid book
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display(), encoding = %self.encoding))]
    pub fn load(&self) -> Result<AddressBook, LoadError> {
        let file = File::open(&self.path).map_err(|io_error| match io_error.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound,
            _ => LoadError::Io(io_error),
        })?;

        let book = self.encoding.read(BufReader::new(file))?;

        tracing::debug!(contacts = book.len(), "loaded address book");
        Ok(book)
    }

    /// Reads the book, or returns an empty one if the file does not exist yet.
    ///
    /// # Errors
    ///
    /// As [`Store::load`], except that a missing file is not an error.
    pub fn load_or_default(&self) -> Result<AddressBook, LoadError> {
        match self.load() {
            Err(LoadError::NotFound) => {
                tracing::info!("No address book at {}, starting empty", self.path.display());
                Ok(AddressBook::default())
            }
            result => result,
        }
    }
}
