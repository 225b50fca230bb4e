//! Saving and loading address books.
//!
//! An [`Encoding`] picks one [`Codec`]; a [`Store`] applies it to a file.
//! Every encoding carries a format version and can represent an absent
//! birthday distinctly from any date.

mod binary;
mod codec;
mod contact;
mod delimited;
mod document;
mod store;

use std::io;

pub use binary::Binary;
pub use codec::{Codec, Encoding, UnknownEncoding};
pub use contact::StoredContact;
pub use delimited::Delimited;
pub use document::{Json, Yaml};
pub use store::Store;

use crate::domain::ValidationError;

/// The stored bytes do not form a valid address book.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// A delimited row is malformed.
    #[error("line {line}: {message}")]
    Row {
        /// The 1-based line the row starts on.
        line: usize,
        /// What is wrong with it.
        message: String,
    },

    /// The leading header or magic bytes are missing or unsupported.
    #[error("unrecognised header: {0}")]
    Header(String),

    /// The input is not valid UTF-8 text.
    #[error(transparent)]
    Utf8(#[from] std::str::Utf8Error),

    /// The JSON document is malformed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The YAML document is malformed.
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// The binary body is malformed or truncated.
    #[error("invalid binary body: {0}")]
    Binary(#[source] io::Error),

    /// A stored contact holds a value its field rejects.
    #[error("contact '{name}': {source}")]
    Invalid {
        /// The name of the offending contact.
        name: String,
        /// The rejected field.
        source: ValidationError,
    },
}

/// Errors that can occur when loading an address book.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The book file does not exist.
    #[error("address book not found")]
    NotFound,

    /// The book could not be read.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The book was read but could not be decoded.
    #[error(transparent)]
    Format(#[from] FormatError),
}
