use std::{
    fmt,
    io::{self, Read, Write},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{
    domain::AddressBook,
    storage::{Binary, Delimited, FormatError, Json, LoadError, Yaml},
};

/// Converts a whole address book to and from bytes.
pub trait Codec {
    /// Writes every record of `book` to `writer`.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails.
    fn encode(&self, book: &AddressBook, writer: &mut dyn Write) -> io::Result<()>;

    /// Rebuilds an address book from bytes produced by [`Codec::encode`].
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] if `bytes` are not a valid encoding.
    fn decode(&self, bytes: &[u8]) -> Result<AddressBook, FormatError>;
}

/// The available on-disk encodings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Comma separated rows, one contact per row.
    #[default]
    Csv,
    /// A JSON document.
    Json,
    /// A YAML document.
    Yaml,
    /// A compact binary form.
    Binary,
}

impl Encoding {
    /// Every encoding, in display order.
    pub const ALL: [Self; 4] = [Self::Csv, Self::Json, Self::Yaml, Self::Binary];

    /// The codec implementing this encoding.
    #[must_use]
    pub const fn codec(self) -> &'static dyn Codec {
        match self {
            Self::Csv => &Delimited,
            Self::Json => &Json,
            Self::Yaml => &Yaml,
            Self::Binary => &Binary,
        }
    }

    /// The conventional file extension.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Binary => "bin",
        }
    }

    /// Writes `book` to `writer` in this encoding.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails.
    pub fn write<W: Write>(self, book: &AddressBook, mut writer: W) -> io::Result<()> {
        self.codec().encode(book, &mut writer)?;
        writer.flush()
    }

    /// Reads an address book in this encoding from `reader`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] if the reader fails and
    /// [`LoadError::Format`] if the content cannot be decoded.
    pub fn read<R: Read>(self, mut reader: R) -> Result<AddressBook, LoadError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(self.codec().decode(&bytes)?)
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Binary => "binary",
        })
    }
}

impl FromStr for Encoding {
    type Err = UnknownEncoding;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|encoding| encoding.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownEncoding(s.to_string()))
    }
}

/// Error returned when parsing an unrecognised encoding name.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown encoding '{0}': expected one of csv, json, yaml, binary")]
pub struct UnknownEncoding(String);
