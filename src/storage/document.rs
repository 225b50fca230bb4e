//! Structured documents (JSON and YAML).

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::{
    domain::AddressBook,
    storage::{
        contact::{self, StoredContact},
        Codec, FormatError,
    },
};

/// The serialized versions of the document.
///
/// The `_version` tag is checked on load; an unknown version is rejected.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Document {
    #[serde(rename = "1")]
    V1 { contacts: Vec<StoredContact> },
}

impl From<&AddressBook> for Document {
    fn from(book: &AddressBook) -> Self {
        Self::V1 {
            contacts: contact::contacts(book),
        }
    }
}

impl TryFrom<Document> for AddressBook {
    type Error = FormatError;

    fn try_from(document: Document) -> Result<Self, Self::Error> {
        match document {
            Document::V1 { contacts } => contact::book_from_contacts(contacts),
        }
    }
}

/// The JSON document codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json;

impl Codec for Json {
    fn encode(&self, book: &AddressBook, writer: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, &Document::from(book))?;
        writer.write_all(b"\n")
    }

    fn decode(&self, bytes: &[u8]) -> Result<AddressBook, FormatError> {
        serde_json::from_slice::<Document>(bytes)?.try_into()
    }
}

/// The YAML document codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct Yaml;

impl Codec for Yaml {
    fn encode(&self, book: &AddressBook, writer: &mut dyn Write) -> io::Result<()> {
        serde_yaml::to_writer(writer, &Document::from(book)).map_err(io::Error::other)
    }

    fn decode(&self, bytes: &[u8]) -> Result<AddressBook, FormatError> {
        serde_yaml::from_slice::<Document>(bytes)?.try_into()
    }
}
