//! Compact binary encoding.
//!
//! Three magic bytes and a version byte, followed by the
//! [borsh](https://borsh.io/) encoding of the contact list.

use std::io::{self, Write};

use borsh::{BorshDeserialize, BorshSerialize};

use crate::{
    domain::AddressBook,
    storage::{
        contact::{self, StoredContact},
        Codec, FormatError,
    },
};

const MAGIC: &[u8; 3] = b"CBK";
const VERSION: u8 = 1;

#[derive(Debug, BorshSerialize, BorshDeserialize)]
struct Body {
    contacts: Vec<StoredContact>,
}

/// The binary codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct Binary;

impl Codec for Binary {
    fn encode(&self, book: &AddressBook, writer: &mut dyn Write) -> io::Result<()> {
        writer.write_all(MAGIC)?;
        writer.write_all(&[VERSION])?;
        borsh::to_writer(
            writer,
            &Body {
                contacts: contact::contacts(book),
            },
        )
    }

    fn decode(&self, bytes: &[u8]) -> Result<AddressBook, FormatError> {
        let body = match bytes {
            [m0, m1, m2, VERSION, body @ ..] if [*m0, *m1, *m2] == *MAGIC => body,
            [m0, m1, m2, version, ..] if [*m0, *m1, *m2] == *MAGIC => {
                return Err(FormatError::Header(format!(
                    "unsupported binary version {version}"
                )));
            }
            _ => return Err(FormatError::Header("not a binary contact book".to_string())),
        };

        let Body { contacts } = borsh::from_slice(body).map_err(FormatError::Binary)?;
        contact::book_from_contacts(contacts)
    }
}
