use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{AddressBook, Record},
    storage::FormatError,
};

/// A contact as written to storage.
///
/// This is the encoding-neutral shape shared by every codec. Fields are raw
/// strings; they are validated again when converted back into a [`Record`].
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct StoredContact {
    /// The contact's name.
    pub name: String,

    /// `None` when no birthday is recorded. Serialized explicitly as `null`.
    #[serde(default)]
    pub birthday: Option<String>,

    /// Phone numbers in insertion order.
    #[serde(default)]
    pub phones: Vec<String>,
}

impl From<&Record> for StoredContact {
    fn from(record: &Record) -> Self {
        Self {
            name: record.name().as_str().to_string(),
            birthday: record.birthday().to_raw(),
            phones: record
                .phones()
                .iter()
                .map(|phone| phone.as_str().to_string())
                .collect(),
        }
    }
}

impl TryFrom<StoredContact> for Record {
    type Error = FormatError;

    fn try_from(contact: StoredContact) -> Result<Self, Self::Error> {
        let StoredContact {
            name,
            birthday,
            phones,
        } = contact;

        let invalid = |source| FormatError::Invalid {
            name: name.clone(),
            source,
        };

        let mut record = Self::new(&name, birthday.as_deref()).map_err(invalid)?;
        for phone in &phones {
            record.add_phone(phone).map_err(invalid)?;
        }
        Ok(record)
    }
}

/// Snapshot every record of `book` in order.
pub fn contacts(book: &AddressBook) -> Vec<StoredContact> {
    book.records().map(StoredContact::from).collect()
}

/// Rebuild a book from stored contacts.
///
/// Later contacts replace earlier ones with the same name.
pub fn book_from_contacts(
    contacts: impl IntoIterator<Item = StoredContact>,
) -> Result<AddressBook, FormatError> {
    contacts
        .into_iter()
        .map(Record::try_from)
        .collect::<Result<AddressBook, _>>()
}
