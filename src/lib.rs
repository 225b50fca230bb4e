//! Personal contact book
//!
//! Contacts are named records with validated phone numbers and an optional
//! birthday, kept in an [`AddressBook`] and saved to a single file in one of
//! several encodings.

pub mod domain;
pub use domain::{AddressBook, Birthday, Config, Name, Phone, Record, ValidationError};

/// Saving and loading address books.
pub mod storage;
pub use storage::{Encoding, LoadError, Store};
