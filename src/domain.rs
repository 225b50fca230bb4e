//! Domain models for the contact book.
//!
//! This module contains the validated fields, the contact record, the
//! in-memory address book and its queries, and configuration.

/// Validated scalar fields.
pub mod field;
pub use field::{Birthday, Field, Name, Phone, Rule, ValidationError, BIRTHDAY_FORMAT};

/// Contact records.
pub mod record;
pub use record::{EditPhoneError, PhoneNotFound, Record};

pub mod anniversary;

mod book;
pub use book::AddressBook;

mod config;
pub use config::{Config, ConfigError};

mod search;
