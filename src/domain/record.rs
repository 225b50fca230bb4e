use std::fmt;

use chrono::{Local, NaiveDate};

use crate::domain::{
    anniversary,
    field::{Birthday, Name, Phone, ValidationError},
};

/// A single contact.
///
/// The name is fixed at construction; it is the contact's key in an
/// [`AddressBook`](crate::AddressBook). Phones keep their insertion order and
/// may repeat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    name: Name,
    phones: Vec<Phone>,
    birthday: Birthday,
}

impl Record {
    /// Creates a contact with no phones.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the name is empty or the birthday is
    /// present but malformed.
    pub fn new(name: &str, birthday: Option<&str>) -> Result<Self, ValidationError> {
        Ok(Self {
            name: Name::new(name)?,
            phones: Vec::new(),
            birthday: Birthday::new(birthday)?,
        })
    }

    /// The contact's name.
    #[must_use]
    pub const fn name(&self) -> &Name {
        &self.name
    }

    /// The contact's phones, in insertion order.
    #[must_use]
    pub fn phones(&self) -> &[Phone] {
        &self.phones
    }

    /// The contact's birthday.
    #[must_use]
    pub const fn birthday(&self) -> &Birthday {
        &self.birthday
    }

    /// Replaces the birthday. `None` clears it.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `raw` is malformed; the previous
    /// birthday is kept.
    pub fn set_birthday(&mut self, raw: Option<&str>) -> Result<(), ValidationError> {
        self.birthday.try_set(raw)
    }

    /// Appends a phone number.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `raw` is not a valid phone number.
    pub fn add_phone(&mut self, raw: &str) -> Result<(), ValidationError> {
        self.phones.push(Phone::new(raw)?);
        Ok(())
    }

    /// Replaces the first phone equal to `old` with `new`, in place.
    ///
    /// The lookup happens first, so a missing `old` is reported as
    /// [`EditPhoneError::NotFound`] even when `new` is also invalid.
    ///
    /// # Errors
    ///
    /// - [`EditPhoneError::NotFound`] if no phone equals `old`
    /// - [`EditPhoneError::Invalid`] if `new` is not a valid phone number
    pub fn edit_phone(&mut self, old: &str, new: &str) -> Result<(), EditPhoneError> {
        let phone = self
            .phones
            .iter_mut()
            .find(|phone| phone.as_str() == old)
            .ok_or_else(|| PhoneNotFound(old.to_string()))?;
        phone.try_set(new)?;
        Ok(())
    }

    /// Removes the first phone equal to `raw`.
    ///
    /// # Errors
    ///
    /// Returns [`PhoneNotFound`] if no phone matches.
    pub fn remove_phone(&mut self, raw: &str) -> Result<(), PhoneNotFound> {
        let index = self
            .phones
            .iter()
            .position(|phone| phone.as_str() == raw)
            .ok_or_else(|| PhoneNotFound(raw.to_string()))?;
        self.phones.remove(index);
        Ok(())
    }

    /// Finds the first phone equal to `raw`.
    #[must_use]
    pub fn find_phone(&self, raw: &str) -> Option<&Phone> {
        self.phones.iter().find(|phone| phone.as_str() == raw)
    }

    /// Whole days from `today` until the next birthday, or `None` if no
    /// birthday is recorded or the next one is past the last representable
    /// date.
    #[must_use]
    pub fn days_to_next_birthday(&self, today: NaiveDate) -> Option<i64> {
        self.birthday
            .date()
            .and_then(|birthday| anniversary::days_until(birthday, today))
    }

    /// As [`Record::days_to_next_birthday`], relative to the local date.
    #[must_use]
    pub fn days_to_birthday(&self) -> Option<i64> {
        self.days_to_next_birthday(Local::now().date_naive())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Contact name: {}, phones: ", self.name)?;
        for (i, phone) in self.phones.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{phone}")?;
        }
        if let Some(birthday) = self.birthday.to_raw() {
            write!(f, ", birthday: {birthday}")?;
        }
        Ok(())
    }
}

/// The referenced phone number is not on the record.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Phone '{0}' does not exist")]
pub struct PhoneNotFound(pub String);

/// Errors that can occur when editing a phone number.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EditPhoneError {
    /// The phone to replace is not on the record.
    #[error(transparent)]
    NotFound(#[from] PhoneNotFound),

    /// The replacement is not a valid phone number.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}
