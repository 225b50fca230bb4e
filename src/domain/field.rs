use std::{fmt, marker::PhantomData};

use chrono::NaiveDate;
use non_empty_string::NonEmptyString;

/// The fixed format accepted for birthdays.
pub const BIRTHDAY_FORMAT: &str = "%Y-%m-%d";

/// A validation rule for a [`Field`].
///
/// The rule is a pure function from raw text to the stored value. It is run
/// on construction and again on every assignment.
pub trait Rule {
    /// The value held by a field governed by this rule.
    type Value: fmt::Debug + Clone + PartialEq + Eq;

    /// Checks `raw` and converts it to the stored value.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `raw` does not satisfy the rule.
    fn parse(raw: &str) -> Result<Self::Value, ValidationError>;
}

/// A scalar value that always satisfies its [`Rule`].
pub struct Field<R: Rule> {
    value: R::Value,
    rule: PhantomData<R>,
}

impl<R: Rule> Field<R> {
    /// Validates `raw` and wraps the result.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `raw` is rejected by the rule.
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            value: R::parse(raw)?,
            rule: PhantomData,
        })
    }

    /// Replaces the value in place.
    ///
    /// On failure the previous value is kept.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `raw` is rejected by the rule.
    pub fn try_set(&mut self, raw: &str) -> Result<(), ValidationError> {
        self.value = R::parse(raw)?;
        Ok(())
    }

    /// The validated value.
    #[must_use]
    pub const fn value(&self) -> &R::Value {
        &self.value
    }
}

// Manual impls so that the marker type `R` needs no bounds of its own.
impl<R: Rule> fmt::Debug for Field<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Field").field(&self.value).finish()
    }
}

impl<R: Rule> Clone for Field<R> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            rule: PhantomData,
        }
    }
}

impl<R: Rule> PartialEq for Field<R> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<R: Rule> Eq for Field<R> {}

/// A contact's name. Any non-empty text.
#[derive(Debug)]
pub struct NameRule;

impl Rule for NameRule {
    type Value = NonEmptyString;

    fn parse(raw: &str) -> Result<Self::Value, ValidationError> {
        NonEmptyString::new(raw.to_string()).map_err(|_| ValidationError::EmptyName)
    }
}

/// A phone number: exactly ten ASCII digits.
#[derive(Debug)]
pub struct PhoneRule;

impl PhoneRule {
    const LEN: usize = 10;
}

impl Rule for PhoneRule {
    type Value = String;

    fn parse(raw: &str) -> Result<Self::Value, ValidationError> {
        if raw.len() == Self::LEN && raw.bytes().all(|b| b.is_ascii_digit()) {
            Ok(raw.to_string())
        } else {
            Err(ValidationError::Phone(raw.to_string()))
        }
    }
}

/// A calendar date in [`BIRTHDAY_FORMAT`].
#[derive(Debug)]
pub struct DateRule;

impl Rule for DateRule {
    type Value = NaiveDate;

    fn parse(raw: &str) -> Result<Self::Value, ValidationError> {
        NaiveDate::parse_from_str(raw, BIRTHDAY_FORMAT)
            .map_err(|_| ValidationError::Birthday(raw.to_string()))
    }
}

/// The unique name of a contact.
pub type Name = Field<NameRule>;

impl Name {
    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.value().as_str()
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated ten digit phone number.
pub type Phone = Field<PhoneRule>;

impl Phone {
    /// Returns the digits as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.value()
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An optional birthday.
///
/// Absent is always valid. A present birthday is always a real date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Birthday(Option<Field<DateRule>>);

impl Birthday {
    /// A birthday that has not been recorded.
    #[must_use]
    pub const fn absent() -> Self {
        Self(None)
    }

    /// Validates an optional raw date.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Birthday`] if `raw` is present but does not
    /// match [`BIRTHDAY_FORMAT`].
    pub fn new(raw: Option<&str>) -> Result<Self, ValidationError> {
        raw.map(Field::new).transpose().map(Self)
    }

    /// Replaces the birthday, keeping the old one if `raw` is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Birthday`] if `raw` is present but invalid.
    pub fn try_set(&mut self, raw: Option<&str>) -> Result<(), ValidationError> {
        *self = Self::new(raw)?;
        Ok(())
    }

    /// The stored date, if any.
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        self.0.as_ref().map(|field| *field.value())
    }

    /// The date rendered in [`BIRTHDAY_FORMAT`], if any.
    #[must_use]
    pub fn to_raw(&self) -> Option<String> {
        self.date()
            .map(|date| date.format(BIRTHDAY_FORMAT).to_string())
    }

    /// Whether no birthday is recorded.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        self.0.is_none()
    }
}

/// A value failed its field's format rule.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Names must contain at least one character.
    #[error("Invalid name: must not be empty")]
    EmptyName,

    /// The phone number is not ten digits.
    #[error("Invalid phone '{0}': must be exactly 10 digits, numeric only")]
    Phone(String),

    /// The birthday could not be parsed.
    #[error("Invalid birthday '{0}': must match format YYYY-MM-DD")]
    Birthday(String),
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("0123456789", true; "ten digits")]
    #[test_case("012345678", false; "nine digits")]
    #[test_case("01234567890", false; "eleven digits")]
    #[test_case("01234a6789", false; "letter among digits")]
    #[test_case("012-456789", false; "punctuation")]
    #[test_case("", false; "empty")]
    #[test_case("٠١٢٣٤٥٦٧٨٩", false; "non ascii digits")]
    fn phone_validation(raw: &str, valid: bool) {
        assert_eq!(Phone::new(raw).is_ok(), valid);
    }

    #[test]
    fn phone_error_mentions_rule() {
        let error = Phone::new("123").unwrap_err();
        assert_eq!(error, ValidationError::Phone("123".to_string()));
        assert!(error.to_string().contains("exactly 10 digits"));
    }

    #[test]
    fn rejected_assignment_keeps_previous_value() {
        let mut phone = Phone::new("0123456789").unwrap();
        assert!(phone.try_set("12").is_err());
        assert_eq!(phone.as_str(), "0123456789");

        phone.try_set("9876543210").unwrap();
        assert_eq!(phone.as_str(), "9876543210");
    }

    #[test]
    fn empty_name_is_rejected() {
        assert_eq!(Name::new("").unwrap_err(), ValidationError::EmptyName);
        assert_eq!(Name::new("Anna").unwrap().as_str(), "Anna");
    }

    #[test]
    fn absent_birthday_is_valid() {
        let birthday = Birthday::new(None).unwrap();
        assert!(birthday.is_absent());
        assert_eq!(birthday.to_raw(), None);
    }

    #[test_case("1988-09-26", true; "canonical format")]
    #[test_case("not-a-date", false; "garbage")]
    #[test_case("26.09.1988", false; "dotted format")]
    #[test_case("1988-02-30", false; "impossible day")]
    #[test_case("", false; "empty string")]
    fn birthday_validation(raw: &str, valid: bool) {
        assert_eq!(Birthday::new(Some(raw)).is_ok(), valid);
    }

    #[test]
    fn birthday_error_names_format() {
        let error = Birthday::new(Some("not-a-date")).unwrap_err();
        assert!(error.to_string().contains("YYYY-MM-DD"));
    }

    #[test]
    fn birthday_round_trips_through_raw() {
        let birthday = Birthday::new(Some("2014-01-04")).unwrap();
        assert_eq!(birthday.to_raw().as_deref(), Some("2014-01-04"));
        assert_eq!(birthday.date(), NaiveDate::from_ymd_opt(2014, 1, 4));
    }

    #[test]
    fn rejected_birthday_keeps_previous_value() {
        let mut birthday = Birthday::new(Some("2014-01-04")).unwrap();
        assert!(birthday.try_set(Some("04.01.2014")).is_err());
        assert_eq!(birthday.to_raw().as_deref(), Some("2014-01-04"));

        birthday.try_set(None).unwrap();
        assert!(birthday.is_absent());
    }
}
