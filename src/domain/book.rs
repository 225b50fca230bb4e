//! An in-memory collection of contacts
//!
//! The [`AddressBook`] knows nothing about storage. It keeps records in the
//! order their names were first inserted, with a name index for lookup.

use std::{collections::HashMap, num::NonZeroUsize, slice};

use chrono::NaiveDate;
use tracing::instrument;

use crate::domain::Record;

/// The unique-by-name set of contacts.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AddressBook {
    /// The records, stored contiguously in insertion order.
    records: Vec<Record>,

    /// An index from name to position in `records`.
    index: HashMap<String, usize>,
}

impl AddressBook {
    /// Creates an empty address book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty address book with room for `capacity` records.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Inserts a record, replacing any record with the same name.
    ///
    /// A replaced record keeps its position. Returns the record that was
    /// replaced, if any.
    pub fn add_record(&mut self, record: Record) -> Option<Record> {
        let name = record.name().as_str();
        if let Some(&position) = self.index.get(name) {
            tracing::debug!(name, "replacing existing contact");
            return Some(std::mem::replace(&mut self.records[position], record));
        }

        self.index.insert(name.to_string(), self.records.len());
        self.records.push(record);
        None
    }

    /// Looks up a record by exact name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Record> {
        self.index.get(name).map(|&position| &self.records[position])
    }

    /// Looks up a record by exact name, for modification.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Record> {
        self.index
            .get(name)
            .map(|&position| &mut self.records[position])
    }

    /// Removes the record with the given name, if present.
    ///
    /// Returns the removed record. Removing a missing name is not an error.
    pub fn delete(&mut self, name: &str) -> Option<Record> {
        let position = self.index.remove(name)?;
        let removed = self.records.remove(position);

        for record in &self.records[position..] {
            if let Some(i) = self.index.get_mut(record.name().as_str()) {
                *i -= 1;
            }
        }

        Some(removed)
    }

    /// All records, in insertion order.
    pub fn records(&self) -> slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// All records in consecutive pages of at most `page_size`.
    pub fn pages(&self, page_size: NonZeroUsize) -> slice::Chunks<'_, Record> {
        self.records.chunks(page_size.get())
    }

    /// The number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the book holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose next birthday is at most `within_days` after `today`.
    ///
    /// Sorted by distance; ties keep insertion order.
    #[instrument(level = "debug", skip(self))]
    pub fn upcoming_birthdays(&self, today: NaiveDate, within_days: u32) -> Vec<(&Record, i64)> {
        let mut upcoming: Vec<_> = self
            .records
            .iter()
            .filter_map(|record| {
                record
                    .days_to_next_birthday(today)
                    .filter(|&days| days <= i64::from(within_days))
                    .map(|days| (record, days))
            })
            .collect();
        upcoming.sort_by_key(|&(_, days)| days);
        upcoming
    }
}

impl<'a> IntoIterator for &'a AddressBook {
    type Item = &'a Record;
    type IntoIter = slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records()
    }
}

impl FromIterator<Record> for AddressBook {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut book = Self::with_capacity(iter.size_hint().0);
        for record in iter {
            book.add_record(record);
        }
        book
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, birthday: Option<&str>, phones: &[&str]) -> Record {
        let mut record = Record::new(name, birthday).unwrap();
        for phone in phones {
            record.add_phone(phone).unwrap();
        }
        record
    }

    fn names(book: &AddressBook) -> Vec<&str> {
        book.records().map(|r| r.name().as_str()).collect()
    }

    #[test]
    fn insert_and_lookup() {
        let mut book = AddressBook::new();
        book.add_record(record("Denis", None, &["0637344967"]));

        let found = book.find("Denis").unwrap();
        assert_eq!(found.phones()[0].as_str(), "0637344967");
        assert!(book.find("denis").is_none());
    }

    #[test]
    fn adding_existing_name_replaces_whole_record() {
        let mut book = AddressBook::new();
        book.add_record(record("Anna", Some("1990-01-01"), &["0000000001"]));
        book.add_record(record("Bob", None, &[]));

        let replaced = book.add_record(record("Anna", None, &["0000000002"]));

        assert_eq!(replaced.unwrap().phones()[0].as_str(), "0000000001");
        assert_eq!(book.len(), 2);
        assert_eq!(names(&book), ["Anna", "Bob"]);

        let anna = book.find("Anna").unwrap();
        assert!(anna.birthday().is_absent());
        assert_eq!(anna.phones().len(), 1);
        assert_eq!(anna.phones()[0].as_str(), "0000000002");
    }

    #[test]
    fn delete_keeps_index_consistent() {
        let mut book: AddressBook = ["A", "B", "C", "D"]
            .into_iter()
            .map(|name| record(name, None, &[]))
            .collect();

        assert!(book.delete("B").is_some());
        assert_eq!(names(&book), ["A", "C", "D"]);
        assert_eq!(book.find("D").unwrap().name().as_str(), "D");
        assert_eq!(book.find("C").unwrap().name().as_str(), "C");

        book.add_record(record("C", Some("2000-01-01"), &[]));
        assert_eq!(names(&book), ["A", "C", "D"]);
        assert!(!book.find("C").unwrap().birthday().is_absent());
    }

    #[test]
    fn delete_missing_name_is_a_no_op() {
        let mut book: AddressBook = std::iter::once(record("A", None, &[])).collect();
        assert!(book.delete("Z").is_none());
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn find_mut_modifies_in_place() {
        let mut book: AddressBook = std::iter::once(record("A", None, &[])).collect();
        book.find_mut("A").unwrap().add_phone("0123456789").unwrap();
        assert_eq!(book.find("A").unwrap().phones().len(), 1);
    }

    #[test]
    fn pages_split_in_order() {
        let book: AddressBook = ["A", "B", "C", "D", "E"]
            .into_iter()
            .map(|name| record(name, None, &[]))
            .collect();

        let pages: Vec<Vec<&str>> = book
            .pages(NonZeroUsize::new(2).unwrap())
            .map(|page| page.iter().map(|r| r.name().as_str()).collect())
            .collect();

        assert_eq!(pages, vec![vec!["A", "B"], vec!["C", "D"], vec!["E"]]);
    }

    #[test]
    fn pages_of_empty_book() {
        let book = AddressBook::new();
        assert_eq!(book.pages(NonZeroUsize::MIN).count(), 0);
    }

    #[test]
    fn upcoming_birthdays_sorted_by_distance() {
        let book: AddressBook = [
            record("Later", Some("1990-06-20"), &[]),
            record("Unknown", None, &[]),
            record("Today", Some("1985-06-15"), &[]),
            record("TooFar", Some("1990-07-30"), &[]),
            record("Soon", Some("2001-06-17"), &[]),
        ]
        .into_iter()
        .collect();

        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let upcoming: Vec<_> = book
            .upcoming_birthdays(today, 7)
            .into_iter()
            .map(|(record, days)| (record.name().as_str(), days))
            .collect();

        assert_eq!(upcoming, [("Today", 0), ("Soon", 2), ("Later", 5)]);
    }
}
