//! Substring search over names and phone numbers.

use crate::domain::{AddressBook, Record};

impl AddressBook {
    /// Finds every record whose name contains `query` (ignoring case) or
    /// whose phone numbers contain it.
    ///
    /// Each matching record appears once, in book order. An empty query
    /// matches everything.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Record> {
        let query = Query::new(query);
        self.records().filter(|record| query.matches(record)).collect()
    }
}

struct Query<'a> {
    raw: &'a str,
    folded: String,
}

impl<'a> Query<'a> {
    fn new(raw: &'a str) -> Self {
        Self {
            raw,
            folded: raw.to_lowercase(),
        }
    }

    fn matches(&self, record: &Record) -> bool {
        record
            .name()
            .as_str()
            .to_lowercase()
            .contains(&self.folded)
            || record
                .phones()
                .iter()
                .any(|phone| phone.as_str().contains(self.raw))
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use crate::domain::{AddressBook, Record};

    fn book() -> AddressBook {
        let mut anna = Record::new("Anna Karenina", None).unwrap();
        anna.add_phone("0123456789").unwrap();
        anna.add_phone("0123000000").unwrap();

        let mut denis = Record::new("Denis", Some("1988-09-26")).unwrap();
        denis.add_phone("0637344967").unwrap();

        let hannah = Record::new("HANNAH", None).unwrap();

        [anna, denis, hannah].into_iter().collect()
    }

    fn search<'a>(book: &'a AddressBook, query: &str) -> Vec<&'a str> {
        book.search(query)
            .into_iter()
            .map(|record| record.name().as_str())
            .collect()
    }

    #[test_case("ann", &["Anna Karenina", "HANNAH"]; "name ignores case")]
    #[test_case("123", &["Anna Karenina"]; "phone substring matched once")]
    #[test_case("0637", &["Denis"]; "phone prefix")]
    #[test_case("", &["Anna Karenina", "Denis", "HANNAH"]; "empty query matches all")]
    #[test_case("zzz", &[]; "no match is empty")]
    #[test_case("DEN", &["Denis"]; "upper case query")]
    fn search_matches(query: &str, expected: &[&str]) {
        let book = book();
        assert_eq!(search(&book, query), expected);
    }

    #[test]
    fn record_matching_name_and_phone_appears_once() {
        let mut record = Record::new("0123", None).unwrap();
        record.add_phone("0123456789").unwrap();
        record.add_phone("0123456780").unwrap();
        let book: AddressBook = std::iter::once(record).collect();

        assert_eq!(book.search("0123").len(), 1);
    }
}
