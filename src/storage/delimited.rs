//! Comma separated rows.
//!
//! ```text
//! # contacts/1
//! Denis Yevtushenko,1988-09-26,0637344967
//! "Yevtushenko, Nataliia",-,0638280932,0501112233
//! ```
//!
//! The first line is a fixed header. Each following row is the name, the
//! birthday (`-` when absent), then zero or more phones. Fields containing a
//! comma, quote or line break are quoted, with embedded quotes doubled.

use std::{
    io::{self, Write},
    iter::Peekable,
    str::Chars,
};

use crate::{
    domain::AddressBook,
    storage::{
        contact::{self, StoredContact},
        Codec, FormatError,
    },
};

const HEADER: &str = "# contacts/1";
const ABSENT: &str = "-";

/// The delimited-row codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct Delimited;

impl Codec for Delimited {
    fn encode(&self, book: &AddressBook, writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{HEADER}")?;
        for contact in contact::contacts(book) {
            write_field(writer, &contact.name)?;
            writer.write_all(b",")?;
            write_field(writer, contact.birthday.as_deref().unwrap_or(ABSENT))?;
            for phone in &contact.phones {
                writer.write_all(b",")?;
                write_field(writer, phone)?;
            }
            writer.write_all(b"\n")?;
        }
        Ok(())
    }

    fn decode(&self, bytes: &[u8]) -> Result<AddressBook, FormatError> {
        let text = std::str::from_utf8(bytes)?;
        let mut rows = Rows::new(text);

        match rows.next().transpose()? {
            Some(row) if row.fields == [HEADER] => {}
            Some(row) => return Err(FormatError::Header(row.fields.join(","))),
            None => return Err(FormatError::Header("empty input".to_string())),
        }

        let contacts = rows
            .filter(|row| !matches!(row, Ok(row) if row.is_blank()))
            .map(|row| row.and_then(Row::into_contact))
            .collect::<Result<Vec<_>, _>>()?;

        contact::book_from_contacts(contacts)
    }
}

fn write_field(writer: &mut dyn Write, field: &str) -> io::Result<()> {
    if field.contains([',', '"', '\n', '\r']) {
        write!(writer, "\"{}\"", field.replace('"', "\"\""))
    } else {
        writer.write_all(field.as_bytes())
    }
}

#[derive(Debug)]
struct Row {
    line: usize,
    fields: Vec<String>,
}

impl Row {
    fn is_blank(&self) -> bool {
        self.fields.len() == 1 && self.fields[0].is_empty()
    }

    fn into_contact(self) -> Result<StoredContact, FormatError> {
        let Self { line, fields } = self;
        let mut fields = fields.into_iter();

        let (Some(name), Some(birthday)) = (fields.next(), fields.next()) else {
            return Err(FormatError::Row {
                line,
                message: "expected at least a name and a birthday".to_string(),
            });
        };

        Ok(StoredContact {
            name,
            birthday: (birthday != ABSENT).then_some(birthday),
            phones: fields.collect(),
        })
    }
}

/// Splits text into rows of fields, honouring quotes.
struct Rows<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
}

impl<'a> Rows<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
            line: 1,
        }
    }

    fn read_quoted(&mut self, start: usize, field: &mut String) -> Result<(), FormatError> {
        loop {
            match self.chars.next() {
                None => return Err(row_error(start, "unterminated quoted field")),
                Some('"') if self.chars.peek() == Some(&'"') => {
                    self.chars.next();
                    field.push('"');
                }
                Some('"') => break,
                Some(c) => {
                    if c == '\n' {
                        self.line += 1;
                    }
                    field.push(c);
                }
            }
        }

        match self.chars.peek() {
            None | Some(',' | '\n' | '\r') => Ok(()),
            Some(_) => Err(row_error(self.line, "unexpected character after closing quote")),
        }
    }

    fn read_row(&mut self) -> Result<Row, FormatError> {
        let line = self.line;
        let mut fields = Vec::new();
        let mut field = String::new();

        loop {
            match self.chars.next() {
                None => break,
                Some('\n') => {
                    self.line += 1;
                    break;
                }
                Some('\r') if self.chars.peek() == Some(&'\n') => {}
                Some(',') => fields.push(std::mem::take(&mut field)),
                Some('"') if field.is_empty() => self.read_quoted(line, &mut field)?,
                Some(c) => field.push(c),
            }
        }

        fields.push(field);
        Ok(Row { line, fields })
    }
}

fn row_error(line: usize, message: &str) -> FormatError {
    FormatError::Row {
        line,
        message: message.to_string(),
    }
}

impl Iterator for Rows<'_> {
    type Item = Result<Row, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.chars.peek()?;
        Some(self.read_row())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Record;

    fn decode(text: &str) -> Result<AddressBook, FormatError> {
        Delimited.decode(text.as_bytes())
    }

    fn encode(book: &AddressBook) -> String {
        let mut bytes = Vec::new();
        Delimited.encode(book, &mut bytes).unwrap();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn encodes_header_and_rows() {
        let mut denis = Record::new("Denis Yevtushenko", Some("1988-09-26")).unwrap();
        denis.add_phone("0637344967").unwrap();
        let mut nataliia = Record::new("Yevtushenko, Nataliia", None).unwrap();
        nataliia.add_phone("0638280932").unwrap();
        nataliia.add_phone("0501112233").unwrap();
        let book: AddressBook = [denis, nataliia].into_iter().collect();

        assert_eq!(
            encode(&book),
            "# contacts/1\n\
             Denis Yevtushenko,1988-09-26,0637344967\n\
             \"Yevtushenko, Nataliia\",-,0638280932,0501112233\n"
        );
    }

    #[test]
    fn absent_birthday_is_distinct_from_empty_field() {
        let book = decode("# contacts/1\nAnna,-\n").unwrap();
        assert!(book.find("Anna").unwrap().birthday().is_absent());

        let error = decode("# contacts/1\nAnna,\n").unwrap_err();
        assert!(matches!(error, FormatError::Invalid { .. }), "{error:?}");
    }

    #[test]
    fn decodes_quotes_and_line_breaks() {
        let book = decode("# contacts/1\r\n\"Say \"\"hi\"\"\nthere\",2000-01-01,0123456789\r\n")
            .unwrap();
        let record = book.find("Say \"hi\"\nthere").unwrap();
        assert_eq!(record.birthday().to_raw().as_deref(), Some("2000-01-01"));
        assert_eq!(record.phones()[0].as_str(), "0123456789");
    }

    #[test]
    fn skips_blank_lines() {
        let book = decode("# contacts/1\n\nAnna,-\n\nBob,-,0123456789\n").unwrap();
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn missing_header_is_rejected() {
        let error = decode("Anna,-\n").unwrap_err();
        assert!(matches!(error, FormatError::Header(_)), "{error:?}");

        let error = decode("").unwrap_err();
        assert!(matches!(error, FormatError::Header(_)), "{error:?}");
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let error = decode("# contacts/2\nAnna,-\n").unwrap_err();
        assert!(matches!(error, FormatError::Header(_)), "{error:?}");
    }

    #[test]
    fn short_row_reports_line() {
        let error = decode("# contacts/1\nAnna,-\nBob\n").unwrap_err();
        assert!(matches!(error, FormatError::Row { line: 3, .. }), "{error:?}");
    }

    #[test]
    fn unterminated_quote_is_rejected() {
        let error = decode("# contacts/1\n\"Anna,-\n").unwrap_err();
        assert!(matches!(error, FormatError::Row { line: 2, .. }), "{error:?}");
    }

    #[test]
    fn text_after_closing_quote_is_rejected() {
        let error = decode("# contacts/1\n\"Anna\"x,-\n").unwrap_err();
        assert!(matches!(error, FormatError::Row { .. }), "{error:?}");
    }

    #[test]
    fn invalid_phone_names_the_contact() {
        let error = decode("# contacts/1\nAnna,-,12345\n").unwrap_err();
        assert_eq!(
            error.to_string(),
            "contact 'Anna': Invalid phone '12345': must be exactly 10 digits, numeric only"
        );
    }
}
