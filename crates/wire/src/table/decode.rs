//! Table decoding
//!
//! Parses delimited text into a [`Table`]. The first record is the header.
//! Blank lines are skipped, a leading byte order mark is ignored, and both
//! `\n` and `\r\n` end a record.

use rollcall_core::{Table, TableError};
use thiserror::Error;

/// Decode error types
#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    /// Input holds no header row
    #[error("missing header row")]
    MissingHeader,

    /// A quoted cell runs to end of input
    #[error("unterminated quoted cell starting on line {line}")]
    UnterminatedQuote {
        /// Line the quoted cell starts on
        line: usize,
    },

    /// Junk after a closing quote
    #[error("unexpected character {ch:?} after closing quote on line {line}")]
    UnexpectedChar {
        /// Offending character
        ch: char,
        /// Line it appears on
        line: usize,
    },

    /// Records parsed but do not form a valid table
    #[error(transparent)]
    Table(#[from] TableError),
}

/// Decode delimited text into a table
pub fn decode_table(text: &str) -> Result<Table, DecodeError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut records = RecordParser::new(text).parse_records()?.into_iter();
    let header = records.next().ok_or(DecodeError::MissingHeader)?;
    Ok(Table::new(header, records.collect())?)
}

/// Simple record parser
struct RecordParser<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> RecordParser<'a> {
    fn new(input: &'a str) -> Self {
        RecordParser {
            input,
            pos: 0,
            line: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            if c == '\n' {
                self.line += 1;
            }
            self.pos += c.len_utf8();
        }
    }

    fn parse_records(&mut self) -> Result<Vec<Vec<String>>, DecodeError> {
        let mut records = Vec::new();
        while self.peek().is_some() {
            let (record, quoted) = self.parse_record()?;
            let blank = !quoted && record.len() == 1 && record[0].is_empty();
            if !blank {
                records.push(record);
            }
        }
        Ok(records)
    }

    /// Parse one record and consume its terminator
    fn parse_record(&mut self) -> Result<(Vec<String>, bool), DecodeError> {
        let mut fields = Vec::new();
        let mut any_quoted = false;
        loop {
            let (field, quoted) = self.parse_field()?;
            any_quoted |= quoted;
            fields.push(field);
            match self.peek() {
                Some(',') => self.advance(),
                Some('\r') => {
                    self.advance();
                    if self.peek() == Some('\n') {
                        self.advance();
                    }
                    break;
                }
                Some('\n') => {
                    self.advance();
                    break;
                }
                None => break,
                Some(ch) => {
                    return Err(DecodeError::UnexpectedChar {
                        ch,
                        line: self.line,
                    })
                }
            }
        }
        Ok((fields, any_quoted))
    }

    fn parse_field(&mut self) -> Result<(String, bool), DecodeError> {
        if self.peek() == Some('"') {
            return self.parse_quoted().map(|f| (f, true));
        }
        let start = self.pos;
        while let Some(c) = self.peek() {
            if matches!(c, ',' | '\r' | '\n') {
                break;
            }
            self.advance();
        }
        Ok((self.input[start..self.pos].to_string(), false))
    }

    fn parse_quoted(&mut self) -> Result<String, DecodeError> {
        let opened_on = self.line;
        self.advance();
        let mut field = String::new();
        loop {
            match self.peek() {
                None => return Err(DecodeError::UnterminatedQuote { line: opened_on }),
                Some('"') => {
                    self.advance();
                    if self.peek() == Some('"') {
                        field.push('"');
                        self.advance();
                    } else {
                        return Ok(field);
                    }
                }
                Some(c) => {
                    field.push(c);
                    self.advance();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_basic() {
        let table = decode_table("ID Code,Name\nA100,Ada\nB200,Grace\n").unwrap();
        assert_eq!(table.columns(), &["ID Code".to_string(), "Name".to_string()]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(1, "Name"), Some("Grace"));
    }

    #[test]
    fn test_decode_without_trailing_newline() {
        let table = decode_table("ID Code,Name\nA100,Ada").unwrap();
        assert_eq!(table.cell(0, "Name"), Some("Ada"));
    }

    #[test]
    fn test_decode_crlf_and_bom() {
        let table = decode_table("\u{feff}ID Code,Name\r\nA100,Ada\r\n").unwrap();
        assert_eq!(table.columns()[0], "ID Code");
        assert_eq!(table.cell(0, "Name"), Some("Ada"));
    }

    #[test]
    fn test_decode_skips_blank_lines() {
        let table = decode_table("ID Code,Name\n\nA100,Ada\n\n").unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_decode_quoted_cells() {
        let table =
            decode_table("ID Code,Name,Notes\nA100,\"Lovelace, Ada\",\"said \"\"hi\"\"\nthen left\"\n")
                .unwrap();
        assert_eq!(table.cell(0, "Name"), Some("Lovelace, Ada"));
        assert_eq!(table.cell(0, "Notes"), Some("said \"hi\"\nthen left"));
    }

    #[test]
    fn test_decode_empty_cells_kept() {
        let table = decode_table("ID Code,Name,Bus Check-in\nA100,,\n").unwrap();
        assert_eq!(table.cell(0, "Name"), Some(""));
        assert_eq!(table.cell(0, "Bus Check-in"), Some(""));
    }

    #[test]
    fn test_decode_pads_short_rows() {
        let table = decode_table("ID Code,Name,Assigned Day\nA100\n").unwrap();
        assert_eq!(table.cell(0, "Assigned Day"), Some(""));
    }

    #[test]
    fn test_decode_empty_input() {
        assert_eq!(decode_table("").unwrap_err(), DecodeError::MissingHeader);
        assert_eq!(decode_table("\n\n").unwrap_err(), DecodeError::MissingHeader);
    }

    #[test]
    fn test_decode_unterminated_quote() {
        let err = decode_table("ID Code,Name\nA100,\"Ada\n").unwrap_err();
        assert_eq!(err, DecodeError::UnterminatedQuote { line: 2 });
    }

    #[test]
    fn test_decode_junk_after_quote() {
        let err = decode_table("ID Code,Name\nA100,\"Ada\"x\n").unwrap_err();
        assert_eq!(err, DecodeError::UnexpectedChar { ch: 'x', line: 2 });
    }

    #[test]
    fn test_decode_wide_row() {
        let err = decode_table("ID Code,Name\nA100,Ada,extra\n").unwrap_err();
        assert!(matches!(err, DecodeError::Table(TableError::RaggedRow { row: 0, .. })));
    }

    #[test]
    fn test_decode_requires_id_column() {
        let err = decode_table("Name\nAda\n").unwrap_err();
        assert_eq!(err, DecodeError::Table(TableError::MissingIdColumn));
    }
}
