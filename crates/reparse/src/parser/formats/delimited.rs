use crate::parser::traits::*;
use crate::parser::model::FormatError;
use crate::parser::MAX_LINE_SIZE;
use csv::{ReaderBuilder, StringRecord};
use serde_json::Value;

/// TSV / CSV parser: columns are mapped positionally onto a fixed key list.
///
/// CSV follows RFC 4180 quoting; TSV splits on raw tabs with no quoting.
#[derive(Debug, Clone)]
pub struct DelimitedParser {
    kind: FormatKind,
    keys: Vec<String>,
    delimiter: u8,
    quoting: bool,
}

impl DelimitedParser {
    pub fn tsv(keys: Vec<String>) -> Result<Self, FormatError> {
        Self::new(FormatKind::Tsv, keys, b'\t', false)
    }

    pub fn csv(keys: Vec<String>) -> Result<Self, FormatError> {
        Self::new(FormatKind::Csv, keys, b',', true)
    }

    fn new(kind: FormatKind, keys: Vec<String>, delimiter: u8, quoting: bool) -> Result<Self, FormatError> {
        if keys.is_empty() {
            return Err(FormatError::MissingKeys(kind));
        }
        Ok(Self {
            kind,
            keys,
            delimiter,
            quoting,
        })
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }
}

/// Split a `keys` setting (`"a, b,c"`) into column names.
pub fn split_keys(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

impl TextParser for DelimitedParser {
    fn parse(&self, text: &str) -> Result<ParsedFields, ParseError> {
        if text.len() > MAX_LINE_SIZE {
            return Err(ParseError::LineTooLarge(text.len(), MAX_LINE_SIZE));
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .quoting(self.quoting)
            .from_reader(text.as_bytes());

        let mut record = StringRecord::new();
        match reader.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => return Err(ParseError::NoMatch),
            Err(e) => return Err(ParseError::InvalidFormat(e.to_string())),
        }

        // one line holds exactly one record
        match reader.read_record(&mut StringRecord::new()) {
            Ok(false) => {}
            Ok(true) => {
                return Err(ParseError::InvalidFormat(format!(
                    "{} text holds more than one record",
                    self.kind.as_str()
                )))
            }
            Err(e) => return Err(ParseError::InvalidFormat(e.to_string())),
        }

        if record.len() != self.keys.len() {
            return Err(ParseError::ColumnMismatch {
                expected: self.keys.len(),
                actual: record.len(),
            });
        }

        let mut fields = ParsedFields::new();
        for (key, value) in self.keys.iter().zip(record.iter()) {
            fields.insert(key.clone(), Value::String(value.to_string()));
        }
        Ok(fields)
    }

    fn format(&self) -> FormatKind {
        self.kind
    }
}
