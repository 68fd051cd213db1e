use crate::parser::traits::*;
use crate::parser::MAX_LINE_SIZE;
use serde_json::Value;

/// Labeled Tab-Separated Values parser (`host:10.0.0.1\tstatus:200`).
#[derive(Debug, Clone, Default)]
pub struct LtsvParser;

impl TextParser for LtsvParser {
    fn parse(&self, text: &str) -> Result<ParsedFields, ParseError> {
        if text.len() > MAX_LINE_SIZE {
            return Err(ParseError::LineTooLarge(text.len(), MAX_LINE_SIZE));
        }

        let text = text.trim_end_matches(['\r', '\n']);
        if text.is_empty() {
            return Err(ParseError::NoMatch);
        }

        let mut fields = ParsedFields::new();
        for pair in text.split('\t') {
            let (label, value) = pair
                .split_once(':')
                .ok_or_else(|| ParseError::InvalidFormat(format!("LTSV field without label: {}", pair)))?;
            fields.insert(label.to_string(), Value::String(value.to_string()));
        }
        Ok(fields)
    }

    fn format(&self) -> FormatKind {
        FormatKind::Ltsv
    }
}
