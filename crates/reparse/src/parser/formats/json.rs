use crate::parser::traits::*;
use crate::parser::MAX_LINE_SIZE;
use serde_json::Value;

/// JSON object parser.
///
/// Top-level keys become fields; nested objects and arrays are kept as
/// structured values rather than flattened to strings.
#[derive(Debug, Clone, Default)]
pub struct JsonParser;

impl TextParser for JsonParser {
    fn parse(&self, text: &str) -> Result<ParsedFields, ParseError> {
        // Enforce size limit
        if text.len() > MAX_LINE_SIZE {
            return Err(ParseError::LineTooLarge(text.len(), MAX_LINE_SIZE));
        }

        let value: Value = serde_json::from_str(text)
            .map_err(|e| ParseError::InvalidJson(e.to_string()))?;

        match value {
            Value::Object(fields) => Ok(fields),
            _ => Err(ParseError::NotAnObject),
        }
    }

    fn format(&self) -> FormatKind {
        FormatKind::Json
    }
}
