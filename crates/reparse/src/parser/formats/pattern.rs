use crate::parser::traits::*;
use crate::parser::model::FormatError;
use crate::parser::MAX_LINE_SIZE;
use regex::Regex;
use serde_json::Value;

/// Named-capture regex parser.
///
/// Backs both the user-supplied `/pattern/` format and the built-in
/// access-log and syslog templates. The pattern is compiled once and the
/// compiled `Regex` is shared read-only across threads.
#[derive(Debug, Clone)]
pub struct RegexParser {
    regex: Regex,
    names: Vec<String>,
    kind: FormatKind,
    time_format: Option<&'static str>,
}

impl RegexParser {
    /// Compile a user pattern. The pattern must declare at least one
    /// named group, otherwise nothing could ever be extracted.
    pub fn new(pattern: &str) -> Result<Self, FormatError> {
        Self::build(pattern, FormatKind::Regex, None)
    }

    pub(crate) fn template(
        kind: FormatKind,
        pattern: &str,
        time_format: Option<&'static str>,
    ) -> Result<Self, FormatError> {
        Self::build(pattern, kind, time_format)
    }

    fn build(
        pattern: &str,
        kind: FormatKind,
        time_format: Option<&'static str>,
    ) -> Result<Self, FormatError> {
        let regex = Regex::new(pattern)
            .map_err(|e| FormatError::InvalidRegex(e.to_string()))?;

        let names: Vec<String> = regex
            .capture_names()
            .flatten()
            .map(str::to_string)
            .collect();

        if names.is_empty() {
            return Err(FormatError::NoNamedGroup(pattern.to_string()));
        }

        Ok(Self {
            regex,
            names,
            kind,
            time_format,
        })
    }

    /// Named groups in pattern order.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl TextParser for RegexParser {
    fn parse(&self, text: &str) -> Result<ParsedFields, ParseError> {
        if text.len() > MAX_LINE_SIZE {
            return Err(ParseError::LineTooLarge(text.len(), MAX_LINE_SIZE));
        }

        let captures = self.regex.captures(text).ok_or(ParseError::NoMatch)?;

        let mut fields = ParsedFields::new();
        for name in &self.names {
            // Groups that did not participate in the match still produce a key
            let value = captures.name(name).map_or("", |m| m.as_str());
            fields.insert(name.clone(), Value::String(value.to_string()));
        }
        Ok(fields)
    }

    fn format(&self) -> FormatKind {
        self.kind
    }

    fn time_format(&self) -> Option<&str> {
        self.time_format
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regex_extracts_named_groups() {
        let parser = RegexParser::new(r"^(?<x>.)(?<y>.) (?<time>.+)$").unwrap();
        let fields = parser.parse("12 20120402182059").unwrap();

        assert_eq!(fields.len(), 3);
        assert_eq!(fields["x"], "1");
        assert_eq!(fields["y"], "2");
        assert_eq!(fields["time"], "20120402182059");
    }

    #[test]
    fn test_regex_preserves_group_order() {
        let parser = RegexParser::new(r"(?<b>\w+)-(?<a>\w+)").unwrap();
        let fields = parser.parse("left-right").unwrap();
        let keys: Vec<&str> = fields.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_regex_no_match() {
        let parser = RegexParser::new(r"^(?<x>[0-9])(?<y>[0-9]) (?<t>.+)$").unwrap();
        assert_eq!(parser.parse("xy 20120402182101"), Err(ParseError::NoMatch));
    }

    #[test]
    fn test_regex_unnamed_groups_are_not_fields() {
        let parser = RegexParser::new(r"^(\d+) (?<word>\w+)$").unwrap();
        let fields = parser.parse("42 answer").unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["word"], "answer");
    }

    #[test]
    fn test_regex_non_participating_group_is_empty() {
        let parser = RegexParser::new(r"^(?<a>\w+)(?: (?<b>\w+))?$").unwrap();
        let fields = parser.parse("solo").unwrap();
        assert_eq!(fields["a"], "solo");
        assert_eq!(fields["b"], "");
    }

    #[test]
    fn test_regex_python_style_groups() {
        let parser = RegexParser::new(r"(?P<level>[A-Z]+):").unwrap();
        assert_eq!(parser.names(), &["level".to_string()]);
    }

    #[test]
    fn test_regex_requires_named_group() {
        let err = RegexParser::new(r"^(\d+)$").unwrap_err();
        assert!(matches!(err, FormatError::NoNamedGroup(_)));
    }

    #[test]
    fn test_regex_invalid_syntax() {
        let err = RegexParser::new(r"(?<x>[unclosed").unwrap_err();
        assert!(matches!(err, FormatError::InvalidRegex(_)));
    }

    #[test]
    fn test_regex_rejects_oversized_line() {
        let parser = RegexParser::new(r"(?<all>.*)").unwrap();
        let huge = "x".repeat(MAX_LINE_SIZE + 1);
        assert!(matches!(parser.parse(&huge), Err(ParseError::LineTooLarge(_, _))));
    }

    #[test]
    fn test_user_regex_has_no_builtin_time_format() {
        let parser = RegexParser::new(r"(?<time>.+)").unwrap();
        assert_eq!(parser.time_format(), None);
        assert_eq!(parser.format(), FormatKind::Regex);
    }
}
