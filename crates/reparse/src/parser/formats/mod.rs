/// Individual format parsers and the closed set that dispatches between them

pub mod pattern;
pub mod json;
pub mod ltsv;
pub mod delimited;
pub mod http_log;
pub mod syslog;

// Re-export parser implementations
pub use pattern::RegexParser;
pub use json::JsonParser;
pub use ltsv::LtsvParser;
pub use delimited::{split_keys, DelimitedParser};

use crate::parser::model::{FormatError, FormatKind, ParseError, ParsedFields};
use crate::parser::traits::TextParser;

/// The configured format strategy.
///
/// Chosen once from the `format` setting; a new format is a new variant
/// plus a constructor arm in [`Format::from_config`].
#[derive(Debug, Clone)]
pub enum Format {
    /// User pattern and the regex-backed built-in templates
    Regex(RegexParser),
    Json(JsonParser),
    Ltsv(LtsvParser),
    Delimited(DelimitedParser),
}

impl Format {
    /// Build the strategy named by a `format` value.
    ///
    /// `/.../` is a regex literal; anything else must be a known format
    /// name. `keys` is only consulted by `tsv` and `csv`.
    pub fn from_config(selector: &str, keys: Option<&str>) -> Result<Self, FormatError> {
        let selector = selector.trim();

        if let Some(pattern) = regex_literal(selector) {
            return RegexParser::new(pattern).map(Format::Regex);
        }

        let kind = FormatKind::from_name(selector)
            .ok_or_else(|| FormatError::UnknownFormat(selector.to_string()))?;

        let keys = keys.map(split_keys).unwrap_or_default();

        match kind {
            FormatKind::Json => Ok(Format::Json(JsonParser)),
            FormatKind::Ltsv => Ok(Format::Ltsv(LtsvParser)),
            FormatKind::Tsv => DelimitedParser::tsv(keys).map(Format::Delimited),
            FormatKind::Csv => DelimitedParser::csv(keys).map(Format::Delimited),
            FormatKind::Apache => http_log::apache().map(Format::Regex),
            FormatKind::Apache2 => http_log::apache2().map(Format::Regex),
            FormatKind::Nginx => http_log::nginx().map(Format::Regex),
            FormatKind::Syslog => syslog::syslog().map(Format::Regex),
            FormatKind::Regex => Err(FormatError::UnknownFormat(selector.to_string())),
        }
    }

    fn inner(&self) -> &dyn TextParser {
        match self {
            Format::Regex(p) => p,
            Format::Json(p) => p,
            Format::Ltsv(p) => p,
            Format::Delimited(p) => p,
        }
    }
}

impl TextParser for Format {
    fn parse(&self, text: &str) -> Result<ParsedFields, ParseError> {
        self.inner().parse(text)
    }

    fn format(&self) -> FormatKind {
        self.inner().format()
    }

    fn time_format(&self) -> Option<&str> {
        self.inner().time_format()
    }
}

/// `/pattern/` → `pattern`
fn regex_literal(selector: &str) -> Option<&str> {
    if selector.len() >= 2 && selector.starts_with('/') && selector.ends_with('/') {
        Some(&selector[1..selector.len() - 1])
    } else {
        None
    }
}
