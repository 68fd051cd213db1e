use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Fields extracted from one line of text, in extraction order.
pub type ParsedFields = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatKind {
    /// User-supplied `/pattern/` with named capture groups
    Regex,
    /// JSON object
    Json,
    /// Labeled tab-separated values (`label:value\t...`)
    Ltsv,
    /// Tab-separated values mapped onto configured keys
    Tsv,
    /// Comma-separated values mapped onto configured keys
    Csv,
    /// Apache Common Log Format
    Apache,
    /// Apache Combined Log Format
    Apache2,
    /// Nginx default access log
    Nginx,
    /// RFC 3164 syslog line
    Syslog,
}

impl FormatKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatKind::Regex => "regex",
            FormatKind::Json => "json",
            FormatKind::Ltsv => "ltsv",
            FormatKind::Tsv => "tsv",
            FormatKind::Csv => "csv",
            FormatKind::Apache => "apache",
            FormatKind::Apache2 => "apache2",
            FormatKind::Nginx => "nginx",
            FormatKind::Syslog => "syslog",
        }
    }

    /// Look up a named (non-regex) format selector.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "json" => Some(FormatKind::Json),
            "ltsv" => Some(FormatKind::Ltsv),
            "tsv" => Some(FormatKind::Tsv),
            "csv" => Some(FormatKind::Csv),
            "apache" => Some(FormatKind::Apache),
            "apache2" => Some(FormatKind::Apache2),
            "nginx" => Some(FormatKind::Nginx),
            "syslog" => Some(FormatKind::Syslog),
            _ => None,
        }
    }
}

/// Per-line failure. Every variant means "no match": the event is dropped,
/// never the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Pattern did not match")]
    NoMatch,

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("JSON is not an object")]
    NotAnObject,

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Column count mismatch: expected {expected}, got {actual}")]
    ColumnMismatch { expected: usize, actual: usize },

    #[error("Line too large: {0} bytes (max: {1} bytes)")]
    LineTooLarge(usize, usize),
}

/// Construction-time failure while building a parser from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("unknown format '{0}'")]
    UnknownFormat(String),

    #[error("invalid regex pattern: {0}")]
    InvalidRegex(String),

    #[error("regex pattern '{0}' has no named capture group")]
    NoNamedGroup(String),

    #[error("format '{}' requires a non-empty `keys` list", .0.as_str())]
    MissingKeys(FormatKind),
}
