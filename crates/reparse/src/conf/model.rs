//! Model: raw `ParserOutputConfig` and the validated `Settings` built from it.

use serde::{Deserialize, Serialize};

use super::serde_utils::deserialize_flexible_bool;
use crate::engine::tag::TagRule;
use crate::engine::time::{TimeResolver, DEFAULT_TIME_KEY};
use crate::parser::Format;

/// Configuration as written in the TOML file.
///
/// Nothing is checked here; call [`ParserOutputConfig::validate`] to get
/// [`Settings`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOutputConfig {
    /// Record field holding the text to parse
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_name: Option<String>,
    /// `/regex/` or a format name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_format: Option<String>,
    pub time_key: String,
    #[serde(deserialize_with = "deserialize_flexible_bool")]
    pub localtime: bool,
    /// Comma-separated column names for `tsv` / `csv`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<String>,
    #[serde(deserialize_with = "deserialize_flexible_bool")]
    pub reserve_data: bool,
    #[serde(deserialize_with = "deserialize_flexible_bool")]
    pub suppress_parse_error_log: bool,
    #[serde(deserialize_with = "deserialize_flexible_bool")]
    pub pass_through_unmatched: bool,
}

impl Default for ParserOutputConfig {
    fn default() -> Self {
        Self {
            key_name: None,
            format: None,
            tag: None,
            remove_prefix: None,
            add_prefix: None,
            time_format: None,
            time_key: DEFAULT_TIME_KEY.to_string(),
            localtime: false,
            keys: None,
            reserve_data: false,
            suppress_parse_error_log: false,
            pass_through_unmatched: false,
        }
    }
}

/// Validated, immutable engine configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    pub key_name: String,
    pub format: Format,
    pub tag_rule: TagRule,
    pub time: TimeResolver,
    pub reserve_data: bool,
    pub suppress_parse_error_log: bool,
    pub pass_through_unmatched: bool,
}
