//! Validate: turn a raw `ParserOutputConfig` into `Settings`, collecting
//! every violation instead of stopping at the first.

use thiserror::Error;
use tracing::warn;

use super::model::{ParserOutputConfig, Settings};
use crate::engine::tag::TagRule;
use crate::engine::time::TimeResolver;
use crate::parser::{Format, FormatError, TextParser};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("'key_name' parameter is required")]
    MissingKeyName,

    #[error("'format' parameter is required")]
    MissingFormat,

    #[error("one of 'tag', 'remove_prefix' or 'add_prefix' must be specified")]
    MissingTagMode,

    #[error("'format': {0}")]
    Format(#[from] FormatError),

    #[error("'time_key' must not be empty")]
    EmptyTimeKey,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {}", join_violations(.0))]
    Invalid(Vec<Violation>),

    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    /// Validation violations, empty for I/O and syntax errors.
    pub fn violations(&self) -> &[Violation] {
        match self {
            ConfigError::Invalid(v) => v,
            _ => &[],
        }
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Blank strings count as unset.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

impl ParserOutputConfig {
    pub fn validate(&self) -> Result<Settings, ConfigError> {
        let mut violations = Vec::new();

        let key_name = non_empty(&self.key_name);
        if key_name.is_none() {
            violations.push(Violation::MissingKeyName);
        }

        let format = match non_empty(&self.format) {
            None => {
                violations.push(Violation::MissingFormat);
                None
            }
            Some(selector) => match Format::from_config(selector, self.keys.as_deref()) {
                Ok(format) => Some(format),
                Err(e) => {
                    violations.push(e.into());
                    None
                }
            },
        };

        let tag = non_empty(&self.tag);
        let remove_prefix = non_empty(&self.remove_prefix);
        let add_prefix = non_empty(&self.add_prefix);
        if tag.is_none() && remove_prefix.is_none() && add_prefix.is_none() {
            violations.push(Violation::MissingTagMode);
        }

        if self.time_key.trim().is_empty() {
            violations.push(Violation::EmptyTimeKey);
        }

        let (Some(key_name), Some(format), true) = (key_name, format, violations.is_empty()) else {
            return Err(ConfigError::Invalid(violations));
        };

        if tag.is_some() && (remove_prefix.is_some() || add_prefix.is_some()) {
            warn!("'tag' is set; 'remove_prefix' and 'add_prefix' are ignored");
        }

        let layout = non_empty(&self.time_format)
            .or_else(|| format.time_format())
            .map(str::to_string);

        Ok(Settings {
            key_name: key_name.to_string(),
            tag_rule: TagRule::new(tag, remove_prefix, add_prefix),
            time: TimeResolver::new(layout, self.time_key.clone(), self.localtime),
            format,
            reserve_data: self.reserve_data,
            suppress_parse_error_log: self.suppress_parse_error_log,
            pass_through_unmatched: self.pass_through_unmatched,
        })
    }
}
