//! Tag: output tag derivation by fixed tag or prefix substitution.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    #[error("tag '{tag}' does not start with prefix '{prefix}'")]
    PrefixMismatch { tag: String, prefix: String },
}

/// How the output tag is derived from the incoming one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagRule {
    /// Every event is emitted under this tag
    Fixed(String),
    /// Strip then prepend, either step optional
    Prefix {
        remove: Option<String>,
        add: Option<String>,
    },
}

impl TagRule {
    /// A fixed `tag` wins over any prefix settings.
    pub fn new(tag: Option<&str>, remove_prefix: Option<&str>, add_prefix: Option<&str>) -> Self {
        match tag {
            Some(tag) => TagRule::Fixed(tag.to_string()),
            None => TagRule::Prefix {
                remove: remove_prefix.map(str::to_string),
                add: add_prefix.map(str::to_string),
            },
        }
    }

    pub fn rewrite(&self, original: &str) -> Result<String, RoutingError> {
        match self {
            TagRule::Fixed(tag) => Ok(tag.clone()),
            TagRule::Prefix { remove, add } => {
                let stripped = match remove {
                    Some(prefix) => strip_prefix(original, prefix).ok_or_else(|| {
                        RoutingError::PrefixMismatch {
                            tag: original.to_string(),
                            prefix: prefix.clone(),
                        }
                    })?,
                    None => original,
                };

                Ok(match add {
                    Some(prefix) => add_prefix(stripped, prefix),
                    None => stripped.to_string(),
                })
            }
        }
    }
}

/// `prefix` → `""`, `prefix.rest` → `rest`; anything else does not match.
pub fn strip_prefix<'a>(tag: &'a str, prefix: &str) -> Option<&'a str> {
    if tag == prefix {
        return Some("");
    }
    tag.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('.'))
        .filter(|rest| !rest.is_empty())
}

/// Prepend `prefix.`, leaving tags that already carry the prefix untouched.
pub fn add_prefix(tag: &str, prefix: &str) -> String {
    if tag.is_empty() {
        return prefix.to_string();
    }
    if has_prefix(tag, prefix) {
        return tag.to_string();
    }
    format!("{}.{}", prefix, tag)
}

fn has_prefix(tag: &str, prefix: &str) -> bool {
    tag == prefix
        || tag
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('.'))
}
