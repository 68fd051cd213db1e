//! Built-in access log templates (Apache common, Apache combined, Nginx).
//!
//! Each template is a named-capture regex run through [`RegexParser`], so
//! fields come out as strings exactly as they appear in the line.

use crate::parser::model::{FormatError, FormatKind};
use super::pattern::RegexParser;

/// Bracketed access log timestamp: `10/Oct/2000:13:55:36 -0700`
pub const ACCESS_LOG_TIME_FORMAT: &str = "%d/%b/%Y:%H:%M:%S %z";

// host ident authuser [date] "request" status bytes
const APACHE_COMMON: &str = r#"^(?<host>[^ ]*) [^ ]* (?<user>[^ ]*) \[(?<time>[^\]]*)\] "(?<method>\S+)(?: +(?<path>[^ ]*) +\S*)?" (?<code>[^ ]*) (?<size>[^ ]*)$"#;

// common + optional "referer" "user-agent"
const APACHE_COMBINED: &str = r#"^(?<host>[^ ]*) [^ ]* (?<user>[^ ]*) \[(?<time>[^\]]*)\] "(?<method>\S+)(?: +(?<path>[^ ]*) +\S*)?" (?<code>[^ ]*) (?<size>[^ ]*)(?: "(?<referer>[^"]*)" "(?<agent>[^"]*)")?$"#;

const NGINX_COMBINED: &str = r#"^(?<remote>[^ ]*) (?<host>[^ ]*) (?<user>[^ ]*) \[(?<time>[^\]]*)\] "(?<method>\S+)(?: +(?<path>[^"]*?)(?: +\S*)?)?" (?<code>[^ ]*) (?<size>[^ ]*)(?: "(?<referer>[^"]*)" "(?<agent>[^"]*)")?$"#;

pub fn apache() -> Result<RegexParser, FormatError> {
    RegexParser::template(FormatKind::Apache, APACHE_COMMON, Some(ACCESS_LOG_TIME_FORMAT))
}

pub fn apache2() -> Result<RegexParser, FormatError> {
    RegexParser::template(FormatKind::Apache2, APACHE_COMBINED, Some(ACCESS_LOG_TIME_FORMAT))
}

pub fn nginx() -> Result<RegexParser, FormatError> {
    RegexParser::template(FormatKind::Nginx, NGINX_COMBINED, Some(ACCESS_LOG_TIME_FORMAT))
}
