//! Built-in RFC 3164 syslog template.
//!
//! `Feb 28 12:00:00 host app[1234]: message`. The timestamp carries no
//! year; the event time resolves to the current year.

use crate::parser::model::{FormatError, FormatKind};
use super::pattern::RegexParser;

/// RFC 3164 timestamp: `Feb 28 12:00:00`
pub const SYSLOG_TIME_FORMAT: &str = "%b %d %H:%M:%S";

const RFC3164: &str = r"^(?<time>[^ ]*\s*[^ ]* [^ ]*) (?<host>[^ ]*) (?<ident>[a-zA-Z0-9_/.\-]*)(?:\[(?<pid>[0-9]+)\])?[^:]*: *(?<message>.*)$";

pub fn syslog() -> Result<RegexParser, FormatError> {
    RegexParser::template(FormatKind::Syslog, RFC3164, Some(SYSLOG_TIME_FORMAT))
}
