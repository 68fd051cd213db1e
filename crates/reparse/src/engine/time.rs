//! Time: derive the event time from a parsed field.

use std::borrow::Cow;

use chrono::{DateTime, Datelike, Local, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;
use thiserror::Error;

use crate::parser::ParsedFields;

pub const DEFAULT_TIME_KEY: &str = "time";

/// Conversions that carry a year, directly or through a composite.
const YEAR_DIRECTIVES: [char; 10] = ['Y', 'y', 'G', 'g', 'F', 'D', 'x', 'c', '+', 's'];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    #[error("time field '{key}' is not a string")]
    NotAString { key: String },

    #[error("time value '{value}' does not match format '{layout}': {reason}")]
    Mismatch {
        value: String,
        layout: String,
        reason: String,
    },

    #[error("time value '{value}' does not exist in the local time zone")]
    NonexistentLocalTime { value: String },
}

/// Reads the time field out of parsed fields using a strftime layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeResolver {
    layout: Option<String>,
    time_key: String,
    localtime: bool,
}

impl TimeResolver {
    pub fn new(layout: Option<String>, time_key: impl Into<String>, localtime: bool) -> Self {
        Self {
            layout,
            time_key: time_key.into(),
            localtime,
        }
    }

    pub fn layout(&self) -> Option<&str> {
        self.layout.as_deref()
    }

    pub fn time_key(&self) -> &str {
        &self.time_key
    }

    pub fn localtime(&self) -> bool {
        self.localtime
    }

    /// Event time for these fields, or `fallback` when there is no layout
    /// or no time field.
    pub fn resolve(&self, parsed: &ParsedFields, fallback: i64) -> Result<i64, TimeError> {
        let Some(layout) = self.layout.as_deref() else {
            return Ok(fallback);
        };
        let Some(value) = parsed.get(&self.time_key) else {
            return Ok(fallback);
        };

        match value {
            Value::String(s) => parse_time(s, layout, self.localtime),
            _ => Err(TimeError::NotAString {
                key: self.time_key.clone(),
            }),
        }
    }
}

/// Parse `value` with a strftime `layout` into unix seconds.
///
/// Layouts with an offset directive yield that instant directly. Otherwise
/// the wall-clock time is read as UTC, or as the host's zone when
/// `localtime` is set. Date-only layouts resolve to midnight. Layouts
/// without a year (syslog's `%b %d %H:%M:%S`) take the current year.
pub fn parse_time(value: &str, layout: &str, localtime: bool) -> Result<i64, TimeError> {
    let mismatch = |reason: chrono::ParseError| TimeError::Mismatch {
        value: value.to_string(),
        layout: layout.to_string(),
        reason: reason.to_string(),
    };

    let conversions = directives(layout);
    let (text, pattern) = if conversions.iter().any(|d| YEAR_DIRECTIVES.contains(d)) {
        (Cow::Borrowed(value), Cow::Borrowed(layout))
    } else {
        let year = if localtime { Local::now().year() } else { Utc::now().year() };
        (
            Cow::Owned(format!("{} {}", year, value)),
            Cow::Owned(format!("%Y {}", layout)),
        )
    };

    if conversions.contains(&'z') {
        return DateTime::parse_from_str(&text, &pattern)
            .map(|dt| dt.timestamp())
            .map_err(mismatch);
    }

    let naive = match NaiveDateTime::parse_from_str(&text, &pattern) {
        Ok(naive) => naive,
        Err(err) => NaiveDate::parse_from_str(&text, &pattern)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .ok_or_else(|| mismatch(err))?,
    };

    // epoch seconds are already absolute
    if !localtime || conversions.contains(&'s') {
        return Ok(naive.and_utc().timestamp());
    }

    localize(Local.from_local_datetime(&naive), value)
}

/// Pick the earlier instant of an ambiguous wall-clock time; a time that
/// falls in a zone gap does not exist.
fn localize<Tz: TimeZone>(local: LocalResult<DateTime<Tz>>, value: &str) -> Result<i64, TimeError> {
    local
        .earliest()
        .map(|dt| dt.timestamp())
        .ok_or_else(|| TimeError::NonexistentLocalTime {
            value: value.to_string(),
        })
}

/// Conversion characters of the `%` directives in `layout`. Padding,
/// colon and fraction modifiers are skipped; `%%` is a literal.
fn directives(layout: &str) -> Vec<char> {
    let mut found = Vec::new();
    let mut chars = layout.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            continue;
        }
        let mut spec = chars.next();
        while let Some('-' | '_' | '0' | '#' | ':' | '.' | '3' | '6' | '9') = spec {
            spec = chars.next();
        }
        match spec {
            Some('%') | None => {}
            Some(conv) => found.push(conv),
        }
    }
    found
}
