//! Process: the per-event pipeline: extract, parse, retag, retime, merge.

use std::borrow::Cow;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use super::merge::merge;
use super::metrics::EngineMetrics;
use super::tag::RoutingError;
use super::time::TimeError;
use crate::conf::{ConfigError, ParserOutputConfig, Settings};
use crate::event::{Event, Record};
use crate::parser::{ParseError, TextParser};

/// Why an event produced no output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DropReason {
    #[error("record has no '{0}' field")]
    MissingKey(String),

    #[error("parse failed: {0}")]
    NoMatch(#[from] ParseError),

    #[error("routing failed: {0}")]
    Routing(#[from] RoutingError),

    #[error("invalid time: {0}")]
    InvalidTime(#[from] TimeError),
}

impl DropReason {
    /// Missing key field or unparseable text.
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, DropReason::MissingKey(_) | DropReason::NoMatch(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Emitted(Event),
    Dropped(DropReason),
}

impl Outcome {
    pub fn emitted(self) -> Option<Event> {
        match self {
            Outcome::Emitted(event) => Some(event),
            Outcome::Dropped(_) => None,
        }
    }
}

/// Applies one validated configuration to a stream of events.
///
/// Holds no per-event state, so a single instance behind an `Arc` can be
/// driven from any number of threads.
#[derive(Debug)]
pub struct ParserEngine {
    settings: Settings,
    metrics: EngineMetrics,
}

impl ParserEngine {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            metrics: EngineMetrics::new(),
        }
    }

    /// Validate `config` and build an engine from it.
    pub fn from_config(config: &ParserOutputConfig) -> Result<Self, ConfigError> {
        config.validate().map(Self::new)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn metrics(&self) -> &EngineMetrics {
        &self.metrics
    }

    pub fn process(&self, event: &Event) -> Outcome {
        let outcome = match self.evaluate(event) {
            Ok(out) => Outcome::Emitted(out),
            Err(reason) => {
                debug!(tag = %event.tag, reason = %reason, "event dropped");
                Outcome::Dropped(reason)
            }
        };
        self.metrics.record(&outcome);
        outcome
    }

    /// Emitted events for `events`, in input order; drops are discarded.
    pub fn process_batch(&self, events: &[Event]) -> Vec<Event> {
        events
            .iter()
            .filter_map(|event| self.process(event).emitted())
            .collect()
    }

    fn evaluate(&self, event: &Event) -> Result<Event, DropReason> {
        let settings = &self.settings;

        let text = key_text(&event.record, &settings.key_name)
            .ok_or_else(|| DropReason::MissingKey(settings.key_name.clone()))?;

        let parsed = match settings.format.parse(&text) {
            Ok(parsed) => parsed,
            Err(err) => {
                if !settings.suppress_parse_error_log {
                    warn!(
                        tag = %event.tag,
                        key_name = %settings.key_name,
                        error = %err,
                        "pattern not match: {}",
                        text
                    );
                }
                if settings.pass_through_unmatched && settings.reserve_data {
                    let tag = settings.tag_rule.rewrite(&event.tag)?;
                    self.metrics.record_pass_through();
                    return Ok(Event::new(tag, event.time, event.record.clone()));
                }
                return Err(err.into());
            }
        };

        let tag = settings.tag_rule.rewrite(&event.tag)?;
        let time = settings.time.resolve(&parsed, event.time)?;
        let record = merge(&event.record, parsed, settings.reserve_data);

        Ok(Event::new(tag, time, record))
    }
}

/// Text of the key field. Non-string values are parsed as their JSON
/// text; `null` counts as absent.
fn key_text<'a>(record: &'a Record, key_name: &str) -> Option<Cow<'a, str>> {
    match record.get(key_name)? {
        Value::Null => None,
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        other => Some(Cow::Owned(other.to_string())),
    }
}
