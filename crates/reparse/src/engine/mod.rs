//! Engine module: per-event parse, merge, time and tag derivation.
//!
//! - `process.rs`: the `ParserEngine` orchestrator and its `Outcome`
//! - `tag.rs`: output tag rules
//! - `merge.rs`: record retention policy
//! - `time.rs`: event time from a parsed field
//! - `metrics.rs`: emitted / dropped counters

pub mod process;
pub mod tag;
pub mod merge;
pub mod time;
pub mod metrics;

pub use process::{DropReason, Outcome, ParserEngine};
pub use tag::{RoutingError, TagRule};
pub use time::{TimeError, TimeResolver};
pub use metrics::{EngineMetrics, MetricsSnapshot};
