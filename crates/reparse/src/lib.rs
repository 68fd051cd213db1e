// Module layout for the reparse engine.

// Core
pub mod event;
pub mod parser;
pub mod engine;

// Configuration and host runtime
pub mod conf;
pub mod runtime;

pub use conf::{ConfigError, ParserOutputConfig, Settings};
pub use engine::{DropReason, Outcome, ParserEngine};
pub use event::{Event, Record};
