//! Conf module: raw configuration model, loading, and validation into `Settings`.

pub mod model;
pub mod load;
pub mod validate;
mod serde_utils;

pub use model::{ParserOutputConfig, Settings};
pub use validate::{ConfigError, Violation};
