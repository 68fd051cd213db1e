//! Boot: logging init, config load, engine creation.

use std::sync::Arc;
use tracing::{info, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::conf::ParserOutputConfig;
use crate::engine::ParserEngine;
use crate::parser::TextParser;

/// Initialise the tracing / logging subsystem.
///
/// Logs go to stderr; stdout carries emitted events.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reparse=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Load and validate config, then build the shared engine.
pub fn boot(config_path: Option<&str>) -> Result<Arc<ParserEngine>, Box<dyn std::error::Error>> {
    info!("Starting reparse v{}", env!("CARGO_PKG_VERSION"));

    let config = ParserOutputConfig::load(config_path)?;

    let settings = config.validate().map_err(|e| {
        error!("Configuration rejected: {}", e);
        e
    })?;

    info!(
        "Loaded configuration: key_name={}, format={}, reserve_data={}",
        settings.key_name,
        settings.format.format().as_str(),
        settings.reserve_data
    );
    if let Some(layout) = settings.time.layout() {
        info!("Event time from field '{}' using layout '{}'", settings.time.time_key(), layout);
    }

    Ok(Arc::new(ParserEngine::new(settings)))
}
