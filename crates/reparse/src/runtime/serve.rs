//! Serve: read NDJSON events, run them through the engine, write NDJSON out.

use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio_stream::wrappers::LinesStream;
use tokio_stream::StreamExt;
use tracing::{info, warn};

use crate::engine::{Outcome, ParserEngine};
use crate::event::Event;

/// Pump stdin through the engine until EOF.
pub async fn serve(engine: Arc<ParserEngine>) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    pump(&engine, stdin, stdout).await?;

    let snap = engine.metrics().snapshot();
    info!(
        processed = snap.processed,
        emitted = snap.emitted,
        passed_through = snap.passed_through,
        parse_failures = snap.parse_failures(),
        routing_failures = snap.routing,
        invalid_time = snap.invalid_time,
        "Input drained"
    );
    Ok(())
}

/// Process every line of `reader`, writing one line per emitted event.
///
/// Returns the number of lines written.
pub async fn pump<R, W>(engine: &ParserEngine, reader: R, mut writer: W) -> std::io::Result<u64>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = LinesStream::new(reader.lines());
    let mut written = 0;

    while let Some(line) = lines.next().await {
        let line = line?;
        if let Some(out) = handle_line(engine, &line) {
            writer.write_all(out.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            written += 1;
        }
    }

    writer.flush().await?;
    Ok(written)
}

/// One input line → at most one output line.
pub fn handle_line(engine: &ParserEngine, line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let event: Event = match serde_json::from_str(line) {
        Ok(event) => event,
        Err(e) => {
            warn!("Skipping malformed input line: {}", e);
            return None;
        }
    };

    match engine.process(&event) {
        Outcome::Emitted(out) => match serde_json::to_string(&out) {
            Ok(json) => Some(json),
            Err(e) => {
                warn!(tag = %out.tag, "Failed to serialize emitted event: {}", e);
                None
            }
        },
        // drops are logged by the engine
        Outcome::Dropped(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conf::ParserOutputConfig;

    fn engine(toml_str: &str) -> ParserEngine {
        let config: ParserOutputConfig = toml::from_str(toml_str).unwrap();
        ParserEngine::from_config(&config).unwrap()
    }

    const JSON_CONFIG: &str = "tag = \"parsed\"\nkey_name = \"data\"\nformat = \"json\"";

    #[test]
    fn test_handle_line_emits_json() {
        let engine = engine(JSON_CONFIG);
        let out = handle_line(
            &engine,
            r#"{"tag":"test.in","time":7,"record":{"data":"{\"a\":\"1\"}"}}"#,
        )
        .unwrap();
        assert_eq!(out, r#"{"tag":"parsed","time":7,"record":{"a":"1"}}"#);
    }

    #[test]
    fn test_handle_line_skips_blank_and_malformed() {
        let engine = engine(JSON_CONFIG);
        assert!(handle_line(&engine, "   ").is_none());
        assert!(handle_line(&engine, "not an event").is_none());
        assert_eq!(engine.metrics().snapshot().processed, 0);
    }

    #[test]
    fn test_handle_line_drop() {
        let engine = engine(JSON_CONFIG);
        let out = handle_line(&engine, r#"{"tag":"t","time":0,"record":{"data":"not json"}}"#);
        assert!(out.is_none());
        assert_eq!(engine.metrics().snapshot().no_match, 1);
    }

    #[tokio::test]
    async fn test_pump_preserves_order() {
        let engine = engine(JSON_CONFIG);
        let input = concat!(
            r#"{"tag":"t","time":1,"record":{"data":"{\"n\":1}"}}"#, "\n",
            r#"{"tag":"t","time":2,"record":{"data":"nope"}}"#, "\n",
            "\n",
            r#"{"tag":"t","time":3,"record":{"data":"{\"n\":3}"}}"#, "\n",
        );
        let mut output = Vec::new();

        let written = pump(&engine, input.as_bytes(), &mut output).await.unwrap();
        assert_eq!(written, 2);

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                r#"{"tag":"parsed","time":1,"record":{"n":1}}"#,
                r#"{"tag":"parsed","time":3,"record":{"n":3}}"#,
            ]
        );
    }
}
