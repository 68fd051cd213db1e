//! End-to-end scenarios: raw config text in, emitted events out.

use chrono::{TimeZone, Utc};
use reparse::engine::{DropReason, Outcome, RoutingError};
use reparse::{Event, ParserEngine, ParserOutputConfig, Record};
use serde_json::{json, Value};

fn engine(toml_str: &str) -> ParserEngine {
    let config: ParserOutputConfig = toml::from_str(toml_str).expect("config should parse");
    ParserEngine::from_config(&config).expect("config should validate")
}

fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {}", other),
    }
}

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> i64 {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap().timestamp()
}

#[test]
fn regex_with_prefixes_time_and_reserve() {
    let engine = engine(
        r#"
        remove_prefix = "test"
        add_prefix    = "parsed"
        key_name      = "message"
        format        = '/^(?<x>.)(?<y>.) (?<time>.+)$/'
        time_format   = "%Y%m%d%H%M%S"
        reserve_data  = true
        "#,
    );

    let input = Event::new("test.in", 0, record(json!({"message": "12 20120402182059"})));
    let out = engine.process(&input).emitted().expect("should emit");

    assert_eq!(out.tag, "parsed.in");
    assert_eq!(out.time, utc(2012, 4, 2, 18, 20, 59));
    assert_eq!(out.record["x"], "1");
    assert_eq!(out.record["y"], "2");
    assert_eq!(out.record["message"], "12 20120402182059");
}

#[test]
fn json_without_reserve() {
    let engine = engine("tag = \"parsed\"\nkey_name = \"data\"\nformat = \"json\"\nreserve_data = false");

    let ok = Event::new("in", 1, record(json!({"data": "{\"a\":\"1\"}"})));
    let out = engine.process(&ok).emitted().expect("should emit");
    assert_eq!(out.record, record(json!({"a": "1"})));

    let bad = Event::new("in", 1, record(json!({"data": "not json"})));
    assert!(matches!(engine.process(&bad), Outcome::Dropped(DropReason::NoMatch(_))));
}

#[test]
fn reserve_false_output_keys_are_parsed_keys() {
    let engine = engine("tag = \"out\"\nkey_name = \"line\"\nformat = '/^(?<a>\\w+) (?<b>\\w+)$/'");
    let input = Event::new("in", 0, record(json!({"line": "hello world", "extra": 1})));
    let out = engine.process(&input).emitted().unwrap();

    let keys: Vec<&str> = out.record.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["a", "b"]);
}

#[test]
fn reserve_true_output_is_superset() {
    let engine = engine("tag = \"out\"\nkey_name = \"line\"\nformat = '/^(?<a>\\w+) (?<extra>\\w+)$/'\nreserve_data = true");
    let input = Event::new("in", 0, record(json!({"line": "hello world", "extra": 1, "keep": true})));
    let out = engine.process(&input).emitted().unwrap();

    for key in input.record.keys() {
        assert!(out.record.contains_key(key), "missing original key {}", key);
    }
    assert_eq!(out.record["extra"], "world");
    assert_eq!(out.record["keep"], true);
}

#[test]
fn remove_prefix_mismatch_drops_without_panic() {
    let engine = engine("remove_prefix = \"test\"\nkey_name = \"m\"\nformat = \"json\"");
    let input = Event::new("prod.in", 0, record(json!({"m": "{}"})));

    assert_eq!(
        engine.process(&input),
        Outcome::Dropped(DropReason::Routing(RoutingError::PrefixMismatch {
            tag: "prod.in".into(),
            prefix: "test".into(),
        }))
    );
}

#[test]
fn invalid_configuration_is_rejected_up_front() {
    let config = ParserOutputConfig::default();
    let err = ParserEngine::from_config(&config).unwrap_err();
    assert_eq!(err.violations().len(), 3);
}

#[test]
fn ltsv_with_reserve() {
    let engine = engine("add_prefix = \"ltsv\"\nkey_name = \"raw\"\nformat = \"ltsv\"\nreserve_data = true");
    let input = Event::new("app", 3, record(json!({"raw": "user:alice\tstatus:200"})));
    let out = engine.process(&input).emitted().unwrap();

    assert_eq!(out.tag, "ltsv.app");
    assert_eq!(out.time, 3);
    assert_eq!(out.record["user"], "alice");
    assert_eq!(out.record["raw"], "user:alice\tstatus:200");
}
