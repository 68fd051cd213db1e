//! Event: the (tag, time, record) triple flowing through the engine.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Insertion-ordered record body.
pub type Record = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Dot-separated routing label
    pub tag: String,
    /// Unix timestamp in seconds
    pub time: i64,
    pub record: Record,
}

impl Event {
    pub fn new(tag: impl Into<String>, time: i64, record: Record) -> Self {
        Self {
            tag: tag.into(),
            time,
            record,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_deserialize_from_json_line() {
        let line = r#"{"tag":"test.in","time":1325509455,"record":{"message":"12 20120402182059"}}"#;
        let event: Event = serde_json::from_str(line).unwrap();
        assert_eq!(event.tag, "test.in");
        assert_eq!(event.time, 1325509455);
        assert_eq!(event.record["message"], "12 20120402182059");
    }

    #[test]
    fn test_event_serialize_keeps_record_order() {
        let mut record = Record::new();
        record.insert("z".into(), json!(1));
        record.insert("a".into(), json!(2));
        let event = Event::new("t", 0, record);

        let out = serde_json::to_string(&event).unwrap();
        assert_eq!(out, r#"{"tag":"t","time":0,"record":{"z":1,"a":2}}"#);
    }

    #[test]
    fn test_event_rejects_missing_fields() {
        assert!(serde_json::from_str::<Event>(r#"{"tag":"t","record":{}}"#).is_err());
    }
}
