//! Purpose: Define a stable, structured schema for non-fatal stderr notices.
//! Exports: `Notice`, `notice_json`, `NOTICE_DECODE_FALLBACK`.
//! Role: Shared contract helper for CLI diagnostics such as decode fallbacks.
//! Invariants: Notices are non-fatal and never alter stdout payloads.
//! Invariants: Notices never embed the decoded input itself, only its size.
use serde_json::{Map, Value, json};

use crate::core::report::DecodeFailure;

pub const NOTICE_DECODE_FALLBACK: &str = "decode-fallback";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: String,
    pub time: String,
    pub cmd: String,
    pub source: String,
    pub message: String,
    pub details: Map<String, Value>,
}

impl Notice {
    pub fn decode_fallback(
        cmd: impl Into<String>,
        source: impl Into<String>,
        time: impl Into<String>,
        failure: &DecodeFailure,
    ) -> Self {
        let mut details = Map::new();
        details.insert("error_kind".to_string(), json!(format!("{:?}", failure.kind)));
        details.insert("input_len".to_string(), json!(failure.input_len));
        if let Some(cause) = &failure.cause {
            details.insert("cause".to_string(), json!(cause));
        }
        Self {
            kind: NOTICE_DECODE_FALLBACK.to_string(),
            time: time.into(),
            cmd: cmd.into(),
            source: source.into(),
            message: format!("{}; using fallback document", failure.message),
            details,
        }
    }
}

pub fn notice_json(notice: &Notice) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(notice.kind));
    inner.insert("time".to_string(), json!(notice.time));
    inner.insert("cmd".to_string(), json!(notice.cmd));
    inner.insert("source".to_string(), json!(notice.source));
    inner.insert("message".to_string(), json!(notice.message));
    inner.insert("details".to_string(), Value::Object(notice.details.clone()));

    let mut outer = Map::new();
    outer.insert("notice".to_string(), Value::Object(inner));
    Value::Object(outer)
}
