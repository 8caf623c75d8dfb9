//! JSON encodings of snapshots and traces
//!
//! The summary form carries only `step`, `totalSteps` and `message`; the full
//! form adds the entity list. Whole traces are stored as
//! `{"snapshots": [...]}` and are checked for contiguous step numbering when
//! read back.

use crate::errors::EngineError;
use crate::snapshot::{Snapshot, Trace};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StepSummary<'a> {
    step: usize,
    total_steps: usize,
    message: &'a str,
}

#[derive(Deserialize)]
struct StoredTrace {
    snapshots: Vec<Snapshot>,
}

/// `{"step":…,"totalSteps":…,"message":…}`
pub fn encode_summary(snapshot: &Snapshot) -> Result<String, EngineError> {
    let summary = StepSummary {
        step: snapshot.step,
        total_steps: snapshot.total_steps,
        message: &snapshot.message,
    };
    Ok(serde_json::to_string(&summary)?)
}

/// Summary fields plus `entities`
pub fn encode_full(snapshot: &Snapshot) -> Result<String, EngineError> {
    Ok(serde_json::to_string(snapshot)?)
}

/// Pretty-printed trace, the format `replay` reads back
pub fn encode_trace(trace: &Trace) -> Result<String, EngineError> {
    Ok(serde_json::to_string_pretty(trace)?)
}

pub fn decode_trace(text: &str) -> Result<Trace, EngineError> {
    let stored: StoredTrace = serde_json::from_str(text)?;
    Trace::from_snapshots(stored.snapshots).ok_or_else(|| {
        EngineError::invalid("replay", "snapshots are not numbered 1..=n with a common total")
    })
}

pub fn write_trace(path: &Path, trace: &Trace) -> Result<(), EngineError> {
    std::fs::write(path, encode_trace(trace)?)?;
    Ok(())
}

pub fn read_trace(path: &Path) -> Result<Trace, EngineError> {
    decode_trace(&std::fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::TraceRecorder;

    #[test]
    fn test_summary_escapes_narration() {
        let mut rec = TraceRecorder::new();
        rec.record(Vec::new(), "Length of LCS: 4\nLCS: \"BDAB\"");
        let trace = rec.finalize();

        let json = encode_summary(&trace.step_at(0)).unwrap();
        assert_eq!(
            json,
            r#"{"step":1,"totalSteps":1,"message":"Length of LCS: 4\nLCS: \"BDAB\""}"#
        );
    }

    #[test]
    fn test_decode_rejects_renumbered_steps() {
        let text = r#"{"snapshots":[{"entities":[],"message":"a","step":2,"totalSteps":1}]}"#;
        assert!(decode_trace(text).is_err());
        assert!(decode_trace("not json").is_err());
    }
}
