//! Per-call trace records
//!
//! A record starts life as a [`PendingTrace`] holding what is known before the
//! call runs. Only once the call has returned or failed does it become a
//! [`TraceRecord`], so a record with a status always describes a finished call.

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::time::Duration;

/// Outcome of a traced call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceStatus {
    Success,
    Error,
}

impl TraceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TraceStatus::Success => "success",
            TraceStatus::Error => "error",
        }
    }
}

impl fmt::Display for TraceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields captured before the wrapped function runs
#[derive(Debug, Clone, PartialEq)]
pub struct PendingTrace {
    pub function_name: String,
    pub started_at: DateTime<Utc>,
    pub model: Option<String>,
    pub prompt_chars: Option<usize>,
}

impl PendingTrace {
    pub fn new(
        function_name: impl Into<String>,
        model: Option<String>,
        prompt_chars: Option<usize>,
    ) -> Self {
        Self {
            function_name: function_name.into(),
            started_at: Utc::now(),
            model,
            prompt_chars,
        }
    }

    /// Complete the record for a call that returned normally
    pub fn succeeded(self, duration: Duration, output_chars: Option<usize>) -> TraceRecord {
        TraceRecord {
            function_name: self.function_name,
            started_at: self.started_at,
            model: self.model,
            prompt_chars: self.prompt_chars,
            output_chars,
            duration,
            status: TraceStatus::Success,
            error_message: None,
        }
    }

    /// Complete the record for a call that failed
    pub fn failed(self, duration: Duration, error_message: impl Into<String>) -> TraceRecord {
        TraceRecord {
            function_name: self.function_name,
            started_at: self.started_at,
            model: self.model,
            prompt_chars: self.prompt_chars,
            output_chars: None,
            duration,
            status: TraceStatus::Error,
            error_message: Some(error_message.into()),
        }
    }
}

/// Observation of a single traced call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceRecord {
    /// Name the function was wrapped under
    pub function_name: String,
    /// Wall-clock time the call started
    pub started_at: DateTime<Utc>,
    /// Caller-supplied `model` keyword, when it was a string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Character count of the prompt, when the prompt was a string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_chars: Option<usize>,
    /// Character count of the return value, when it was a string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_chars: Option<usize>,
    /// Time spent inside the wrapped function
    #[serde(rename = "duration_secs", with = "duration_secs")]
    pub duration: Duration,
    pub status: TraceStatus,
    /// Display form of the failure, set only when `status` is `Error`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl TraceRecord {
    pub fn is_success(&self) -> bool {
        self.status == TraceStatus::Success
    }

    /// Render the record as a single `key: value` line
    ///
    /// Segments appear in a fixed order and absent fields are left out entirely:
    /// `name | model: m | prompt_chars: n | output_chars: n | duration: 0.101s | status: success | error: msg`
    pub fn to_line(&self) -> String {
        let mut segments = vec![single_line(&self.function_name).into_owned()];

        if let Some(model) = &self.model {
            segments.push(format!("model: {}", single_line(model)));
        }

        if let Some(prompt_chars) = self.prompt_chars {
            segments.push(format!("prompt_chars: {}", prompt_chars));
        }

        if let Some(output_chars) = self.output_chars {
            segments.push(format!("output_chars: {}", output_chars));
        }

        segments.push(format!("duration: {:.3}s", self.duration.as_secs_f64()));
        segments.push(format!("status: {}", self.status));

        if let Some(error_message) = &self.error_message {
            segments.push(format!("error: {}", single_line(error_message)));
        }

        segments.join(" | ")
    }

    /// Render the record as a single-line JSON object
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line())
    }
}

/// Escape line breaks so a record never spans more than one output line
fn single_line(text: &str) -> Cow<'_, str> {
    if text.contains(['\n', '\r']) {
        Cow::Owned(text.replace('\r', "\\r").replace('\n', "\\n"))
    } else {
        Cow::Borrowed(text)
    }
}

mod duration_secs {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(duration.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(model: Option<&str>, prompt_chars: Option<usize>) -> PendingTrace {
        PendingTrace::new("call_llm", model.map(str::to_string), prompt_chars)
    }

    #[test]
    fn test_success_line_has_all_present_fields_in_order() {
        let record =
            pending(Some("gpt-4o"), Some(25)).succeeded(Duration::from_millis(101), Some(38));

        assert_eq!(
            record.to_line(),
            "call_llm | model: gpt-4o | prompt_chars: 25 | output_chars: 38 | duration: 0.101s | status: success"
        );
        assert!(record.is_success());
    }

    #[test]
    fn test_error_line_carries_message_and_no_output() {
        let record = pending(Some("claude-3"), Some(14))
            .failed(Duration::from_millis(50), "API rate limit exceeded");

        let line = record.to_line();
        assert!(line.contains("prompt_chars: 14"));
        assert!(line.contains("status: error"));
        assert!(line.ends_with("error: API rate limit exceeded"));
        assert!(!line.contains("output_chars"));
        assert_eq!(record.output_chars, None);
    }

    #[test]
    fn test_absent_fields_are_omitted_not_zero() {
        let record = pending(None, None).succeeded(Duration::ZERO, None);

        assert_eq!(record.to_line(), "call_llm | duration: 0.000s | status: success");
    }

    #[test]
    fn test_zero_counts_are_present() {
        let record = pending(None, Some(0)).succeeded(Duration::ZERO, Some(0));
        let line = record.to_line();

        assert!(line.contains("prompt_chars: 0"));
        assert!(line.contains("output_chars: 0"));
    }

    #[test]
    fn test_line_breaks_in_text_fields_are_escaped() {
        let record = PendingTrace::new("call\nllm", Some("gpt\r\n4o".to_string()), Some(1))
            .failed(Duration::ZERO, "upstream failed\ncaused by: timeout");

        let line = record.to_line();
        assert_eq!(line.lines().count(), 1);
        assert!(line.starts_with("call\\nllm |"));
        assert!(line.contains("model: gpt\\r\\n4o"));
        assert!(line.ends_with("error: upstream failed\\ncaused by: timeout"));
    }

    #[test]
    fn test_escaping_leaves_record_fields_untouched() {
        let record = pending(None, None).failed(Duration::ZERO, "a\nb");

        assert!(record.to_line().contains("error: a\\nb"));
        assert_eq!(record.error_message.as_deref(), Some("a\nb"));
    }

    #[test]
    fn test_display_matches_line() {
        let record = pending(None, Some(3)).succeeded(Duration::from_secs(1), None);
        assert_eq!(record.to_string(), record.to_line());
    }

    #[test]
    fn test_json_skips_absent_fields() {
        let record = pending(None, Some(5)).succeeded(Duration::from_millis(250), None);
        let json: serde_json::Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();

        assert_eq!(json["function_name"], "call_llm");
        assert_eq!(json["prompt_chars"], 5);
        assert_eq!(json["status"], "success");
        assert_eq!(json["duration_secs"], 0.25);
        assert!(json.get("model").is_none());
        assert!(json.get("output_chars").is_none());
        assert!(json.get("error_message").is_none());
    }

    #[test]
    fn test_json_deserializes_back() {
        let record = pending(Some("gpt-4o"), Some(1)).failed(Duration::from_millis(10), "boom");
        let parsed: TraceRecord = serde_json::from_str(&record.to_json().unwrap()).unwrap();

        assert_eq!(parsed.status, TraceStatus::Error);
        assert_eq!(parsed.error_message.as_deref(), Some("boom"));
        assert_eq!(parsed.model.as_deref(), Some("gpt-4o"));
    }
}
