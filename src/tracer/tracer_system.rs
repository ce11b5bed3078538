//! Tracer configuration and per-call bookkeeping
//!
//! A [`Tracer`] decides which sink records go to and which keyword names carry
//! the model label and the prompt. It wraps functions into [`Traced`] and
//! [`AsyncTraced`] callables, which call back into it to inspect arguments
//! before a call and to emit the record afterwards.

use super::output::value_chars;
use super::sink::{global_sink, TraceSink};
use super::trace_record::{PendingTrace, TraceRecord};
use super::traced::{AsyncTraced, Traced};
use crate::args::CallArgs;
use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::warn;

pub const DEFAULT_MODEL_KEY: &str = "model";
pub const DEFAULT_PROMPT_KEY: &str = "prompt";

/// Wraps functions so that every call emits a [`TraceRecord`]
///
/// ```rust
/// use llmtrace_lite::tracer::{MemorySink, Tracer};
/// use llmtrace_lite::{CallArgs, LlmTraceError};
/// use std::sync::Arc;
///
/// let sink = Arc::new(MemorySink::default());
/// let tracer = Tracer::new().with_sink(sink.clone());
///
/// let echo = tracer.wrap("echo", |args: CallArgs| -> Result<String, LlmTraceError> {
///     Ok(args.require_text("prompt", 0)?.to_string())
/// });
///
/// let reply = echo.call(CallArgs::new().arg("hi").kwarg("model", "gpt-4o")).unwrap();
/// assert_eq!(reply, "hi");
/// assert!(sink.lines()[0].contains("prompt_chars: 2"));
/// ```
#[derive(Clone)]
pub struct Tracer {
    sink: Option<Arc<dyn TraceSink>>,
    model_key: String,
    prompt_key: String,
}

impl Tracer {
    /// Create a tracer that emits to the global sink
    pub fn new() -> Self {
        Self {
            sink: None,
            model_key: DEFAULT_MODEL_KEY.to_string(),
            prompt_key: DEFAULT_PROMPT_KEY.to_string(),
        }
    }

    /// Send records to `sink` instead of the global sink
    pub fn with_sink(mut self, sink: Arc<dyn TraceSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Keyword whose value is recorded as the model label
    pub fn model_key(mut self, key: impl Into<String>) -> Self {
        self.model_key = key.into();
        self
    }

    /// Keyword consulted for the prompt when no positional argument is given
    pub fn prompt_key(mut self, key: impl Into<String>) -> Self {
        self.prompt_key = key.into();
        self
    }

    /// Wrap a synchronous function under `name`
    pub fn wrap<F>(&self, name: impl Into<String>, func: F) -> Traced<F> {
        Traced::new(name.into(), self.clone(), func)
    }

    /// Wrap a function returning a future under `name`
    ///
    /// Timing covers the future until it resolves, not just its creation.
    pub fn wrap_async<F>(&self, name: impl Into<String>, func: F) -> AsyncTraced<F> {
        AsyncTraced::new(name.into(), self.clone(), func)
    }

    /// The value standing in for the prompt: first positional argument, else the prompt keyword
    fn prompt_value<'a>(&self, args: &'a CallArgs) -> Option<&'a Value> {
        args.first_positional().or_else(|| args.keyword_value(&self.prompt_key))
    }

    /// Capture what is known about a call before it runs
    pub(crate) fn begin(&self, function_name: &str, args: &CallArgs) -> PendingTrace {
        let model = args
            .keyword_value(&self.model_key)
            .and_then(Value::as_str)
            .map(str::to_string);
        let prompt_chars = self.prompt_value(args).and_then(value_chars);

        PendingTrace::new(function_name, model, prompt_chars)
    }

    /// Hand a finished record to the sink; a panicking sink is contained here
    pub(crate) fn emit(&self, record: &TraceRecord) {
        let sink = match &self.sink {
            Some(sink) => Arc::clone(sink),
            None => global_sink(),
        };

        if panic::catch_unwind(AssertUnwindSafe(|| sink.emit(record))).is_err() {
            warn!(function = %record.function_name, "Trace sink panicked; record dropped");
        }
    }
}

impl Default for Tracer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Tracer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracer")
            .field("own_sink", &self.sink.is_some())
            .field("model_key", &self.model_key)
            .field("prompt_key", &self.prompt_key)
            .finish()
    }
}

/// Run instrumentation code that must not disturb the traced call
///
/// Returns `None` if `f` panicked.
pub(crate) fn best_effort<T>(f: impl FnOnce() -> T) -> Option<T> {
    panic::catch_unwind(AssertUnwindSafe(f)).ok()
}

/// Human-readable message from a panic payload
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}
