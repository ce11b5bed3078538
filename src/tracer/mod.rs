//! Call-site tracing for LLM-style functions
//!
//! The tracer wraps a function so that every call produces one [`TraceRecord`]
//! describing it: the function's name, the model label and prompt size taken
//! from its arguments, the size of its output, how long it ran and whether it
//! succeeded. The wrapped function's arguments, return value and errors pass
//! through untouched.
//!
//! # Architecture
//!
//! - **Tracer**: configuration (sink, recognised keyword names) and the
//!   pre-call inspection / post-call emission shared by all wrappers
//! - **Traced / AsyncTraced**: the wrapped callables
//! - **TraceRecord**: the per-call observation, rendered as a `key: value` line
//! - **TraceSink**: where records go; [`StdoutSink`] by default
//! - **MemorySink / NullSink**: collect records in memory, or drop them
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use llmtrace_lite::{trace, CallArgs, LlmTraceError};
//!
//! let call_llm = trace("call_llm", |args: CallArgs| -> Result<String, LlmTraceError> {
//!     let prompt = args.require_text("prompt", 0)?;
//!     Ok(format!("Response to: {}", prompt))
//! });
//!
//! // Prints:
//! // call_llm | model: gpt-4o | prompt_chars: 25 | output_chars: 38 | duration: 0.000s | status: success
//! call_llm.call(CallArgs::new().arg("Explain quantum computing").kwarg("model", "gpt-4o"))?;
//! # Ok::<(), LlmTraceError>(())
//! ```
//!
//! # Absent versus zero
//!
//! `prompt_chars` and `output_chars` are only reported for text. An empty
//! string reports `0`; a number, a map or a null reports nothing at all.

pub mod memory_sink;
pub mod null_sink;
pub mod output;
pub mod sink;
pub mod trace_record;
pub mod traced;
pub mod tracer_system;

// Re-export main types
pub use memory_sink::{MemorySink, RecordCallback};
pub use null_sink::NullSink;
pub use output::{char_count, TraceOutput};
pub use sink::{
    global_sink, reset_global_sink, set_global_sink, JsonLineSink, StdoutSink, TraceSink,
    TracingSink, WriterSink,
};
pub use trace_record::{PendingTrace, TraceRecord, TraceStatus};
pub use traced::{trace, AsyncTraced, Traced};
pub use tracer_system::{Tracer, DEFAULT_MODEL_KEY, DEFAULT_PROMPT_KEY};
