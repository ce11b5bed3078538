//! Destinations for finished trace records
//!
//! A [`TraceSink`] accepts one record at a time and never fails: anything that
//! goes wrong while writing stays inside the sink. The process starts with a
//! [`StdoutSink`] installed as the global sink; applications can swap it with
//! [`set_global_sink`] or give individual tracers their own sink.

use super::trace_record::{TraceRecord, TraceStatus};
use std::io::{self, Write};
use std::sync::{Arc, Mutex, OnceLock, RwLock};
use tracing::{debug, info, warn};

/// Receives each finished [`TraceRecord`]
pub trait TraceSink: Send + Sync {
    /// Accept one record. Implementations must not panic or propagate failures.
    fn emit(&self, record: &TraceRecord);
}

/// Any closure over a record can serve as a sink
impl<F> TraceSink for F
where
    F: Fn(&TraceRecord) + Send + Sync,
{
    fn emit(&self, record: &TraceRecord) {
        self(record)
    }
}

/// Writes each record as a line on standard output
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl TraceSink for StdoutSink {
    fn emit(&self, record: &TraceRecord) {
        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", record.to_line()).and_then(|_| stdout.flush()) {
            warn!(function = %record.function_name, "Failed to write trace line: {}", e);
        }
    }
}

/// Writes each record as a line into any writer
///
/// ```rust
/// use llmtrace_lite::tracer::WriterSink;
///
/// let sink = WriterSink::new(Vec::new());
/// // ... trace some calls with this sink ...
/// let text = String::from_utf8(sink.into_inner()).unwrap();
/// assert!(text.is_empty());
/// ```
pub struct WriterSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the writer, e.g. to inspect a captured buffer
    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl WriterSink<Vec<u8>> {
    /// Everything written so far, as text
    pub fn contents(&self) -> String {
        let writer = self.writer.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        String::from_utf8_lossy(&writer).into_owned()
    }
}

impl<W: Write + Send> TraceSink for WriterSink<W> {
    fn emit(&self, record: &TraceRecord) {
        let mut writer = self.writer.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Err(e) = writeln!(writer, "{}", record.to_line()) {
            warn!(function = %record.function_name, "Failed to write trace line: {}", e);
        }
    }
}

/// Writes each record as one JSON object per line
pub struct JsonLineSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLineSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write + Send> TraceSink for JsonLineSink<W> {
    fn emit(&self, record: &TraceRecord) {
        let json = match record.to_json() {
            Ok(json) => json,
            Err(e) => {
                warn!(function = %record.function_name, "Failed to serialize trace record: {}", e);
                return;
            }
        };

        let mut writer = self.writer.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Err(e) = writeln!(writer, "{}", json) {
            warn!(function = %record.function_name, "Failed to write trace record: {}", e);
        }
    }
}

/// Forwards each record to the `tracing` subscriber as a structured event
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn emit(&self, record: &TraceRecord) {
        let duration_ms = record.duration.as_secs_f64() * 1000.0;
        match record.status {
            TraceStatus::Success => info!(
                function = %record.function_name,
                model = record.model.as_deref(),
                prompt_chars = record.prompt_chars,
                output_chars = record.output_chars,
                duration_ms,
                status = %record.status,
                "Traced call"
            ),
            TraceStatus::Error => warn!(
                function = %record.function_name,
                model = record.model.as_deref(),
                prompt_chars = record.prompt_chars,
                duration_ms,
                status = %record.status,
                error = record.error_message.as_deref().unwrap_or_default(),
                "Traced call failed"
            ),
        }
    }
}

fn global_slot() -> &'static RwLock<Arc<dyn TraceSink>> {
    static GLOBAL_SINK: OnceLock<RwLock<Arc<dyn TraceSink>>> = OnceLock::new();
    GLOBAL_SINK.get_or_init(|| RwLock::new(Arc::new(StdoutSink)))
}

/// The sink used by tracers that have none of their own
pub fn global_sink() -> Arc<dyn TraceSink> {
    let slot = global_slot().read().unwrap_or_else(|poisoned| poisoned.into_inner());
    Arc::clone(&slot)
}

/// Replace the global sink, returning the previous one
pub fn set_global_sink(sink: Arc<dyn TraceSink>) -> Arc<dyn TraceSink> {
    let mut slot = global_slot().write().unwrap_or_else(|poisoned| poisoned.into_inner());
    debug!("Replacing global trace sink");
    std::mem::replace(&mut *slot, sink)
}

/// Put the standard output sink back in place
pub fn reset_global_sink() {
    set_global_sink(Arc::new(StdoutSink));
}

/// Serializes tests that swap the process-wide sink
#[cfg(test)]
pub(crate) static GLOBAL_SINK_TEST_LOCK: Mutex<()> = Mutex::new(());
