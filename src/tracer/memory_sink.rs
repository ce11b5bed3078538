//! In-memory record storage with callbacks and filtering
//!
//! [`MemorySink`] keeps every record it receives so they can be inspected
//! afterwards. It is the natural sink for tests and for applications that want
//! to summarise a batch of calls once they are done.

use super::sink::TraceSink;
use super::trace_record::TraceRecord;
use std::sync::{Arc, Mutex, MutexGuard};

/// Callback invoked with every record a [`MemorySink`] receives
pub type RecordCallback = Arc<dyn Fn(&TraceRecord) + Send + Sync>;

/// Thread-safe store of emitted trace records
///
/// MemorySink supports:
/// - A callback triggered on each stored record
/// - Counting records that match a predicate
/// - Reading back records or their rendered lines
pub struct MemorySink {
    records: Mutex<Vec<TraceRecord>>,
    on_emit_callback: Option<RecordCallback>,
}

impl MemorySink {
    /// Create a new memory sink
    ///
    /// # Arguments
    ///
    /// * `on_emit_callback` - Optional callback called whenever a record is stored
    pub fn new(on_emit_callback: Option<RecordCallback>) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            on_emit_callback,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<TraceRecord>> {
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Copies of every stored record, oldest first
    pub fn records(&self) -> Vec<TraceRecord> {
        self.lock().clone()
    }

    /// Every stored record rendered as a trace line
    pub fn lines(&self) -> Vec<String> {
        self.lock().iter().map(TraceRecord::to_line).collect()
    }

    /// The most recently stored record
    pub fn last(&self) -> Option<TraceRecord> {
        self.lock().last().cloned()
    }

    /// Count records matching a predicate
    pub fn count_matching(&self, predicate: impl Fn(&TraceRecord) -> bool) -> usize {
        self.lock().iter().filter(|record| predicate(record)).count()
    }

    /// Remove all stored records
    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new(None)
    }
}

impl TraceSink for MemorySink {
    fn emit(&self, record: &TraceRecord) {
        if let Some(callback) = &self.on_emit_callback {
            callback(record);
        }

        self.lock().push(record.clone());
    }
}
