pub mod args;
pub mod error;
pub mod tracer;

pub use args::CallArgs;
pub use error::{LlmTraceError, Result};
pub use tracer::{trace, TraceOutput, TraceRecord, TraceSink, TraceStatus, Traced, Tracer};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::args::CallArgs;
    pub use crate::error::{LlmTraceError, Result};
    pub use crate::traced;
    pub use crate::tracer::{
        set_global_sink, trace, AsyncTraced, MemorySink, StdoutSink, TraceOutput, TraceRecord,
        TraceSink, TraceStatus, Traced, Tracer,
    };
}
