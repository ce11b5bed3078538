//! Traced callables
//!
//! [`Traced`] and [`AsyncTraced`] hold a wrapped function together with the
//! [`Tracer`] that produced them. Calling one runs the function with exactly the
//! arguments given and hands back exactly what the function returned, emitting
//! one record per call on the way out. A panic inside the function is recorded
//! as an error and then resumed with its original payload.

use super::output::TraceOutput;
use super::tracer_system::{best_effort, panic_message, Tracer};
use crate::args::CallArgs;
use futures::FutureExt;
use std::fmt::Display;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

/// Fallback message when an error's `Display` impl panics
const UNPRINTABLE_ERROR: &str = "<error message unavailable>";

/// Wrap `func` under `name` using a default [`Tracer`]
///
/// Records go to the global sink.
pub fn trace<F>(name: impl Into<String>, func: F) -> Traced<F> {
    Tracer::default().wrap(name, func)
}

/// Wrap a named function, taking the record name from its identifier
///
/// ```rust
/// use llmtrace_lite::{traced, CallArgs, LlmTraceError};
///
/// fn shout(args: CallArgs) -> Result<String, LlmTraceError> {
///     Ok(args.require_text("prompt", 0)?.to_uppercase())
/// }
///
/// let shout = traced!(shout);
/// assert_eq!(shout.name(), "shout");
/// ```
///
/// A second argument selects the tracer: `traced!(shout, tracer)`.
#[macro_export]
macro_rules! traced {
    ($func:ident) => {
        $crate::tracer::trace(stringify!($func), $func)
    };
    ($func:ident, $tracer:expr) => {
        ($tracer).wrap(stringify!($func), $func)
    };
}

/// A synchronous function wrapped for tracing
#[derive(Clone)]
pub struct Traced<F> {
    name: String,
    tracer: Tracer,
    func: F,
}

impl<F> Traced<F> {
    pub(crate) fn new(name: String, tracer: Tracer, func: F) -> Self {
        Self { name, tracer, func }
    }

    /// Name records are emitted under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The wrapped function itself
    pub fn inner(&self) -> &F {
        &self.func
    }

    /// Call the wrapped function and emit a record for the call
    pub fn call<R, E>(&self, args: CallArgs) -> Result<R, E>
    where
        F: Fn(CallArgs) -> Result<R, E>,
        R: TraceOutput,
        E: Display,
    {
        let pending = self.tracer.begin(&self.name, &args);

        let start = Instant::now();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| (self.func)(args)));
        let duration = start.elapsed();

        match outcome {
            Ok(Ok(value)) => {
                let output_chars = best_effort(|| value.text_chars()).flatten();
                self.tracer.emit(&pending.succeeded(duration, output_chars));
                Ok(value)
            }
            Ok(Err(error)) => {
                self.tracer.emit(&pending.failed(duration, describe_error(&error)));
                Err(error)
            }
            Err(payload) => {
                self.tracer.emit(&pending.failed(duration, panic_message(&*payload)));
                panic::resume_unwind(payload)
            }
        }
    }
}

/// A future-returning function wrapped for tracing
#[derive(Clone)]
pub struct AsyncTraced<F> {
    name: String,
    tracer: Tracer,
    func: F,
}

impl<F> AsyncTraced<F> {
    pub(crate) fn new(name: String, tracer: Tracer, func: F) -> Self {
        Self { name, tracer, func }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn inner(&self) -> &F {
        &self.func
    }

    /// Call the wrapped function, await its future and emit a record for the call
    ///
    /// The duration runs from before the future is created until it resolves.
    pub async fn call<Fut, R, E>(&self, args: CallArgs) -> Result<R, E>
    where
        F: Fn(CallArgs) -> Fut,
        Fut: Future<Output = Result<R, E>>,
        R: TraceOutput,
        E: Display,
    {
        let pending = self.tracer.begin(&self.name, &args);

        let start = tokio::time::Instant::now();
        let outcome = AssertUnwindSafe(async { (self.func)(args).await })
            .catch_unwind()
            .await;
        let duration = start.elapsed();

        match outcome {
            Ok(Ok(value)) => {
                let output_chars = best_effort(|| value.text_chars()).flatten();
                self.tracer.emit(&pending.succeeded(duration, output_chars));
                Ok(value)
            }
            Ok(Err(error)) => {
                self.tracer.emit(&pending.failed(duration, describe_error(&error)));
                Err(error)
            }
            Err(payload) => {
                self.tracer.emit(&pending.failed(duration, panic_message(&*payload)));
                panic::resume_unwind(payload)
            }
        }
    }
}

fn describe_error<E: Display>(error: &E) -> String {
    best_effort(|| error.to_string()).unwrap_or_else(|| UNPRINTABLE_ERROR.to_string())
}
