//! Character-counting edge cases
//!
//! Runs traced calls with empty, Unicode, very long, keyword, non-string and
//! null prompts, plus non-string outputs, then an async call and a JSON sink.
//! Set `RUST_LOG=debug` to see the tracer's own diagnostics.
//!
//! # Running the example
//!
//! ```bash
//! cargo run --example edge_cases
//! ```

use llmtrace_lite::prelude::*;
use llmtrace_lite::tracer::{JsonLineSink, TracingSink};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn call_llm(args: CallArgs) -> Result<String> {
    std::thread::sleep(Duration::from_millis(100));
    let prompt = args.display("prompt", 0).unwrap_or_default();
    Ok(format!("Response to: {}", prompt))
}

fn call_llm_with_kwargs(args: CallArgs) -> Result<String> {
    std::thread::sleep(Duration::from_millis(50));
    let prompt = args.text_or("prompt", 0, "default")?;
    Ok(format!("Response: {}", prompt))
}

fn call_llm_non_string_prompt(args: CallArgs) -> Result<Value> {
    std::thread::sleep(Duration::from_millis(50));
    Ok(json!({ "response": args.display("prompt", 0) }))
}

fn call_llm_non_string_output(_args: CallArgs) -> Result<Value> {
    std::thread::sleep(Duration::from_millis(50));
    Ok(json!({ "result": "data" }))
}

fn return_empty(_args: CallArgs) -> Result<String> {
    Ok(String::new())
}

fn call_with_none(_args: CallArgs) -> Result<String> {
    Ok("response".to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let call_llm = traced!(call_llm);
    let call_llm_with_kwargs = traced!(call_llm_with_kwargs);
    let call_llm_non_string_prompt = traced!(call_llm_non_string_prompt);
    let call_llm_non_string_output = traced!(call_llm_non_string_output);
    let return_empty = traced!(return_empty);
    let call_with_none = traced!(call_with_none);

    println!("=== Empty string prompt ===");
    call_llm.call(CallArgs::new().arg("").kwarg("model", "gpt-4o"))?;

    println!("\n=== Empty string output ===");
    return_empty.call(CallArgs::new())?;

    println!("\n=== Unicode and emoji characters ===");
    call_llm.call(CallArgs::new().arg("Hello 世界 🌍 🚀").kwarg("model", "gpt-4o"))?;

    println!("\n=== Very long string ===");
    call_llm.call(CallArgs::new().arg("A".repeat(1000)).kwarg("model", "gpt-4o"))?;

    println!("\n=== Newlines and special characters ===");
    call_llm.call(CallArgs::new().arg("Line 1\nLine 2\nLine 3\tTabbed").kwarg("model", "gpt-4o"))?;

    println!("\n=== Prompt as keyword argument ===");
    call_llm_with_kwargs
        .call(CallArgs::new().kwarg("prompt", "Keyword argument prompt").kwarg("model", "gpt-4o"))?;

    println!("\n=== Non-string return value ===");
    call_llm_non_string_output.call(CallArgs::new().arg("test prompt").kwarg("model", "gpt-4o"))?;

    println!("\n=== Non-string prompt (should not count chars) ===");
    call_llm_non_string_prompt.call(CallArgs::new().arg(12345).kwarg("model", "gpt-4o"))?;

    println!("\n=== None prompt (should not count chars) ===");
    call_with_none.call(CallArgs::new().arg(Value::Null))?;

    println!("\n=== Async call ===");
    let async_llm = Tracer::new().wrap_async("async_llm", |args: CallArgs| async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        Ok::<_, LlmTraceError>(format!("Async response to: {}", args.require_text("prompt", 0)?))
    });
    async_llm.call(CallArgs::new().arg("Stream me a haiku").kwarg("model", "gpt-4o")).await?;

    println!("\n=== JSON lines sink ===");
    let json_tracer = Tracer::new().with_sink(Arc::new(JsonLineSink::new(std::io::stdout())));
    json_tracer.wrap("call_llm", call_llm.inner()).call(CallArgs::new().arg("as json"))?;

    println!("\n=== Tracing sink (visible with RUST_LOG=info) ===");
    let log_tracer = Tracer::new().with_sink(Arc::new(TracingSink));
    log_tracer.wrap("call_llm", call_llm.inner()).call(CallArgs::new().arg("as a log event"))?;

    Ok(())
}
