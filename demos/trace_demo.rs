//! Tracing simulated LLM calls
//!
//! Wraps two fake LLM calls, one that succeeds and one that fails, and prints
//! the trace line each call produces.
//!
//! # Running the example
//!
//! ```bash
//! cargo run --example trace_demo
//! ```

use llmtrace_lite::prelude::*;
use std::time::Duration;

/// Simulated LLM call
fn call_llm(args: CallArgs) -> Result<String> {
    std::thread::sleep(Duration::from_millis(100));
    let prompt = args.require_text("prompt", 0)?;
    Ok(format!("Response to: {}", prompt))
}

/// Simulated failing LLM call
fn failing_llm_call(_args: CallArgs) -> Result<String> {
    std::thread::sleep(Duration::from_millis(50));
    Err(LlmTraceError::call("API rate limit exceeded"))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let call_llm = traced!(call_llm);
    let failing_llm_call = traced!(failing_llm_call);

    println!("=== Test 1: Successful call ===");
    call_llm.call(CallArgs::new().arg("Explain quantum computing").kwarg("model", "gpt-4o"))?;

    println!("\n=== Test 2: Failed call ===");
    if failing_llm_call
        .call(CallArgs::new().arg("This will fail").kwarg("model", "claude-3"))
        .is_err()
    {
        println!("(Error caught, trace logged above)\n");
    }

    println!("=== Test 3: No model specified ===");
    call_llm.call(CallArgs::new().arg("Simple prompt"))?;

    println!("=== Tests complete ===");
    Ok(())
}
