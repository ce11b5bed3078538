//! Call arguments passed through traced functions
//!
//! A traced function receives its arguments as a [`CallArgs`]: an ordered list of
//! positional values plus a map of keyword values. Each value is a
//! [`serde_json::Value`], so "is this argument text?" is a match on
//! `Value::String` rather than a guess about the caller's types.
//!
//! The function being traced binds its own parameters with [`CallArgs::get`],
//! which looks at the parameter's position first and its keyword second, and
//! applies its own defaults for anything the caller left out.

use crate::error::{LlmTraceError, Result};
use serde_json::Value;
use std::collections::HashMap;

/// Positional and keyword arguments for a single call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    positional: Vec<Value>,
    keyword: HashMap<String, Value>,
}

impl CallArgs {
    /// Create an empty argument list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional argument
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Set a keyword argument, replacing any earlier value under the same name
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keyword.insert(name.into(), value.into());
        self
    }

    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    pub fn keyword(&self) -> &HashMap<String, Value> {
        &self.keyword
    }

    /// The first positional argument, if the caller supplied any
    pub fn first_positional(&self) -> Option<&Value> {
        self.positional.first()
    }

    /// A keyword argument exactly as the caller supplied it
    pub fn keyword_value(&self, name: &str) -> Option<&Value> {
        self.keyword.get(name)
    }

    /// Bind a parameter the way a function signature would: by position if the
    /// caller passed that many positional arguments, otherwise by keyword.
    pub fn get(&self, name: &str, position: usize) -> Option<&Value> {
        self.positional.get(position).or_else(|| self.keyword.get(name))
    }

    /// Text value of a parameter, or `None` when it is missing, null or not a string
    pub fn text(&self, name: &str, position: usize) -> Option<&str> {
        self.get(name, position).and_then(Value::as_str)
    }

    /// Text value of a parameter, falling back to `default` when it is missing or null
    ///
    /// Non-string values are rejected rather than silently replaced.
    pub fn text_or<'a>(&'a self, name: &str, position: usize, default: &'a str) -> Result<&'a str> {
        match self.get(name, position) {
            None | Some(Value::Null) => Ok(default),
            Some(Value::String(s)) => Ok(s),
            Some(_) => Err(LlmTraceError::InvalidArgument {
                name: name.to_string(),
                expected: "a string",
            }),
        }
    }

    /// Text value of a parameter that must be present
    pub fn require_text(&self, name: &str, position: usize) -> Result<&str> {
        match self.get(name, position) {
            None | Some(Value::Null) => Err(LlmTraceError::MissingArgument(name.to_string())),
            Some(Value::String(s)) => Ok(s),
            Some(_) => Err(LlmTraceError::InvalidArgument {
                name: name.to_string(),
                expected: "a string",
            }),
        }
    }

    /// Render a parameter for display, as `format!("{}")` would show it to a user
    ///
    /// Strings appear without quotes; every other value uses its JSON form.
    pub fn display(&self, name: &str, position: usize) -> Option<String> {
        self.get(name, position).map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keyword.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_collects_positional_and_keyword() {
        let args = CallArgs::new().arg("hello").arg(42).kwarg("model", "gpt-4o");

        assert_eq!(args.positional(), &[json!("hello"), json!(42)]);
        assert_eq!(args.keyword_value("model"), Some(&json!("gpt-4o")));
        assert!(!args.is_empty());
    }

    #[test]
    fn test_get_prefers_position_over_keyword() {
        let args = CallArgs::new().arg("positional").kwarg("prompt", "keyword");
        assert_eq!(args.get("prompt", 0), Some(&json!("positional")));
    }

    #[test]
    fn test_get_falls_back_to_keyword() {
        let args = CallArgs::new().kwarg("prompt", "keyword");
        assert_eq!(args.get("prompt", 0), Some(&json!("keyword")));
        assert_eq!(args.get("model", 1), None);
    }

    #[test]
    fn test_option_none_becomes_null() {
        let args = CallArgs::new().arg(None::<String>);
        assert_eq!(args.first_positional(), Some(&Value::Null));
        assert_eq!(args.text("prompt", 0), None);
    }

    #[test]
    fn test_text_or_applies_default() {
        let args = CallArgs::new();
        assert_eq!(args.text_or("prompt", 0, "default").unwrap(), "default");

        let args = CallArgs::new().kwarg("prompt", Value::Null);
        assert_eq!(args.text_or("prompt", 0, "default").unwrap(), "default");
    }

    #[test]
    fn test_text_or_rejects_non_string() {
        let args = CallArgs::new().arg(12345);
        let err = args.text_or("prompt", 0, "default").unwrap_err();
        assert!(matches!(err, LlmTraceError::InvalidArgument { .. }));
    }

    #[test]
    fn test_require_text_missing() {
        let args = CallArgs::new();
        let err = args.require_text("prompt", 0).unwrap_err();
        assert_eq!(err.to_string(), "Missing argument: prompt");
    }

    #[test]
    fn test_display_renders_strings_bare() {
        let args = CallArgs::new().arg("plain").kwarg("n", 12345);
        assert_eq!(args.display("prompt", 0), Some("plain".to_string()));
        assert_eq!(args.display("n", 5), Some("12345".to_string()));
        assert_eq!(args.display("missing", 3), None);
    }
}
