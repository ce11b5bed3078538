//! Textual size of return values
//!
//! [`TraceOutput`] lets a return value say whether it is text, and if so how
//! many characters it holds. Only text produces an `output_chars` figure; every
//! other value reports `None` so the field is left out of the record.

use serde_json::Value;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::sync::Arc;

/// Character count of `text`, in Unicode scalar values
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// Character count of an argument value when it is a JSON string
pub fn value_chars(value: &Value) -> Option<usize> {
    value.as_str().map(char_count)
}

/// Return values that can report their textual length
///
/// The default reports `None`, so a non-text type only needs an empty impl:
///
/// ```rust
/// use llmtrace_lite::TraceOutput;
///
/// struct Completion {
///     tokens: u32,
/// }
///
/// impl TraceOutput for Completion {}
/// ```
pub trait TraceOutput {
    /// Number of characters if this value is text, `None` otherwise
    fn text_chars(&self) -> Option<usize> {
        None
    }
}

impl TraceOutput for str {
    fn text_chars(&self) -> Option<usize> {
        Some(char_count(self))
    }
}

impl TraceOutput for String {
    fn text_chars(&self) -> Option<usize> {
        Some(char_count(self))
    }
}

impl<T: TraceOutput + ?Sized> TraceOutput for &T {
    fn text_chars(&self) -> Option<usize> {
        (**self).text_chars()
    }
}

impl<T: TraceOutput + ?Sized> TraceOutput for Box<T> {
    fn text_chars(&self) -> Option<usize> {
        (**self).text_chars()
    }
}

impl<T: TraceOutput + ?Sized> TraceOutput for Arc<T> {
    fn text_chars(&self) -> Option<usize> {
        (**self).text_chars()
    }
}

impl<T: TraceOutput + ?Sized> TraceOutput for Rc<T> {
    fn text_chars(&self) -> Option<usize> {
        (**self).text_chars()
    }
}

impl TraceOutput for Cow<'_, str> {
    fn text_chars(&self) -> Option<usize> {
        Some(char_count(self))
    }
}

impl TraceOutput for Value {
    fn text_chars(&self) -> Option<usize> {
        value_chars(self)
    }
}

/// `None` is never text; `Some` defers to the inner value
impl<T: TraceOutput> TraceOutput for Option<T> {
    fn text_chars(&self) -> Option<usize> {
        self.as_ref().and_then(TraceOutput::text_chars)
    }
}

impl<T> TraceOutput for Vec<T> {}
impl<K, V, S> TraceOutput for HashMap<K, V, S> {}
impl<K, V> TraceOutput for BTreeMap<K, V> {}

macro_rules! non_text_output {
    ($($ty:ty),* $(,)?) => {
        $(impl TraceOutput for $ty {})*
    };
}

non_text_output!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_char_count_counts_scalar_values() {
        assert_eq!(char_count(""), 0);
        assert_eq!(char_count("abc"), 3);
        assert_eq!(char_count("Hello 世界 🌍 🚀"), 12);
        assert_ne!("Hello 世界 🌍 🚀".len(), 12);
    }

    #[test]
    fn test_strings_report_length() {
        assert_eq!("Response".text_chars(), Some(8));
        assert_eq!(String::new().text_chars(), Some(0));
        assert_eq!(Cow::Borrowed("ab").text_chars(), Some(2));
        assert_eq!(Arc::<str>::from("abc").text_chars(), Some(3));
    }

    #[test]
    fn test_json_values_report_only_strings() {
        assert_eq!(json!("data").text_chars(), Some(4));
        assert_eq!(json!({"result": "data"}).text_chars(), None);
        assert_eq!(json!(12345).text_chars(), None);
        assert_eq!(Value::Null.text_chars(), None);
    }

    #[test]
    fn test_option_defers_to_inner() {
        assert_eq!(Some("hi".to_string()).text_chars(), Some(2));
        assert_eq!(None::<String>.text_chars(), None);
    }

    #[test]
    fn test_non_text_values_report_none() {
        assert_eq!(42_i32.text_chars(), None);
        assert_eq!(().text_chars(), None);
        assert_eq!(vec!["a", "b"].text_chars(), None);
        assert_eq!(HashMap::<String, String>::new().text_chars(), None);
    }
}
