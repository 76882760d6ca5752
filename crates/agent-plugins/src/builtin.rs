//! Capabilities shipped with the crate
//!
//! These are deliberately small: they exist so the CLI and tests have
//! something real to load from the default namespace.

use crate::{Capability, Namespace};
use agent_core::{Error, Result};
use serde_json::{Value, json};

/// Namespace searched when the caller does not name one
pub const DEFAULT_NAMESPACE: &str = "plugins";

/// Build the default namespace with every built-in capability
pub fn namespace() -> Namespace {
    Namespace::new(DEFAULT_NAMESPACE)
        .register_default::<EchoPlugin>("EchoPlugin")
        .register_default::<WordCountPlugin>("WordCountPlugin")
}

/// Returns its arguments unchanged
#[derive(Debug, Default)]
pub struct EchoPlugin;

impl Capability for EchoPlugin {
    fn execute(&mut self, args: Value) -> Result<Value> {
        Ok(args)
    }

    fn description(&self) -> &str {
        "Echo the arguments back"
    }
}

/// Counts whitespace-separated words in a string argument
#[derive(Debug, Default)]
pub struct WordCountPlugin;

impl Capability for WordCountPlugin {
    fn execute(&mut self, args: Value) -> Result<Value> {
        let text = args.as_str().ok_or_else(|| {
            Error::CapabilityFailed(format!("word_count expects a string, got {args}"))
        })?;
        Ok(json!({ "words": text.split_whitespace().count() }))
    }

    fn validate(&self, args: &Value) -> bool {
        args.is_string()
    }

    fn description(&self) -> &str {
        "Count the words in a piece of text"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo() {
        let mut echo = EchoPlugin;
        assert_eq!(echo.execute(json!({"a": 1})).unwrap(), json!({"a": 1}));
        assert!(echo.validate(&Value::Null));
    }

    #[test]
    fn test_word_count() {
        let mut counter = WordCountPlugin;
        assert_eq!(
            counter.execute(json!("the quick  brown fox")).unwrap(),
            json!({"words": 4})
        );
        assert_eq!(counter.execute(json!("")).unwrap(), json!({"words": 0}));
    }

    #[test]
    fn test_word_count_rejects_non_string() {
        let mut counter = WordCountPlugin;
        assert!(!counter.validate(&json!(3)));

        let err = counter.execute(json!(3)).unwrap_err();
        assert!(err.to_string().contains("expects a string"));
    }
}
