//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use linestore_core::{EntryMap, Value};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Print a single value looked up by key
    pub fn print_value(&self, key: &str, value: &Value) {
        match self.format {
            OutputFormat::Human => {
                println!("{} = {}", key, format_value(value));
            }
            OutputFormat::Json => {
                println!("{}", serde_json::json!({ key: value.to_json() }));
            }
            OutputFormat::Quiet => {
                println!("{}", format_value(value));
            }
        }
    }

    /// Print a mapping of entries
    pub fn print_entries(&self, entries: &EntryMap) {
        match self.format {
            OutputFormat::Human => {
                let width = entries.keys().map(|k| k.len()).max().unwrap_or(0);
                for (key, value) in entries {
                    println!("{:width$} = {}", key, format_value(value));
                }
            }
            OutputFormat::Json => {
                let mut map = serde_json::Map::new();
                for (key, value) in entries {
                    map.insert(key.clone(), value.to_json());
                }
                println!("{}", serde_json::Value::Object(map));
            }
            OutputFormat::Quiet => {
                for key in entries.keys() {
                    println!("{}", key);
                }
            }
        }
    }

    /// Print a list of keys
    pub fn print_keys(&self, keys: &[String]) {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::json!(keys));
            }
            OutputFormat::Human | OutputFormat::Quiet => {
                for key in keys {
                    println!("{}", key);
                }
            }
        }
    }

    /// Print a status/confirmation message (suppressed in quiet mode)
    pub fn message(&self, text: &str) {
        if !self.is_quiet() {
            println!("{}", text);
        }
    }
}

/// Render a value for human/quiet output: strings bare, everything else
/// in its JSON shape.
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_json().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        // Quiet wins over json
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_format_value_strings_are_bare() {
        assert_eq!(format_value(&Value::from("hello")), "hello");
        assert_eq!(format_value(&Value::Integer(5)), "5");
        assert_eq!(format_value(&Value::Null), "null");
        assert_eq!(format_value(&Value::Boolean(true)), "true");
    }
}
