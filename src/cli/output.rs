//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, SpellerArgs};
use crate::error::Result;

/// Result of building a snapshot.
#[derive(Debug, Serialize, Deserialize)]
pub struct BuildResult {
    pub snapshot: String,
    pub documents: usize,
    pub distinct_words: usize,
    pub total_words: u64,
    pub bigrams: usize,
    pub trigrams: usize,
    pub size_bytes: u64,
    pub duration_ms: u64,
}

/// Result of a single-word suggestion.
#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestionResult {
    pub word: String,
    pub known: bool,
    pub correction: String,
    pub candidates: Vec<String>,
}

/// Word table and language model statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelStats {
    pub distinct_words: usize,
    pub total_words: u64,
    pub max_word_len: usize,
    pub bigrams: usize,
    pub trigrams: usize,
    pub smoothing: f64,
    pub max_edits: usize,
    pub alphabet: String,
    pub most_frequent: Vec<(String, u64)>,
}

/// Output a result in the selected format.
///
/// In human format `message` is printed first, followed by the fields of
/// `result` when the verbosity reaches `detail_level`.
pub fn output_result<T: Serialize>(
    message: &str,
    result: &T,
    detail_level: u8,
    args: &SpellerArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, detail_level, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(
    message: &str,
    result: &T,
    detail_level: u8,
    args: &SpellerArgs,
) -> Result<()> {
    println!("{message}");

    if args.verbosity() >= detail_level {
        let value = serde_json::to_value(result)?;
        for line in format_fields(&value) {
            println!("{line}");
        }
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &SpellerArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// One `key: value` line per top-level field.
fn format_fields(value: &serde_json::Value) -> Vec<String> {
    match value {
        serde_json::Value::Object(obj) => obj
            .iter()
            .map(|(key, val)| format!("  {key}: {}", format_value(val)))
            .collect(),
        _ => vec![format!("  {}", format_value(value))],
    }
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(obj) => {
            let formatted_fields = obj
                .iter()
                .map(|(key, val)| format!("{key}={}", format_value(val)))
                .collect::<Vec<_>>()
                .join(" ");
            format!("{{{formatted_fields}}}")
        }
        serde_json::Value::Null => "null".to_string(),
    }
}

/// Format bytes into human-readable format.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    let unit = UNITS[unit_index];
    if unit_index == 0 {
        format!("{bytes} {unit}")
    } else {
        format!("{size:.1} {unit}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1024), "1.0 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1048576), "1.0 MB");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&json!("cat")), "cat");
        assert_eq!(format_value(&json!(42)), "42");
        assert_eq!(format_value(&json!(["act", "cat"])), "[act, cat]");
        assert_eq!(format_value(&json!({"from": "ct", "to": "cat"})), "{from=ct to=cat}");
        assert_eq!(format_value(&json!(null)), "null");
    }

    #[test]
    fn test_format_fields() {
        let result = SuggestionResult {
            word: "ct".to_string(),
            known: false,
            correction: "cat".to_string(),
            candidates: vec!["cat".to_string(), "ct".to_string()],
        };
        let lines = format_fields(&serde_json::to_value(&result).unwrap());

        assert!(lines.contains(&"  word: ct".to_string()));
        assert!(lines.contains(&"  known: false".to_string()));
        assert!(lines.contains(&"  candidates: [cat, ct]".to_string()));
    }
}
