//! Model reply reading
//!
//! The model is asked for a JSON object but nothing guarantees it sends one.
//! Two readers are provided:
//!
//! - `Lines`: a line scanner keyed on exact punctuation. It tolerates the
//!   commentary and trailing garbage models like to add, but silently drops
//!   anything that is not laid out one field per line.
//! - `Json`: a strict `serde_json` read that reports the first syntax error.
//!
//! Neither reader checks which keys were found; callers decide what a missing
//! category means.
use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    models::{RecommendationSet, Suggestion},
};

/// Which reader to apply to the model reply
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyFormat {
    #[default]
    Lines,
    Json,
}

/// Reads a reply with the configured reader
pub fn parse_reply(text: &str, format: ReplyFormat) -> AppResult<RecommendationSet> {
    match format {
        ReplyFormat::Lines => Ok(parse_lines(text)),
        ReplyFormat::Json => parse_json(text),
    }
}

/// Removes a surrounding markdown code fence, with or without a `json` tag
pub fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    let text = text.trim_end();
    text.strip_suffix("```").unwrap_or(text).trim()
}

/// Line scanner state
#[derive(Default)]
struct LineScanner {
    result: RecommendationSet,
    current_key: String,
    current_array: Vec<Suggestion>,
    current_record: Suggestion,
    in_record: bool,
}

impl LineScanner {
    fn feed(&mut self, line: &str) {
        if let Some(key) = array_start_key(line) {
            // The enclosing `{` of the reply is not a record
            self.current_key = key.to_string();
            self.current_array = Vec::new();
            self.current_record = Suggestion::new();
            self.in_record = false;
        } else if line == "}," {
            let record = std::mem::take(&mut self.current_record);
            self.current_array.push(record);
            self.in_record = false;
        } else if line == "]" || line == "]," {
            if self.in_record {
                let record = std::mem::take(&mut self.current_record);
                self.current_array.push(record);
            }
            let array = std::mem::take(&mut self.current_array);
            self.result.insert(self.current_key.clone(), array);
            self.current_record = Suggestion::new();
            self.in_record = false;
        } else if line == "{" {
            self.current_record = Suggestion::new();
            self.in_record = true;
        } else if line.contains("\": \"") {
            if let Some((key, value)) = split_field(line) {
                if self.in_record {
                    self.current_record.insert(key, value);
                }
            }
        }
    }

    fn finish(self) -> RecommendationSet {
        self.result
    }
}

/// `"movies": [` → `movies`
fn array_start_key(line: &str) -> Option<&str> {
    if line.starts_with('"') && line.ends_with("\": [") {
        Some(line.get(1..line.len() - 4).unwrap_or(""))
    } else {
        None
    }
}

/// `"title": "Her",` → (`title`, `Her`)
///
/// The value is everything after the first `": `, minus a trailing comma and
/// one quote on each end. Escapes are left as written.
fn split_field(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once("\": ")?;
    let key = key.strip_prefix('"').unwrap_or(key);
    let value = value.strip_suffix(',').unwrap_or(value);
    let value = value.strip_prefix('"').unwrap_or(value);
    let value = value.strip_suffix('"').unwrap_or(value);
    Some((key, value))
}

/// Scans the reply line by line
pub fn parse_lines(text: &str) -> RecommendationSet {
    let mut scanner = LineScanner::default();
    for line in strip_code_fence(text).lines() {
        scanner.feed(line.trim());
    }
    scanner.finish()
}

/// Reads the reply as a JSON object
///
/// Every array-of-objects member becomes a named sequence. String fields are
/// kept verbatim, numbers and booleans are stringified, nested values dropped.
pub fn parse_json(text: &str) -> AppResult<RecommendationSet> {
    let value: Value = serde_json::from_str(strip_code_fence(text)).map_err(|e| {
        AppError::ReplyParse(format!(
            "invalid JSON at line {} column {}: {}",
            e.line(),
            e.column(),
            e
        ))
    })?;

    let Value::Object(members) = value else {
        return Err(AppError::ReplyParse(
            "expected a JSON object at the top level".to_string(),
        ));
    };

    let mut result = RecommendationSet::new();
    for (key, member) in members {
        let Value::Array(entries) = member else {
            tracing::debug!(key = %key, "Skipping non-array member in model reply");
            continue;
        };

        let suggestions = entries
            .into_iter()
            .filter_map(|entry| match entry {
                Value::Object(fields) => Some(
                    fields
                        .into_iter()
                        .filter_map(|(name, field)| flat_value(field).map(|v| (name, v)))
                        .collect::<Suggestion>(),
                ),
                _ => None,
            })
            .collect();

        result.insert(key, suggestions);
    }

    Ok(result)
}

fn flat_value(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
