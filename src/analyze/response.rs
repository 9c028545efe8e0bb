use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Result of reading untrusted model output.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome<T> {
    Parsed(T),
    /// The output could not be used; carries why.
    Fallback(String),
}

impl<T> ParseOutcome<T> {
    pub fn is_parsed(&self) -> bool {
        matches!(self, ParseOutcome::Parsed(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ParseOutcome<U> {
        match self {
            ParseOutcome::Parsed(value) => ParseOutcome::Parsed(f(value)),
            ParseOutcome::Fallback(reason) => ParseOutcome::Fallback(reason),
        }
    }

    pub fn unwrap_or_else(self, f: impl FnOnce(String) -> T) -> T {
        match self {
            ParseOutcome::Parsed(value) => value,
            ParseOutcome::Fallback(reason) => f(reason),
        }
    }
}

/// Remove Markdown code-fence markers a model may wrap its JSON in.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "")
        .replace("```JSON", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Strip fences and parse `raw` as JSON.
pub fn parse_json<T: DeserializeOwned>(raw: &str) -> ParseOutcome<T> {
    let cleaned = strip_code_fences(raw);
    if cleaned.is_empty() {
        return ParseOutcome::Fallback("empty response".to_string());
    }

    match serde_json::from_str(&cleaned) {
        Ok(value) => ParseOutcome::Parsed(value),
        Err(e) => ParseOutcome::Fallback(format!("invalid JSON: {e}")),
    }
}

/// Read a 0–100 score from a number or numeric string; anything else is 0.
pub fn score_from_value(value: &Value) -> u8 {
    let raw = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    raw.filter(|v| v.is_finite())
        .map(|v| v.round().clamp(0.0, 100.0) as u8)
        .unwrap_or(0)
}

pub(crate) fn lenient_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(score_from_value(&value))
}
