//! Permissive field decoders for intake data.
//!
//! Form submissions arrive as strings ("Yes", "250", ""), JSON clients send
//! real booleans and numbers, and either may send `null`. Anything that
//! cannot be read falls back to the field's default instead of failing.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

use super::DurationTag;

/// Any value a form or JSON client might send. Arrays and objects land
/// in `Other` and read as absent.
#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Other(#[allow(dead_code)] IgnoredAny),
}

fn loose<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Loose>, D::Error> {
    Option::<Loose>::deserialize(deserializer)
}

/// Truthy answers: JSON `true`, `1`, or "yes"/"y"/"true"/"1" in any case.
pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match loose(deserializer)? {
        Some(Loose::Bool(b)) => b,
        Some(Loose::Int(i)) => i == 1,
        Some(Loose::Float(f)) => f == 1.0,
        Some(Loose::Text(s)) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "yes" | "y" | "true" | "1"
        ),
        Some(Loose::Other(_)) | None => false,
    })
}

fn read_number(value: Option<Loose>) -> Option<i64> {
    match value? {
        Loose::Int(i) => Some(i),
        Loose::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(f as i64),
        Loose::Text(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Integer count; unreadable values become 0.
pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(read_number(loose(deserializer)?).unwrap_or(0))
}

/// Integer that remembers whether it was supplied at all.
pub fn optional_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<i64>, D::Error> {
    Ok(read_number(loose(deserializer)?))
}

/// Trimmed text; empty strings are treated as absent.
pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match loose(deserializer)? {
        Some(Loose::Text(s)) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Some(Loose::Int(i)) => Some(i.to_string()),
        _ => None,
    })
}

/// Trimmed text with an empty default.
pub fn plain_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(text(deserializer)?.unwrap_or_default())
}

/// Duration tag; unrecognised values are treated as absent.
pub fn duration_tag<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DurationTag>, D::Error> {
    Ok(text(deserializer)?.and_then(|s| s.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize, Default)]
    #[serde(default)]
    struct Sample {
        #[serde(deserialize_with = "flag")]
        flag: bool,
        #[serde(deserialize_with = "number")]
        number: i64,
        #[serde(deserialize_with = "optional_number")]
        optional: Option<i64>,
        #[serde(deserialize_with = "text")]
        text: Option<String>,
    }

    fn sample(json: &str) -> Sample {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn flags_accept_form_answers() {
        assert!(sample(r#"{"flag": "Yes"}"#).flag);
        assert!(sample(r#"{"flag": " y "}"#).flag);
        assert!(sample(r#"{"flag": "TRUE"}"#).flag);
        assert!(sample(r#"{"flag": true}"#).flag);
        assert!(sample(r#"{"flag": 1}"#).flag);
        assert!(!sample(r#"{"flag": "No"}"#).flag);
        assert!(!sample(r#"{"flag": "maybe"}"#).flag);
        assert!(!sample(r#"{"flag": null}"#).flag);
        assert!(!sample(r#"{"flag": ["Yes"]}"#).flag);
        assert!(!sample(r#"{"flag": {"answer": "Yes"}}"#).flag);
        assert!(!sample(r#"{}"#).flag);
    }

    #[test]
    fn numbers_default_to_zero() {
        assert_eq!(sample(r#"{"number": 250}"#).number, 250);
        assert_eq!(sample(r#"{"number": " 250 "}"#).number, 250);
        assert_eq!(sample(r#"{"number": 12.0}"#).number, 12);
        assert_eq!(sample(r#"{"number": "lots"}"#).number, 0);
        assert_eq!(sample(r#"{"number": 12.5}"#).number, 0);
        assert_eq!(sample(r#"{"number": ""}"#).number, 0);
        assert_eq!(sample(r#"{"number": null}"#).number, 0);
        assert_eq!(sample(r#"{"number": [250]}"#).number, 0);
        assert_eq!(sample(r#"{"number": {"value": 250}}"#).number, 0);
        assert_eq!(sample(r#"{}"#).number, 0);
    }

    #[test]
    fn optional_number_tracks_absence() {
        assert_eq!(sample(r#"{"optional": "3"}"#).optional, Some(3));
        assert_eq!(sample(r#"{"optional": "three"}"#).optional, None);
        assert_eq!(sample(r#"{"optional": [3]}"#).optional, None);
        assert_eq!(sample(r#"{}"#).optional, None);
    }

    #[test]
    fn empty_text_is_absent() {
        assert_eq!(sample(r#"{"text": "  F123 "}"#).text.as_deref(), Some("F123"));
        assert_eq!(sample(r#"{"text": 42}"#).text.as_deref(), Some("42"));
        assert_eq!(sample(r#"{"text": ""}"#).text, None);
        assert_eq!(sample(r#"{"text": null}"#).text, None);
        assert_eq!(sample(r#"{"text": ["F123"]}"#).text, None);
    }
}
