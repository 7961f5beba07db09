//! Per-level value formatting
//!
//! Formats `"20 21 22"` or `[20, 21, 22]` as `["20", "21", "22"]`, and
//! flat stats such as `"25 25 25"` as the single string `"25"`.

use super::attributes::display_value;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

/// Separator used for attribute displays.
pub const DEFAULT_SEPARATOR: &str = " / ";

lazy_static::lazy_static! {
    static ref TRAILING_ZEROES: Regex = Regex::new(r"\.0+(\D|$)").expect("trailing zero pattern");
}

/// A formatted value: one string, or one string per level
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FormattedValue {
    Single(String),
    Levels(Vec<String>),
}

impl FormattedValue {
    /// Join levels back into one display string
    pub fn join(&self, separator: &str) -> String {
        match self {
            FormattedValue::Single(value) => value.clone(),
            FormattedValue::Levels(levels) => levels.join(separator),
        }
    }

    /// Number of levels represented
    pub fn level_count(&self) -> usize {
        match self {
            FormattedValue::Single(_) => 1,
            FormattedValue::Levels(levels) => levels.len(),
        }
    }
}

impl From<&str> for FormattedValue {
    fn from(value: &str) -> Self {
        FormattedValue::Single(value.to_string())
    }
}

/// Format a raw attribute value
///
/// Arrays are taken element by element; anything else is displayed and
/// split on single spaces. Identical levels collapse to one, `%` is appended
/// when `percent` is set, and trailing `.0` fragments are dropped. More than
/// one remaining level yields [`FormattedValue::Levels`].
pub fn format_values(raw: &Value, percent: bool, separator: &str) -> FormattedValue {
    let mut tokens: Vec<String> = match raw {
        Value::Array(items) => items.iter().map(display_value).collect(),
        other => display_value(other)
            .split(' ')
            .map(str::to_string)
            .collect(),
    };

    if tokens.iter().all(|token| *token == tokens[0]) {
        tokens.truncate(1);
    }

    if percent {
        for token in &mut tokens {
            token.push('%');
        }
    }

    if separator.is_empty() {
        let cleaned: Vec<String> = tokens.iter().map(|t| strip_trailing_zeroes(t)).collect();
        return into_formatted(cleaned);
    }

    let joined = strip_trailing_zeroes(&tokens.join(separator));
    if tokens.len() > 1 {
        FormattedValue::Levels(joined.split(separator).map(str::to_string).collect())
    } else {
        FormattedValue::Single(joined)
    }
}

/// [`format_values`] over plain text with the default separator
pub fn format_text(raw: &str, percent: bool) -> FormattedValue {
    format_values(&Value::String(raw.to_string()), percent, DEFAULT_SEPARATOR)
}

fn strip_trailing_zeroes(text: &str) -> String {
    TRAILING_ZEROES.replace_all(text, "${1}").into_owned()
}

fn into_formatted(mut tokens: Vec<String>) -> FormattedValue {
    if tokens.len() == 1 {
        FormattedValue::Single(tokens.remove(0))
    } else {
        FormattedValue::Levels(tokens)
    }
}
