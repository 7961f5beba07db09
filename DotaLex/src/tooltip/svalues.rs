//! `{s:name}` substitution used by ability and talent names

use super::attributes::{AttributeList, display_value};
use serde_json::{Map, Value};

/// Replace `{s:key}` with each record's value
///
/// Records whose value is an object are skipped; later records overwrite
/// earlier ones with the same key. Unmatched tokens stay as they are.
pub fn substitute_flat(template: &str, attributes: &AttributeList) -> String {
    if template.is_empty() {
        return String::new();
    }

    let mut values: Vec<(&str, &Value)> = Vec::new();
    for record in attributes {
        for (key, value) in record {
            match values.iter_mut().find(|(existing, _)| *existing == key.as_str()) {
                Some(slot) => slot.1 = value,
                None => values.push((key.as_str(), value)),
            }
        }
    }

    values
        .into_iter()
        .filter(|(_, value)| !value.is_object())
        .fold(template.to_string(), |text, (key, value)| {
            text.replace(&format!("{{s:{key}}}"), &display_value(value))
        })
}

/// Replace talent tokens from a linked ability's bonus table
///
/// Every entry of `linked` that is an object holding `talent_key`
/// contributes its value, without leading `+`, `-` or `x`, to
/// `{s:bonus_<entry>}`. The last such value also fills `{s:value}`.
pub fn substitute_bonus(talent_key: &str, template: &str, linked: &Map<String, Value>) -> String {
    let mut text = template.to_string();
    let mut shared = None;

    for (entry, value) in linked {
        let Some(bonus) = value.as_object().and_then(|bonus| bonus.get(talent_key)) else {
            continue;
        };
        let cleaned = display_value(bonus)
            .trim_start_matches(['+', '-', 'x'])
            .to_string();

        text = text.replace(&format!("{{s:bonus_{entry}}}"), &cleaned);
        shared = Some(cleaned);
    }

    match shared {
        Some(value) => text.replace("{s:value}", &value),
        None => text,
    }
}
