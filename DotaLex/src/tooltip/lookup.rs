//! Case-insensitive attribute lookup against a raw ability/item script
//!
//! Upstream is inconsistent about both case and placement: most values live
//! in `AbilityValues`, older scripts keep them in `AbilitySpecial`, and a few
//! sit directly on the script (e.g. `juggernaut_healing_ward`'s duration,
//! spelled in lowercase).

use super::attributes::display_value;
use regex::{Captures, Regex};
use serde_json::{Map, Value};

/// Slot holding the modern flat value table.
pub const VALUE_TABLE: &str = "AbilityValues";

/// Slot holding the legacy special-value records.
pub const SPECIAL_TABLE: &str = "AbilitySpecial";

lazy_static::lazy_static! {
    pub(super) static ref PERCENT_TOKEN: Regex =
        Regex::new(r"%([^% ]*)%").expect("percent token pattern");
}

/// Resolve `key` against a script, case-insensitively
///
/// Searches the `AbilityValues` slot, then the `AbilitySpecial` slot, then
/// the script itself; the first slot with a usable match wins. A stored
/// `{"value": ..}` object yields its value, a primitive yields itself, and
/// any other object is ignored so the search continues in the next slot.
/// Never mutates `script`.
pub fn lookup<'a>(key: &str, script: &'a Value) -> Option<&'a Value> {
    let table = script.as_object()?;

    if let Some(found) = table
        .get(VALUE_TABLE)
        .and_then(Value::as_object)
        .and_then(|slot| lookup_in(key, slot))
    {
        return Some(found);
    }

    if let Some(found) = table.get(SPECIAL_TABLE).and_then(|slot| lookup_special(key, slot)) {
        return Some(found);
    }

    lookup_in(key, table)
}

/// Resolve `key` and render it, returning `key` itself when unresolved
///
/// Callers that compare the result with the input can tell a miss from a
/// hit; prefer [`lookup`] when an explicit `Option` is wanted.
pub fn lookup_or_key(key: &str, script: &Value) -> String {
    lookup(key, script).map_or_else(|| key.to_string(), display_value)
}

/// Replace every `%name%` in a whole template through [`lookup_or_key`]
///
/// This is the permissive pass used when the attribute-list resolver left
/// tokens behind: `%%` becomes `%`, escaped newlines become real newlines,
/// and all tags are stripped.
pub fn resolve_with_script(template: &str, script: &Value) -> String {
    if template.is_empty() {
        return String::new();
    }

    let replaced = PERCENT_TOKEN.replace_all(template, |caps: &Captures<'_>| {
        let name = &caps[1];
        if name.is_empty() {
            "%".to_string()
        } else {
            lookup_or_key(name, script)
        }
    });

    let unescaped = crate::markup::unescape_newlines(&replaced);
    crate::markup::strip_tags(&unescaped).into_owned()
}

/// Actual key in `table` matching `key` case-insensitively
pub fn find_key_ignore_case<'a>(key: &str, table: &'a Map<String, Value>) -> Option<&'a str> {
    let wanted = key.to_lowercase();
    table
        .keys()
        .find(|candidate| candidate.to_lowercase() == wanted)
        .map(String::as_str)
}

fn lookup_in<'a>(key: &str, table: &'a Map<String, Value>) -> Option<&'a Value> {
    let actual = find_key_ignore_case(key, table)?;
    usable_value(&table[actual])
}

/// The special slot is either a flat table or a list of legacy records.
fn lookup_special<'a>(key: &str, slot: &'a Value) -> Option<&'a Value> {
    match slot {
        Value::Object(table) => lookup_in(key, table).or_else(|| {
            table
                .values()
                .filter_map(Value::as_object)
                .find_map(|record| lookup_in(key, record))
        }),
        Value::Array(records) => records
            .iter()
            .filter_map(Value::as_object)
            .find_map(|record| lookup_in(key, record)),
        _ => None,
    }
}

fn usable_value(value: &Value) -> Option<&Value> {
    match value {
        Value::Object(record) => record.get("value"),
        Value::Null => None,
        primitive => Some(primitive),
    }
}
