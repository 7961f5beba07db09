//! Per-source transforms
//!
//! Each transform is a pure function of already-loaded documents and
//! returns an insertion-ordered, serializable map ready to be written out.

pub mod abilities;
pub mod aghs;
pub mod behavior;
pub mod heroes;
pub mod items;
pub mod lore;
pub mod neutral;

pub use abilities::{Ability, transform_abilities};
pub use aghs::{Aghs, transform_aghs};
pub use behavior::{Behavior, format_behavior};
pub use heroes::{transform_hero_names, transform_heroes};
pub use items::{Item, transform_items};
pub use lore::transform_hero_lore;
pub use neutral::neutral_item_tiers;

use crate::error::{Error, Result};
use dotalex::tooltip::{AttributeList, SPECIAL_TABLE, VALUE_TABLE};
use serde::Serializer;
use serde_json::{Map, Value};

/// Key of the schema version entry at the top of upstream script files.
pub const VERSION_KEY: &str = "Version";

/// The named top-level block of a script document
pub(crate) fn script_block<'a>(
    document: &'a Value,
    block: &str,
    name: &str,
) -> Result<&'a Map<String, Value>> {
    document
        .get(block)
        .and_then(Value::as_object)
        .ok_or_else(|| Error::layout(name, format!("no `{block}` block")))
}

/// Special values of a script as one attribute list
///
/// Legacy `AbilitySpecial` records win; otherwise every `AbilityValues`
/// entry becomes its own record.
pub fn script_attributes(script: &Value) -> AttributeList {
    if let Some(special) = script.get(SPECIAL_TABLE) {
        return AttributeList::from_value(special);
    }
    script
        .get(VALUE_TABLE)
        .and_then(Value::as_object)
        .map(AttributeList::from_flat_table)
        .unwrap_or_default()
}

/// Leading integer of a numeric field, the way upstream consumers read it
///
/// `"20 15 10"` reads as 20; text without a leading number reads as `None`.
pub fn leading_int(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(text) => {
            let text = text.trim_start();
            let (sign, digits) = match text.strip_prefix('-') {
                Some(rest) => (-1, rest),
                None => (1, text.strip_prefix('+').unwrap_or(text)),
            };
            let end = digits
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(digits.len());
            digits[..end].parse::<i64>().ok().map(|n| sign * n)
        }
        _ => None,
    }
}

/// Text of a string field, if present and non-empty
pub(crate) fn text_field<'a>(script: &'a Value, key: &str) -> Option<&'a str> {
    script.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Serialize a missing or zero count as `false`
#[allow(clippy::ref_option, clippy::trivially_copy_pass_by_ref)]
pub(crate) fn number_or_false<S: Serializer>(
    value: &Option<i64>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match value {
        Some(n) if *n != 0 => serializer.serialize_i64(*n),
        _ => serializer.serialize_bool(false),
    }
}
