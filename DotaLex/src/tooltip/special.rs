//! Attribute display records (`attrib` blocks)

use super::attributes::{AttributeList, AttributeRecord};
use super::values::{DEFAULT_SEPARATOR, FormattedValue, format_values};
use crate::localization::StringTable;
use crate::markup::strip_tags;
use serde::Serialize;
use serde_json::Value;

/// Prefix of the localized footers used by `+$name` headers.
pub const VARIABLE_PREFIX: &str = "dota_ability_variable_";

const ATTACK_RANGE_FOOTER: &str = "dota_ability_variable_attack_range";

/// Bookkeeping keys of legacy records that never name the attribute itself.
const RECORD_METADATA_KEYS: &[&str] = &["var_type"];

/// One attribute ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayAttribute {
    pub key: String,
    pub header: String,
    pub value: FormattedValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    /// Header was synthesized from the key because no localized one exists
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub generated: bool,
}

/// Turn every attribute record into a [`DisplayAttribute`]
///
/// A record is "known" when `prefix + key` names a localized string. That
/// string is a header with optional markers: a leading `%` formats the value
/// as a percentage, and a following `+$` turns the rest into the name of a
/// `dota_ability_variable_*` footer shown after a `+` header. Unknown records
/// get an uppercased header built from their key. One output per input, in
/// order.
pub fn format_ability_special(
    attributes: &AttributeList,
    strings: &StringTable,
    prefix: &str,
) -> Vec<DisplayAttribute> {
    attributes
        .iter()
        .map(|record| format_record(record, strings, prefix))
        .collect()
}

fn format_record(
    record: &AttributeRecord,
    strings: &StringTable,
    prefix: &str,
) -> DisplayAttribute {
    let known = record.iter().find_map(|(key, value)| {
        strings
            .get(&format!("{prefix}{key}"))
            .map(|header| (key, value, header))
    });

    if let Some((key, value, header)) = known {
        return known_attribute(key, value, header, strings);
    }

    let entry = record
        .iter()
        .find(|(key, _)| !RECORD_METADATA_KEYS.contains(&key.as_str()))
        .or_else(|| record.iter().next());

    // An empty record still yields an (empty) generated entry.
    let Some((key, value)) = entry else {
        return DisplayAttribute {
            key: String::new(),
            header: ":".to_string(),
            value: FormattedValue::Single(String::new()),
            footer: None,
            generated: true,
        };
    };

    DisplayAttribute {
        key: key.clone(),
        header: format!("{}:", key.replace('_', " ").to_uppercase()),
        value: format_values(value, false, DEFAULT_SEPARATOR),
        footer: None,
        generated: true,
    }
}

fn known_attribute(
    key: &str,
    value: &Value,
    header: &str,
    strings: &StringTable,
) -> DisplayAttribute {
    let (percent, rest) = match header.strip_prefix('%') {
        Some(rest) => (true, rest),
        None => (false, header),
    };
    let value = format_values(value, percent, DEFAULT_SEPARATOR);

    match rest.strip_prefix("+$") {
        Some(variable) => {
            let footer_key = format!("{VARIABLE_PREFIX}{variable}");
            let footer = strings.get(&footer_key).map(|footer| {
                if footer_key.contains(ATTACK_RANGE_FOOTER) {
                    strip_tags(footer).into_owned()
                } else {
                    footer.to_string()
                }
            });

            DisplayAttribute {
                key: key.to_string(),
                header: "+".to_string(),
                value,
                footer,
                generated: false,
            }
        }
        None => DisplayAttribute {
            key: key.to_string(),
            header: strip_tags(rest).into_owned(),
            value,
            footer: None,
            generated: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PREFIX: &str = "DOTA_Tooltip_ability_item_test_";

    fn strings() -> StringTable {
        StringTable::from_tokens([
            ("DOTA_Tooltip_ability_item_test_bonus_damage", "+$damage"),
            ("DOTA_Tooltip_ability_item_test_crit_chance", "%CRIT CHANCE:"),
            ("DOTA_Tooltip_ability_item_test_radius", "<b>RADIUS:</b>"),
            ("DOTA_Tooltip_ability_item_test_bonus_range", "+$attack_range"),
            ("dota_ability_variable_damage", "Damage"),
            ("dota_ability_variable_attack_range", "<font>Attack Range</font>"),
        ])
    }

    #[test]
    fn test_bonus_footer() {
        let attributes = AttributeList::from_value(&json!([{ "bonus_damage": "10 20" }]));
        let formatted = format_ability_special(&attributes, &strings(), PREFIX);

        assert_eq!(formatted[0].header, "+");
        assert_eq!(formatted[0].footer.as_deref(), Some("Damage"));
        assert_eq!(
            formatted[0].value,
            FormattedValue::Levels(vec!["10".to_string(), "20".to_string()])
        );
    }

    #[test]
    fn test_percent_header_and_tags() {
        let attributes =
            AttributeList::from_value(&json!([{ "crit_chance": "30" }, { "radius": 300.0 }]));
        let formatted = format_ability_special(&attributes, &strings(), PREFIX);

        assert_eq!(formatted[0].header, "CRIT CHANCE:");
        assert_eq!(formatted[0].value, FormattedValue::from("30%"));
        assert_eq!(formatted[1].header, "RADIUS:");
        assert_eq!(formatted[1].value, FormattedValue::from("300"));
    }

    #[test]
    fn test_attack_range_footer_stripped() {
        let attributes = AttributeList::from_value(&json!([{ "bonus_range": "150" }]));
        let formatted = format_ability_special(&attributes, &strings(), PREFIX);
        assert_eq!(formatted[0].footer.as_deref(), Some("Attack Range"));
    }

    #[test]
    fn test_generated_header() {
        let attributes = AttributeList::from_value(&json!([
            { "var_type": "FIELD_FLOAT", "move_speed_pct": "5 5" }
        ]));
        let formatted = format_ability_special(&attributes, &strings(), PREFIX);

        assert!(formatted[0].generated);
        assert_eq!(formatted[0].key, "move_speed_pct");
        assert_eq!(formatted[0].header, "MOVE SPEED PCT:");
        assert_eq!(formatted[0].value, FormattedValue::from("5"));
    }

    #[test]
    fn test_no_record_dropped() {
        let attributes = AttributeList::from_value(&json!([
            { "bonus_damage": 1 }, { "unknown": 2 }, { "radius": 3 }, { "other": 4 }
        ]));
        assert_eq!(format_ability_special(&attributes, &strings(), PREFIX).len(), 4);
    }

    #[test]
    fn test_empty_record_kept() {
        let attributes = AttributeList::from_value(&json!([{ "a": 1 }, {}, { "b": 2 }]));
        let formatted = format_ability_special(&attributes, &strings(), PREFIX);

        assert_eq!(formatted.len(), attributes.len());
        assert_eq!(formatted[1].key, "");
        assert_eq!(formatted[1].header, ":");
        assert_eq!(formatted[1].value, FormattedValue::from(""));
        assert!(formatted[1].generated);
        assert_eq!(formatted[2].key, "b");
    }

    #[test]
    fn test_serialized_fields() {
        let attributes = AttributeList::from_value(&json!([{ "radius": 3 }, { "lifetime": 8 }]));
        let value = serde_json::to_value(format_ability_special(&attributes, &strings(), PREFIX))
            .unwrap();
        assert_eq!(
            value,
            json!([
                { "key": "radius", "header": "RADIUS:", "value": "3" },
                { "key": "lifetime", "header": "LIFETIME:", "value": "8", "generated": true }
            ])
        );
    }
}
