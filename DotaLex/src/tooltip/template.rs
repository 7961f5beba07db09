//! Description template resolution
//!
//! Replaces `%name%` tokens in a localized description with values from an
//! ability's attribute list, then either flattens the result to plain text
//! or, for items, splits it into categorized blocks.

use super::attributes::{AttributeList, display_value, is_truthy, parse_number};
use super::categorize::{ItemAbilities, categorize_item_abilities};
use super::lookup::PERCENT_TOKEN;
use crate::markup::{
    ESCAPED_NEWLINE, collapse_whitespace, line_breaks_to_newlines, strip_tags, unescape_newlines,
};
use regex::{Captures, Regex};
use serde::Serialize;
use serde_json::Value;

/// Script fields copied into the attribute list before resolution.
pub const EXTRA_ATTRIBUTE_FIELDS: &[&str] = &[
    "AbilityCastRange",
    "AbilityChargeRestoreTime",
    "AbilityDuration",
    "AbilityChannelTime",
    "AbilityCastPoint",
    "AbilityCharges",
    "AbilityManaCost",
    "AbilityCooldown",
];

/// Second names some script fields are referenced by.
const FIELD_ALIASES: &[(&str, &str)] = &[
    ("AbilityChargeRestoreTime", "charge_restore_time"),
    ("AbilityCharges", "max_charges"),
];

/// Known misnamed tokens and the attribute they stand for.
const SYNONYMS: &[(&str, &str)] = &[
    ("lifesteal", "lifesteal_percent"),
    ("movement_slow", "damage_pct"),
    ("movemont_speed_min", "movement_speed_min"),
];

const TOMES_TOKEN: &str = "%customval_team_tomes_used%";

lazy_static::lazy_static! {
    static ref TOMES_LINE: Regex = Regex::new(r"[ a-zA-Z]+: %\w+%").expect("tomes line pattern");
}

/// Result of resolving a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Resolved {
    Text(String),
    Item(ItemAbilities),
}

impl Resolved {
    /// Resolved text, if this is not an item description
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Resolved::Text(text) => Some(text),
            Resolved::Item(_) => None,
        }
    }

    /// Categorized blocks, if this is an item description
    pub fn as_item(&self) -> Option<&ItemAbilities> {
        match self {
            Resolved::Item(abilities) => Some(abilities),
            Resolved::Text(_) => None,
        }
    }
}

/// Resolves description templates for one ability or item
///
/// Holds its own copy of the attribute list, enriched with the script's cast
/// range, cooldown, mana cost and similar fields, so callers can share one
/// list across many resolvers.
#[derive(Debug, Clone)]
pub struct TemplateResolver<'a> {
    attributes: AttributeList,
    source: &'a Value,
    debug_key: &'a str,
}

impl<'a> TemplateResolver<'a> {
    /// Create a resolver over `attributes` and the raw `source` script
    ///
    /// `debug_key` names the ability in diagnostics.
    pub fn new(attributes: &AttributeList, source: &'a Value, debug_key: &'a str) -> Self {
        let mut attributes = attributes.clone();
        enrich(&mut attributes, source);
        Self {
            attributes,
            source,
            debug_key,
        }
    }

    /// The enriched attribute list
    pub fn attributes(&self) -> &AttributeList {
        &self.attributes
    }

    /// Resolve a template as plain text or as an item description
    ///
    /// An absent template stays absent and an empty one stays empty.
    pub fn resolve(&self, template: Option<&str>, is_item: bool) -> Option<Resolved> {
        let template = template?;
        if template.is_empty() {
            return Some(Resolved::Text(String::new()));
        }

        Some(if is_item {
            Resolved::Item(self.resolve_item(template))
        } else {
            Resolved::Text(self.resolve_text(template))
        })
    }

    /// Resolve tokens, turn `\n` into newlines and strip all tags
    pub fn resolve_text(&self, template: &str) -> String {
        if template.is_empty() {
            return String::new();
        }
        let substituted = self.substitute(template);
        strip_tags(&unescape_newlines(&substituted)).into_owned()
    }

    /// Resolve tokens and categorize the description lines of an item
    pub fn resolve_item(&self, template: &str) -> ItemAbilities {
        if template.is_empty() {
            return ItemAbilities::default();
        }
        let substituted = self.substitute(template);
        let with_breaks = line_breaks_to_newlines(&substituted);

        let lines: Vec<String> = with_breaks
            .split(ESCAPED_NEWLINE)
            .map(collapse_whitespace)
            .filter(|line| !line.is_empty())
            .collect();

        categorize_item_abilities(&lines, self.source)
    }

    /// Replace every `%name%` token, leaving unresolved ones verbatim
    pub fn substitute(&self, template: &str) -> String {
        let template = if template.contains(TOMES_TOKEN) {
            TOMES_LINE.replace_all(template, "").replace(TOMES_TOKEN, "0")
        } else {
            template.to_string()
        };

        PERCENT_TOKEN
            .replace_all(&template, |caps: &Captures<'_>| {
                let name = &caps[1];
                if name.is_empty() {
                    return "%".to_string();
                }
                match self.find_token(name) {
                    Some(value) => token_text(value),
                    None => {
                        tracing::warn!(
                            "Can't find attribute %{}% in {}",
                            name,
                            self.debug_key
                        );
                        format!("%{name}%")
                    }
                }
            })
            .into_owned()
    }

    fn find_token(&self, name: &str) -> Option<&Value> {
        if let Some(value) = self.attributes.find(name) {
            return Some(value);
        }

        if let Some(value) = name
            .strip_prefix('d')
            .and_then(|stripped| self.attributes.find(stripped))
        {
            return Some(value);
        }

        SYNONYMS
            .iter()
            .find(|(token, _)| *token == name)
            .and_then(|(_, actual)| self.attributes.find(actual))
    }
}

/// Display text of a matched attribute: its truthy `value` field, else itself
fn token_text(value: &Value) -> String {
    match value.get("value") {
        Some(inner) if is_truthy(inner) => display_value(inner),
        _ => display_value(value),
    }
}

fn enrich(attributes: &mut AttributeList, source: &Value) {
    for field in EXTRA_ATTRIBUTE_FIELDS {
        let Some(value) = source.get(*field).and_then(field_value) else {
            continue;
        };

        if let Some((_, alias)) = FIELD_ALIASES.iter().find(|(name, _)| name == field) {
            attributes.push_entry(field.to_lowercase(), value.clone());
            attributes.push_entry(*alias, value);
        } else {
            attributes.push_entry(field.to_lowercase(), value);
        }
    }
}

/// One number, or a list of numbers for space separated levels
fn field_value(raw: &Value) -> Option<Value> {
    match raw {
        Value::String(text) => {
            let mut values: Vec<Value> = text.split(' ').map(parse_number).collect();
            if values.len() == 1 {
                values.pop()
            } else {
                Some(Value::Array(values))
            }
        }
        Value::Number(_) => Some(raw.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn list(value: Value) -> AttributeList {
        AttributeList::from_value(&value)
    }

    #[test]
    fn test_d_prefix_fallback() {
        let attributes = list(json!([{ "damage": 50 }, { "target": "enemies" }]));
        let source = json!({});
        let resolver = TemplateResolver::new(&attributes, &source, "test");
        assert_eq!(
            resolver.resolve_text("Deals %damage% to %dtarget%"),
            "Deals 50 to enemies"
        );
    }

    #[test]
    fn test_unresolved_tokens_kept() {
        let source = json!({});
        let resolver = TemplateResolver::new(&AttributeList::new(), &source, "test");
        assert_eq!(resolver.resolve_text("Hits %dmissing% and %x%"), "Hits %dmissing% and %x%");
    }

    #[test]
    fn test_synonyms() {
        let attributes = list(json!([
            { "lifesteal_percent": 15 },
            { "damage_pct": 30 },
            { "movement_speed_min": 100 }
        ]));
        let source = json!({});
        let resolver = TemplateResolver::new(&attributes, &source, "test");
        assert_eq!(
            resolver.resolve_text("%lifesteal% %movement_slow% %movemont_speed_min%"),
            "15 30 100"
        );
    }

    #[test]
    fn test_missing_synonym_target_is_unresolved() {
        let source = json!({});
        let resolver = TemplateResolver::new(&AttributeList::new(), &source, "test");
        assert_eq!(resolver.resolve_text("%lifesteal%"), "%lifesteal%");
    }

    #[test]
    fn test_value_objects_and_percent_escape() {
        let attributes = list(json!({
            "01": { "chance": { "value": "25", "special_bonus_x": "+5" } },
            "02": { "zero": { "value": 0 } }
        }));
        let source = json!({});
        let resolver = TemplateResolver::new(&attributes, &source, "test");
        assert_eq!(resolver.resolve_text("%chance%%% chance"), "25% chance");
        assert_eq!(resolver.resolve_text("%zero%"), "0");
    }

    #[test]
    fn test_enrichment_from_script() {
        let source = json!({
            "AbilityCooldown": "20 15 10",
            "AbilityCharges": "3",
            "AbilityChargeRestoreTime": "40"
        });
        let resolver = TemplateResolver::new(&AttributeList::new(), &source, "test");
        assert_eq!(
            resolver.resolve_text("%abilitycooldown% %max_charges% %charge_restore_time%"),
            "20,15,10 3 40"
        );
    }

    #[test]
    fn test_enrichment_does_not_touch_caller_list() {
        let attributes = list(json!([{ "a": 1 }]));
        let source = json!({ "AbilityDuration": "5" });
        let first = TemplateResolver::new(&attributes, &source, "one");
        let second = TemplateResolver::new(&attributes, &source, "two");

        assert_eq!(attributes.len(), 1);
        assert_eq!(first.attributes().len(), 2);
        assert_eq!(second.attributes().len(), 2);
    }

    #[test]
    fn test_tomes_line_removed() {
        let source = json!({});
        let resolver = TemplateResolver::new(&AttributeList::new(), &source, "item_tome");
        assert_eq!(
            resolver.resolve_text("Grants stats. Tomes Used: %customval_team_tomes_used%"),
            "Grants stats."
        );
    }

    #[test]
    fn test_text_markup_and_newlines() {
        let source = json!({});
        let resolver = TemplateResolver::new(&AttributeList::new(), &source, "test");
        let once = resolver.resolve_text(r"<font color='red'>Hot</font>\nCold");
        assert_eq!(once, "Hot\nCold");
        assert_eq!(resolver.resolve_text(&once), once);
    }

    #[test]
    fn test_absent_and_empty_templates() {
        let source = json!({});
        let resolver = TemplateResolver::new(&AttributeList::new(), &source, "test");
        assert_eq!(resolver.resolve(None, false), None);
        assert_eq!(resolver.resolve(Some(""), true), Some(Resolved::Text(String::new())));
    }

    #[test]
    fn test_resolved_accessors() {
        let attributes = list(json!([{ "radius": 300 }]));
        let source = json!({});
        let resolver = TemplateResolver::new(&attributes, &source, "test");

        let text = resolver.resolve(Some("Radius %radius%."), false).unwrap();
        assert_eq!(text.as_text(), Some("Radius 300."));
        assert!(text.as_item().is_none());

        let item = resolver.resolve(Some("Radius %radius%."), true).unwrap();
        assert_eq!(item.as_text(), None);
        assert_eq!(
            item.as_item().map(|abilities| abilities.hint.clone()),
            Some(vec!["Radius 300.".to_string()])
        );
    }

    #[test]
    fn test_item_description() {
        let attributes = list(json!([{ "bonus_strength": 5 }]));
        let source = json!({ "AbilityValues": { "hint_value": "7" } });
        let resolver = TemplateResolver::new(&attributes, &source, "item_test");
        let template =
            r"<h1>Bonus: Strength</h1>Grants +%bonus_strength%   strength<br>\nUse %hint_value% charges";

        let resolved = resolver.resolve(Some(template), true).unwrap();
        let abilities = resolved.as_item().unwrap();

        assert_eq!(abilities.section("bonus")[0].desc, "Grants +5 strength");
        assert_eq!(abilities.hint, vec!["Use 7 charges".to_string()]);
    }
}
