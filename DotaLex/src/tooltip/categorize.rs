//! Item description categorizer
//!
//! Item descriptions arrive as lines. Lines with an `<h1>Type: Name</h1>`
//! header become named sections grouped by lowercased type (`active`,
//! `passive`, `bonus`, ...); every other line is a hint, with its tags
//! removed.

use super::lookup::lookup_or_key;
use crate::markup::strip_tags;
use indexmap::IndexMap;
use regex::{Captures, Regex};
use serde::Serialize;
use serde_json::Value;

lazy_static::lazy_static! {
    static ref HINT_TOKEN: Regex = Regex::new(r"%([a-z_]+)%").expect("hint token pattern");
    static ref ANY_TAG: Regex = Regex::new(r"</?[^>]*>").expect("tag pattern");
    static ref SECTION: Regex =
        Regex::new(r"(?is)<h1>\s*(.*?)\s*[:：]\s*(.*?)\s*</h1>\s*(.*)").expect("section pattern");
}

/// A named block of an item description
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AbilitySection {
    pub name: String,
    pub desc: String,
}

/// Categorized item description
///
/// Serializes as one object: `hint` (when non-empty) plus one key per
/// section type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ItemAbilities {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hint: Vec<String>,
    #[serde(flatten)]
    pub sections: IndexMap<String, Vec<AbilitySection>>,
}

impl ItemAbilities {
    /// Check if nothing was categorized
    pub fn is_empty(&self) -> bool {
        self.hint.is_empty() && self.sections.is_empty()
    }

    /// Sections of one type, empty if the type never appeared
    pub fn section(&self, kind: &str) -> &[AbilitySection] {
        self.sections.get(kind).map_or(&[], Vec::as_slice)
    }
}

/// Sort cleaned description lines into hints and typed sections
///
/// Hint tokens are resolved against `script` with the case-insensitive
/// fallback lookup. A header line that does not parse is logged and skipped.
pub fn categorize_item_abilities<S: AsRef<str>>(lines: &[S], script: &Value) -> ItemAbilities {
    let mut abilities = ItemAbilities::default();

    for line in lines {
        let line = line.as_ref();

        if !line.contains("<h1>") {
            let collapsed = line.replace("%%", "%");
            let hint = HINT_TOKEN.replace_all(&collapsed, |caps: &Captures<'_>| {
                lookup_or_key(&caps[1], script)
            });
            abilities.hint.push(strip_tags(&hint).into_owned());
            continue;
        }

        let kept = keep_only_headers(line);
        match SECTION.captures(&kept) {
            Some(caps) => {
                abilities
                    .sections
                    .entry(caps[1].to_lowercase())
                    .or_default()
                    .push(AbilitySection {
                        name: caps[2].to_string(),
                        desc: caps[3].trim().to_string(),
                    });
            }
            None => {
                tracing::warn!(line = %line, "Malformed item section header, skipping line");
            }
        }
    }

    abilities
}

/// Strip every tag except `<h1>` and `</h1>`.
fn keep_only_headers(line: &str) -> String {
    ANY_TAG
        .replace_all(line, |caps: &Captures<'_>| {
            let tag = &caps[0];
            if tag.eq_ignore_ascii_case("<h1>") || tag.eq_ignore_ascii_case("</h1>") {
                tag.to_string()
            } else {
                String::new()
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_section_line() {
        let abilities = categorize_item_abilities(
            &["<h1>Bonus: Strength</h1>Grants +5 strength"],
            &Value::Null,
        );
        assert_eq!(
            abilities.section("bonus"),
            &[AbilitySection {
                name: "Strength".to_string(),
                desc: "Grants +5 strength".to_string(),
            }]
        );
        assert!(abilities.hint.is_empty());
    }

    #[test]
    fn test_hint_line_resolves_tokens() {
        let script = json!({ "AbilityValues": { "bonus_damage": "20" } });
        let abilities =
            categorize_item_abilities(&["Adds %bonus_damage% damage, 10%% more"], &script);
        assert_eq!(abilities.hint, vec!["Adds 20 damage, 10% more".to_string()]);
    }

    #[test]
    fn test_unresolved_hint_keeps_name() {
        let abilities = categorize_item_abilities(&["Costs <b>%unknown_cost%</b>"], &json!({}));
        assert_eq!(abilities.hint, vec!["Costs unknown_cost".to_string()]);
    }

    #[test]
    fn test_inner_tags_removed() {
        let line = "<h1>Active: <font color='#fff'>Blink</font></h1><b>Teleport</b> up to 1200";
        let abilities = categorize_item_abilities(&[line], &Value::Null);
        assert_eq!(abilities.section("active")[0].name, "Blink");
        assert_eq!(abilities.section("active")[0].desc, "Teleport up to 1200");
    }

    #[test]
    fn test_fullwidth_colon() {
        let abilities = categorize_item_abilities(&["<h1>主动：闪烁</h1>瞬间移动"], &Value::Null);
        assert_eq!(abilities.section("主动")[0].name, "闪烁");
    }

    #[test]
    fn test_malformed_header_skipped() {
        let lines = ["<h1>No colon here</h1>text", "<h1>Passive: Ok</h1>fine"];
        let abilities = categorize_item_abilities(&lines, &Value::Null);
        assert_eq!(abilities.sections.len(), 1);
        assert_eq!(abilities.section("passive").len(), 1);
    }

    #[test]
    fn test_serialized_shape() {
        let lines = ["hint text", "<h1>Active: Go</h1>now"];
        let value = serde_json::to_value(categorize_item_abilities(&lines, &Value::Null)).unwrap();
        assert_eq!(
            value,
            json!({ "hint": ["hint text"], "active": [{ "name": "Go", "desc": "now" }] })
        );
    }
}
