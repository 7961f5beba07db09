//! Abilities document (`abilities<suffix>.json`)

use super::{Behavior, VERSION_KEY, format_behavior, script_attributes, script_block, text_field};
use crate::error::Result;
use dotalex::localization::{StringTable, TOOLTIP_PREFIX};
use dotalex::tooltip::{
    DisplayAttribute, FormattedValue, TemplateResolver, VALUE_TABLE, format_ability_special,
    format_values, is_truthy, resolve_with_script, substitute_bonus, substitute_flat,
};
use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

/// Script entries that are not real abilities.
pub const NOT_ABILITIES: &[&str] = &[
    VERSION_KEY,
    "ability_base",
    "default_attack",
    "attribute_bonus",
    "ability_deward",
];

const TALENT_PREFIX: &str = "special_bonus";

lazy_static::lazy_static! {
    static ref LEFTOVER_TOKEN: Regex = Regex::new(r"%\w+%").expect("leftover token pattern");
}

/// One ability entry
///
/// Talents only carry `dname`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Ability {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub behavior: Option<Behavior>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dmg_type: Option<Behavior>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bkbpierce: Option<Behavior>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_type: Option<Behavior>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dmg: Option<FormattedValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attrib: Option<Vec<DisplayAttribute>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mc: Option<FormattedValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cd: Option<FormattedValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
}

/// Build the abilities document from the ability strings and
/// `npc_abilities.json`
pub fn transform_abilities(
    strings: &StringTable,
    abilities: &Value,
) -> Result<IndexMap<String, Ability>> {
    let scripts = script_block(abilities, "DOTAAbilities", "npc_abilities.json")?;
    let strings = strings.clone().strip_markup();

    let result = scripts
        .iter()
        .filter(|(key, _)| !NOT_ABILITIES.contains(&key.as_str()))
        .map(|(key, script)| {
            let linked = text_field(script, "ad_linked_abilities")
                .and_then(|name| scripts.get(name))
                .and_then(|linked| linked.get(VALUE_TABLE))
                .and_then(Value::as_object);

            (key.clone(), build_ability(key, script, &strings, linked))
        })
        .collect();

    Ok(result)
}

fn build_ability(
    key: &str,
    script: &Value,
    strings: &StringTable,
    linked: Option<&serde_json::Map<String, Value>>,
) -> Ability {
    let tooltip = format!("{TOOLTIP_PREFIX}{key}");
    let attributes = script_attributes(script);

    let dname = strings
        .get_first(&[tooltip.as_str(), format!("DOTA_Tooltip_Ability_{key}").as_str()])
        .map(|name| {
            let name = substitute_flat(name, &attributes);
            match linked {
                Some(linked) => substitute_bonus(key, &name, linked),
                None => name,
            }
        });

    if key.starts_with(TALENT_PREFIX) {
        return Ability {
            dname,
            ..Ability::default()
        };
    }

    let desc = strings.get(&format!("{tooltip}_Description")).map(|template| {
        let resolved = TemplateResolver::new(&attributes, script, key).resolve_text(template);
        if LEFTOVER_TOKEN.is_match(&resolved) {
            resolve_with_script(template, script)
        } else {
            resolved
        }
    });

    Ability {
        dname,
        behavior: format_behavior(text_field(script, "AbilityBehavior")),
        dmg_type: format_behavior(text_field(script, "AbilityUnitDamageType")),
        bkbpierce: format_behavior(text_field(script, "SpellImmunityType")),
        target_type: format_behavior(text_field(script, "AbilityUnitTargetTeam")),
        desc,
        dmg: present(script, "AbilityDamage").map(|raw| format_values(raw, false, " / ")),
        attrib: Some(format_ability_special(
            &attributes,
            strings,
            &format!("{tooltip}_"),
        )),
        mc: present(script, "AbilityManaCost").map(|raw| format_values(raw, false, "/")),
        cd: present(script, "AbilityCooldown").map(|raw| format_values(raw, false, "/")),
        img: Some(format!("/apps/dota2/images/abilities/{key}_md.png")),
    }
}

fn present<'a>(script: &'a Value, key: &str) -> Option<&'a Value> {
    script.get(key).filter(|value| is_truthy(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn strings() -> StringTable {
        StringTable::from_tokens([
            ("DOTA_Tooltip_ability_test_nova", "<b>Nova</b>"),
            (
                "DOTA_Tooltip_ability_test_nova_Description",
                r"Deals %damage% damage in %radius% radius.\nSlows for %duration%s.",
            ),
            ("DOTA_Tooltip_ability_test_nova_radius", "RADIUS:"),
            (
                "DOTA_Tooltip_Ability_special_bonus_unique_test_nova",
                "+{s:bonus_radius} Nova Radius",
            ),
            ("DOTA_Tooltip_ability_test_ward", "Ward of {s:count}"),
            ("DOTA_Tooltip_ability_test_ward_Description", "Lasts %Duration% seconds."),
        ])
    }

    fn abilities() -> Value {
        json!({
            "DOTAAbilities": {
                "Version": "1",
                "ability_base": {},
                "test_nova": {
                    "AbilityBehavior": "DOTA_ABILITY_BEHAVIOR_NO_TARGET | DOTA_ABILITY_BEHAVIOR_IGNORE_BACKSWING",
                    "AbilityUnitDamageType": "DAMAGE_TYPE_MAGICAL",
                    "AbilityCooldown": "12.0 10.0 8.0",
                    "AbilityManaCost": "100",
                    "AbilityDamage": "100 150 200",
                    "AbilityValues": {
                        "damage": "100 150 200",
                        "radius": { "value": "300", "special_bonus_unique_test_nova": "+75" }
                    }
                },
                "test_ward": {
                    "AbilityValues": { "count": "3" },
                    "duration": "25"
                },
                "special_bonus_unique_test_nova": {
                    "ad_linked_abilities": "test_nova"
                }
            }
        })
    }

    #[test]
    fn test_ability_fields() {
        let result = transform_abilities(&strings(), &abilities()).unwrap();
        assert_eq!(
            result.keys().collect::<Vec<_>>(),
            vec!["test_nova", "test_ward", "special_bonus_unique_test_nova"]
        );

        let nova = &result["test_nova"];
        assert_eq!(nova.dname.as_deref(), Some("Nova"));
        assert_eq!(nova.behavior, Some(Behavior::One("No Target".to_string())));
        assert_eq!(nova.dmg_type, Some(Behavior::One("Magical".to_string())));
        assert_eq!(nova.bkbpierce, None);
        assert_eq!(
            nova.cd,
            Some(FormattedValue::Levels(vec!["12".into(), "10".into(), "8".into()]))
        );
        assert_eq!(nova.mc, Some(FormattedValue::from("100")));
        assert_eq!(nova.img.as_deref(), Some("/apps/dota2/images/abilities/test_nova_md.png"));
        assert_eq!(nova.attrib.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_description_retried_against_script() {
        let result = transform_abilities(&strings(), &abilities()).unwrap();
        assert_eq!(
            result["test_nova"].desc.as_deref(),
            Some("Deals 100 150 200 damage in 300 radius.\nSlows for durations.")
        );
    }

    #[test]
    fn test_description_falls_back_to_script() {
        let result = transform_abilities(&strings(), &abilities()).unwrap();
        let ward = &result["test_ward"];
        assert_eq!(ward.dname.as_deref(), Some("Ward of 3"));
        assert_eq!(ward.desc.as_deref(), Some("Lasts 25 seconds."));
    }

    #[test]
    fn test_talent_keeps_only_name() {
        let result = transform_abilities(&strings(), &abilities()).unwrap();
        let value = serde_json::to_value(&result["special_bonus_unique_test_nova"]).unwrap();
        assert_eq!(value, json!({ "dname": "+75 Nova Radius" }));
    }
}
