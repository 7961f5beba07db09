//! Heroes documents (`heroes<suffix>.json`, `hero_names<suffix>.json`)

use super::{VERSION_KEY, leading_int, script_block, text_field};
use crate::error::Result;
use dotalex::localization::StringTable;
use dotalex::tooltip::parse_number;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

/// Hero entries that are templates or test units.
pub const NOT_HEROES: &[&str] = &[
    VERSION_KEY,
    "npc_dota_hero_base",
    "npc_dota_hero_target_dummy",
];

const BASE_HERO: &str = "npc_dota_hero_base";
const HERO_PREFIX: &str = "npc_dota_hero_";

/// One hero entry, before overrides are applied
#[derive(Debug, Clone, Serialize)]
pub struct Hero {
    pub id: i64,
    pub name: String,
    pub localized_name: Option<String>,
    pub primary_attr: String,
    pub attack_type: String,
    pub roles: Vec<String>,
    pub img: String,
    pub icon: String,
    pub base_health: Value,
    pub base_health_regen: Value,
    pub base_mana: Value,
    pub base_mana_regen: Value,
    pub base_armor: Value,
    pub base_mr: Value,
    pub base_attack_min: Value,
    pub base_attack_max: Value,
    pub base_str: Value,
    pub base_agi: Value,
    pub base_int: Value,
    pub str_gain: Value,
    pub agi_gain: Value,
    pub int_gain: Value,
    pub attack_range: Value,
    pub projectile_speed: Value,
    pub attack_rate: Value,
    pub move_speed: Value,
    pub turn_rate: Value,
    pub cm_enabled: bool,
    pub legs: Value,
}

/// Heroes keyed by id, in id order
///
/// `strings` is the general `dota_<language>` table (hero display names),
/// `heroes` is `npc_heroes.json`, and `overrides` an optional object of
/// per-id fields merged over each generated hero.
pub fn transform_heroes(
    strings: &StringTable,
    heroes: &Value,
    overrides: Option<&Value>,
) -> Result<IndexMap<String, Value>> {
    Ok(hero_list(strings, heroes, overrides)?
        .into_iter()
        .map(|(id, hero)| (id.to_string(), hero))
        .collect())
}

/// Heroes keyed by internal name (`npc_dota_hero_*`), in id order
pub fn transform_hero_names(
    strings: &StringTable,
    heroes: &Value,
    overrides: Option<&Value>,
) -> Result<IndexMap<String, Value>> {
    Ok(hero_list(strings, heroes, overrides)?
        .into_iter()
        .map(|(_, hero)| {
            let name = hero
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            (name, hero)
        })
        .collect())
}

fn hero_list(
    strings: &StringTable,
    heroes: &Value,
    overrides: Option<&Value>,
) -> Result<Vec<(i64, Value)>> {
    let scripts = script_block(heroes, "DOTAHeroes", "npc_heroes.json")?;
    let empty = Value::Object(Map::new());
    let base = scripts.get(BASE_HERO).unwrap_or(&empty);

    let mut list: Vec<Hero> = scripts
        .iter()
        .filter(|(name, _)| !NOT_HEROES.contains(&name.as_str()))
        .filter_map(|(name, script)| {
            let hero = build_hero(name, script, base, strings);
            if hero.is_none() {
                tracing::warn!("Hero {name} has no HeroID, skipping");
            }
            hero
        })
        .collect();
    list.sort_by_key(|hero| hero.id);

    let mut result = Vec::with_capacity(list.len());
    for hero in list {
        let id = hero.id;
        let mut value = serde_json::to_value(hero)?;

        if let (Some(target), Some(fields)) = (
            value.as_object_mut(),
            overrides
                .and_then(|all| all.get(id.to_string()))
                .and_then(Value::as_object),
        ) {
            for (key, field) in fields {
                target.insert(key.clone(), field.clone());
            }
            let id = leading_int(target.get("id")).unwrap_or(id);
            target.insert("id".to_string(), Value::from(id));
        }

        result.push((id, value));
    }

    Ok(result)
}

fn build_hero(name: &str, script: &Value, base: &Value, strings: &StringTable) -> Option<Hero> {
    let id = leading_int(script.get("HeroID"))?;
    let short = name.strip_prefix(HERO_PREFIX).unwrap_or(name);

    let own = |key: &str| number(text_field(script, key));
    let inherited = |key: &str| number(text_field(script, key).or_else(|| text_field(base, key)));

    let localized_name = strings
        .get(name)
        .filter(|text| !text.is_empty())
        .or_else(|| text_field(script, "workshop_guide_name"))
        .map(str::to_string);

    let primary_attr = text_field(script, "AttributePrimary")
        .unwrap_or_default()
        .replace("DOTA_ATTRIBUTE_", "")
        .chars()
        .take(3)
        .collect::<String>()
        .to_lowercase();

    let attack_type =
        if text_field(script, "AttackCapabilities") == Some("DOTA_UNIT_CAP_MELEE_ATTACK") {
            "Melee"
        } else {
            "Ranged"
        };

    Some(Hero {
        id,
        name: name.to_string(),
        localized_name,
        primary_attr,
        attack_type: attack_type.to_string(),
        roles: text_field(script, "Role")
            .map(|roles| roles.split(',').map(str::to_string).collect())
            .unwrap_or_default(),
        img: format!("/apps/dota2/images/dota_react/heroes/{short}.png?"),
        icon: format!("/apps/dota2/images/dota_react/heroes/icons/{short}.png?"),
        base_health: inherited("StatusHealth"),
        base_health_regen: inherited("StatusHealthRegen"),
        base_mana: inherited("StatusMana"),
        base_mana_regen: inherited("StatusManaRegen"),
        base_armor: inherited("ArmorPhysical"),
        base_mr: inherited("MagicalResistance"),
        base_attack_min: inherited("AttackDamageMin"),
        base_attack_max: inherited("AttackDamageMax"),
        base_str: own("AttributeBaseStrength"),
        base_agi: own("AttributeBaseAgility"),
        base_int: own("AttributeBaseIntelligence"),
        str_gain: own("AttributeStrengthGain"),
        agi_gain: own("AttributeAgilityGain"),
        int_gain: own("AttributeIntelligenceGain"),
        attack_range: own("AttackRange"),
        projectile_speed: inherited("ProjectileSpeed"),
        attack_rate: inherited("AttackRate"),
        move_speed: own("MovementSpeed"),
        turn_rate: own("MovementTurnRate"),
        cm_enabled: text_field(script, "CMEnabled") == Some("1"),
        legs: inherited("Legs"),
    })
}

/// Numeric stat, `null` when the field is missing
fn number(text: Option<&str>) -> Value {
    text.map_or(Value::Null, parse_number)
}
