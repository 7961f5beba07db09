//! Aghanim's Scepter and Shard descriptions (`aghs<suffix>.json`)
//!
//! Built from the per-hero `herodata` responses of the game's web API.

use dotalex::tooltip::display_value;
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Separator between appended headed values.
pub const HEADED_VALUE_SEPARATOR: &str = "；";

lazy_static::lazy_static! {
    static ref DESC_TOKEN: Regex = Regex::new(r"(?i)%([a-z_]+?)%").expect("aghs token pattern");
}

/// `herodata` response envelope
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HeroDataResponse {
    pub result: Option<HeroDataResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HeroDataResult {
    pub data: HeroDataBody,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HeroDataBody {
    pub heroes: Vec<HeroData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HeroData {
    pub id: i64,
    pub name: String,
    pub abilities: Vec<HeroAbility>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct HeroAbility {
    pub name: String,
    pub name_loc: String,
    pub desc_loc: String,
    pub scepter_loc: String,
    pub shard_loc: String,
    pub ability_is_granted_by_scepter: bool,
    pub ability_has_scepter: bool,
    pub ability_is_granted_by_shard: bool,
    pub ability_has_shard: bool,
    pub special_values: Vec<SpecialValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SpecialValue {
    pub name: String,
    pub heading_loc: String,
    pub values_float: Vec<Value>,
    pub values_int: Vec<Value>,
}

impl SpecialValue {
    /// Float values then int values, each joined with `,`
    pub fn joined(&self) -> String {
        let join = |values: &[Value]| {
            values
                .iter()
                .map(display_value)
                .collect::<Vec<_>>()
                .join(",")
        };
        format!("{}{}", join(&self.values_float), join(&self.values_int))
    }
}

/// Scepter and shard summary for one hero
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Aghs {
    pub hero_name: String,
    pub hero_id: i64,
    pub has_scepter: bool,
    pub scepter_desc: String,
    pub scepter_skill_name: String,
    pub scepter_new_skill: bool,
    pub has_shard: bool,
    pub shard_desc: String,
    pub shard_skill_name: String,
    pub shard_new_skill: bool,
}

/// Build the aghs document from raw `herodata` responses, keyed by hero id
///
/// Responses without a hero are logged and skipped.
pub fn transform_aghs(responses: &[Value]) -> IndexMap<String, Aghs> {
    let mut result = IndexMap::new();

    for response in responses {
        let parsed: HeroDataResponse = match serde_json::from_value(response.clone()) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Unreadable herodata response: {e}");
                continue;
            }
        };
        let Some(hero) = parsed
            .result
            .and_then(|result| result.data.heroes.into_iter().next())
        else {
            tracing::warn!("Herodata response without a hero");
            continue;
        };

        let aghs = hero_aghs(&hero);
        result.insert(hero.id.to_string(), aghs);
    }

    result
}

/// Scepter and shard summary of one hero
pub fn hero_aghs(hero: &HeroData) -> Aghs {
    let mut aghs = Aghs {
        hero_name: hero.name.clone(),
        hero_id: hero.id,
        ..Aghs::default()
    };

    for ability in &hero.abilities {
        if ability.name_loc.is_empty() || ability.desc_loc.is_empty() {
            continue;
        }

        if ability.ability_is_granted_by_scepter {
            aghs.scepter_desc = aghanim_desc(&ability.desc_loc, &ability.special_values);
            aghs.scepter_skill_name.clone_from(&ability.name_loc);
            aghs.scepter_new_skill = true;
            aghs.has_scepter = true;
        } else if ability.ability_has_scepter && !ability.scepter_loc.is_empty() {
            aghs.scepter_desc = aghanim_desc(&ability.scepter_loc, &ability.special_values);
            aghs.scepter_skill_name.clone_from(&ability.name_loc);
            aghs.scepter_new_skill = false;
            aghs.has_scepter = true;
        }

        if ability.ability_is_granted_by_shard {
            aghs.shard_desc = aghanim_desc(&ability.desc_loc, &ability.special_values);
            aghs.shard_skill_name.clone_from(&ability.name_loc);
            aghs.shard_new_skill = true;
            aghs.has_shard = true;
        } else if ability.ability_has_shard && !ability.shard_loc.is_empty() {
            aghs.shard_desc = aghanim_desc(&ability.shard_loc, &ability.special_values);
            aghs.shard_skill_name.clone_from(&ability.name_loc);
            aghs.shard_new_skill = false;
            aghs.has_shard = true;
        }
    }

    if !aghs.has_shard {
        tracing::info!("{}[{}]: Didn't find a shard...", aghs.hero_name, aghs.hero_id);
    }
    if !aghs.has_scepter {
        tracing::info!("{}[{}]: Didn't find a scepter...", aghs.hero_name, aghs.hero_id);
    }

    aghs
}

/// Fill `%name%` tokens from the ability's special values
///
/// With no tokens at all, every headed special value is appended instead.
pub fn aghanim_desc(desc: &str, special_values: &[SpecialValue]) -> String {
    let mut text = desc.replace("%%", "%");
    if special_values.is_empty() {
        return text;
    }

    let tokens: Vec<(String, String)> = DESC_TOKEN
        .captures_iter(&text)
        .map(|caps| (caps[0].to_string(), caps[1].to_string()))
        .collect();

    if tokens.is_empty() {
        let headed: Vec<String> = special_values
            .iter()
            .filter(|value| !value.heading_loc.is_empty())
            .map(|value| format!("{}{}", value.heading_loc, value.joined()))
            .collect();
        text.push_str(&headed.join(HEADED_VALUE_SEPARATOR));
        return text;
    }

    for (token, name) in tokens {
        if let Some(value) = special_values.iter().find(|value| value.name == name) {
            text = text.replacen(&token, &value.joined(), 1);
        }
    }
    text
}
