//! Items document (`items<suffix>.json`)

use super::{
    VERSION_KEY, leading_int, neutral_item_tiers, number_or_false, script_attributes, script_block,
};
use crate::error::Result;
use dotalex::localization::{StringTable, TOOLTIP_PREFIX};
use dotalex::tooltip::{DisplayAttribute, ItemAbilities, TemplateResolver, format_ability_special};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Cache-busting stamp carried by item image URLs.
pub const IMAGE_STAMP: u64 = 1_593_393_829_403;

const ITEM_PREFIX: &str = "item_";
const RECIPE_MARKER: &str = "item_recipe";

/// One item entry
#[derive(Debug, Clone, Serialize)]
pub struct Item {
    /// Categorized description blocks (`hint`, `active`, `passive`, ...)
    #[serde(flatten)]
    pub abilities: ItemAbilities,
    pub id: Option<i64>,
    pub img: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qual: Option<String>,
    pub cost: Option<i64>,
    pub notes: String,
    pub attrib: Vec<DisplayAttribute>,
    #[serde(serialize_with = "number_or_false")]
    pub mc: Option<i64>,
    #[serde(serialize_with = "number_or_false")]
    pub cd: Option<i64>,
    pub lore: String,
    /// Short names of the items this one is built from
    pub components: Option<Vec<String>>,
    /// Whether a recipe builds this item
    pub created: bool,
    #[serde(serialize_with = "number_or_false")]
    pub charges: Option<i64>,
    /// Neutral item tier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<u32>,
}

/// Build the items document
///
/// `strings` is the ability string table with markup intact, since item
/// descriptions are split on their `<h1>` headers. `items` is `items.json`
/// and `neutrals` the root block of `neutral_items.txt`. Entries are keyed
/// by item name without the `item_` prefix.
pub fn transform_items(
    strings: &StringTable,
    items: &Value,
    neutrals: &Value,
) -> Result<IndexMap<String, Item>> {
    let scripts = script_block(items, "DOTAAbilities", "items.json")?;
    let display = strings.clone().strip_markup();
    let tiers = neutral_item_tiers(neutrals);

    let mut result = IndexMap::new();

    for (key, script) in scripts {
        if key == VERSION_KEY || is_free_recipe(key, script) {
            continue;
        }
        result.insert(
            short_name(key).to_string(),
            build_item(key, script, strings, &display, tiers.get(key).copied()),
        );
    }

    for (key, script) in scripts {
        let (Some(target), Some(components)) = (
            script.get("ItemResult").and_then(Value::as_str),
            first_requirement(script),
        ) else {
            continue;
        };

        match result.get_mut(short_name(target)) {
            Some(item) => {
                item.components = Some(
                    components
                        .split(';')
                        .filter(|part| !part.is_empty())
                        .map(|part| short_name(part).replace('*', ""))
                        .collect(),
                );
                item.created = true;
            }
            None => {
                tracing::warn!("Recipe {key} builds unknown item {target}");
            }
        }
    }

    Ok(result)
}

fn build_item(
    key: &str,
    script: &Value,
    strings: &StringTable,
    display: &StringTable,
    tier: Option<u32>,
) -> Item {
    let tooltip = format!("{TOOLTIP_PREFIX}{key}");
    let attributes = script_attributes(script);

    let abilities = strings
        .get(&format!("{tooltip}_Description"))
        .map(|template| TemplateResolver::new(&attributes, script, key).resolve_item(template))
        .unwrap_or_default();

    let img = if key.contains(RECIPE_MARKER) {
        format!("/apps/dota2/images/items/recipe_lg.png?t={IMAGE_STAMP}")
    } else {
        format!("/apps/dota2/images/items/{}_lg.png?t={IMAGE_STAMP}", short_name(key))
    };

    let notes: Vec<&str> = (0..)
        .map_while(|i| {
            display
                .get(&format!("{tooltip}_Note{i}"))
                .filter(|note| !note.is_empty())
        })
        .collect();

    let attrib = format_ability_special(&attributes, display, &format!("{tooltip}_"))
        .into_iter()
        .filter(|attr| !attr.generated || attr.key == "lifetime")
        .collect();

    Item {
        abilities,
        id: leading_int(script.get("ID")),
        img,
        dname: display.get(&tooltip).map(str::to_string),
        qual: script.get("ItemQuality").and_then(Value::as_str).map(str::to_string),
        cost: leading_int(script.get("ItemCost")),
        notes: notes.join("\n"),
        attrib,
        mc: leading_int(script.get("AbilityManaCost")),
        cd: leading_int(script.get("AbilityCooldown")),
        lore: display
            .get(&format!("{tooltip}_Lore"))
            .unwrap_or_default()
            .replace("\\n", "\r\n"),
        components: None,
        created: false,
        charges: leading_int(script.get("ItemInitialCharges")),
        tier,
    }
}

fn short_name(key: &str) -> &str {
    key.strip_prefix(ITEM_PREFIX).unwrap_or(key)
}

fn is_free_recipe(key: &str, script: &Value) -> bool {
    key.contains(RECIPE_MARKER) && leading_int(script.get("ItemCost")) == Some(0)
}

/// First entry of `ItemRequirements`, stored as a list or as `{"01": ..}`
fn first_requirement(script: &Value) -> Option<&str> {
    match script.get("ItemRequirements")? {
        Value::Array(entries) => entries.first()?.as_str(),
        Value::Object(entries) => entries.values().next()?.as_str(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn strings() -> StringTable {
        StringTable::from_tokens([
            ("DOTA_Tooltip_ability_item_blade", "Blade"),
            (
                "DOTA_Tooltip_ability_item_blade_Description",
                r"<h1>Passive: Cleave</h1>Deals %cleave_damage_percent%%% damage.\nA <b>sharp</b> blade.",
            ),
            ("DOTA_Tooltip_ability_item_blade_Note0", "First note."),
            ("DOTA_Tooltip_ability_item_blade_Note1", "Second note."),
            ("DOTA_Tooltip_ability_item_blade_Lore", r"Old.\nSharp."),
            ("DOTA_Tooltip_ability_item_blade_bonus_damage", "+$damage"),
            ("dota_ability_variable_damage", "Damage"),
            ("DOTA_Tooltip_ability_item_recipe_blade", "Blade Recipe"),
        ])
    }

    fn items() -> Value {
        json!({
            "DOTAAbilities": {
                "Version": "1",
                "item_blade": {
                    "ID": "10",
                    "ItemCost": "1200",
                    "ItemQuality": "artifact",
                    "AbilityCooldown": "0",
                    "AbilityValues": {
                        "bonus_damage": "20",
                        "cleave_damage_percent": "40",
                        "lifetime": "8",
                        "internal_value": "1"
                    }
                },
                "item_recipe_blade": {
                    "ID": "11",
                    "ItemCost": "300",
                    "ItemResult": "item_blade",
                    "ItemRequirements": { "01": "item_broadsword;item_claymore*" }
                },
                "item_recipe_free": { "ID": "12", "ItemCost": "0" }
            }
        })
    }

    #[test]
    fn test_item_fields() {
        let neutrals = json!({});
        let result = transform_items(&strings(), &items(), &neutrals).unwrap();

        assert_eq!(result.keys().collect::<Vec<_>>(), vec!["blade", "recipe_blade"]);

        let blade = &result["blade"];
        assert_eq!(blade.id, Some(10));
        assert_eq!(blade.img, "/apps/dota2/images/items/blade_lg.png?t=1593393829403");
        assert_eq!(blade.dname.as_deref(), Some("Blade"));
        assert_eq!(blade.cost, Some(1200));
        assert_eq!(blade.notes, "First note.\nSecond note.");
        assert_eq!(blade.lore, "Old.\r\nSharp.");
        assert_eq!(blade.cd, Some(0));
        assert_eq!(blade.charges, None);
        assert_eq!(
            blade.components,
            Some(vec!["broadsword".to_string(), "claymore".to_string()])
        );
        assert!(blade.created);

        let recipe = &result["recipe_blade"];
        assert_eq!(recipe.img, "/apps/dota2/images/items/recipe_lg.png?t=1593393829403");
    }

    #[test]
    fn test_item_description_and_attrib() {
        let result = transform_items(&strings(), &items(), &json!({})).unwrap();
        let blade = &result["blade"];

        assert_eq!(blade.abilities.section("passive")[0].desc, "Deals 40% damage.");
        assert_eq!(blade.abilities.hint, vec!["A sharp blade.".to_string()]);

        let keys: Vec<_> = blade.attrib.iter().map(|a| a.key.as_str()).collect();
        assert_eq!(keys, vec!["bonus_damage", "lifetime"]);
    }

    #[test]
    fn test_item_serialized_shape() {
        let neutrals = json!({ "2": { "items": { "item_blade": "1" } } });
        let result = transform_items(&strings(), &items(), &neutrals).unwrap();
        let value = serde_json::to_value(&result["blade"]).unwrap();

        assert_eq!(value["passive"][0]["name"], "Cleave");
        assert_eq!(value["cd"], json!(false));
        assert_eq!(value["charges"], json!(false));
        assert_eq!(value["tier"], json!(2));
        assert_eq!(
            serde_json::to_value(&result["recipe_blade"]).unwrap()["components"],
            Value::Null
        );
    }

    #[test]
    fn test_missing_block() {
        assert!(transform_items(&strings(), &json!({}), &json!({})).is_err());
    }
}
