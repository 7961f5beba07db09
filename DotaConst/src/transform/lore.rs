//! Hero biographies (`hero_lore<suffix>.json`)

use crate::error::{Error, Result};
use dotalex::markup::line_breaks_to_newlines;
use indexmap::IndexMap;
use serde_json::Value;

const BIO_PREFIX: &str = "npc_dota_hero_";
const BIO_SUFFIX: &str = "_bio";

/// Map hero short names to their biography text
///
/// `lore` is the root block of `hero_lore_<language>.txt` (keys lowercased),
/// holding `npc_dota_hero_<name>_bio` tokens. Tabs are dropped and `<br>`
/// tags become newlines.
pub fn transform_hero_lore(lore: &Value) -> Result<IndexMap<String, String>> {
    let tokens = lore
        .get("tokens")
        .and_then(Value::as_object)
        .ok_or_else(|| Error::layout("hero_lore", "no `tokens` block"))?;

    let mut result = IndexMap::new();
    for (key, text) in tokens {
        let Some(name) = key
            .strip_prefix(BIO_PREFIX)
            .and_then(|rest| rest.strip_suffix(BIO_SUFFIX))
        else {
            tracing::debug!("Skipping lore token {key}");
            continue;
        };
        let Some(text) = text.as_str() else {
            continue;
        };

        let bio = line_breaks_to_newlines(&text.replace('\t', "")).into_owned();
        result.insert(name.to_string(), bio);
    }

    Ok(result)
}
