//! Neutral item tiers from `neutral_items.txt`

use serde_json::Value;
use std::collections::HashMap;

/// Map every neutral item (and its recipe-less name) to its tier
///
/// `neutrals` is the root block of `neutral_items.txt`, keyed by tier
/// number. Blocks whose key is not a tier number are ignored.
pub fn neutral_item_tiers(neutrals: &Value) -> HashMap<String, u32> {
    let mut tiers = HashMap::new();
    let Some(blocks) = neutrals.as_object() else {
        return tiers;
    };

    for (tier, block) in blocks {
        let Ok(tier) = tier.trim().parse::<u32>() else {
            tracing::debug!("Skipping neutral block {tier}");
            continue;
        };
        let Some(items) = block.get("items").and_then(Value::as_object) else {
            continue;
        };

        for name in items.keys() {
            tiers.insert(name.clone(), tier);
            tiers.insert(name.replace("recipe_", ""), tier);
        }
    }

    tiers
}
