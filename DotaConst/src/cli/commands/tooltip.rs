//! CLI command for inspecting a single resolved tooltip

use std::path::Path;

use dotalex::localization::TOOLTIP_PREFIX;
use dotalex::tooltip::{TemplateResolver, format_ability_special};
use serde_json::json;

use crate::sources::{load_document, load_strings};
use crate::transform::script_attributes;

/// Print the resolved description and formatted attributes of `key`
pub fn execute(strings: &Path, scripts: &Path, key: &str, item: bool) -> anyhow::Result<()> {
    let raw = load_strings(strings)?;
    let display = raw.clone().strip_markup();
    let document = load_document(scripts)?;

    let script = document
        .get("DOTAAbilities")
        .and_then(|block| block.get(key))
        .ok_or_else(|| anyhow::anyhow!("No script named '{key}' in {}", scripts.display()))?;

    let tooltip = format!("{TOOLTIP_PREFIX}{key}");
    let template_table = if item { &raw } else { &display };
    let template = template_table.get(&format!("{tooltip}_Description"));

    let attributes = script_attributes(script);
    let resolved = TemplateResolver::new(&attributes, script, key).resolve(template, item);
    let attrib = format_ability_special(&attributes, &display, &format!("{tooltip}_"));

    let output = json!({
        "dname": display.get(&tooltip),
        "desc": resolved,
        "attrib": attrib,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
