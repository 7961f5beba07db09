//! CLI command for VDF (KeyValues) and JSON conversion

use std::path::Path;

use dotalex::formats::{parse_vdf, parse_vdf_root, to_vdf_string};

/// Convert `source` to JSON, or to VDF when it is a `.json` file
pub fn execute(source: &Path, destination: Option<&Path>, root: bool) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(source)?;
    let output = convert(source, &text, root)?;

    match destination {
        Some(dest) => {
            if let Some(parent) = dest.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(dest, output)?;
            println!("Converted {} -> {}", source.display(), dest.display());
        }
        None => println!("{output}"),
    }

    Ok(())
}

fn convert(source: &Path, text: &str, root: bool) -> anyhow::Result<String> {
    let is_json = source
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        let value: serde_json::Value = serde_json::from_str(text)?;
        return Ok(to_vdf_string(&value, true)?);
    }

    let value = if root {
        parse_vdf_root(text)?
    } else {
        parse_vdf(text)?
    };
    Ok(serde_json::to_string_pretty(&value)?)
}
