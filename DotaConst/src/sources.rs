//! Source document loading
//!
//! The data directory mirrors the upstream `dota/` tree. `.json` documents
//! are read as-is; anything else is read as VDF and normalized to its
//! root block with lowercased keys.

use crate::error::{Error, Result};
use dotalex::formats::parse_vdf_root;
use dotalex::localization::StringTable;
use serde_json::Value;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Ability and item strings, relative to the data directory.
pub fn abilities_strings_path(language: &str) -> PathBuf {
    PathBuf::from(format!("resource/localization/abilities_{language}.json"))
}

/// General UI strings (hero names), relative to the data directory.
pub fn dota_strings_path(language: &str) -> PathBuf {
    PathBuf::from(format!("resource/dota_{language}.json"))
}

/// Hero biographies, relative to the data directory.
pub fn hero_lore_path(language: &str) -> PathBuf {
    PathBuf::from(format!("resource/localization/hero_lore_{language}.txt"))
}

pub const ITEMS_PATH: &str = "scripts/npc/items.json";
pub const ABILITIES_PATH: &str = "scripts/npc/npc_abilities.json";
pub const HEROES_PATH: &str = "scripts/npc/npc_heroes.json";
pub const NEUTRAL_ITEMS_PATH: &str = "scripts/npc/neutral_items.txt";

/// Load one source document
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::MissingSource {
            path: path.to_path_buf(),
        });
    }

    let text = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let value = if is_json {
        serde_json::from_str(&text)?
    } else {
        parse_vdf_root(&text)?
    };
    tracing::debug!("Loaded {}", path.display());
    Ok(value)
}

/// Load a localization resource as a tooltip-ready string table
///
/// `DOTA_Tooltip_Ability_*` keys are also registered under their
/// lowercase-`ability` spelling. Markup is kept.
pub fn load_strings<P: AsRef<Path>>(path: P) -> Result<StringTable> {
    let resource = load_document(path)?;
    Ok(StringTable::from_resource(&resource)?.normalize_tooltip_case())
}

/// All `.json` documents below `dir`, in path order
pub fn find_json_documents<P: AsRef<Path>>(dir: P) -> Vec<PathBuf> {
    let mut files: Vec<_> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| {
            e.path().is_file()
                && e.path()
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        })
        .map(|e| e.path().to_path_buf())
        .collect();

    files.sort();
    files
}
