//! Display names for ability behavior, damage type and targeting flags

use serde::Serialize;

/// Flags that are never shown.
const IGNORED_FLAGS: &[&str] = &[
    "DOTA_ABILITY_BEHAVIOR_ROOT_DISABLES",
    "DOTA_ABILITY_BEHAVIOR_DONT_RESUME_ATTACK",
    "DOTA_ABILITY_BEHAVIOR_DONT_RESUME_MOVEMENT",
    "DOTA_ABILITY_BEHAVIOR_IGNORE_BACKSWING",
    "DOTA_ABILITY_BEHAVIOR_TOGGLE",
    "DOTA_ABILITY_BEHAVIOR_IGNORE_PSEUDO_QUEUE",
    "DOTA_ABILITY_BEHAVIOR_SHOW_IN_GUIDES",
];

/// Flag to display name.
const FLAG_NAMES: &[(&str, &str)] = &[
    ("DOTA_ABILITY_BEHAVIOR_NONE", "None"),
    ("DOTA_ABILITY_BEHAVIOR_PASSIVE", "Passive"),
    ("DOTA_ABILITY_BEHAVIOR_UNIT_TARGET", "Unit Target"),
    ("DOTA_ABILITY_BEHAVIOR_CHANNELLED", "Channeled"),
    ("DOTA_ABILITY_BEHAVIOR_POINT", "Point Target"),
    ("DOTA_ABILITY_BEHAVIOR_ROOT_DISABLES", "Root"),
    ("DOTA_ABILITY_BEHAVIOR_AOE", "AOE"),
    ("DOTA_ABILITY_BEHAVIOR_NO_TARGET", "No Target"),
    ("DOTA_ABILITY_BEHAVIOR_AUTOCAST", "Autocast"),
    ("DOTA_ABILITY_BEHAVIOR_ATTACK", "Attack Modifier"),
    ("DOTA_ABILITY_BEHAVIOR_IMMEDIATE", "Instant Cast"),
    ("DOTA_ABILITY_BEHAVIOR_HIDDEN", "Hidden"),
    ("DAMAGE_TYPE_PHYSICAL", "Physical"),
    ("DAMAGE_TYPE_MAGICAL", "Magical"),
    ("DAMAGE_TYPE_PURE", "Pure"),
    ("SPELL_IMMUNITY_ENEMIES_YES", "Yes"),
    ("SPELL_IMMUNITY_ENEMIES_NO", "No"),
    ("SPELL_IMMUNITY_ALLIES_YES", "Yes"),
    ("SPELL_IMMUNITY_ALLIES_NO", "No"),
    ("SPELL_DISPELLABLE_YES", "Yes"),
    ("SPELL_DISPELLABLE_NO", "No"),
    ("DOTA_UNIT_TARGET_TEAM_BOTH", "Both"),
    ("DOTA_UNIT_TARGET_TEAM_ENEMY", "Enemy"),
    ("DOTA_UNIT_TARGET_TEAM_FRIENDLY", "Friendly"),
    ("DOTA_UNIT_TARGET_HERO", "Hero"),
    ("DOTA_UNIT_TARGET_BASIC", "Basic"),
    ("DOTA_UNIT_TARGET_BUILDING", "Building"),
    ("DOTA_UNIT_TARGET_TREE", "Tree"),
];

/// Display form of a flag set: one name, or several
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Behavior {
    One(String),
    Many(Vec<String>),
}

/// Display name of a single flag
pub fn flag_name(flag: &str) -> Option<&'static str> {
    FLAG_NAMES
        .iter()
        .find(|(name, _)| *name == flag)
        .map(|(_, display)| *display)
}

/// Format a `A | B | C` flag string
///
/// Ignored and unknown flags are dropped. Returns `None` when nothing is
/// left to show.
pub fn format_behavior(flags: Option<&str>) -> Option<Behavior> {
    let mut names: Vec<String> = flags?
        .split(" | ")
        .map(str::trim)
        .filter(|flag| !IGNORED_FLAGS.contains(flag))
        .filter_map(flag_name)
        .map(str::to_string)
        .collect();

    match names.len() {
        0 => None,
        1 => names.pop().map(Behavior::One),
        _ => Some(Behavior::Many(names)),
    }
}
