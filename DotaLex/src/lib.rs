#![allow(non_snake_case)]
//! # DotaLex
//!
//! Text engine for Dota 2 game data: Valve KeyValues, localized string
//! tables, and tooltip template resolution.
//!
//! ## Supported Formats
//!
//! - **VDF** - Valve KeyValues text (`npc_abilities.txt`, `hero_lore_*.txt`)
//! - **Localization** - `{"lang": {"Tokens": {..}}}` JSON and VDF resources
//!
//! ## Quick Start
//!
//! ### Reading VDF
//!
//! ```
//! use dotalex::formats::parse_vdf;
//!
//! let doc = parse_vdf(r#""DOTAAbilities" { "Version" "1" }"#)?;
//! assert_eq!(doc["DOTAAbilities"]["Version"], "1");
//! # Ok::<(), dotalex::Error>(())
//! ```
//!
//! ### Resolving a Tooltip
//!
//! ```
//! use dotalex::prelude::*;
//! use serde_json::json;
//!
//! let attributes = AttributeList::from_value(&json!([{ "bonus_damage": "20 30 40" }]));
//! let script = json!({ "AbilityCooldown": "12" });
//! let resolver = TemplateResolver::new(&attributes, &script, "sample_ability");
//!
//! let text = resolver.resolve_text("Adds %bonus_damage% damage every %abilitycooldown%s.");
//! assert_eq!(text, "Adds 20 30 40 damage every 12s.");
//! ```

pub mod error;
pub mod formats;
pub mod localization;
pub mod markup;
pub mod tooltip;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::formats::vdf::{parse_vdf, parse_vdf_root, read_vdf, to_vdf_string};
    pub use crate::localization::{StringTable, TOOLTIP_PREFIX};

    pub use crate::tooltip::{
        AttributeList, AttributeRecord, DisplayAttribute, FormattedValue, ItemAbilities,
        Resolved, TemplateResolver, format_ability_special, format_values, lookup, lookup_or_key,
        resolve_with_script, substitute_bonus, substitute_flat,
    };
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
