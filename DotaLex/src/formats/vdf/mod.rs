//! Valve KeyValues ("VDF") text format
//!
//! A nested `"key" "value"` / `"key" { ... }` format used by Dota 2's
//! `scripts/npc/*.txt` and `resource/localization/*.txt` files.
//! Documents are read into a [`serde_json::Value`] object so they can be
//! handled exactly like the JSON feeds.
//!
//! Escape sequences inside quoted strings are kept verbatim. Localized
//! templates carry a literal `\n` that the tooltip engine interprets itself.

mod reader;
mod writer;

pub use reader::{parse_vdf, parse_vdf_root, read_vdf};
pub use writer::to_vdf_string;
