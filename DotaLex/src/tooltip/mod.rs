//! Tooltip resolution
//!
//! Turns upstream ability and item scripts plus localized strings into the
//! display text shown on the site.
//!
//! # Overview
//!
//! - [`lookup`] resolves a key against a raw script, case-insensitively,
//!   across the `AbilityValues`, `AbilitySpecial` and top-level slots
//! - [`format_values`] renders per-level values (`"20 21 22"`)
//! - [`TemplateResolver`] replaces `%name%` tokens in descriptions and,
//!   for items, splits the result into hint and section blocks
//! - [`format_ability_special`] builds the `attrib` display records
//! - [`substitute_flat`] and [`substitute_bonus`] fill `{s:name}` tokens
//!
//! All of these are pure: they never modify their inputs and keep no state
//! between calls. Missing data is logged through `tracing` and degrades to
//! the unresolved token, never to an error.
//!
//! # Usage
//!
//! ```
//! use dotalex::tooltip::{AttributeList, TemplateResolver};
//! use serde_json::json;
//!
//! let attributes = AttributeList::from_value(&json!([{ "damage": 50 }, { "target": "enemies" }]));
//! let script = json!({});
//! let resolver = TemplateResolver::new(&attributes, &script, "example");
//!
//! assert_eq!(resolver.resolve_text("Deals %damage% to %dtarget%"), "Deals 50 to enemies");
//! ```

mod attributes;
mod categorize;
mod lookup;
mod special;
mod svalues;
mod template;
mod values;

pub use attributes::{
    AttributeList, AttributeRecord, display_number, display_value, is_truthy, parse_number,
    single_record,
};
pub use categorize::{AbilitySection, ItemAbilities, categorize_item_abilities};
pub use lookup::{
    SPECIAL_TABLE, VALUE_TABLE, find_key_ignore_case, lookup, lookup_or_key, resolve_with_script,
};
pub use special::{DisplayAttribute, VARIABLE_PREFIX, format_ability_special};
pub use svalues::{substitute_bonus, substitute_flat};
pub use template::{EXTRA_ATTRIBUTE_FIELDS, Resolved, TemplateResolver};
pub use values::{DEFAULT_SEPARATOR, FormattedValue, format_text, format_values};
