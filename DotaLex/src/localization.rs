//! Localized string tables
//!
//! Dota 2 ships its localized text as `{"lang": {"Language": .., "Tokens": {..}}}`
//! JSON, or the same shape as a VDF resource. A [`StringTable`] holds the
//! token map for one language and is treated as read-only once built.

use crate::error::{Error, Result};
use crate::formats::vdf::parse_vdf;
use crate::markup::strip_tags;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Prefix upstream uses for tooltip strings, in its canonical case.
pub const TOOLTIP_PREFIX: &str = "DOTA_Tooltip_ability_";

/// Same prefix as it sometimes appears upstream.
const TOOLTIP_PREFIX_CAPITALIZED: &str = "DOTA_Tooltip_Ability_";

/// Token to localized text map for one language
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringTable {
    /// Localized strings indexed by token
    tokens: HashMap<String, String>,
    /// Language name reported by the resource, if any
    language: String,
}

impl StringTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from token/text pairs
    pub fn from_tokens<I, K, V>(tokens: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            tokens: tokens
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            language: String::new(),
        }
    }

    /// Build a table from an already-parsed localization resource
    ///
    /// Accepts the `{"lang": {...}}` wrapper, the unwrapped `lang` object,
    /// or a root-lowercased VDF resource (`{"language", "tokens"}`).
    /// Non-string token values are skipped.
    ///
    /// # Errors
    /// Returns [`Error::MissingTokens`] if no token table can be found.
    pub fn from_resource(resource: &Value) -> Result<Self> {
        let lang = resource
            .get("lang")
            .or_else(|| resource.get("Lang"))
            .unwrap_or(resource);

        let tokens = lang
            .get("Tokens")
            .or_else(|| lang.get("tokens"))
            .and_then(Value::as_object)
            .ok_or(Error::MissingTokens)?;

        let language = lang
            .get("Language")
            .or_else(|| lang.get("language"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let tokens = tokens
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|text| (k.clone(), text.to_string())))
            .collect();

        Ok(Self { tokens, language })
    }

    /// Parse a JSON localization resource
    ///
    /// # Errors
    /// Returns an error if the JSON is invalid or has no token table.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_resource(&value)
    }

    /// Parse a VDF localization resource
    ///
    /// # Errors
    /// Returns an error if the VDF is invalid or has no token table.
    pub fn from_vdf_str(text: &str) -> Result<Self> {
        let value = parse_vdf(text)?;
        Self::from_resource(&value)
    }

    /// Load a localization resource from disk, picking the format from the
    /// file extension (`.json`, anything else is read as VDF)
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let table = if is_json {
            Self::from_json_str(&text)?
        } else {
            Self::from_vdf_str(&text)?
        };
        tracing::debug!("Loaded {} strings from {}", table.len(), path.display());
        Ok(table)
    }

    /// Strip HTML tags from every string
    #[must_use]
    pub fn strip_markup(mut self) -> Self {
        for text in self.tokens.values_mut() {
            let stripped = strip_tags(text).into_owned();
            *text = stripped;
        }
        self
    }

    /// Register every `DOTA_Tooltip_Ability_*` string under its
    /// `DOTA_Tooltip_ability_*` spelling as well
    #[must_use]
    pub fn normalize_tooltip_case(mut self) -> Self {
        let aliases: Vec<(String, String)> = self
            .tokens
            .iter()
            .filter(|(key, _)| key.contains(TOOLTIP_PREFIX_CAPITALIZED))
            .map(|(key, text)| {
                (
                    key.replace(TOOLTIP_PREFIX_CAPITALIZED, TOOLTIP_PREFIX),
                    text.clone(),
                )
            })
            .collect();

        self.tokens.extend(aliases);
        self
    }

    /// Language name reported by the resource
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Number of strings
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Look up a string by token
    pub fn get(&self, token: &str) -> Option<&str> {
        self.tokens.get(token).map(String::as_str)
    }

    /// First string found among several candidate tokens
    pub fn get_first(&self, tokens: &[&str]) -> Option<&str> {
        tokens.iter().find_map(|token| self.get(token))
    }

    /// Check if a token exists
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains_key(token)
    }

    /// Manually insert a string
    pub fn insert(&mut self, token: impl Into<String>, text: impl Into<String>) {
        self.tokens.insert(token.into(), text.into());
    }

    /// Iterate over all token/text pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tokens.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
