//! VDF reading and parsing

use crate::error::{Error, Result};
use serde_json::{Map, Value};
use std::path::Path;

/// Read a VDF file from disk
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, or any VDF syntax error
/// from [`parse_vdf`].
///
/// [`Error::Io`]: crate::Error::Io
pub fn read_vdf<P: AsRef<Path>>(path: P) -> Result<Value> {
    let text = std::fs::read_to_string(path)?;
    parse_vdf(&text)
}

/// Parse VDF text into a JSON object
///
/// Blocks become objects, values become strings. A block key repeated at
/// the same level is merged into the earlier block; a repeated value key
/// overwrites the earlier value.
///
/// # Errors
///
/// Returns a `Vdf*` error variant with the offending line number on
/// malformed input.
pub fn parse_vdf(text: &str) -> Result<Value> {
    let mut parser = Parser {
        lexer: Lexer::new(text),
    };
    let root = parser.parse_block(0)?;
    Ok(Value::Object(root))
}

/// Parse VDF text and return its root block with lowercased keys
///
/// Upstream resource files wrap everything in one top-level block
/// (`"DOTAAbilities" { ... }`, `"lang" { ... }`). This descends into that
/// block and lowercases its direct keys, so `"Tokens"` and `"tokens"` read
/// the same.
///
/// # Errors
///
/// Returns [`Error::VdfMissingRoot`] if the document has no top-level block.
pub fn parse_vdf_root(text: &str) -> Result<Value> {
    let parsed = parse_vdf(text)?;
    let root = parsed
        .as_object()
        .and_then(|map| map.values().next())
        .and_then(Value::as_object)
        .ok_or(Error::VdfMissingRoot)?;

    let normalized: Map<String, Value> = root
        .iter()
        .map(|(key, value)| (key.to_lowercase(), value.clone()))
        .collect();
    Ok(Value::Object(normalized))
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Text(String),
    Open,
    Close,
}

struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
}

impl<'a> Lexer<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
            line: 1,
        }
    }

    /// Next token with its starting line, skipping whitespace, comments
    /// and `[$PLATFORM]` conditionals.
    fn next_token(&mut self) -> Result<Option<(Token, usize)>> {
        loop {
            let Some(&c) = self.chars.peek() else {
                return Ok(None);
            };

            match c {
                '\n' => {
                    self.line += 1;
                    self.chars.next();
                }
                c if c.is_whitespace() => {
                    self.chars.next();
                }
                '/' => {
                    self.chars.next();
                    if self.chars.peek() == Some(&'/') {
                        self.skip_line();
                    } else {
                        let mut text = String::from('/');
                        text.push_str(&self.bare());
                        return Ok(Some((Token::Text(text), self.line)));
                    }
                }
                '[' => self.skip_conditional(),
                '{' => {
                    self.chars.next();
                    return Ok(Some((Token::Open, self.line)));
                }
                '}' => {
                    self.chars.next();
                    return Ok(Some((Token::Close, self.line)));
                }
                '"' => {
                    let line = self.line;
                    self.chars.next();
                    let text = self.quoted(line)?;
                    return Ok(Some((Token::Text(text), line)));
                }
                _ => {
                    let line = self.line;
                    let text = self.bare();
                    return Ok(Some((Token::Text(text), line)));
                }
            }
        }
    }

    fn skip_line(&mut self) {
        while let Some(&c) = self.chars.peek() {
            if c == '\n' {
                break;
            }
            self.chars.next();
        }
    }

    fn skip_conditional(&mut self) {
        for c in self.chars.by_ref() {
            if c == ']' {
                break;
            }
            if c == '\n' {
                self.line += 1;
            }
        }
    }

    fn quoted(&mut self, start_line: usize) -> Result<String> {
        let mut text = String::new();
        loop {
            match self.chars.next() {
                None => {
                    return Err(Error::VdfUnterminatedString { line: start_line });
                }
                Some('"') => return Ok(text),
                Some('\\') => {
                    text.push('\\');
                    match self.chars.next() {
                        Some(escaped) => {
                            if escaped == '\n' {
                                self.line += 1;
                            }
                            text.push(escaped);
                        }
                        None => {
                            return Err(Error::VdfUnterminatedString { line: start_line });
                        }
                    }
                }
                Some(c) => {
                    if c == '\n' {
                        self.line += 1;
                    }
                    text.push(c);
                }
            }
        }
    }

    fn bare(&mut self) -> String {
        let mut text = String::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_whitespace() || matches!(c, '"' | '{' | '}') {
                break;
            }
            text.push(c);
            self.chars.next();
        }
        text
    }
}

struct Parser<'a> {
    lexer: Lexer<'a>,
}

impl Parser<'_> {
    fn parse_block(&mut self, depth: usize) -> Result<Map<String, Value>> {
        let mut map = Map::new();

        loop {
            let Some((token, line)) = self.lexer.next_token()? else {
                if depth > 0 {
                    return Err(Error::VdfUnclosedBlock { depth });
                }
                return Ok(map);
            };

            let key = match token {
                Token::Text(key) => key,
                Token::Close if depth > 0 => return Ok(map),
                Token::Close => return Err(Error::VdfUnexpectedClose { line }),
                Token::Open => return Err(Error::VdfUnexpectedOpen { line }),
            };

            match self.lexer.next_token()? {
                Some((Token::Text(value), _)) => {
                    map.insert(key, Value::String(value));
                }
                Some((Token::Open, _)) => {
                    let child = self.parse_block(depth + 1)?;
                    match map.get_mut(&key) {
                        Some(Value::Object(existing)) => merge_block(existing, child),
                        _ => {
                            map.insert(key, Value::Object(child));
                        }
                    }
                }
                Some((Token::Close, _)) | None => {
                    return Err(Error::VdfMissingValue { key, line });
                }
            }
        }
    }
}

/// Merge a repeated block into the one already stored under the same key.
fn merge_block(existing: &mut Map<String, Value>, incoming: Map<String, Value>) {
    for (key, value) in incoming {
        match (existing.get_mut(&key), value) {
            (Some(Value::Object(target)), Value::Object(source)) => merge_block(target, source),
            (_, value) => {
                existing.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_nested_blocks() {
        let text = r#"
"DOTAAbilities"
{
    "Version"   "1"
    // a comment line
    "item_blink"
    {
        "ID"        "1"
        "AbilityCastRange"  "1200"
        "AbilitySpecial"
        {
            "01"
            {
                "var_type"  "FIELD_INTEGER"
                "blink_range"   "1200"
            }
        }
    }
}
"#;
        let parsed = parse_vdf(text).unwrap();
        assert_eq!(
            parsed,
            json!({
                "DOTAAbilities": {
                    "Version": "1",
                    "item_blink": {
                        "ID": "1",
                        "AbilityCastRange": "1200",
                        "AbilitySpecial": {
                            "01": { "var_type": "FIELD_INTEGER", "blink_range": "1200" }
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn test_bare_tokens_and_conditionals() {
        let text = "root { key value [$WIN32] other \"x y\" }";
        let parsed = parse_vdf(text).unwrap();
        assert_eq!(parsed, json!({ "root": { "key": "value", "other": "x y" } }));
    }

    #[test]
    fn test_escapes_are_kept_verbatim() {
        let text = r#""lang" { "Tokens" { "desc" "Line one\nLine \"two\"" } }"#;
        let parsed = parse_vdf(text).unwrap();
        assert_eq!(
            parsed["lang"]["Tokens"]["desc"],
            json!(r#"Line one\nLine \"two\""#)
        );
    }

    #[test]
    fn test_duplicate_blocks_merge() {
        let text = r#""root" { "a" { "x" "1" } "a" { "y" "2" } "b" "1" "b" "2" }"#;
        let parsed = parse_vdf(text).unwrap();
        assert_eq!(parsed, json!({ "root": { "a": { "x": "1", "y": "2" }, "b": "2" } }));
    }

    #[test]
    fn test_root_keys_lowercased() {
        let text = r#""lang" { "Language" "schinese" "Tokens" { "Key" "Value" } }"#;
        let root = parse_vdf_root(text).unwrap();
        assert_eq!(root["language"], json!("schinese"));
        // Only the direct children are lowercased
        assert_eq!(root["tokens"]["Key"], json!("Value"));
    }

    #[test]
    fn test_syntax_errors_report_lines() {
        assert!(matches!(
            parse_vdf("\"root\"\n{\n\"key\" \"value\"\n"),
            Err(Error::VdfUnclosedBlock { depth: 1 })
        ));
        assert!(matches!(
            parse_vdf("\"a\" \"b\"\n}"),
            Err(Error::VdfUnexpectedClose { line: 2 })
        ));
        assert!(matches!(
            parse_vdf("\"root\" { \"dangling\" }"),
            Err(Error::VdfMissingValue { line: 1, .. })
        ));
        assert!(matches!(
            parse_vdf("\"root\" { \"broken"),
            Err(Error::VdfUnterminatedString { line: 1 })
        ));
        assert!(matches!(parse_vdf_root("\"a\" \"b\""), Err(Error::VdfMissingRoot)));
    }
}
