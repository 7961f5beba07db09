//! VDF writing

use crate::error::{Error, Result};
use serde_json::{Map, Value};

const INDENT: &str = "\t";

/// Serialize a JSON object back to VDF text
///
/// Objects become blocks and strings become quoted pairs. Numbers and
/// booleans are written through their display form. With `pretty`, nested
/// lines are tab-indented.
///
/// # Errors
///
/// Returns [`Error::VdfUnsupportedValue`] for a non-object root, or for any
/// array or null value in the tree.
pub fn to_vdf_string(value: &Value, pretty: bool) -> Result<String> {
    let Value::Object(map) = value else {
        return Err(Error::VdfUnsupportedValue {
            kind: kind_name(value),
            path: String::new(),
        });
    };

    let mut out = String::new();
    write_block(map, pretty, 0, "", &mut out)?;
    Ok(out)
}

fn write_block(
    map: &Map<String, Value>,
    pretty: bool,
    level: usize,
    path: &str,
    out: &mut String,
) -> Result<()> {
    let indent = if pretty { INDENT.repeat(level) } else { String::new() };

    for (key, value) in map {
        let child_path = if path.is_empty() {
            key.clone()
        } else {
            format!("{path}.{key}")
        };

        let scalar = match value {
            Value::Object(child) => {
                out.push_str(&format!("{indent}\"{key}\"\n{indent}{{\n"));
                write_block(child, pretty, level + 1, &child_path, out)?;
                out.push_str(&format!("{indent}}}\n"));
                continue;
            }
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Array(_) | Value::Null => {
                return Err(Error::VdfUnsupportedValue {
                    kind: kind_name(value),
                    path: child_path,
                });
            }
        };

        out.push_str(&format!("{indent}\"{key}\" \"{scalar}\"\n"));
    }

    Ok(())
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
