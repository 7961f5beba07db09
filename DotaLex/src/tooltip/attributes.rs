//! Attribute records and lists
//!
//! Upstream ships an ability's special values either as an array of records
//! (`[{"var_type": .., "damage": "50 60"}, ..]`), as an object of such
//! records (`{"01": {..}, "02": {..}}`), or as one flat `AbilityValues` table.
//! [`AttributeList`] normalizes all of these into one ordered sequence so the
//! rest of the engine never branches on container shape.

use serde_json::{Map, Number, Value};

/// One attribute record: attribute name(s) mapped to a scalar or to a richer
/// `{"value": .., ..}` object. Key order follows the source document.
pub type AttributeRecord = Map<String, Value>;

/// Ordered sequence of attribute records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeList {
    records: Vec<AttributeRecord>,
}

impl AttributeList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize an upstream special-values payload
    ///
    /// Arrays keep their object elements; objects contribute their object
    /// values in order; anything else yields an empty list.
    pub fn from_value(value: &Value) -> Self {
        let records = match value {
            Value::Array(items) => items
                .iter()
                .filter_map(Value::as_object)
                .cloned()
                .collect(),
            Value::Object(map) => map.values().filter_map(Value::as_object).cloned().collect(),
            _ => Vec::new(),
        };
        Self { records }
    }

    /// Split a flat `AbilityValues`-style table into one record per key
    pub fn from_flat_table(table: &Map<String, Value>) -> Self {
        table
            .iter()
            .map(|(key, value)| single_record(key, value.clone()))
            .collect()
    }

    /// Append a record
    pub fn push(&mut self, record: AttributeRecord) {
        self.records.push(record);
    }

    /// Append a single-key record
    pub fn push_entry(&mut self, key: impl Into<String>, value: Value) {
        self.records.push(single_record(key, value));
    }

    /// All records in order
    pub fn records(&self) -> &[AttributeRecord] {
        &self.records
    }

    /// Iterate over records in order
    pub fn iter(&self) -> std::slice::Iter<'_, AttributeRecord> {
        self.records.iter()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if there are no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Value stored under `key` in the first record that has it
    pub fn find(&self, key: &str) -> Option<&Value> {
        self.records.iter().find_map(|record| record.get(key))
    }
}

impl FromIterator<AttributeRecord> for AttributeList {
    fn from_iter<I: IntoIterator<Item = AttributeRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<AttributeRecord>> for AttributeList {
    fn from(records: Vec<AttributeRecord>) -> Self {
        Self { records }
    }
}

impl<'a> IntoIterator for &'a AttributeList {
    type Item = &'a AttributeRecord;
    type IntoIter = std::slice::Iter<'a, AttributeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Build a record holding exactly one key
pub fn single_record(key: impl Into<String>, value: Value) -> AttributeRecord {
    let mut record = Map::new();
    record.insert(key.into(), value);
    record
}

/// Display form of an attribute value
///
/// Whole floats print without a fraction (`12.0` -> `12`), arrays join
/// their elements with `,`, and `{"value": ..}` objects display their value.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => display_number(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(display_value).collect::<Vec<_>>().join(","),
        Value::Object(map) => match map.get("value") {
            Some(inner) => display_value(inner),
            None => value.to_string(),
        },
    }
}

/// Display form of a JSON number
pub fn display_number(number: &Number) -> String {
    if number.is_f64() {
        number.as_f64().map_or_else(|| number.to_string(), display_float)
    } else {
        number.to_string()
    }
}

fn display_float(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Whether a value counts as present: not null, false, zero, or empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Parse a numeric source field the way upstream stores it
///
/// Empty text reads as zero; text that is not a number is kept as a string.
pub fn parse_number(text: &str) -> Value {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Value::from(0);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.fract() == 0.0 && value.abs() < 1e15 => Value::from(value as i64),
        Ok(value) => Number::from_f64(value).map_or_else(|| Value::from(trimmed), Value::Number),
        Err(_) => Value::from(trimmed),
    }
}
