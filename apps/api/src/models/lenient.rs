//! Lenient field decoders for portfolio data.
//!
//! The portfolio backend is loosely typed: fields go missing, come back as `null`,
//! or arrive as numbers where text is expected. These helpers are wired in through
//! `#[serde(default, deserialize_with = "...")]` so that one bad field degrades to
//! its empty value instead of failing the whole snapshot.

use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;

/// Renders a scalar JSON value as text. Objects, arrays and `null` have no text form.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Any scalar becomes a string; everything else becomes `""`.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_text(&value).unwrap_or_default())
}

/// Like [`string`], but blank values become `None`.
pub fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_text(&value).filter(|s| !s.is_empty()))
}

/// Accepts an array of scalars or a single comma-separated string.
/// Blank items are dropped.
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let items: Vec<String> = match value {
        Value::Array(values) => values.iter().filter_map(scalar_text).collect(),
        Value::String(s) => s.split(',').map(|item| item.trim().to_string()).collect(),
        _ => Vec::new(),
    };
    Ok(items.into_iter().filter(|s| !s.is_empty()).collect())
}

/// Decodes an array of records, skipping elements that do not fit `T`.
/// Anything that is not an array decodes to an empty list.
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(entries(value))
}

/// Same as [`list`], for values that were already fetched as raw JSON.
pub fn entries<T: DeserializeOwned>(value: Value) -> Vec<T> {
    match value {
        Value::Array(values) => values
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    }
}
