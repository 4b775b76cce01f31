use anyhow::anyhow;
use serde::{Deserialize, Deserializer};

use crate::message::Color;

/// Reads a list such as `attachments` or `fields`; `null` means no entries
pub fn parse_vec<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(d)?.unwrap_or_default())
}

/// Reads an optional payload string; `null` means the same as leaving it out
pub fn parse_string<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

/// Deserializes a [`Color`], treating null and `""` as no color
pub fn parse_color<'de, D>(d: D) -> Result<Option<Color>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = parse_string(d)?;
    if s.is_empty() {
        return Ok(None);
    }
    Ok(Some(Color::from(s)))
}

/// Deserializes a Unix timestamp, using zero if the field is null
pub fn parse_timestamp<'de, D>(d: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(d)?.unwrap_or_default())
}

/// Attaches the text surrounding the failing column to a JSON error.
pub fn improve_json_error(err: &serde_json::Error, json_string: &str) -> anyhow::Error {
    if err.line() != 1 {
        // Pretty-printed documents already point at a readable line
        return anyhow!("{err}");
    }

    let col = err.column();
    let start = floor_char_boundary(json_string, col.saturating_sub(50).min(json_string.len()));
    let end = floor_char_boundary(json_string, (col + 50).min(json_string.len()));
    let start_ell = if start == 0 { "" } else { "..." };
    let end_ell = if end == json_string.len() { "" } else { "..." };

    let snippet = &json_string[start..end];
    anyhow!("{err} | {start_ell}{snippet}{end_ell}")
}

fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}
