//! JSON and JSON-lines article readers.

use serde_json::{Map, Value};

use crate::dates::find_date_column;
use crate::error::IngestError;
use crate::normalize::{RawArticle, RawKeywords};

/// Parse a JSON array of article objects.
///
/// # Errors
///
/// Returns [`IngestError::Json`] on malformed JSON, [`IngestError::UnexpectedShape`]
/// when the document is not an array of objects, or [`IngestError::NoDateColumn`].
pub fn read_json_array(
    text: &str,
) -> Result<(Option<&'static str>, Vec<RawArticle>), IngestError> {
    let value: Value = serde_json::from_str(text).map_err(|source| IngestError::Json {
        context: "article array".to_string(),
        source,
    })?;
    let Value::Array(items) = value else {
        return Err(IngestError::UnexpectedShape(
            "expected a JSON array of article objects".into(),
        ));
    };

    let objects = items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(map) => Ok(map),
            _ => Err(IngestError::UnexpectedShape(format!(
                "array element {i} is not an object"
            ))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    raw_from_objects(&objects)
}

/// Parse newline-delimited JSON objects. Blank lines are skipped.
///
/// # Errors
///
/// Same conditions as [`read_json_array`], reported with the 1-based line number.
pub fn read_json_lines(
    text: &str,
) -> Result<(Option<&'static str>, Vec<RawArticle>), IngestError> {
    let mut objects = Vec::new();
    for (n, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(line).map_err(|source| IngestError::Json {
            context: format!("line {}", n + 1),
            source,
        })?;
        match value {
            Value::Object(map) => objects.push(map),
            _ => {
                return Err(IngestError::UnexpectedShape(format!(
                    "line {} is not a JSON object",
                    n + 1
                )))
            }
        }
    }

    raw_from_objects(&objects)
}

/// Shared conversion once the objects are known.
///
/// An empty input has no shape to check, so it yields no date column and no
/// rows instead of an error.
fn raw_from_objects(
    objects: &[Map<String, Value>],
) -> Result<(Option<&'static str>, Vec<RawArticle>), IngestError> {
    if objects.is_empty() {
        return Ok((None, Vec::new()));
    }

    let mut keys: Vec<&str> = Vec::new();
    for object in objects {
        for key in object.keys() {
            if !keys.contains(&key.as_str()) {
                keys.push(key.as_str());
            }
        }
    }
    let date_column = find_date_column(keys)?;

    let rows = objects
        .iter()
        .map(|object| RawArticle {
            id: object.get("id").and_then(json_id),
            title: text_field(object, "title").unwrap_or_default(),
            description: text_field(object, "description").unwrap_or_default(),
            body: text_field(object, "content").or_else(|| text_field(object, "body")),
            published: text_field(object, date_column),
            keywords: object
                .get("keywords")
                .map_or(RawKeywords::Absent, RawKeywords::from_json),
            source: text_field(object, "source").unwrap_or_default(),
            country: text_field(object, "country"),
        })
        .collect();

    Ok((Some(date_column), rows))
}

fn json_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Non-blank string value of `key`; numbers are rendered, other types ignored.
fn text_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
