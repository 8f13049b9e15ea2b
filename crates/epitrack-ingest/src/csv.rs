//! CSV article reader.
//!
//! Handles quoted fields, doubled quotes, embedded newlines and CRLF line
//! endings. The first record is the header.

use std::collections::HashMap;
use std::mem::take;

use crate::dates::find_date_column;
use crate::error::IngestError;
use crate::normalize::{RawArticle, RawKeywords};

/// Split CSV text into records of fields.
///
/// Blank lines are skipped. An unterminated quote swallows the rest of the input
/// into the last field rather than failing.
#[must_use]
pub fn parse_records(text: &str) -> Vec<Vec<String>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut records = Vec::new();
    let mut field = String::new();
    let mut record = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.is_empty() => in_quotes = true,
            ',' if !in_quotes => record.push(take(&mut field)),
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                record.push(take(&mut field));
                if record.len() == 1 && record[0].is_empty() {
                    record.clear();
                } else {
                    records.push(take(&mut record));
                }
            }
            _ => field.push(ch),
        }
    }

    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }

    records
}

/// Parse CSV article text into raw rows.
///
/// # Errors
///
/// Returns [`IngestError::NoDateColumn`] if the header lacks every date
/// candidate, or [`IngestError::UnexpectedShape`] if the input is empty.
pub fn read_raw_articles(text: &str) -> Result<(&'static str, Vec<RawArticle>), IngestError> {
    let mut records = parse_records(text).into_iter();
    let header = records
        .next()
        .ok_or_else(|| IngestError::UnexpectedShape("CSV input has no header row".into()))?;

    let index: HashMap<&str, usize> = header
        .iter()
        .enumerate()
        .map(|(i, name)| (name.trim(), i))
        .collect();
    let date_column = find_date_column(header.iter().map(|h| h.trim()))?;

    let rows = records
        .map(|record| {
            let cell = |name: &str| -> Option<String> {
                index
                    .get(name)
                    .and_then(|&i| record.get(i))
                    .filter(|v| !v.trim().is_empty())
                    .cloned()
            };

            RawArticle {
                id: cell("id").and_then(|v| v.trim().parse::<i64>().ok()),
                title: cell("title").unwrap_or_default(),
                description: cell("description").unwrap_or_default(),
                body: cell("content").or_else(|| cell("body")),
                published: cell(date_column),
                keywords: cell("keywords").map_or(RawKeywords::Absent, |v| {
                    RawKeywords::from_text_cell(&v)
                }),
                source: cell("source").unwrap_or_default(),
                country: cell("country"),
            }
        })
        .collect();

    Ok((date_column, rows))
}
