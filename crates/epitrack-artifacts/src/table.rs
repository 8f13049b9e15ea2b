//! Row types that can be written as CSV or rendered as a markdown table.

use std::io::{self, Write};

use epitrack_core::{DailySeriesPoint, DiseaseSummary, ForecastPoint, GeoPoint, HotzoneSummary};

use crate::format::{boolean, date, float, optional_float};

/// A record with a fixed column layout.
pub trait CsvRecord {
    const HEADER: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

impl CsvRecord for DailySeriesPoint {
    const HEADER: &'static [&'static str] = &[
        "date",
        "disease_name",
        "mention_count",
        "sentiment_score",
        "source_reliability",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            date(self.date),
            self.disease_name.clone(),
            float(self.mention_count),
            float(self.sentiment_score),
            float(self.source_reliability),
        ]
    }
}

impl CsvRecord for ForecastPoint {
    const HEADER: &'static [&'static str] =
        &["date", "disease_name", "forecast", "lower_95", "upper_95"];

    fn cells(&self) -> Vec<String> {
        vec![
            date(self.date),
            self.disease_name.clone(),
            float(self.forecast),
            float(self.lower_95),
            float(self.upper_95),
        ]
    }
}

impl CsvRecord for DiseaseSummary {
    const HEADER: &'static [&'static str] = &[
        "disease_name",
        "model_used",
        "recent_actual_mean",
        "forecast_next_mean",
        "forecast_lower_95",
        "forecast_upper_95",
        "pct_change_vs_recent",
        "is_rising",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.disease_name.clone(),
            self.model_used.to_string(),
            float(self.recent_actual_mean),
            float(self.forecast_next_mean),
            float(self.forecast_lower_95),
            float(self.forecast_upper_95),
            float(self.pct_change_vs_recent),
            boolean(self.is_rising),
        ]
    }
}

impl CsvRecord for GeoPoint {
    const HEADER: &'static [&'static str] =
        &["date", "disease_name", "country", "lat", "lon", "mention_count"];

    fn cells(&self) -> Vec<String> {
        vec![
            date(self.date),
            self.disease_name.clone(),
            self.country.clone().unwrap_or_default(),
            optional_float(self.lat),
            optional_float(self.lon),
            self.mention_count.to_string(),
        ]
    }
}

impl CsvRecord for HotzoneSummary {
    const HEADER: &'static [&'static str] = &[
        "country",
        "disease_name",
        "prev7_mean",
        "last7_mean",
        "pct_change",
        "is_hot",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.country.clone(),
            self.disease_name.clone(),
            float(self.prev7_mean),
            float(self.last7_mean),
            float(self.pct_change),
            boolean(self.is_hot),
        ]
    }
}

fn needs_quotes(cell: &str) -> bool {
    cell.contains(',') || cell.contains('"') || cell.contains('\n') || cell.contains('\r')
}

fn write_row<W: Write, S: AsRef<str>>(w: &mut W, row: &[S]) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            w.write_all(b",")?;
        }
        let cell = cell.as_ref();
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            w.write_all(cell.as_bytes())?;
        }
    }
    w.write_all(b"\n")
}

/// Header plus one line per record. An empty slice still gets its header.
///
/// # Errors
///
/// Propagates I/O errors from `w`.
pub fn write_table<W: Write, R: CsvRecord>(w: &mut W, rows: &[R]) -> io::Result<()> {
    write_row(w, R::HEADER)?;
    for row in rows {
        write_row(w, &row.cells())?;
    }
    Ok(())
}

/// GitHub-style markdown table, used for terminal reports.
#[must_use]
pub fn render_markdown<R: CsvRecord>(rows: &[R]) -> String {
    let escape = |cell: &str| cell.replace('|', "\\|");
    let mut out = String::new();
    out.push_str("| ");
    out.push_str(&R::HEADER.join(" | "));
    out.push_str(" |\n|");
    for _ in R::HEADER {
        out.push_str("---|");
    }
    out.push('\n');
    for row in rows {
        let cells: Vec<String> = row.cells().iter().map(|c| escape(c)).collect();
        out.push_str("| ");
        out.push_str(&cells.join(" | "));
        out.push_str(" |\n");
    }
    out
}
