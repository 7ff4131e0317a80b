//! Scored response table: CSV with a header row, read without coercion.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::CheckError;
use crate::model::{GradedStatus, ResponseRow};

const REQUIRED_COLUMNS: [&str; 4] = ["item", "response", "correct", "incorrect"];

/// Read and parse the response table at `path`.
pub fn load_responses(path: &Path) -> Result<Vec<ResponseRow>, CheckError> {
    if !path.exists() {
        return Err(CheckError::ResponsesMissing { path: path.to_path_buf() });
    }
    let data = std::fs::read_to_string(path)
        .map_err(|e| CheckError::Io(format!("{}: {e}", path.display())))?;
    parse_responses(&data)
}

/// Parse CSV text into rows, preserving input order.
pub fn parse_responses(csv_data: &str) -> Result<Vec<ResponseRow>, CheckError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| CheckError::CsvParse(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let idx = |name: &str| -> Result<usize, CheckError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| CheckError::MissingColumn { column: name.into() })
    };

    let [item_idx, response_idx, correct_idx, incorrect_idx] = [
        idx(REQUIRED_COLUMNS[0])?,
        idx(REQUIRED_COLUMNS[1])?,
        idx(REQUIRED_COLUMNS[2])?,
        idx(REQUIRED_COLUMNS[3])?,
    ];

    let mut rows = Vec::new();

    for record in reader.records() {
        let record = record.map_err(|e| CheckError::CsvParse(e.to_string()))?;
        let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
        let cell = |i: usize| record.get(i).unwrap_or("").to_string();

        let mut extra = BTreeMap::new();
        for (i, h) in headers.iter().enumerate() {
            if REQUIRED_COLUMNS.contains(&h.as_str()) {
                continue;
            }
            extra.insert(h.clone(), cell(i));
        }

        rows.push(ResponseRow {
            line,
            item: cell(item_idx),
            response: cell(response_idx),
            correct: cell(correct_idx),
            incorrect: cell(incorrect_idx),
            extra,
        });
    }

    tracing::debug!(rows = rows.len(), "response table loaded");
    Ok(rows)
}

/// Group rows by their exact `item` code. Groups iterate in sorted order;
/// rows inside a group keep file order.
pub fn group_by_item(rows: &[ResponseRow]) -> BTreeMap<&str, Vec<&ResponseRow>> {
    let mut groups: BTreeMap<&str, Vec<&ResponseRow>> = BTreeMap::new();
    for row in rows {
        groups.entry(row.item.as_str()).or_default().push(row);
    }
    groups
}

impl ResponseRow {
    /// Recorded grading: `correct` wins over `incorrect`; neither is NA.
    pub fn status(&self) -> Result<GradedStatus, CheckError> {
        if self.count("correct", &self.correct)? > 0 {
            Ok(GradedStatus::Correct)
        } else if self.count("incorrect", &self.incorrect)? > 0 {
            Ok(GradedStatus::Incorrect)
        } else {
            Ok(GradedStatus::NotApplicable)
        }
    }

    fn count(&self, column: &str, raw: &str) -> Result<i64, CheckError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(0);
        }
        trimmed.parse().map_err(|_| CheckError::InvalidCount {
            line: self.line,
            column: column.into(),
            value: raw.into(),
        })
    }
}
