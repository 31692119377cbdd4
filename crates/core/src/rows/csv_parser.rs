//! CSV row source.
//!
//! Turns raw export bytes into [`RawRow`]s. The first record is the header
//! row; every following record is zipped against it. Delimiter detection
//! covers the separators storefront exports actually use.

use csv::ReaderBuilder;

use crate::errors::{Error, ValidationError};
use crate::rows::RawRow;
use crate::Result;

/// Options for the CSV row source.
#[derive(Debug, Clone, Default)]
pub struct CsvOptions {
    /// Delimiter character; `None` means auto-detect among `,`, `;`, tab.
    pub delimiter: Option<char>,
}

/// Parses CSV content into raw rows.
///
/// Handles a UTF-8 BOM, pads short records with empty values, truncates
/// long records (with a warning), and skips rows whose every cell is blank.
pub fn parse_csv(content: &[u8], options: &CsvOptions) -> Result<Vec<RawRow>> {
    let content_str = decode_content(content);
    let delimiter = options
        .delimiter
        .unwrap_or_else(|| detect_delimiter(&content_str));

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .has_headers(false)
        .flexible(true)
        .from_reader(content_str.as_bytes());

    let mut records = reader.records();
    let headers: Vec<String> = match records.next() {
        Some(Ok(record)) => record.iter().map(|h| h.trim().to_string()).collect(),
        Some(Err(e)) => {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Failed to read header row: {}",
                e
            ))))
        }
        None => {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "CSV content is empty".to_string(),
            )))
        }
    };

    let mut rows = Vec::new();
    for (index, result) in records.enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "Failed to parse row {}: {}",
                    index + 2,
                    e
                ))))
            }
        };

        let mut values: Vec<String> = record.iter().map(|v| v.to_string()).collect();
        if values.iter().all(|v| v.trim().is_empty()) {
            continue;
        }
        if values.len() > headers.len() {
            log::warn!(
                "Row {} has {} columns, expected {}. Extra columns ignored.",
                index + 2,
                values.len(),
                headers.len()
            );
            values.truncate(headers.len());
        } else {
            values.resize(headers.len(), String::new());
        }

        rows.push(RawRow::from_pairs(headers.iter().cloned().zip(values)));
    }

    Ok(rows)
}

/// Decodes content bytes to a UTF-8 string, handling a BOM if present.
fn decode_content(content: &[u8]) -> String {
    let content = content.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(content);
    match std::str::from_utf8(content) {
        Ok(s) => s.to_string(),
        Err(e) => {
            log::warn!(
                "Invalid UTF-8 encoding at byte {}; some characters will be replaced",
                e.valid_up_to()
            );
            String::from_utf8_lossy(content).into_owned()
        }
    }
}

/// Auto-detects the delimiter by scoring candidates over a content sample.
fn detect_delimiter(content: &str) -> char {
    let candidates = [',', ';', '\t'];
    let mut best = ',';
    let mut best_score = 0usize;
    for candidate in candidates {
        let score = score_delimiter(content, candidate);
        if score > best_score {
            best_score = score;
            best = candidate;
        }
    }
    best
}

/// Scores a delimiter by occurrence count weighted by how consistent the
/// per-line counts are.
fn score_delimiter(content: &str, delimiter: char) -> usize {
    let counts: Vec<usize> = content
        .lines()
        .take(10)
        .map(|line| line.matches(delimiter).count())
        .collect();
    let Some(&first) = counts.first() else {
        return 0;
    };
    if first == 0 {
        return 0;
    }
    first * counts.iter().filter(|&&c| c == first).count()
}
