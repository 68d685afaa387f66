//! CSV ingest for the two input tables.
//!
//! - the rate history: a `date` column plus one numeric value column
//! - the meeting summaries: `date`, `policy sentiment`, `rate`, `summary (50 words)`
//!
//! Both readers are strict about schema (missing files, headers or columns
//! abort with exit code 2) and collect row-level problems so the error names
//! the first offending line. No joining happens here.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;

use crate::domain::{MeetingRecord, RateObservation, Sentiment};
use crate::error::AppError;

const COL_DATE: &str = "date";
const COL_SENTIMENT: [&str; 2] = ["policy sentiment", "sentiment"];
const COL_RATE: &str = "rate";
const COL_SUMMARY: [&str; 2] = ["summary (50 words)", "summary"];

/// Rate history after the cutoff filter, in source order.
#[derive(Debug, Clone)]
pub struct RateTable {
    pub observations: Vec<RateObservation>,
    /// Header of the value column (e.g. `DFEDTARU`).
    pub value_column: String,
    pub rows_read: usize,
    /// Rows with a blank or `.` value (FRED's missing marker).
    pub rows_missing: usize,
    /// Rows dropped because they are dated before the cutoff.
    pub rows_before_cutoff: usize,
}

/// Meeting summaries, as-is.
#[derive(Debug, Clone)]
pub struct MeetingTable {
    pub records: Vec<MeetingRecord>,
    pub rows_read: usize,
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

pub fn load_rate_table(path: &Path, cutoff: NaiveDate) -> Result<RateTable, AppError> {
    let file = open(path)?;
    read_rate_table(file, &path.display().to_string(), cutoff)
}

pub fn load_meeting_table(path: &Path) -> Result<MeetingTable, AppError> {
    let file = open(path)?;
    read_meeting_table(file, &path.display().to_string())
}

/// Parse the rate history and keep rows dated on or after `cutoff`.
pub fn read_rate_table<R: Read>(input: R, source: &str, cutoff: NaiveDate) -> Result<RateTable, AppError> {
    let mut reader = csv_reader(input);
    let headers = read_headers(&mut reader, source)?;
    let header_map = build_header_map(&headers);

    let date_idx = *header_map
        .get(COL_DATE)
        .ok_or_else(|| AppError::parse(format!("{source}: missing required column `{COL_DATE}`")))?;

    // The value column is positional: whatever comes first after the date.
    let value_idx = (0..headers.len())
        .find(|&idx| idx != date_idx)
        .ok_or_else(|| AppError::parse(format!("{source}: expected a rate value column next to `{COL_DATE}`")))?;
    let value_column = headers.get(value_idx).map(normalize_header_name).unwrap_or_default();

    let mut observations = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;
    let mut rows_missing = 0usize;
    let mut rows_before_cutoff = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // records() starts after the header, and CSV lines are 1-based.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        let date = match field(&record, date_idx).ok_or_else(|| "Missing date.".to_string()).and_then(parse_date) {
            Ok(d) => d,
            Err(message) => {
                row_errors.push(RowError { line, message });
                continue;
            }
        };

        let rate = match field(&record, value_idx) {
            None | Some(".") => {
                rows_missing += 1;
                continue;
            }
            Some(raw) => match parse_f64(raw) {
                Some(v) => v,
                None => {
                    row_errors.push(RowError {
                        line,
                        message: format!("Invalid rate value '{raw}'."),
                    });
                    continue;
                }
            },
        };

        if date < cutoff {
            rows_before_cutoff += 1;
            continue;
        }

        observations.push(RateObservation { date, rate });
    }

    fail_on_row_errors(source, &row_errors)?;

    Ok(RateTable {
        observations,
        value_column,
        rows_read,
        rows_missing,
        rows_before_cutoff,
    })
}

/// Parse the meeting table without filtering.
pub fn read_meeting_table<R: Read>(input: R, source: &str) -> Result<MeetingTable, AppError> {
    let mut reader = csv_reader(input);
    let headers = read_headers(&mut reader, source)?;
    let header_map = build_header_map(&headers);

    let date_idx = require_column(&header_map, &[COL_DATE], source)?;
    let sentiment_idx = require_column(&header_map, &COL_SENTIMENT, source)?;
    let rate_idx = require_column(&header_map, &[COL_RATE], source)?;
    let summary_idx = require_column(&header_map, &COL_SUMMARY, source)?;

    let mut records = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        let date = match field(&record, date_idx).ok_or_else(|| "Missing date.".to_string()).and_then(parse_date) {
            Ok(d) => d,
            Err(message) => {
                row_errors.push(RowError { line, message });
                continue;
            }
        };

        records.push(MeetingRecord {
            date,
            sentiment: Sentiment::from_label(field(&record, sentiment_idx).unwrap_or("")),
            rate: field(&record, rate_idx).and_then(parse_f64),
            summary: field(&record, summary_idx).unwrap_or("").to_string(),
        });
    }

    fail_on_row_errors(source, &row_errors)?;

    Ok(MeetingTable { records, rows_read })
}

fn open(path: &Path) -> Result<File, AppError> {
    File::open(path).map_err(|e| AppError::parse(format!("Failed to open CSV '{}': {e}", path.display())))
}

fn csv_reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input)
}

fn read_headers<R: Read>(reader: &mut csv::Reader<R>, source: &str) -> Result<StringRecord, AppError> {
    let headers = reader
        .headers()
        .map_err(|e| AppError::parse(format!("{source}: failed to read CSV headers: {e}")))?
        .clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(AppError::parse(format!("{source}: missing header row")));
    }
    Ok(headers)
}

fn fail_on_row_errors(source: &str, row_errors: &[RowError]) -> Result<(), AppError> {
    let Some(first) = row_errors.first() else {
        return Ok(());
    };
    Err(AppError::parse(format!(
        "{source}: {} malformed row(s); first at line {}: {}",
        row_errors.len(),
        first.line,
        first.message
    )))
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    let mut map = HashMap::new();
    for (idx, name) in headers.iter().enumerate() {
        // Duplicate headers resolve to the leftmost column.
        map.entry(normalize_header_name(name)).or_insert(idx);
    }
    map
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}').trim();
    name.to_ascii_lowercase()
}

fn require_column(header_map: &HashMap<String, usize>, names: &[&str], source: &str) -> Result<usize, AppError> {
    names
        .iter()
        .find_map(|name| header_map.get(*name).copied())
        .ok_or_else(|| AppError::parse(format!("{source}: missing required column `{}`", names[0])))
}

fn field(record: &StringRecord, idx: usize) -> Option<&str> {
    record.get(idx).map(str::trim).filter(|s| !s.is_empty())
}

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, String> {
    const FMTS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    Err(format!(
        "Invalid date '{s}'. Expected one of: YYYY-MM-DD, YYYY/MM/DD, MM/DD/YYYY."
    ))
}

fn parse_f64(s: &str) -> Option<f64> {
    let v = s.trim_end_matches('%').trim().parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}
