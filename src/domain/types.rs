//! Shared domain types.
//!
//! All of these are immutable once loaded. They derive `Serialize` so they can
//! be handed straight to the JSON layer (chart figure, hover responses, exports).

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Rate observations dated before this day are excluded at load time.
pub const DEFAULT_CUTOFF: &str = "2017-02-01";

pub const DEFAULT_RATES_CSV: &str = "fed.csv";
pub const DEFAULT_MEETINGS_CSV: &str = "summary.csv";
pub const DEFAULT_BIND: &str = "127.0.0.1:8050";

/// ISO format used whenever a date crosses the UI boundary.
pub const DATE_FMT: &str = "%Y-%m-%d";

/// One point of the policy-rate history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateObservation {
    pub date: NaiveDate,
    /// Rate in percent (e.g. `4.75`).
    pub rate: f64,
}

/// Policy stance attached to a meeting.
///
/// Only `D` and `H` are recognized; every other label (including the empty
/// string) falls into `Other`, which keeps the raw text for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Sentiment {
    Dovish,
    Hawkish,
    Other(String),
}

impl Sentiment {
    pub fn from_label(label: &str) -> Self {
        match label {
            "D" => Sentiment::Dovish,
            "H" => Sentiment::Hawkish,
            other => Sentiment::Other(other.to_string()),
        }
    }

    /// The label exactly as it appeared in the meeting table.
    pub fn label(&self) -> &str {
        match self {
            Sentiment::Dovish => "D",
            Sentiment::Hawkish => "H",
            Sentiment::Other(label) => label,
        }
    }
}

impl From<String> for Sentiment {
    fn from(value: String) -> Self {
        Sentiment::from_label(&value)
    }
}

impl From<Sentiment> for String {
    fn from(value: Sentiment) -> Self {
        value.label().to_string()
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A raw row of the meeting-summary table.
#[derive(Debug, Clone, PartialEq)]
pub struct MeetingRecord {
    pub date: NaiveDate,
    pub sentiment: Sentiment,
    /// `None` when the cell is blank or not numeric.
    pub rate: Option<f64>,
    pub summary: String,
}

/// A meeting joined with the rate observed on its date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeetingEvent {
    pub date: NaiveDate,
    pub sentiment: Sentiment,
    /// Observed rate from the rate series, in percent.
    pub rate: f64,
    pub summary: String,
}

impl MeetingEvent {
    pub fn date_label(&self) -> String {
        self.date.format(DATE_FMT).to_string()
    }
}

/// Settings resolved from CLI flags, environment and defaults.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub rates_csv: PathBuf,
    pub meetings_csv: PathBuf,
    pub cutoff: NaiveDate,
    pub bind: String,
}
