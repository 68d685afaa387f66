//! The process-wide, read-only dataset.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use crate::data::join::inner_join;
use crate::data::series::RateSeries;
use crate::domain::{DashboardConfig, MeetingEvent};
use crate::error::AppError;
use crate::io::ingest::{MeetingTable, RateTable, load_meeting_table, load_rate_table};

/// Counts gathered while loading and joining the two tables.
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub cutoff: NaiveDate,
    pub rate_rows_read: usize,
    pub rate_rows_kept: usize,
    pub rate_rows_missing: usize,
    pub meeting_rows_read: usize,
    pub events_joined: usize,
    pub meetings_dropped: usize,
    pub rates_unresolved: usize,
    pub rates_mismatched: usize,
}

/// Joined meeting events plus the rate series, built once at startup.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub events: Vec<MeetingEvent>,
    pub series: RateSeries,
    pub report: LoadReport,
}

impl Dataset {
    /// Read both input files and join them.
    pub fn load(config: &DashboardConfig) -> Result<Self, AppError> {
        let rates = load_rate_table(&config.rates_csv, config.cutoff)?;
        let meetings = load_meeting_table(&config.meetings_csv)?;
        Ok(Self::from_tables(rates, meetings, config.cutoff))
    }

    pub fn from_tables(rates: RateTable, meetings: MeetingTable, cutoff: NaiveDate) -> Self {
        let joined = inner_join(&meetings.records, &rates.observations);

        let report = LoadReport {
            cutoff,
            rate_rows_read: rates.rows_read,
            rate_rows_kept: rates.observations.len(),
            rate_rows_missing: rates.rows_missing,
            meeting_rows_read: meetings.rows_read,
            events_joined: joined.events.len(),
            meetings_dropped: joined.dropped.len(),
            rates_unresolved: joined.unresolved,
            rates_mismatched: joined.mismatched,
        };

        info!(
            cutoff = %cutoff,
            value_column = %rates.value_column,
            rate_rows_read = report.rate_rows_read,
            rate_rows_kept = report.rate_rows_kept,
            meeting_rows_read = report.meeting_rows_read,
            events_joined = report.events_joined,
            "dataset loaded"
        );

        if report.events_joined == 0 {
            warn!(
                meeting_rows_read = report.meeting_rows_read,
                rate_rows_kept = report.rate_rows_kept,
                "join produced zero events; the chart will show the rate line only"
            );
        }
        if report.meetings_dropped > 0 {
            for dropped in &joined.dropped {
                tracing::debug!(date = %dropped.date, "meeting has no rate observation");
            }
            info!(dropped = report.meetings_dropped, "meetings without a rate observation were dropped");
        }
        if report.rates_unresolved > 0 {
            warn!(count = report.rates_unresolved, "meeting rows with a blank or non-numeric rate");
        }
        if report.rates_mismatched > 0 {
            warn!(
                count = report.rates_mismatched,
                "meeting rows whose rate differs from the observed rate"
            );
        }

        Self {
            events: joined.events,
            series: RateSeries::new(rates.observations),
            report,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::domain::Sentiment;

    fn write_file(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    fn config(dir: &tempfile::TempDir, rates: &str, meetings: &str) -> DashboardConfig {
        DashboardConfig {
            rates_csv: write_file(dir, "fed.csv", rates),
            meetings_csv: write_file(dir, "summary.csv", meetings),
            cutoff: NaiveDate::from_ymd_opt(2017, 2, 1).unwrap(),
            bind: "127.0.0.1:0".to_string(),
        }
    }

    #[test]
    fn load_joins_files_and_counts_drops() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(
            &dir,
            "DATE,DFEDTARU\n2017-01-31,0.75\n2023-03-22,4.75\n2023-05-03,5.25\n",
            "Date,Policy Sentiment,Rate,Summary (50 words)\n\
             2017-01-31,D,0.75,Before cutoff\n\
             2023-03-22,H,4.75,Rate held steady\n\
             2023-06-14,N,5.25,No observation\n",
        );

        let dataset = Dataset::load(&config).unwrap();
        assert_eq!(dataset.series.len(), 2);
        assert_eq!(dataset.events.len(), 1);
        assert_eq!(dataset.events[0].sentiment, Sentiment::Hawkish);
        assert_eq!(dataset.report.meetings_dropped, 2);
        assert_eq!(dataset.report.rate_rows_read, 3);

        for event in &dataset.events {
            assert_eq!(dataset.series.get(event.date), Some(event.rate));
        }
    }

    #[test]
    fn zero_join_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(
            &dir,
            "DATE,DFEDTARU\n2023-03-22,4.75\n",
            "Date,Policy Sentiment,Rate,Summary (50 words)\n",
        );
        let dataset = Dataset::load(&config).unwrap();
        assert!(dataset.events.is_empty());
        assert_eq!(dataset.series.len(), 1);
    }

    #[test]
    fn malformed_meeting_file_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir, "DATE,DFEDTARU\n2023-03-22,4.75\n", "Date,Rate\n2023-03-22,4.75\n");
        let err = Dataset::load(&config).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
