//! Terminal output for `fomc-dash inspect`.
//!
//! Formatting lives here so the loader and join code stay free of
//! presentation concerns.

use crate::data::{Dataset, LoadReport};
use crate::domain::MeetingEvent;

const SUMMARY_WIDTH: usize = 60;

/// Format the load/join summary.
pub fn format_load_summary(dataset: &Dataset) -> String {
    let report: &LoadReport = &dataset.report;
    let mut out = String::new();

    out.push_str("=== fomc-dash - Fed Funds Target Rate vs FOMC ===\n");
    out.push_str(&format!("Cutoff: {} (inclusive)\n", report.cutoff));
    out.push_str(&format!(
        "Rates: read={} kept={} missing={}\n",
        report.rate_rows_read, report.rate_rows_kept, report.rate_rows_missing
    ));
    if let Some((first, last)) = dataset.series.date_range() {
        out.push_str(&format!("Series range: {first} .. {last}\n"));
    }
    out.push_str(&format!(
        "Meetings: read={} joined={} dropped={}\n",
        report.meeting_rows_read, report.events_joined, report.meetings_dropped
    ));
    if report.rates_unresolved > 0 || report.rates_mismatched > 0 {
        out.push_str(&format!(
            "Meeting rate cells: unresolved={} mismatched={}\n",
            report.rates_unresolved, report.rates_mismatched
        ));
    }
    if report.events_joined == 0 {
        out.push_str("Warning: no meeting joined a rate observation; the chart shows the rate line only.\n");
    }

    out
}

/// Format the joined events as a fixed-width table.
pub fn format_event_table(events: &[MeetingEvent]) -> String {
    let mut out = String::new();
    out.push_str(format!("{:<10} {:>7} {:<9} {}", "date", "rate", "sentiment", "summary").trim_end());
    out.push('\n');
    out.push_str(format!("{:-<10} {:-<7} {:-<9} {:-<SUMMARY_WIDTH$}", "", "", "", "").trim_end());
    out.push('\n');

    for e in events {
        out.push_str(
            format!(
                "{:<10} {:>6.2}% {:<9} {}",
                e.date_label(),
                e.rate,
                truncate(e.sentiment.label(), 9),
                truncate(&e.summary, SUMMARY_WIDTH),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::Sentiment;
    use crate::io::ingest::{read_meeting_table, read_rate_table};

    #[test]
    fn event_table_rows() {
        let events = vec![MeetingEvent {
            date: NaiveDate::from_ymd_opt(2023, 3, 22).unwrap(),
            sentiment: Sentiment::Hawkish,
            rate: 4.75,
            summary: "Rate held steady".to_string(),
        }];
        let table = format_event_table(&events);
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], "2023-03-22   4.75% H         Rate held steady");
    }

    #[test]
    fn truncate_marks_cut_text() {
        assert_eq!(truncate("abcdef", 4), "abc.");
        assert_eq!(truncate("abc", 4), "abc");
    }

    #[test]
    fn load_summary_warns_on_empty_join() {
        let cutoff = NaiveDate::from_ymd_opt(2017, 2, 1).unwrap();
        let rates = read_rate_table("DATE,V\n2023-03-22,4.75\n".as_bytes(), "fed.csv", cutoff).unwrap();
        let meetings = read_meeting_table(
            "Date,Policy Sentiment,Rate,Summary (50 words)\n2019-01-30,D,,Patient\n".as_bytes(),
            "summary.csv",
        )
        .unwrap();
        let dataset = Dataset::from_tables(rates, meetings, cutoff);

        let summary = format_load_summary(&dataset);
        assert!(summary.contains("Cutoff: 2017-02-01"));
        assert!(summary.contains("joined=0 dropped=1"));
        assert!(summary.contains("Warning: no meeting joined"));
    }
}
