//! Inner join of meeting records with rate observations.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::domain::{MeetingEvent, MeetingRecord, RateObservation};

/// Meeting rate cells that differ from the observation by more than this are
/// counted as mismatches.
const RATE_TOLERANCE: f64 = 1e-9;

/// Result of joining the meeting table with the rate history.
#[derive(Debug, Clone, Default)]
pub struct JoinOutcome {
    pub events: Vec<MeetingEvent>,
    /// Meetings with no observation on their date (dropped).
    pub dropped: Vec<MeetingRecord>,
    /// Joined meetings whose own rate cell was blank or not numeric.
    pub unresolved: usize,
    /// Joined meetings whose own rate cell disagrees with the observation.
    pub mismatched: usize,
}

/// Inner-join on date, in meeting order.
///
/// Each event takes the observed rate, so its `(date, rate)` pair always
/// exists in the series. A meeting date that appears several times in the
/// rate history yields one event per observation.
pub fn inner_join(meetings: &[MeetingRecord], observations: &[RateObservation]) -> JoinOutcome {
    let mut by_date: HashMap<NaiveDate, Vec<f64>> = HashMap::new();
    for obs in observations {
        by_date.entry(obs.date).or_default().push(obs.rate);
    }

    let mut out = JoinOutcome::default();
    for meeting in meetings {
        let Some(rates) = by_date.get(&meeting.date) else {
            out.dropped.push(meeting.clone());
            continue;
        };

        match meeting.rate {
            None => out.unresolved += 1,
            Some(own) if rates.iter().all(|r| (r - own).abs() > RATE_TOLERANCE) => out.mismatched += 1,
            Some(_) => {}
        }

        for &rate in rates {
            out.events.push(MeetingEvent {
                date: meeting.date,
                sentiment: meeting.sentiment.clone(),
                rate,
                summary: meeting.summary.clone(),
            });
        }
    }
    out
}
