//! Hover resolution.
//!
//! The page posts Plotly's hover data (or `null` when the pointer leaves the
//! chart). `resolve_hover` turns it into the text shown in the detail panel:
//!
//! - no event, no points, or a point without custom data (the rate line):
//!   the instructional placeholder
//! - a marker: date and rate from the point's own coordinates, the summary
//!   from its payload, and the sentiment looked up again by exact date match

use serde::{Deserialize, Serialize};

use crate::chart::MarkerPayload;
use crate::domain::MeetingEvent;

pub const PLACEHOLDER: &str = "Hover over a marker to see FOMC meeting summary.";

/// Sentiment shown when the hovered date matches no meeting.
pub const MISSING_SENTIMENT: &str = "N/A";

/// Plotly `hoverData`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HoverEvent {
    #[serde(default)]
    pub points: Vec<HoverPoint>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HoverPoint {
    pub x: String,
    pub y: f64,
    #[serde(default)]
    pub customdata: Option<CustomData>,
}

/// Custom data attached to a hovered point.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CustomData {
    Marker(MarkerPayload),
    /// A bare value is taken as the summary itself.
    Text(String),
}

impl CustomData {
    pub fn summary(&self) -> &str {
        match self {
            CustomData::Marker(payload) => &payload.summary,
            CustomData::Text(text) => text,
        }
    }
}

/// The four display lines for a hovered marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoverDetail {
    pub date: String,
    pub rate: f64,
    pub sentiment: String,
    pub summary: String,
}

impl HoverDetail {
    pub fn lines(&self) -> [String; 4] {
        [
            format!("Date: {}", self.date),
            format!("Rate: {:.2}%", self.rate),
            format!("Sentiment: {}", self.sentiment),
            format!("Summary: {}", self.summary),
        ]
    }
}

/// Primary panel content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum HoverPanel {
    Placeholder { text: String },
    Detail { lines: [String; 4] },
}

/// Both outputs updated by a hover event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoverResponse {
    pub primary: HoverPanel,
    pub diagnostic: String,
}

impl HoverResponse {
    pub fn placeholder() -> Self {
        Self::placeholder_with(String::new())
    }

    /// Placeholder panel with a diagnostic message (e.g. a decode error).
    pub fn placeholder_with(diagnostic: impl Into<String>) -> Self {
        Self {
            primary: HoverPanel::Placeholder {
                text: PLACEHOLDER.to_string(),
            },
            diagnostic: diagnostic.into(),
        }
    }

    pub fn detail(detail: &HoverDetail) -> Self {
        Self {
            primary: HoverPanel::Detail { lines: detail.lines() },
            diagnostic: String::new(),
        }
    }
}

/// Resolve a hover event against the joined events.
pub fn resolve_hover(event: Option<&HoverEvent>, events: &[MeetingEvent]) -> HoverResponse {
    match event.and_then(|e| hover_detail(e, events)) {
        Some(detail) => HoverResponse::detail(&detail),
        None => HoverResponse::placeholder(),
    }
}

/// Only the first point is considered, as Plotly reports the closest one first.
pub fn hover_detail(event: &HoverEvent, events: &[MeetingEvent]) -> Option<HoverDetail> {
    let point = event.points.first()?;
    let customdata = point.customdata.as_ref()?;

    Some(HoverDetail {
        date: point.x.clone(),
        rate: point.y,
        sentiment: sentiment_for(&point.x, events).to_string(),
        summary: customdata.summary().to_string(),
    })
}

/// First event whose ISO date equals `x` exactly, or `N/A`.
///
/// Several meetings on one date resolve to the first one.
pub fn sentiment_for<'a>(x: &str, events: &'a [MeetingEvent]) -> &'a str {
    events
        .iter()
        .find(|e| e.date_label() == x)
        .map(|e| e.sentiment.label())
        .unwrap_or(MISSING_SENTIMENT)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::Sentiment;

    fn events() -> Vec<MeetingEvent> {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
        vec![
            MeetingEvent {
                date: d(2023, 3, 22),
                sentiment: Sentiment::Hawkish,
                rate: 4.75,
                summary: "Rate held steady".to_string(),
            },
            MeetingEvent {
                date: d(2023, 5, 3),
                sentiment: Sentiment::Dovish,
                rate: 5.0,
                summary: "First".to_string(),
            },
            MeetingEvent {
                date: d(2023, 5, 3),
                sentiment: Sentiment::Other("N".to_string()),
                rate: 5.0,
                summary: "Second".to_string(),
            },
        ]
    }

    fn marker_event(x: &str, y: f64) -> HoverEvent {
        HoverEvent {
            points: vec![HoverPoint {
                x: x.to_string(),
                y,
                customdata: Some(CustomData::Marker(MarkerPayload {
                    summary: "Rate held steady".to_string(),
                    date: "2023-03-22".to_string(),
                    rate: 4.75,
                    sentiment: "H".to_string(),
                })),
            }],
        }
    }

    #[test]
    fn no_event_gives_placeholder_and_empty_diagnostic() {
        let response = resolve_hover(None, &events());
        assert_eq!(
            response.primary,
            HoverPanel::Placeholder {
                text: "Hover over a marker to see FOMC meeting summary.".to_string()
            }
        );
        assert_eq!(response.diagnostic, "");
    }

    #[test]
    fn marker_hover_renders_four_lines() {
        let response = resolve_hover(Some(&marker_event("2023-03-22", 4.75)), &events());
        let HoverPanel::Detail { lines } = response.primary else {
            panic!("expected detail panel");
        };
        assert_eq!(
            lines,
            [
                "Date: 2023-03-22".to_string(),
                "Rate: 4.75%".to_string(),
                "Sentiment: H".to_string(),
                "Summary: Rate held steady".to_string(),
            ]
        );
        assert_eq!(response.diagnostic, "");
    }

    #[test]
    fn coordinates_come_from_the_point_not_the_payload() {
        let detail = hover_detail(&marker_event("2023-05-03", 5.0), &events()).unwrap();
        assert_eq!(detail.date, "2023-05-03");
        assert_eq!(detail.lines()[1], "Rate: 5.00%");
        // First match wins for a shared date.
        assert_eq!(detail.sentiment, "D");
    }

    #[test]
    fn unmatched_date_gives_na() {
        let detail = hover_detail(&marker_event("2023-03-21", 4.75), &events()).unwrap();
        assert_eq!(detail.lines()[2], "Sentiment: N/A");

        // Matching is exact, not nearest and not reformatted.
        let detail = hover_detail(&marker_event("2023-3-22", 4.75), &events()).unwrap();
        assert_eq!(detail.sentiment, "N/A");
    }

    #[test]
    fn line_hover_and_empty_points_give_placeholder() {
        let line = HoverEvent {
            points: vec![HoverPoint {
                x: "2023-03-22".to_string(),
                y: 4.75,
                customdata: None,
            }],
        };
        assert_eq!(resolve_hover(Some(&line), &events()), HoverResponse::placeholder());
        let empty = HoverEvent { points: Vec::new() };
        assert_eq!(resolve_hover(Some(&empty), &events()), HoverResponse::placeholder());
    }

    #[test]
    fn decodes_plotly_hover_data() {
        let json = r#"{"points":[{"curveNumber":1,"pointNumber":0,"x":"2023-03-22","y":4.75,
            "customdata":{"summary":"Rate held steady","date":"2023-03-22","rate":4.75,"sentiment":"H"}}]}"#;
        let event: HoverEvent = serde_json::from_str(json).unwrap();
        let detail = hover_detail(&event, &events()).unwrap();
        assert_eq!(detail.summary, "Rate held steady");
    }

    #[test]
    fn bare_text_customdata_is_the_summary() {
        let json = r#"{"points":[{"x":"2023-03-22","y":4.75,"customdata":"Plain summary"}]}"#;
        let event: HoverEvent = serde_json::from_str(json).unwrap();
        let detail = hover_detail(&event, &events()).unwrap();
        assert_eq!(detail.summary, "Plain summary");
        assert_eq!(detail.sentiment, "H");
    }

    #[test]
    fn response_serializes_with_kind_tag() {
        let value = serde_json::to_value(HoverResponse::placeholder()).unwrap();
        assert_eq!(value["primary"]["kind"], "placeholder");
        assert_eq!(value["diagnostic"], "");
    }
}
