//! Chart construction.
//!
//! `build_chart` turns the rate series and the joined meeting events into a
//! `ChartSpec`: one continuous line, one marker per event and one labelled
//! annotation per event. A `ChartSpec` is plain data; drawing it is left
//! to the consumers:
//!
//! - `figure`: Plotly figure JSON for the browser page
//! - `svg`: a static rendering drawn with Plotters

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::RateSeries;
use crate::domain::{DATE_FMT, MeetingEvent, RateObservation, Sentiment};

pub mod figure;
pub mod svg;

pub use figure::Figure;
pub use svg::render_svg;

pub const CHART_TITLE: &str = "Fed Funds Target Rate Against FOMC Announcement";
pub const X_TITLE: &str = "Date";
pub const Y_TITLE: &str = "FDTR Index";
pub const LINE_NAME: &str = "FDTR Index";

/// Background color of an event annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationColor {
    Blue,
    Red,
    Green,
}

impl AnnotationColor {
    /// `D` is blue, `H` is red, every other label is green.
    pub fn for_sentiment(sentiment: &Sentiment) -> Self {
        match sentiment {
            Sentiment::Dovish => AnnotationColor::Blue,
            Sentiment::Hawkish => AnnotationColor::Red,
            Sentiment::Other(_) => AnnotationColor::Green,
        }
    }

    pub fn css_name(self) -> &'static str {
        match self {
            AnnotationColor::Blue => "blue",
            AnnotationColor::Red => "red",
            AnnotationColor::Green => "green",
        }
    }

    /// RGB triple matching the CSS color name.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            AnnotationColor::Blue => (0, 0, 255),
            AnnotationColor::Red => (255, 0, 0),
            AnnotationColor::Green => (0, 128, 0),
        }
    }
}

/// Data attached to a marker and handed back by the page on hover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerPayload {
    pub summary: String,
    pub date: String,
    pub rate: f64,
    pub sentiment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineTrace {
    pub name: String,
    pub color: String,
    pub points: Vec<RateObservation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub date: NaiveDate,
    pub rate: f64,
    pub hover_text: String,
    pub payload: MarkerPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub date: NaiveDate,
    pub rate: f64,
    pub label: String,
    pub color: AnnotationColor,
}

/// Declarative description of the dashboard chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub line: LineTrace,
    pub markers: Vec<Marker>,
    pub annotations: Vec<Annotation>,
}

impl ChartSpec {
    /// The line plus one trace per marker.
    pub fn trace_count(&self) -> usize {
        1 + self.markers.len()
    }
}

/// Build the chart for the current dataset.
///
/// Pure: the output depends only on the inputs, and is rebuilt on every
/// refresh request.
pub fn build_chart(series: &RateSeries, events: &[MeetingEvent]) -> ChartSpec {
    let line = LineTrace {
        name: LINE_NAME.to_string(),
        color: "blue".to_string(),
        points: series.observations().to_vec(),
    };

    let mut markers = Vec::with_capacity(events.len());
    let mut annotations = Vec::with_capacity(events.len());

    for (row, event) in events.iter().enumerate() {
        let date = event.date.format(DATE_FMT).to_string();
        let label = event.sentiment.label();
        debug!(row, date = %date, label, rate = event.rate, "chart event");

        markers.push(Marker {
            date: event.date,
            rate: event.rate,
            hover_text: format!("Date: {date}<br>Rate: {:.2}%<br>Sentiment: {label}", event.rate),
            payload: MarkerPayload {
                summary: event.summary.clone(),
                date,
                rate: event.rate,
                sentiment: label.to_string(),
            },
        });

        annotations.push(Annotation {
            date: event.date,
            rate: event.rate,
            label: label.to_string(),
            color: AnnotationColor::for_sentiment(&event.sentiment),
        });
    }

    ChartSpec {
        title: CHART_TITLE.to_string(),
        x_title: X_TITLE.to_string(),
        y_title: Y_TITLE.to_string(),
        line,
        markers,
        annotations,
    }
}
