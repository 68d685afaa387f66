//! Plotly figure encoding.
//!
//! The page hands this JSON straight to `Plotly.react`, so field names follow
//! Plotly's schema rather than Rust conventions.

use serde::Serialize;

use crate::chart::{Annotation, ChartSpec, Marker, MarkerPayload};
use crate::domain::DATE_FMT;

const MARKER_SIZE: u32 = 8;
const MARKER_COLOR: &str = "gray";
const GRID_COLOR: &str = "#ebf0f8";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Trace {
    Line(LineTraceJson),
    Marker(MarkerTraceJson),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineTraceJson {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub mode: &'static str,
    pub name: String,
    pub line: LineStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerTraceJson {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub x: [String; 1],
    pub y: [f64; 1],
    pub mode: &'static str,
    pub marker: MarkerStyle,
    pub showlegend: bool,
    pub hoverinfo: &'static str,
    pub hovertext: String,
    /// One payload per point; Plotly returns it as `points[i].customdata`.
    pub customdata: [MarkerPayload; 1],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerStyle {
    pub size: u32,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Title,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub annotations: Vec<AnnotationJson>,
    pub hovermode: &'static str,
    pub plot_bgcolor: &'static str,
    pub paper_bgcolor: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Title,
    pub gridcolor: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub family: &'static str,
    pub size: u32,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotationJson {
    pub x: String,
    pub y: f64,
    pub xref: &'static str,
    pub yref: &'static str,
    pub text: String,
    pub showarrow: bool,
    pub font: Font,
    pub align: &'static str,
    pub arrowhead: u32,
    pub arrowsize: u32,
    pub arrowwidth: u32,
    pub arrowcolor: &'static str,
    pub ax: i32,
    pub ay: i32,
    pub bordercolor: &'static str,
    pub borderwidth: u32,
    pub borderpad: u32,
    pub bgcolor: &'static str,
    pub opacity: f64,
}

impl ChartSpec {
    /// Encode as a Plotly figure: the line first, then one trace per marker.
    pub fn to_figure(&self) -> Figure {
        let mut data = Vec::with_capacity(self.trace_count());
        data.push(Trace::Line(LineTraceJson {
            kind: "scatter",
            x: self
                .line
                .points
                .iter()
                .map(|p| p.date.format(DATE_FMT).to_string())
                .collect(),
            y: self.line.points.iter().map(|p| p.rate).collect(),
            mode: "lines",
            name: self.line.name.clone(),
            line: LineStyle {
                color: self.line.color.clone(),
            },
        }));
        data.extend(self.markers.iter().map(|m| Trace::Marker(marker_trace(m))));

        Figure {
            data,
            layout: Layout {
                title: Title {
                    text: self.title.clone(),
                },
                xaxis: axis(&self.x_title),
                yaxis: axis(&self.y_title),
                annotations: self.annotations.iter().map(annotation).collect(),
                hovermode: "closest",
                plot_bgcolor: "white",
                paper_bgcolor: "white",
            },
        }
    }
}

fn axis(title: &str) -> Axis {
    Axis {
        title: Title {
            text: title.to_string(),
        },
        gridcolor: GRID_COLOR,
    }
}

fn marker_trace(marker: &Marker) -> MarkerTraceJson {
    MarkerTraceJson {
        kind: "scatter",
        x: [marker.payload.date.clone()],
        y: [marker.rate],
        mode: "markers",
        marker: MarkerStyle {
            size: MARKER_SIZE,
            color: MARKER_COLOR,
        },
        showlegend: false,
        hoverinfo: "text",
        hovertext: marker.hover_text.clone(),
        customdata: [marker.payload.clone()],
    }
}

fn annotation(a: &Annotation) -> AnnotationJson {
    AnnotationJson {
        x: a.date.format(DATE_FMT).to_string(),
        y: a.rate,
        xref: "x",
        yref: "y",
        text: a.label.clone(),
        showarrow: true,
        font: Font {
            family: "Courier New, monospace",
            size: 10,
            color: "#ffffff",
        },
        align: "center",
        arrowhead: 2,
        arrowsize: 1,
        arrowwidth: 2,
        arrowcolor: "#636363",
        ax: 0,
        ay: -30,
        bordercolor: "#c7c7c7",
        borderwidth: 2,
        borderpad: 4,
        bgcolor: a.color.css_name(),
        opacity: 0.8,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::chart::build_chart;
    use crate::data::RateSeries;
    use crate::domain::{MeetingEvent, RateObservation, Sentiment};

    fn fixture(with_events: bool) -> (RateSeries, Vec<MeetingEvent>) {
        let d = NaiveDate::from_ymd_opt(2023, 3, 22).unwrap();
        let series = RateSeries::new(vec![RateObservation { date: d, rate: 4.75 }]);
        let events = if with_events {
            vec![MeetingEvent {
                date: d,
                sentiment: Sentiment::Dovish,
                rate: 4.75,
                summary: "Rate held steady".to_string(),
            }]
        } else {
            Vec::new()
        };
        (series, events)
    }

    #[test]
    fn figure_carries_payload_as_customdata() {
        let (series, events) = fixture(true);
        let value = serde_json::to_value(build_chart(&series, &events).to_figure()).unwrap();

        let data = value["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["mode"], "lines");
        assert_eq!(data[0]["x"][0], "2023-03-22");
        assert_eq!(data[1]["customdata"][0]["summary"], "Rate held steady");
        assert_eq!(data[1]["customdata"][0]["sentiment"], "D");
        assert_eq!(data[1]["marker"]["color"], "gray");

        let annotations = value["layout"]["annotations"].as_array().unwrap();
        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0]["bgcolor"], "blue");
        assert_eq!(annotations[0]["text"], "D");
        assert_eq!(annotations[0]["ay"], -30);
        assert_eq!(value["layout"]["hovermode"], "closest");
    }

    #[test]
    fn empty_figure_has_single_trace() {
        let (series, events) = fixture(false);
        let figure = build_chart(&series, &events).to_figure();
        assert_eq!(figure.data.len(), 1);
        assert!(figure.layout.annotations.is_empty());
    }

    #[test]
    fn figure_json_is_byte_identical_across_builds() {
        let (series, events) = fixture(true);
        let a = build_chart(&series, &events).to_figure().to_json().unwrap();
        let b = build_chart(&series, &events).to_figure().to_json().unwrap();
        assert_eq!(a, b);
    }
}
