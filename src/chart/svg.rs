//! Static SVG rendering of a `ChartSpec` with Plotters.
//!
//! The browser view is the interactive one; this is the same chart drawn
//! once, for `/chart.svg` and `fomc-dash export --svg`. Dates are mapped to
//! day numbers on the x axis and formatted back for tick labels.

use chrono::{Datelike, NaiveDate};
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::chart::ChartSpec;
use crate::error::AppError;

const LINE_COLOR: RGBColor = RGBColor(0, 0, 255);
const MARKER_COLOR: RGBColor = RGBColor(128, 128, 128);
const GRID_COLOR: RGBColor = RGBColor(235, 240, 248);
const ARROW_COLOR: RGBColor = RGBColor(99, 99, 99);

pub const DEFAULT_WIDTH: u32 = 1200;
pub const DEFAULT_HEIGHT: u32 = 600;

/// Render the chart to an SVG document.
pub fn render_svg(spec: &ChartSpec, width: u32, height: u32) -> Result<String, AppError> {
    if width < 200 || height < 150 {
        return Err(AppError::render(format!(
            "Chart size {width}x{height} is too small (minimum 200x150)."
        )));
    }

    let bounds = Bounds::of(spec);
    let mut out = String::new();
    {
        let root = SVGBackend::with_string(&mut out, (width, height)).into_drawing_area();
        draw(&root, spec, &bounds).map_err(|e| AppError::render(format!("Failed to render chart SVG: {e}")))?;
        root.present()
            .map_err(|e| AppError::render(format!("Failed to finish chart SVG: {e}")))?;
    }
    Ok(out)
}

/// Axis ranges covering the line and every marker, padded so labels fit.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Bounds {
    x: [f64; 2],
    y: [f64; 2],
}

impl Bounds {
    fn of(spec: &ChartSpec) -> Self {
        let points = spec
            .line
            .points
            .iter()
            .map(|p| (p.date, p.rate))
            .chain(spec.markers.iter().map(|m| (m.date, m.rate)));

        let mut x = [f64::INFINITY, f64::NEG_INFINITY];
        let mut y = [f64::INFINITY, f64::NEG_INFINITY];
        for (date, rate) in points {
            let d = day_number(date);
            x = [x[0].min(d), x[1].max(d)];
            if rate.is_finite() {
                y = [y[0].min(rate), y[1].max(rate)];
            }
        }

        if !(x[0].is_finite() && x[1].is_finite()) {
            x = [0.0, 1.0];
        }
        if x[1] - x[0] < 1.0 {
            x = [x[0] - 15.0, x[1] + 15.0];
        }
        if !(y[0].is_finite() && y[1].is_finite()) {
            y = [0.0, 1.0];
        }
        // Headroom above the highest point for the annotation boxes.
        let pad = ((y[1] - y[0]) * 0.1).max(0.25);
        Self {
            x,
            y: [y[0] - pad, y[1] + pad * 2.0],
        }
    }
}

fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    bounds: &Bounds,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, ("sans-serif", 20))
        .margin(12)
        .set_label_area_size(LabelAreaPosition::Left, 50)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(bounds.x[0]..bounds.x[1], bounds.y[0]..bounds.y[1])?;

    chart
        .configure_mesh()
        .x_desc(&spec.x_title)
        .y_desc(&spec.y_title)
        .x_labels(8)
        .y_labels(6)
        .x_label_formatter(&|v| format_day(*v))
        .y_label_formatter(&|v| format!("{v:.2}"))
        .light_line_style(&GRID_COLOR)
        .draw()?;

    chart.draw_series(LineSeries::new(
        spec.line.points.iter().map(|p| (day_number(p.date), p.rate)),
        &LINE_COLOR,
    ))?;

    chart.draw_series(
        spec.markers
            .iter()
            .map(|m| Circle::new((day_number(m.date), m.rate), 4, MARKER_COLOR.filled())),
    )?;

    // Annotation boxes sit 30px above their point with a short arrow,
    // mirroring the browser layout.
    chart.draw_series(spec.annotations.iter().map(|a| {
        let (r, g, b) = a.color.rgb();
        let fill = RGBColor(r, g, b).mix(0.8);
        let half = 4 + 4 * a.label.chars().count() as i32;
        EmptyElement::at((day_number(a.date), a.rate))
            + PathElement::new(vec![(0, -4), (0, -18)], ARROW_COLOR.stroke_width(2))
            + Rectangle::new([(-half, -34), (half, -18)], fill.filled())
            + Text::new(
                a.label.clone(),
                (-half + 4, -32),
                ("monospace", 12).into_font().color(&WHITE),
            )
    }))?;

    Ok(())
}

fn day_number(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

fn format_day(value: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(value.round() as i32)
        .map(|d| d.format("%Y-%m").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::build_chart;
    use crate::data::RateSeries;
    use crate::domain::{MeetingEvent, RateObservation, Sentiment};

    fn spec(with_event: bool) -> ChartSpec {
        let d1 = NaiveDate::from_ymd_opt(2023, 3, 22).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2023, 7, 26).unwrap();
        let series = RateSeries::new(vec![
            RateObservation { date: d1, rate: 4.75 },
            RateObservation { date: d2, rate: 5.25 },
        ]);
        let events = if with_event {
            vec![MeetingEvent {
                date: d1,
                sentiment: Sentiment::Hawkish,
                rate: 4.75,
                summary: "Rate held steady".to_string(),
            }]
        } else {
            Vec::new()
        };
        build_chart(&series, &events)
    }

    #[test]
    fn renders_svg_document() {
        let svg = render_svg(&spec(true), DEFAULT_WIDTH, DEFAULT_HEIGHT).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
    }

    #[test]
    fn renders_line_only_chart() {
        let svg = render_svg(&spec(false), 640, 480).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn rejects_tiny_canvas() {
        let err = render_svg(&spec(true), 10, 10).unwrap_err();
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn bounds_pad_single_day_range() {
        let d = NaiveDate::from_ymd_opt(2023, 3, 22).unwrap();
        let series = RateSeries::new(vec![RateObservation { date: d, rate: 4.75 }]);
        let bounds = Bounds::of(&build_chart(&series, &[]));
        assert!(bounds.x[1] - bounds.x[0] >= 30.0);
        assert!(bounds.y[0] < 4.75 && bounds.y[1] > 4.75);
    }

    #[test]
    fn day_labels_round_trip() {
        let d = NaiveDate::from_ymd_opt(2023, 3, 22).unwrap();
        assert_eq!(format_day(day_number(d)), "2023-03");
    }
}
