//! Chart specs
//!
//! Three charts per run: pitch usage by bucket, and velocity and spin by
//! game date. Missing usage cells become gaps, not zeros.

use serde::Serialize;

use super::ChartStyle;
use crate::analysis::PitchTypeCatalog;
use crate::pipeline::Analysis;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: String,
    /// `None` draws a gap
    pub y: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: String,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend_title: String,
    pub marker: Option<String>,
    pub grid: bool,
    pub size: [f64; 2],
    pub series: Vec<ChartSeries>,
}

impl ChartSpec {
    fn new(title: String, x_label: &str, y_label: &str, size: [f64; 2], style: &ChartStyle) -> Self {
        ChartSpec {
            title,
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            legend_title: style.legend_title.clone(),
            marker: Some(style.marker.clone()).filter(|m| !m.is_empty()),
            grid: style.grid,
            size,
            series: Vec::new(),
        }
    }
}

fn usage_chart(analysis: &Analysis, catalog: &PitchTypeCatalog, style: &ChartStyle) -> ChartSpec {
    let mut chart = ChartSpec::new(
        format!(
            "{}: Pitch Usage Evolution ({})",
            analysis.player.name, analysis.window.year
        ),
        analysis.strategy.axis_label(),
        "Number of Pitches",
        style.usage_size,
        style,
    );

    chart.series = analysis
        .usage
        .pitch_types
        .iter()
        .map(|code| ChartSeries {
            name: catalog.display_name(code).to_string(),
            points: analysis
                .usage
                .column(code)
                .into_iter()
                .map(|(bucket, count)| ChartPoint {
                    x: bucket.to_string(),
                    y: count.map(f64::from),
                })
                .collect(),
        })
        .collect();
    chart
}

fn series_chart<F>(
    analysis: &Analysis,
    catalog: &PitchTypeCatalog,
    style: &ChartStyle,
    title: &str,
    y_label: &str,
    value: F,
) -> ChartSpec
where
    F: Fn(&crate::analysis::SeriesPoint) -> f64,
{
    let mut chart = ChartSpec::new(
        format!("{}: {} ({})", analysis.player.name, title, analysis.window.year),
        "Date",
        y_label,
        style.series_size,
        style,
    );

    chart.series = analysis
        .daily
        .iter()
        .map(|s| ChartSeries {
            name: catalog.display_name(&s.pitch_type).to_string(),
            points: s
                .points
                .iter()
                .map(|p| ChartPoint {
                    x: p.date.format("%Y-%m-%d").to_string(),
                    y: Some(value(p)),
                })
                .collect(),
        })
        .collect();
    chart
}

/// Usage, velocity and spin charts, in that order
pub fn build_charts(
    analysis: &Analysis,
    catalog: &PitchTypeCatalog,
    style: &ChartStyle,
) -> Vec<ChartSpec> {
    vec![
        usage_chart(analysis, catalog, style),
        series_chart(
            analysis,
            catalog,
            style,
            "Pitch Velocity Over Time",
            "Velocity (mph)",
            |p| p.avg_velocity,
        ),
        series_chart(
            analysis,
            catalog,
            style,
            "Pitch Spin Rate Over Time",
            "Spin Rate (rpm)",
            |p| p.avg_spin,
        ),
    ]
}
