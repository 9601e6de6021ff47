//! Presentation adapter
//!
//! Turns an [`Analysis`](crate::pipeline::Analysis) into chart specs for an
//! external renderer, or into text, JSON and CSV for the terminal.

pub mod charts;
pub mod format;

pub use charts::{build_charts, ChartPoint, ChartSeries, ChartSpec};
pub use format::{render_json, render_table, render_usage_csv};

use serde::{Deserialize, Serialize};

/// Chart styling handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    /// Point marker for line series, empty for none
    pub marker: String,
    pub grid: bool,
    pub legend_title: String,
    /// Width and height of the usage chart, in inches
    pub usage_size: [f64; 2],
    /// Width and height of the velocity and spin charts
    pub series_size: [f64; 2],
}

impl Default for ChartStyle {
    fn default() -> Self {
        ChartStyle {
            marker: "o".to_string(),
            grid: true,
            legend_title: "Pitch Type".to_string(),
            usage_size: [10.0, 6.0],
            series_size: [12.0, 5.0],
        }
    }
}
