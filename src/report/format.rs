//! Terminal output: box table, JSON and CSV

use serde::Serialize;

use super::charts::{build_charts, ChartSpec};
use super::ChartStyle;
use crate::analysis::{PitchTypeCatalog, UsageTable};
use crate::pipeline::Analysis;
use crate::{PitchError, Result};

/// Lay out rows with the first column left-aligned and the rest right-aligned
fn columns(header: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| {
        let parts: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                if i == 0 {
                    format!("{:<width$}", cell, width = widths[i])
                } else {
                    format!("{:>width$}", cell, width = widths[i])
                }
            })
            .collect();
        format!("  {}\n", parts.join("  ").trim_end())
    };

    let mut out = line(header);
    let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
    out.push_str(&line(&rule));
    for row in rows {
        out.push_str(&line(row));
    }
    out
}

fn usage_rows(usage: &UsageTable) -> Vec<Vec<String>> {
    usage
        .rows
        .iter()
        .map(|row| {
            std::iter::once(row.bucket.to_string())
                .chain(row.counts.iter().map(|c| match c {
                    Some(n) => n.to_string(),
                    None => "-".to_string(),
                }))
                .collect()
        })
        .collect()
}

/// Human-readable report
pub fn render_table(analysis: &Analysis) -> String {
    let summary = &analysis.summary;
    let mut out = format!(
        r#"
┌─────────────────────────────────────────────────┐
│  {} ({})
│  Season {}: {} to {}
├─────────────────────────────────────────────────┤
│  Appearances:       {}
│  Innings pitched:   {:.3} ({} IP)
│  Pitches analyzed:  {} of {}
└─────────────────────────────────────────────────┘

"#,
        analysis.player.name,
        analysis.player.id,
        analysis.window.year,
        analysis.window.start,
        analysis.window.end,
        summary.appearances,
        summary.innings_pitched,
        summary.innings_notation(),
        analysis.cleaning.kept,
        analysis.cleaning.total,
    );

    let header: Vec<String> = ["Pitch", "Name", "Count", "Velo (mph)", "Spin (rpm)"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let rows: Vec<Vec<String>> = summary
        .pitch_types
        .iter()
        .map(|p| {
            vec![
                p.pitch_type.clone(),
                p.display_name.clone(),
                p.count.to_string(),
                format!("{:.1}", p.avg_velocity),
                format!("{:.0}", p.avg_spin),
            ]
        })
        .collect();
    out.push_str(&columns(&header, &rows));

    out.push_str(&format!(
        "\nPitch usage by {} ({})\n",
        analysis.strategy.axis_label().to_lowercase(),
        analysis.strategy
    ));
    let header: Vec<String> = std::iter::once(analysis.strategy.axis_label().to_string())
        .chain(analysis.usage.pitch_types.iter().cloned())
        .collect();
    out.push_str(&columns(&header, &usage_rows(&analysis.usage)));
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    analysis: &'a Analysis,
    charts: Vec<ChartSpec>,
}

/// Full analysis plus chart specs as pretty JSON
pub fn render_json(
    analysis: &Analysis,
    catalog: &PitchTypeCatalog,
    style: &ChartStyle,
) -> Result<String> {
    let report = JsonReport {
        analysis,
        charts: build_charts(analysis, catalog, style),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Usage matrix as CSV; missing cells are left empty
pub fn render_usage_csv(usage: &UsageTable) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["bucket".to_string()];
    header.extend(usage.pitch_types.iter().cloned());
    writer.write_record(&header)?;

    for row in &usage.rows {
        let mut record = vec![row.bucket.to_string()];
        record.extend(row.counts.iter().map(|c| c.map(|n| n.to_string()).unwrap_or_default()));
        writer.write_record(&record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| PitchError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| PitchError::Parse(e.to_string()))
}
