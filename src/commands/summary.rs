//! Summary command implementation
//!
//! Runs the fetch and grouping pipeline once and prints the grouped series,
//! either as readable text or as JSON for scripting.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::fmt::Write;
use tracing::info;

use reqlog_dash::{
    config::Config,
    logs::{group_by_request_name, DataSource, GroupedSeries, LogFetcher, SeriesGroup},
};

#[derive(Debug, Serialize)]
struct SummaryReport<'a> {
    source: DataSource,
    groups: &'a [SeriesGroup],
}

/// Execute the summary command
pub async fn execute(cfg: &Config, format: &str) -> Result<()> {
    validate_format(format)?;

    let fetcher = LogFetcher::new(&cfg.source)?;
    let outcome = fetcher.fetch().await?;
    let series = group_by_request_name(&outcome.records, &cfg.dashboard.date_format);

    info!(
        records = outcome.records.len(),
        groups = series.len(),
        "Summary ready"
    );

    let output = match format {
        "json" => render_json(outcome.source, &series)?,
        _ => render_text(outcome.source, &series),
    };
    print!("{}", output);

    Ok(())
}

fn validate_format(format: &str) -> Result<()> {
    match format {
        "text" | "json" => Ok(()),
        _ => anyhow::bail!("Invalid format: '{}'. Must be one of: text, json", format),
    }
}

fn render_json(source: DataSource, series: &GroupedSeries) -> Result<String> {
    let report = SummaryReport {
        source,
        groups: series.groups(),
    };
    let mut json = serde_json::to_string_pretty(&report)?;
    json.push('\n');
    Ok(json)
}

fn render_text(source: DataSource, series: &GroupedSeries) -> String {
    let mut out = String::new();

    if source == DataSource::Sample {
        let _ = writeln!(out, "{}", "Warning: using sample data".yellow().bold());
        let _ = writeln!(out);
    }

    if series.is_empty() {
        let _ = writeln!(out, "{}", "No data to display".dimmed());
        return out;
    }

    for group in series.groups() {
        let _ = writeln!(
            out,
            "{} ({} points)",
            group.request_name.cyan().bold(),
            group.points.len()
        );
        for point in &group.points {
            let status = point.status_code.to_string();
            let status = if (200..300).contains(&point.status_code) {
                status.green()
            } else {
                status.red()
            };
            let _ = writeln!(
                out,
                "  {:<12} {:>10.0} ms  {}",
                point.date, point.execution_time, status
            );
        }
        let _ = writeln!(out);
    }

    out
}
