//! Summary command - chart series and a table page

use std::path::Path;

use anyhow::{Context, Result};

use clientele_core::{ChartSeries, DashboardView, PageRequest, TablePage};

use super::{describe_filter, open_dashboard, truncate};
use crate::cli::FilterArgs;

/// Widest a table cell is printed
const MAX_CELL_WIDTH: usize = 24;

pub fn cmd_summary(
    data_path: &Path,
    args: &FilterArgs,
    page: usize,
    page_size: usize,
    json: bool,
) -> Result<()> {
    let dashboard = open_dashboard(data_path);
    let filter = args.to_filter();
    let view = dashboard
        .view(&filter, &PageRequest::new(page, page_size))
        .context("Failed to build dashboard view")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", format_summary(&view));
    }

    Ok(())
}

/// Human-readable summary of a dashboard view
pub fn format_summary(view: &DashboardView) -> String {
    let mut out = String::new();
    out.push_str(&format!("📊 Dashboard ({})\n", describe_filter(&view.filter)));
    out.push_str(&format!(
        "   {} of {} rows\n\n",
        view.filtered_rows, view.total_rows
    ));

    for chart in [
        &view.charts.gender,
        &view.charts.neighborhoods,
        &view.charts.sanitized_items,
    ] {
        out.push_str(&format_chart(chart));
        out.push('\n');
    }

    out.push_str(&format_table(&view.table));
    out
}

pub fn format_chart(chart: &ChartSeries) -> String {
    let mut out = format!("{}\n", chart.title);
    if !chart.available {
        return out;
    }
    let width = chart
        .points
        .iter()
        .map(|p| p.label.chars().count())
        .max()
        .unwrap_or(0);
    for point in &chart.points {
        let pad = width - point.label.chars().count();
        out.push_str(&format!(
            "  {}{}  {:>4}\n",
            point.label,
            " ".repeat(pad),
            point.count
        ));
    }
    out
}

pub fn format_table(table: &TablePage) -> String {
    let mut out = String::new();
    if table.total_pages == 0 {
        out.push_str("(sem linhas)\n");
        return out;
    }

    out.push_str(&format!(
        "Página {} de {} ({} por página)\n",
        table.page + 1,
        table.total_pages,
        table.page_size
    ));
    out.push_str(&table.columns.join(" | "));
    out.push('\n');
    for row in &table.rows {
        let cells: Vec<String> = row
            .iter()
            .map(|cell| truncate(&cell.value, MAX_CELL_WIDTH))
            .collect();
        out.push_str(&cells.join(" | "));
        out.push('\n');
    }
    out
}
