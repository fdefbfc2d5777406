//! Dashboard handlers
//!
//! Every endpoint takes the same filter parameters and recomputes its
//! output from the dataset loaded at startup.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};

use super::escape_html;
use crate::{AppError, AppState};
use clientele_core::{
    DashboardCharts, DashboardView, DataSource, Filter, FilterOptions, InsightReport,
    PageRequest, TablePage, ALL, PAGE_SIZES,
};
use clientele_core::table::DEFAULT_PAGE_SIZE;

/// Query parameters shared by the dashboard endpoints
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// Gender filter (`all` or absent for no filter)
    pub gender: Option<String>,
    /// Neighborhood filter (`all` or absent for no filter)
    pub neighborhood: Option<String>,
    /// 0-based table page
    #[serde(default)]
    pub page: usize,
    /// Rows per table page (5, 10 or 20)
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl DashboardQuery {
    fn filter(&self) -> Filter {
        Filter::from_params(self.gender.as_deref(), self.neighborhood.as_deref())
    }

    fn page(&self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }
}

/// Response for GET /api/options
#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    /// Sentinel value meaning "no filter"
    pub all: &'static str,
    #[serde(flatten)]
    pub options: FilterOptions,
    pub page_sizes: [usize; 3],
    pub source: SourceInfo,
}

/// Where the data came from, without server filesystem details
#[derive(Debug, Serialize)]
pub struct SourceInfo {
    /// `file`, `example` or `memory`
    pub kind: &'static str,
    /// Bare file name when loaded from a file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl From<&DataSource> for SourceInfo {
    fn from(source: &DataSource) -> Self {
        match source {
            DataSource::File { path } => Self {
                kind: "file",
                file_name: path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned()),
            },
            DataSource::Example { .. } => Self {
                kind: "example",
                file_name: None,
            },
            DataSource::Memory => Self {
                kind: "memory",
                file_name: None,
            },
        }
    }
}

/// Response for GET /api/insights
#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    pub filter: Filter,
    pub lines: Vec<String>,
    pub complete: bool,
}

impl InsightsResponse {
    fn new(filter: Filter, report: InsightReport) -> Self {
        let complete = report.is_complete();
        Self {
            filter,
            lines: report.into_lines(),
            complete,
        }
    }
}

/// GET / - Minimal page listing the unfiltered insights
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let items: String = state
        .dashboard
        .insights(&Filter::new())
        .into_lines()
        .iter()
        .map(|line| format!("<li>{}</li>\n", escape_html(line)))
        .collect();

    Html(format!(
        r#"<!doctype html>
<html lang="pt-BR">
<head><meta charset="utf-8"><title>Clientele</title></head>
<body>
<h1>Dashboard de Clientes</h1>
<ul>
{items}</ul>
<p><a href="/api/dashboard">/api/dashboard</a> | <a href="/logout">Sair</a></p>
</body>
</html>"#
    ))
}

/// GET /api/options - Dropdown values for the filters
pub async fn get_options(State(state): State<Arc<AppState>>) -> Json<OptionsResponse> {
    Json(OptionsResponse {
        all: ALL,
        options: state.dashboard.options().clone(),
        page_sizes: PAGE_SIZES,
        source: SourceInfo::from(state.dashboard.source()),
    })
}

/// GET /api/dashboard - Charts, table page and insights in one response
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DashboardQuery>,
) -> Result<Json<DashboardView>, AppError> {
    let view = state
        .dashboard
        .view(&params.filter(), &params.page())
        .map_err(AppError::from_core)?;
    Ok(Json(view))
}

/// GET /api/insights - Insight lines for the filter selection
pub async fn get_insights(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DashboardQuery>,
) -> Json<InsightsResponse> {
    let filter = params.filter();
    let report = state.dashboard.insights(&filter);
    Json(InsightsResponse::new(filter, report))
}

/// GET /api/charts - Chart series for the filter selection
pub async fn get_charts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DashboardQuery>,
) -> Json<DashboardCharts> {
    Json(state.dashboard.charts(&params.filter()))
}

/// GET /api/table - One page of the filtered table
pub async fn get_table(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DashboardQuery>,
) -> Result<Json<TablePage>, AppError> {
    let page = state
        .dashboard
        .table(&params.filter(), &params.page())
        .map_err(AppError::from_core)?;
    Ok(Json(page))
}
