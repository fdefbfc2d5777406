//! Chart data series
//!
//! The dashboard draws three charts. This module only produces the series
//! (label and count per point); rendering is up to the frontend.

use serde::Serialize;

use crate::models::{Column, Dataset};
use crate::stats::{top_n, value_counts, ValueCount};

/// Title used in place of a chart whose column is missing
pub const UNAVAILABLE_TITLE: &str = "Dados não disponíveis";

/// Bars shown on each ranking chart
pub const CHART_TOP_N: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Pie,
    Bar,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub count: usize,
}

impl From<ValueCount> for ChartPoint {
    fn from(vc: ValueCount) -> Self {
        Self {
            label: vc.value,
            count: vc.count,
        }
    }
}

/// One chart's data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub title: String,
    pub kind: ChartKind,
    pub points: Vec<ChartPoint>,
    /// False when the dataset lacks the column this chart is built from
    pub available: bool,
}

impl ChartSeries {
    fn unavailable(kind: ChartKind) -> Self {
        Self {
            title: UNAVAILABLE_TITLE.to_string(),
            kind,
            points: vec![],
            available: false,
        }
    }

    fn from_counts(title: &str, kind: ChartKind, counts: Vec<ValueCount>) -> Self {
        Self {
            title: title.to_string(),
            kind,
            points: counts.into_iter().map(ChartPoint::from).collect(),
            available: true,
        }
    }
}

/// The three dashboard charts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardCharts {
    pub gender: ChartSeries,
    pub neighborhoods: ChartSeries,
    pub sanitized_items: ChartSeries,
}

/// Build every chart series for `dataset`
pub fn build_charts(dataset: &Dataset) -> DashboardCharts {
    DashboardCharts {
        gender: gender_chart(dataset),
        neighborhoods: ranking_chart(dataset, Column::Neighborhood, "Top 10 Bairros"),
        sanitized_items: ranking_chart(
            dataset,
            Column::SanitizedItems,
            "Top 10 Itens Higienizados",
        ),
    }
}

/// Pie of every gender value
pub fn gender_chart(dataset: &Dataset) -> ChartSeries {
    if !dataset.has(Column::Gender) {
        return ChartSeries::unavailable(ChartKind::Pie);
    }
    ChartSeries::from_counts(
        "Distribuição por Sexo",
        ChartKind::Pie,
        value_counts(dataset.text_values(Column::Gender)),
    )
}

fn ranking_chart(dataset: &Dataset, column: Column, title: &str) -> ChartSeries {
    if !dataset.has(column) {
        return ChartSeries::unavailable(ChartKind::Bar);
    }
    ChartSeries::from_counts(
        title,
        ChartKind::Bar,
        top_n(dataset.text_values(column), CHART_TOP_N),
    )
}
