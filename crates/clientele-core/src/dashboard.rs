//! Dashboard application context
//!
//! Holds the dataset loaded at startup and answers view requests. The
//! dataset is never mutated after load, so a `Dashboard` can be cloned
//! freely and shared across request handlers.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::charts::{build_charts, DashboardCharts};
use crate::error::Result;
use crate::filter::{Filter, FilterOptions};
use crate::insights::{generate_insights, InsightReport};
use crate::loader::{DataSource, LoadOutcome};
use crate::models::Dataset;
use crate::table::{PageRequest, TablePage};

#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: Arc<Dataset>,
    source: DataSource,
    options: FilterOptions,
}

/// Everything the dashboard shows for one filter selection
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub filter: Filter,
    pub total_rows: usize,
    pub filtered_rows: usize,
    pub charts: DashboardCharts,
    pub table: TablePage,
    pub insights: InsightReport,
    pub generated_at: DateTime<Utc>,
}

impl Dashboard {
    pub fn new(outcome: LoadOutcome) -> Self {
        let options = FilterOptions::from_dataset(&outcome.dataset);
        Self {
            dataset: Arc::new(outcome.dataset),
            source: outcome.source,
            options,
        }
    }

    /// Dashboard over an in-memory dataset
    pub fn from_dataset(dataset: Dataset) -> Self {
        Self::new(LoadOutcome {
            dataset,
            source: DataSource::Memory,
        })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// Dropdown values, computed once from the full dataset
    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn filtered(&self, filter: &Filter) -> Dataset {
        filter.apply(&self.dataset)
    }

    pub fn insights(&self, filter: &Filter) -> InsightReport {
        generate_insights(&self.filtered(filter))
    }

    pub fn charts(&self, filter: &Filter) -> DashboardCharts {
        build_charts(&self.filtered(filter))
    }

    pub fn table(&self, filter: &Filter, page: &PageRequest) -> Result<TablePage> {
        TablePage::from_request(&self.filtered(filter), page)
    }

    /// Recompute the full view for a filter selection
    pub fn view(&self, filter: &Filter, page: &PageRequest) -> Result<DashboardView> {
        let filtered = self.filtered(filter);
        let table = TablePage::from_request(&filtered, page)?;

        tracing::debug!(
            filter = ?filter,
            rows = filtered.len(),
            "Computed dashboard view"
        );

        Ok(DashboardView {
            filter: filter.clone(),
            total_rows: self.dataset.len(),
            filtered_rows: filtered.len(),
            charts: build_charts(&filtered),
            table,
            insights: generate_insights(&filtered),
            generated_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::filter::FilterValue;
    use crate::insights::NO_DATA_MESSAGE;
    use crate::loader::example_dataset;

    #[test]
    fn test_view_unfiltered() {
        let dashboard = Dashboard::from_dataset(example_dataset());
        let view = dashboard
            .view(&Filter::new(), &PageRequest::default())
            .unwrap();

        assert_eq!(view.total_rows, 4);
        assert_eq!(view.filtered_rows, 4);
        assert_eq!(view.table.rows.len(), 4);
        assert!(view.insights.is_complete());
        assert_eq!(view.insights.lines[0], "👥 M: 75.0%");
    }

    #[test]
    fn test_view_filter_without_matches() {
        let dashboard = Dashboard::from_dataset(example_dataset());
        let filter = Filter::new()
            .gender(FilterValue::Only("F".into()))
            .neighborhood(FilterValue::Only("Centro".into()));
        let view = dashboard.view(&filter, &PageRequest::default()).unwrap();

        assert_eq!(view.filtered_rows, 0);
        assert_eq!(view.insights.clone().into_lines(), vec![NO_DATA_MESSAGE]);
        assert!(view.charts.gender.points.is_empty());
        assert_eq!(view.table.total_pages, 0);
    }

    #[test]
    fn test_view_rejects_bad_page_size() {
        let dashboard = Dashboard::from_dataset(example_dataset());
        let result = dashboard.view(&Filter::new(), &PageRequest::new(0, 3));
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_options_come_from_full_dataset() {
        let dashboard = Dashboard::from_dataset(example_dataset());
        assert_eq!(dashboard.options().genders, vec!["M", "F"]);
        assert_eq!(dashboard.dataset().len(), 4);
        assert_eq!(dashboard.source(), &DataSource::Memory);
    }
}
