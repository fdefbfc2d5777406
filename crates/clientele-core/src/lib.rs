//! Clientele Core Library
//!
//! Shared functionality for the Clientele customer-service dashboard:
//! - CSV loading with currency normalization and example-data fallback
//! - Gender / neighborhood filtering
//! - Insight generation (demographics, rankings, financials, campaign hints)
//! - Chart series and table pagination for the dashboard views
//! - Brazilian-locale currency formatting

pub mod charts;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod format;
pub mod insights;
pub mod loader;
pub mod models;
pub mod stats;
pub mod table;

pub use charts::{build_charts, ChartKind, ChartPoint, ChartSeries, DashboardCharts};
pub use dashboard::{Dashboard, DashboardView};
pub use error::{Error, Result};
pub use filter::{filter, Filter, FilterOptions, FilterValue, ALL};
pub use format::format_brl;
pub use insights::{generate_insights, InsightReport, InsightType};
pub use loader::{load, load_from, read_dataset, DataSource, LoadOutcome, DEFAULT_DATA_PATH};
pub use models::{Column, Dataset, Record, Schema};
pub use table::{PageRequest, TableCell, TablePage, PAGE_SIZES};
