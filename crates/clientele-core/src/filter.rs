//! Gender / neighborhood filter for the dashboard
//!
//! Filters are exact, case-sensitive equality checks combined with AND.
//! Applying a filter derives a new dataset; the input is never touched.

use serde::{Deserialize, Serialize};

use crate::models::{Column, Dataset, Record};
use crate::stats::distinct;

/// Sentinel used by the dropdowns for "no filter"
pub const ALL: &str = "all";

/// One filter slot: everything, or rows equal to a value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterValue {
    #[default]
    All,
    Only(String),
}

impl FilterValue {
    /// Parse a dropdown value; `"all"`, blank or absent means no filter
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            None => Self::All,
            Some(v) if v.is_empty() || v == ALL => Self::All,
            Some(v) => Self::Only(v.to_string()),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => value == Some(wanted.as_str()),
        }
    }
}

impl std::fmt::Display for FilterValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "{}", ALL),
            Self::Only(v) => write!(f, "{}", v),
        }
    }
}

/// The dashboard's two filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub gender: FilterValue,
    pub neighborhood: FilterValue,
}

impl Filter {
    /// Create a filter that keeps every row
    pub fn new() -> Self {
        Self::default()
    }

    /// Set gender filter
    pub fn gender(mut self, value: FilterValue) -> Self {
        self.gender = value;
        self
    }

    /// Set neighborhood filter
    pub fn neighborhood(mut self, value: FilterValue) -> Self {
        self.neighborhood = value;
        self
    }

    /// Build from raw dropdown values
    pub fn from_params(gender: Option<&str>, neighborhood: Option<&str>) -> Self {
        Self {
            gender: FilterValue::parse(gender),
            neighborhood: FilterValue::parse(neighborhood),
        }
    }

    pub fn is_all(&self) -> bool {
        self.gender.is_all() && self.neighborhood.is_all()
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.gender.matches(record.text(Column::Gender))
            && self.neighborhood.matches(record.text(Column::Neighborhood))
    }

    /// Rows matching both filters, in their original order
    pub fn apply(&self, dataset: &Dataset) -> Dataset {
        if self.is_all() {
            return dataset.clone();
        }
        let records = dataset
            .records()
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect();
        dataset.derive(records)
    }
}

/// Filter a dataset by gender and neighborhood (`"all"` disables a slot)
pub fn filter(dataset: &Dataset, gender: &str, neighborhood: &str) -> Dataset {
    Filter::from_params(Some(gender), Some(neighborhood)).apply(dataset)
}

/// Values offered by the filter dropdowns (besides "all")
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub genders: Vec<String>,
    pub neighborhoods: Vec<String>,
}

impl FilterOptions {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self {
            genders: distinct(dataset.text_values(Column::Gender)),
            neighborhoods: distinct(dataset.text_values(Column::Neighborhood)),
        }
    }
}
