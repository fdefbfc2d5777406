//! Gender Distribution Insight
//!
//! One line per gender with its share of the rows that carry a gender.

use crate::error::Result;
use crate::models::{Column, Dataset};
use crate::stats::value_counts;

use super::engine::InsightSection;
use super::types::InsightType;

/// Share of customers per gender, most common first
pub struct GenderDistributionInsight;

impl GenderDistributionInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GenderDistributionInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightSection for GenderDistributionInsight {
    fn id(&self) -> InsightType {
        InsightType::GenderDistribution
    }

    fn requires(&self) -> &[Column] {
        &[Column::Gender]
    }

    fn render(&self, dataset: &Dataset) -> Result<Vec<String>> {
        let counts = value_counts(dataset.text_values(Column::Gender));
        let total: usize = counts.iter().map(|vc| vc.count).sum();
        if total == 0 {
            return Ok(vec![]);
        }

        Ok(counts
            .iter()
            .map(|vc| {
                let percent = vc.count as f64 * 100.0 / total as f64;
                format!("👥 {}: {:.1}%", vc.value, percent)
            })
            .collect())
    }
}
