//! Financial Summary Insight
//!
//! Mean, highest and lowest ticket in Brazilian reais.

use crate::error::Result;
use crate::format::format_brl;
use crate::models::{Column, Dataset};
use crate::stats::money_summary;

use super::engine::InsightSection;
use super::types::InsightType;

pub struct FinancialSummaryInsight;

impl FinancialSummaryInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FinancialSummaryInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightSection for FinancialSummaryInsight {
    fn id(&self) -> InsightType {
        InsightType::FinancialSummary
    }

    fn requires(&self) -> &[Column] {
        &[Column::ServiceValue]
    }

    fn render(&self, dataset: &Dataset) -> Result<Vec<String>> {
        let Some(summary) = money_summary(dataset.service_values())? else {
            return Ok(vec![]);
        };

        Ok(vec![
            "💰 **Análise Financeira:**".to_string(),
            format!("• Valor médio: {}", format_brl(summary.mean)),
            format!("• Ticket máximo: {}", format_brl(summary.max)),
            format!("• Ticket mínimo: {}", format_brl(summary.min)),
        ])
    }
}
