//! Campaign Suggestions Insight
//!
//! Paid-traffic hints built from the modal gender, neighborhood and item.
//! The header is always emitted; each hint depends on its own column.

use crate::error::Result;
use crate::models::{Column, Dataset};
use crate::stats::{distinct, mode};

use super::engine::InsightSection;
use super::types::InsightType;

pub struct CampaignSuggestionsInsight;

impl CampaignSuggestionsInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CampaignSuggestionsInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightSection for CampaignSuggestionsInsight {
    fn id(&self) -> InsightType {
        InsightType::CampaignSuggestions
    }

    fn requires(&self) -> &[Column] {
        &[]
    }

    fn render(&self, dataset: &Dataset) -> Result<Vec<String>> {
        let mut lines = vec!["📈 **Sugestões para Tráfego Pago:**".to_string()];

        // Targeting a gender only makes sense when there is a choice
        if distinct(dataset.text_values(Column::Gender)).len() > 1 {
            if let Some(gender) = mode(dataset.text_values(Column::Gender)) {
                lines.push(format!("• Segmentar anúncios para público {}", gender));
            }
        }

        if let Some(neighborhood) = mode(dataset.text_values(Column::Neighborhood)) {
            lines.push(format!("• Geotargeting em {} e arredores", neighborhood));
        }

        if let Some(item) = mode(dataset.text_values(Column::SanitizedItems)) {
            lines.push(format!("• Destaque promoções para {}", item));
        }

        Ok(lines)
    }
}
