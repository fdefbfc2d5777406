//! Top Category Insight
//!
//! Ranks the values of a categorical column and lists the three most
//! frequent under a header. Used for neighborhoods and for both item
//! columns.

use crate::error::Result;
use crate::models::{Column, Dataset};
use crate::stats::top_n;

use super::engine::InsightSection;
use super::types::InsightType;

/// How many entries each ranking shows
pub const TOP_CATEGORY_LIMIT: usize = 3;

/// Ranking of one categorical column
pub struct TopCategoryInsight {
    id: InsightType,
    column: [Column; 1],
    header: &'static str,
    unit: CountUnit,
    /// Drop the whole section (header included) when nothing ranks
    omit_when_empty: bool,
}

/// How a count is spelled after the value
#[derive(Debug, Clone, Copy)]
enum CountUnit {
    /// "Centro: 3 clientes"
    Customers,
    /// "Sofá: 3x"
    Times,
}

impl TopCategoryInsight {
    pub fn neighborhoods() -> Self {
        Self {
            id: InsightType::TopNeighborhoods,
            column: [Column::Neighborhood],
            header: "🏘️ **Top Bairros:**",
            unit: CountUnit::Customers,
            omit_when_empty: false,
        }
    }

    pub fn sanitized_items() -> Self {
        Self {
            id: InsightType::TopSanitizedItems,
            column: [Column::SanitizedItems],
            header: "🧼 **Itens Mais Higienizados:**",
            unit: CountUnit::Times,
            omit_when_empty: true,
        }
    }

    pub fn waterproofed_items() -> Self {
        Self {
            id: InsightType::TopWaterproofedItems,
            column: [Column::WaterproofedItems],
            header: "🛡️ **Itens Mais Impermeabilizados:**",
            unit: CountUnit::Times,
            omit_when_empty: true,
        }
    }
}

impl InsightSection for TopCategoryInsight {
    fn id(&self) -> InsightType {
        self.id
    }

    fn requires(&self) -> &[Column] {
        &self.column
    }

    fn render(&self, dataset: &Dataset) -> Result<Vec<String>> {
        let top = top_n(dataset.text_values(self.column[0]), TOP_CATEGORY_LIMIT);
        if top.is_empty() && self.omit_when_empty {
            return Ok(vec![]);
        }

        let mut lines = Vec::with_capacity(top.len() + 1);
        lines.push(self.header.to_string());
        for vc in top {
            lines.push(match self.unit {
                CountUnit::Customers => format!("• {}: {} clientes", vc.value, vc.count),
                CountUnit::Times => format!("• {}: {}x", vc.value, vc.count),
            });
        }
        Ok(lines)
    }
}
