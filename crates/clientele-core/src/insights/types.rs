//! Core types for the insight generator

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shown instead of any insight when the (filtered) dataset has no rows
pub const NO_DATA_MESSAGE: &str = "⚠️ Nenhum dado válido encontrado";

/// Prefix of the trailing line added when a section fails
pub const FAILURE_PREFIX: &str = "⚠️ Erro na análise";

/// Sections of the insight list, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    /// Share of customers per gender
    GenderDistribution,
    /// Most frequent neighborhoods
    TopNeighborhoods,
    /// Most frequently sanitized items
    TopSanitizedItems,
    /// Most frequently waterproofed items
    TopWaterproofedItems,
    /// Mean / max / min ticket
    FinancialSummary,
    /// Paid-traffic campaign suggestions
    CampaignSuggestions,
}

impl InsightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightType::GenderDistribution => "gender_distribution",
            InsightType::TopNeighborhoods => "top_neighborhoods",
            InsightType::TopSanitizedItems => "top_sanitized_items",
            InsightType::TopWaterproofedItems => "top_waterproofed_items",
            InsightType::FinancialSummary => "financial_summary",
            InsightType::CampaignSuggestions => "campaign_suggestions",
        }
    }
}

impl fmt::Display for InsightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gender_distribution" => Ok(InsightType::GenderDistribution),
            "top_neighborhoods" => Ok(InsightType::TopNeighborhoods),
            "top_sanitized_items" => Ok(InsightType::TopSanitizedItems),
            "top_waterproofed_items" => Ok(InsightType::TopWaterproofedItems),
            "financial_summary" => Ok(InsightType::FinancialSummary),
            "campaign_suggestions" => Ok(InsightType::CampaignSuggestions),
            _ => Err(format!("Unknown insight type: {}", s)),
        }
    }
}

/// Output of one insight run
///
/// `lines` holds everything produced before a failure; `failure` is the
/// diagnostic line for the section that failed, if any. Presentation code
/// decides how to show it, or uses [`InsightReport::into_lines`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InsightReport {
    pub lines: Vec<String>,
    pub failure: Option<String>,
}

impl InsightReport {
    /// Report for a dataset without rows
    pub fn no_data() -> Self {
        Self {
            lines: vec![NO_DATA_MESSAGE.to_string()],
            failure: None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        self.lines.len() == 1 && self.lines[0] == NO_DATA_MESSAGE && self.failure.is_none()
    }

    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }

    /// Flat list with the failure line (if any) last
    pub fn into_lines(self) -> Vec<String> {
        let mut lines = self.lines;
        lines.extend(self.failure);
        lines
    }
}
