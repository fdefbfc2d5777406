//! Insight engine - runs the registered sections in order

use crate::models::{Column, Dataset};
use crate::Result;

use super::types::{InsightReport, InsightType, FAILURE_PREFIX};
use super::{
    CampaignSuggestionsInsight, FinancialSummaryInsight, GenderDistributionInsight,
    TopCategoryInsight,
};

/// One block of the insight list
pub trait InsightSection: Send + Sync {
    /// Unique identifier for this section
    fn id(&self) -> InsightType;

    /// Columns that must be present for the section to run at all
    fn requires(&self) -> &[Column];

    /// Render the section's lines; an empty vec means nothing to say
    fn render(&self, dataset: &Dataset) -> Result<Vec<String>>;
}

/// Runs insight sections against a dataset
pub struct InsightEngine {
    sections: Vec<Box<dyn InsightSection>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create an engine with the built-in sections in display order
    pub fn new() -> Self {
        let mut engine = Self::empty();

        engine.register(Box::new(GenderDistributionInsight::new()));
        engine.register(Box::new(TopCategoryInsight::neighborhoods()));
        engine.register(Box::new(TopCategoryInsight::sanitized_items()));
        engine.register(Box::new(TopCategoryInsight::waterproofed_items()));
        engine.register(Box::new(FinancialSummaryInsight::new()));
        engine.register(Box::new(CampaignSuggestionsInsight::new()));

        engine
    }

    /// Create an engine without any sections
    pub fn empty() -> Self {
        Self { sections: vec![] }
    }

    /// Append a section; sections run in registration order
    pub fn register(&mut self, section: Box<dyn InsightSection>) {
        self.sections.push(section);
    }

    /// Run every applicable section
    ///
    /// Sections whose required columns are missing are skipped. The first
    /// failing section stops the run; lines produced before it are kept.
    pub fn generate(&self, dataset: &Dataset) -> InsightReport {
        if dataset.is_empty() {
            return InsightReport::no_data();
        }

        let mut report = InsightReport::default();

        for section in &self.sections {
            if !section.requires().iter().all(|c| dataset.has(*c)) {
                tracing::debug!(section = section.id().as_str(), "Skipping section, column missing");
                continue;
            }

            match section.render(dataset) {
                Ok(lines) => {
                    tracing::debug!(
                        section = section.id().as_str(),
                        count = lines.len(),
                        "Insight section complete"
                    );
                    report.lines.extend(lines);
                }
                Err(e) => {
                    tracing::warn!(
                        section = section.id().as_str(),
                        error = %e,
                        "Insight section failed"
                    );
                    report.failure = Some(format!("{}: {}", FAILURE_PREFIX, e));
                    break;
                }
            }
        }

        report
    }

    /// Get list of registered sections
    pub fn section_types(&self) -> Vec<InsightType> {
        self.sections.iter().map(|s| s.id()).collect()
    }
}
