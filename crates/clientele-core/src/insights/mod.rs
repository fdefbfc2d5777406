//! Insight Generator - textual findings for the dashboard
//!
//! Turns a (possibly filtered) dataset into an ordered list of short,
//! human-readable lines. Sections always appear in the same order and a
//! section whose column is missing from the dataset is silently left out.
//!
//! ## Sections
//!
//! 1. **Gender distribution** - share of rows per gender
//! 2. **Top neighborhoods** - three most frequent neighborhoods
//! 3. **Top sanitized items** / 4. **Top waterproofed items**
//! 5. **Financial summary** - mean, max and min ticket in R$
//! 6. **Campaign suggestions** - paid-traffic hints from modal values
//!
//! ## Usage
//!
//! ```rust,ignore
//! use clientele_core::insights::generate_insights;
//!
//! let report = generate_insights(&dataset);
//! for line in report.into_lines() {
//!     println!("{}", line);
//! }
//! ```

pub mod campaign_suggestions;
pub mod engine;
pub mod financial_summary;
pub mod gender_distribution;
pub mod top_categories;
pub mod types;

pub use campaign_suggestions::CampaignSuggestionsInsight;
pub use engine::{InsightEngine, InsightSection};
pub use financial_summary::FinancialSummaryInsight;
pub use gender_distribution::GenderDistributionInsight;
pub use top_categories::{TopCategoryInsight, TOP_CATEGORY_LIMIT};
pub use types::{InsightReport, InsightType, FAILURE_PREFIX, NO_DATA_MESSAGE};

use crate::models::Dataset;

/// Run the built-in sections against `dataset`
pub fn generate_insights(dataset: &Dataset) -> InsightReport {
    InsightEngine::new().generate(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::filter;
    use crate::loader::example_dataset;
    use crate::models::{Column, Record, Schema};

    fn two_row_dataset() -> Dataset {
        let schema = Schema::with_columns(&[
            Column::Gender,
            Column::Neighborhood,
            Column::SanitizedItems,
            Column::ServiceValue,
        ]);
        let records = vec![
            Record {
                gender: Some("M".into()),
                neighborhood: Some("Centro".into()),
                sanitized_items: Some("Sofá".into()),
                service_value: Some(350.50),
                ..Default::default()
            },
            Record {
                gender: Some("F".into()),
                neighborhood: Some("Moema".into()),
                sanitized_items: Some("Cadeira".into()),
                service_value: Some(420.0),
                ..Default::default()
            },
        ];
        Dataset::new(schema, records).unwrap()
    }

    #[test]
    fn test_empty_dataset_yields_single_no_data_line() {
        let empty = example_dataset().empty_like();
        let lines = generate_insights(&empty).into_lines();
        assert_eq!(lines, vec![NO_DATA_MESSAGE.to_string()]);
    }

    #[test]
    fn test_filtered_single_row() {
        let dataset = two_row_dataset();
        let men = filter(&dataset, "M", "all");
        assert_eq!(men.records(), &dataset.records()[..1]);

        let report = generate_insights(&men);
        assert!(report.is_complete());
        let lines = report.into_lines();

        assert!(lines.iter().any(|l| l.contains("M: 100.0%")));
        assert!(lines.contains(&"• Valor médio: R$ 350,50".to_string()));
        assert!(lines.contains(&"• Ticket máximo: R$ 350,50".to_string()));
        assert!(lines.contains(&"• Ticket mínimo: R$ 350,50".to_string()));
    }

    #[test]
    fn test_full_report_order() {
        let lines = generate_insights(&example_dataset()).into_lines();
        assert_eq!(
            lines,
            vec![
                "👥 M: 75.0%",
                "👥 F: 25.0%",
                "🏘️ **Top Bairros:**",
                "• Centro: 2 clientes",
                "• Vila Olímpia: 1 clientes",
                "• Moema: 1 clientes",
                "🧼 **Itens Mais Higienizados:**",
                "• Sofá: 2x",
                "• Cadeira: 1x",
                "• Poltrona: 1x",
                "💰 **Análise Financeira:**",
                "• Valor médio: R$ 412,88",
                "• Ticket máximo: R$ 500,75",
                "• Ticket mínimo: R$ 350,50",
                "📈 **Sugestões para Tráfego Pago:**",
                "• Segmentar anúncios para público M",
                "• Geotargeting em Centro e arredores",
                "• Destaque promoções para Sofá",
            ]
        );
    }

    #[test]
    fn test_missing_columns_drop_sections() {
        let schema = Schema::with_columns(&[Column::Neighborhood]);
        let records = vec![Record {
            neighborhood: Some("Lapa".into()),
            ..Default::default()
        }];
        let dataset = Dataset::new(schema, records).unwrap();

        let lines = generate_insights(&dataset).into_lines();
        assert_eq!(
            lines,
            vec![
                "🏘️ **Top Bairros:**",
                "• Lapa: 1 clientes",
                "📈 **Sugestões para Tráfego Pago:**",
                "• Geotargeting em Lapa e arredores",
            ]
        );
    }

    #[test]
    fn test_non_numeric_amount_keeps_partial_insights() {
        let schema = Schema::with_columns(&[Column::Gender, Column::ServiceValue]);
        let records = vec![Record {
            gender: Some("F".into()),
            service_value: Some(f64::NAN),
            ..Default::default()
        }];
        let dataset = Dataset::new(schema, records).unwrap();

        let report = generate_insights(&dataset);
        assert_eq!(report.lines, vec!["👥 F: 100.0%"]);
        let lines = report.into_lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with(FAILURE_PREFIX));
    }

    #[test]
    fn test_deterministic() {
        let dataset = example_dataset();
        assert_eq!(generate_insights(&dataset), generate_insights(&dataset));
    }
}
