//! Shared command utilities

use std::path::Path;

use clientele_core::{load_from, DataSource, Dashboard, Filter};

use crate::cli::FilterArgs;

/// Load the CSV into a dashboard, telling the user when example data is used
pub fn open_dashboard(data_path: &Path) -> Dashboard {
    let outcome = load_from(data_path);
    if let DataSource::Example { reason } = &outcome.source {
        println!("⚠️  Using example data ({})", reason);
        println!();
    }
    Dashboard::new(outcome)
}

impl FilterArgs {
    pub fn to_filter(&self) -> Filter {
        Filter::from_params(Some(&self.gender), Some(&self.neighborhood))
    }
}

/// One-line description of a filter selection
pub fn describe_filter(filter: &Filter) -> String {
    format!(
        "sexo = {}, bairro = {}",
        filter.gender, filter.neighborhood
    )
}
