//! Options command

use std::path::Path;

use anyhow::Result;

use clientele_core::{FilterOptions, ALL};

use super::open_dashboard;

pub fn cmd_options(data_path: &Path) -> Result<()> {
    let dashboard = open_dashboard(data_path);
    print!("{}", format_options(dashboard.options()));
    Ok(())
}

/// Render the dropdown values, "all" first as in the dashboard
pub fn format_options(options: &FilterOptions) -> String {
    let mut out = String::new();
    out.push_str("Sexo:\n");
    for value in std::iter::once(ALL).chain(options.genders.iter().map(String::as_str)) {
        out.push_str(&format!("  {}\n", value));
    }
    out.push_str("Bairro:\n");
    for value in std::iter::once(ALL).chain(options.neighborhoods.iter().map(String::as_str)) {
        out.push_str(&format!("  {}\n", value));
    }
    out
}
