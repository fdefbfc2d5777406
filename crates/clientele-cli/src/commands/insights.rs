//! Insights command

use std::path::Path;

use anyhow::Result;

use super::{describe_filter, open_dashboard};
use crate::cli::FilterArgs;

pub fn cmd_insights(data_path: &Path, args: &FilterArgs) -> Result<()> {
    let dashboard = open_dashboard(data_path);
    let filter = args.to_filter();
    let report = dashboard.insights(&filter);

    println!("💡 Insights ({})", describe_filter(&filter));
    println!();
    for line in report.into_lines() {
        println!("{}", line);
    }

    Ok(())
}
