//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::io::Write;
use std::path::Path;

use clap::Parser;
use clientele_core::{Dashboard, Filter, FilterValue, PageRequest};
use tempfile::NamedTempFile;

use crate::cli::{Cli, Commands, FilterArgs};
use crate::commands::{self, truncate};

fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn sample_csv() -> NamedTempFile {
    write_csv(
        "sexo,bairro,itens_higienizados,valor_servico\n\
         F,Moema,Sofá,\"R$ 200,00\"\n\
         M,Centro,Cadeira,\"R$ 100,00\"\n\
         F,Moema,Colchão de casal com pillow top,\"R$ 300,00\"\n",
    )
}

fn filter_args(gender: &str, neighborhood: &str) -> FilterArgs {
    FilterArgs {
        gender: gender.to_string(),
        neighborhood: neighborhood.to_string(),
    }
}

// ========== Argument Parsing Tests ==========

#[test]
fn test_parse_defaults() {
    let cli = Cli::try_parse_from(["clientele", "insights"]).unwrap();
    assert_eq!(cli.data, Path::new("data/clientes.csv"));
    assert!(!cli.verbose);
    match cli.command {
        Commands::Insights { filter } => {
            assert_eq!(filter.gender, "all");
            assert_eq!(filter.neighborhood, "all");
            assert!(filter.to_filter().is_all());
        }
        _ => panic!("expected insights command"),
    }
}

#[test]
fn test_parse_serve() {
    let cli = Cli::try_parse_from(["clientele", "serve", "--no-auth", "-v"]).unwrap();
    assert!(cli.verbose);
    match cli.command {
        Commands::Serve {
            port,
            host,
            no_auth,
        } => {
            assert_eq!(port, 8050);
            assert_eq!(host, "127.0.0.1");
            assert!(no_auth);
        }
        _ => panic!("expected serve command"),
    }
}

#[test]
fn test_parse_summary_filters() {
    let cli = Cli::try_parse_from([
        "clientele",
        "--data",
        "outro.csv",
        "summary",
        "--gender",
        "F",
        "--page-size",
        "20",
    ])
    .unwrap();
    assert_eq!(cli.data, Path::new("outro.csv"));
    match cli.command {
        Commands::Summary {
            filter, page_size, ..
        } => {
            assert_eq!(
                filter.to_filter(),
                Filter::new().gender(FilterValue::Only("F".into()))
            );
            assert_eq!(page_size, 20);
        }
        _ => panic!("expected summary command"),
    }
}

// ========== Command Tests ==========

#[test]
fn test_cmd_insights() {
    let file = sample_csv();
    let result = commands::cmd_insights(file.path(), &filter_args("F", "all"));
    assert!(result.is_ok());
}

#[test]
fn test_cmd_insights_missing_file_uses_example_data() {
    let dir = tempfile::tempdir().unwrap();
    let result = commands::cmd_insights(&dir.path().join("nope.csv"), &filter_args("all", "all"));
    assert!(result.is_ok());
}

#[test]
fn test_cmd_summary() {
    let file = sample_csv();
    let result = commands::cmd_summary(file.path(), &filter_args("all", "Moema"), 0, 5, false);
    assert!(result.is_ok());

    let result = commands::cmd_summary(file.path(), &filter_args("all", "all"), 0, 10, true);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_summary_rejects_bad_page_size() {
    let file = sample_csv();
    let result = commands::cmd_summary(file.path(), &filter_args("all", "all"), 0, 15, false);
    assert!(result.is_err());
}

#[test]
fn test_cmd_options() {
    let file = sample_csv();
    assert!(commands::cmd_options(file.path()).is_ok());
}

// ========== Formatting Tests ==========

#[test]
fn test_format_options() {
    let file = sample_csv();
    let dashboard = commands::open_dashboard(file.path());
    let text = commands::format_options(dashboard.options());
    assert_eq!(
        text,
        "Sexo:\n  all\n  F\n  M\nBairro:\n  all\n  Moema\n  Centro\n"
    );
}

#[test]
fn test_format_summary() {
    let file = sample_csv();
    let dashboard = commands::open_dashboard(file.path());
    let view = dashboard
        .view(&Filter::new(), &PageRequest::new(0, 5))
        .unwrap();

    let text = commands::format_summary(&view);
    assert!(text.contains("3 of 3 rows"));
    assert!(text.contains("Top 10 Bairros\n  Moema      2\n  Centro     1\n"));
    assert!(text.contains("Página 1 de 1 (5 por página)"));
    assert!(text.contains("sexo | bairro | itens_higienizados | valor_servico"));
    assert!(text.contains("F | Moema | Sofá | 200.00"));
    assert!(text.contains("Colchão de casal com ..."));
}

#[test]
fn test_format_table_empty() {
    let file = sample_csv();
    let dashboard = commands::open_dashboard(file.path());
    let filter = Filter::from_params(Some("M"), Some("Moema"));
    let table = dashboard.table(&filter, &PageRequest::default()).unwrap();
    assert_eq!(commands::format_table(&table), "(sem linhas)\n");
}

#[test]
fn test_format_chart_unavailable() {
    let file = write_csv("bairro\nCentro\n");
    let dashboard: Dashboard = commands::open_dashboard(file.path());
    let charts = dashboard.charts(&Filter::new());
    assert_eq!(
        commands::format_chart(&charts.gender),
        "Dados não disponíveis\n"
    );
}

#[test]
fn test_truncate() {
    assert_eq!(truncate("Sofá", 10), "Sofá");
    assert_eq!(truncate("Colchão de casal", 10), "Colchão...");
}
