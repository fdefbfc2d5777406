//! Customer CSV loader
//!
//! Reads `data/clientes.csv`, normalizes the `valor_servico` column into
//! numbers rounded to cents, and falls back to a small embedded example
//! dataset when the file is missing or cannot be parsed. The fallback is a
//! value in [`LoadOutcome`], never an error.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::format::round_cents;
use crate::models::{Column, Dataset, Record, Schema};

/// Where the dashboard looks for data when no path is given
pub const DEFAULT_DATA_PATH: &str = "data/clientes.csv";

/// Where a loaded dataset came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataSource {
    /// Parsed from this file
    File { path: PathBuf },
    /// Embedded example data, with the reason the file could not be used
    Example { reason: String },
    /// Built in memory by the caller
    Memory,
}

/// Result of loading: always carries a usable dataset
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub dataset: Dataset,
    pub source: DataSource,
}

impl LoadOutcome {
    fn example(reason: String) -> Self {
        Self {
            dataset: example_dataset(),
            source: DataSource::Example { reason },
        }
    }

    /// True when the example dataset was substituted
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, DataSource::Example { .. })
    }
}

/// Load from the default path
pub fn load() -> LoadOutcome {
    load_from(DEFAULT_DATA_PATH)
}

/// Load from `path`, substituting example data on any failure
pub fn load_from(path: impl AsRef<Path>) -> LoadOutcome {
    let path = path.as_ref();

    if !path.exists() {
        warn!(path = %path.display(), "Data file not found, using example data");
        return LoadOutcome::example(format!("File not found: {}", path.display()));
    }

    match File::open(path)
        .map_err(Error::from)
        .and_then(read_dataset)
    {
        Ok(dataset) => {
            info!(
                path = %path.display(),
                rows = dataset.len(),
                columns = dataset.schema().columns.len(),
                "Loaded customer data"
            );
            LoadOutcome {
                dataset,
                source: DataSource::File {
                    path: path.to_path_buf(),
                },
            }
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to load data file, using example data");
            LoadOutcome::example(e.to_string())
        }
    }
}

/// Parse a CSV stream into a dataset
///
/// Strict: any malformed row or unparsable amount is an error. Callers that
/// want the fallback behavior use [`load_from`].
pub fn read_dataset<R: Read>(reader: R) -> Result<Dataset> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(Error::Load("Missing header row".into()));
    }

    let schema = Schema::from_headers(headers.iter())?;
    let kinds: Vec<Option<Column>> = schema.columns.iter().map(|h| h.parse().ok()).collect();
    let money = MoneyParser::new()?;

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result?;
        let mut record = Record::default();

        for (index, kind) in kinds.iter().enumerate() {
            let cell = row.get(index).unwrap_or_default();
            match kind {
                Some(Column::ServiceValue) => {
                    record.service_value = Some(money.parse(cell)?);
                }
                Some(Column::Gender) => record.gender = text_cell(cell),
                Some(Column::Neighborhood) => record.neighborhood = text_cell(cell),
                Some(Column::SanitizedItems) => record.sanitized_items = text_cell(cell),
                Some(Column::WaterproofedItems) => record.waterproofed_items = text_cell(cell),
                None => record.extra.push(cell.to_string()),
            }
        }

        records.push(record);
    }

    debug!("Parsed {} customer rows", records.len());
    Dataset::new(schema, records)
}

/// Trimmed cell, `None` when blank
fn text_cell(cell: &str) -> Option<String> {
    let cell = cell.trim();
    (!cell.is_empty()).then(|| cell.to_string())
}

/// Built-in data used when the CSV cannot be loaded
pub fn example_dataset() -> Dataset {
    let rows = [
        ("M", "Centro", "Sofá", 350.50),
        ("F", "Vila Olímpia", "Cadeira", 420.00),
        ("M", "Centro", "Sofá", 380.25),
        ("M", "Moema", "Poltrona", 500.75),
    ];

    let records = rows
        .iter()
        .map(|(gender, neighborhood, item, value)| Record {
            gender: Some(gender.to_string()),
            neighborhood: Some(neighborhood.to_string()),
            sanitized_items: Some(item.to_string()),
            service_value: Some(*value),
            ..Default::default()
        })
        .collect();

    let schema = Schema::with_columns(&[
        Column::Gender,
        Column::Neighborhood,
        Column::SanitizedItems,
        Column::ServiceValue,
    ]);

    Dataset::new(schema, records).unwrap_or_default()
}

/// Parser for currency-formatted amounts such as `R$ 1.234,56`
///
/// Everything but digits and separators is stripped. The decimal separator
/// is the last separator when both `.` and `,` appear, a single `,` followed
/// by one or two digits, or a single `.`; every other separator is a
/// thousands separator. A string with no digits is zero.
pub struct MoneyParser {
    strip: Regex,
}

impl MoneyParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            strip: Regex::new(r"[^0-9.,]")?,
        })
    }

    pub fn parse(&self, raw: &str) -> Result<f64> {
        let kept = self.strip.replace_all(raw, "");
        let decimal_at = decimal_separator_index(&kept);

        let mut normalized = String::with_capacity(kept.len());
        for (index, ch) in kept.char_indices() {
            if ch.is_ascii_digit() {
                normalized.push(ch);
            } else if Some(index) == decimal_at {
                normalized.push('.');
            }
        }

        if !normalized.bytes().any(|b| b.is_ascii_digit()) {
            return Ok(0.0);
        }

        let value: f64 = normalized
            .parse()
            .map_err(|_| Error::InvalidData(format!("Unable to parse amount: {}", raw)))?;
        if !value.is_finite() {
            return Err(Error::InvalidData(format!("Amount out of range: {}", raw)));
        }

        Ok(round_cents(value))
    }
}

/// Parse a single amount (builds a throwaway parser)
pub fn parse_money(raw: &str) -> Result<f64> {
    MoneyParser::new()?.parse(raw)
}

/// Byte index of the decimal separator in a digits-and-separators string
fn decimal_separator_index(s: &str) -> Option<usize> {
    match (s.rfind('.'), s.rfind(',')) {
        (Some(dot), Some(comma)) => Some(dot.max(comma)),
        (None, Some(comma)) => {
            let digits_after = s.len() - comma - 1;
            (s.matches(',').count() == 1 && (1..=2).contains(&digits_after)).then_some(comma)
        }
        (Some(dot), None) => (s.matches('.').count() == 1).then_some(dot),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_money() {
        assert_eq!(parse_money("R$ 1.234,56").unwrap(), 1234.56);
        assert_eq!(parse_money("R$1,234.56").unwrap(), 1234.56);
        assert_eq!(parse_money("350.5").unwrap(), 350.5);
        assert_eq!(parse_money("R$ 420,00").unwrap(), 420.0);
        assert_eq!(parse_money("R$ 1.000.000").unwrap(), 1_000_000.0);
        assert_eq!(parse_money("1,500").unwrap(), 1500.0);
        assert_eq!(parse_money("380.254").unwrap(), 380.25);
    }

    #[test]
    fn test_parse_money_lone_dot_is_decimal() {
        // A single dot is a decimal point even when three digits follow,
        // so pt-BR whole amounts need the ",00" suffix
        assert_eq!(parse_money("R$ 1.500").unwrap(), 1.5);
        assert_eq!(parse_money("R$ 1.234").unwrap(), 1.23);
        assert_eq!(parse_money("R$ 1.500,00").unwrap(), 1500.0);
        assert_eq!(parse_money("R$ 1.500.000").unwrap(), 1_500_000.0);
    }

    #[test]
    fn test_parse_money_empty_is_zero() {
        assert_eq!(parse_money("").unwrap(), 0.0);
        assert_eq!(parse_money("  R$  ").unwrap(), 0.0);
        assert_eq!(parse_money("n/a").unwrap(), 0.0);
    }

    #[test]
    fn test_read_dataset() {
        let csv = "sexo,bairro,itens_higienizados,itens_impermeabilizados,valor_servico
M,Centro,Sofá,Sofá,\"R$ 350,50\"
F,Moema,Cadeira,,\"R$ 1.420,00\"
";
        let dataset = read_dataset(csv.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 2);
        assert!(dataset.has(Column::WaterproofedItems));

        let first = &dataset.records()[0];
        assert_eq!(first.gender.as_deref(), Some("M"));
        assert_eq!(first.service_value, Some(350.5));

        let second = &dataset.records()[1];
        assert_eq!(second.waterproofed_items, None);
        assert_eq!(second.service_value, Some(1420.0));
    }

    #[test]
    fn test_read_dataset_keeps_unknown_columns() {
        let csv = "nome,sexo,valor_servico\nAna,F,100\n";
        let dataset = read_dataset(csv.as_bytes()).unwrap();
        assert_eq!(dataset.schema().extra_columns, vec!["nome"]);
        assert_eq!(dataset.records()[0].extra, vec!["Ana"]);
        assert!(!dataset.has(Column::Neighborhood));
    }

    #[test]
    fn test_read_dataset_header_only_is_empty() {
        let dataset = read_dataset("sexo,bairro\n".as_bytes()).unwrap();
        assert!(dataset.is_empty());
        assert!(dataset.has(Column::Gender));
    }

    #[test]
    fn test_read_dataset_rejects_ragged_rows() {
        let csv = "sexo,bairro\nM,Centro,extra\n";
        assert!(matches!(read_dataset(csv.as_bytes()), Err(Error::Csv(_))));
    }

    #[test]
    fn test_read_dataset_rejects_empty_input() {
        assert!(matches!(read_dataset("".as_bytes()), Err(Error::Load(_))));
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let outcome = load_from("does/not/exist/clientes.csv");
        assert!(outcome.is_fallback());
        assert_eq!(outcome.dataset.len(), 4);
        assert_eq!(
            outcome.dataset.schema().columns,
            vec!["sexo", "bairro", "itens_higienizados", "valor_servico"]
        );
    }

    #[test]
    fn test_load_malformed_file_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"sexo,bairro\nM\n").unwrap();

        let outcome = load_from(file.path());
        assert!(outcome.is_fallback());
        match outcome.source {
            DataSource::Example { reason } => assert!(!reason.is_empty()),
            other => panic!("unexpected source: {:?}", other),
        }
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"sexo,bairro,valor_servico\nF,Moema,\"R$ 99,90\"\n")
            .unwrap();

        let outcome = load_from(file.path());
        assert!(!outcome.is_fallback());
        assert_eq!(outcome.dataset.len(), 1);
        assert_eq!(outcome.dataset.records()[0].service_value, Some(99.9));
    }

    #[test]
    fn test_example_dataset() {
        let dataset = example_dataset();
        assert_eq!(dataset.len(), 4);
        assert!(!dataset.has(Column::WaterproofedItems));
        assert_eq!(dataset.service_values().sum::<f64>(), 1651.5);
    }
}
