//! Domain models for Clientele

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Columns the analytics understand, keyed by their CSV header
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    /// `sexo`
    Gender,
    /// `bairro`
    Neighborhood,
    /// `itens_higienizados`
    SanitizedItems,
    /// `itens_impermeabilizados` (optional in most exports)
    WaterproofedItems,
    /// `valor_servico`, a currency-formatted amount
    ServiceValue,
}

impl Column {
    /// CSV header name for this column
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gender => "sexo",
            Self::Neighborhood => "bairro",
            Self::SanitizedItems => "itens_higienizados",
            Self::WaterproofedItems => "itens_impermeabilizados",
            Self::ServiceValue => "valor_servico",
        }
    }

    /// All recognized columns
    pub fn all() -> &'static [Column] {
        &[
            Self::Gender,
            Self::Neighborhood,
            Self::SanitizedItems,
            Self::WaterproofedItems,
            Self::ServiceValue,
        ]
    }
}

impl std::str::FromStr for Column {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "sexo" => Ok(Self::Gender),
            "bairro" => Ok(Self::Neighborhood),
            "itens_higienizados" => Ok(Self::SanitizedItems),
            "itens_impermeabilizados" => Ok(Self::WaterproofedItems),
            "valor_servico" => Ok(Self::ServiceValue),
            _ => Err(format!("Unknown column: {}", s)),
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Column layout of a dataset, discovered from the CSV header
///
/// `columns` keeps every header in file order (for the table view).
/// `capabilities` is the set of recognized columns that are present, which
/// is what the analytics consult instead of probing rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schema {
    pub columns: Vec<String>,
    pub capabilities: BTreeSet<Column>,
    /// Headers that are not recognized, in file order
    pub extra_columns: Vec<String>,
}

impl Schema {
    /// Build a schema from header names
    ///
    /// Duplicate recognized headers are rejected since a row could not
    /// carry two values for the same field.
    pub fn from_headers<I, S>(headers: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut schema = Schema::default();
        for header in headers {
            let name = header.as_ref().trim().to_string();
            match name.parse::<Column>() {
                Ok(column) => {
                    if !schema.capabilities.insert(column) {
                        return Err(Error::InvalidData(format!(
                            "Duplicate column: {}",
                            column
                        )));
                    }
                }
                Err(_) => schema.extra_columns.push(name.clone()),
            }
            schema.columns.push(name);
        }
        Ok(schema)
    }

    /// Schema with only the given recognized columns, in the given order
    pub fn with_columns(columns: &[Column]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.as_str().to_string()).collect(),
            capabilities: columns.iter().copied().collect(),
            extra_columns: vec![],
        }
    }

    pub fn has(&self, column: Column) -> bool {
        self.capabilities.contains(&column)
    }
}

/// One customer-service transaction row
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Record {
    pub gender: Option<String>,
    pub neighborhood: Option<String>,
    pub sanitized_items: Option<String>,
    pub waterproofed_items: Option<String>,
    /// Amount in reais, rounded to cents
    pub service_value: Option<f64>,
    /// Cells of unrecognized columns, aligned with `Schema::extra_columns`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<String>,
}

impl Record {
    /// Categorical value of a recognized text column
    pub fn text(&self, column: Column) -> Option<&str> {
        match column {
            Column::Gender => self.gender.as_deref(),
            Column::Neighborhood => self.neighborhood.as_deref(),
            Column::SanitizedItems => self.sanitized_items.as_deref(),
            Column::WaterproofedItems => self.waterproofed_items.as_deref(),
            Column::ServiceValue => None,
        }
    }

    fn has_value(&self, column: Column) -> bool {
        match column {
            Column::ServiceValue => self.service_value.is_some(),
            other => self.text(other).is_some(),
        }
    }
}

/// The in-memory table of customer-service records
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    schema: Schema,
    records: Vec<Record>,
}

impl Dataset {
    /// Create a dataset, checking that every record fits the schema
    pub fn new(schema: Schema, records: Vec<Record>) -> Result<Self> {
        for (index, record) in records.iter().enumerate() {
            if record.extra.len() != schema.extra_columns.len() {
                return Err(Error::InvalidData(format!(
                    "Row {} has {} extra cells, expected {}",
                    index,
                    record.extra.len(),
                    schema.extra_columns.len()
                )));
            }
            if let Some(column) = Column::all()
                .iter()
                .find(|c| !schema.has(**c) && record.has_value(**c))
            {
                return Err(Error::InvalidData(format!(
                    "Row {} has a value for missing column {}",
                    index, column
                )));
            }
        }
        Ok(Self { schema, records })
    }

    /// Empty dataset sharing this dataset's schema
    pub fn empty_like(&self) -> Self {
        Self {
            schema: self.schema.clone(),
            records: vec![],
        }
    }

    /// Derive a dataset with the same schema from a subset of rows
    pub(crate) fn derive(&self, records: Vec<Record>) -> Self {
        Self {
            schema: self.schema.clone(),
            records,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has(&self, column: Column) -> bool {
        self.schema.has(column)
    }

    /// Non-empty values of a text column, in row order
    pub fn text_values(&self, column: Column) -> impl Iterator<Item = &str> + '_ {
        self.records.iter().filter_map(move |r| r.text(column))
    }

    /// Monetary values, in row order
    pub fn service_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().filter_map(|r| r.service_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_from_headers() {
        let schema =
            Schema::from_headers(["sexo", " bairro ", "telefone", "valor_servico"]).unwrap();
        assert_eq!(
            schema.columns,
            vec!["sexo", "bairro", "telefone", "valor_servico"]
        );
        assert!(schema.has(Column::Gender));
        assert!(schema.has(Column::Neighborhood));
        assert!(schema.has(Column::ServiceValue));
        assert!(!schema.has(Column::SanitizedItems));
        assert_eq!(schema.extra_columns, vec!["telefone"]);
    }

    #[test]
    fn test_schema_rejects_duplicate_recognized_column() {
        let result = Schema::from_headers(["sexo", "sexo"]);
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_dataset_rejects_value_for_missing_column() {
        let schema = Schema::with_columns(&[Column::Gender]);
        let record = Record {
            gender: Some("M".into()),
            neighborhood: Some("Centro".into()),
            ..Default::default()
        };
        assert!(Dataset::new(schema, vec![record]).is_err());
    }

    #[test]
    fn test_dataset_rejects_misaligned_extra_cells() {
        let schema = Schema::from_headers(["sexo", "telefone"]).unwrap();
        let record = Record {
            gender: Some("F".into()),
            ..Default::default()
        };
        assert!(Dataset::new(schema, vec![record]).is_err());
    }

    #[test]
    fn test_column_round_trip_names() {
        for column in Column::all() {
            assert_eq!(column.as_str().parse::<Column>().unwrap(), *column);
        }
        assert!("telefone".parse::<Column>().is_err());
    }
}
