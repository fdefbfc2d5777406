//! Paginated table of customer rows

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{Column, Dataset, Record};

/// Page sizes offered by the table view
pub const PAGE_SIZES: [usize; 3] = [5, 10, 20];

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Which slice of the table to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// 0-based page index
    pub page: usize,
    pub page_size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn new(page: usize, page_size: usize) -> Self {
        Self { page, page_size }
    }
}

/// One rendered cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableCell {
    pub column: String,
    pub value: String,
}

/// One page of the filtered table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TablePage {
    /// Page actually shown, after clamping
    pub page: usize,
    pub page_size: usize,
    pub total_rows: usize,
    pub total_pages: usize,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<TableCell>>,
}

impl TablePage {
    /// Slice `dataset` into pages of `page_size` rows and render page `page`
    ///
    /// A page past the end shows the last page.
    pub fn paginate(dataset: &Dataset, page: usize, page_size: usize) -> Result<Self> {
        if !PAGE_SIZES.contains(&page_size) {
            return Err(Error::InvalidData(format!(
                "Unsupported page size {} (expected one of {:?})",
                page_size, PAGE_SIZES
            )));
        }

        let total_rows = dataset.len();
        let total_pages = total_rows.div_ceil(page_size);
        let page = page.min(total_pages.saturating_sub(1));

        let layout = CellLayout::new(dataset);
        let rows = dataset
            .records()
            .iter()
            .skip(page * page_size)
            .take(page_size)
            .map(|record| layout.render(record))
            .collect();

        Ok(Self {
            page,
            page_size,
            total_rows,
            total_pages,
            columns: dataset.schema().columns.clone(),
            rows,
        })
    }

    pub fn from_request(dataset: &Dataset, request: &PageRequest) -> Result<Self> {
        Self::paginate(dataset, request.page, request.page_size)
    }
}

/// Where each header's value lives in a record
enum CellSource {
    Known(Column),
    Extra(usize),
}

struct CellLayout<'a> {
    columns: &'a [String],
    sources: Vec<CellSource>,
}

impl<'a> CellLayout<'a> {
    fn new(dataset: &'a Dataset) -> Self {
        let columns = dataset.schema().columns.as_slice();
        let mut extra = 0;
        let sources = columns
            .iter()
            .map(|name| match name.parse::<Column>() {
                Ok(column) => CellSource::Known(column),
                Err(_) => {
                    extra += 1;
                    CellSource::Extra(extra - 1)
                }
            })
            .collect();
        Self { columns, sources }
    }

    fn render(&self, record: &Record) -> Vec<TableCell> {
        self.columns
            .iter()
            .zip(&self.sources)
            .map(|(name, source)| {
                let value = match source {
                    CellSource::Known(Column::ServiceValue) => record
                        .service_value
                        .map(|v| format!("{:.2}", v))
                        .unwrap_or_default(),
                    CellSource::Known(column) => {
                        record.text(*column).unwrap_or_default().to_string()
                    }
                    CellSource::Extra(i) => record.extra.get(*i).cloned().unwrap_or_default(),
                };
                TableCell {
                    column: name.clone(),
                    value,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{example_dataset, read_dataset};

    #[test]
    fn test_first_page() {
        let page = TablePage::paginate(&example_dataset(), 0, 5).unwrap();
        assert_eq!(page.total_rows, 4);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.rows.len(), 4);
        assert_eq!(
            page.rows[0],
            vec![
                TableCell {
                    column: "sexo".into(),
                    value: "M".into()
                },
                TableCell {
                    column: "bairro".into(),
                    value: "Centro".into()
                },
                TableCell {
                    column: "itens_higienizados".into(),
                    value: "Sofá".into()
                },
                TableCell {
                    column: "valor_servico".into(),
                    value: "350.50".into()
                },
            ]
        );
    }

    #[test]
    fn test_page_past_end_clamps() {
        let csv: String = std::iter::once("sexo,bairro\n".to_string())
            .chain((0..12).map(|i| format!("M,B{}\n", i)))
            .collect();
        let dataset = read_dataset(csv.as_bytes()).unwrap();

        let page = TablePage::paginate(&dataset, 7, 5).unwrap();
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 2);
        assert_eq!(page.rows.len(), 2);
        assert_eq!(page.rows[0][1].value, "B10");
    }

    #[test]
    fn test_unsupported_page_size() {
        let result = TablePage::paginate(&example_dataset(), 0, 7);
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_empty_dataset() {
        let empty = example_dataset().empty_like();
        let page = TablePage::from_request(&empty, &PageRequest::new(3, 10)).unwrap();
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.page, 0);
        assert!(page.rows.is_empty());
        assert_eq!(page.columns.len(), 4);
    }

    #[test]
    fn test_extra_and_missing_cells() {
        let csv = "nome,sexo,valor_servico,telefone\nAna,,,1111\n";
        let dataset = read_dataset(csv.as_bytes()).unwrap();
        let page = TablePage::from_request(&dataset, &PageRequest::default()).unwrap();

        let values: Vec<&str> = page.rows[0].iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["Ana", "", "0.00", "1111"]);
    }
}
