use std::path::Path;

use crate::error::IngestError;

/// A raw delimited table: one header row plus string cells.
///
/// Cells are trimmed and BOM-stripped; fully blank rows are dropped. No type
/// coercion happens here; the normalizer owns that.
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a header, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

fn clean_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

/// Parse CSV bytes into a [`CsvTable`].
///
/// The first non-blank row is the header; short data rows are padded with
/// empty cells and long rows are truncated to the header width.
pub fn parse_csv_bytes(bytes: &[u8]) -> Result<CsvTable, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut headers: Option<Vec<String>> = None;
    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        let cells: Vec<String> = record.iter().map(clean_cell).collect();
        if cells.iter().all(String::is_empty) {
            continue;
        }
        match &headers {
            None => headers = Some(cells),
            Some(header_row) => {
                let mut row = Vec::with_capacity(header_row.len());
                for idx in 0..header_row.len() {
                    row.push(cells.get(idx).cloned().unwrap_or_default());
                }
                rows.push(row);
            }
        }
    }

    Ok(CsvTable {
        headers: headers.unwrap_or_default(),
        rows,
    })
}

/// Read a CSV file into a [`CsvTable`].
pub fn read_csv_table(path: &Path) -> Result<CsvTable, IngestError> {
    let bytes = std::fs::read(path)?;
    parse_csv_bytes(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_header_and_rows() {
        let table = parse_csv_bytes(b"A,B\n1,2\n3,4\n").unwrap();
        assert_eq!(table.headers, vec!["A", "B"]);
        assert_eq!(table.rows, vec![vec!["1", "2"], vec!["3", "4"]]);
    }

    #[test]
    fn pads_and_truncates_ragged_rows() {
        let table = parse_csv_bytes(b"A,B,C\n1,2\n1,2,3,4\n").unwrap();
        assert_eq!(table.rows[0], vec!["1", "2", ""]);
        assert_eq!(table.rows[1], vec!["1", "2", "3"]);
    }

    #[test]
    fn skips_blank_rows_and_strips_bom() {
        let table = parse_csv_bytes("\u{feff}A,B\n,\n1,2\n".as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["A", "B"]);
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn empty_input_yields_empty_table() {
        let table = parse_csv_bytes(b"").unwrap();
        assert!(table.headers.is_empty());
        assert!(table.is_empty());
    }
}
