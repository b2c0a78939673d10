//! Writing named tables to a results workbook.

use std::path::Path;

use rust_xlsxwriter::{ColNum, RowNum, Workbook};
use tracing::{debug, info};

use crate::errors::ReportError;
use crate::grid::Cell;
use crate::table::Table;

/// Rows a worksheet holds, header row included.
const MAX_ROWS: usize = 1_048_576;

/// Columns a worksheet holds.
const MAX_COLS: usize = 16_384;

/// Ordered collection of sheets to be written, some of which may be absent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Report {
    /// Sheet names paired with their tables, in output order.
    sheets: Vec<(String, Option<Table>)>,
}

impl Report {
    /// Create an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sheet. Absent tables are remembered but not written.
    pub fn push(&mut self, name: impl Into<String>, table: Option<Table>) -> &mut Self {
        self.sheets.push((name.into(), table));
        self
    }

    /// Sheets in output order.
    #[must_use]
    pub fn sheets(&self) -> &[(String, Option<Table>)] {
        &self.sheets
    }

    /// Write every present table to its own worksheet, replacing any file at `path`.
    ///
    /// The first row of each worksheet holds the column labels; data rows
    /// follow without an index column. Labels that are plain column indices
    /// are written as numbers, any other label as text.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::TooLarge`] when a table does not fit in a
    /// worksheet and [`ReportError::Xlsx`] when a sheet name is rejected or the
    /// file cannot be saved. Nothing is saved when either happens.
    pub fn write(&self, path: &Path) -> Result<(), ReportError> {
        let mut workbook = Workbook::new();
        let mut written = 0usize;
        for (name, table) in &self.sheets {
            let Some(table) = table else {
                debug!(sheet = %name, "skipping absent table");
                continue;
            };
            let too_large = || ReportError::TooLarge {
                sheet: name.clone(),
                rows: table.nrows(),
                cols: table.ncols(),
            };
            if table.nrows() >= MAX_ROWS || table.ncols() > MAX_COLS {
                return Err(too_large());
            }

            let worksheet = workbook.add_worksheet();
            worksheet.set_name(name.as_str())?;
            for (col, label) in table.columns().iter().enumerate() {
                let col = ColNum::try_from(col).map_err(|_| too_large())?;
                match index_label(label) {
                    Some(index) => worksheet.write_number(0, col, index)?,
                    None => worksheet.write_string(0, col, label.as_str())?,
                };
            }
            for (row, cells) in table.rows().enumerate() {
                let row = RowNum::try_from(row + 1).map_err(|_| too_large())?;
                for (col, cell) in cells.iter().enumerate() {
                    let col = ColNum::try_from(col).map_err(|_| too_large())?;
                    match cell {
                        Cell::Number(value) => {
                            worksheet.write_number(row, col, *value)?;
                        }
                        Cell::Text(text) => {
                            worksheet.write_string(row, col, text.as_str())?;
                        }
                        Cell::Empty => {}
                    }
                }
            }
            written += 1;
        }
        workbook.save(path)?;
        info!(path = %path.display(), sheets = written, "wrote report");
        Ok(())
    }
}

/// Numeric value of a label made only of ASCII digits, such as an extracted
/// column index.
fn index_label(label: &str) -> Option<f64> {
    if label.is_empty() || !label.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    label.parse::<u32>().ok().map(f64::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbook::read_sheet;
    use ndarray::{array, Array2};

    #[test]
    fn absent_tables_are_not_written() {
        let dir = tempfile::tempdir().expect("temporary directory");
        let path = dir.path().join("report.xlsx");

        let mut report = Report::new();
        report
            .push("Ausente", None)
            .push("Reacciones", Some(Table::from_column("Reacciones", &[0.0])));
        report.write(&path).expect("report written");

        assert!(read_sheet(&path, "Reacciones").is_ok());
        assert!(read_sheet(&path, "Ausente").is_err());
    }

    #[test]
    fn mixed_cells_keep_their_types() {
        let dir = tempfile::tempdir().expect("temporary directory");
        let path = dir.path().join("mixed.xlsx");
        let table = Table::new(
            vec!["1".into(), "3".into()],
            array![
                [Cell::from("E"), Cell::Number(2.1e8)],
                [Cell::Empty, Cell::from("kN/m2")]
            ],
        );

        let mut report = Report::new();
        report.push("Propiedades Mecánicas", Some(table));
        report.write(&path).expect("report written");

        let grid = read_sheet(&path, "Propiedades Mecánicas").expect("sheet readable");
        assert_eq!(grid.get(0, 0), Some(&Cell::Number(1.0)));
        assert_eq!(grid.get(0, 1), Some(&Cell::Number(3.0)));
        assert_eq!(grid.get(1, 1), Some(&Cell::Number(2.1e8)));
        assert_eq!(grid.get(2, 0), Some(&Cell::Empty));
        assert_eq!(grid.get(2, 1), Some(&Cell::from("kN/m2")));
    }

    #[test]
    fn named_labels_stay_text() {
        let dir = tempfile::tempdir().expect("temporary directory");
        let path = dir.path().join("labels.xlsx");
        let table = Table::new(
            vec!["Reacciones".into(), "-1".into(), "2.5".into(), "12".into()],
            array![[Cell::Number(1.0), Cell::Empty, Cell::Empty, Cell::Empty]],
        );

        let mut report = Report::new();
        report.push("Reacciones", Some(table));
        report.write(&path).expect("report written");

        let grid = read_sheet(&path, "Reacciones").expect("sheet readable");
        assert_eq!(grid.get(0, 0), Some(&Cell::from("Reacciones")));
        assert_eq!(grid.get(0, 1), Some(&Cell::from("-1")));
        assert_eq!(grid.get(0, 2), Some(&Cell::from("2.5")));
        assert_eq!(grid.get(0, 3), Some(&Cell::Number(12.0)));
    }

    #[test]
    fn index_labels_parse_only_plain_digits() {
        assert_eq!(index_label("0"), Some(0.0));
        assert_eq!(index_label("11"), Some(11.0));
        assert_eq!(index_label(""), None);
        assert_eq!(index_label("+3"), None);
        assert_eq!(index_label("3 "), None);
        assert_eq!(index_label("99999999999"), None);
    }

    #[test]
    fn table_wider_than_a_worksheet_is_rejected() {
        let dir = tempfile::tempdir().expect("temporary directory");
        let path = dir.path().join("wide.xlsx");
        // One past the u16 range, which would wrap to column 0 if truncated.
        let cols = 65_536;
        let table = Table::new(
            (0..cols).map(|c| c.to_string()).collect(),
            Array2::from_elem((1, cols), Cell::Number(1.0)),
        );

        let mut report = Report::new();
        report.push("Ancha", Some(table));
        let error = report.write(&path).expect_err("too many columns");

        assert!(matches!(
            error,
            ReportError::TooLarge { ref sheet, rows: 1, cols: 65_536 } if sheet == "Ancha"
        ));
        assert!(!path.exists());
    }

    #[test]
    fn column_limit_is_inclusive() {
        let dir = tempfile::tempdir().expect("temporary directory");
        let path = dir.path().join("limit.xlsx");
        let table = |cols: usize| {
            Table::new(
                (0..cols).map(|c| format!("c{c}")).collect(),
                Array2::from_elem((1, cols), Cell::Empty),
            )
        };

        let mut report = Report::new();
        report.push("Limite", Some(table(MAX_COLS)));
        report.write(&path).expect("widest sheet fits");

        let mut report = Report::new();
        report.push("Exceso", Some(table(MAX_COLS + 1)));
        assert!(matches!(
            report.write(&path),
            Err(ReportError::TooLarge { cols: 16_385, .. })
        ));
    }

    #[test]
    fn existing_file_is_replaced() {
        let dir = tempfile::tempdir().expect("temporary directory");
        let path = dir.path().join("overwrite.xlsx");
        std::fs::write(&path, b"not a workbook").expect("placeholder written");

        let mut report = Report::new();
        report.push("Desplazamientos", Some(Table::from_column("Desplazamientos", &[0.1])));
        report.write(&path).expect("report written");

        let grid = read_sheet(&path, "Desplazamientos").expect("sheet readable");
        assert_eq!(grid.get(1, 0), Some(&Cell::Number(0.1)));
    }

    #[test]
    fn overlong_sheet_name_is_rejected() {
        let dir = tempfile::tempdir().expect("temporary directory");
        let path = dir.path().join("bad.xlsx");
        let mut report = Report::new();
        report.push("x".repeat(40), Some(Table::from_column("x", &[1.0])));
        assert!(matches!(report.write(&path), Err(ReportError::Xlsx(_))));
    }
}
