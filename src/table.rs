//! Labelled blocks of cells cut out of a grid.

use ndarray::{Array2, ArrayView1};

use crate::grid::Cell;

/// A block of cells with one label per column.
///
/// Rows carry no label and are numbered from zero in storage order.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    /// Header written above each column.
    columns: Vec<String>,
    /// Row-major cell storage; `cells.ncols() == columns.len()`.
    cells: Array2<Cell>,
}

impl Table {
    /// Create a table from column labels and cells.
    ///
    /// # Panics
    ///
    /// Panics when the number of labels differs from the number of columns.
    #[must_use]
    pub fn new(columns: Vec<String>, cells: Array2<Cell>) -> Self {
        assert_eq!(
            columns.len(),
            cells.ncols(),
            "one label is required per column"
        );
        Self { columns, cells }
    }

    /// Create a single-column numeric table.
    ///
    /// # Examples
    /// ```
    /// use stiffsheet::{Cell, Table};
    ///
    /// let table = Table::from_column("Reacciones", &[1.0, -2.0]);
    /// assert_eq!(table.columns(), ["Reacciones".to_string()]);
    /// assert_eq!(table.get(1, 0), Some(&Cell::Number(-2.0)));
    /// ```
    #[must_use]
    pub fn from_column(label: &str, values: &[f64]) -> Self {
        let cells = Array2::from_shape_fn((values.len(), 1), |(r, _)| Cell::Number(values[r]));
        Self {
            columns: vec![label.to_owned()],
            cells,
        }
    }

    /// Drop empty rows, then empty columns, and renumber rows from zero.
    ///
    /// Row emptiness is judged over every column of the original block, and
    /// column emptiness over the rows that survived. Columns keep their labels.
    ///
    /// # Examples
    /// ```
    /// use ndarray::array;
    /// use stiffsheet::{Cell, Table};
    ///
    /// let table = Table::new(
    ///     vec!["0".into(), "1".into()],
    ///     array![[Cell::Empty, Cell::Empty], [Cell::Empty, Cell::Number(5.0)]],
    /// );
    /// let cleaned = table.clean();
    /// assert_eq!(cleaned.columns(), ["1".to_string()]);
    /// assert_eq!(cleaned.get(0, 0), Some(&Cell::Number(5.0)));
    /// ```
    #[must_use]
    pub fn clean(&self) -> Self {
        let keep_rows: Vec<usize> = (0..self.nrows())
            .filter(|&r| !self.cells.row(r).iter().all(Cell::is_empty))
            .collect();
        let keep_cols: Vec<usize> = (0..self.ncols())
            .filter(|&c| !keep_rows.iter().all(|&r| self.cells[[r, c]].is_empty()))
            .collect();

        let cells = Array2::from_shape_fn((keep_rows.len(), keep_cols.len()), |(r, c)| {
            self.cells[[keep_rows[r], keep_cols[c]]].clone()
        });
        let columns = keep_cols.iter().map(|&c| self.columns[c].clone()).collect();
        Self { columns, cells }
    }

    /// Column labels in order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of data rows.
    #[must_use]
    pub fn nrows(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of columns.
    #[must_use]
    pub fn ncols(&self) -> usize {
        self.cells.ncols()
    }

    /// Whether the table holds no cells at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at the given position, or `None` outside the table.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cells.get([row, col])
    }

    /// Iterate over the data rows.
    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, Cell>> {
        self.cells.rows().into_iter()
    }
}
