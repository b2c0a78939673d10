//! Cell values and the raw two dimensional grid read from a worksheet.

use std::borrow::Cow;

use ndarray::{Array2, ArrayView1};

/// Value held by a single spreadsheet cell.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Cell {
    /// Numeric value. Spreadsheets store integers and floats alike as `f64`.
    Number(f64),
    /// Text value. Whitespace-only text is still text, not an empty cell.
    Text(String),
    /// Cell without any value.
    #[default]
    Empty,
}

impl Cell {
    /// Return `true` when the cell carries no value.
    ///
    /// # Examples
    /// ```
    /// use stiffsheet::Cell;
    ///
    /// assert!(Cell::Empty.is_empty());
    /// assert!(!Cell::Number(0.0).is_empty());
    /// assert!(!Cell::Text(" ".into()).is_empty());
    /// ```
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Return the numeric value of the cell, if it holds one.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Text representation used when searching for section markers.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Cell::Number(value) => Cow::Owned(value.to_string()),
            Cell::Text(text) => Cow::Borrowed(text),
            Cell::Empty => Cow::Borrowed(""),
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_owned())
    }
}

impl From<&calamine::Data> for Cell {
    fn from(value: &calamine::Data) -> Self {
        use calamine::Data;
        match value {
            Data::Float(v) => Cell::Number(*v),
            Data::Int(v) => Cell::Number(*v as f64),
            Data::String(v) => Cell::Text(v.clone()),
            Data::Bool(true) => Cell::Text("TRUE".to_owned()),
            Data::Bool(false) => Cell::Text("FALSE".to_owned()),
            Data::DateTime(v) => Cell::Text(v.to_string()),
            Data::DateTimeIso(v) | Data::DurationIso(v) => Cell::Text(v.clone()),
            Data::Error(v) => Cell::Text(format!("{v}")),
            Data::Empty => Cell::Empty,
        }
    }
}

/// Rectangular table of cells addressed by absolute sheet position.
///
/// Row 0 and column 0 are the first row and column of the worksheet, even
/// when the worksheet itself starts further down or to the right.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Grid {
    /// Row-major cell storage.
    cells: Array2<Cell>,
}

impl Grid {
    /// Wrap an existing array of cells.
    #[must_use]
    pub fn new(cells: Array2<Cell>) -> Self {
        Self { cells }
    }

    /// Build a grid from ragged rows, padding short rows with empty cells.
    ///
    /// # Examples
    /// ```
    /// use stiffsheet::{Cell, Grid};
    ///
    /// let grid = Grid::from_rows(vec![
    ///     vec![Cell::from("a")],
    ///     vec![Cell::Empty, Cell::Number(2.0)],
    /// ]);
    /// assert_eq!((grid.nrows(), grid.ncols()), (2, 2));
    /// assert_eq!(grid.get(0, 1), Some(&Cell::Empty));
    /// ```
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        let nrows = rows.len();
        let ncols = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut cells = Array2::from_elem((nrows, ncols), Cell::Empty);
        for (r, row) in rows.into_iter().enumerate() {
            for (c, cell) in row.into_iter().enumerate() {
                cells[[r, c]] = cell;
            }
        }
        Self { cells }
    }

    /// Convert a worksheet range into a grid, keeping absolute positions.
    pub(crate) fn from_range(range: &calamine::Range<calamine::Data>) -> Self {
        let Some((start_row, start_col)) = range.start() else {
            return Self::default();
        };
        let (height, width) = range.get_size();
        let row_offset = start_row as usize;
        let col_offset = start_col as usize;
        let cells = Array2::from_shape_fn((row_offset + height, col_offset + width), |(r, c)| {
            if r < row_offset || c < col_offset {
                return Cell::Empty;
            }
            range
                .get((r - row_offset, c - col_offset))
                .map_or(Cell::Empty, Cell::from)
        });
        Self { cells }
    }

    /// Number of rows in the grid.
    #[must_use]
    pub fn nrows(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of columns in the grid.
    #[must_use]
    pub fn ncols(&self) -> usize {
        self.cells.ncols()
    }

    /// Cell at the given position, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cells.get([row, col])
    }

    /// View of a full row.
    ///
    /// # Panics
    ///
    /// Panics when `row` is outside the grid.
    #[must_use]
    pub fn row(&self, row: usize) -> ArrayView1<'_, Cell> {
        self.cells.row(row)
    }

    /// Borrow the underlying cell array.
    #[must_use]
    pub fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }
}
