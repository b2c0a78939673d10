//! Locating marked sections in a grid and slicing fixed-size blocks out of it.

use ndarray::s;

use crate::grid::Grid;
use crate::table::Table;

/// Find the first row containing any of the given markers.
///
/// A row matches when the text of one of its cells contains a marker,
/// ignoring case. Empty markers never match.
///
/// # Examples
/// ```
/// use stiffsheet::{find_section, Cell, Grid};
///
/// let grid = Grid::from_rows(vec![
///     vec![Cell::from("title")],
///     vec![Cell::Number(1.0), Cell::from("Nodal COORDINATES table")],
/// ]);
/// assert_eq!(find_section(&grid, &["nodal coordinates"]), Some(1));
/// assert_eq!(find_section(&grid, &["stiffness"]), None);
/// ```
#[must_use]
pub fn find_section(grid: &Grid, markers: &[&str]) -> Option<usize> {
    let needles: Vec<String> = markers
        .iter()
        .filter(|marker| !marker.is_empty())
        .map(|marker| marker.to_lowercase())
        .collect();
    if needles.is_empty() {
        return None;
    }
    (0..grid.nrows()).find(|&row| {
        grid.row(row).iter().any(|cell| {
            let text = cell.text().to_lowercase();
            needles.iter().any(|needle| text.contains(needle.as_str()))
        })
    })
}

/// Cut a `rows` x `cols` block out of the grid starting at `(start_row, start_col)`.
///
/// The block is clamped to the grid, so a request running past the edge
/// returns whatever is available. Column labels are the absolute column
/// indices of the grid.
///
/// # Examples
/// ```
/// use stiffsheet::{extract_block, Cell, Grid};
///
/// let grid = Grid::from_rows(vec![vec![Cell::Number(1.0), Cell::Number(2.0)]]);
/// let block = extract_block(&grid, 0, 5, 5, 1);
/// assert_eq!((block.nrows(), block.ncols()), (1, 1));
/// assert_eq!(block.columns(), ["1".to_string()]);
/// ```
#[must_use]
pub fn extract_block(
    grid: &Grid,
    start_row: usize,
    rows: usize,
    cols: usize,
    start_col: usize,
) -> Table {
    let row_end = start_row.saturating_add(rows).min(grid.nrows());
    let row_start = start_row.min(row_end);
    let col_end = start_col.saturating_add(cols).min(grid.ncols());
    let col_start = start_col.min(col_end);

    let cells = grid
        .cells()
        .slice(s![row_start..row_end, col_start..col_end])
        .to_owned();
    let columns = (col_start..col_end).map(|c| c.to_string()).collect();
    Table::new(columns, cells)
}
