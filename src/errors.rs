//! Error types produced while reading, solving, reporting and plotting.

use std::path::PathBuf;

use thiserror::Error;

/// Error returned when an input workbook cannot be turned into a grid.
#[derive(Debug, Error)]
pub enum WorkbookError {
    /// Returned when the file cannot be opened or is not a recognised workbook.
    #[error("failed to open workbook {path}: {source}")]
    Open {
        /// Location of the workbook.
        path: PathBuf,
        /// Error reported by the spreadsheet reader.
        #[source]
        source: calamine::Error,
    },
    /// Returned when a worksheet exists but its cells cannot be decoded.
    #[error("failed to read worksheet {sheet:?} from {path}: {source}")]
    Worksheet {
        /// Location of the workbook.
        path: PathBuf,
        /// Name of the worksheet, or its position when read by index.
        sheet: String,
        /// Error reported by the spreadsheet reader.
        #[source]
        source: calamine::Error,
    },
    /// Returned when the workbook holds no worksheet at all.
    #[error("workbook {0} contains no worksheets")]
    NoWorksheets(PathBuf),
}

/// Error returned when the free partition of the stiffness matrix cannot be solved.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum SolveError {
    /// Returned when the free-free block is singular or numerically indistinguishable
    /// from a singular matrix.
    #[error("free stiffness block is singular; check supports and stiffness terms")]
    SingularMatrix,
}

/// Error returned when the results workbook cannot be written.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Returned when the workbook writer rejects a sheet, a cell or the save.
    #[error("failed to write report: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    /// Returned when a table has more rows or columns than a worksheet holds.
    #[error("table for sheet {sheet:?} is {rows}x{cols}, beyond worksheet limits")]
    TooLarge {
        /// Sheet the table was meant for.
        sheet: String,
        /// Data rows in the table.
        rows: usize,
        /// Columns in the table.
        cols: usize,
    },
}

/// Error returned when internal force diagrams cannot be rendered.
#[derive(Debug, Error)]
pub enum DiagramError {
    /// Returned when a curve does not have one value per position.
    #[error("{curve} has {actual} values but there are {expected} positions")]
    LengthMismatch {
        /// Name of the offending curve.
        curve: &'static str,
        /// Number of positions along the element.
        expected: usize,
        /// Number of values supplied for the curve.
        actual: usize,
    },
    /// Returned when there are no positions to plot.
    #[error("diagrams need at least one position along the element")]
    EmptySeries,
    /// Returned when the output directory cannot be created.
    #[error("failed to create image directory {path}: {source}")]
    CreateDir {
        /// Directory that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Returned when the bundled chart font cannot be parsed.
    #[error("bundled chart font could not be loaded")]
    Font,
    /// Returned when the plotting backend fails to draw or save an image.
    #[error("failed to render {path}: {message}")]
    Render {
        /// Image that was being written.
        path: PathBuf,
        /// Description provided by the plotting backend.
        message: String,
    },
}
