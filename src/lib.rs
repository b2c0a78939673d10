#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod diagram;
pub mod equilibrium;
pub mod errors;
pub mod grid;
pub mod report;
pub mod section;
pub mod table;
pub mod workbook;

pub use diagram::{plot_diagrams, InternalForceDiagrams};
pub use equilibrium::{
    solve_equilibrium, EquilibriumSolution, ForceVector, StiffnessMatrix, DOFS, FREE_DOFS,
};
pub use errors::{DiagramError, ReportError, SolveError, WorkbookError};
pub use grid::{Cell, Grid};
pub use report::Report;
pub use section::{extract_block, find_section};
pub use table::Table;
pub use workbook::{
    read_grid, read_sections, read_sheet, read_structural_data, SectionKind, StructuralData,
};
