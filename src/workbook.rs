//! Reading the input workbook and pulling out its four structural sections.

use std::path::Path;

use calamine::{open_workbook_auto, Reader};
use tracing::{debug, info, warn};

use crate::errors::WorkbookError;
use crate::grid::Grid;
use crate::section::{extract_block, find_section};
use crate::table::Table;

/// Rows between a section marker and the first row of its content.
pub const CONTENT_OFFSET: usize = 2;

/// The sections laid out in the input workbook.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionKind {
    /// Elastic modulus, shear modulus and similar material data.
    MechanicalProperties,
    /// Node coordinates of the structural system.
    NodalCoordinates,
    /// Section areas and inertias per element.
    PhysicalProperties,
    /// Local stiffness matrix of the flexible element.
    StiffnessMatrix,
}

impl SectionKind {
    /// All sections in reading and reporting order.
    pub const ALL: [SectionKind; 4] = [
        SectionKind::MechanicalProperties,
        SectionKind::NodalCoordinates,
        SectionKind::PhysicalProperties,
        SectionKind::StiffnessMatrix,
    ];

    /// Marker phrases that open the section. Any of them identifies it.
    #[must_use]
    pub fn markers(self) -> &'static [&'static str] {
        match self {
            SectionKind::MechanicalProperties => &[
                "PROPIEDADES MECÁNICAS DE LA ESTRUCTURA",
                "mechanical properties of the structure",
            ],
            SectionKind::NodalCoordinates => &[
                "COORDENADAS DEL SISTEMA ESTRUCTURAL",
                "coordinates of the structural system",
            ],
            SectionKind::PhysicalProperties => &[
                "PROPIEDADES FÍSICAS DE LOS ELEMENTOS",
                "physical properties of the elements",
            ],
            SectionKind::StiffnessMatrix => &[
                "MATRIZ DE RIGIDEZ DEL ELEMENTO FLEXIBLE",
                "stiffness matrix of the flexible element",
            ],
        }
    }

    /// Number of rows and columns occupied by the section content.
    #[must_use]
    pub fn shape(self) -> (usize, usize) {
        match self {
            SectionKind::MechanicalProperties => (5, 5),
            SectionKind::NodalCoordinates => (4, 7),
            SectionKind::PhysicalProperties => (4, 8),
            SectionKind::StiffnessMatrix => (12, 12),
        }
    }

    /// Name of the results sheet the section is copied to.
    #[must_use]
    pub fn sheet_name(self) -> &'static str {
        match self {
            SectionKind::MechanicalProperties => "Propiedades Mecánicas",
            SectionKind::NodalCoordinates => "Coordenadas de los Nodos",
            SectionKind::PhysicalProperties => "Propiedades Físicas",
            SectionKind::StiffnessMatrix => "Matriz de Rigidez Local",
        }
    }

    /// Locate, extract and clean this section. `None` when its marker is absent.
    #[must_use]
    pub fn read(self, grid: &Grid) -> Option<Table> {
        let Some(marker_row) = find_section(grid, self.markers()) else {
            warn!(section = ?self, "section marker not found");
            return None;
        };
        let (rows, cols) = self.shape();
        let block = extract_block(grid, marker_row + CONTENT_OFFSET, rows, cols, 0);
        let table = block.clean();
        debug!(
            section = ?self,
            marker_row,
            rows = table.nrows(),
            cols = table.ncols(),
            "section extracted"
        );
        Some(table)
    }
}

/// Tables read from the input workbook. Absent sections are `None`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StructuralData {
    /// Mechanical properties of the structure.
    pub mechanical_properties: Option<Table>,
    /// Coordinates of the structural system.
    pub nodal_coordinates: Option<Table>,
    /// Physical properties of the elements.
    pub physical_properties: Option<Table>,
    /// Stiffness matrix of the flexible element.
    pub stiffness_matrix: Option<Table>,
}

impl StructuralData {
    /// Table for a given section.
    #[must_use]
    pub fn get(&self, kind: SectionKind) -> Option<&Table> {
        match kind {
            SectionKind::MechanicalProperties => self.mechanical_properties.as_ref(),
            SectionKind::NodalCoordinates => self.nodal_coordinates.as_ref(),
            SectionKind::PhysicalProperties => self.physical_properties.as_ref(),
            SectionKind::StiffnessMatrix => self.stiffness_matrix.as_ref(),
        }
    }

    /// Every section with its table, in reporting order.
    pub fn sections(&self) -> impl Iterator<Item = (SectionKind, Option<&Table>)> + '_ {
        SectionKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }
}

/// Read the four structural sections out of a grid.
///
/// # Examples
/// ```
/// use stiffsheet::{read_sections, Cell, Grid};
///
/// let grid = Grid::from_rows(vec![vec![Cell::from("nothing to see")]]);
/// let data = read_sections(&grid);
/// assert!(data.sections().all(|(_, table)| table.is_none()));
/// ```
#[must_use]
pub fn read_sections(grid: &Grid) -> StructuralData {
    StructuralData {
        mechanical_properties: SectionKind::MechanicalProperties.read(grid),
        nodal_coordinates: SectionKind::NodalCoordinates.read(grid),
        physical_properties: SectionKind::PhysicalProperties.read(grid),
        stiffness_matrix: SectionKind::StiffnessMatrix.read(grid),
    }
}

/// Load the first worksheet of a workbook as a grid.
///
/// # Errors
///
/// Returns [`WorkbookError`] when the file cannot be opened, has no
/// worksheets, or its first worksheet cannot be decoded.
pub fn read_grid(path: &Path) -> Result<Grid, WorkbookError> {
    let mut workbook = open_workbook_auto(path).map_err(|source| WorkbookError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| WorkbookError::NoWorksheets(path.to_path_buf()))?
        .map_err(|source| WorkbookError::Worksheet {
            path: path.to_path_buf(),
            sheet: "#0".to_owned(),
            source,
        })?;
    let grid = Grid::from_range(&range);
    info!(
        path = %path.display(),
        rows = grid.nrows(),
        cols = grid.ncols(),
        "read input worksheet"
    );
    Ok(grid)
}

/// Load a named worksheet of a workbook as a grid.
///
/// # Errors
///
/// Returns [`WorkbookError`] when the file cannot be opened or the worksheet
/// is missing or cannot be decoded.
pub fn read_sheet(path: &Path, name: &str) -> Result<Grid, WorkbookError> {
    let mut workbook = open_workbook_auto(path).map_err(|source| WorkbookError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let range = workbook
        .worksheet_range(name)
        .map_err(|source| WorkbookError::Worksheet {
            path: path.to_path_buf(),
            sheet: name.to_owned(),
            source,
        })?;
    Ok(Grid::from_range(&range))
}

/// Read the input workbook and extract its structural sections.
///
/// # Errors
///
/// Returns [`WorkbookError`] when the workbook cannot be read. Missing
/// sections are not errors.
pub fn read_structural_data(path: &Path) -> Result<StructuralData, WorkbookError> {
    let grid = read_grid(path)?;
    Ok(read_sections(&grid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;

    fn sheet_with(markers: &[(usize, &str)], height: usize) -> Grid {
        let mut rows = vec![vec![Cell::Empty; 14]; height];
        for &(row, marker) in markers {
            rows[row][1] = Cell::from(marker);
        }
        Grid::from_rows(rows)
    }

    #[test]
    fn missing_markers_give_absent_tables() {
        let grid = sheet_with(&[(0, "RESUMEN")], 40);
        let data = read_sections(&grid);
        assert_eq!(data, StructuralData::default());
    }

    #[test]
    fn sections_are_read_independently() {
        let mut rows = vec![vec![Cell::Empty; 14]; 30];
        rows[0][0] = Cell::from("Coordenadas del sistema estructural");
        rows[1][0] = Cell::from("Nodo");
        rows[1][1] = Cell::from("X");
        rows[2][0] = Cell::Number(1.0);
        rows[2][1] = Cell::Number(0.0);
        rows[3][0] = Cell::Number(2.0);
        rows[3][1] = Cell::Number(3.5);
        let grid = Grid::from_rows(rows);

        let data = read_sections(&grid);
        assert!(data.mechanical_properties.is_none());
        assert!(data.physical_properties.is_none());
        assert!(data.stiffness_matrix.is_none());

        let coordinates = data.nodal_coordinates.expect("coordinates located");
        assert_eq!(coordinates.columns(), ["0".to_string(), "1".to_string()]);
        assert_eq!(coordinates.nrows(), 2);
        assert_eq!(coordinates.get(1, 1), Some(&Cell::Number(3.5)));
    }

    #[test]
    fn stiffness_block_is_twelve_square() {
        let mut rows = vec![vec![Cell::Empty; 14]; 20];
        rows[2][0] = Cell::from("MATRIZ DE RIGIDEZ DEL ELEMENTO FLEXIBLE");
        for (r, row) in rows.iter_mut().enumerate().skip(4).take(12) {
            for (c, cell) in row.iter_mut().enumerate().take(12) {
                *cell = Cell::Number((r * c) as f64);
            }
            row[13] = Cell::from("outside");
        }
        let grid = Grid::from_rows(rows);

        let table = SectionKind::StiffnessMatrix
            .read(&grid)
            .expect("stiffness located");
        assert_eq!((table.nrows(), table.ncols()), (12, 12));
        assert_eq!(table.get(11, 11), Some(&Cell::Number(15.0 * 11.0)));
    }

    #[test]
    fn section_at_bottom_of_sheet_is_truncated() {
        let grid = sheet_with(&[(38, "propiedades físicas de los elementos")], 40);
        let table = SectionKind::PhysicalProperties
            .read(&grid)
            .expect("marker located");
        assert!(table.is_empty());
    }

    #[test]
    fn sections_iterate_in_report_order() {
        let data = StructuralData::default();
        let names: Vec<_> = data.sections().map(|(kind, _)| kind.sheet_name()).collect();
        assert_eq!(
            names,
            [
                "Propiedades Mecánicas",
                "Coordenadas de los Nodos",
                "Propiedades Físicas",
                "Matriz de Rigidez Local"
            ]
        );
    }
}
