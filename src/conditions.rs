use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use stiffsheet::{ForceVector, StiffnessMatrix, DOFS};

/// Name of the optional configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "stiffsheet.json";

/// Load case applied to the six degree-of-freedom system.
///
/// The default is a diagonal stiffness of 1000 with a horizontal and a
/// vertical load on the free node, which keeps the solve easy to check by
/// hand (d = F / k).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadCase {
    /// Global stiffness matrix, one inner array per row.
    pub stiffness: [[f64; DOFS]; DOFS],
    /// Nodal forces, free degrees of freedom first.
    pub forces: [f64; DOFS],
}

impl Default for LoadCase {
    fn default() -> Self {
        let mut stiffness = [[0.0; DOFS]; DOFS];
        for (i, row) in stiffness.iter_mut().enumerate() {
            row[i] = 1_000.0;
        }
        Self {
            stiffness,
            forces: [100.0, 0.0, -200.0, 0.0, 0.0, 0.0],
        }
    }
}

impl LoadCase {
    /// Stiffness matrix in algebraic form.
    pub fn stiffness_matrix(&self) -> StiffnessMatrix {
        StiffnessMatrix::from_fn(|r, c| self.stiffness[r][c])
    }

    /// Force vector in algebraic form.
    pub fn force_vector(&self) -> ForceVector {
        ForceVector::from_column_slice(&self.forces)
    }
}

/// Sampling of the internal force diagrams.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiagramSettings {
    /// Element length in metres.
    pub length: f64,
    /// Number of evenly spaced positions along the element.
    pub samples: usize,
}

impl Default for DiagramSettings {
    fn default() -> Self {
        Self {
            length: 10.0,
            samples: 100,
        }
    }
}

/// Everything the run needs to know: file locations, the load case and plotting.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Input workbook holding the marked sections.
    pub input: PathBuf,
    /// Results workbook, replaced on every run.
    pub output: PathBuf,
    /// Directory receiving the diagram images.
    pub image_dir: PathBuf,
    /// Stiffness matrix and forces for the equilibrium solve.
    pub load_case: LoadCase,
    /// Diagram sampling.
    pub diagram: DiagramSettings,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("SEGUNDOEXAMENBRAZOSRIGIDOS3D2.xlsx"),
            output: PathBuf::from("Resultados_Sistema_Estructural.xlsx"),
            image_dir: PathBuf::from("output"),
            load_case: LoadCase::default(),
            diagram: DiagramSettings::default(),
        }
    }
}

impl RunConfig {
    /// Read the configuration at `path`, or fall back to the defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("temporary directory");
        let config =
            RunConfig::load_or_default(&dir.path().join(CONFIG_FILE)).expect("defaults apply");
        assert_eq!(config, RunConfig::default());
        assert_eq!(config.load_case.stiffness_matrix(), StiffnessMatrix::identity() * 1000.0);
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().expect("temporary directory");
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(
            &path,
            r#"{ "image_dir": "plots", "load_case": { "forces": [1, 2, 3, 4, 5, 6] } }"#,
        )
        .expect("config written");

        let config = RunConfig::load_or_default(&path).expect("config parsed");
        assert_eq!(config.image_dir, PathBuf::from("plots"));
        assert_eq!(config.input, RunConfig::default().input);
        assert_eq!(config.load_case.forces, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(config.load_case.stiffness, LoadCase::default().stiffness);
        assert_eq!(config.diagram, DiagramSettings::default());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let dir = tempfile::tempdir().expect("temporary directory");
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "ouput": "typo.xlsx" }"#).expect("config written");
        assert!(RunConfig::load_or_default(&path).is_err());
    }

    #[test]
    fn stiffness_rows_map_to_matrix_rows() {
        let mut load_case = LoadCase::default();
        load_case.stiffness[3][0] = -5.0;
        let matrix = load_case.stiffness_matrix();
        assert_eq!(matrix[(3, 0)], -5.0);
        assert_eq!(matrix[(0, 3)], 0.0);
    }
}
