use std::path::PathBuf;

use anyhow::Context;
use stiffsheet::{
    plot_diagrams, read_structural_data, solve_equilibrium, EquilibriumSolution,
    InternalForceDiagrams, Report, StructuralData, Table,
};
use tracing::info;

use crate::conditions::RunConfig;

/// Sheet holding the free displacements.
pub const DISPLACEMENTS_SHEET: &str = "Desplazamientos";

/// Sheet holding the support reactions.
pub const REACTIONS_SHEET: &str = "Reacciones";

/// What a run produced, exposed for the text summary.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSummary {
    /// Solved displacements and reactions.
    pub solution: EquilibriumSolution,
    /// Names of the sheets actually written.
    pub sheets: Vec<String>,
    /// Results workbook location.
    pub output: PathBuf,
    /// Diagram images written.
    pub images: Vec<PathBuf>,
}

/// Assemble the results workbook from the extracted sections and the solve.
///
/// Sections come first in their fixed order, followed by displacements and
/// reactions.
pub fn build_report(data: &StructuralData, solution: &EquilibriumSolution) -> Report {
    let mut report = Report::new();
    for (kind, table) in data.sections() {
        report.push(kind.sheet_name(), table.cloned());
    }
    report.push(
        DISPLACEMENTS_SHEET,
        Some(Table::from_column(
            DISPLACEMENTS_SHEET,
            solution.displacements.as_slice(),
        )),
    );
    report.push(
        REACTIONS_SHEET,
        Some(Table::from_column(REACTIONS_SHEET, solution.reactions.as_slice())),
    );
    report
}

/// Read the input, solve the load case, write the results and plot the diagrams.
pub fn run_analysis(config: &RunConfig) -> anyhow::Result<AnalysisSummary> {
    let data = read_structural_data(&config.input)
        .with_context(|| format!("failed to read input: {}", config.input.display()))?;
    let found = data.sections().filter(|(_, table)| table.is_some()).count();
    info!(found, "structural sections extracted");

    // The stiffness section is reported as read; the solve uses the configured
    // load case so the two can be checked independently.
    let solution = solve_equilibrium(
        &config.load_case.stiffness_matrix(),
        &config.load_case.force_vector(),
    )
    .context("equilibrium solve failed")?;

    let report = build_report(&data, &solution);
    report
        .write(&config.output)
        .with_context(|| format!("failed to write results: {}", config.output.display()))?;
    let sheets = report
        .sheets()
        .iter()
        .filter(|(_, table)| table.is_some())
        .map(|(name, _)| name.clone())
        .collect();

    let diagrams = InternalForceDiagrams::sample(config.diagram.length, config.diagram.samples)
        .context("invalid diagram settings")?;
    let images = plot_diagrams(&diagrams, &config.image_dir).with_context(|| {
        format!("failed to plot diagrams in {}", config.image_dir.display())
    })?;

    Ok(AnalysisSummary {
        solution,
        sheets,
        output: config.output.clone(),
        images,
    })
}
