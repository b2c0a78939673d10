use crate::analysis::AnalysisSummary;
use std::fmt::Write;

/// Render a textual summary of the equilibrium solve and the files written.
///
/// Displacements are listed for the free degrees of freedom and reactions for
/// the supports, in the same order as the stiffness matrix rows.
#[must_use]
pub fn render_summary(summary: &AnalysisSummary) -> String {
    let mut output = String::new();

    writeln!(&mut output, "Static equilibrium (free DOFs 1-3, supports 4-6)")
        .expect("writing to string cannot fail");

    for (i, value) in summary.solution.displacements.iter().enumerate() {
        writeln!(&mut output, "  d{} = {value:+.4e}", i + 1)
            .expect("writing to string cannot fail");
    }
    for (i, value) in summary.solution.reactions.iter().enumerate() {
        writeln!(&mut output, "  R{} = {value:+.4e}", i + 4)
            .expect("writing to string cannot fail");
    }

    writeln!(
        &mut output,
        "Results: {} ({})",
        summary.output.display(),
        summary.sheets.join(", ")
    )
    .expect("writing to string cannot fail");

    if summary.images.is_empty() {
        output.push_str("Diagrams: none written\n");
    } else {
        let images: Vec<String> = summary
            .images
            .iter()
            .map(|path| path.display().to_string())
            .collect();
        writeln!(&mut output, "Diagrams: {}", images.join(", "))
            .expect("writing to string cannot fail");
    }

    output
}
