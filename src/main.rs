mod analysis;
mod conditions;
mod summary;

use analysis::run_analysis;
use conditions::{RunConfig, CONFIG_FILE};
use std::path::Path;
use summary::render_summary;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Paths and the load case default to the reference exam layout; a
    // stiffsheet.json next to the workbook overrides any of them.
    let config = RunConfig::load_or_default(Path::new(CONFIG_FILE))?;

    // Read the marked sections, solve the partitioned stiffness system
    // (https://en.wikipedia.org/wiki/Direct_stiffness_method), write the
    // results workbook and render the internal force diagrams.
    let summary = run_analysis(&config)?;

    let report = render_summary(&summary);
    println!("{report}");

    Ok(())
}
