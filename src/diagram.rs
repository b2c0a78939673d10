//! Internal force diagrams along a single element.

use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use plotters::prelude::*;
use plotters::style::register_font;
use tracing::{debug, info};

use crate::errors::DiagramError;

/// Image size in pixels.
const IMAGE_SIZE: (u32, u32) = (800, 500);

/// Label shared by the horizontal axis of every diagram.
const POSITION_LABEL: &str = "Posición a lo largo del elemento (m)";

/// Family name every chart text element asks plotters for.
const FONT_FAMILY: &str = "sans-serif";

/// Font shipped with the crate so rendering does not depend on system fonts.
const FONT_BYTES: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// Whether [`FONT_BYTES`] was accepted by plotters, decided on first use.
static FONT_REGISTERED: OnceLock<bool> = OnceLock::new();

/// Axial force, shear and bending moment sampled at common positions.
#[derive(Clone, Debug, PartialEq)]
pub struct InternalForceDiagrams {
    /// Positions along the element in metres.
    positions: Vec<f64>,
    /// Axial force in kN.
    axial: Vec<f64>,
    /// Shear force in kN.
    shear: Vec<f64>,
    /// Bending moment in kN·m.
    moment: Vec<f64>,
}

impl InternalForceDiagrams {
    /// Bundle curves sampled at the same positions.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::EmptySeries`] when there are no positions and
    /// [`DiagramError::LengthMismatch`] when a curve has a different length.
    pub fn new(
        positions: Vec<f64>,
        axial: Vec<f64>,
        shear: Vec<f64>,
        moment: Vec<f64>,
    ) -> Result<Self, DiagramError> {
        if positions.is_empty() {
            return Err(DiagramError::EmptySeries);
        }
        for (curve, values) in [("axial force", &axial), ("shear", &shear), ("moment", &moment)] {
            if values.len() != positions.len() {
                return Err(DiagramError::LengthMismatch {
                    curve,
                    expected: positions.len(),
                    actual: values.len(),
                });
            }
        }
        Ok(Self {
            positions,
            axial,
            shear,
            moment,
        })
    }

    /// Sample the reference curves at `samples` evenly spaced positions on `[0, length]`.
    ///
    /// Axial force is `-100 x`, shear is `50 (L - x)` and moment is
    /// `0.5 x (L - x)`.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::EmptySeries`] when `samples` is zero.
    ///
    /// # Examples
    /// ```
    /// use stiffsheet::InternalForceDiagrams;
    ///
    /// let diagrams = InternalForceDiagrams::sample(10.0, 100).unwrap();
    /// assert_eq!(diagrams.positions().len(), 100);
    /// assert_eq!(diagrams.shear()[0], 500.0);
    /// ```
    pub fn sample(length: f64, samples: usize) -> Result<Self, DiagramError> {
        let positions = linspace(0.0, length, samples);
        let axial = positions.iter().map(|x| -100.0 * x).collect();
        let shear = positions.iter().map(|x| 50.0 * (length - x)).collect();
        let moment = positions.iter().map(|x| 0.5 * x * (length - x)).collect();
        Self::new(positions, axial, shear, moment)
    }

    /// Positions along the element.
    #[must_use]
    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// Axial force values.
    #[must_use]
    pub fn axial(&self) -> &[f64] {
        &self.axial
    }

    /// Shear force values.
    #[must_use]
    pub fn shear(&self) -> &[f64] {
        &self.shear
    }

    /// Bending moment values.
    #[must_use]
    pub fn moment(&self) -> &[f64] {
        &self.moment
    }
}

/// `samples` evenly spaced values from `start` to `end`, both included.
fn linspace(start: f64, end: f64, samples: usize) -> Vec<f64> {
    match samples {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (samples - 1) as f64;
            (0..samples).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Fixed styling for one diagram.
struct ChartStyle {
    /// Image file name inside the output directory.
    file_name: &'static str,
    /// Caption drawn above the chart.
    title: &'static str,
    /// Vertical axis description.
    y_label: &'static str,
    /// Series name shown in the legend.
    legend: &'static str,
    /// Line and legend colour.
    colour: RGBColor,
}

/// Axial force chart, drawn in blue.
const AXIAL_STYLE: ChartStyle = ChartStyle {
    file_name: "fuerza_axial.png",
    title: "Diagrama de Fuerza Axial",
    y_label: "Fuerza Axial (kN)",
    legend: "Fuerza Axial",
    colour: RGBColor(31, 119, 180),
};

/// Shear force chart, drawn in orange.
const SHEAR_STYLE: ChartStyle = ChartStyle {
    file_name: "fuerza_cortante.png",
    title: "Diagrama de Fuerza Cortante",
    y_label: "Fuerza Cortante (kN)",
    legend: "Fuerza Cortante",
    colour: RGBColor(255, 127, 14),
};

/// Bending moment chart, drawn in green.
const MOMENT_STYLE: ChartStyle = ChartStyle {
    file_name: "momento_flector.png",
    title: "Diagrama de Momento Flector",
    y_label: "Momento Flector (kN·m)",
    legend: "Momento Flector",
    colour: RGBColor(44, 160, 44),
};

/// Render the axial, shear and moment diagrams as PNG files in `directory`.
///
/// The directory is created when missing. Returns the written paths in the
/// order axial, shear, moment.
///
/// # Errors
///
/// Returns [`DiagramError::CreateDir`] when the directory cannot be created,
/// [`DiagramError::Font`] when the bundled font is rejected and
/// [`DiagramError::Render`] when an image cannot be drawn or saved.
pub fn plot_diagrams(
    diagrams: &InternalForceDiagrams,
    directory: &Path,
) -> Result<Vec<PathBuf>, DiagramError> {
    register_chart_font()?;
    std::fs::create_dir_all(directory).map_err(|source| DiagramError::CreateDir {
        path: directory.to_path_buf(),
        source,
    })?;

    let curves = [
        (&AXIAL_STYLE, diagrams.axial()),
        (&SHEAR_STYLE, diagrams.shear()),
        (&MOMENT_STYLE, diagrams.moment()),
    ];
    let mut written = Vec::with_capacity(curves.len());
    for (style, values) in curves {
        let path = directory.join(style.file_name);
        draw_chart(&path, style, diagrams.positions(), values).map_err(|err| {
            DiagramError::Render {
                path: path.clone(),
                message: err.to_string(),
            }
        })?;
        info!(path = %path.display(), "wrote diagram");
        written.push(path);
    }
    Ok(written)
}

/// Make the bundled font available to plotters under [`FONT_FAMILY`].
///
/// Registration happens once per process; later calls report the first outcome.
fn register_chart_font() -> Result<(), DiagramError> {
    let registered = *FONT_REGISTERED.get_or_init(|| {
        let ok = register_font(FONT_FAMILY, FontStyle::Normal, FONT_BYTES).is_ok();
        debug!(family = FONT_FAMILY, ok, "registered chart font");
        ok
    });
    if registered {
        Ok(())
    } else {
        Err(DiagramError::Font)
    }
}

/// Padded axis range covering every value.
fn axis_range(values: &[f64]) -> Range<f64> {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if !min.is_finite() || !max.is_finite() {
        return -1.0..1.0;
    }
    let span = max - min;
    let pad = if span > 0.0 { span * 0.05 } else { min.abs().max(1.0) * 0.05 };
    (min - pad)..(max + pad)
}

/// Draw one curve with its caption, mesh and legend, then save it to `path`.
fn draw_chart(
    path: &Path,
    style: &ChartStyle,
    positions: &[f64],
    values: &[f64],
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, IMAGE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(style.title, (FONT_FAMILY, 24))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(axis_range(positions), axis_range(values))?;

    chart
        .configure_mesh()
        .x_desc(POSITION_LABEL)
        .y_desc(style.y_label)
        .draw()?;

    let colour = style.colour;
    chart
        .draw_series(LineSeries::new(
            positions.iter().copied().zip(values.iter().copied()),
            colour.stroke_width(2),
        ))?
        .label(style.legend)
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], colour.stroke_width(2)));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn reference_curves_match_closed_form() {
        let diagrams = InternalForceDiagrams::sample(10.0, 100).expect("samples requested");
        let last = diagrams.positions().len() - 1;

        assert_relative_eq!(diagrams.positions()[last], 10.0, epsilon = 1.0e-12);
        assert_relative_eq!(diagrams.positions()[1], 10.0 / 99.0, epsilon = 1.0e-12);
        assert_relative_eq!(diagrams.axial()[last], -1_000.0, epsilon = 1.0e-9);
        assert_relative_eq!(diagrams.shear()[0], 500.0, epsilon = 1.0e-9);
        assert_relative_eq!(diagrams.shear()[last], 0.0, epsilon = 1.0e-9);
        assert_relative_eq!(diagrams.moment()[0], 0.0, epsilon = 1.0e-12);
        assert_relative_eq!(diagrams.moment()[last], 0.0, epsilon = 1.0e-9);
    }

    #[test]
    fn mismatched_curves_are_rejected() {
        let error = InternalForceDiagrams::new(
            vec![0.0, 1.0],
            vec![0.0, 1.0],
            vec![0.0],
            vec![0.0, 1.0],
        )
        .expect_err("shear too short");
        assert!(matches!(
            error,
            DiagramError::LengthMismatch {
                curve: "shear",
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn empty_positions_are_rejected() {
        let error = InternalForceDiagrams::new(vec![], vec![], vec![], vec![])
            .expect_err("nothing to plot");
        assert!(matches!(error, DiagramError::EmptySeries));
    }

    #[test]
    fn zero_samples_are_rejected() {
        let error = InternalForceDiagrams::sample(10.0, 0).expect_err("nothing sampled");
        assert!(matches!(error, DiagramError::EmptySeries));
    }

    #[test]
    fn flat_series_get_a_drawable_range() {
        let range = axis_range(&[0.0, 0.0]);
        assert!(range.start < range.end);
        let range = axis_range(&[-3.0, 5.0]);
        assert_relative_eq!(range.start, -3.4, epsilon = 1.0e-12);
        assert_relative_eq!(range.end, 5.4, epsilon = 1.0e-12);
    }

    #[test]
    fn single_sample_sits_at_start() {
        assert_eq!(linspace(2.0, 8.0, 1), vec![2.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn bundled_font_registers() {
        assert!(register_chart_font().is_ok());
        assert!(register_chart_font().is_ok());
    }

    #[test]
    fn renders_three_images() {
        let dir = tempfile::tempdir().expect("temporary directory");
        let target = dir.path().join("output");
        let diagrams = InternalForceDiagrams::sample(10.0, 100).expect("samples requested");

        let paths = plot_diagrams(&diagrams, &target).expect("diagrams rendered");
        let names: Vec<_> = paths
            .iter()
            .filter_map(|path| path.file_name()?.to_str())
            .collect();
        assert_eq!(
            names,
            ["fuerza_axial.png", "fuerza_cortante.png", "momento_flector.png"]
        );
        assert!(paths.iter().all(|path| path.is_file()));
        for path in &paths {
            let bytes = std::fs::read(path).expect("image readable");
            assert!(bytes.starts_with(b"\x89PNG"));
        }
    }

    #[test]
    fn file_in_place_of_directory_is_reported() {
        let dir = tempfile::tempdir().expect("temporary directory");
        let blocker = dir.path().join("output");
        std::fs::write(&blocker, b"not a directory").expect("file written");
        let diagrams = InternalForceDiagrams::sample(10.0, 3).expect("samples requested");

        let error = plot_diagrams(&diagrams, &blocker).expect_err("path is a file");
        match error {
            DiagramError::CreateDir { path, .. } => assert_eq!(path, blocker),
            other => panic!("unexpected error: {other}"),
        }
        assert!(blocker.is_file());
    }
}
