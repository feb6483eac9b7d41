//! Figure generation using plotters (SVG output)
//!
//! Uses the SVG backend to avoid system font dependencies.

use plotters::prelude::*;
use plotters_svg::SVGBackend;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FigureError {
    #[error("failed to render figure: {0}")]
    Render(String),
}

impl FigureError {
    fn from_display(err: impl std::fmt::Display) -> Self {
        Self::Render(err.to_string())
    }
}

fn value_range(values: &[f64]) -> (f64, f64) {
    let max = values.iter().fold(f64::NEG_INFINITY, |max, &v| max.max(v));
    if max <= 0.0 { (0.0, 1.0) } else { (0.0, max * 1.1) }
}

/// Generate the fluctuation-vs-atom-index line plot.
pub fn plot_fluctuation(path: &Path, fluctuation: &[f64]) -> Result<(), FigureError> {
    let root = SVGBackend::new(path, (800, 500)).into_drawing_area();
    root.fill(&WHITE).map_err(FigureError::from_display)?;

    if fluctuation.is_empty() {
        root.draw(&Text::new(
            "No fluctuation data",
            (400, 250),
            ("sans-serif", 20).into_font().color(&BLACK),
        ))
        .map_err(FigureError::from_display)?;
        root.present().map_err(FigureError::from_display)?;
        return Ok(());
    }

    let (min_f, max_f) = value_range(fluctuation);
    let mut chart = ChartBuilder::on(&root)
        .caption("RMS Fluctuation", ("sans-serif", 20))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(1..fluctuation.len() + 1, min_f..max_f)
        .map_err(FigureError::from_display)?;

    chart
        .configure_mesh()
        .x_desc("Residues C-alpha Atoms")
        .y_desc("RMSF (nm)")
        .draw()
        .map_err(FigureError::from_display)?;

    chart
        .draw_series(LineSeries::new(
            fluctuation.iter().enumerate().map(|(i, &f)| (i + 1, f)),
            &BLUE,
        ))
        .map_err(FigureError::from_display)?;

    root.present().map_err(FigureError::from_display)?;
    Ok(())
}

/// Generate the computed-vs-reference B-factor overlay.
///
/// The two tables are drawn against the 1-based atom index; when their lengths
/// differ, each series simply ends where its table does (the tables themselves
/// are never reconciled).
pub fn plot_bfactor_comparison(
    path: &Path,
    computed: &[f64],
    reference: &[f64],
) -> Result<(), FigureError> {
    let root = SVGBackend::new(path, (800, 500)).into_drawing_area();
    root.fill(&WHITE).map_err(FigureError::from_display)?;

    if computed.is_empty() && reference.is_empty() {
        root.draw(&Text::new(
            "No B-factor data",
            (400, 250),
            ("sans-serif", 20).into_font().color(&BLACK),
        ))
        .map_err(FigureError::from_display)?;
        root.present().map_err(FigureError::from_display)?;
        return Ok(());
    }

    let atoms = computed.len().max(reference.len());
    let max_b = value_range(computed).1.max(value_range(reference).1);

    let mut chart = ChartBuilder::on(&root)
        .caption("Calculated vs Reference B-Factor", ("sans-serif", 20))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(1..atoms + 1, 0.0..max_b)
        .map_err(FigureError::from_display)?;

    chart
        .configure_mesh()
        .x_desc("Residues C-alpha Atoms")
        .y_desc("B-Factor")
        .draw()
        .map_err(FigureError::from_display)?;

    chart
        .draw_series(LineSeries::new(
            computed.iter().enumerate().map(|(i, &b)| (i + 1, b)),
            &BLUE,
        ))
        .map_err(FigureError::from_display)?
        .label("B-Factor_cal")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .draw_series(LineSeries::new(
            reference.iter().enumerate().map(|(i, &b)| (i + 1, b)),
            &RED,
        ))
        .map_err(FigureError::from_display)?
        .label("B-Factor")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()
        .map_err(FigureError::from_display)?;

    root.present().map_err(FigureError::from_display)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fluctuation_plot_writes_an_svg_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rmsf.svg");
        plot_fluctuation(&path, &[0.05, 0.08, 0.03, 0.12]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<svg"));
    }

    #[test]
    fn empty_fluctuation_table_still_produces_a_figure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rmsf_empty.svg");
        plot_fluctuation(&path, &[]).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn comparison_plot_accepts_tables_of_different_lengths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bfactor_compare.svg");
        plot_bfactor_comparison(&path, &[0.1, 0.4, 0.2], &[12.34, 56.78]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<svg"));
    }

    #[test]
    fn all_zero_tables_do_not_break_the_axis_range() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flat.svg");
        plot_fluctuation(&path, &[0.0, 0.0, 0.0]).unwrap();
        assert!(path.exists());
    }
}
