//! Static Chart Renderer
//! Writes the city scatter plot to a PNG file with plotters.

use super::{CityPoint, CHART_TITLE, X_LABEL, Y_LABEL};
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("No city points to plot")]
    NoPoints,
    #[error("Failed to render chart: {0}")]
    Render(String),
}

fn render_error<E: std::fmt::Display>(err: E) -> ChartError {
    ChartError::Render(err.to_string())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Axis range covering `values` with 10% padding on both ends.
    pub fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
        let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        if min > max {
            return 0.0..1.0;
        }
        let pad = if max > min {
            (max - min) * 0.1
        } else {
            max.abs().max(1.0) * 0.1
        };
        (min - pad)..(max + pad)
    }

    /// Render the scatter plot to `path` as a `width` x `height` PNG.
    pub fn render_png(
        path: &Path,
        points: &[CityPoint],
        width: u32,
        height: u32,
    ) -> Result<(), ChartError> {
        if points.is_empty() {
            return Err(ChartError::NoPoints);
        }

        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;

        let x_range = Self::padded_range(points.iter().map(|p| p.x));
        let y_range = Self::padded_range(points.iter().map(|p| p.y));

        let mut chart = ChartBuilder::on(&root)
            .caption(CHART_TITLE, ("sans-serif", 24))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(x_range, y_range)
            .map_err(render_error)?;

        chart
            .configure_mesh()
            .x_desc(X_LABEL)
            .y_desc(Y_LABEL)
            .draw()
            .map_err(render_error)?;

        for point in points {
            let (r, g, b) = point.color;
            let color = RGBColor(r, g, b);
            chart
                .draw_series(std::iter::once(Circle::new(
                    (point.x, point.y),
                    point.radius.round() as i32,
                    color.mix(0.8).filled(),
                )))
                .map_err(render_error)?
                .label(point.city.as_str())
                .legend(move |(x, y)| Circle::new((x, y), 5, color.filled()));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(render_error)?;

        root.present().map_err(render_error)?;
        info!(path = %path.display(), cities = points.len(), "Saved chart");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_range() {
        let range = StaticChartRenderer::padded_range([10.0, 20.0].into_iter());
        assert_eq!(range, 9.0..21.0);
    }

    #[test]
    fn test_padded_range_single_value() {
        let range = StaticChartRenderer::padded_range([5.0].into_iter());
        assert_eq!(range, 4.5..5.5);
    }

    #[test]
    fn test_padded_range_empty() {
        let range = StaticChartRenderer::padded_range(std::iter::empty());
        assert_eq!(range, 0.0..1.0);
    }

    #[test]
    fn test_render_without_points() {
        let dir = tempfile::tempdir().unwrap();
        let err =
            StaticChartRenderer::render_png(&dir.path().join("chart.png"), &[], 800, 600).unwrap_err();
        assert!(matches!(err, ChartError::NoPoints));
        assert!(!dir.path().join("chart.png").exists());
    }
}
