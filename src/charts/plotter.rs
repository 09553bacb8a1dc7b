//! Chart Plotter Module
//! Draws the interactive city scatter plot using egui_plot.

use super::{CityPoint, X_LABEL, Y_LABEL};
use egui::Color32;
use egui_plot::{Legend, Plot, PlotPoints, Points};

/// Draws the salary/funding scatter inside an egui panel.
pub struct ScatterPlotter;

impl ScatterPlotter {
    pub fn color(point: &CityPoint) -> Color32 {
        let (r, g, b) = point.color;
        Color32::from_rgb(r, g, b)
    }

    /// One point series per city, so the legend lists every city.
    pub fn draw_city_scatter(ui: &mut egui::Ui, points: &[CityPoint]) {
        Plot::new("city_scatter")
            .legend(Legend::default())
            .x_axis_label(X_LABEL)
            .y_axis_label(Y_LABEL)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                for point in points {
                    plot_ui.points(
                        Points::new(PlotPoints::from(vec![[point.x, point.y]]))
                            .radius(point.radius as f32)
                            .color(Self::color(point))
                            .name(&point.city),
                    );
                }
            });
    }
}
