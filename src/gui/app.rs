//! Scatter Chart Window
//! Native window showing the salary vs. funding scatter plot.

use crate::charts::{CityPoint, ScatterPlotter, CHART_TITLE};
use egui::RichText;

/// Window holding the city scatter plot.
pub struct ScatterApp {
    points: Vec<CityPoint>,
}

impl ScatterApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, points: Vec<CityPoint>) -> Self {
        Self { points }
    }
}

impl eframe::App for ScatterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(CHART_TITLE).strong().size(18.0));
            });
            ui.add_space(8.0);

            if self.points.is_empty() {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new("No Data").size(20.0));
                });
                return;
            }

            ScatterPlotter::draw_city_scatter(ui, &self.points);
        });
    }
}

/// Open the chart window and block until it is closed.
pub fn show_city_scatter(points: Vec<CityPoint>) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0])
            .with_title(CHART_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        "Startup Funding",
        options,
        Box::new(move |cc| Ok(Box::new(ScatterApp::new(cc, points)))),
    )
}
