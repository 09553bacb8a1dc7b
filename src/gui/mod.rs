//! GUI module - Native chart window

mod app;

pub use app::show_city_scatter;
