//! Charts module - Salary vs. funding scatter plot

mod plotter;
mod renderer;

pub use plotter::ScatterPlotter;
pub use renderer::StaticChartRenderer;

use crate::stats::CityComparison;
use std::f64::consts::PI;

pub const CHART_TITLE: &str = "Relationship between Average Salary and Total Funding by City";
pub const X_LABEL: &str = "Average Salary";
pub const Y_LABEL: &str = "Total Funding (Millions $)";

/// Marker area range in square points, smallest to largest city.
pub const MARKER_AREA: (f64, f64) = (50.0, 500.0);

/// Color palette, one color per city
pub const PALETTE: [(u8, u8, u8); 10] = [
    (52, 152, 219),  // Blue
    (231, 76, 60),   // Red
    (46, 204, 113),  // Green
    (155, 89, 182),  // Purple
    (243, 156, 18),  // Orange
    (26, 188, 156),  // Teal
    (233, 30, 99),   // Pink
    (0, 188, 212),   // Cyan
    (121, 85, 72),   // Brown
    (96, 125, 139),  // Blue Grey
];

/// One city's marker, shared by the window and the PNG renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct CityPoint {
    pub city: String,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: (u8, u8, u8),
}

/// Marker radius for a city funding `count` companies, scaled so the
/// marker area runs linearly over [`MARKER_AREA`].
pub fn marker_radius(count: usize, min_count: usize, max_count: usize) -> f64 {
    let (small, large) = MARKER_AREA;
    let area = if max_count > min_count {
        let t = (count.saturating_sub(min_count)) as f64 / (max_count - min_count) as f64;
        small + t * (large - small)
    } else {
        (small + large) / 2.0
    };
    (area / PI).sqrt()
}

/// Scatter points for the compared cities: x = average salary,
/// y = funding in millions. Cities with a missing coordinate are skipped.
pub fn city_points(rows: &[CityComparison]) -> Vec<CityPoint> {
    let min_count = rows.iter().map(|r| r.companies_funded).min().unwrap_or(0);
    let max_count = rows.iter().map(|r| r.companies_funded).max().unwrap_or(0);

    rows.iter()
        .enumerate()
        .filter(|(_, row)| row.avg_salary.is_finite() && row.funding_millions.is_finite())
        .map(|(i, row)| CityPoint {
            city: row.city.clone(),
            x: row.avg_salary,
            y: row.funding_millions,
            radius: marker_radius(row.companies_funded, min_count, max_count),
            color: PALETTE[i % PALETTE.len()],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(city: &str, salary: f64, millions: f64, companies: usize) -> CityComparison {
        CityComparison {
            city: city.to_string(),
            avg_rating: 4.0,
            avg_salary: salary,
            companies_funded: companies,
            funding_millions: millions,
        }
    }

    #[test]
    fn test_marker_radius_bounds() {
        let small = marker_radius(1, 1, 10);
        let large = marker_radius(10, 1, 10);
        assert!((small - (50.0 / PI).sqrt()).abs() < 1e-9);
        assert!((large - (500.0 / PI).sqrt()).abs() < 1e-9);
        assert!(marker_radius(5, 1, 10) > small);
        assert!(marker_radius(5, 1, 10) < large);
    }

    #[test]
    fn test_marker_radius_single_size() {
        assert!((marker_radius(3, 3, 3) - (275.0 / PI).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_city_points() {
        let rows = vec![
            row("Delhi", 600_000.0, 1.0, 1),
            row("Hyderabad", f64::NAN, 4.0, 2),
            row("Mumbai", 1_000_000.0, 2.5, 3),
        ];
        let points = city_points(&rows);

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].city, "Delhi");
        assert_eq!((points[1].x, points[1].y), (1_000_000.0, 2.5));
        assert!(points[1].radius > points[0].radius);
        // Colors follow the table position, skipped rows included.
        assert_eq!(points[1].color, PALETTE[2]);
    }
}
