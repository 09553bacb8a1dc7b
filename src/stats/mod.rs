//! Stats module - Funding aggregates and the city comparison

mod calculator;
mod city;

pub use calculator::{InvestorCount, StatsCalculator};
pub use city::{CityAnalyzer, CityComparison};
