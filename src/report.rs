//! Analysis Report Module
//! Runs the pipeline and formats its results for standard output.

use crate::config::AnalysisOptions;
use crate::data::{DataLoader, DataProcessor, FUNDING_FILES};
use crate::stats::{CityAnalyzer, CityComparison, InvestorCount, StatsCalculator};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write;
use tracing::info;

/// Rank of the investor picked on the command line.
#[derive(Debug, Clone, Serialize)]
pub struct InvestorRank {
    pub investor: String,
    pub year: i64,
    pub rank: usize,
}

/// Everything the analysis prints.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// (rows, columns) of the combined funding table.
    pub shape: (usize, usize),
    pub first_year: i64,
    pub last_year: i64,
    pub total_funding: f64,
    pub top_investor: InvestorCount,
    pub investor_rank: InvestorRank,
    pub city_year: i64,
    pub cities: Vec<CityComparison>,
    pub highest_rated_city: CityComparison,
}

impl AnalysisReport {
    /// Load, clean and aggregate the inputs found by `loader`.
    pub fn generate(loader: &DataLoader, options: &AnalysisOptions) -> Result<Self> {
        Self::generate_from(loader, &FUNDING_FILES, options)
    }

    /// Same as [`AnalysisReport::generate`] with an explicit list of
    /// yearly funding files.
    pub fn generate_from(
        loader: &DataLoader,
        files: &[(&str, i64)],
        options: &AnalysisOptions,
    ) -> Result<Self> {
        let funding = loader
            .load_funding(files)
            .with_context(|| format!("loading funding data from {}", loader.data_dir().display()))?;
        let funding = DataProcessor::clean_funding(funding).context("cleaning funding data")?;
        let shape = funding.shape();
        info!(rows = shape.0, columns = shape.1, "Combined funding table");

        let total_funding =
            StatsCalculator::total_funding(&funding).context("summing funding amounts")?;
        let top_investor =
            StatsCalculator::top_investor(&funding).context("finding the top investor")?;
        let rank = StatsCalculator::investor_rank(
            &funding,
            options.rank_year,
            &options.rank_investor,
        )
        .context("ranking investor")?;

        let salary = loader
            .load_salary()
            .with_context(|| format!("loading salary data from {}", loader.data_dir().display()))?;
        let salary = DataProcessor::clean_salary(salary).context("cleaning salary data")?;

        let salary_cities =
            CityAnalyzer::salary_by_city(&salary).context("summarizing salaries by city")?;
        let funding_cities = CityAnalyzer::funding_by_city(&funding, options.city_year)
            .context("summarizing funding by city")?;
        let cities = CityAnalyzer::compare(&salary_cities, &funding_cities);
        let highest_rated_city = CityAnalyzer::highest_rated(&cities)
            .context("comparing cities")?
            .clone();
        info!(cities = cities.len(), "City comparison ready");

        let years = files.iter().map(|&(_, year)| year);
        Ok(Self {
            shape,
            first_year: years.clone().min().unwrap_or_default(),
            last_year: years.max().unwrap_or_default(),
            total_funding,
            top_investor,
            investor_rank: InvestorRank {
                investor: options.rank_investor.clone(),
                year: options.rank_year,
                rank,
            },
            city_year: options.city_year,
            cities,
            highest_rated_city,
        })
    }

    /// City with the largest summed funding.
    pub fn largest_funding_city(&self) -> Option<&CityComparison> {
        CityAnalyzer::first_max_by(&self.cities, |row| row.funding_millions)
    }

    /// City with the highest average salary.
    pub fn highest_salary_city(&self) -> Option<&CityComparison> {
        CityAnalyzer::first_max_by(&self.cities, |row| row.avg_salary)
    }

    /// Comparison table with one line per city.
    pub fn city_table(&self) -> String {
        const HEADERS: [&str; 4] = [
            "Avg. Rating",
            "Avg. Salary",
            "Nr. Companies Funded",
            "Sum Funding ($MM)",
        ];
        let city_width = self
            .cities
            .iter()
            .map(|row| row.city.chars().count())
            .max()
            .unwrap_or(0)
            .max("City".len());

        let mut out = String::new();
        let _ = write!(out, "{:<city_width$}", "City");
        for header in HEADERS {
            let _ = write!(out, "  {header:>w$}", w = header.len().max(12));
        }
        out.push('\n');

        for row in &self.cities {
            let _ = writeln!(
                out,
                "{:<city_width$}  {:>12.2}  {:>12.2}  {:>20}  {:>17.2}",
                row.city, row.avg_rating, row.avg_salary, row.companies_funded, row.funding_millions,
            );
        }
        out
    }

    /// Full text report.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let (rows, columns) = self.shape;
        let _ = writeln!(out, "Shape of the combined DataFrame: ({rows}, {columns})");
        let _ = writeln!(
            out,
            "Total funding from {} to {}: {}",
            self.first_year,
            self.last_year,
            format_currency(self.total_funding)
        );

        let _ = writeln!(out, "\nTop investor overall:");
        let _ = writeln!(
            out,
            "{} ({} deals)",
            self.top_investor.investor, self.top_investor.count
        );

        let rank = &self.investor_rank;
        let _ = writeln!(
            out,
            "Ranking of {} in {}: {}",
            rank.investor, rank.year, rank.rank
        );

        let _ = writeln!(
            out,
            "\nCity-wise funding ({}) and salary comparison:",
            self.city_year
        );
        out.push_str(&self.city_table());

        let best = &self.highest_rated_city;
        let _ = writeln!(out, "\nCity with highest average rating: {}", best.city);
        let _ = writeln!(out, "Number of companies funded: {}", best.companies_funded);

        out.push_str(&self.conclusions());
        out
    }

    /// Closing summary drawn from the computed figures.
    fn conclusions(&self) -> String {
        let mut out = String::from("\nConclusions:\n");
        let _ = writeln!(
            out,
            "1. Startups raised {} in disclosed funding between {} and {}.",
            format_currency(self.total_funding),
            self.first_year,
            self.last_year
        );
        let _ = writeln!(
            out,
            "2. {} made the most deals overall ({}).",
            self.top_investor.investor, self.top_investor.count
        );
        let _ = writeln!(
            out,
            "3. {} ranked #{} by distinct companies funded in {}.",
            self.investor_rank.investor, self.investor_rank.rank, self.investor_rank.year
        );
        if let Some(city) = self.largest_funding_city() {
            let _ = writeln!(
                out,
                "4. {} attracted the most funding in {} (${:.2}MM across {} companies).",
                city.city, self.city_year, city.funding_millions, city.companies_funded
            );
        }
        if let Some(city) = self.highest_salary_city() {
            let _ = writeln!(
                out,
                "5. {} has the highest average salary ({:.2}).",
                city.city, city.avg_salary
            );
        }
        out
    }
}

/// Format as dollars with thousands separators, e.g. `$1,234,567.89`.
pub fn format_currency(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}
