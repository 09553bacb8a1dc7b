//! City Comparison Module
//! Per-city salary and funding summaries and their inner join.

use super::calculator::{StatsCalculator, StatsError};
use crate::data::columns::{AMOUNT, COMPANY, HEADQUARTER, LOCATION, RATING, SALARY};
use polars::prelude::*;
use serde::Serialize;
use statrs::statistics::Statistics;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Mean rating and salary for one location, over every survey row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CitySalarySummary {
    pub location: String,
    pub avg_rating: f64,
    pub avg_salary: f64,
}

/// Funded companies and summed funding for one headquarters city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityFundingSummary {
    pub headquarter: String,
    pub companies_funded: usize,
    pub total_funding: f64,
}

/// One row of the salary/funding comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityComparison {
    pub city: String,
    pub avg_rating: f64,
    pub avg_salary: f64,
    pub companies_funded: usize,
    pub funding_millions: f64,
}

/// Builds the city-level summaries and joins them.
pub struct CityAnalyzer;

impl CityAnalyzer {
    /// Mean rating and salary per location, ordered by location.
    ///
    /// Missing values are left out of the means; a location with no
    /// rating at all gets NaN.
    pub fn salary_by_city(df: &DataFrame) -> Result<Vec<CitySalarySummary>, StatsError> {
        let locations = df.column(LOCATION)?.str()?;
        let ratings = df.column(RATING)?.f64()?;
        let salaries = df.column(SALARY)?.f64()?;

        let mut groups: BTreeMap<&str, (Vec<f64>, Vec<f64>)> = BTreeMap::new();
        for ((location, rating), salary) in locations
            .into_iter()
            .zip(ratings.into_iter())
            .zip(salaries.into_iter())
        {
            let Some(location) = location else {
                continue;
            };
            let (city_ratings, city_salaries) = groups.entry(location).or_default();
            city_ratings.extend(rating);
            city_salaries.extend(salary);
        }

        Ok(groups
            .into_iter()
            .map(|(location, (ratings, salaries))| CitySalarySummary {
                location: location.to_string(),
                avg_rating: ratings.iter().mean(),
                avg_salary: salaries.iter().mean(),
            })
            .collect())
    }

    /// Companies funded and total funding per headquarters city in `year`,
    /// ordered by city.
    pub fn funding_by_city(
        df: &DataFrame,
        year: i64,
    ) -> Result<Vec<CityFundingSummary>, StatsError> {
        let year_df = StatsCalculator::filter_year(df, year)?;
        let headquarters = year_df.column(HEADQUARTER)?.str()?;
        let companies = year_df.column(COMPANY)?.str()?;
        let amounts = year_df.column(AMOUNT)?.f64()?;

        let mut groups: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
        for ((headquarter, company), amount) in headquarters
            .into_iter()
            .zip(companies.into_iter())
            .zip(amounts.into_iter())
        {
            let Some(headquarter) = headquarter else {
                continue;
            };
            let (count, total) = groups.entry(headquarter).or_default();
            if company.is_some() {
                *count += 1;
            }
            *total += amount.unwrap_or(0.0);
        }

        Ok(groups
            .into_iter()
            .map(|(headquarter, (companies_funded, total_funding))| CityFundingSummary {
                headquarter: headquarter.to_string(),
                companies_funded,
                total_funding,
            })
            .collect())
    }

    /// Inner join on exact city name. Rows follow the salary side's order.
    pub fn compare(
        salary: &[CitySalarySummary],
        funding: &[CityFundingSummary],
    ) -> Vec<CityComparison> {
        let by_city: HashMap<&str, &CityFundingSummary> = funding
            .iter()
            .map(|summary| (summary.headquarter.as_str(), summary))
            .collect();

        let rows: Vec<CityComparison> = salary
            .iter()
            .filter_map(|s| {
                let f = by_city.get(s.location.as_str())?;
                Some(CityComparison {
                    city: s.location.clone(),
                    avg_rating: s.avg_rating,
                    avg_salary: s.avg_salary,
                    companies_funded: f.companies_funded,
                    funding_millions: f.total_funding / 1_000_000.0,
                })
            })
            .collect();

        debug!(
            salary_cities = salary.len(),
            funding_cities = funding.len(),
            matched = rows.len(),
            "Joined city summaries"
        );
        rows
    }

    /// First row holding the largest value of `key`. NaN never wins.
    pub fn first_max_by<F>(rows: &[CityComparison], key: F) -> Option<&CityComparison>
    where
        F: Fn(&CityComparison) -> f64,
    {
        let mut best: Option<(&CityComparison, f64)> = None;
        for row in rows {
            let value = key(row);
            if value.is_nan() {
                continue;
            }
            match best {
                Some((_, top)) if value <= top => {}
                _ => best = Some((row, value)),
            }
        }
        best.map(|(row, _)| row)
    }

    /// City with the highest average rating.
    pub fn highest_rated(rows: &[CityComparison]) -> Result<&CityComparison, StatsError> {
        if rows.is_empty() {
            return Err(StatsError::EmptyComparison);
        }
        Self::first_max_by(rows, |row| row.avg_rating).ok_or(StatsError::NoRatedCity)
    }
}
