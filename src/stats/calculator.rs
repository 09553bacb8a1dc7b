//! Statistics Calculator Module
//! Overall funding aggregates: total funding and investor rankings.

use crate::data::columns::{AMOUNT, COMPANY, INVESTOR, YEAR};
use polars::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("No investor names in the funding data")]
    NoInvestors,
    #[error("Investor '{investor}' has no funding records in {year}")]
    InvestorNotFound { investor: String, year: i64 },
    #[error("No city appears in both the salary and the funding data")]
    EmptyComparison,
    #[error("No compared city has an average rating")]
    NoRatedCity,
}

/// An investor with the number of rows or companies counted for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvestorCount {
    pub investor: String,
    pub count: usize,
}

/// Handles the overall funding statistics.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Sum of all cleaned amounts. Missing amounts are skipped.
    pub fn total_funding(df: &DataFrame) -> Result<f64, StatsError> {
        Ok(df.column(AMOUNT)?.f64()?.sum().unwrap_or(0.0))
    }

    /// Rows of the funding table that belong to `year`.
    pub fn filter_year(df: &DataFrame, year: i64) -> Result<DataFrame, StatsError> {
        let filtered = df
            .clone()
            .lazy()
            .filter(col(YEAR).eq(lit(year)))
            .collect()?;
        Ok(filtered)
    }

    /// Turn per-investor counts into a ranking.
    ///
    /// Groups come in investor-name order and the sort is stable, so equal
    /// counts keep name order.
    pub fn rank_counts(counts: BTreeMap<String, usize>) -> Vec<InvestorCount> {
        let mut ranking: Vec<InvestorCount> = counts
            .into_iter()
            .map(|(investor, count)| InvestorCount { investor, count })
            .collect();
        ranking.sort_by(|a, b| b.count.cmp(&a.count));
        ranking
    }

    /// Number of funding rows (deals) per investor, most deals first.
    pub fn investor_deal_counts(df: &DataFrame) -> Result<Vec<InvestorCount>, StatsError> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for investor in df.column(INVESTOR)?.str()?.into_iter().flatten() {
            *counts.entry(investor.to_string()).or_default() += 1;
        }
        Ok(Self::rank_counts(counts))
    }

    /// Investor with the most funding rows across all years.
    pub fn top_investor(df: &DataFrame) -> Result<InvestorCount, StatsError> {
        Self::investor_deal_counts(df)?
            .into_iter()
            .next()
            .ok_or(StatsError::NoInvestors)
    }

    /// Number of distinct companies each investor funded in `year`, most
    /// companies first.
    pub fn investor_company_counts(
        df: &DataFrame,
        year: i64,
    ) -> Result<Vec<InvestorCount>, StatsError> {
        let year_df = Self::filter_year(df, year)?;
        let investors = year_df.column(INVESTOR)?.str()?;
        let companies = year_df.column(COMPANY)?.str()?;

        let mut portfolios: BTreeMap<String, HashSet<String>> = BTreeMap::new();
        for (investor, company) in investors.into_iter().zip(companies.into_iter()) {
            let Some(investor) = investor else {
                continue;
            };
            let portfolio = portfolios.entry(investor.to_string()).or_default();
            if let Some(company) = company {
                portfolio.insert(company.to_string());
            }
        }

        let counts = portfolios
            .into_iter()
            .map(|(investor, companies)| (investor, companies.len()))
            .collect();
        Ok(Self::rank_counts(counts))
    }

    /// 1-based rank of `investor` by distinct companies funded in `year`.
    pub fn investor_rank(df: &DataFrame, year: i64, investor: &str) -> Result<usize, StatsError> {
        let ranking = Self::investor_company_counts(df, year)?;
        let rank = ranking
            .iter()
            .position(|entry| entry.investor == investor)
            .map(|idx| idx + 1)
            .ok_or_else(|| StatsError::InvestorNotFound {
                investor: investor.to_string(),
                year,
            })?;

        debug!(investor, year, rank, of = ranking.len(), "Ranked investor");
        Ok(rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn funding() -> DataFrame {
        df!(
            "Company/Brand" => [Some("p"), Some("q"), Some("q"), Some("r"), Some("s"), Some("t"), Some("u"), None, Some("p")],
            "Investor" => [Some("X"), Some("X"), Some("X"), Some("Y"), Some("Y"), Some("Y"), Some("Z"), Some("W"), Some("X")],
            "Amount($)" => [Some(100.0), None, Some(50.0), None, None, None, None, None, Some(25.0)],
            "Year" => [2020i64, 2020, 2020, 2020, 2020, 2020, 2020, 2020, 2021],
        )
        .unwrap()
    }

    #[test]
    fn test_total_funding_skips_missing() {
        let df = df!(
            "Amount($)" => [Some(100.0), None, Some(50.0)],
        )
        .unwrap();
        assert_eq!(StatsCalculator::total_funding(&df).unwrap(), 150.0);
    }

    #[test]
    fn test_total_funding_all_missing_is_zero() {
        let df = df!(
            "Amount($)" => [None::<f64>, None],
        )
        .unwrap();
        assert_eq!(StatsCalculator::total_funding(&df).unwrap(), 0.0);
    }

    #[test]
    fn test_top_investor_tie_goes_to_first_name() {
        // A:3, B:5, C:5 with C seen first in the data.
        let investors = [
            "C", "A", "B", "C", "B", "A", "C", "B", "A", "C", "B", "C", "B",
        ];
        let df = df!("Investor" => investors).unwrap();

        let top = StatsCalculator::top_investor(&df).unwrap();
        assert_eq!(
            top,
            InvestorCount {
                investor: "B".to_string(),
                count: 5
            }
        );

        let ranking = StatsCalculator::investor_deal_counts(&df).unwrap();
        let names: Vec<&str> = ranking.iter().map(|c| c.investor.as_str()).collect();
        assert_eq!(names, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_deal_counts_use_rows_not_companies() {
        let top = StatsCalculator::top_investor(&funding()).unwrap();
        assert_eq!(top.investor, "X");
        assert_eq!(top.count, 4);
    }

    #[test]
    fn test_top_investor_without_investors() {
        let df = df!("Investor" => [None::<&str>, None]).unwrap();
        let err = StatsCalculator::top_investor(&df).unwrap_err();
        assert!(matches!(err, StatsError::NoInvestors));
    }

    #[test]
    fn test_company_counts_are_distinct_per_year() {
        let ranking = StatsCalculator::investor_company_counts(&funding(), 2020).unwrap();
        assert_eq!(
            ranking,
            vec![
                InvestorCount { investor: "Y".into(), count: 3 },
                InvestorCount { investor: "X".into(), count: 2 },
                InvestorCount { investor: "Z".into(), count: 1 },
                InvestorCount { investor: "W".into(), count: 0 },
            ]
        );
    }

    #[test]
    fn test_investor_rank() {
        let df = funding();
        assert_eq!(StatsCalculator::investor_rank(&df, 2020, "Y").unwrap(), 1);
        assert_eq!(StatsCalculator::investor_rank(&df, 2020, "X").unwrap(), 2);
        assert_eq!(StatsCalculator::investor_rank(&df, 2021, "X").unwrap(), 1);
    }

    #[test]
    fn test_investor_rank_missing_name_is_fatal() {
        let err = StatsCalculator::investor_rank(&funding(), 2021, "Y").unwrap_err();
        match err {
            StatsError::InvestorNotFound { investor, year } => {
                assert_eq!(investor, "Y");
                assert_eq!(year, 2021);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rank_counts_is_stable() {
        let counts: BTreeMap<String, usize> = [("b", 2), ("a", 2), ("c", 7)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let names: Vec<String> = StatsCalculator::rank_counts(counts)
            .into_iter()
            .map(|c| c.investor)
            .collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }
}
