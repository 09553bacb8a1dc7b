//! Data Processor Module
//! Handles data cleaning: amounts, founding years and salary figures.

use super::columns::{AMOUNT, FOUNDED, RATING, SALARY, YEAR};
use polars::prelude::*;
use thiserror::Error;
use tracing::debug;

/// Amount text used by the extracts when a round was not disclosed.
pub const UNDISCLOSED: &str = "Undisclosed";

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Lenient decimal parse. Surrounding whitespace is ignored and anything
/// that is not a finite number is missing.
pub fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Clean one funding amount such as `"$1,000,000"`.
///
/// `"Undisclosed"` and anything that does not parse once `$` and `,` are
/// removed is missing.
pub fn clean_amount(value: &str) -> Option<f64> {
    if value == UNDISCLOSED {
        return None;
    }
    let digits: String = value.chars().filter(|c| !matches!(c, '$' | ',')).collect();
    parse_number(&digits)
}

/// Founding year as an integer. Integral decimals ("2015.0") are accepted.
pub fn parse_founded(value: &str) -> Option<i64> {
    let year = parse_number(value)?;
    (year.fract() == 0.0).then_some(year as i64)
}

/// Handles column-wise cleaning of the loaded tables.
pub struct DataProcessor;

impl DataProcessor {
    /// Parse a text column into a numeric one with the same name.
    fn parse_column<T, F>(df: &DataFrame, name: &str, parse: F) -> PolarsResult<ChunkedArray<T>>
    where
        T: PolarsNumericType,
        F: Fn(&str) -> Option<T::Native>,
    {
        let text = df.column(name)?.cast(&DataType::String)?;
        let parsed: ChunkedArray<T> = text
            .str()?
            .into_iter()
            .map(|value| value.and_then(&parse))
            .collect();
        Ok(parsed.with_name(name.into()))
    }

    /// Clean the combined funding table.
    ///
    /// `Amount($)` becomes Float64, `Founded` a nullable Int64 and `Year`
    /// Int64. Values that do not parse become null.
    pub fn clean_funding(mut df: DataFrame) -> Result<DataFrame, ProcessorError> {
        let amounts = Self::parse_column::<Float64Type, _>(&df, AMOUNT, clean_amount)?;
        let founded = Self::parse_column::<Int64Type, _>(&df, FOUNDED, parse_founded)?;
        let year = df
            .column(YEAR)?
            .as_materialized_series()
            .cast(&DataType::Int64)?;

        debug!(
            missing_amounts = amounts.null_count(),
            missing_founded = founded.null_count(),
            "Cleaned funding columns"
        );

        df.with_column(amounts.into_series())?;
        df.with_column(founded.into_series())?;
        df.with_column(year)?;
        Ok(df)
    }

    /// Clean the salary survey: `Rating` and `Salary` become Float64.
    pub fn clean_salary(mut df: DataFrame) -> Result<DataFrame, ProcessorError> {
        let ratings = Self::parse_column::<Float64Type, _>(&df, RATING, parse_number)?;
        let salaries = Self::parse_column::<Float64Type, _>(&df, SALARY, parse_number)?;

        df.with_column(ratings.into_series())?;
        df.with_column(salaries.into_series())?;
        Ok(df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_amount() {
        assert_eq!(clean_amount("Undisclosed"), None);
        assert_eq!(clean_amount("$1,000,000"), Some(1_000_000.0));
        assert_eq!(clean_amount(""), None);
        assert_eq!(clean_amount("250000"), Some(250_000.0));
        assert_eq!(clean_amount("$2,500.50"), Some(2_500.5));
        assert_eq!(clean_amount(" $40 "), Some(40.0));
        assert_eq!(clean_amount("Series A"), None);
        assert_eq!(clean_amount("$"), None);
        assert_eq!(clean_amount("undisclosed"), None);
    }

    #[test]
    fn test_parse_founded() {
        assert_eq!(parse_founded("2015"), Some(2015));
        assert_eq!(parse_founded("2015.0"), Some(2015));
        assert_eq!(parse_founded("2015.5"), None);
        assert_eq!(parse_founded("n/a"), None);
        assert_eq!(parse_founded(""), None);
    }

    #[test]
    fn test_parse_number_rejects_non_finite() {
        assert_eq!(parse_number("4.2"), Some(4.2));
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn test_clean_funding_columns() {
        let df = df!(
            "Company/Brand" => ["a", "b", "c", "d"],
            "Amount($)" => [Some("$100"), Some("Undisclosed"), None, Some("$1,000,000")],
            "Founded" => [Some("2015"), Some("n/a"), None, Some("2018.0")],
            "Year" => [2019i32, 2019, 2020, 2021],
        )
        .unwrap();

        let cleaned = DataProcessor::clean_funding(df).unwrap();

        let amounts: Vec<Option<f64>> = cleaned
            .column(AMOUNT)
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(amounts, vec![Some(100.0), None, None, Some(1_000_000.0)]);

        let founded = cleaned.column(FOUNDED).unwrap();
        assert_eq!(founded.dtype(), &DataType::Int64);
        let founded: Vec<Option<i64>> = founded.i64().unwrap().into_iter().collect();
        assert_eq!(founded, vec![Some(2015), None, None, Some(2018)]);

        let years: Vec<Option<i64>> = cleaned
            .column(YEAR)
            .unwrap()
            .i64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(years, vec![Some(2019), Some(2019), Some(2020), Some(2021)]);

        assert_eq!(cleaned.shape(), (4, 4));
    }

    #[test]
    fn test_clean_salary_columns() {
        let df = df!(
            "Location" => ["Pune", "Mumbai", "Delhi"],
            "Rating" => ["3.8", "4", "unrated"],
            "Salary" => ["400000", "", "900000"],
        )
        .unwrap();

        let cleaned = DataProcessor::clean_salary(df).unwrap();

        let values = |name: &str| -> Vec<Option<f64>> {
            cleaned
                .column(name)
                .unwrap()
                .f64()
                .unwrap()
                .into_iter()
                .collect()
        };
        let ratings = values(RATING);
        assert_eq!(ratings, vec![Some(3.8), Some(4.0), None]);
        let salaries = values(SALARY);
        assert_eq!(salaries, vec![Some(400_000.0), None, Some(900_000.0)]);
    }
}
