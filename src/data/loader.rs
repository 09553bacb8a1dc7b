//! CSV Data Loader Module
//! Reads the yearly funding extracts and the salary survey using Polars.

use super::columns::{
    AMOUNT, COMPANY, FOUNDED, HEADQUARTER, INVESTOR, LOCATION, RATING, SALARY, YEAR,
};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Yearly funding extracts, in the order their rows are concatenated.
pub const FUNDING_FILES: [(&str, i64); 3] = [
    ("startup_funding2019.csv", 2019),
    ("startup_funding2020.csv", 2020),
    ("startup_funding2021.csv", 2021),
];

pub const SALARY_FILE: &str = "Software Professionals Salary.csv";

const FUNDING_COLUMNS: [&str; 5] = [COMPANY, INVESTOR, HEADQUARTER, FOUNDED, AMOUNT];
const SALARY_COLUMNS: [&str; 3] = [LOCATION, RATING, SALARY];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Input file not found: {}", .0.display())]
    MissingFile(PathBuf),
    #[error("{file} has no '{column}' column")]
    MissingColumn { file: String, column: String },
    #[error("No funding files to load")]
    NoFiles,
}

/// Loads the analysis inputs from a data directory.
pub struct DataLoader {
    data_dir: PathBuf,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new(".")
    }
}

impl DataLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Read one CSV with every column kept as text.
    ///
    /// Numeric coercion is left to the cleaning stage, so a stray
    /// "Undisclosed" never changes how a whole column is typed.
    fn read_csv(&self, file_name: &str, required: &[&str]) -> Result<DataFrame, LoaderError> {
        let path = self.data_dir.join(file_name);
        if !path.is_file() {
            return Err(LoaderError::MissingFile(path));
        }

        let df = LazyCsvReader::new(&path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;

        if let Some(missing) = required.iter().find(|name| df.column(name).is_err()) {
            return Err(LoaderError::MissingColumn {
                file: file_name.to_string(),
                column: missing.to_string(),
            });
        }

        debug!(
            file = file_name,
            rows = df.height(),
            columns = df.width(),
            "Read CSV"
        );
        Ok(df)
    }

    /// Load the yearly funding extracts into one table.
    ///
    /// Each row gets a `Year` column holding its file's year. Rows keep
    /// file order, and columns are the union over all files (cells a file
    /// does not have are null).
    pub fn load_funding(&self, files: &[(&str, i64)]) -> Result<DataFrame, LoaderError> {
        if files.is_empty() {
            return Err(LoaderError::NoFiles);
        }

        let mut frames = Vec::with_capacity(files.len());
        for &(file_name, year) in files {
            let df = self.read_csv(file_name, &FUNDING_COLUMNS)?;
            info!(file = file_name, year, rows = df.height(), "Loaded funding extract");
            frames.push(df.lazy().with_column(lit(year).alias(YEAR)));
        }

        let combined = concat_lf_diagonal(frames, UnionArgs::default())?.collect()?;
        Ok(combined)
    }

    /// Load the software professionals salary survey.
    pub fn load_salary(&self) -> Result<DataFrame, LoaderError> {
        let df = self.read_csv(SALARY_FILE, &SALARY_COLUMNS)?;
        info!(file = SALARY_FILE, rows = df.height(), "Loaded salary survey");
        Ok(df)
    }
}
