//! Data module - CSV loading and cleaning

mod loader;
mod processor;

pub use loader::{DataLoader, FUNDING_FILES};
pub use processor::DataProcessor;

/// Column names shared by the funding extracts and the salary survey.
pub mod columns {
    pub const COMPANY: &str = "Company/Brand";
    pub const INVESTOR: &str = "Investor";
    pub const HEADQUARTER: &str = "HeadQuarter";
    pub const FOUNDED: &str = "Founded";
    pub const AMOUNT: &str = "Amount($)";
    pub const YEAR: &str = "Year";

    pub const LOCATION: &str = "Location";
    pub const RATING: &str = "Rating";
    pub const SALARY: &str = "Salary";
}
