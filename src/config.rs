//! Command line configuration.

use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_RANK_INVESTOR: &str = "Inflection Point Ventures";

#[derive(Parser, Debug)]
#[command(name = "startup_funding")]
#[command(
    about = "Analyze Indian startup funding (2019-2021) against software salaries by city",
    long_about = None
)]
pub struct Cli {
    /// Directory containing the funding extracts and the salary CSV
    #[arg(short = 'd', long, default_value = ".")]
    pub data_dir: PathBuf,

    /// Investor whose rank by distinct companies funded is reported
    #[arg(long, default_value = DEFAULT_RANK_INVESTOR)]
    pub rank_investor: String,

    /// Year used for the investor rank
    #[arg(long, default_value_t = 2020)]
    pub rank_year: i64,

    /// Funding year compared against salaries
    #[arg(long, default_value_t = 2021)]
    pub city_year: i64,

    /// Do not open the chart window
    #[arg(long, default_value_t = false)]
    pub no_plot: bool,

    /// Also render the chart to this PNG file
    #[arg(long, value_name = "PNG")]
    pub save_chart: Option<PathBuf>,

    /// Print the report as JSON instead of text
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

/// Parameters of the analysis itself, independent of output options.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub rank_investor: String,
    pub rank_year: i64,
    pub city_year: i64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            rank_investor: DEFAULT_RANK_INVESTOR.to_string(),
            rank_year: 2020,
            city_year: 2021,
        }
    }
}

impl Cli {
    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            rank_investor: self.rank_investor.clone(),
            rank_year: self.rank_year,
            city_year: self.city_year,
        }
    }
}
