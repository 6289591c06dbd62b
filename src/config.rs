use std::path::PathBuf;

use clap::Parser;
use space_missions::data::derive::DEFAULT_TOP_COMPANIES;

/// Dataset opened when no path is given and the file exists in the
/// working directory.
pub const DEFAULT_DATASET: &str = "space_missions.csv";

/// Startup configuration for the dashboard.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "space-missions",
    version,
    about = "Interactive dashboard for historical space mission data"
)]
pub struct Config {
    /// Mission dataset (.csv or .json) to open on startup
    #[arg(long, short, env = "SPACE_MISSIONS_DATA")]
    pub data: Option<PathBuf>,

    /// Number of companies shown in the launch-volume chart
    #[arg(long, default_value_t = DEFAULT_TOP_COMPANIES)]
    pub top_companies: usize,
}

impl Config {
    /// The explicit `--data` path, else `space_missions.csv` if present.
    pub fn dataset_path(&self) -> Option<PathBuf> {
        self.data.clone().or_else(|| {
            let fallback = PathBuf::from(DEFAULT_DATASET);
            fallback.is_file().then_some(fallback)
        })
    }

    /// Ranking length, never zero.
    pub fn top_companies(&self) -> usize {
        self.top_companies.max(1)
    }
}
