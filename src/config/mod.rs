#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::model::BenchmarkSet;
#[cfg(feature = "cli")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_path, validate_positive_number, validate_url, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "dhs-portal-data")]
#[command(about = "Fetches, ranks and renders hackathon portal data")]
pub struct CliConfig {
    #[arg(long, default_value = "https://dhs-hackathon.github.io/leaderboard.json")]
    pub leaderboard_endpoint: String,

    #[arg(long, default_value = "https://dhs-hackathon.github.io/datasets.csv")]
    pub datasets_endpoint: String,

    /// Columnar sample file to render image previews from
    #[arg(long)]
    pub sample_endpoint: Option<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value = "64")]
    pub preview_width: u32,

    #[arg(long, default_value = "64")]
    pub preview_height: u32,

    /// TOML file with per-category benchmark overrides
    #[arg(long)]
    pub benchmark_file: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit JSON logs")]
    pub json_logs: bool,

    #[arg(long, help = "Enable system monitoring")]
    pub monitor: bool,

    #[arg(skip)]
    #[serde(skip)]
    pub benchmark_set: BenchmarkSet,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Applies benchmark overrides from `--benchmark-file` on top of the
    /// built-in table.
    pub fn load_benchmarks(&mut self) -> Result<()> {
        if let Some(path) = &self.benchmark_file {
            let overrides = toml_config::BenchmarksFile::from_file(path)?;
            overrides.validate()?;
            self.benchmark_set.merge(overrides.benchmarks);
        }
        Ok(())
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn leaderboard_endpoint(&self) -> &str {
        &self.leaderboard_endpoint
    }

    fn datasets_endpoint(&self) -> &str {
        &self.datasets_endpoint
    }

    fn sample_endpoint(&self) -> Option<&str> {
        self.sample_endpoint.as_deref()
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn preview_dimensions(&self) -> (u32, u32) {
        (self.preview_width, self.preview_height)
    }

    fn benchmarks(&self) -> &BenchmarkSet {
        &self.benchmark_set
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("leaderboard_endpoint", &self.leaderboard_endpoint)?;
        validate_url("datasets_endpoint", &self.datasets_endpoint)?;
        if let Some(endpoint) = &self.sample_endpoint {
            validate_url("sample_endpoint", endpoint)?;
        }
        validate_path("output_path", &self.output_path)?;
        validate_positive_number("preview_width", self.preview_width as usize, 1)?;
        validate_positive_number("preview_height", self.preview_height as usize, 1)?;
        Ok(())
    }
}
