use crate::domain::model::{Benchmark, ProblemType};
use crate::utils::error::{PortalError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Per-category benchmark overrides, e.g.
///
/// ```toml
/// [benchmarks.DR]
/// metric = "F1 Score"
/// value = 0.9
/// sort_order = "desc"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarksFile {
    pub benchmarks: BTreeMap<ProblemType, Benchmark>,
}

impl BenchmarksFile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| PortalError::ConfigError {
            message: format!("invalid benchmark file: {}", e),
        })
    }
}

impl Validate for BenchmarksFile {
    fn validate(&self) -> Result<()> {
        for (problem_type, benchmark) in &self.benchmarks {
            validate_non_empty_string(
                &format!("benchmarks.{}.metric", problem_type),
                &benchmark.metric,
            )?;
            if !benchmark.value.is_finite() {
                return Err(PortalError::InvalidConfigValueError {
                    field: format!("benchmarks.{}.value", problem_type),
                    value: benchmark.value.to_string(),
                    reason: "Benchmark value must be finite".to_string(),
                });
            }
        }
        Ok(())
    }
}
