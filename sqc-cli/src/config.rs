//! Optional TOML configuration for the `analyze` and `batch` commands.
//!
//! Mirrors the teacher's "CLI flags win over file config" convention: a
//! config file supplies defaults, and any flag passed on the command line
//! overrides the corresponding config value.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Selects which rules run and, optionally, overrides the series statistics
/// instead of having the CLI compute them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisConfig {
    /// Subset of catalog rule ids to run. `None` means "all rules".
    #[serde(default)]
    pub rules: Option<Vec<i32>>,
    /// Override for the series mean. `None` means "compute from the series".
    #[serde(default)]
    pub mean: Option<f64>,
    /// Override for the series stdev. `None` means "compute from the series".
    #[serde(default)]
    pub stdev: Option<f64>,
}

impl AnalysisConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config file {}", path.display()))
    }
}
