//! Configuration file parsing.
//!
//! A construction request is described by a small TOML file:
//!
//! ```toml
//! order = 6
//! points = 41
//! length = 1.0
//! narrowing = 2      # 0 = wide, 1 = intermediate, 2 = narrow
//!
//! [output]
//! dump_dir = "operators"
//! exactness_degree = 4
//!
//! [sweep]
//! orders = [6, 8]
//! points = [41, 81, 161]
//! narrowings = [0, 2]
//! ```
//!
//! Order and narrowing stay raw integers here; they are checked against the
//! supported values by [`OperatorConfig::validate`] and again by the factory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    factory,
    order::{Narrowing, Order},
    sweep::{OperatorRequest, SweepConfig},
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid operator configuration: {0}")]
    InvalidOperator(String),

    #[error("Invalid sweep configuration: {0}")]
    InvalidSweep(String),
}

// ============================================================================
// Single construction
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorConfig {
    pub order: u32,
    pub points: usize,
    #[serde(default = "default_length")]
    pub length: f64,
    #[serde(default)]
    pub narrowing: u8,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub sweep: Option<SweepConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving CSV dumps of the operators, if any.
    #[serde(default)]
    pub dump_dir: Option<PathBuf>,
    /// Highest monomial degree checked by the report.
    #[serde(default = "default_exactness_degree")]
    pub exactness_degree: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dump_dir: None,
            exactness_degree: default_exactness_degree(),
        }
    }
}

fn default_length() -> f64 {
    1.0
}

fn default_exactness_degree() -> usize {
    4
}

impl OperatorConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: OperatorConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let order = Order::try_from(self.order)
            .map_err(|err| ConfigError::InvalidOperator(err.to_string()))?;
        let narrowing = Narrowing::try_from(self.narrowing)
            .map_err(|err| ConfigError::InvalidOperator(err.to_string()))?;
        if !(self.length.is_finite() && self.length > 0.0) {
            return Err(ConfigError::InvalidOperator(format!(
                "'length' must be finite and positive, got {}",
                self.length
            )));
        }
        let minimum = factory::minimum_points(order, narrowing);
        if self.points < minimum {
            return Err(ConfigError::InvalidOperator(format!(
                "order {order} with {narrowing} narrowing needs at least {minimum} points, got {}",
                self.points
            )));
        }
        if let Some(sweep) = &self.sweep {
            validate_sweep(sweep)?;
        }
        Ok(())
    }

    pub fn request(&self) -> OperatorRequest {
        OperatorRequest {
            order: self.order,
            points: self.points,
            length: self.length,
            narrowing: self.narrowing,
        }
    }
}

// ============================================================================
// Sweeps
// ============================================================================

/// A file whose only required table is `[sweep]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepFile {
    pub sweep: SweepConfig,
}

impl SweepFile {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let file: SweepFile = toml::from_str(s)?;
        validate_sweep(&file.sweep)?;
        Ok(file)
    }
}

/// Axes must be non-empty and lengths positive. Unsupported orders or
/// narrowings are left in: they come back as failed sweep entries.
pub fn validate_sweep(sweep: &SweepConfig) -> Result<(), ConfigError> {
    let axes = [
        ("orders", sweep.orders.is_empty()),
        ("points", sweep.points.is_empty()),
        ("lengths", sweep.lengths.is_empty()),
        ("narrowings", sweep.narrowings.is_empty()),
    ];
    if let Some((name, _)) = axes.iter().find(|(_, empty)| *empty) {
        return Err(ConfigError::InvalidSweep(format!("'{name}' must not be empty")));
    }
    if let Some(length) = sweep
        .lengths
        .iter()
        .find(|l| !(l.is_finite() && **l > 0.0))
    {
        return Err(ConfigError::InvalidSweep(format!(
            "lengths must be finite and positive, got {length}"
        )));
    }
    Ok(())
}
