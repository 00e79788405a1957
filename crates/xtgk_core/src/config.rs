//! # Valuation Configuration
//!
//! Every tuning constant of the xT-GK model lives here so the formulas never
//! hard-code numbers. `ValuationConfig::default()` reproduces the reference
//! model exactly.
//!
//! ```rust
//! use xtgk_core::config::ValuationConfig;
//!
//! let config = ValuationConfig::default();
//! assert!(config.validate().is_ok());
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Zone grid resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Zones along the pitch length (x)
    pub length_zones: usize,
    /// Zones along the pitch width (y)
    pub width_zones: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { length_zones: 12, width_zones: 8 }
    }
}

/// Pitch size in the units raw event coordinates are recorded in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchDimensions {
    pub length: f64,
    pub width: f64,
}

impl Default for PitchDimensions {
    fn default() -> Self {
        Self { length: 105.0, width: 68.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistributionConfig {
    pub forward_factor: f64,
    pub backward_factor: f64,
    pub lateral_factor: f64,
    /// Multiplier for Incomplete/Out passes
    pub failed_outcome_factor: f64,
    pub pressure_factor: f64,
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            forward_factor: 1.5,
            backward_factor: 0.8,
            lateral_factor: 1.0,
            failed_outcome_factor: -0.5,
            pressure_factor: 1.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PressureEscapeConfig {
    pub base_value: f64,
}

impl Default for PressureEscapeConfig {
    fn default() -> Self {
        Self { base_value: 0.05 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildUpConfig {
    pub base_contribution: f64,
    pub pass_factor: f64,
    pub other_factor: f64,
}

impl Default for BuildUpConfig {
    fn default() -> Self {
        Self { base_contribution: 0.02, pass_factor: 1.5, other_factor: 1.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Extra discount per unit of distance from the attacking end
    pub depth_weight: f64,
    pub pressure_multiplier: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self { depth_weight: 0.5, pressure_multiplier: 1.2 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Passes shorter than this (pitch units) are short
    pub short_pass_threshold: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self { short_pass_threshold: 30.0 }
    }
}

/// Field-level defaults applied at the ingestion boundary.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestPolicy {
    /// Reject records without an explicit `under_pressure` key instead of
    /// reading the absence as `false`.
    pub require_pressure_flag: bool,
}

/// Full model configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationConfig {
    pub grid: GridConfig,
    pub pitch: PitchDimensions,
    pub distribution: DistributionConfig,
    pub pressure_escape: PressureEscapeConfig,
    pub build_up: BuildUpConfig,
    pub risk: RiskConfig,
    pub classifier: ClassifierConfig,
    pub ingest: IngestPolicy,
}

impl ValuationConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_yaml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject configurations the formulas cannot honour.
    ///
    /// Risk multipliers below 1 would let the risk transform inflate values,
    /// so `depth_weight >= 0` and `pressure_multiplier >= 1` are required.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.length_zones == 0 || self.grid.width_zones == 0 {
            return Err(ConfigError::Invalid(format!(
                "grid must have at least one zone per axis, got {}x{}",
                self.grid.length_zones, self.grid.width_zones
            )));
        }

        for (name, v) in [("pitch.length", self.pitch.length), ("pitch.width", self.pitch.width)] {
            if !v.is_finite() || v <= 0.0 {
                return Err(ConfigError::Invalid(format!("{} must be positive, got {}", name, v)));
            }
        }

        if !self.risk.depth_weight.is_finite() || self.risk.depth_weight < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "risk.depth_weight must be >= 0, got {}",
                self.risk.depth_weight
            )));
        }
        if !self.risk.pressure_multiplier.is_finite() || self.risk.pressure_multiplier < 1.0 {
            return Err(ConfigError::Invalid(format!(
                "risk.pressure_multiplier must be >= 1, got {}",
                self.risk.pressure_multiplier
            )));
        }

        if !self.classifier.short_pass_threshold.is_finite()
            || self.classifier.short_pass_threshold < 0.0
        {
            return Err(ConfigError::Invalid(format!(
                "classifier.short_pass_threshold must be >= 0, got {}",
                self.classifier.short_pass_threshold
            )));
        }

        Ok(())
    }
}

// ========== Tests ==========
