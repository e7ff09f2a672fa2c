//! Settings models and loaders for the rocket staging calculator.

use std::fs::File;
use std::path::Path;

use log::debug;
use serde::Deserialize;
use staging_core::PhysicalConstants;
use staging_core::constants::{DEFAULT_PAYLOAD_KG, DEFAULT_SPECIFIC_IMPULSE_S};
use thiserror::Error;

/// Top-level settings document. Every section and field is optional.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct StagingSettings {
    pub constants: ConstantsSettings,
    pub search: SearchSettings,
}

/// Overrides for the propellant and payload constants.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ConstantsSettings {
    pub specific_impulse_s: f64,
    pub payload_kg: f64,
}

impl Default for ConstantsSettings {
    fn default() -> Self {
        Self {
            specific_impulse_s: DEFAULT_SPECIFIC_IMPULSE_S,
            payload_kg: DEFAULT_PAYLOAD_KG,
        }
    }
}

/// Vehicle size and ratio grid for the exploratory search.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SearchSettings {
    pub total_length_m: f64,
    pub diameter_m: f64,
    pub ratio_start: f64,
    pub ratio_stop: f64,
    pub points: usize,
    pub top_n: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            total_length_m: 10.0,
            diameter_m: 1.0,
            ratio_start: 0.1,
            ratio_stop: 1.0,
            points: 100,
            top_n: 100,
        }
    }
}

/// Errors that can occur while loading settings files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl StagingSettings {
    /// Build the immutable constant set described by these settings.
    pub fn physical_constants(&self) -> PhysicalConstants {
        PhysicalConstants::new(self.constants.specific_impulse_s, self.constants.payload_kg)
    }

    /// Reject values the calculators cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.constants;
        ensure(
            c.specific_impulse_s.is_finite() && c.specific_impulse_s > 0.0,
            "constants.specific_impulse_s",
            "must be positive",
        )?;
        ensure(
            c.payload_kg.is_finite() && c.payload_kg >= 0.0,
            "constants.payload_kg",
            "must not be negative",
        )?;

        let s = &self.search;
        ensure(
            s.total_length_m.is_finite() && s.total_length_m > 0.0,
            "search.total_length_m",
            "must be positive",
        )?;
        ensure(
            s.diameter_m.is_finite() && s.diameter_m > 0.0,
            "search.diameter_m",
            "must be positive",
        )?;
        ensure(s.points >= 2, "search.points", "must be at least 2")?;
        ensure(
            s.ratio_start > 0.0 && s.ratio_start < s.ratio_stop && s.ratio_stop <= 1.0,
            "search.ratio_start",
            "must satisfy 0 < ratio_start < ratio_stop <= 1",
        )?;
        Ok(())
    }
}

fn ensure(ok: bool, field: &'static str, reason: &str) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: reason.to_string(),
        })
    }
}

/// Load and validate settings from a TOML (`.toml`) or YAML file.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<StagingSettings, ConfigError> {
    let path = path.as_ref();
    let settings: StagingSettings = if path.extension().map(|ext| ext == "toml").unwrap_or(false)
    {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)?
    } else {
        let reader = File::open(path)?;
        serde_yaml::from_reader(reader)?
    };
    settings.validate()?;
    debug!("loaded settings from {}: {:?}", path.display(), settings);
    Ok(settings)
}

/// Load settings when a path is given, otherwise fall back to defaults.
pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<StagingSettings, ConfigError> {
    match path {
        Some(path) => load_settings(path),
        None => Ok(StagingSettings::default()),
    }
}
