//! Tariff configuration.
//!
//! A tariff is the fare constants plus the station table. Both have built-in
//! defaults; a TOML file can override either or both:
//!
//! ```toml
//! [fares]
//! basic_fare = 3.0
//! incremental_price = 1.0
//! vip_discount = 0.5
//!
//! [fares.tiers]
//! base_distance = 6.0
//! increment_distance = 10.0
//!
//! [[stations]]
//! name = "1s"
//! distance = 1.8
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::fare::TierSchedule;
use crate::network::{Line, Stop, default_line};

/// Errors from loading a tariff file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or has the wrong shape
    #[error("failed to parse tariff: {0}")]
    Parse(#[from] toml::de::Error),

    /// The values are out of range
    #[error("invalid tariff: {0}")]
    Invalid(String),
}

/// Fare constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FareConfig {
    /// Fare for any trip inside the first distance tier.
    pub basic_fare: f64,

    /// Charge for each distance increment beyond the first tier.
    pub incremental_price: f64,

    /// Fraction taken off for VIP passengers (0.0-1.0).
    pub vip_discount: f64,

    /// Distance brackets.
    pub tiers: TierSchedule,
}

impl FareConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        basic_fare: f64,
        incremental_price: f64,
        vip_discount: f64,
        tiers: TierSchedule,
    ) -> Self {
        Self {
            basic_fare,
            incremental_price,
            vip_discount,
            tiers,
        }
    }

    /// Check every value is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.basic_fare.is_finite() || self.basic_fare < 0.0 {
            return Err(ConfigError::Invalid(
                "basic_fare must be non-negative".to_string(),
            ));
        }
        if !self.incremental_price.is_finite() || self.incremental_price < 0.0 {
            return Err(ConfigError::Invalid(
                "incremental_price must be non-negative".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.vip_discount) {
            return Err(ConfigError::Invalid(
                "vip_discount must be between 0 and 1".to_string(),
            ));
        }
        if !(self.tiers.base_distance > 0.0 && self.tiers.increment_distance > 0.0) {
            return Err(ConfigError::Invalid(
                "tier distances must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for FareConfig {
    fn default() -> Self {
        Self {
            basic_fare: 3.0,
            incremental_price: 1.0,
            vip_discount: 0.5,
            tiers: TierSchedule::default(),
        }
    }
}

/// On-disk layout of a tariff file.
#[derive(Debug, Default, Deserialize)]
struct TariffFile {
    #[serde(default)]
    fares: FareConfig,

    #[serde(default)]
    stations: Option<Vec<Stop>>,
}

/// Fare constants together with the line they apply to.
#[derive(Debug, Clone, PartialEq)]
pub struct Tariff {
    pub fares: FareConfig,
    pub line: Line,
}

impl Tariff {
    pub fn new(fares: FareConfig, line: Line) -> Self {
        Self { fares, line }
    }

    /// Load a tariff from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tariff = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), stations = tariff.line.len(), "loaded tariff");
        Ok(tariff)
    }

    /// Parse a tariff from TOML text.
    ///
    /// Missing sections keep their built-in defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let file: TariffFile = toml::from_str(text)?;
        file.fares.validate()?;

        let line = match file.stations {
            Some(stops) => {
                validate_stops(&stops)?;
                Line::from_stops(stops)
            }
            None => default_line(),
        };

        Ok(Self {
            fares: file.fares,
            line,
        })
    }
}

impl Default for Tariff {
    fn default() -> Self {
        Self {
            fares: FareConfig::default(),
            line: default_line(),
        }
    }
}

fn validate_stops(stops: &[Stop]) -> Result<(), ConfigError> {
    if stops.is_empty() {
        return Err(ConfigError::Invalid(
            "station table must not be empty".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for stop in stops {
        if !stop.distance.is_finite() || stop.distance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "station {} has an invalid distance",
                stop.name
            )));
        }
        if !seen.insert(&stop.name) {
            return Err(ConfigError::Invalid(format!(
                "station {} is listed twice",
                stop.name
            )));
        }
    }
    Ok(())
}
