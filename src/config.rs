//! Deduplication settings.
//!
//! Both knobs are explicit values carried by an engine or collection; there is
//! no process-wide default that code can mutate.

use crate::error::{PoiError, Result};

/// Default distance below which two POIs are the same place, in meters.
pub const DEFAULT_THRESHOLD_METERS: f64 = 50.0;

/// Default collection size above which lookups go through the spatial grid.
pub const DEFAULT_SIZE_CUTOFF: usize = 500;

/// Deduplication configuration.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DedupConfig {
    /// Strict upper bound on the haversine distance between duplicates.
    #[serde(default = "DedupConfig::default_threshold")]
    pub threshold_meters: f64,

    /// Entry count above which the grid-assisted strategy is used.
    #[serde(default = "DedupConfig::default_size_cutoff")]
    pub size_cutoff: usize,
}

impl DedupConfig {
    const fn default_threshold() -> f64 {
        DEFAULT_THRESHOLD_METERS
    }

    const fn default_size_cutoff() -> usize {
        DEFAULT_SIZE_CUTOFF
    }

    pub fn with_threshold(mut self, meters: f64) -> Self {
        self.threshold_meters = meters;
        self
    }

    pub fn with_size_cutoff(mut self, cutoff: usize) -> Self {
        self.size_cutoff = cutoff;
        self
    }

    /// Check both values; the first offending one is reported.
    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.threshold_meters)?;
        if self.size_cutoff == 0 {
            return Err(PoiError::InvalidCutoff(self.size_cutoff));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: DedupConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: DedupConfig =
            toml::from_str(toml_str).map_err(|e| PoiError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| PoiError::Config(e.to_string()))
    }

    /// Load a JSON (or, with the `toml` feature, `.toml`) config file.
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| PoiError::Config(format!("{}: {}", path.display(), e)))?;

        #[cfg(feature = "toml")]
        if path.extension().is_some_and(|ext| ext == "toml") {
            return Self::from_toml(&contents);
        }

        Self::from_json(&contents)
    }
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            threshold_meters: Self::default_threshold(),
            size_cutoff: Self::default_size_cutoff(),
        }
    }
}

pub(crate) fn validate_threshold(meters: f64) -> Result<()> {
    if !meters.is_finite() || meters <= 0.0 {
        return Err(PoiError::InvalidThreshold(meters));
    }
    Ok(())
}
