//! # Settings Module
//!
//! ## Purpose
//! Persistent configuration of ChemSieve: balancer search bounds, log level of the binary and the
//! default volume of a new sieve. Settings live in a JSON file (`chem_sieve_config.json` in the
//! working directory by default); a missing or unreadable file falls back to the defaults.
//!
//! ## Configuration Format
//! ```json
//! {
//!   "balancer": { "max_coefficient": 8, "max_steps": 1000000 },
//!   "log_level": "info",
//!   "default_sieve_size": 1.0
//! }
//! ```
//!
//! ## Usage Pattern
//! ```rust, ignore
//! use ChemSieve::settings::SettingsManager;
//!
//! let mut manager = SettingsManager::new();
//! manager.set_max_coefficient(Some(10))?;
//! let balancer = manager.balancer();
//! ```

use crate::Chemistry::balancer::{Balancer, BalancerSettings};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

pub const DEFAULT_CONFIG_FILE: &str = "chem_sieve_config.json";

/// Serializable configuration.
///
/// # Fields
/// * `balancer` - search bounds of the equation balancer
/// * `log_level` - level name understood by `log::LevelFilter` ("error", "warn", "info", ...)
/// * `default_sieve_size` - volume used by the examples when none is given
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChemSettings {
    pub balancer: BalancerSettings,
    pub log_level: String,
    pub default_sieve_size: f64,
}

impl Default for ChemSettings {
    fn default() -> Self {
        Self {
            balancer: BalancerSettings {
                max_coefficient: Some(8),
                max_steps: Some(1_000_000),
            },
            log_level: "info".to_string(),
            default_sieve_size: 1.0,
        }
    }
}

/// Loads, updates and saves [`ChemSettings`].
///
/// # Fields
/// * `config` - current settings
/// * `config_file` - path used by `save_config`
#[derive(Debug, Clone)]
pub struct SettingsManager {
    config: ChemSettings,
    config_file: String,
}

impl SettingsManager {
    /// Reads `chem_sieve_config.json` from the current directory, or uses the defaults.
    pub fn new() -> Self {
        Self::with_config_file(DEFAULT_CONFIG_FILE)
    }

    /// Reads settings from a custom file, or uses the defaults if it can not be read.
    pub fn with_config_file(config_file: &str) -> Self {
        let config = Self::load_config(config_file).unwrap_or_default();
        Self {
            config,
            config_file: config_file.to_string(),
        }
    }

    /// # Returns
    /// * `Ok(ChemSettings)` - parsed settings, or the defaults if the file does not exist
    /// * `Err(Box<dyn std::error::Error>)` - on I/O or JSON errors
    fn load_config(config_file: &str) -> Result<ChemSettings, Box<dyn std::error::Error>> {
        if Path::new(config_file).exists() {
            let content = fs::read_to_string(config_file)?;
            let config: ChemSettings = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(ChemSettings::default())
        }
    }

    /// Writes the current settings to the config file as pretty JSON.
    pub fn save_config(&self) -> Result<(), Box<dyn std::error::Error>> {
        let content = serde_json::to_string_pretty(&self.config)?;
        fs::write(&self.config_file, content)?;
        Ok(())
    }

    pub fn get_config(&self) -> &ChemSettings {
        &self.config
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }

    /// balancer configured from the current settings
    pub fn balancer(&self) -> Balancer {
        Balancer::new(self.config.balancer.clone())
    }

    /// log level, "info" if the configured name is not recognised
    pub fn log_level(&self) -> LevelFilter {
        LevelFilter::from_str(&self.config.log_level).unwrap_or(LevelFilter::Info)
    }

    pub fn set_max_coefficient(
        &mut self,
        max_coefficient: Option<u32>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if max_coefficient == Some(0) {
            return Err("max_coefficient must be at least 1".into());
        }
        self.config.balancer.max_coefficient = max_coefficient;
        self.save_config()
    }

    pub fn set_max_steps(&mut self, max_steps: Option<u64>) -> Result<(), Box<dyn std::error::Error>> {
        self.config.balancer.max_steps = max_steps;
        self.save_config()
    }

    pub fn set_log_level(&mut self, level: &str) -> Result<(), Box<dyn std::error::Error>> {
        if LevelFilter::from_str(level).is_err() {
            return Err(format!("Unknown log level: {}", level).into());
        }
        self.config.log_level = level.to_string();
        self.save_config()
    }

    pub fn set_default_sieve_size(&mut self, size: f64) -> Result<(), Box<dyn std::error::Error>> {
        if !(size.is_finite() && size > 0.0) {
            return Err(format!("Sieve size must be positive, got {}", size).into());
        }
        self.config.default_sieve_size = size;
        self.save_config()
    }

    /// Restores the defaults and saves them.
    pub fn reset_to_defaults(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.config = ChemSettings::default();
        self.save_config()
    }
}

impl Default for SettingsManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_gives_defaults() {
        let manager = SettingsManager::with_config_file("definitely_missing_chem_sieve.json");
        assert_eq!(manager.get_config(), &ChemSettings::default());
        assert_eq!(manager.log_level(), LevelFilter::Info);
    }

    #[test]
    fn test_load_partial_config() {
        let mut config_file = NamedTempFile::new().unwrap();
        config_file
            .write_all(br#"{ "balancer": { "max_coefficient": 3, "max_steps": null }, "log_level": "debug" }"#)
            .unwrap();
        let manager = SettingsManager::with_config_file(config_file.path().to_str().unwrap());
        let config = manager.get_config();
        assert_eq!(config.balancer.max_coefficient, Some(3));
        assert_eq!(config.balancer.max_steps, None);
        assert_eq!(config.default_sieve_size, 1.0);
        assert_eq!(manager.log_level(), LevelFilter::Debug);
        assert_eq!(manager.balancer().settings().max_coefficient, Some(3));
    }

    #[test]
    fn test_invalid_json_gives_defaults() {
        let mut config_file = NamedTempFile::new().unwrap();
        config_file.write_all(b"not json").unwrap();
        let manager = SettingsManager::with_config_file(config_file.path().to_str().unwrap());
        assert_eq!(manager.get_config(), &ChemSettings::default());
    }

    #[test]
    fn test_save_and_reload() {
        let config_file = NamedTempFile::new().unwrap();
        let path = config_file.path().to_str().unwrap();
        let mut manager = SettingsManager::with_config_file(path);
        manager.set_max_coefficient(Some(12)).unwrap();
        manager.set_max_steps(None).unwrap();
        manager.set_log_level("warn").unwrap();
        manager.set_default_sieve_size(0.25).unwrap();

        let reloaded = SettingsManager::with_config_file(path);
        assert_eq!(reloaded.get_config(), manager.get_config());
        assert_eq!(reloaded.get_config().balancer.max_coefficient, Some(12));
        assert_eq!(reloaded.log_level(), LevelFilter::Warn);

        manager.reset_to_defaults().unwrap();
        let reloaded = SettingsManager::with_config_file(path);
        assert_eq!(reloaded.get_config(), &ChemSettings::default());
    }

    #[test]
    fn test_rejects_bad_values() {
        let config_file = NamedTempFile::new().unwrap();
        let mut manager = SettingsManager::with_config_file(config_file.path().to_str().unwrap());
        assert!(manager.set_max_coefficient(Some(0)).is_err());
        assert!(manager.set_log_level("loud").is_err());
        assert!(manager.set_default_sieve_size(0.0).is_err());
        assert_eq!(manager.get_config(), &ChemSettings::default());
    }
}
