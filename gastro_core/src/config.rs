//! Configuration file support for GastroGuard.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/gastroguard/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub simulation: SimulationConfig,

    #[serde(default)]
    pub history: HistoryConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Severity simulation parameters configuration
///
/// The sampling stride is derived from the step so the output stays
/// roughly hourly if the step is changed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_step_hours")]
    pub step_hours: f64,

    #[serde(default = "default_horizon_hours")]
    pub default_horizon_hours: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            step_hours: default_step_hours(),
            default_horizon_hours: default_horizon_hours(),
        }
    }
}

/// History loading configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// How many days of entries the assessment and summary flows consider
    #[serde(default = "default_window_days")]
    pub window_days: i64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
        }
    }
}

/// User additions to the built-in label catalog
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    #[serde(default)]
    pub custom_triggers: Vec<String>,
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME")
            .expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("gastroguard")
}

fn default_step_hours() -> f64 {
    0.1
}

fn default_horizon_hours() -> f64 {
    24.0
}

fn default_window_days() -> i64 {
    30
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME")
                .expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("gastroguard").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if !self.simulation.step_hours.is_finite() || self.simulation.step_hours <= 0.0 {
            return Err(Error::Config(format!(
                "simulation.step_hours must be positive, got {}",
                self.simulation.step_hours
            )));
        }
        if !self.simulation.default_horizon_hours.is_finite()
            || self.simulation.default_horizon_hours <= 0.0
            || self.simulation.default_horizon_hours > crate::projection::MAX_HORIZON_HOURS
        {
            return Err(Error::Config(format!(
                "simulation.default_horizon_hours must be in (0, {}], got {}",
                crate::projection::MAX_HORIZON_HOURS,
                self.simulation.default_horizon_hours
            )));
        }
        if self.history.window_days <= 0 {
            return Err(Error::Config(format!(
                "history.window_days must be positive, got {}",
                self.history.window_days
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.simulation.step_hours, 0.1);
        assert_eq!(config.simulation.default_horizon_hours, 24.0);
        assert_eq!(config.history.window_days, 30);
        assert!(config.catalog.custom_triggers.is_empty());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.simulation.step_hours, parsed.simulation.step_hours);
        assert_eq!(config.history.window_days, parsed.history.window_days);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[history]
window_days = 14

[catalog]
custom_triggers = ["Raw Onion"]
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.history.window_days, 14);
        assert_eq!(config.simulation.step_hours, 0.1); // default
        assert_eq!(config.catalog.custom_triggers, vec!["Raw Onion"]);
    }

    #[test]
    fn test_invalid_step_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[simulation]\nstep_hours = 0.0\n").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_oversized_horizon_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[simulation]\ndefault_horizon_hours = 1e12\n").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
