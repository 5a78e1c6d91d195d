use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// User settings, read from `~/.loan-dashboard/config.json`.
/// Every field falls back to its default when missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Event poll timeout; also the granularity of notification fades
    pub tick_rate_ms: u64,
    /// How long a notification stays fully visible
    pub notification_ms: u64,
    /// Length of the fade-out phase
    pub fade_ms: u64,
    /// Period of the simulated KPI update
    pub update_interval_secs: u64,
    /// Chance that a period actually changes the KPI
    pub update_probability: f64,
    /// Total relative spread of a KPI nudge (0.05 = ±2.5%)
    pub update_jitter: f64,
    /// Directory the CSV export is written to; empty means the working directory
    pub export_dir: String,
    /// Start with the chart library available
    pub charts_enabled: bool,
    /// Default log level when RUST_LOG is unset
    pub log_level: String,
    /// Log file path; empty means `~/.loan-dashboard/dashboard.log`
    pub log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate_ms: 100,
            notification_ms: 2500,
            fade_ms: 300,
            update_interval_secs: 30,
            update_probability: 0.2,
            update_jitter: 0.05,
            export_dir: String::new(),
            charts_enabled: true,
            log_level: "info".to_string(),
            log_file: String::new(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".loan-dashboard"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Whether a config file is present on disk
    pub fn exists() -> bool {
        Self::config_path().is_some_and(|p| p.exists())
    }

    /// Load the config, falling back to defaults when absent or unreadable
    pub fn load() -> Config {
        let Some(config_path) = Self::config_path() else {
            return Config::default();
        };
        if !config_path.exists() {
            return Config::default();
        }

        match fs::read_to_string(&config_path) {
            Ok(contents) => Self::parse(&contents).unwrap_or_else(|e| {
                log::warn!("ignoring invalid config {}: {}", config_path.display(), e);
                Config::default()
            }),
            Err(e) => {
                log::warn!("cannot read config {}: {}", config_path.display(), e);
                Config::default()
            }
        }
    }

    pub fn parse(contents: &str) -> Result<Config, serde_json::Error> {
        serde_json::from_str(contents)
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_dir = Self::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }

    pub fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notification_ms)
    }

    pub fn fade_duration(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }

    pub fn update_interval(&self) -> Duration {
        Duration::from_secs(self.update_interval_secs.max(1))
    }

    pub fn export_dir(&self) -> PathBuf {
        if self.export_dir.is_empty() {
            PathBuf::from(".")
        } else {
            PathBuf::from(&self.export_dir)
        }
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        if self.log_file.is_empty() {
            Self::config_dir().map(|dir| dir.join("dashboard.log"))
        } else {
            Some(PathBuf::from(&self.log_file))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = Config::parse(r#"{ "update_interval_secs": 5, "charts_enabled": false }"#)
            .unwrap();
        assert_eq!(config.update_interval(), Duration::from_secs(5));
        assert!(!config.charts_enabled);
        assert_eq!(config.notification_ms, 2500);
        assert_eq!(config.update_probability, 0.2);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Config::parse("{ not json").is_err());
    }

    #[test]
    fn test_empty_export_dir_means_working_dir() {
        let config = Config::default();
        assert_eq!(config.export_dir(), PathBuf::from("."));

        let config = Config {
            export_dir: "/tmp/exports".to_string(),
            ..Config::default()
        };
        assert_eq!(config.export_dir(), PathBuf::from("/tmp/exports"));
    }

    #[test]
    fn test_zero_durations_are_clamped() {
        let config = Config {
            tick_rate_ms: 0,
            update_interval_secs: 0,
            ..Config::default()
        };
        assert_eq!(config.tick_rate(), Duration::from_millis(1));
        assert_eq!(config.update_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_round_trip_through_json() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(Config::parse(&json).unwrap(), config);
    }
}
