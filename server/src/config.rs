//! Configuration module

use std::env;
use std::str::FromStr;

use parkinson_core::constants::{DEFAULT_MODEL_PATH, DEFAULT_TOP_CONTRIBUTIONS};

/// Where the input controls are placed relative to the results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardLayout {
    /// Controls stacked above the results in the main panel
    #[default]
    Main,
    /// Controls in a fixed left sidebar, results in the main panel
    Sidebar,
}

impl FromStr for DashboardLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "main" => Ok(DashboardLayout::Main),
            "sidebar" => Ok(DashboardLayout::Sidebar),
            other => Err(format!("unknown dashboard layout: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format: {}", other)),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Serialized model artifact
    pub model_path: String,

    /// Ranked contributions shown in the table and chart
    pub top_contributions: usize,

    /// Presentation strategy for the dashboard page
    pub layout: DashboardLayout,

    pub log_format: LogFormat,

    /// Environment (development, production)
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8501,
            model_path: DEFAULT_MODEL_PATH.to_string(),
            top_contributions: DEFAULT_TOP_CONTRIBUTIONS,
            layout: DashboardLayout::Main,
            log_format: LogFormat::Pretty,
            environment: "development".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparsable keys keep their default
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),

            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),

            model_path: lookup("MODEL_PATH").unwrap_or(defaults.model_path),

            top_contributions: lookup("TOP_CONTRIBUTIONS")
                .and_then(|n| n.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.top_contributions),

            layout: lookup("DASHBOARD_LAYOUT")
                .and_then(|l| l.parse().ok())
                .unwrap_or(defaults.layout),

            log_format: lookup("LOG_FORMAT")
                .and_then(|f| f.parse().ok())
                .unwrap_or(defaults.log_format),

            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config.port, 8501);
        assert_eq!(config.model_path, "models/model.json");
        assert_eq!(config.top_contributions, 10);
        assert_eq!(config.layout, DashboardLayout::Main);
        assert!(!config.is_production());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "9000"),
            ("MODEL_PATH", "/srv/model.json"),
            ("TOP_CONTRIBUTIONS", "5"),
            ("DASHBOARD_LAYOUT", "Sidebar"),
            ("LOG_FORMAT", "json"),
            ("ENVIRONMENT", "production"),
        ]));
        assert_eq!(config.port, 9000);
        assert_eq!(config.model_path, "/srv/model.json");
        assert_eq!(config.top_contributions, 5);
        assert_eq!(config.layout, DashboardLayout::Sidebar);
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(config.is_production());
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "http"),
            ("TOP_CONTRIBUTIONS", "0"),
            ("DASHBOARD_LAYOUT", "carousel"),
        ]));
        assert_eq!(config.port, 8501);
        assert_eq!(config.top_contributions, 10);
        assert_eq!(config.layout, DashboardLayout::Main);
    }
}
