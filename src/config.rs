use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::features::FeatureSet;
use crate::{Error, Result};

/// Main configuration for the salary predictor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Model artifact locations
    pub model: ModelConfig,

    /// Feature encoding configuration
    pub features: FeatureConfig,

    /// Prediction history configuration
    pub history: HistoryConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Number of worker threads
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            workers: num_cpus::get(),
        }
    }
}

/// Model artifact configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Path to the regression model artifact
    pub model_path: PathBuf,

    /// Path to the feature scaler artifact
    pub scaler_path: PathBuf,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("model/model.json"),
            scaler_path: PathBuf::from("model/scaler.json"),
        }
    }
}

/// Feature encoding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Which features the model was trained on
    pub feature_set: FeatureSet,

    /// Reject unrecognised category labels instead of falling back
    pub strict_categories: bool,

    /// Age used when the request omits it
    pub default_age: f64,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            feature_set: FeatureSet::Full,
            strict_categories: false,
            default_age: 30.0,
        }
    }
}

/// Prediction history configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Number of records returned by `/history` when no limit is given
    pub default_limit: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { default_limit: 10 }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn to_file(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Override settings from `SALARY_*` environment variables
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SALARY_API_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SALARY_API_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| Error::config(format!("SALARY_API_PORT is not a valid port: {}", port)))?;
        }
        if let Some(path) = lookup("SALARY_MODEL_PATH") {
            self.model.model_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("SALARY_SCALER_PATH") {
            self.model.scaler_path = PathBuf::from(path);
        }
        if let Some(set) = lookup("SALARY_FEATURE_SET") {
            self.features.feature_set = set.parse()?;
        }
        Ok(())
    }

    /// Check the configuration for values the service cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(Error::config("server.host must not be empty"));
        }
        if self.server.workers == 0 {
            return Err(Error::config("server.workers must be at least 1"));
        }
        if !self.features.default_age.is_finite() || self.features.default_age <= 0.0 {
            return Err(Error::config(format!(
                "features.default_age must be a positive number, got {}",
                self.features.default_age
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.model.model_path, PathBuf::from("model/model.json"));
        assert_eq!(config.features.feature_set, FeatureSet::Full);
        assert!(!config.features.strict_categories);
        assert_eq!(config.history.default_limit, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_round_trip_with_partial_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"server": {"port": 9100}, "features": {"feature_set": "experience_only"}}"#).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.features.feature_set, FeatureSet::ExperienceOnly);
        assert_eq!(config.features.default_age, 30.0);

        let saved = dir.path().join("saved.json");
        config.to_file(&saved).unwrap();
        let reloaded = Config::from_file(&saved).unwrap();
        assert_eq!(reloaded.server.port, 9100);
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("SALARY_API_PORT", "8123"),
            ("SALARY_MODEL_PATH", "/srv/models/salary.json"),
            ("SALARY_FEATURE_SET", "experience_only"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string())).unwrap();
        assert_eq!(config.server.port, 8123);
        assert_eq!(config.model.model_path, PathBuf::from("/srv/models/salary.json"));
        assert_eq!(config.features.feature_set, FeatureSet::ExperienceOnly);
    }

    #[test]
    fn test_invalid_port_override() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(|key| (key == "SALARY_API_PORT").then(|| "eighty".to_string()))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_validate_rejects_zero_workers() {
        let mut config = Config::default();
        config.server.workers = 0;
        assert!(config.validate().is_err());
    }
}
