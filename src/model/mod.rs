//! Model and scaler loading
//!
//! The model and scaler are held together as one immutable
//! [`ModelBundle`]. Readers take an `Arc` snapshot of the current bundle;
//! a reload builds a complete new bundle and swaps it in under a write
//! lock, so no request can observe a model from one load paired with a
//! scaler from another.

pub mod linear;
pub mod scaler;

pub use linear::{LinearModelArtifact, LinearRegressor, Regressor};
pub use scaler::{FeatureScaler, StandardScaler, StandardScalerArtifact};

use chrono::{DateTime, Utc};
use log::{error, info, warn};
use parking_lot::RwLock;
use std::path::Path;
use std::sync::Arc;

use crate::config::ModelConfig;
use crate::{Error, Result};

/// A model/scaler pair loaded together
#[derive(Debug, Default)]
pub struct ModelBundle {
    model: Option<Arc<dyn Regressor>>,
    scaler: Option<Arc<dyn FeatureScaler>>,
    loaded_at: Option<DateTime<Utc>>,
}

impl ModelBundle {
    pub fn new(model: Option<Arc<dyn Regressor>>, scaler: Option<Arc<dyn FeatureScaler>>) -> Result<Self> {
        if let (Some(model), Some(scaler)) = (&model, &scaler) {
            if model.n_features() != scaler.n_features() {
                return Err(Error::artifact(format!(
                    "{} expects {} features but {} was fitted on {}",
                    model.model_type(),
                    model.n_features(),
                    scaler.name(),
                    scaler.n_features()
                )));
            }
        }
        let loaded_at = (model.is_some() || scaler.is_some()).then(Utc::now);
        Ok(Self {
            model,
            scaler,
            loaded_at,
        })
    }

    /// Bundle with nothing loaded
    pub fn empty() -> Self {
        Self::default()
    }

    /// Read both artifacts. A missing file leaves its slot empty; a file
    /// that exists but cannot be read or parsed is an error.
    pub fn load(config: &ModelConfig) -> Result<Self> {
        let model = load_optional(&config.model_path, "model", |p| LinearRegressor::from_file(p))?
            .map(|m| Arc::new(m) as Arc<dyn Regressor>);
        let scaler = load_optional(&config.scaler_path, "scaler", |p| StandardScaler::from_file(p))?
            .map(|s| Arc::new(s) as Arc<dyn FeatureScaler>);
        Self::new(model, scaler)
    }

    pub fn model(&self) -> Option<&Arc<dyn Regressor>> {
        self.model.as_ref()
    }

    pub fn scaler(&self) -> Option<&Arc<dyn FeatureScaler>> {
        self.scaler.as_ref()
    }

    pub fn is_model_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn is_scaler_loaded(&self) -> bool {
        self.scaler.is_some()
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }
}

fn load_optional<T, F>(path: &Path, what: &str, loader: F) -> Result<Option<T>>
where
    F: FnOnce(&Path) -> Result<T>,
{
    if !path.exists() {
        warn!("{} file not found at {}", what, path.display());
        return Ok(None);
    }
    let value = loader(path)?;
    info!("{} loaded from {}", what, path.display());
    Ok(Some(value))
}

/// Holds the current model bundle and swaps it on reload
pub struct ModelRegistry {
    config: ModelConfig,
    current: RwLock<Arc<ModelBundle>>,
}

impl ModelRegistry {
    /// Registry with nothing loaded
    pub fn new(config: ModelConfig) -> Self {
        Self::with_bundle(config, ModelBundle::empty())
    }

    pub fn with_bundle(config: ModelConfig, bundle: ModelBundle) -> Self {
        Self {
            config,
            current: RwLock::new(Arc::new(bundle)),
        }
    }

    /// Load artifacts at startup. Failures are logged and leave the
    /// registry unloaded rather than aborting the process.
    pub fn load_at_startup(config: ModelConfig) -> Self {
        let bundle = match ModelBundle::load(&config) {
            Ok(bundle) => bundle,
            Err(err) => {
                error!("Error loading model or scaler: {}", err);
                ModelBundle::empty()
            }
        };
        Self::with_bundle(config, bundle)
    }

    /// Current bundle. Hold on to the returned `Arc` for the whole request.
    pub fn snapshot(&self) -> Arc<ModelBundle> {
        self.current.read().clone()
    }

    /// Re-read both artifacts and swap them in. On failure the previous
    /// bundle stays in place.
    pub fn reload(&self) -> Result<Arc<ModelBundle>> {
        let bundle = Arc::new(ModelBundle::load(&self.config)?);
        *self.current.write() = bundle.clone();
        info!(
            "model reloaded: model_loaded={}, scaler_loaded={}",
            bundle.is_model_loaded(),
            bundle.is_scaler_loaded()
        );
        Ok(bundle)
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config_in(dir: &Path) -> ModelConfig {
        ModelConfig {
            model_path: dir.join("model.json"),
            scaler_path: dir.join("scaler.json"),
        }
    }

    #[test]
    fn test_missing_files_load_as_unloaded() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = ModelBundle::load(&config_in(dir.path())).unwrap();
        assert!(!bundle.is_model_loaded());
        assert!(!bundle.is_scaler_loaded());
    }

    #[test]
    fn test_loaded_at_only_set_when_something_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        assert!(ModelBundle::load(&config).unwrap().loaded_at().is_none());
        assert!(ModelBundle::empty().loaded_at().is_none());

        StandardScaler::new(vec![0.0], vec![1.0]).unwrap().to_file(&config.scaler_path).unwrap();
        assert!(ModelBundle::load(&config).unwrap().loaded_at().is_some());
    }

    #[test]
    fn test_startup_degrades_on_malformed_model() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("model.json"), "not json").unwrap();

        let registry = ModelRegistry::load_at_startup(config_in(dir.path()));
        assert!(!registry.snapshot().is_model_loaded());
    }

    #[test]
    fn test_mismatched_pair_is_rejected() {
        let model: Arc<dyn Regressor> = Arc::new(LinearRegressor::new(vec![1.0; 6], 0.0).unwrap());
        let scaler: Arc<dyn FeatureScaler> = Arc::new(StandardScaler::new(vec![0.0], vec![1.0]).unwrap());
        assert!(ModelBundle::new(Some(model), Some(scaler)).is_err());
    }

    #[test]
    fn test_reload_swaps_pair() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let registry = ModelRegistry::new(config.clone());
        let before = registry.snapshot();
        assert!(!before.is_model_loaded());

        LinearRegressor::new(vec![1000.0], 30000.0).unwrap().to_file(&config.model_path).unwrap();
        StandardScaler::new(vec![5.0], vec![2.0]).unwrap().to_file(&config.scaler_path).unwrap();

        let after = registry.reload().unwrap();
        assert!(after.is_model_loaded());
        assert!(after.is_scaler_loaded());
        assert!(registry.snapshot().is_model_loaded());
        // snapshots taken earlier keep the old pair
        assert!(!before.is_model_loaded());
    }

    #[test]
    fn test_failed_reload_keeps_previous_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        LinearRegressor::new(vec![1000.0], 30000.0).unwrap().to_file(&config.model_path).unwrap();

        let registry = ModelRegistry::load_at_startup(config.clone());
        assert!(registry.snapshot().is_model_loaded());

        std::fs::write(&config.model_path, "{\"coefficients\": []").unwrap();
        assert!(registry.reload().is_err());
        assert!(registry.snapshot().is_model_loaded());
    }

    #[test]
    fn test_registry_keeps_config() {
        let registry = ModelRegistry::new(ModelConfig::default());
        assert_eq!(registry.config().model_path, PathBuf::from("model/model.json"));
    }
}
