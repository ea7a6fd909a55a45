//! Prediction service
//!
//! Owns everything a request needs: the model registry, the feature
//! encoder and the prediction history. Handlers receive it through the
//! server state instead of reaching for globals.

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::Config;
use crate::features::FeatureEncoder;
use crate::history::{HistoryStatistics, PredictionHistory, PredictionRecord};
use crate::model::{ModelBundle, ModelRegistry};
use crate::types::{FeatureVector, PredictionInput};
use crate::{Error, Result};

/// Result of a successful prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionOutcome {
    /// History record id
    pub id: u64,
    pub predicted_salary: f64,
    pub input: PredictionInput,
    /// Encoded features before scaling
    pub features: FeatureVector,
    pub timestamp: DateTime<Utc>,
}

/// Liveness summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub model_loaded: bool,
    pub scaler_loaded: bool,
    pub features: Vec<String>,
}

/// Description of the loaded model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub model_type: String,
    pub features: Vec<String>,
    pub n_features: usize,
    pub scaler_loaded: bool,
    pub loaded_at: Option<DateTime<Utc>>,
    pub status: String,
}

/// Outcome of a model reload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReloadStatus {
    pub message: String,
    pub model_loaded: bool,
    pub scaler_loaded: bool,
}

/// Service context shared by all request handlers
pub struct PredictionService {
    registry: ModelRegistry,
    encoder: FeatureEncoder,
    history: Arc<PredictionHistory>,
    strict_categories: bool,
    default_history_limit: usize,
}

impl PredictionService {
    pub fn new(registry: ModelRegistry, encoder: FeatureEncoder, history: Arc<PredictionHistory>) -> Self {
        Self {
            registry,
            encoder,
            history,
            strict_categories: false,
            default_history_limit: 10,
        }
    }

    /// Build the service from configuration, loading artifacts from disk.
    /// Missing or unreadable artifacts leave the model unloaded.
    pub fn from_config(config: &Config) -> Self {
        let registry = ModelRegistry::load_at_startup(config.model.clone());
        let encoder = FeatureEncoder::from_config(&config.features);
        let service = Self::new(registry, encoder, Arc::new(PredictionHistory::new()))
            .with_strict_categories(config.features.strict_categories)
            .with_default_history_limit(config.history.default_limit);
        service.check_model_shape(&service.registry.snapshot());
        service
    }

    pub fn with_strict_categories(mut self, strict: bool) -> Self {
        self.strict_categories = strict;
        self
    }

    pub fn with_default_history_limit(mut self, limit: usize) -> Self {
        self.default_history_limit = limit;
        self
    }

    pub fn is_model_loaded(&self) -> bool {
        self.registry.snapshot().is_model_loaded()
    }

    pub fn feature_names(&self) -> Vec<String> {
        self.encoder.feature_names().iter().map(|s| s.to_string()).collect()
    }

    pub fn history(&self) -> &Arc<PredictionHistory> {
        &self.history
    }

    pub fn health(&self) -> HealthStatus {
        let bundle = self.registry.snapshot();
        HealthStatus {
            status: "healthy".to_string(),
            model_loaded: bundle.is_model_loaded(),
            scaler_loaded: bundle.is_scaler_loaded(),
            features: self.feature_names(),
        }
    }

    /// Run the prediction pipeline: validate, encode, scale, infer, record.
    pub fn predict(&self, input: PredictionInput) -> Result<PredictionOutcome> {
        input.validate(self.strict_categories)?;

        let bundle = self.registry.snapshot();
        let model = bundle
            .model()
            .ok_or_else(|| Error::model_unavailable("Model not loaded. Please check if model file exists."))?;

        let features = self.encoder.encode(&input);
        let scaled = match bundle.scaler() {
            Some(scaler) => scaler.transform(features.as_slice())?,
            None => features.as_slice().to_vec(),
        };
        let predicted_salary = model.predict(&scaled)?;
        debug!("features={:?} scaled={:?} prediction={}", features.as_slice(), scaled, predicted_salary);

        let record = self.history.record(input, predicted_salary);
        info!("prediction #{}: {:.2}", record.id, predicted_salary);

        Ok(PredictionOutcome {
            id: record.id,
            predicted_salary,
            input: record.input,
            features,
            timestamp: record.timestamp,
        })
    }

    pub fn model_info(&self) -> Result<ModelInfo> {
        let bundle = self.registry.snapshot();
        let model = bundle
            .model()
            .ok_or_else(|| Error::model_unavailable("Model not loaded"))?;
        Ok(ModelInfo {
            model_type: model.model_type().to_string(),
            features: self.feature_names(),
            n_features: model.n_features(),
            scaler_loaded: bundle.is_scaler_loaded(),
            loaded_at: bundle.loaded_at(),
            status: "loaded".to_string(),
        })
    }

    pub fn statistics(&self) -> HistoryStatistics {
        self.history.statistics()
    }

    /// Most recent records, oldest first. `None` uses the configured default.
    pub fn recent_history(&self, limit: Option<usize>) -> Vec<PredictionRecord> {
        self.history.recent(limit.unwrap_or(self.default_history_limit))
    }

    pub fn clear_history(&self) -> usize {
        let removed = self.history.clear();
        info!("prediction history cleared ({} records)", removed);
        removed
    }

    /// Re-read model and scaler from their configured paths
    pub fn reload(&self) -> Result<ReloadStatus> {
        let bundle = self.registry.reload()?;
        self.check_model_shape(&bundle);
        Ok(ReloadStatus {
            message: "Model reloaded".to_string(),
            model_loaded: bundle.is_model_loaded(),
            scaler_loaded: bundle.is_scaler_loaded(),
        })
    }

    fn check_model_shape(&self, bundle: &ModelBundle) {
        if let Some(model) = bundle.model() {
            let expected = self.encoder.feature_set().n_features();
            if model.n_features() != expected {
                warn!(
                    "{} expects {} features but the encoder produces {}; predictions will fail",
                    model.model_type(),
                    model.n_features(),
                    expected
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelConfig;
    use crate::features::FeatureSet;
    use crate::model::{FeatureScaler, LinearRegressor, Regressor, StandardScaler};

    /// Model that returns a weighted sum, so the prediction reveals the features it saw
    fn identity_like_model() -> Arc<dyn Regressor> {
        Arc::new(LinearRegressor::new(vec![1e5, 1e4, 1e3, 1e2, 1e0, 1e-2], 0.0).unwrap())
    }

    fn service_with(model: Option<Arc<dyn Regressor>>, scaler: Option<Arc<dyn FeatureScaler>>) -> PredictionService {
        let bundle = ModelBundle::new(model, scaler).unwrap();
        PredictionService::new(
            ModelRegistry::with_bundle(ModelConfig::default(), bundle),
            FeatureEncoder::default(),
            Arc::new(PredictionHistory::new()),
        )
    }

    fn engineer() -> PredictionInput {
        PredictionInput {
            years_of_experience: 5.0,
            education: Some("Bachelor".to_string()),
            location: Some("Urban".to_string()),
            job_title: Some("Engineer".to_string()),
            age: Some(28.0),
            gender: Some("Male".to_string()),
        }
    }

    #[test]
    fn test_predict_without_scaler() {
        let service = service_with(Some(identity_like_model()), None);
        let outcome = service.predict(engineer()).unwrap();

        assert_eq!(outcome.features.as_slice(), &[1.0, 5.0, 2.0, 3.0, 28.0, 1.0]);
        let expected = 1e5 + 5e4 + 2e3 + 3e2 + 28.0 + 1e-2;
        assert!((outcome.predicted_salary - expected).abs() < 1e-6);
        assert_eq!(outcome.id, 1);
        assert_eq!(service.history().len(), 1);
    }

    #[test]
    fn test_predict_applies_scaler() {
        let model: Arc<dyn Regressor> = Arc::new(LinearRegressor::new(vec![10000.0], 50000.0).unwrap());
        let scaler: Arc<dyn FeatureScaler> = Arc::new(StandardScaler::new(vec![5.0], vec![2.5]).unwrap());
        let service = PredictionService::new(
            ModelRegistry::with_bundle(ModelConfig::default(), ModelBundle::new(Some(model), Some(scaler)).unwrap()),
            FeatureEncoder::new(FeatureSet::ExperienceOnly, 30.0),
            Arc::new(PredictionHistory::new()),
        );

        let outcome = service.predict(PredictionInput::with_experience(10.0)).unwrap();
        assert_eq!(outcome.predicted_salary, 70000.0);
        assert_eq!(outcome.features.as_slice(), &[10.0]);
    }

    #[test]
    fn test_no_model_is_unavailable() {
        let service = service_with(None, None);
        let err = service.predict(PredictionInput::with_experience(5.0)).unwrap_err();
        assert!(matches!(err, Error::ModelUnavailable(_)));
        assert!(service.history().is_empty());
        assert!(matches!(service.model_info(), Err(Error::ModelUnavailable(_))));
    }

    #[test]
    fn test_validation_runs_before_model_check() {
        let service = service_with(None, None);
        let err = service.predict(PredictionInput::with_experience(50.0)).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_shape_mismatch_is_inference_error() {
        let model: Arc<dyn Regressor> = Arc::new(LinearRegressor::new(vec![1.0], 0.0).unwrap());
        let service = service_with(Some(model), None);
        let err = service.predict(engineer()).unwrap_err();
        assert!(matches!(err, Error::Inference(_)));
        assert!(service.history().is_empty());
    }

    #[test]
    fn test_strict_categories_reject_unknown_labels() {
        let service = service_with(Some(identity_like_model()), None).with_strict_categories(true);
        let mut input = engineer();
        input.location = Some("Moon".to_string());
        assert!(matches!(service.predict(input).unwrap_err(), Error::Validation(_)));
    }

    #[test]
    fn test_history_and_statistics() {
        let service = service_with(Some(identity_like_model()), None).with_default_history_limit(2);
        for _ in 0..3 {
            service.predict(engineer()).unwrap();
        }

        assert_eq!(service.recent_history(None).len(), 2);
        assert_eq!(service.recent_history(Some(3)).iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(service.statistics().total_predictions, 3);

        assert_eq!(service.clear_history(), 3);
        assert!(service.recent_history(None).is_empty());
        assert_eq!(service.statistics().total_predictions, 0);
    }

    #[test]
    fn test_model_info() {
        let service = service_with(Some(identity_like_model()), None);
        let info = service.model_info().unwrap();
        assert_eq!(info.model_type, "LinearRegression");
        assert_eq!(info.n_features, 6);
        assert_eq!(info.features[3], "Job_Title");
        assert!(!info.scaler_loaded);
    }

    #[test]
    fn test_from_config_without_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.model.model_path = dir.path().join("missing.json");
        config.model.scaler_path = dir.path().join("missing_scaler.json");

        let service = PredictionService::from_config(&config);
        assert!(!service.is_model_loaded());
        let health = service.health();
        assert_eq!(health.status, "healthy");
        assert!(!health.model_loaded);
        assert_eq!(health.features.len(), 6);
    }
}
