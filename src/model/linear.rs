//! Regression model adapter

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::path::Path;

use crate::error::WithErrorContext;
use crate::{Error, Result};

/// A trained regression model: feature vector in, scalar out
pub trait Regressor: Send + Sync + Debug {
    /// Model type label reported to clients
    fn model_type(&self) -> &str;

    /// Number of features the model was trained on
    fn n_features(&self) -> usize;

    /// Predict a single value
    fn predict(&self, features: &[f64]) -> Result<f64>;
}

fn default_model_type() -> String {
    "LinearRegression".to_string()
}

/// On-disk form of a [`LinearRegressor`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModelArtifact {
    #[serde(default = "default_model_type")]
    pub model_type: String,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub feature_names: Vec<String>,
}

/// Linear model `coefficients · x + intercept`.
///
/// Covers any exported linear estimator (ordinary least squares, ridge,
/// lasso); `model_type` only labels which one produced the weights.
#[derive(Debug, Clone)]
pub struct LinearRegressor {
    model_type: String,
    coefficients: Vec<f64>,
    intercept: f64,
    feature_names: Vec<String>,
}

impl LinearRegressor {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Result<Self> {
        Self::from_artifact(LinearModelArtifact {
            model_type: default_model_type(),
            coefficients,
            intercept,
            feature_names: Vec::new(),
        })
    }

    pub fn from_artifact(artifact: LinearModelArtifact) -> Result<Self> {
        if artifact.coefficients.is_empty() {
            return Err(Error::artifact("model has no coefficients"));
        }
        if !artifact.intercept.is_finite() || artifact.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(Error::artifact("model parameters contain non-finite values"));
        }
        if !artifact.feature_names.is_empty() && artifact.feature_names.len() != artifact.coefficients.len() {
            return Err(Error::artifact(format!(
                "model lists {} feature names for {} coefficients",
                artifact.feature_names.len(),
                artifact.coefficients.len()
            )));
        }
        let model_type = if artifact.model_type.trim().is_empty() {
            default_model_type()
        } else {
            artifact.model_type
        };

        Ok(Self {
            model_type,
            coefficients: artifact.coefficients,
            intercept: artifact.intercept,
            feature_names: artifact.feature_names,
        })
    }

    /// Load a model artifact from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let load = || -> Result<Self> {
            let content = std::fs::read_to_string(path)?;
            let artifact: LinearModelArtifact = serde_json::from_str(&content)?;
            Self::from_artifact(artifact)
        };
        load().with_context(path.display().to_string())
    }

    /// Write the model as a JSON artifact
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.to_artifact())?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn to_artifact(&self) -> LinearModelArtifact {
        LinearModelArtifact {
            model_type: self.model_type.clone(),
            coefficients: self.coefficients.clone(),
            intercept: self.intercept,
            feature_names: self.feature_names.clone(),
        }
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }
}

impl Regressor for LinearRegressor {
    fn model_type(&self) -> &str {
        &self.model_type
    }

    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.coefficients.len() {
            return Err(Error::inference(format!(
                "input has {} features, but {} is expecting {} features",
                features.len(),
                self.model_type,
                self.coefficients.len()
            )));
        }

        let value = features
            .iter()
            .zip(self.coefficients.iter())
            .fold(self.intercept, |acc, (x, w)| acc + x * w);

        if !value.is_finite() {
            return Err(Error::inference(format!("{} produced a non-finite prediction", self.model_type)));
        }
        Ok(value)
    }
}
