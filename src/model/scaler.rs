//! Feature scalers applied before inference

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::path::Path;

use crate::error::WithErrorContext;
use crate::{Error, Result};

/// Pre-fitted transform over a feature vector
pub trait FeatureScaler: Send + Sync + Debug {
    /// Number of features the scaler was fitted on
    fn n_features(&self) -> usize;

    /// Transform one feature vector; output has the same length
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>>;

    /// Scaler name
    fn name(&self) -> &str;
}

/// On-disk form of a [`StandardScaler`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScalerArtifact {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Z-score scaler: `(x - mean) / scale`
#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    /// Create a scaler from fitted parameters.
    ///
    /// A zero scale entry is treated as 1 so constant features pass
    /// through centred but unscaled.
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self> {
        if mean.is_empty() {
            return Err(Error::artifact("scaler mean is empty"));
        }
        if mean.len() != scale.len() {
            return Err(Error::artifact(format!(
                "scaler mean has {} entries but scale has {}",
                mean.len(),
                scale.len()
            )));
        }
        if mean.iter().chain(scale.iter()).any(|v| !v.is_finite()) {
            return Err(Error::artifact("scaler parameters contain non-finite values"));
        }

        let scale = scale
            .into_iter()
            .map(|s| if s == 0.0 { 1.0 } else { s })
            .collect();
        Ok(Self { mean, scale })
    }

    /// Load a scaler artifact from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let load = || -> Result<Self> {
            let content = std::fs::read_to_string(path)?;
            let artifact: StandardScalerArtifact = serde_json::from_str(&content)?;
            Self::new(artifact.mean, artifact.scale)
        };
        load().with_context(path.display().to_string())
    }

    /// Write the scaler as a JSON artifact
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.to_artifact())?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn to_artifact(&self) -> StandardScalerArtifact {
        StandardScalerArtifact {
            mean: self.mean.clone(),
            scale: self.scale.clone(),
        }
    }
}

impl FeatureScaler for StandardScaler {
    fn n_features(&self) -> usize {
        self.mean.len()
    }

    fn transform(&self, features: &[f64]) -> Result<Vec<f64>> {
        if features.len() != self.mean.len() {
            return Err(Error::inference(format!(
                "input has {} features, but StandardScaler is expecting {} features",
                features.len(),
                self.mean.len()
            )));
        }

        Ok(features
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(x, (mean, scale))| (x - mean) / scale)
            .collect())
    }

    fn name(&self) -> &str {
        "StandardScaler"
    }
}
