//! Feature encoding
//!
//! Turns a validated [`PredictionInput`] into the fixed-order numeric
//! vector the model was trained on.

pub mod categories;

pub use categories::{Category, Education, Gender, JobTitle, Location};

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::config::FeatureConfig;
use crate::types::{FeatureVector, PredictionInput};
use crate::Error;

const FULL_FEATURES: &[&str] = &["Education", "Experience", "Location", "Job_Title", "Age", "Gender"];
const EXPERIENCE_FEATURES: &[&str] = &["years_of_experience"];

/// Feature layout the loaded model expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureSet {
    /// `[Education, Experience, Location, Job_Title, Age, Gender]`
    Full,
    /// `[years_of_experience]`
    ExperienceOnly,
}

impl FeatureSet {
    pub fn feature_names(&self) -> &'static [&'static str] {
        match self {
            FeatureSet::Full => FULL_FEATURES,
            FeatureSet::ExperienceOnly => EXPERIENCE_FEATURES,
        }
    }

    pub fn n_features(&self) -> usize {
        self.feature_names().len()
    }
}

impl FromStr for FeatureSet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(FeatureSet::Full),
            "experience_only" | "experience" => Ok(FeatureSet::ExperienceOnly),
            other => Err(Error::config(format!("unknown feature set: {}", other))),
        }
    }
}

/// Maps prediction inputs to feature vectors
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    feature_set: FeatureSet,
    default_age: f64,
}

impl FeatureEncoder {
    pub fn new(feature_set: FeatureSet, default_age: f64) -> Self {
        Self { feature_set, default_age }
    }

    pub fn from_config(config: &FeatureConfig) -> Self {
        Self::new(config.feature_set, config.default_age)
    }

    pub fn feature_set(&self) -> FeatureSet {
        self.feature_set
    }

    pub fn feature_names(&self) -> &'static [&'static str] {
        self.feature_set.feature_names()
    }

    /// Encode an input. Always returns `feature_set().n_features()` values in
    /// declared order; absent or unknown categories use their fallback.
    pub fn encode(&self, input: &PredictionInput) -> FeatureVector {
        let values = match self.feature_set {
            FeatureSet::ExperienceOnly => vec![input.years_of_experience],
            FeatureSet::Full => vec![
                encode_category::<Education>(input.education.as_deref()),
                input.years_of_experience,
                encode_category::<Location>(input.location.as_deref()),
                encode_category::<JobTitle>(input.job_title.as_deref()),
                input.age.unwrap_or(self.default_age),
                encode_category::<Gender>(input.gender.as_deref()),
            ],
        };
        FeatureVector::new(values)
    }
}

impl Default for FeatureEncoder {
    fn default() -> Self {
        Self::from_config(&FeatureConfig::default())
    }
}

fn encode_category<C: Category>(label: Option<&str>) -> f64 {
    let category = label.and_then(C::from_label).unwrap_or(C::FALLBACK);
    f64::from(category.index())
}
