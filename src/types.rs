//! Request-level data types shared by the service and the HTTP layer.

use serde::{Deserialize, Serialize};

use crate::features::{Education, Gender, JobTitle, Location};
use crate::{Error, Result};

/// Years of experience must lie strictly between these bounds
pub const MIN_EXPERIENCE_YEARS: f64 = 0.0;
pub const MAX_EXPERIENCE_YEARS: f64 = 50.0;

/// Inclusive age bounds
pub const MIN_AGE: f64 = 14.0;
pub const MAX_AGE: f64 = 100.0;

/// Candidate description submitted for prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionInput {
    /// Years of professional experience, in (0, 50)
    pub years_of_experience: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

impl PredictionInput {
    /// Input carrying only years of experience
    pub fn with_experience(years_of_experience: f64) -> Self {
        Self {
            years_of_experience,
            education: None,
            location: None,
            job_title: None,
            age: None,
            gender: None,
        }
    }

    /// Check the input against its declared domain.
    ///
    /// With `strict_categories` set, any categorical label that does not
    /// name a known category is rejected as well.
    pub fn validate(&self, strict_categories: bool) -> Result<()> {
        let years = self.years_of_experience;
        if !years.is_finite() || years <= MIN_EXPERIENCE_YEARS || years >= MAX_EXPERIENCE_YEARS {
            return Err(Error::validation(format!(
                "years_of_experience must be greater than {} and less than {}, got {}",
                MIN_EXPERIENCE_YEARS, MAX_EXPERIENCE_YEARS, years
            )));
        }

        if let Some(age) = self.age {
            if !age.is_finite() || !(MIN_AGE..=MAX_AGE).contains(&age) {
                return Err(Error::validation(format!(
                    "age must be between {} and {}, got {}",
                    MIN_AGE, MAX_AGE, age
                )));
            }
        }

        if strict_categories {
            check_label::<Education>("education", self.education.as_deref())?;
            check_label::<Location>("location", self.location.as_deref())?;
            check_label::<JobTitle>("job_title", self.job_title.as_deref())?;
            check_label::<Gender>("gender", self.gender.as_deref())?;
        }

        Ok(())
    }
}

fn check_label<C: crate::features::Category>(field: &str, label: Option<&str>) -> Result<()> {
    match label {
        Some(label) if C::from_label(label).is_none() => Err(Error::validation(format!(
            "{} must be one of [{}], got '{}'",
            field,
            C::ALL.iter().map(|c| c.label()).collect::<Vec<_>>().join(", "),
            label
        ))),
        _ => Ok(()),
    }
}

/// Ordered numeric features consumed by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
