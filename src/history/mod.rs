//! In-memory prediction history
//!
//! Append-only log of successful predictions with aggregate statistics.
//! The log lives for the process lifetime only.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::features::{Category, Education, JobTitle, Location};
use crate::types::PredictionInput;

/// One logged prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    /// Sequential id, starting at 1
    pub id: u64,
    /// Time the prediction was recorded
    pub timestamp: DateTime<Utc>,
    /// Input as submitted
    pub input: PredictionInput,
    /// Model output
    pub predicted_salary: f64,
}

/// Lowest and highest predicted salary
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: f64,
    pub max: f64,
}

/// Aggregates over every stored record
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HistoryStatistics {
    /// Number of recorded predictions
    pub total_predictions: usize,
    /// Mean predicted salary, 0 when empty
    pub average_salary: f64,
    /// `{0, 0}` when empty
    pub salary_range: SalaryRange,
    pub most_common_job_title: Option<String>,
    pub most_common_education: Option<String>,
    pub most_common_location: Option<String>,
}

#[derive(Debug)]
struct HistoryInner {
    records: Vec<PredictionRecord>,
    next_id: u64,
}

impl Default for HistoryInner {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }
}

/// Prediction history store.
///
/// Appends take the write lock, so ids are assigned in insertion order
/// without gaps. Readers see whole records only.
#[derive(Debug, Default)]
pub struct PredictionHistory {
    inner: RwLock<HistoryInner>,
}

impl PredictionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and return it
    pub fn record(&self, input: PredictionInput, predicted_salary: f64) -> PredictionRecord {
        let mut inner = self.inner.write();
        let record = PredictionRecord {
            id: inner.next_id,
            timestamp: Utc::now(),
            input,
            predicted_salary,
        };
        inner.next_id += 1;
        inner.records.push(record.clone());
        record
    }

    /// The last `limit` records, oldest first
    pub fn recent(&self, limit: usize) -> Vec<PredictionRecord> {
        let inner = self.inner.read();
        let start = inner.records.len().saturating_sub(limit);
        inner.records[start..].to_vec()
    }

    /// Aggregate statistics over all records
    pub fn statistics(&self) -> HistoryStatistics {
        let inner = self.inner.read();
        if inner.records.is_empty() {
            return HistoryStatistics::default();
        }

        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut job_titles = Tally::default();
        let mut educations = Tally::default();
        let mut locations = Tally::default();

        for record in &inner.records {
            let salary = record.predicted_salary;
            sum += salary;
            min = min.min(salary);
            max = max.max(salary);
            job_titles.add::<JobTitle>(record.input.job_title.as_deref());
            educations.add::<Education>(record.input.education.as_deref());
            locations.add::<Location>(record.input.location.as_deref());
        }

        let count = inner.records.len();
        HistoryStatistics {
            total_predictions: count,
            average_salary: sum / count as f64,
            salary_range: SalaryRange { min, max },
            most_common_job_title: job_titles.most_common(),
            most_common_education: educations.most_common(),
            most_common_location: locations.most_common(),
        }
    }

    /// Remove every record and restart ids at 1. Returns how many were removed.
    pub fn clear(&self) -> usize {
        let mut inner = self.inner.write();
        let removed = inner.records.len();
        *inner = HistoryInner::default();
        removed
    }

    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Counts labels; ties go to the label seen first
#[derive(Default)]
struct Tally<'a> {
    counts: HashMap<&'a str, (usize, usize)>,
}

impl<'a> Tally<'a> {
    /// Known labels are counted under their canonical spelling
    fn add<C: Category>(&mut self, label: Option<&'a str>) {
        if let Some(label) = label {
            let label = C::from_label(label).map_or(label.trim(), |c| c.label());
            let order = self.counts.len();
            self.counts.entry(label).or_insert((0, order)).0 += 1;
        }
    }

    fn most_common(&self) -> Option<String> {
        self.counts
            .iter()
            .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
                count_a.cmp(count_b).then(first_b.cmp(first_a))
            })
            .map(|(label, _)| label.to_string())
    }
}
